//! Availability checking for rooms and stay intervals.
//!
//! A room is available for a stay when it exists, is operationally
//! bookable today, and has no Pending or Active reservation whose
//! half-open interval intersects the requested one. These checks are
//! advisory reads; the storage-level overlap trigger is what finally
//! guarantees no double booking at insert time.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::Result;
use crate::reservation::StayDates;
use crate::room::{Room, RoomId, RoomStatus, RoomType};

/// Criteria for narrowing an available-room search.
///
/// A capacity filter matches rooms with EXACTLY that capacity, not "at
/// least": the front desk searches for the room size the party asked
/// for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomSearchFilter {
    /// Keep only rooms of this type.
    pub room_type: Option<RoomType>,
    /// Keep only rooms with exactly this capacity.
    pub capacity: Option<u32>,
}

/// Checks whether a single room can take the given stay.
///
/// Returns false when the room does not exist, is Occupied or under
/// Maintenance, or has a conflicting blocking reservation. A missing
/// room is not an error here; callers that need to distinguish fetch the
/// room first.
///
/// # Errors
///
/// Returns an error if a query fails.
///
/// # Examples
///
/// ```no_run
/// use frontdesk::availability;
/// use frontdesk::database::{Database, DatabaseConfig};
/// use frontdesk::{RoomId, StayDates};
/// use chrono::NaiveDate;
///
/// let db = Database::open(DatabaseConfig::new("/tmp/frontdesk.db")).unwrap();
/// let dates = StayDates::new(
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(15, 0, 0).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 3).unwrap().and_hms_opt(11, 0, 0).unwrap(),
/// ).unwrap();
/// let free = availability::is_available(db.connection(), RoomId::new(1), &dates).unwrap();
/// ```
pub fn is_available(conn: &Connection, room_id: RoomId, dates: &StayDates) -> Result<bool> {
    let Some(room) = Database::get_room(conn, room_id)? else {
        return Ok(false);
    };
    if !room.status().is_bookable() {
        return Ok(false);
    }
    Ok(!Database::has_conflict(conn, room_id, dates)?)
}

/// Finds every room that can take the given stay, narrowed by the filter.
///
/// Only rooms currently in the Available operational status are
/// considered. Each candidate is then checked for calendar conflicts.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn find_available_rooms(
    conn: &Connection,
    dates: &StayDates,
    filter: &RoomSearchFilter,
) -> Result<Vec<Room>> {
    let candidates = Database::rooms_by_status(conn, RoomStatus::Available)?;

    let mut rooms = Vec::new();
    for room in candidates {
        if let Some(room_type) = filter.room_type {
            if room.room_type() != room_type {
                continue;
            }
        }
        if let Some(capacity) = filter.capacity {
            if room.capacity() != capacity {
                continue;
            }
        }
        let Some(id) = room.id() else { continue };
        if Database::has_conflict(conn, id, dates)? {
            continue;
        }
        rooms.push(room);
    }

    Ok(rooms)
}
