//! Database CRUD operations for reservations.
//!
//! All status-changing updates carry a status guard in their WHERE
//! clause, so a transition observed by one process cannot be replayed by
//! another.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};

use crate::error::{Error, Result};
use crate::guest::GuestId;
use crate::reservation::{NewReservation, Reservation, ReservationId, ReservationStatus, StayDates};
use crate::room::RoomId;

use super::connection::Database;
use super::schema::INSERT_RESERVATION;
use super::{format_datetime, parse_datetime};

/// Helper function to deserialize a reservation from a database row.
///
/// Expects row fields in this order: id, `room_id`, `guest_id`,
/// `check_in`, `check_out`, `guests_count`, `total_cents`, status,
/// `actual_check_in`, `actual_check_out`, `special_requests`,
/// `created_at`.
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let room_id: i64 = row.get(1)?;
    let guest_id: i64 = row.get(2)?;
    let check_in: String = row.get(3)?;
    let check_out: String = row.get(4)?;
    let guests_count: u32 = row.get(5)?;
    let total_cents: i64 = row.get(6)?;
    let status: String = row.get(7)?;
    let actual_check_in: Option<String> = row.get(8)?;
    let actual_check_out: Option<String> = row.get(9)?;
    let special_requests: Option<String> = row.get(10)?;
    let created_at: String = row.get(11)?;

    let dates = StayDates::new(parse_datetime(&check_in)?, parse_datetime(&check_out)?)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    let status: ReservationStatus = status
        .parse()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    let total_price = crate::Money::from_cents(total_cents)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    Ok(Reservation::from_parts(
        ReservationId::new(id),
        RoomId::new(room_id),
        GuestId::new(guest_id),
        dates,
        guests_count,
        total_price,
        status,
        actual_check_in.as_deref().map(parse_datetime).transpose()?,
        actual_check_out.as_deref().map(parse_datetime).transpose()?,
        special_requests,
        parse_datetime(&created_at)?,
    ))
}

const SELECT_RESERVATION: &str = r"
    SELECT id, room_id, guest_id, check_in, check_out, guests_count, total_cents,
           status, actual_check_in, actual_check_out, special_requests, created_at
    FROM reservations
    WHERE id = ?
";

const LIST_RESERVATIONS: &str = r"
    SELECT id, room_id, guest_id, check_in, check_out, guests_count, total_cents,
           status, actual_check_in, actual_check_out, special_requests, created_at
    FROM reservations
    ORDER BY check_in, id
";

const LIST_RESERVATIONS_PAGE: &str = r"
    SELECT id, room_id, guest_id, check_in, check_out, guests_count, total_cents,
           status, actual_check_in, actual_check_out, special_requests, created_at
    FROM reservations
    ORDER BY check_in, id
    LIMIT ? OFFSET ?
";

const SELECT_IN_RANGE: &str = r"
    SELECT id, room_id, guest_id, check_in, check_out, guests_count, total_cents,
           status, actual_check_in, actual_check_out, special_requests, created_at
    FROM reservations
    WHERE check_in >= ? AND check_out <= ?
    ORDER BY check_in, id
";

const SELECT_CONFLICTING: &str = r"
    SELECT id, room_id, guest_id, check_in, check_out, guests_count, total_cents,
           status, actual_check_in, actual_check_out, special_requests, created_at
    FROM reservations
    WHERE room_id = ?
      AND status IN ('Pending', 'Active')
      AND check_in < ?
      AND ? < check_out
    ORDER BY check_in
";

const SELECT_BY_STATUS: &str = r"
    SELECT id, room_id, guest_id, check_in, check_out, guests_count, total_cents,
           status, actual_check_in, actual_check_out, special_requests, created_at
    FROM reservations
    WHERE status = ?
    ORDER BY check_in, id
";

const SELECT_BY_GUEST: &str = r"
    SELECT id, room_id, guest_id, check_in, check_out, guests_count, total_cents,
           status, actual_check_in, actual_check_out, special_requests, created_at
    FROM reservations
    WHERE guest_id = ?
    ORDER BY check_in, id
";

const SELECT_BY_ROOM: &str = r"
    SELECT id, room_id, guest_id, check_in, check_out, guests_count, total_cents,
           status, actual_check_in, actual_check_out, special_requests, created_at
    FROM reservations
    WHERE room_id = ?
    ORDER BY check_in, id
";

const SELECT_TODAYS_CHECKINS: &str = r"
    SELECT id, room_id, guest_id, check_in, check_out, guests_count, total_cents,
           status, actual_check_in, actual_check_out, special_requests, created_at
    FROM reservations
    WHERE status IN ('Pending', 'Active') AND date(check_in) = ?
    ORDER BY check_in, id
";

const SELECT_TODAYS_CHECKOUTS: &str = r"
    SELECT id, room_id, guest_id, check_in, check_out, guests_count, total_cents,
           status, actual_check_in, actual_check_out, special_requests, created_at
    FROM reservations
    WHERE status = 'Active' AND date(check_out) = ?
    ORDER BY check_out, id
";

const SELECT_NO_SHOW_CANDIDATES: &str = r"
    SELECT id, room_id, guest_id, check_in, check_out, guests_count, total_cents,
           status, actual_check_in, actual_check_out, special_requests, created_at
    FROM reservations
    WHERE status = 'Pending' AND check_in < ?
    ORDER BY check_in, id
";

const SELECT_OVERDUE_CANDIDATES: &str = r"
    SELECT id, room_id, guest_id, check_in, check_out, guests_count, total_cents,
           status, actual_check_in, actual_check_out, special_requests, created_at
    FROM reservations
    WHERE status = 'Active' AND check_out < ?
    ORDER BY check_out, id
";

const ACTIVATE_RESERVATION: &str = r"
    UPDATE reservations
    SET status = 'Active', actual_check_in = ?
    WHERE id = ? AND status = 'Pending'
";

const COMPLETE_RESERVATION: &str = r"
    UPDATE reservations
    SET status = 'Completed', actual_check_out = ?
    WHERE id = ? AND status = 'Active'
";

const CANCEL_RESERVATION: &str = r"
    UPDATE reservations
    SET status = 'Cancelled'
    WHERE id = ? AND status IN ('Pending', 'Active')
";

const UPDATE_RESERVATION_FIELDS: &str = r"
    UPDATE reservations
    SET check_in = ?, check_out = ?, guests_count = ?, total_cents = ?, special_requests = ?
    WHERE id = ?
";

impl Database {
    /// Inserts a reservation on an existing connection or transaction.
    ///
    /// The insert passes through the overlap exclusion trigger, which
    /// rejects any Pending or Active reservation whose interval
    /// intersects an existing blocking one for the same room.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RoomUnavailable`] if the trigger aborts the
    /// insert, or a database error for other failures.
    pub fn insert_reservation(conn: &Connection, new: &NewReservation) -> Result<ReservationId> {
        let result = conn.execute(
            INSERT_RESERVATION,
            params![
                new.room_id.value(),
                new.guest_id.value(),
                format_datetime(new.dates.check_in()),
                format_datetime(new.dates.check_out()),
                new.guests_count,
                new.total_price.cents(),
                new.status.as_str(),
                new.actual_check_in.map(format_datetime),
                Option::<String>::None,
                new.special_requests.as_deref(),
                format_datetime(new.created_at),
            ],
        );

        match result {
            Ok(_) => Ok(ReservationId::new(conn.last_insert_rowid())),
            Err(e) if is_overlap_abort(&e) => Err(Error::RoomUnavailable {
                room: new.room_id.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetches a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
        match conn.query_row(SELECT_RESERVATION, [id.value()], row_to_reservation) {
            Ok(reservation) => Ok(Some(reservation)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists all reservations ordered by scheduled check-in.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations(conn: &Connection) -> Result<Vec<Reservation>> {
        Self::query_reservations(conn, LIST_RESERVATIONS, [])
    }

    /// Lists one page of reservations ordered by scheduled check-in.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_page(
        conn: &Connection,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Reservation>> {
        Self::query_reservations(conn, LIST_RESERVATIONS_PAGE, params![limit, offset])
    }

    /// Lists reservations whose scheduled stay falls entirely inside the
    /// given window.
    ///
    /// Both bounds are inclusive: a stay qualifies when its check-in is
    /// at or after `from` and its check-out is at or before `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn reservations_in_range(
        conn: &Connection,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Reservation>> {
        Self::query_reservations(
            conn,
            SELECT_IN_RANGE,
            params![format_datetime(from), format_datetime(to)],
        )
    }

    /// Finds blocking reservations for a room whose intervals intersect
    /// the given stay.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_conflicting(
        conn: &Connection,
        room_id: RoomId,
        dates: &StayDates,
    ) -> Result<Vec<Reservation>> {
        Self::query_reservations(
            conn,
            SELECT_CONFLICTING,
            params![
                room_id.value(),
                format_datetime(dates.check_out()),
                format_datetime(dates.check_in()),
            ],
        )
    }

    /// Returns true if the room has any blocking reservation intersecting
    /// the given stay.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn has_conflict(conn: &Connection, room_id: RoomId, dates: &StayDates) -> Result<bool> {
        let count: i64 = conn.query_row(
            r"SELECT COUNT(*) FROM reservations
              WHERE room_id = ? AND status IN ('Pending', 'Active')
                AND check_in < ? AND ? < check_out",
            params![
                room_id.value(),
                format_datetime(dates.check_out()),
                format_datetime(dates.check_in()),
            ],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Lists reservations in the given lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn reservations_by_status(
        conn: &Connection,
        status: ReservationStatus,
    ) -> Result<Vec<Reservation>> {
        Self::query_reservations(conn, SELECT_BY_STATUS, [status.as_str()])
    }

    /// Lists reservations booked by the given guest.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn reservations_by_guest(conn: &Connection, guest_id: GuestId) -> Result<Vec<Reservation>> {
        Self::query_reservations(conn, SELECT_BY_GUEST, [guest_id.value()])
    }

    /// Lists reservations for the given room.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn reservations_by_room(conn: &Connection, room_id: RoomId) -> Result<Vec<Reservation>> {
        Self::query_reservations(conn, SELECT_BY_ROOM, [room_id.value()])
    }

    /// Lists Pending or Active reservations scheduled to check in on the
    /// given day.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn todays_checkins(conn: &Connection, today: NaiveDate) -> Result<Vec<Reservation>> {
        Self::query_reservations(conn, SELECT_TODAYS_CHECKINS, [today.to_string()])
    }

    /// Lists Active reservations scheduled to check out on the given day.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn todays_checkouts(conn: &Connection, today: NaiveDate) -> Result<Vec<Reservation>> {
        Self::query_reservations(conn, SELECT_TODAYS_CHECKOUTS, [today.to_string()])
    }

    /// Lists Pending reservations whose scheduled check-in is before the
    /// cutoff instant.
    ///
    /// The cutoff is the current time minus the no-show grace period.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn no_show_candidates(conn: &Connection, cutoff: NaiveDateTime) -> Result<Vec<Reservation>> {
        Self::query_reservations(conn, SELECT_NO_SHOW_CANDIDATES, [format_datetime(cutoff)])
    }

    /// Lists Active reservations whose scheduled check-out is already past.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn overdue_candidates(conn: &Connection, now: NaiveDateTime) -> Result<Vec<Reservation>> {
        Self::query_reservations(conn, SELECT_OVERDUE_CANDIDATES, [format_datetime(now)])
    }

    /// Moves a Pending reservation to Active, stamping the real check-in
    /// time.
    ///
    /// Returns false if the reservation was not Pending (or does not
    /// exist), in which case nothing changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn activate_reservation(
        conn: &Connection,
        id: ReservationId,
        at: NaiveDateTime,
    ) -> Result<bool> {
        let rows = conn.execute(ACTIVATE_RESERVATION, params![format_datetime(at), id.value()])?;
        Ok(rows > 0)
    }

    /// Moves an Active reservation to Completed, stamping the real
    /// check-out time.
    ///
    /// Returns false if the reservation was not Active (or does not
    /// exist), in which case nothing changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn complete_reservation(
        conn: &Connection,
        id: ReservationId,
        at: NaiveDateTime,
    ) -> Result<bool> {
        let rows = conn.execute(COMPLETE_RESERVATION, params![format_datetime(at), id.value()])?;
        Ok(rows > 0)
    }

    /// Moves a non-terminal reservation to Cancelled.
    ///
    /// Returns false if the reservation was already terminal (or does not
    /// exist), in which case nothing changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn cancel_reservation(conn: &Connection, id: ReservationId) -> Result<bool> {
        let rows = conn.execute(CANCEL_RESERVATION, [id.value()])?;
        Ok(rows > 0)
    }

    /// Rewrites the mutable booking fields of a reservation.
    ///
    /// This update is not routed through the overlap trigger; dates may
    /// be moved onto an already-booked interval.
    ///
    /// Returns false if the reservation does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_reservation_fields(
        conn: &Connection,
        id: ReservationId,
        dates: &StayDates,
        guests_count: u32,
        total_price: crate::Money,
        special_requests: Option<&str>,
    ) -> Result<bool> {
        let rows = conn.execute(
            UPDATE_RESERVATION_FIELDS,
            params![
                format_datetime(dates.check_in()),
                format_datetime(dates.check_out()),
                guests_count,
                total_price.cents(),
                special_requests,
                id.value(),
            ],
        )?;
        Ok(rows > 0)
    }

    fn query_reservations<P: rusqlite::Params>(
        conn: &Connection,
        sql: &str,
        params: P,
    ) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(sql)?;
        let reservations = stmt
            .query_map(params, row_to_reservation)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reservations)
    }
}

/// Checks whether a rusqlite error is the overlap trigger's abort.
fn is_overlap_abort(err: &rusqlite::Error) -> bool {
    if let rusqlite::Error::SqliteFailure(_, Some(message)) = err {
        message.contains("overlapping reservation")
    } else {
        false
    }
}
