//! Reservation types for tracking guest stays.
//!
//! This module provides the reservation record, its lifecycle status, and
//! the [`StayDates`] pair that carries the half-open booked interval.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::guest::GuestId;
use crate::room::RoomId;
use crate::Money;

#[cfg(test)]
mod proptests;

/// A unique identifier for a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Creates a reservation id from a raw database id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The lifecycle status of a reservation.
///
/// Reservations move `Pending` to `Active` at check-in, then to
/// `Completed` at check-out. Cancellation may happen from either
/// non-terminal status. Terminal statuses are never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationStatus {
    /// Booked, the guest has not arrived yet.
    Pending,
    /// The guest is checked in.
    Active,
    /// The stay finished normally.
    Completed,
    /// The booking was called off.
    Cancelled,
}

impl ReservationStatus {
    /// Returns the canonical string form used in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Returns true if no further transitions are allowed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns true if a reservation in this status occupies its room's
    /// calendar and counts against availability.
    #[must_use]
    pub const fn blocks_availability(self) -> bool {
        matches!(self, Self::Pending | Self::Active)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ValidationError {
                field: "status".into(),
                message: format!(
                    "unknown reservation status '{s}' (expected Pending, Active, Completed, or Cancelled)"
                ),
            }),
        }
    }
}

/// A booked stay interval.
///
/// The interval is half-open: the check-in instant is included and the
/// check-out instant is excluded. Two stays where one ends exactly when
/// the other begins do not overlap.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use frontdesk::StayDates;
///
/// let day = |d: u32| {
///     NaiveDate::from_ymd_opt(2024, 6, d)
///         .unwrap()
///         .and_hms_opt(15, 0, 0)
///         .unwrap()
/// };
///
/// let first = StayDates::new(day(1), day(3)).unwrap();
/// let second = StayDates::new(day(3), day(5)).unwrap();
/// assert!(!first.overlaps(&second));
/// assert_eq!(first.nights(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayDates {
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
}

impl StayDates {
    /// Creates a stay interval.
    ///
    /// # Errors
    ///
    /// Returns an error unless `check_out` is strictly after `check_in`.
    pub fn new(check_in: NaiveDateTime, check_out: NaiveDateTime) -> Result<Self, ValidationError> {
        if check_out <= check_in {
            return Err(ValidationError {
                field: "check_out".into(),
                message: "check-out must be after check-in".into(),
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Returns the scheduled check-in instant.
    #[must_use]
    pub const fn check_in(&self) -> NaiveDateTime {
        self.check_in
    }

    /// Returns the scheduled check-out instant.
    #[must_use]
    pub const fn check_out(&self) -> NaiveDateTime {
        self.check_out
    }

    /// Returns the scheduled check-in date.
    #[must_use]
    pub const fn check_in_date(&self) -> NaiveDate {
        self.check_in.date()
    }

    /// Returns the number of nights, as a calendar-date difference.
    ///
    /// The time-of-day components are ignored, so a stay arriving late on
    /// the 1st and leaving early on the 3rd is still two nights. An
    /// interval inside one calendar day prices at zero nights.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.check_out.date() - self.check_in.date()).num_days()
    }

    /// Returns true if the two half-open intervals share any instant.
    ///
    /// Edge-touching intervals do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}

/// The fields of a reservation that has not been persisted yet.
///
/// The id is assigned by the database on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    /// The room being reserved.
    pub room_id: RoomId,
    /// The booking guest.
    pub guest_id: GuestId,
    /// The booked stay interval.
    pub dates: StayDates,
    /// The size of the party.
    pub guests_count: u32,
    /// The total price for the stay.
    pub total_price: Money,
    /// The initial lifecycle status.
    pub status: ReservationStatus,
    /// The real check-in timestamp, for walk-ins created already Active.
    pub actual_check_in: Option<NaiveDateTime>,
    /// Any special requests attached to the booking.
    pub special_requests: Option<String>,
    /// The creation timestamp.
    pub created_at: NaiveDateTime,
}

/// A reservation of a room by a guest, with pricing and lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    room_id: RoomId,
    guest_id: GuestId,
    dates: StayDates,
    guests_count: u32,
    total_price: Money,
    status: ReservationStatus,
    actual_check_in: Option<NaiveDateTime>,
    actual_check_out: Option<NaiveDateTime>,
    special_requests: Option<String>,
    created_at: NaiveDateTime,
}

impl Reservation {
    /// Assembles a reservation from its stored parts.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub const fn from_parts(
        id: ReservationId,
        room_id: RoomId,
        guest_id: GuestId,
        dates: StayDates,
        guests_count: u32,
        total_price: Money,
        status: ReservationStatus,
        actual_check_in: Option<NaiveDateTime>,
        actual_check_out: Option<NaiveDateTime>,
        special_requests: Option<String>,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            room_id,
            guest_id,
            dates,
            guests_count,
            total_price,
            status,
            actual_check_in,
            actual_check_out,
            special_requests,
            created_at,
        }
    }

    /// Returns the reservation id.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the reserved room's id.
    #[must_use]
    pub const fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Returns the booking guest's id.
    #[must_use]
    pub const fn guest_id(&self) -> GuestId {
        self.guest_id
    }

    /// Returns the booked stay interval.
    #[must_use]
    pub const fn dates(&self) -> &StayDates {
        &self.dates
    }

    /// Returns the size of the party.
    #[must_use]
    pub const fn guests_count(&self) -> u32 {
        self.guests_count
    }

    /// Returns the total price for the stay.
    #[must_use]
    pub const fn total_price(&self) -> Money {
        self.total_price
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns the real check-in timestamp, once the guest has arrived.
    #[must_use]
    pub const fn actual_check_in(&self) -> Option<NaiveDateTime> {
        self.actual_check_in
    }

    /// Returns the real check-out timestamp, once the stay has ended.
    #[must_use]
    pub const fn actual_check_out(&self) -> Option<NaiveDateTime> {
        self.actual_check_out
    }

    /// Returns any special requests attached to the booking.
    #[must_use]
    pub fn special_requests(&self) -> Option<&str> {
        self.special_requests.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }
}
