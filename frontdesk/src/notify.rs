//! Notification hooks for reservation lifecycle events.
//!
//! Operations emit a notice after their transaction commits. Delivery is
//! best effort: a failing notifier never rolls back or fails the
//! operation that triggered it, it is only logged.

use std::fmt;

use crate::error::Result;
use crate::guest::Guest;
use crate::reservation::{Reservation, ReservationId, StayDates};
use crate::room::{Room, RoomType};
use crate::Money;

/// The lifecycle event a notice reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A new booking was confirmed.
    BookingConfirmed,
    /// The guest checked in.
    CheckedIn,
    /// The guest checked out.
    CheckedOut,
    /// The booking was cancelled.
    Cancelled,
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BookingConfirmed => "booking confirmed",
            Self::CheckedIn => "checked in",
            Self::CheckedOut => "checked out",
            Self::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// A notice about a reservation, handed to the configured notifier.
///
/// The stay details come straight from the reservation. Guest and room
/// context is attached by the emitting operation when it holds the
/// records; a notice can still be delivered without them.
#[derive(Debug, Clone)]
pub struct ReservationNotice {
    /// The event being reported.
    pub event: LifecycleEvent,
    /// The reservation the event concerns.
    pub reservation_id: ReservationId,
    /// The booked stay interval.
    pub dates: StayDates,
    /// The size of the party.
    pub guests_count: u32,
    /// The total price of the stay.
    pub total_price: Money,
    /// The guest's full name, when known.
    pub guest_name: Option<String>,
    /// The guest's email address, when known.
    pub guest_email: Option<String>,
    /// The room number, when known.
    pub room_number: Option<String>,
    /// The room type, when known.
    pub room_type: Option<RoomType>,
}

impl ReservationNotice {
    /// Builds a notice for the given event and reservation.
    #[must_use]
    pub fn new(event: LifecycleEvent, reservation: &Reservation) -> Self {
        Self {
            event,
            reservation_id: reservation.id(),
            dates: *reservation.dates(),
            guests_count: reservation.guests_count(),
            total_price: reservation.total_price(),
            guest_name: None,
            guest_email: None,
            room_number: None,
            room_type: None,
        }
    }

    /// Attaches the guest's name and email address.
    #[must_use]
    pub fn with_guest(mut self, guest: &Guest) -> Self {
        self.guest_name = Some(guest.full_name());
        self.guest_email = Some(guest.email().to_string());
        self
    }

    /// Attaches the room's number and type.
    #[must_use]
    pub fn with_room(mut self, room: &Room) -> Self {
        self.room_number = Some(room.number().to_string());
        self.room_type = Some(room.room_type());
        self
    }
}

/// A sink for reservation lifecycle notices.
///
/// Implementations may send email, post to a message queue, or simply
/// record the notice. Implementations should be cheap to call; operations
/// invoke them synchronously after commit.
pub trait Notifier {
    /// Delivers one notice.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails. Callers log and continue.
    fn notify(&self, notice: &ReservationNotice) -> Result<()>;
}

/// A notifier that drops every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notice: &ReservationNotice) -> Result<()> {
        Ok(())
    }
}

/// A notifier that writes each notice to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &ReservationNotice) -> Result<()> {
        log::info!(
            "reservation {} {}: {} -> {}, {} guest(s), {}{}{}",
            notice.reservation_id,
            notice.event,
            notice.dates.check_in().format("%Y-%m-%d %H:%M"),
            notice.dates.check_out().format("%Y-%m-%d %H:%M"),
            notice.guests_count,
            notice.total_price,
            notice
                .room_number
                .as_deref()
                .map(|n| format!(" (room {n})"))
                .unwrap_or_default(),
            notice
                .guest_email
                .as_deref()
                .map(|e| format!(" for {e}"))
                .unwrap_or_default(),
        );
        Ok(())
    }
}
