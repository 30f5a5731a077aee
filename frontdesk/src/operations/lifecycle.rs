//! Lifecycle operations on existing reservations.
//!
//! A reservation moves Pending to Active at check-in, Active to
//! Completed at check-out, and either non-terminal status to Cancelled.
//! Terminal reservations never move again. Each transition also keeps
//! the room's operational status in step: check-in occupies the room,
//! check-out and cancelling an in-house stay release it.
//!
//! Status guards live in the UPDATE statements themselves, so a
//! concurrent process that wins the race leaves the loser with a clean
//! invalid-state error instead of a double transition.

use chrono::NaiveDateTime;
use rusqlite::TransactionBehavior;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::guest::Guest;
use crate::notify::{LifecycleEvent, Notifier, ReservationNotice};
use crate::operations::booking::{price_stay, send_notice};
use crate::reservation::{Reservation, ReservationId, ReservationStatus, StayDates};
use crate::room::{Room, RoomStatus};
use crate::Money;

/// Edits to apply to a reservation's mutable booking fields.
///
/// `None` leaves a field untouched. For special requests the outer
/// option selects whether to touch the field at all and the inner one
/// carries the new value, so a request note can be cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationUpdate {
    /// Replacement stay interval. Changing it reprices the stay.
    pub dates: Option<StayDates>,
    /// Replacement party size.
    pub guests_count: Option<u32>,
    /// Replacement special-requests note.
    pub special_requests: Option<Option<String>>,
}

impl ReservationUpdate {
    fn is_empty(&self) -> bool {
        self.dates.is_none() && self.guests_count.is_none() && self.special_requests.is_none()
    }
}

/// Operations that move reservations through their lifecycle.
///
/// All operations are static methods that work on a database instance.
pub struct LifecycleOperations;

impl LifecycleOperations {
    /// Checks in a Pending reservation.
    ///
    /// Stamps the real check-in time, moves the reservation to Active,
    /// and marks the room Occupied. Early arrivals are turned away until
    /// the scheduled check-in date; late ones are accepted as long as
    /// the reservation is still Pending.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The reservation does not exist
    /// - The reservation is not Pending
    /// - `now` is before the scheduled check-in date
    pub fn mark_check_in(
        db: &mut Database,
        notifier: &dyn Notifier,
        id: ReservationId,
        now: NaiveDateTime,
    ) -> Result<Reservation> {
        let (reservation, guest, room) = {
            let tx = db
                .connection_mut()
                .transaction_with_behavior(TransactionBehavior::Immediate)?;

            let reservation = Self::fetch(&tx, id)?;
            if reservation.status() != ReservationStatus::Pending {
                return Err(Error::InvalidState {
                    action: "check in",
                    status: reservation.status(),
                });
            }
            if now.date() < reservation.dates().check_in_date() {
                return Err(Error::CheckInTooEarly {
                    scheduled: reservation.dates().check_in_date(),
                });
            }

            if !Database::activate_reservation(&tx, id, now)? {
                return Err(Error::InvalidState {
                    action: "check in",
                    status: reservation.status(),
                });
            }
            Database::set_room_status(&tx, reservation.room_id(), RoomStatus::Occupied)?;

            let updated = Self::fetch(&tx, id)?;
            let (guest, room) = Self::context(&tx, &updated)?;
            tx.commit()?;
            (updated, guest, room)
        };

        send_notice(
            notifier,
            Self::notice(LifecycleEvent::CheckedIn, &reservation, guest.as_ref(), room.as_ref()),
        );
        Ok(reservation)
    }

    /// Checks out an Active reservation.
    ///
    /// Stamps the real check-out time, moves the reservation to
    /// Completed, and releases the room back to Available.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation does not exist or is not
    /// Active.
    pub fn check_out(
        db: &mut Database,
        notifier: &dyn Notifier,
        id: ReservationId,
        now: NaiveDateTime,
    ) -> Result<Reservation> {
        let (reservation, guest, room) = {
            let tx = db
                .connection_mut()
                .transaction_with_behavior(TransactionBehavior::Immediate)?;

            let reservation = Self::fetch(&tx, id)?;
            if !Database::complete_reservation(&tx, id, now)? {
                return Err(Error::InvalidState {
                    action: "check out",
                    status: reservation.status(),
                });
            }
            Database::set_room_status(&tx, reservation.room_id(), RoomStatus::Available)?;

            let updated = Self::fetch(&tx, id)?;
            let (guest, room) = Self::context(&tx, &updated)?;
            tx.commit()?;
            (updated, guest, room)
        };

        send_notice(
            notifier,
            Self::notice(LifecycleEvent::CheckedOut, &reservation, guest.as_ref(), room.as_ref()),
        );
        Ok(reservation)
    }

    /// Cancels a Pending or Active reservation.
    ///
    /// Cancelling an in-house stay also releases the room; a Pending
    /// booking never occupied it, so the room is left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation does not exist or is already
    /// Completed or Cancelled.
    pub fn cancel(
        db: &mut Database,
        notifier: &dyn Notifier,
        id: ReservationId,
    ) -> Result<Reservation> {
        let (reservation, guest, room) = {
            let tx = db
                .connection_mut()
                .transaction_with_behavior(TransactionBehavior::Immediate)?;

            let reservation = Self::fetch(&tx, id)?;
            // The prior status decides the room release below, so it is
            // captured before the row changes.
            let was_active = reservation.status() == ReservationStatus::Active;

            if !Database::cancel_reservation(&tx, id)? {
                return Err(Error::InvalidState {
                    action: "cancel",
                    status: reservation.status(),
                });
            }
            if was_active {
                Database::set_room_status(&tx, reservation.room_id(), RoomStatus::Available)?;
            }

            let updated = Self::fetch(&tx, id)?;
            let (guest, room) = Self::context(&tx, &updated)?;
            tx.commit()?;
            (updated, guest, room)
        };

        send_notice(
            notifier,
            Self::notice(LifecycleEvent::Cancelled, &reservation, guest.as_ref(), room.as_ref()),
        );
        Ok(reservation)
    }

    /// Edits the mutable booking fields of a non-terminal reservation.
    ///
    /// When the dates change the total price is recomputed from the
    /// room's nightly rate. The new interval is NOT re-checked against
    /// other bookings; the desk may deliberately move a stay onto dates
    /// it has just freed, and takes responsibility for the calendar.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The reservation does not exist
    /// - The reservation is Completed or Cancelled
    /// - The new party size is zero or exceeds the room's capacity
    pub fn update(
        db: &mut Database,
        id: ReservationId,
        update: &ReservationUpdate,
    ) -> Result<Reservation> {
        let tx = db
            .connection_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let reservation = Self::fetch(&tx, id)?;
        if reservation.status().is_terminal() {
            return Err(Error::InvalidState {
                action: "update",
                status: reservation.status(),
            });
        }
        if update.is_empty() {
            tx.commit()?;
            return Ok(reservation);
        }

        let room = Database::get_room(&tx, reservation.room_id())?.ok_or_else(|| {
            Error::NotFound {
                resource: format!("room {}", reservation.room_id()),
            }
        })?;

        let dates = update.dates.unwrap_or(*reservation.dates());
        let guests_count = update.guests_count.unwrap_or(reservation.guests_count());
        if guests_count == 0 || guests_count > room.capacity() {
            return Err(Error::Validation {
                field: "guests_count".into(),
                message: format!(
                    "party of {guests_count} does not fit room {} (capacity {})",
                    room.number(),
                    room.capacity()
                ),
            });
        }
        let total_price: Money = if update.dates.is_some() {
            price_stay(&room, &dates)?
        } else {
            reservation.total_price()
        };
        let special_requests = match &update.special_requests {
            Some(value) => value.as_deref(),
            None => reservation.special_requests(),
        };

        if !Database::update_reservation_fields(
            &tx,
            id,
            &dates,
            guests_count,
            total_price,
            special_requests,
        )? {
            return Err(Error::NotFound {
                resource: format!("reservation {id}"),
            });
        }

        let updated = Self::fetch(&tx, id)?;
        tx.commit()?;
        Ok(updated)
    }

    fn fetch(conn: &rusqlite::Connection, id: ReservationId) -> Result<Reservation> {
        Database::get_reservation(conn, id)?.ok_or_else(|| Error::NotFound {
            resource: format!("reservation {id}"),
        })
    }

    /// Looks up the guest and room records a notice carries.
    fn context(
        conn: &rusqlite::Connection,
        reservation: &Reservation,
    ) -> Result<(Option<Guest>, Option<Room>)> {
        let guest = Database::get_guest(conn, reservation.guest_id())?;
        let room = Database::get_room(conn, reservation.room_id())?;
        Ok((guest, room))
    }

    fn notice(
        event: LifecycleEvent,
        reservation: &Reservation,
        guest: Option<&Guest>,
        room: Option<&Room>,
    ) -> ReservationNotice {
        let mut notice = ReservationNotice::new(event, reservation);
        if let Some(guest) = guest {
            notice = notice.with_guest(guest);
        }
        if let Some(room) = room {
            notice = notice.with_room(room);
        }
        notice
    }
}
