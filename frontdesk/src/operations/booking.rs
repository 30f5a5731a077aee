//! Booking operations for creating reservations.
//!
//! Two entry points exist: [`BookingOperations::create_reservation`]
//! books a future stay, and [`BookingOperations::check_in`] handles a
//! walk-in guest by creating a reservation that starts Active.
//!
//! Advance bookings are NOT routed through the availability checker;
//! the storage-level overlap trigger alone decides whether the interval
//! is free. Walk-ins do consult the room's operational status, because
//! the guest is standing at the desk expecting a key.

use chrono::NaiveDateTime;
use rusqlite::TransactionBehavior;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::guest::GuestId;
use crate::notify::{LifecycleEvent, Notifier, ReservationNotice};
use crate::reservation::{NewReservation, Reservation, ReservationStatus, StayDates};
use crate::room::{Room, RoomId};
use crate::Money;

/// A request to book a room for a guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    /// The room to reserve.
    pub room_id: RoomId,
    /// The booking guest.
    pub guest_id: GuestId,
    /// The requested stay interval.
    pub dates: StayDates,
    /// The size of the party.
    pub guests_count: u32,
    /// Any special requests to attach.
    pub special_requests: Option<String>,
}

/// Booking operations for creating reservations.
///
/// All operations are static methods that work on a database instance.
pub struct BookingOperations;

impl BookingOperations {
    /// Books a future stay.
    ///
    /// The reservation is created Pending. The total price is the room's
    /// nightly rate times the number of calendar nights. The notifier is
    /// invoked after the transaction commits; a delivery failure is
    /// logged and does not fail the booking.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The room or guest does not exist
    /// - The party size is zero or exceeds the room's capacity
    /// - The room already has a blocking reservation for an
    ///   intersecting interval
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use frontdesk::database::{Database, DatabaseConfig};
    /// use frontdesk::operations::{BookingOperations, BookingRequest};
    /// use frontdesk::{GuestId, NullNotifier, RoomId, StayDates};
    /// use chrono::{Local, NaiveDate};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/frontdesk.db")).unwrap();
    /// let request = BookingRequest {
    ///     room_id: RoomId::new(1),
    ///     guest_id: GuestId::new(1),
    ///     dates: StayDates::new(
    ///         NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(15, 0, 0).unwrap(),
    ///         NaiveDate::from_ymd_opt(2024, 6, 3).unwrap().and_hms_opt(11, 0, 0).unwrap(),
    ///     ).unwrap(),
    ///     guests_count: 2,
    ///     special_requests: None,
    /// };
    /// let now = Local::now().naive_local();
    /// let reservation =
    ///     BookingOperations::create_reservation(&mut db, &NullNotifier, &request, now).unwrap();
    /// println!("booked reservation {}", reservation.id());
    /// ```
    pub fn create_reservation(
        db: &mut Database,
        notifier: &dyn Notifier,
        request: &BookingRequest,
        now: NaiveDateTime,
    ) -> Result<Reservation> {
        let (reservation, room, guest) = {
            let tx = db
                .connection_mut()
                .transaction_with_behavior(TransactionBehavior::Immediate)?;

            let room = Self::fetch_room(&tx, request.room_id)?;
            let guest =
                Database::get_guest(&tx, request.guest_id)?.ok_or_else(|| Error::NotFound {
                    resource: format!("guest {}", request.guest_id),
                })?;
            Self::validate_party(&room, request.guests_count)?;

            let total_price = price_stay(&room, &request.dates)?;
            let id = Database::insert_reservation(
                &tx,
                &NewReservation {
                    room_id: request.room_id,
                    guest_id: request.guest_id,
                    dates: request.dates,
                    guests_count: request.guests_count,
                    total_price,
                    status: ReservationStatus::Pending,
                    actual_check_in: None,
                    special_requests: request.special_requests.clone(),
                    created_at: now,
                },
            )
            .map_err(|e| Self::name_conflict(e, &room))?;

            let reservation = Database::get_reservation(&tx, id)?.ok_or_else(|| {
                Error::NotFound {
                    resource: format!("reservation {id}"),
                }
            })?;
            tx.commit()?;
            (reservation, room, guest)
        };

        send_notice(
            notifier,
            ReservationNotice::new(LifecycleEvent::BookingConfirmed, &reservation)
                .with_guest(&guest)
                .with_room(&room),
        );

        Ok(reservation)
    }

    /// Checks a walk-in guest straight into a room.
    ///
    /// The reservation is created Active with the real check-in time
    /// stamped, and the room is marked Occupied. Unlike an advance
    /// booking this consults the room's operational status: a room under
    /// Maintenance or already Occupied is refused.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The room or guest does not exist
    /// - The party size is zero or exceeds the room's capacity
    /// - The room is not available for the stay
    pub fn check_in(
        db: &mut Database,
        notifier: &dyn Notifier,
        request: &BookingRequest,
        now: NaiveDateTime,
    ) -> Result<Reservation> {
        let (reservation, room, guest) = {
            let tx = db
                .connection_mut()
                .transaction_with_behavior(TransactionBehavior::Immediate)?;

            let room = Self::fetch_room(&tx, request.room_id)?;
            let guest =
                Database::get_guest(&tx, request.guest_id)?.ok_or_else(|| Error::NotFound {
                    resource: format!("guest {}", request.guest_id),
                })?;
            Self::validate_party(&room, request.guests_count)?;

            if !crate::availability::is_available(&tx, request.room_id, &request.dates)? {
                return Err(Error::RoomUnavailable {
                    room: room.number().to_string(),
                });
            }

            let total_price = price_stay(&room, &request.dates)?;
            let id = Database::insert_reservation(
                &tx,
                &NewReservation {
                    room_id: request.room_id,
                    guest_id: request.guest_id,
                    dates: request.dates,
                    guests_count: request.guests_count,
                    total_price,
                    status: ReservationStatus::Active,
                    actual_check_in: Some(now),
                    special_requests: request.special_requests.clone(),
                    created_at: now,
                },
            )
            .map_err(|e| Self::name_conflict(e, &room))?;

            Database::set_room_status(&tx, request.room_id, crate::RoomStatus::Occupied)?;

            let reservation = Database::get_reservation(&tx, id)?.ok_or_else(|| {
                Error::NotFound {
                    resource: format!("reservation {id}"),
                }
            })?;
            tx.commit()?;
            (reservation, room, guest)
        };

        send_notice(
            notifier,
            ReservationNotice::new(LifecycleEvent::CheckedIn, &reservation)
                .with_guest(&guest)
                .with_room(&room),
        );

        Ok(reservation)
    }

    fn fetch_room(conn: &rusqlite::Connection, room_id: RoomId) -> Result<Room> {
        Database::get_room(conn, room_id)?.ok_or_else(|| Error::NotFound {
            resource: format!("room {room_id}"),
        })
    }

    fn validate_party(room: &Room, guests_count: u32) -> Result<()> {
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
        Ok(())
    }

    /// Replaces a conflict's room id with the human-facing room number.
    fn name_conflict(err: Error, room: &Room) -> Error {
        if err.is_conflict() {
            Error::RoomUnavailable {
                room: room.number().to_string(),
            }
        } else {
            err
        }
    }
}

/// Prices a stay from the room's nightly rate and the calendar nights.
pub(crate) fn price_stay(room: &Room, dates: &StayDates) -> Result<Money> {
    room.rate_per_night()
        .checked_mul(dates.nights())
        .ok_or_else(|| Error::Validation {
            field: "total_price".into(),
            message: "total price overflows".into(),
        })
}

/// Delivers a notice, logging instead of failing when delivery refuses.
pub(crate) fn send_notice(notifier: &dyn Notifier, notice: ReservationNotice) {
    if let Err(e) = notifier.notify(&notice) {
        log::warn!(
            "notification for reservation {} failed: {e}",
            notice.reservation_id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{
        create_test_database, day, sample_guest, sample_room, stay, RecordingNotifier,
    };
    use crate::notify::NullNotifier;

    fn request(room: &Room, guest: &crate::Guest, dates: StayDates) -> BookingRequest {
        BookingRequest {
            room_id: room.id().unwrap(),
            guest_id: guest.id().unwrap(),
            dates,
            guests_count: 2,
            special_requests: None,
        }
    }

    #[test]
    fn test_create_reservation_prices_by_nights() {
        let mut db = create_test_database();
        let room = db.add_room(&sample_room("101")).unwrap();
        let guest = db.add_guest(&sample_guest("ada@example.com")).unwrap();

        let reservation = BookingOperations::create_reservation(
            &mut db,
            &NullNotifier,
            &request(&room, &guest, stay(1, 3)),
            day(1, 9),
        )
        .unwrap();

        assert_eq!(reservation.status(), ReservationStatus::Pending);
        // Two nights at 150.00.
        assert_eq!(reservation.total_price().cents(), 30_000);
        assert_eq!(reservation.actual_check_in(), None);
    }

    #[test]
    fn test_create_reservation_missing_room() {
        let mut db = create_test_database();
        let guest = db.add_guest(&sample_guest("ada@example.com")).unwrap();

        let result = BookingOperations::create_reservation(
            &mut db,
            &NullNotifier,
            &BookingRequest {
                room_id: RoomId::new(42),
                guest_id: guest.id().unwrap(),
                dates: stay(1, 3),
                guests_count: 1,
                special_requests: None,
            },
            day(1, 9),
        );
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_create_reservation_missing_guest() {
        let mut db = create_test_database();
        let room = db.add_room(&sample_room("101")).unwrap();

        let result = BookingOperations::create_reservation(
            &mut db,
            &NullNotifier,
            &BookingRequest {
                room_id: room.id().unwrap(),
                guest_id: GuestId::new(42),
                dates: stay(1, 3),
                guests_count: 1,
                special_requests: None,
            },
            day(1, 9),
        );
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_create_reservation_party_too_large() {
        let mut db = create_test_database();
        let room = db.add_room(&sample_room("101")).unwrap();
        let guest = db.add_guest(&sample_guest("ada@example.com")).unwrap();

        let mut req = request(&room, &guest, stay(1, 3));
        req.guests_count = 5;

        let result =
            BookingOperations::create_reservation(&mut db, &NullNotifier, &req, day(1, 9));
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_create_reservation_conflict_names_room() {
        let mut db = create_test_database();
        let room = db.add_room(&sample_room("101")).unwrap();
        let guest = db.add_guest(&sample_guest("ada@example.com")).unwrap();

        BookingOperations::create_reservation(
            &mut db,
            &NullNotifier,
            &request(&room, &guest, stay(1, 5)),
            day(1, 9),
        )
        .unwrap();

        let result = BookingOperations::create_reservation(
            &mut db,
            &NullNotifier,
            &request(&room, &guest, stay(3, 7)),
            day(1, 9),
        );
        let err = result.unwrap_err();
        assert!(err.is_conflict());
        assert!(err.to_string().contains("101"));
    }

    #[test]
    fn test_create_reservation_skips_availability_gate() {
        let mut db = create_test_database();
        let room = db.add_room(&sample_room("101")).unwrap();
        let guest = db.add_guest(&sample_guest("ada@example.com")).unwrap();

        // Advance bookings ignore the operational status.
        db.update_room_status(room.id().unwrap(), crate::RoomStatus::Maintenance)
            .unwrap();

        let reservation = BookingOperations::create_reservation(
            &mut db,
            &NullNotifier,
            &request(&room, &guest, stay(1, 3)),
            day(1, 9),
        )
        .unwrap();
        assert_eq!(reservation.status(), ReservationStatus::Pending);
    }

    #[test]
    fn test_create_reservation_notifies_after_commit() {
        let mut db = create_test_database();
        let room = db.add_room(&sample_room("101")).unwrap();
        let guest = db.add_guest(&sample_guest("ada@example.com")).unwrap();
        let recorder = RecordingNotifier::new();

        BookingOperations::create_reservation(
            &mut db,
            &recorder,
            &request(&room, &guest, stay(1, 3)),
            day(1, 9),
        )
        .unwrap();

        let notices = recorder.notices.borrow();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].event, LifecycleEvent::BookingConfirmed);
        assert_eq!(notices[0].guest_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(notices[0].guest_email.as_deref(), Some("ada@example.com"));
        assert_eq!(notices[0].room_number.as_deref(), Some("101"));
        assert_eq!(notices[0].room_type, Some(crate::RoomType::Double));
        assert_eq!(notices[0].dates, stay(1, 3));
        assert_eq!(notices[0].guests_count, 2);
        // Two nights at 150.00.
        assert_eq!(notices[0].total_price.cents(), 30_000);
    }

    #[test]
    fn test_create_reservation_survives_notifier_failure() {
        let mut db = create_test_database();
        let room = db.add_room(&sample_room("101")).unwrap();
        let guest = db.add_guest(&sample_guest("ada@example.com")).unwrap();
        let recorder = RecordingNotifier::failing();

        let reservation = BookingOperations::create_reservation(
            &mut db,
            &recorder,
            &request(&room, &guest, stay(1, 3)),
            day(1, 9),
        )
        .unwrap();

        // The booking persisted even though delivery refused.
        let fetched = Database::get_reservation(db.connection(), reservation.id())
            .unwrap()
            .unwrap();
        assert_eq!(fetched.status(), ReservationStatus::Pending);
    }

    #[test]
    fn test_walk_in_check_in() {
        let mut db = create_test_database();
        let room = db.add_room(&sample_room("101")).unwrap();
        let guest = db.add_guest(&sample_guest("ada@example.com")).unwrap();
        let recorder = RecordingNotifier::new();

        let reservation = BookingOperations::check_in(
            &mut db,
            &recorder,
            &request(&room, &guest, stay(1, 3)),
            day(1, 14),
        )
        .unwrap();

        assert_eq!(reservation.status(), ReservationStatus::Active);
        assert_eq!(reservation.actual_check_in(), Some(day(1, 14)));

        let room = Database::get_room(db.connection(), room.id().unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(room.status(), crate::RoomStatus::Occupied);

        assert_eq!(recorder.notices.borrow()[0].event, LifecycleEvent::CheckedIn);
    }

    #[test]
    fn test_walk_in_refuses_maintenance_room() {
        let mut db = create_test_database();
        let room = db.add_room(&sample_room("101")).unwrap();
        let guest = db.add_guest(&sample_guest("ada@example.com")).unwrap();
        db.update_room_status(room.id().unwrap(), crate::RoomStatus::Maintenance)
            .unwrap();

        let result = BookingOperations::check_in(
            &mut db,
            &NullNotifier,
            &request(&room, &guest, stay(1, 3)),
            day(1, 14),
        );
        assert!(result.unwrap_err().is_conflict());
    }

    #[test]
    fn test_walk_in_refuses_conflicting_dates() {
        let mut db = create_test_database();
        let room = db.add_room(&sample_room("101")).unwrap();
        let guest = db.add_guest(&sample_guest("ada@example.com")).unwrap();

        BookingOperations::create_reservation(
            &mut db,
            &NullNotifier,
            &request(&room, &guest, stay(1, 5)),
            day(1, 9),
        )
        .unwrap();

        let result = BookingOperations::check_in(
            &mut db,
            &NullNotifier,
            &request(&room, &guest, stay(2, 4)),
            day(2, 14),
        );
        assert!(result.unwrap_err().is_conflict());
    }
}
