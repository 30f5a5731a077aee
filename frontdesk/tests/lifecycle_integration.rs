//! End-to-end lifecycle tests covering booking, check-in, check-out,
//! and cancellation against a real database file.

mod common;

use common::{add_guest, add_room, at, book, create_test_database, stay};
use frontdesk::{
    availability, Database, LifecycleOperations, NullNotifier, ReservationStatus, RoomStatus,
    StayDates,
};

/// Walks one reservation through its whole life while a competing
/// booking waits for the room to free up.
///
/// Room 101 at 100.00 a night. Booking A holds June 1 to June 3, so a
/// June 2 to June 4 attempt must fail until A has checked out.
#[test]
fn test_room_101_full_story() {
    let mut db = create_test_database();
    let room = add_room(&mut db, "101", 10_000);
    let ada = add_guest(&mut db, "ada@example.com");
    let grace = add_guest(&mut db, "grace@example.com");
    let room_id = room.id().unwrap();

    let booking_a = book(&mut db, &room, &ada, stay(1, 3)).unwrap();
    assert_eq!(booking_a.status(), ReservationStatus::Pending);
    // Two nights at 100.00.
    assert_eq!(booking_a.total_price().cents(), 20_000);

    // June 2 to June 4 overlaps on the night of the 2nd.
    let overlapping = StayDates::new(at(2, 15), at(4, 11)).unwrap();
    assert!(!availability::is_available(db.connection(), room_id, &overlapping).unwrap());
    assert!(book(&mut db, &room, &grace, overlapping).unwrap_err().is_conflict());

    // Check A in: the reservation goes Active and the room is taken.
    let active =
        LifecycleOperations::mark_check_in(&mut db, &NullNotifier, booking_a.id(), at(1, 16))
            .unwrap();
    assert_eq!(active.status(), ReservationStatus::Active);
    assert!(active.actual_check_in().is_some());
    let occupied = Database::get_room(db.connection(), room_id).unwrap().unwrap();
    assert_eq!(occupied.status(), RoomStatus::Occupied);

    // Check A out: the room frees up and the stay closes.
    let done =
        LifecycleOperations::check_out(&mut db, &NullNotifier, booking_a.id(), at(3, 10)).unwrap();
    assert_eq!(done.status(), ReservationStatus::Completed);
    let freed = Database::get_room(db.connection(), room_id).unwrap().unwrap();
    assert_eq!(freed.status(), RoomStatus::Available);

    // Completed stays no longer block the calendar.
    let booking_b = book(&mut db, &room, &grace, overlapping).unwrap();
    assert_eq!(booking_b.status(), ReservationStatus::Pending);
}

#[test]
fn test_back_to_back_stays_share_a_boundary() {
    let mut db = create_test_database();
    let room = add_room(&mut db, "101", 10_000);
    let ada = add_guest(&mut db, "ada@example.com");
    let grace = add_guest(&mut db, "grace@example.com");

    // Day 1 to 2 and day 2 to 3 touch at the boundary without conflict.
    book(&mut db, &room, &ada, stay(1, 2)).unwrap();
    book(&mut db, &room, &grace, stay(2, 3)).unwrap();

    let all = Database::list_reservations(db.connection()).unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn test_cancelled_booking_frees_the_calendar() {
    let mut db = create_test_database();
    let room = add_room(&mut db, "101", 10_000);
    let ada = add_guest(&mut db, "ada@example.com");
    let grace = add_guest(&mut db, "grace@example.com");

    let booking = book(&mut db, &room, &ada, stay(1, 5)).unwrap();
    assert!(book(&mut db, &room, &grace, stay(2, 4)).unwrap_err().is_conflict());

    LifecycleOperations::cancel(&mut db, &NullNotifier, booking.id()).unwrap();
    book(&mut db, &room, &grace, stay(2, 4)).unwrap();
}

#[test]
fn test_cancel_in_house_stay_releases_room() {
    let mut db = create_test_database();
    let room = add_room(&mut db, "101", 10_000);
    let ada = add_guest(&mut db, "ada@example.com");
    let room_id = room.id().unwrap();

    let booking = book(&mut db, &room, &ada, stay(1, 3)).unwrap();
    LifecycleOperations::mark_check_in(&mut db, &NullNotifier, booking.id(), at(1, 16)).unwrap();

    let cancelled =
        LifecycleOperations::cancel(&mut db, &NullNotifier, booking.id()).unwrap();
    assert_eq!(cancelled.status(), ReservationStatus::Cancelled);

    let freed = Database::get_room(db.connection(), room_id).unwrap().unwrap();
    assert_eq!(freed.status(), RoomStatus::Available);
}

#[test]
fn test_terminal_reservations_never_move_again() {
    let mut db = create_test_database();
    let room = add_room(&mut db, "101", 10_000);
    let ada = add_guest(&mut db, "ada@example.com");

    let booking = book(&mut db, &room, &ada, stay(1, 3)).unwrap();
    LifecycleOperations::cancel(&mut db, &NullNotifier, booking.id()).unwrap();

    let check_in =
        LifecycleOperations::mark_check_in(&mut db, &NullNotifier, booking.id(), at(1, 16));
    assert!(check_in.unwrap_err().is_invalid_state());

    let check_out =
        LifecycleOperations::check_out(&mut db, &NullNotifier, booking.id(), at(3, 10));
    assert!(check_out.unwrap_err().is_invalid_state());

    let cancel = LifecycleOperations::cancel(&mut db, &NullNotifier, booking.id());
    assert!(cancel.unwrap_err().is_invalid_state());
}

#[test]
fn test_state_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frontdesk.db");

    let booking_id = {
        let mut db = frontdesk::Database::open(frontdesk::DatabaseConfig::new(&path)).unwrap();
        let room = add_room(&mut db, "101", 10_000);
        let ada = add_guest(&mut db, "ada@example.com");
        let booking = book(&mut db, &room, &ada, stay(1, 3)).unwrap();
        LifecycleOperations::mark_check_in(&mut db, &NullNotifier, booking.id(), at(1, 16))
            .unwrap();
        booking.id()
    };

    let db = frontdesk::Database::open(frontdesk::DatabaseConfig::new(&path)).unwrap();
    let booking = Database::get_reservation(db.connection(), booking_id)
        .unwrap()
        .unwrap();
    assert_eq!(booking.status(), ReservationStatus::Active);
}
