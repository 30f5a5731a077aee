//! Integration tests for the scheduled no-show and overdue sweeps.

mod common;

use common::{add_guest, add_room, at, book, create_test_database, stay};
use frontdesk::{
    Database, LifecycleOperations, NullNotifier, ReservationStatus, RoomStatus, SweepConfig,
    SweepOperations,
};

/// A Pending reservation 30 hours past its check-in is cancelled, and a
/// second run finds nothing left to do.
#[test]
fn test_no_show_sweep_runs_clean_twice() {
    let mut db = create_test_database();
    let room = add_room(&mut db, "101", 10_000);
    let ada = add_guest(&mut db, "ada@example.com");

    // Check-in was 15:00 on the 1st; 21:00 on the 2nd is 30 hours later.
    let booking = book(&mut db, &room, &ada, stay(1, 3)).unwrap();
    let sweep_time = at(2, 21);

    let first =
        SweepOperations::cancel_no_shows(&mut db, &SweepConfig::default(), sweep_time, false)
            .unwrap();
    assert_eq!(first.cancelled_count, 1);

    let cancelled = Database::get_reservation(db.connection(), booking.id())
        .unwrap()
        .unwrap();
    assert_eq!(cancelled.status(), ReservationStatus::Cancelled);

    let second =
        SweepOperations::cancel_no_shows(&mut db, &SweepConfig::default(), sweep_time, false)
            .unwrap();
    assert_eq!(second.cancelled_count, 0);
    assert_eq!(second.skipped_count, 0);
}

#[test]
fn test_sweep_honors_configured_grace() {
    let mut db = create_test_database();
    let room = add_room(&mut db, "101", 10_000);
    let ada = add_guest(&mut db, "ada@example.com");
    book(&mut db, &room, &ada, stay(1, 3)).unwrap();

    // Ten hours late: past a 6-hour grace, inside the default 24.
    let sweep_time = at(2, 1);
    let strict = SweepConfig {
        no_show_grace_hours: 6,
    };

    let lenient =
        SweepOperations::cancel_no_shows(&mut db, &SweepConfig::default(), sweep_time, false)
            .unwrap();
    assert_eq!(lenient.cancelled_count, 0);

    let result = SweepOperations::cancel_no_shows(&mut db, &strict, sweep_time, false).unwrap();
    assert_eq!(result.cancelled_count, 1);
}

#[test]
fn test_overdue_sweep_closes_stay_and_room() {
    let mut db = create_test_database();
    let room = add_room(&mut db, "101", 10_000);
    let ada = add_guest(&mut db, "ada@example.com");
    let room_id = room.id().unwrap();

    let booking = book(&mut db, &room, &ada, stay(1, 3)).unwrap();
    LifecycleOperations::mark_check_in(&mut db, &NullNotifier, booking.id(), at(1, 16)).unwrap();

    // Check-out was 11:00 on the 3rd.
    let sweep_time = at(4, 8);
    let result = SweepOperations::complete_overdue(&mut db, sweep_time, false).unwrap();
    assert_eq!(result.completed_count, 1);

    let completed = Database::get_reservation(db.connection(), booking.id())
        .unwrap()
        .unwrap();
    assert_eq!(completed.status(), ReservationStatus::Completed);
    // The close-out is stamped with the sweep time, not the schedule.
    assert_eq!(completed.actual_check_out(), Some(sweep_time));

    let freed = Database::get_room(db.connection(), room_id).unwrap().unwrap();
    assert_eq!(freed.status(), RoomStatus::Available);
}

#[test]
fn test_process_all_reports_both_passes() {
    let mut db = create_test_database();
    let room_a = add_room(&mut db, "101", 10_000);
    let room_b = add_room(&mut db, "102", 10_000);
    let ada = add_guest(&mut db, "ada@example.com");
    let grace = add_guest(&mut db, "grace@example.com");

    // One no-show, one overdue stay, one future booking to leave alone.
    book(&mut db, &room_a, &ada, stay(1, 3)).unwrap();
    let in_house = book(&mut db, &room_b, &grace, stay(1, 3)).unwrap();
    LifecycleOperations::mark_check_in(&mut db, &NullNotifier, in_house.id(), at(1, 16)).unwrap();
    book(&mut db, &room_a, &grace, stay(20, 22)).unwrap();

    let summary =
        SweepOperations::process_all(&mut db, &SweepConfig::default(), at(4, 8), false).unwrap();
    assert_eq!(summary.no_shows.cancelled_count, 1);
    assert_eq!(summary.overdue.completed_count, 1);

    let untouched =
        Database::reservations_by_status(db.connection(), ReservationStatus::Pending).unwrap();
    assert_eq!(untouched.len(), 1);
}

#[test]
fn test_dry_run_changes_nothing() {
    let mut db = create_test_database();
    let room = add_room(&mut db, "101", 10_000);
    let ada = add_guest(&mut db, "ada@example.com");
    let booking = book(&mut db, &room, &ada, stay(1, 3)).unwrap();

    let summary =
        SweepOperations::process_all(&mut db, &SweepConfig::default(), at(4, 8), true).unwrap();
    assert_eq!(summary.no_shows.cancelled_count, 1);

    let untouched = Database::get_reservation(db.connection(), booking.id())
        .unwrap()
        .unwrap();
    assert_eq!(untouched.status(), ReservationStatus::Pending);
}
