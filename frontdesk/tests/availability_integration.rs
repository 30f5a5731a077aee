//! Integration tests for availability checks and the storage-level
//! overlap guard.

mod common;

use common::{add_guest, add_room, at, book, create_test_database, stay};
use frontdesk::{
    availability, Database, LifecycleOperations, Money, NullNotifier, Room, RoomSearchFilter,
    RoomStatus, RoomType, StayDates,
};

#[test]
fn test_non_overlapping_pairs_coexist() {
    let mut db = create_test_database();
    let room = add_room(&mut db, "101", 10_000);
    let ada = add_guest(&mut db, "ada@example.com");
    let grace = add_guest(&mut db, "grace@example.com");

    book(&mut db, &room, &ada, stay(1, 4)).unwrap();
    book(&mut db, &room, &grace, stay(4, 7)).unwrap();
    book(&mut db, &room, &ada, stay(10, 12)).unwrap();

    assert_eq!(Database::list_reservations(db.connection()).unwrap().len(), 3);
}

#[test]
fn test_overlap_is_rejected_in_both_directions() {
    let mut db = create_test_database();
    let room = add_room(&mut db, "101", 10_000);
    let ada = add_guest(&mut db, "ada@example.com");
    let grace = add_guest(&mut db, "grace@example.com");

    book(&mut db, &room, &ada, stay(3, 6)).unwrap();

    // Late-starting, early-starting, contained, and containing stays
    // all intersect the held interval.
    for conflicting in [stay(5, 8), stay(1, 4), stay(4, 5), stay(2, 7)] {
        assert!(book(&mut db, &room, &grace, conflicting).unwrap_err().is_conflict());
    }
}

#[test]
fn test_conflicts_are_scoped_per_room() {
    let mut db = create_test_database();
    let room_a = add_room(&mut db, "101", 10_000);
    let room_b = add_room(&mut db, "102", 10_000);
    let ada = add_guest(&mut db, "ada@example.com");
    let grace = add_guest(&mut db, "grace@example.com");

    book(&mut db, &room_a, &ada, stay(1, 5)).unwrap();
    // Identical dates on another room are fine.
    book(&mut db, &room_b, &grace, stay(1, 5)).unwrap();
}

#[test]
fn test_search_excludes_busy_and_unbookable_rooms() {
    let mut db = create_test_database();
    let booked_room = add_room(&mut db, "101", 10_000);
    add_room(&mut db, "102", 10_000);
    let broken = add_room(&mut db, "103", 10_000);
    let ada = add_guest(&mut db, "ada@example.com");

    book(&mut db, &booked_room, &ada, stay(1, 5)).unwrap();
    db.update_room_status(broken.id().unwrap(), RoomStatus::Maintenance)
        .unwrap();

    let rooms = availability::find_available_rooms(
        db.connection(),
        &stay(2, 4),
        &RoomSearchFilter::default(),
    )
    .unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].number(), "102");
}

#[test]
fn test_search_by_type_and_exact_capacity() {
    let mut db = create_test_database();
    add_room(&mut db, "101", 10_000);
    let suite = Room::builder(
        "301".to_string(),
        RoomType::Suite,
        Money::from_cents(40_000).unwrap(),
    )
    .capacity(4)
    .build()
    .unwrap();
    db.add_room(&suite).unwrap();

    let suites = availability::find_available_rooms(
        db.connection(),
        &stay(1, 3),
        &RoomSearchFilter {
            room_type: Some(RoomType::Suite),
            capacity: None,
        },
    )
    .unwrap();
    assert_eq!(suites.len(), 1);
    assert_eq!(suites[0].number(), "301");

    // Capacity filtering is an exact match, so a four-person suite does
    // not answer a search for three.
    let for_three = availability::find_available_rooms(
        db.connection(),
        &stay(1, 3),
        &RoomSearchFilter {
            room_type: None,
            capacity: Some(3),
        },
    )
    .unwrap();
    assert!(for_three.is_empty());
}

#[test]
fn test_room_frees_after_stay_completes() {
    let mut db = create_test_database();
    let room = add_room(&mut db, "101", 10_000);
    let ada = add_guest(&mut db, "ada@example.com");
    let room_id = room.id().unwrap();
    let dates = StayDates::new(at(2, 15), at(4, 11)).unwrap();

    let booking = book(&mut db, &room, &ada, stay(1, 3)).unwrap();
    assert!(!availability::is_available(db.connection(), room_id, &dates).unwrap());

    LifecycleOperations::mark_check_in(&mut db, &NullNotifier, booking.id(), at(1, 16)).unwrap();
    LifecycleOperations::check_out(&mut db, &NullNotifier, booking.id(), at(3, 10)).unwrap();

    assert!(availability::is_available(db.connection(), room_id, &dates).unwrap());
}
