//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for
//! exercising the frontdesk library end to end.

use chrono::{NaiveDate, NaiveDateTime};

use frontdesk::{
    BookingOperations, BookingRequest, Database, DatabaseConfig, Guest, Money, NullNotifier,
    Reservation, Room, RoomType, StayDates,
};

/// Creates a test database in a temporary location.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[allow(dead_code)]
pub fn create_test_database() -> Database {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).expect("should open database");

    // Keep the temp dir alive for the life of the test process.
    std::mem::forget(dir);

    db
}

/// Returns an instant on the given June 2024 day at the given hour.
#[allow(dead_code)]
pub fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, day)
        .expect("valid day")
        .and_hms_opt(hour, 0, 0)
        .expect("valid hour")
}

/// Returns a stay from 15:00 on `from` to 11:00 on `to` (June 2024).
#[allow(dead_code)]
pub fn stay(from: u32, to: u32) -> StayDates {
    StayDates::new(at(from, 15), at(to, 11)).expect("valid stay")
}

/// Inserts a double room with the given number and nightly rate in cents.
#[allow(dead_code)]
pub fn add_room(db: &mut Database, number: &str, rate_cents: i64) -> Room {
    let room = Room::builder(
        number.to_string(),
        RoomType::Double,
        Money::from_cents(rate_cents).expect("valid rate"),
    )
    .capacity(2)
    .build()
    .expect("valid room");
    db.add_room(&room).expect("should insert room")
}

/// Inserts a guest with the given email.
#[allow(dead_code)]
pub fn add_guest(db: &mut Database, email: &str) -> Guest {
    let guest = Guest::builder(
        "Ada".to_string(),
        "Lovelace".to_string(),
        email.to_string(),
        "555-0101".to_string(),
        format!("DOC-{email}"),
    )
    .build()
    .expect("valid guest");
    db.add_guest(&guest).expect("should insert guest")
}

/// Books a two-person stay on the given room and guest.
#[allow(dead_code)]
pub fn book(
    db: &mut Database,
    room: &Room,
    guest: &Guest,
    dates: StayDates,
) -> frontdesk::Result<Reservation> {
    BookingOperations::create_reservation(
        db,
        &NullNotifier,
        &BookingRequest {
            room_id: room.id().expect("persisted room"),
            guest_id: guest.id().expect("persisted guest"),
            dates,
            guests_count: 2,
            special_requests: None,
        },
        at(1, 9),
    )
}
