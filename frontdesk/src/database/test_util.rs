//! Shared test utilities for database unit tests.
//!
//! This module provides helper functions used across multiple test modules.

use std::cell::RefCell;

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::guest::Guest;
use crate::notify::{Notifier, ReservationNotice};
use crate::reservation::{NewReservation, ReservationStatus, StayDates};
use crate::room::{Room, RoomType};
use crate::Money;

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Builds an unpersisted double room with a 150.00 nightly rate.
///
/// # Panics
///
/// Panics if the builder rejects the fixture values.
#[must_use]
pub fn sample_room(number: &str) -> Room {
    Room::builder(
        number.to_string(),
        RoomType::Double,
        Money::from_cents(15_000).unwrap(),
    )
    .capacity(2)
    .build()
    .unwrap()
}

/// Builds an unpersisted guest with the given email.
///
/// The identity document is derived from the email so fixtures stay
/// unique.
///
/// # Panics
///
/// Panics if the builder rejects the fixture values.
#[must_use]
pub fn sample_guest(email: &str) -> Guest {
    Guest::builder(
        "Ada".to_string(),
        "Lovelace".to_string(),
        email.to_string(),
        "555-0101".to_string(),
        format!("DOC-{email}"),
    )
    .build()
    .unwrap()
}

/// Returns an instant on the given June 2024 day at the given hour.
///
/// # Panics
///
/// Panics on out-of-range components.
#[must_use]
pub fn day(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

/// Returns a stay from 15:00 on `from` to 11:00 on `to` (June 2024).
///
/// # Panics
///
/// Panics if the interval is invalid.
#[must_use]
pub fn stay(from: u32, to: u32) -> StayDates {
    StayDates::new(day(from, 15), day(to, 11)).unwrap()
}

/// Test double that records every notice it receives.
pub struct RecordingNotifier {
    /// The notices received so far, in order.
    pub notices: RefCell<Vec<ReservationNotice>>,
    /// When true, every delivery also returns an error.
    pub fail: bool,
}

impl RecordingNotifier {
    /// Creates a recorder that accepts every notice.
    #[must_use]
    pub fn new() -> Self {
        Self {
            notices: RefCell::new(Vec::new()),
            fail: false,
        }
    }

    /// Creates a recorder whose deliveries fail after being recorded.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            notices: RefCell::new(Vec::new()),
            fail: true,
        }
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &ReservationNotice) -> crate::Result<()> {
        self.notices.borrow_mut().push(notice.clone());
        if self.fail {
            return Err(crate::Error::Validation {
                field: "notifier".into(),
                message: "delivery refused".into(),
            });
        }
        Ok(())
    }
}

/// Builds a Pending insert record for the given room, guest, and stay.
///
/// The total is priced from the room's nightly rate.
///
/// # Panics
///
/// Panics if the room or guest has no id, or if pricing overflows.
#[must_use]
pub fn new_reservation(room: &Room, guest: &Guest, dates: StayDates) -> NewReservation {
    NewReservation {
        room_id: room.id().unwrap(),
        guest_id: guest.id().unwrap(),
        dates,
        guests_count: 1,
        total_price: room.rate_per_night().checked_mul(dates.nights()).unwrap(),
        status: ReservationStatus::Pending,
        actual_check_in: None,
        special_requests: None,
        created_at: day(1, 9),
    }
}
