#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # frontdesk
//!
//! A reservation and availability engine for hotel front desks.
//!
//! This library provides core types and functionality for managing a
//! room directory, registering guests, booking stays, moving
//! reservations through their lifecycle, and running scheduled sweeps
//! over the calendar.
//!
//! ## Core Types
//!
//! - [`Room`], [`RoomType`], and [`RoomStatus`]: the room directory
//! - [`Guest`]: the guest registry
//! - [`Reservation`], [`StayDates`], and [`ReservationStatus`]: bookings
//!   and their lifecycle
//! - [`Money`]: prices in integer cents
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use frontdesk::StayDates;
//!
//! let dates = StayDates::new(
//!     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(15, 0, 0).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 6, 4).unwrap().and_hms_opt(11, 0, 0).unwrap(),
//! )
//! .unwrap();
//! assert_eq!(dates.nights(), 3);
//!
//! // Back-to-back stays share an edge without overlapping.
//! let next = StayDates::new(
//!     NaiveDate::from_ymd_opt(2024, 6, 4).unwrap().and_hms_opt(15, 0, 0).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 6, 6).unwrap().and_hms_opt(11, 0, 0).unwrap(),
//! )
//! .unwrap();
//! assert!(!dates.overlaps(&next));
//! ```

pub use rusqlite;

pub mod availability;
pub mod config;
pub mod database;
pub mod error;
pub mod guest;
pub mod logging;
pub mod money;
pub mod notify;
pub mod operations;
pub mod report;
pub mod reservation;
pub mod room;

// Re-export key types at crate root for convenience
pub use availability::RoomSearchFilter;
pub use config::{Config, SweepConfig};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result, ValidationError};
pub use guest::{Guest, GuestBuilder, GuestId};
pub use logging::{init_logger, LogLevel, Logger};
pub use money::{InvalidMoneyError, Money};
pub use notify::{LifecycleEvent, LogNotifier, Notifier, NullNotifier, ReservationNotice};
pub use operations::{
    BookingOperations, BookingRequest, LifecycleOperations, NoShowSweepResult, OverdueSweepResult,
    ReservationUpdate, SweepOperations, SweepSummary,
};
pub use report::{DashboardStats, Reports, ReservationCounts};
pub use reservation::{
    NewReservation, Reservation, ReservationId, ReservationStatus, StayDates,
};
pub use room::{Room, RoomBuilder, RoomId, RoomStatus, RoomType, RoomUpdate, MAX_CAPACITY};
