//! High-level front-desk operations.
//!
//! This module provides the operations a front desk performs day to day:
//!
//! 1. **Booking**: create reservations in advance or check walk-in
//!    guests straight in
//! 2. **Lifecycle**: move existing reservations through check-in,
//!    check-out, cancellation, and edits
//! 3. **Sweeps**: scheduled passes that cancel no-shows and complete
//!    overdue stays
//!
//! Every write runs inside a transaction with IMMEDIATE mode so that two
//! front-desk processes sharing the database cannot interleave a
//! check-then-act sequence.

pub mod booking;
pub mod lifecycle;
pub mod sweep;

pub use booking::{BookingOperations, BookingRequest};
pub use lifecycle::{LifecycleOperations, ReservationUpdate};
pub use sweep::{NoShowSweepResult, OverdueSweepResult, SweepOperations, SweepSummary};
