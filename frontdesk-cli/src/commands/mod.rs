//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Initialize the data directory and database
//! - `room`: Manage the room directory (add, list, set-status)
//! - `guest`: Manage the guest registry (add, list)
//! - `book`: Book a room for a guest
//! - `walk_in`: Check a walk-in guest straight into a room
//! - `check_in`: Check in a pending reservation
//! - `check_out`: Check out an active reservation
//! - `cancel`: Cancel a reservation
//! - `update`: Edit a reservation
//! - `list`: List reservations
//! - `available`: Find rooms available for a stay
//! - `sweep`: Cancel no-shows and complete overdue stays
//! - `report`: Show front-desk statistics

pub mod available;
pub mod book;
pub mod cancel;
pub mod check_in;
pub mod check_out;
pub mod guest;
pub mod init;
pub mod list;
pub mod report;
pub mod room;
pub mod sweep;
pub mod update;
pub mod walk_in;

pub use available::AvailableCommand;
pub use book::BookCommand;
pub use cancel::CancelCommand;
pub use check_in::CheckInCommand;
pub use check_out::CheckOutCommand;
pub use guest::GuestCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use report::ReportCommand;
pub use room::RoomCommand;
pub use sweep::SweepCommand;
pub use update::UpdateCommand;
pub use walk_in::WalkInCommand;
