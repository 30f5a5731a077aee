//! Check-in command implementation.
//!
//! This module implements the `check-in` command, which moves a Pending
//! reservation to Active and marks its room Occupied.

use clap::Args;
use frontdesk::{LifecycleOperations, LogNotifier, ReservationId};

use crate::error::CliError;
use crate::utils::{load_configuration, now, open_database, reservation_line, GlobalOptions};

/// Check in a pending reservation.
#[derive(Args)]
pub struct CheckInCommand {
    /// Reservation id
    pub reservation: i64,
}

impl CheckInCommand {
    /// Execute the check-in command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(&config)?;

        let reservation = LifecycleOperations::mark_check_in(
            &mut db,
            &LogNotifier,
            ReservationId::new(self.reservation),
            now(),
        )?;

        if !global.quiet {
            println!("Checked in: {}", reservation_line(&reservation));
        }
        Ok(())
    }
}
