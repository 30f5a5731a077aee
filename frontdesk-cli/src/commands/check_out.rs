//! Check-out command implementation.
//!
//! This module implements the `check-out` command, which completes an
//! Active reservation and releases its room.

use clap::Args;
use frontdesk::{LifecycleOperations, LogNotifier, ReservationId};

use crate::error::CliError;
use crate::utils::{load_configuration, now, open_database, reservation_line, GlobalOptions};

/// Check out an active reservation.
#[derive(Args)]
pub struct CheckOutCommand {
    /// Reservation id
    pub reservation: i64,
}

impl CheckOutCommand {
    /// Execute the check-out command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(&config)?;

        let reservation = LifecycleOperations::check_out(
            &mut db,
            &LogNotifier,
            ReservationId::new(self.reservation),
            now(),
        )?;

        if !global.quiet {
            println!("Checked out: {}", reservation_line(&reservation));
        }
        Ok(())
    }
}
