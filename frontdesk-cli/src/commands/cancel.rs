//! Cancel command implementation.
//!
//! This module implements the `cancel` command, which cancels a Pending
//! or Active reservation; cancelling an in-house stay also releases the
//! room.

use clap::Args;
use frontdesk::{LifecycleOperations, LogNotifier, ReservationId};

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, reservation_line, GlobalOptions};

/// Cancel a reservation.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation id
    pub reservation: i64,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(&config)?;

        let reservation = LifecycleOperations::cancel(
            &mut db,
            &LogNotifier,
            ReservationId::new(self.reservation),
        )?;

        if !global.quiet {
            println!("Cancelled: {}", reservation_line(&reservation));
        }
        Ok(())
    }
}
