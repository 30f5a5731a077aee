//! Update command implementation.
//!
//! This module implements the `update` command for editing a
//! reservation's dates, party size, or special requests. Changing the
//! dates reprices the stay.

use clap::Args;
use frontdesk::{LifecycleOperations, ReservationId, ReservationUpdate};

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, reservation_line, stay_from_args, GlobalOptions,
};

/// Edit a reservation's dates, party size, or requests.
#[derive(Args)]
pub struct UpdateCommand {
    /// Reservation id
    pub reservation: i64,

    /// New check-in date (YYYY-MM-DD, 15:00; or YYYY-MM-DDTHH:MM);
    /// requires --check-out
    #[arg(long, value_name = "DATE", requires = "check_out")]
    pub check_in: Option<String>,

    /// New check-out date (YYYY-MM-DD, 11:00; or YYYY-MM-DDTHH:MM);
    /// requires --check-in
    #[arg(long, value_name = "DATE", requires = "check_in")]
    pub check_out: Option<String>,

    /// New party size
    #[arg(long)]
    pub guests: Option<u32>,

    /// New special requests text
    #[arg(long, value_name = "TEXT", conflicts_with = "clear_requests")]
    pub requests: Option<String>,

    /// Remove the special requests text
    #[arg(long)]
    pub clear_requests: bool,
}

impl UpdateCommand {
    /// Execute the update command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(&config)?;

        let dates = match (&self.check_in, &self.check_out) {
            (Some(check_in), Some(check_out)) => Some(stay_from_args(check_in, check_out)?),
            _ => None,
        };
        let special_requests = if self.clear_requests {
            Some(None)
        } else {
            self.requests.map(Some)
        };

        let update = ReservationUpdate {
            dates,
            guests_count: self.guests,
            special_requests,
        };

        let reservation = LifecycleOperations::update(
            &mut db,
            ReservationId::new(self.reservation),
            &update,
        )?;

        if !global.quiet {
            println!("Updated: {}", reservation_line(&reservation));
        }
        Ok(())
    }
}
