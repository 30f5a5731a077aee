//! Walk-in command implementation.
//!
//! This module implements the `walk-in` command, which books a room and
//! checks the guest in immediately.

use clap::Args;
use frontdesk::{BookingOperations, BookingRequest, LogNotifier, StayDates};

use crate::commands::book::{find_guest, find_room, guest_id, room_id};
use crate::error::CliError;
use crate::utils::{
    load_configuration, now, open_database, parse_stay_bound, reservation_line, GlobalOptions,
    DEFAULT_CHECK_OUT_HOUR,
};

/// Check a walk-in guest straight into a room.
#[derive(Args)]
pub struct WalkInCommand {
    /// Room number
    pub room: String,

    /// Guest email address
    pub guest: String,

    /// Check-out date (YYYY-MM-DD, 11:00; or YYYY-MM-DDTHH:MM);
    /// check-in is now
    #[arg(long, value_name = "DATE")]
    pub check_out: String,

    /// Party size
    #[arg(long, default_value_t = 1)]
    pub guests: u32,

    /// Special requests to attach
    #[arg(long, value_name = "TEXT")]
    pub requests: Option<String>,
}

impl WalkInCommand {
    /// Execute the walk-in command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(&config)?;

        let room = find_room(&db, &self.room)?;
        let guest = find_guest(&db, &self.guest)?;
        let arrival = now();
        let departure = parse_stay_bound(&self.check_out, DEFAULT_CHECK_OUT_HOUR)?;
        let dates = StayDates::new(arrival, departure)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let request = BookingRequest {
            room_id: room_id(&room)?,
            guest_id: guest_id(&guest)?,
            dates,
            guests_count: self.guests,
            special_requests: self.requests,
        };

        let reservation = BookingOperations::check_in(&mut db, &LogNotifier, &request, arrival)?;

        if global.quiet {
            println!("{}", reservation.id());
        } else {
            println!("Checked in: {}", reservation_line(&reservation));
        }
        Ok(())
    }
}
