//! Available command implementation.
//!
//! This module implements the `available` command, which searches the
//! room directory for rooms free over a requested stay.

use clap::Args;
use frontdesk::{availability, RoomSearchFilter, RoomType};

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, print_json, room_line, stay_from_args, GlobalOptions,
};

/// Find rooms available for a stay.
#[derive(Args)]
pub struct AvailableCommand {
    /// Check-in date (YYYY-MM-DD, 15:00; or YYYY-MM-DDTHH:MM)
    #[arg(long, value_name = "DATE")]
    pub check_in: String,

    /// Check-out date (YYYY-MM-DD, 11:00; or YYYY-MM-DDTHH:MM)
    #[arg(long, value_name = "DATE")]
    pub check_out: String,

    /// Only rooms of this type (single, double, suite, deluxe)
    #[arg(long, value_name = "TYPE")]
    pub room_type: Option<String>,

    /// Only rooms with exactly this capacity
    #[arg(long)]
    pub capacity: Option<u32>,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl AvailableCommand {
    /// Execute the available command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(&config)?;

        let dates = stay_from_args(&self.check_in, &self.check_out)?;
        let room_type = match &self.room_type {
            Some(raw) => Some(raw.parse::<RoomType>().map_err(
                |e: frontdesk::ValidationError| CliError::InvalidArguments(e.to_string()),
            )?),
            None => None,
        };
        let filter = RoomSearchFilter {
            room_type,
            capacity: self.capacity,
        };

        let rooms = availability::find_available_rooms(db.connection(), &dates, &filter)?;

        if self.json {
            return print_json(&rooms);
        }
        if rooms.is_empty() && !global.quiet {
            eprintln!("No rooms available for those dates");
        }
        for room in &rooms {
            println!("{}", room_line(room));
        }
        Ok(())
    }
}
