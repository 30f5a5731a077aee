//! List command implementation.
//!
//! This module implements the `list` command, which displays
//! reservations with optional status, room, and guest filters.

use clap::Args;
use frontdesk::{Database, Reservation, ReservationStatus};

use crate::commands::book::{find_guest, find_room, guest_id, room_id};
use crate::error::CliError;
use crate::utils::{
    load_configuration, now, open_database, print_json, reservation_line, GlobalOptions,
};

/// List reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Only reservations with this status (pending, active, completed, cancelled)
    #[arg(long, value_name = "STATUS")]
    pub status: Option<String>,

    /// Only reservations for this room number
    #[arg(long, value_name = "NUMBER")]
    pub room: Option<String>,

    /// Only reservations booked by this guest email
    #[arg(long, value_name = "EMAIL")]
    pub guest: Option<String>,

    /// Only today's scheduled check-ins
    #[arg(long, conflicts_with_all = ["status", "departures"])]
    pub arrivals: bool,

    /// Only today's scheduled check-outs
    #[arg(long, conflicts_with = "status")]
    pub departures: bool,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(&config)?;
        let conn = db.connection();

        let mut reservations: Vec<Reservation> = if self.arrivals {
            Database::todays_checkins(conn, now().date())?
        } else if self.departures {
            Database::todays_checkouts(conn, now().date())?
        } else if let Some(raw) = &self.status {
            let status: ReservationStatus = raw.parse().map_err(
                |e: frontdesk::ValidationError| CliError::InvalidArguments(e.to_string()),
            )?;
            Database::reservations_by_status(conn, status)?
        } else {
            Database::list_reservations(conn)?
        };

        if let Some(number) = &self.room {
            let id = room_id(&find_room(&db, number)?)?;
            reservations.retain(|r| r.room_id() == id);
        }
        if let Some(email) = &self.guest {
            let id = guest_id(&find_guest(&db, email)?)?;
            reservations.retain(|r| r.guest_id() == id);
        }

        if self.json {
            return print_json(&reservations);
        }
        for reservation in &reservations {
            println!("{}", reservation_line(reservation));
        }
        Ok(())
    }
}
