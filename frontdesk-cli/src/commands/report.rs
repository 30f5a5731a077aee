//! Report command implementation.
//!
//! This module implements the `report` command, which prints the
//! dashboard snapshot or revenue for a date range.

use clap::Args;
use frontdesk::Reports;

use crate::error::CliError;
use crate::utils::{load_configuration, now, open_database, parse_date, print_json, GlobalOptions};

/// Show front-desk statistics.
#[derive(Args)]
pub struct ReportCommand {
    /// Sum revenue from this date (YYYY-MM-DD); requires --to
    #[arg(long, value_name = "DATE", requires = "to")]
    pub from: Option<String>,

    /// Sum revenue up to this date inclusive (YYYY-MM-DD); requires --from
    #[arg(long, value_name = "DATE", requires = "from")]
    pub to: Option<String>,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ReportCommand {
    /// Execute the report command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(&config)?;
        let conn = db.connection();

        if let (Some(from), Some(to)) = (&self.from, &self.to) {
            let revenue = Reports::revenue_between(conn, parse_date(from)?, parse_date(to)?)?;
            if global.quiet || !self.json {
                println!("{revenue}");
            } else {
                print_json(&revenue)?;
            }
            return Ok(());
        }

        let stats = Reports::dashboard(conn, now().date())?;
        if self.json {
            return print_json(&stats);
        }

        println!("Rooms: {} total", stats.total_rooms);
        println!(
            "  available {}, occupied {}, maintenance {}",
            stats.available_rooms, stats.occupied_rooms, stats.maintenance_rooms
        );
        println!("Occupancy rate: {:.2}%", stats.occupancy_rate);
        println!("Active reservations: {}", stats.active_reservations);
        println!(
            "Today: {} arrival(s), {} departure(s)",
            stats.today_checkins, stats.today_checkouts
        );
        println!("Guests on file: {}", stats.total_guests);
        println!("Revenue today: {}", stats.revenue_today);
        println!("Revenue this month: {}", stats.revenue_month);
        Ok(())
    }
}
