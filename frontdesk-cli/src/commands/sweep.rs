//! Sweep command implementation.
//!
//! This module implements the `sweep` command, the entry point an
//! external scheduler calls to cancel no-shows and complete overdue
//! stays.

use clap::Args;
use frontdesk::SweepOperations;

use crate::error::CliError;
use crate::utils::{load_configuration, now, open_database, reservation_line, GlobalOptions};

/// Cancel no-shows and complete overdue stays.
#[derive(Args)]
pub struct SweepCommand {
    /// Only run the no-show pass
    #[arg(long, conflicts_with = "overdue_only")]
    pub no_shows_only: bool,

    /// Only run the overdue pass
    #[arg(long)]
    pub overdue_only: bool,

    /// Preview actions without executing
    #[arg(long)]
    pub dry_run: bool,
}

impl SweepCommand {
    /// Execute the sweep command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(&config)?;
        let sweep_time = now();

        let prefix = if self.dry_run { "[DRY RUN] Would cancel" } else { "Cancelled" };

        if !self.overdue_only {
            let result = SweepOperations::cancel_no_shows(
                &mut db,
                &config.sweep,
                sweep_time,
                self.dry_run,
            )?;
            if global.quiet {
                println!("{}", result.cancelled_count);
            } else {
                println!("{prefix} {} no-show(s)", result.cancelled_count);
                if global.verbose {
                    for reservation in &result.cancelled {
                        eprintln!("  - {}", reservation_line(reservation));
                    }
                }
            }
        }

        if !self.no_shows_only {
            let result = SweepOperations::complete_overdue(&mut db, sweep_time, self.dry_run)?;
            if global.quiet {
                println!("{}", result.completed_count);
            } else {
                let verb = if self.dry_run {
                    "[DRY RUN] Would complete"
                } else {
                    "Completed"
                };
                println!("{verb} {} overdue stay(s)", result.completed_count);
                if global.verbose {
                    for reservation in &result.completed {
                        eprintln!("  - {}", reservation_line(reservation));
                    }
                }
            }
        }

        Ok(())
    }
}
