//! Utility functions for CLI operations.
//!
//! This module provides common helpers used across CLI commands:
//! configuration loading, database opening, argument parsing, and
//! output formatting.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use frontdesk::{Config, Database, DatabaseConfig, Guest, Reservation, Room, StayDates};

use crate::error::CliError;

/// Hour of day a stay begins when only a date is given.
pub const DEFAULT_CHECK_IN_HOUR: u32 = 15;

/// Hour of day a stay ends when only a date is given.
pub const DEFAULT_CHECK_OUT_HOUR: u32 = 11;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,
}

/// Load configuration for the resolved data directory.
///
/// Precedence: `--data-dir` flag, then the `FRONTDESK_DATA_DIR`
/// environment variable, then `~/.frontdesk`.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    Config::load(global.data_dir.clone()).map_err(|e| CliError::Config(e.to_string()))
}

/// Open the database described by the configuration.
pub fn open_database(config: &Config) -> Result<Database, CliError> {
    let db_config = DatabaseConfig::new(config.database_path())
        .with_busy_timeout(Duration::from_secs(config.busy_timeout_seconds));
    Database::open(db_config).map_err(CliError::from)
}

/// The current wall-clock instant, timezone-naive.
pub fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Parse a `YYYY-MM-DD` argument.
pub fn parse_date(value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| CliError::InvalidArguments(format!("'{value}' is not a YYYY-MM-DD date")))
}

/// Parse a stay bound.
///
/// Accepts a bare `YYYY-MM-DD` date, which gets the given desk hour, or
/// a `YYYY-MM-DDTHH:MM` instant for stays that need an explicit time
/// (a same-day stay cannot be expressed with the desk hours alone).
pub fn parse_stay_bound(value: &str, default_hour: u32) -> Result<NaiveDateTime, CliError> {
    if let Ok(instant) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return Ok(instant);
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        CliError::InvalidArguments(format!(
            "'{value}' is not a YYYY-MM-DD date or YYYY-MM-DDTHH:MM instant"
        ))
    })?;
    date.and_hms_opt(default_hour, 0, 0)
        .ok_or_else(|| CliError::InvalidArguments(format!("'{value}' is out of range")))
}

/// Build a stay from two bound arguments.
///
/// Bare dates get the standard desk hours (15:00 check-in, 11:00
/// check-out); explicit `YYYY-MM-DDTHH:MM` instants pass through.
pub fn stay_from_args(check_in: &str, check_out: &str) -> Result<StayDates, CliError> {
    let start = parse_stay_bound(check_in, DEFAULT_CHECK_IN_HOUR)?;
    let end = parse_stay_bound(check_out, DEFAULT_CHECK_OUT_HOUR)?;
    StayDates::new(start, end).map_err(|e| CliError::InvalidArguments(e.to_string()))
}

/// One-line human rendering of a room.
pub fn room_line(room: &Room) -> String {
    format!(
        "{}\t{}\t{}\t{} guests\t{}/night",
        room.number(),
        room.room_type(),
        room.status(),
        room.capacity(),
        room.rate_per_night(),
    )
}

/// One-line human rendering of a guest.
pub fn guest_line(guest: &Guest) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        guest.id().map_or_else(|| "-".to_string(), |id| id.to_string()),
        guest.full_name(),
        guest.email(),
        guest.phone(),
    )
}

/// One-line human rendering of a reservation.
pub fn reservation_line(reservation: &Reservation) -> String {
    format!(
        "{}\troom {}\tguest {}\t{} -> {}\t{}\t{}",
        reservation.id(),
        reservation.room_id(),
        reservation.guest_id(),
        reservation.dates().check_in().format("%Y-%m-%d %H:%M"),
        reservation.dates().check_out().format("%Y-%m-%d %H:%M"),
        reservation.status(),
        reservation.total_price(),
    )
}

/// Serialize a value as pretty JSON to stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-06-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
        assert!(parse_date("06/01/2024").is_err());
        assert!(parse_date("not-a-date").is_err());
    }

    #[test]
    fn test_stay_from_args_uses_desk_hours() {
        let stay = stay_from_args("2024-06-01", "2024-06-03").unwrap();
        assert_eq!(stay.check_in().time().hour(), DEFAULT_CHECK_IN_HOUR);
        assert_eq!(stay.check_out().time().hour(), DEFAULT_CHECK_OUT_HOUR);
        assert_eq!(stay.nights(), 2);
    }

    #[test]
    fn test_stay_from_args_accepts_explicit_times() {
        // A same-day stay needs explicit times; the desk hours would
        // invert the interval.
        let stay = stay_from_args("2024-06-01T12:00", "2024-06-01T18:00").unwrap();
        assert_eq!(stay.check_in().time().hour(), 12);
        assert_eq!(stay.nights(), 0);
    }

    #[test]
    fn test_stay_from_args_rejects_inverted_range() {
        assert!(stay_from_args("2024-06-03", "2024-06-01").is_err());
        assert!(stay_from_args("2024-06-01", "2024-06-01").is_err());
    }

    #[test]
    fn test_parse_stay_bound_rejects_garbage() {
        assert!(parse_stay_bound("June 1st", DEFAULT_CHECK_IN_HOUR).is_err());
        assert!(parse_stay_bound("2024-06-01T25:00", DEFAULT_CHECK_IN_HOUR).is_err());
    }
}
