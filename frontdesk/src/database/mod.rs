//! Database layer for persistent storage of rooms, guests, and reservations.
//!
//! This module provides a SQLite-based storage layer, including connection
//! management, schema versioning, and CRUD operations for each entity.
//!
//! # Examples
//!
//! ```no_run
//! use frontdesk::database::{Database, DatabaseConfig};
//! use frontdesk::{Money, Room, RoomType};
//!
//! // Open a database
//! let config = DatabaseConfig::new("/tmp/frontdesk.db");
//! let mut db = Database::open(config).unwrap();
//!
//! // Register a room
//! let room = Room::builder("101".to_string(), RoomType::Double, Money::parse("120.00").unwrap())
//!     .capacity(2)
//!     .build()
//!     .unwrap();
//! let room = db.add_room(&room).unwrap();
//! println!("room {} has id {:?}", room.number(), room.id());
//! ```

mod config;
mod connection;
mod guests;
pub mod migrations;
mod reservations;
mod rooms;
mod schema;

#[cfg(test)]
pub(crate) mod test_util;

use chrono::NaiveDateTime;

// Re-export public API
pub use config::DatabaseConfig;
pub use connection::Database;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};

/// Storage format for timestamps.
///
/// ISO-8601 text sorts lexicographically in interval comparisons and lets
/// SQL extract calendar dates with `date()`.
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a timestamp for database storage.
pub(crate) fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

/// Parses a stored timestamp back into a `NaiveDateTime`.
pub(crate) fn parse_datetime(s: &str) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_datetime_round_trip() {
        let dt = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(15, 30, 45)
            .unwrap();
        let text = format_datetime(dt);
        assert_eq!(text, "2024-06-01 15:30:45");
        assert_eq!(parse_datetime(&text).unwrap(), dt);
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        assert!(parse_datetime("not a timestamp").is_err());
        assert!(parse_datetime("2024-06-01").is_err());
    }

    #[test]
    fn test_datetime_text_sorts_chronologically() {
        let early = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let late = NaiveDate::from_ymd_opt(2024, 11, 3)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        assert!(format_datetime(early) < format_datetime(late));
    }
}
