//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and constants
//! related to the database schema for the reservation system.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
///
/// The metadata table stores key-value pairs for database configuration
/// and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the rooms table.
///
/// Room numbers are unique. Rates are stored as integer cents and the
/// operational status as its canonical string form.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        number TEXT NOT NULL UNIQUE,
        room_type TEXT NOT NULL,
        rate_cents INTEGER NOT NULL,
        capacity INTEGER NOT NULL,
        status TEXT NOT NULL DEFAULT 'Available',
        description TEXT
    )";

/// SQL statement to create the guests table.
///
/// Both the email address and the identity document number are unique.
pub const CREATE_GUESTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS guests (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        phone TEXT NOT NULL,
        id_document TEXT NOT NULL UNIQUE,
        nationality TEXT,
        address TEXT
    )";

/// SQL statement to create the reservations table.
///
/// Scheduled and actual timestamps are stored as ISO-8601 text so the
/// half-open interval comparison and `date()` extraction can run inside
/// SQL. Prices are integer cents.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        room_id INTEGER NOT NULL REFERENCES rooms(id),
        guest_id INTEGER NOT NULL REFERENCES guests(id),
        check_in TEXT NOT NULL,
        check_out TEXT NOT NULL,
        guests_count INTEGER NOT NULL DEFAULT 1,
        total_cents INTEGER NOT NULL,
        status TEXT NOT NULL DEFAULT 'Pending',
        actual_check_in TEXT,
        actual_check_out TEXT,
        special_requests TEXT,
        created_at TEXT NOT NULL
    )";

/// SQL statement to create the overlap exclusion trigger.
///
/// The trigger runs before every insert of a Pending or Active
/// reservation and aborts when the room already has a blocking
/// reservation whose half-open interval intersects the new one. Together
/// with IMMEDIATE transactions this closes the check-then-insert race:
/// two concurrent bookings for the same room and dates cannot both
/// commit.
pub const CREATE_NO_OVERLAP_TRIGGER: &str = r"
    CREATE TRIGGER IF NOT EXISTS reservations_no_overlap
    BEFORE INSERT ON reservations
    WHEN NEW.status IN ('Pending', 'Active')
    BEGIN
        SELECT RAISE(ABORT, 'overlapping reservation')
        WHERE EXISTS (
            SELECT 1 FROM reservations
            WHERE room_id = NEW.room_id
              AND status IN ('Pending', 'Active')
              AND check_in < NEW.check_out
              AND NEW.check_in < check_out
        );
    END";

/// SQL statement to create an index on the reservation room column.
///
/// This index speeds up conflict checks and per-room listings.
pub const CREATE_RESERVATION_ROOM_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_room ON reservations(room_id)";

/// SQL statement to create an index on the reservation guest column.
pub const CREATE_RESERVATION_GUEST_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_guest ON reservations(guest_id)";

/// SQL statement to create an index on the reservation status column.
///
/// This index speeds up the sweeps, which scan by status.
pub const CREATE_RESERVATION_STATUS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_status ON reservations(status)";

/// SQL statement to create an index on the scheduled check-in column.
pub const CREATE_RESERVATION_CHECK_IN_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_check_in ON reservations(check_in)";

/// SQL statement to create an index on the scheduled check-out column.
pub const CREATE_RESERVATION_CHECK_OUT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_check_out ON reservations(check_out)";

/// SQL statement to create an index on the room status column.
pub const CREATE_ROOM_STATUS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_rooms_status ON rooms(status)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to insert a reservation.
///
/// Inserts go through the overlap trigger; there is no OR REPLACE form.
pub const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (room_id, guest_id, check_in, check_out, guests_count, total_cents,
     status, actual_check_in, actual_check_out, special_requests, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";
