//! Database CRUD operations for rooms.

use rusqlite::{params, Connection, TransactionBehavior};

use crate::error::{Error, Result};
use crate::room::{Room, RoomId, RoomStatus, RoomUpdate};

use super::connection::Database;

/// Helper function to deserialize a room from a database row.
///
/// Expects row fields in this order: id, number, `room_type`,
/// `rate_cents`, capacity, status, description.
fn row_to_room(row: &rusqlite::Row<'_>) -> rusqlite::Result<Room> {
    let id: i64 = row.get(0)?;
    let number: String = row.get(1)?;
    let room_type: String = row.get(2)?;
    let rate_cents: i64 = row.get(3)?;
    let capacity: u32 = row.get(4)?;
    let status: String = row.get(5)?;
    let description: Option<String> = row.get(6)?;

    let room_type = room_type
        .parse()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    let status: RoomStatus = status
        .parse()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    let rate = crate::Money::from_cents(rate_cents)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let mut builder = Room::builder(number, room_type, rate)
        .id(RoomId::new(id))
        .capacity(capacity)
        .status(status);
    if description.is_some() {
        builder = builder.description(description);
    }
    builder
        .build()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

const INSERT_ROOM: &str = r"
    INSERT INTO rooms (number, room_type, rate_cents, capacity, status, description)
    VALUES (?, ?, ?, ?, ?, ?)
";

const SELECT_ROOM: &str = r"
    SELECT id, number, room_type, rate_cents, capacity, status, description
    FROM rooms
    WHERE id = ?
";

const SELECT_ROOM_BY_NUMBER: &str = r"
    SELECT id, number, room_type, rate_cents, capacity, status, description
    FROM rooms
    WHERE number = ?
";

const LIST_ROOMS: &str = r"
    SELECT id, number, room_type, rate_cents, capacity, status, description
    FROM rooms
    ORDER BY number
";

const LIST_ROOMS_BY_STATUS: &str = r"
    SELECT id, number, room_type, rate_cents, capacity, status, description
    FROM rooms
    WHERE status = ?
    ORDER BY number
";

const UPDATE_ROOM_STATUS: &str = r"
    UPDATE rooms SET status = ? WHERE id = ?
";

const UPDATE_ROOM_FIELDS: &str = r"
    UPDATE rooms SET room_type = ?, rate_cents = ?, capacity = ?, description = ?
    WHERE id = ?
";

const DELETE_ROOM: &str = "DELETE FROM rooms WHERE id = ?";

const COUNT_ROOM_RESERVATIONS: &str = "SELECT COUNT(*) FROM reservations WHERE room_id = ?";

impl Database {
    /// Registers a new room.
    ///
    /// The insert runs in a transaction with IMMEDIATE mode. Returns the
    /// room with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the room number is already
    /// registered, or a database error for other failures.
    pub fn add_room(&mut self, room: &Room) -> Result<Room> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let id = Self::insert_room(&tx, room)?;
        tx.commit()?;

        Self::get_room(&self.conn, id)?.ok_or_else(|| Error::NotFound {
            resource: format!("room {id}"),
        })
    }

    /// Inserts a room on an existing connection or transaction.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the room number is already
    /// registered, or a database error for other failures.
    pub fn insert_room(conn: &Connection, room: &Room) -> Result<RoomId> {
        let result = conn.execute(
            INSERT_ROOM,
            params![
                room.number(),
                room.room_type().as_str(),
                room.rate_per_night().cents(),
                room.capacity(),
                room.status().as_str(),
                room.description(),
            ],
        );

        match result {
            Ok(_) => Ok(RoomId::new(conn.last_insert_rowid())),
            Err(e) if is_unique_violation(&e, "rooms.number") => Err(Error::Validation {
                field: "number".into(),
                message: format!("room number '{}' is already registered", room.number()),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetches a room by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room(conn: &Connection, id: RoomId) -> Result<Option<Room>> {
        match conn.query_row(SELECT_ROOM, [id.value()], row_to_room) {
            Ok(room) => Ok(Some(room)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetches a room by its number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room_by_number(conn: &Connection, number: &str) -> Result<Option<Room>> {
        match conn.query_row(SELECT_ROOM_BY_NUMBER, [number], row_to_room) {
            Ok(room) => Ok(Some(room)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists all rooms ordered by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms(conn: &Connection) -> Result<Vec<Room>> {
        let mut stmt = conn.prepare(LIST_ROOMS)?;
        let rooms = stmt
            .query_map([], row_to_room)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rooms)
    }

    /// Lists rooms in the given operational status, ordered by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn rooms_by_status(conn: &Connection, status: RoomStatus) -> Result<Vec<Room>> {
        let mut stmt = conn.prepare(LIST_ROOMS_BY_STATUS)?;
        let rooms = stmt
            .query_map([status.as_str()], row_to_room)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rooms)
    }

    /// Sets a room's operational status on an existing connection or
    /// transaction.
    ///
    /// Returns true if the room existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_room_status(conn: &Connection, id: RoomId, status: RoomStatus) -> Result<bool> {
        let rows = conn.execute(UPDATE_ROOM_STATUS, params![status.as_str(), id.value()])?;
        Ok(rows > 0)
    }

    /// Rewrites a room's mutable fields in its own IMMEDIATE transaction.
    ///
    /// The edited record is re-validated through the room builder before
    /// it is written, so an out-of-range capacity or blank description
    /// is rejected. Returns `None` if the room does not exist.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the edited record is invalid, or a
    /// database error for other failures.
    pub fn update_room(&mut self, id: RoomId, update: &RoomUpdate) -> Result<Option<Room>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(room) = Self::get_room(&tx, id)? else {
            return Ok(None);
        };

        let description = match &update.description {
            Some(value) => value.clone(),
            None => room.description().map(str::to_string),
        };
        let edited = Room::builder(
            room.number().to_string(),
            update.room_type.unwrap_or(room.room_type()),
            update.rate_per_night.unwrap_or(room.rate_per_night()),
        )
        .id(id)
        .capacity(update.capacity.unwrap_or(room.capacity()))
        .status(room.status())
        .description(description)
        .build()?;

        tx.execute(
            UPDATE_ROOM_FIELDS,
            params![
                edited.room_type().as_str(),
                edited.rate_per_night().cents(),
                edited.capacity(),
                edited.description(),
                id.value(),
            ],
        )?;
        tx.commit()?;
        Ok(Some(edited))
    }

    /// Removes a room from the directory.
    ///
    /// A room with reservation history cannot be removed; the booking
    /// records reference it. Returns false if the room does not exist.
    ///
    /// # Errors
    ///
    /// Returns a validation error if reservations reference the room, or
    /// a database error for other failures.
    pub fn delete_room(&mut self, id: RoomId) -> Result<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let references: i64 =
            tx.query_row(COUNT_ROOM_RESERVATIONS, [id.value()], |row| row.get(0))?;
        if references > 0 {
            return Err(Error::Validation {
                field: "room".into(),
                message: format!("room {id} has {references} reservation(s) on record"),
            });
        }

        let rows = tx.execute(DELETE_ROOM, [id.value()])?;
        tx.commit()?;
        Ok(rows > 0)
    }

    /// Sets a room's operational status in its own IMMEDIATE transaction.
    ///
    /// Returns true if the room existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or update fails.
    pub fn update_room_status(&mut self, id: RoomId, status: RoomStatus) -> Result<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let updated = Self::set_room_status(&tx, id, status)?;
        tx.commit()?;
        Ok(updated)
    }
}

/// Checks whether a rusqlite error is a UNIQUE violation on the named column.
pub(super) fn is_unique_violation(err: &rusqlite::Error, column: &str) -> bool {
    if let rusqlite::Error::SqliteFailure(failure, Some(message)) = err {
        failure.code == rusqlite::ErrorCode::ConstraintViolation && message.contains(column)
    } else {
        false
    }
}
