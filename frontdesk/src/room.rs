//! Room types for the hotel inventory.
//!
//! This module provides types for rooms, including the room id newtype,
//! room type and operational status enums, and a builder pattern for
//! constructing validated rooms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::Money;

/// The maximum number of guests any room may hold.
pub const MAX_CAPACITY: u32 = 12;

/// A unique identifier for a room.
///
/// # Examples
///
/// ```
/// use frontdesk::RoomId;
///
/// let id = RoomId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(format!("{id}"), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(i64);

impl RoomId {
    /// Creates a room id from a raw database id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The category of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    /// A room with a single bed.
    Single,
    /// A room with a double bed.
    Double,
    /// A suite.
    Suite,
    /// A deluxe room.
    Deluxe,
}

impl RoomType {
    /// Returns the canonical string form used in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Double => "Double",
            Self::Suite => "Suite",
            Self::Deluxe => "Deluxe",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            "suite" => Ok(Self::Suite),
            "deluxe" => Ok(Self::Deluxe),
            _ => Err(ValidationError {
                field: "room_type".into(),
                message: format!("unknown room type '{s}' (expected Single, Double, Suite, or Deluxe)"),
            }),
        }
    }
}

/// The operational status of a room.
///
/// The status reflects the physical state of the room today. It is
/// independent of future reservations: a room that is `Available` now may
/// still have bookings on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomStatus {
    /// The room is ready for guests.
    Available,
    /// A guest is currently checked in.
    Occupied,
    /// The room is out of service.
    Maintenance,
}

impl RoomStatus {
    /// Returns the canonical string form used in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Occupied => "Occupied",
            Self::Maintenance => "Maintenance",
        }
    }

    /// Returns true if the room can accept a new stay right now.
    ///
    /// Only `Available` rooms are bookable through the availability
    /// checker; `Occupied` and `Maintenance` rooms are not.
    #[must_use]
    pub const fn is_bookable(self) -> bool {
        matches!(self, Self::Available)
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "occupied" => Ok(Self::Occupied),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(ValidationError {
                field: "room_status".into(),
                message: format!(
                    "unknown room status '{s}' (expected Available, Occupied, or Maintenance)"
                ),
            }),
        }
    }
}

/// A hotel room with its rate and operational status.
///
/// # Examples
///
/// ```
/// use frontdesk::{Money, Room, RoomStatus, RoomType};
///
/// let room = Room::builder("101".to_string(), RoomType::Double, Money::parse("150.00").unwrap())
///     .capacity(2)
///     .build()
///     .unwrap();
///
/// assert_eq!(room.number(), "101");
/// assert_eq!(room.status(), RoomStatus::Available);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    id: Option<RoomId>,
    number: String,
    room_type: RoomType,
    rate_per_night: Money,
    capacity: u32,
    status: RoomStatus,
    description: Option<String>,
}

impl Room {
    /// Creates a new room builder.
    ///
    /// The room starts out `Available` with a capacity of 1 unless the
    /// builder overrides those.
    #[must_use]
    pub fn builder(number: String, room_type: RoomType, rate_per_night: Money) -> RoomBuilder {
        RoomBuilder {
            id: None,
            number,
            room_type,
            rate_per_night,
            capacity: 1,
            status: RoomStatus::Available,
            description: None,
        }
    }

    /// Returns the room id, if the room has been persisted.
    #[must_use]
    pub const fn id(&self) -> Option<RoomId> {
        self.id
    }

    /// Returns the room number.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Returns the room type.
    #[must_use]
    pub const fn room_type(&self) -> RoomType {
        self.room_type
    }

    /// Returns the nightly rate.
    #[must_use]
    pub const fn rate_per_night(&self) -> Money {
        self.rate_per_night
    }

    /// Returns the maximum number of guests.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the operational status.
    #[must_use]
    pub const fn status(&self) -> RoomStatus {
        self.status
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Edits to apply to a room's mutable fields.
///
/// `None` leaves a field untouched. For the description the outer
/// option selects whether to touch the field at all and the inner one
/// carries the new value, so a description can be cleared. The room
/// number and operational status are not edited here; the status has
/// its own update path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomUpdate {
    /// Replacement room type.
    pub room_type: Option<RoomType>,
    /// Replacement nightly rate.
    pub rate_per_night: Option<Money>,
    /// Replacement guest capacity.
    pub capacity: Option<u32>,
    /// Replacement description.
    pub description: Option<Option<String>>,
}

/// Builder for creating `Room` instances.
#[derive(Debug)]
pub struct RoomBuilder {
    id: Option<RoomId>,
    number: String,
    room_type: RoomType,
    rate_per_night: Money,
    capacity: u32,
    status: RoomStatus,
    description: Option<String>,
}

impl RoomBuilder {
    /// Sets the persisted room id.
    #[must_use]
    pub const fn id(mut self, id: RoomId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the guest capacity.
    #[must_use]
    pub const fn capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the operational status.
    #[must_use]
    pub const fn status(mut self, status: RoomStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the description.
    ///
    /// The description will be trimmed of leading/trailing whitespace.
    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description.map(|d| d.trim().to_string());
        self
    }

    /// Builds the room.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The room number is empty after trimming
    /// - The capacity is zero or exceeds [`MAX_CAPACITY`]
    /// - The description is provided but is empty after trimming
    ///
    /// # Examples
    ///
    /// ```
    /// use frontdesk::{Money, Room, RoomType};
    ///
    /// let rate = Money::parse("95.00").unwrap();
    ///
    /// // Valid room
    /// let room = Room::builder("201".to_string(), RoomType::Single, rate)
    ///     .build();
    /// assert!(room.is_ok());
    ///
    /// // Invalid: zero capacity
    /// let room = Room::builder("201".to_string(), RoomType::Single, rate)
    ///     .capacity(0)
    ///     .build();
    /// assert!(room.is_err());
    /// ```
    pub fn build(self) -> Result<Room, ValidationError> {
        let number = self.number.trim().to_string();
        if number.is_empty() {
            return Err(ValidationError {
                field: "number".into(),
                message: "room number must be non-empty after trimming whitespace".into(),
            });
        }

        if self.capacity == 0 || self.capacity > MAX_CAPACITY {
            return Err(ValidationError {
                field: "capacity".into(),
                message: format!("capacity must be between 1 and {MAX_CAPACITY}"),
            });
        }

        if let Some(ref description) = self.description {
            if description.is_empty() {
                return Err(ValidationError {
                    field: "description".into(),
                    message: "description must be non-empty after trimming whitespace".into(),
                });
            }
        }

        Ok(Room {
            id: self.id,
            number,
            room_type: self.room_type,
            rate_per_night: self.rate_per_night,
            capacity: self.capacity,
            status: self.status,
            description: self.description,
        })
    }
}
