//! Room command implementation.
//!
//! This module implements the `room` subcommands for managing the room
//! directory: adding rooms, listing them, and changing their
//! operational status.

use clap::{Args, Subcommand};
use frontdesk::{Database, Money, Room, RoomStatus, RoomType};

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, print_json, room_line, GlobalOptions};

/// Manage the room directory.
#[derive(Subcommand)]
pub enum RoomCommand {
    /// Add a room to the directory
    Add(AddRoomCommand),

    /// List rooms
    List(ListRoomsCommand),

    /// Change a room's operational status
    SetStatus(SetRoomStatusCommand),
}

impl RoomCommand {
    /// Execute the selected room subcommand.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match self {
            Self::Add(cmd) => cmd.execute(global),
            Self::List(cmd) => cmd.execute(global),
            Self::SetStatus(cmd) => cmd.execute(global),
        }
    }
}

/// Add a room to the directory.
#[derive(Args)]
pub struct AddRoomCommand {
    /// Room number (unique)
    pub number: String,

    /// Room type (single, double, suite, deluxe)
    #[arg(long, value_name = "TYPE")]
    pub room_type: String,

    /// Nightly rate, e.g. 150.00
    #[arg(long, value_name = "AMOUNT")]
    pub rate: String,

    /// Sleeping capacity
    #[arg(long, default_value_t = 2)]
    pub capacity: u32,

    /// Free-form description
    #[arg(long)]
    pub description: Option<String>,
}

impl AddRoomCommand {
    /// Execute the room add command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(&config)?;

        let room_type: RoomType = self
            .room_type
            .parse()
            .map_err(|e: frontdesk::ValidationError| CliError::InvalidArguments(e.to_string()))?;
        let rate = Money::parse(&self.rate)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let mut builder = Room::builder(self.number, room_type, rate).capacity(self.capacity);
        if let Some(description) = self.description {
            builder = builder.description(Some(description));
        }
        let room = builder
            .build()
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let stored = db.add_room(&room)?;
        if !global.quiet {
            println!(
                "Added room {} ({}, {}/night)",
                stored.number(),
                stored.room_type(),
                stored.rate_per_night()
            );
        }
        Ok(())
    }
}

/// List rooms.
#[derive(Args)]
pub struct ListRoomsCommand {
    /// Only rooms with this status (available, occupied, maintenance)
    #[arg(long, value_name = "STATUS")]
    pub status: Option<String>,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ListRoomsCommand {
    /// Execute the room list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(&config)?;

        let rooms = match self.status {
            Some(raw) => {
                let status: RoomStatus = raw
                    .parse()
                    .map_err(|e: frontdesk::ValidationError| {
                        CliError::InvalidArguments(e.to_string())
                    })?;
                Database::rooms_by_status(db.connection(), status)?
            }
            None => Database::list_rooms(db.connection())?,
        };

        if self.json {
            return print_json(&rooms);
        }
        for room in &rooms {
            println!("{}", room_line(room));
        }
        Ok(())
    }
}

/// Change a room's operational status.
#[derive(Args)]
pub struct SetRoomStatusCommand {
    /// Room number
    pub number: String,

    /// New status (available, occupied, maintenance)
    pub status: String,
}

impl SetRoomStatusCommand {
    /// Execute the room set-status command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(&config)?;

        let status: RoomStatus = self
            .status
            .parse()
            .map_err(|e: frontdesk::ValidationError| CliError::InvalidArguments(e.to_string()))?;

        let room = Database::get_room_by_number(db.connection(), &self.number)?.ok_or_else(
            || {
                CliError::Library(frontdesk::Error::NotFound {
                    resource: format!("room {}", self.number),
                })
            },
        )?;
        let id = room.id().ok_or_else(|| {
            CliError::Library(frontdesk::Error::NotFound {
                resource: format!("room {}", self.number),
            })
        })?;

        db.update_room_status(id, status)?;
        if !global.quiet {
            println!("Room {} is now {status}", self.number);
        }
        Ok(())
    }
}
