//! Book command implementation.
//!
//! This module implements the `book` command, which creates a Pending
//! reservation. The guest is looked up by email; an unregistered guest
//! can be registered inline by passing the full set of `--guest-*`
//! details, which are matched against existing records before a new one
//! is created.

use clap::Args;
use frontdesk::{
    BookingOperations, BookingRequest, Database, Guest, LogNotifier, Room,
};

use crate::error::CliError;
use crate::utils::{
    load_configuration, now, open_database, reservation_line, stay_from_args, GlobalOptions,
};

/// Book a room for a guest.
#[derive(Args)]
pub struct BookCommand {
    /// Room number
    pub room: String,

    /// Guest email address
    pub guest: String,

    /// Check-in date (YYYY-MM-DD, 15:00; or YYYY-MM-DDTHH:MM)
    #[arg(long, value_name = "DATE")]
    pub check_in: String,

    /// Check-out date (YYYY-MM-DD, 11:00; or YYYY-MM-DDTHH:MM)
    #[arg(long, value_name = "DATE")]
    pub check_out: String,

    /// Party size
    #[arg(long, default_value_t = 1)]
    pub guests: u32,

    /// Special requests to attach
    #[arg(long, value_name = "TEXT")]
    pub requests: Option<String>,

    /// Given name, to register the guest inline
    #[arg(long, value_name = "NAME")]
    pub guest_first: Option<String>,

    /// Family name, to register the guest inline
    #[arg(long, value_name = "NAME")]
    pub guest_last: Option<String>,

    /// Phone number, to register the guest inline
    #[arg(long, value_name = "PHONE")]
    pub guest_phone: Option<String>,

    /// Identity document number, to register the guest inline
    #[arg(long, value_name = "DOCUMENT")]
    pub guest_document: Option<String>,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(&config)?;

        let room = find_room(&db, &self.room)?;
        let guest = self.resolve_guest(&mut db)?;
        let dates = stay_from_args(&self.check_in, &self.check_out)?;

        let request = BookingRequest {
            room_id: room_id(&room)?,
            guest_id: guest_id(&guest)?,
            dates,
            guests_count: self.guests,
            special_requests: self.requests,
        };

        let reservation =
            BookingOperations::create_reservation(&mut db, &LogNotifier, &request, now())?;

        if global.quiet {
            println!("{}", reservation.id());
        } else {
            println!("Booked: {}", reservation_line(&reservation));
        }
        Ok(())
    }

    /// Resolves the booking guest, registering them when the inline
    /// details are given.
    fn resolve_guest(&self, db: &mut Database) -> Result<Guest, CliError> {
        match (
            &self.guest_first,
            &self.guest_last,
            &self.guest_phone,
            &self.guest_document,
        ) {
            (Some(first), Some(last), Some(phone), Some(document)) => {
                let guest = Guest::builder(
                    first.clone(),
                    last.clone(),
                    self.guest.clone(),
                    phone.clone(),
                    document.clone(),
                )
                .build()
                .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
                Ok(db.get_or_create_guest(&guest)?)
            }
            (None, None, None, None) => find_guest(db, &self.guest),
            _ => Err(CliError::InvalidArguments(
                "registering a guest inline needs --guest-first, --guest-last, \
                 --guest-phone, and --guest-document together"
                    .to_string(),
            )),
        }
    }
}

/// Look up a room by number, failing with not-found.
pub fn find_room(db: &Database, number: &str) -> Result<Room, CliError> {
    Database::get_room_by_number(db.connection(), number)?.ok_or_else(|| {
        CliError::Library(frontdesk::Error::NotFound {
            resource: format!("room {number}"),
        })
    })
}

/// Look up a guest by email, failing with not-found.
pub fn find_guest(db: &Database, email: &str) -> Result<Guest, CliError> {
    Database::get_guest_by_email(db.connection(), email)?.ok_or_else(|| {
        CliError::Library(frontdesk::Error::NotFound {
            resource: format!("guest {email}"),
        })
    })
}

/// Extract the id a stored room carries.
pub fn room_id(room: &Room) -> Result<frontdesk::RoomId, CliError> {
    room.id().ok_or_else(|| {
        CliError::Library(frontdesk::Error::NotFound {
            resource: format!("room {}", room.number()),
        })
    })
}

/// Extract the id a stored guest carries.
pub fn guest_id(guest: &Guest) -> Result<frontdesk::GuestId, CliError> {
    guest.id().ok_or_else(|| {
        CliError::Library(frontdesk::Error::NotFound {
            resource: format!("guest {}", guest.email()),
        })
    })
}
