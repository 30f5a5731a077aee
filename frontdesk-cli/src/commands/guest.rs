//! Guest command implementation.
//!
//! This module implements the `guest` subcommands for the guest
//! registry: registering guests and listing them.

use clap::{Args, Subcommand};
use frontdesk::{Database, Guest};

use crate::error::CliError;
use crate::utils::{guest_line, load_configuration, open_database, print_json, GlobalOptions};

/// Manage the guest registry.
#[derive(Subcommand)]
pub enum GuestCommand {
    /// Register a guest
    Add(AddGuestCommand),

    /// List registered guests
    List(ListGuestsCommand),
}

impl GuestCommand {
    /// Execute the selected guest subcommand.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match self {
            Self::Add(cmd) => cmd.execute(global),
            Self::List(cmd) => cmd.execute(global),
        }
    }
}

/// Register a guest.
#[derive(Args)]
pub struct AddGuestCommand {
    /// Given name
    #[arg(long)]
    pub first_name: String,

    /// Family name
    #[arg(long)]
    pub last_name: String,

    /// Email address (unique)
    #[arg(long)]
    pub email: String,

    /// Phone number
    #[arg(long)]
    pub phone: String,

    /// Identity document number (unique)
    #[arg(long)]
    pub id_document: String,

    /// Nationality
    #[arg(long)]
    pub nationality: Option<String>,

    /// Postal address
    #[arg(long)]
    pub address: Option<String>,
}

impl AddGuestCommand {
    /// Execute the guest add command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(&config)?;

        let guest = Guest::builder(
            self.first_name,
            self.last_name,
            self.email,
            self.phone,
            self.id_document,
        )
        .nationality(self.nationality)
        .address(self.address)
        .build()
        .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let stored = db.add_guest(&guest)?;
        if !global.quiet {
            println!(
                "Registered guest {} <{}>",
                stored.full_name(),
                stored.email()
            );
        }
        Ok(())
    }
}

/// List registered guests.
#[derive(Args)]
pub struct ListGuestsCommand {
    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ListGuestsCommand {
    /// Execute the guest list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(&config)?;

        let guests = Database::list_guests(db.connection())?;
        if self.json {
            return print_json(&guests);
        }
        for guest in &guests {
            println!("{}", guest_line(guest));
        }
        Ok(())
    }
}
