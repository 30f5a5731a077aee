//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    AvailableCommand, BookCommand, CancelCommand, CheckInCommand, CheckOutCommand, GuestCommand,
    InitCommand, ListCommand, ReportCommand, RoomCommand, SweepCommand, UpdateCommand,
    WalkInCommand,
};

/// Command-line tool for hotel room reservations and availability.
#[derive(Parser)]
#[command(name = "frontdesk")]
#[command(version, about = "Manage hotel rooms, guests, and reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "FRONTDESK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Manage the room directory
    #[command(subcommand)]
    Room(RoomCommand),

    /// Manage the guest registry
    #[command(subcommand)]
    Guest(GuestCommand),

    /// Book a room for a guest
    Book(BookCommand),

    /// Check a walk-in guest straight into a room
    WalkIn(WalkInCommand),

    /// Check in a pending reservation
    CheckIn(CheckInCommand),

    /// Check out an active reservation
    CheckOut(CheckOutCommand),

    /// Cancel a reservation
    Cancel(CancelCommand),

    /// Edit a reservation's dates, party size, or requests
    Update(UpdateCommand),

    /// List reservations
    List(ListCommand),

    /// Find rooms available for a stay
    Available(AvailableCommand),

    /// Cancel no-shows and complete overdue stays
    Sweep(SweepCommand),

    /// Show front-desk statistics
    Report(ReportCommand),
}
