//! Common test utilities for CLI integration tests.
//!
//! This module provides a test environment with an isolated data
//! directory and helpers for seeding rooms, guests, and bookings
//! through the binary itself.

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the frontdesk data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("frontdesk-data");

        Self { temp_dir, data_dir }
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("frontdesk").expect("Failed to find frontdesk binary");
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd.env_remove("FRONTDESK_DATA_DIR");
        cmd
    }

    /// Get a bare command builder without pre-configured flags.
    pub fn command_bare(&self) -> Command {
        Command::cargo_bin("frontdesk").expect("Failed to find frontdesk binary")
    }

    /// Add a double room with the given number at 150.00 a night.
    pub fn add_room(&self, number: &str) {
        self.command()
            .args([
                "room", "add", number, "--room-type", "double", "--rate", "150.00",
                "--capacity", "2",
            ])
            .assert()
            .success();
    }

    /// Register a guest with the given email.
    pub fn add_guest(&self, email: &str) {
        self.command()
            .args([
                "guest",
                "add",
                "--first-name",
                "Ada",
                "--last-name",
                "Lovelace",
                "--email",
                email,
                "--phone",
                "555-0101",
                "--id-document",
                &format!("DOC-{email}"),
            ])
            .assert()
            .success();
    }

    /// Book a room and return the reservation id printed in quiet mode.
    pub fn book(&self, room: &str, email: &str, check_in: &str, check_out: &str) -> String {
        let output = self
            .command()
            .args([
                "--quiet", "book", room, email, "--check-in", check_in, "--check-out", check_out,
            ])
            .output()
            .expect("book command should run");
        assert!(output.status.success(), "booking failed: {output:?}");
        String::from_utf8(output.stdout)
            .expect("reservation id should be utf-8")
            .trim()
            .to_string()
    }
}
