//! Scheduled sweeps over the reservation calendar.
//!
//! Two passes run on a schedule (or on demand from the command line):
//!
//! 1. **No-shows**: Pending reservations whose scheduled check-in is
//!    more than the grace period in the past are cancelled.
//! 2. **Overdue stays**: Active reservations whose scheduled check-out
//!    has passed are completed and their rooms released.
//!
//! Each record is processed in its own transaction, so a failure on one
//! reservation does not roll back the rest of the pass. A pass that
//! finds nothing to do is a clean no-op, which makes re-running the
//! sweep safe at any time. Sweeps do not send guest notifications.

use chrono::{Duration, NaiveDateTime};
use rusqlite::TransactionBehavior;

use crate::config::SweepConfig;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::Reservation;
use crate::room::RoomStatus;

/// Result of a no-show sweep.
#[derive(Debug, Clone, Default)]
pub struct NoShowSweepResult {
    /// Number of reservations cancelled (or that would be cancelled in
    /// a dry run).
    pub cancelled_count: usize,
    /// The affected reservations, as they looked before the sweep.
    pub cancelled: Vec<Reservation>,
    /// Number of candidates skipped because processing them failed.
    pub skipped_count: usize,
}

/// Result of an overdue-stay sweep.
#[derive(Debug, Clone, Default)]
pub struct OverdueSweepResult {
    /// Number of reservations completed (or that would be completed in
    /// a dry run).
    pub completed_count: usize,
    /// The affected reservations, as they looked before the sweep.
    pub completed: Vec<Reservation>,
    /// Number of candidates skipped because processing them failed.
    pub skipped_count: usize,
}

/// Combined result of running both sweeps.
#[derive(Debug, Clone, Default)]
pub struct SweepSummary {
    /// The no-show pass.
    pub no_shows: NoShowSweepResult,
    /// The overdue pass.
    pub overdue: OverdueSweepResult,
}

impl SweepSummary {
    /// True when neither pass touched (or would touch) anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.no_shows.cancelled_count == 0 && self.overdue.completed_count == 0
    }
}

/// Sweep operations over the reservation calendar.
///
/// All operations are static methods that work on a database instance.
pub struct SweepOperations;

impl SweepOperations {
    /// Cancels Pending reservations whose guests never arrived.
    ///
    /// A reservation is a no-show once its scheduled check-in is more
    /// than `config.no_show_grace_hours` before `now`. Cancelling a
    /// no-show never touches the room's status, a Pending booking never
    /// occupied it.
    ///
    /// When `dry_run` is true the candidates are reported but nothing is
    /// changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the grace period does not fit a signed hour
    /// count or the candidate query fails. Failures on individual
    /// records are logged and counted as skipped instead.
    pub fn cancel_no_shows(
        db: &mut Database,
        config: &SweepConfig,
        now: NaiveDateTime,
        dry_run: bool,
    ) -> Result<NoShowSweepResult> {
        let grace = i64::try_from(config.no_show_grace_hours).map_err(|_| Error::Validation {
            field: "no_show_grace_hours".into(),
            message: format!("grace period {} is out of range", config.no_show_grace_hours),
        })?;
        let cutoff = now - Duration::hours(grace);

        let candidates = Database::no_show_candidates(db.connection(), cutoff)?;
        let mut result = NoShowSweepResult::default();

        for reservation in candidates {
            if dry_run {
                result.cancelled_count += 1;
                result.cancelled.push(reservation);
                continue;
            }
            match Self::cancel_one(db, &reservation) {
                Ok(true) => {
                    result.cancelled_count += 1;
                    result.cancelled.push(reservation);
                }
                // Someone checked the guest in or cancelled between the
                // candidate query and this record's transaction.
                Ok(false) => {
                    result.skipped_count += 1;
                }
                Err(e) => {
                    log::warn!(
                        "no-show sweep skipped reservation {}: {e}",
                        reservation.id()
                    );
                    result.skipped_count += 1;
                }
            }
        }

        if result.cancelled_count > 0 {
            log::info!(
                "no-show sweep cancelled {} reservation(s){}",
                result.cancelled_count,
                if dry_run { " (dry run)" } else { "" }
            );
        }
        Ok(result)
    }

    /// Completes Active reservations whose scheduled check-out has
    /// passed, releasing their rooms.
    ///
    /// The completion is stamped with `now`, not the scheduled
    /// check-out, so the record shows when the stay was actually closed.
    ///
    /// When `dry_run` is true the candidates are reported but nothing is
    /// changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the candidate query fails. Failures on
    /// individual records are logged and counted as skipped instead.
    pub fn complete_overdue(
        db: &mut Database,
        now: NaiveDateTime,
        dry_run: bool,
    ) -> Result<OverdueSweepResult> {
        let candidates = Database::overdue_candidates(db.connection(), now)?;
        let mut result = OverdueSweepResult::default();

        for reservation in candidates {
            if dry_run {
                result.completed_count += 1;
                result.completed.push(reservation);
                continue;
            }
            match Self::complete_one(db, &reservation, now) {
                Ok(true) => {
                    result.completed_count += 1;
                    result.completed.push(reservation);
                }
                Ok(false) => {
                    result.skipped_count += 1;
                }
                Err(e) => {
                    log::warn!(
                        "overdue sweep skipped reservation {}: {e}",
                        reservation.id()
                    );
                    result.skipped_count += 1;
                }
            }
        }

        if result.completed_count > 0 {
            log::info!(
                "overdue sweep completed {} reservation(s){}",
                result.completed_count,
                if dry_run { " (dry run)" } else { "" }
            );
        }
        Ok(result)
    }

    /// Runs both sweeps: no-shows first, then overdue stays.
    ///
    /// # Errors
    ///
    /// Returns an error if either pass fails as a whole.
    pub fn process_all(
        db: &mut Database,
        config: &SweepConfig,
        now: NaiveDateTime,
        dry_run: bool,
    ) -> Result<SweepSummary> {
        Ok(SweepSummary {
            no_shows: Self::cancel_no_shows(db, config, now, dry_run)?,
            overdue: Self::complete_overdue(db, now, dry_run)?,
        })
    }

    /// Cancels a single no-show in its own transaction.
    ///
    /// Returns false when the status guard refused, meaning the record
    /// moved on since it was listed.
    fn cancel_one(db: &mut Database, reservation: &Reservation) -> Result<bool> {
        let tx = db
            .connection_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let cancelled = Database::cancel_reservation(&tx, reservation.id())?;
        tx.commit()?;
        Ok(cancelled)
    }

    /// Completes a single overdue stay and frees its room, in its own
    /// transaction.
    fn complete_one(
        db: &mut Database,
        reservation: &Reservation,
        now: NaiveDateTime,
    ) -> Result<bool> {
        let tx = db
            .connection_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let completed = Database::complete_reservation(&tx, reservation.id(), now)?;
        if completed {
            Database::set_room_status(&tx, reservation.room_id(), RoomStatus::Available)?;
        }
        tx.commit()?;
        Ok(completed)
    }
}
