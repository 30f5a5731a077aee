//! Read-only reporting queries over rooms and reservations.
//!
//! Everything here is an aggregate read; the reporting surface exposes
//! no mutations. Rendering (PDF, spreadsheets) is a downstream concern.

use chrono::{Datelike, NaiveDate};
use rusqlite::{params, Connection};
use serde::Serialize;

use crate::database::Database;
use crate::error::Result;
use crate::reservation::ReservationStatus;
use crate::room::RoomStatus;
use crate::Money;

/// A point-in-time snapshot of the front desk's key numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    /// Number of rooms in the directory.
    pub total_rooms: u32,
    /// Rooms currently marked Occupied.
    pub occupied_rooms: u32,
    /// Rooms currently marked Available.
    pub available_rooms: u32,
    /// Rooms currently marked Maintenance.
    pub maintenance_rooms: u32,
    /// Occupied share of all rooms, as a percentage rounded to two
    /// decimals. Zero when there are no rooms.
    pub occupancy_rate: f64,
    /// Reservations currently Active.
    pub active_reservations: u32,
    /// Pending or Active reservations scheduled to check in today.
    pub today_checkins: u32,
    /// Active reservations scheduled to check out today.
    pub today_checkouts: u32,
    /// Number of registered guests.
    pub total_guests: u32,
    /// Total price of non-cancelled reservations booked today.
    pub revenue_today: Money,
    /// Total price of non-cancelled reservations booked this month.
    pub revenue_month: Money,
}

/// Per-status reservation counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReservationCounts {
    /// Reservations awaiting check-in.
    pub pending: u32,
    /// In-house stays.
    pub active: u32,
    /// Closed-out stays.
    pub completed: u32,
    /// Cancelled bookings.
    pub cancelled: u32,
}

/// Reporting queries.
///
/// All operations are static methods over a read-only connection.
pub struct Reports;

impl Reports {
    /// Builds the dashboard snapshot for the given calendar day.
    ///
    /// Revenue buckets a reservation by the day it was BOOKED, not the
    /// day of the stay, and excludes cancelled bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn dashboard(conn: &Connection, today: NaiveDate) -> Result<DashboardStats> {
        let total_rooms = Self::count(conn, "SELECT COUNT(*) FROM rooms", [])?;
        let occupied_rooms = Self::rooms_with_status(conn, RoomStatus::Occupied)?;
        let available_rooms = Self::rooms_with_status(conn, RoomStatus::Available)?;
        let maintenance_rooms = Self::rooms_with_status(conn, RoomStatus::Maintenance)?;

        let occupancy_rate = if total_rooms > 0 {
            let share = f64::from(occupied_rooms) / f64::from(total_rooms) * 100.0;
            (share * 100.0).round() / 100.0
        } else {
            0.0
        };

        let active_reservations =
            Self::reservations_with_status(conn, ReservationStatus::Active)?;
        let today_checkins =
            u32::try_from(Database::todays_checkins(conn, today)?.len()).unwrap_or(u32::MAX);
        let today_checkouts =
            u32::try_from(Database::todays_checkouts(conn, today)?.len()).unwrap_or(u32::MAX);
        let total_guests = Self::count(conn, "SELECT COUNT(*) FROM guests", [])?;

        let revenue_today = Self::sum_cents(
            conn,
            r"SELECT COALESCE(SUM(total_cents), 0) FROM reservations
              WHERE date(created_at) = ? AND status != 'Cancelled'",
            [today.to_string()],
        )?;
        let start_of_month = today.with_day(1).unwrap_or(today);
        let revenue_month = Self::sum_cents(
            conn,
            r"SELECT COALESCE(SUM(total_cents), 0) FROM reservations
              WHERE date(created_at) >= ? AND status != 'Cancelled'",
            [start_of_month.to_string()],
        )?;

        Ok(DashboardStats {
            total_rooms,
            occupied_rooms,
            available_rooms,
            maintenance_rooms,
            occupancy_rate,
            active_reservations,
            today_checkins,
            today_checkouts,
            total_guests,
            revenue_today,
            revenue_month,
        })
    }

    /// Sums the total price of non-cancelled reservations created in the
    /// given inclusive date range.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn revenue_between(conn: &Connection, from: NaiveDate, to: NaiveDate) -> Result<Money> {
        Self::sum_cents(
            conn,
            r"SELECT COALESCE(SUM(total_cents), 0) FROM reservations
              WHERE date(created_at) >= ? AND date(created_at) <= ?
                AND status != 'Cancelled'",
            params![from.to_string(), to.to_string()],
        )
    }

    /// Counts reservations by status.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn reservation_counts(conn: &Connection) -> Result<ReservationCounts> {
        Ok(ReservationCounts {
            pending: Self::reservations_with_status(conn, ReservationStatus::Pending)?,
            active: Self::reservations_with_status(conn, ReservationStatus::Active)?,
            completed: Self::reservations_with_status(conn, ReservationStatus::Completed)?,
            cancelled: Self::reservations_with_status(conn, ReservationStatus::Cancelled)?,
        })
    }

    fn rooms_with_status(conn: &Connection, status: RoomStatus) -> Result<u32> {
        Self::count(
            conn,
            "SELECT COUNT(*) FROM rooms WHERE status = ?",
            [status.as_str()],
        )
    }

    fn reservations_with_status(conn: &Connection, status: ReservationStatus) -> Result<u32> {
        Self::count(
            conn,
            "SELECT COUNT(*) FROM reservations WHERE status = ?",
            [status.as_str()],
        )
    }

    fn count<P: rusqlite::Params>(conn: &Connection, sql: &str, params: P) -> Result<u32> {
        let count: i64 = conn.query_row(sql, params, |row| row.get(0))?;
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    fn sum_cents<P: rusqlite::Params>(conn: &Connection, sql: &str, params: P) -> Result<Money> {
        let cents: i64 = conn.query_row(sql, params, |row| row.get(0))?;
        Ok(Money::from_cents(cents.max(0)).unwrap_or(Money::ZERO))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{
        create_test_database, day, sample_guest, sample_room, stay,
    };
    use crate::notify::NullNotifier;
    use crate::operations::booking::{BookingOperations, BookingRequest};
    use crate::operations::lifecycle::LifecycleOperations;

    #[test]
    fn test_dashboard_empty_database() {
        let db = create_test_database();
        let stats = Reports::dashboard(db.connection(), day(1, 0).date()).unwrap();

        assert_eq!(stats.total_rooms, 0);
        assert!((stats.occupancy_rate - 0.0).abs() < f64::EPSILON);
        assert!(stats.revenue_today.is_zero());
        assert!(stats.revenue_month.is_zero());
    }

    #[test]
    fn test_dashboard_counts_and_rate() {
        let mut db = create_test_database();
        let room = db.add_room(&sample_room("101")).unwrap();
        db.add_room(&sample_room("102")).unwrap();
        db.add_room(&sample_room("103")).unwrap();
        let guest = db.add_guest(&sample_guest("ada@example.com")).unwrap();

        let reservation = BookingOperations::create_reservation(
            &mut db,
            &NullNotifier,
            &BookingRequest {
                room_id: room.id().unwrap(),
                guest_id: guest.id().unwrap(),
                dates: stay(2, 4),
                guests_count: 2,
                special_requests: None,
            },
            day(1, 9),
        )
        .unwrap();
        LifecycleOperations::mark_check_in(&mut db, &NullNotifier, reservation.id(), day(2, 14))
            .unwrap();

        let stats = Reports::dashboard(db.connection(), day(2, 0).date()).unwrap();
        assert_eq!(stats.total_rooms, 3);
        assert_eq!(stats.occupied_rooms, 1);
        assert_eq!(stats.available_rooms, 2);
        assert!((stats.occupancy_rate - 33.33).abs() < 0.001);
        assert_eq!(stats.active_reservations, 1);
        assert_eq!(stats.today_checkins, 1);
        assert_eq!(stats.total_guests, 1);
    }

    #[test]
    fn test_dashboard_revenue_buckets_by_booking_day() {
        let mut db = create_test_database();
        let room = db.add_room(&sample_room("101")).unwrap();
        let guest = db.add_guest(&sample_guest("ada@example.com")).unwrap();

        // Booked on the 1st for a stay starting the 10th; two nights at
        // 150.00.
        BookingOperations::create_reservation(
            &mut db,
            &NullNotifier,
            &BookingRequest {
                room_id: room.id().unwrap(),
                guest_id: guest.id().unwrap(),
                dates: stay(10, 12),
                guests_count: 2,
                special_requests: None,
            },
            day(1, 9),
        )
        .unwrap();

        let on_booking_day = Reports::dashboard(db.connection(), day(1, 0).date()).unwrap();
        assert_eq!(on_booking_day.revenue_today.cents(), 30_000);

        let next_day = Reports::dashboard(db.connection(), day(2, 0).date()).unwrap();
        assert!(next_day.revenue_today.is_zero());
        // Same month, so the monthly bucket still counts it.
        assert_eq!(next_day.revenue_month.cents(), 30_000);
    }

    #[test]
    fn test_cancelled_bookings_earn_nothing() {
        let mut db = create_test_database();
        let room = db.add_room(&sample_room("101")).unwrap();
        let guest = db.add_guest(&sample_guest("ada@example.com")).unwrap();

        let reservation = BookingOperations::create_reservation(
            &mut db,
            &NullNotifier,
            &BookingRequest {
                room_id: room.id().unwrap(),
                guest_id: guest.id().unwrap(),
                dates: stay(2, 4),
                guests_count: 2,
                special_requests: None,
            },
            day(1, 9),
        )
        .unwrap();
        LifecycleOperations::cancel(&mut db, &NullNotifier, reservation.id()).unwrap();

        let stats = Reports::dashboard(db.connection(), day(1, 0).date()).unwrap();
        assert!(stats.revenue_today.is_zero());
        assert!(stats.revenue_month.is_zero());
    }

    #[test]
    fn test_revenue_between_is_inclusive() {
        let mut db = create_test_database();
        let room = db.add_room(&sample_room("101")).unwrap();
        let other = db.add_room(&sample_room("102")).unwrap();
        let guest = db.add_guest(&sample_guest("ada@example.com")).unwrap();
        let book = |db: &mut Database, room_id, dates, booked_at| {
            BookingOperations::create_reservation(
                db,
                &NullNotifier,
                &BookingRequest {
                    room_id,
                    guest_id: guest.id().unwrap(),
                    dates,
                    guests_count: 2,
                    special_requests: None,
                },
                booked_at,
            )
            .unwrap()
        };

        book(&mut db, room.id().unwrap(), stay(10, 12), day(1, 9));
        book(&mut db, other.id().unwrap(), stay(10, 12), day(5, 9));

        let both =
            Reports::revenue_between(db.connection(), day(1, 0).date(), day(5, 0).date()).unwrap();
        assert_eq!(both.cents(), 60_000);

        let first_only =
            Reports::revenue_between(db.connection(), day(1, 0).date(), day(4, 0).date()).unwrap();
        assert_eq!(first_only.cents(), 30_000);
    }

    #[test]
    fn test_reservation_counts() {
        let mut db = create_test_database();
        let room = db.add_room(&sample_room("101")).unwrap();
        let other = db.add_room(&sample_room("102")).unwrap();
        let guest = db.add_guest(&sample_guest("ada@example.com")).unwrap();
        let book = |db: &mut Database, room_id, dates| {
            BookingOperations::create_reservation(
                db,
                &NullNotifier,
                &BookingRequest {
                    room_id,
                    guest_id: guest.id().unwrap(),
                    dates,
                    guests_count: 2,
                    special_requests: None,
                },
                day(1, 9),
            )
            .unwrap()
        };

        let active = book(&mut db, room.id().unwrap(), stay(2, 4));
        LifecycleOperations::mark_check_in(&mut db, &NullNotifier, active.id(), day(2, 14))
            .unwrap();
        let cancelled = book(&mut db, other.id().unwrap(), stay(2, 4));
        LifecycleOperations::cancel(&mut db, &NullNotifier, cancelled.id()).unwrap();
        book(&mut db, other.id().unwrap(), stay(6, 8));

        let counts = Reports::reservation_counts(db.connection()).unwrap();
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.active, 1);
        assert_eq!(counts.completed, 0);
        assert_eq!(counts.cancelled, 1);
    }
}
