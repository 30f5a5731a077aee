//! Database CRUD operations for guests.

use rusqlite::{params, Connection, TransactionBehavior};

use crate::error::{Error, Result};
use crate::guest::{Guest, GuestId};

use super::connection::Database;
use super::rooms::is_unique_violation;

/// Helper function to deserialize a guest from a database row.
///
/// Expects row fields in this order: id, `first_name`, `last_name`,
/// email, phone, `id_document`, nationality, address.
fn row_to_guest(row: &rusqlite::Row<'_>) -> rusqlite::Result<Guest> {
    let id: i64 = row.get(0)?;
    let first_name: String = row.get(1)?;
    let last_name: String = row.get(2)?;
    let email: String = row.get(3)?;
    let phone: String = row.get(4)?;
    let id_document: String = row.get(5)?;
    let nationality: Option<String> = row.get(6)?;
    let address: Option<String> = row.get(7)?;

    Guest::builder(first_name, last_name, email, phone, id_document)
        .id(GuestId::new(id))
        .nationality(nationality)
        .address(address)
        .build()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

const INSERT_GUEST: &str = r"
    INSERT INTO guests (first_name, last_name, email, phone, id_document, nationality, address)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";

const SELECT_GUEST: &str = r"
    SELECT id, first_name, last_name, email, phone, id_document, nationality, address
    FROM guests
    WHERE id = ?
";

const SELECT_GUEST_BY_EMAIL: &str = r"
    SELECT id, first_name, last_name, email, phone, id_document, nationality, address
    FROM guests
    WHERE email = ?
";

const SELECT_GUEST_BY_DOCUMENT: &str = r"
    SELECT id, first_name, last_name, email, phone, id_document, nationality, address
    FROM guests
    WHERE id_document = ?
";

const LIST_GUESTS: &str = r"
    SELECT id, first_name, last_name, email, phone, id_document, nationality, address
    FROM guests
    ORDER BY last_name, first_name
";

impl Database {
    /// Registers a new guest.
    ///
    /// The insert runs in a transaction with IMMEDIATE mode. Returns the
    /// guest with their assigned id.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the email or identity document is
    /// already registered, or a database error for other failures.
    pub fn add_guest(&mut self, guest: &Guest) -> Result<Guest> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let id = Self::insert_guest(&tx, guest)?;
        tx.commit()?;

        Self::get_guest(&self.conn, id)?.ok_or_else(|| Error::NotFound {
            resource: format!("guest {id}"),
        })
    }

    /// Inserts a guest on an existing connection or transaction.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the email or identity document is
    /// already registered, or a database error for other failures.
    pub fn insert_guest(conn: &Connection, guest: &Guest) -> Result<GuestId> {
        let result = conn.execute(
            INSERT_GUEST,
            params![
                guest.first_name(),
                guest.last_name(),
                guest.email(),
                guest.phone(),
                guest.id_document(),
                guest.nationality(),
                guest.address(),
            ],
        );

        match result {
            Ok(_) => Ok(GuestId::new(conn.last_insert_rowid())),
            Err(e) if is_unique_violation(&e, "guests.email") => Err(Error::Validation {
                field: "email".into(),
                message: format!("email '{}' is already registered", guest.email()),
            }),
            Err(e) if is_unique_violation(&e, "guests.id_document") => Err(Error::Validation {
                field: "id_document".into(),
                message: format!(
                    "identity document '{}' is already registered",
                    guest.id_document()
                ),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetches a guest by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_guest(conn: &Connection, id: GuestId) -> Result<Option<Guest>> {
        match conn.query_row(SELECT_GUEST, [id.value()], row_to_guest) {
            Ok(guest) => Ok(Some(guest)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetches a guest by email address.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_guest_by_email(conn: &Connection, email: &str) -> Result<Option<Guest>> {
        match conn.query_row(SELECT_GUEST_BY_EMAIL, [email], row_to_guest) {
            Ok(guest) => Ok(Some(guest)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetches a guest by identity document number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_guest_by_document(conn: &Connection, id_document: &str) -> Result<Option<Guest>> {
        match conn.query_row(SELECT_GUEST_BY_DOCUMENT, [id_document], row_to_guest) {
            Ok(guest) => Ok(Some(guest)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the guest matching the given record, registering them if
    /// nobody matches.
    ///
    /// Matching tries the email address first, then the identity
    /// document, so a returning guest with a new email is still found.
    /// The whole lookup-or-insert runs in one IMMEDIATE transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction, lookup, or insert fails.
    pub fn get_or_create_guest(&mut self, guest: &Guest) -> Result<Guest> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let found = if let Some(existing) = Self::get_guest_by_email(&tx, guest.email())? {
            existing
        } else if let Some(existing) = Self::get_guest_by_document(&tx, guest.id_document())? {
            existing
        } else {
            let id = Self::insert_guest(&tx, guest)?;
            Self::get_guest(&tx, id)?.ok_or_else(|| Error::NotFound {
                resource: format!("guest {id}"),
            })?
        };

        tx.commit()?;
        Ok(found)
    }

    /// Lists all guests ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_guests(conn: &Connection) -> Result<Vec<Guest>> {
        let mut stmt = conn.prepare(LIST_GUESTS)?;
        let guests = stmt
            .query_map([], row_to_guest)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(guests)
    }
}
