//! Guest types for the registry of people who book stays.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A unique identifier for a guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestId(i64);

impl GuestId {
    /// Creates a guest id from a raw database id.
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

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered guest.
///
/// Guests are identified by a unique email address and an identity
/// document number. Nationality and postal address are optional.
///
/// # Examples
///
/// ```
/// use frontdesk::Guest;
///
/// let guest = Guest::builder(
///     "Ada".to_string(),
///     "Lovelace".to_string(),
///     "ada@example.com".to_string(),
///     "555-0101".to_string(),
///     "P1234567".to_string(),
/// )
/// .build()
/// .unwrap();
///
/// assert_eq!(guest.full_name(), "Ada Lovelace");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    id: Option<GuestId>,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    id_document: String,
    nationality: Option<String>,
    address: Option<String>,
}

impl Guest {
    /// Creates a new guest builder.
    #[must_use]
    pub fn builder(
        first_name: String,
        last_name: String,
        email: String,
        phone: String,
        id_document: String,
    ) -> GuestBuilder {
        GuestBuilder {
            id: None,
            first_name,
            last_name,
            email,
            phone,
            id_document,
            nationality: None,
            address: None,
        }
    }

    /// Returns the guest id, if the guest has been persisted.
    #[must_use]
    pub const fn id(&self) -> Option<GuestId> {
        self.id
    }

    /// Returns the first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the full name, first then last.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Returns the identity document number.
    #[must_use]
    pub fn id_document(&self) -> &str {
        &self.id_document
    }

    /// Returns the optional nationality.
    #[must_use]
    pub fn nationality(&self) -> Option<&str> {
        self.nationality.as_deref()
    }

    /// Returns the optional postal address.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

/// Builder for creating `Guest` instances.
#[derive(Debug)]
pub struct GuestBuilder {
    id: Option<GuestId>,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    id_document: String,
    nationality: Option<String>,
    address: Option<String>,
}

impl GuestBuilder {
    /// Sets the persisted guest id.
    #[must_use]
    pub const fn id(mut self, id: GuestId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the nationality.
    #[must_use]
    pub fn nationality(mut self, nationality: Option<String>) -> Self {
        self.nationality = nationality.map(|n| n.trim().to_string());
        self
    }

    /// Sets the postal address.
    #[must_use]
    pub fn address(mut self, address: Option<String>) -> Self {
        self.address = address.map(|a| a.trim().to_string());
        self
    }

    /// Builds the guest.
    ///
    /// # Errors
    ///
    /// Returns an error if any required field is empty after trimming, or
    /// if the email does not contain an `@`.
    pub fn build(self) -> Result<Guest, ValidationError> {
        let require = |field: &str, value: &str| -> Result<String, ValidationError> {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(ValidationError {
                    field: field.into(),
                    message: format!("{field} must be non-empty after trimming whitespace"),
                });
            }
            Ok(trimmed.to_string())
        };

        let first_name = require("first_name", &self.first_name)?;
        let last_name = require("last_name", &self.last_name)?;
        let email = require("email", &self.email)?;
        let phone = require("phone", &self.phone)?;
        let id_document = require("id_document", &self.id_document)?;

        if !email.contains('@') {
            return Err(ValidationError {
                field: "email".into(),
                message: format!("'{email}' is not a valid email address"),
            });
        }

        if let Some(ref nationality) = self.nationality {
            if nationality.is_empty() {
                return Err(ValidationError {
                    field: "nationality".into(),
                    message: "nationality must be non-empty after trimming whitespace".into(),
                });
            }
        }
        if let Some(ref address) = self.address {
            if address.is_empty() {
                return Err(ValidationError {
                    field: "address".into(),
                    message: "address must be non-empty after trimming whitespace".into(),
                });
            }
        }

        Ok(Guest {
            id: self.id,
            first_name,
            last_name,
            email,
            phone,
            id_document,
            nationality: self.nationality,
            address: self.address,
        })
    }
}
