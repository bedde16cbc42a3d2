//! Login credentials and registration profile.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, InvalidInputError};

/// Username and password for a login request.
///
/// The password is never exposed in Debug output.
///
/// # Example
///
/// ```
/// use folio_core::Credentials;
///
/// let creds = Credentials::new("alice", "pw");
/// assert_eq!(creds.username(), "alice");
/// ```
#[derive(Clone, Serialize)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Check the pair is usable for a login attempt.
    pub fn validate(&self) -> Result<(), Error> {
        if self.username.trim().is_empty() {
            return Err(account_error("Username is required"));
        }
        if self.password.is_empty() {
            return Err(account_error("Password is required"));
        }
        Ok(())
    }
}

// Intentionally hide password in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Profile submitted when creating an account.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl Registration {
    /// Check every field is filled in and the email looks like one.
    pub fn validate(&self) -> Result<(), Error> {
        let required = [
            (&self.username, "Username is required"),
            (&self.email, "Email is required"),
            (&self.first_name, "First name is required"),
            (&self.last_name, "Last name is required"),
        ];
        for (value, message) in required {
            if value.trim().is_empty() {
                return Err(account_error(message));
            }
        }
        if !self.email.contains('@') {
            return Err(account_error("Email address is invalid"));
        }
        if self.password.is_empty() {
            return Err(account_error("Password is required"));
        }
        Ok(())
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

fn account_error(message: &str) -> Error {
    InvalidInputError::Account {
        message: message.to_string(),
    }
    .into()
}
