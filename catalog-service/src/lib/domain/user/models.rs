use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserError;
use crate::user::errors::UsernameError;

/// A registered account.
///
/// `token_balance` is the credit counter consumed by the recommendation
/// feature (10 on signup, +5 per settled purchase). It is unrelated to the
/// access token.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub token_balance: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Username value type. Any non-empty string is accepted (federated
/// sign-in produces display names with spaces).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    pub fn new(username: String) -> Result<Self, UsernameError> {
        if username.is_empty() {
            return Err(UsernameError::Empty);
        }
        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address value type, RFC 5322 checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(email: String) -> Result<Self, EmailError> {
        if email.is_empty() {
            return Err(EmailError::Empty);
        }
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|_| EmailError::InvalidFormat)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Plaintext password accepted at registration. Never stored; the service
/// hashes it before the insert.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;

    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }
        if password.len() < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort);
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep plaintext out of debug output
impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Validated registration payload.
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterCommand {
    /// Validate the raw request fields, collecting every violation.
    ///
    /// All three fields are checked before failing so the caller sees the
    /// full list of problems in one response.
    pub fn parse(
        username: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<Self, UserError> {
        let mut violations = Vec::new();

        let username = match username {
            None => {
                violations.push(UsernameError::Missing.to_string());
                None
            }
            Some(raw) => Username::new(raw)
                .map_err(|e| violations.push(e.to_string()))
                .ok(),
        };

        let email = match email {
            None => {
                violations.push(EmailError::Missing.to_string());
                None
            }
            Some(raw) => EmailAddress::new(raw)
                .map_err(|e| violations.push(e.to_string()))
                .ok(),
        };

        let password = match password {
            None => {
                violations.push(PasswordPolicyError::Missing.to_string());
                None
            }
            Some(raw) => Password::new(raw)
                .map_err(|e| violations.push(e.to_string()))
                .ok(),
        };

        match (username, email, password) {
            (Some(username), Some(email), Some(password)) => Ok(Self {
                username,
                email,
                password,
            }),
            _ => Err(UserError::Validation(violations)),
        }
    }
}

/// Insert payload handed to the repository (password already hashed).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Identity asserted by the OAuth provider after verifying an ID token.
#[derive(Debug, Clone)]
pub struct GoogleIdentity {
    /// Provider-side stable account identifier (`sub`).
    pub subject: String,
    pub email: String,
    pub name: Option<String>,
}
