use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username is required")]
    Missing,

    #[error("Username cannot be empty")]
    Empty,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email is required")]
    Missing,

    #[error("Email cannot be empty")]
    Empty,

    #[error("Must be a valid email format")]
    InvalidFormat,
}

/// Error for password policy failures at registration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password is required")]
    Missing,

    #[error("Password cannot be empty")]
    Empty,

    #[error("Password must be at least 6 characters long")]
    TooShort,
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    /// One or more request fields failed validation; every violated field
    /// is listed.
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Email address already in use")]
    EmailTaken,

    #[error("User not found")]
    NotFound,

    #[error("Google Token is required")]
    MissingGoogleToken,

    #[error("Identity verification failed: {0}")]
    IdentityVerification(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(String),
}
