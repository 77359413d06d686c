//! Authentication utilities for the catalog backend.
//!
//! Provides the credential infrastructure the HTTP service builds on:
//! - Password hashing (Argon2id)
//! - Access-token generation and validation (HS256 JWT)
//! - An authentication coordinator tying the two together for login flows
//!
//! The access token carries only the user's id and email. No expiry claim is
//! issued; a token stays valid for as long as the signing secret does.
//!
//! # Examples
//!
//! ```
//! use auth::{Authenticator, Claims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash the password for storage
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify the password and issue an access token
//! let claims = Claims::new(1, "alice@example.com");
//! let result = auth.authenticate("password123", &hash, &claims).unwrap();
//!
//! // Later requests: validate the presented token
//! let decoded = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.id, 1);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
