use async_trait::async_trait;

use crate::user::errors::UserError;
use crate::user::models::GoogleIdentity;
use crate::user::models::NewUser;
use crate::user::models::User;

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `EmailTaken` - email is already registered
    /// * `Database` - database operation failed
    async fn create(&self, new_user: NewUser) -> Result<User, UserError>;

    /// Retrieve a user by id (None if not found).
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, UserError>;

    /// Retrieve a user by email address (None if not found).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Replace the user's username.
    async fn update_username(&self, id: i32, username: &str) -> Result<(), UserError>;

    /// Add `amount` to the user's token balance.
    ///
    /// Only called with positive amounts from confirmed payment callbacks.
    async fn credit_tokens(&self, id: i32, amount: i32) -> Result<(), UserError>;
}

/// Verification of an OAuth provider's ID token.
#[async_trait]
pub trait IdentityVerifier: Send + Sync + 'static {
    /// Validate the ID token with the provider and return the identity it
    /// asserts.
    ///
    /// # Errors
    /// * `IdentityVerification` - token rejected by the provider, audience
    ///   mismatch, or the provider was unreachable
    async fn verify(&self, id_token: &str) -> Result<GoogleIdentity, UserError>;
}
