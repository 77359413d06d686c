use std::sync::Arc;

use crate::user::errors::UserError;
use crate::user::models::NewUser;
use crate::user::models::RegisterCommand;
use crate::user::models::User;
use crate::user::models::Username;
use crate::user::ports::IdentityVerifier;
use crate::user::ports::UserRepository;

/// Domain service for account operations: registration, lookup for login
/// and the authentication gate, Google sign-in, and profile maintenance.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    identity_verifier: Arc<dyn IdentityVerifier>,
    password_hasher: auth::PasswordHasher,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        identity_verifier: Arc<dyn IdentityVerifier>,
    ) -> Self {
        Self {
            repository,
            identity_verifier,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    /// Create an account from a validated registration command.
    pub async fn register(&self, command: RegisterCommand) -> Result<User, UserError> {
        let password_hash = self
            .password_hasher
            .hash(command.password.as_str())
            .map_err(|e| UserError::PasswordHash(e.to_string()))?;

        self.repository
            .create(NewUser {
                username: command.username.into_string(),
                email: command.email.into_string(),
                password_hash,
            })
            .await
    }

    /// Look up a user by id.
    ///
    /// # Errors
    /// * `NotFound` - no such user
    pub async fn get_user(&self, id: i32) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound)
    }

    /// Look up a user by email (login flow).
    ///
    /// # Errors
    /// * `NotFound` - no account with this email; the handler folds this
    ///   into the generic invalid-credentials response
    pub async fn get_user_by_email(&self, email: &str) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFound)
    }

    /// Exchange a Google ID token for a local account, creating one on
    /// first sign-in (keyed by email).
    ///
    /// New accounts get the Google display name as username and a hash of
    /// the provider's stable subject id as password.
    pub async fn google_signin(&self, google_token: Option<String>) -> Result<User, UserError> {
        let google_token = match google_token.filter(|t| !t.is_empty()) {
            Some(token) => token,
            None => return Err(UserError::MissingGoogleToken),
        };

        let identity = self.identity_verifier.verify(&google_token).await?;

        if let Some(existing) = self.repository.find_by_email(&identity.email).await? {
            return Ok(existing);
        }

        let password_hash = self
            .password_hasher
            .hash(&identity.subject)
            .map_err(|e| UserError::PasswordHash(e.to_string()))?;

        self.repository
            .create(NewUser {
                username: identity.name.unwrap_or_else(|| "User".to_string()),
                email: identity.email,
                password_hash,
            })
            .await
    }

    /// Fetch the caller's profile.
    pub async fn get_profile(&self, id: i32) -> Result<User, UserError> {
        self.get_user(id).await
    }

    /// Apply a profile update.
    ///
    /// An absent username is a no-op that still succeeds; an empty one is a
    /// validation error.
    pub async fn update_profile(&self, id: i32, username: Option<String>) -> Result<(), UserError> {
        let Some(username) = username else {
            return Ok(());
        };

        let username =
            Username::new(username).map_err(|e| UserError::Validation(vec![e.to_string()]))?;

        self.repository.update_username(id, username.as_str()).await
    }
}
