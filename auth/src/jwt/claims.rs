use serde::Deserialize;
use serde::Serialize;

/// Identity payload embedded in every access token.
///
/// Carries exactly what the service needs to re-identify the caller: the
/// internal user id and the email the account was registered with. There is
/// deliberately no `exp` claim; see [`JwtHandler`](super::JwtHandler).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Internal user identifier (the `users` primary key).
    pub id: i32,
    /// Email address at issuance time.
    pub email: String,
}

impl Claims {
    pub fn new(id: i32, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}
