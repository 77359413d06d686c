use async_trait::async_trait;
use serde::Deserialize;

use crate::user::errors::UserError;
use crate::user::models::GoogleIdentity;
use crate::user::ports::IdentityVerifier;

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Verifies Google ID tokens via the tokeninfo endpoint and checks the
/// audience against this deployment's OAuth client id.
pub struct GoogleTokenVerifier {
    http: reqwest::Client,
    client_id: String,
}

impl GoogleTokenVerifier {
    pub fn new(http: reqwest::Client, client_id: String) -> Self {
        Self { http, client_id }
    }
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    sub: String,
    email: String,
    name: Option<String>,
}

#[async_trait]
impl IdentityVerifier for GoogleTokenVerifier {
    async fn verify(&self, id_token: &str) -> Result<GoogleIdentity, UserError> {
        let response = self
            .http
            .get(TOKENINFO_URL)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| UserError::IdentityVerification(e.to_string()))?;

        if !response.status().is_success() {
            return Err(UserError::IdentityVerification(format!(
                "token rejected with status {}",
                response.status()
            )));
        }

        let info: TokenInfo = response
            .json()
            .await
            .map_err(|e| UserError::IdentityVerification(e.to_string()))?;

        if info.aud != self.client_id {
            return Err(UserError::IdentityVerification(
                "token audience does not match the configured client id".to_string(),
            ));
        }

        Ok(GoogleIdentity {
            subject: info.sub,
            email: info.email,
            name: info.name,
        })
    }
}
