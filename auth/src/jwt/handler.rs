use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Signs and validates access tokens with a process-wide secret.
///
/// Uses HS256. Tokens issued here carry no `exp` claim, so validation does
/// not require or check one; a token is rejected only when it is malformed,
/// unsigned, or signed with a different secret.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a handler from the signing secret.
    ///
    /// The secret is configuration loaded once at startup; it should be at
    /// least 32 bytes for HS256 and never live in source.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign the claims into a compact token string.
    ///
    /// # Errors
    /// * `EncodingFailed` - serialization or signing failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Validate a token's signature and recover its claims.
    ///
    /// # Errors
    /// * `DecodingFailed` - token is malformed, unsigned, or signed with a
    ///   different secret
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Tokens carry no exp claim
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        decode::<T>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::DecodingFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::Claims;

    #[test]
    fn encode_and_decode() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");

        let claims = Claims::new(7, "bob@example.com");

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert_eq!(token.matches('.').count(), 2);

        let decoded: Claims = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn decode_rejects_non_token_string() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");

        assert!(handler.decode::<Claims>("not a token").is_err());
        assert!(handler.decode::<Claims>("invalid.token.here").is_err());
        assert!(handler.decode::<Claims>("").is_err());
    }

    #[test]
    fn decode_rejects_token_signed_with_different_secret() {
        let issuer = JwtHandler::new(b"secret_one_at_least_32_bytes_long!!");
        let verifier = JwtHandler::new(b"secret_two_at_least_32_bytes_long!!");

        let token = issuer
            .encode(&Claims::new(7, "bob@example.com"))
            .expect("Failed to encode token");

        assert!(verifier.decode::<Claims>(&token).is_err());
    }

    #[test]
    fn decode_rejects_tampered_payload() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");

        let token = handler
            .encode(&Claims::new(7, "bob@example.com"))
            .expect("Failed to encode token");

        // Swap the payload segment for a different one; signature no longer matches
        let mut parts: Vec<&str> = token.split('.').collect();
        let other = handler
            .encode(&Claims::new(8, "mallory@example.com"))
            .expect("Failed to encode token");
        let other_parts: Vec<&str> = other.split('.').collect();
        parts[1] = other_parts[1];
        let forged = parts.join(".");

        assert!(handler.decode::<Claims>(&forged).is_err());
    }
}
