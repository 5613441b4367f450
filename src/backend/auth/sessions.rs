/**
 * Session Tokens
 *
 * This module mints and verifies the stateless bearer tokens handed out at
 * registration and login.
 *
 * Tokens are HS256 JWTs signed with the server secret. They carry exactly
 * three claims: the identity id, the issue time and the expiry time. Nothing
 * is stored server-side, so expiry is the only way a token stops working.
 */

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::clock::Clock;
use crate::backend::error::BackendError;

/// Tokens expire 30 days after issuance
pub const TOKEN_LIFETIME_DAYS: i64 = 30;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Identity id
    pub id: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Outcome of checking a presented token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenVerdict {
    /// Signature verified and not yet expired
    Valid(Uuid),
    /// Signature verified but the expiry has passed
    Expired,
    /// Garbage, wrong signature, or claims that do not decode
    Malformed,
}

/// Mints and verifies bearer tokens with a symmetric secret
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
    lifetime: Duration,
}

impl TokenIssuer {
    /// Create an issuer signing with `secret` and reading time from `clock`
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the injected clock in `verify`.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            clock,
            lifetime: Duration::days(TOKEN_LIFETIME_DAYS),
        }
    }

    /// Create a signed token for an identity
    ///
    /// # Arguments
    /// * `identity_id` - Id of the authenticated identity
    ///
    /// # Returns
    /// JWT token string
    pub fn issue(&self, identity_id: Uuid) -> Result<String, BackendError> {
        let now = self.clock.now();
        let claims = Claims {
            id: identity_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verify a token's signature and expiry
    ///
    /// A token is expired from its `exp` second onwards.
    pub fn verify(&self, token: &str) -> TokenVerdict {
        let claims = match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!("Token rejected: {}", e);
                return TokenVerdict::Malformed;
            }
        };

        let Ok(identity_id) = Uuid::parse_str(&claims.id) else {
            return TokenVerdict::Malformed;
        };

        if self.clock.now().timestamp() >= claims.exp {
            return TokenVerdict::Expired;
        }

        TokenVerdict::Valid(identity_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::clock::{FixedClock, SystemClock};
    use chrono::Utc;

    fn issuer_with(clock: &FixedClock) -> TokenIssuer {
        TokenIssuer::new(b"test-secret", Arc::new(clock.clone()))
    }

    fn decode_claims(issuer: &TokenIssuer, token: &str) -> Claims {
        decode::<Claims>(token, &issuer.decoding_key, &issuer.validation)
            .unwrap()
            .claims
    }

    #[test]
    fn test_issued_token_verifies() {
        let issuer = TokenIssuer::new(b"test-secret", Arc::new(SystemClock));
        let identity_id = Uuid::new_v4();
        let token = issuer.issue(identity_id).unwrap();

        assert!(!token.is_empty());
        assert_eq!(issuer.verify(&token), TokenVerdict::Valid(identity_id));
    }

    #[test]
    fn test_token_contains_only_identity_and_times() {
        let clock = FixedClock::new(Utc::now());
        let issuer = issuer_with(&clock);
        let identity_id = Uuid::new_v4();
        let token = issuer.issue(identity_id).unwrap();

        let claims = decode_claims(&issuer, &token);
        assert_eq!(claims.id, identity_id.to_string());
        assert_eq!(claims.exp - claims.iat, TOKEN_LIFETIME_DAYS * 24 * 60 * 60);
    }

    #[test]
    fn test_token_expires_after_thirty_days() {
        let clock = FixedClock::new(Utc::now());
        let issuer = issuer_with(&clock);
        let identity_id = Uuid::new_v4();
        let token = issuer.issue(identity_id).unwrap();

        clock.advance(Duration::days(TOKEN_LIFETIME_DAYS) - Duration::seconds(1));
        assert_eq!(issuer.verify(&token), TokenVerdict::Valid(identity_id));

        clock.advance(Duration::seconds(1));
        assert_eq!(issuer.verify(&token), TokenVerdict::Expired);
    }

    #[test]
    fn test_verify_garbage_token() {
        let issuer = TokenIssuer::new(b"test-secret", Arc::new(SystemClock));
        assert_eq!(issuer.verify("invalid.token.here"), TokenVerdict::Malformed);
        assert_eq!(issuer.verify("garbage"), TokenVerdict::Malformed);
        assert_eq!(issuer.verify(""), TokenVerdict::Malformed);
    }

    #[test]
    fn test_verify_rejects_foreign_signature() {
        let clock = Arc::new(SystemClock);
        let ours = TokenIssuer::new(b"our-secret", clock.clone());
        let theirs = TokenIssuer::new(b"their-secret", clock);

        let token = theirs.issue(Uuid::new_v4()).unwrap();
        assert_eq!(ours.verify(&token), TokenVerdict::Malformed);
    }

    #[test]
    fn test_verify_rejects_non_uuid_subject() {
        let issuer = TokenIssuer::new(b"test-secret", Arc::new(SystemClock));
        let now = Utc::now().timestamp();
        let claims = Claims {
            id: "not-a-uuid".to_string(),
            iat: now,
            exp: now + 60,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(issuer.verify(&token), TokenVerdict::Malformed);
    }
}
