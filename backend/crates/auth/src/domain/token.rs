//! Stateless HS256 token codec.
//!
//! Access and refresh tokens share one claim shape and one signing
//! key; the `type` claim is what keeps them from being swapped for
//! each other.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id, rendered as a string.
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(rename = "type")]
    pub kind: TokenKind,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,
    #[error("Token is invalid")]
    Invalid,
}

#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // A token expired by one second is expired.
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn issue(
        &self,
        user_id: i64,
        email: &str,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            kind,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::Invalid)
    }

    /// Decodes and verifies signature plus expiry. Any failure other
    /// than a clean expiry collapses to `Invalid`.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new(b"test-secret-not-for-production")
    }

    #[test]
    fn issued_claims_round_trip() {
        let codec = codec();
        let token = codec
            .issue(42, "alice@example.com", TokenKind::Access, Duration::minutes(60))
            .unwrap();
        let claims = codec.decode(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.kind, TokenKind::Access);
        assert!(claims.exp - claims.iat == 3600);
    }

    #[test]
    fn refresh_kind_survives_the_wire() {
        let codec = codec();
        let token = codec
            .issue(7, "bob@example.com", TokenKind::Refresh, Duration::days(30))
            .unwrap();
        assert_eq!(codec.decode(&token).unwrap().kind, TokenKind::Refresh);
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let codec = codec();
        let token = codec
            .issue(1, "a@b.com", TokenKind::Access, Duration::seconds(-5))
            .unwrap();
        assert_eq!(codec.decode(&token), Err(TokenError::Expired));
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = codec()
            .issue(1, "a@b.com", TokenKind::Access, Duration::minutes(5))
            .unwrap();
        let other = TokenCodec::new(b"a-completely-different-secret");
        assert_eq!(other.decode(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn garbage_is_invalid() {
        assert_eq!(codec().decode("not.a.token"), Err(TokenError::Invalid));
        assert_eq!(codec().decode(""), Err(TokenError::Invalid));
    }
}
