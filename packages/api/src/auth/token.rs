//! Stateless bearer tokens: HS256 JWTs whose subject is the user id.

use chrono::{DateTime, Duration, TimeZone, Utc};
use hmac::{Hmac, Mac};
use jwt::{Claims, Header, RegisteredClaims, SignWithKey, Token, VerifyWithKey};
use sha2::Sha256;
use uuid::Uuid;

use crate::error::AuthError;

/// Signs and verifies tokens with a shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    key: Hmac<Sha256>,
    issuer: String,
    lifetime: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(
        secret: &str,
        issuer: impl Into<String>,
        lifetime: Duration,
    ) -> Result<Self, hmac::digest::InvalidLength> {
        Ok(Self {
            key: Hmac::<Sha256>::new_from_slice(secret.as_bytes())?,
            issuer: issuer.into(),
            lifetime,
        })
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, jwt::Error> {
        self.issue_at(user_id, Utc::now())
    }

    pub fn issue_at(&self, user_id: Uuid, issued_at: DateTime<Utc>) -> Result<String, jwt::Error> {
        let expiration = issued_at + self.lifetime;
        let claims = Claims::new(RegisteredClaims {
            issuer: Some(self.issuer.clone()),
            subject: Some(user_id.to_string()),
            issued_at: Some(issued_at.timestamp() as u64),
            expiration: Some(expiration.timestamp() as u64),
            ..Default::default()
        });
        claims.sign_with_key(&self.key)
    }

    /// Resolve a token to the user id it was issued for.
    pub fn verify(&self, token: &str) -> Result<Uuid, AuthError> {
        self.decode(token).ok_or(AuthError::InvalidToken)
    }

    fn decode(&self, token: &str) -> Option<Uuid> {
        let token: Token<Header, Claims, _> = token.verify_with_key(&self.key).ok()?;
        let claims = &token.claims().registered;
        let now = Utc::now();

        if claims.issuer.as_deref()? != self.issuer {
            return None;
        }

        let iat = Utc.timestamp_opt(claims.issued_at? as i64, 0).single()?;
        if iat > now {
            return None;
        }

        let exp = Utc.timestamp_opt(claims.expiration? as i64, 0).single()?;
        if exp < now {
            return None;
        }

        claims.subject.as_deref()?.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret", "stickies", Duration::days(7)).unwrap()
    }

    #[test]
    fn test_roundtrip() {
        let tokens = issuer();
        let id = Uuid::new_v4();
        let token = tokens.issue(id).unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), id);
    }

    #[test]
    fn test_rejects_other_secret() {
        let token = issuer().issue(Uuid::new_v4()).unwrap();
        let other = TokenIssuer::new("other-secret", "stickies", Duration::days(7)).unwrap();
        assert!(matches!(other.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_rejects_other_issuer() {
        let token = TokenIssuer::new("test-secret", "someone-else", Duration::days(7))
            .unwrap()
            .issue(Uuid::new_v4())
            .unwrap();
        assert!(issuer().verify(&token).is_err());
    }

    #[test]
    fn test_rejects_expired() {
        let tokens = issuer();
        let token = tokens
            .issue_at(Uuid::new_v4(), Utc::now() - Duration::days(8))
            .unwrap();
        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn test_rejects_future_issue_time() {
        let tokens = issuer();
        let token = tokens
            .issue_at(Uuid::new_v4(), Utc::now() + Duration::hours(1))
            .unwrap();
        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(issuer().verify("not.a.jwt").is_err());
        assert!(issuer().verify("").is_err());
    }
}
