use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use thiserror::Error;

use crate::claims::{validate_claims, JwtClaims, TokenValidationError};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("malformed or badly signed token")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// Token verification boundary consumed by the HTTP middleware.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, AuthError>;
}

/// HS256 validator over a shared secret.
pub struct Hs256JwtValidator {
    key: DecodingKey,
}

impl Hs256JwtValidator {
    pub fn new(secret: Vec<u8>) -> Self {
        Self {
            key: DecodingKey::from_secret(&secret),
        }
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, AuthError> {
        // The time window lives in our own claims (`issued_at`/`expires_at`
        // as RFC 3339), not in the registered `exp`/`iat` fields, so the
        // library's timestamp checks are turned off and `validate_claims`
        // does the window check instead.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.key, &validation)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header};
    use tonecart_core::UserId;

    use crate::roles::Role;

    fn mint(secret: &str, claims: &JwtClaims) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims_valid_for(minutes: i64) -> JwtClaims {
        let now = Utc::now();
        JwtClaims {
            sub: UserId::new(),
            roles: vec![Role::new(Role::ADMIN)],
            issued_at: now - Duration::minutes(1),
            expires_at: now + Duration::minutes(minutes),
        }
    }

    #[test]
    fn validates_a_well_formed_token() {
        let validator = Hs256JwtValidator::new(b"test-secret".to_vec());
        let claims = claims_valid_for(10);
        let token = mint("test-secret", &claims);

        let decoded = validator.validate(&token, Utc::now()).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn rejects_wrong_secret() {
        let validator = Hs256JwtValidator::new(b"test-secret".to_vec());
        let token = mint("other-secret", &claims_valid_for(10));
        assert!(matches!(
            validator.validate(&token, Utc::now()),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn rejects_expired_claims() {
        let validator = Hs256JwtValidator::new(b"test-secret".to_vec());
        let now = Utc::now();
        let expired = JwtClaims {
            sub: UserId::new(),
            roles: vec![],
            issued_at: now - Duration::minutes(20),
            expires_at: now - Duration::minutes(10),
        };
        let token = mint("test-secret", &expired);
        assert!(matches!(
            validator.validate(&token, Utc::now()),
            Err(AuthError::Claims(TokenValidationError::Expired))
        ));
    }
}
