use axum::http::StatusCode;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::AuthConfig;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("authorization credential is missing")]
    MissingCredential,
    #[error("authorization scheme must be Bearer")]
    InvalidScheme,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token signing algorithm is not supported")]
    UnsupportedAlgorithm,
    #[error("token is expired")]
    Expired,
    #[error("token claims could not be parsed")]
    ClaimsUnparseable,
    #[error("token does not carry a resolvable subject")]
    MissingSubject,
    #[error("token could not be signed")]
    Signing,
    #[error("token signing secret is not configured")]
    MissingSecret,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // A missing or broken secret is our misconfiguration, not the
            // caller's credential problem.
            AuthError::MissingSecret | AuthError::Signing => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

#[derive(Debug, Serialize)]
struct IssuedClaims {
    user_id: i64,
    email: String,
    exp: i64,
}

/// The raw claim set of a verified token. Subject claims stay untyped until
/// [`resolve_subject`] runs, because callers send both numeric and
/// string-encoded identifiers under either claim name.
#[derive(Debug, Deserialize)]
pub struct Claims {
    #[serde(default)]
    user_id: Option<Value>,
    #[serde(default)]
    sub: Option<Value>,
    exp: i64,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Subject {
    Resolved(i64),
    Missing,
    Malformed,
}

/// Resolves the subject identifier with an explicit fallback order:
/// `user_id` first, then `sub`. A claim that is present but unparseable does
/// not shadow a usable fallback. Zero is never a valid identifier.
pub fn resolve_subject(claims: &Claims) -> Subject {
    let mut seen = false;
    for value in [&claims.user_id, &claims.sub].into_iter().flatten() {
        seen = true;
        if let Some(id) = numeric_id(value) {
            if id != 0 {
                return Subject::Resolved(id);
            }
        }
    }
    if seen {
        Subject::Malformed
    } else {
        Subject::Missing
    }
}

fn numeric_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Issues and verifies the HS256 bearer tokens this service hands out at
/// login. Holds no per-user state; the signing secret is process-wide
/// configuration.
#[derive(Clone)]
pub struct TokenCodec {
    secret: Option<String>,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(cfg: &AuthConfig) -> Self {
        Self {
            secret: cfg.jwt_secret.clone(),
            ttl: Duration::hours(cfg.token_ttl_hours),
        }
    }

    fn secret(&self) -> Result<&str, AuthError> {
        self.secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(AuthError::MissingSecret)
    }

    pub fn issue(&self, user_id: i64, email: &str) -> Result<String, AuthError> {
        let secret = self.secret()?;
        let claims = IssuedClaims {
            user_id,
            email: email.to_owned(),
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|_| AuthError::Signing)
    }

    pub fn verify(&self, token: &str) -> Result<i64, AuthError> {
        let secret = self.secret()?;
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                AuthError::UnsupportedAlgorithm
            }
            _ => AuthError::ClaimsUnparseable,
        })?;

        // The library already validated `exp`, with leeway. Check it again
        // against the wall clock, without leeway.
        if data.claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::Expired);
        }

        match resolve_subject(&data.claims) {
            Subject::Resolved(id) => Ok(id),
            Subject::Missing | Subject::Malformed => Err(AuthError::MissingSubject),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn codec(secret: &str, ttl_hours: i64) -> TokenCodec {
        TokenCodec::new(&AuthConfig {
            jwt_secret: Some(secret.into()),
            token_ttl_hours: ttl_hours,
        })
    }

    fn sign(secret: &str, claims: &Value) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn future_exp() -> i64 {
        (Utc::now() + Duration::hours(1)).timestamp()
    }

    #[test]
    fn issued_token_round_trips() {
        let codec = codec("test-secret", 24);
        let token = codec.issue(42, "a@example.com").unwrap();
        assert_eq!(codec.verify(&token), Ok(42));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = codec("other-secret", 24).issue(42, "a@example.com").unwrap();
        assert_eq!(
            codec("test-secret", 24).verify(&token),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = codec("test-secret", -2).issue(42, "a@example.com").unwrap();
        assert_eq!(
            codec("test-secret", 24).verify(&token),
            Err(AuthError::Expired)
        );
    }

    #[test]
    fn unsupported_algorithm_is_rejected() {
        let token = encode(
            &Header::new(Algorithm::HS384),
            &json!({ "user_id": 42, "exp": future_exp() }),
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert_eq!(
            codec("test-secret", 24).verify(&token),
            Err(AuthError::UnsupportedAlgorithm)
        );
    }

    #[test]
    fn missing_secret_fails_both_directions() {
        let codec = TokenCodec::new(&AuthConfig {
            jwt_secret: None,
            token_ttl_hours: 24,
        });
        assert_eq!(codec.issue(42, "a@example.com"), Err(AuthError::MissingSecret));
        assert_eq!(codec.verify("whatever"), Err(AuthError::MissingSecret));
    }

    #[test]
    fn garbage_token_is_unparseable() {
        assert_eq!(
            codec("test-secret", 24).verify("not-a-token"),
            Err(AuthError::ClaimsUnparseable)
        );
    }

    #[test]
    fn subject_falls_back_from_user_id_to_sub() {
        let token = sign(
            "test-secret",
            &json!({ "sub": "7", "exp": future_exp() }),
        );
        assert_eq!(codec("test-secret", 24).verify(&token), Ok(7));
    }

    #[test]
    fn string_encoded_user_id_is_accepted() {
        let token = sign(
            "test-secret",
            &json!({ "user_id": "123", "exp": future_exp() }),
        );
        assert_eq!(codec("test-secret", 24).verify(&token), Ok(123));
    }

    #[test]
    fn zero_subject_counts_as_missing() {
        let token = sign(
            "test-secret",
            &json!({ "user_id": 0, "exp": future_exp() }),
        );
        assert_eq!(
            codec("test-secret", 24).verify(&token),
            Err(AuthError::MissingSubject)
        );
    }

    #[test]
    fn token_without_any_subject_claim_is_rejected() {
        let token = sign("test-secret", &json!({ "exp": future_exp() }));
        assert_eq!(
            codec("test-secret", 24).verify(&token),
            Err(AuthError::MissingSubject)
        );
    }

    #[test]
    fn unparseable_user_id_still_tries_sub() {
        let claims: Claims = serde_json::from_value(json!({
            "user_id": "not-a-number",
            "sub": 9,
            "exp": 0,
        }))
        .unwrap();
        assert_eq!(resolve_subject(&claims), Subject::Resolved(9));
    }

    #[test]
    fn subject_resolution_tags_missing_and_malformed() {
        let missing: Claims = serde_json::from_value(json!({ "exp": 0 })).unwrap();
        assert_eq!(resolve_subject(&missing), Subject::Missing);

        let malformed: Claims =
            serde_json::from_value(json!({ "user_id": [1], "exp": 0 })).unwrap();
        assert_eq!(resolve_subject(&malformed), Subject::Malformed);
    }
}
