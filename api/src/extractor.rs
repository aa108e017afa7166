use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use kernel::model::id::UserId;
use registry::AppRegistry;
use shared::{auth::AuthError, error::AppError};

/// The verified caller of a protected operation. Verification is purely
/// token-based and never consults persistence; tier and ownership are read
/// from storage at the point of each mutation instead.
#[derive(Debug, Clone, Copy)]
pub struct AuthorizedUser {
    user_id: UserId,
}

impl AuthorizedUser {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn id(&self) -> UserId {
        self.user_id
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingCredential)?
            .to_str()
            .map_err(|_| AuthError::InvalidScheme)?;
        let token = bearer_token(header)?;
        let user_id = registry.token_codec().verify(token)?;
        Ok(Self::new(UserId::new(user_id)))
    }
}

// Scheme matching is case-insensitive, like the header convention.
fn bearer_token(header: &str) -> Result<&str, AuthError> {
    let (scheme, token) = header
        .trim_start()
        .split_once(' ')
        .ok_or(AuthError::InvalidScheme)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidScheme);
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingCredential);
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        assert_eq!(bearer_token("Bearer abc"), Ok("abc"));
        assert_eq!(bearer_token("bearer abc"), Ok("abc"));
        assert_eq!(bearer_token("BEARER abc "), Ok("abc"));
    }

    #[test]
    fn non_bearer_schemes_are_rejected() {
        assert_eq!(bearer_token("Basic abc"), Err(AuthError::InvalidScheme));
        assert_eq!(bearer_token("abc"), Err(AuthError::InvalidScheme));
    }

    #[test]
    fn blank_token_is_missing_not_malformed() {
        assert_eq!(bearer_token("Bearer  "), Err(AuthError::MissingCredential));
    }
}
