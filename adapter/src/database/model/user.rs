use kernel::model::{id::UserId, tier::Tier, user::User};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub id: UserId,
    pub email: String,
    pub tier: String,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let UserRow { id, email, tier } = value;
        let tier = tier
            .parse::<Tier>()
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        Ok(User { id, email, tier })
    }
}

// Only the login path reads the stored hash; it never leaves the adapter.
#[derive(sqlx::FromRow)]
pub struct UserCredentialRow {
    pub id: UserId,
    pub email: String,
    pub tier: String,
    pub password_hash: String,
}

impl TryFrom<UserCredentialRow> for User {
    type Error = AppError;

    fn try_from(value: UserCredentialRow) -> Result<Self, Self::Error> {
        let UserCredentialRow {
            id, email, tier, ..
        } = value;
        let tier = tier
            .parse::<Tier>()
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        Ok(User { id, email, tier })
    }
}
