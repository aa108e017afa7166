use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::UserId,
    user::{event::CreateUser, User},
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::user::{UserCredentialRow, UserRow},
    ConnectionPool,
};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let password_hash = bcrypt::hash(&event.password, bcrypt::DEFAULT_COST)?;

        let row: UserRow = sqlx::query_as(
            r#"
                INSERT INTO users (email, password_hash)
                VALUES ($1, $2)
                RETURNING id, email, tier
            "#,
        )
        .bind(&event.email)
        .bind(&password_hash)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::EmailAlreadyRegistered
            }
            e => AppError::SpecificOperationError(e),
        })?;

        row.try_into()
    }

    async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<User> {
        let row: Option<UserCredentialRow> = sqlx::query_as(
            r#"
                SELECT id, email, tier, password_hash
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Err(AppError::InvalidCredentials);
        };
        if !bcrypt::verify(password, &row.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        row.try_into()
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
                SELECT id, email, tier
                FROM users
                WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(TryInto::try_into).transpose()
    }
}
