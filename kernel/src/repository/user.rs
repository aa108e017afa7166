use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::UserId,
    user::{event::CreateUser, User},
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, event: CreateUser) -> AppResult<User>;
    // Returns InvalidCredentials for an unknown email as well as a wrong
    // password, so the response does not reveal which one failed.
    async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<User>;
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>>;
}
