use garde::Validate;
use kernel::model::{
    id::UserId,
    tier::Tier,
    user::{event::CreateUser, User},
};
use serde::{Deserialize, Serialize};
use strum::VariantNames;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 8))]
    pub password: String,
}

impl From<RegisterUserRequest> for CreateUser {
    fn from(value: RegisterUserRequest) -> Self {
        let RegisterUserRequest { email, password } = value;
        CreateUser { email, password }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUserResponse {
    pub id: UserId,
    pub email: String,
}

impl From<User> for RegisteredUserResponse {
    fn from(value: User) -> Self {
        let User { id, email, .. } = value;
        Self { id, email }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[garde(length(min = 1))]
    pub email: String,
    #[garde(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, VariantNames)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TierName {
    Standard,
    Privileged,
}

impl From<Tier> for TierName {
    fn from(value: Tier) -> Self {
        match value {
            Tier::Standard => Self::Standard,
            Tier::Privileged => Self::Privileged,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user_id: UserId,
    pub tier: TierName,
}
