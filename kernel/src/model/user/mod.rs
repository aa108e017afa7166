use crate::model::{id::UserId, tier::Tier};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub tier: Tier,
}
