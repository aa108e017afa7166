use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    facility::{event::CreateFacility, Facility, FacilitySummary, FacilityWithAvailability},
    id::{FacilityId, UserId},
};

#[async_trait]
pub trait FacilityRepository: Send + Sync {
    async fn create(&self, event: CreateFacility) -> AppResult<FacilityId>;
    async fn find_owned_by(&self, user_id: UserId) -> AppResult<Vec<FacilitySummary>>;
    async fn find_by_id(&self, facility_id: FacilityId) -> AppResult<Option<Facility>>;
    async fn find_all_with_availability(&self) -> AppResult<Vec<FacilityWithAvailability>>;
    /// Ownership guard. Must fail closed: a storage error reads as
    /// "not owner", the same as a missing facility.
    async fn is_owner(&self, facility_id: FacilityId, user_id: UserId) -> bool;
}
