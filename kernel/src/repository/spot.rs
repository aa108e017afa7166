use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::FacilityId,
    spot::{BulkSpotOutcome, Spot},
};

#[async_trait]
pub trait SpotRepository: Send + Sync {
    /// Ensures spot numbers 1..=count exist. Spots already present keep
    /// their occupied flag; re-running never resets state.
    async fn initialize(&self, facility_id: FacilityId, count: i32) -> AppResult<()>;
    /// EntityNotFound when the spot row does not exist.
    async fn set_occupied(
        &self,
        facility_id: FacilityId,
        number: i32,
        occupied: bool,
    ) -> AppResult<()>;
    /// Create-or-update per spot, best effort: one failing item never aborts
    /// the rest of the batch.
    async fn bulk_set(&self, facility_id: FacilityId, states: Vec<Spot>)
        -> AppResult<BulkSpotOutcome>;
    /// Ascending by spot number.
    async fn find_by_facility(&self, facility_id: FacilityId) -> AppResult<Vec<Spot>>;
    async fn count_occupied(&self, facility_id: FacilityId) -> AppResult<i64>;
}
