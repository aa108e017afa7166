use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::{FacilityId, ReservationId, UserId},
    reservation::{
        event::{CancelReservation, CreateReservation},
        Reservation,
    },
};

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Inserts an active reservation. ReservationConflict when the pair
    /// already has one; EntityNotFound when the facility does not exist.
    /// The single-active invariant must hold under concurrent calls.
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId>;
    /// Transitions the pair's active reservation to canceled, stamping the
    /// cancellation time. EntityNotFound when none is active.
    async fn cancel(&self, event: CancelReservation) -> AppResult<()>;
    async fn find_active(
        &self,
        user_id: UserId,
        facility_id: FacilityId,
    ) -> AppResult<Option<Reservation>>;
}
