use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use kernel::model::{
    id::FacilityId,
    reservation::event::{CancelReservation, CreateReservation},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::reservation::{CreateReservationResponse, ReservationStatusResponse},
};

pub async fn reserve_facility(
    user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
) -> AppResult<(StatusCode, Json<CreateReservationResponse>)> {
    // Tier is read from storage at the point of mutation, never from the
    // token, so a promotion takes effect on the next request. An ineligible
    // tier is rejected before anything else is looked at.
    let caller = registry
        .user_repository()
        .find_by_id(user.id())
        .await?
        .ok_or(AppError::ForbiddenOperation)?;
    if !caller.tier.can_reserve() {
        return Err(AppError::ForbiddenOperation);
    }

    registry
        .reservation_repository()
        .create(CreateReservation::new(user.id(), facility_id))
        .await
        .map(|reservation_id| {
            (
                StatusCode::CREATED,
                Json(CreateReservationResponse { reservation_id }),
            )
        })
}

pub async fn cancel_reservation(
    user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .reservation_repository()
        .cancel(CancelReservation::new(user.id(), facility_id, Utc::now()))
        .await
        .map(|_| StatusCode::OK)
}

pub async fn show_reservation_status(
    user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationStatusResponse>> {
    registry
        .reservation_repository()
        .find_active(user.id(), facility_id)
        .await
        .map(|reservation| {
            Json(ReservationStatusResponse {
                active: reservation.is_some(),
            })
        })
}
