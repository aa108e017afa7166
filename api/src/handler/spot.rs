use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::id::{FacilityId, UserId};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::spot::{
        BulkSetSpotsRequest, InitializeSpotsRequest, SetSpotStatusRequest, SpotsResponse,
    },
};

// Every spot mutation is gated here, at the point of the write. A uniform
// Forbidden does not reveal whether the facility exists.
async fn ensure_owner(
    registry: &AppRegistry,
    facility_id: FacilityId,
    user_id: UserId,
) -> AppResult<()> {
    if registry
        .facility_repository()
        .is_owner(facility_id, user_id)
        .await
    {
        Ok(())
    } else {
        Err(AppError::ForbiddenOperation)
    }
}

pub async fn initialize_spots(
    user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<InitializeSpotsRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;
    ensure_owner(&registry, facility_id, user.id()).await?;

    registry
        .spot_repository()
        .initialize(facility_id, req.count)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn set_spot_status(
    user: AuthorizedUser,
    Path((facility_id, spot_number)): Path<(FacilityId, i32)>,
    State(registry): State<AppRegistry>,
    Json(req): Json<SetSpotStatusRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;
    ensure_owner(&registry, facility_id, user.id()).await?;

    registry
        .spot_repository()
        .set_occupied(facility_id, spot_number, req.occupied)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn bulk_set_spots(
    user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<BulkSetSpotsRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;
    ensure_owner(&registry, facility_id, user.id()).await?;

    let states = req.spots.into_iter().map(Into::into).collect();
    let outcome = registry
        .spot_repository()
        .bulk_set(facility_id, states)
        .await?;

    // Best effort by design: per-item failures are logged, the batch still
    // reports success.
    for failure in &outcome.failed {
        tracing::warn!(
            %facility_id,
            number = failure.number,
            reason = %failure.reason,
            "skipped a spot write"
        );
    }

    Ok(StatusCode::OK)
}

pub async fn show_spots(
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SpotsResponse>> {
    registry
        .spot_repository()
        .find_by_facility(facility_id)
        .await
        .map(SpotsResponse::from)
        .map(Json)
}
