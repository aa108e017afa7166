use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::{geo, model::id::FacilityId, model::spot::SpotSummary};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::facility::{
        AvailabilityResponse, CreateFacilityRequest, CreateFacilityRequestWithOwner,
        CreateFacilityResponse, FacilitiesResponse, FacilityDetailResponse,
        FacilityWithAvailabilityResponse, MyFacilitiesResponse, NearbyFacilitiesResponse,
        NearbyFacilityResponse, NearbyQuery,
    },
};

pub async fn register_facility(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateFacilityRequest>,
) -> AppResult<(StatusCode, Json<CreateFacilityResponse>)> {
    req.validate(&())?;

    let event = CreateFacilityRequestWithOwner::new(user.id(), req).into();
    registry
        .facility_repository()
        .create(event)
        .await
        .map(|id| (StatusCode::CREATED, Json(CreateFacilityResponse { id })))
}

pub async fn show_my_facilities(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MyFacilitiesResponse>> {
    registry
        .facility_repository()
        .find_owned_by(user.id())
        .await
        .map(MyFacilitiesResponse::from)
        .map(Json)
}

pub async fn show_facility_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<FacilitiesResponse>> {
    registry
        .facility_repository()
        .find_all_with_availability()
        .await
        .map(|facilities| {
            Json(FacilitiesResponse {
                items: facilities
                    .into_iter()
                    .map(FacilityWithAvailabilityResponse::from)
                    .collect(),
            })
        })
}

pub async fn show_nearby_facilities(
    Query(query): Query<NearbyQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<NearbyFacilitiesResponse>> {
    query.validate(&())?;

    let facilities = registry
        .facility_repository()
        .find_all_with_availability()
        .await?;

    let mut items: Vec<NearbyFacilityResponse> = facilities
        .into_iter()
        .filter_map(|facility| {
            let distance_km = geo::distance_km(
                query.lat,
                query.lng,
                facility.summary.latitude,
                facility.summary.longitude,
            );
            (distance_km <= query.radius_km).then(|| (facility, distance_km).into())
        })
        .collect();
    items.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    Ok(Json(NearbyFacilitiesResponse { items }))
}

pub async fn show_facility(
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<FacilityDetailResponse>> {
    let facility = registry
        .facility_repository()
        .find_by_id(facility_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("facility not found".into()))?;

    let occupied = registry.spot_repository().count_occupied(facility_id).await?;
    let availability = SpotSummary::from_counts(facility.capacity, occupied);

    Ok(Json((facility, availability).into()))
}

pub async fn show_facility_availability(
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AvailabilityResponse>> {
    let facility = registry
        .facility_repository()
        .find_by_id(facility_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("facility not found".into()))?;

    let occupied = registry.spot_repository().count_occupied(facility_id).await?;

    Ok(Json(
        SpotSummary::from_counts(facility.capacity, occupied).into(),
    ))
}
