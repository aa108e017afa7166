use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
};
use garde::Validate;
use kernel::model::{
    id::{FacilityId, UserId},
    user::{event::CreateUser, User},
};
use kernel::repository::user::UserRepository;
use shared::error::AppError;

use crate::{
    extractor::AuthorizedUser,
    handler::{
        auth::{login, register_user},
        facility::{
            register_facility, show_facility, show_facility_availability, show_my_facilities,
            show_nearby_facilities,
        },
        reservation::{cancel_reservation, reserve_facility, show_reservation_status},
        spot::{bulk_set_spots, initialize_spots, set_spot_status, show_spots},
    },
    model::{
        auth::{LoginRequest, RegisterUserRequest, TierName},
        facility::{
            CoveredName, CreateFacilityRequest, NearbyQuery, OpeningWindowDto,
        },
        spot::{BulkSetSpotsRequest, InitializeSpotsRequest, SetSpotStatusRequest, SpotStateDto},
    },
    testing::{test_app, TestApp},
};

async fn register(app: &TestApp, email: &str) -> User {
    app.users
        .create(CreateUser {
            email: email.into(),
            password: "password123".into(),
        })
        .await
        .unwrap()
}

fn facility_request(capacity: i32, latitude: f64, longitude: f64) -> CreateFacilityRequest {
    CreateFacilityRequest {
        name: "Central Garage".into(),
        capacity,
        latitude,
        longitude,
        price_per_hour: Some(3.5),
        covered: Some(CoveredName::Covered),
        amenities: vec!["cameras".into()],
        restroom: None,
        max_height_m: Some(2.1),
        opening_windows: Vec::new(),
    }
}

async fn create_facility(
    app: &TestApp,
    owner: UserId,
    capacity: i32,
    latitude: f64,
    longitude: f64,
) -> FacilityId {
    let (_, Json(created)) = register_facility(
        AuthorizedUser::new(owner),
        State(app.registry.clone()),
        Json(facility_request(capacity, latitude, longitude)),
    )
    .await
    .unwrap();
    created.id
}

#[tokio::test]
async fn register_then_login_issues_a_verifiable_token() {
    let app = test_app();

    let (status, Json(registered)) = register_user(
        State(app.registry.clone()),
        Json(RegisterUserRequest {
            email: "owner@example.com".into(),
            password: "password123".into(),
        }),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(registered.email, "owner@example.com");

    let err = register_user(
        State(app.registry.clone()),
        Json(RegisterUserRequest {
            email: "owner@example.com".into(),
            password: "password123".into(),
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::EmailAlreadyRegistered));

    let Json(session) = login(
        State(app.registry.clone()),
        Json(LoginRequest {
            email: "owner@example.com".into(),
            password: "password123".into(),
        }),
    )
    .await
    .unwrap();
    assert_eq!(session.user_id, registered.id);
    assert_eq!(session.tier, TierName::Standard);

    let verified = app
        .registry
        .token_codec()
        .verify(&session.access_token)
        .unwrap();
    assert_eq!(verified, registered.id.raw());

    let err = login(
        State(app.registry.clone()),
        Json(LoginRequest {
            email: "owner@example.com".into(),
            password: "wrong-password".into(),
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));
}

#[tokio::test]
async fn ownership_guard_rejects_non_owners_uniformly() {
    let app = test_app();
    let owner = register(&app, "owner@example.com").await;
    let other = register(&app, "other@example.com").await;
    let facility_id = create_facility(&app, owner.id, 3, 10.0, 10.0).await;

    let err = initialize_spots(
        AuthorizedUser::new(other.id),
        Path(facility_id),
        State(app.registry.clone()),
        Json(InitializeSpotsRequest { count: 3 }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::ForbiddenOperation));

    // A facility that does not exist reads the same as one owned by someone
    // else.
    let err = initialize_spots(
        AuthorizedUser::new(owner.id),
        Path(FacilityId::new(999)),
        State(app.registry.clone()),
        Json(InitializeSpotsRequest { count: 3 }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::ForbiddenOperation));

    let status = initialize_spots(
        AuthorizedUser::new(owner.id),
        Path(facility_id),
        State(app.registry.clone()),
        Json(InitializeSpotsRequest { count: 3 }),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn reinitialization_does_not_reset_occupancy() {
    let app = test_app();
    let owner = register(&app, "owner@example.com").await;
    let facility_id = create_facility(&app, owner.id, 3, 10.0, 10.0).await;
    let caller = AuthorizedUser::new(owner.id);

    initialize_spots(
        caller,
        Path(facility_id),
        State(app.registry.clone()),
        Json(InitializeSpotsRequest { count: 3 }),
    )
    .await
    .unwrap();
    set_spot_status(
        caller,
        Path((facility_id, 2)),
        State(app.registry.clone()),
        Json(SetSpotStatusRequest { occupied: true }),
    )
    .await
    .unwrap();

    initialize_spots(
        caller,
        Path(facility_id),
        State(app.registry.clone()),
        Json(InitializeSpotsRequest { count: 3 }),
    )
    .await
    .unwrap();

    let Json(spots) = show_spots(Path(facility_id), State(app.registry.clone()))
        .await
        .unwrap();
    let states: Vec<(i32, bool)> = spots.items.iter().map(|s| (s.number, s.occupied)).collect();
    assert_eq!(states, vec![(1, false), (2, true), (3, false)]);
}

#[tokio::test]
async fn setting_an_unknown_spot_is_not_found() {
    let app = test_app();
    let owner = register(&app, "owner@example.com").await;
    let facility_id = create_facility(&app, owner.id, 3, 10.0, 10.0).await;

    let err = set_spot_status(
        AuthorizedUser::new(owner.id),
        Path((facility_id, 7)),
        State(app.registry.clone()),
        Json(SetSpotStatusRequest { occupied: true }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::EntityNotFound(_)));
}

#[tokio::test]
async fn bulk_writes_create_and_update_spots() {
    let app = test_app();
    let owner = register(&app, "owner@example.com").await;
    let facility_id = create_facility(&app, owner.id, 3, 10.0, 10.0).await;
    let caller = AuthorizedUser::new(owner.id);

    let status = bulk_set_spots(
        caller,
        Path(facility_id),
        State(app.registry.clone()),
        Json(BulkSetSpotsRequest {
            spots: vec![
                SpotStateDto {
                    number: 2,
                    occupied: true,
                },
                SpotStateDto {
                    number: 1,
                    occupied: false,
                },
                SpotStateDto {
                    number: 3,
                    occupied: true,
                },
            ],
        }),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::OK);

    let Json(spots) = show_spots(Path(facility_id), State(app.registry.clone()))
        .await
        .unwrap();
    let states: Vec<(i32, bool)> = spots.items.iter().map(|s| (s.number, s.occupied)).collect();
    assert_eq!(states, vec![(1, false), (2, true), (3, true)]);
}

#[tokio::test]
async fn detail_derives_availability_schedule_and_amenities() {
    let app = test_app();
    let owner = register(&app, "owner@example.com").await;
    let caller = AuthorizedUser::new(owner.id);

    let mut request = facility_request(3, 10.0, 10.0);
    request.amenities = vec!["cameras".into(), "valet".into(), "guard".into()];
    request.opening_windows = vec![
        OpeningWindowDto {
            day: "wed".into(),
            opens: "00:00".into(),
            closes: "23:59".into(),
        },
        OpeningWindowDto {
            day: "mon".into(),
            opens: "00:00".into(),
            closes: "23:59".into(),
        },
    ];
    let (_, Json(created)) = register_facility(
        caller,
        State(app.registry.clone()),
        Json(request),
    )
    .await
    .unwrap();
    let facility_id = created.id;

    initialize_spots(
        caller,
        Path(facility_id),
        State(app.registry.clone()),
        Json(InitializeSpotsRequest { count: 3 }),
    )
    .await
    .unwrap();
    set_spot_status(
        caller,
        Path((facility_id, 2)),
        State(app.registry.clone()),
        Json(SetSpotStatusRequest { occupied: true }),
    )
    .await
    .unwrap();

    let Json(detail) = show_facility(Path(facility_id), State(app.registry.clone()))
        .await
        .unwrap();
    assert_eq!((detail.total, detail.occupied, detail.free), (3, 1, 2));
    assert_eq!(detail.amenities, vec!["cameras", "guard"]);
    assert_eq!(detail.covered, Some(CoveredName::Covered));
    assert_eq!(detail.all_hours, Some(true));
    let days: Vec<_> = detail
        .opening_windows
        .iter()
        .map(|w| w.day.as_str())
        .collect();
    assert_eq!(days, vec!["mon", "wed"]);

    let Json(availability) =
        show_facility_availability(Path(facility_id), State(app.registry.clone()))
            .await
            .unwrap();
    assert_eq!(
        (availability.total, availability.occupied, availability.free),
        (3, 1, 2)
    );
}

#[tokio::test]
async fn missing_facility_detail_is_not_found() {
    let app = test_app();

    let err = show_facility(Path(FacilityId::new(42)), State(app.registry.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EntityNotFound(_)));

    let err = show_facility_availability(Path(FacilityId::new(42)), State(app.registry.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EntityNotFound(_)));
}

#[tokio::test]
async fn my_facilities_lists_only_the_callers() {
    let app = test_app();
    let owner = register(&app, "owner@example.com").await;
    let other = register(&app, "other@example.com").await;
    let mine = create_facility(&app, owner.id, 3, 10.0, 10.0).await;
    create_facility(&app, other.id, 5, 20.0, 20.0).await;

    let Json(listed) = show_my_facilities(
        AuthorizedUser::new(owner.id),
        State(app.registry.clone()),
    )
    .await
    .unwrap();
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].id, mine);
}

#[tokio::test]
async fn nearby_filters_by_radius_and_sorts_by_distance() {
    let app = test_app();
    let owner = register(&app, "owner@example.com").await;
    // At the query point, ~0.55 km north of it, and ~111 km away.
    let at_origin = create_facility(&app, owner.id, 3, 10.0, 10.0).await;
    let close_by = create_facility(&app, owner.id, 3, 10.005, 10.0).await;
    create_facility(&app, owner.id, 3, 11.0, 10.0).await;

    let query = NearbyQuery {
        lat: 10.0,
        lng: 10.0,
        radius_km: 1.0,
    };
    let Json(nearby) = show_nearby_facilities(Query(query), State(app.registry.clone()))
        .await
        .unwrap();

    let ids: Vec<_> = nearby.items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![at_origin, close_by]);
    // The coincident facility is at distance zero, not NaN.
    assert_eq!(nearby.items[0].distance_km, 0.0);
    assert!(nearby.items[1].distance_km > 0.0);
}

#[tokio::test]
async fn nearby_rejects_out_of_range_coordinates() {
    let query = NearbyQuery {
        lat: 123.0,
        lng: 10.0,
        radius_km: 1.0,
    };
    assert!(query.validate(&()).is_err());

    let query = NearbyQuery {
        lat: 10.0,
        lng: 10.0,
        radius_km: -1.0,
    };
    assert!(query.validate(&()).is_err());
}

#[tokio::test]
async fn reservation_admission_follows_tier_and_lifecycle() {
    let app = test_app();
    let owner = register(&app, "owner@example.com").await;
    let caller = AuthorizedUser::new(owner.id);
    let facility_id = create_facility(&app, owner.id, 3, 10.0, 10.0).await;

    initialize_spots(
        caller,
        Path(facility_id),
        State(app.registry.clone()),
        Json(InitializeSpotsRequest { count: 3 }),
    )
    .await
    .unwrap();
    set_spot_status(
        caller,
        Path((facility_id, 2)),
        State(app.registry.clone()),
        Json(SetSpotStatusRequest { occupied: true }),
    )
    .await
    .unwrap();

    let Json(detail) = show_facility(Path(facility_id), State(app.registry.clone()))
        .await
        .unwrap();
    assert_eq!((detail.total, detail.occupied, detail.free), (3, 1, 2));

    // Standard tier is turned away regardless of facility state.
    let err = reserve_facility(caller, Path(facility_id), State(app.registry.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ForbiddenOperation));

    // Promotion happens out of band.
    app.users.promote(owner.id);

    let (status, Json(_)) = reserve_facility(caller, Path(facility_id), State(app.registry.clone()))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);

    let err = reserve_facility(caller, Path(facility_id), State(app.registry.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ReservationConflict));

    let Json(active) =
        show_reservation_status(caller, Path(facility_id), State(app.registry.clone()))
            .await
            .unwrap();
    assert!(active.active);

    let status = cancel_reservation(caller, Path(facility_id), State(app.registry.clone()))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);

    let Json(active) =
        show_reservation_status(caller, Path(facility_id), State(app.registry.clone()))
            .await
            .unwrap();
    assert!(!active.active);

    let err = cancel_reservation(caller, Path(facility_id), State(app.registry.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EntityNotFound(_)));

    // The pair can go active again after cancellation.
    let (status, Json(_)) = reserve_facility(caller, Path(facility_id), State(app.registry.clone()))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn reserving_an_unknown_facility_is_not_found() {
    let app = test_app();
    let user = register(&app, "driver@example.com").await;
    app.users.promote(user.id);

    let err = reserve_facility(
        AuthorizedUser::new(user.id),
        Path(FacilityId::new(404)),
        State(app.registry.clone()),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::EntityNotFound(_)));
}
