use axum::{
    routing::{get, patch, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    facility::{
        register_facility, show_facility, show_facility_availability, show_facility_list,
        show_my_facilities, show_nearby_facilities,
    },
    spot::{bulk_set_spots, initialize_spots, set_spot_status, show_spots},
};

pub fn build_facility_routers() -> Router<AppRegistry> {
    let facility_routers = Router::new()
        .route("/", post(register_facility))
        .route("/", get(show_facility_list))
        .route("/me", get(show_my_facilities))
        .route("/nearby", get(show_nearby_facilities))
        .route("/:facility_id", get(show_facility))
        .route("/:facility_id/availability", get(show_facility_availability))
        .route("/:facility_id/spots", post(initialize_spots))
        .route("/:facility_id/spots", put(bulk_set_spots))
        .route("/:facility_id/spots", get(show_spots))
        .route("/:facility_id/spots/:spot_number", patch(set_spot_status));

    Router::new().nest("/facilities", facility_routers)
}
