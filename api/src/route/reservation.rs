use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::reservation::{
    cancel_reservation, reserve_facility, show_reservation_status,
};

pub fn build_reservation_routers() -> Router<AppRegistry> {
    let reservation_routers = Router::new()
        .route("/", post(reserve_facility).delete(cancel_reservation))
        .route("/status", get(show_reservation_status));

    Router::new().nest("/facilities/:facility_id/reservations", reservation_routers)
}
