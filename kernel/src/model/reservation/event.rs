use chrono::{DateTime, Utc};
use derive_new::new;

use crate::model::id::{FacilityId, UserId};

#[derive(new)]
pub struct CreateReservation {
    pub user_id: UserId,
    pub facility_id: FacilityId,
}

#[derive(new)]
pub struct CancelReservation {
    pub user_id: UserId,
    pub facility_id: FacilityId,
    pub canceled_at: DateTime<Utc>,
}
