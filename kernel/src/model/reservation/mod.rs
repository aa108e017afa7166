use chrono::{DateTime, Utc};
use strum::{AsRefStr, EnumString};

use crate::model::id::{FacilityId, ReservationId, UserId};

pub mod event;

/// A privileged user's claim on a facility. Cancellation is a status
/// transition, never a deletion, so history survives.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub id: ReservationId,
    pub user_id: UserId,
    pub facility_id: FacilityId,
    pub status: ReservationStatus,
    pub reserved_at: DateTime<Utc>,
    pub canceled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ReservationStatus {
    Active,
    Canceled,
}
