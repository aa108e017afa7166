use chrono::{DateTime, Utc};
use kernel::model::{
    id::{FacilityId, ReservationId, UserId},
    reservation::{Reservation, ReservationStatus},
};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub id: ReservationId,
    pub user_id: UserId,
    pub facility_id: FacilityId,
    pub status: String,
    pub reserved_at: DateTime<Utc>,
    pub canceled_at: Option<DateTime<Utc>>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let ReservationRow {
            id,
            user_id,
            facility_id,
            status,
            reserved_at,
            canceled_at,
        } = value;
        let status = status
            .parse::<ReservationStatus>()
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        Ok(Reservation {
            id,
            user_id,
            facility_id,
            status,
            reserved_at,
            canceled_at,
        })
    }
}
