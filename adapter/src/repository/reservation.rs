use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{FacilityId, ReservationId, UserId},
    reservation::{
        event::{CancelReservation, CreateReservation},
        Reservation,
    },
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::reservation::ReservationRow, ConnectionPool};

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId> {
        // The admission race is settled by the partial unique index on
        // (user_id, facility_id) WHERE status = 'active': of two concurrent
        // inserts, exactly one sees the violation.
        sqlx::query_scalar(
            r#"
                INSERT INTO reservations (user_id, facility_id, status)
                VALUES ($1, $2, 'active')
                RETURNING id
            "#,
        )
        .bind(event.user_id)
        .bind(event.facility_id)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::ReservationConflict
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::EntityNotFound("facility not found".into())
            }
            e => AppError::SpecificOperationError(e),
        })
    }

    async fn cancel(&self, event: CancelReservation) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE reservations
                SET status = 'canceled', canceled_at = $3
                WHERE user_id = $1 AND facility_id = $2 AND status = 'active'
            "#,
        )
        .bind(event.user_id)
        .bind(event.facility_id)
        .bind(event.canceled_at)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "no active reservation for this facility".into(),
            ));
        }

        Ok(())
    }

    async fn find_active(
        &self,
        user_id: UserId,
        facility_id: FacilityId,
    ) -> AppResult<Option<Reservation>> {
        let row: Option<ReservationRow> = sqlx::query_as(
            r#"
                SELECT id, user_id, facility_id, status, reserved_at, canceled_at
                FROM reservations
                WHERE user_id = $1 AND facility_id = $2 AND status = 'active'
            "#,
        )
        .bind(user_id)
        .bind(facility_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(TryInto::try_into).transpose()
    }
}
