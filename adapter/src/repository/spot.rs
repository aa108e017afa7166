use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::FacilityId,
    spot::{BulkSpotOutcome, FailedSpotWrite, Spot},
};
use kernel::repository::spot::SpotRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::spot::SpotRow, ConnectionPool};

#[derive(new)]
pub struct SpotRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl SpotRepository for SpotRepositoryImpl {
    async fn initialize(&self, facility_id: FacilityId, count: i32) -> AppResult<()> {
        // DO NOTHING keeps the occupied flag of spots that already exist;
        // re-initialization only fills gaps.
        sqlx::query(
            r#"
                INSERT INTO spots (facility_id, number, occupied)
                SELECT $1, n, FALSE
                FROM generate_series(1, $2) AS n
                ON CONFLICT (facility_id, number) DO NOTHING
            "#,
        )
        .bind(facility_id)
        .bind(count)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(())
    }

    async fn set_occupied(
        &self,
        facility_id: FacilityId,
        number: i32,
        occupied: bool,
    ) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE spots
                SET occupied = $3
                WHERE facility_id = $1 AND number = $2
            "#,
        )
        .bind(facility_id)
        .bind(number)
        .bind(occupied)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("specified spot not found".into()));
        }

        Ok(())
    }

    async fn bulk_set(
        &self,
        facility_id: FacilityId,
        states: Vec<Spot>,
    ) -> AppResult<BulkSpotOutcome> {
        let mut outcome = BulkSpotOutcome::default();
        for state in states {
            let res = sqlx::query(
                r#"
                    INSERT INTO spots (facility_id, number, occupied)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (facility_id, number)
                    DO UPDATE SET occupied = EXCLUDED.occupied
                "#,
            )
            .bind(facility_id)
            .bind(state.number)
            .bind(state.occupied)
            .execute(self.db.inner_ref())
            .await;

            match res {
                Ok(_) => outcome.applied += 1,
                Err(e) => outcome.failed.push(FailedSpotWrite {
                    number: state.number,
                    reason: e.to_string(),
                }),
            }
        }

        Ok(outcome)
    }

    async fn find_by_facility(&self, facility_id: FacilityId) -> AppResult<Vec<Spot>> {
        let rows: Vec<SpotRow> = sqlx::query_as(
            r#"
                SELECT number, occupied
                FROM spots
                WHERE facility_id = $1
                ORDER BY number
            "#,
        )
        .bind(facility_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Spot::from).collect())
    }

    async fn count_occupied(&self, facility_id: FacilityId) -> AppResult<i64> {
        sqlx::query_scalar(
            r#"
                SELECT COUNT(*)
                FROM spots
                WHERE facility_id = $1 AND occupied
            "#,
        )
        .bind(facility_id)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }
}
