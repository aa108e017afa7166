use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    facility::{event::CreateFacility, Facility, FacilitySummary, FacilityWithAvailability},
    id::{FacilityId, UserId},
};
use kernel::repository::facility::FacilityRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::facility::{
        FacilityAvailabilityRow, FacilityRow, FacilitySummaryRow, OpeningWindowRow,
    },
    ConnectionPool,
};

#[derive(new)]
pub struct FacilityRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl FacilityRepository for FacilityRepositoryImpl {
    async fn create(&self, event: CreateFacility) -> AppResult<FacilityId> {
        let amenities = event
            .amenities
            .iter()
            .map(|a| a.as_ref())
            .collect::<Vec<_>>()
            .join(",");

        let facility_id: FacilityId = sqlx::query_scalar(
            r#"
                INSERT INTO facilities
                    (owner_id, name, capacity, latitude, longitude,
                     price_per_hour, covered, amenities, restroom, max_height_m)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING id
            "#,
        )
        .bind(event.owner_id)
        .bind(&event.name)
        .bind(event.capacity)
        .bind(event.latitude)
        .bind(event.longitude)
        .bind(event.price_per_hour)
        .bind(event.covered.as_ref().map(|c| c.as_ref()))
        .bind(&amenities)
        .bind(event.restroom)
        .bind(event.max_height_m)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        // Window rows are advisory metadata: a failing insert is logged and
        // does not roll back the facility.
        for window in &event.opening_windows {
            let res = sqlx::query(
                r#"
                    INSERT INTO opening_windows (facility_id, day, opens, closes)
                    VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(facility_id)
            .bind(&window.day)
            .bind(&window.opens)
            .bind(&window.closes)
            .execute(self.db.inner_ref())
            .await;
            if let Err(e) = res {
                tracing::warn!(
                    %facility_id,
                    day = %window.day,
                    error = %e,
                    "failed to persist an opening window"
                );
            }
        }

        Ok(facility_id)
    }

    async fn find_owned_by(&self, user_id: UserId) -> AppResult<Vec<FacilitySummary>> {
        let rows: Vec<FacilitySummaryRow> = sqlx::query_as(
            r#"
                SELECT id, name, capacity, latitude, longitude
                FROM facilities
                WHERE owner_id = $1
                ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(FacilitySummary::from).collect())
    }

    async fn find_by_id(&self, facility_id: FacilityId) -> AppResult<Option<Facility>> {
        let row: Option<FacilityRow> = sqlx::query_as(
            r#"
                SELECT id, owner_id, name, capacity, latitude, longitude,
                       price_per_hour, covered, amenities, restroom,
                       max_height_m, created_at
                FROM facilities
                WHERE id = $1
            "#,
        )
        .bind(facility_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let windows: Vec<OpeningWindowRow> = sqlx::query_as(
            r#"
                SELECT day, opens, closes
                FROM opening_windows
                WHERE facility_id = $1
                ORDER BY id
            "#,
        )
        .bind(facility_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(Some(
            row.into_facility(windows.into_iter().map(Into::into).collect()),
        ))
    }

    async fn find_all_with_availability(&self) -> AppResult<Vec<FacilityWithAvailability>> {
        let rows: Vec<FacilityAvailabilityRow> = sqlx::query_as(
            r#"
                SELECT
                    f.id,
                    f.name,
                    f.capacity,
                    f.latitude,
                    f.longitude,
                    COALESCE(SUM(CASE WHEN s.occupied THEN 1 ELSE 0 END), 0) AS occupied
                FROM facilities AS f
                LEFT JOIN spots AS s ON s.facility_id = f.id
                GROUP BY f.id
                ORDER BY f.id
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(FacilityWithAvailability::from).collect())
    }

    async fn is_owner(&self, facility_id: FacilityId, user_id: UserId) -> bool {
        let count: Result<i64, sqlx::Error> = sqlx::query_scalar(
            r#"
                SELECT COUNT(1)
                FROM facilities
                WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(facility_id)
        .bind(user_id)
        .fetch_one(self.db.inner_ref())
        .await;

        match count {
            Ok(n) => n > 0,
            // Fails closed: an unanswerable ownership question is "no".
            Err(e) => {
                tracing::warn!(%facility_id, %user_id, error = %e, "ownership check failed");
                false
            }
        }
    }
}
