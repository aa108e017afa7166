use chrono::{DateTime, Utc};
use kernel::model::{
    facility::{
        Amenity, Facility, FacilitySummary, FacilityWithAvailability, OpeningWindow,
    },
    id::{FacilityId, UserId},
    spot::SpotSummary,
};

#[derive(sqlx::FromRow)]
pub struct FacilityRow {
    pub id: FacilityId,
    pub owner_id: UserId,
    pub name: String,
    pub capacity: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub price_per_hour: Option<f64>,
    pub covered: Option<String>,
    pub amenities: String,
    pub restroom: bool,
    pub max_height_m: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl FacilityRow {
    pub fn into_facility(self, opening_windows: Vec<OpeningWindow>) -> Facility {
        let FacilityRow {
            id,
            owner_id,
            name,
            capacity,
            latitude,
            longitude,
            price_per_hour,
            covered,
            amenities,
            restroom,
            max_height_m,
            created_at,
        } = self;
        Facility {
            id,
            owner_id,
            name,
            capacity,
            latitude,
            longitude,
            price_per_hour,
            // A stored value outside the vocabulary reads as absent rather
            // than failing the whole row.
            covered: covered.as_deref().and_then(|v| v.parse().ok()),
            amenities: Amenity::parse_tags(&amenities.split(',').collect::<Vec<_>>()),
            restroom,
            max_height_m,
            created_at,
            opening_windows,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct OpeningWindowRow {
    pub day: String,
    pub opens: String,
    pub closes: String,
}

impl From<OpeningWindowRow> for OpeningWindow {
    fn from(value: OpeningWindowRow) -> Self {
        let OpeningWindowRow { day, opens, closes } = value;
        OpeningWindow { day, opens, closes }
    }
}

#[derive(sqlx::FromRow)]
pub struct FacilitySummaryRow {
    pub id: FacilityId,
    pub name: String,
    pub capacity: i32,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<FacilitySummaryRow> for FacilitySummary {
    fn from(value: FacilitySummaryRow) -> Self {
        let FacilitySummaryRow {
            id,
            name,
            capacity,
            latitude,
            longitude,
        } = value;
        FacilitySummary {
            id,
            name,
            capacity,
            latitude,
            longitude,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct FacilityAvailabilityRow {
    pub id: FacilityId,
    pub name: String,
    pub capacity: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub occupied: i64,
}

impl From<FacilityAvailabilityRow> for FacilityWithAvailability {
    fn from(value: FacilityAvailabilityRow) -> Self {
        let FacilityAvailabilityRow {
            id,
            name,
            capacity,
            latitude,
            longitude,
            occupied,
        } = value;
        FacilityWithAvailability {
            summary: FacilitySummary {
                id,
                name,
                capacity,
                latitude,
                longitude,
            },
            availability: SpotSummary::from_counts(capacity, occupied),
        }
    }
}
