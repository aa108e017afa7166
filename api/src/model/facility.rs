use derive_new::new;
use garde::Validate;
use kernel::model::{
    facility::{
        all_hours, event::CreateFacility, sort_windows, Amenity, CoveredType, Facility,
        FacilitySummary, FacilityWithAvailability, OpeningWindow,
    },
    id::{FacilityId, UserId},
    spot::SpotSummary,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFacilityRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(range(min = 1))]
    pub capacity: i32,
    #[garde(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[garde(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[garde(range(min = 0.0))]
    pub price_per_hour: Option<f64>,
    #[garde(skip)]
    pub covered: Option<CoveredName>,
    #[garde(skip)]
    #[serde(default)]
    pub amenities: Vec<String>,
    #[garde(skip)]
    pub restroom: Option<bool>,
    #[garde(range(min = 0.0))]
    pub max_height_m: Option<f64>,
    #[garde(skip)]
    #[serde(default)]
    pub opening_windows: Vec<OpeningWindowDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoveredName {
    Covered,
    PartiallyCovered,
    None,
}

impl From<CoveredName> for CoveredType {
    fn from(value: CoveredName) -> Self {
        match value {
            CoveredName::Covered => Self::Covered,
            CoveredName::PartiallyCovered => Self::PartiallyCovered,
            CoveredName::None => Self::None,
        }
    }
}

impl From<CoveredType> for CoveredName {
    fn from(value: CoveredType) -> Self {
        match value {
            CoveredType::Covered => Self::Covered,
            CoveredType::PartiallyCovered => Self::PartiallyCovered,
            CoveredType::None => Self::None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningWindowDto {
    pub day: String,
    pub opens: String,
    pub closes: String,
}

impl From<OpeningWindowDto> for OpeningWindow {
    fn from(value: OpeningWindowDto) -> Self {
        let OpeningWindowDto { day, opens, closes } = value;
        OpeningWindow { day, opens, closes }
    }
}

impl From<OpeningWindow> for OpeningWindowDto {
    fn from(value: OpeningWindow) -> Self {
        let OpeningWindow { day, opens, closes } = value;
        OpeningWindowDto { day, opens, closes }
    }
}

#[derive(new)]
pub struct CreateFacilityRequestWithOwner(UserId, CreateFacilityRequest);

impl From<CreateFacilityRequestWithOwner> for CreateFacility {
    fn from(value: CreateFacilityRequestWithOwner) -> Self {
        let CreateFacilityRequestWithOwner(
            owner_id,
            CreateFacilityRequest {
                name,
                capacity,
                latitude,
                longitude,
                price_per_hour,
                covered,
                amenities,
                restroom,
                max_height_m,
                opening_windows,
            },
        ) = value;
        CreateFacility {
            owner_id,
            name,
            capacity,
            latitude,
            longitude,
            price_per_hour,
            covered: covered.map(CoveredType::from),
            // Unknown tags are dropped here, before anything is persisted.
            amenities: Amenity::parse_tags(&amenities),
            restroom: restroom.unwrap_or(false),
            max_height_m,
            opening_windows: opening_windows.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFacilityResponse {
    pub id: FacilityId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilitySummaryResponse {
    pub id: FacilityId,
    pub name: String,
    pub capacity: i32,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<FacilitySummary> for FacilitySummaryResponse {
    fn from(value: FacilitySummary) -> Self {
        let FacilitySummary {
            id,
            name,
            capacity,
            latitude,
            longitude,
        } = value;
        Self {
            id,
            name,
            capacity,
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyFacilitiesResponse {
    pub items: Vec<FacilitySummaryResponse>,
}

impl From<Vec<FacilitySummary>> for MyFacilitiesResponse {
    fn from(value: Vec<FacilitySummary>) -> Self {
        Self {
            items: value.into_iter().map(FacilitySummaryResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub total: i64,
    pub occupied: i64,
    pub free: i64,
}

impl From<SpotSummary> for AvailabilityResponse {
    fn from(value: SpotSummary) -> Self {
        let SpotSummary {
            total,
            occupied,
            free,
        } = value;
        Self {
            total,
            occupied,
            free,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityWithAvailabilityResponse {
    pub id: FacilityId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub total: i64,
    pub occupied: i64,
    pub free: i64,
}

impl From<FacilityWithAvailability> for FacilityWithAvailabilityResponse {
    fn from(value: FacilityWithAvailability) -> Self {
        let FacilityWithAvailability {
            summary,
            availability,
        } = value;
        Self {
            id: summary.id,
            name: summary.name,
            latitude: summary.latitude,
            longitude: summary.longitude,
            total: availability.total,
            occupied: availability.occupied,
            free: availability.free,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilitiesResponse {
    pub items: Vec<FacilityWithAvailabilityResponse>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NearbyQuery {
    #[garde(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[garde(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    #[garde(range(min = 0.0))]
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
}

fn default_radius_km() -> f64 {
    1.0
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyFacilityResponse {
    pub id: FacilityId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub total: i64,
    pub occupied: i64,
    pub free: i64,
    pub distance_km: f64,
}

impl From<(FacilityWithAvailability, f64)> for NearbyFacilityResponse {
    fn from((facility, distance_km): (FacilityWithAvailability, f64)) -> Self {
        let FacilityWithAvailability {
            summary,
            availability,
        } = facility;
        Self {
            id: summary.id,
            name: summary.name,
            latitude: summary.latitude,
            longitude: summary.longitude,
            total: availability.total,
            occupied: availability.occupied,
            free: availability.free,
            distance_km,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyFacilitiesResponse {
    pub items: Vec<NearbyFacilityResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityDetailResponse {
    pub id: FacilityId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub price_per_hour: Option<f64>,
    pub covered: Option<CoveredName>,
    pub amenities: Vec<String>,
    pub restroom: bool,
    pub max_height_m: Option<f64>,
    pub total: i64,
    pub occupied: i64,
    pub free: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_hours: Option<bool>,
    pub opening_windows: Vec<OpeningWindowDto>,
}

impl From<(Facility, SpotSummary)> for FacilityDetailResponse {
    fn from((facility, availability): (Facility, SpotSummary)) -> Self {
        let Facility {
            id,
            name,
            latitude,
            longitude,
            price_per_hour,
            covered,
            amenities,
            restroom,
            max_height_m,
            mut opening_windows,
            ..
        } = facility;
        sort_windows(&mut opening_windows);
        Self {
            id,
            name,
            latitude,
            longitude,
            price_per_hour,
            covered: covered.map(CoveredName::from),
            amenities: amenities.iter().map(|a| a.as_ref().to_string()).collect(),
            restroom,
            max_height_m,
            total: availability.total,
            occupied: availability.occupied,
            free: availability.free,
            all_hours: all_hours(&opening_windows),
            opening_windows: opening_windows.into_iter().map(Into::into).collect(),
        }
    }
}
