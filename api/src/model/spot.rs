use garde::Validate;
use kernel::model::spot::Spot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InitializeSpotsRequest {
    #[garde(range(min = 1))]
    pub count: i32,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetSpotStatusRequest {
    #[garde(skip)]
    pub occupied: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkSetSpotsRequest {
    #[garde(length(min = 1))]
    pub spots: Vec<SpotStateDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotStateDto {
    pub number: i32,
    pub occupied: bool,
}

impl From<SpotStateDto> for Spot {
    fn from(value: SpotStateDto) -> Self {
        let SpotStateDto { number, occupied } = value;
        Spot { number, occupied }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotResponse {
    pub number: i32,
    pub occupied: bool,
}

impl From<Spot> for SpotResponse {
    fn from(value: Spot) -> Self {
        let Spot { number, occupied } = value;
        Self { number, occupied }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotsResponse {
    pub items: Vec<SpotResponse>,
}

impl From<Vec<Spot>> for SpotsResponse {
    fn from(value: Vec<Spot>) -> Self {
        Self {
            items: value.into_iter().map(SpotResponse::from).collect(),
        }
    }
}
