use crate::model::id::UserId;

use super::{Amenity, CoveredType, OpeningWindow};

pub struct CreateFacility {
    pub owner_id: UserId,
    pub name: String,
    pub capacity: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub price_per_hour: Option<f64>,
    pub covered: Option<CoveredType>,
    pub amenities: Vec<Amenity>,
    pub restroom: bool,
    pub max_height_m: Option<f64>,
    pub opening_windows: Vec<OpeningWindow>,
}
