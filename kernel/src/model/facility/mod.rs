use chrono::{DateTime, Utc};
use strum::{AsRefStr, EnumString};

use crate::model::{
    id::{FacilityId, UserId},
    spot::SpotSummary,
};

pub mod event;

#[derive(Debug, Clone)]
pub struct Facility {
    pub id: FacilityId,
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
    pub created_at: DateTime<Utc>,
    pub opening_windows: Vec<OpeningWindow>,
}

#[derive(Debug, Clone)]
pub struct FacilitySummary {
    pub id: FacilityId,
    pub name: String,
    pub capacity: i32,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone)]
pub struct FacilityWithAvailability {
    pub summary: FacilitySummary,
    pub availability: SpotSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum CoveredType {
    Covered,
    PartiallyCovered,
    None,
}

/// Fixed amenity vocabulary. Tags outside it are dropped at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Amenity {
    Cameras,
    Guard,
}

impl Amenity {
    /// Keeps recognized tags in declared order, silently dropping unknown
    /// ones and duplicates.
    pub fn parse_tags<S: AsRef<str>>(tags: &[S]) -> Vec<Amenity> {
        let mut out = Vec::new();
        for tag in tags {
            if let Ok(amenity) = tag.as_ref().parse::<Amenity>() {
                if !out.contains(&amenity) {
                    out.push(amenity);
                }
            }
        }
        out
    }
}

/// A declared attention window. Day and time fields are stored verbatim;
/// day codes only influence ordering when they are recognizable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningWindow {
    pub day: String,
    pub opens: String,
    pub closes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

/// Orders windows mon..sun. Unrecognized day codes sort after the recognized
/// ones, keeping their insertion order.
pub fn sort_windows(windows: &mut [OpeningWindow]) {
    windows.sort_by_key(|w| {
        w.day
            .parse::<DayOfWeek>()
            .map(|d| d as u8)
            .unwrap_or(u8::MAX)
    });
}

/// `None` when no windows are declared; `Some(true)` iff every declared
/// window spans 00:00-23:59.
pub fn all_hours(windows: &[OpeningWindow]) -> Option<bool> {
    if windows.is_empty() {
        return None;
    }
    Some(
        windows
            .iter()
            .all(|w| w.opens == "00:00" && w.closes == "23:59"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(day: &str, opens: &str, closes: &str) -> OpeningWindow {
        OpeningWindow {
            day: day.into(),
            opens: opens.into(),
            closes: closes.into(),
        }
    }

    #[test]
    fn unknown_amenity_tags_are_dropped() {
        let tags = ["guard", "valet", "cameras", "guard"];
        assert_eq!(
            Amenity::parse_tags(&tags),
            vec![Amenity::Guard, Amenity::Cameras]
        );
        assert!(Amenity::parse_tags(&["valet", "ev-charging"]).is_empty());
    }

    #[test]
    fn windows_sort_in_day_order_with_unknown_codes_last() {
        let mut windows = vec![
            window("fri", "08:00", "20:00"),
            window("someday", "08:00", "20:00"),
            window("mon", "08:00", "20:00"),
            window("holiday", "10:00", "14:00"),
        ];
        sort_windows(&mut windows);
        let days: Vec<_> = windows.iter().map(|w| w.day.as_str()).collect();
        assert_eq!(days, vec!["mon", "fri", "someday", "holiday"]);
    }

    #[test]
    fn all_hours_is_absent_without_windows() {
        assert_eq!(all_hours(&[]), None);
    }

    #[test]
    fn all_hours_requires_every_window_to_span_the_day() {
        let full = vec![
            window("mon", "00:00", "23:59"),
            window("tue", "00:00", "23:59"),
        ];
        assert_eq!(all_hours(&full), Some(true));

        let partial = vec![
            window("mon", "00:00", "23:59"),
            window("tue", "08:00", "23:59"),
        ];
        assert_eq!(all_hours(&partial), Some(false));
    }
}
