use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

use super::{Category, GeoPoint};

/// English month names, indexed by `month0`
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Meteorological season (northern hemisphere)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Maps a calendar month (1-12) to its season
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    /// Calendar months (1-12) belonging to this season
    pub fn months(&self) -> [u32; 3] {
        match self {
            Season::Winter => [12, 1, 2],
            Season::Spring => [3, 4, 5],
            Season::Summer => [6, 7, 8],
            Season::Autumn => [9, 10, 11],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }

    /// Whether a single lowercase word of free text refers to this season,
    /// either by name or by one of its months.
    pub fn matches_token(&self, token: &str) -> bool {
        if token == self.as_str() || (*self == Season::Autumn && token == "fall") {
            return true;
        }

        self.months().iter().any(|&m| {
            let name = MONTH_NAMES[(m - 1) as usize].to_lowercase();
            token == name || token == &name[..3]
        })
    }

    /// Whether any word of `text` refers to this season
    pub fn mentioned_in(&self, text: &str) -> bool {
        text.to_lowercase()
            .split(|c: char| !c.is_alphabetic())
            .filter(|t| !t.is_empty())
            .any(|t| self.matches_token(t))
    }
}

/// A trip record as supplied by the persistence collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    pub id: Uuid,
    /// Legacy free text, conventionally "City, Country"
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// A photo record as supplied by the persistence collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Photo {
    pub id: Uuid,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub location_label: Option<String>,
    #[serde(default)]
    pub captured_at: Option<DateTime<Utc>>,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub url: String,
}

impl Photo {
    /// Capture time, falling back to the upload time
    pub fn taken_at(&self) -> DateTime<Utc> {
        self.captured_at.unwrap_or(self.uploaded_at)
    }

    /// Coordinates when both are present and in range
    pub fn coordinates(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => GeoPoint::new(lat, lon).ok(),
            _ => None,
        }
    }

    /// Trimmed location label, `None` when absent or blank
    pub fn label(&self) -> Option<&str> {
        self.location_label
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }
}

/// Trips and photos read together in a single store round-trip
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TravelSnapshot {
    #[serde(default)]
    pub trips: Vec<Trip>,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

/// Profile derived from a user's trips and photos; recomputed per request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TravelHistory {
    pub visited_countries: BTreeSet<String>,
    pub visited_cities: BTreeSet<String>,
    /// Never populated by the aggregator yet; still honoured by scoring
    pub preferred_categories: BTreeMap<Category, u32>,
    pub seasonal_preferences: BTreeMap<Season, u32>,
    pub average_trip_duration_days: u32,
    pub most_active_month: Option<String>,
    pub travel_frequency_last_year: u32,
}

pub const DEFAULT_TRIP_DURATION_DAYS: u32 = 7;

impl Default for TravelHistory {
    fn default() -> Self {
        Self {
            visited_countries: BTreeSet::new(),
            visited_cities: BTreeSet::new(),
            preferred_categories: BTreeMap::new(),
            seasonal_preferences: BTreeMap::new(),
            average_trip_duration_days: DEFAULT_TRIP_DURATION_DAYS,
            most_active_month: None,
            travel_frequency_last_year: 0,
        }
    }
}

impl TravelHistory {
    pub fn has_visited_country(&self, country: &str) -> bool {
        self.visited_countries
            .iter()
            .any(|c| c.eq_ignore_ascii_case(country.trim()))
    }

    pub fn prefers_category(&self, category: Category) -> bool {
        self.preferred_categories.contains_key(&category)
    }

    /// A season is favored when it has photos and no other season has more
    pub fn favors_season(&self, season: Season) -> bool {
        let count = self.seasonal_preferences.get(&season).copied().unwrap_or(0);
        let max = self.seasonal_preferences.values().copied().max().unwrap_or(0);
        count > 0 && count == max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_season_from_month() {
        assert_eq!(Season::from_month(12), Season::Winter);
        assert_eq!(Season::from_month(1), Season::Winter);
        assert_eq!(Season::from_month(3), Season::Spring);
        assert_eq!(Season::from_month(8), Season::Summer);
        assert_eq!(Season::from_month(11), Season::Autumn);
    }

    #[test]
    fn test_season_mentioned_in_free_text() {
        assert!(Season::Spring.mentioned_in("April to June"));
        assert!(Season::Autumn.mentioned_in("Fall foliage"));
        assert!(Season::Autumn.mentioned_in("Sep-Nov"));
        assert!(Season::Winter.mentioned_in("December to March"));
        assert!(!Season::Summer.mentioned_in("April to May, October"));
        assert!(!Season::Spring.mentioned_in("Year-round"));
    }

    #[test]
    fn test_photo_taken_at_falls_back_to_upload() {
        let uploaded = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let photo = Photo {
            id: Uuid::new_v4(),
            latitude: None,
            longitude: None,
            location_label: None,
            captured_at: None,
            uploaded_at: uploaded,
            url: String::new(),
        };
        assert_eq!(photo.taken_at(), uploaded);
        assert!(photo.coordinates().is_none());
    }

    #[test]
    fn test_photo_out_of_range_coordinates_are_ignored() {
        let photo = Photo {
            id: Uuid::new_v4(),
            latitude: Some(123.0),
            longitude: Some(2.0),
            location_label: Some("   ".into()),
            captured_at: None,
            uploaded_at: Utc::now(),
            url: String::new(),
        };
        assert!(photo.coordinates().is_none());
        assert!(photo.label().is_none());
    }

    #[test]
    fn test_favors_season_requires_maximum() {
        let mut history = TravelHistory::default();
        assert!(!history.favors_season(Season::Summer));

        history.seasonal_preferences.insert(Season::Summer, 5);
        history.seasonal_preferences.insert(Season::Winter, 2);
        assert!(history.favors_season(Season::Summer));
        assert!(!history.favors_season(Season::Winter));
    }

    #[test]
    fn test_has_visited_country_ignores_case() {
        let mut history = TravelHistory::default();
        history.visited_countries.insert("France".into());
        assert!(history.has_visited_country("france"));
        assert!(!history.has_visited_country("Spain"));
    }
}
