use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{GeoPoint, Photo};

/// A photo known to have valid coordinates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeotaggedPhoto {
    pub id: Uuid,
    pub coordinates: GeoPoint,
    pub captured_at: DateTime<Utc>,
    pub location_label: Option<String>,
    pub url: String,
}

impl GeotaggedPhoto {
    /// Returns `None` for photos without usable coordinates
    pub fn from_photo(photo: &Photo) -> Option<Self> {
        let coordinates = photo.coordinates()?;
        Some(Self {
            id: photo.id,
            coordinates,
            captured_at: photo.taken_at(),
            location_label: photo.label().map(str::to_string),
            url: photo.url.clone(),
        })
    }
}

/// A nearby-query hit
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NearbyPhoto {
    #[serde(flatten)]
    pub photo: GeotaggedPhoto,
    pub distance_km: f64,
}

/// Photos grouped under one location label or ~1.1 km grid cell
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationCluster {
    pub key: String,
    pub representative_coordinate: GeoPoint,
    pub photo_count: u32,
    pub first_visit: DateTime<Utc>,
    pub last_visit: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationSummary {
    pub total_geotagged_photos: usize,
    pub unique_locations: usize,
    pub top_locations: Vec<LocationCluster>,
    pub recent_locations: Vec<LocationCluster>,
}
