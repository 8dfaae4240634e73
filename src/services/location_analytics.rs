use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{GeoPoint, GeotaggedPhoto, LocationCluster, LocationSummary, NearbyPhoto, Photo},
    services::geo_distance::distance_km,
};

pub const TOP_LOCATIONS: usize = 10;
pub const RECENT_LOCATIONS: usize = 5;

/// Cluster key for a photo: its label, or its coordinates rounded to a ~1.1 km cell
pub fn cluster_key(photo: &GeotaggedPhoto) -> String {
    if let Some(label) = photo.location_label.as_deref() {
        return label.to_string();
    }

    // Adding 0.0 normalises -0.0 so a key never reads "-0.00"
    let round = |v: f64| (v * 100.0).round() / 100.0 + 0.0;
    format!(
        "{:.2},{:.2}",
        round(photo.coordinates.latitude),
        round(photo.coordinates.longitude)
    )
}

/// A validated radius query around a center point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub center: GeoPoint,
    pub radius_km: f64,
    pub limit: usize,
}

impl NearbyQuery {
    pub fn new(center: GeoPoint, radius_km: f64, limit: usize) -> AppResult<Self> {
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(AppError::validation(
                "radius_km",
                format!("must be a non-negative number, got {}", radius_km),
            ));
        }
        if limit == 0 {
            return Err(AppError::validation("limit", "must be at least 1"));
        }

        Ok(Self {
            center,
            radius_km,
            limit,
        })
    }
}

/// Clustering, proximity and summary queries over one photo collection.
///
/// Only photos with valid coordinates are kept; every query is a linear scan.
#[derive(Debug, Clone, Default)]
pub struct LocationAnalytics {
    photos: Vec<GeotaggedPhoto>,
}

impl LocationAnalytics {
    pub fn new(photos: &[Photo]) -> Self {
        Self {
            photos: photos.iter().filter_map(GeotaggedPhoto::from_photo).collect(),
        }
    }

    pub fn geotagged(&self) -> &[GeotaggedPhoto] {
        &self.photos
    }

    /// Groups photos in first-seen order
    pub fn clusters(&self) -> Vec<LocationCluster> {
        let mut clusters: Vec<LocationCluster> = Vec::new();
        let mut index_by_key: HashMap<String, usize> = HashMap::new();

        for photo in &self.photos {
            let key = cluster_key(photo);
            match index_by_key.get(&key) {
                Some(&i) => {
                    let cluster = &mut clusters[i];
                    cluster.photo_count += 1;
                    cluster.first_visit = cluster.first_visit.min(photo.captured_at);
                    cluster.last_visit = cluster.last_visit.max(photo.captured_at);
                }
                None => {
                    index_by_key.insert(key.clone(), clusters.len());
                    clusters.push(LocationCluster {
                        key,
                        representative_coordinate: photo.coordinates,
                        photo_count: 1,
                        first_visit: photo.captured_at,
                        last_visit: photo.captured_at,
                    });
                }
            }
        }

        clusters
    }

    /// Photos within the query radius, nearest first, at most `query.limit` of them
    pub fn nearby(&self, query: &NearbyQuery) -> Vec<NearbyPhoto> {
        let mut hits: Vec<NearbyPhoto> = self
            .photos
            .iter()
            .filter_map(|photo| {
                let distance = distance_km(&query.center, &photo.coordinates);
                (distance <= query.radius_km).then(|| NearbyPhoto {
                    photo: photo.clone(),
                    distance_km: distance,
                })
            })
            .collect();

        hits.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        if hits.len() > query.limit {
            tracing::debug!(found = hits.len(), limit = query.limit, "Truncating nearby photo results");
            hits.truncate(query.limit);
        }

        hits
    }

    pub fn summary(&self) -> LocationSummary {
        let clusters = self.clusters();

        let mut top_locations = clusters.clone();
        top_locations.sort_by(|a, b| b.photo_count.cmp(&a.photo_count));
        top_locations.truncate(TOP_LOCATIONS);

        let unique_locations = clusters.len();
        let mut recent_locations = clusters;
        recent_locations.sort_by(|a, b| b.last_visit.cmp(&a.last_visit));
        recent_locations.truncate(RECENT_LOCATIONS);

        LocationSummary {
            total_geotagged_photos: self.photos.len(),
            unique_locations,
            top_locations,
            recent_locations,
        }
    }
}
