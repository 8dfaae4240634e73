use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{
        Destination, FilterCriteria, FilterCriteriaInput, GeoPoint, LocationCluster,
        LocationSummary, NearbyPhoto, ScoredDestination, TravelHistory, TravelSnapshot,
    },
    services::{
        scoring, travel_history, LocationAnalytics, NearbyQuery, RandomJitter,
    },
};

use super::AppState;

// Request types

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub filters: FilterCriteriaInput,
    #[serde(default)]
    pub search_query: String,
}

#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    pub limit: Option<usize>,
}

/// Reads trips and photos once for the current request
async fn load_snapshot(state: &AppState, request_id: &RequestId) -> AppResult<TravelSnapshot> {
    let snapshot = state.store.load_snapshot().await?;
    tracing::debug!(
        request_id = %request_id,
        store = state.store.name(),
        trips = snapshot.trips.len(),
        photos = snapshot.photos.len(),
        "Travel snapshot loaded"
    );
    Ok(snapshot)
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// The full destination catalog
pub async fn list_destinations(State(state): State<AppState>) -> Json<Vec<Destination>> {
    Json(state.catalog.all().to_vec())
}

/// Ranks destinations for the caller's filters and travel history
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Vec<ScoredDestination>>> {
    let filters = FilterCriteria::try_from(request.filters)?;

    tracing::info!(
        request_id = %request_id,
        categories = filters.categories.len(),
        has_query = !request.search_query.trim().is_empty(),
        "Processing recommendation request"
    );

    let snapshot = load_snapshot(&state, &request_id).await?;
    let now = Utc::now();
    let history = travel_history::aggregate(&snapshot.trips, &snapshot.photos, now);

    let mut jitter = RandomJitter::new();
    let results = scoring::score_destinations(
        &state.catalog,
        &filters,
        &request.search_query,
        &history,
        now,
        &mut jitter,
    );

    tracing::info!(
        request_id = %request_id,
        returned = results.len(),
        "Recommendations ranked"
    );

    Ok(Json(results))
}

/// The travel profile derived from the current trips and photos
pub async fn get_history(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<TravelHistory>> {
    let snapshot = load_snapshot(&state, &request_id).await?;
    let history = travel_history::aggregate(&snapshot.trips, &snapshot.photos, Utc::now());
    Ok(Json(history))
}

/// Geotagged photos within a radius of a point
pub async fn nearby_photos(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<NearbyParams>,
) -> AppResult<Json<Vec<NearbyPhoto>>> {
    let center = GeoPoint::new(params.latitude, params.longitude)?;
    let limit = params
        .limit
        .unwrap_or(state.max_nearby_results)
        .min(state.max_nearby_results);
    let query = NearbyQuery::new(center, params.radius_km, limit)?;

    let snapshot = load_snapshot(&state, &request_id).await?;
    let hits = LocationAnalytics::new(&snapshot.photos).nearby(&query);

    tracing::info!(
        request_id = %request_id,
        radius_km = query.radius_km,
        found = hits.len(),
        "Nearby photo query completed"
    );

    Ok(Json(hits))
}

/// Photo totals plus the busiest and most recent locations
pub async fn location_summary(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<LocationSummary>> {
    let snapshot = load_snapshot(&state, &request_id).await?;
    Ok(Json(LocationAnalytics::new(&snapshot.photos).summary()))
}

/// Every location cluster in first-seen order
pub async fn location_clusters(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<Vec<LocationCluster>>> {
    let snapshot = load_snapshot(&state, &request_id).await?;
    Ok(Json(LocationAnalytics::new(&snapshot.photos).clusters()))
}
