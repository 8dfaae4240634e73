use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::TravelSnapshot,
};

/// Read-only access to the trip and photo collections owned by another service.
///
/// Implementations must return both collections from a single call so that a
/// request never needs more than one round-trip. Failures are not retried here.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TravelDataStore: Send + Sync {
    /// Reads the current trips and photos
    async fn load_snapshot(&self) -> AppResult<TravelSnapshot>;

    /// Store name for logging
    fn name(&self) -> &'static str;
}

/// Store backed by a snapshot held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    snapshot: TravelSnapshot,
}

impl InMemoryStore {
    pub fn new(snapshot: TravelSnapshot) -> Self {
        Self { snapshot }
    }

    /// Seeds the store from a JSON file shaped like `{"trips": [...], "photos": [...]}`
    pub fn from_json_file(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::DataUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        let snapshot: TravelSnapshot = serde_json::from_str(&json).map_err(|e| {
            AppError::DataUnavailable(format!("cannot parse {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            trips = snapshot.trips.len(),
            photos = snapshot.photos.len(),
            "Seeded in-memory travel store"
        );

        Ok(Self::new(snapshot))
    }
}

#[async_trait::async_trait]
impl TravelDataStore for InMemoryStore {
    async fn load_snapshot(&self) -> AppResult<TravelSnapshot> {
        Ok(self.snapshot.clone())
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}
