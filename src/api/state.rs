use std::sync::Arc;

use crate::services::{DestinationCatalog, TravelDataStore};

/// Shared application state
///
/// Everything in here is read-only after start-up, so no locking is needed.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<DestinationCatalog>,
    pub store: Arc<dyn TravelDataStore>,
    pub max_nearby_results: usize,
}

impl AppState {
    pub fn new(
        catalog: DestinationCatalog,
        store: Arc<dyn TravelDataStore>,
        max_nearby_results: usize,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            store,
            max_nearby_results,
        }
    }
}
