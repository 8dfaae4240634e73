pub mod catalog;
pub mod geo_distance;
pub mod location_analytics;
pub mod scoring;
pub mod store;
pub mod travel_history;

pub use catalog::DestinationCatalog;
pub use location_analytics::{LocationAnalytics, NearbyQuery};
pub use scoring::{FixedJitter, JitterSource, RandomJitter, ScoringEngine};
pub use store::{InMemoryStore, TravelDataStore};
