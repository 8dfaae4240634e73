mod analytics;
mod destination;
mod filters;
mod geo;
mod travel;

pub use analytics::{GeotaggedPhoto, LocationCluster, LocationSummary, NearbyPhoto};
pub use destination::{
    BudgetTier, Category, Destination, Difficulty, DurationRange, ScoredDestination,
    TouristSeason,
};
pub use filters::{BudgetFilter, FilterCriteria, FilterCriteriaInput, MAX_DESIRED_DURATION_DAYS};
pub use geo::GeoPoint;
pub use travel::{
    Photo, Season, TravelHistory, TravelSnapshot, Trip, DEFAULT_TRIP_DURATION_DAYS, MONTH_NAMES,
};
