use chrono::{DateTime, Datelike, Utc};

use crate::models::{
    Destination, FilterCriteria, ScoredDestination, Season, TouristSeason, TravelHistory,
};
use crate::services::catalog::DestinationCatalog;

/// Starting score before any adjustment
pub const BASE_SCORE: f64 = 70.0;
/// Upper bound (exclusive) of the random jitter added to every score
pub const MAX_JITTER: f64 = 10.0;
/// Maximum number of ranked destinations returned
pub const MAX_RESULTS: usize = 12;

const PREFERRED_CATEGORY_BONUS: f64 = 15.0;
const VISITED_COUNTRY_PENALTY: f64 = 10.0;
const DURATION_PROXIMITY_DAYS: u32 = 2;
const DURATION_PROXIMITY_BONUS: f64 = 10.0;
const SEASON_BONUS: f64 = 8.0;
const WEATHER_PIVOT: f64 = 70.0;
const WEATHER_WEIGHT: f64 = 0.3;
const SAFETY_PIVOT: f64 = 80.0;
const SAFETY_WEIGHT: f64 = 0.2;
const QUIET_SEASON_BONUS: f64 = 10.0;
const CROWDED_SEASON_PENALTY: f64 = 5.0;
const DESIRED_DURATION_BONUS: f64 = 15.0;

/// Source of the per-destination random jitter.
///
/// Jitter deliberately shuffles near-equal scores so that repeating the same
/// query does not always surface the same order. Each request gets its own source.
pub trait JitterSource {
    /// Returns a value in `[0, MAX_JITTER)`
    fn next_jitter(&mut self) -> f64;
}

/// Fresh random jitter, independent of every other request
pub struct RandomJitter {
    rng: fastrand::Rng,
}

impl RandomJitter {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Reproducible jitter for a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for RandomJitter {
    fn default() -> Self {
        Self::new()
    }
}

impl JitterSource for RandomJitter {
    fn next_jitter(&mut self) -> f64 {
        self.rng.f64() * MAX_JITTER
    }
}

/// Constant jitter, clamped into `[0, MAX_JITTER)`
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn next_jitter(&mut self) -> f64 {
        self.0.clamp(0.0, MAX_JITTER - f64::EPSILON * MAX_JITTER)
    }
}

/// Ranks catalog destinations against filters and a travel history
pub struct ScoringEngine<'a> {
    catalog: &'a DestinationCatalog,
    history: &'a TravelHistory,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(catalog: &'a DestinationCatalog, history: &'a TravelHistory) -> Self {
        Self { catalog, history }
    }

    /// Applies hard filters, scores the survivors and returns the best `MAX_RESULTS`.
    ///
    /// Results are sorted by descending `match_score`; equal scores keep catalog order.
    pub fn rank(
        &self,
        filters: &FilterCriteria,
        search_query: &str,
        season: Season,
        jitter: &mut dyn JitterSource,
    ) -> Vec<ScoredDestination> {
        let query = search_query.trim().to_lowercase();

        let mut scored: Vec<ScoredDestination> = self
            .catalog
            .all()
            .iter()
            .filter(|d| passes_filters(d, filters, &query))
            .map(|d| {
                let raw = self.base_score(d, filters, query.is_empty(), season) + jitter.next_jitter();
                ScoredDestination {
                    destination: d.clone(),
                    match_score: raw.clamp(0.0, 100.0).round() as u8,
                }
            })
            .collect();

        let matched = scored.len();
        scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        scored.truncate(MAX_RESULTS);

        tracing::debug!(
            catalog_size = self.catalog.len(),
            matched,
            returned = scored.len(),
            season = season.as_str(),
            "Ranked destinations"
        );

        scored
    }

    /// Score of one destination before jitter, clamping and rounding
    pub fn base_score(
        &self,
        destination: &Destination,
        filters: &FilterCriteria,
        query_is_empty: bool,
        season: Season,
    ) -> f64 {
        let history = self.history;
        let mut score = BASE_SCORE;

        if history.prefers_category(destination.category) {
            score += PREFERRED_CATEGORY_BONUS;
        }

        if query_is_empty && history.has_visited_country(&destination.country) {
            score -= VISITED_COUNTRY_PENALTY;
        }

        let min_days = destination.duration_range.min_days;
        if min_days.abs_diff(history.average_trip_duration_days) <= DURATION_PROXIMITY_DAYS {
            score += DURATION_PROXIMITY_BONUS;
        }

        if season.mentioned_in(&destination.best_time) && history.favors_season(season) {
            score += SEASON_BONUS;
        }

        if filters.weather_importance {
            score += (f64::from(destination.weather_score) - WEATHER_PIVOT) * WEATHER_WEIGHT;
        }

        if filters.safety_importance {
            score += (f64::from(destination.safety_rating) - SAFETY_PIVOT) * SAFETY_WEIGHT;
        }

        if filters.avoid_crowds {
            match destination.tourist_season {
                TouristSeason::Low => score += QUIET_SEASON_BONUS,
                TouristSeason::High => score -= CROWDED_SEASON_PENALTY,
                TouristSeason::Medium => {}
            }
        }

        if destination
            .duration_range
            .contains(filters.desired_duration_days)
        {
            score += DESIRED_DURATION_BONUS;
        }

        score
    }
}

/// Conjunctive hard filters; `query` must already be trimmed and lowercased
fn passes_filters(destination: &Destination, filters: &FilterCriteria, query: &str) -> bool {
    if !query.is_empty() && !destination.search_text().contains(query) {
        return false;
    }
    if !filters.categories.is_empty() && !filters.categories.contains(&destination.category) {
        return false;
    }
    if !filters.budget_tier.allows(destination.budget_tier) {
        return false;
    }
    if filters.accessibility_needed && !destination.accessibility {
        return false;
    }
    true
}

/// Ranks the catalog for the season of `now`
pub fn score_destinations(
    catalog: &DestinationCatalog,
    filters: &FilterCriteria,
    search_query: &str,
    history: &TravelHistory,
    now: DateTime<Utc>,
    jitter: &mut dyn JitterSource,
) -> Vec<ScoredDestination> {
    let season = Season::from_month(now.month());
    ScoringEngine::new(catalog, history).rank(filters, search_query, season, jitter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetFilter, BudgetTier, Category, DurationRange};
    use crate::services::catalog::tests::sample_destination;

    fn builtin() -> DestinationCatalog {
        DestinationCatalog::builtin().unwrap()
    }

    fn catalog_of(destinations: Vec<Destination>) -> DestinationCatalog {
        DestinationCatalog::new(destinations).unwrap()
    }

    /// Filters whose desired duration matches nothing in the sample destinations
    fn neutral_filters() -> FilterCriteria {
        FilterCriteria {
            desired_duration_days: 300,
            ..Default::default()
        }
    }

    /// History whose average trip length is far from the sample destinations
    fn neutral_history() -> TravelHistory {
        TravelHistory {
            average_trip_duration_days: 30,
            ..Default::default()
        }
    }

    #[test]
    fn test_scores_stay_within_bounds() {
        let catalog = builtin();
        let history = TravelHistory::default();
        let engine = ScoringEngine::new(&catalog, &history);

        for seed in 0..20u64 {
            let filters = FilterCriteria {
                weather_importance: seed % 2 == 0,
                safety_importance: seed % 3 == 0,
                avoid_crowds: seed % 5 == 0,
                ..Default::default()
            };
            let mut jitter = RandomJitter::with_seed(seed);
            for scored in engine.rank(&filters, "", Season::Summer, &mut jitter) {
                assert!(scored.match_score <= 100);
            }
        }
    }

    #[test]
    fn test_score_is_clamped_to_100() {
        let mut d = sample_destination("a");
        d.weather_score = 100;
        d.tourist_season = TouristSeason::Low;
        let catalog = catalog_of(vec![d]);

        let mut history = TravelHistory::default();
        history.preferred_categories.insert(Category::Cultural, 3);
        history.average_trip_duration_days = 3;
        history.seasonal_preferences.insert(Season::Spring, 4);

        let filters = FilterCriteria {
            weather_importance: true,
            avoid_crowds: true,
            desired_duration_days: 4,
            ..Default::default()
        };

        let results = ScoringEngine::new(&catalog, &history).rank(
            &filters,
            "",
            Season::Spring,
            &mut FixedJitter(9.9),
        );
        assert_eq!(results[0].match_score, 100);
    }

    #[test]
    fn test_poor_weather_and_safety_lower_score() {
        let mut d = sample_destination("a");
        d.weather_score = 0;
        d.safety_rating = 0;
        let catalog = catalog_of(vec![d]);
        let history = neutral_history();
        let filters = FilterCriteria {
            weather_importance: true,
            safety_importance: true,
            ..neutral_filters()
        };

        // 70 - 21 - 16
        let engine = ScoringEngine::new(&catalog, &history);
        let raw = engine.base_score(&catalog.all()[0], &filters, true, Season::Summer);
        assert!((raw - 33.0).abs() < 1e-9);

        let results = engine.rank(&filters, "", Season::Summer, &mut FixedJitter(-50.0));
        assert_eq!(results[0].match_score, 33);
    }

    #[test]
    fn test_category_filter_returns_only_beach() {
        let catalog = builtin();
        let history = TravelHistory::default();
        let filters = FilterCriteria {
            categories: [Category::Beach].into_iter().collect(),
            ..Default::default()
        };

        let results = ScoringEngine::new(&catalog, &history).rank(
            &filters,
            "",
            Season::Summer,
            &mut FixedJitter(0.0),
        );
        assert!(!results.is_empty());
        assert!(results
            .iter()
            .all(|r| r.destination.category == Category::Beach));
    }

    #[test]
    fn test_accessibility_filter() {
        let catalog = builtin();
        let history = TravelHistory::default();
        let filters = FilterCriteria {
            accessibility_needed: true,
            ..Default::default()
        };

        let results = ScoringEngine::new(&catalog, &history).rank(
            &filters,
            "",
            Season::Winter,
            &mut RandomJitter::new(),
        );
        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.destination.accessibility));
    }

    #[test]
    fn test_budget_filter_is_exact() {
        let catalog = builtin();
        let history = TravelHistory::default();
        let filters = FilterCriteria {
            budget_tier: BudgetFilter::Exactly(BudgetTier::Low),
            ..Default::default()
        };

        let results = ScoringEngine::new(&catalog, &history).rank(
            &filters,
            "",
            Season::Autumn,
            &mut FixedJitter(0.0),
        );
        assert!(!results.is_empty());
        assert!(results
            .iter()
            .all(|r| r.destination.budget_tier == BudgetTier::Low));
    }

    #[test]
    fn test_search_query_is_case_insensitive_and_covers_activities() {
        let catalog = builtin();
        let history = TravelHistory::default();
        let engine = ScoringEngine::new(&catalog, &history);
        let filters = FilterCriteria::default();

        let by_name = engine.rank(&filters, "  KYOTO ", Season::Spring, &mut FixedJitter(0.0));
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].destination.id, "kyoto-japan");

        let by_activity = engine.rank(&filters, "paragliding", Season::Spring, &mut FixedJitter(0.0));
        assert_eq!(by_activity.len(), 1);
        assert_eq!(by_activity[0].destination.id, "interlaken-switzerland");

        let none = engine.rank(&filters, "atlantis", Season::Spring, &mut FixedJitter(0.0));
        assert!(none.is_empty());
    }

    #[test]
    fn test_results_bounded_and_sorted() {
        let catalog = builtin();
        assert!(catalog.len() > MAX_RESULTS);
        let history = TravelHistory::default();

        let results = ScoringEngine::new(&catalog, &history).rank(
            &FilterCriteria::default(),
            "",
            Season::Summer,
            &mut RandomJitter::new(),
        );
        assert_eq!(results.len(), MAX_RESULTS);
        assert!(results
            .windows(2)
            .all(|w| w[0].match_score >= w[1].match_score));
    }

    #[test]
    fn test_pinned_jitter_is_deterministic() {
        let catalog = builtin();
        let history = TravelHistory::default();
        let engine = ScoringEngine::new(&catalog, &history);
        let filters = FilterCriteria {
            weather_importance: true,
            ..Default::default()
        };

        let first = engine.rank(&filters, "", Season::Summer, &mut FixedJitter(0.0));
        let second = engine.rank(&filters, "", Season::Summer, &mut FixedJitter(0.0));
        assert_eq!(first, second);
    }

    #[test]
    fn test_duration_proximity_bonus() {
        let mut near = sample_destination("near");
        near.duration_range = DurationRange {
            min_days: 6,
            max_days: 8,
        };
        let mut far = sample_destination("far");
        far.duration_range = DurationRange {
            min_days: 2,
            max_days: 3,
        };
        let catalog = catalog_of(vec![near, far]);
        let history = TravelHistory::default();
        assert_eq!(history.average_trip_duration_days, 7);

        let engine = ScoringEngine::new(&catalog, &history);
        let filters = neutral_filters();
        let near_score = engine.base_score(&catalog.all()[0], &filters, true, Season::Summer);
        let far_score = engine.base_score(&catalog.all()[1], &filters, true, Season::Summer);

        assert_eq!(near_score, BASE_SCORE + 10.0);
        assert_eq!(far_score, BASE_SCORE);
    }

    #[test]
    fn test_visited_country_penalty_only_without_query() {
        let catalog = catalog_of(vec![sample_destination("a")]);
        let mut history = neutral_history();
        history.visited_countries.insert("testland".into());
        let engine = ScoringEngine::new(&catalog, &history);
        let filters = neutral_filters();
        let d = &catalog.all()[0];

        assert_eq!(engine.base_score(d, &filters, true, Season::Summer), BASE_SCORE - 10.0);
        assert_eq!(engine.base_score(d, &filters, false, Season::Summer), BASE_SCORE);
    }

    #[test]
    fn test_season_bonus_requires_best_time_and_history() {
        let catalog = catalog_of(vec![sample_destination("a")]);
        let d = &catalog.all()[0];
        let filters = neutral_filters();

        let mut history = neutral_history();
        history.seasonal_preferences.insert(Season::Spring, 5);
        history.seasonal_preferences.insert(Season::Summer, 1);
        let engine = ScoringEngine::new(&catalog, &history);

        // best_time "April to June" mentions spring and summer months
        assert_eq!(engine.base_score(d, &filters, true, Season::Spring), BASE_SCORE + 8.0);
        // Summer is mentioned but not the favored season
        assert_eq!(engine.base_score(d, &filters, true, Season::Summer), BASE_SCORE);
        // Favored history, but winter is not mentioned
        assert_eq!(engine.base_score(d, &filters, true, Season::Winter), BASE_SCORE);
    }

    #[test]
    fn test_weather_and_safety_weights() {
        let mut d = sample_destination("a");
        d.weather_score = 90;
        d.safety_rating = 100;
        let catalog = catalog_of(vec![d]);
        let history = neutral_history();
        let engine = ScoringEngine::new(&catalog, &history);

        let filters = FilterCriteria {
            weather_importance: true,
            safety_importance: true,
            ..neutral_filters()
        };
        let score = engine.base_score(&catalog.all()[0], &filters, true, Season::Summer);
        // 70 + (90 - 70) * 0.3 + (100 - 80) * 0.2
        assert!((score - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_avoid_crowds_adjustments() {
        let mut quiet = sample_destination("quiet");
        quiet.tourist_season = TouristSeason::Low;
        let mut busy = sample_destination("busy");
        busy.tourist_season = TouristSeason::High;
        let normal = sample_destination("normal");
        let catalog = catalog_of(vec![quiet, busy, normal]);
        let history = neutral_history();
        let engine = ScoringEngine::new(&catalog, &history);
        let filters = FilterCriteria {
            avoid_crowds: true,
            ..neutral_filters()
        };

        let scores: Vec<f64> = catalog
            .all()
            .iter()
            .map(|d| engine.base_score(d, &filters, true, Season::Summer))
            .collect();
        assert_eq!(scores, vec![BASE_SCORE + 10.0, BASE_SCORE - 5.0, BASE_SCORE]);
    }

    #[test]
    fn test_desired_duration_and_preferred_category_bonuses() {
        let catalog = catalog_of(vec![sample_destination("a")]);
        let mut history = neutral_history();
        history.preferred_categories.insert(Category::Cultural, 1);
        let engine = ScoringEngine::new(&catalog, &history);
        let filters = FilterCriteria {
            desired_duration_days: 5,
            ..Default::default()
        };

        let score = engine.base_score(&catalog.all()[0], &filters, true, Season::Summer);
        assert_eq!(score, BASE_SCORE + 15.0 + 15.0);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = catalog_of(vec![
            sample_destination("first"),
            sample_destination("second"),
            sample_destination("third"),
        ]);
        let history = neutral_history();
        let results = ScoringEngine::new(&catalog, &history).rank(
            &neutral_filters(),
            "",
            Season::Summer,
            &mut FixedJitter(0.0),
        );
        let ids: Vec<&str> = results.iter().map(|r| r.destination.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_empty_catalog_yields_empty_result() {
        let catalog = DestinationCatalog::default();
        let history = TravelHistory::default();
        let results = ScoringEngine::new(&catalog, &history).rank(
            &FilterCriteria::default(),
            "",
            Season::Summer,
            &mut RandomJitter::new(),
        );
        assert!(results.is_empty());
    }

    #[test]
    fn test_random_jitter_range() {
        let mut jitter = RandomJitter::with_seed(42);
        for _ in 0..1000 {
            let j = jitter.next_jitter();
            assert!((0.0..MAX_JITTER).contains(&j));
        }
        assert!(FixedJitter(25.0).next_jitter() < MAX_JITTER);
        assert_eq!(FixedJitter(-1.0).next_jitter(), 0.0);
    }
}
