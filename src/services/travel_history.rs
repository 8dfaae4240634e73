use chrono::{DateTime, Datelike, Duration, Utc};

use crate::models::{Photo, Season, TravelHistory, Trip, MONTH_NAMES};

/// City and country pulled out of a legacy "City, Country" string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLocation {
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Splits free text on commas: the first token is the city, the last the country.
///
/// This is a compatibility shim for unstructured data, not a real address parser.
/// A single token ends up as both city and country.
pub fn parse_location(text: &str) -> ParsedLocation {
    let tokens: Vec<&str> = text
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    ParsedLocation {
        city: tokens.first().map(|t| t.to_string()),
        country: tokens.last().map(|t| t.to_string()),
    }
}

impl Trip {
    /// Structured fields when present, otherwise the parsed free-text location
    pub fn resolved_location(&self) -> ParsedLocation {
        let parsed = parse_location(&self.location);
        let clean = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        ParsedLocation {
            city: clean(&self.city).or(parsed.city),
            country: clean(&self.country).or(parsed.country),
        }
    }

    /// Whole days between start and end, when both are set and ordered
    pub fn duration_days(&self) -> Option<i64> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if end >= start => Some((end - start).num_days()),
            _ => None,
        }
    }
}

/// Derives a travel profile from the full trip and photo collections.
///
/// Pure and infallible: empty inputs produce `TravelHistory::default()`.
pub fn aggregate(trips: &[Trip], photos: &[Photo], now: DateTime<Utc>) -> TravelHistory {
    let mut history = TravelHistory::default();

    for trip in trips {
        let location = trip.resolved_location();
        if let Some(country) = location.country {
            history.visited_countries.insert(country);
        }
        if let Some(city) = location.city {
            history.visited_cities.insert(city);
        }
    }

    let mut month_counts = [0u32; 12];
    for photo in photos {
        if let Some(label) = photo.label() {
            let location = parse_location(label);
            if let Some(country) = location.country {
                history.visited_countries.insert(country);
            }
            if let Some(city) = location.city {
                history.visited_cities.insert(city);
            }
        }

        let taken = photo.taken_at();
        *history
            .seasonal_preferences
            .entry(Season::from_month(taken.month()))
            .or_insert(0) += 1;
        month_counts[taken.month0() as usize] += 1;
    }

    if let Some(average) = average_trip_duration(trips) {
        history.average_trip_duration_days = average;
    }

    history.most_active_month = most_active_month(&month_counts);

    let today = now.date_naive();
    let year_ago = today - Duration::days(365);
    history.travel_frequency_last_year = trips
        .iter()
        .filter_map(|t| t.start_date)
        .filter(|start| *start >= year_ago && *start <= today)
        .count() as u32;

    tracing::debug!(
        trips = trips.len(),
        photos = photos.len(),
        countries = history.visited_countries.len(),
        cities = history.visited_cities.len(),
        average_trip_days = history.average_trip_duration_days,
        "Aggregated travel history"
    );

    history
}

fn average_trip_duration(trips: &[Trip]) -> Option<u32> {
    let durations: Vec<i64> = trips.iter().filter_map(Trip::duration_days).collect();
    if durations.is_empty() {
        return None;
    }

    let mean = durations.iter().sum::<i64>() as f64 / durations.len() as f64;
    Some(mean.round() as u32)
}

/// Month with the most photos; the earliest month wins a tie
fn most_active_month(counts: &[u32; 12]) -> Option<String> {
    let (index, &best) = counts
        .iter()
        .enumerate()
        .fold((0, &0), |acc, (i, c)| if *c > *acc.1 { (i, c) } else { acc });

    (best > 0).then(|| MONTH_NAMES[index].to_string())
}
