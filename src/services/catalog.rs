use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use crate::models::Destination;

/// Destinations shipped with the service
const BUILTIN_CATALOG: &str = include_str!("../../data/destinations.json");

/// Reasons a catalog is refused at load time
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("destination '{id}' has an empty {field}")]
    EmptyField { id: String, field: &'static str },
    #[error("destination '{id}' has invalid duration range {min_days}..{max_days}")]
    InvalidDuration {
        id: String,
        min_days: u32,
        max_days: u32,
    },
    #[error("destination '{id}' has {field} {value} above 100")]
    ScoreOutOfRange {
        id: String,
        field: &'static str,
        value: u8,
    },
    #[error("destination '{id}' has out-of-range coordinates")]
    InvalidCoordinates { id: String },
    #[error("duplicate destination id '{0}'")]
    DuplicateId(String),
}

/// Immutable, validated list of candidate destinations.
///
/// Built once at start-up and shared behind an `Arc`; nothing mutates it afterwards.
#[derive(Debug, Clone, Default)]
pub struct DestinationCatalog {
    destinations: Vec<Destination>,
}

impl DestinationCatalog {
    /// Validates every entry, rejecting the whole catalog on the first bad one
    pub fn new(destinations: Vec<Destination>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for destination in &destinations {
            validate(destination)?;
            if !seen.insert(destination.id.as_str()) {
                return Err(CatalogError::DuplicateId(destination.id.clone()));
            }
        }

        Ok(Self { destinations })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let destinations: Vec<Destination> = serde_json::from_str(json)?;
        Self::new(destinations)
    }

    /// The catalog compiled into the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Loads from `path` when given, otherwise the built-in catalog
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let catalog = match path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                Self::from_json(&json)?
            }
            None => Self::builtin()?,
        };

        tracing::info!(destinations = catalog.len(), "Destination catalog loaded");
        Ok(catalog)
    }

    pub fn all(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn get(&self, id: &str) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

fn validate(destination: &Destination) -> Result<(), CatalogError> {
    let id = || destination.id.clone();

    let required = [
        ("id", &destination.id),
        ("name", &destination.name),
        ("country", &destination.country),
        ("region", &destination.region),
        ("description", &destination.description),
        ("best_time", &destination.best_time),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(CatalogError::EmptyField { id: id(), field });
        }
    }

    let range = destination.duration_range;
    if range.min_days == 0 || range.min_days > range.max_days {
        return Err(CatalogError::InvalidDuration {
            id: id(),
            min_days: range.min_days,
            max_days: range.max_days,
        });
    }

    let scores = [
        ("weather_score", destination.weather_score),
        ("popularity_score", destination.popularity_score),
        ("safety_rating", destination.safety_rating),
    ];
    for (field, value) in scores {
        if value > 100 {
            return Err(CatalogError::ScoreOutOfRange {
                id: id(),
                field,
                value,
            });
        }
    }

    if !destination.coordinates.is_valid() {
        return Err(CatalogError::InvalidCoordinates { id: id() });
    }

    Ok(())
}
