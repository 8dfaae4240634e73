use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use super::GeoPoint;

/// Kind of travel experience a destination offers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cultural,
    Nature,
    Adventure,
    Beach,
    City,
    Mountain,
    Wellness,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Cultural,
        Category::Nature,
        Category::Adventure,
        Category::Beach,
        Category::City,
        Category::Mountain,
        Category::Wellness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cultural => "cultural",
            Category::Nature => "nature",
            Category::Adventure => "adventure",
            Category::Beach => "beach",
            Category::City => "city",
            Category::Mountain => "mountain",
            Category::Wellness => "wellness",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// Price level of a destination
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Low,
    Medium,
    High,
}

impl FromStr for BudgetTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(BudgetTier::Low),
            "medium" => Ok(BudgetTier::Medium),
            "high" => Ok(BudgetTier::High),
            other => Err(format!("unknown budget tier '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Challenging,
}

/// How crowded a destination typically is
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TouristSeason {
    Low,
    Medium,
    High,
}

/// Recommended stay length in days, inclusive on both ends
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DurationRange {
    pub min_days: u32,
    pub max_days: u32,
}

impl DurationRange {
    pub fn contains(&self, days: u32) -> bool {
        (self.min_days..=self.max_days).contains(&days)
    }
}

/// A static catalog entry describing a travel destination candidate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub country: String,
    pub region: String,
    pub category: Category,
    pub description: String,
    pub highlights: Vec<String>,
    /// Free text such as "April to June, September to October"
    pub best_time: String,
    pub duration_range: DurationRange,
    pub difficulty: Difficulty,
    pub budget_tier: BudgetTier,
    pub rating: f32,
    pub coordinates: GeoPoint,
    /// 0-100
    pub weather_score: u8,
    /// 0-100
    pub popularity_score: u8,
    pub activities: Vec<String>,
    pub cuisine: Vec<String>,
    /// 0-100
    pub safety_rating: u8,
    pub tourist_season: TouristSeason,
    pub accessibility: bool,
    /// Rough total trip cost in USD
    pub estimated_cost: u32,
}

impl Destination {
    /// Lowercased text searched by free-text queries
    pub fn search_text(&self) -> String {
        let mut text = format!(
            "{} {} {} {}",
            self.name, self.country, self.region, self.description
        );
        for activity in &self.activities {
            text.push(' ');
            text.push_str(activity);
        }
        text.to_lowercase()
    }
}

/// A destination with its per-request match score
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredDestination {
    #[serde(flatten)]
    pub destination: Destination,
    /// 0-100
    pub match_score: u8,
}
