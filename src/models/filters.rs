use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{BudgetTier, Category};
use crate::error::AppError;

/// Longest stay a caller may ask for
pub const MAX_DESIRED_DURATION_DAYS: i64 = 365;

fn default_budget_tier() -> String {
    "any".to_string()
}

fn default_desired_duration_days() -> i64 {
    7
}

/// Filter criteria exactly as received from a caller, before validation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterCriteriaInput {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default = "default_budget_tier")]
    pub budget_tier: String,
    #[serde(default)]
    pub accessibility_needed: bool,
    #[serde(default)]
    pub weather_importance: bool,
    #[serde(default)]
    pub safety_importance: bool,
    #[serde(default)]
    pub avoid_crowds: bool,
    #[serde(default = "default_desired_duration_days")]
    pub desired_duration_days: i64,
}

impl Default for FilterCriteriaInput {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            budget_tier: default_budget_tier(),
            accessibility_needed: false,
            weather_importance: false,
            safety_importance: false,
            avoid_crowds: false,
            desired_duration_days: default_desired_duration_days(),
        }
    }
}

/// Budget constraint: either unconstrained or one exact tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetFilter {
    Any,
    Exactly(BudgetTier),
}

impl BudgetFilter {
    pub fn allows(&self, tier: BudgetTier) -> bool {
        match self {
            BudgetFilter::Any => true,
            BudgetFilter::Exactly(wanted) => *wanted == tier,
        }
    }
}

/// Validated per-request filters; only obtainable through `TryFrom`
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub categories: BTreeSet<Category>,
    pub budget_tier: BudgetFilter,
    pub accessibility_needed: bool,
    pub weather_importance: bool,
    pub safety_importance: bool,
    pub avoid_crowds: bool,
    pub desired_duration_days: u32,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            categories: BTreeSet::new(),
            budget_tier: BudgetFilter::Any,
            accessibility_needed: false,
            weather_importance: false,
            safety_importance: false,
            avoid_crowds: false,
            desired_duration_days: default_desired_duration_days() as u32,
        }
    }
}

impl TryFrom<FilterCriteriaInput> for FilterCriteria {
    type Error = AppError;

    fn try_from(input: FilterCriteriaInput) -> Result<Self, Self::Error> {
        let categories = input
            .categories
            .iter()
            .map(|c| c.parse::<Category>())
            .collect::<Result<BTreeSet<_>, _>>()
            .map_err(|msg| AppError::validation("categories", msg))?;

        let budget_tier = if input.budget_tier.trim().eq_ignore_ascii_case("any") {
            BudgetFilter::Any
        } else {
            input
                .budget_tier
                .parse::<BudgetTier>()
                .map(BudgetFilter::Exactly)
                .map_err(|msg| AppError::validation("budget_tier", msg))?
        };

        if input.desired_duration_days <= 0 {
            return Err(AppError::validation(
                "desired_duration_days",
                format!("must be positive, got {}", input.desired_duration_days),
            ));
        }
        if input.desired_duration_days > MAX_DESIRED_DURATION_DAYS {
            return Err(AppError::validation(
                "desired_duration_days",
                format!(
                    "must be at most {}, got {}",
                    MAX_DESIRED_DURATION_DAYS, input.desired_duration_days
                ),
            ));
        }

        Ok(Self {
            categories,
            budget_tier,
            accessibility_needed: input.accessibility_needed,
            weather_importance: input.weather_importance,
            safety_importance: input.safety_importance,
            avoid_crowds: input.avoid_crowds,
            desired_duration_days: input.desired_duration_days as u32,
        })
    }
}
