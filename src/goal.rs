//! Goal descriptors and category classification
//!
//! A goal is the user's input (title, category, free-text description) and is
//! read-only to the engine - it is supplied by the persistence layer and
//! never mutated here.

use serde::{Deserialize, Serialize};

/// A user goal as stored by the persistence layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalDescriptor {
    pub title: String,
    /// Free-form category label. Known values map to curated fallback
    /// templates via [`GoalCategory::parse`]; anything else gets the
    /// default template.
    pub category: String,
    /// May be empty - the prompt builder substitutes a placeholder.
    #[serde(default)]
    pub description: String,
}

impl GoalDescriptor {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            description: description.into(),
        }
    }

    /// Classify this goal's category label
    pub fn category(&self) -> GoalCategory {
        GoalCategory::parse(&self.category)
    }
}

/// Closed set of categories with curated fallback templates
///
/// Parsing is case-insensitive; unrecognized labels become `Other`, which is
/// a valid outcome (it selects the default template), not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalCategory {
    Travel,
    Skill,
    Health,
    Culture,
    Other,
}

impl GoalCategory {
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "TRAVEL" => Self::Travel,
            "SKILL" => Self::Skill,
            "HEALTH" => Self::Health,
            "CULTURE" => Self::Culture,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Travel => "TRAVEL",
            Self::Skill => "SKILL",
            Self::Health => "HEALTH",
            Self::Culture => "CULTURE",
            Self::Other => "OTHER",
        }
    }
}
