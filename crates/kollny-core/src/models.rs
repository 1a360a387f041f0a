//! Core data models used throughout Kollny Express.
//!
//! These types represent the catalog entries, pantry queries, match results,
//! and search log records that flow through the matching pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QueryError;

/// Recipe difficulty as it appears on the wire (`"easy"`, `"medium"`, `"hard"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Parses the exact lower-case wire names. `"Easy"` is rejected, matching
/// the HTTP contract.
impl FromStr for Difficulty {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(QueryError::InvalidDifficulty(other.to_string())),
        }
    }
}

/// A recipe in the static catalog. Defined once in [`crate::catalog`] and
/// never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipeEntry {
    pub title: &'static str,
    pub ingredients: &'static [&'static str],
    pub steps: &'static [&'static str],
    pub cooking_time_minutes: u32,
    pub difficulty: Difficulty,
    pub is_healthy: bool,
}

/// A catalog entry annotated with the ingredients the pantry lacks.
///
/// Matches the `POST /api/recipes` response item shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeResult {
    pub title: String,
    pub ingredients: Vec<String>,
    pub missing_ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub cooking_time_minutes: u32,
    pub difficulty: Difficulty,
    pub is_healthy: bool,
}

impl RecipeResult {
    pub fn from_entry(entry: &RecipeEntry, missing_ingredients: Vec<String>) -> Self {
        Self {
            title: entry.title.to_string(),
            ingredients: entry.ingredients.iter().map(|s| s.to_string()).collect(),
            missing_ingredients,
            steps: entry.steps.iter().map(|s| s.to_string()).collect(),
            cooking_time_minutes: entry.cooking_time_minutes,
            difficulty: entry.difficulty,
            is_healthy: entry.is_healthy,
        }
    }
}

/// A validated, normalized search request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PantryQuery {
    /// Trimmed, lower-cased, non-empty ingredient names in first-seen order.
    pub ingredients: Vec<String>,
    pub healthy_only: bool,
    pub difficulty: Option<Difficulty>,
}

/// The document written to the `searchlog` collection after each search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLogRecord {
    pub ingredients: Vec<String>,
    pub healthy_only: bool,
    pub difficulty: Option<Difficulty>,
    pub results_count: usize,
    pub client: Option<String>,
}

impl SearchLogRecord {
    pub fn new(query: &PantryQuery, results_count: usize, client: Option<String>) -> Self {
        Self {
            ingredients: query.ingredients.clone(),
            healthy_only: query.healthy_only,
            difficulty: query.difficulty,
            results_count,
            client,
        }
    }
}
