//! Recipe matching, ranking, and filtering.
//!
//! Pure functions over a catalog slice; no I/O and no shared state.
//!
//! # Matching Algorithm
//!
//! 1. Normalize the pantry to a set of trimmed, lower-cased, non-empty names.
//! 2. For each catalog entry, collect the ingredients whose lower-case form is
//!    not in the pantry (catalog order and casing preserved).
//! 3. Keep the entry iff `missing <= ingredients / 2` (integer division).
//! 4. Stable-sort by missing count (asc), then cooking time (asc). Catalog
//!    declaration order breaks any remaining tie.
//! 5. Apply the difficulty and healthy-only filters, preserving order.

use std::collections::HashSet;

use crate::models::{Difficulty, PantryQuery, RecipeEntry, RecipeResult};
use crate::pantry::normalize_ingredients;

/// Match a pantry against `catalog`, returning ranked results.
///
/// Never fails: an empty pantry simply yields the entries that satisfy the
/// half-coverage rule with nothing available (none, for any entry with two
/// or more ingredients).
pub fn match_recipes<I, S>(catalog: &[RecipeEntry], pantry: I) -> Vec<RecipeResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let pantry: HashSet<String> = normalize_ingredients(pantry).into_iter().collect();

    let mut results: Vec<RecipeResult> = catalog
        .iter()
        .filter_map(|entry| {
            let missing = missing_ingredients(entry, &pantry);
            if missing.len() <= entry.ingredients.len() / 2 {
                Some(RecipeResult::from_entry(entry, missing))
            } else {
                None
            }
        })
        .collect();

    // `sort_by_key` is stable, so catalog order survives equal keys.
    results.sort_by_key(|r| (r.missing_ingredients.len(), r.cooking_time_minutes));
    results
}

/// Catalog ingredients of `entry` absent from the normalized `pantry`.
pub fn missing_ingredients(entry: &RecipeEntry, pantry: &HashSet<String>) -> Vec<String> {
    entry
        .ingredients
        .iter()
        .filter(|ing| !pantry.contains(&ing.to_lowercase()))
        .map(|ing| ing.to_string())
        .collect()
}

/// Keep results that satisfy the optional difficulty and healthy-only filters.
pub fn filter_results(
    results: Vec<RecipeResult>,
    difficulty: Option<Difficulty>,
    healthy_only: bool,
) -> Vec<RecipeResult> {
    results
        .into_iter()
        .filter(|r| difficulty.map_or(true, |d| r.difficulty == d))
        .filter(|r| !healthy_only || r.is_healthy)
        .collect()
}

/// Run the full pipeline for a validated query: match, rank, then filter.
///
/// This is the function every frontend (HTTP, CLI) delegates to.
pub fn search(catalog: &[RecipeEntry], query: &PantryQuery) -> Vec<RecipeResult> {
    let ranked = match_recipes(catalog, &query.ingredients);
    filter_results(ranked, query.difficulty, query.healthy_only)
}
