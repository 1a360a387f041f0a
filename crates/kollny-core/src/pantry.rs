//! Pantry normalization and request validation.
//!
//! Raw client input arrives as JSON; [`parse_query`] checks its shape and
//! produces a [`PantryQuery`] whose ingredient list is already normalized.

use serde_json::Value;
use std::collections::HashSet;

use crate::error::QueryError;
use crate::models::{Difficulty, PantryQuery};

/// Trim, lower-case, and drop blank or repeated ingredient names.
///
/// Order of first occurrence is kept so the search log mirrors what the
/// client sent.
pub fn normalize_ingredients<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in raw {
        let name = item.as_ref().trim().to_lowercase();
        if name.is_empty() {
            continue;
        }
        if seen.insert(name.clone()) {
            out.push(name);
        }
    }
    out
}

/// Validate a JSON request body and normalize it into a [`PantryQuery`].
///
/// `ingredients` is required and must be an array of strings. `healthy_only`
/// defaults to `false`. `difficulty` may be absent, `null`, or an empty
/// string (all meaning "no filter"), otherwise it must name a [`Difficulty`].
pub fn parse_query(body: &Value) -> Result<PantryQuery, QueryError> {
    let obj = body.as_object().ok_or(QueryError::BodyNotObject)?;

    let raw_ingredients = match obj.get("ingredients") {
        None => return Err(QueryError::MissingIngredients),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(QueryError::IngredientsNotStrings),
    };
    let names = raw_ingredients
        .iter()
        .map(|v| v.as_str().ok_or(QueryError::IngredientsNotStrings))
        .collect::<Result<Vec<&str>, _>>()?;

    let healthy_only = match obj.get("healthy_only") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => return Err(QueryError::InvalidHealthyOnly),
    };

    let difficulty = match obj.get("difficulty") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.parse::<Difficulty>()?),
        Some(other) => return Err(QueryError::InvalidDifficulty(other.to_string())),
    };

    Ok(PantryQuery {
        ingredients: normalize_ingredients(names),
        healthy_only,
        difficulty,
    })
}
