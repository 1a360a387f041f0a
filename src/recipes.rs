//! Terminal frontends for the matcher: `kollny recipes` and `kollny catalog`.

use anyhow::Result;

use kollny_core::catalog::CATALOG;
use kollny_core::models::{Difficulty, PantryQuery, RecipeResult};
use kollny_core::pantry::normalize_ingredients;
use kollny_core::search::search;

/// Build a query from CLI arguments.
pub fn build_query(
    ingredients: &[String],
    difficulty: Option<&str>,
    healthy_only: bool,
) -> Result<PantryQuery> {
    let difficulty = match difficulty {
        Some(d) if !d.is_empty() => Some(d.parse::<Difficulty>()?),
        _ => None,
    };
    Ok(PantryQuery {
        ingredients: normalize_ingredients(ingredients),
        healthy_only,
        difficulty,
    })
}

pub fn run_recipes(ingredients: &[String], difficulty: Option<&str>, healthy_only: bool) -> Result<()> {
    let query = build_query(ingredients, difficulty, healthy_only)?;
    let results = search(CATALOG, &query);

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, result) in results.iter().enumerate() {
        print_result(i + 1, result);
    }
    Ok(())
}

fn print_result(rank: usize, result: &RecipeResult) {
    println!(
        "{}. {} [{} min, {}{}]",
        rank,
        result.title,
        result.cooking_time_minutes,
        result.difficulty,
        if result.is_healthy { ", healthy" } else { "" }
    );
    if result.missing_ingredients.is_empty() {
        println!("    missing: none");
    } else {
        println!("    missing: {}", result.missing_ingredients.join(", "));
    }
    for (n, step) in result.steps.iter().enumerate() {
        println!("    {}) {}", n + 1, step);
    }
    println!();
}

pub fn list_catalog() -> Result<()> {
    println!("{:<26} {:<8} {:>5} HEALTHY", "TITLE", "LEVEL", "MIN");
    for entry in CATALOG {
        println!(
            "{:<26} {:<8} {:>5} {}",
            entry.title, entry.difficulty, entry.cooking_time_minutes, entry.is_healthy
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_normalizes_and_parses() {
        let q = build_query(&[" Eggs".to_string(), "eggs".to_string()], Some("hard"), true).unwrap();
        assert_eq!(q.ingredients, vec!["eggs"]);
        assert_eq!(q.difficulty, Some(Difficulty::Hard));
        assert!(q.healthy_only);
    }

    #[test]
    fn test_build_query_rejects_unknown_difficulty() {
        let err = build_query(&[], Some("extreme"), false).unwrap_err();
        assert!(err.to_string().contains("easy|medium|hard"));
    }
}
