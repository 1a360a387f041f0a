//! The static recipe catalog.
//!
//! Declaration order is significant: it is the final tie-break when two
//! matches have the same missing-ingredient count and cooking time.

use crate::models::{Difficulty, RecipeEntry};

pub static CATALOG: &[RecipeEntry] = &[
    RecipeEntry {
        title: "Veggie Omelette",
        ingredients: &[
            "eggs",
            "onion",
            "tomato",
            "spinach",
            "olive oil",
            "salt",
            "pepper",
        ],
        steps: &[
            "Whisk eggs with salt and pepper",
            "Saute onion, tomato, spinach in olive oil",
            "Pour eggs and cook until set",
        ],
        cooking_time_minutes: 10,
        difficulty: Difficulty::Easy,
        is_healthy: true,
    },
    RecipeEntry {
        title: "Garlic Butter Pasta",
        ingredients: &[
            "pasta",
            "garlic",
            "butter",
            "olive oil",
            "salt",
            "pepper",
            "parsley",
        ],
        steps: &[
            "Boil pasta until al dente",
            "Saute garlic in butter and olive oil",
            "Toss pasta with sauce and parsley",
        ],
        cooking_time_minutes: 15,
        difficulty: Difficulty::Easy,
        is_healthy: false,
    },
    RecipeEntry {
        title: "Chickpea Salad",
        ingredients: &[
            "chickpeas",
            "cucumber",
            "tomato",
            "onion",
            "lemon",
            "olive oil",
            "salt",
            "pepper",
        ],
        steps: &[
            "Chop vegetables",
            "Mix with chickpeas, lemon juice and olive oil",
            "Season and serve",
        ],
        cooking_time_minutes: 8,
        difficulty: Difficulty::Easy,
        is_healthy: true,
    },
    RecipeEntry {
        title: "One-Pan Chicken & Rice",
        ingredients: &[
            "chicken",
            "rice",
            "onion",
            "garlic",
            "paprika",
            "salt",
            "pepper",
            "olive oil",
        ],
        steps: &[
            "Brown chicken",
            "Saute aromatics",
            "Add rice and water, simmer until cooked",
        ],
        cooking_time_minutes: 35,
        difficulty: Difficulty::Medium,
        is_healthy: true,
    },
    RecipeEntry {
        title: "Peanut Stir-Fry",
        ingredients: &[
            "noodles",
            "soy sauce",
            "garlic",
            "ginger",
            "peanut butter",
            "mixed vegetables",
            "oil",
        ],
        steps: &[
            "Stir-fry vegetables with garlic and ginger",
            "Add cooked noodles, soy sauce and peanut butter",
            "Toss to coat",
        ],
        cooking_time_minutes: 15,
        difficulty: Difficulty::Medium,
        is_healthy: false,
    },
    RecipeEntry {
        title: "Baked Oats",
        ingredients: &[
            "oats",
            "banana",
            "milk",
            "honey",
            "baking powder",
            "cinnamon",
        ],
        steps: &["Blend ingredients", "Bake until set"],
        cooking_time_minutes: 20,
        difficulty: Difficulty::Easy,
        is_healthy: true,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_titles_are_unique() {
        let titles: HashSet<&str> = CATALOG.iter().map(|r| r.title).collect();
        assert_eq!(titles.len(), CATALOG.len());
    }

    #[test]
    fn test_every_entry_has_at_least_two_ingredients() {
        // An empty pantry must match nothing, which requires len/2 < len.
        for entry in CATALOG {
            assert!(entry.ingredients.len() >= 2, "{}", entry.title);
            assert!(!entry.steps.is_empty(), "{}", entry.title);
        }
    }
}
