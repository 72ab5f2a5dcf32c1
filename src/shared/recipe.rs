//! Recipe data structures
//!
//! `Recipe` is what the server returns; `RecipeFields` is what the client
//! submits when creating or updating one.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::shared::validation::split_ingredients;

/// Recipe category
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    Breakfast,
    Lunch,
    Dinner,
    Dessert,
}

impl Category {
    /// All categories in menu order
    pub fn all() -> Vec<Category> {
        Category::iter().collect()
    }

    /// Whether a raw category string names this category
    pub fn matches(&self, raw: &str) -> bool {
        raw.trim().eq_ignore_ascii_case(&self.to_string())
    }
}

/// A recipe as stored on the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Recipe name
    pub recipe: String,
    /// Kept as sent by the server; see [`Recipe::category_kind`]
    pub category: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub servings: u32,
    pub prep_time: String,
    pub cooking_time: String,
    #[serde(default)]
    pub instructions: String,
}

impl Recipe {
    /// Parsed category, if the server value is one of the known ones
    pub fn category_kind(&self) -> Option<Category> {
        self.category.trim().parse().ok()
    }

    pub fn matches_category(&self, category: Category) -> bool {
        category.matches(&self.category)
    }

    /// Case-insensitive substring match on the recipe name
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.recipe.to_lowercase().contains(&query.to_lowercase())
    }

    /// Ingredients flattened into trimmed items
    ///
    /// Entries may themselves hold comma separated lists.
    pub fn ingredient_list(&self) -> Vec<String> {
        split_ingredients(&self.ingredients.join(","))
    }
}

/// Fields submitted to create or update a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeFields {
    pub recipe: String,
    pub category: Category,
    pub ingredients: Vec<String>,
    pub servings: u32,
    pub prep_time: String,
    pub cooking_time: String,
    pub instructions: String,
}

impl RecipeFields {
    /// Text fields as `(name, value)` pairs for form submissions
    pub fn form_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("recipe", self.recipe.clone()),
            ("category", self.category.to_string()),
            ("ingredients", self.ingredients.join(", ")),
            ("servings", self.servings.to_string()),
            ("prepTime", self.prep_time.clone()),
            ("cookingTime", self.cooking_time.clone()),
            ("instructions", self.instructions.clone()),
        ]
    }
}
