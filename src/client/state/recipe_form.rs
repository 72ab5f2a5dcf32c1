//! Add and update recipe screens
//!
//! Both screens edit the same set of fields through [`RecipeForm`], which
//! keeps the raw text the user typed alongside per-field error messages.

use crate::client::api::ApiClient;
use crate::client::state::SubmitState;
use crate::shared::error::{ClientError, Result};
use crate::shared::recipe::{Category, Recipe, RecipeFields};
use crate::shared::validation::{
    parse_servings, required_fields_present, split_ingredients, time_error, validate_servings,
    validate_time, SERVINGS_MESSAGE, TIME_FORMAT_MESSAGE,
};

/// Raw recipe form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeForm {
    pub recipe: String,
    /// Comma separated
    pub ingredients: String,
    pub servings: String,
    pub prep_time: String,
    pub cooking_time: String,
    /// Period separated steps
    pub instructions: String,
    pub category: Option<Category>,
    servings_error: Option<&'static str>,
    prep_time_error: Option<&'static str>,
    cooking_time_error: Option<&'static str>,
}

impl RecipeForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from an existing recipe
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            recipe: recipe.recipe.clone(),
            ingredients: recipe.ingredient_list().join(", "),
            servings: recipe.servings.to_string(),
            prep_time: recipe.prep_time.clone(),
            cooking_time: recipe.cooking_time.clone(),
            instructions: recipe.instructions.clone(),
            category: recipe.category_kind(),
            ..Self::default()
        }
    }

    pub fn set_recipe(&mut self, name: impl Into<String>) {
        self.recipe = name.into();
    }

    pub fn set_ingredients(&mut self, ingredients: impl Into<String>) {
        self.ingredients = ingredients.into();
    }

    pub fn set_instructions(&mut self, instructions: impl Into<String>) {
        self.instructions = instructions.into();
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = Some(category);
    }

    pub fn set_servings(&mut self, servings: impl Into<String>) {
        self.servings = servings.into();
        self.servings_error = if self.servings.is_empty() || validate_servings(&self.servings) {
            None
        } else {
            Some(SERVINGS_MESSAGE)
        };
    }

    pub fn set_prep_time(&mut self, time: impl Into<String>) {
        self.prep_time = time.into();
        self.prep_time_error = time_error(&self.prep_time);
    }

    pub fn set_cooking_time(&mut self, time: impl Into<String>) {
        self.cooking_time = time.into();
        self.cooking_time_error = time_error(&self.cooking_time);
    }

    pub fn servings_error(&self) -> Option<&'static str> {
        self.servings_error
    }

    pub fn prep_time_error(&self) -> Option<&'static str> {
        self.prep_time_error
    }

    pub fn cooking_time_error(&self) -> Option<&'static str> {
        self.cooking_time_error
    }

    /// Check every field and produce the submission
    pub fn validate(&self) -> Result<RecipeFields> {
        let category = self.category.map(|c| c.to_string()).unwrap_or_default();
        required_fields_present(&[
            ("recipe", self.recipe.as_str()),
            ("ingredients", self.ingredients.as_str()),
            ("servings", self.servings.as_str()),
            ("prepTime", self.prep_time.as_str()),
            ("cookingTime", self.cooking_time.as_str()),
            ("instructions", self.instructions.as_str()),
            ("category", category.as_str()),
        ])?;

        let servings = parse_servings(self.servings.trim())
            .ok_or_else(|| ClientError::validation("servings", SERVINGS_MESSAGE))?;
        check_time("prepTime", &self.prep_time)?;
        check_time("cookingTime", &self.cooking_time)?;

        let ingredients = split_ingredients(&self.ingredients);
        if ingredients.is_empty() {
            return Err(ClientError::validation(
                "ingredients",
                "Add at least one ingredient.",
            ));
        }
        let category = self
            .category
            .ok_or_else(|| ClientError::validation("category", "Please select a category."))?;

        Ok(RecipeFields {
            recipe: self.recipe.trim().to_string(),
            category,
            ingredients,
            servings,
            prep_time: self.prep_time.clone(),
            cooking_time: self.cooking_time.clone(),
            instructions: self.instructions.trim().to_string(),
        })
    }

    /// Empty every field
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn check_time(field: &str, value: &str) -> Result<()> {
    if validate_time(value) {
        Ok(())
    } else {
        Err(ClientError::validation(
            field,
            time_error(value).unwrap_or(TIME_FORMAT_MESSAGE),
        ))
    }
}

/// Add recipe screen
#[derive(Debug, Clone, Default)]
pub struct AddRecipeController {
    pub form: RecipeForm,
    state: SubmitState,
}

impl AddRecipeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    /// Create the recipe; the form is cleared on success
    pub async fn submit(&mut self, api: &ApiClient) -> Result<()> {
        let fields = match self.form.validate() {
            Ok(fields) => fields,
            Err(err) => return Err(self.state.fail(err)),
        };

        self.state.start()?;
        let result = api.create_recipe(&fields).await;
        self.state.finish(result)?;

        tracing::info!("Recipe '{}' added", fields.recipe);
        self.form.clear();
        Ok(())
    }
}

/// Update recipe screen
#[derive(Debug, Clone)]
pub struct UpdateRecipeController {
    id: String,
    pub form: RecipeForm,
    updated: Option<Recipe>,
    state: SubmitState,
}

impl UpdateRecipeController {
    pub fn new(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.clone(),
            form: RecipeForm::from_recipe(recipe),
            updated: None,
            state: SubmitState::Idle,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    /// The recipe as stored after the last successful submit
    pub fn updated(&self) -> Option<&Recipe> {
        self.updated.as_ref()
    }

    pub async fn submit(&mut self, api: &ApiClient) -> Result<Recipe> {
        let fields = match self.form.validate() {
            Ok(fields) => fields,
            Err(err) => return Err(self.state.fail(err)),
        };

        self.state.start()?;
        let result = api.update_recipe(&self.id, &fields).await;
        let recipe = self.state.finish(result)?;

        tracing::info!("Recipe {} updated", self.id);
        self.form = RecipeForm::from_recipe(&recipe);
        self.updated = Some(recipe.clone());
        Ok(recipe)
    }
}
