use crate::client::api::ApiClient;
use crate::client::state::{SubmitState, UpdateRecipeController};
use crate::shared::error::{ClientError, Result};
use crate::shared::recipe::Recipe;
use crate::shared::validation::{format_duration, instruction_steps};

/// Recipe detail screen
#[derive(Debug, Clone, Default)]
pub struct RecipeDetailController {
    recipe: Option<Recipe>,
    state: SubmitState,
}

impl RecipeDetailController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    pub async fn load(&mut self, api: &ApiClient, id: &str) -> Result<()> {
        self.state.start()?;
        let result = api.get_recipe(id).await;
        let recipe = self.state.finish(result)?;
        self.recipe = Some(recipe);
        Ok(())
    }

    /// Show a recipe that was fetched elsewhere, e.g. after an update
    pub fn replace(&mut self, recipe: Recipe) {
        self.recipe = Some(recipe);
    }

    /// Delete the shown recipe
    ///
    /// On failure the recipe stays on screen with the error so the user keeps
    /// their place.
    pub async fn delete(&mut self, api: &ApiClient) -> Result<()> {
        let id = match &self.recipe {
            Some(recipe) => recipe.id.clone(),
            None => {
                return Err(self
                    .state
                    .fail(ClientError::validation("id", "No recipe is loaded.")))
            }
        };

        self.state.start()?;
        let result = api.delete_recipe(&id).await;
        self.state.finish(result)?;

        tracing::info!("Recipe {} deleted", id);
        self.recipe = None;
        Ok(())
    }

    /// Update screen pre-filled with the shown recipe
    pub fn edit(&self) -> Option<UpdateRecipeController> {
        self.recipe.as_ref().map(UpdateRecipeController::new)
    }

    pub fn prep_time_text(&self) -> String {
        self.recipe
            .as_ref()
            .map_or_else(|| "N/A".to_string(), |r| format_duration(&r.prep_time))
    }

    pub fn cooking_time_text(&self) -> String {
        self.recipe
            .as_ref()
            .map_or_else(|| "N/A".to_string(), |r| format_duration(&r.cooking_time))
    }

    pub fn ingredients(&self) -> Vec<String> {
        self.recipe
            .as_ref()
            .map(Recipe::ingredient_list)
            .unwrap_or_default()
    }

    pub fn steps(&self) -> Vec<String> {
        self.recipe
            .as_ref()
            .map(|r| instruction_steps(&r.instructions))
            .unwrap_or_default()
    }
}
