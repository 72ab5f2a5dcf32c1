use crate::client::api::ApiClient;
use crate::client::state::SubmitState;
use crate::client::types::RecipeQuery;
use crate::shared::error::Result;
use crate::shared::recipe::{Category, Recipe};

/// Recipe list for one category
///
/// Pages are requested with the category as a query parameter. The search box
/// filters the recipes already loaded, by name.
#[derive(Debug, Clone)]
pub struct RecipeListController {
    category: Option<Category>,
    search: String,
    recipes: Vec<Recipe>,
    page: u32,
    page_size: u32,
    has_more: bool,
    state: SubmitState,
}

impl RecipeListController {
    pub fn new(category: Option<Category>, page_size: u32) -> Self {
        Self {
            category,
            search: String::new(),
            recipes: Vec::new(),
            page: 0,
            page_size: page_size.max(1),
            has_more: false,
            state: SubmitState::Idle,
        }
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// Last page loaded; 0 before the first load
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Every recipe loaded so far
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Loaded recipes that match the search text
    pub fn visible(&self) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|recipe| recipe.matches_search(&self.search))
            .collect()
    }

    fn query(&self, page: u32) -> RecipeQuery {
        let query = RecipeQuery::new(self.page_size).page(page);
        match self.category {
            Some(category) => query.category(category),
            None => query,
        }
    }

    /// Load the first page, replacing whatever was shown
    ///
    /// Called whenever the screen gains focus. On failure the previous list
    /// stays in place.
    pub async fn refresh(&mut self, api: &ApiClient) -> Result<()> {
        self.state.start()?;
        let result = api.list_recipes(&self.query(1)).await;
        let page = self.state.finish(result)?;

        tracing::debug!(count = page.recipes.len(), "Recipe list refreshed");
        self.recipes = page.recipes;
        self.page = page.page;
        self.has_more = page.has_more;
        Ok(())
    }

    /// Append the next page when the end of the list is reached
    ///
    /// Returns `false` without a request when there is nothing more to load
    /// or a load is already running.
    pub async fn load_more(&mut self, api: &ApiClient) -> Result<bool> {
        if !self.has_more || self.state.is_submitting() {
            return Ok(false);
        }

        self.state.start()?;
        let result = api.list_recipes(&self.query(self.page + 1)).await;
        let page = self.state.finish(result)?;

        tracing::debug!(page = page.page, count = page.recipes.len(), "Recipe page appended");
        self.recipes.extend(page.recipes);
        self.page = page.page;
        self.has_more = page.has_more;
        Ok(true)
    }
}
