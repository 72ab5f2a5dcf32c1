/**
 * Wire Types Module
 *
 * Request and response bodies exchanged with the recipe API, plus the query
 * and page types used for listings.
 */

use serde::{Deserialize, Serialize};

use crate::shared::recipe::{Category, Recipe};

/// Body of login and registration requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Authentication response from server
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of a successful registration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegisterOutcome {
    /// Present when the server logs the new user in right away
    pub token: Option<String>,
}

/// Error body; the server uses either key
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// The first non-blank message, `error` preferred
    pub fn into_message(self) -> Option<String> {
        self.error
            .into_iter()
            .chain(self.message)
            .find(|m| !m.trim().is_empty())
    }
}

/// Listing response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRecipesResponse {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Parameters of a recipe listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeQuery {
    pub category: Option<Category>,
    pub search: Option<String>,
    /// 1-based page number
    pub page: u32,
    pub limit: u32,
}

impl RecipeQuery {
    pub fn new(limit: u32) -> Self {
        Self {
            category: None,
            search: None,
            page: 1,
            limit,
        }
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Blank searches are dropped
    pub fn search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.trim().is_empty() {
            None
        } else {
            Some(search.trim().to_string())
        };
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Query string pairs, in a stable order
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(category) = self.category {
            pairs.push(("category", category.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }

    /// Whether `recipe` satisfies the category and search filters
    pub fn matches(&self, recipe: &Recipe) -> bool {
        let category_ok = self
            .category
            .map_or(true, |category| recipe.matches_category(category));
        let search_ok = self
            .search
            .as_deref()
            .map_or(true, |search| recipe.matches_search(search));
        category_ok && search_ok
    }
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq)]
pub struct RecipePage {
    pub recipes: Vec<Recipe>,
    pub page: u32,
    pub limit: u32,
    pub has_more: bool,
}

impl RecipePage {
    /// Build a page from a raw response, filtering with `query`
    ///
    /// `page` is always the page that was requested; an echoed page number
    /// that disagrees is ignored. `has_more` is taken from the server's totals
    /// when present, otherwise a full page is assumed to have a successor.
    pub fn from_response(query: &RecipeQuery, response: ListRecipesResponse) -> Self {
        let page = query.page;
        if let Some(echoed) = response.page.filter(|echoed| *echoed != page) {
            tracing::debug!(requested = page, echoed, "Server echoed a different page");
        }
        let returned = response.recipes.len() as u64;
        let has_more = match (response.total_pages, response.total) {
            (Some(total_pages), _) => page < total_pages,
            (None, Some(total)) => u64::from(page) * u64::from(query.limit) < total,
            (None, None) => returned >= u64::from(query.limit),
        };
        let recipes = response
            .recipes
            .into_iter()
            .filter(|recipe| query.matches(recipe))
            .collect();
        Self {
            recipes,
            page,
            limit: query.limit,
            has_more,
        }
    }
}
