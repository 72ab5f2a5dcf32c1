//! Recipe endpoints through `ApiClient`

use recipebox::client::RecipeQuery;
use recipebox::shared::{Category, ClientError, RecipeFields};
use serde_json::json;
use wiremock::matchers::{
    body_partial_json, body_string_contains, header, header_regex, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::*;
use crate::{assert_contains, assert_err, assert_ok};

fn pancakes() -> RecipeFields {
    RecipeFields {
        recipe: "Pancakes".to_string(),
        category: Category::Breakfast,
        ingredients: vec!["flour".to_string(), "milk".to_string(), "egg".to_string()],
        servings: 4,
        prep_time: "00:10".to_string(),
        cooking_time: "00:20".to_string(),
        instructions: "Whisk. Fry.".to_string(),
    }
}

#[tokio::test]
async fn test_list_sends_bearer_and_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/recipes"))
        .and(header("Authorization", auth_header(TEST_TOKEN).as_str()))
        .and(query_param("category", "Dessert"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recipes": [
                recipe_json("1", "Brownies", "Dessert"),
                recipe_json("2", "Omelette", "Breakfast"),
                recipe_json("3", "Tiramisu", "dessert"),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = logged_in_client(&server).await;
    let page = assert_ok!(
        api.list_recipes(&RecipeQuery::new(20).category(Category::Dessert))
            .await
    );

    let names: Vec<_> = page.recipes.iter().map(|r| r.recipe.as_str()).collect();
    assert_eq!(names, vec!["Brownies", "Tiramisu"]);
    assert!(!page.has_more);
}

#[tokio::test]
async fn test_list_reads_total_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/recipes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recipes": [recipe_json("1", "Brownies", "Dessert")],
            "page": 1,
            "totalPages": 3
        })))
        .mount(&server)
        .await;

    let api = logged_in_client(&server).await;
    let page = assert_ok!(api.list_recipes(&RecipeQuery::new(1)).await);
    assert_eq!(page.page, 1);
    assert!(page.has_more);
}

#[tokio::test]
async fn test_expired_token_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/recipes"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let api = logged_in_client(&server).await;
    let err = api.list_recipes(&RecipeQuery::new(20)).await.unwrap_err();
    assert!(err.is_auth());
}

#[tokio::test]
async fn test_get_missing_recipe_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/recipes/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let api = logged_in_client(&server).await;
    assert_err!(api.get_recipe("missing").await, ClientError::NotFound { .. });
}

#[tokio::test]
async fn test_get_recipe_decodes_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/recipes/r1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(recipe_json("r1", "Brownies", "Dessert")),
        )
        .mount(&server)
        .await;

    let api = logged_in_client(&server).await;
    let recipe = assert_ok!(api.get_recipe("r1").await);
    assert_eq!(recipe.id, "r1");
    assert_eq!(recipe.category_kind(), Some(Category::Dessert));
    assert_eq!(recipe.prep_time, "00:15");
    assert_eq!(recipe.servings, 4);
}

#[tokio::test]
async fn test_create_posts_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/recipes"))
        .and(header("Authorization", auth_header(TEST_TOKEN).as_str()))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("Pancakes"))
        .and(body_string_contains("prepTime"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "created"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = logged_in_client(&server).await;
    assert_ok!(api.create_recipe(&pancakes()).await);
}

#[tokio::test]
async fn test_create_requires_created_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/recipes"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let api = logged_in_client(&server).await;
    assert_err!(api.create_recipe(&pancakes()).await, ClientError::Unknown { .. });
}

#[tokio::test]
async fn test_create_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/recipes"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid recipe data"})),
        )
        .mount(&server)
        .await;

    let api = logged_in_client(&server).await;
    let err = api.create_recipe(&pancakes()).await.unwrap_err();
    assert!(matches!(err, ClientError::Server { status: 400, .. }));
    assert_contains!(err.user_message(), "Invalid recipe data");
}

#[tokio::test]
async fn test_plain_text_error_body_is_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/recipes/r1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error: db down"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/recipes/r2"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let api = logged_in_client(&server).await;
    let err = api.get_recipe("r1").await.unwrap_err();
    assert!(matches!(err, ClientError::Server { status: 500, .. }));
    assert_eq!(err.user_message(), "Internal Server Error: db down");

    assert_err!(api.get_recipe("r2").await, ClientError::Unknown { .. });
}

#[tokio::test]
async fn test_update_puts_json() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/recipes/r1"))
        .and(header_regex("content-type", "^application/json"))
        .and(body_partial_json(json!({
            "recipe": "Pancakes",
            "category": "Breakfast",
            "servings": 4,
            "prepTime": "00:10",
            "cookingTime": "00:20"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(recipe_json("r1", "Pancakes", "Breakfast")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = logged_in_client(&server).await;
    let recipe = assert_ok!(api.update_recipe("r1", &pancakes()).await);
    assert_eq!(recipe.recipe, "Pancakes");
}

#[tokio::test]
async fn test_update_refetches_when_body_is_not_a_recipe() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/recipes/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "updated"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/recipes/r1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(recipe_json("r1", "Pancakes", "Breakfast")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = logged_in_client(&server).await;
    let recipe = assert_ok!(api.update_recipe("r1", &pancakes()).await);
    assert_eq!(recipe.id, "r1");
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/recipes/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let api = logged_in_client(&server).await;
    assert_ok!(api.delete_recipe("gone").await);
}

#[tokio::test]
async fn test_anonymous_calls_never_reach_server() {
    let server = MockServer::start().await;
    expect_no_requests(&server).await;

    let api = anonymous_client(&server);
    assert_err!(
        api.list_recipes(&RecipeQuery::new(20)).await,
        ClientError::Auth { .. }
    );
    assert_err!(api.create_recipe(&pancakes()).await, ClientError::Auth { .. });
    assert_err!(api.delete_recipe("r1").await, ClientError::Auth { .. });
}
