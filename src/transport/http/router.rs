use crate::domain::Recipe;
use crate::transport::http::handlers::{health, recipes};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        recipes::list_recipes_handler,
        recipes::get_recipe_handler,
        recipes::create_recipe_handler,
        recipes::update_recipe_handler,
        recipes::delete_recipe_handler
    ),
    components(schemas(ApiResponse, Recipe))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/recipes",
            get(recipes::list_recipes_handler).post(recipes::create_recipe_handler),
        )
        .route(
            "/api/recipes/:id",
            get(recipes::get_recipe_handler)
                .put(recipes::update_recipe_handler)
                .delete(recipes::delete_recipe_handler),
        )
        .with_state(app_state)
}
