use crate::app::RecipeError;
use crate::domain::Recipe;
use crate::transport::http::error::ApiError;
use crate::transport::http::types::{ApiResponse, AppState, RecipeQuery};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, info, warn};

/// Logs a failed operation at the level its outcome calls for and maps it to a response.
fn reject(operation: &str, err: RecipeError) -> ApiError {
    match err {
        RecipeError::NotFound(id) => {
            warn!("{operation} failed: recipe with id {id} not found");
            ApiError::NotFound
        }
        RecipeError::IdMismatch { route_id, body_id } => {
            warn!("{operation} recipe id mismatch: route id {route_id} != recipe id {body_id}");
            ApiError::BadRequest
        }
        RecipeError::Conflict(id) => {
            // Surfaced as a server fault, not a 409.
            error!("{operation} failed due to concurrency issue for id {id}");
            ApiError::Internal(RecipeError::Conflict(id).to_string())
        }
        RecipeError::Store(e) => {
            error!("{operation} failed: store error: {e:#}");
            ApiError::Internal(e.to_string())
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    params(RecipeQuery),
    responses(
        (status = 200, description = "Recipes, optionally filtered by dietary tag", body = [Recipe]),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn list_recipes_handler(
    State(state): State<AppState>,
    Query(query): Query<RecipeQuery>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    info!("GET all recipes requested");

    let tag = query.tag.as_deref().filter(|t| !t.is_empty());
    if let Some(tag) = tag {
        info!("Filtering recipes by dietary tag: {tag}");
    }

    let recipes = state
        .recipes
        .list_all(tag)
        .await
        .map_err(|e| reject("GET recipes", e))?;

    info!("Returning {} recipes", recipes.len());
    Ok(Json(recipes))
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    params(
        ("id" = i32, Path, description = "Recipe id")
    ),
    responses(
        (status = 200, description = "The recipe", body = Recipe),
        (status = 404, description = "No recipe with that id"),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn get_recipe_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Recipe>, ApiError> {
    info!("GET recipe by id {id} requested");

    let recipe = state
        .recipes
        .get_by_id(id)
        .await
        .map_err(|e| reject("GET recipe", e))?;

    info!("Recipe with id {id} found");
    Ok(Json(recipe))
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    request_body = Recipe,
    responses(
        (status = 201, description = "Recipe created; Location points at the new resource", body = Recipe),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn create_recipe_handler(
    State(state): State<AppState>,
    request: Result<Json<Recipe>, JsonRejection>,
) -> Result<Response, ApiError> {
    info!("POST create recipe requested");

    let Json(recipe) = request.map_err(|e| {
        warn!("POST recipe rejected: {e}");
        ApiError::from(e)
    })?;

    let created = state
        .recipes
        .create(&recipe)
        .await
        .map_err(|e| reject("POST recipe", e))?;

    info!("Recipe created with id {}", created.id);
    let location = format!("/api/recipes/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    params(
        ("id" = i32, Path, description = "Recipe id; must equal the body id")
    ),
    request_body = Recipe,
    responses(
        (status = 204, description = "Recipe replaced"),
        (status = 400, description = "Route id does not match body id"),
        (status = 404, description = "No recipe with that id"),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Concurrency conflict or store failure", body = ApiResponse)
    )
)]
pub async fn update_recipe_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    request: Result<Json<Recipe>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    info!("PUT update recipe requested for id {id}");

    let Json(recipe) = request.map_err(|e| {
        warn!("PUT recipe rejected: {e}");
        ApiError::from(e)
    })?;

    state
        .recipes
        .update(id, &recipe)
        .await
        .map_err(|e| reject("PUT recipe", e))?;

    info!("Recipe with id {id} updated successfully");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    params(
        ("id" = i32, Path, description = "Recipe id")
    ),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 404, description = "No recipe with that id"),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn delete_recipe_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    info!("DELETE recipe requested for id {id}");

    state
        .recipes
        .delete(id)
        .await
        .map_err(|e| reject("DELETE recipe", e))?;

    info!("Recipe with id {id} deleted successfully");
    Ok(StatusCode::NO_CONTENT)
}
