use thiserror::Error;

/// Outcomes of a recipe operation other than success.
#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("Recipe with id {0} not found")]
    NotFound(i32),

    #[error("Route id {route_id} does not match recipe id {body_id}")]
    IdMismatch { route_id: i32, body_id: i32 },

    /// The row still exists but the update did not apply to it.
    #[error("Concurrent modification of recipe with id {0}")]
    Conflict(i32),

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}
