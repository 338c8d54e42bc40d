//! The recipe service.
//!
//! This module sits between the HTTP handlers and the record store. It turns
//! CRUD intents into store calls and the raw store results (optional rows,
//! rows-affected counts) into [`RecipeError`] outcomes.

use crate::app::error::RecipeError;
use crate::domain::Recipe;
use crate::storage::RecipeStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct RecipeService {
    store: Arc<dyn RecipeStore>,
}

impl RecipeService {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    /// Every recipe, or only those whose tags contain `tag`. An empty tag is no filter.
    pub async fn list_all(&self, tag: Option<&str>) -> Result<Vec<Recipe>, RecipeError> {
        let tag = tag.filter(|t| !t.is_empty());
        Ok(self.store.list(tag).await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Recipe, RecipeError> {
        self.store.get(id).await?.ok_or(RecipeError::NotFound(id))
    }

    /// Persists `recipe` and returns it with the id the store assigned.
    pub async fn create(&self, recipe: &Recipe) -> Result<Recipe, RecipeError> {
        Ok(self.store.insert(recipe).await?)
    }

    /// Full replace of the row keyed by `id`.
    ///
    /// A mismatch between `id` and `recipe.id` is rejected before the store is touched.
    pub async fn update(&self, id: i32, recipe: &Recipe) -> Result<(), RecipeError> {
        if id != recipe.id {
            return Err(RecipeError::IdMismatch {
                route_id: id,
                body_id: recipe.id,
            });
        }

        let affected = self.store.update(recipe).await?;
        if affected > 0 {
            return Ok(());
        }

        // Nothing was written: either the row is gone or someone else got in the way.
        if self.store.exists(id).await? {
            Err(RecipeError::Conflict(id))
        } else {
            Err(RecipeError::NotFound(id))
        }
    }

    pub async fn delete(&self, id: i32) -> Result<(), RecipeError> {
        match self.store.delete(id).await? {
            0 => Err(RecipeError::NotFound(id)),
            _ => Ok(()),
        }
    }

    /// Store reachability, for the health endpoint.
    pub async fn health(&self) -> anyhow::Result<()> {
        self.store.ping().await
    }
}
