//! Record stores for `Recipe` rows.
//!
//! The service only talks to the [`RecipeStore`] trait; the concrete backend is
//! picked once at startup from the connection URL.

use crate::domain::Recipe;
use crate::infra::config::Config;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub mod postgres;
pub mod sqlite;

pub use postgres::PostgresRecipeStore;
pub use sqlite::SqliteRecipeStore;

/// Persistence contract for recipes.
///
/// Implementations report faults as `anyhow::Error`. Absence is never an error
/// here: `get` returns `None`, `update`/`delete` return the number of rows they
/// touched, and the service decides what that means.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Creates the `recipes` table if needed.
    async fn ensure_schema(&self) -> Result<()>;

    /// Round trip to the database.
    async fn ping(&self) -> Result<()>;

    /// All recipes ordered by id, optionally restricted to those whose
    /// `dietary_tags` contains `tag` as a raw substring.
    async fn list(&self, tag: Option<&str>) -> Result<Vec<Recipe>>;

    async fn get(&self, id: i32) -> Result<Option<Recipe>>;

    /// Inserts every field except `id`, which the store assigns.
    async fn insert(&self, recipe: &Recipe) -> Result<Recipe>;

    /// Overwrites all fields of the row keyed by `recipe.id`.
    async fn update(&self, recipe: &Recipe) -> Result<u64>;

    async fn delete(&self, id: i32) -> Result<u64>;

    async fn exists(&self, id: i32) -> Result<bool>;
}

/// Opens the backend named by `config.database_url` and makes sure the table exists.
pub async fn connect(config: &Config) -> Result<Arc<dyn RecipeStore>> {
    let url = config.database_url.as_str();

    let store: Arc<dyn RecipeStore> = if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        Arc::new(PostgresRecipeStore::connect(url, config.max_connections).await?)
    } else if url.starts_with("sqlite:") {
        Arc::new(SqliteRecipeStore::connect(url, config.max_connections).await?)
    } else {
        return Err(anyhow::anyhow!(
            "Unsupported DATABASE_URL scheme (expected postgres:// or sqlite:)"
        ));
    };

    store.ensure_schema().await?;
    Ok(store)
}
