//! Embedded recipe store backed by SQLite.
//!
//! `sqlite::memory:` gives every pooled connection its own empty database, so
//! in-memory URLs are pinned to a single connection that never expires.

use super::RecipeStore;
use crate::domain::Recipe;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

const SELECT_COLUMNS: &str = "id, title, ingredients, steps, cooking_time, dietary_tags";

#[derive(Clone)]
pub struct SqliteRecipeStore {
    pool: SqlitePool,
}

impl SqliteRecipeStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = if database_url.contains(":memory:") || database_url.contains("mode=memory") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections)
                .connect_with(options)
                .await?
        };
        Ok(Self::new(pool))
    }

    /// Fresh in-memory store with the schema applied.
    pub async fn in_memory() -> Result<Self> {
        let store = Self::connect("sqlite::memory:", 1).await?;
        store.ensure_schema().await?;
        Ok(store)
    }
}

#[async_trait]
impl RecipeStore for SqliteRecipeStore {
    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL DEFAULT '',
                ingredients TEXT NOT NULL DEFAULT '',
                steps TEXT NOT NULL DEFAULT '',
                cooking_time INTEGER NOT NULL DEFAULT 0,
                dietary_tags TEXT
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list(&self, tag: Option<&str>) -> Result<Vec<Recipe>> {
        let rows = match tag {
            // instr is case-sensitive, unlike LIKE in SQLite.
            Some(tag) => {
                let sql = format!(
                    "SELECT {} FROM recipes WHERE instr(dietary_tags, ?1) > 0 ORDER BY id",
                    SELECT_COLUMNS
                );
                sqlx::query_as::<_, Recipe>(&sql)
                    .bind(tag)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("SELECT {} FROM recipes ORDER BY id", SELECT_COLUMNS);
                sqlx::query_as::<_, Recipe>(&sql)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    async fn get(&self, id: i32) -> Result<Option<Recipe>> {
        let sql = format!("SELECT {} FROM recipes WHERE id = ?1", SELECT_COLUMNS);
        let row = sqlx::query_as::<_, Recipe>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, recipe: &Recipe) -> Result<Recipe> {
        let sql = format!(
            "INSERT INTO recipes (title, ingredients, steps, cooking_time, dietary_tags)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {}",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Recipe>(&sql)
            .bind(&recipe.title)
            .bind(&recipe.ingredients)
            .bind(&recipe.steps)
            .bind(recipe.cooking_time)
            .bind(recipe.dietary_tags.as_deref())
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, recipe: &Recipe) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE recipes
             SET title = ?2, ingredients = ?3, steps = ?4, cooking_time = ?5, dietary_tags = ?6
             WHERE id = ?1",
        )
        .bind(recipe.id)
        .bind(&recipe.title)
        .bind(&recipe.ingredients)
        .bind(&recipe.steps)
        .bind(recipe.cooking_time)
        .bind(recipe.dietary_tags.as_deref())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i32) -> Result<u64> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn exists(&self, id: i32) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes WHERE id = ?1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }
}
