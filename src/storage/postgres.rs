//! Recipe store backed by PostgreSQL.

use super::RecipeStore;
use crate::domain::Recipe;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

const SELECT_COLUMNS: &str = "id, title, ingredients, steps, cooking_time, dietary_tags";

#[derive(Clone)]
pub struct PostgresRecipeStore {
    pool: PgPool,
}

impl PostgresRecipeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl RecipeStore for PostgresRecipeStore {
    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS recipes (
                id SERIAL PRIMARY KEY,
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
            // strpos rather than LIKE so '%' and '_' in the tag stay literal.
            Some(tag) => {
                let sql = format!(
                    "SELECT {} FROM recipes WHERE strpos(dietary_tags, $1) > 0 ORDER BY id",
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
        let sql = format!("SELECT {} FROM recipes WHERE id = $1", SELECT_COLUMNS);
        let row = sqlx::query_as::<_, Recipe>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, recipe: &Recipe) -> Result<Recipe> {
        let sql = format!(
            "INSERT INTO recipes (title, ingredients, steps, cooking_time, dietary_tags)
             VALUES ($1, $2, $3, $4, $5)
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
             SET title = $2, ingredients = $3, steps = $4, cooking_time = $5, dietary_tags = $6
             WHERE id = $1",
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
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn exists(&self, id: i32) -> Result<bool> {
        let found: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM recipes WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(found)
    }
}
