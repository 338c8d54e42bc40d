pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{RecipeError, RecipeService};
pub use domain::Recipe;
pub use infra::config::Config;
pub use storage::{PostgresRecipeStore, RecipeStore, SqliteRecipeStore};
