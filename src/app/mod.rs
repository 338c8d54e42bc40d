pub mod error;
pub mod recipe_service;

pub use error::RecipeError;
pub use recipe_service::RecipeService;
