//! Domain model definitions.

pub mod recipe;

pub use recipe::Recipe;
