pub mod dedup;
pub mod ingredient;
pub mod probe;
pub mod recipe;
pub mod scoring;
pub mod time_serde;

pub use ingredient::IngredientQuery;
pub use recipe::{RecipeCandidate, RecipePage};
