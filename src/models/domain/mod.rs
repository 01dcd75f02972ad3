pub mod insight;
pub mod question;
pub mod recipe;
pub mod student;
pub use insight::Step1Insight;
pub use question::{Question, QuestionOption, RiasecCode};
pub use recipe::{NutritionalFacts, Recipe, SimilarRecipe, SimilarRecipeMetadata};
pub use student::{StudentContext, StudentProfile};
