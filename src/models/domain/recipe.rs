use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct NutritionalFacts {
    pub calories: u32,
    pub protein: String,
    pub carbohydrates: String,
    pub fat: String,
    pub fiber: String,
    pub sugar: String,
    pub sodium: String,
}

impl NutritionalFacts {
    pub fn new(
        calories: u32,
        protein: &str,
        carbohydrates: &str,
        fat: &str,
        fiber: &str,
        sugar: &str,
        sodium: &str,
    ) -> Self {
        NutritionalFacts {
            calories,
            protein: protein.to_string(),
            carbohydrates: carbohydrates.to_string(),
            fat: fat.to_string(),
            fiber: fiber.to_string(),
            sugar: sugar.to_string(),
            sodium: sodium.to_string(),
        }
    }
}

impl Default for NutritionalFacts {
    fn default() -> Self {
        NutritionalFacts::new(300, "10g", "40g", "10g", "5g", "3g", "300mg")
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Recipe {
    #[serde(default = "default_recipe_name")]
    pub recipe_name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default = "default_cooking_time")]
    pub cooking_time: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default = "default_serving_size")]
    pub serving_size: String,
    #[serde(default)]
    pub dietary_tags: Vec<String>,
    #[serde(default)]
    pub nutritional_facts: NutritionalFacts,
    #[serde(default)]
    pub image_prompt: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

fn default_recipe_name() -> String {
    "Simple Recipe".to_string()
}

fn default_cooking_time() -> String {
    "30 minutes".to_string()
}

fn default_difficulty() -> String {
    "Medium".to_string()
}

fn default_servings() -> u32 {
    4
}

pub fn default_serving_size() -> String {
    "1 serving".to_string()
}

/// A previously indexed recipe offered as inspiration, with its similarity score.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SimilarRecipe {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub metadata: SimilarRecipeMetadata,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SimilarRecipeMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
}

impl SimilarRecipe {
    /// `"<name> - <cuisine>"`, with placeholders for missing metadata.
    pub fn describe(&self) -> String {
        format!(
            "{} - {}",
            self.metadata.name.as_deref().unwrap_or("Unknown"),
            self.metadata.cuisine.as_deref().unwrap_or("Unknown cuisine")
        )
    }
}
