use std::sync::Arc;

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Value;

use crate::{
    constants::prompts::RECIPE_PROMPT,
    errors::{AppError, AppResult},
    models::domain::{NutritionalFacts, Recipe, SimilarRecipe, StudentProfile},
    repositories::StudentRepository,
    services::{
        assessment::interpret::json_object_span,
        completion_client::{ChatMessage, CompletionClient, CompletionRequest},
    },
};

const RECIPE_TEMPERATURE: f32 = 0.8;
const RECIPE_MAX_TOKENS: u32 = 1500;
const SIMILARITY_THRESHOLD: f64 = 0.8;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn pick_favorite<R: Rng + ?Sized>(foods: &[String], rng: &mut R) -> Option<String> {
    foods.choose(rng).cloned()
}

/// Prompt context: one favorite food, dietary preferences, and the best similar recipe above 0.8.
pub fn recipe_context(
    favorite: Option<&str>,
    dietary_preferences: &[String],
    similar_recipes: &[SimilarRecipe],
) -> String {
    let mut parts = Vec::new();

    match favorite {
        Some(food) => parts.push(format!("User's primary favorite food: {}", food)),
        None => parts.push("User's favorite foods: Not specified".to_string()),
    }

    if !dietary_preferences.is_empty() {
        parts.push(format!("Dietary preferences: {}", dietary_preferences.join(", ")));
    }

    if !similar_recipes.is_empty() {
        match similar_recipes.iter().find(|r| r.score > SIMILARITY_THRESHOLD) {
            Some(recipe) => {
                parts.push("Similar recipes for inspiration:".to_string());
                parts.push(format!("1. {}", recipe.describe()));
            }
            None => parts.push("No highly relevant recipes found for inspiration.".to_string()),
        }
    }

    parts.join("\n")
}

/// Used when the reply holds no JSON object at all.
fn generic_recipe() -> Recipe {
    Recipe {
        recipe_name: "Simple Recipe".to_string(),
        ingredients: Vec::new(),
        instructions: Vec::new(),
        cooking_time: "30 minutes".to_string(),
        difficulty: "Medium".to_string(),
        servings: 4,
        serving_size: "1 serving".to_string(),
        dietary_tags: Vec::new(),
        nutritional_facts: NutritionalFacts::default(),
        image_prompt: "A delicious homemade dish served on a plate".to_string(),
        image_url: String::new(),
        user_id: None,
        generated_at: None,
    }
}

/// Used when the reply holds a JSON object that does not describe a recipe.
fn default_recipe() -> Recipe {
    Recipe {
        recipe_name: "Simple Pasta".to_string(),
        ingredients: strings(&["pasta", "olive oil", "garlic", "herbs", "salt"]),
        instructions: strings(&[
            "Boil pasta according to package instructions",
            "Heat olive oil in a pan",
            "Add garlic and herbs",
            "Combine with pasta and serve",
        ]),
        cooking_time: "20 minutes".to_string(),
        difficulty: "Easy".to_string(),
        servings: 2,
        serving_size: "1 cup".to_string(),
        dietary_tags: strings(&["vegetarian"]),
        nutritional_facts: NutritionalFacts::new(320, "8g", "55g", "8g", "3g", "2g", "250mg"),
        image_prompt: "A simple pasta dish with olive oil, garlic, and herbs served on a white plate"
            .to_string(),
        image_url: String::new(),
        user_id: None,
        generated_at: None,
    }
}

/// Used when the model call itself fails.
pub fn fallback_recipe(profile: &StudentProfile, favorite: Option<&str>) -> Recipe {
    let food = favorite.unwrap_or("Recipe");

    Recipe {
        recipe_name: format!("Simple {}", food),
        ingredients: strings(&["ingredient1", "ingredient2", "ingredient3"]),
        instructions: strings(&[
            "Step 1: Prepare ingredients",
            "Step 2: Cook according to preference",
            "Step 3: Serve and enjoy",
        ]),
        cooking_time: "30 minutes".to_string(),
        difficulty: "Medium".to_string(),
        servings: 4,
        serving_size: "1 serving".to_string(),
        dietary_tags: profile.dietary_preferences.clone(),
        nutritional_facts: NutritionalFacts::new(350, "12g", "45g", "12g", "6g", "4g", "350mg"),
        image_prompt: format!("A delicious {} served on a plate", food),
        image_url: String::new(),
        user_id: Some(profile.student_id.clone()),
        generated_at: Some(Utc::now()),
    }
}

pub fn parse_recipe_response(raw: &str) -> Recipe {
    let Some(span) = json_object_span(raw) else {
        return generic_recipe();
    };

    let Ok(Value::Object(mut object)) = serde_json::from_str::<Value>(span) else {
        log::warn!("Recipe reply held unparsable JSON, using default recipe");
        return default_recipe();
    };

    if !object.contains_key("image_prompt") {
        let name = object
            .get("recipe_name")
            .and_then(Value::as_str)
            .unwrap_or("Recipe")
            .to_lowercase();
        object.insert(
            "image_prompt".to_string(),
            Value::String(format!(
                "A delicious {} served on a plate with garnishes",
                name
            )),
        );
    }

    serde_json::from_value::<Recipe>(Value::Object(object)).unwrap_or_else(|e| {
        log::warn!("Recipe reply did not match the recipe shape: {}", e);
        default_recipe()
    })
}

pub struct RecipeService {
    students: Arc<dyn StudentRepository>,
    completion: Arc<dyn CompletionClient>,
}

impl RecipeService {
    pub fn new(students: Arc<dyn StudentRepository>, completion: Arc<dyn CompletionClient>) -> Self {
        Self {
            students,
            completion,
        }
    }

    pub async fn generate_recipe(
        &self,
        student_id: &str,
        similar_recipes: &[SimilarRecipe],
    ) -> AppResult<Recipe> {
        let profile = self
            .students
            .find_by_student_id(student_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Student with student_id '{}' not found", student_id))
            })?;

        let favorite = pick_favorite(&profile.favorite_foods, &mut rand::thread_rng());
        Ok(self.generate_for(&profile, favorite.as_deref(), similar_recipes).await)
    }

    pub async fn generate_for(
        &self,
        profile: &StudentProfile,
        favorite: Option<&str>,
        similar_recipes: &[SimilarRecipe],
    ) -> Recipe {
        let context = recipe_context(favorite, &profile.dietary_preferences, similar_recipes);
        let prompt = format!("Generate a personalized recipe based on this context: {}", context);
        log::info!("Final prompt sent to the model: {}", prompt);

        let request = CompletionRequest {
            messages: vec![ChatMessage::system(RECIPE_PROMPT), ChatMessage::user(prompt)],
            temperature: RECIPE_TEMPERATURE,
            max_tokens: RECIPE_MAX_TOKENS,
        };

        match self.completion.complete(request).await {
            Ok(text) => {
                let mut recipe = parse_recipe_response(&text);
                recipe.image_url = String::new();
                recipe.user_id = Some(profile.student_id.clone());
                recipe.generated_at = Some(Utc::now());
                recipe
            }
            Err(e) => {
                log::warn!("Recipe generation failed, using fallback recipe: {}", e);
                fallback_recipe(profile, favorite)
            }
        }
    }
}
