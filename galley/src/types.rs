//! Assistant result types.

use gprovider::{Concept, RecipeInformation, RecipeSummary};

/// Ingredient names above the confidence threshold alongside the full
/// unfiltered concept list, both in the order the vision service
/// returned them.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientDetection {
    pub ingredients: Vec<String>,
    pub concepts: Vec<Concept>,
}

/// A search summary merged with its per-recipe detail record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: u64,
    pub title: String,
    pub image: Option<String>,
    pub used_ingredients: Vec<String>,
    pub missed_ingredients: Vec<String>,
    pub instructions: String,
    pub source_url: String,
    pub ready_in_minutes: u32,
    pub servings: u32,
}

impl Recipe {
    pub fn from_parts(summary: RecipeSummary, information: RecipeInformation) -> Self {
        Self {
            id: summary.id,
            title: summary.title,
            image: summary.image,
            used_ingredients: summary.used_ingredients,
            missed_ingredients: summary.missed_ingredients,
            instructions: information.instructions,
            source_url: information.source_url,
            ready_in_minutes: information.ready_in_minutes,
            servings: information.servings,
        }
    }
}
