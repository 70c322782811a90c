//! Recipe payload exchanged with the backend.
//!
//! Only references and quantities are persisted. Costs are recomputed from
//! current purchase prices each time a recipe is opened.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{IngredientId, RecipeId};

/// One ingredient reference on a stored recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    pub ingredient_id: IngredientId,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
}

/// A recipe as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    /// Per-serving selling price.
    #[serde(with = "rust_decimal::serde::float")]
    pub selling_price: Decimal,
    /// Preparation time in minutes.
    pub preparation_time: u32,
    pub servings: u32,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
}

/// Body for creating or replacing a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub selling_price: Decimal,
    pub preparation_time: u32,
    pub servings: u32,
    pub ingredients: Vec<RecipeIngredient>,
}

impl NewRecipe {
    /// Attach the ID the backend assigned.
    #[must_use]
    pub fn with_id(self, id: RecipeId) -> Recipe {
        Recipe {
            id,
            name: self.name,
            selling_price: self.selling_price,
            preparation_time: self.preparation_time,
            servings: self.servings,
            ingredients: self.ingredients,
        }
    }
}
