use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Dietary tags a recipe can carry. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DietaryAttribute {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    NutFree,
    LowCarb,
}

impl DietaryAttribute {
    /// Every attribute, in declaration order
    pub const ALL: [DietaryAttribute; 6] = [
        DietaryAttribute::Vegetarian,
        DietaryAttribute::Vegan,
        DietaryAttribute::GlutenFree,
        DietaryAttribute::DairyFree,
        DietaryAttribute::NutFree,
        DietaryAttribute::LowCarb,
    ];

    /// Human-readable label for filter chips and tag bars
    pub fn display_name(&self) -> &'static str {
        match self {
            DietaryAttribute::Vegetarian => "Vegetarian",
            DietaryAttribute::Vegan => "Vegan",
            DietaryAttribute::GlutenFree => "Gluten-Free",
            DietaryAttribute::DairyFree => "Dairy-Free",
            DietaryAttribute::NutFree => "Nut-Free",
            DietaryAttribute::LowCarb => "Low-Carb",
        }
    }
}

/// A cooking recipe as supplied by a recipe store.
///
/// Recipes are read-only to the search core. `servings` is always at least 1;
/// stores reject records that violate this while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub servings: u32,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(rename = "dietary", alias = "dietaryAttributes", default)]
    pub dietary_attributes: BTreeSet<DietaryAttribute>,
    #[serde(default)]
    pub prep_time_minutes: u32,
    #[serde(default)]
    pub cook_time_minutes: u32,
    #[serde(rename = "imageURL", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Recipe {
    /// Total time required to prepare and cook the recipe
    pub fn total_time_minutes(&self) -> u32 {
        self.prep_time_minutes.saturating_add(self.cook_time_minutes)
    }

    pub fn has_dietary_attribute(&self, attribute: DietaryAttribute) -> bool {
        self.dietary_attributes.contains(&attribute)
    }
}
