//! Boolean recipe matching against a [`QueryModel`].

use crate::model::Recipe;
use crate::query::QueryModel;

/// Whether `recipe` satisfies every active clause of `query`.
///
/// Clauses are combined with AND and evaluation stops at the first failing
/// clause. A query without active clauses matches every recipe.
pub fn matches(recipe: &Recipe, query: &QueryModel) -> bool {
    matches_text(recipe, query.search_text.as_deref())
        && matches_dietary(recipe, query)
        && matches_servings(recipe, query.servings_min, query.servings_max)
        && includes_all(recipe, query)
        && excludes_all(recipe, query)
        && matches_instructions(recipe, query.instruction_search.as_deref())
}

/// Keep the recipes that match `query`, preserving their order
pub fn filter_recipes<I>(recipes: I, query: &QueryModel) -> Vec<Recipe>
where
    I: IntoIterator<Item = Recipe>,
{
    recipes
        .into_iter()
        .filter(|recipe| matches(recipe, query))
        .collect()
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn matches_text(recipe: &Recipe, search_text: Option<&str>) -> bool {
    let Some(text) = search_text else {
        return true;
    };
    let needle = text.to_lowercase();
    contains_ignore_case(&recipe.title, &needle) || contains_ignore_case(&recipe.description, &needle)
}

// ALL requested tags must be present
fn matches_dietary(recipe: &Recipe, query: &QueryModel) -> bool {
    query
        .dietary_attributes
        .is_subset(&recipe.dietary_attributes)
}

fn matches_servings(recipe: &Recipe, min: Option<u32>, max: Option<u32>) -> bool {
    min.map_or(true, |min| recipe.servings >= min) && max.map_or(true, |max| recipe.servings <= max)
}

fn any_ingredient_contains(recipe: &Recipe, fragment: &str) -> bool {
    let needle = fragment.to_lowercase();
    recipe
        .ingredients
        .iter()
        .any(|line| contains_ignore_case(line, &needle))
}

fn includes_all(recipe: &Recipe, query: &QueryModel) -> bool {
    query
        .include_ingredients
        .iter()
        .all(|fragment| any_ingredient_contains(recipe, fragment))
}

fn excludes_all(recipe: &Recipe, query: &QueryModel) -> bool {
    !query
        .exclude_ingredients
        .iter()
        .any(|fragment| any_ingredient_contains(recipe, fragment))
}

fn matches_instructions(recipe: &Recipe, instruction_search: Option<&str>) -> bool {
    let Some(text) = instruction_search else {
        return true;
    };
    let needle = text.to_lowercase();
    recipe
        .instructions
        .iter()
        .any(|step| contains_ignore_case(step, &needle))
}
