use crate::model::DietaryAttribute;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Canonical, immutable description of a requested filter combination.
///
/// Every field distinguishes "not set" (`None` / empty set) from an active
/// clause. Equality is structural and is what the search controller uses to
/// skip redundant searches, so unbounded servings limits are always `None`
/// and never a sentinel value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QueryModel {
    pub search_text: Option<String>,
    pub dietary_attributes: BTreeSet<DietaryAttribute>,
    pub servings_min: Option<u32>,
    pub servings_max: Option<u32>,
    pub include_ingredients: BTreeSet<String>,
    pub exclude_ingredients: BTreeSet<String>,
    pub instruction_search: Option<String>,
}

impl QueryModel {
    /// True when the query has no active clause and therefore matches everything
    pub fn is_empty(&self) -> bool {
        *self == QueryModel::default()
    }

    /// Number of filter-sheet dimensions that are active.
    ///
    /// Each selected dietary tag counts separately. Free-text search is not
    /// counted; it lives in the search bar, not behind the filter button.
    pub fn active_filter_count(&self) -> usize {
        let mut count = self.dietary_attributes.len();
        if self.servings_min.is_some() || self.servings_max.is_some() {
            count += 1;
        }
        if !self.include_ingredients.is_empty() {
            count += 1;
        }
        if !self.exclude_ingredients.is_empty() {
            count += 1;
        }
        if self.instruction_search.is_some() {
            count += 1;
        }
        count
    }
}

/// Discrete servings choices offered by the filter sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ServingsBucket {
    #[default]
    Any,
    OneToTwo,
    ThreeToFour,
    FiveToSix,
    SevenPlus,
}

impl ServingsBucket {
    pub const ALL: [ServingsBucket; 5] = [
        ServingsBucket::Any,
        ServingsBucket::OneToTwo,
        ServingsBucket::ThreeToFour,
        ServingsBucket::FiveToSix,
        ServingsBucket::SevenPlus,
    ];

    /// Inclusive `(min, max)` servings range. `None` means unbounded.
    pub fn bounds(&self) -> (Option<u32>, Option<u32>) {
        match self {
            ServingsBucket::Any => (None, None),
            ServingsBucket::OneToTwo => (Some(1), Some(2)),
            ServingsBucket::ThreeToFour => (Some(3), Some(4)),
            ServingsBucket::FiveToSix => (Some(5), Some(6)),
            ServingsBucket::SevenPlus => (Some(7), None),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServingsBucket::Any => "Any",
            ServingsBucket::OneToTwo => "1-2 servings",
            ServingsBucket::ThreeToFour => "3-4 servings",
            ServingsBucket::FiveToSix => "5-6 servings",
            ServingsBucket::SevenPlus => "7+ servings",
        }
    }

    pub fn contains(&self, servings: u32) -> bool {
        let (min, max) = self.bounds();
        min.map_or(true, |min| servings >= min) && max.map_or(true, |max| servings <= max)
    }
}

impl fmt::Display for ServingsBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ServingsBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any" | "" => Ok(ServingsBucket::Any),
            "1-2" => Ok(ServingsBucket::OneToTwo),
            "3-4" => Ok(ServingsBucket::ThreeToFour),
            "5-6" => Ok(ServingsBucket::FiveToSix),
            "7+" => Ok(ServingsBucket::SevenPlus),
            other => Err(format!("Unknown servings bucket: {}", other)),
        }
    }
}

/// Raw filter inputs as the presentation layer holds them: text boxes,
/// toggled tags and the servings picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingQuery {
    pub search_text: String,
    pub dietary_attributes: BTreeSet<DietaryAttribute>,
    pub servings: ServingsBucket,
    /// Comma-separated ingredients that must all appear
    pub include_ingredients: String,
    /// Comma-separated ingredients of which none may appear
    pub exclude_ingredients: String,
    pub instruction_search: String,
}

impl PendingQuery {
    /// Build the canonical query used for matching and dedup comparison
    pub fn to_query(&self) -> QueryModel {
        let (servings_min, servings_max) = self.servings.bounds();
        QueryModel {
            search_text: non_empty(&self.search_text),
            dietary_attributes: self.dietary_attributes.clone(),
            servings_min,
            servings_max,
            include_ingredients: parse_ingredient_list(&self.include_ingredients),
            exclude_ingredients: parse_ingredient_list(&self.exclude_ingredients),
            instruction_search: non_empty(&self.instruction_search),
        }
    }

    /// Reset the filter-sheet fields, keeping the search text
    pub fn clear_filters(&mut self) {
        *self = PendingQuery {
            search_text: std::mem::take(&mut self.search_text),
            ..Default::default()
        };
    }

    /// Toggle a dietary tag on or off
    pub fn toggle_dietary(&mut self, attribute: DietaryAttribute) {
        if !self.dietary_attributes.remove(&attribute) {
            self.dietary_attributes.insert(attribute);
        }
    }
}

/// Split a comma-separated input into trimmed, non-empty fragments
pub fn parse_ingredient_list(text: &str) -> BTreeSet<String> {
    text.split(',')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
