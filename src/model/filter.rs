use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The filter groups offered on the filter screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterCategory {
    Sort,
    CookingTime,
    MealTime,
    Diets,
    Exclude,
}

impl FilterCategory {
    pub const ALL: [FilterCategory; 5] = [
        FilterCategory::Sort,
        FilterCategory::CookingTime,
        FilterCategory::MealTime,
        FilterCategory::Diets,
        FilterCategory::Exclude,
    ];

    /// Returns the wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterCategory::Sort => "sort",
            FilterCategory::CookingTime => "cookingTime",
            FilterCategory::MealTime => "mealTime",
            FilterCategory::Diets => "diets",
            FilterCategory::Exclude => "exclude",
        }
    }

    /// Returns the values the filter screen offers for this category.
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            FilterCategory::Sort => &["Most likes", "Recommended"],
            FilterCategory::CookingTime => &["< 15 min", "< 20 min", "< 30 min"],
            FilterCategory::MealTime => &["Breakfast", "Lunch", "Dinner"],
            FilterCategory::Diets => &["Lactose-free", "Low-carb", "Vegetarian", "Gluten-free"],
            FilterCategory::Exclude => &["Onion", "Mushroom", "Peanut"],
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown filter category: {0}")]
pub struct ParseFilterCategoryError(pub String);

impl FromStr for FilterCategory {
    type Err = ParseFilterCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseFilterCategoryError(s.to_string()))
    }
}

/// An active filter. Presence in the active set implies selection, so
/// `selected` is always true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub category: FilterCategory,
    pub value: String,
    pub selected: bool,
}

impl FilterOption {
    pub fn new(category: FilterCategory, value: impl Into<String>) -> Self {
        FilterOption {
            category,
            value: value.into(),
            selected: true,
        }
    }

    pub fn matches(&self, category: FilterCategory, value: &str) -> bool {
        self.category == category && self.value == value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_str() {
        for category in FilterCategory::ALL {
            assert_eq!(category.as_str().parse::<FilterCategory>(), Ok(category));
        }
    }

    #[test]
    fn test_unknown_category() {
        let err = "calories".parse::<FilterCategory>().unwrap_err();
        assert_eq!(err, ParseFilterCategoryError("calories".to_string()));
        assert_eq!(err.to_string(), "Unknown filter category: calories");
    }

    #[test]
    fn test_serde_names_match_wire_names() {
        let json = serde_json::to_string(&FilterCategory::CookingTime).unwrap();
        assert_eq!(json, "\"cookingTime\"");
    }

    #[test]
    fn test_options() {
        assert!(FilterCategory::CookingTime.options().contains(&"< 20 min"));
        assert_eq!(FilterCategory::Diets.options().len(), 4);
        assert!(FilterOption::new(FilterCategory::Diets, "Vegetarian").selected);
    }
}
