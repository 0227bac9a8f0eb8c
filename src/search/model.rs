use crate::model::{FilterCategory, FilterOption, Recipe};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Active filter values grouped by category.
///
/// A recipe passes when it satisfies every category that has at least one
/// selected value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterGroups {
    groups: BTreeMap<FilterCategory, Vec<String>>,
}

impl FilterGroups {
    pub fn from_options(options: &[FilterOption]) -> Self {
        let mut groups: BTreeMap<FilterCategory, Vec<String>> = BTreeMap::new();
        for option in options {
            groups
                .entry(option.category)
                .or_default()
                .push(option.value.clone());
        }
        FilterGroups { groups }
    }

    pub fn accepts(&self, recipe: &Recipe) -> bool {
        self.groups
            .iter()
            .all(|(category, values)| category_accepts(*category, values, recipe))
    }
}

fn category_accepts(category: FilterCategory, values: &[String], recipe: &Recipe) -> bool {
    match category {
        // Any selected threshold the recipe beats is enough
        FilterCategory::CookingTime => values
            .iter()
            .filter_map(|value| minutes_threshold(value))
            .any(|minutes| u64::from(recipe.cooking_time) < minutes),
        FilterCategory::MealTime => values.iter().any(|value| recipe.meal_time.contains(value)),
        FilterCategory::Diets => values.iter().all(|value| recipe.diets.contains(value)),
        FilterCategory::Exclude => !values
            .iter()
            .any(|value| recipe.ingredients.contains(&value.to_lowercase())),
        // Sorting is a display concern
        FilterCategory::Sort => true,
    }
}

/// Extracts the minute count from a label like `< 20 min` by dropping every
/// non-digit character.
///
/// A digit run too long for `u64` saturates instead of failing.
pub(crate) fn minutes_threshold(value: &str) -> Option<u64> {
    static NON_DIGITS: OnceLock<Regex> = OnceLock::new();
    let re = NON_DIGITS.get_or_init(|| Regex::new(r"[^0-9]").unwrap());
    let digits = re.replace_all(value, "");
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_threshold() {
        assert_eq!(minutes_threshold("< 15 min"), Some(15));
        assert_eq!(minutes_threshold("< 30 min"), Some(30));
        assert_eq!(minutes_threshold("1 hour"), Some(1));
        assert_eq!(minutes_threshold("quick"), None);
    }

    #[test]
    fn test_huge_threshold_saturates() {
        assert_eq!(minutes_threshold("< 99999999999 min"), Some(99_999_999_999));
        assert_eq!(
            minutes_threshold("< 123456789012345678901234567890 min"),
            Some(u64::MAX)
        );

        let groups = FilterGroups::from_options(&[FilterOption::new(
            FilterCategory::CookingTime,
            "< 123456789012345678901234567890 min",
        )]);
        let catalog = crate::catalog::Catalog::builtin().unwrap();
        assert!(catalog.recipes.iter().all(|r| groups.accepts(r)));
    }

    #[test]
    fn test_groups_by_category() {
        let groups = FilterGroups::from_options(&[
            FilterOption::new(FilterCategory::MealTime, "Lunch"),
            FilterOption::new(FilterCategory::Diets, "Vegetarian"),
            FilterOption::new(FilterCategory::MealTime, "Dinner"),
        ]);
        assert_eq!(groups.groups.len(), 2);
        assert_eq!(
            groups.groups[&FilterCategory::MealTime],
            vec!["Lunch".to_string(), "Dinner".to_string()]
        );
    }
}
