use crate::model::{FilterOption, Recipe};
use std::collections::HashSet;

mod model;

pub use model::FilterGroups;

/// Builds the browsable universe: created recipes whose id is not already in
/// the base catalog, followed by the base catalog.
pub fn unique_universe(base: &[Recipe], created: &[Recipe]) -> Vec<Recipe> {
    let base_ids: HashSet<&str> = base.iter().map(|r| r.id.as_str()).collect();

    created
        .iter()
        .filter(|r| !base_ids.contains(r.id.as_str()))
        .chain(base.iter())
        .cloned()
        .collect()
}

/// Keeps the recipes that satisfy every active filter category.
///
/// With no active filters the input is returned untouched.
pub fn filter_recipes(recipes: Vec<Recipe>, filters: &[FilterOption]) -> Vec<Recipe> {
    if filters.is_empty() {
        return recipes;
    }

    let groups = FilterGroups::from_options(filters);
    recipes.into_iter().filter(|r| groups.accepts(r)).collect()
}

/// Keeps the recipes whose title, creator or any ingredient contains `query`,
/// case-insensitively.
pub fn search(recipes: Vec<Recipe>, query: &str) -> Vec<Recipe> {
    let query_lower = query.to_lowercase();
    recipes
        .into_iter()
        .filter(|r| r.matches_query(&query_lower))
        .collect()
}
