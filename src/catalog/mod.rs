//! The static seed catalog shipped with the app.
//!
//! The catalog is read once when a store is built and never mutated. It also
//! carries a set of seeded comments keyed by recipe id, which are shown after
//! any user comments on those recipes.

use crate::model::{Comment, Recipe};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

const BUILTIN_CATALOG: &str = include_str!("builtin.json");

/// Errors that can occur when loading a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate recipe id in catalog: {0}")]
    DuplicateId(String),
}

/// Built-in recipes plus the comments seeded for some of them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub default_comments: HashMap<String, Vec<Comment>>,
}

impl Catalog {
    /// Returns the catalog embedded in the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parses a catalog from JSON with `recipes` and optional `defaultComments`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the JSON is malformed or two recipes share an id.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;

        let mut seen = HashSet::new();
        for recipe in &catalog.recipes {
            if !seen.insert(recipe.id.as_str()) {
                return Err(CatalogError::DuplicateId(recipe.id.clone()));
            }
        }

        Ok(catalog)
    }

    /// Returns the seeded comments for a recipe, if any.
    pub fn default_comments_for(&self, recipe_id: &str) -> Option<&[Comment]> {
        self.default_comments.get(recipe_id).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.recipes.is_empty());
        assert!(catalog.recipes.iter().all(|r| r.comments.is_none()));

        let burger = catalog.recipes.iter().find(|r| r.id == "2").unwrap();
        assert!(burger.ingredients.contains(&"beef".to_string()));
    }

    #[test]
    fn test_builtin_default_comments() {
        let catalog = Catalog::builtin().unwrap();
        let defaults = catalog.default_comments_for("2").unwrap();
        assert_eq!(defaults.len(), 2);
        assert_eq!(defaults[0].user, "Tanya");
        assert_eq!(defaults[1].user, "James");
        assert!(catalog.default_comments_for("1").is_none());
    }

    #[test]
    fn test_catalog_without_default_comments() {
        let catalog = Catalog::from_json(indoc! {r#"
            {
              "recipes": [
                {
                  "id": "a",
                  "title": "Toast",
                  "creator": "Ann",
                  "image": "toast.png",
                  "likes": "1",
                  "rating": "3",
                  "cookingTime": 3,
                  "mealTime": ["Breakfast"],
                  "diets": [],
                  "ingredients": ["bread"]
                }
              ]
            }"#})
        .unwrap();
        assert_eq!(catalog.recipes.len(), 1);
        assert!(catalog.default_comments.is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let recipe = r#"{"id":"x","title":"T","creator":"C","image":"i","likes":"0","rating":"0","cookingTime":1,"mealTime":[],"diets":[],"ingredients":[]}"#;
        let json = format!(r#"{{"recipes":[{recipe},{recipe}]}}"#);
        let result = Catalog::from_json(&json);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "x"));
    }

    #[test]
    fn test_malformed_catalog() {
        let result = Catalog::from_json("{\"recipes\": 3}");
        assert!(matches!(result, Err(CatalogError::ParseError(_))));
    }
}
