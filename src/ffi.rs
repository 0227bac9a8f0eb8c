//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! The host app owns one [`FfiRecipeStore`] for its lifetime. Store operations
//! that persist are driven to completion on a private current-thread runtime,
//! so every exported call is synchronous from the host's point of view.

use crate::catalog::{Catalog, CatalogError};
use crate::config::{ConfigError, StoreConfig};
use crate::model::{Comment, FilterCategory, FilterOption, ParseFilterCategoryError, Recipe};
use crate::storage::{FileStorage, StorageError};
use crate::store::{DraftError, RecipeDraft, RecipeStore, COOKING_TIME_LABELS, DIFFICULTY_LEVELS};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum RecipeStoreError {
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Config error: {message}")]
    Config { message: String },

    #[error("Catalog error: {message}")]
    Catalog { message: String },

    #[error("Invalid filter: {message}")]
    InvalidFilter { message: String },

    #[error("Invalid recipe: {message}")]
    InvalidDraft { message: String },

    #[error("Runtime error: {message}")]
    Runtime { message: String },
}

impl From<StorageError> for RecipeStoreError {
    fn from(e: StorageError) -> Self {
        RecipeStoreError::Storage {
            message: e.to_string(),
        }
    }
}

impl From<ConfigError> for RecipeStoreError {
    fn from(e: ConfigError) -> Self {
        RecipeStoreError::Config {
            message: e.to_string(),
        }
    }
}

impl From<CatalogError> for RecipeStoreError {
    fn from(e: CatalogError) -> Self {
        RecipeStoreError::Catalog {
            message: e.to_string(),
        }
    }
}

impl From<ParseFilterCategoryError> for RecipeStoreError {
    fn from(e: ParseFilterCategoryError) -> Self {
        RecipeStoreError::InvalidFilter {
            message: e.to_string(),
        }
    }
}

impl From<DraftError> for RecipeStoreError {
    fn from(e: DraftError) -> Self {
        RecipeStoreError::InvalidDraft {
            message: e.to_string(),
        }
    }
}

/// FFI-safe representation of a comment.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiComment {
    pub id: String,
    pub user: String,
    pub date: String,
    pub text: String,
    pub likes: String,
}

impl From<&Comment> for FfiComment {
    fn from(c: &Comment) -> Self {
        FfiComment {
            id: c.id.clone(),
            user: c.user.clone(),
            date: c.date.clone(),
            text: c.text.clone(),
            likes: c.likes.clone(),
        }
    }
}

/// FFI-safe representation of a recipe.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiRecipe {
    pub id: String,
    pub title: String,
    pub creator: String,
    pub image: String,
    pub likes: String,
    pub rating: String,
    /// Cooking time in minutes
    pub cooking_time: u32,
    pub meal_time: Vec<String>,
    pub diets: Vec<String>,
    pub ingredients: Vec<String>,
    /// Empty until the first comment is added
    pub comments: Vec<FfiComment>,
    /// True for recipes created on this device
    pub self_authored: bool,
}

impl From<&Recipe> for FfiRecipe {
    fn from(r: &Recipe) -> Self {
        FfiRecipe {
            id: r.id.clone(),
            title: r.title.clone(),
            creator: r.creator.clone(),
            image: r.image.clone(),
            likes: r.likes.clone(),
            rating: r.rating.clone(),
            cooking_time: r.cooking_time,
            meal_time: r.meal_time.clone(),
            diets: r.diets.clone(),
            ingredients: r.ingredients.clone(),
            comments: r
                .comments
                .iter()
                .flatten()
                .map(FfiComment::from)
                .collect(),
            self_authored: r.is_self_authored(),
        }
    }
}

/// FFI-safe representation of an active filter.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiFilterOption {
    pub category: String,
    pub value: String,
    pub selected: bool,
}

impl From<&FilterOption> for FfiFilterOption {
    fn from(f: &FilterOption) -> Self {
        FfiFilterOption {
            category: f.category.to_string(),
            value: f.value.clone(),
            selected: f.selected,
        }
    }
}

/// Raw input from the recipe creation form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipeDraft {
    pub title: String,
    pub ingredients: String,
    pub steps: String,
    pub cooking_time: String,
    pub difficulty: String,
    /// Local file reference from the image picker
    pub recipe_image: Option<String>,
}

impl From<FfiRecipeDraft> for RecipeDraft {
    fn from(d: FfiRecipeDraft) -> Self {
        RecipeDraft {
            title: d.title,
            ingredients: d.ingredients,
            steps: d.steps,
            cooking_time: d.cooking_time,
            difficulty: d.difficulty,
            recipe_image: d.recipe_image,
        }
    }
}

fn to_ffi(recipes: &[Recipe]) -> Vec<FfiRecipe> {
    recipes.iter().map(FfiRecipe::from).collect()
}

/// The recipe store as seen by the host app, persisted to a directory.
#[derive(uniffi::Object)]
pub struct FfiRecipeStore {
    runtime: tokio::runtime::Runtime,
    inner: Mutex<RecipeStore>,
}

#[uniffi::export]
impl FfiRecipeStore {
    /// Opens the store over `storage_dir` using the built-in catalog.
    ///
    /// # Arguments
    /// * `storage_dir` - Directory holding the persisted records
    /// * `config_yaml` - Optional YAML configuration; defaults apply when absent
    #[uniffi::constructor]
    pub fn open(
        storage_dir: String,
        config_yaml: Option<String>,
    ) -> Result<Arc<Self>, RecipeStoreError> {
        let config = match config_yaml {
            Some(yaml) => StoreConfig::from_yaml_str(&yaml)?,
            None => StoreConfig::default(),
        };
        let catalog = Catalog::builtin()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| RecipeStoreError::Runtime {
                message: e.to_string(),
            })?;

        let storage = Arc::new(FileStorage::new(storage_dir));
        info!(dir = %storage.dir(), "Opening recipe store");
        let store = runtime.block_on(RecipeStore::open(catalog, storage, config));

        Ok(Arc::new(FfiRecipeStore {
            runtime,
            inner: Mutex::new(store),
        }))
    }

    /// Returns the built-in catalog.
    pub fn recipes(&self) -> Vec<FfiRecipe> {
        to_ffi(self.store().recipes())
    }

    /// Returns the displayed list.
    pub fn filtered_recipes(&self) -> Vec<FfiRecipe> {
        to_ffi(self.store().filtered_recipes())
    }

    pub fn saved_recipes(&self) -> Vec<FfiRecipe> {
        to_ffi(self.store().saved_recipes())
    }

    pub fn created_recipes(&self) -> Vec<FfiRecipe> {
        to_ffi(self.store().created_recipes())
    }

    pub fn search_query(&self) -> String {
        self.store().search_query().to_string()
    }

    pub fn active_filters(&self) -> Vec<FfiFilterOption> {
        self.store()
            .active_filters()
            .iter()
            .map(FfiFilterOption::from)
            .collect()
    }

    pub fn search_recipes(&self, query: String) {
        self.store().search_recipes(&query);
    }

    /// Toggles a filter by category wire name (e.g. `cookingTime`).
    pub fn toggle_filter(&self, category: String, value: String) -> Result<(), RecipeStoreError> {
        let category: FilterCategory = category.parse()?;
        self.store().toggle_filter(category, &value);
        Ok(())
    }

    pub fn clear_filters(&self) {
        self.store().clear_filters();
    }

    pub fn apply_filters(&self) {
        self.store().apply_filters();
    }

    pub fn save_recipe(&self, recipe_id: String) {
        self.runtime.block_on(self.store().save_recipe(&recipe_id));
    }

    pub fn remove_saved_recipe(&self, recipe_id: String) {
        self.runtime
            .block_on(self.store().remove_saved_recipe(&recipe_id));
    }

    pub fn is_recipe_saved(&self, recipe_id: String) -> bool {
        self.store().is_recipe_saved(&recipe_id)
    }

    pub fn like_recipe(&self, recipe_id: String) {
        self.runtime.block_on(self.store().like_recipe(&recipe_id));
    }

    pub fn unlike_recipe(&self, recipe_id: String) {
        self.runtime.block_on(self.store().unlike_recipe(&recipe_id));
    }

    pub fn is_recipe_liked(&self, recipe_id: String) -> bool {
        self.store().is_recipe_liked(&recipe_id)
    }

    pub fn get_recipe_likes(&self, recipe_id: String) -> u32 {
        self.store().get_recipe_likes(&recipe_id)
    }

    /// Publishes a recipe from the creation form.
    pub fn add_created_recipe(&self, draft: FfiRecipeDraft) -> Result<FfiRecipe, RecipeStoreError> {
        let recipe = self
            .runtime
            .block_on(self.store().add_created_recipe(draft.into()))?;
        Ok(FfiRecipe::from(&recipe))
    }

    /// Adds a comment. Returns `None` when the text is blank.
    pub fn add_comment(&self, recipe_id: String, text: String) -> Option<FfiComment> {
        self.runtime
            .block_on(self.store().add_comment(&recipe_id, &text))
            .as_ref()
            .map(FfiComment::from)
    }

    pub fn get_recipe_comments(&self, recipe_id: String) -> Vec<FfiComment> {
        self.store()
            .get_recipe_comments(&recipe_id)
            .iter()
            .map(FfiComment::from)
            .collect()
    }

    /// Writes all persisted records. Call before the app is torn down.
    pub fn flush(&self) -> Result<(), RecipeStoreError> {
        let store = self.store();
        self.runtime.block_on(store.flush())?;
        Ok(())
    }
}

impl FfiRecipeStore {
    fn store(&self) -> MutexGuard<'_, RecipeStore> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Returns the values the filter screen offers for a category.
#[uniffi::export]
pub fn filter_options(category: String) -> Result<Vec<String>, RecipeStoreError> {
    let category: FilterCategory = category.parse()?;
    Ok(category.options().iter().map(|s| s.to_string()).collect())
}

/// Returns the cooking-time labels offered by the creation form.
#[uniffi::export]
pub fn cooking_time_labels() -> Vec<String> {
    COOKING_TIME_LABELS.iter().map(|s| s.to_string()).collect()
}

/// Returns the difficulty labels offered by the creation form.
#[uniffi::export]
pub fn difficulty_levels() -> Vec<String> {
    DIFFICULTY_LEVELS.iter().map(|s| s.to_string()).collect()
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    fn open_in(temp_dir: &TempDir) -> Arc<FfiRecipeStore> {
        let dir = temp_dir.path().to_str().unwrap().to_string();
        FfiRecipeStore::open(dir, None).unwrap()
    }

    fn draft() -> FfiRecipeDraft {
        FfiRecipeDraft {
            title: "Lunch Pasta".to_string(),
            ingredients: "200 g Pasta\nTomato".to_string(),
            steps: "Boil\nServe".to_string(),
            cooking_time: "< 20 min".to_string(),
            difficulty: "Easy".to_string(),
            recipe_image: None,
        }
    }

    #[test]
    fn test_open_and_browse() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_in(&temp_dir);
        assert_eq!(store.recipes(), store.filtered_recipes());
        assert!(store.saved_recipes().is_empty());
        assert!(store.recipes().iter().all(|r| !r.self_authored));
    }

    #[test]
    fn test_state_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_in(&temp_dir);

        store.like_recipe("2".to_string());
        store.save_recipe("3".to_string());
        let created = store.add_created_recipe(draft()).unwrap();
        assert!(created.self_authored);
        let comment = store
            .add_comment("2".to_string(), "Great recipe".to_string())
            .unwrap();
        drop(store);

        let store = open_in(&temp_dir);
        assert_eq!(store.get_recipe_likes("2".to_string()), 2561);
        assert!(store.is_recipe_saved("3".to_string()));
        assert_eq!(store.created_recipes(), vec![created]);

        let comments = store.get_recipe_comments("2".to_string());
        assert_eq!(comments.len(), 3);
        assert_eq!(comments[0], comment);
    }

    #[test]
    fn test_toggle_filter_by_wire_name() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_in(&temp_dir);

        store
            .toggle_filter("mealTime".to_string(), "Breakfast".to_string())
            .unwrap();
        store.apply_filters();
        assert_eq!(store.active_filters().len(), 1);
        assert_eq!(store.active_filters()[0].category, "mealTime");
        assert!(store
            .filtered_recipes()
            .iter()
            .all(|r| r.meal_time.contains(&"Breakfast".to_string())));

        let result = store.toggle_filter("calories".to_string(), "low".to_string());
        assert!(matches!(result, Err(RecipeStoreError::InvalidFilter { .. })));

        store.clear_filters();
        assert!(store.active_filters().is_empty());
    }

    #[test]
    fn test_invalid_draft() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_in(&temp_dir);
        let mut draft = draft();
        draft.title = String::new();

        let result = store.add_created_recipe(draft);
        assert!(matches!(result, Err(RecipeStoreError::InvalidDraft { .. })));
        assert!(store.created_recipes().is_empty());
    }

    #[test]
    fn test_open_with_config() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_str().unwrap().to_string();
        let config = indoc! {r#"
            storage_prefix: test_
            placeholder_image: none.png
        "#};

        let store = FfiRecipeStore::open(dir, Some(config.to_string())).unwrap();
        let created = store.add_created_recipe(draft()).unwrap();
        assert_eq!(created.image, "none.png");
        assert!(temp_dir.path().join("test_createdRecipes.json").exists());

        store.flush().unwrap();
        assert!(temp_dir.path().join("test_likedRecipes.json").exists());
    }

    #[test]
    fn test_open_with_bad_config() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_str().unwrap().to_string();
        let result = FfiRecipeStore::open(dir, Some("storage_prefix: [".to_string()));
        assert!(matches!(result, Err(RecipeStoreError::Config { .. })));
    }

    #[test]
    fn test_search_and_unlike() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_in(&temp_dir);

        store.search_recipes("beef".to_string());
        assert_eq!(store.search_query(), "beef");
        let results = store.filtered_recipes();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "2");

        store.like_recipe("2".to_string());
        assert!(store.is_recipe_liked("2".to_string()));
        store.unlike_recipe("2".to_string());
        assert!(!store.is_recipe_liked("2".to_string()));
        assert_eq!(store.get_recipe_likes("2".to_string()), 2560);

        store.save_recipe("2".to_string());
        store.remove_saved_recipe("2".to_string());
        assert!(!store.is_recipe_saved("2".to_string()));
    }

    #[test]
    fn test_filter_options() {
        let options = filter_options("cookingTime".to_string()).unwrap();
        assert_eq!(options, vec!["< 15 min", "< 20 min", "< 30 min"]);
        assert!(filter_options("nope".to_string()).is_err());
        assert_eq!(cooking_time_labels().len(), 4);
        assert_eq!(difficulty_levels(), vec!["Easy", "Medium", "Hard"]);
    }

    #[test]
    fn test_library_version() {
        let version = library_version();
        assert!(!version.is_empty());
        assert_eq!(version, env!("CARGO_PKG_VERSION"));
    }
}
