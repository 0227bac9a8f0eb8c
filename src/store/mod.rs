//! The recipe store: single source of truth for recipe state.
//!
//! All mutations land in memory before any storage write is awaited, so a
//! caller that reads back right after an operation always sees the new state.
//! Storage failures are logged and swallowed; the in-memory state stays
//! authoritative.

use crate::catalog::Catalog;
use crate::config::StoreConfig;
use crate::model::{generate_id, Comment, FilterCategory, FilterOption, Recipe};
use crate::search::{filter_recipes, search, unique_universe};
use crate::storage::{KeyValueStore, StorageError, StorageKeys};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, warn};

mod draft;
mod likes;

pub use draft::{
    cooking_time_minutes, parse_ingredients, DraftError, RecipeDraft, COOKING_TIME_LABELS,
    DIFFICULTY_LEVELS,
};
pub use likes::LikeOverrides;

/// In-memory recipe state backed by a key-value store.
///
/// Only the created recipes, saved recipes, user comments and like overrides
/// are persisted. Everything else is rebuilt from the catalog.
///
/// # Examples
///
/// ```no_run
/// use recipe_store::{Catalog, MemoryStorage, RecipeStore, StoreConfig};
/// use std::sync::Arc;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = RecipeStore::open(
///     Catalog::builtin()?,
///     Arc::new(MemoryStorage::new()),
///     StoreConfig::default(),
/// )
/// .await;
///
/// store.like_recipe("2").await;
/// assert!(store.is_recipe_liked("2"));
/// # Ok(())
/// # }
/// ```
pub struct RecipeStore {
    storage: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
    config: StoreConfig,
    /// Seeded comments; the catalog's recipes are moved out into `recipes`.
    seed: Catalog,

    recipes: Vec<Recipe>,
    created_recipes: Vec<Recipe>,
    saved_recipes: Vec<Recipe>,
    filtered_recipes: Vec<Recipe>,
    search_query: String,
    active_filters: Vec<FilterOption>,
    liked: LikeOverrides,
    comments: BTreeMap<String, Vec<Comment>>,

    loaded: bool,
}

impl RecipeStore {
    /// Creates a store that has not read persisted state yet.
    ///
    /// Commands issued before [`RecipeStore::load`] only change memory.
    /// Loading merges them into the persisted state and writes the result
    /// back. Use [`RecipeStore::open`] to get a loaded store directly.
    pub fn new(catalog: Catalog, storage: Arc<dyn KeyValueStore>, config: StoreConfig) -> Self {
        let mut seed = catalog;
        let recipes = std::mem::take(&mut seed.recipes);

        RecipeStore {
            storage,
            keys: config.storage_keys(),
            config,
            seed,
            filtered_recipes: recipes.clone(),
            recipes,
            created_recipes: Vec::new(),
            saved_recipes: Vec::new(),
            search_query: String::new(),
            active_filters: Vec::new(),
            liked: LikeOverrides::default(),
            comments: BTreeMap::new(),
            loaded: false,
        }
    }

    /// Creates a store and loads persisted state into it.
    pub async fn open(
        catalog: Catalog,
        storage: Arc<dyn KeyValueStore>,
        config: StoreConfig,
    ) -> Self {
        let mut store = Self::new(catalog, storage, config);
        store.load().await;
        store
    }

    /// Reads the four persisted records.
    ///
    /// Each record is read independently. A record that cannot be read or
    /// decoded is logged and treated as empty. State built up before loading
    /// is merged on top of what was read, and every record it touched is
    /// written back. Persisted like counts that do not exceed the recipe's
    /// baseline are dropped.
    pub async fn load(&mut self) {
        let created = self.read_record(&self.keys.created_recipes).await;
        let saved = self.read_record(&self.keys.saved_recipes).await;
        let comments = self.read_record(&self.keys.comments).await;
        let liked = self.read_record(&self.keys.liked_recipes).await;

        let pending_created =
            std::mem::replace(&mut self.created_recipes, created.unwrap_or_default());
        let pending_saved = std::mem::replace(&mut self.saved_recipes, saved.unwrap_or_default());
        let pending_comments = std::mem::replace(&mut self.comments, comments.unwrap_or_default());
        let pending_liked = std::mem::replace(&mut self.liked, liked.unwrap_or_default());

        let rewrite_created = !pending_created.is_empty();
        let rewrite_saved = !pending_saved.is_empty();
        let rewrite_comments = !pending_comments.is_empty();
        let rewrite_liked = !pending_liked.is_empty();

        // Newer local recipes go on top
        self.created_recipes
            .retain(|recipe| !pending_created.iter().any(|p| p.id == recipe.id));
        let mut merged = pending_created;
        merged.append(&mut self.created_recipes);
        self.created_recipes = merged;

        for recipe in pending_saved {
            if !self.is_recipe_saved(&recipe.id) {
                self.saved_recipes.push(recipe);
            }
        }

        for (recipe_id, mut thread) in pending_comments {
            let persisted = self.comments.entry(recipe_id).or_default();
            thread.append(persisted);
            *persisted = thread;
        }

        self.liked.merge(pending_liked);
        let (recipes, created) = (&self.recipes, &self.created_recipes);
        self.liked.prune(|recipe_id| {
            recipes
                .iter()
                .chain(created)
                .find(|recipe| recipe.id == recipe_id)
                .map(Recipe::baseline_likes)
        });

        for (recipe_id, thread) in &self.comments {
            for recipe in self
                .recipes
                .iter_mut()
                .chain(self.created_recipes.iter_mut())
                .chain(self.filtered_recipes.iter_mut())
            {
                if &recipe.id == recipe_id {
                    recipe.comments = Some(thread.clone());
                }
            }
        }

        debug!(
            created = self.created_recipes.len(),
            saved = self.saved_recipes.len(),
            commented = self.comments.len(),
            liked = self.liked.len(),
            "Loaded persisted recipe state"
        );

        self.loaded = true;
        self.sync_displayed_with_created();

        if rewrite_created {
            self.persist(&self.keys.created_recipes, &self.created_recipes)
                .await;
        }
        if rewrite_saved {
            self.persist(&self.keys.saved_recipes, &self.saved_recipes)
                .await;
        }
        if rewrite_comments {
            self.persist(&self.keys.comments, &self.comments).await;
        }
        if rewrite_liked {
            self.persist(&self.keys.liked_recipes, &self.liked).await;
        }
    }

    /// Writes every persisted record.
    ///
    /// All four writes are attempted; the first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotLoaded` without writing anything if the
    /// store has not loaded yet.
    pub async fn flush(&self) -> Result<(), StorageError> {
        if !self.loaded {
            return Err(StorageError::NotLoaded);
        }
        let results = [
            self.write_record(&self.keys.created_recipes, &self.created_recipes)
                .await,
            self.write_record(&self.keys.saved_recipes, &self.saved_recipes)
                .await,
            self.write_record(&self.keys.comments, &self.comments).await,
            self.write_record(&self.keys.liked_recipes, &self.liked).await,
        ];
        results.into_iter().collect()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The built-in catalog, with user comments mirrored in.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Recipes authored on this device, newest first.
    pub fn created_recipes(&self) -> &[Recipe] {
        &self.created_recipes
    }

    /// Snapshots of saved recipes, in the order they were saved.
    pub fn saved_recipes(&self) -> &[Recipe] {
        &self.saved_recipes
    }

    /// The displayed list.
    pub fn filtered_recipes(&self) -> &[Recipe] {
        &self.filtered_recipes
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn active_filters(&self) -> &[FilterOption] {
        &self.active_filters
    }

    // ------------------------------------------------------------------
    // Search and filters
    // ------------------------------------------------------------------

    /// Sets the search text and rebuilds the displayed list.
    ///
    /// Active filters are applied first, then the text match. A blank query
    /// falls back to [`RecipeStore::apply_filters`].
    pub fn search_recipes(&mut self, query: &str) {
        self.search_query = query.to_string();

        if query.trim().is_empty() {
            self.apply_filters();
            return;
        }

        let universe = unique_universe(&self.recipes, &self.created_recipes);
        let filtered = filter_recipes(universe, &self.active_filters);
        self.filtered_recipes = search(filtered, query);
    }

    /// Adds the filter, or removes it if the exact pair is already active.
    ///
    /// The displayed list is left alone until the caller applies filters.
    pub fn toggle_filter(&mut self, category: FilterCategory, value: &str) {
        match self
            .active_filters
            .iter()
            .position(|filter| filter.matches(category, value))
        {
            Some(index) => {
                self.active_filters.remove(index);
            }
            None => self.active_filters.push(FilterOption::new(category, value)),
        }
    }

    /// Drops all filters and shows created recipes followed by the catalog.
    ///
    /// Unlike [`RecipeStore::apply_filters`], this does not de-duplicate ids.
    pub fn clear_filters(&mut self) {
        self.active_filters.clear();
        self.filtered_recipes = self
            .created_recipes
            .iter()
            .chain(self.recipes.iter())
            .cloned()
            .collect();
    }

    /// Rebuilds the displayed list from the de-duplicated universe and the
    /// active filters.
    pub fn apply_filters(&mut self) {
        let universe = unique_universe(&self.recipes, &self.created_recipes);
        self.filtered_recipes = filter_recipes(universe, &self.active_filters);
    }

    // ------------------------------------------------------------------
    // Saved recipes
    // ------------------------------------------------------------------

    /// Saves a snapshot of the recipe. Unknown or already saved ids are ignored.
    pub async fn save_recipe(&mut self, recipe_id: &str) {
        if self.is_recipe_saved(recipe_id) {
            return;
        }
        let Some(recipe) = self.find_recipe(recipe_id).cloned() else {
            return;
        };

        self.saved_recipes.push(recipe);
        self.persist(&self.keys.saved_recipes, &self.saved_recipes)
            .await;
    }

    pub async fn remove_saved_recipe(&mut self, recipe_id: &str) {
        self.saved_recipes.retain(|recipe| recipe.id != recipe_id);
        self.persist(&self.keys.saved_recipes, &self.saved_recipes)
            .await;
    }

    pub fn is_recipe_saved(&self, recipe_id: &str) -> bool {
        self.saved_recipes.iter().any(|recipe| recipe.id == recipe_id)
    }

    // ------------------------------------------------------------------
    // Likes
    // ------------------------------------------------------------------

    pub async fn like_recipe(&mut self, recipe_id: &str) {
        let Some(baseline) = self.find_recipe(recipe_id).map(Recipe::baseline_likes) else {
            return;
        };

        let count = self.liked.increment(recipe_id, baseline);
        debug!(recipe_id, count, "Liked recipe");
        self.persist(&self.keys.liked_recipes, &self.liked).await;
    }

    /// Takes back one like. The count never drops below the baseline.
    pub async fn unlike_recipe(&mut self, recipe_id: &str) {
        let Some(baseline) = self.find_recipe(recipe_id).map(Recipe::baseline_likes) else {
            return;
        };

        if let Some(count) = self.liked.decrement(recipe_id, baseline) {
            debug!(recipe_id, count, "Unliked recipe");
        }
        self.persist(&self.keys.liked_recipes, &self.liked).await;
    }

    pub fn is_recipe_liked(&self, recipe_id: &str) -> bool {
        self.liked.get(recipe_id).is_some()
    }

    /// Returns the current like count, or 0 for an unknown recipe.
    pub fn get_recipe_likes(&self, recipe_id: &str) -> u32 {
        let Some(baseline) = self.find_recipe(recipe_id).map(Recipe::baseline_likes) else {
            return 0;
        };
        self.liked
            .get(recipe_id)
            .map_or(baseline, |count| count.max(baseline))
    }

    // ------------------------------------------------------------------
    // Created recipes
    // ------------------------------------------------------------------

    /// Turns a draft into a self-authored recipe and puts it at the top of
    /// both the created list and the displayed list.
    ///
    /// # Errors
    ///
    /// Returns `DraftError::MissingField` if a required field is blank; the
    /// store is left unchanged.
    pub async fn add_created_recipe(&mut self, draft: RecipeDraft) -> Result<Recipe, DraftError> {
        draft.validate()?;

        let id = self.fresh_recipe_id();
        let recipe = draft.into_recipe(id, &self.config);
        debug!(id = %recipe.id, title = %recipe.title, "Created recipe");

        self.created_recipes.insert(0, recipe.clone());
        self.filtered_recipes.insert(0, recipe.clone());
        self.sync_displayed_with_created();

        self.persist(&self.keys.created_recipes, &self.created_recipes)
            .await;
        Ok(recipe)
    }

    // ------------------------------------------------------------------
    // Comments
    // ------------------------------------------------------------------

    /// Prepends a comment to the recipe's thread and mirrors the thread onto
    /// every collection holding that recipe.
    ///
    /// Returns `None` without touching anything if `text` is blank.
    pub async fn add_comment(&mut self, recipe_id: &str, text: &str) -> Option<Comment> {
        let comment = Comment::authored(text)?;

        let thread = self.comments.entry(recipe_id.to_string()).or_default();
        thread.insert(0, comment.clone());
        let thread = thread.clone();

        for recipe in self
            .recipes
            .iter_mut()
            .chain(self.filtered_recipes.iter_mut())
            .chain(self.created_recipes.iter_mut())
            .chain(self.saved_recipes.iter_mut())
        {
            if recipe.id == recipe_id {
                recipe.comments = Some(thread.clone());
            }
        }

        self.persist(&self.keys.comments, &self.comments).await;
        Some(comment)
    }

    /// Returns user comments, newest first, followed by any seeded comments.
    pub fn get_recipe_comments(&self, recipe_id: &str) -> Vec<Comment> {
        let mut comments = match self.comments.get(recipe_id) {
            Some(thread) => thread.clone(),
            None => self
                .find_recipe(recipe_id)
                .and_then(|recipe| recipe.comments.clone())
                .unwrap_or_default(),
        };

        if let Some(defaults) = self.seed.default_comments_for(recipe_id) {
            comments.extend_from_slice(defaults);
        }
        comments
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Looks a recipe up in the catalog, then in the created list.
    fn find_recipe(&self, recipe_id: &str) -> Option<&Recipe> {
        self.recipes
            .iter()
            .chain(self.created_recipes.iter())
            .find(|recipe| recipe.id == recipe_id)
    }

    fn fresh_recipe_id(&self) -> String {
        loop {
            let id = generate_id("created");
            let taken = self.find_recipe(&id).is_some() || self.is_recipe_saved(&id);
            if !taken {
                return id;
            }
        }
    }

    /// Re-derives the displayed list after the created list changed, but only
    /// once loading finished and nothing is narrowing the view.
    fn sync_displayed_with_created(&mut self) {
        if !self.loaded || !self.active_filters.is_empty() || !self.search_query.is_empty() {
            return;
        }
        self.filtered_recipes = unique_universe(&self.recipes, &self.created_recipes);
    }

    async fn read_record<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.storage.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                error!(key, error = %e, "Failed to read persisted record");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Discarding undecodable persisted record");
                None
            }
        }
    }

    async fn write_record<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let payload = serde_json::to_string(value)?;
        self.storage.set(key, payload).await
    }

    /// Best-effort write. Skipped until loading finished, so an unloaded
    /// store never overwrites records it has not read.
    async fn persist<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if !self.loaded {
            debug!(key, "Deferring write until persisted state is loaded");
            return;
        }
        if let Err(e) = self.write_record(key, value).await {
            error!(key, error = %e, "Failed to persist record");
        }
    }
}
