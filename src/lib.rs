uniffi::setup_scaffolding!();

pub mod catalog;
pub mod config;
pub mod ffi;
pub mod model;
pub mod search;
pub mod storage;
pub mod store;

pub use catalog::{Catalog, CatalogError};
pub use config::{ConfigError, StoreConfig};
pub use model::*;
pub use storage::{FileStorage, KeyValueStore, MemoryStorage, StorageError, StorageKeys};
pub use store::{DraftError, LikeOverrides, RecipeDraft, RecipeStore};
