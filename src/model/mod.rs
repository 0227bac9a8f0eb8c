mod comment;
mod filter;
mod recipe;

pub use comment::Comment;
pub use filter::{FilterCategory, FilterOption, ParseFilterCategoryError};
pub use recipe::{parse_leading_int, Recipe};

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Author name used for everything created on this device.
pub const SELF_AUTHOR: &str = "You";

const ID_SUFFIX_LEN: usize = 8;

/// Generates an id of the form `{prefix}-{unix_millis}-{suffix}`.
///
/// The suffix is eight lowercase alphanumeric characters, so two ids minted
/// in the same millisecond still differ with overwhelming probability.
pub fn generate_id(prefix: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_SUFFIX_LEN)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();
    format!("{prefix}-{millis}-{suffix}")
}
