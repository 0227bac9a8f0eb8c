use super::{Comment, SELF_AUTHOR};
use serde::{Deserialize, Serialize};

/// A single recipe as shown in the feed, either from the built-in catalog or
/// authored on this device.
///
/// `likes` and `rating` are kept string-encoded to match the persisted layout.
/// Use [`Recipe::baseline_likes`] for the numeric like count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub creator: String,
    /// Image reference: an asset name for catalog recipes, a local file
    /// reference for created ones
    pub image: String,
    pub likes: String,
    pub rating: String,
    /// Cooking time in minutes
    pub cooking_time: u32,
    pub meal_time: Vec<String>,
    pub diets: Vec<String>,
    /// Lowercase ingredient name tokens
    pub ingredients: Vec<String>,
    /// Present only once at least one comment exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
}

impl Recipe {
    /// Returns the like count the recipe shipped with.
    ///
    /// Parsing follows the lenient integer convention of the persisted data:
    /// leading digits are used and anything unparseable counts as zero.
    pub fn baseline_likes(&self) -> u32 {
        parse_leading_int(&self.likes)
    }

    /// Returns true if the recipe was authored on this device.
    pub fn is_self_authored(&self) -> bool {
        self.creator == SELF_AUTHOR
    }

    /// Case-insensitive substring match against title, creator and every
    /// ingredient token. `lower_query` must already be lowercased.
    pub fn matches_query(&self, lower_query: &str) -> bool {
        self.title.to_lowercase().contains(lower_query)
            || self.creator.to_lowercase().contains(lower_query)
            || self
                .ingredients
                .iter()
                .any(|ingredient| ingredient.to_lowercase().contains(lower_query))
    }
}

/// Parses the leading decimal digits of `value`, skipping leading whitespace.
///
/// Returns 0 when no digits are present or the number does not fit.
pub fn parse_leading_int(value: &str) -> u32 {
    let digits: String = value
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
