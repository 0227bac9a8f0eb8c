use super::{generate_id, SELF_AUTHOR};
use serde::{Deserialize, Serialize};

/// A comment left on a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub user: String,
    /// Locale-formatted date, e.g. `5/23/2025`. Not sortable.
    pub date: String,
    pub text: String,
    pub likes: String,
}

impl Comment {
    /// Builds a comment authored on this device, dated today.
    ///
    /// Returns `None` when `text` is blank; otherwise the stored text is trimmed.
    pub fn authored(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        Some(Comment {
            id: generate_id("comment"),
            user: SELF_AUTHOR.to_string(),
            date: chrono::Local::now().format("%-m/%-d/%Y").to_string(),
            text: text.to_string(),
            likes: "0".to_string(),
        })
    }
}
