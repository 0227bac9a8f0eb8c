use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse like counts that differ from a recipe's baseline.
///
/// An entry exists only while the count sits above the baseline, so presence
/// doubles as the "liked" flag. Lookups return `Option` rather than exposing
/// the map, which keeps absent and present-but-zero apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LikeOverrides {
    counts: BTreeMap<String, u32>,
}

impl LikeOverrides {
    pub fn get(&self, recipe_id: &str) -> Option<u32> {
        self.counts.get(recipe_id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Adds one like on top of the current override, or the baseline when
    /// there is none. Returns the new count.
    pub fn increment(&mut self, recipe_id: &str, baseline: u32) -> u32 {
        let current = self.get(recipe_id).unwrap_or(baseline).max(baseline);
        let next = current.saturating_add(1);
        self.counts.insert(recipe_id.to_string(), next);
        next
    }

    /// Removes one like, never going below `baseline`. The entry is dropped
    /// once it reaches the baseline.
    ///
    /// Returns `None` if the recipe had no override, otherwise the new count.
    pub fn decrement(&mut self, recipe_id: &str, baseline: u32) -> Option<u32> {
        let current = self.get(recipe_id)?;
        let next = current.saturating_sub(1).max(baseline);
        if next == baseline {
            self.counts.remove(recipe_id);
        } else {
            self.counts.insert(recipe_id.to_string(), next);
        }
        Some(next)
    }

    /// Folds `other` into this map, keeping the higher count per recipe.
    pub fn merge(&mut self, other: LikeOverrides) {
        for (recipe_id, count) in other.counts {
            let entry = self.counts.entry(recipe_id).or_insert(count);
            *entry = (*entry).max(count);
        }
    }

    /// Drops every entry whose count does not exceed the baseline reported
    /// by `baseline_of`. Ids for which it returns `None` are kept.
    pub fn prune(&mut self, mut baseline_of: impl FnMut(&str) -> Option<u32>) {
        self.counts
            .retain(|recipe_id, count| baseline_of(recipe_id).map_or(true, |b| *count > b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_from_baseline() {
        let mut likes = LikeOverrides::default();
        assert_eq!(likes.increment("2", 2560), 2561);
        assert_eq!(likes.increment("2", 2560), 2562);
        assert_eq!(likes.get("2"), Some(2562));
    }

    #[test]
    fn test_decrement_clamps_and_drops_entry() {
        let mut likes = LikeOverrides::default();
        likes.increment("2", 10);
        likes.increment("2", 10);

        assert_eq!(likes.decrement("2", 10), Some(11));
        assert_eq!(likes.get("2"), Some(11));
        assert_eq!(likes.decrement("2", 10), Some(10));
        assert_eq!(likes.get("2"), None);
        assert_eq!(likes.decrement("2", 10), None);
        assert!(likes.is_empty());
    }

    #[test]
    fn test_stale_override_below_baseline() {
        let mut likes: LikeOverrides = serde_json::from_str(r#"{"2": 3}"#).unwrap();
        assert_eq!(likes.decrement("2", 10), Some(10));
        assert!(likes.is_empty());

        let mut likes: LikeOverrides = serde_json::from_str(r#"{"2": 3}"#).unwrap();
        assert_eq!(likes.increment("2", 10), 11);
    }

    #[test]
    fn test_merge_keeps_higher_count() {
        let mut persisted: LikeOverrides = serde_json::from_str(r#"{"2": 12, "4": 5}"#).unwrap();
        let pending: LikeOverrides = serde_json::from_str(r#"{"2": 11, "1": 8}"#).unwrap();
        persisted.merge(pending);
        assert_eq!(persisted.get("1"), Some(8));
        assert_eq!(persisted.get("2"), Some(12));
        assert_eq!(persisted.get("4"), Some(5));
    }

    #[test]
    fn test_prune_drops_counts_at_or_below_baseline() {
        let mut likes: LikeOverrides =
            serde_json::from_str(r#"{"a": 3, "b": 10, "c": 11, "gone": 1}"#).unwrap();
        likes.prune(|id| match id {
            "gone" => None,
            _ => Some(10),
        });
        assert_eq!(likes.get("a"), None);
        assert_eq!(likes.get("b"), None);
        assert_eq!(likes.get("c"), Some(11));
        assert_eq!(likes.get("gone"), Some(1));
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut likes = LikeOverrides::default();
        likes.increment("5", 0);
        assert_eq!(serde_json::to_string(&likes).unwrap(), r#"{"5":1}"#);
        assert_eq!(likes.len(), 1);
    }
}
