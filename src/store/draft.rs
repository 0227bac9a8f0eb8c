use crate::config::StoreConfig;
use crate::model::{Recipe, SELF_AUTHOR};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cooking-time labels offered by the creation form.
pub const COOKING_TIME_LABELS: [&str; 4] = ["< 15 min", "< 20 min", "< 30 min", "1 hour"];

/// Difficulty labels offered by the creation form.
pub const DIFFICULTY_LEVELS: [&str; 3] = ["Easy", "Medium", "Hard"];

const DEFAULT_COOKING_MINUTES: u32 = 15;

// Checked in order; the first label fragment found wins.
const COOKING_TIME_MINUTES: [(&str, u32); 4] =
    [("15", 15), ("20", 20), ("30", 30), ("1 hour", 60)];

const LUNCH_KEYWORDS: [&str; 3] = ["lunch", "burger", "pasta"];
const DINNER_KEYWORDS: [&str; 2] = ["dinner", "steak"];
const MEAT_KEYWORDS: [&str; 4] = ["meat", "beef", "chicken", "pork"];

// Metric abbreviations that may follow a leading quantity, as in "200 g pasta"
const METRIC_UNITS: [&str; 4] = ["g", "kg", "ml", "l"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Raw input from the recipe creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub title: String,
    /// One ingredient per line, optionally led by a quantity
    pub ingredients: String,
    /// One step per line
    pub steps: String,
    /// One of [`COOKING_TIME_LABELS`]
    pub cooking_time: String,
    /// One of [`DIFFICULTY_LEVELS`]. Validated but not stored on the recipe.
    pub difficulty: String,
    pub recipe_image: Option<String>,
}

impl RecipeDraft {
    /// Rejects drafts with any blank required field.
    pub fn validate(&self) -> Result<(), DraftError> {
        let required = [
            ("title", &self.title),
            ("ingredients", &self.ingredients),
            ("steps", &self.steps),
            ("cookingTime", &self.cooking_time),
            ("difficulty", &self.difficulty),
        ];
        match required.into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(DraftError::MissingField(name)),
            None => Ok(()),
        }
    }

    /// Turns the draft into a self-authored recipe with the given id.
    pub(crate) fn into_recipe(self, id: String, config: &StoreConfig) -> Recipe {
        let ingredients = parse_ingredients(&self.ingredients);
        let diets = infer_diets(&ingredients);

        Recipe {
            id,
            meal_time: vec![infer_meal_time(&self.title).to_string()],
            title: self.title,
            creator: SELF_AUTHOR.to_string(),
            image: self
                .recipe_image
                .unwrap_or_else(|| config.placeholder_image.clone()),
            likes: "0".to_string(),
            rating: config.default_rating.clone(),
            cooking_time: cooking_time_minutes(&self.cooking_time),
            diets,
            ingredients,
            comments: None,
        }
    }
}

/// Splits the ingredient text into lowercase name tokens.
///
/// A leading numeric quantity is dropped along with a metric unit right after
/// it. Other units are kept as part of the name.
pub fn parse_ingredients(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let parts: Vec<&str> = line.split(' ').collect();
            if parts.len() > 1 && is_number(parts[0]) {
                let mut rest = &parts[1..];
                if rest.len() > 1 && METRIC_UNITS.contains(&rest[0].to_lowercase().as_str()) {
                    rest = &rest[1..];
                }
                rest.join(" ").to_lowercase()
            } else {
                line.to_lowercase()
            }
        })
        .collect()
}

fn is_number(token: &str) -> bool {
    token.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Maps a cooking-time label to whole minutes, defaulting to 15.
pub fn cooking_time_minutes(label: &str) -> u32 {
    COOKING_TIME_MINUTES
        .iter()
        .find(|(fragment, _)| label.contains(fragment))
        .map_or(DEFAULT_COOKING_MINUTES, |(_, minutes)| *minutes)
}

fn infer_meal_time(title: &str) -> &'static str {
    let title = title.to_lowercase();
    if LUNCH_KEYWORDS.iter().any(|k| title.contains(k)) {
        "Lunch"
    } else if DINNER_KEYWORDS.iter().any(|k| title.contains(k)) {
        "Dinner"
    } else {
        "Breakfast"
    }
}

fn infer_diets(ingredients: &[String]) -> Vec<String> {
    let has_meat = ingredients
        .iter()
        .any(|item| MEAT_KEYWORDS.iter().any(|k| item.contains(k)));
    if has_meat {
        Vec::new()
    } else {
        vec!["Vegetarian".to_string()]
    }
}
