//! The `Recipe` entity shared by the HTTP layer, the service and the stores.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single recipe row.
///
/// Every field is optional on the wire: missing strings become `""`, missing
/// integers become `0`. No field is validated beyond its type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipe {
    /// Primary key, assigned by the store on create.
    pub id: i32,
    pub title: String,
    pub ingredients: String,
    pub steps: String,
    /// Minutes.
    pub cooking_time: i32,
    /// Comma-joined tag list, e.g. `"vegan,healthy"`.
    pub dietary_tags: Option<String>,
}

impl Recipe {
    /// Raw, case-sensitive substring test over `dietary_tags`.
    ///
    /// `"vegan"` matches `"veganism,raw"` as well; there is no tokenization.
    pub fn matches_tag(&self, tag: &str) -> bool {
        self.dietary_tags
            .as_deref()
            .map(|tags| tags.contains(tag))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_take_defaults() {
        let recipe: Recipe = serde_json::from_value(json!({ "title": "New Recipe" })).unwrap();
        assert_eq!(recipe.id, 0);
        assert_eq!(recipe.title, "New Recipe");
        assert_eq!(recipe.ingredients, "");
        assert_eq!(recipe.steps, "");
        assert_eq!(recipe.cooking_time, 0);
        assert_eq!(recipe.dietary_tags, None);
    }

    #[test]
    fn serializes_with_camel_case_names() {
        let recipe = Recipe {
            id: 7,
            title: "Vegan Salad".into(),
            cooking_time: 15,
            dietary_tags: Some("vegan,healthy".into()),
            ..Default::default()
        };
        let v = serde_json::to_value(&recipe).unwrap();
        assert_eq!(v["cookingTime"], 15);
        assert_eq!(v["dietaryTags"], "vegan,healthy");
        assert!(v.get("cooking_time").is_none());
    }

    #[test]
    fn negative_cooking_time_is_accepted() {
        let recipe: Recipe = serde_json::from_value(json!({ "cookingTime": -5 })).unwrap();
        assert_eq!(recipe.cooking_time, -5);
    }

    #[test]
    fn tag_match_is_raw_substring() {
        let recipe = Recipe {
            dietary_tags: Some("veganism,healthy".into()),
            ..Default::default()
        };
        assert!(recipe.matches_tag("vegan"));
        assert!(recipe.matches_tag("ism,heal"));
        assert!(!recipe.matches_tag("Vegan"));
        assert!(!Recipe::default().matches_tag("vegan"));
    }
}
