//! Game catalog records as stored in `games.json`, `featured-games.json` and
//! `categories.json`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Number of tags kept by the listing projection.
pub const LIGHTWEIGHT_TAG_LIMIT: usize = 3;

/// Authoritative game record.
///
/// Fields the portal does not know about are kept in `extra` so that a
/// whole-document write never drops data an editor added by hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Game {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
    /// Legacy counter written by older admin builds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_date: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Game {
    /// View count with the legacy `views` fallback; a zero `viewCount` also
    /// falls through to `views`.
    pub fn effective_view_count(&self) -> u64 {
        self.view_count
            .filter(|count| *count > 0)
            .or(self.views)
            .unwrap_or(0)
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.category
            .as_deref()
            .is_some_and(|own| own.eq_ignore_ascii_case(category))
    }
}

/// Listing projection of [`Game`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightweightGame {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub view_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_date: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
}

impl From<&Game> for LightweightGame {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id.clone(),
            name: game.name.clone(),
            thumbnail_url: game.thumbnail_url.clone(),
            category: game.category.clone(),
            tags: game
                .tags
                .iter()
                .take(LIGHTWEIGHT_TAG_LIMIT)
                .cloned()
                .collect(),
            rating: game.rating,
            view_count: game.effective_view_count(),
            added_date: game.added_date.clone(),
            is_active: game.is_active,
            is_featured: game.is_featured,
        }
    }
}

impl LightweightGame {
    pub fn in_category(&self, category: &str) -> bool {
        self.category
            .as_deref()
            .is_some_and(|own| own.eq_ignore_ascii_case(category))
    }

    /// Substring match on name, category or any kept tag. `needle` must
    /// already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        let hit = |text: &str| text.to_lowercase().contains(needle);
        hit(&self.name)
            || self.category.as_deref().is_some_and(hit)
            || self.tags.iter().any(|tag| hit(tag))
    }
}

/// Hand-curated spotlight entry from `featured-games.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeaturedGame {
    pub id: String,
    pub name: String,
    pub description: String,
    pub emoji: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub game_url: String,
    pub is_active: bool,
    pub gradient: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FeaturedGame {
    pub fn sort_key(&self) -> i64 {
        self.order.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn game_with_tags(tags: &[&str]) -> Game {
        Game {
            id: "cat-jump".to_string(),
            name: "Cat Jump".to_string(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn projection_keeps_first_three_tags_in_order() {
        let game = game_with_tags(&["arcade", "cats", "jump", "casual", "kids"]);
        let light = LightweightGame::from(&game);
        assert_eq!(light.tags, vec!["arcade", "cats", "jump"]);
    }

    #[test]
    fn search_matches_name_category_and_kept_tags() {
        let mut game = game_with_tags(&["cats", "jump", "rooftop", "hidden"]);
        game.category = Some("Arcade".to_string());
        let light = LightweightGame::from(&game);

        assert!(light.matches("cat j"));
        assert!(light.matches("arcade"));
        assert!(light.matches("roof"));
        assert!(!light.matches("hidden"));
        assert!(!light.matches("puzzle"));
    }

    #[test]
    fn projection_keeps_short_tag_lists_intact() {
        let game = game_with_tags(&["puzzle"]);
        assert_eq!(LightweightGame::from(&game).tags, vec!["puzzle"]);
    }

    #[test]
    fn view_count_falls_back_to_legacy_views() {
        let mut game = game_with_tags(&[]);
        game.views = Some(42);
        assert_eq!(game.effective_view_count(), 42);

        game.view_count = Some(0);
        assert_eq!(game.effective_view_count(), 42);

        game.view_count = Some(7);
        assert_eq!(game.effective_view_count(), 7);

        game.view_count = None;
        game.views = None;
        assert_eq!(game.effective_view_count(), 0);
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let raw = json!({
            "id": "g1",
            "name": "Cat Jump",
            "isActive": true,
            "developer": "Whisker Works",
            "playCount": 12
        });
        let game: Game = serde_json::from_value(raw).expect("game decodes");
        assert_eq!(game.extra.get("developer"), Some(&json!("Whisker Works")));

        let encoded = serde_json::to_value(&game).expect("game encodes");
        assert_eq!(encoded["developer"], json!("Whisker Works"));
        assert_eq!(encoded["playCount"], json!(12));
        assert_eq!(encoded["isActive"], json!(true));
    }

    #[test]
    fn category_match_ignores_case() {
        let mut game = game_with_tags(&[]);
        game.category = Some("Puzzle".to_string());
        assert!(game.in_category("puzzle"));
        assert!(!game.in_category("action"));
    }
}
