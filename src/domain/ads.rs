//! Advertisement slots (`ads.json`).

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::DomainError;

/// Page regions that can carry ads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdPosition {
    Header,
    Footer,
    Sidebar,
    HeroBottom,
    ContentTop,
    GameDetailsBottom,
    ContentBottom,
    RecommendationsTop,
}

impl AdPosition {
    pub const ALL: [AdPosition; 8] = [
        AdPosition::Header,
        AdPosition::Footer,
        AdPosition::Sidebar,
        AdPosition::HeroBottom,
        AdPosition::ContentTop,
        AdPosition::GameDetailsBottom,
        AdPosition::ContentBottom,
        AdPosition::RecommendationsTop,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            AdPosition::Header => "header",
            AdPosition::Footer => "footer",
            AdPosition::Sidebar => "sidebar",
            AdPosition::HeroBottom => "hero-bottom",
            AdPosition::ContentTop => "content-top",
            AdPosition::GameDetailsBottom => "game-details-bottom",
            AdPosition::ContentBottom => "content-bottom",
            AdPosition::RecommendationsTop => "recommendations-top",
        }
    }
}

impl fmt::Display for AdPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdPosition {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        AdPosition::ALL
            .into_iter()
            .find(|position| position.as_str() == value)
            .ok_or_else(|| DomainError::validation(format!("unknown ad position `{value}`")))
    }
}

/// A single ad. `position` stays a plain string so one unknown placement does
/// not invalidate the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ad {
    pub id: String,
    pub name: String,
    pub position: String,
    pub html_content: String,
    pub is_active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Ad {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            position: String::new(),
            html_content: String::new(),
            is_active: true,
            extra: Map::new(),
        }
    }
}

impl Ad {
    pub fn placed_at(&self, position: AdPosition) -> bool {
        self.position == position.as_str()
    }
}
