//! Editable page copy: `homepage-content.json` and `footer-content.json`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomepageContent {
    pub hero: HeroSection,
    pub featured_game: FeaturedGameSection,
    pub new_games: NewGamesSection,
    pub features: TextSection,
    pub what_is: TextSection,
    pub how_to_play: TextSection,
    pub why_choose_us: TextSection,
    pub faq: TextSection,
    pub you_might_also_like: ToggleSection,
    pub custom_html_sections: Vec<Value>,
    pub section_order: BTreeMap<String, i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for HomepageContent {
    fn default() -> Self {
        let section_order = [
            "featuredGame",
            "newGames",
            "features",
            "whatIs",
            "howToPlay",
            "whyChooseUs",
            "faq",
            "youMightAlsoLike",
        ]
        .into_iter()
        .zip(0..)
        .map(|(name, index)| (name.to_string(), index))
        .collect();

        Self {
            hero: HeroSection::default(),
            featured_game: FeaturedGameSection::default(),
            new_games: NewGamesSection::default(),
            features: TextSection::hidden("Why Play With Us"),
            what_is: TextSection::hidden("What is Our Gaming Platform?"),
            how_to_play: TextSection::hidden("How to Get Started"),
            why_choose_us: TextSection::hidden("Why Choose Our Platform?"),
            faq: TextSection::hidden("Frequently Asked Questions"),
            you_might_also_like: ToggleSection { is_visible: true },
            custom_html_sections: Vec::new(),
            section_order,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroSection {
    pub is_visible: bool,
    pub title: String,
    pub subtitle: String,
    pub background_gradient: String,
}

impl Default for HeroSection {
    fn default() -> Self {
        Self {
            is_visible: false,
            title: "GAMES".to_string(),
            subtitle: "Best Online Gaming Platform".to_string(),
            background_gradient: "from-blue-500 to-purple-600".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeaturedGameSection {
    pub is_visible: bool,
    pub show_play_button: bool,
}

impl Default for FeaturedGameSection {
    fn default() -> Self {
        Self {
            is_visible: true,
            show_play_button: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewGamesSection {
    pub is_visible: bool,
    pub title: String,
    pub limit: usize,
    pub show_view_all_button: bool,
}

impl Default for NewGamesSection {
    fn default() -> Self {
        Self {
            is_visible: true,
            title: "New Games".to_string(),
            limit: 8,
            show_view_all_button: true,
        }
    }
}

/// A free-form marketing section; only visibility and title are interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextSection {
    pub is_visible: bool,
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TextSection {
    fn hidden(title: &str) -> Self {
        Self {
            is_visible: false,
            title: title.to_string(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToggleSection {
    pub is_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterContent {
    pub social_links: Vec<FooterLink>,
    pub legal_links: Vec<FooterLink>,
    pub company_info: CompanyInfo,
    pub custom_html: String,
    pub is_visible: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for FooterContent {
    fn default() -> Self {
        Self {
            social_links: Vec::new(),
            legal_links: Vec::new(),
            company_info: CompanyInfo::default(),
            custom_html: String::new(),
            is_visible: true,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterLink {
    pub name: String,
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyInfo {
    pub name: String,
    pub description: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        Self {
            name: "GAMES".to_string(),
            description: "Best Online Gaming Platform".to_string(),
            address: String::new(),
            email: "contact@yourgamesite.com".to_string(),
            phone: String::new(),
        }
    }
}
