//! SEO settings document (`seo-settings.json`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_SITE_NAME: &str = "67 Clicker - Gaming Platform";
pub const DEFAULT_SITE_DESCRIPTION: &str =
    "The Ultimate Number-Clicking Adventure That Combines Fun with Strategic Thinking.";
pub const DEFAULT_SITE_URL: &str = "https://67clickers.online";

/// Top-level shape of `seo-settings.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoSettingsDocument {
    #[serde(rename = "seoSettings")]
    pub seo_settings: SeoSettings,
    #[serde(rename = "gamePageSEO", skip_serializing_if = "Option::is_none")]
    pub game_page_seo: Option<GamePageSeo>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Site identity. Missing fields are filled from the compiled-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoSettings {
    pub site_name: String,
    pub site_description: String,
    pub site_url: String,
    pub site_logo: String,
    pub favicon: String,
    pub keywords: Vec<String>,
    pub author: String,
    pub twitter_handle: String,
    pub og_image: String,
    pub og_title: String,
    pub og_description: String,
    pub meta_tags: MetaTags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<StructuredDataSettings>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SeoSettings {
    fn default() -> Self {
        Self {
            site_name: DEFAULT_SITE_NAME.to_string(),
            site_description: DEFAULT_SITE_DESCRIPTION.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            site_logo: "/favicon.svg".to_string(),
            favicon: "/favicon.ico".to_string(),
            keywords: ["67Clicker", "browser games", "free games", "casual games"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            author: "67Clicker".to_string(),
            twitter_handle: "@67clicker".to_string(),
            og_image: "/og-image.png".to_string(),
            og_title: DEFAULT_SITE_NAME.to_string(),
            og_description: DEFAULT_SITE_DESCRIPTION.to_string(),
            meta_tags: MetaTags::default(),
            structured_data: None,
            extra: Map::new(),
        }
    }
}

impl SeoSettings {
    pub fn structured_data_enabled(&self) -> bool {
        self.structured_data
            .as_ref()
            .is_some_and(|settings| settings.enabled)
    }

    /// Site URL without a trailing slash, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }

    /// Resolve a site-relative path to an absolute URL; absolute URLs pass through.
    pub fn absolute_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{path}", self.base_url())
        } else {
            format!("{}/{path}", self.base_url())
        }
    }

    pub fn organization_name(&self) -> &str {
        self.structured_data
            .as_ref()
            .and_then(|settings| non_empty(settings.organization_name.as_deref()))
            .unwrap_or(&self.site_name)
    }

    pub fn organization_url(&self) -> &str {
        self.structured_data
            .as_ref()
            .and_then(|settings| non_empty(settings.organization_url.as_deref()))
            .unwrap_or(&self.site_url)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetaTags {
    pub viewport: String,
    pub theme_color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for MetaTags {
    fn default() -> Self {
        Self {
            viewport: "width=device-width, initial-scale=1.0".to_string(),
            theme_color: "#475569".to_string(),
            extra: Map::new(),
        }
    }
}

/// Organization metadata for JSON-LD output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredDataSettings {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_logo: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub same_as: Vec<String>,
}

/// Templates for game detail page metadata.
///
/// Placeholders: `{gameName}`, `{siteName}`, `{gameDescription}`, `{category}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GamePageSeo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords_template: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
