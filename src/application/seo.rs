//! Page metadata: title, description, canonical URL, Open Graph and Twitter fields.

use crate::domain::{
    games::Game,
    seo::{GamePageSeo, SeoSettings, SeoSettingsDocument},
};

const PLACEHOLDER_GAME_IMAGE: &str = "/placeholder-game.png";
const DEFAULT_OG_IMAGE: &str = "/og-image.png";
const DEFAULT_AUTHOR: &str = "Gaming Platform";

/// Everything the layout needs to emit `<head>` tags for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub author: String,
    pub site_name: String,
    pub canonical: String,
    pub robots: &'static str,
    pub og_title: String,
    pub og_description: String,
    pub og_image: String,
    pub og_type: &'static str,
    pub twitter_card: &'static str,
    pub twitter_site: String,
    pub theme_color: String,
    pub viewport: String,
    pub favicon: String,
}

impl PageMeta {
    pub fn keywords_csv(&self) -> String {
        self.keywords.join(", ")
    }

    fn base(settings: &SeoSettings, path: &str) -> Self {
        Self {
            title: settings.site_name.clone(),
            description: settings.site_description.clone(),
            keywords: settings.keywords.clone(),
            author: non_empty_or(&settings.author, DEFAULT_AUTHOR),
            site_name: settings.site_name.clone(),
            canonical: canonical_url(settings, path),
            robots: "index, follow",
            og_title: non_empty_or(&settings.og_title, &settings.site_name),
            og_description: non_empty_or(&settings.og_description, &settings.site_description),
            og_image: non_empty_or(&settings.og_image, DEFAULT_OG_IMAGE),
            og_type: "website",
            twitter_card: "summary_large_image",
            twitter_site: settings.twitter_handle.clone(),
            theme_color: settings.meta_tags.theme_color.clone(),
            viewport: settings.meta_tags.viewport.clone(),
            favicon: settings.favicon.clone(),
        }
    }

    fn titled(mut self, title: String, description: String) -> Self {
        self.og_title = title.clone();
        self.og_description = description.clone();
        self.title = title;
        self.description = description;
        self
    }
}

/// Site URL without its trailing slash, followed by `path`.
pub fn canonical_url(settings: &SeoSettings, path: &str) -> String {
    format!("{}{path}", settings.base_url())
}

/// Homepage metadata straight from the site identity.
pub fn site_meta(settings: &SeoSettings) -> PageMeta {
    PageMeta::base(settings, "/")
}

/// Metadata for a fixed section page such as `/about`.
pub fn section_meta(
    settings: &SeoSettings,
    path: &str,
    heading: &str,
    description: &str,
    keywords: &[&str],
) -> PageMeta {
    let title = format!("{heading} - {}", settings.site_name);
    let mut meta = PageMeta::base(settings, path).titled(title, description.to_string());
    meta.keywords = keywords.iter().map(|keyword| keyword.to_string()).collect();
    meta
}

pub fn new_games_meta(settings: &SeoSettings) -> PageMeta {
    section_meta(
        settings,
        "/new-games",
        "New Games",
        "Discover the latest and newest games! Play fresh games added to our collection.",
        &[
            "new games",
            "latest games",
            "fresh games",
            "online games",
            "browser games",
        ],
    )
}

pub fn about_meta(settings: &SeoSettings) -> PageMeta {
    section_meta(
        settings,
        "/about",
        "About Us",
        "Learn about our mission to provide the best free online gaming experience. Discover our story and values.",
        &[
            "about us",
            "gaming platform",
            "online games",
            "mission",
            "values",
        ],
    )
}

/// Search page metadata. Result pages are kept out of indexes.
pub fn search_meta(settings: &SeoSettings, query: &str) -> PageMeta {
    let mut meta = section_meta(
        settings,
        "/search",
        "Search Games",
        "Search our collection of free online games by name, category or tag.",
        &["search games", "find games", "online games", "browser games"],
    );
    if !query.is_empty() {
        meta.title = format!("{query} - Search Games - {}", settings.site_name);
        meta.og_title = meta.title.clone();
        meta.robots = "noindex, follow";
    }
    meta
}

pub fn not_found_meta(settings: &SeoSettings) -> PageMeta {
    let mut meta = PageMeta::base(settings, "/").titled(
        format!("Page Not Found - {}", settings.site_name),
        "Sorry, the page you are looking for could not be found.".to_string(),
    );
    meta.robots = "noindex, follow";
    meta
}

/// Game detail metadata rendered from the `gamePageSEO` templates.
pub fn game_meta(document: &SeoSettingsDocument, game: &Game) -> PageMeta {
    let settings = &document.seo_settings;
    let templates = document.game_page_seo.clone().unwrap_or_default();
    let values = TemplateValues {
        game_name: &game.name,
        site_name: &settings.site_name,
        game_description: &game.description,
        category: game.category.as_deref().unwrap_or("game"),
    };

    let title = render_or(
        &templates,
        |t| t.title_template.as_deref(),
        &values,
        || format!("{} - Play Free Online | {}", game.name, settings.site_name),
    );
    let description = render_or(
        &templates,
        |t| t.description_template.as_deref(),
        &values,
        || format!("Play {} for free online! No download required.", game.name),
    );
    let keywords = render_or(
        &templates,
        |t| t.keywords_template.as_deref(),
        &values,
        || format!("{}, free game, online game", game.name),
    );

    let mut meta = PageMeta::base(settings, &format!("/game/{}", game.id)).titled(title, description);
    meta.keywords = keywords
        .split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect();
    meta.og_image = game_image(settings, game);
    meta
}

/// Thumbnail, then the site Open Graph image, then the bundled placeholder.
pub fn game_image(settings: &SeoSettings, game: &Game) -> String {
    game.thumbnail_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .or_else(|| Some(settings.og_image.as_str()).filter(|url| !url.is_empty()))
        .unwrap_or(PLACEHOLDER_GAME_IMAGE)
        .to_string()
}

struct TemplateValues<'a> {
    game_name: &'a str,
    site_name: &'a str,
    game_description: &'a str,
    category: &'a str,
}

impl TemplateValues<'_> {
    /// Each placeholder is substituted once, at its first occurrence.
    fn apply(&self, template: &str) -> String {
        [
            ("{gameName}", self.game_name),
            ("{siteName}", self.site_name),
            ("{gameDescription}", self.game_description),
            ("{category}", self.category),
        ]
        .into_iter()
        .fold(template.to_string(), |text, (placeholder, value)| {
            text.replacen(placeholder, value, 1)
        })
    }
}

fn render_or(
    templates: &GamePageSeo,
    pick: impl Fn(&GamePageSeo) -> Option<&str>,
    values: &TemplateValues<'_>,
    fallback: impl FnOnce() -> String,
) -> String {
    match pick(templates).filter(|template| !template.is_empty()) {
        Some(template) => values.apply(template),
        None => fallback(),
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
