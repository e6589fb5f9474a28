//! Schema.org JSON-LD generation.
//!
//! Every generator is gated on `seoSettings.structuredData.enabled`; when it
//! is off the generators return `None` and page generation yields nothing.
//! The pure `build_*` functions take the settings directly, while
//! [`StructuredDataService`] loads them through the content cache first.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::seo::SeoSettings;

use super::content::ContentService;

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

const SOURCE: &str = "application::structured_data";
const FEATURED_LIST_NAME: &str = "Featured Games";
const FEATURED_LIST_DESCRIPTION: &str = "Popular and trending games on our platform";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizationSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(rename = "sameAs", skip_serializing_if = "Option::is_none")]
    pub same_as: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebSiteSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub url: String,
    #[serde(rename = "potentialAction")]
    pub potential_action: SearchAction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchAction {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub target: String,
    #[serde(rename = "query-input")]
    pub query_input: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGameSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub description: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    pub game_platform: &'static str,
    pub application_category: &'static str,
    pub operating_system: &'static str,
    pub offers: Offer,
    pub publisher: Publisher,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub price: &'static str,
    pub price_currency: &'static str,
    pub availability: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Publisher {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemListSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub description: String,
    pub number_of_items: usize,
    pub item_list_element: Vec<GameListItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameListItem {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub position: usize,
    pub url: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbListSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub item_list_element: Vec<BreadcrumbItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreadcrumbItem {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub position: usize,
    pub name: String,
    pub item: String,
}

/// Game fields needed for a `VideoGame` schema.
#[derive(Debug, Clone, Default)]
pub struct GameSchemaInput {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListedGame {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct GameListInput {
    pub name: String,
    pub description: String,
    pub games: Vec<ListedGame>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Breadcrumb {
    pub name: String,
    pub url: String,
}

impl Breadcrumb {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Page-specific input selecting the third schema of a page.
#[derive(Debug, Clone)]
pub enum PageKind {
    Homepage {
        featured_games: Option<Vec<ListedGame>>,
    },
    Game(GameSchemaInput),
    Category(GameListInput),
}

fn enabled(settings: &SeoSettings) -> Option<&SeoSettings> {
    settings.structured_data_enabled().then_some(settings)
}

pub fn build_organization(settings: &SeoSettings) -> Option<OrganizationSchema> {
    let settings = enabled(settings)?;
    let structured = settings.structured_data.as_ref()?;

    Some(OrganizationSchema {
        context: SCHEMA_CONTEXT,
        kind: "Organization",
        name: settings.organization_name().to_string(),
        url: settings.organization_url().to_string(),
        logo: structured
            .organization_logo
            .clone()
            .filter(|logo| !logo.is_empty()),
        same_as: (!structured.same_as.is_empty()).then(|| structured.same_as.clone()),
    })
}

pub fn build_website(settings: &SeoSettings) -> Option<WebSiteSchema> {
    let settings = enabled(settings)?;

    Some(WebSiteSchema {
        context: SCHEMA_CONTEXT,
        kind: "WebSite",
        name: settings.site_name.clone(),
        url: settings.site_url.clone(),
        potential_action: SearchAction {
            kind: "SearchAction",
            target: format!("{}/search?q={{search_term_string}}", settings.base_url()),
            query_input: "required name=search_term_string",
        },
    })
}

pub fn build_video_game(settings: &SeoSettings, game: &GameSchemaInput) -> Option<VideoGameSchema> {
    let settings = enabled(settings)?;

    Some(VideoGameSchema {
        context: SCHEMA_CONTEXT,
        kind: "VideoGame",
        name: game.name.clone(),
        description: game.description.clone(),
        url: format!("{}/game/{}", settings.base_url(), game.id),
        image: game.image.clone().filter(|image| !image.is_empty()),
        genre: game.category.clone().filter(|category| !category.is_empty()),
        game_platform: "Web Browser",
        application_category: "Game",
        operating_system: "Any",
        offers: Offer {
            kind: "Offer",
            price: "0",
            price_currency: "USD",
            availability: "https://schema.org/InStock",
        },
        publisher: Publisher {
            kind: "Organization",
            name: settings.organization_name().to_string(),
        },
    })
}

pub fn build_game_list(settings: &SeoSettings, list: &GameListInput) -> Option<ItemListSchema> {
    let settings = enabled(settings)?;

    let item_list_element = list
        .games
        .iter()
        .enumerate()
        .map(|(index, game)| GameListItem {
            kind: "ListItem",
            position: index + 1,
            url: format!("{}/game/{}", settings.base_url(), game.id),
            name: game.name.clone(),
        })
        .collect::<Vec<_>>();

    Some(ItemListSchema {
        context: SCHEMA_CONTEXT,
        kind: "ItemList",
        name: list.name.clone(),
        description: list.description.clone(),
        number_of_items: item_list_element.len(),
        item_list_element,
    })
}

pub fn build_breadcrumbs(
    settings: &SeoSettings,
    breadcrumbs: &[Breadcrumb],
) -> Option<BreadcrumbListSchema> {
    let settings = enabled(settings)?;
    if breadcrumbs.is_empty() {
        return None;
    }

    Some(BreadcrumbListSchema {
        context: SCHEMA_CONTEXT,
        kind: "BreadcrumbList",
        item_list_element: breadcrumbs
            .iter()
            .enumerate()
            .map(|(index, crumb)| BreadcrumbItem {
                kind: "ListItem",
                position: index + 1,
                name: crumb.name.clone(),
                item: settings.absolute_url(&crumb.url),
            })
            .collect(),
    })
}

/// Organization, WebSite, the page-specific schema, then breadcrumbs.
pub fn page_schemas(settings: &SeoSettings, page: &PageKind, breadcrumbs: &[Breadcrumb]) -> Vec<Value> {
    let mut schemas = Vec::new();
    if !settings.structured_data_enabled() {
        return schemas;
    }

    push_schema(&mut schemas, "Organization", build_organization(settings));
    push_schema(&mut schemas, "WebSite", build_website(settings));

    match page {
        PageKind::Game(game) => {
            push_schema(&mut schemas, "VideoGame", build_video_game(settings, game));
        }
        PageKind::Category(list) => {
            push_schema(&mut schemas, "ItemList", build_game_list(settings, list));
        }
        PageKind::Homepage {
            featured_games: Some(games),
        } => {
            let list = GameListInput {
                name: FEATURED_LIST_NAME.to_string(),
                description: FEATURED_LIST_DESCRIPTION.to_string(),
                games: games.clone(),
            };
            push_schema(&mut schemas, "ItemList", build_game_list(settings, &list));
        }
        PageKind::Homepage {
            featured_games: None,
        } => {}
    }

    push_schema(
        &mut schemas,
        "BreadcrumbList",
        build_breadcrumbs(settings, breadcrumbs),
    );
    schemas
}

fn push_schema<S: Serialize>(schemas: &mut Vec<Value>, kind: &'static str, schema: Option<S>) {
    let Some(schema) = schema else {
        return;
    };
    match serde_json::to_value(&schema) {
        Ok(value) => schemas.push(value),
        Err(err) => warn!(
            target_module = SOURCE,
            schema = kind,
            error = %err,
            "Skipping schema that failed to serialize"
        ),
    }
}

/// A schema is valid when it is an object with `@type` and the schema.org `@context`.
pub fn validate_schema(schema: &Value) -> bool {
    let Some(object) = schema.as_object() else {
        return false;
    };
    let has_type = object.get("@type").is_some_and(is_present);
    let context_ok = object
        .get("@context")
        .and_then(Value::as_str)
        .is_some_and(|context| context == SCHEMA_CONTEXT);
    has_type && context_ok
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(text) => !text.is_empty(),
        _ => true,
    }
}

/// Wrap the valid schemas in a JSON-LD script tag.
///
/// One schema is emitted as an object, several as an array. Returns an empty
/// string when nothing survives validation.
pub fn json_ld_script(schemas: &[Value]) -> String {
    let valid: Vec<&Value> = schemas.iter().filter(|schema| validate_schema(schema)).collect();

    let encoded = match valid.as_slice() {
        [] => return String::new(),
        [single] => serde_json::to_string_pretty(single),
        many => serde_json::to_string_pretty(many),
    };

    match encoded {
        Ok(payload) => format!(
            r#"<script type="application/ld+json">{}</script>"#,
            payload.replace("</", r"<\/")
        ),
        Err(err) => {
            warn!(
                target_module = SOURCE,
                error = %err,
                "Failed to encode JSON-LD payload"
            );
            String::new()
        }
    }
}

/// Structured-data generation backed by the cached SEO settings.
#[derive(Clone)]
pub struct StructuredDataService {
    content: Arc<ContentService>,
}

impl StructuredDataService {
    pub fn new(content: Arc<ContentService>) -> Self {
        Self { content }
    }

    async fn settings(&self) -> SeoSettings {
        self.content.seo_settings().await.into_inner().seo_settings
    }

    pub async fn organization_schema(&self) -> Option<OrganizationSchema> {
        build_organization(&self.settings().await)
    }

    pub async fn website_schema(&self) -> Option<WebSiteSchema> {
        build_website(&self.settings().await)
    }

    pub async fn video_game_schema(&self, game: &GameSchemaInput) -> Option<VideoGameSchema> {
        build_video_game(&self.settings().await, game)
    }

    pub async fn game_list_schema(&self, list: &GameListInput) -> Option<ItemListSchema> {
        build_game_list(&self.settings().await, list)
    }

    pub async fn breadcrumb_schema(&self, breadcrumbs: &[Breadcrumb]) -> Option<BreadcrumbListSchema> {
        build_breadcrumbs(&self.settings().await, breadcrumbs)
    }

    pub async fn page_structured_data(
        &self,
        page: &PageKind,
        breadcrumbs: &[Breadcrumb],
    ) -> Vec<Value> {
        page_schemas(&self.settings().await, page, breadcrumbs)
    }

    /// Generate and wrap a page's schemas in one step.
    pub async fn page_script(&self, page: &PageKind, breadcrumbs: &[Breadcrumb]) -> String {
        json_ld_script(&self.page_structured_data(page, breadcrumbs).await)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::seo::StructuredDataSettings;

    fn enabled_settings() -> SeoSettings {
        SeoSettings {
            site_name: "Arcade Hub".to_string(),
            site_url: "https://arcade.example/".to_string(),
            structured_data: Some(StructuredDataSettings {
                enabled: true,
                organization_name: Some(String::new()),
                organization_logo: Some("https://arcade.example/logo.png".to_string()),
                ..StructuredDataSettings::default()
            }),
            ..SeoSettings::default()
        }
    }

    #[test]
    fn organization_falls_back_to_site_identity() {
        let org = build_organization(&enabled_settings()).expect("enabled");
        assert_eq!(org.name, "Arcade Hub");
        assert_eq!(org.url, "https://arcade.example/");
        assert_eq!(org.logo.as_deref(), Some("https://arcade.example/logo.png"));
        assert!(org.same_as.is_none());
    }

    #[test]
    fn website_declares_search_action() {
        let value = serde_json::to_value(build_website(&enabled_settings())).expect("encode");
        assert_eq!(
            value["potentialAction"],
            json!({
                "@type": "SearchAction",
                "target": "https://arcade.example/search?q={search_term_string}",
                "query-input": "required name=search_term_string"
            })
        );
    }

    #[test]
    fn video_game_omits_empty_optionals() {
        let game = GameSchemaInput {
            id: "g1".to_string(),
            name: "Cat Jump".to_string(),
            description: "desc".to_string(),
            image: None,
            category: Some("Arcade".to_string()),
        };
        let value =
            serde_json::to_value(build_video_game(&enabled_settings(), &game)).expect("encode");

        assert_eq!(value["url"], "https://arcade.example/game/g1");
        assert_eq!(value["genre"], "Arcade");
        assert_eq!(value["gamePlatform"], "Web Browser");
        assert_eq!(value["publisher"]["name"], "Arcade Hub");
        assert!(value.get("image").is_none());
    }

    #[test]
    fn disabled_settings_produce_nothing() {
        let settings = SeoSettings::default();
        assert!(build_organization(&settings).is_none());
        assert!(build_breadcrumbs(&settings, &[Breadcrumb::new("Home", "/")]).is_none());
        assert!(page_schemas(&settings, &PageKind::Homepage { featured_games: None }, &[]).is_empty());
    }

    #[test]
    fn empty_breadcrumbs_are_skipped() {
        assert!(build_breadcrumbs(&enabled_settings(), &[]).is_none());
    }

    #[test]
    fn homepage_adds_featured_list_when_present() {
        let page = PageKind::Homepage {
            featured_games: Some(vec![ListedGame {
                id: "a".to_string(),
                name: "A".to_string(),
            }]),
        };
        let schemas = page_schemas(&enabled_settings(), &page, &[]);

        assert_eq!(schemas.len(), 3);
        assert_eq!(schemas[2]["name"], FEATURED_LIST_NAME);
        assert_eq!(schemas[2]["description"], FEATURED_LIST_DESCRIPTION);
    }

    #[test]
    fn validation_requires_schema_org_context_and_type() {
        assert!(validate_schema(&json!({ "@context": SCHEMA_CONTEXT, "@type": "Thing" })));
        assert!(!validate_schema(&json!({ "@type": "Thing" })));
        assert!(!validate_schema(&json!({ "@context": "http://schema.org", "@type": "Thing" })));
        assert!(!validate_schema(&json!({ "@context": SCHEMA_CONTEXT, "@type": "" })));
        assert!(!validate_schema(&json!([])));
    }

    #[test]
    fn script_escapes_closing_tags() {
        let schema = json!({
            "@context": SCHEMA_CONTEXT,
            "@type": "Thing",
            "name": "</script><b>"
        });
        let script = json_ld_script(std::slice::from_ref(&schema));

        let body = script
            .strip_prefix(r#"<script type="application/ld+json">"#)
            .and_then(|rest| rest.strip_suffix("</script>"))
            .expect("wrapped");
        assert!(!body.contains("</"));
        let parsed: Value = serde_json::from_str(body).expect("valid json");
        assert_eq!(parsed, schema);
    }

    #[test]
    fn script_uses_array_for_several_schemas() {
        let a = json!({ "@context": SCHEMA_CONTEXT, "@type": "A" });
        let b = json!({ "@context": SCHEMA_CONTEXT, "@type": "B" });
        let invalid = json!({ "@type": "C" });
        let script = json_ld_script(&[a.clone(), invalid, b.clone()]);

        let body = script
            .trim_start_matches(r#"<script type="application/ld+json">"#)
            .trim_end_matches("</script>");
        let parsed: Value = serde_json::from_str(body).expect("valid json");
        assert_eq!(parsed, json!([a, b]));
        assert!(body.contains("\n  "));
    }
}
