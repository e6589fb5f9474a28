use std::sync::Arc;

use arcadia::application::content::ContentService;
use arcadia::application::structured_data::{
    Breadcrumb, GameListInput, GameSchemaInput, ListedGame, PageKind, StructuredDataService,
    build_breadcrumbs, build_game_list, json_ld_script, page_schemas,
};
use arcadia::cache::CacheConfig;
use arcadia::domain::games::{Game, LightweightGame};
use arcadia::domain::seo::{SeoSettings, SeoSettingsDocument, StructuredDataSettings};
use arcadia::infra::store::FileStore;
use serde_json::{Value, json};

fn settings(enabled: bool) -> SeoSettings {
    SeoSettings {
        site_name: "Arcade Hub".to_string(),
        site_url: "https://arcade.example".to_string(),
        structured_data: Some(StructuredDataSettings {
            enabled,
            ..StructuredDataSettings::default()
        }),
        ..SeoSettings::default()
    }
}

fn cat_jump() -> PageKind {
    PageKind::Game(GameSchemaInput {
        id: "g1".to_string(),
        name: "Cat Jump".to_string(),
        description: "desc".to_string(),
        image: None,
        category: None,
    })
}

fn types(schemas: &[Value]) -> Vec<&str> {
    schemas
        .iter()
        .filter_map(|schema| schema["@type"].as_str())
        .collect()
}

#[test]
fn disabled_structured_data_yields_no_schemas() {
    assert!(page_schemas(&settings(false), &cat_jump(), &[]).is_empty());
    assert!(page_schemas(&SeoSettings::default(), &cat_jump(), &[]).is_empty());
}

#[test]
fn game_page_has_organization_website_and_one_video_game() {
    let schemas = page_schemas(&settings(true), &cat_jump(), &[]);

    assert_eq!(types(&schemas), vec!["Organization", "WebSite", "VideoGame"]);
    let game = &schemas[2];
    assert_eq!(game["offers"]["price"], "0");
    assert_eq!(game["url"], "https://arcade.example/game/g1");
    assert_eq!(game["publisher"]["name"], "Arcade Hub");
}

#[test]
fn game_list_positions_follow_input_order() {
    let list = GameListInput {
        name: "New Games".to_string(),
        description: "d".to_string(),
        games: vec![
            ListedGame {
                id: "a".to_string(),
                name: "A".to_string(),
            },
            ListedGame {
                id: "b".to_string(),
                name: "B".to_string(),
            },
        ],
    };

    let schema = build_game_list(&settings(true), &list).expect("list schema");
    let value = serde_json::to_value(&schema).expect("encode");

    assert_eq!(value["numberOfItems"], 2);
    let positions: Vec<u64> = value["itemListElement"]
        .as_array()
        .expect("elements")
        .iter()
        .map(|item| item["position"].as_u64().expect("position"))
        .collect();
    assert_eq!(positions, vec![1, 2]);
    assert_eq!(value["itemListElement"][1]["name"], "B");
}

#[test]
fn empty_script_for_no_schemas() {
    assert_eq!(json_ld_script(&[]), "");
}

#[test]
fn script_body_parses_back_to_the_schema() {
    let schema = json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": "Arcade Hub",
        "url": "https://arcade.example"
    });

    let script = json_ld_script(std::slice::from_ref(&schema));
    let body = script
        .strip_prefix(r#"<script type="application/ld+json">"#)
        .and_then(|rest| rest.strip_suffix("</script>"))
        .expect("script wrapper");
    let parsed: Value = serde_json::from_str(body).expect("parse body");

    assert_eq!(parsed, schema);
}

#[test]
fn invalid_schemas_are_dropped_from_the_script() {
    let invalid = json!({ "@type": "Thing" });
    assert_eq!(json_ld_script(&[invalid]), "");
}

#[test]
fn projection_keeps_first_three_tags_in_order() {
    let game = Game {
        id: "g1".to_string(),
        name: "Cat Jump".to_string(),
        tags: ["a", "b", "c", "d", "e"].map(String::from).to_vec(),
        ..Game::default()
    };

    assert_eq!(LightweightGame::from(&game).tags, vec!["a", "b", "c"]);
}

#[test]
fn breadcrumb_urls_resolve_against_site_url() {
    let schema = build_breadcrumbs(
        &settings(true),
        &[
            Breadcrumb::new("About", "/about"),
            Breadcrumb::new("Elsewhere", "https://x.com/y"),
        ],
    )
    .expect("breadcrumbs");

    assert_eq!(schema.item_list_element[0].item, "https://arcade.example/about");
    assert_eq!(schema.item_list_element[1].item, "https://x.com/y");
    assert_eq!(schema.item_list_element[1].position, 2);
}

#[tokio::test]
async fn service_reads_settings_through_the_cache() {
    let dir = tempfile::tempdir().expect("tempdir");
    let content = Arc::new(ContentService::new(
        Arc::new(FileStore::new(dir.path())),
        &CacheConfig::default(),
    ));
    let service = StructuredDataService::new(Arc::clone(&content));

    assert_eq!(service.page_script(&cat_jump(), &[]).await, "");

    let document = SeoSettingsDocument {
        seo_settings: settings(true),
        ..SeoSettingsDocument::default()
    };
    content
        .save_seo_settings(&document)
        .await
        .expect("save settings");

    let script = service
        .page_script(&cat_jump(), &[Breadcrumb::new("Home", "/")])
        .await;
    assert!(script.contains(r#""@type": "VideoGame""#));
    assert!(script.contains(r#""@type": "BreadcrumbList""#));
    assert!(service.organization_schema().await.is_some());
}
