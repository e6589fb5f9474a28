use std::path::Path;
use std::sync::Arc;

use arcadia::application::content::ContentService;
use arcadia::cache::CacheConfig;
use arcadia::config::{AdminSettings, DataSettings};
use arcadia::infra::http::{HttpState, build_router};
use arcadia::infra::store::FileStore;
use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Method, Request, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

fn write(root: &Path, file: &str, value: Value) {
    std::fs::write(
        root.join(file),
        serde_json::to_string_pretty(&value).expect("encode fixture"),
    )
    .expect("write fixture");
}

fn seed(root: &Path) {
    write(
        root,
        "games.json",
        json!([
            {
                "id": "cat-jump",
                "name": "Cat Jump",
                "description": "Hop across rooftops.",
                "category": "Arcade",
                "tags": ["cats", "jump"],
                "isActive": true,
                "addedDate": "2024-03-01",
                "gameUrl": "https://play.example/cat-jump"
            },
            {
                "id": "word-hunt",
                "name": "Word Hunt",
                "description": "Find hidden words.",
                "category": "Puzzle",
                "isActive": false
            },
            {
                "id": "block-stack",
                "name": "Block Stack",
                "description": "Stack the blocks.",
                "category": "arcade",
                "isActive": true,
                "addedDate": "2024-01-15"
            },
            {
                "id": "maze-run",
                "name": "Maze Run",
                "description": "Escape the maze.",
                "category": "Puzzle",
                "isActive": true
            }
        ]),
    );
    write(
        root,
        "featured-games.json",
        json!([
            { "id": "f-late", "name": "Late", "isActive": true, "order": 3 },
            { "id": "f-hidden", "name": "Hidden", "isActive": false, "order": 0 },
            { "id": "f-first", "name": "First", "isActive": true, "order": 1 },
            { "id": "f-unordered", "name": "Unordered", "isActive": true }
        ]),
    );
    write(
        root,
        "ads.json",
        json!([
            { "id": "ad-1", "name": "Top", "position": "header", "htmlContent": "<b>top</b>", "isActive": true },
            { "id": "ad-2", "name": "Off", "position": "footer", "htmlContent": "<i>off</i>", "isActive": false },
            { "id": "ad-3", "name": "Side", "position": "sidebar", "htmlContent": "<em>side</em>", "isActive": true }
        ]),
    );
    write(
        root,
        "seo-settings.json",
        json!({
            "seoSettings": {
                "siteName": "Arcade Hub",
                "siteUrl": "https://arcade.example",
                "structuredData": { "enabled": true }
            }
        }),
    );
}

struct Harness {
    _dir: TempDir,
    router: Router,
}

fn harness(admin_enabled: bool) -> Harness {
    let dir = tempfile::tempdir().expect("tempdir");
    seed(dir.path());
    std::fs::create_dir(dir.path().join("uploads")).expect("uploads dir");

    let content = Arc::new(ContentService::new(
        Arc::new(FileStore::new(dir.path())),
        &CacheConfig::default(),
    ));
    let data = DataSettings {
        directory: dir.path().to_path_buf(),
        uploads_directory: dir.path().join("uploads"),
    };
    let admin = AdminSettings {
        enabled: admin_enabled,
    };
    let router = build_router(HttpState::new(content, &data, &admin));

    Harness { _dir: dir, router }
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body bytes")
        .to_bytes();
    (status, bytes.to_vec())
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(router, Method::GET, uri, None).await;
    (status, serde_json::from_slice(&body).expect("json body"))
}

async fn get_html(router: &Router, uri: &str) -> (StatusCode, String) {
    let (status, body) = send(router, Method::GET, uri, None).await;
    (status, String::from_utf8(body).expect("utf8 body"))
}

#[tokio::test]
async fn missing_or_inactive_game_is_not_found() {
    let harness = harness(false);

    let (status, body) = get_json(&harness.router, "/api/games/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Game not found");

    let (status, _) = get_json(&harness.router, "/api/games/word-hunt").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get_json(&harness.router, "/api/games/cat-jump").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Cat Jump");
}

#[tokio::test]
async fn game_listing_paginates_active_games() {
    let harness = harness(false);

    let (status, body) = get_json(&harness.router, "/api/games?limit=2&page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["pagination"],
        json!({ "page": 2, "limit": 2, "total": 3, "totalPages": 2 })
    );
    let ids: Vec<&str> = body["games"]
        .as_array()
        .expect("games")
        .iter()
        .filter_map(|game| game["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["maze-run"]);
}

#[tokio::test]
async fn unpaginated_listing_filters_by_category() {
    let harness = harness(false);

    let (status, body) = get_json(&harness.router, "/api/games?category=ARCADE").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .expect("lightweight list")
        .iter()
        .filter_map(|game| game["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["cat-jump", "block-stack"]);
}

#[tokio::test]
async fn featured_games_are_active_and_ordered() {
    let harness = harness(false);

    let (status, body) = get_json(&harness.router, "/api/featured-games").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .expect("featured list")
        .iter()
        .filter_map(|game| game["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["f-unordered", "f-first", "f-late"]);
}

#[tokio::test]
async fn ads_endpoint_returns_active_ads_only() {
    let harness = harness(false);

    let (status, body) = get_json(&harness.router, "/api/ads").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .expect("ads")
        .iter()
        .filter_map(|ad| ad["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["ad-1", "ad-3"]);
}

#[tokio::test]
async fn health_reports_service_identity() {
    let harness = harness(false);

    let (status, body) = get_json(&harness.router, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "arcadia");
    assert_eq!(body["checks"]["filesystem"], "ok");
    assert_eq!(body["checks"]["server"], "ok");
}

#[tokio::test]
async fn admin_routes_are_forbidden_when_disabled() {
    let harness = harness(false);

    let (status, body) = send(&harness.router, Method::POST, "/api/admin/cache/clear", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let body: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(body["success"], false);

    let (status, _) = get_json(&harness.router, "/api/admin/storage-status").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_seo_save_round_trips_and_invalidates_pages() {
    let harness = harness(true);

    let (status, html) = get_html(&harness.router, "/about").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Arcade Hub"));

    let (status, mut settings) = get_json(&harness.router, "/api/admin/seo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["seoSettings"]["siteName"], "Arcade Hub");

    settings["seoSettings"]["siteName"] = json!("Pixel Palace");
    let (status, body) = send(
        &harness.router,
        Method::POST,
        "/api/admin/seo",
        Some(settings),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(body["success"], true);

    let (_, saved) = get_json(&harness.router, "/api/admin/seo").await;
    assert_eq!(saved["seoSettings"]["siteName"], "Pixel Palace");

    let (status, html) = get_html(&harness.router, "/about").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Pixel Palace"));
    assert!(!html.contains("Arcade Hub"));
}

#[tokio::test]
async fn storage_status_describes_the_file_store() {
    let harness = harness(true);

    let (status, body) = get_json(&harness.router, "/api/admin/storage-status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "storageMode": "Local File System", "configured": true, "isPersistent": true })
    );
}

#[tokio::test]
async fn game_page_embeds_json_ld_and_metadata() {
    let harness = harness(false);

    let (status, html) = get_html(&harness.router, "/game/cat-jump").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("application/ld+json"));
    assert!(html.contains("VideoGame"));
    assert!(html.contains(r#"<link rel="canonical" href="https://arcade.example/game/cat-jump">"#));
    assert!(html.contains("<b>top</b>"));
}

#[tokio::test]
async fn unknown_routes_and_inactive_games_render_the_not_found_page() {
    let harness = harness(false);

    let (status, html) = get_html(&harness.router, "/definitely-missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Page Not Found"));

    let (status, _) = get_html(&harness.router, "/game/word-hunt").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn home_and_new_games_pages_render() {
    let harness = harness(false);

    let (status, html) = get_html(&harness.router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Cat Jump"));

    let (status, html) = get_html(&harness.router, "/new-games").await;
    assert_eq!(status, StatusCode::OK);
    let cat = html.find("Cat Jump").expect("cat jump listed");
    let block = html.find("Block Stack").expect("block stack listed");
    assert!(cat < block);
    assert!(!html.contains("Word Hunt"));
}

#[tokio::test]
async fn search_page_lists_matching_active_games() {
    let harness = harness(false);

    let (status, html) = get_html(&harness.router, "/search?q=cat").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Cat Jump"));
    assert!(!html.contains("Maze Run"));
    assert!(html.contains(r#"<link rel="canonical" href="https://arcade.example/search">"#));

    let (status, html) = get_html(&harness.router, "/search?q=PUZZLE").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Maze Run"));
    assert!(!html.contains("Word Hunt"));

    let (status, html) = get_html(&harness.router, "/search").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains("Cat Jump"));
}

#[tokio::test]
async fn website_search_action_target_is_served() {
    let harness = harness(false);

    let (_, html) = get_html(&harness.router, "/").await;
    assert!(html.contains("https://arcade.example/search?q={search_term_string}"));

    let (status, _) = get_html(&harness.router, "/search?q=jump").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn sidebar_ads_render_next_to_the_content() {
    let harness = harness(false);

    let (status, html) = get_html(&harness.router, "/about").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"<aside class="site-sidebar">"#));
    assert!(html.contains("<em>side</em>"));
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let harness = harness(false);

    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .expect("request");
    let response = harness.router.clone().oneshot(request).await.expect("response");
    let generated = response
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .expect("request id header");
    assert_eq!(generated.len(), 36);

    let request = Request::builder()
        .uri("/definitely-missing")
        .header("x-request-id", HeaderValue::from_static("edge-42"))
        .body(Body::empty())
        .expect("request");
    let response = harness.router.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()["x-request-id"], "edge-42");
}
