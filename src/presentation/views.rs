use crate::application::{
    ads::PageAds,
    error::{ErrorReport, HttpError},
    seo::PageMeta,
};
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response(chrome: LayoutChrome) -> Response {
    let content = ErrorPageView::not_found();
    let view = LayoutContext::new(chrome, content);
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

#[derive(Clone)]
pub struct BrandView {
    pub title: String,
    pub href: String,
}

#[derive(Clone)]
pub struct LinkView {
    pub label: String,
    pub href: String,
}

impl LinkView {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

#[derive(Clone)]
pub struct NavigationView {
    pub entries: Vec<LinkView>,
}

#[derive(Clone)]
pub struct FooterView {
    pub is_visible: bool,
    pub company_name: String,
    pub company_description: String,
    pub email: String,
    pub social_links: Vec<LinkView>,
    pub legal_links: Vec<LinkView>,
    pub custom_html: String,
}

/// Site-wide frame shared by every page.
#[derive(Clone)]
pub struct LayoutChrome {
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub footer: FooterView,
    pub meta: PageMeta,
    /// Ready-to-embed `<script type="application/ld+json">` markup, or empty.
    pub json_ld: String,
    pub ads: PageAds,
}

impl LayoutChrome {
    pub fn with_meta(self, meta: PageMeta) -> Self {
        Self { meta, ..self }
    }

    pub fn with_json_ld(self, json_ld: String) -> Self {
        Self { json_ld, ..self }
    }
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub footer: FooterView,
    pub meta: PageMeta,
    pub json_ld: String,
    pub ads: PageAds,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, content: T) -> Self {
        Self {
            brand: chrome.brand,
            navigation: chrome.navigation,
            footer: chrome.footer,
            meta: chrome.meta,
            json_ld: chrome.json_ld,
            ads: chrome.ads,
            content,
        }
    }
}

#[derive(Clone)]
pub struct GameCardView {
    pub id: String,
    pub name: String,
    pub href: String,
    pub thumbnail_url: String,
    pub category: String,
    pub rating: Option<String>,
    pub view_count: u64,
}

#[derive(Clone)]
pub struct FeaturedCardView {
    pub name: String,
    pub description: String,
    pub emoji: String,
    pub gradient: String,
    pub href: String,
    pub thumbnail_url: Option<String>,
}

pub struct HeroView {
    pub is_visible: bool,
    pub title: String,
    pub subtitle: String,
    pub background_gradient: String,
}

pub struct HomeView {
    pub hero: HeroView,
    pub featured: Vec<FeaturedCardView>,
    pub show_featured: bool,
    pub show_play_button: bool,
    pub new_games_title: String,
    pub new_games: Vec<GameCardView>,
    pub show_new_games: bool,
    pub show_view_all: bool,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: LayoutContext<HomeView>,
}

pub struct GameListView {
    pub heading: String,
    pub description: String,
    pub games: Vec<GameCardView>,
}

#[derive(Template)]
#[template(path = "game_list.html")]
pub struct GameListTemplate {
    pub view: LayoutContext<GameListView>,
}

pub struct SearchView {
    pub query: String,
    pub searched: bool,
    pub games: Vec<GameCardView>,
}

#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub view: LayoutContext<SearchView>,
}

pub struct GameDetailView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub play_url: Option<String>,
    pub image: String,
    pub rating: Option<String>,
    pub view_count: u64,
    pub related: Vec<GameCardView>,
}

#[derive(Template)]
#[template(path = "game.html")]
pub struct GameTemplate {
    pub view: LayoutContext<GameDetailView>,
}

pub struct AboutView {
    pub site_name: String,
    pub description: String,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub view: LayoutContext<AboutView>,
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
    pub primary_action: Option<LinkView>,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            title: "Page Not Found".to_string(),
            message: "The page you requested does not exist. Try returning to the homepage to find something to play.".to_string(),
            primary_action: Some(LinkView::new("Back to home", "/")),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}

/// One decimal place, the way ratings are shown on cards.
pub fn format_rating(rating: Option<f64>) -> Option<String> {
    rating
        .filter(|value| value.is_finite())
        .map(|value| format!("{value:.1}"))
}
