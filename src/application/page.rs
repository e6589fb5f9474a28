//! Assembles view models for the HTML pages.

use std::sync::Arc;

use crate::{
    domain::{
        content::{FooterContent, FooterLink},
        games::{FeaturedGame, Game, LightweightGame},
        seo::SeoSettingsDocument,
    },
    presentation::views::{
        AboutView, BrandView, FeaturedCardView, FooterView, GameCardView, GameDetailView,
        GameListView, HeroView, HomeView, LayoutChrome, LayoutContext, LinkView, NavigationView,
        SearchView, format_rating,
    },
};

use super::{
    ads::AdService,
    catalog::CatalogService,
    content::ContentService,
    seo,
    structured_data::{
        Breadcrumb, GameListInput, GameSchemaInput, ListedGame, PageKind, json_ld_script,
        page_schemas,
    },
};

const NEW_GAMES_PAGE_LIMIT: usize = 20;
const RELATED_GAMES_LIMIT: usize = 6;
const NEW_GAMES_DESCRIPTION: &str =
    "Discover the latest and newest games! Play fresh games added to our collection.";
const PLACEHOLDER_THUMBNAIL: &str = "/placeholder-game.png";
const SEARCH_RESULTS_LIMIT: usize = 60;

#[derive(Clone)]
pub struct PageService {
    content: Arc<ContentService>,
    catalog: CatalogService,
    ads: AdService,
}

impl PageService {
    pub fn new(content: Arc<ContentService>) -> Self {
        Self {
            catalog: CatalogService::new(Arc::clone(&content)),
            ads: AdService::new(Arc::clone(&content)),
            content,
        }
    }

    /// Chrome with site-level metadata and no JSON-LD.
    pub async fn chrome(&self) -> LayoutChrome {
        let seo = self.seo_document().await;
        let footer = self.content.footer_content().await.into_inner();
        let ads = self.ads.page_ads().await;

        LayoutChrome {
            brand: BrandView {
                title: seo.seo_settings.site_name.clone(),
                href: "/".to_string(),
            },
            navigation: navigation(),
            footer: footer_view(footer),
            meta: seo::site_meta(&seo.seo_settings),
            json_ld: String::new(),
            ads,
        }
    }

    pub async fn not_found_chrome(&self) -> LayoutChrome {
        let chrome = self.chrome().await;
        let settings = self.seo_document().await.seo_settings;
        chrome.with_meta(seo::not_found_meta(&settings))
    }

    pub async fn home(&self) -> LayoutContext<HomeView> {
        let settings = self.seo_document().await.seo_settings;
        let homepage = self.content.homepage_content().await.into_inner();
        let featured = self.catalog.active_featured_games().await;
        let new_games = self.catalog.newest_games(homepage.new_games.limit).await;

        let listed = featured
            .iter()
            .map(|game| ListedGame {
                id: game.id.clone(),
                name: game.name.clone(),
            })
            .collect::<Vec<_>>();
        let page = PageKind::Homepage {
            featured_games: (!listed.is_empty()).then_some(listed),
        };
        let json_ld = json_ld_script(&page_schemas(&settings, &page, &[]));

        let content = HomeView {
            hero: HeroView {
                is_visible: homepage.hero.is_visible,
                title: homepage.hero.title,
                subtitle: homepage.hero.subtitle,
                background_gradient: homepage.hero.background_gradient,
            },
            show_featured: homepage.featured_game.is_visible && !featured.is_empty(),
            show_play_button: homepage.featured_game.show_play_button,
            featured: featured.iter().map(featured_card).collect(),
            new_games_title: homepage.new_games.title,
            show_new_games: homepage.new_games.is_visible,
            show_view_all: homepage.new_games.show_view_all_button,
            new_games: new_games.iter().map(lightweight_card).collect(),
        };

        let chrome = self.chrome().await.with_json_ld(json_ld);
        LayoutContext::new(chrome, content)
    }

    pub async fn new_games(&self) -> LayoutContext<GameListView> {
        let settings = self.seo_document().await.seo_settings;
        let games = self.catalog.newest_games(NEW_GAMES_PAGE_LIMIT).await;

        let page = PageKind::Category(GameListInput {
            name: "New Games".to_string(),
            description: NEW_GAMES_DESCRIPTION.to_string(),
            games: games
                .iter()
                .map(|game| ListedGame {
                    id: game.id.clone(),
                    name: game.name.clone(),
                })
                .collect(),
        });
        let breadcrumbs = [
            Breadcrumb::new("Home", "/"),
            Breadcrumb::new("New Games", "/new-games"),
        ];
        let json_ld = json_ld_script(&page_schemas(&settings, &page, &breadcrumbs));

        let content = GameListView {
            heading: "New Games".to_string(),
            description: NEW_GAMES_DESCRIPTION.to_string(),
            games: games.iter().map(lightweight_card).collect(),
        };

        let chrome = self
            .chrome()
            .await
            .with_meta(seo::new_games_meta(&settings))
            .with_json_ld(json_ld);
        LayoutContext::new(chrome, content)
    }

    /// `None` when the game is missing or inactive.
    pub async fn game(&self, id: &str) -> Option<LayoutContext<GameDetailView>> {
        let game = self.catalog.active_game(id).await.ok()?;
        let seo_document = self.seo_document().await;
        let settings = &seo_document.seo_settings;

        let image = seo::game_image(settings, &game);
        let page = PageKind::Game(GameSchemaInput {
            id: game.id.clone(),
            name: game.name.clone(),
            description: game.description.clone(),
            image: game.thumbnail_url.clone(),
            category: game.category.clone(),
        });
        let breadcrumbs = [
            Breadcrumb::new("Home", "/"),
            Breadcrumb::new(game.name.clone(), format!("/game/{}", game.id)),
        ];
        let json_ld = json_ld_script(&page_schemas(settings, &page, &breadcrumbs));
        let related = self.related_games(&game).await;

        let meta = seo::game_meta(&seo_document, &game);
        let content = GameDetailView {
            view_count: game.effective_view_count(),
            rating: format_rating(game.rating),
            category: game.category.clone().unwrap_or_default(),
            play_url: game.game_url.clone().filter(|url| !url.is_empty()),
            id: game.id,
            name: game.name,
            description: game.description,
            tags: game.tags,
            image,
            related,
        };

        let chrome = self.chrome().await.with_meta(meta).with_json_ld(json_ld);
        Some(LayoutContext::new(chrome, content))
    }

    pub async fn about(&self) -> LayoutContext<AboutView> {
        let settings = self.seo_document().await.seo_settings;
        let content = AboutView {
            site_name: settings.site_name.clone(),
            description: settings.site_description.clone(),
        };
        let chrome = self.chrome().await.with_meta(seo::about_meta(&settings));
        LayoutContext::new(chrome, content)
    }

    /// Active games whose name, category or tags contain `query`, ignoring case.
    pub async fn search(&self, query: &str) -> LayoutContext<SearchView> {
        let settings = self.seo_document().await.seo_settings;
        let query = query.trim();
        let needle = query.to_lowercase();

        let results: Vec<GameCardView> = if needle.is_empty() {
            Vec::new()
        } else {
            self.content
                .lightweight_games()
                .await
                .iter()
                .filter(|game| game.is_active && game.matches(&needle))
                .take(SEARCH_RESULTS_LIMIT)
                .map(lightweight_card)
                .collect()
        };

        let breadcrumbs = [
            Breadcrumb::new("Home", "/"),
            Breadcrumb::new("Search", "/search"),
        ];
        let page = PageKind::Category(GameListInput {
            name: format!("Search results for {query}"),
            description: format!("Games matching {query}"),
            games: results
                .iter()
                .map(|card| ListedGame {
                    id: card.id.clone(),
                    name: card.name.clone(),
                })
                .collect(),
        });
        let json_ld = json_ld_script(&page_schemas(&settings, &page, &breadcrumbs));

        let content = SearchView {
            query: query.to_string(),
            searched: !needle.is_empty(),
            games: results,
        };

        let chrome = self
            .chrome()
            .await
            .with_meta(seo::search_meta(&settings, query))
            .with_json_ld(json_ld);
        LayoutContext::new(chrome, content)
    }

    async fn seo_document(&self) -> SeoSettingsDocument {
        self.content.seo_settings().await.into_inner()
    }

    /// Same-category games first, then anything else active.
    async fn related_games(&self, game: &Game) -> Vec<GameCardView> {
        let projection = self.content.lightweight_games().await;
        let category = game.category.as_deref().unwrap_or_default();

        let (mut same, other): (Vec<&LightweightGame>, Vec<&LightweightGame>) = projection
            .iter()
            .filter(|candidate| candidate.is_active && candidate.id != game.id)
            .partition(|candidate| !category.is_empty() && candidate.in_category(category));
        same.extend(other);

        same.into_iter()
            .take(RELATED_GAMES_LIMIT)
            .map(lightweight_card)
            .collect()
    }
}

fn navigation() -> NavigationView {
    NavigationView {
        entries: vec![
            LinkView::new("Home", "/"),
            LinkView::new("New Games", "/new-games"),
            LinkView::new("About", "/about"),
        ],
    }
}

fn footer_view(footer: FooterContent) -> FooterView {
    let links = |links: Vec<FooterLink>| {
        links
            .into_iter()
            .filter(|link| !link.url.is_empty())
            .map(|link| LinkView::new(link.name, link.url))
            .collect()
    };

    FooterView {
        is_visible: footer.is_visible,
        company_name: footer.company_info.name,
        company_description: footer.company_info.description,
        email: footer.company_info.email,
        social_links: links(footer.social_links),
        legal_links: links(footer.legal_links),
        custom_html: footer.custom_html,
    }
}

fn lightweight_card(game: &LightweightGame) -> GameCardView {
    GameCardView {
        id: game.id.clone(),
        name: game.name.clone(),
        href: format!("/game/{}", game.id),
        thumbnail_url: game
            .thumbnail_url
            .clone()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_THUMBNAIL.to_string()),
        category: game.category.clone().unwrap_or_default(),
        rating: format_rating(game.rating),
        view_count: game.view_count,
    }
}

fn featured_card(game: &FeaturedGame) -> FeaturedCardView {
    FeaturedCardView {
        name: game.name.clone(),
        description: game.description.clone(),
        emoji: game.emoji.clone(),
        gradient: game.gradient.clone(),
        href: if game.game_url.is_empty() {
            format!("/game/{}", game.id)
        } else {
            game.game_url.clone()
        },
        thumbnail_url: game.thumbnail_url.clone().filter(|url| !url.is_empty()),
    }
}
