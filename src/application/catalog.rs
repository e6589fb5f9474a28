//! Listing queries over the game documents.

use std::{cmp::Reverse, sync::Arc};

use serde::Serialize;
use time::{
    Date, OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description,
};

use crate::domain::{
    error::DomainError,
    games::{FeaturedGame, Game, LightweightGame},
};

use super::content::ContentService;

pub const DEFAULT_PAGE_LIMIT: usize = 20;

/// One-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    /// Missing or zero values fall back to page 1 and twenty items.
    pub fn new(page: Option<usize>, limit: Option<usize>) -> Self {
        Self {
            page: page.filter(|page| *page > 0).unwrap_or(1),
            limit: limit
                .filter(|limit| *limit > 0)
                .unwrap_or(DEFAULT_PAGE_LIMIT),
        }
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GameQuery {
    pub category: Option<String>,
    pub pagination: Option<PageRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GameListing {
    Paginated {
        games: Vec<Game>,
        pagination: Pagination,
    },
    Lightweight(Vec<LightweightGame>),
}

#[derive(Clone)]
pub struct CatalogService {
    content: Arc<ContentService>,
}

impl CatalogService {
    pub fn new(content: Arc<ContentService>) -> Self {
        Self { content }
    }

    /// Active games, optionally narrowed to one category.
    ///
    /// A paginated query returns full records; otherwise the cached
    /// lightweight projection is filtered instead.
    pub async fn list_games(&self, query: &GameQuery) -> GameListing {
        let category = query.category.as_deref().filter(|c| !c.is_empty());

        match query.pagination {
            Some(request) => {
                let active: Vec<Game> = self
                    .content
                    .games()
                    .await
                    .into_inner()
                    .into_iter()
                    .filter(|game| game.is_active)
                    .filter(|game| category.is_none_or(|c| game.in_category(c)))
                    .collect();
                paginate(active, request)
            }
            None => {
                let projection = self.content.lightweight_games().await;
                GameListing::Lightweight(
                    projection
                        .iter()
                        .filter(|game| game.is_active)
                        .filter(|game| category.is_none_or(|c| game.in_category(c)))
                        .cloned()
                        .collect(),
                )
            }
        }
    }

    pub async fn active_game(&self, id: &str) -> Result<Game, DomainError> {
        self.content
            .game_by_id(id)
            .await
            .filter(|game| game.is_active)
            .ok_or_else(|| DomainError::not_found("game"))
    }

    /// Active featured games by ascending `order`; a missing order counts as zero.
    pub async fn active_featured_games(&self) -> Vec<FeaturedGame> {
        let mut featured: Vec<FeaturedGame> = self
            .content
            .featured_games()
            .await
            .into_inner()
            .into_iter()
            .filter(|game| game.is_active)
            .collect();
        featured.sort_by_key(FeaturedGame::sort_key);
        featured
    }

    /// Active games, most recently added first. Undated games sort last.
    pub async fn newest_games(&self, limit: usize) -> Vec<LightweightGame> {
        let mut games: Vec<LightweightGame> = self
            .content
            .lightweight_games()
            .await
            .iter()
            .filter(|game| game.is_active)
            .cloned()
            .collect();
        games.sort_by_cached_key(|game| Reverse(added_at(game.added_date.as_deref())));
        games.truncate(limit);
        games
    }
}

fn paginate(games: Vec<Game>, request: PageRequest) -> GameListing {
    let total = games.len();
    let total_pages = total.div_ceil(request.limit);
    let games = games
        .into_iter()
        .skip(request.offset())
        .take(request.limit)
        .collect();

    GameListing::Paginated {
        games,
        pagination: Pagination {
            page: request.page,
            limit: request.limit,
            total,
            total_pages,
        },
    }
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates.
fn added_at(raw: Option<&str>) -> Option<OffsetDateTime> {
    let raw = raw?.trim();
    if let Ok(timestamp) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(timestamp);
    }
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}
