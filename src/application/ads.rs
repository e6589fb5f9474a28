//! Server-side ad slot injection.

use std::{collections::HashMap, fmt::Write as _, sync::Arc};

use crate::domain::ads::{Ad, AdPosition};

use super::content::ContentService;

#[derive(Clone)]
pub struct AdService {
    content: Arc<ContentService>,
}

impl AdService {
    pub fn new(content: Arc<ContentService>) -> Self {
        Self { content }
    }

    /// Active ads in document order.
    pub async fn active_ads(&self) -> Vec<Ad> {
        self.content
            .ads()
            .await
            .into_inner()
            .into_iter()
            .filter(|ad| ad.is_active)
            .collect()
    }

    pub async fn slots_for(&self, position: AdPosition) -> Vec<Ad> {
        select(&self.active_ads().await, position)
    }

    /// Pre-rendered markup for every slot, from a single document read.
    pub async fn page_ads(&self) -> PageAds {
        PageAds::from_ads(&self.active_ads().await)
    }
}

fn select(ads: &[Ad], position: AdPosition) -> Vec<Ad> {
    ads.iter()
        .filter(|ad| ad.is_active && ad.placed_at(position))
        .cloned()
        .collect()
}

/// Slot markup keyed by position; empty slots are absent.
#[derive(Debug, Clone, Default)]
pub struct PageAds {
    slots: HashMap<AdPosition, String>,
}

impl PageAds {
    pub fn from_ads(ads: &[Ad]) -> Self {
        let slots = AdPosition::ALL
            .into_iter()
            .filter_map(|position| {
                let placed = select(ads, position);
                (!placed.is_empty()).then(|| (position, slot_markup(position, &placed)))
            })
            .collect();
        Self { slots }
    }

    pub fn slot(&self, position: AdPosition) -> Option<&str> {
        self.slots.get(&position).map(String::as_str)
    }

    /// Markup for the named slot, or an empty string.
    pub fn render(&self, position: &str) -> String {
        position
            .parse::<AdPosition>()
            .ok()
            .and_then(|position| self.slot(position))
            .unwrap_or_default()
            .to_string()
    }
}

fn slot_markup(position: AdPosition, ads: &[Ad]) -> String {
    let mut markup = format!(r#"<div class="ad-slot ad-slot-{position}">"#);
    for ad in ads {
        let _ = write!(
            markup,
            r#"<div class="ad-unit" data-ad-id="{}">{}</div>"#,
            escape_attribute(&ad.id),
            ad.html_content
        );
    }
    markup.push_str("</div>");
    markup
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
