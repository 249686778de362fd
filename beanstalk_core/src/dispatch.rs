//! Per-message pipeline: extract, resolve, render. Also owns the refresh
//! cooldown.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{error, info, warn};

use crate::catalog::{CatalogStore, Snapshot};
use crate::query::{Query, Resolver, extract_queries};
use crate::render::{CardDisplay, LinkTemplates, Renderer};

pub const UNKNOWN_CARD: &str = "Unknown card";
pub const CATALOG_UNAVAILABLE: &str = "The card catalog is unavailable right now. Try again later.";
pub const CACHE_REFRESHED: &str = "Cache refreshed.";
pub const CACHE_REFRESH_FAILED: &str = "Cache refresh failed; still using the previous catalog.";

/// What the messaging side should send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Card(CardDisplay),
    Text(String),
}

impl Reply {
    fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    #[serde(default = "DispatchConfig::default_cooldown")]
    pub refresh_cooldown_secs: i64,
    #[serde(default)]
    pub resolver: Resolver,
    #[serde(default)]
    pub links: LinkTemplates,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            refresh_cooldown_secs: Self::default_cooldown(),
            resolver: Resolver::default(),
            links: LinkTemplates::default(),
        }
    }
}

impl DispatchConfig {
    const fn default_cooldown() -> i64 {
        300
    }
}

/// Wires the query pipeline to the catalog store.
pub struct Dispatcher {
    store: Arc<CatalogStore>,
    resolver: Resolver,
    renderer: Renderer,
    cooldown_secs: i64,
    last_refresh: Mutex<Option<DateTime<Utc>>>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(store: Arc<CatalogStore>, config: DispatchConfig) -> Self {
        Self {
            store,
            resolver: config.resolver,
            renderer: Renderer::new(config.links),
            cooldown_secs: config.refresh_cooldown_secs,
            last_refresh: Mutex::new(None),
        }
    }

    #[must_use]
    pub const fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    /// Replies for every card query in a message.
    ///
    /// Our own messages and messages without queries produce nothing. With
    /// no catalog loaded, or an empty one, the whole message gets one
    /// "unavailable" reply.
    /// Each query is answered independently of its siblings.
    #[must_use]
    pub fn answer(&self, text: &str, from_self: bool) -> Vec<Reply> {
        if from_self {
            return Vec::new();
        }

        let queries = extract_queries(text);
        if queries.is_empty() {
            return Vec::new();
        }

        let Some(snapshot) = self.store.current().filter(|s| !s.is_empty()) else {
            warn!("{} queries received with no catalog loaded", queries.len());
            return vec![Reply::text(CATALOG_UNAVAILABLE)];
        };

        self.answer_all(&queries, &snapshot)
    }

    fn answer_all(&self, queries: &[Query], snapshot: &Snapshot) -> Vec<Reply> {
        queries
            .iter()
            .map(|query| self.answer_query(query, snapshot))
            .collect()
    }

    fn answer_query(&self, query: &Query, snapshot: &Snapshot) -> Reply {
        let Some(found) = self.resolver.resolve(&query.text, snapshot) else {
            info!("No results for {:?}", query.text);
            return Reply::Text(format!("No results for `{}`", query.text));
        };

        info!(
            "Resolved {:?} to {:?} ({:?}, score {}, {:?} mode)",
            query.text, found.card.title, found.kind, found.score, query.mode
        );

        match self.renderer.render(found.card, query.mode, snapshot) {
            Ok(display) => Reply::Card(display),
            Err(e) => {
                error!("Failed to render {:?}: {e}", found.card.title);
                Reply::text(UNKNOWN_CARD)
            }
        }
    }

    /// Handle a refresh command issued at `now`.
    ///
    /// Skipped when the previous attempt was less than the cooldown ago.
    /// A failed refresh still starts a new cooldown window.
    pub async fn refresh(&self, now: DateTime<Utc>) -> Reply {
        {
            let mut last = self
                .last_refresh
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(previous) = *last {
                // A clock that went backwards reads as no time elapsed.
                let elapsed = (now - previous).num_seconds().max(0);
                if elapsed < self.cooldown_secs {
                    info!("Refresh skipped, last one was {elapsed}s ago");
                    return Reply::Text(format!(
                        "Last refresh was only {elapsed} seconds ago. Skipping."
                    ));
                }
            }
            *last = Some(now);
        }

        match self.store.refresh().await {
            Ok(_) => Reply::text(CACHE_REFRESHED),
            Err(_) => Reply::text(CACHE_REFRESH_FAILED),
        }
    }
}
