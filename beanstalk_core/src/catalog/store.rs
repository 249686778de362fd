use async_trait::async_trait;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{error, info};

use super::model::{CatalogPayload, Card, Cycle, FactionRecord, Pack, RestrictionList};
use super::snapshot::Snapshot;
use crate::CatalogError;

/// Read-only access to the remote card database.
///
/// Each call fetches one complete collection. Transport, retries and
/// decoding are the implementor's concern.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_cards(&self) -> anyhow::Result<Vec<Card>>;
    async fn fetch_factions(&self) -> anyhow::Result<Vec<FactionRecord>>;
    async fn fetch_packs(&self) -> anyhow::Result<Vec<Pack>>;
    async fn fetch_restriction_lists(&self) -> anyhow::Result<Vec<RestrictionList>>;
    async fn fetch_cycles(&self) -> anyhow::Result<Vec<Cycle>>;
}

/// Owner of the active catalog snapshot.
///
/// Readers get an `Arc` to the snapshot that was active when they asked and
/// keep using it for as long as they hold it; a refresh only swaps the
/// pointer once every fetch has succeeded.
pub struct CatalogStore {
    source: Arc<dyn CatalogSource>,
    current: RwLock<Option<Arc<Snapshot>>>,
}

impl CatalogStore {
    #[must_use]
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            current: RwLock::new(None),
        }
    }

    /// The active snapshot, or `None` before the first successful refresh.
    #[must_use]
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Fetch all five collections concurrently and install a new snapshot.
    ///
    /// All-or-nothing: if any fetch fails, or the payload does not index,
    /// the previous snapshot stays active and `RefreshFailed` is returned.
    /// An unindexable payload is reported against the `"catalog"` resource
    /// with the `Malformed` error as its source.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>, CatalogError> {
        info!("Rebuilding card catalog...");

        let result = self.fetch_payload().await.and_then(|payload| {
            Snapshot::build(payload)
                .map_err(|e| CatalogError::refresh("catalog", anyhow::Error::new(e)))
        });
        let snapshot = match result {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                error!("Catalog refresh failed, keeping previous snapshot: {e}");
                return Err(e);
            }
        };

        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&snapshot));

        info!(
            "Catalog rebuilt: {} cards, restriction list {}",
            snapshot.len(),
            snapshot.restriction_list().unwrap_or("(none)")
        );
        Ok(snapshot)
    }

    async fn fetch_payload(&self) -> Result<CatalogPayload, CatalogError> {
        let source = self.source.as_ref();
        let (cards, factions, packs, restriction_lists, cycles) = tokio::try_join!(
            labelled("cards", source.fetch_cards()),
            labelled("factions", source.fetch_factions()),
            labelled("packs", source.fetch_packs()),
            labelled("restriction lists", source.fetch_restriction_lists()),
            labelled("cycles", source.fetch_cycles()),
        )?;

        Ok(CatalogPayload {
            cards,
            factions,
            packs,
            restriction_lists,
            cycles,
        })
    }
}

async fn labelled<T>(
    resource: &'static str,
    fetch: impl Future<Output = anyhow::Result<T>>,
) -> Result<T, CatalogError> {
    fetch
        .await
        .map_err(|source| CatalogError::refresh(resource, source))
}
