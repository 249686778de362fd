use thiserror::Error;

/// Failures while building or installing a catalog snapshot.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// One of the remote resources could not be fetched or decoded.
    /// The previously installed snapshot stays active.
    #[error("catalog refresh failed while fetching {resource}: {source}")]
    RefreshFailed {
        resource: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// The fetched payloads decoded but do not form a consistent catalog.
    #[error("malformed catalog data: {0}")]
    Malformed(String),
}

impl CatalogError {
    pub(crate) fn refresh(resource: &'static str, source: anyhow::Error) -> Self {
        Self::RefreshFailed { resource, source }
    }
}

/// Problems encountered while rendering a single card.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The card lacks a stat its type category displays. Logged and the
    /// segment is omitted; never aborts a render.
    #[error("card {title:?} is missing field {field:?}")]
    MissingField { title: String, field: &'static str },

    /// The card references a faction or pack unknown to the snapshot.
    #[error("inconsistent catalog: {0}")]
    Inconsistent(String),
}
