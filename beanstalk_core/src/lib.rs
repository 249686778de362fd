#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod catalog;
pub mod dispatch;
mod error;
pub mod query;
pub mod render;

pub use catalog::{CatalogPayload, CatalogSource, CatalogStore, Card, CardType, Snapshot};
pub use dispatch::{DispatchConfig, Dispatcher, Reply};
pub use error::{CatalogError, RenderError};
pub use query::{DisplayMode, Match, MatchKind, Query, Resolver, extract_queries};
pub use render::{CardDisplay, LinkTemplates, Media, Renderer};
