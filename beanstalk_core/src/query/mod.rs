mod extractor;
mod fuzzy;
mod resolver;

pub use extractor::{DisplayMode, IMAGE_PREFIX, Query, extract_queries};
pub use fuzzy::token_set_ratio;
pub use resolver::{Match, MatchKind, Resolver};
