mod model;
mod snapshot;
mod store;

pub use model::{
    CatalogPayload, Card, CardType, Cycle, FactionRecord, Pack, Restriction, RestrictionEffects,
    RestrictionList,
};
pub use snapshot::{Faction, Snapshot};
pub use store::{CatalogSource, CatalogStore};
