//! Catalog records as delivered by the remote card database.
//!
//! These are plain typed records: every attribute a renderer may need is an
//! explicit field, and stats that only exist for some type categories are
//! `Option`s. Records are decoded once when a snapshot is fetched and never
//! mutated afterwards.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Closed set of card type categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Identity,
    Agenda,
    Ice,
    Asset,
    Upgrade,
    Operation,
    Event,
    Program,
    Resource,
    Hardware,
}

impl CardType {
    /// Returns the wire code of this type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Agenda => "agenda",
            Self::Ice => "ice",
            Self::Asset => "asset",
            Self::Upgrade => "upgrade",
            Self::Operation => "operation",
            Self::Event => "event",
            Self::Program => "program",
            Self::Resource => "resource",
            Self::Hardware => "hardware",
        }
    }

    /// Capitalized label shown at the start of a type line.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Identity => "Identity",
            Self::Agenda => "Agenda",
            Self::Ice => "Ice",
            Self::Asset => "Asset",
            Self::Upgrade => "Upgrade",
            Self::Operation => "Operation",
            Self::Event => "Event",
            Self::Program => "Program",
            Self::Resource => "Resource",
            Self::Hardware => "Hardware",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub code: String,
    pub title: String,
    pub type_code: CardType,
    pub faction_code: String,
    pub pack_code: String,
    pub position: u32,
    pub keywords: Option<String>,
    pub text: Option<String>,
    pub illustrator: Option<String>,
    pub image_url: Option<String>,

    pub cost: Option<u32>,
    pub advancement_cost: Option<u32>,
    pub agenda_points: Option<u32>,
    pub trash_cost: Option<u32>,
    pub faction_cost: Option<u32>,
    pub strength: Option<u32>,
    pub memory_cost: Option<u32>,
    pub base_link: Option<u32>,
    pub minimum_deck_size: Option<u32>,
    pub influence_limit: Option<u32>,
}

/// Faction as delivered by the remote source; the color is still a hex string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FactionRecord {
    pub code: String,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pack {
    pub code: String,
    pub name: String,
    pub cycle_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cycle {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub rotated: bool,
}

/// One version of the competitive restriction list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RestrictionList {
    pub name: String,
    #[serde(default)]
    pub date_start: Option<String>,
    #[serde(default)]
    pub cards: BTreeMap<String, RestrictionEffects>,
}

/// Raw per-card effects of a restriction list entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RestrictionEffects {
    #[serde(default, deserialize_with = "flag")]
    pub is_restricted: Option<bool>,
    pub deck_limit: Option<u32>,
    pub global_penalty: Option<u32>,
    pub universal_faction_cost: Option<u32>,
}

/// The single marker a restricted card displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restriction {
    Restricted,
    Banned,
    UniversalInfluence(u32),
}

impl RestrictionEffects {
    /// Resolves the raw effects to one marker.
    ///
    /// Effect kinds are inspected in a fixed priority order (restricted,
    /// banned, universal influence) and the first that applies wins. A deck
    /// limit other than zero displays nothing.
    #[must_use]
    pub fn resolve(&self) -> Option<Restriction> {
        if self.is_restricted == Some(true) {
            return Some(Restriction::Restricted);
        }
        if self.deck_limit == Some(0) {
            return Some(Restriction::Banned);
        }
        self.global_penalty
            .or(self.universal_faction_cost)
            .map(Restriction::UniversalInfluence)
    }
}

/// The remote source sends `is_restricted` as either `1`/`0` or a boolean.
fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(Option::<Flag>::deserialize(deserializer)?.map(|f| match f {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
    }))
}

/// Everything a single refresh fetches, before indexing.
#[derive(Debug, Clone, Default)]
pub struct CatalogPayload {
    pub cards: Vec<Card>,
    pub factions: Vec<FactionRecord>,
    pub packs: Vec<Pack>,
    pub restriction_lists: Vec<RestrictionList>,
    pub cycles: Vec<Cycle>,
}
