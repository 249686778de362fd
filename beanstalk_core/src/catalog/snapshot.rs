use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use super::model::{CatalogPayload, Card, Pack, Restriction, RestrictionList};
use crate::CatalogError;

/// A faction with its display color decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Faction {
    pub code: String,
    pub name: String,
    pub color: u32,
}

/// Immutable, fully indexed view of the catalog at one point in time.
///
/// Built in one step from a [`CatalogPayload`]; nothing mutates it after
/// construction. Replacing the catalog means building a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    cards: BTreeMap<String, Card>,
    factions: HashMap<String, Faction>,
    packs: HashMap<String, Pack>,
    rotations: HashMap<String, bool>,
    restriction_list: Option<String>,
    restrictions: HashMap<String, Restriction>,
    built_at: DateTime<Utc>,
}

impl Snapshot {
    /// Index a fetched payload.
    ///
    /// Later cards win over earlier ones sharing a title, so reprints resolve
    /// to their newest printing.
    pub fn build(payload: CatalogPayload) -> Result<Self, CatalogError> {
        let CatalogPayload {
            cards,
            factions,
            packs,
            restriction_lists,
            cycles,
        } = payload;

        let factions = factions
            .into_iter()
            .map(|f| {
                let color = u32::from_str_radix(f.color.trim_start_matches('#'), 16).map_err(
                    |e| {
                        CatalogError::Malformed(format!(
                            "faction {} has invalid color {:?}: {e}",
                            f.code, f.color
                        ))
                    },
                )?;
                Ok((
                    f.code.clone(),
                    Faction {
                        code: f.code,
                        name: f.name,
                        color,
                    },
                ))
            })
            .collect::<Result<HashMap<_, _>, CatalogError>>()?;

        let rotations: HashMap<String, bool> =
            cycles.into_iter().map(|c| (c.code, c.rotated)).collect();

        let packs: HashMap<String, Pack> =
            packs.into_iter().map(|p| (p.code.clone(), p)).collect();

        if let Some(pack) = packs.values().find(|p| !rotations.contains_key(&p.cycle_code)) {
            return Err(CatalogError::Malformed(format!(
                "pack {} references unknown cycle {}",
                pack.code, pack.cycle_code
            )));
        }

        let total = cards.len();
        let mut by_title = BTreeMap::new();
        for card in cards {
            if !factions.contains_key(&card.faction_code) {
                return Err(CatalogError::Malformed(format!(
                    "card {} references unknown faction {}",
                    card.code, card.faction_code
                )));
            }
            if !packs.contains_key(&card.pack_code) {
                return Err(CatalogError::Malformed(format!(
                    "card {} references unknown pack {}",
                    card.code, card.pack_code
                )));
            }
            by_title.insert(card.title.clone(), card);
        }
        if by_title.len() < total {
            debug!(
                "{} cards share a title with a later printing",
                total - by_title.len()
            );
        }

        let (restriction_list, restrictions) = latest_list(restriction_lists)
            .map_or_else(
                || (None, HashMap::new()),
                |list| {
                    let restrictions = list
                        .cards
                        .iter()
                        .filter_map(|(code, effects)| {
                            effects.resolve().map(|r| (code.clone(), r))
                        })
                        .collect();
                    (Some(list.name), restrictions)
                },
            );

        Ok(Self {
            cards: by_title,
            factions,
            packs,
            rotations,
            restriction_list,
            restrictions,
            built_at: Utc::now(),
        })
    }

    /// Exact title lookup.
    #[must_use]
    pub fn card(&self, title: &str) -> Option<&Card> {
        self.cards.get(title)
    }

    /// All cards keyed by title, in lexicographic title order.
    #[must_use]
    pub const fn cards(&self) -> &BTreeMap<String, Card> {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn faction(&self, code: &str) -> Option<&Faction> {
        self.factions.get(code)
    }

    #[must_use]
    pub fn pack(&self, code: &str) -> Option<&Pack> {
        self.packs.get(code)
    }

    /// Whether the cycle is rotated out. Unknown cycles count as not rotated.
    #[must_use]
    pub fn is_rotated(&self, cycle_code: &str) -> bool {
        self.rotations.get(cycle_code).copied().unwrap_or(false)
    }

    /// The active restriction marker for a card code, with the list name.
    #[must_use]
    pub fn restriction(&self, card_code: &str) -> Option<(&str, Restriction)> {
        let list = self.restriction_list.as_deref()?;
        self.restrictions.get(card_code).map(|r| (list, *r))
    }

    #[must_use]
    pub fn restriction_list(&self) -> Option<&str> {
        self.restriction_list.as_deref()
    }

    #[must_use]
    pub const fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }
}

#[cfg(test)]
impl Snapshot {
    /// Drop a faction from the index, leaving its cards dangling.
    pub(crate) fn forget_faction(&mut self, code: &str) {
        self.factions.remove(code);
    }
}

/// Most recent list by start date; payload order breaks ties, later wins.
fn latest_list(lists: Vec<RestrictionList>) -> Option<RestrictionList> {
    lists
        .into_iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| a.date_start.cmp(&b.date_start).then(ia.cmp(ib)))
        .map(|(_, list)| list)
}
