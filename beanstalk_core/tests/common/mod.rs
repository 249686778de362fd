//! Shared fixtures: a small hand-written catalog served by an in-memory source.

#![allow(dead_code)]

use async_trait::async_trait;
use beanstalk_core::catalog::{Cycle, FactionRecord, Pack, RestrictionList};
use beanstalk_core::{CatalogSource, CatalogStore, Card};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

pub fn cards() -> Value {
    json!([
        {
            "code": "01001",
            "title": "Noise: Hacker Extraordinaire",
            "type_code": "identity",
            "faction_code": "anarch",
            "pack_code": "core",
            "position": 1,
            "keywords": "G-mod",
            "base_link": 0,
            "minimum_deck_size": 45,
            "influence_limit": 15,
            "illustrator": "Ralph Beisner",
            "text": "Whenever you install a <strong>virus</strong> program, the Corp trashes the top card of R&D."
        },
        {
            "code": "01012",
            "title": "Parasite",
            "type_code": "program",
            "faction_code": "anarch",
            "pack_code": "core",
            "position": 12,
            "keywords": "Virus",
            "cost": 2,
            "memory_cost": 1,
            "strength": 0,
            "faction_cost": 2,
            "illustrator": "Gong Studios",
            "text": "Install Parasite only on a rezzed piece of ice."
        },
        {
            "code": "01044",
            "title": "Magnum Opus",
            "type_code": "program",
            "faction_code": "shaper",
            "pack_code": "core",
            "position": 44,
            "cost": 5,
            "memory_cost": 2,
            "faction_cost": 2,
            "illustrator": "Mike Nesbitt",
            "text": "[click]: Gain 2[credit]."
        },
        {
            "code": "01050",
            "title": "Sure Gamble",
            "type_code": "event",
            "faction_code": "neutral-runner",
            "pack_code": "core",
            "position": 50,
            "cost": 5,
            "faction_cost": 0,
            "illustrator": "Mauricio Herrera",
            "text": "Gain 9[credit]."
        },
        {
            "code": "01088",
            "title": "Data Raven",
            "type_code": "ice",
            "faction_code": "nbn",
            "pack_code": "core",
            "position": 88,
            "keywords": "Sentry - Tracer - Observer",
            "cost": 4,
            "strength": 4,
            "faction_cost": 2,
            "illustrator": "Ed Mattinian",
            "text": "[subroutine] <trace>Trace 3</trace> If successful, place 1 power counter on Data Raven."
        },
        {
            "code": "01106",
            "title": "Priority Requisition",
            "type_code": "agenda",
            "faction_code": "neutral-corp",
            "pack_code": "core",
            "position": 106,
            "keywords": "Security",
            "advancement_cost": 5,
            "agenda_points": 3,
            "illustrator": "Sandara Tang",
            "text": "When you score Priority Requisition, you may rez a piece of ice ignoring all costs."
        },
        {
            "code": "01110",
            "title": "Hedge Fund",
            "type_code": "operation",
            "faction_code": "neutral-corp",
            "pack_code": "core",
            "position": 110,
            "keywords": "Transaction",
            "cost": 5,
            "faction_cost": 0,
            "text": "Gain 9[credit]."
        },
        {
            "code": "01113",
            "title": "Ice Wall",
            "type_code": "ice",
            "faction_code": "neutral-corp",
            "pack_code": "core",
            "position": 113,
            "keywords": "Barrier",
            "cost": 1,
            "strength": 1,
            "faction_cost": 1,
            "illustrator": "Ed Mattinian",
            "text": "[subroutine] End the run.",
            "image_url": "https://images.example.org/ice-wall.jpg"
        },
        {
            "code": "01120",
            "title": "The Magnum Opus",
            "type_code": "resource",
            "faction_code": "shaper",
            "pack_code": "core",
            "position": 120,
            "cost": 0,
            "faction_cost": 1,
            "text": "Gain 1[credit]."
        },
        {
            "code": "03030",
            "title": "Clone Chip",
            "type_code": "hardware",
            "faction_code": "shaper",
            "pack_code": "cac",
            "position": 30,
            "cost": 1,
            "faction_cost": 2,
            "illustrator": "Matt Zeilinger",
            "text": "[trash]: Install a program from your heap."
        }
    ])
}

pub fn factions() -> Value {
    json!([
        { "code": "anarch", "name": "Anarch", "color": "FF4500" },
        { "code": "shaper", "name": "Shaper", "color": "32CD32" },
        { "code": "neutral-runner", "name": "Neutral", "color": "808080" },
        { "code": "neutral-corp", "name": "Neutral", "color": "808080" },
        { "code": "nbn", "name": "NBN", "color": "FF8C00" }
    ])
}

pub fn packs() -> Value {
    json!([
        { "code": "core", "name": "Core Set", "cycle_code": "core" },
        { "code": "cac", "name": "Creation and Control", "cycle_code": "creation-and-control" }
    ])
}

/// The newest list comes first in payload order; selection is by date.
pub fn restriction_lists() -> Value {
    json!([
        {
            "name": "NAPD MWL 2.1",
            "date_start": "2018-02-26",
            "cards": {
                "03030": { "is_restricted": 1 },
                "01012": { "deck_limit": 0 },
                "01044": { "global_penalty": 1 },
                "01110": { "deck_limit": 1 }
            }
        },
        {
            "name": "NAPD MWL 1.0",
            "date_start": "2016-02-01",
            "cards": {
                "01050": { "universal_faction_cost": 3 }
            }
        }
    ])
}

pub fn cycles() -> Value {
    json!([
        { "code": "core", "name": "Core Set", "rotated": false },
        { "code": "creation-and-control", "name": "Creation and Control", "rotated": true }
    ])
}

/// In-memory [`CatalogSource`] that can be told to fail one resource.
pub struct FixtureSource {
    cards: Mutex<Value>,
    failing: Mutex<Option<&'static str>>,
    fetches: AtomicUsize,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self {
            cards: Mutex::new(cards()),
            failing: Mutex::new(None),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fail(&self, resource: Option<&'static str>) {
        *self.failing.lock().unwrap_or_else(PoisonError::into_inner) = resource;
    }

    pub fn set_cards(&self, cards: Value) {
        *self.cards.lock().unwrap_or_else(PoisonError::into_inner) = cards;
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn serve<T: DeserializeOwned>(&self, resource: &'static str, value: Value) -> anyhow::Result<T> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if *self.failing.lock().unwrap_or_else(PoisonError::into_inner) == Some(resource) {
            anyhow::bail!("{resource} endpoint returned 503");
        }
        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
impl CatalogSource for FixtureSource {
    async fn fetch_cards(&self) -> anyhow::Result<Vec<Card>> {
        let cards = self.cards.lock().unwrap_or_else(PoisonError::into_inner).clone();
        self.serve("cards", cards)
    }

    async fn fetch_factions(&self) -> anyhow::Result<Vec<FactionRecord>> {
        self.serve("factions", factions())
    }

    async fn fetch_packs(&self) -> anyhow::Result<Vec<Pack>> {
        self.serve("packs", packs())
    }

    async fn fetch_restriction_lists(&self) -> anyhow::Result<Vec<RestrictionList>> {
        self.serve("restriction_lists", restriction_lists())
    }

    async fn fetch_cycles(&self) -> anyhow::Result<Vec<Cycle>> {
        self.serve("cycles", cycles())
    }
}

/// A store backed by [`FixtureSource`] with nothing loaded yet.
pub fn empty_store() -> (Arc<FixtureSource>, Arc<CatalogStore>) {
    let source = Arc::new(FixtureSource::new());
    let store = Arc::new(CatalogStore::new(source.clone()));
    (source, store)
}

/// A store backed by [`FixtureSource`] with the fixture catalog installed.
pub async fn loaded_store() -> (Arc<FixtureSource>, Arc<CatalogStore>) {
    let (source, store) = empty_store();
    if let Err(e) = store.refresh().await {
        panic!("fixture catalog should load: {e}");
    }
    (source, store)
}
