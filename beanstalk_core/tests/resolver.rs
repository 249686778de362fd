//! Exact-then-fuzzy resolution against the fixture catalog.

mod common;

use beanstalk_core::query::token_set_ratio;
use beanstalk_core::{MatchKind, Resolver, Snapshot};
use common::loaded_store;
use std::sync::Arc;

async fn snapshot() -> Arc<Snapshot> {
    let (_source, store) = loaded_store().await;
    let Some(snapshot) = store.current() else {
        panic!("fixture should be loaded");
    };
    snapshot
}

#[tokio::test]
async fn every_title_resolves_to_itself() {
    let snapshot = snapshot().await;
    let resolver = Resolver::default();

    for title in snapshot.cards().keys() {
        let Some(found) = resolver.resolve(title, &snapshot) else {
            panic!("{title} should resolve");
        };
        assert_eq!(&found.card.title, title);
        assert_eq!(found.kind, MatchKind::Exact);
    }
}

#[tokio::test]
async fn exact_match_beats_equally_scored_neighbour() {
    let snapshot = snapshot().await;
    let resolver = Resolver::default();

    // Both titles score 100 against each other under token-set scoring.
    assert_eq!(token_set_ratio("The Magnum Opus", "Magnum Opus"), 100);

    let found = resolver.resolve("The Magnum Opus", &snapshot);
    assert_eq!(found.map(|m| m.card.code.as_str()), Some("01120"));
    let found = resolver.resolve("Magnum Opus", &snapshot);
    assert_eq!(found.map(|m| m.card.code.as_str()), Some("01044"));
}

#[tokio::test]
async fn fuzzy_match_tolerates_typos_order_and_case() {
    let snapshot = snapshot().await;
    let resolver = Resolver::default();

    let Some(found) = resolver.resolve("magnum opu", &snapshot) else {
        panic!("typo should still resolve");
    };
    assert_eq!(found.card.title, "Magnum Opus");
    assert_eq!(found.kind, MatchKind::Fuzzy);

    let found = resolver.resolve("gamble sure", &snapshot);
    assert_eq!(found.map(|m| m.card.title.as_str()), Some("Sure Gamble"));

    let found = resolver.resolve("noise", &snapshot);
    assert_eq!(
        found.map(|m| m.card.title.as_str()),
        Some("Noise: Hacker Extraordinaire")
    );
}

#[tokio::test]
async fn ties_go_to_the_smallest_title() {
    let snapshot = snapshot().await;
    let Some(found) = Resolver::default().resolve("Magnum", &snapshot) else {
        panic!("partial title should resolve");
    };
    assert_eq!(found.score, 100);
    assert_eq!(found.kind, MatchKind::Fuzzy);
    assert_eq!(found.card.title, "Magnum Opus");
}

#[tokio::test]
async fn scores_below_threshold_do_not_match() {
    let snapshot = snapshot().await;
    assert!(Resolver::default().resolve("xyzzy", &snapshot).is_none());
    assert!(Resolver::default().resolve("???", &snapshot).is_none());

    assert!(Resolver::new(95).resolve("magnum opu", &snapshot).is_none());
    assert!(Resolver::new(90).resolve("magnum opu", &snapshot).is_some());
}

#[tokio::test]
async fn fuzzy_matches_are_justified_by_their_score() {
    let snapshot = snapshot().await;
    let resolver = Resolver::default();

    for query in ["hedge", "raven data", "clone", "ice wal", "priority", "parasit", "qqq"] {
        if let Some(found) = resolver.resolve(query, &snapshot) {
            assert_eq!(found.score, token_set_ratio(query, &found.card.title));
            assert!(found.score >= 50, "{query} matched at {}", found.score);
        }
    }
}
