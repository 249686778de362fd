//! Text and image rendering of fixture cards.

mod common;

use beanstalk_core::render::type_line;
use beanstalk_core::{
    Card, CardDisplay, DisplayMode, LinkTemplates, Media, RenderError, Renderer, Snapshot,
};
use common::loaded_store;
use serde_json::json;
use std::sync::Arc;

async fn snapshot() -> Arc<Snapshot> {
    let (_source, store) = loaded_store().await;
    let Some(snapshot) = store.current() else {
        panic!("fixture should be loaded");
    };
    snapshot
}

fn render(snapshot: &Snapshot, title: &str, mode: DisplayMode) -> CardDisplay {
    let Some(card) = snapshot.card(title) else {
        panic!("{title} missing from fixture");
    };
    match Renderer::default().render(card, mode, snapshot) {
        Ok(display) => display,
        Err(e) => panic!("{title} should render: {e}"),
    }
}

#[tokio::test]
async fn ice_renders_type_line_color_and_explicit_image() {
    let snapshot = snapshot().await;
    let display = render(&snapshot, "Ice Wall", DisplayMode::Text);

    assert_eq!(display.url, "https://netrunnerdb.com/en/card/01113");
    assert_eq!(
        display.body_heading.as_deref(),
        Some("Ice: Barrier • Rez: 1 • Strength: 1 • Influence: 1")
    );
    assert_eq!(display.body_text.as_deref(), Some("↳ End the run."));
    assert_eq!(display.color, Some(0x0080_8080));
    assert_eq!(
        display.media,
        Media::Thumbnail("https://images.example.org/ice-wall.jpg".to_string())
    );
    assert_eq!(
        display.footer_text.as_deref(),
        Some("Neutral • Ed Mattinian • Core Set 113")
    );
}

#[tokio::test]
async fn type_lines_follow_category_templates() {
    let snapshot = snapshot().await;
    let cases = [
        (
            "Noise: Hacker Extraordinaire",
            "Identity: G-mod • Link: 0 • Deck: 45 • Influence: 15",
        ),
        (
            "Priority Requisition",
            "Agenda: Security • Adv: 5 • Score: 3",
        ),
        (
            "Data Raven",
            "Ice: Sentry - Tracer - Observer • Rez: 4 • Strength: 4 • Influence: 2",
        ),
        (
            "Parasite",
            "Program: Virus • Install: 2 • μ: 1 • Strength: 0 • Influence: 2",
        ),
        ("Magnum Opus", "Program • Install: 5 • μ: 2 • Influence: 2"),
        ("Hedge Fund", "Operation: Transaction • Cost: 5 • Influence: 0"),
        ("Sure Gamble", "Event • Cost: 5 • Influence: 0"),
        ("Clone Chip", "Hardware • Install: 1 • Influence: 2"),
        ("The Magnum Opus", "Resource • Install: 0 • Influence: 1"),
    ];

    for (title, expected) in cases {
        let display = render(&snapshot, title, DisplayMode::Text);
        assert_eq!(display.body_heading.as_deref(), Some(expected), "{title}");
    }
}

#[tokio::test]
async fn rules_text_markup_is_substituted() {
    let snapshot = snapshot().await;

    let raven = render(&snapshot, "Data Raven", DisplayMode::Text);
    assert_eq!(
        raven.body_text.as_deref(),
        Some("↳ **Trace³** - If successful, place 1 power counter on Data Raven.")
    );

    let noise = render(&snapshot, "Noise: Hacker Extraordinaire", DisplayMode::Text);
    let text = noise.body_text.unwrap_or_default();
    assert!(text.contains("**virus**"));
    assert!(!text.contains("<strong>"));

    let opus = render(&snapshot, "Magnum Opus", DisplayMode::Text);
    assert_eq!(opus.body_text.as_deref(), Some("🕒: Gain 2💰."));
}

#[tokio::test]
async fn footer_shows_restrictions_from_latest_list_only() {
    let snapshot = snapshot().await;
    let footer = |title: &str| render(&snapshot, title, DisplayMode::Text).footer_text;

    assert_eq!(
        footer("Parasite").as_deref(),
        Some("Anarch • Gong Studios • Core Set 12 • Banned (MWL 2.1)")
    );
    assert_eq!(
        footer("Magnum Opus").as_deref(),
        Some("Shaper • Mike Nesbitt • Core Set 44 • 1 Universal Influence (MWL 2.1)")
    );
    assert_eq!(
        footer("Clone Chip").as_deref(),
        Some("Shaper • Matt Zeilinger • Creation and Control (rotated) 30 • Restricted (MWL 2.1)")
    );
    // Deck limit 1 displays nothing; the older list's penalty is ignored.
    assert_eq!(
        footer("Hedge Fund").as_deref(),
        Some("Neutral • No Illustrator • Core Set 110")
    );
    assert_eq!(
        footer("Sure Gamble").as_deref(),
        Some("Neutral • Mauricio Herrera • Core Set 50")
    );
}

#[tokio::test]
async fn image_mode_has_only_title_link_and_image() {
    let snapshot = snapshot().await;
    let display = render(&snapshot, "Sure Gamble", DisplayMode::Image);

    assert_eq!(
        display,
        CardDisplay {
            title: "Sure Gamble".to_string(),
            url: "https://netrunnerdb.com/en/card/01050".to_string(),
            color: None,
            body_heading: None,
            body_text: None,
            media: Media::Image("https://netrunnerdb.com/card_image/01050.png".to_string()),
            footer_text: None,
        }
    );
}

#[tokio::test]
async fn custom_link_templates_are_used() {
    let snapshot = snapshot().await;
    let renderer = Renderer::new(LinkTemplates {
        card_url: "https://cards.example.org/{code}".to_string(),
        image_url: "https://cards.example.org/{code}/large.jpg".to_string(),
    });
    let Some(card) = snapshot.card("Hedge Fund") else {
        panic!("Hedge Fund missing from fixture");
    };
    let Ok(display) = renderer.render(card, DisplayMode::Text, &snapshot) else {
        panic!("Hedge Fund should render");
    };
    assert_eq!(display.url, "https://cards.example.org/01110");
    assert_eq!(display.media.url(), "https://cards.example.org/01110/large.jpg");
}

#[tokio::test]
async fn missing_stat_is_omitted_not_fatal() {
    let snapshot = snapshot().await;
    let Some(wall) = snapshot.card("Ice Wall") else {
        panic!("Ice Wall missing from fixture");
    };
    let mut weak_wall = wall.clone();
    weak_wall.strength = None;

    let (line, missing) = type_line(&weak_wall);
    assert_eq!(line, "Ice: Barrier • Rez: 1 • Influence: 1");
    assert_eq!(
        missing,
        vec![RenderError::MissingField {
            title: "Ice Wall".to_string(),
            field: "strength",
        }]
    );

    let Ok(display) = Renderer::default().render(&weak_wall, DisplayMode::Text, &snapshot) else {
        panic!("render should degrade, not fail");
    };
    assert_eq!(display.body_heading.as_deref(), Some(line.as_str()));
    assert!(display.footer_text.is_some());
}

#[tokio::test]
async fn unknown_faction_is_an_inconsistency() {
    let snapshot = snapshot().await;
    let card: Card = match serde_json::from_value(json!({
        "code": "01083",
        "title": "Hostile Takeover",
        "type_code": "agenda",
        "faction_code": "weyland-consortium",
        "pack_code": "core",
        "position": 94,
        "advancement_cost": 2,
        "agenda_points": 1
    })) {
        Ok(card) => card,
        Err(e) => panic!("card should decode: {e}"),
    };

    assert!(matches!(
        Renderer::default().render(&card, DisplayMode::Text, &snapshot),
        Err(RenderError::Inconsistent(_))
    ));
    // Image mode needs no catalog lookups.
    assert!(
        Renderer::default()
            .render(&card, DisplayMode::Image, &snapshot)
            .is_ok()
    );
}
