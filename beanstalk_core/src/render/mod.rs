//! Turns a resolved card into a platform-neutral [`CardDisplay`].

mod markup;
mod type_line;

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::RenderError;
use crate::catalog::{Card, Restriction, Snapshot};
use crate::query::DisplayMode;

pub use markup::text_line;
pub use type_line::{SEPARATOR, type_line};

/// Placeholder shown in the footer when a card has no credited artist.
pub const NO_ILLUSTRATOR: &str = "No Illustrator";

/// Card picture attached to a display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Media {
    /// Small picture next to the text summary.
    Thumbnail(String),
    /// Full-size card image, shown on its own.
    Image(String),
}

impl Media {
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Thumbnail(url) | Self::Image(url) => url,
        }
    }
}

/// Structured reply for one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDisplay {
    pub title: String,
    pub url: String,
    pub color: Option<u32>,
    pub body_heading: Option<String>,
    pub body_text: Option<String>,
    pub media: Media,
    pub footer_text: Option<String>,
}

impl fmt::Display for CardDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} <{}>", self.title, self.url)?;
        if let Some(heading) = &self.body_heading {
            writeln!(f, "{heading}")?;
        }
        if let Some(text) = &self.body_text {
            writeln!(f, "{text}")?;
        }
        if let Some(footer) = &self.footer_text {
            writeln!(f, "{footer}")?;
        }
        write!(f, "{}", self.media.url())
    }
}

/// URL templates; `{code}` is replaced with the card code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkTemplates {
    #[serde(default = "LinkTemplates::default_card_url")]
    pub card_url: String,
    #[serde(default = "LinkTemplates::default_image_url")]
    pub image_url: String,
}

impl Default for LinkTemplates {
    fn default() -> Self {
        Self {
            card_url: Self::default_card_url(),
            image_url: Self::default_image_url(),
        }
    }
}

impl LinkTemplates {
    fn default_card_url() -> String {
        "https://netrunnerdb.com/en/card/{code}".to_string()
    }

    fn default_image_url() -> String {
        "https://netrunnerdb.com/card_image/{code}.png".to_string()
    }

    #[must_use]
    pub fn card_url(&self, card: &Card) -> String {
        self.card_url.replace("{code}", &card.code)
    }

    /// The card's own image URL when it has one, the template otherwise.
    #[must_use]
    pub fn image_url(&self, card: &Card) -> String {
        card.image_url
            .clone()
            .unwrap_or_else(|| self.image_url.replace("{code}", &card.code))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    templates: LinkTemplates,
}

impl Renderer {
    #[must_use]
    pub const fn new(templates: LinkTemplates) -> Self {
        Self { templates }
    }

    /// Render a card in the requested mode.
    ///
    /// Missing stats are logged and omitted. Only a card whose faction or
    /// pack is unknown to the snapshot fails.
    pub fn render(
        &self,
        card: &Card,
        mode: DisplayMode,
        snapshot: &Snapshot,
    ) -> Result<CardDisplay, RenderError> {
        let title = card.title.clone();
        let url = self.templates.card_url(card);
        let image = self.templates.image_url(card);

        if mode == DisplayMode::Image {
            return Ok(CardDisplay {
                title,
                url,
                color: None,
                body_heading: None,
                body_text: None,
                media: Media::Image(image),
                footer_text: None,
            });
        }

        let faction = snapshot.faction(&card.faction_code).ok_or_else(|| {
            RenderError::Inconsistent(format!(
                "card {} has unknown faction {}",
                card.code, card.faction_code
            ))
        })?;

        let (heading, missing) = type_line(card);
        for problem in missing {
            warn!("Omitting type-line segment: {problem}");
        }

        Ok(CardDisplay {
            title,
            url,
            color: Some(faction.color),
            body_heading: Some(heading),
            body_text: Some(text_line(card.text.as_deref().unwrap_or_default())),
            media: Media::Thumbnail(image),
            footer_text: Some(footer_line(card, &faction.name, snapshot)?),
        })
    }
}

/// `Faction • Illustrator • Pack 12 • Restricted (MWL 2.1)`
fn footer_line(card: &Card, faction: &str, snapshot: &Snapshot) -> Result<String, RenderError> {
    let pack = snapshot.pack(&card.pack_code).ok_or_else(|| {
        RenderError::Inconsistent(format!(
            "card {} has unknown pack {}",
            card.code, card.pack_code
        ))
    })?;

    let mut parts = vec![
        faction.to_string(),
        card.illustrator
            .clone()
            .unwrap_or_else(|| NO_ILLUSTRATOR.to_string()),
    ];

    let rotated = if snapshot.is_rotated(&pack.cycle_code) {
        " (rotated)"
    } else {
        ""
    };
    parts.push(format!("{}{rotated} {}", pack.name, card.position));

    if let Some((list, restriction)) = snapshot.restriction(&card.code) {
        let abbrev = list_abbreviation(list);
        parts.push(match restriction {
            Restriction::UniversalInfluence(n) => format!("{n} Universal Influence ({abbrev})"),
            Restriction::Restricted => format!("Restricted ({abbrev})"),
            Restriction::Banned => format!("Banned ({abbrev})"),
        });
    }

    Ok(parts.join(SEPARATOR))
}

/// The last seven characters of a restriction list name.
fn list_abbreviation(name: &str) -> &str {
    name.char_indices()
        .rev()
        .nth(6)
        .map_or(name, |(i, _)| &name[i..])
}
