use crate::RenderError;
use crate::catalog::{Card, CardType};

/// Separator between type-line and footer segments.
pub const SEPARATOR: &str = " • ";

/// A stat shown on the type line.
struct Stat {
    label: &'static str,
    field: &'static str,
    value: fn(&Card) -> Option<u32>,
}

const REZ: Stat = Stat { label: "Rez", field: "cost", value: |c| c.cost };
const COST: Stat = Stat { label: "Cost", field: "cost", value: |c| c.cost };
const INSTALL: Stat = Stat { label: "Install", field: "cost", value: |c| c.cost };
const STRENGTH: Stat = Stat { label: "Strength", field: "strength", value: |c| c.strength };
const INFLUENCE: Stat = Stat { label: "Influence", field: "faction_cost", value: |c| c.faction_cost };
const TRASH: Stat = Stat { label: "Trash", field: "trash_cost", value: |c| c.trash_cost };
const MEMORY: Stat = Stat { label: "μ", field: "memory_cost", value: |c| c.memory_cost };
const ADVANCEMENT: Stat = Stat { label: "Adv", field: "advancement_cost", value: |c| c.advancement_cost };
const SCORE: Stat = Stat { label: "Score", field: "agenda_points", value: |c| c.agenda_points };
const LINK: Stat = Stat { label: "Link", field: "base_link", value: |c| c.base_link };
const DECK: Stat = Stat { label: "Deck", field: "minimum_deck_size", value: |c| c.minimum_deck_size };
const INFLUENCE_LIMIT: Stat = Stat { label: "Influence", field: "influence_limit", value: |c| c.influence_limit };

/// Which stats a card shows, decided once per card from its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    CorpIdentity,
    RunnerIdentity,
    Agenda,
    Ice,
    Installable,
    Instant,
    Program,
    WeakProgram,
    Gear,
}

impl Layout {
    const fn of(card: &Card) -> Self {
        match card.type_code {
            CardType::Identity if card.base_link.is_some() => Self::RunnerIdentity,
            CardType::Identity => Self::CorpIdentity,
            CardType::Agenda => Self::Agenda,
            CardType::Ice => Self::Ice,
            CardType::Asset | CardType::Upgrade => Self::Installable,
            CardType::Operation | CardType::Event => Self::Instant,
            CardType::Program if card.strength.is_none() => Self::WeakProgram,
            CardType::Program => Self::Program,
            CardType::Resource | CardType::Hardware => Self::Gear,
        }
    }

    const fn stats(self) -> &'static [Stat] {
        const CORP_IDENTITY: &[Stat] = &[DECK, INFLUENCE_LIMIT];
        const RUNNER_IDENTITY: &[Stat] = &[LINK, DECK, INFLUENCE_LIMIT];
        const AGENDA: &[Stat] = &[ADVANCEMENT, SCORE];
        const ICE: &[Stat] = &[REZ, STRENGTH, INFLUENCE];
        const INSTALLABLE: &[Stat] = &[REZ, TRASH, INFLUENCE];
        const INSTANT: &[Stat] = &[COST, INFLUENCE];
        const PROGRAM: &[Stat] = &[INSTALL, MEMORY, STRENGTH, INFLUENCE];
        const WEAK_PROGRAM: &[Stat] = &[INSTALL, MEMORY, INFLUENCE];
        const GEAR: &[Stat] = &[INSTALL, INFLUENCE];

        match self {
            Self::CorpIdentity => CORP_IDENTITY,
            Self::RunnerIdentity => RUNNER_IDENTITY,
            Self::Agenda => AGENDA,
            Self::Ice => ICE,
            Self::Installable => INSTALLABLE,
            Self::Instant => INSTANT,
            Self::Program => PROGRAM,
            Self::WeakProgram => WEAK_PROGRAM,
            Self::Gear => GEAR,
        }
    }
}

/// Build the type line, e.g. `Ice: Sentry - Tracer • Rez: 4 • Strength: 4 • Influence: 2`.
///
/// Stats the card lacks are left out and reported as
/// [`RenderError::MissingField`].
#[must_use]
pub fn type_line(card: &Card) -> (String, Vec<RenderError>) {
    let mut line = card.type_code.label().to_string();
    if let Some(keywords) = card.keywords.as_deref().filter(|k| !k.is_empty()) {
        line.push_str(": ");
        line.push_str(keywords);
    }

    let mut missing = Vec::new();
    for stat in Layout::of(card).stats() {
        match (stat.value)(card) {
            Some(value) => {
                line.push_str(SEPARATOR);
                line.push_str(stat.label);
                line.push_str(": ");
                line.push_str(&value.to_string());
            }
            None => missing.push(RenderError::MissingField {
                title: card.title.clone(),
                field: stat.field,
            }),
        }
    }

    (line, missing)
}
