use teloxide::types::BotCommand;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Refresh,
}

impl Command {
    fn all() -> Vec<BotCommand> {
        vec![
            BotCommand {
                command: "start".to_string(),
                description: "Introduce the bot".to_string(),
            },
            BotCommand {
                command: "help".to_string(),
                description: "Show how to look up cards".to_string(),
            },
            BotCommand {
                command: "refresh".to_string(),
                description: "Reload the card catalog".to_string(),
            },
        ]
    }

    #[must_use]
    pub fn bot_commands() -> Vec<BotCommand> {
        Self::all()
    }

    /// Parse the first word of `text` as a command.
    ///
    /// `/refresh@other_bot` is addressed to someone else and yields `None`.
    #[must_use]
    pub fn parse_from_text(text: &str, prefix: &str, bot_name: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?.to_lowercase();
        let word = word.strip_prefix(prefix)?;

        let name = match word.split_once('@') {
            Some((name, mention)) => {
                if !mention.eq_ignore_ascii_case(bot_name) {
                    return None;
                }
                name
            }
            None => word,
        };

        match name {
            "start" => Some(Self::Start),
            "help" => Some(Self::Help),
            "refresh" => Some(Self::Refresh),
            _ => None,
        }
    }

    #[must_use]
    pub const fn help_text() -> &'static str {
        r"
🃏 Beanstalk card lookup

Put a card name in double brackets anywhere in a message:
  [[Sure Gamble]]    card text, stats and legality
  [[!Sure Gamble]]   full card image

Names don't have to be exact; the closest match is shown.

Commands:
/refresh - Reload the card catalog (at most once every few minutes)
/help    - Show this help
"
    }

    #[must_use]
    pub const fn welcome_text() -> &'static str {
        r"
👋 Hi! I look up Android: Netrunner cards.

Try sending [[Hedge Fund]] or [[!Ice Wall]].

Send /help for details.
"
    }
}
