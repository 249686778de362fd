use crate::{Command, Error, Result};
use beanstalk_core::Dispatcher;
use std::{sync::Arc, time::Duration};
use teloxide::prelude::*;
use teloxide::types::UserId;
use tokio::time::sleep;
use tracing::{info, warn};

/// Telegram front end for the card [`Dispatcher`].
#[derive(Clone)]
pub struct TelegramBot {
    /// Teloxide bot instance
    pub bot: Bot,
    /// Query pipeline and catalog
    pub dispatcher: Arc<Dispatcher>,
    /// Command prefix, usually `/`
    pub command_prefix: String,
    /// Our own user id and username, known once connected
    pub(crate) me: Option<(UserId, String)>,
}

impl TelegramBot {
    /// Create a new Telegram bot
    pub fn new(token: &str, dispatcher: Arc<Dispatcher>, command_prefix: String) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(Error::Config("Telegram bot token is empty".into()));
        }

        Ok(Self {
            bot: Bot::new(token),
            dispatcher,
            command_prefix,
            me: None,
        })
    }

    /// Whether a message was sent by this bot.
    #[must_use]
    pub fn is_own(&self, msg: &Message) -> bool {
        match (&self.me, &msg.from) {
            (Some((me, _)), Some(user)) => user.id == *me,
            _ => false,
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        self.me.as_ref().map_or("", |(_, name)| name.as_str())
    }

    /// Test connection to Telegram API with linear backoff retry.
    /// Starts at 2s, increases by 2s each attempt, max 10s delay.
    /// Retries indefinitely until connection succeeds.
    async fn test_connection(&self) -> (UserId, String) {
        const INITIAL_DELAY_SECS: u64 = 2;
        const MAX_DELAY_SECS: u64 = 10;

        let mut attempt = 1u64;
        loop {
            match self.bot.get_me().await {
                Ok(bot_user) => {
                    let username = bot_user.user.username.clone().unwrap_or_default();
                    info!(
                        "Connected to Telegram API: @{} (id: {})",
                        if username.is_empty() { "no username" } else { &username },
                        bot_user.user.id
                    );
                    return (bot_user.user.id, username);
                }
                Err(e) => {
                    // 2s, 4s, 6s, 8s, 10s, 10s, ...
                    let delay_secs = (INITIAL_DELAY_SECS * attempt).min(MAX_DELAY_SECS);
                    let delay = Duration::from_secs(delay_secs);

                    warn!("Connection attempt {attempt} failed: {e}. Retrying in {delay_secs}s...");

                    if attempt == 1 {
                        warn!("This may be due to:");
                        warn!("  - Network connectivity issues");
                        warn!("  - Firewall blocking api.telegram.org");
                        warn!("  - Invalid bot token");
                        warn!("  - Telegram API being temporarily unavailable");
                    }

                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Run the bot until Ctrl+C.
    pub async fn run(mut self) -> Result<()> {
        use teloxide::dispatching::{Dispatcher, UpdateFilterExt};
        use teloxide::dptree;
        use teloxide::types::Update;

        self.me = Some(self.test_connection().await);

        if let Err(e) = self.bot.set_my_commands(Command::bot_commands()).await {
            warn!("Failed to register bot commands: {e}");
        }

        let bot = self.bot.clone();

        let schema = dptree::entry().branch(Update::filter_message().endpoint({
            let bot_clone = self.clone();
            move |_bot: Bot, msg: Message| {
                let bot_clone = bot_clone.clone();
                async move { crate::handler::handle_message(bot_clone, msg).await }
            }
        }));

        Dispatcher::builder(bot, schema)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}
