use super::{CommandStrategy, build_dispatcher, build_store};
use beanstalk_config::{Config, TOKEN_ENV};
use beanstalk_telegram::TelegramBot;
use std::sync::Arc;
use tracing::{info, warn};

/// Input for the run command.
pub struct RunInput {
    /// Optional bot token (overrides env and config)
    pub token: Option<String>,
}

/// Strategy for running the Telegram bot.
pub struct RunStrategy;

impl CommandStrategy for RunStrategy {
    type Input = RunInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        let Some(token) = config.telegram_token(input.token) else {
            anyhow::bail!(
                "Telegram bot token not configured. Set \"telegram.token\" in config or export {TOKEN_ENV}"
            );
        };

        let store = build_store(&config)?;

        // The bot still starts without a catalog and answers queries with an
        // "unavailable" reply until a refresh succeeds.
        info!("Loading card catalog...");
        match store.refresh().await {
            Ok(snapshot) => info!("Catalog ready with {} cards", snapshot.len()),
            Err(e) => warn!("Initial catalog load failed: {e}"),
        }

        let dispatcher = Arc::new(build_dispatcher(&config, store));
        let bot = TelegramBot::new(&token, dispatcher, config.bot.command_prefix.clone())?;

        info!("Telegram bot is running. Press Ctrl+C to stop.");
        bot.run().await?;

        Ok(())
    }
}
