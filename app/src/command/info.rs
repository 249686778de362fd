use super::build_store;
use beanstalk_config::{Config, TOKEN_ENV};
use tracing::info;

/// Strategy for displaying configuration information.
///
/// Prints the masked bot token, catalog API settings and bot tuning, then
/// tries one catalog load to report whether the API is reachable.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== beanstalk Configuration ===\n");
        println!("Config file: {}\n", Config::config_path()?.display());

        println!("Telegram:");
        let token = config
            .telegram_token(None)
            .map_or_else(|| "(not set)".to_string(), |t| mask_token(&t));
        println!("  Token: {token}");
        if std::env::var(TOKEN_ENV).is_ok() {
            println!("  (from {TOKEN_ENV})");
        }
        println!("  Command Prefix: {}", config.bot.command_prefix);
        println!();

        println!("Bot:");
        let dispatch = &config.bot.dispatch;
        println!("  Match Threshold: {}", dispatch.resolver.threshold);
        println!("  Refresh Cooldown: {}s", dispatch.refresh_cooldown_secs);
        println!("  Card URL: {}", dispatch.links.card_url);
        println!("  Image URL: {}", dispatch.links.image_url);
        println!();

        println!("NetrunnerDB:");
        println!("  Base URL: {}", config.netrunnerdb.base_url);
        println!("  Timeout: {}s", config.netrunnerdb.timeout_secs);
        println!("  Retry Delays: {:?}", config.netrunnerdb.retry_delays_secs);

        info!("Testing catalog download");
        match build_store(&config)?.refresh().await {
            Ok(snapshot) => {
                println!("  Status: Reachable");
                println!("  Cards: {}", snapshot.len());
                println!(
                    "  Restriction List: {}",
                    snapshot.restriction_list().unwrap_or("(none)")
                );
            }
            Err(e) => {
                println!("  Status: Catalog load failed");
                println!("  Error: {e}");
            }
        }

        Ok(())
    }
}

fn mask_token(token: &str) -> String {
    match token.char_indices().nth(8) {
        Some((i, _)) => format!("{}...***", &token[..i]),
        None => "***".to_string(),
    }
}
