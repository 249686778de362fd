use beanstalk_core::DispatchConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable that overrides `telegram.token`.
pub const TOKEN_ENV: &str = "BEANSTALK_TOKEN";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub netrunnerdb: NetrunnerDbConfig,
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TelegramConfig {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NetrunnerDbConfig {
    #[serde(default = "NetrunnerDbConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "NetrunnerDbConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "NetrunnerDbConfig::default_retry_delays_secs")]
    pub retry_delays_secs: Vec<u64>,
}

impl Default for NetrunnerDbConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout_secs: Self::default_timeout_secs(),
            retry_delays_secs: Self::default_retry_delays_secs(),
        }
    }
}

impl NetrunnerDbConfig {
    fn default_base_url() -> String {
        "https://netrunnerdb.com/api/2.0/public".to_string()
    }

    const fn default_timeout_secs() -> u64 {
        30
    }

    fn default_retry_delays_secs() -> Vec<u64> {
        vec![1, 2, 4]
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BotConfig {
    #[serde(default = "BotConfig::default_command_prefix")]
    pub command_prefix: String,
    #[serde(flatten)]
    pub dispatch: DispatchConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            command_prefix: Self::default_command_prefix(),
            dispatch: DispatchConfig::default(),
        }
    }
}

impl BotConfig {
    fn default_command_prefix() -> String {
        "/".to_string()
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("beanstalk"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'beanstalk init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        debug!("Reading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Bot token: explicit override, then `BEANSTALK_TOKEN`, then the file.
    #[must_use]
    pub fn telegram_token(&self, explicit: Option<String>) -> Option<String> {
        explicit
            .or_else(|| std::env::var(TOKEN_ENV).ok())
            .or_else(|| Some(self.telegram.token.clone()))
            .filter(|t| !t.trim().is_empty())
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "telegram": {
    "token": "your-telegram-bot-token-here"
  },
  "netrunnerdb": {
    "base_url": "https://netrunnerdb.com/api/2.0/public",
    "timeout_secs": 30,
    "retry_delays_secs": [1, 2, 4]
  },
  "bot": {
    "command_prefix": "/",
    "refresh_cooldown_secs": 300,
    "resolver": {
      "threshold": 50
    },
    "links": {
      "card_url": "https://netrunnerdb.com/en/card/{code}",
      "image_url": "https://netrunnerdb.com/card_image/{code}.png"
    }
  }
}"#;

        std::fs::write(&config_path, config_template)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Put your Telegram bot token in the config (or export {TOKEN_ENV})");
        println!("   2. Run 'beanstalk lookup \"[[Sure Gamble]]\"' to check the catalog");
        println!("   3. Run 'beanstalk run' to start the bot");
        println!();
        Ok(())
    }
}
