use super::{CommandStrategy, build_dispatcher, build_store};
use beanstalk_config::Config;
use beanstalk_core::Reply;

/// Input for the lookup command.
pub struct LookupInput {
    /// Message text, as a chat user would send it
    pub message: String,
}

/// Strategy that loads the catalog once and answers a single message on
/// stdout.
pub struct LookupStrategy;

impl CommandStrategy for LookupStrategy {
    type Input = LookupInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let store = build_store(&config)?;
        store.refresh().await?;

        let dispatcher = build_dispatcher(&config, store);
        let replies = dispatcher.answer(&input.message, false);
        if replies.is_empty() {
            println!("No [[card]] queries found in message.");
            return Ok(());
        }

        for reply in replies {
            match reply {
                Reply::Card(display) => println!("{display}"),
                Reply::Text(text) => println!("{text}"),
            }
            println!();
        }

        Ok(())
    }
}
