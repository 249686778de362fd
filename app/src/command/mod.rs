//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main`.

use beanstalk_config::Config;
use beanstalk_core::{CatalogStore, Dispatcher};
use beanstalk_providers::NetrunnerDbSource;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod info;
mod init;
mod lookup;
mod run;
mod version;

pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use lookup::{LookupInput, LookupStrategy};
pub use run::{RunInput, RunStrategy};
pub use version::VersionStrategy;

/// Catalog store backed by the configured NetrunnerDB endpoint.
fn build_store(config: &Config) -> anyhow::Result<Arc<CatalogStore>> {
    let api = &config.netrunnerdb;
    info!(
        "Catalog source: {} (timeout {}s, retries {:?})",
        api.base_url, api.timeout_secs, api.retry_delays_secs
    );

    let source = NetrunnerDbSource::new(api.base_url.clone(), Duration::from_secs(api.timeout_secs))?
        .with_retry_delays(
            api.retry_delays_secs
                .iter()
                .copied()
                .map(Duration::from_secs)
                .collect(),
        );

    Ok(Arc::new(CatalogStore::new(Arc::new(source))))
}

fn build_dispatcher(config: &Config, store: Arc<CatalogStore>) -> Dispatcher {
    Dispatcher::new(store, config.bot.dispatch.clone())
}

/// Core trait defining the contract for all command strategies.
///
/// # Example
/// ```rust,ignore
/// struct MyStrategy;
///
/// impl CommandStrategy for MyStrategy {
///     type Input = MyInput;
///
///     async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
///         // Command logic here
///         Ok(())
///     }
/// }
/// ```
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
