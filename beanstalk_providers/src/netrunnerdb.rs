use anyhow::Context;
use async_trait::async_trait;
use beanstalk_core::Card;
use beanstalk_core::CatalogSource;
use beanstalk_core::catalog::{Cycle, FactionRecord, Pack, RestrictionList};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

use crate::retry::retry_with_backoff;

/// Public NetrunnerDB API response wrapper.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Vec<T>,
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default, rename = "imageUrlTemplate")]
    image_url_template: Option<String>,
}

const fn default_success() -> bool {
    true
}

fn decode<T: DeserializeOwned>(resource: &str, body: &str) -> anyhow::Result<Envelope<T>> {
    let envelope: Envelope<T> = serde_json::from_str(body)
        .with_context(|| format!("Invalid response format for {resource}"))?;
    if !envelope.success {
        anyhow::bail!("NetrunnerDB reported failure for {resource}");
    }
    Ok(envelope)
}

/// Give cards without an explicit image the API's image template.
fn fill_image_urls(cards: &mut [Card], template: Option<&str>) {
    let Some(template) = template else {
        return;
    };
    for card in cards.iter_mut().filter(|c| c.image_url.is_none()) {
        card.image_url = Some(template.replace("{code}", &card.code));
    }
}

/// [`CatalogSource`] backed by the NetrunnerDB public API.
pub struct NetrunnerDbSource {
    client: Client,
    base_url: String,
    retry_delays: Vec<Duration>,
}

impl NetrunnerDbSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = base_url.into();
        info!("Creating NetrunnerDbSource for {base_url}");
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("beanstalk/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry_delays: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_retry_delays(mut self, retry_delays: Vec<Duration>) -> Self {
        self.retry_delays = retry_delays;
        self
    }

    /// Helper method to send a single request
    async fn try_get<T: DeserializeOwned>(&self, resource: &str) -> anyhow::Result<Envelope<T>> {
        let url = format!("{}/{resource}", self.base_url);
        debug!("Fetching {url}");

        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        decode(resource, &body)
    }

    async fn get<T: DeserializeOwned>(&self, resource: &str) -> anyhow::Result<Envelope<T>> {
        let envelope =
            retry_with_backoff(|| self.try_get::<T>(resource), &self.retry_delays).await?;
        info!("Fetched {} {resource}", envelope.data.len());
        Ok(envelope)
    }
}

#[async_trait]
impl CatalogSource for NetrunnerDbSource {
    async fn fetch_cards(&self) -> anyhow::Result<Vec<Card>> {
        let Envelope {
            mut data,
            image_url_template,
            ..
        } = self.get::<Card>("cards").await?;
        fill_image_urls(&mut data, image_url_template.as_deref());
        Ok(data)
    }

    async fn fetch_factions(&self) -> anyhow::Result<Vec<FactionRecord>> {
        Ok(self.get("factions").await?.data)
    }

    async fn fetch_packs(&self) -> anyhow::Result<Vec<Pack>> {
        Ok(self.get("packs").await?.data)
    }

    async fn fetch_restriction_lists(&self) -> anyhow::Result<Vec<RestrictionList>> {
        Ok(self.get("mwl").await?.data)
    }

    async fn fetch_cycles(&self) -> anyhow::Result<Vec<Cycle>> {
        Ok(self.get("cycles").await?.data)
    }
}
