use std::time::Duration;

use anyhow::Context;
use folio_core::calendar::{Contribution, contributions_url, parse_contributions};
use folio_core::config::PortfolioConfig;
use folio_core::event::{events_url, parse_events};
use folio_core::{ActivityEvent, EventSource, FetchError};
use tracing::instrument;

const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

/// Unauthenticated client for the GitHub events API and the contribution
/// service behind the calendar.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_base: String,
    per_page: u32,
    contributions_api: String,
}

impl GithubClient {
    pub fn from_config(config: &PortfolioConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.github.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .context("failed building HTTP client for GitHub")?;

        Ok(Self {
            http,
            api_base: config.github.api_base.clone(),
            per_page: config.github.per_page,
            contributions_api: config.calendar.contributions_api.clone(),
        })
    }

    #[instrument(skip(self))]
    pub async fn fetch_contributions(
        &self,
        username: &str,
    ) -> Result<Vec<Contribution>, FetchError> {
        let url = contributions_url(&self.contributions_api, username);
        let body = self.get_text(&url, "application/json").await?;
        parse_contributions(&body)
    }

    async fn get_text(&self, url: &str, accept: &str) -> Result<String, FetchError> {
        tracing::debug!(url = %url, "GET");
        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, accept)
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %url, "non-success response");
            return Err(FetchError::status(status.as_u16(), body));
        }
        Ok(body)
    }
}

impl EventSource for GithubClient {
    #[instrument(skip(self))]
    async fn fetch_events(&self, username: &str) -> Result<Vec<ActivityEvent>, FetchError> {
        let url = events_url(&self.api_base, username, self.per_page);
        let body = self
            .get_text(&url, "application/vnd.github+json")
            .await?;
        parse_events(&body)
    }
}
