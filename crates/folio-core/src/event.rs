use chrono::{
  DateTime,
  Utc
};
use serde::{
  Deserialize,
  Deserializer,
  Serialize
};

use crate::error::FetchError;

/// One record from `GET /users/{username}/events`.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct ActivityEvent {
  pub id:         String,
  #[serde(rename = "type")]
  pub kind:       String,
  pub created_at: DateTime<Utc>,
  #[serde(
    default,
    rename = "repo",
    alias = "repository"
  )]
  pub repository: Option<Repository>,
  #[serde(
    default,
    deserialize_with = "null_as_default"
  )]
  pub payload:    EventPayload,
  #[serde(default)]
  pub actor:      Option<Actor>
}

impl ActivityEvent {
  /// Repository name when present and non-blank.
  pub fn repository_name(
    &self
  ) -> Option<&str> {
    self
      .repository
      .as_ref()
      .and_then(|repo| repo.name.as_deref())
      .map(str::trim)
      .filter(|name| !name.is_empty())
  }
}

#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Repository {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub url:  Option<String>
}

#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Actor {
  #[serde(default)]
  pub login:         Option<String>,
  #[serde(default)]
  pub display_login: Option<String>,
  #[serde(default)]
  pub avatar_url:    Option<String>
}

/// The union of payload fields the timeline reads. Everything else GitHub
/// sends is ignored.
#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct EventPayload {
  #[serde(default)]
  pub action:       Option<String>,
  #[serde(default)]
  pub size:         Option<u64>,
  #[serde(default)]
  pub commits:      Option<Vec<PushCommit>>,
  #[serde(default)]
  pub number:       Option<u64>,
  #[serde(default)]
  pub pull_request: Option<PullRequest>,
  #[serde(default)]
  pub issue:        Option<Issue>,
  #[serde(default)]
  pub ref_type:     Option<String>,
  #[serde(default, rename = "ref")]
  pub git_ref:      Option<String>,
  #[serde(default)]
  pub release:      Option<Release>
}

impl EventPayload {
  /// Commits in a push: `size`, falling back to the embedded commit list.
  pub fn commit_count(&self) -> u64 {
    self.size.unwrap_or_else(|| {
      self
        .commits
        .as_ref()
        .map(|commits| commits.len() as u64)
        .unwrap_or(0)
    })
  }
}

#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct PushCommit {
  #[serde(default)]
  pub sha:     Option<String>,
  #[serde(default)]
  pub message: Option<String>
}

#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct PullRequest {
  #[serde(default)]
  pub number: Option<u64>,
  #[serde(default)]
  pub title:  Option<String>,
  #[serde(default)]
  pub merged: Option<bool>
}

#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Issue {
  #[serde(default)]
  pub number: Option<u64>,
  #[serde(default)]
  pub title:  Option<String>
}

#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Release {
  #[serde(default)]
  pub tag_name: Option<String>,
  #[serde(default)]
  pub name:     Option<String>
}

fn null_as_default<'de, D, T>(
  deserializer: D
) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>
{
  Ok(
    Option::<T>::deserialize(deserializer)?
      .unwrap_or_default()
  )
}

/// Decodes an events response body.
pub fn parse_events(
  body: &str
) -> Result<Vec<ActivityEvent>, FetchError> {
  let events =
    serde_json::from_str::<Vec<ActivityEvent>>(
      body
    )?;
  tracing::debug!(
    count = events.len(),
    "decoded activity events"
  );
  Ok(events)
}

/// `{api_base}/users/{username}/events?per_page={per_page}`
pub fn events_url(
  api_base: &str,
  username: &str,
  per_page: u32
) -> String {
  format!(
    "{}/users/{}/events?per_page={per_page}",
    api_base.trim_end_matches('/'),
    username.trim()
  )
}
