use serde::{
  Deserialize,
  Serialize
};
use thiserror::Error;
use tracing::{
  debug,
  warn
};

use crate::calendar::{
  CalendarTheme,
  ColorScheme,
  LEVELS,
  default_dark_ramp,
  default_light_ramp
};
use crate::timeline::DEFAULT_LIMIT;

pub const DEFAULT_USERNAME: &str = "octocat";
pub const DEFAULT_API_BASE: &str =
  "https://api.github.com";
pub const DEFAULT_CONTRIBUTIONS_API: &str =
  "https://github-contributions-api.jogruber.de/v4";
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid config: {0}")]
  Parse(#[from] toml::de::Error),

  #[error("invalid override `{key}`: {reason}")]
  Override { key: String, reason: String }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Default,
  Serialize,
  Deserialize,
)]
pub struct PortfolioConfig {
  #[serde(default)]
  pub github:   GithubSettings,
  #[serde(default)]
  pub calendar: CalendarSettings
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct GithubSettings {
  #[serde(default = "default_username")]
  pub username:     String,
  #[serde(default = "default_api_base")]
  pub api_base:     String,
  #[serde(default = "default_per_page")]
  pub per_page:     u32,
  #[serde(default = "default_limit")]
  pub limit:        usize,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
pub struct CalendarSettings {
  #[serde(default)]
  pub color_scheme:        ColorScheme,
  #[serde(default = "default_font_size")]
  pub font_size:           u32,
  #[serde(default = "default_block_size")]
  pub block_size:          u32,
  #[serde(default = "default_block_margin")]
  pub block_margin:        u32,
  #[serde(default = "default_true")]
  pub hide_color_legend:   bool,
  #[serde(default)]
  pub hide_total_count:    bool,
  #[serde(default = "default_true")]
  pub show_weekday_labels: bool,
  #[serde(
    default = "default_contributions_api"
  )]
  pub contributions_api:   String,
  #[serde(default)]
  pub theme:               CalendarTheme
}

impl Default for GithubSettings {
  fn default() -> Self {
    Self {
      username:     default_username(),
      api_base:     default_api_base(),
      per_page:     default_per_page(),
      limit:        default_limit(),
      timeout_secs: default_timeout_secs()
    }
  }
}

impl Default for CalendarSettings {
  fn default() -> Self {
    Self {
      color_scheme:        ColorScheme::Dark,
      font_size:           default_font_size(),
      block_size:          default_block_size(),
      block_margin:        default_block_margin(),
      hide_color_legend:   true,
      hide_total_count:    false,
      show_weekday_labels: true,
      contributions_api:
        default_contributions_api(),
      theme:               CalendarTheme::default()
    }
  }
}

fn default_true() -> bool {
  true
}

fn default_username() -> String {
  DEFAULT_USERNAME.to_string()
}

fn default_api_base() -> String {
  DEFAULT_API_BASE.to_string()
}

fn default_per_page() -> u32 {
  MAX_PER_PAGE
}

fn default_limit() -> usize {
  DEFAULT_LIMIT
}

fn default_timeout_secs() -> u64 {
  30
}

fn default_font_size() -> u32 {
  14
}

fn default_block_size() -> u32 {
  12
}

fn default_block_margin() -> u32 {
  4
}

fn default_contributions_api() -> String {
  DEFAULT_CONTRIBUTIONS_API.to_string()
}

impl PortfolioConfig {
  pub fn from_toml_str(
    text: &str
  ) -> Result<Self, ConfigError> {
    let table = text.parse::<toml::Table>()?;
    Self::from_table(table)
  }

  pub fn from_table(
    table: toml::Table
  ) -> Result<Self, ConfigError> {
    let mut config = toml::Value::Table(table)
      .try_into::<PortfolioConfig>()?;
    config.sanitize();
    Ok(config)
  }

  /// Repairs values that would break a request or a render.
  pub fn sanitize(&mut self) {
    let github = &mut self.github;
    if github.username.trim().is_empty() {
      warn!(
        "blank github.username; using \
         default"
      );
      github.username = default_username();
    }
    github.username =
      github.username.trim().to_string();
    if github.api_base.trim().is_empty() {
      github.api_base = default_api_base();
    }
    let per_page =
      github.per_page.clamp(1, MAX_PER_PAGE);
    if per_page != github.per_page {
      warn!(
        requested = github.per_page,
        per_page,
        "clamped github.per_page"
      );
      github.per_page = per_page;
    }

    let calendar = &mut self.calendar;
    if calendar.contributions_api.trim().is_empty()
    {
      calendar.contributions_api =
        default_contributions_api();
    }
    if calendar.theme.light.len() != LEVELS {
      warn!(
        colors = calendar.theme.light.len(),
        "light ramp needs five colors; \
         using default"
      );
      calendar.theme.light =
        default_light_ramp();
    }
    if calendar.theme.dark.len() != LEVELS {
      warn!(
        colors = calendar.theme.dark.len(),
        "dark ramp needs five colors; \
         using default"
      );
      calendar.theme.dark = default_dark_ramp();
    }
  }
}

/// Sets `section.key = value` in a parsed config table.
///
/// `value` is read as a TOML literal when it parses as one and as a plain
/// string otherwise, so `github.limit=20` and `github.username=me` both work.
pub fn apply_override(
  table: &mut toml::Table,
  key: &str,
  value: &str
) -> Result<(), ConfigError> {
  let key = key.trim();
  let mut segments =
    key.split('.').map(str::trim).collect::<Vec<_>>();
  let Some(leaf) = segments.pop() else {
    return Err(override_error(key, "empty key"));
  };
  if leaf.is_empty()
    || segments.iter().any(|s| s.is_empty())
  {
    return Err(override_error(
      key,
      "empty key segment"
    ));
  }

  let mut cursor = table;
  for segment in segments {
    let entry = cursor
      .entry(segment.to_string())
      .or_insert(toml::Value::Table(
        toml::Table::new()
      ));
    let toml::Value::Table(next) = entry else {
      return Err(override_error(
        key,
        &format!("`{segment}` is not a table")
      ));
    };
    cursor = next;
  }

  let parsed = parse_override_value(value);
  debug!(key = %key, value = %parsed, "applying config override");
  cursor.insert(leaf.to_string(), parsed);
  Ok(())
}

fn parse_override_value(
  raw: &str
) -> toml::Value {
  let raw = raw.trim();
  format!("value = {raw}")
    .parse::<toml::Table>()
    .ok()
    .and_then(|mut doc| doc.remove("value"))
    .unwrap_or_else(|| {
      toml::Value::String(raw.to_string())
    })
}

fn override_error(
  key: &str,
  reason: &str
) -> ConfigError {
  ConfigError::Override {
    key:    key.to_string(),
    reason: reason.to_string()
  }
}
