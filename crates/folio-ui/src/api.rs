use chrono::{
  DateTime,
  Utc
};
use folio_core::calendar::{
  Contribution,
  contributions_url,
  parse_contributions
};
use folio_core::event::{
  events_url,
  parse_events
};
use folio_core::{
  ActivityEvent,
  EventSource,
  FetchError
};
use gloo::net::http::Request;

/// Events source backed by the browser's `fetch`.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserEventSource {
  pub api_base: String,
  pub per_page: u32
}

impl EventSource for BrowserEventSource {
  async fn fetch_events(
    &self,
    username: &str
  ) -> Result<Vec<ActivityEvent>, FetchError>
  {
    let url = events_url(
      &self.api_base,
      username,
      self.per_page
    );
    let body = get_text(
      &url,
      "application/vnd.github+json"
    )
    .await?;
    parse_events(&body)
  }
}

pub async fn fetch_contributions(
  api_base: &str,
  username: &str
) -> Result<Vec<Contribution>, FetchError> {
  let url =
    contributions_url(api_base, username);
  let body =
    get_text(&url, "application/json")
      .await?;
  parse_contributions(&body)
}

async fn get_text(
  url: &str,
  accept: &str
) -> Result<String, FetchError> {
  tracing::debug!(url = %url, "GET");
  let response = Request::get(url)
    .header("Accept", accept)
    .send()
    .await
    .map_err(|e| {
      FetchError::Transport(e.to_string())
    })?;

  let status = response.status();
  let ok = response.ok();
  let body =
    response.text().await.map_err(|e| {
      FetchError::Transport(e.to_string())
    })?;

  if !ok {
    return Err(FetchError::status(
      status, body
    ));
  }
  Ok(body)
}

/// Wall clock as seen by the browser.
pub fn browser_now() -> DateTime<Utc> {
  DateTime::<Utc>::from_timestamp_millis(
    js_sys::Date::now() as i64
  )
  .unwrap_or_default()
}
