use crate::describe::{
  DisplayItem,
  build_display_items
};
use crate::error::{
  FetchError,
  user_facing_error
};
use crate::event::ActivityEvent;
use crate::generation::RequestTicket;

pub const DEFAULT_LIMIT: usize = 100;
pub const LOADING_MESSAGE: &str =
  "Loading activity...";
pub const EMPTY_MESSAGE: &str =
  "No recent public activity.";

/// Anything that can produce a user's recent public events.
#[allow(async_fn_in_trait)]
pub trait EventSource {
  async fn fetch_events(
    &self,
    username: &str
  ) -> Result<Vec<ActivityEvent>, FetchError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineQuery {
  pub username: String,
  pub limit:    usize
}

impl TimelineQuery {
  pub fn new(
    username: impl Into<String>,
    limit: usize
  ) -> Self {
    Self {
      username: username.into(),
      limit
    }
  }
}

/// What a timeline instance owns between renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TimelineState {
  #[default]
  Loading,
  Loaded(Vec<ActivityEvent>),
  Failed(String)
}

impl TimelineState {
  pub fn from_result(
    result: Result<
      Vec<ActivityEvent>,
      FetchError
    >
  ) -> Self {
    match result {
      | Ok(events) => Self::Loaded(events),
      | Err(error) => {
        Self::Failed(error.to_string())
      }
    }
  }

  /// Derives what to draw for `limit` items.
  pub fn view(
    &self,
    limit: usize
  ) -> TimelineView {
    match self {
      | Self::Loading => TimelineView::Loading,
      | Self::Failed(error) => {
        TimelineView::Error(user_facing_error(
          error
        ))
      }
      | Self::Loaded(events) => {
        let items =
          build_display_items(events, limit);
        if items.is_empty() {
          TimelineView::Empty
        } else {
          TimelineView::Items(items)
        }
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineView {
  Loading,
  Error(String),
  Empty,
  Items(Vec<DisplayItem>)
}

/// Fetches events for `username` and returns the new state, or `None` when
/// `ticket` went stale while the request was in flight.
#[tracing::instrument(skip(source, ticket), fields(generation = ticket.generation()))]
pub async fn load_timeline<S>(
  source: &S,
  ticket: &RequestTicket,
  username: &str
) -> Option<TimelineState>
where
  S: EventSource
{
  let result =
    source.fetch_events(username).await;

  if !ticket.is_current() {
    tracing::debug!(
      username = %username,
      "discarding stale activity response"
    );
    return None;
  }

  match &result {
    | Ok(events) => tracing::info!(
      username = %username,
      count = events.len(),
      "loaded activity events"
    ),
    | Err(error) => tracing::warn!(
      username = %username,
      %error,
      "activity fetch failed"
    )
  }
  Some(TimelineState::from_result(result))
}
