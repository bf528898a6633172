use folio_core::config::{
  DEFAULT_API_BASE,
  DEFAULT_USERNAME,
  MAX_PER_PAGE
};
use folio_core::describe::DisplayItem;
use folio_core::timeline::{
  DEFAULT_LIMIT,
  EMPTY_MESSAGE,
  LOADING_MESSAGE,
  load_timeline
};
use folio_core::{
  GenerationCounter,
  TimelineState,
  TimelineView,
  format_relative_age
};
use yew::{
  Html,
  Properties,
  classes,
  function_component,
  html,
  use_effect_with,
  use_memo,
  use_state
};

use crate::api::{
  BrowserEventSource,
  browser_now
};

fn default_username() -> String {
  DEFAULT_USERNAME.to_string()
}

fn default_api_base() -> String {
  DEFAULT_API_BASE.to_string()
}

#[derive(Properties, PartialEq)]
pub struct ActivityTimelineProps {
  #[prop_or_else(default_username)]
  pub username: String,
  #[prop_or(DEFAULT_LIMIT)]
  pub limit:    usize,
  #[prop_or_else(default_api_base)]
  pub api_base: String,
  #[prop_or(MAX_PER_PAGE)]
  pub per_page: u32
}

#[function_component(ActivityTimeline)]
pub fn activity_timeline(
  props: &ActivityTimelineProps
) -> Html {
  let state =
    use_state(TimelineState::default);
  let generation = use_memo((), |_| {
    GenerationCounter::new()
  });

  {
    let state = state.clone();
    let generation = generation.clone();
    let source = BrowserEventSource {
      api_base: props.api_base.clone(),
      per_page: props.per_page
    };

    use_effect_with(
      (props.username.clone(), props.limit),
      move |(username, limit)| {
        let ticket = generation.begin();
        tracing::debug!(
          username = %username,
          limit,
          generation = ticket.generation(),
          "refreshing activity timeline"
        );
        state.set(TimelineState::Loading);

        let username = username.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            if let Some(next) = load_timeline(
              &source, &ticket, &username
            )
            .await
            {
              state.set(next);
            }
          }
        );

        move || generation.invalidate()
      }
    );
  }

  let body = match state.view(props.limit) {
    | TimelineView::Loading => html! {
        <p class="timeline-status">{ LOADING_MESSAGE }</p>
    },
    | TimelineView::Error(message) => html! {
        <p class="timeline-status timeline-error" role="alert">{ message }</p>
    },
    | TimelineView::Empty => html! {
        <p class="timeline-status">{ EMPTY_MESSAGE }</p>
    },
    | TimelineView::Items(items) => {
      let now = browser_now();
      html! {
          <ol class="timeline">
              { for items.iter().map(|item| render_item(item, now)) }
          </ol>
      }
    }
  };

  html! {
      <section class="panel activity-timeline" aria-label="Recent GitHub activity">
          <div class="header">{ "Recent Activity" }</div>
          { body }
      </section>
  }
}

fn render_item(
  item: &DisplayItem,
  now: chrono::DateTime<chrono::Utc>
) -> Html {
  let icon = item.icon();
  html! {
      <li key={item.id.clone()} class="timeline-item">
          <span class="timeline-connector" aria-hidden="true"></span>
          <span class={classes!("timeline-icon", icon.as_class())} aria-hidden="true">
              { icon.glyph() }
          </span>
          <span class="timeline-text">{ item.sentence() }</span>
          <time class="timeline-age" datetime={item.timestamp.to_rfc3339()}>
              { format_relative_age(item.timestamp, now) }
          </time>
      </li>
  }
}
