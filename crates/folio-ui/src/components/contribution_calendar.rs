use std::rc::Rc;

use folio_core::FetchError;
use folio_core::calendar::{
  LOADING_MESSAGE,
  profile_url,
  select_last_year
};
use folio_core::config::CalendarSettings;
use web_sys::{
  KeyboardEvent,
  MouseEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html,
  use_effect_with,
  use_state
};

use super::contribution_heatmap::ContributionHeatmap;
use crate::api::{
  browser_now,
  fetch_contributions
};

/// A loaded calendar, ready to draw with the widget's fixed settings.
pub trait CalendarRenderer {
  fn render(
    &self,
    settings: &CalendarSettings
  ) -> Html;
}

/// Obtains the renderer for `username`: fetches the contribution data and
/// applies the last-year transform.
#[tracing::instrument(skip(settings))]
async fn load_calendar_renderer(
  username: String,
  settings: CalendarSettings
) -> Result<Rc<dyn CalendarRenderer>, FetchError>
{
  let contributions = fetch_contributions(
    &settings.contributions_api,
    &username
  )
  .await?;
  let today = browser_now().date_naive();
  let retained =
    select_last_year(contributions, today);
  tracing::info!(
    days = retained.len(),
    "contribution calendar ready"
  );
  Ok(Rc::new(ContributionHeatmap::new(
    &retained
  )))
}

#[derive(Properties, PartialEq)]
pub struct ContributionCalendarProps {
  pub username: String,
  #[prop_or_default]
  pub settings: CalendarSettings
}

#[function_component(ContributionCalendar)]
pub fn contribution_calendar(
  props: &ContributionCalendarProps
) -> Html {
  let renderer = use_state(|| {
    None::<Rc<dyn CalendarRenderer>>
  });

  {
    let renderer = renderer.clone();
    let username = props.username.clone();
    let settings = props.settings.clone();
    use_effect_with((), move |_| {
      wasm_bindgen_futures::spawn_local(
        async move {
          match load_calendar_renderer(
            username, settings
          )
          .await
          {
            | Ok(handle) => {
              renderer.set(Some(handle))
            }
            | Err(error) => {
              tracing::error!(%error, "failed loading contribution calendar")
            }
          }
        }
      );
      || ()
    });
  }

  let url = profile_url(&props.username);
  let onclick = {
    let url = url.clone();
    Callback::from(move |_: MouseEvent| {
      open_in_new_context(&url)
    })
  };
  let onkeydown = {
    let url = url.clone();
    Callback::from(
      move |event: KeyboardEvent| {
        let key = event.key();
        if key == "Enter" || key == " " {
          event.prevent_default();
          open_in_new_context(&url);
        }
      }
    )
  };

  let label = format!(
    "View {}'s GitHub profile",
    props.username
  );

  html! {
      <div
          class={classes!("contribution-calendar", props.settings.color_scheme.as_class())}
          role="link"
          tabindex="0"
          aria-label={label}
          {onclick}
          {onkeydown}
      >
          {
              match (*renderer).as_ref() {
                  Some(handle) => handle.render(&props.settings),
                  None => html! {
                      <div class="calendar-loading">{ LOADING_MESSAGE }</div>
                  },
              }
          }
      </div>
  }
}

fn open_in_new_context(url: &str) {
  let Some(window) = web_sys::window()
  else {
    tracing::warn!(
      "no window; cannot open profile"
    );
    return;
  };
  if let Err(error) = window
    .open_with_url_and_target_and_features(
      url,
      "_blank",
      "noopener,noreferrer"
    )
  {
    tracing::warn!(
      ?error,
      url,
      "failed opening profile"
    );
  }
}
