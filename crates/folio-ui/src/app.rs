use folio_core::PortfolioConfig;
use yew::{
  Html,
  function_component,
  html,
  use_state
};

use crate::components::{
  ActivityTimeline,
  ContributionCalendar
};

const PORTFOLIO_CONFIG_TOML: &str =
  include_str!("../assets/portfolio.toml");

fn load_portfolio_config()
-> PortfolioConfig {
  match PortfolioConfig::from_toml_str(
    PORTFOLIO_CONFIG_TOML
  ) {
    | Ok(config) => {
      tracing::info!(
        username = %config.github.username,
        limit = config.github.limit,
        scheme = ?config.calendar.color_scheme,
        "loaded portfolio config"
      );
      config
    }
    | Err(error) => {
      tracing::error!(%error, "failed parsing portfolio config; using defaults");
      PortfolioConfig::default()
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let config =
    use_state(load_portfolio_config);
  let github = &config.github;

  html! {
      <main class="portfolio">
          <section class="panel github-section">
              <div class="header">{ "GitHub Contributions" }</div>
              <ContributionCalendar
                  username={github.username.clone()}
                  settings={config.calendar.clone()}
              />
          </section>
          <ActivityTimeline
              username={github.username.clone()}
              limit={github.limit}
              api_base={github.api_base.clone()}
              per_page={github.per_page}
          />
      </main>
  }
}
