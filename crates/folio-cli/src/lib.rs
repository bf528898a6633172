pub mod cli;
pub mod github;
pub mod render;
pub mod settings;

use std::ffi::OsString;
use std::io;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use folio_core::calendar::{CalendarLayout, ColorScheme, select_last_year};
use folio_core::timeline::load_timeline;
use folio_core::{GenerationCounter, TimelineQuery};
use tracing::{debug, info};

use crate::cli::Command;
use crate::github::GithubClient;
use crate::render::Renderer;

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let cli = cli::GlobalCli::parse_from(raw_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;

    info!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        "starting folio CLI"
    );

    let config = settings::load_config(cli.config.as_deref(), &cli.overrides)?;
    debug!(?config, "resolved configuration");

    let client = GithubClient::from_config(&config)?;
    let renderer = Renderer::for_stdout();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    match cli.command {
        Command::Timeline { user, limit } => {
            let query = TimelineQuery::new(
                user.unwrap_or_else(|| config.github.username.clone()),
                limit.unwrap_or(config.github.limit),
            );
            let counter = GenerationCounter::new();
            let ticket = counter.begin();
            let state = runtime
                .block_on(load_timeline(&client, &ticket, &query.username))
                .unwrap_or_default();

            renderer.write_timeline(io::stdout().lock(), &state.view(query.limit), Utc::now())?;
        }
        Command::Calendar { user, light } => {
            let username = user.unwrap_or_else(|| config.github.username.clone());
            let scheme = if light {
                ColorScheme::Light
            } else {
                config.calendar.color_scheme
            };
            let contributions = runtime
                .block_on(client.fetch_contributions(&username))
                .with_context(|| format!("failed to load contributions for {username}"))?;
            let today = Utc::now().date_naive();
            let layout = CalendarLayout::build(&select_last_year(contributions, today));
            info!(total = layout.total, "loaded contribution calendar");

            renderer.write_calendar(
                io::stdout().lock(),
                &layout,
                &config.calendar,
                scheme,
                &username,
            )?;
        }
    }

    info!("done");
    Ok(())
}
