use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use folio_core::PortfolioConfig;
use folio_core::config::apply_override;
use tracing::{info, warn};

use crate::cli::KeyVal;

/// Loads the config file (if any), applies `--set` overrides and validates the
/// result.
#[tracing::instrument(skip(overrides))]
pub fn load_config(
    override_path: Option<&Path>,
    overrides: &[KeyVal],
) -> anyhow::Result<PortfolioConfig> {
    let mut table = match resolve_config_path(override_path) {
        Some(path) => {
            info!(config = %path.display(), "loading config");
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            text.parse::<toml::Table>()
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => {
            warn!("no config file found; using defaults");
            toml::Table::new()
        }
    };

    for kv in overrides {
        apply_override(&mut table, &kv.key, &kv.value)?;
    }

    PortfolioConfig::from_table(table).context("invalid configuration")
}

fn resolve_config_path(override_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(expand_tilde(path));
    }

    let candidate = dirs::config_dir()?.join("folio").join("config.toml");
    candidate.exists().then_some(candidate)
}

fn expand_tilde(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    if let Some(rest) = text.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}
