use alarmctl_core::config::{Config, WarnLevel};
use anyhow::Context;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "alarmctl.yaml";

/// Locate the config file.
///
/// Priority:
/// 1. `--config` flag / `ALARMCTL_CONFIG` env var (passed in as `explicit`)
/// 2. `alarmctl.yaml` in the current directory, if present
/// 3. None (built-in defaults)
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    local.is_file().then_some(local)
}

/// Load the config and refuse to continue on error-level findings.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = resolve_config_path(explicit) else {
        return Ok(Config::default());
    };
    let config = Config::load(&path)
        .with_context(|| format!("failed to load config {}", path.display()))?;

    let mut errors = Vec::new();
    for w in config.validate() {
        match w.level {
            WarnLevel::Warning => tracing::warn!("{}: {}", path.display(), w.message),
            WarnLevel::Error => errors.push(w.message),
        }
    }
    if !errors.is_empty() {
        anyhow::bail!("invalid config {}: {}", path.display(), errors.join("; "));
    }
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}
