use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "browser.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub viewport_width: u32,
    pub throttle_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.artic.edu/api/v1/exhibitions".into(),
            viewport_width: 1280,
            throttle_interval_ms: client_core::DEFAULT_THROTTLE_INTERVAL.as_millis() as u64,
        }
    }
}

impl Settings {
    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.throttle_interval_ms)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    viewport_width: Option<u32>,
    throttle_interval_ms: Option<u64>,
}

/// Defaults, then the config file, then environment overrides. An explicitly
/// named file must exist; the default one is optional.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match config_path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?,
        Err(err) if required => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
        Err(_) => {}
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.viewport_width {
        settings.viewport_width = v;
    }
    if let Some(v) = file_cfg.throttle_interval_ms {
        settings.throttle_interval_ms = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("EXHIBITIONS_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = var("APP__VIEWPORT_WIDTH") {
        if let Ok(parsed) = v.parse::<u32>() {
            settings.viewport_width = parsed;
        }
    }

    if let Some(v) = var("APP__THROTTLE_INTERVAL_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.throttle_interval_ms = parsed;
        }
    }
}
