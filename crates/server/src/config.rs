use std::{collections::HashMap, fs, path::Path, str::FromStr};

use dashboard_api::{DashboardOptions, DEFAULT_LOW_MATERIAL_CC};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub bind_addr: String,
    pub telemetry_interval_secs: u64,
    pub seed: u64,
    pub low_material_threshold: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".into(),
            telemetry_interval_secs: 5,
            seed: DashboardOptions::default().seed,
            low_material_threshold: DEFAULT_LOW_MATERIAL_CC,
        }
    }
}

impl Settings {
    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            seed: self.seed,
            low_material_threshold: self.low_material_threshold,
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new("server.toml"), |key| std::env::var(key).ok())
}

/// Defaults, then the flat `key = value` table in `path`, then `APP__*`
/// variables from `env`.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            Ok(file_cfg) => {
                let file_cfg: HashMap<String, String> = file_cfg
                    .into_iter()
                    .map(|(key, value)| match value {
                        toml::Value::String(text) => (key, text),
                        other => (key, other.to_string()),
                    })
                    .collect();
                apply(&mut settings, |key| file_cfg.get(key).cloned());
            }
            Err(error) => warn!(path = %path.display(), %error, "ignoring malformed settings file"),
        }
    }

    apply(&mut settings, |key| env(&format!("APP__{}", key.to_uppercase())));
    settings
}

fn apply(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("bind_addr") {
        settings.bind_addr = v;
    }
    if let Some(v) = parsed(&lookup, "telemetry_interval_secs") {
        settings.telemetry_interval_secs = v;
    }
    if let Some(v) = parsed(&lookup, "seed") {
        settings.seed = v;
    }
    if let Some(v) = parsed(&lookup, "low_material_threshold") {
        settings.low_material_threshold = v;
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable setting");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
