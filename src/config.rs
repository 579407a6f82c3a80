use serde::Deserialize;
use std::path::Path;

use crate::error::{Result, TelemetryError};

pub const ENV_GATHER_USAGE_STATS: &str = "SCRIPT_TELEMETRY_GATHER_USAGE_STATS";
pub const ENV_HEADLESS: &str = "SCRIPT_TELEMETRY_HEADLESS";

const OPTIONS: [&str; 2] = ["gather_usage_stats", "headless"];

/// Runtime switches read once at session creation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Default for every new `ScriptRunContext`.
    pub gather_usage_stats: bool,
    pub headless: bool,

    // Options explicitly set by file or env. Reported in the page profile.
    #[serde(skip)]
    manually_set: Vec<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            gather_usage_stats: true,
            headless: false,
            manually_set: Vec::new(),
        }
    }
}

impl TelemetryConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let mut config: TelemetryConfig = serde_json::from_value(value.clone())?;

        if let serde_json::Value::Object(map) = value {
            for key in map.keys().filter(|k| OPTIONS.contains(&k.as_str())) {
                config.mark_set(key);
            }
        }
        Ok(config)
    }

    /// Missing file means defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Env overrides win over whatever the file said.
    pub fn apply_env(mut self) -> Result<Self> {
        if let Ok(raw) = std::env::var(ENV_GATHER_USAGE_STATS) {
            self.gather_usage_stats = parse_flag("gather_usage_stats", &raw)?;
            self.mark_set("gather_usage_stats");
        }
        if let Ok(raw) = std::env::var(ENV_HEADLESS) {
            self.headless = parse_flag("headless", &raw)?;
            self.mark_set("headless");
        }
        Ok(self)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_file(path)?.apply_env()
    }

    pub fn is_manually_set(&self, option: &str) -> bool {
        self.manually_set.iter().any(|o| o == option)
    }

    pub fn config_options(&self) -> &[String] {
        &self.manually_set
    }

    fn mark_set(&mut self, option: &str) {
        if !self.is_manually_set(option) {
            self.manually_set.push(option.to_string());
        }
    }
}

fn parse_flag(option: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(TelemetryError::InvalidOption {
            option: option.to_string(),
            value: raw.to_string(),
        }),
    }
}
