//! Application configuration embedded at build time from `assets/config.json`.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;

const EMBEDDED_CONFIG: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/config.json"));

static CONFIG: Lazy<Config> = Lazy::new(|| {
    Config::from_json(EMBEDDED_CONFIG).unwrap_or_else(|err| {
        warn!(%err, "embedded config is invalid; using defaults");
        Config::default()
    })
});

/// The embedded configuration, parsed once.
pub fn config() -> &'static Config {
    &CONFIG
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlossaryFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossarySource {
    pub url: String,
    pub format: GlossaryFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Column holding the institution display name.
    pub institution_column: String,
    /// Loaded on start-up when present. GitHub "blob" links are accepted.
    pub default_dataset_url: Option<String>,
    /// Tried in order; the first one that loads wins.
    pub glossary_sources: Vec<GlossarySource>,
    pub hover_throttle_ms: u64,
    pub max_ticks: u32,
    pub line_hit_threshold_px: f64,
    pub bar_hit_padding_px: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            institution_column: "instnm".to_string(),
            default_dataset_url: None,
            glossary_sources: Vec::new(),
            hover_throttle_ms: 30,
            max_ticks: 5,
            line_hit_threshold_px: 28.0,
            bar_hit_padding_px: 6.0,
        }
    }
}

impl Config {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
