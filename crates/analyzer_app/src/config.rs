use std::fs;
use std::path::Path;
use std::time::Duration;

use analyzer_core::UploadOptions;
use analyzer_gateway::{GatewaySettings, NarrationScript};
use flow_logging::{flow_info, flow_warn};
use serde::{Deserialize, Serialize};

/// Persisted shell configuration, stored as RON next to the binary.
///
/// Missing fields fall back to their defaults so old config files keep
/// working when new fields are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub narration_interval_ms: u64,
    pub default_options: DefaultOptions,
}

/// Analysis option checkboxes pre-checked for the upload form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DefaultOptions {
    pub extract_questions: bool,
    pub difficulty_analysis: bool,
    pub topic_classification: bool,
    pub answer_suggestions: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = GatewaySettings::default();
        Self {
            backend_url: settings.base_url,
            connect_timeout_ms: settings.connect_timeout.as_millis() as u64,
            request_timeout_ms: settings.request_timeout.as_millis() as u64,
            narration_interval_ms: analyzer_gateway::NARRATION_INTERVAL.as_millis() as u64,
            default_options: DefaultOptions::default(),
        }
    }
}

impl AppConfig {
    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            base_url: self.backend_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }

    pub fn narration_script(&self) -> NarrationScript {
        NarrationScript::default()
            .with_interval(Duration::from_millis(self.narration_interval_ms))
    }

    pub fn upload_options(&self) -> UploadOptions {
        UploadOptions {
            extract_questions: self.default_options.extract_questions,
            difficulty_analysis: self.default_options.difficulty_analysis,
            topic_classification: self.default_options.topic_classification,
            answer_suggestions: self.default_options.answer_suggestions,
        }
    }
}

/// Loads the config, writing a starter file when none exists yet.
/// Unreadable or unparseable files fall back to defaults with a warning.
pub fn load_config(path: &Path) -> AppConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let config = AppConfig::default();
            save_config(path, &config);
            return config;
        }
        Err(err) => {
            flow_warn!("Failed to read config from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            flow_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            flow_warn!("Failed to parse config from {:?}: {}", path, err);
            AppConfig::default()
        }
    }
}

pub fn save_config(path: &Path, config: &AppConfig) {
    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(config, pretty) {
        Ok(text) => text,
        Err(err) => {
            flow_warn!("Failed to serialize config: {}", err);
            return;
        }
    };

    if let Err(err) = fs::write(path, content) {
        flow_warn!("Failed to write config to {:?}: {}", path, err);
    }
}
