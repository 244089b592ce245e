use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::report::SortOrder;

pub const APP_DIR: &str = "report-actions-list";

/// Environment override for [`DevSettings::track_renders`].
pub const TRACK_RENDERS_ENV: &str = "REPORT_LIST_TRACK_RENDERS";

/// Estimated row heights in pixels, used until an item is measured.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightEstimates {
    pub text: f64,
    /// Text row folded under the previous row's author header.
    pub grouped_text: f64,
    pub attachment: f64,
    pub system_event: f64,
}

impl Default for HeightEstimates {
    fn default() -> Self {
        Self {
            text: 64.0,
            grouped_text: 28.0,
            attachment: 240.0,
            system_event: 40.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListSettings {
    pub order: SortOrder,
    /// Pixels rendered beyond each viewport edge. Also the distance from a
    /// loaded boundary at which the next page is requested.
    pub overscan_px: f64,
    pub estimates: HeightEstimates,
    /// How long a direction stays quiet after an empty page.
    pub cooldown_ms: u64,
    pub grouping_window_secs: i64,
    pub page_size: usize,
    /// Viewport height assumed until the host reports a layout.
    pub initial_viewport_height: f64,
    pub animate_skeleton: bool,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            order: SortOrder::default(),
            overscan_px: 320.0,
            estimates: HeightEstimates::default(),
            cooldown_ms: 1_000,
            grouping_window_secs: 300,
            page_size: 50,
            initial_viewport_height: 640.0,
            animate_skeleton: true,
        }
    }
}

impl ListSettings {
    pub fn row_height(&self) -> f64 {
        self.estimates.text
    }

    pub fn grouping_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.grouping_window_secs)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevSettings {
    /// Count item renders and report avoidable re-renders.
    pub track_renders: bool,
}

impl DevSettings {
    /// Applies the environment override. Read once at startup and injected.
    pub fn with_env_override(mut self) -> Self {
        if let Ok(value) = std::env::var(TRACK_RENDERS_ENV) {
            self.track_renders = value == "true";
        }
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub list: ListSettings,
    #[serde(default)]
    pub dev: DevSettings,
}

pub fn config_dir() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join(APP_DIR)
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn save_settings_to(path: &Path, settings: &AppSettings) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_settings() -> AppSettings {
    load_settings_from(&settings_path())
}

/// Missing or unreadable files fall back to defaults.
pub fn load_settings_from(path: &Path) -> AppSettings {
    if !path.exists() {
        return AppSettings::default();
    }
    let data = match std::fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!("Failed to read {}: {e}", path.display());
            return AppSettings::default();
        }
    };
    match serde_json::from_str(&data) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Ignoring malformed settings {}: {e}", path.display());
            AppSettings::default()
        }
    }
}
