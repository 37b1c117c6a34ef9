use std::fs;
use std::path::{Path, PathBuf};

use crate::config::config_dir;
use crate::ui::settings::UiSettings;

fn settings_path() -> PathBuf {
    config_dir().join("ui_settings.json")
}

pub fn load_settings() -> UiSettings {
    load_settings_from(&settings_path())
}

pub fn save_settings(settings: &UiSettings) {
    save_settings_to(&settings_path(), settings);
}

fn load_settings_from(path: &Path) -> UiSettings {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

fn save_settings_to(path: &Path, settings: &UiSettings) {
    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(err) = fs::write(path, json) {
                tracing::warn!("could not save UI settings to {}: {}", path.display(), err);
            }
        }
        Err(err) => tracing::warn!("could not serialize UI settings: {}", err),
    }
}
