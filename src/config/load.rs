use crate::config::SETTINGS_FILE_NAME;
use crate::config::types::{Config, UserSettings};
use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::Path;

impl Config {
    pub fn new() -> Result<Self> {
        let settings = match load_settings_from(Path::new(SETTINGS_FILE_NAME)) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("設定檔無法使用，改用預設值: {e:#}");
                UserSettings::default()
            }
        };

        Ok(Self { settings })
    }
}

/// 讀取設定檔，不存在時回傳預設值
pub fn load_settings_from(path: &Path) -> Result<UserSettings> {
    if !path.exists() {
        return Ok(UserSettings::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings from {}", path.display()))
}
