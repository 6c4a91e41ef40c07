use crate::config::types::{Config, PhotoTypeTable, UserSettings};
use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::Path;

/// 編譯時嵌入的照片類型設定（不需要外部檔案）
const PHOTO_TYPE_TABLE_JSON: &str = include_str!("../data/photo_type_table.json");

/// 使用者設定檔名稱（位於目前工作目錄）
pub const SETTINGS_FILE: &str = "settings.json";

impl Config {
    pub fn new() -> Result<Self> {
        let photo_type_table = PhotoTypeTable::load_embedded()?;
        let settings = match Self::load_settings(Path::new(SETTINGS_FILE)) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("無法載入使用者設定，改用預設值: {e:#}");
                UserSettings::default()
            }
        };

        Ok(Self {
            photo_type_table,
            settings,
        })
    }

    pub fn load_settings(path: &Path) -> Result<UserSettings> {
        if !path.exists() {
            return Ok(UserSettings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }
}

impl PhotoTypeTable {
    /// 從編譯時嵌入的 JSON 載入照片類型表
    pub fn load_embedded() -> Result<Self> {
        serde_json::from_str(PHOTO_TYPE_TABLE_JSON).context("無法解析嵌入的照片類型設定")
    }
}
