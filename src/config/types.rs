use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// 最近使用路徑的保留數量上限
pub const MAX_RECENT_PATHS: usize = 10;

/// 檔名前綴為空時使用的預設名稱
pub const DEFAULT_BASE_NAME: &str = "이미지";

/// RAW 與一般照片的副檔名表（編譯時嵌入）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoTypeTable {
    #[serde(rename = "RAW_FILE")]
    pub raw_file: Vec<String>,
    #[serde(rename = "PHOTO_FILE")]
    pub photo_file: Vec<String>,
}

impl PhotoTypeTable {
    #[must_use]
    pub fn raw_extensions_set(&self) -> HashSet<String> {
        self.raw_file.iter().map(|ext| ext.to_lowercase()).collect()
    }

    #[must_use]
    pub fn photo_extensions_set(&self) -> HashSet<String> {
        self.photo_file.iter().map(|ext| ext.to_lowercase()).collect()
    }
}

/// 整理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrganizationMode {
    /// 依副檔名分資料夾（可加上日期資料夾與重新命名）
    #[default]
    ByExtension,
    /// 找出與照片同名的 RAW 檔（已挑選的相片）
    SelectedMatch,
    /// 收集 20MB 以下的檔案
    SizeThreshold,
}

impl OrganizationMode {
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::ByExtension, Self::SelectedMatch, Self::SizeThreshold]
    }
}

impl fmt::Display for OrganizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByExtension => write!(f, "By extension"),
            Self::SelectedMatch => write!(f, "Selected RAW"),
            Self::SizeThreshold => write!(f, "Under 20MB"),
        }
    }
}

/// 檔名規則，只在 `OrganizationMode::ByExtension` 下生效
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NamingMode {
    #[default]
    Keep,
    Sequential,
    DateSequential,
}

impl NamingMode {
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Keep, Self::Sequential, Self::DateSequential]
    }
}

impl fmt::Display for NamingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keep => write!(f, "Keep"),
            Self::Sequential => write!(f, "Sequential"),
            Self::DateSequential => write!(f, "Date + sequential"),
        }
    }
}

/// 日期資料夾格式，只在 `OrganizationMode::ByExtension` 下生效
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DateFolderFormat {
    #[default]
    None,
    /// `202506`
    #[serde(rename = "YYYYMM")]
    YearMonth,
    /// `2025/06`
    #[serde(rename = "YYYY/MM")]
    YearThenMonth,
    /// `2025/06/25`
    #[serde(rename = "YYYY/MM/DD")]
    YearThenMonthThenDay,
    /// `2025-06-25`
    #[serde(rename = "YYYYMMDD")]
    IsoDate,
}

impl DateFolderFormat {
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::None,
            Self::YearMonth,
            Self::YearThenMonth,
            Self::YearThenMonthThenDay,
            Self::IsoDate,
        ]
    }
}

impl fmt::Display for DateFolderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::YearMonth => write!(f, "YYYYMM"),
            Self::YearThenMonth => write!(f, "YYYY/MM"),
            Self::YearThenMonthThenDay => write!(f, "YYYY/MM/DD"),
            Self::IsoDate => write!(f, "YYYY-MM-DD"),
        }
    }
}

/// 單次整理所使用的設定，整理期間不會變動
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OrganizeSettings {
    pub organization_mode: OrganizationMode,
    pub naming_mode: NamingMode,
    pub date_folder_format: DateFolderFormat,
    pub base_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "zh-TW")]
    ZhTw,
    #[serde(rename = "ko-KR")]
    KoKr,
}

impl Language {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::ZhTw => "zh-TW",
            Self::KoKr => "ko-KR",
        }
    }

    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::EnUs, Self::ZhTw, Self::KoKr]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnUs => write!(f, "English"),
            Self::ZhTw => write!(f, "繁體中文"),
            Self::KoKr => write!(f, "한국어"),
        }
    }
}

/// 使用者設定（存放於 settings.json）
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UserSettings {
    pub language: Language,
    pub organize: OrganizeSettings,
    pub recent_paths: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub photo_type_table: PhotoTypeTable,
    pub settings: UserSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_folder_format_serde_names() {
        let json = serde_json::to_string(&DateFolderFormat::YearThenMonthThenDay).unwrap();
        assert_eq!(json, "\"YYYY/MM/DD\"");

        let parsed: DateFolderFormat = serde_json::from_str("\"YYYYMMDD\"").unwrap();
        assert_eq!(parsed, DateFolderFormat::IsoDate);
    }

    #[test]
    fn test_user_settings_missing_fields_use_defaults() {
        let settings: UserSettings =
            serde_json::from_str(r#"{"organize": {"naming_mode": "Sequential"}}"#).unwrap();

        assert_eq!(settings.language, Language::EnUs);
        assert_eq!(settings.organize.naming_mode, NamingMode::Sequential);
        assert_eq!(
            settings.organize.organization_mode,
            OrganizationMode::ByExtension
        );
        assert!(settings.recent_paths.is_empty());
    }
}
