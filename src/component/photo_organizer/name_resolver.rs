//! 目標檔名決定
//!
//! 只有 `OrganizationMode::ByExtension` 會重新命名，其他模式一律保留原檔名

use crate::config::{DEFAULT_BASE_NAME, NamingMode, OrganizationMode, OrganizeSettings};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static REGEX_ILLEGAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("Invalid regex"));

/// 整次執行共用的流水號，從 1 開始且不重複使用
#[derive(Debug)]
pub struct SequenceCounter {
    next: u32,
}

impl Default for SequenceCounter {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl SequenceCounter {
    /// 確認使用目前號碼並遞增
    pub fn take(&mut self) -> u32 {
        let current = self.next;
        self.next += 1;
        current
    }

    /// 下一個可用號碼，不會遞增
    #[must_use]
    pub const fn peek(&self) -> u32 {
        self.next
    }
}

/// 這組設定產生的檔名是否使用流水號
#[must_use]
pub fn uses_sequence(settings: &OrganizeSettings) -> bool {
    settings.organization_mode == OrganizationMode::ByExtension
        && settings.naming_mode != NamingMode::Keep
}

/// 整理檔名前綴：去除前後空白、替換非法字元，空白時使用預設名稱
#[must_use]
pub fn effective_base_name(base_name: &str) -> String {
    let cleaned = REGEX_ILLEGAL_CHARS.replace_all(base_name.trim(), "_");
    if cleaned.is_empty() {
        DEFAULT_BASE_NAME.to_string()
    } else {
        cleaned.into_owned()
    }
}

/// 決定檔案的新檔名
///
/// `extension` 為小寫副檔名（不含前導點）。流水號只讀取 `counter` 的下一個號碼，
/// 檔案實際移動後才由呼叫端 `take`
#[must_use]
pub fn resolve_file_name(
    settings: &OrganizeSettings,
    original_name: &str,
    extension: &str,
    created: NaiveDate,
    counter: &SequenceCounter,
) -> String {
    // 挑選與大小篩選只是過濾，不改檔名
    if settings.organization_mode != OrganizationMode::ByExtension {
        return original_name.to_string();
    }

    match settings.naming_mode {
        NamingMode::Keep => original_name.to_string(),
        NamingMode::Sequential => format!(
            "{}_{}.{extension}",
            effective_base_name(&settings.base_name),
            counter.peek()
        ),
        NamingMode::DateSequential => format!(
            "{}_{}_{}.{extension}",
            effective_base_name(&settings.base_name),
            created.format("%Y%m%d"),
            counter.peek()
        ),
    }
}
