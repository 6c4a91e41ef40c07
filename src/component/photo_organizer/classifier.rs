//! 照片分類器
//!
//! 依副檔名將檔案分為 RAW、照片或忽略，並建立照片檔名索引用於配對 RAW 檔

use crate::config::{OrganizationMode, PhotoTypeTable};
use crate::tools::FileEntry;
use std::collections::HashSet;

/// 20MB（含）以下視為小檔案
pub const SMALL_FILE_LIMIT: u64 = 20 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhotoKind {
    Raw,
    Photo,
}

/// 單一檔案的分類結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: PhotoKind,
    /// RAW 檔且有同名照片（只在 SelectedMatch 下判斷）
    pub is_selected: bool,
    /// 檔案大小在限制內（只在 SizeThreshold 下判斷）
    pub is_small: bool,
}

impl Classification {
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        matches!(self.kind, PhotoKind::Raw)
    }
}

pub struct PhotoClassifier {
    raw_extensions: HashSet<String>,
    photo_extensions: HashSet<String>,
    mode: OrganizationMode,
    /// 照片檔名（不含副檔名）索引，在任何移動之前建立
    basename_index: HashSet<String>,
}

impl PhotoClassifier {
    #[must_use]
    pub fn new(type_table: &PhotoTypeTable, mode: OrganizationMode) -> Self {
        Self {
            raw_extensions: type_table.raw_extensions_set(),
            photo_extensions: type_table.photo_extensions_set(),
            mode,
            basename_index: HashSet::new(),
        }
    }

    #[must_use]
    pub fn kind_of(&self, extension: &str) -> Option<PhotoKind> {
        let extension = extension.to_lowercase();
        if self.raw_extensions.contains(&extension) {
            Some(PhotoKind::Raw)
        } else if self.photo_extensions.contains(&extension) {
            Some(PhotoKind::Photo)
        } else {
            None
        }
    }

    /// 從掃描快照建立照片檔名索引，只在 SelectedMatch 下執行
    pub fn build_basename_index(&mut self, entries: &[FileEntry]) {
        if self.mode != OrganizationMode::SelectedMatch {
            return;
        }

        self.basename_index = entries
            .iter()
            .filter(|entry| self.kind_of(&entry.extension) == Some(PhotoKind::Photo))
            .map(|entry| entry.basename.clone())
            .collect();
    }

    #[must_use]
    pub fn basename_index(&self) -> &HashSet<String> {
        &self.basename_index
    }

    /// 分類檔案，不在 RAW 或照片範圍內時回傳 `None`
    #[must_use]
    pub fn classify(&self, entry: &FileEntry) -> Option<Classification> {
        let kind = self.kind_of(&entry.extension)?;

        let is_selected = self.mode == OrganizationMode::SelectedMatch
            && kind == PhotoKind::Raw
            && self.basename_index.contains(&entry.basename);

        let is_small =
            self.mode == OrganizationMode::SizeThreshold && entry.size <= SMALL_FILE_LIMIT;

        Some(Classification {
            kind,
            is_selected,
            is_small,
        })
    }
}
