//! 照片資料夾掃描
//!
//! 只掃描根目錄第一層，依檔名排序，排除隱藏檔與非一般檔案

use crate::tools::{AccessScope, FullAccess, ScopedAccess, validate_directory_exists};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// 掃描時擷取的檔案快照，之後的移動不會改變它
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    /// 檔名（含副檔名）
    pub file_name: String,
    /// 小寫副檔名（不含前導點），沒有副檔名時為空字串
    pub extension: String,
    /// 檔名（不含副檔名）
    pub basename: String,
    pub size: u64,
    pub created: DateTime<Local>,
}

impl FileEntry {
    /// 讀取檔案資訊，符號連結會追到目標；目標不是一般檔案時回傳 `None`
    fn from_dir_entry(entry: &DirEntry) -> Result<Option<Self>> {
        let path = entry.path();
        let metadata = fs::metadata(path)
            .with_context(|| format!("無法讀取檔案資訊: {}", path.display()))?;
        if !metadata.is_file() {
            return Ok(None);
        }

        // 部分檔案系統沒有建立時間，改用修改時間
        let created = metadata
            .created()
            .or_else(|_| metadata.modified())
            .with_context(|| format!("無法取得檔案日期: {}", path.display()))?;

        Ok(Some(Self {
            path: path.to_path_buf(),
            file_name: entry.file_name().to_string_lossy().to_string(),
            extension: path
                .extension()
                .map(|ext| ext.to_string_lossy().to_lowercase())
                .unwrap_or_default(),
            basename: path
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .unwrap_or_default(),
            size: metadata.len(),
            created: DateTime::<Local>::from(created),
        }))
    }
}

/// 無法讀取的項目
#[derive(Debug, Clone)]
pub struct UnreadableEntry {
    pub path: PathBuf,
    pub reason: String,
}

/// 掃描結果
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// 依檔名排序的檔案
    pub entries: Vec<FileEntry>,
    pub unreadable: Vec<UnreadableEntry>,
}

fn is_hidden_name(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

/// 掃描根目錄中的一般檔案
///
/// 只有根目錄本身無法讀取時才會回傳錯誤；單一檔案讀取失敗會記錄在
/// `ScanOutcome::unreadable` 並略過
pub fn scan_photo_files(root: &Path) -> Result<ScanOutcome> {
    scan_photo_files_with_access(root, &FullAccess)
}

/// 同 [`scan_photo_files`]，讀取每個檔案的資訊前先向 `access` 取得權限
pub fn scan_photo_files_with_access(
    root: &Path,
    access: &dyn AccessScope,
) -> Result<ScanOutcome> {
    validate_directory_exists(root)?;

    let mut outcome = ScanOutcome::default();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(e) => {
                if e.depth() == 0 {
                    return Err(e).with_context(|| format!("無法讀取目錄: {}", root.display()));
                }

                let path = e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                if is_hidden_name(&path) {
                    continue;
                }

                warn!("無法讀取項目 {}: {e}", path.display());
                outcome.unreadable.push(UnreadableEntry {
                    path,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let file_type = entry.file_type();
        if is_hidden_name(entry.path()) || !(file_type.is_file() || file_type.is_symlink()) {
            continue;
        }

        let _file_access = ScopedAccess::acquire(access, entry.path());
        match FileEntry::from_dir_entry(&entry) {
            Ok(Some(file)) => outcome.entries.push(file),
            Ok(None) => debug!("略過非一般檔案: {}", entry.path().display()),
            Err(e) => {
                warn!("{e:#}");
                outcome.unreadable.push(UnreadableEntry {
                    path: entry.into_path(),
                    reason: format!("{e:#}"),
                });
            }
        }
    }

    debug!(
        "掃描完成: {} 個檔案，{} 個無法讀取",
        outcome.entries.len(),
        outcome.unreadable.len()
    );

    Ok(outcome)
}
