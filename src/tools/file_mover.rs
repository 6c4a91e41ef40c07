//! 不覆寫的檔案移動
//!
//! 目標檔名已被佔用時依序嘗試 `name_1.ext`、`name_2.ext`…，取第一個可用的名稱

use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// 目標路徑是否已有任何項目（包含失效的符號連結）
fn is_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn split_file_name(file_name: &str) -> (&str, Option<&str>) {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (file_name, None),
    }
}

/// 在資料夾中找出第一個不會覆寫現有檔案的路徑
#[must_use]
pub fn find_available_path(folder: &Path, file_name: &str) -> PathBuf {
    let candidate = folder.join(file_name);
    if !is_occupied(&candidate) {
        return candidate;
    }

    let (stem, ext) = split_file_name(file_name);
    let mut counter: u32 = 1;
    loop {
        let name = match ext {
            Some(ext) => format!("{stem}_{counter}.{ext}"),
            None => format!("{stem}_{counter}"),
        };
        let candidate = folder.join(name);
        if !is_occupied(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// 移動檔案到資料夾，遇到同名檔案時自動改名，回傳最終路徑
pub fn move_without_overwrite(source: &Path, folder: &Path, file_name: &str) -> Result<PathBuf> {
    let target = find_available_path(folder, file_name);

    if target.file_name() != Some(std::ffi::OsStr::new(file_name)) {
        warn!(
            "目標已存在，改名為 {} 以避免覆寫",
            target.file_name().unwrap_or_default().to_string_lossy()
        );
    }

    if let Err(e) = fs::rename(source, &target) {
        // rename 失敗（可能是跨檔案系統），改用複製後刪除
        debug!("rename 失敗，改用複製: {e}");
        copy_and_delete(source, &target)
            .with_context(|| format!("移動檔案失敗 {} (原始錯誤: {e})", source.display()))?;
    }

    debug!("移動檔案: {} -> {}", source.display(), target.display());
    Ok(target)
}

/// 複製檔案後刪除原檔案
fn copy_and_delete(source: &Path, target: &Path) -> Result<()> {
    fs::copy(source, target).with_context(|| {
        format!("複製檔案失敗: {} -> {}", source.display(), target.display())
    })?;

    fs::remove_file(source).with_context(|| format!("刪除原檔案失敗: {}", source.display()))?;

    Ok(())
}
