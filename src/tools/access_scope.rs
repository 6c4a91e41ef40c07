//! 檔案存取權限範圍
//!
//! 某些平台需要在存取資料夾或檔案前先取得權限，使用完畢後再釋放。
//! `ScopedAccess` 在建立時取得權限，在離開作用域時（包含錯誤與跳過的路徑）釋放。

use std::path::{Path, PathBuf};

/// 權限提供者
pub trait AccessScope: Send + Sync {
    /// 開始存取，回傳 `true` 代表之後需要呼叫 `release`
    fn acquire(&self, path: &Path) -> bool;

    fn release(&self, path: &Path);
}

/// 不需要額外權限的一般檔案系統
#[derive(Debug, Clone, Copy, Default)]
pub struct FullAccess;

impl AccessScope for FullAccess {
    fn acquire(&self, _path: &Path) -> bool {
        false
    }

    fn release(&self, _path: &Path) {}
}

/// 權限守衛
pub struct ScopedAccess<'a> {
    scope: &'a dyn AccessScope,
    path: PathBuf,
    active: bool,
}

impl<'a> ScopedAccess<'a> {
    pub fn acquire(scope: &'a dyn AccessScope, path: &Path) -> Self {
        let active = scope.acquire(path);
        Self {
            scope,
            path: path.to_path_buf(),
            active,
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for ScopedAccess<'_> {
    fn drop(&mut self) {
        if self.active {
            self.scope.release(&self.path);
        }
    }
}
