//! 照片整理流程
//!
//! 掃描 → 分類 → 決定資料夾 → 決定檔名 → 移動，逐一處理每個檔案。
//! 單一檔案失敗只會被記錄並略過，不會中斷整次整理

use super::classifier::{Classification, PhotoClassifier};
use super::name_resolver::{SequenceCounter, resolve_file_name, uses_sequence};
use super::target_resolver::resolve_target_folder;
use crate::config::{OrganizeSettings, PhotoTypeTable};
use crate::tools::{
    AccessScope, FileEntry, FullAccess, ScopedAccess, ensure_directory_exists,
    move_without_overwrite, scan_photo_files_with_access,
};
use anyhow::Result;
use log::{debug, info, warn};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 整理流程的狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Scanning,
    Processing,
    Completed,
    Failed,
}

/// 單一檔案失敗的階段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Metadata,
    CreateFolder,
    Move,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metadata => write!(f, "metadata"),
            Self::CreateFolder => write!(f, "create folder"),
            Self::Move => write!(f, "move"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileFailure {
    pub path: PathBuf,
    pub stage: FailureStage,
    pub reason: String,
}

impl FileFailure {
    fn new(path: &Path, stage: FailureStage, error: &anyhow::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            stage,
            reason: format!("{error:#}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MovedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// 整理結果
#[derive(Debug, Default)]
pub struct OrganizeReport {
    /// 成功移動的檔案（依處理順序）
    pub moved: Vec<MovedFile>,
    /// 目標與原位置相同而未移動的檔案數
    pub unchanged: usize,
    /// 不是 RAW 或照片而忽略的檔案數
    pub ignored: usize,
    /// 失敗而略過的檔案
    pub failures: Vec<FileFailure>,
}

impl OrganizeReport {
    /// 成功移動的檔案數
    #[must_use]
    pub fn count(&self) -> usize {
        self.moved.len()
    }
}

enum FileOutcome {
    Moved(PathBuf),
    Unchanged,
}

/// 單次整理的可變狀態，只屬於一個執行緒
struct RunContext {
    classifier: PhotoClassifier,
    sequence: SequenceCounter,
}

/// 照片整理器
#[derive(Clone)]
pub struct Organizer {
    type_table: PhotoTypeTable,
    settings: OrganizeSettings,
    access: Arc<dyn AccessScope>,
    phase: RunPhase,
}

impl Organizer {
    #[must_use]
    pub fn new(type_table: PhotoTypeTable, settings: OrganizeSettings) -> Self {
        Self {
            type_table,
            settings,
            access: Arc::new(FullAccess),
            phase: RunPhase::Idle,
        }
    }

    /// 設定存取權限提供者
    #[must_use]
    pub fn with_access_scope(mut self, access: Arc<dyn AccessScope>) -> Self {
        self.access = access;
        self
    }

    #[must_use]
    pub const fn phase(&self) -> RunPhase {
        self.phase
    }

    #[must_use]
    pub const fn settings(&self) -> &OrganizeSettings {
        &self.settings
    }

    fn transition(&mut self, next: RunPhase) {
        debug!("整理狀態: {:?} -> {next:?}", self.phase);
        self.phase = next;
    }

    /// 整理資料夾，回傳整理結果
    ///
    /// 只有根目錄無法讀取時會回傳錯誤，此時不會移動任何檔案
    pub fn run(&mut self, root: &Path) -> Result<OrganizeReport> {
        info!(
            "開始整理: {} (模式: {:?}, 檔名: {:?}, 日期資料夾: {:?})",
            root.display(),
            self.settings.organization_mode,
            self.settings.naming_mode,
            self.settings.date_folder_format
        );
        self.transition(RunPhase::Scanning);

        let access = Arc::clone(&self.access);
        let _root_access = ScopedAccess::acquire(access.as_ref(), root);

        let scan = match scan_photo_files_with_access(root, access.as_ref()) {
            Ok(scan) => scan,
            Err(e) => {
                warn!("無法整理 {}: {e:#}", root.display());
                self.transition(RunPhase::Failed);
                return Err(e);
            }
        };

        self.transition(RunPhase::Processing);

        let mut context = RunContext {
            classifier: PhotoClassifier::new(&self.type_table, self.settings.organization_mode),
            sequence: SequenceCounter::default(),
        };
        // 在移動任何檔案前，以掃描快照建立索引
        context.classifier.build_basename_index(&scan.entries);

        let mut report = OrganizeReport::default();

        for unreadable in scan.unreadable {
            let extension = unreadable
                .path
                .extension()
                .map(|ext| ext.to_string_lossy().to_string())
                .unwrap_or_default();
            if context.classifier.kind_of(&extension).is_some() {
                report.failures.push(FileFailure {
                    path: unreadable.path,
                    stage: FailureStage::Metadata,
                    reason: unreadable.reason,
                });
            }
        }

        for entry in &scan.entries {
            let _file_access = ScopedAccess::acquire(access.as_ref(), &entry.path);

            let Some(classification) = context.classifier.classify(entry) else {
                report.ignored += 1;
                continue;
            };

            match self.process_entry(root, entry, &classification, &mut context) {
                Ok(FileOutcome::Moved(destination)) => report.moved.push(MovedFile {
                    source: entry.path.clone(),
                    destination,
                }),
                Ok(FileOutcome::Unchanged) => report.unchanged += 1,
                Err(failure) => {
                    warn!(
                        "略過 {} ({}): {}",
                        failure.path.display(),
                        failure.stage,
                        failure.reason
                    );
                    report.failures.push(failure);
                }
            }
        }

        self.transition(RunPhase::Completed);
        info!(
            "整理完成 - 移動: {}, 未變動: {}, 忽略: {}, 失敗: {}",
            report.count(),
            report.unchanged,
            report.ignored,
            report.failures.len()
        );

        Ok(report)
    }

    fn process_entry(
        &self,
        root: &Path,
        entry: &FileEntry,
        classification: &Classification,
        context: &mut RunContext,
    ) -> std::result::Result<FileOutcome, FileFailure> {
        let created = entry.created.date_naive();

        let folder = resolve_target_folder(
            root,
            self.settings.organization_mode,
            self.settings.date_folder_format,
            &entry.extension,
            classification,
            created,
        );
        ensure_directory_exists(&folder)
            .map_err(|e| FileFailure::new(&entry.path, FailureStage::CreateFolder, &e))?;

        let file_name = resolve_file_name(
            &self.settings,
            &entry.file_name,
            &entry.extension,
            created,
            &context.sequence,
        );

        if folder.join(&file_name) == entry.path {
            debug!("維持原位: {}", entry.path.display());
            return Ok(FileOutcome::Unchanged);
        }

        let destination = move_without_overwrite(&entry.path, &folder, &file_name)
            .map_err(|e| FileFailure::new(&entry.path, FailureStage::Move, &e))?;

        // 移動成功後才用掉這個號碼
        if uses_sequence(&self.settings) {
            context.sequence.take();
        }

        Ok(FileOutcome::Moved(destination))
    }
}

/// 以嵌入的照片類型表整理資料夾
pub fn organize(root: &Path, settings: &OrganizeSettings) -> Result<OrganizeReport> {
    let type_table = PhotoTypeTable::load_embedded()?;
    Organizer::new(type_table, settings.clone()).run(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DateFolderFormat, NamingMode, OrganizationMode};
    use std::fs;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn organizer(settings: OrganizeSettings) -> Organizer {
        Organizer::new(PhotoTypeTable::load_embedded().unwrap(), settings)
    }

    #[test]
    fn test_by_extension_moves_photos_only() {
        let temp_dir = TempDir::new().unwrap();
        let base_path = temp_dir.path();

        fs::write(base_path.join("a.jpg"), "a").unwrap();
        fs::write(base_path.join("b.CR2"), "b").unwrap();
        fs::write(base_path.join("notes.txt"), "notes").unwrap();

        let mut organizer = organizer(OrganizeSettings::default());
        let report = organizer.run(base_path).unwrap();

        assert_eq!(report.count(), 2);
        assert_eq!(report.ignored, 1);
        assert_eq!(organizer.phase(), RunPhase::Completed);
        assert!(base_path.join("JPG/a.jpg").exists());
        assert!(base_path.join("CR2/b.CR2").exists());
        assert!(base_path.join("notes.txt").exists());
    }

    #[test]
    fn test_sequential_counter_spans_folders() {
        let temp_dir = TempDir::new().unwrap();
        let base_path = temp_dir.path();

        fs::write(base_path.join("a.cr3"), "a").unwrap();
        fs::write(base_path.join("b.jpg"), "b").unwrap();
        fs::write(base_path.join("c.cr3"), "c").unwrap();

        let settings = OrganizeSettings {
            naming_mode: NamingMode::Sequential,
            base_name: "Trip".to_string(),
            ..Default::default()
        };
        let report = organizer(settings).run(base_path).unwrap();

        assert_eq!(report.count(), 3);
        assert!(base_path.join("CR3/Trip_1.cr3").exists());
        assert!(base_path.join("JPG/Trip_2.jpg").exists());
        assert!(base_path.join("CR3/Trip_3.cr3").exists());
    }

    #[test]
    fn test_selected_match_leaves_unselected_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let base_path = temp_dir.path();

        fs::write(base_path.join("IMG_1.CR3"), "raw").unwrap();
        fs::write(base_path.join("IMG_1.JPG"), "jpg").unwrap();
        fs::write(base_path.join("IMG_2.CR3"), "raw").unwrap();

        let settings = OrganizeSettings {
            organization_mode: OrganizationMode::SelectedMatch,
            naming_mode: NamingMode::Sequential,
            date_folder_format: DateFolderFormat::YearMonth,
            ..Default::default()
        };
        let report = organizer(settings).run(base_path).unwrap();

        assert_eq!(report.count(), 1);
        assert_eq!(report.unchanged, 2);
        assert!(base_path.join("Selected_RAW/IMG_1.CR3").exists());
        assert!(base_path.join("IMG_1.JPG").exists());
        assert!(base_path.join("IMG_2.CR3").exists());
    }

    #[test]
    fn test_missing_root_fails_run() {
        let temp_dir = TempDir::new().unwrap();
        let mut organizer = organizer(OrganizeSettings::default());

        assert!(organizer.run(&temp_dir.path().join("missing")).is_err());
        assert_eq!(organizer.phase(), RunPhase::Failed);
    }

    #[test]
    fn test_folder_creation_failure_skips_file() {
        let temp_dir = TempDir::new().unwrap();
        let base_path = temp_dir.path();

        // 已有同名的一般檔案佔用 JPG 資料夾的位置
        fs::write(base_path.join("JPG"), "not a folder").unwrap();
        fs::write(base_path.join("a.jpg"), "a").unwrap();
        fs::write(base_path.join("b.nef"), "b").unwrap();

        let report = organizer(OrganizeSettings::default()).run(base_path).unwrap();

        assert_eq!(report.count(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].stage, FailureStage::CreateFolder);
        assert!(base_path.join("a.jpg").exists());
        assert!(base_path.join("NEF/b.nef").exists());
    }

    #[test]
    fn test_failed_file_does_not_consume_sequence_number() {
        let temp_dir = TempDir::new().unwrap();
        let base_path = temp_dir.path();

        fs::write(base_path.join("JPG"), "blocks folder creation").unwrap();
        fs::write(base_path.join("a.jpg"), "a").unwrap();
        fs::write(base_path.join("b.nef"), "b").unwrap();

        let settings = OrganizeSettings {
            naming_mode: NamingMode::Sequential,
            base_name: "Trip".to_string(),
            ..Default::default()
        };
        let report = organizer(settings).run(base_path).unwrap();

        assert_eq!(report.count(), 1);
        assert_eq!(report.failures[0].stage, FailureStage::CreateFolder);
        assert_eq!(report.moved[0].destination, base_path.join("NEF/Trip_1.nef"));
        assert!(base_path.join("a.jpg").exists());
    }

    /// 記錄取得權限的路徑與釋放次數
    #[derive(Default)]
    struct RecordingScope {
        acquired: Mutex<Vec<PathBuf>>,
        released: AtomicUsize,
    }

    impl RecordingScope {
        fn acquired_count(&self, path: &Path) -> usize {
            self.acquired
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.as_path() == path)
                .count()
        }
    }

    impl AccessScope for RecordingScope {
        fn acquire(&self, path: &Path) -> bool {
            self.acquired.lock().unwrap().push(path.to_path_buf());
            true
        }

        fn release(&self, _path: &Path) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_access_released_on_every_path() {
        let temp_dir = TempDir::new().unwrap();
        let base_path = temp_dir.path();

        fs::write(base_path.join("JPG"), "blocks folder creation").unwrap();
        fs::write(base_path.join("a.jpg"), "a").unwrap();
        fs::write(base_path.join("b.dng"), "b").unwrap();
        fs::write(base_path.join("c.txt"), "c").unwrap();

        let scope = Arc::new(RecordingScope::default());
        let mut organizer =
            organizer(OrganizeSettings::default()).with_access_scope(scope.clone());
        let report = organizer.run(base_path).unwrap();

        assert_eq!(report.count(), 1);
        assert_eq!(scope.acquired.lock().unwrap()[0], base_path);
        // 讀取檔案資訊與處理檔案時各取得一次
        for name in ["JPG", "a.jpg", "b.dng", "c.txt"] {
            assert_eq!(scope.acquired_count(&base_path.join(name)), 2, "{name}");
        }
        assert_eq!(
            scope.acquired.lock().unwrap().len(),
            scope.released.load(Ordering::SeqCst)
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_access_covers_unreadable_entries() {
        let temp_dir = TempDir::new().unwrap();
        let base_path = temp_dir.path();

        fs::write(base_path.join("a.jpg"), "a").unwrap();
        std::os::unix::fs::symlink(base_path.join("missing.jpg"), base_path.join("f.jpg"))
            .unwrap();

        let scope = Arc::new(RecordingScope::default());
        let mut organizer =
            organizer(OrganizeSettings::default()).with_access_scope(scope.clone());
        let report = organizer.run(base_path).unwrap();

        assert_eq!(report.count(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].stage, FailureStage::Metadata);
        assert_eq!(scope.acquired_count(&base_path.join("f.jpg")), 1);
        assert_eq!(
            scope.acquired.lock().unwrap().len(),
            scope.released.load(Ordering::SeqCst)
        );
    }
}
