//! 照片整理元件
//!
//! 依副檔名、已挑選的 RAW 檔或檔案大小，將資料夾中的照片移動到對應的子資料夾

mod classifier;
mod main;
mod name_resolver;
mod organizer;
mod runner;
mod target_resolver;

pub use classifier::{Classification, PhotoClassifier, PhotoKind, SMALL_FILE_LIMIT};
pub use main::PhotoOrganizer;
pub use name_resolver::{SequenceCounter, effective_base_name, resolve_file_name, uses_sequence};
pub use organizer::{
    FailureStage, FileFailure, MovedFile, OrganizeReport, Organizer, RunPhase, organize,
};
pub use runner::{OrganizeHandle, RootOutcome, organize_roots, spawn_organize};
pub use target_resolver::{
    SELECTED_RAW_FOLDER, SMALL_FILE_FOLDER, date_segments, resolve_target_folder,
};
