//! 目標資料夾決定

use super::classifier::Classification;
use crate::config::{DateFolderFormat, OrganizationMode};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub const SELECTED_RAW_FOLDER: &str = "Selected_RAW";
pub const SMALL_FILE_FOLDER: &str = "Under_20MB";

/// 日期資料夾的路徑片段
#[must_use]
pub fn date_segments(format: DateFolderFormat, date: NaiveDate) -> Vec<String> {
    match format {
        DateFolderFormat::None => Vec::new(),
        DateFolderFormat::YearMonth => vec![date.format("%Y%m").to_string()],
        DateFolderFormat::YearThenMonth => vec![
            date.format("%Y").to_string(),
            date.format("%m").to_string(),
        ],
        DateFolderFormat::YearThenMonthThenDay => vec![
            date.format("%Y").to_string(),
            date.format("%m").to_string(),
            date.format("%d").to_string(),
        ],
        DateFolderFormat::IsoDate => vec![date.format("%Y-%m-%d").to_string()],
    }
}

/// 決定檔案的目標資料夾
///
/// 回傳的資料夾等於 `root` 時代表檔案維持原位
#[must_use]
pub fn resolve_target_folder(
    root: &Path,
    mode: OrganizationMode,
    date_folder_format: DateFolderFormat,
    extension: &str,
    classification: &Classification,
    created: NaiveDate,
) -> PathBuf {
    let mut folder = root.to_path_buf();

    match mode {
        OrganizationMode::ByExtension => {
            for segment in date_segments(date_folder_format, created) {
                folder.push(segment);
            }
            folder.push(extension.to_uppercase());
        }
        OrganizationMode::SelectedMatch => {
            if classification.is_raw() && classification.is_selected {
                folder.push(SELECTED_RAW_FOLDER);
            }
        }
        OrganizationMode::SizeThreshold => {
            if classification.is_small {
                folder.push(SMALL_FILE_FOLDER);
            }
        }
    }

    folder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::photo_organizer::classifier::PhotoKind;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 25).unwrap()
    }

    fn photo() -> Classification {
        Classification {
            kind: PhotoKind::Photo,
            is_selected: false,
            is_small: false,
        }
    }

    fn by_extension(format: DateFolderFormat, extension: &str) -> PathBuf {
        resolve_target_folder(
            Path::new("/root"),
            OrganizationMode::ByExtension,
            format,
            extension,
            &photo(),
            date(),
        )
    }

    #[test]
    fn test_by_extension_without_date() {
        assert_eq!(
            by_extension(DateFolderFormat::None, "jpg"),
            PathBuf::from("/root/JPG")
        );
        assert_eq!(
            by_extension(DateFolderFormat::None, "cr3"),
            PathBuf::from("/root/CR3")
        );
    }

    #[test]
    fn test_by_extension_date_formats() {
        assert_eq!(
            by_extension(DateFolderFormat::YearMonth, "jpg"),
            PathBuf::from("/root/202506/JPG")
        );
        assert_eq!(
            by_extension(DateFolderFormat::YearThenMonth, "jpg"),
            PathBuf::from("/root/2025/06/JPG")
        );
        assert_eq!(
            by_extension(DateFolderFormat::YearThenMonthThenDay, "jpg"),
            PathBuf::from("/root/2025/06/25/JPG")
        );
        assert_eq!(
            by_extension(DateFolderFormat::IsoDate, "heic"),
            PathBuf::from("/root/2025-06-25/HEIC")
        );
    }

    #[test]
    fn test_selected_match_routes_only_selected_raw() {
        let root = Path::new("/root");
        let selected = Classification {
            kind: PhotoKind::Raw,
            is_selected: true,
            is_small: false,
        };
        let unselected = Classification {
            is_selected: false,
            ..selected
        };

        let resolve = |c: &Classification| {
            resolve_target_folder(
                root,
                OrganizationMode::SelectedMatch,
                DateFolderFormat::YearMonth,
                "cr2",
                c,
                date(),
            )
        };

        assert_eq!(resolve(&selected), root.join(SELECTED_RAW_FOLDER));
        assert_eq!(resolve(&unselected), root);
        assert_eq!(resolve(&photo()), root);
    }

    #[test]
    fn test_size_threshold_routes_small_files() {
        let root = Path::new("/root");
        let small = Classification {
            is_small: true,
            ..photo()
        };

        let resolve = |c: &Classification| {
            resolve_target_folder(
                root,
                OrganizationMode::SizeThreshold,
                DateFolderFormat::None,
                "jpg",
                c,
                date(),
            )
        };

        assert_eq!(resolve(&small), root.join(SMALL_FILE_FOLDER));
        assert_eq!(resolve(&photo()), root);
    }
}
