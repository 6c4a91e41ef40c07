mod access_scope;
mod file_mover;
mod path_validator;
mod photo_scanner;

pub use access_scope::{AccessScope, FullAccess, ScopedAccess};
pub use file_mover::{find_available_path, move_without_overwrite};
pub use path_validator::{ensure_directory_exists, validate_directory_exists};
pub use photo_scanner::{
    FileEntry, ScanOutcome, UnreadableEntry, scan_photo_files, scan_photo_files_with_access,
};
