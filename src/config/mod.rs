pub mod load;
pub mod save;
pub mod types;

pub use types::{
    Config, DEFAULT_BASE_NAME, DateFolderFormat, Language, MAX_RECENT_PATHS, NamingMode,
    OrganizationMode, OrganizeSettings, PhotoTypeTable, UserSettings,
};
