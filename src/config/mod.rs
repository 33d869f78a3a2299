pub mod load;
pub mod save;
pub mod types;

pub use types::{
    Config, DuplicateCheckerSettings, Language, MAX_RECENT_PATHS, MAX_SCAN_DEPTH,
    MAX_SIMILARITY_THRESHOLD, MIN_SIMILARITY_THRESHOLD, UserSettings,
};

/// 設定檔放在程式執行的當前目錄
pub const SETTINGS_FILE_NAME: &str = "settings.json";
