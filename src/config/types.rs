use serde::{Deserialize, Serialize};
use std::fmt;

/// 最近使用路徑的保留數量
pub const MAX_RECENT_PATHS: usize = 10;

/// 相似度門檻可選範圍
pub const MIN_SIMILARITY_THRESHOLD: f64 = 0.6;
pub const MAX_SIMILARITY_THRESHOLD: f64 = 1.0;

/// 遍歷層級上限
pub const MAX_SCAN_DEPTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "zh-TW")]
    ZhTw,
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "ja-JP")]
    JaJp,
}

impl Language {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::ZhTw => "zh-TW",
            Self::ZhCn => "zh-CN",
            Self::JaJp => "ja-JP",
        }
    }

    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::EnUs, Self::ZhTw, Self::ZhCn, Self::JaJp]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::EnUs => "English",
            Self::ZhTw => "繁體中文",
            Self::ZhCn => "简体中文",
            Self::JaJp => "日本語",
        };
        f.write_str(name)
    }
}

/// 重複名稱檢測的預設參數
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuplicateCheckerSettings {
    pub similarity_threshold: f64,
    pub max_depth: usize,
}

impl Default for DuplicateCheckerSettings {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.8,
            max_depth: 1,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub language: Language,
    pub recent_paths: Vec<String>,
    pub duplicate_checker: DuplicateCheckerSettings,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings: UserSettings,
}
