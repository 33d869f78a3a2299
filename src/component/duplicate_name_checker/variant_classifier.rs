//! 系列編號判斷
//!
//! 兩個名稱只要同時符合任一編號樣式，就視為同一系列的不同集數，不可合併

use log::warn;
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

const BUILTIN_PATTERNS: [&str; 10] = [
    r"外传\d+",
    r"外传[一二三四五六七八九十]",
    r"vol\.?\s*\d+",
    r"episode\s*\d+",
    r"ep\s*\d+",
    r"part\s*\d+",
    r"case\.?\s*\d+",
    r"\b\d+\s*th\b",
    r"\d+\.\d+",
    r"[一二三四五六七八九十]+$",
];

static BUILTIN_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    BUILTIN_PATTERNS
        .iter()
        .map(|pattern| build_case_insensitive(pattern).expect("Invalid regex"))
        .collect()
});

fn build_case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// 單次執行用的樣式清單：內建樣式加上使用者關鍵字
///
/// 每次檢測重新建立，不跨執行共用。
#[derive(Debug, Clone)]
pub struct VariantCatalog {
    patterns: Vec<Regex>,
}

impl VariantCatalog {
    #[must_use]
    pub fn new(user_keywords: &[String]) -> Self {
        let mut patterns = BUILTIN_REGEXES.clone();

        for keyword in user_keywords.iter().filter(|k| !k.is_empty()) {
            match build_case_insensitive(&regex::escape(keyword)) {
                Ok(regex) => patterns.push(regex),
                Err(e) => warn!("略過無法使用的關鍵字 {keyword}: {e}"),
            }
        }

        Self { patterns }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// 計算名稱符合哪些樣式，供同一資料夾內重複比對使用
    #[must_use]
    pub fn matches(&self, name: &str) -> PatternMatches {
        PatternMatches(self.patterns.iter().map(|p| p.is_match(name)).collect())
    }

    /// 是否有任一樣式同時出現在兩個名稱中（不要求符合的內容相同）
    #[must_use]
    pub fn is_sequence_variant(&self, a: &str, b: &str) -> bool {
        self.matches(a).overlaps(&self.matches(b))
    }
}

/// 單一名稱對樣式清單的符合結果，索引與 `VariantCatalog` 的樣式順序一致
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatches(Vec<bool>);

impl PatternMatches {
    /// 兩個名稱是否共同符合任一樣式
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.0.iter().zip(&other.0).any(|(a, b)| *a && *b)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(|matched| *matched)
    }
}

/// 以內建樣式與使用者關鍵字判斷兩個原始名稱是否為系列中的不同集數
#[must_use]
pub fn is_sequence_variant(a: &str, b: &str, user_keywords: &[String]) -> bool {
    VariantCatalog::new(user_keywords).is_sequence_variant(a, b)
}
