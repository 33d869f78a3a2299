use regex::Regex;
use std::sync::LazyLock;

static REGEX_BRACKETED_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[【(\[（]([^)\]】）]+)[)\]】）]").expect("Invalid regex"));

/// 從自由輸入中取出以 `【】`、`()`、`（）` 或 `[]` 包住的關鍵字
#[must_use]
pub fn parse_ignore_keywords(raw: &str) -> Vec<String> {
    REGEX_BRACKETED_KEYWORD
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
