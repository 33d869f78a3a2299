//! 名稱正規化
//!
//! 去除括號標註、版本標記、話數與副檔名等裝飾，產生用於比對的核心字串

use regex::Regex;
use std::sync::LazyLock;

static REGEX_PATH_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\\/]").expect("Invalid regex"));

// 任一左括號配最近的右括號
static REGEX_BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[(\[（【].*?[)\]）】]").expect("Invalid regex"));

static REGEX_NOISE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(DL版|パッケージ版|多国語版|files|canplay|Chinese|English|Espanol)")
        .expect("Invalid regex")
});

static REGEX_SEQUENCE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"第?[一二三四五六七八九十百千零〇0-9]+[話话章部巻卷代]").expect("Invalid regex")
});

static REGEX_LONG_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{6,}").expect("Invalid regex"));

static REGEX_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[a-zA-Z0-9]+$").expect("Invalid regex"));

static REGEX_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-・_]+").expect("Invalid regex"));

/// 將原始名稱轉為小寫的比對鍵
///
/// 步驟順序固定，後面的步驟假設前面已移除干擾字元。結果可能為空字串。
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    let steps: [&Regex; 7] = [
        &REGEX_PATH_SEPARATOR,
        &REGEX_BRACKETED,
        &REGEX_NOISE_TOKEN,
        &REGEX_SEQUENCE_MARKER,
        &REGEX_LONG_DIGITS,
        &REGEX_EXTENSION,
        &REGEX_SEPARATORS,
    ];

    let stripped = steps.iter().fold(raw.to_string(), |name, regex| {
        regex.replace_all(&name, "").into_owned()
    });

    stripped.trim().to_lowercase()
}
