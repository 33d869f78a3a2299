//! 相似名稱重複檢測元件
//!
//! 依名稱而非內容找出同一資料夾內可能重複的檔案與資料夾：
//! 先正規化名稱去除語系、版本與括號標註，再以相似度分組，
//! 並排除屬於同一系列不同集數的名稱。

mod detection;
mod group_builder;
mod keyword_parser;
mod main;
mod name_normalizer;
mod similarity;
mod variant_classifier;

pub use detection::{DetectionRequest, DetectionResult, detect_duplicates};
pub use group_builder::{DuplicateGroup, group_duplicates, report_rows};
pub use keyword_parser::parse_ignore_keywords;
pub use main::DuplicateNameChecker;
pub use name_normalizer::normalize_name;
pub use similarity::similarity_ratio;
pub use variant_classifier::{PatternMatches, VariantCatalog, is_sequence_variant};
