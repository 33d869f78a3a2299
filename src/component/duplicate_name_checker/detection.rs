//! 掃描加分組的完整流程，不含任何互動

use super::group_builder::{DuplicateGroup, group_duplicates};
use crate::config::DuplicateCheckerSettings;
use crate::tools::scan_tree;
use anyhow::Result;
use std::path::PathBuf;

/// 一次檢測所需的參數
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionRequest {
    pub directory: PathBuf,
    pub max_depth: usize,
    pub threshold: f64,
    pub depth_filter: Option<usize>,
    pub user_keywords: Vec<String>,
}

impl DetectionRequest {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, defaults: &DuplicateCheckerSettings) -> Self {
        Self {
            directory: directory.into(),
            max_depth: defaults.max_depth,
            threshold: defaults.similarity_threshold,
            depth_filter: None,
            user_keywords: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_depth_filter(mut self, depth_filter: Option<usize>) -> Self {
        self.depth_filter = depth_filter;
        self
    }

    #[must_use]
    pub fn with_user_keywords(mut self, user_keywords: Vec<String>) -> Self {
        self.user_keywords = user_keywords;
        self
    }
}

#[derive(Debug, Clone)]
pub struct DetectionResult {
    pub entries_scanned: usize,
    pub groups: Vec<DuplicateGroup>,
}

impl DetectionResult {
    /// 所有群組的成員總數
    #[must_use]
    pub fn duplicate_entries(&self) -> usize {
        self.groups.iter().map(DuplicateGroup::len).sum()
    }
}

pub fn detect_duplicates(
    request: &DetectionRequest,
    on_progress: Option<&mut dyn FnMut(usize, usize)>,
) -> Result<DetectionResult> {
    let entries = scan_tree(&request.directory, request.max_depth, on_progress)?;
    let groups = group_duplicates(
        &entries,
        request.threshold,
        &request.user_keywords,
        request.depth_filter,
    );

    Ok(DetectionResult {
        entries_scanned: entries.len(),
        groups,
    })
}
