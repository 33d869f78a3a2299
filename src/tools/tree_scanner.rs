//! 目錄樹遍歷
//!
//! 在限定層級內列出所有檔案與資料夾，並記錄各自相對於根目錄的層級

use crate::tools::validate_directory_exists;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 遍歷時發現的一個檔案或資料夾
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// 檔名（含副檔名）
    pub name: String,
    /// 完整路徑
    pub path: PathBuf,
    /// 根目錄的直接子項目為 0
    pub depth: usize,
    pub is_dir: bool,
}

impl Entry {
    /// 所在資料夾
    #[must_use]
    pub fn parent_folder(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// 掃描 `root` 底下 `max_depth` 層以內的所有項目
///
/// 進度回呼的總數來自不限層級的預掃描，百分比可能超過或不到 100%。
/// 根目錄無法讀取時回傳錯誤；其下無法讀取的子目錄會記錄警告後略過。
pub fn scan_tree(
    root: &Path,
    max_depth: usize,
    mut on_progress: Option<&mut dyn FnMut(usize, usize)>,
) -> Result<Vec<Entry>> {
    validate_directory_exists(root)?;
    fs::read_dir(root).with_context(|| format!("無法讀取資料夾: {}", root.display()))?;

    info!("開始掃描目錄: {} (層級上限 {max_depth})", root.display());

    let total = count_all_entries(root);
    let mut entries = Vec::new();

    // walkdir 的 depth 對根目錄子項目為 1，這裡統一減一
    let walker = WalkDir::new(root)
        .follow_links(false)
        .min_depth(1)
        .max_depth(max_depth.saturating_add(1));

    for item in walker {
        let item = match item {
            Ok(item) => item,
            Err(e) => {
                warn!("略過無法讀取的項目: {e}");
                continue;
            }
        };

        let entry = Entry {
            name: item.file_name().to_string_lossy().into_owned(),
            depth: item.depth() - 1,
            is_dir: item.file_type().is_dir(),
            path: item.into_path(),
        };
        debug!("[{}] {}", entry.depth, entry.path.display());
        entries.push(entry);

        if let Some(callback) = on_progress.as_deref_mut() {
            callback(entries.len(), total);
        }
    }

    info!("掃描完成，共 {} 個項目（預估 {total}）", entries.len());

    Ok(entries)
}

/// 不限層級地計算整棵樹的項目數，供進度顯示使用
fn count_all_entries(root: &Path) -> usize {
    WalkDir::new(root)
        .follow_links(false)
        .min_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .count()
}
