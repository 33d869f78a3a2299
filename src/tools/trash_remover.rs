//! 移至資源回收筒
//!
//! 逐一處理，單一項目失敗不會中止整批作業

use log::{info, warn};
use std::path::{Path, PathBuf};

/// 批次刪除結果
#[derive(Debug, Default)]
pub struct TrashReport {
    pub removed: Vec<PathBuf>,
    /// 失敗的路徑與原因
    pub failed: Vec<(PathBuf, String)>,
}

impl TrashReport {
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

pub fn move_to_trash<P: AsRef<Path>>(paths: &[P]) -> TrashReport {
    let mut report = TrashReport::default();

    for path in paths {
        let path = path.as_ref();

        if !path.exists() {
            warn!("找不到要刪除的項目: {}", path.display());
            report
                .failed
                .push((path.to_path_buf(), "路徑不存在".to_string()));
            continue;
        }

        match trash::delete(path) {
            Ok(()) => {
                info!("已移至資源回收筒: {}", path.display());
                report.removed.push(path.to_path_buf());
            }
            Err(e) => {
                warn!("移至資源回收筒失敗 {}: {e}", path.display());
                report.failed.push((path.to_path_buf(), e.to_string()));
            }
        }
    }

    report
}
