//! CSV 報告輸出
//!
//! 以 UTF-8 BOM 開頭，讓試算表軟體能正確辨識中日文檔名

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 報告中的一列
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// 從 1 開始的群組編號
    #[serde(rename = "組編號")]
    pub group_index: usize,
    #[serde(rename = "檔名")]
    pub name: String,
    #[serde(rename = "完整路徑")]
    pub path: String,
}

/// 將報告寫入指定檔案，回傳寫入的列數
pub fn write_csv_report(path: &Path, rows: &[ReportRow]) -> Result<usize> {
    let file = File::create(path)
        .with_context(|| format!("無法建立報告檔案: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(UTF8_BOM)
        .with_context(|| format!("無法寫入報告檔案: {}", path.display()))?;

    write_rows(&mut writer, rows)?;

    info!("報告已輸出: {} ({} 列)", path.display(), rows.len());
    Ok(rows.len())
}

fn write_rows<W: Write>(writer: W, rows: &[ReportRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        csv_writer
            .write_record(["組編號", "檔名", "完整路徑"])
            .context("無法寫入報告標題")?;
    }
    for row in rows {
        csv_writer.serialize(row).context("無法寫入報告內容")?;
    }
    csv_writer.flush().context("無法寫入報告檔案")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn row(group_index: usize, name: &str, path: &str) -> ReportRow {
        ReportRow {
            group_index,
            name: name.to_string(),
            path: path.to_string(),
        }
    }

    #[test]
    fn test_write_report_with_bom_and_header() {
        let temp_dir = TempDir::new().unwrap();
        let report = temp_dir.path().join("report.csv");
        let rows = vec![
            row(1, "Show (DL版).mp4", "/videos/Show (DL版).mp4"),
            row(1, "Show.mp4", "/videos/Show.mp4"),
        ];

        let written = write_csv_report(&report, &rows).unwrap();
        assert_eq!(written, 2);

        let bytes = fs::read(&report).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let content = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "組編號,檔名,完整路徑");
        assert_eq!(lines[1], "1,Show (DL版).mp4,/videos/Show (DL版).mp4");
        assert_eq!(lines[2], "1,Show.mp4,/videos/Show.mp4");
    }

    #[test]
    fn test_write_report_quotes_commas() {
        let mut buffer = Vec::new();
        write_rows(&mut buffer, &[row(2, "a,b.mp4", "/x/a,b.mp4")]).unwrap();
        let content = String::from_utf8(buffer).unwrap();
        assert!(content.contains("2,\"a,b.mp4\",\"/x/a,b.mp4\""));
    }

    #[test]
    fn test_write_empty_report_keeps_header() {
        let mut buffer = Vec::new();
        write_rows(&mut buffer, &[]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "組編號,檔名,完整路徑\n");
    }

    #[test]
    fn test_write_report_to_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let report = temp_dir.path().join("missing/report.csv");
        assert!(write_csv_report(&report, &[]).is_err());
    }
}
