//! 相似名稱重複檢測主模組
//!
//! 負責互動流程：選擇路徑與參數、顯示掃描進度與結果，以及匯出、刪除、開啟位置等後續操作

use super::detection::{DetectionRequest, DetectionResult, detect_duplicates};
use super::group_builder::{DuplicateGroup, report_rows};
use super::keyword_parser::parse_ignore_keywords;
use crate::config::save::{add_recent_path, save_settings};
use crate::config::{Config, MAX_SCAN_DEPTH, MAX_SIMILARITY_THRESHOLD, MIN_SIMILARITY_THRESHOLD};
use crate::signal::take_shutdown_request;
use crate::tools::{
    Entry, move_to_trash, reveal_in_file_manager, validate_directory_exists, write_csv_report,
};
use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

const DEFAULT_REPORT_FILE: &str = "duplicate_report.csv";

/// 結果畫面操作結束後的下一步
enum NextStep {
    Rescan,
    Done,
}

/// 相似名稱重複檢測元件
pub struct DuplicateNameChecker {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl DuplicateNameChecker {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== 相似名稱重複檢測 ===").cyan().bold());

        let Some(input_path) = self.prompt_input_path()? else {
            return Ok(()); // ESC pressed
        };
        let directory = PathBuf::from(&input_path);

        validate_directory_exists(&directory)?;

        {
            let mut settings = self.config.settings.clone();
            add_recent_path(&mut settings, &input_path);
            if let Err(e) = save_settings(&settings) {
                warn!("無法儲存路徑歷史: {e}");
            }
        }

        let request = self.prompt_request(directory)?;

        loop {
            let Some(result) = self.run_detection(&request)? else {
                return Ok(());
            };

            self.print_groups(&result);
            if result.groups.is_empty() {
                return Ok(());
            }

            match self.handle_actions(&result.groups)? {
                NextStep::Rescan => println!("{}", style("重新檢測中...").dim()),
                NextStep::Done => return Ok(()),
            }
        }
    }

    fn prompt_input_path(&self) -> Result<Option<String>> {
        let recent_paths = &self.config.settings.recent_paths;

        if recent_paths.is_empty() {
            let path: String = Input::new()
                .with_prompt("請輸入要檢查的資料夾路徑")
                .interact_text()?;
            return Ok(Some(path.trim().to_string()));
        }

        let mut options: Vec<String> = recent_paths
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let indicator = if Path::new(p).is_dir() { "✓" } else { "✗" };
                format!("{} [{}] {}", i + 1, indicator, p)
            })
            .collect();
        options.push("輸入新路徑...".to_string());

        println!("{}", style("(按 ESC 返回主選單)").dim());

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("請選擇路徑")
            .items(&options)
            .default(0)
            .interact_opt()?;

        match selection {
            None => Ok(None),
            Some(idx) if idx < recent_paths.len() => Ok(Some(recent_paths[idx].clone())),
            Some(_) => {
                let path: String = Input::new()
                    .with_prompt("請輸入要檢查的資料夾路徑")
                    .interact_text()?;
                Ok(Some(path.trim().to_string()))
            }
        }
    }

    fn prompt_request(&self, directory: PathBuf) -> Result<DetectionRequest> {
        let defaults = &self.config.settings.duplicate_checker;

        let threshold: f64 = Input::new()
            .with_prompt(format!(
                "相似度門檻 ({MIN_SIMILARITY_THRESHOLD}-{MAX_SIMILARITY_THRESHOLD})"
            ))
            .default(defaults.similarity_threshold)
            .validate_with(|value: &f64| -> Result<(), String> {
                if (MIN_SIMILARITY_THRESHOLD..=MAX_SIMILARITY_THRESHOLD).contains(value) {
                    Ok(())
                } else {
                    Err(format!(
                        "請輸入 {MIN_SIMILARITY_THRESHOLD} 到 {MAX_SIMILARITY_THRESHOLD} 之間的數值"
                    ))
                }
            })
            .interact_text()?;

        let max_depth: usize = Input::new()
            .with_prompt(format!("遍歷層級 (0-{MAX_SCAN_DEPTH})"))
            .default(defaults.max_depth)
            .validate_with(|value: &usize| -> Result<(), String> {
                if *value <= MAX_SCAN_DEPTH {
                    Ok(())
                } else {
                    Err(format!("層級不可超過 {MAX_SCAN_DEPTH}"))
                }
            })
            .interact_text()?;

        let depth_filter = self.prompt_depth_filter(max_depth)?;

        let raw_keywords: String = Input::new()
            .with_prompt("忽略關鍵詞（用【】或()包裹，可留空）")
            .allow_empty(true)
            .interact_text()?;
        let user_keywords = parse_ignore_keywords(&raw_keywords);
        if !user_keywords.is_empty() {
            println!(
                "{} {}",
                style("使用者關鍵詞:").dim(),
                user_keywords.join(", ")
            );
        }

        Ok(DetectionRequest::new(directory, defaults)
            .with_threshold(threshold)
            .with_max_depth(max_depth)
            .with_depth_filter(depth_filter)
            .with_user_keywords(user_keywords))
    }

    fn prompt_depth_filter(&self, max_depth: usize) -> Result<Option<usize>> {
        let raw: String = Input::new()
            .with_prompt("只比對指定層級（留空表示全部層級）")
            .allow_empty(true)
            .validate_with(|value: &String| -> Result<(), String> {
                parse_depth_filter(value, max_depth).map(|_| ())
            })
            .interact_text()?;

        Ok(parse_depth_filter(&raw, max_depth).unwrap_or(None))
    }

    /// 執行掃描與分組；掃描期間收到中斷訊號時捨棄結果並回傳 `None`
    fn run_detection(&self, request: &DetectionRequest) -> Result<Option<DetectionResult>> {
        // 清掉先前殘留的中斷訊號
        take_shutdown_request(&self.shutdown_signal);

        let progress_bar = ProgressBar::new(0);
        progress_bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );
        progress_bar.set_message("掃描中...");

        let mut on_progress = |done: usize, total: usize| {
            progress_bar.set_length(total as u64);
            progress_bar.set_position(done as u64);
        };
        let result = detect_duplicates(request, Some(&mut on_progress));
        progress_bar.finish_and_clear();
        let result = result?;

        if take_shutdown_request(&self.shutdown_signal) {
            println!("{}", style("操作已中斷，本次結果已捨棄").yellow());
            return Ok(None);
        }

        info!(
            "檢測完成 - 掃描: {}, 重複組: {}, 重複項目: {}",
            result.entries_scanned,
            result.groups.len(),
            result.duplicate_entries()
        );

        Ok(Some(result))
    }

    fn print_groups(&self, result: &DetectionResult) {
        println!();
        println!(
            "{}",
            style(format!("共掃描 {} 個項目", result.entries_scanned)).dim()
        );

        if result.groups.is_empty() {
            println!("{}", style("未發現任何重複項。").green());
            return;
        }

        println!(
            "{}",
            style(format!("檢測到 {} 組重複:", result.groups.len()))
                .yellow()
                .bold()
        );
        println!();

        for (idx, group) in result.groups.iter().enumerate() {
            println!(
                "{} {} {}",
                style(format!("組 {}", idx + 1)).cyan().bold(),
                style("• 相似核心:").dim(),
                group.core_key()
            );
            println!("  {}", style(group.folder().display()).dim());
            for entry in group.entries() {
                println!("   • {}", display_name(entry));
            }
            println!();
        }
    }

    fn handle_actions(&self, groups: &[DuplicateGroup]) -> Result<NextStep> {
        let options = [
            "匯出 CSV 報告",
            "刪除勾選項目（移至資源回收筒）",
            "在檔案總管中顯示",
            "返回主選單",
        ];

        loop {
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("請選擇操作")
                .items(&options)
                .default(0)
                .interact_opt()?;

            match selection {
                Some(0) => self.export_report(groups)?,
                Some(1) => {
                    if self.delete_selected(groups)? {
                        return Ok(NextStep::Rescan);
                    }
                }
                Some(2) => self.reveal_selected(groups)?,
                _ => return Ok(NextStep::Done),
            }
        }
    }

    fn export_report(&self, groups: &[DuplicateGroup]) -> Result<()> {
        let path: String = Input::new()
            .with_prompt("報告輸出路徑")
            .default(DEFAULT_REPORT_FILE.to_string())
            .interact_text()?;
        let path = PathBuf::from(path.trim());

        match write_csv_report(&path, &report_rows(groups)) {
            Ok(rows) => println!(
                "{} {} ({} 列)",
                style("報告已保存到:").green(),
                path.display(),
                rows
            ),
            Err(e) => {
                warn!("匯出報告失敗: {e:#}");
                println!("{} {e:#}", style("匯出失敗:").red());
            }
        }

        Ok(())
    }

    /// 回傳是否有執行刪除
    fn delete_selected(&self, groups: &[DuplicateGroup]) -> Result<bool> {
        let members = flatten_members(groups);
        let items: Vec<String> = members
            .iter()
            .map(|(group_no, entry)| format!("[組 {group_no}] {}", entry.path.display()))
            .collect();

        println!("{}", style("(空白鍵勾選，Enter 確認，ESC 取消)").dim());
        let Some(selections) = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt("請勾選要刪除的項目")
            .items(&items)
            .interact_opt()?
        else {
            return Ok(false);
        };

        if selections.is_empty() {
            println!("{}", style("未勾選任何項目").yellow());
            return Ok(false);
        }

        let confirmed = Confirm::new()
            .with_prompt(format!(
                "確定要將 {} 個項目移至資源回收筒嗎？",
                selections.len()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", style("操作已取消").yellow());
            return Ok(false);
        }

        let paths: Vec<&Path> = selections
            .iter()
            .map(|&idx| members[idx].1.path.as_path())
            .collect();
        let report = move_to_trash(&paths);

        println!();
        println!(
            "{}",
            style(format!("成功刪除 {} 項。", report.removed_count())).green()
        );
        if report.has_failures() {
            println!(
                "{}",
                style(format!("失敗 {} 項：", report.failed.len())).red()
            );
            for (path, reason) in &report.failed {
                println!("  {} {} ({reason})", style("✗").red(), path.display());
            }
        }

        info!(
            "刪除完成 - 成功: {}, 失敗: {}",
            report.removed_count(),
            report.failed.len()
        );

        Ok(true)
    }

    fn reveal_selected(&self, groups: &[DuplicateGroup]) -> Result<()> {
        let members = flatten_members(groups);
        let items: Vec<String> = members
            .iter()
            .map(|(group_no, entry)| format!("[組 {group_no}] {}", entry.path.display()))
            .collect();

        let Some(idx) = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("請選擇要開啟位置的項目")
            .items(&items)
            .default(0)
            .interact_opt()?
        else {
            return Ok(());
        };

        if let Err(e) = reveal_in_file_manager(&members[idx].1.path) {
            println!("{} {e:#}", style("錯誤:").red());
        }

        Ok(())
    }
}

/// 攤平成 (群組編號, 項目)，群組編號從 1 開始
fn flatten_members(groups: &[DuplicateGroup]) -> Vec<(usize, &Entry)> {
    groups
        .iter()
        .enumerate()
        .flat_map(|(idx, group)| group.entries().iter().map(move |entry| (idx + 1, entry)))
        .collect()
}

fn display_name(entry: &Entry) -> String {
    if entry.is_dir {
        format!("{} {}", entry.name, style("[資料夾]").dim())
    } else {
        entry.name.clone()
    }
}

/// 空字串代表不限層級
fn parse_depth_filter(raw: &str, max_depth: usize) -> Result<Option<usize>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let depth: usize = raw
        .parse()
        .map_err(|_| format!("請輸入 0 到 {max_depth} 之間的整數"))?;
    if depth > max_depth {
        return Err(format!("層級不可超過遍歷層級 {max_depth}"));
    }

    Ok(Some(depth))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> Entry {
        Entry {
            name: name.to_string(),
            path: PathBuf::from("/v").join(name),
            depth: 0,
            is_dir: false,
        }
    }

    fn group(names: &[&str]) -> DuplicateGroup {
        DuplicateGroup::new(names.iter().map(|name| entry(name)).collect()).unwrap()
    }

    #[test]
    fn test_parse_depth_filter() {
        assert_eq!(parse_depth_filter("", 3), Ok(None));
        assert_eq!(parse_depth_filter("  ", 3), Ok(None));
        assert_eq!(parse_depth_filter("2", 3), Ok(Some(2)));
        assert_eq!(parse_depth_filter(" 0 ", 3), Ok(Some(0)));
        assert!(parse_depth_filter("4", 3).is_err());
        assert!(parse_depth_filter("-1", 3).is_err());
        assert!(parse_depth_filter("abc", 3).is_err());
    }

    #[test]
    fn test_flatten_members_numbers_groups_from_one() {
        let groups = vec![group(&["a.mp4", "a (1).mp4"]), group(&["b.mp4", "b [x].mp4"])];
        let members = flatten_members(&groups);

        assert_eq!(members.len(), 4);
        assert_eq!(members[0].0, 1);
        assert_eq!(members[1].1.name, "a (1).mp4");
        assert_eq!(members[2].0, 2);
    }

    #[test]
    fn test_display_name_marks_directories() {
        let mut folder = entry("folder");
        assert_eq!(display_name(&folder), "folder");
        folder.is_dir = true;
        assert!(display_name(&folder).starts_with("folder "));
    }
}
