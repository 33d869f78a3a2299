use anyhow::{Context, Result};
use log::info;
use std::path::Path;
use std::process::{Command, Stdio};

/// 在檔案總管中顯示指定項目
pub fn reveal_in_file_manager(path: &Path) -> Result<()> {
    let mut command = reveal_command(path);
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("無法開啟檔案總管: {}", path.display()))?;

    info!("已在檔案總管中開啟: {}", path.display());
    Ok(())
}

#[cfg(target_os = "windows")]
fn reveal_command(path: &Path) -> Command {
    let mut command = Command::new("explorer");
    command.arg(format!("/select,{}", path.display()));
    command
}

#[cfg(target_os = "macos")]
fn reveal_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg("-R").arg(path);
    command
}

// 其他平台無法選取單一檔案，開啟所在資料夾
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn reveal_command(path: &Path) -> Command {
    let target = path.parent().unwrap_or(path);
    let mut command = Command::new("xdg-open");
    command.arg(target);
    command
}
