use crate::component::DuplicateNameChecker;
use crate::config::Config;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn run_duplicate_name_checker(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let checker = DuplicateNameChecker::new(config.clone(), Arc::clone(shutdown_signal));

    if let Err(e) = checker.run() {
        eprintln!("{} {:#}", style(t!("common.error_prefix")).red().bold(), e);
    }

    // 元件會更新路徑歷史，重新載入以保持一致
    *config = Config::new()?;

    pause(term)?;
    Ok(())
}
