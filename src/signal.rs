//! Ctrl-C 中斷旗標
//!
//! 核心演算法沒有取消機制；中斷只會讓呼叫端捨棄當次結果

use log::warn;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[must_use]
pub fn setup_shutdown_signal() -> Arc<AtomicBool> {
    let shutdown_signal = Arc::new(AtomicBool::new(false));
    let handler_signal = Arc::clone(&shutdown_signal);

    ctrlc::set_handler(move || {
        handler_signal.store(true, Ordering::SeqCst);
        warn!("收到中斷信號");
        eprintln!("\n收到中斷信號，本次結果將被捨棄...");
    })
    .expect("無法設定 Ctrl-C 處理器");

    shutdown_signal
}

/// 讀取並清除中斷旗標，回傳先前是否已被觸發
pub fn take_shutdown_request(shutdown_signal: &AtomicBool) -> bool {
    shutdown_signal.swap(false, Ordering::SeqCst)
}
