use crate::config::save::save_settings;
use crate::config::{
    Config, Language, MAX_SCAN_DEPTH, MAX_SIMILARITY_THRESHOLD, MIN_SIMILARITY_THRESHOLD,
};
use crate::menu::handlers::run_duplicate_name_checker;
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style(t!("main_menu.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let options = vec![
        t!("main_menu.opt_checker"),
        t!("main_menu.opt_settings"),
        t!("main_menu.exit"),
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("main_menu.prompt"))
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_duplicate_name_checker(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(1) => {
            show_settings_menu(term, config)?;
            Ok(true)
        }
        _ => Ok(false), // 離開或按下 ESC
    }
}

/// 設定選單
fn show_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    loop {
        term.clear_screen()?;

        println!("{}", style(t!("settings.title")).cyan().bold());
        println!("{}", style(t!("common.esc_hint")).dim());

        let options = vec![
            t!("settings.opt_checker"),
            t!("settings.opt_language"),
            t!("settings.back"),
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("settings.prompt"))
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            Some(0) => show_checker_settings_menu(term, config)?,
            Some(1) => show_language_menu(term, config)?,
            _ => break,
        }
    }

    Ok(())
}

/// 重複檢測預設參數
fn show_checker_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.checker.title")).cyan().bold());

    let current = config.settings.duplicate_checker;
    println!(
        "\n{} {:.2} / {}\n",
        style(t!("settings.checker.current")).dim(),
        current.similarity_threshold,
        current.max_depth
    );

    let threshold: f64 = Input::new()
        .with_prompt(t!("settings.checker.threshold_prompt"))
        .default(current.similarity_threshold)
        .validate_with(|value: &f64| -> Result<(), String> {
            if (MIN_SIMILARITY_THRESHOLD..=MAX_SIMILARITY_THRESHOLD).contains(value) {
                Ok(())
            } else {
                Err(format!("{MIN_SIMILARITY_THRESHOLD} - {MAX_SIMILARITY_THRESHOLD}"))
            }
        })
        .interact_text_on(term)?;

    let max_depth: usize = Input::new()
        .with_prompt(t!("settings.checker.depth_prompt"))
        .default(current.max_depth)
        .validate_with(|value: &usize| -> Result<(), String> {
            if *value <= MAX_SCAN_DEPTH {
                Ok(())
            } else {
                Err(format!("0 - {MAX_SCAN_DEPTH}"))
            }
        })
        .interact_text_on(term)?;

    if threshold != current.similarity_threshold || max_depth != current.max_depth {
        config.settings.duplicate_checker.similarity_threshold = threshold;
        config.settings.duplicate_checker.max_depth = max_depth;
        save_settings(&config.settings)?;
        println!(
            "\n{} {threshold:.2} / {max_depth}",
            style(t!("settings.saved")).green()
        );
        std::thread::sleep(std::time::Duration::from_secs(1));
    }

    Ok(())
}

/// 語言設定選單
fn show_language_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.language.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let languages = Language::all();
    let items: Vec<String> = languages.iter().map(ToString::to_string).collect();

    let default_index = languages
        .iter()
        .position(|&l| l == config.settings.language)
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.language.prompt"))
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    let Some(selection) = selection else {
        return Ok(());
    };

    let selected_lang = languages[selection];

    if selected_lang != config.settings.language {
        config.settings.language = selected_lang;
        rust_i18n::set_locale(selected_lang.as_str());
        save_settings(&config.settings)?;
        println!(
            "\n{} {}",
            style(t!("settings.saved")).green(),
            selected_lang
        );
        std::thread::sleep(std::time::Duration::from_secs(1));
    }

    Ok(())
}
