use crate::config::save::save_settings;
use crate::config::{Config, DateFolderFormat, Language, NamingMode, OrganizationMode};
use crate::menu::handlers::{run_batch_organizer, run_photo_organizer};
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use rust_i18n::t;
use std::fmt::Display;

pub fn show_main_menu(term: &Term, config: &mut Config) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style(t!("main_menu.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let options = vec![
        t!("main_menu.opt_organize"),
        t!("main_menu.opt_batch"),
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
            run_photo_organizer(term, config)?;
            Ok(true)
        }
        Some(1) => {
            run_batch_organizer(term, config)?;
            Ok(true)
        }
        Some(2) => {
            show_settings_menu(term, config)?;
            Ok(true)
        }
        Some(3) | None => Ok(false), // ESC pressed - exit
        _ => unreachable!(),
    }
}

/// 設定選單
fn show_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    loop {
        term.clear_screen()?;

        println!("{}", style(t!("settings.title")).cyan().bold());
        println!("{}", style(t!("common.esc_hint")).dim());

        let organize = &config.settings.organize;
        let options = vec![
            format!("{} [{}]", t!("settings.opt_mode"), organize.organization_mode),
            format!("{} [{}]", t!("settings.opt_naming"), organize.naming_mode),
            format!(
                "{} [{}]",
                t!("settings.opt_date_format"),
                organize.date_folder_format
            ),
            format!("{} [{}]", t!("settings.opt_base_name"), organize.base_name),
            format!("{} [{}]", t!("settings.opt_language"), config.settings.language),
            t!("settings.back").to_string(),
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("settings.prompt"))
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            Some(0) => {
                if let Some(mode) = select_option(
                    term,
                    &t!("settings.mode.prompt"),
                    &OrganizationMode::all(),
                    config.settings.organize.organization_mode,
                )? {
                    config.settings.organize.organization_mode = mode;
                    save_and_notify(config, mode)?;
                }
            }
            Some(1) => {
                if let Some(naming) = select_option(
                    term,
                    &t!("settings.naming.prompt"),
                    &NamingMode::all(),
                    config.settings.organize.naming_mode,
                )? {
                    config.settings.organize.naming_mode = naming;
                    save_and_notify(config, naming)?;
                }
            }
            Some(2) => {
                if let Some(format) = select_option(
                    term,
                    &t!("settings.date_format.prompt"),
                    &DateFolderFormat::all(),
                    config.settings.organize.date_folder_format,
                )? {
                    config.settings.organize.date_folder_format = format;
                    save_and_notify(config, format)?;
                }
            }
            Some(3) => edit_base_name(term, config)?,
            Some(4) => {
                if let Some(language) = select_option(
                    term,
                    &t!("settings.language.prompt"),
                    &Language::all(),
                    config.settings.language,
                )? {
                    config.settings.language = language;
                    rust_i18n::set_locale(language.as_str());
                    save_and_notify(config, language)?;
                }
            }
            Some(5) | None => break, // ESC or back
            _ => unreachable!(),
        }
    }

    Ok(())
}

/// 從選項中挑選一個值，沒有變更或按下 ESC 時回傳 `None`
fn select_option<T: Copy + PartialEq + Display>(
    term: &Term,
    prompt: &str,
    choices: &[T],
    current: T,
) -> Result<Option<T>> {
    term.clear_screen()?;

    println!("{}", style(prompt).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());
    println!("\n{} {}", style(t!("settings.current")).dim(), current);
    println!();

    let items: Vec<String> = choices.iter().map(ToString::to_string).collect();
    let default_index = choices.iter().position(|&c| c == current).unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    // ESC pressed - return without saving
    let Some(selection) = selection else {
        return Ok(None);
    };

    let selected = choices[selection];
    Ok((selected != current).then_some(selected))
}

fn edit_base_name(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.base_name.title")).cyan().bold());
    if config.settings.organize.organization_mode != OrganizationMode::ByExtension {
        println!("{}", style(t!("settings.naming_only_by_extension")).yellow());
    }

    let base_name: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.base_name.prompt"))
        .with_initial_text(config.settings.organize.base_name.clone())
        .allow_empty(true)
        .interact_text()?;
    let base_name = base_name.trim().to_string();

    if base_name != config.settings.organize.base_name {
        config.settings.organize.base_name = base_name.clone();
        save_and_notify(config, base_name)?;
    }

    Ok(())
}

fn save_and_notify(config: &Config, value: impl Display) -> Result<()> {
    save_settings(&config.settings)?;
    println!("\n{} {}", style(t!("settings.saved")).green(), value);
    std::thread::sleep(std::time::Duration::from_secs(1));
    Ok(())
}
