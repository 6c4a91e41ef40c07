use super::organizer::{OrganizeReport, Organizer};
use super::runner::{organize_roots, spawn_organize};
use crate::config::save::{add_recent_path, save_settings};
use crate::config::{Config, OrganizationMode, OrganizeSettings};
use crate::tools::validate_directory_exists;
use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use rust_i18n::t;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 照片整理元件
pub struct PhotoOrganizer<'a> {
    config: &'a mut Config,
}

impl<'a> PhotoOrganizer<'a> {
    pub fn new(config: &'a mut Config) -> Self {
        Self { config }
    }

    pub fn run(&mut self) -> Result<()> {
        println!("{}", style(t!("organize.title")).cyan().bold());

        let Some(input_path) = self.prompt_input_path()? else {
            return Ok(()); // ESC pressed
        };
        let directory = PathBuf::from(&input_path);

        validate_directory_exists(&directory)?;
        self.remember_path(&input_path);

        print_settings_summary(&self.config.settings.organize);

        if !confirm(&t!("organize.confirm"))? {
            println!("{}", style(t!("common.cancelled")).yellow());
            return Ok(());
        }

        let organizer = self.build_organizer();
        let handle = spawn_organize(directory, organizer)?;

        let spinner = create_spinner(&t!("organize.running"));
        let result = handle.wait();
        spinner.finish_and_clear();

        print_report(&result?);

        Ok(())
    }

    /// 一次整理多個資料夾
    pub fn run_batch(&mut self) -> Result<()> {
        println!("{}", style(t!("batch.title")).cyan().bold());

        let roots = self.prompt_batch_paths()?;
        if roots.is_empty() {
            println!("{}", style(t!("batch.no_paths")).yellow());
            return Ok(());
        }

        print_settings_summary(&self.config.settings.organize);

        if !confirm(&t!("batch.confirm", count = roots.len()))? {
            println!("{}", style(t!("common.cancelled")).yellow());
            return Ok(());
        }

        let organizer = self.build_organizer();
        let spinner = create_spinner(&t!("organize.running"));
        let outcomes = organize_roots(&roots, &organizer);
        spinner.finish_and_clear();

        for outcome in outcomes {
            println!();
            println!("{}", style(outcome.root.display()).cyan());
            match outcome.result {
                Ok(report) => print_report(&report),
                Err(e) => println!(
                    "  {} {e:#}",
                    style(t!("common.error_prefix")).red().bold()
                ),
            }
        }

        Ok(())
    }

    fn build_organizer(&self) -> Organizer {
        Organizer::new(
            self.config.photo_type_table.clone(),
            self.config.settings.organize.clone(),
        )
    }

    /// 更新路徑歷史並儲存
    fn remember_path(&mut self, path: &str) {
        add_recent_path(&mut self.config.settings, path);
        if let Err(e) = save_settings(&self.config.settings) {
            warn!("無法儲存路徑歷史: {e:#}");
        }
    }

    fn prompt_input_path(&self) -> Result<Option<String>> {
        let recent_paths = &self.config.settings.recent_paths;

        // 沒有歷史路徑時直接輸入
        if recent_paths.is_empty() {
            return Ok(Some(prompt_new_path()?));
        }

        let mut options: Vec<String> = recent_paths
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let indicator = if Path::new(p).is_dir() { "✓" } else { "✗" };
                format!("{} [{}] {}", i + 1, indicator, p)
            })
            .collect();
        options.push(t!("organize.enter_new_path").to_string());

        println!("{}", style(t!("common.esc_hint")).dim());

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("organize.select_path"))
            .items(&options)
            .default(0)
            .interact_opt()?;

        match selection {
            None => Ok(None),
            Some(idx) if idx < recent_paths.len() => Ok(Some(recent_paths[idx].clone())),
            Some(_) => Ok(Some(prompt_new_path()?)),
        }
    }

    fn prompt_batch_paths(&mut self) -> Result<Vec<PathBuf>> {
        let mut roots: Vec<PathBuf> = Vec::new();

        loop {
            let path: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(t!("batch.prompt_path", index = roots.len() + 1))
                .allow_empty(true)
                .interact_text()?;
            let path = path.trim().to_string();

            if path.is_empty() {
                break;
            }

            match validate_directory_exists(Path::new(&path)) {
                Ok(()) => {
                    self.remember_path(&path);
                    roots.push(PathBuf::from(path));
                }
                Err(e) => println!("  {} {e}", style(t!("common.error_prefix")).red().bold()),
            }
        }

        Ok(roots)
    }
}

fn prompt_new_path() -> Result<String> {
    let path: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("organize.prompt_path"))
        .interact_text()?;
    Ok(path.trim().to_string())
}

fn confirm(prompt: &str) -> Result<bool> {
    let confirm = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(true)
        .interact()?;
    Ok(confirm)
}

fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .expect("Invalid progress bar template"),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn print_settings_summary(settings: &OrganizeSettings) {
    println!();
    println!(
        "  {} {}",
        style(t!("organize.summary_mode")).dim(),
        style(settings.organization_mode).cyan()
    );

    if settings.organization_mode == OrganizationMode::ByExtension {
        println!(
            "  {} {}",
            style(t!("organize.summary_naming")).dim(),
            settings.naming_mode
        );
        println!(
            "  {} {}",
            style(t!("organize.summary_date_folder")).dim(),
            settings.date_folder_format
        );
        if !settings.base_name.trim().is_empty() {
            println!(
                "  {} {}",
                style(t!("organize.summary_base_name")).dim(),
                settings.base_name
            );
        }
    }
    println!();
}

fn print_report(report: &OrganizeReport) {
    println!();
    println!("{}", style(t!("organize.result_title")).cyan().bold());
    println!(
        "  {}",
        t!("organize.result_moved", count = style(report.count()).green())
    );

    if report.unchanged > 0 {
        println!(
            "  {}",
            t!("organize.result_unchanged", count = style(report.unchanged).dim())
        );
    }

    if report.ignored > 0 {
        println!(
            "  {}",
            t!("organize.result_ignored", count = style(report.ignored).dim())
        );
    }

    if !report.failures.is_empty() {
        println!(
            "  {}",
            t!(
                "organize.result_failed",
                count = style(report.failures.len()).red()
            )
        );

        // 只顯示前 10 個
        let display_count = report.failures.len().min(10);
        for failure in report.failures.iter().take(display_count) {
            let file_name = failure
                .path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            println!(
                "    {} {} ({}): {}",
                style("✗").red(),
                file_name,
                failure.stage,
                style(&failure.reason).dim()
            );
        }
        if report.failures.len() > display_count {
            println!(
                "    {} ...{}",
                style("⋯").dim(),
                report.failures.len() - display_count
            );
        }
    }
}
