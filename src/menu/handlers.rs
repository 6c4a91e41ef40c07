use crate::component::PhotoOrganizer;
use crate::config::Config;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use rust_i18n::t;

pub fn run_photo_organizer(term: &Term, config: &mut Config) -> Result<()> {
    let mut organizer = PhotoOrganizer::new(config);

    if let Err(e) = organizer.run() {
        eprintln!("{} {e:#}", style(t!("common.error_prefix")).red().bold());
    }

    pause(term)?;
    Ok(())
}

pub fn run_batch_organizer(term: &Term, config: &mut Config) -> Result<()> {
    let mut organizer = PhotoOrganizer::new(config);

    if let Err(e) = organizer.run_batch() {
        eprintln!("{} {e:#}", style(t!("common.error_prefix")).red().bold());
    }

    pause(term)?;
    Ok(())
}
