//! Config command - show or change client settings

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use budget_core::config::{Config, SETTINGS_FILENAME};

use super::get_data_dir;
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current settings (default)
    Show,
    /// Change settings
    Set {
        /// API server URL
        #[arg(long, conflicts_with = "reset_base_url")]
        base_url: Option<String>,
        /// Where downloaded reports are saved
        #[arg(long)]
        downloads_dir: Option<PathBuf>,
        /// Go back to the default API server
        #[arg(long)]
        reset_base_url: bool,
    },
}

pub fn run(command: Option<ConfigCommands>) -> Result<()> {
    let data_dir = get_data_dir()?;
    let mut config = Config::load(&data_dir)?;

    match command.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => {
            println!("{}", "Settings".bold());
            println!();
            let mut table = output::create_table();
            table.add_row(vec!["Server".to_string(), config.base_url.clone()]);
            table.add_row(vec![
                "Downloads".to_string(),
                config.downloads_dir.display().to_string(),
            ]);
            table.add_row(vec![
                "Toast duration".to_string(),
                format!("{} ms", config.toast_duration.as_millis()),
            ]);
            table.add_row(vec![
                "Data directory".to_string(),
                data_dir.display().to_string(),
            ]);
            println!("{}", table);
        }
        ConfigCommands::Set {
            base_url,
            downloads_dir,
            reset_base_url,
        } => {
            if base_url.is_none() && downloads_dir.is_none() && !reset_base_url {
                anyhow::bail!("Nothing to change. See `bt config set --help`.");
            }
            if base_url.is_some() || reset_base_url {
                config.set_base_url(base_url.as_deref())?;
            }
            if let Some(dir) = downloads_dir {
                config.set_downloads_dir(dir);
            }
            config.save(&data_dir)?;
            output::success(&format!(
                "Saved {}",
                data_dir.join(SETTINGS_FILENAME).display()
            ));
        }
    }

    Ok(())
}
