//! Profile commands

use std::path::PathBuf;

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use colored::Colorize;
use serde_json::json;

use budget_core::controllers::{ProfileController, ProfileData};

use super::{get_password_or_prompt, with_spinner, App};
use crate::output;

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show your profile
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update name, phone or address (unset fields keep their value)
    Update {
        #[arg(long)]
        name: Option<String>,
        /// Phone number (empty string clears it)
        #[arg(long)]
        phone: Option<String>,
        /// Address (empty string clears it)
        #[arg(long)]
        address: Option<String>,
    },
    /// Change your password
    Password {
        /// Current password (prompted when omitted)
        #[arg(long, hide_env_values = true, env = "BUDGET_OLD_PASSWORD")]
        old: Option<String>,
        /// New password (prompted when omitted)
        #[arg(long, hide_env_values = true, env = "BUDGET_NEW_PASSWORD")]
        new: Option<String>,
    },
    /// Upload a new profile image
    Image { path: PathBuf },
    /// Turn download notifications on or off
    Notifications { state: Toggle },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

pub async fn run(command: ProfileCommands) -> Result<()> {
    let mut app = App::start()?;
    app.require_session()?;
    let profile = app.ctx.profile_controller();

    let result = match command {
        ProfileCommands::Show { json } => {
            with_spinner("Loading profile...", profile.load_profile()).await;
            show(&profile, json)
        }
        ProfileCommands::Update {
            name,
            phone,
            address,
        } => {
            let from_server = with_spinner("Loading profile...", profile.load_profile()).await;
            let (name, phone, address) =
                merge_update(name, phone, address, profile.profile_data(), from_server)?;

            let ok = with_spinner(
                "Saving profile...",
                profile.update_profile(&name, &phone, &address),
            )
            .await;
            report_toast(&profile, ok)
        }
        ProfileCommands::Password { old, new } => {
            let old = get_password_or_prompt(old, "Current password")?;
            let new = get_password_or_prompt(new, "New password")?;
            let ok = with_spinner("Changing password...", profile.change_password(&old, &new)).await;
            report_toast(&profile, ok)
        }
        ProfileCommands::Image { path } => {
            let ok = with_spinner("Uploading image...", profile.upload_image(&path)).await;
            if ok {
                if let Some(url) = profile.profile_data().profile_image_url {
                    println!("{}", url);
                }
            }
            report_toast(&profile, ok)
        }
        ProfileCommands::Notifications { state } => {
            let enabled = matches!(state, Toggle::On);
            profile.toggle_notification(enabled)?;
            output::success(if enabled {
                "Download notifications enabled"
            } else {
                "Download notifications disabled"
            });
            Ok(())
        }
    };

    app.finish()?;
    result
}

fn show(profile: &ProfileController, json: bool) -> Result<()> {
    let data = profile.profile_data();

    if json {
        let value = json!({
            "fullName": data.full_name,
            "email": data.email,
            "phoneNumber": data.phone_number,
            "address": data.address,
            "profileImageUrl": data.profile_image_url,
            "notificationsEnabled": profile.notification_enabled(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", data.full_name.bold());
    println!();

    let dash = "-".to_string();
    let or_dash = |s: &String| if s.is_empty() { dash.clone() } else { s.clone() };

    let mut table = output::create_table();
    table.add_row(vec!["Email".to_string(), data.email.clone()]);
    table.add_row(vec!["Phone".to_string(), or_dash(&data.phone_number)]);
    table.add_row(vec!["Address".to_string(), or_dash(&data.address)]);
    table.add_row(vec![
        "Image".to_string(),
        data.profile_image_url.clone().unwrap_or_else(|| dash.clone()),
    ]);
    table.add_row(vec![
        "Notifications".to_string(),
        if profile.notification_enabled() { "on" } else { "off" }.to_string(),
    ]);
    println!("{}", table);
    Ok(())
}

/// Fill unset fields from the current profile
///
/// The update replaces every field, so a profile that only came from the
/// local cache (no phone or address) cannot be used to fill gaps.
fn merge_update(
    name: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    current: ProfileData,
    from_server: bool,
) -> Result<(String, String, String)> {
    if let (Some(name), Some(phone), Some(address)) = (&name, &phone, &address) {
        return Ok((name.clone(), phone.clone(), address.clone()));
    }
    if !from_server {
        anyhow::bail!(
            "Could not load your profile from the server. Pass --name, --phone and --address to update anyway."
        );
    }
    Ok((
        name.unwrap_or(current.full_name),
        phone.unwrap_or(current.phone_number),
        address.unwrap_or(current.address),
    ))
}

fn report_toast(profile: &ProfileController, ok: bool) -> Result<()> {
    let toast = profile.toast();
    if !ok {
        anyhow::bail!(toast.message);
    }
    output::toast(&toast);
    Ok(())
}
