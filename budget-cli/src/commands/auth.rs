//! Login, signup, logout and status commands

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use budget_core::controllers::AuthState;

use super::{get_context, get_password_or_prompt, with_spinner, App};
use crate::output;

pub async fn login(email: &str, password: Option<String>, remember: bool) -> Result<()> {
    let password = get_password_or_prompt(password, "Password")?;
    let app = App::start()?;
    let auth = app.ctx.auth_controller();

    with_spinner("Logging in...", auth.login(email, &password, remember)).await;

    match auth.state() {
        AuthState::LoginSuccess => {
            output::success(&format!("Logged in as {}", auth.user_name()));
            if !remember {
                output::warning(
                    "Session not remembered; it ends with this command. Use --remember to stay logged in.",
                );
            }
            auth.reset_state();
            Ok(())
        }
        AuthState::Error(message) => anyhow::bail!(message),
        other => anyhow::bail!("Unexpected login state: {:?}", other),
    }
}

pub async fn signup(
    name: &str,
    email: &str,
    password: Option<String>,
    image: Option<&Path>,
) -> Result<()> {
    let password = get_password_or_prompt(password, "Choose a password")?;
    let ctx = get_context()?;
    let auth = ctx.auth_controller();

    with_spinner("Creating account...", auth.sign_up(name, email, &password, image)).await;

    match auth.state() {
        AuthState::SignUpSuccess => {
            output::success("Account created");
            println!("Run `bt login --remember {}` to sign in.", email.trim());
            auth.reset_state();
            Ok(())
        }
        AuthState::Error(message) => anyhow::bail!(message),
        other => anyhow::bail!("Unexpected signup state: {:?}", other),
    }
}

pub fn logout() -> Result<()> {
    let ctx = get_context()?;
    let auth = ctx.auth_controller();
    auth.logout();
    output::toast(&auth.toast());
    Ok(())
}

pub fn status(json: bool) -> Result<()> {
    let app = App::start()?;
    let session = app.ctx.credentials.session()?;
    let route = app.nav.current();

    if json {
        let cached = app.ctx.profile_repository.cached_profile()?;
        let status = json!({
            "authenticated": app.is_authenticated(),
            "rememberMe": session.remember_me,
            "route": route.as_str(),
            "baseUrl": app.ctx.config.base_url,
            "user": app.is_authenticated().then(|| json!({
                "name": cached.name,
                "email": cached.email,
                "imageUrl": cached.image_url,
            })),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "Budget Tracker Status".bold());
    println!();

    let mut table = output::create_table();
    table.add_row(vec!["Server", app.ctx.config.base_url.as_str()]);
    if app.is_authenticated() {
        let cached = app.ctx.profile_repository.cached_profile()?;
        table.add_row(vec!["Session", "active (remembered)"]);
        table.add_row(vec!["Name", cached.name.as_str()]);
        table.add_row(vec!["Email", cached.email.as_str()]);
        if let Some(image) = &cached.image_url {
            table.add_row(vec!["Image", image.as_str()]);
        }
    } else {
        table.add_row(vec!["Session", "not logged in"]);
    }
    println!("{}", table);

    Ok(())
}
