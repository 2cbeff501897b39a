//! Register and login commands - the one-shot versions of the account screens

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Password};
use marketplace_core::{Credentials, EntryPoint, LogEvent};

use super::{get_context, get_logger, log_event};

/// Take the flag value or ask for it
fn username_or_prompt(username: Option<String>) -> Result<String> {
    match username {
        Some(u) => Ok(u),
        None => Ok(Input::new()
            .with_prompt("Username")
            .allow_empty(true)
            .interact_text()?),
    }
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    match password {
        Some(p) => Ok(p),
        None => Ok(Password::new()
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()?),
    }
}

pub fn register(username: Option<String>, password: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger(EntryPoint::Cli);

    let username = username_or_prompt(username)?;
    let password = password_or_prompt(password)?;

    match ctx.auth_service.register(&Credentials::new(&username, &password)) {
        Ok(user) => {
            log_event(&logger, LogEvent::new("user_registered").with_command("register"));
            if json {
                println!("{}", serde_json::to_string_pretty(&user)?);
            } else {
                println!("{}", "Registered successfully! Please login.".green());
            }
            Ok(())
        }
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new("register_failed")
                    .with_command("register")
                    .with_error(e.to_string())
                    .with_error_details(format!("{:?}", e)),
            );
            Err(e.into())
        }
    }
}

pub fn login(username: Option<String>, password: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger(EntryPoint::Cli);

    let username = username_or_prompt(username)?;
    let password = password_or_prompt(password)?;

    match ctx.auth_service.login(&Credentials::new(&username, &password)) {
        Ok(user) => {
            log_event(&logger, LogEvent::new("login_succeeded").with_command("login"));
            if json {
                println!("{}", serde_json::to_string_pretty(&user)?);
            } else {
                println!("{} {}", "Logged in as".green(), user.username.bold());
            }
            Ok(())
        }
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new("login_failed")
                    .with_command("login")
                    .with_error(e.to_string())
                    .with_error_details(format!("{:?}", e)),
            );
            Err(e.into())
        }
    }
}
