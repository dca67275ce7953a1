// Account commands: login, logout, register, and OTP verification

use anyhow::{anyhow, Result};
use crate::api::ApiError;
use crate::cli::commands::View;
use crate::cli::error::{user_error, validate_email, validate_non_empty, validate_otp, validate_password};
use crate::config::Session;

const PASSWORD_PROMPT: &str = "Password (input is visible): ";

/// Read a password from stdin when it was not given on the command line.
/// Input is echoed; pass --password from a secret store to avoid that.
fn prompt_password(given: Option<String>) -> Result<String> {
    if let Some(password) = given {
        return Ok(password);
    }
    eprint!("{}", PASSWORD_PROMPT);
    std::io::Write::flush(&mut std::io::stderr())
        .map_err(|e| anyhow!("Failed to flush stderr: {}", e))?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)
        .map_err(|e| anyhow!("Failed to read input: {}", e))?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

fn check_email(email: &str) {
    if let Err(e) = validate_email(email) {
        user_error(&e);
    }
}

pub fn handle_login(email: String, password: Option<String>) -> Result<()> {
    let email = email.trim().to_string();
    check_email(&email);
    let password = prompt_password(password)?;
    if let Err(e) = validate_non_empty(&password, "Password") {
        user_error(&e);
    }

    let view = View::open()?;
    let response = match view.block_on(view.client.login(&email, &password)) {
        Ok(r) => r,
        Err(ApiError::Unauthorized) => user_error("Invalid email or password"),
        Err(e) => return Err(e.into()),
    };

    let session = Session {
        token: response.token,
        display_name: response.name.filter(|n| !n.trim().is_empty()),
        email: Some(email.clone()),
    };
    session.save()?;
    log::debug!("Saved session to {}", Session::path()?.display());

    println!("Logged in as {}", session.display_name.as_deref().unwrap_or(&email));
    Ok(())
}

pub fn handle_logout() -> Result<()> {
    if Session::clear()? {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

pub fn handle_register(email: String, name: String, password: Option<String>) -> Result<()> {
    let email = email.trim().to_string();
    check_email(&email);
    if let Err(e) = validate_non_empty(&name, "Name") {
        user_error(&e);
    }
    let password = prompt_password(password)?;
    if let Err(e) = validate_password(&password) {
        user_error(&e);
    }

    let view = View::open()?;
    let message = view.block_on(view.client.register(name.trim(), &email, &password))?;
    println!("Registered {}. Check your email for the verification code.", email);
    if let Some(message) = message {
        println!("{}", message);
    }
    println!("Then run: rekrut verify {} <code>", email);
    Ok(())
}

pub fn handle_verify(email: String, otp: String) -> Result<()> {
    let email = email.trim().to_string();
    check_email(&email);
    if let Err(e) = validate_otp(&otp) {
        user_error(&e);
    }

    let view = View::open()?;
    let message = view.block_on(view.client.verify_otp(&email, otp.trim()))?;
    println!("{}", message.unwrap_or_else(|| format!("Account {} verified.", email)));
    Ok(())
}

pub fn handle_resend_otp(email: String) -> Result<()> {
    let email = email.trim().to_string();
    check_email(&email);

    let view = View::open()?;
    let message = match view.block_on(view.client.resend_otp(&email)) {
        Ok(m) => m,
        Err(ApiError::RateLimited) => user_error("Too many requests. Wait a minute before asking for a new code."),
        Err(e) => return Err(e.into()),
    };
    println!("{}", message.unwrap_or_else(|| format!("A new code was sent to {}.", email)));
    Ok(())
}
