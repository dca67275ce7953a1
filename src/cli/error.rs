// Error handling utilities for consistent error messages and exit codes

use std::process;

/// Exit with a user error (exit code 1)
/// User errors are for invalid input, missing resources, etc.
pub fn user_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Exit with an internal error (exit code >1)
/// Internal errors are for portal failures, unreadable local files, etc.
pub fn internal_error(message: &str) -> ! {
    eprintln!("Internal error: {}", message);
    process::exit(2);
}

/// Validate that a string is not empty
pub fn validate_non_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate a portal identifier (job or application id)
pub fn validate_id(id: &str, kind: &str) -> Result<(), String> {
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("{} ID cannot be empty", kind));
    }
    if id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        Ok(())
    } else {
        Err(format!("Invalid {} ID: '{}'. IDs can only contain letters, numbers, hyphens, and underscores.", kind.to_lowercase(), id))
    }
}

/// Validate an email address (shape only, the portal has the final say)
pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.') => Ok(()),
        _ => Err(format!("Invalid email address: '{}'", email)),
    }
}

/// Validate a one-time password: 4 to 8 digits
pub fn validate_otp(otp: &str) -> Result<(), String> {
    let otp = otp.trim();
    if (4..=8).contains(&otp.len()) && otp.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(format!("Invalid OTP: '{}'. The code is 4 to 8 digits.", otp))
    }
}

/// Validate a password before sending it for registration
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < 8 {
        Err("Password must be at least 8 characters".to_string())
    } else {
        Ok(())
    }
}
