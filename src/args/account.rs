//! Command-line session commands: login, register, logout, whoami.

use std::path::PathBuf;

use zeroize::Zeroizing;

use super::Context;
use super::render::user_details;
use crate::sources::ApiError;

/// What: Sign in, prompting for the password on the terminal.
///
/// # Errors
/// - `MissingInput` when the password cannot be read or is empty; the backend error otherwise.
pub async fn handle_login(ctx: &Context, email: &str) -> Result<(), ApiError> {
    tracing::info!(email, "Login requested from CLI");
    let password = prompt_password()?;
    ctx.auth.login(email, &password).await?;
    let name = ctx
        .auth
        .snapshot()
        .user()
        .map(|u| u.user_name.clone())
        .unwrap_or_default();
    println!("Signed in as {name} <{email}>");
    Ok(())
}

/// What: Register a new account, prompting for the password on the terminal.
///
/// # Errors
/// - `MissingInput` for an empty photo or password; the backend error otherwise.
pub async fn handle_register(
    ctx: &Context,
    email: &str,
    user_name: &str,
    photo: PathBuf,
) -> Result<(), ApiError> {
    tracing::info!(email, user_name, "Registration requested from CLI");
    if photo.as_os_str().is_empty() {
        return Err(ApiError::MissingInput("Profile photo"));
    }
    let password = prompt_password()?;
    ctx.auth.register(email, &password, user_name, photo).await?;
    println!("Account created. Signed in as {user_name} <{email}>");
    Ok(())
}

/// Clear the stored session.
///
/// # Errors
/// - `ApiError::Storage` when the stored session could not be removed.
pub fn handle_logout(ctx: &Context) -> Result<(), ApiError> {
    ctx.auth.logout()?;
    println!("Signed out");
    Ok(())
}

/// Print the signed-in user, or a hint when there is no session.
pub fn handle_whoami(ctx: &Context) {
    let snap = ctx.auth.snapshot();
    match snap.user().filter(|_| snap.is_authenticated()) {
        Some(user) => println!("{}", user_details(user)),
        None => println!("Not signed in. Use --login EMAIL to sign in."),
    }
}

fn prompt_password() -> Result<Zeroizing<String>, ApiError> {
    let password = rpassword::prompt_password("Password: ").map_err(|e| {
        tracing::warn!(error = %e, "[Cli] failed to read password");
        ApiError::MissingInput("Password")
    })?;
    if password.is_empty() {
        return Err(ApiError::MissingInput("Password"));
    }
    Ok(Zeroizing::new(password))
}
