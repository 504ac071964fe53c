//! Login and session subcommands.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde_json::json;
use vellum_vault::{parse_encrypted_data, validate_auth_form, AuthService, ErrorCode};

use crate::context::AppContext;

/// Check the words against the sealed directory and start a session.
pub fn login(
    ctx: &AppContext,
    users: &Path,
    identifier: &str,
    words: &[String],
    master_password: &str,
) -> anyhow::Result<()> {
    let raw = fs::read_to_string(users).with_context(|| format!("reading {}", users.display()))?;
    let directory = parse_encrypted_data(&raw)?;

    let form = validate_auth_form(&json!({
        "identifier": identifier,
        "word1": words.first(),
        "word2": words.get(1),
        "word3": words.get(2),
    }))
    .ok_or(ErrorCode::ValidationError)?;

    let service = AuthService::new(ctx.sessions());
    let state = service.login(&directory, &form, master_password)?;
    println!(
        "{}",
        json!({"success": true, "userIdentifier": state.user_identifier, "sessionExpiry": state.session_expiry})
    );
    Ok(())
}

/// Print the current session.
pub fn status(ctx: &AppContext) -> anyhow::Result<()> {
    let active = ctx.sessions().get_session()?;
    println!(
        "{}",
        json!({"valid": true, "userIdentifier": active.user_identifier, "sessionExpiry": active.expires_at})
    );
    Ok(())
}

/// Push the session expiry forward.
pub fn extend(ctx: &AppContext) -> anyhow::Result<()> {
    if !ctx.sessions().extend_session() {
        return Err(ErrorCode::SessionExpired.into());
    }
    status(ctx)
}

pub fn logout(ctx: &AppContext) {
    ctx.sessions().clear_session();
    println!("{}", json!({"success": true}));
}
