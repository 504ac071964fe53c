//! Subcommand handlers.
//!
//! Handlers print their result as JSON on stdout. Vault failures are returned
//! as an [`ErrorCode`](vellum_vault::ErrorCode) wrapped in `anyhow`.

pub mod auth;
pub mod content;
pub mod envelope;

use anyhow::Context;
use vellum_vault::config::CONFIG_FILE;

use crate::context::AppContext;

/// Create the data directory and write the current config.
pub fn init(ctx: &AppContext, force: bool) -> anyhow::Result<()> {
    let path = ctx.data_dir().join(CONFIG_FILE);
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    std::fs::create_dir_all(ctx.data_dir())
        .with_context(|| format!("creating {}", ctx.data_dir().display()))?;
    ctx.config()
        .save(ctx.data_dir())
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "config written");
    println!("{}", path.display());
    Ok(())
}
