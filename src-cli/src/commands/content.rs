//! Listing and reading sealed documents. Both require a live session.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use vellum_vault::{
    decrypt_secret_content, extract_slug_with, parse_encrypted_data, process_content_list,
    sanitize_content, EncryptedContentItem, ErrorCode,
};

use crate::context::AppContext;

/// Print metadata for every readable document in `dir`, newest first.
pub async fn list(ctx: &AppContext, dir: &Path, passphrase: &str) -> anyhow::Result<()> {
    ctx.require_session()?;
    let items = scan(ctx, dir)?;
    let metas = process_content_list(items, passphrase).await?;
    println!("{}", serde_json::to_string_pretty(&metas)?);
    Ok(())
}

/// Print one document as JSON.
pub fn show(
    ctx: &AppContext,
    dir: &Path,
    slug: &str,
    passphrase: &str,
    sanitize: bool,
) -> anyhow::Result<()> {
    ctx.require_session()?;
    let item = scan(ctx, dir)?
        .into_iter()
        .find(|item| item.slug == slug)
        .ok_or(ErrorCode::ContentNotFound)?;
    let mut content = decrypt_secret_content(&item.encrypted_data, passphrase, &item.slug)?;
    if sanitize {
        content.content = sanitize_content(&content.content);
    }
    println!("{}", serde_json::to_string_pretty(&content)?);
    Ok(())
}

/// Sealed documents in `dir`, recognized by the configured suffixes.
/// Files that do not parse as a sealed record are skipped.
fn scan(ctx: &AppContext, dir: &Path) -> anyhow::Result<Vec<EncryptedContentItem>> {
    let suffixes = &ctx.config().content_suffixes;
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("reading {}", dir.display()))?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| suffixes.iter().any(|s| n.ends_with(s.as_str())))
        })
        .collect();
    paths.sort();

    let mut items = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let slug = extract_slug_with(name, suffixes);
        let parsed = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| parse_encrypted_data(&raw).ok());
        match parsed {
            Some(encrypted_data) => items.push(EncryptedContentItem {
                slug,
                encrypted_data,
            }),
            None => tracing::warn!(path = %path.display(), "skipping unreadable document"),
        }
    }
    Ok(items)
}
