//! Encrypted document decoding.
//!
//! A document is a sealed [`EncryptedData`] whose plaintext is markdown with
//! an optional front-matter header (see [`crate::frontmatter`]).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::task::JoinSet;
use vellum_crypto_core::{decrypt_data, EncryptedData};

use crate::config::DEFAULT_CONTENT_SUFFIXES;
use crate::error::{ErrorCode, VaultResult};
use crate::frontmatter::{self, Document, FieldValue};

/// Document metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretContentMeta {
    pub slug: String,
    pub title: String,
    pub published: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl SecretContentMeta {
    /// `slug` and `title` are non-empty.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.slug.trim().is_empty() && !self.title.trim().is_empty()
    }
}

/// A decrypted document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretContent {
    #[serde(flatten)]
    pub meta: SecretContentMeta,
    /// Markdown body.
    pub content: String,
}

/// One entry of a listing: a slug and its sealed document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedContentItem {
    pub slug: String,
    pub encrypted_data: EncryptedData,
}

/// Parse the JSON wire form of a sealed document.
///
/// # Errors
///
/// `INVALID_FORMAT` on malformed JSON, missing fields or empty fields.
pub fn parse_encrypted_data(json: &str) -> VaultResult<EncryptedData> {
    EncryptedData::from_json(json)
        .ok()
        .filter(EncryptedData::is_well_formed)
        .ok_or(ErrorCode::InvalidFormat)
}

/// Decrypt and parse a document.
///
/// Missing `title` falls back to the slug with dashes turned into spaces.
/// Missing or unparsable `published` falls back to now.
///
/// # Errors
///
/// - `INVALID_FORMAT` if `encrypted` is structurally malformed
/// - `DECRYPTION_FAILED` if it does not open with `passphrase`
/// - `VALIDATION_ERROR` if the result breaks the [`validate_secret_content`]
///   rule: an empty or whitespace-only body is rejected here, while
///   [`extract_content_metadata`] accepts it
pub fn decrypt_secret_content(
    encrypted: &EncryptedData,
    passphrase: &str,
    slug: &str,
) -> VaultResult<SecretContent> {
    let doc = open_document(encrypted, passphrase)?;
    let content = assemble(doc, slug, Utc::now());
    if !content.is_valid() {
        return Err(ErrorCode::ValidationError);
    }
    Ok(content)
}

/// Decrypt a document and keep only its metadata.
///
/// # Errors
///
/// As [`decrypt_secret_content`], except that an empty body is accepted.
pub fn extract_content_metadata(
    encrypted: &EncryptedData,
    passphrase: &str,
    slug: &str,
) -> VaultResult<SecretContentMeta> {
    let doc = open_document(encrypted, passphrase)?;
    let meta = assemble(doc, slug, Utc::now()).meta;
    if !meta.is_valid() {
        return Err(ErrorCode::ValidationError);
    }
    Ok(meta)
}

/// Decrypt the metadata of every item concurrently, newest first.
///
/// Items that fail are skipped. An empty input yields an empty list.
///
/// # Errors
///
/// `DECRYPTION_FAILED` when the input is non-empty and every item fails.
pub async fn process_content_list(
    items: Vec<EncryptedContentItem>,
    passphrase: &str,
) -> VaultResult<Vec<SecretContentMeta>> {
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let total = items.len();
    let passphrase: Arc<str> = Arc::from(passphrase);
    let mut tasks = JoinSet::new();
    for item in items {
        let passphrase = Arc::clone(&passphrase);
        tasks.spawn_blocking(move || {
            let result = extract_content_metadata(&item.encrypted_data, &passphrase, &item.slug);
            (item.slug, result)
        });
    }

    let mut metas = Vec::with_capacity(total);
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((_, Ok(meta))) => metas.push(meta),
            Ok((slug, Err(code))) => tracing::debug!(%slug, %code, "skipping item"),
            Err(e) => tracing::warn!("content task failed: {e}"),
        }
    }

    if metas.is_empty() {
        tracing::debug!(total, "no item in the list decrypted");
        return Err(ErrorCode::DecryptionFailed);
    }
    metas.sort_by(|a, b| b.published.cmp(&a.published));
    Ok(metas)
}

/// Slug for a document file, using the default suffixes.
///
/// `posts/My Post.secret.md` → `my-post`.
#[must_use]
pub fn extract_slug_from_filename(filename: &str) -> String {
    extract_slug_with(filename, &DEFAULT_CONTENT_SUFFIXES)
}

/// Slug for a document file: drop any directory part, strip the first
/// matching suffix, slugify.
#[must_use]
pub fn extract_slug_with<S: AsRef<str>>(filename: &str, suffixes: &[S]) -> String {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let stem = suffixes
        .iter()
        .find_map(|s| name.strip_suffix(s.as_ref()))
        .unwrap_or(name);
    slugify(stem)
}

fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_dash = false;
    for c in s.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

impl SecretContent {
    /// Typed counterpart of [`validate_secret_content`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.meta.is_valid() && !self.content.trim().is_empty()
    }
}

/// Structural check of an untyped document: `slug`, `title` and `content`
/// are non-empty strings, `published` is a date, and `updated`/`tags` are a
/// date and a string array when present.
#[must_use]
pub fn validate_secret_content(value: &Value) -> bool {
    let non_empty = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty())
    };
    let is_date = |v: &Value| v.as_str().and_then(frontmatter::parse_date).is_some();
    let optional = |key: &str, check: &dyn Fn(&Value) -> bool| {
        value.get(key).map_or(true, |v| v.is_null() || check(v))
    };

    value.is_object()
        && non_empty("slug")
        && non_empty("title")
        && non_empty("content")
        && value.get("published").is_some_and(is_date)
        && optional("updated", &is_date)
        && optional("tags", &|v| {
            v.as_array()
                .is_some_and(|items| items.iter().all(Value::is_string))
        })
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn open_document(encrypted: &EncryptedData, passphrase: &str) -> VaultResult<Document> {
    if !encrypted.is_well_formed() {
        return Err(ErrorCode::InvalidFormat);
    }
    let plaintext =
        decrypt_data(encrypted, passphrase).map_err(|_| ErrorCode::DecryptionFailed)?;
    Ok(frontmatter::parse(&plaintext))
}

const KNOWN_FIELDS: [&str; 4] = ["title", "published", "updated", "tags"];

fn assemble(doc: Document, slug: &str, now: DateTime<Utc>) -> SecretContent {
    let title = doc
        .get("title")
        .and_then(FieldValue::as_text)
        .filter(|t| !t.trim().is_empty())
        .map_or_else(|| slug.replace('-', " "), str::to_owned);
    let published = doc
        .get("published")
        .and_then(FieldValue::as_date)
        .unwrap_or(now);
    let updated = doc.get("updated").and_then(FieldValue::as_date);
    let tags = doc.get("tags").and_then(FieldValue::as_list);
    for (key, _) in doc.fields().filter(|(k, _)| !KNOWN_FIELDS.contains(k)) {
        tracing::debug!(%slug, key, "ignoring header field");
    }

    SecretContent {
        meta: SecretContentMeta {
            slug: slug.to_owned(),
            title,
            published,
            updated,
            tags,
        },
        content: doc.body,
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
