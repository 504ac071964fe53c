//! Build-time sealing: documents and the user directory.

use std::fs;
use std::path::Path;

use anyhow::Context;
use vellum_crypto_core::{
    decrypt_data, encrypt_data, EncryptedData, SecretUsers, PASSPHRASE_WORD_COUNT,
};
use vellum_vault::{parse_encrypted_data, ErrorCode};

/// Seal `input` under `passphrase`.
pub fn encrypt(input: &Path, output: Option<&Path>, passphrase: &str) -> anyhow::Result<()> {
    let plaintext = read(input)?;
    let sealed = encrypt_data(&plaintext, passphrase)?;
    emit(&sealed, output)
}

/// Open a sealed document and print its plaintext.
pub fn decrypt(input: &Path, passphrase: &str) -> anyhow::Result<()> {
    let sealed = parse_encrypted_data(&read(input)?)?;
    let plaintext = decrypt_data(&sealed, passphrase).map_err(|_| ErrorCode::DecryptionFailed)?;
    println!("{plaintext}");
    Ok(())
}

/// Validate a plaintext user directory, then seal it under the master password.
pub fn encrypt_users(
    input: &Path,
    output: Option<&Path>,
    master_password: &str,
) -> anyhow::Result<()> {
    let users = SecretUsers::from_json(&read(input)?).ok_or(ErrorCode::ValidationError)?;
    tracing::info!(users = users.len(), "sealing user directory");
    let sealed = encrypt_data(&users.to_value().to_string(), master_password)?;
    emit(&sealed, output)
}

/// Add or replace one user in a sealed directory, resealing it in place.
/// A missing file starts an empty directory.
pub fn add_user(
    users_path: &Path,
    identifier: &str,
    words: &[String],
    master_password: &str,
) -> anyhow::Result<()> {
    let mut users = if users_path.exists() {
        let sealed = parse_encrypted_data(&read(users_path)?)?;
        let plaintext =
            decrypt_data(&sealed, master_password).map_err(|_| ErrorCode::DecryptionFailed)?;
        SecretUsers::from_json(&plaintext).ok_or(ErrorCode::ValidationError)?
    } else {
        SecretUsers::default()
    };

    let words: [String; PASSPHRASE_WORD_COUNT] = words
        .to_vec()
        .try_into()
        .map_err(|_| ErrorCode::ValidationError)?;
    if !users.insert(identifier, words) {
        return Err(ErrorCode::ValidationError.into());
    }
    tracing::info!(users = users.len(), "sealing user directory");
    let sealed = encrypt_data(&users.to_value().to_string(), master_password)?;
    emit(&sealed, Some(users_path))
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn emit(sealed: &EncryptedData, output: Option<&Path>) -> anyhow::Result<()> {
    let json = sealed.to_json()?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "sealed");
        }
        None => println!("{json}"),
    }
    Ok(())
}
