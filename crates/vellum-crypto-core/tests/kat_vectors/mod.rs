mod aes_gcm;
mod pbkdf2_sha256;

/// Decode a lowercase hex literal.
pub fn hex(s: &str) -> Vec<u8> {
    data_encoding::HEXLOWER.decode(s.as_bytes()).expect("valid hex literal")
}
