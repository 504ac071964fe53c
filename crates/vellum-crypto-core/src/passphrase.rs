//! Three-word passphrases and the user directory that holds them.
//!
//! All functions here are pure: no I/O, no randomness.

use serde_json::{Map, Value};

/// Number of words in a passphrase.
pub const PASSPHRASE_WORD_COUNT: usize = 3;

/// `true` when `words` holds exactly three entries, each non-empty after trim.
#[must_use]
pub fn is_valid_passphrase<S: AsRef<str>>(words: &[S]) -> bool {
    words.len() == PASSPHRASE_WORD_COUNT && words.iter().all(|w| !w.as_ref().trim().is_empty())
}

/// Trim and lowercase every word, then join with single spaces.
#[must_use]
pub fn normalize_passphrase<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(|w| w.as_ref().trim().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trim and lowercase a user identifier.
#[must_use]
pub fn normalize_identifier(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}

/// `true` when `value` is a JSON object mapping non-empty identifiers to
/// valid three-word passphrases.
#[must_use]
pub fn is_valid_secret_users(value: &Value) -> bool {
    let Some(map) = value.as_object() else {
        return false;
    };
    map.iter().all(|(identifier, words)| {
        !identifier.trim().is_empty()
            && words.as_array().is_some_and(|arr| {
                arr.iter().all(Value::is_string)
                    && is_valid_passphrase(&arr.iter().filter_map(Value::as_str).collect::<Vec<_>>())
            })
    })
}

// ---------------------------------------------------------------------------
// SecretUsers
// ---------------------------------------------------------------------------

/// Validated user directory, in the order the entries were written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SecretUsers {
    entries: Vec<(String, [String; PASSPHRASE_WORD_COUNT])>,
}

impl SecretUsers {
    /// Build a directory from untyped JSON.
    ///
    /// Returns `None` unless [`is_valid_secret_users`] accepts `value`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        if !is_valid_secret_users(value) {
            return None;
        }
        let entries = value
            .as_object()?
            .iter()
            .map(|(identifier, words)| {
                let words = words.as_array()?;
                let [a, b, c] = words.as_slice() else {
                    return None;
                };
                Some((
                    identifier.clone(),
                    [
                        a.as_str()?.to_owned(),
                        b.as_str()?.to_owned(),
                        c.as_str()?.to_owned(),
                    ],
                ))
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self { entries })
    }

    /// Parse a JSON document into a directory.
    ///
    /// Returns `None` on malformed JSON or a shape mismatch.
    #[must_use]
    pub fn from_json(json: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(json).ok()?;
        Self::from_value(&value)
    }

    /// Add or replace a user. Returns `false` (and changes nothing) when the
    /// identifier is blank or the words are not a valid passphrase.
    pub fn insert(&mut self, identifier: &str, words: [String; PASSPHRASE_WORD_COUNT]) -> bool {
        if identifier.trim().is_empty() || !is_valid_passphrase(&words) {
            return false;
        }
        if let Some(entry) = self.entries.iter_mut().find(|(id, _)| id == identifier) {
            entry.1 = words;
        } else {
            self.entries.push((identifier.to_owned(), words));
        }
        true
    }

    /// Entries in directory order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String; PASSPHRASE_WORD_COUNT])> {
        self.entries.iter().map(|(id, words)| (id.as_str(), words))
    }

    /// Number of users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the directory has no users.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as the JSON object form `{"id": ["w1", "w2", "w3"]}`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(id, words)| {
                (
                    id.clone(),
                    Value::Array(words.iter().cloned().map(Value::String).collect()),
                )
            })
            .collect();
        Value::Object(map)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
