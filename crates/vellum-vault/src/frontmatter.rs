//! Minimal front-matter dialect for decrypted documents.
//!
//! ```text
//! ---
//! title: "Quoted or bare"
//! published: 2024-01-01
//! tags: [a, b, c]
//! ---
//! Body text
//! ```
//!
//! One `key: value` per line, no nesting. Lines without a colon are skipped.
//! A document without a complete header is all body.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DELIMITER: &str = "---";

/// A header value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    /// Quoted string, or a bare scalar that is not a date.
    Text(String),
    /// `[a, b, c]`; items trimmed, quotes stripped, empties dropped.
    List(Vec<String>),
    /// Bare scalar that parsed as a date. `raw` keeps the source text.
    Date { raw: String, at: DateTime<Utc> },
}

impl FieldValue {
    /// Scalar text. Dates yield their source text, lists yield `None`.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Date { raw: s, .. } => Some(s),
            Self::List(_) => None,
        }
    }

    /// Date value. Quoted strings are parsed too.
    #[must_use]
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date { at, .. } => Some(*at),
            Self::Text(s) => parse_date(s),
            Self::List(_) => None,
        }
    }

    /// List items. A non-empty scalar counts as a one-item list.
    #[must_use]
    pub fn as_list(&self) -> Option<Vec<String>> {
        match self {
            Self::List(items) => Some(items.clone()),
            other => other
                .as_text()
                .filter(|s| !s.is_empty())
                .map(|s| vec![s.to_owned()]),
        }
    }
}

/// A document split into header fields and body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    fields: Vec<(String, FieldValue)>,
    /// Everything after the closing delimiter, trimmed.
    pub body: String,
}

impl Document {
    /// Value for `key`. When a key repeats, the last one wins.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Header fields in source order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Split `text` into header and body. A leading byte-order mark is ignored.
#[must_use]
pub fn parse(text: &str) -> Document {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let whole_body = || Document {
        fields: Vec::new(),
        body: text.trim().to_owned(),
    };

    let mut lines = text.split_inclusive('\n');
    match lines.next() {
        Some(first) if first.trim_end() == DELIMITER => {
            let mut offset = first.len();
            let mut fields = Vec::new();
            for line in lines {
                offset = offset.saturating_add(line.len());
                if line.trim_end() == DELIMITER {
                    return Document {
                        fields,
                        body: text.get(offset..).unwrap_or_default().trim().to_owned(),
                    };
                }
                if let Some(field) = parse_line(line) {
                    fields.push(field);
                }
            }
            whole_body()
        }
        _ => whole_body(),
    }
}

fn parse_line(line: &str) -> Option<(String, FieldValue)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_owned(), parse_value(value.trim())))
}

fn parse_value(value: &str) -> FieldValue {
    if let Some(inner) = unquote(value) {
        return FieldValue::Text(inner.to_owned());
    }
    if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        let items = inner
            .split(',')
            .map(|item| {
                let item = item.trim();
                unquote(item).unwrap_or(item).to_owned()
            })
            .filter(|item| !item.is_empty())
            .collect();
        return FieldValue::List(items);
    }
    match parse_date(value) {
        Some(at) => FieldValue::Date {
            raw: value.to_owned(),
            at,
        },
        None => FieldValue::Text(value.to_owned()),
    }
}

fn unquote(value: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|q| {
        value
            .strip_prefix(q)
            .and_then(|v| v.strip_suffix(q))
    })
}

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"];

/// Parse a header date.
///
/// Accepts RFC 3339, RFC 2822 (`Fri, 05 Jan 2024 10:00:00 GMT`),
/// `YYYY-MM-DD[T ]HH:MM:SS`, `YYYY-MM-DD`, `YYYY/MM/DD` and
/// `January 5, 2024` / `Jan 5, 2024`. Forms without an offset are read as UTC
/// and bare dates as midnight.
#[must_use]
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(naive.and_utc());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
