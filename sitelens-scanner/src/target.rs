use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use url::Url;

const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// An absolute website address that starts with `http://` or `https://`.
///
/// Holds the text exactly as the user typed it (trimmed, prefixed when the
/// scheme was missing) next to its parsed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct NormalizedUrl {
    raw: String,
    parsed: Url,
}

impl NormalizedUrl {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> &Url {
        &self.parsed
    }

    pub fn host(&self) -> &str {
        self.parsed.host_str().unwrap_or("unknown")
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<NormalizedUrl> for String {
    fn from(url: NormalizedUrl) -> Self {
        url.raw
    }
}

impl TryFrom<String> for NormalizedUrl {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate(&value)
    }
}

/// Validate raw input from the URL field and normalize it.
///
/// Input without an explicit scheme gets `https://` in front. The result must
/// parse as a URL with an `http` or `https` scheme.
pub fn validate(input: &str) -> Result<NormalizedUrl, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let separator = scheme_separator(trimmed);
    let candidate = match separator {
        Some(_) => trimmed.to_string(),
        None => format!("{}{}", DEFAULT_SCHEME_PREFIX, trimmed),
    };

    let parsed = Url::parse(&candidate).map_err(|e| ValidationError::InvalidUrl {
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::InvalidUrl {
                reason: format!("unsupported scheme '{}'", other),
            });
        }
    }

    // The parser lowercases the scheme; keep the rest as typed.
    let raw = match separator {
        Some(idx) => format!("{}{}", parsed.scheme(), &trimmed[idx..]),
        None => candidate,
    };

    debug!("Normalized '{}' to '{}'", input, raw);

    Ok(NormalizedUrl { raw, parsed })
}

/// Byte offset of the `://` that ends an explicit scheme. It only counts
/// when nothing before it looks like a path, query or fragment, so
/// `example.com/?next=http://x` still gets the default scheme.
fn scheme_separator(input: &str) -> Option<usize> {
    input
        .find("://")
        .filter(|&idx| !input[..idx].contains(['/', '?', '#']))
}
