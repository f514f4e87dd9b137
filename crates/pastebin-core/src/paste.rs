//! Paste data types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::display::format_display_date;
use crate::error::{PasteError, PasteResult};

/// Longest identifier accepted from outside. Generated ids are shorter.
pub const MAX_ID_LENGTH: usize = 64;

/// Short, url-safe name of a paste.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasteId(String);

impl PasteId {
    /// Validate a caller-supplied identifier.
    ///
    /// Accepts 1 to [`MAX_ID_LENGTH`] characters from the url-safe base64
    /// alphabet (`A-Z`, `a-z`, `0-9`, `-`, `_`).
    pub fn parse(raw: &str) -> PasteResult<Self> {
        let well_formed = !raw.is_empty()
            && raw.len() <= MAX_ID_LENGTH
            && raw.chars().all(is_url_safe);
        if !well_formed {
            return Err(PasteError::InvalidIdentifier(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    /// Wrap an id produced by the generator.
    pub(crate) fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_url_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl FromStr for PasteId {
    type Err = PasteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PasteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PasteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A stored unit of submitted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paste {
    pub id: PasteId,
    pub content: String,
    /// When this value was constructed, not when it was written.
    pub upload_date: DateTime<Utc>,
    /// Stored but not acted on anywhere.
    #[serde(default)]
    pub private: bool,
}

impl Paste {
    pub fn new(id: PasteId, content: impl Into<String>, private: bool) -> Self {
        Self {
            id,
            content: content.into(),
            upload_date: Utc::now(),
            private,
        }
    }
}

/// Build the replacement for an existing paste: same id, new content, new
/// upload date. The visibility flag is not carried over.
pub fn edit_paste(id: PasteId, content: impl Into<String>) -> Paste {
    Paste::new(id, content, false)
}

impl fmt::Display for Paste {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{} - {}>",
            self.id,
            format_display_date(&self.upload_date.with_timezone(&Local))
        )
    }
}
