//! Error types for paste operations.

use pastebin_store::StoreError;
use thiserror::Error;

use crate::paste::PasteId;

/// Result type alias for paste operations.
pub type PasteResult<T> = Result<T, PasteError>;

/// Everything that can go wrong while creating, saving or loading a paste.
///
/// None of these are fatal; callers are expected to turn them into a
/// message for the user via [`PasteError::user_message`].
#[derive(Debug, Error)]
pub enum PasteError {
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    #[error("store rejected write for paste {id}")]
    WriteRejected { id: PasteId },

    #[error("paste not found: {0}")]
    NotFound(PasteId),

    #[error("no free identifier after {attempts} attempts")]
    IdentifierExhausted { attempts: u32 },

    #[error("invalid paste identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("paste {id} could not be decoded: {reason}")]
    Corrupt { id: PasteId, reason: String },

    #[error("serialization error: {0}")]
    Serialize(String),
}

impl PasteError {
    /// True when the backing store failed or refused the operation.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_) | Self::WriteRejected { .. })
    }

    /// Short message suitable for showing to whoever submitted the request.
    pub fn user_message(&self) -> String {
        match self {
            Self::StoreUnavailable(_) | Self::WriteRejected { .. } => {
                "Something went wrong while saving - please try again later.".to_string()
            }
            Self::NotFound(id) => format!("No paste found with id {id}."),
            Self::IdentifierExhausted { .. } => {
                "Could not allocate a new paste id - please try again later.".to_string()
            }
            Self::InvalidIdentifier(raw) => format!("{raw:?} is not a valid paste id."),
            Self::Corrupt { id, .. } => format!("Paste {id} is damaged and cannot be shown."),
            Self::Serialize(_) => "The paste could not be prepared for storage.".to_string(),
        }
    }
}
