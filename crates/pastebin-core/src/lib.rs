//! pastebin-core — identifier assignment and paste persistence.
//!
//! A [`Paste`] is a blob of submitted text plus a short url-safe identifier,
//! its creation time and a visibility flag. [`PasteService`] owns the
//! [`KeyValueStore`](pastebin_store::KeyValueStore) it writes to and
//! implements the whole contract:
//!
//! | Operation | Behaviour |
//! |---|---|
//! | `create_paste` | new paste with a fresh id (check-then-act) |
//! | `edit_paste` | new paste reusing an existing id |
//! | `save` | serialize and overwrite, returns the id |
//! | `load` | read back, `NotFound` when absent |
//! | `submit` | create + save, atomic claim by default |
//! | `update` | load, then overwrite with new content |
//!
//! # Uniqueness
//!
//! `create_paste` checks the store for the candidate id and returns it if
//! free. Nothing is reserved, so two concurrent callers can be handed the
//! same id and the later `save` silently wins. `submit` under
//! [`ClaimStrategy::Atomic`] closes that window with `set_if_absent`.

pub mod config;
pub mod display;
pub mod error;
pub mod id;
pub mod paste;
pub mod service;

#[cfg(test)]
mod testing;

pub use config::PastebinConfig;
pub use display::{format_display_date, ordinal_suffix};
pub use error::{PasteError, PasteResult};
pub use id::{IdentifierSource, RandomIdentifiers, generate_identifier};
pub use paste::{Paste, PasteId, edit_paste};
pub use service::{ClaimStrategy, PasteService};
