//! Paste identifier generation.
//!
//! An identifier is 10 random bytes, url-safe base64 encoded, cut down to
//! the first 8 characters of the encoding. The cut happens after encoding,
//! so the last character does not fall on a whole byte.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use pastebin_store::KeyValueStore;
use rand::RngCore;
use tracing::{debug, warn};

use crate::error::{PasteError, PasteResult};
use crate::paste::PasteId;

/// Length of every generated identifier.
pub const ID_LENGTH: usize = 8;

/// Random bytes drawn per candidate.
pub const ID_RANDOM_BYTES: usize = 10;

/// How many colliding candidates to tolerate before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 32;

/// Produces candidate identifiers. Candidates are not guaranteed unique.
pub trait IdentifierSource: Send + Sync {
    fn candidate(&self) -> PasteId;
}

/// Candidates from the thread-local CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdentifiers;

impl IdentifierSource for RandomIdentifiers {
    fn candidate(&self) -> PasteId {
        let mut bytes = [0u8; ID_RANDOM_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        let mut encoded = URL_SAFE.encode(bytes);
        encoded.truncate(ID_LENGTH);
        PasteId::new_unchecked(encoded)
    }
}

/// Draw candidates until one is not present in `store`.
///
/// This is check-then-act: the returned id was free when checked, but
/// nothing is reserved. A concurrent caller may receive the same id, and
/// whichever writes last overwrites the other.
pub fn generate_identifier<S, I>(store: &S, source: &I, max_attempts: u32) -> PasteResult<PasteId>
where
    S: KeyValueStore + ?Sized,
    I: IdentifierSource + ?Sized,
{
    for attempt in 1..=max_attempts {
        let candidate = source.candidate();
        if !store.exists(candidate.as_str())? {
            return Ok(candidate);
        }
        debug!(%candidate, attempt, "identifier already taken");
    }
    warn!(attempts = max_attempts, "gave up looking for a free identifier");
    Err(PasteError::IdentifierExhausted {
        attempts: max_attempts,
    })
}
