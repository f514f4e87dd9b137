//! PasteService — writes pastes to, and reads them from, a `KeyValueStore`.
//!
//! Records are JSON-serialized into the store's byte values, keyed by paste
//! id. The service holds its store explicitly; there is no global handle.

use pastebin_store::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::PastebinConfig;
use crate::error::{PasteError, PasteResult};
use crate::id::{DEFAULT_MAX_ATTEMPTS, IdentifierSource, RandomIdentifiers, generate_identifier};
use crate::paste::{Paste, PasteId, edit_paste};

/// How [`PasteService::submit`] makes a new id its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClaimStrategy {
    /// Claim and write in one `set_if_absent` call. Concurrent submitters
    /// never end up sharing an id.
    #[default]
    Atomic,
    /// Check with `exists`, then `set`. Two submitters can race past the
    /// check with the same id; the later write wins.
    CheckThenAct,
}

/// Paste operations over a store `S`, drawing ids from `I`.
#[derive(Debug, Clone)]
pub struct PasteService<S, I = RandomIdentifiers> {
    store: S,
    ids: I,
    strategy: ClaimStrategy,
    max_attempts: u32,
}

impl<S: KeyValueStore> PasteService<S> {
    pub fn new(store: S) -> Self {
        Self::with_identifiers(store, RandomIdentifiers)
    }

    /// Service configured from the `[ids]` section.
    pub fn from_config(store: S, config: &PastebinConfig) -> Self {
        Self::new(store)
            .claim_strategy(config.ids.claim)
            .max_attempts(config.ids.max_attempts)
    }
}

impl<S: KeyValueStore, I: IdentifierSource> PasteService<S, I> {
    pub fn with_identifiers(store: S, ids: I) -> Self {
        Self {
            store,
            ids,
            strategy: ClaimStrategy::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn claim_strategy(mut self, strategy: ClaimStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Build a paste under an id that is free right now.
    ///
    /// Nothing is written, and the id is not reserved until [`save`](Self::save).
    pub fn create_paste(&self, content: impl Into<String>, private: bool) -> PasteResult<Paste> {
        let id = generate_identifier(&self.store, &self.ids, self.max_attempts)?;
        Ok(Paste::new(id, content, private))
    }

    /// Build a replacement for the paste at `id`. Nothing is written.
    pub fn edit_paste(&self, id: PasteId, content: impl Into<String>) -> Paste {
        edit_paste(id, content)
    }

    /// Write `paste` under its id, replacing whatever was there.
    pub fn save(&self, paste: &Paste) -> PasteResult<PasteId> {
        let blob = encode(paste)?;
        match self.store.set(paste.id.as_str(), &blob) {
            Ok(true) => {
                debug!(id = %paste.id, bytes = blob.len(), "paste saved");
                Ok(paste.id.clone())
            }
            Ok(false) => {
                warn!(id = %paste.id, "store did not accept paste");
                Err(PasteError::WriteRejected {
                    id: paste.id.clone(),
                })
            }
            Err(e) => {
                warn!(id = %paste.id, error = %e, "store unavailable while saving paste");
                Err(e.into())
            }
        }
    }

    /// Read the paste stored at `id`.
    pub fn load(&self, id: &PasteId) -> PasteResult<Paste> {
        let blob = self.store.get(id.as_str()).map_err(|e| {
            warn!(%id, error = %e, "store unavailable while loading paste");
            PasteError::from(e)
        })?;
        let Some(blob) = blob else {
            debug!(%id, "paste not found");
            return Err(PasteError::NotFound(id.clone()));
        };

        let paste: Paste = serde_json::from_slice(&blob).map_err(|e| PasteError::Corrupt {
            id: id.clone(),
            reason: e.to_string(),
        })?;
        if paste.id != *id {
            return Err(PasteError::Corrupt {
                id: id.clone(),
                reason: format!("record carries id {}", paste.id),
            });
        }
        Ok(paste)
    }

    /// Create a paste under a fresh id and persist it.
    pub fn submit(&self, content: impl Into<String>, private: bool) -> PasteResult<Paste> {
        match self.strategy {
            ClaimStrategy::Atomic => self.claim_and_write(content.into(), private),
            ClaimStrategy::CheckThenAct => {
                let paste = self.create_paste(content, private)?;
                self.save(&paste)?;
                Ok(paste)
            }
        }
    }

    /// Replace the content of an existing paste.
    ///
    /// Fails with `NotFound` rather than creating a paste under an id
    /// nobody was handed.
    pub fn update(&self, id: &PasteId, content: impl Into<String>) -> PasteResult<Paste> {
        self.load(id)?;
        let paste = self.edit_paste(id.clone(), content);
        self.save(&paste)?;
        Ok(paste)
    }

    fn claim_and_write(&self, content: String, private: bool) -> PasteResult<Paste> {
        let mut paste = Paste::new(self.ids.candidate(), content, private);
        for attempt in 1..=self.max_attempts {
            if attempt > 1 {
                paste.id = self.ids.candidate();
            }
            let blob = encode(&paste)?;
            let claimed = self
                .store
                .set_if_absent(paste.id.as_str(), &blob)
                .map_err(|e| {
                    warn!(id = %paste.id, error = %e, "store unavailable while claiming id");
                    PasteError::from(e)
                })?;
            if claimed {
                debug!(id = %paste.id, attempt, bytes = blob.len(), "paste claimed");
                return Ok(paste);
            }
            debug!(id = %paste.id, attempt, "identifier already taken");
        }
        warn!(attempts = self.max_attempts, "gave up looking for a free identifier");
        Err(PasteError::IdentifierExhausted {
            attempts: self.max_attempts,
        })
    }
}

fn encode(paste: &Paste) -> PasteResult<Vec<u8>> {
    serde_json::to_vec(paste).map_err(|e| PasteError::Serialize(e.to_string()))
}
