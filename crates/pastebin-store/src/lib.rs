//! pastebin-store — key-value persistence for pastebin.
//!
//! The paste core treats storage as an opaque collaborator: string keys,
//! byte-blob values, and four operations (`exists`, `get`, `set`,
//! `set_if_absent`). This crate defines that seam as the [`KeyValueStore`]
//! trait and ships two implementations:
//!
//! - [`RedbStore`]: backed by [redb](https://docs.rs/redb), on disk or in
//!   memory. `Clone` + `Send` + `Sync` (an `Arc<Database>` underneath).
//! - [`MemoryStore`]: a mutex-guarded `HashMap`, for tests and throwaway use.
//!
//! Values are never interpreted here; record encoding belongs to the caller.

pub mod error;
pub mod kv;
pub mod memory;
pub mod store;
pub mod tables;

pub use error::{StoreError, StoreResult};
pub use kv::KeyValueStore;
pub use memory::MemoryStore;
pub use store::RedbStore;
