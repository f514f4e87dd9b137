//! redb table definitions for the pastebin store.

use redb::TableDefinition;

/// Serialized paste records keyed by paste identifier.
pub const PASTES: TableDefinition<&str, &[u8]> = TableDefinition::new("pastes");
