// Entry store - the seam between the normalization core and whatever
// persists dictionary entries; the core only ever asks for a whole-scope
// snapshot and replaces whole scopes

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// One target -> reading substitution owned by a user dictionary.
///
/// `target` is either a literal or a regex pattern source; the compiled form
/// is cached by the owning dictionary, keyed to the snapshot it came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DictionaryEntry {
    /// Pattern source matched against the text
    pub target: String,
    /// Spoken reading substituted for every match
    pub reading: String,
}

impl DictionaryEntry {
    pub fn new(target: impl Into<String>, reading: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            reading: reading.into(),
        }
    }
}

/// Scope an entry set belongs to. Guild ids are opaque lookup keys supplied
/// by the chat platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DictionaryScope {
    /// One shared table for every guild
    Global,
    /// Per-guild server dictionary
    Server(u64),
    /// Per-guild word dictionary
    Word(u64),
}

/// Backend trait for dictionary entry storage.
///
/// Readers must observe edits atomically: `entries` hands out an immutable
/// snapshot, and `replace` swaps the whole set for a scope rather than
/// patching it in place. Concurrent replaces are last-writer-wins.
pub trait EntryStore: Send + Sync {
    /// Current snapshot for a scope, empty if nothing was ever loaded.
    fn entries(&self, scope: &DictionaryScope) -> Arc<Vec<DictionaryEntry>>;

    /// Replace the scope's entry set wholesale.
    fn replace(&self, scope: DictionaryScope, entries: Vec<DictionaryEntry>);
}

/// In-memory store backing tests and single-process deployments. Persistent
/// backends implement [`EntryStore`] over their own storage.
pub struct MemoryEntryStore {
    scopes: RwLock<HashMap<DictionaryScope, Arc<Vec<DictionaryEntry>>>>,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self {
            scopes: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryEntryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryStore for MemoryEntryStore {
    fn entries(&self, scope: &DictionaryScope) -> Arc<Vec<DictionaryEntry>> {
        self.scopes
            .read()
            .get(scope)
            .cloned()
            .unwrap_or_else(|| Arc::new(Vec::new()))
    }

    fn replace(&self, scope: DictionaryScope, entries: Vec<DictionaryEntry>) {
        crate::debug!(
            "Replacing {:?} dictionary entries ({} entries)",
            scope,
            entries.len()
        );
        self.scopes.write().insert(scope, Arc::new(entries));
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
