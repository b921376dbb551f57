// User dictionaries - pattern -> reading tables authored per guild (server,
// word) or shared across all guilds (global)

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use regex::{NoExpand, Regex};

use super::store::{DictionaryEntry, DictionaryScope, EntryStore};

/// Which user dictionary a [`UserDictionary`] instance is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserDictionaryKind {
    Global,
    Server,
    Word,
}

impl UserDictionaryKind {
    fn scope(&self, guild_id: u64) -> DictionaryScope {
        match self {
            UserDictionaryKind::Global => DictionaryScope::Global,
            UserDictionaryKind::Server => DictionaryScope::Server(guild_id),
            UserDictionaryKind::Word => DictionaryScope::Word(guild_id),
        }
    }
}

/// Upper bound on scopes with cached compiled rules. The cache is dropped
/// wholesale when a new scope would push it past the bound, so idle guilds
/// cannot accumulate compiled rule sets forever.
const MAX_CACHED_SCOPES: usize = 1024;

/// Compiled rule set for one scope, tied to the snapshot it was built from.
struct CachedRules {
    /// The snapshot these rules were compiled from; compared by pointer
    /// identity, so a whole-set replace invalidates the cache
    source: Arc<Vec<DictionaryEntry>>,
    compiled: Arc<Vec<(Regex, String)>>,
}

/// Regex-replace dictionary over a user-authored entry table.
///
/// Entries are applied in order; each pattern's matches are substituted with
/// the literal reading (no capture-group expansion). A target that fails to
/// compile is skipped with a warning, so one bad entry never takes down the
/// rest of the table.
pub struct UserDictionary {
    kind: UserDictionaryKind,
    store: Arc<dyn EntryStore>,
    cache: RwLock<HashMap<DictionaryScope, CachedRules>>,
}

impl UserDictionary {
    pub fn new(kind: UserDictionaryKind, store: Arc<dyn EntryStore>) -> Self {
        Self {
            kind,
            store,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn global(store: Arc<dyn EntryStore>) -> Self {
        Self::new(UserDictionaryKind::Global, store)
    }

    pub fn server(store: Arc<dyn EntryStore>) -> Self {
        Self::new(UserDictionaryKind::Server, store)
    }

    pub fn word(store: Arc<dyn EntryStore>) -> Self {
        Self::new(UserDictionaryKind::Word, store)
    }

    pub fn kind(&self) -> UserDictionaryKind {
        self.kind
    }

    /// Apply every entry of the guild's current snapshot, in entry order.
    pub fn apply(&self, text: &str, guild_id: u64) -> String {
        let scope = self.kind.scope(guild_id);
        let snapshot = self.store.entries(&scope);
        if snapshot.is_empty() {
            // An emptied scope releases its compiled rules
            if self.cache.read().contains_key(&scope) {
                self.cache.write().remove(&scope);
            }
            return text.to_string();
        }

        let compiled = self.compiled_rules(scope, snapshot);
        let mut result = text.to_string();
        for (pattern, reading) in compiled.iter() {
            if let std::borrow::Cow::Owned(replaced) =
                pattern.replace_all(&result, NoExpand(reading))
            {
                result = replaced;
            }
        }
        result
    }

    /// Compiled rules for the snapshot, reusing the cache when the snapshot
    /// is unchanged since the last apply.
    fn compiled_rules(
        &self,
        scope: DictionaryScope,
        snapshot: Arc<Vec<DictionaryEntry>>,
    ) -> Arc<Vec<(Regex, String)>> {
        if let Some(cached) = self.cache.read().get(&scope) {
            if Arc::ptr_eq(&cached.source, &snapshot) {
                return Arc::clone(&cached.compiled);
            }
        }

        let compiled: Vec<(Regex, String)> = snapshot
            .iter()
            .filter_map(|entry| match Regex::new(&entry.target) {
                Ok(pattern) => Some((pattern, entry.reading.clone())),
                Err(e) => {
                    crate::warn!(
                        "Invalid regex pattern in {:?} dict: {} ({})",
                        self.kind,
                        entry.target,
                        e
                    );
                    None
                }
            })
            .collect();
        let compiled = Arc::new(compiled);

        let mut cache = self.cache.write();
        if cache.len() >= MAX_CACHED_SCOPES && !cache.contains_key(&scope) {
            cache.clear();
        }
        cache.insert(
            scope,
            CachedRules {
                source: snapshot,
                compiled: Arc::clone(&compiled),
            },
        );
        compiled
    }

    #[cfg(test)]
    fn cached_scope_count(&self) -> usize {
        self.cache.read().len()
    }

    pub fn id(&self) -> &'static str {
        match self.kind {
            UserDictionaryKind::Global => "global",
            UserDictionaryKind::Server => "server",
            UserDictionaryKind::Word => "word",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self.kind {
            UserDictionaryKind::Global => "グローバル辞書",
            UserDictionaryKind::Server => "サーバー辞書",
            UserDictionaryKind::Word => "単語辞書",
        }
    }

    pub fn is_built_in(&self) -> bool {
        false
    }

    pub fn default_priority(&self) -> i32 {
        match self.kind {
            UserDictionaryKind::Server => 2,
            UserDictionaryKind::Global => 3,
            UserDictionaryKind::Word => 4,
        }
    }

    /// Current target -> reading listing for configuration tooling, in entry
    /// order.
    pub fn show_info(&self, guild_id: u64) -> Vec<(String, String)> {
        self.store
            .entries(&self.kind.scope(guild_id))
            .iter()
            .map(|e| (e.target.clone(), e.reading.clone()))
            .collect()
    }
}

#[cfg(test)]
#[path = "user_test.rs"]
mod tests;
