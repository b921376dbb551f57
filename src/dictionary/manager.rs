// Dictionary manager - owns the per-guild dictionary chain and the versioned
// document load/replace path

use std::sync::Arc;

use regex::Regex;
use serde_json::{json, Map, Value};

use super::abbreviation::AbbreviationDictionary;
use super::store::{DictionaryEntry, DictionaryScope, EntryStore};
use super::user::UserDictionary;
use super::Dictionary;
use crate::pattern_validator::{PatternValidator, ValidationResult};

/// The only supported persisted document schema version.
pub const DICTIONARY_FILE_VERSION: i64 = 0;
/// Per-scope entry ceiling enforced at load.
pub const MAX_ENTRY_COUNT: usize = 1000;

/// Structural failures that abort a whole document load. No partial state is
/// committed; the scope's previous entries stay in effect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// `version` is missing or not the supported value
    #[error("Unsupported dictionary file version")]
    UnsupportedVersion,
    /// `entry` is missing or not a mapping
    #[error("Invalid dictionary file format")]
    InvalidFormat,
    /// More entries than a scope may hold
    #[error("Dictionary entry count exceeds limit: {count} > {max}")]
    EntryLimitExceeded { count: usize, max: usize },
}

/// Rejection of a single added/edited entry. Only that entry is affected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    /// The target pattern does not compile
    #[error("{0}")]
    Syntax(String),
    /// The target compiles but matches the ReDoS shape heuristic
    #[error("{0}")]
    Unsafe(String),
}

/// Orchestrates the ordered dictionary chain and entry-set lifecycle.
///
/// The chain is fixed at construction: built-ins are always present and user
/// dictionaries activate as soon as their scope holds entries. All reads go
/// through immutable snapshots of the entry store, so `apply_all` never
/// blocks on, or observes a torn view of, a concurrent reload.
pub struct DictionaryManager {
    /// Sorted ascending by default priority; the stable sort keeps
    /// registration order among equal priorities
    dictionaries: Vec<Dictionary>,
    store: Arc<dyn EntryStore>,
    validator: PatternValidator,
}

impl DictionaryManager {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        let mut dictionaries = vec![
            Dictionary::Abbreviation(AbbreviationDictionary::new()),
            Dictionary::Server(UserDictionary::server(Arc::clone(&store))),
            Dictionary::Global(UserDictionary::global(Arc::clone(&store))),
            Dictionary::Word(UserDictionary::word(Arc::clone(&store))),
        ];
        dictionaries.sort_by_key(|d| d.default_priority());

        Self {
            dictionaries,
            store,
            validator: PatternValidator::new(),
        }
    }

    /// The chain in application order.
    pub fn dictionaries(&self) -> &[Dictionary] {
        &self.dictionaries
    }

    /// Fold the whole chain over the text, each dictionary consuming the
    /// previous one's output. Total: malformed input passes through
    /// unchanged or partially substituted, never panics.
    pub fn apply_all(&self, text: &str, guild_id: u64) -> String {
        self.dictionaries
            .iter()
            .fold(text.to_string(), |acc, dict| dict.apply(&acc, guild_id))
    }

    /// Load a persisted dictionary document into the global scope
    /// (`is_global`) or the guild's server scope.
    ///
    /// The three structural checks (version, entry mapping, entry count) are
    /// fatal and leave the previous entry set untouched. An individual entry
    /// whose target does not validate is skipped with a warning. Accepted
    /// entries replace the scope's previous set wholesale. Returns the number
    /// of accepted entries.
    pub fn load_from_document(
        &self,
        document: &Value,
        guild_id: u64,
        is_global: bool,
    ) -> Result<usize, DocumentError> {
        let version = document.get("version").and_then(Value::as_i64);
        if version != Some(DICTIONARY_FILE_VERSION) {
            return Err(DocumentError::UnsupportedVersion);
        }

        let entry = document
            .get("entry")
            .and_then(Value::as_object)
            .ok_or(DocumentError::InvalidFormat)?;

        if entry.len() > MAX_ENTRY_COUNT {
            return Err(DocumentError::EntryLimitExceeded {
                count: entry.len(),
                max: MAX_ENTRY_COUNT,
            });
        }

        let scope = Self::document_scope(guild_id, is_global);
        let mut accepted = Vec::with_capacity(entry.len());
        for (target, reading) in entry {
            let Some(reading) = reading.as_str() else {
                crate::warn!("Skipping dictionary entry with non-string reading: {target}");
                continue;
            };
            match self.validator.validate(target) {
                ValidationResult::Valid(_) => {
                    accepted.push(DictionaryEntry::new(target, reading));
                }
                ValidationResult::Invalid(reason) => {
                    crate::warn!("Skipping invalid dictionary entry {target}: {reason}");
                }
            }
        }

        let count = accepted.len();
        crate::info!("Loaded {count} dictionary entries into {scope:?}");
        self.store.replace(scope, accepted);
        Ok(count)
    }

    /// Export a scope back to the persisted document shape. Round-trips
    /// through [`Self::load_from_document`].
    pub fn save_to_document(&self, guild_id: u64, is_global: bool) -> Value {
        let scope = Self::document_scope(guild_id, is_global);
        let mut entry = Map::new();
        for e in self.store.entries(&scope).iter() {
            entry.insert(e.target.clone(), Value::String(e.reading.clone()));
        }
        json!({
            "version": DICTIONARY_FILE_VERSION,
            "entry": entry,
        })
    }

    /// Add or overwrite one entry. The target is validated first; rejection
    /// affects only this entry.
    pub fn add_entry(
        &self,
        scope: DictionaryScope,
        target: &str,
        reading: &str,
    ) -> Result<(), EntryError> {
        if let ValidationResult::Invalid(reason) = self.validator.validate(target) {
            // Classify for the caller: a compiling pattern was rejected by
            // the safety heuristic, anything else is a syntax failure
            return Err(if Regex::new(target).is_ok() {
                EntryError::Unsafe(reason)
            } else {
                EntryError::Syntax(reason)
            });
        }

        let mut entries = self.store.entries(&scope).as_ref().clone();
        match entries.iter_mut().find(|e| e.target == target) {
            Some(existing) => existing.reading = reading.to_string(),
            None => entries.push(DictionaryEntry::new(target, reading)),
        }
        self.store.replace(scope, entries);
        Ok(())
    }

    /// Remove one entry by target. Returns whether it existed.
    pub fn remove_entry(&self, scope: DictionaryScope, target: &str) -> bool {
        let mut entries = self.store.entries(&scope).as_ref().clone();
        let before = entries.len();
        entries.retain(|e| e.target != target);
        if entries.len() == before {
            return false;
        }
        self.store.replace(scope, entries);
        true
    }

    fn document_scope(guild_id: u64, is_global: bool) -> DictionaryScope {
        if is_global {
            DictionaryScope::Global
        } else {
            DictionaryScope::Server(guild_id)
        }
    }
}

#[cfg(test)]
#[path = "manager_test.rs"]
mod tests;
