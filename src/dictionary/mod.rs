// Dictionary module - the substitution dictionary chain and its orchestration

mod abbreviation;
mod manager;
mod store;
mod user;

pub use abbreviation::AbbreviationDictionary;
pub use manager::{
    DictionaryManager, DocumentError, EntryError, DICTIONARY_FILE_VERSION, MAX_ENTRY_COUNT,
};
pub use store::{DictionaryEntry, DictionaryScope, EntryStore, MemoryEntryStore};
pub use user::{UserDictionary, UserDictionaryKind};

/// Closed set of dictionary kinds making up the normalization chain.
///
/// Every variant exposes the same capability surface: `apply`, a stable id,
/// a display name, a built-in flag, a default chain priority and an entry
/// listing. New kinds are added by extending this enum, not by subclassing.
pub enum Dictionary {
    Abbreviation(AbbreviationDictionary),
    Global(UserDictionary),
    Server(UserDictionary),
    Word(UserDictionary),
}

impl Dictionary {
    /// Run this dictionary over the text for the given guild.
    pub fn apply(&self, text: &str, guild_id: u64) -> String {
        match self {
            Dictionary::Abbreviation(d) => d.apply(text, guild_id),
            Dictionary::Global(d) | Dictionary::Server(d) | Dictionary::Word(d) => {
                d.apply(text, guild_id)
            }
        }
    }

    /// Globally unique dictionary id.
    pub fn id(&self) -> &'static str {
        match self {
            Dictionary::Abbreviation(d) => d.id(),
            Dictionary::Global(d) | Dictionary::Server(d) | Dictionary::Word(d) => d.id(),
        }
    }

    /// Human-readable name shown by configuration tooling.
    pub fn display_name(&self) -> &'static str {
        match self {
            Dictionary::Abbreviation(d) => d.display_name(),
            Dictionary::Global(d) | Dictionary::Server(d) | Dictionary::Word(d) => {
                d.display_name()
            }
        }
    }

    pub fn is_built_in(&self) -> bool {
        match self {
            Dictionary::Abbreviation(d) => d.is_built_in(),
            Dictionary::Global(d) | Dictionary::Server(d) | Dictionary::Word(d) => d.is_built_in(),
        }
    }

    /// Chain position: lower runs first, ties break by registration order.
    pub fn default_priority(&self) -> i32 {
        match self {
            Dictionary::Abbreviation(d) => d.default_priority(),
            Dictionary::Global(d) | Dictionary::Server(d) | Dictionary::Word(d) => {
                d.default_priority()
            }
        }
    }

    /// Active target -> reading listing for the guild, in order.
    pub fn show_info(&self, guild_id: u64) -> Vec<(String, String)> {
        match self {
            Dictionary::Abbreviation(d) => d.show_info(guild_id),
            Dictionary::Global(d) | Dictionary::Server(d) | Dictionary::Word(d) => {
                d.show_info(guild_id)
            }
        }
    }
}
