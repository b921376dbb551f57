// yomiage-core - text normalization for a group voice-announcement service
//
// Rewrites user-authored chat text (mixed scripts, Markdown-ish markup, URLs)
// into a form a speech synthesizer can read aloud, by routing it through an
// ordered chain of substitution dictionaries.

pub mod dictionary;
pub mod pattern_validator;
pub mod replace;
pub mod segment;

// Re-export log macros for use throughout the crate
pub use log::{debug, error, info, trace, warn};

pub use dictionary::{
    AbbreviationDictionary, Dictionary, DictionaryEntry, DictionaryManager, DictionaryScope,
    DocumentError, EntryError, EntryStore, MemoryEntryStore, UserDictionary, UserDictionaryKind,
    DICTIONARY_FILE_VERSION, MAX_ENTRY_COUNT,
};
pub use pattern_validator::{PatternValidator, ValidationResult};
pub use replace::{PriorityReplacementEngine, ReplacementRule};
pub use segment::{ProtectedSpanExtractor, SegmentClassifier, TextSpan};
