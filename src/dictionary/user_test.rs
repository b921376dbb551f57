use super::*;
use crate::dictionary::MemoryEntryStore;

const GUILD: u64 = 42;

fn store_with(scope: DictionaryScope, entries: Vec<DictionaryEntry>) -> Arc<MemoryEntryStore> {
    let store = Arc::new(MemoryEntryStore::new());
    store.replace(scope, entries);
    store
}

#[test]
fn test_literal_replacement() {
    let store = store_with(
        DictionaryScope::Server(GUILD),
        vec![DictionaryEntry::new("www", "ダブルダブルダブル")],
    );
    let dict = UserDictionary::server(store);
    assert_eq!(dict.apply("草www", GUILD), "草ダブルダブルダブル");
}

#[test]
fn test_pattern_replacement_no_group_expansion() {
    // Readings are literal even when they contain $1
    let store = store_with(
        DictionaryScope::Global,
        vec![DictionaryEntry::new(r"\d{4}年", "$1ねん")],
    );
    let dict = UserDictionary::global(store);
    assert_eq!(dict.apply("2024年です", GUILD), "$1ねんです");
}

#[test]
fn test_entries_apply_in_order() {
    // The first entry's output feeds the second entry
    let store = store_with(
        DictionaryScope::Word(GUILD),
        vec![
            DictionaryEntry::new("abc", "def"),
            DictionaryEntry::new("def", "ghi"),
        ],
    );
    let dict = UserDictionary::word(store);
    assert_eq!(dict.apply("abc", GUILD), "ghi");
}

#[test]
fn test_invalid_entry_skipped_others_applied() {
    // The valid target must not occur inside the rest of the text, since
    // replacement is substring-based
    let store = store_with(
        DictionaryScope::Server(GUILD),
        vec![
            DictionaryEntry::new("[broken", "よめない"),
            DictionaryEntry::new("xyz", "オーケー"),
        ],
    );
    let dict = UserDictionary::server(store);
    assert_eq!(dict.apply("xyz [broken", GUILD), "オーケー [broken");
}

#[test]
fn test_replacement_is_substring_based() {
    let store = store_with(
        DictionaryScope::Server(GUILD),
        vec![DictionaryEntry::new("ok", "オーケー")],
    );
    let dict = UserDictionary::server(store);
    assert_eq!(dict.apply("ok broken", GUILD), "オーケー brオーケーen");
}

#[test]
fn test_guild_scoping() {
    let store = Arc::new(MemoryEntryStore::new());
    store.replace(
        DictionaryScope::Server(1),
        vec![DictionaryEntry::new("x", "エックス")],
    );
    let dict = UserDictionary::server(store);

    assert_eq!(dict.apply("x", 1), "エックス");
    assert_eq!(dict.apply("x", 2), "x");
}

#[test]
fn test_global_scope_ignores_guild() {
    let store = store_with(
        DictionaryScope::Global,
        vec![DictionaryEntry::new("x", "エックス")],
    );
    let dict = UserDictionary::global(store);
    assert_eq!(dict.apply("x", 1), "エックス");
    assert_eq!(dict.apply("x", 2), "エックス");
}

#[test]
fn test_reload_invalidates_compiled_cache() {
    let store = Arc::new(MemoryEntryStore::new());
    store.replace(
        DictionaryScope::Server(GUILD),
        vec![DictionaryEntry::new("a", "イチ")],
    );
    let dict = UserDictionary::server(Arc::clone(&store) as Arc<dyn EntryStore>);

    assert_eq!(dict.apply("a", GUILD), "イチ");

    // Whole-set replace must be observed by the next apply
    store.replace(
        DictionaryScope::Server(GUILD),
        vec![DictionaryEntry::new("a", "ニ")],
    );
    assert_eq!(dict.apply("a", GUILD), "ニ");

    // Emptying the scope disables the dictionary
    store.replace(DictionaryScope::Server(GUILD), Vec::new());
    assert_eq!(dict.apply("a", GUILD), "a");
}

#[test]
fn test_emptied_scope_releases_cached_rules() {
    let store = Arc::new(MemoryEntryStore::new());
    store.replace(
        DictionaryScope::Server(GUILD),
        vec![DictionaryEntry::new("a", "イチ")],
    );
    let dict = UserDictionary::server(Arc::clone(&store) as Arc<dyn EntryStore>);

    assert_eq!(dict.apply("a", GUILD), "イチ");
    assert_eq!(dict.cached_scope_count(), 1);

    store.replace(DictionaryScope::Server(GUILD), Vec::new());
    assert_eq!(dict.apply("a", GUILD), "a");
    assert_eq!(dict.cached_scope_count(), 0);
}

#[test]
fn test_cached_scopes_stay_bounded() {
    let store = Arc::new(MemoryEntryStore::new());
    let dict = UserDictionary::server(Arc::clone(&store) as Arc<dyn EntryStore>);

    for guild in 0..(MAX_CACHED_SCOPES as u64 + 10) {
        store.replace(
            DictionaryScope::Server(guild),
            vec![DictionaryEntry::new("a", "エー")],
        );
        dict.apply("a", guild);
    }

    assert!(dict.cached_scope_count() <= MAX_CACHED_SCOPES);
    // The hot guild still resolves after the flush
    assert_eq!(dict.apply("a", MAX_CACHED_SCOPES as u64 + 9), "エー");
}

#[test]
fn test_empty_scope_is_identity() {
    let dict = UserDictionary::word(Arc::new(MemoryEntryStore::new()));
    assert_eq!(dict.apply("そのまま", GUILD), "そのまま");
}

#[test]
fn test_identity_surface() {
    let store: Arc<dyn EntryStore> = Arc::new(MemoryEntryStore::new());

    let global = UserDictionary::global(Arc::clone(&store));
    assert_eq!(global.id(), "global");
    assert_eq!(global.display_name(), "グローバル辞書");
    assert_eq!(global.default_priority(), 3);
    assert!(!global.is_built_in());

    let server = UserDictionary::server(Arc::clone(&store));
    assert_eq!(server.id(), "server");
    assert_eq!(server.default_priority(), 2);

    let word = UserDictionary::word(store);
    assert_eq!(word.id(), "word");
    assert_eq!(word.default_priority(), 4);
}

#[test]
fn test_show_info_lists_entries_in_order() {
    let store = store_with(
        DictionaryScope::Word(GUILD),
        vec![
            DictionaryEntry::new("一", "いち"),
            DictionaryEntry::new("二", "に"),
        ],
    );
    let dict = UserDictionary::word(store);
    assert_eq!(
        dict.show_info(GUILD),
        vec![
            ("一".to_string(), "いち".to_string()),
            ("二".to_string(), "に".to_string()),
        ]
    );
}
