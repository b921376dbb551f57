use super::*;

fn engine(rules: Vec<ReplacementRule>) -> PriorityReplacementEngine {
    PriorityReplacementEngine::new(rules)
}

#[test]
fn test_whole_token_matching_only() {
    // Predicate sees entire tokens, not substrings
    let e = engine(vec![ReplacementRule::new(1, "数字", |t: &str| {
        !t.is_empty() && t.chars().all(|c| c.is_ascii_digit())
    })]);

    assert_eq!(e.apply("123"), "数字");
    // "abc123" is one Latin token; the all-digits predicate rejects it
    assert_eq!(e.apply("abc123"), "abc123");
}

#[test]
fn test_lower_priority_tried_first() {
    let e = engine(vec![
        ReplacementRule::new(2, "later", |t: &str| t == "x"),
        ReplacementRule::new(1, "first", |t: &str| t == "x"),
    ]);
    assert_eq!(e.apply("x"), "first");
}

#[test]
fn test_equal_priority_resolves_by_registration_order() {
    let e = engine(vec![
        ReplacementRule::new(1, "alpha", |t: &str| t == "x"),
        ReplacementRule::new(1, "beta", |t: &str| t == "x"),
    ]);
    assert_eq!(e.apply("x"), "alpha");
}

#[test]
fn test_unmatched_tokens_pass_through() {
    let e = engine(vec![ReplacementRule::new(1, "置換", |t: &str| t == "hit")]);
    assert_eq!(e.apply("miss と hit と miss"), "miss と 置換 と miss");
}

#[test]
fn test_protected_span_is_single_token() {
    // Would-be token boundaries inside the URL (script changes, symbols) must
    // not split it
    let e = engine(vec![ReplacementRule::new(0, "URL", |t: &str| {
        t.starts_with("https://")
    })]);
    assert_eq!(
        e.apply("リンク https://ja.wikipedia.org/wiki/日本語 です"),
        "リンク URL です"
    );
}

#[test]
fn test_empty_rule_set_is_identity() {
    let e = engine(Vec::new());
    let input = "そのまま returns 123 https://example.com 。";
    assert_eq!(e.apply(input), input);
}

#[test]
fn test_empty_input() {
    let e = engine(vec![ReplacementRule::new(1, "x", |_: &str| true)]);
    assert_eq!(e.apply(""), "");
}

#[test]
fn test_apply_is_deterministic() {
    let e = engine(vec![
        ReplacementRule::new(1, "A", |t: &str| t.contains('1')),
        ReplacementRule::new(2, "B", |t: &str| t.contains('2')),
    ]);
    let input = "12 と 2 と 漢字";
    let first = e.apply(input);
    for _ in 0..10 {
        assert_eq!(e.apply(input), first);
    }
}
