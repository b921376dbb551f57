// Priority replacement engine - replaces whole tokens with the output of the
// highest-priority matching rule

use crate::segment::{ProtectedSpanExtractor, SegmentClassifier};

/// A single substitution rule: whole-token predicate plus the marker text it
/// substitutes. Lower priority values are tried first; rules with equal
/// priority keep their registration order.
pub struct ReplacementRule {
    priority: i32,
    predicate: Box<dyn Fn(&str) -> bool + Send + Sync>,
    replacement: String,
}

impl ReplacementRule {
    pub fn new(
        priority: i32,
        replacement: impl Into<String>,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            priority,
            predicate: Box::new(predicate),
            replacement: replacement.into(),
        }
    }
}

/// Applies an ordered rule set to text, token by token.
///
/// The input is first partitioned by [`ProtectedSpanExtractor`]; protected
/// spans are single tokens regardless of their internal script boundaries,
/// while unprotected spans are further tokenized by [`SegmentClassifier`].
/// The rule set is fixed at construction, so `apply` is a pure function of
/// (rule set, input).
pub struct PriorityReplacementEngine {
    rules: Vec<ReplacementRule>,
    extractor: ProtectedSpanExtractor,
}

impl PriorityReplacementEngine {
    pub fn new(mut rules: Vec<ReplacementRule>) -> Self {
        // Stable sort keeps registration order among equal priorities
        rules.sort_by_key(|r| r.priority);
        Self {
            rules,
            extractor: ProtectedSpanExtractor::new(),
        }
    }

    /// Replace every matching token and concatenate the results in order.
    /// Tokens no rule matches pass through unchanged.
    pub fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());

        for span in self.extractor.extract(text) {
            if span.protected {
                out.push_str(self.replace_token(&span.content));
            } else {
                for token in SegmentClassifier::classify(&span.content) {
                    out.push_str(self.replace_token(&token.content));
                }
            }
        }

        out
    }

    /// First rule whose predicate accepts the entire token wins.
    fn replace_token<'a>(&'a self, token: &'a str) -> &'a str {
        for rule in &self.rules {
            if (rule.predicate)(token) {
                return &rule.replacement;
            }
        }
        token
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
