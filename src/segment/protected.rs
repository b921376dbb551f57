// Protected span extractor - finds URL-shaped spans ahead of classification
// so they are matched as atomic units instead of being torn apart

use regex::Regex;

use super::TextSpan;

/// Characters that may not terminate a URL match. A trailing run of these is
/// trimmed off and returned to the surrounding text, mirroring the usual
/// "URL followed by sentence punctuation" chat pattern.
const TRAILING_EXCLUDED: &[char] = &[
    '.', ',', ';', ':', '!', '?', '、', '。', '」', '』', '）',
];

/// Source of the URL matcher. The body runs until whitespace (including the
/// full-width space), angle brackets, quotes, braces, pipe, backslash, caret,
/// backtick, or CJK/full-width punctuation; CJK letters themselves are legal
/// URL-path characters and stay in. Shared with the abbreviation
/// dictionary's whole-token URL rule.
pub(crate) const URL_PATTERN: &str = r#"(?:https?|ftp)://[^\s\u{3000}-\u{303F}<>"{}|\\^`\u{FF00}-\u{FF0F}\u{FF1A}-\u{FF20}\u{FF3B}-\u{FF40}\u{FF5B}-\u{FF65}]+"#;

/// Finds non-overlapping, leftmost URL matches and partitions the input into
/// protected URL spans and unprotected surrounding spans.
///
/// Only `http`, `https` and `ftp` schemes qualify; `data:`, `mailto:`,
/// `javascript:` and `file:` never match. The body runs until whitespace
/// (including the full-width space), angle brackets, quotes, braces, pipe,
/// backslash, caret or backtick.
pub struct ProtectedSpanExtractor {
    url_pattern: Regex,
}

impl ProtectedSpanExtractor {
    pub fn new() -> Self {
        // The trailing-punctuation guard is applied as an explicit trim after
        // matching; the regex crate has no lookbehind.
        let url_pattern = Regex::new(URL_PATTERN).expect("URL pattern is a fixed, valid regex");
        Self { url_pattern }
    }

    /// Partition text into an ordered span sequence.
    ///
    /// Empty spans are dropped and concatenation is lossless: every character
    /// of the input lands in exactly one span, in order.
    pub fn extract(&self, text: &str) -> Vec<TextSpan> {
        let mut spans = Vec::new();
        let mut last_end = 0;

        for m in self.url_pattern.find_iter(text) {
            let Some(trimmed) = self.trim_trailing(m.as_str()) else {
                // Nothing but excluded punctuation after the scheme; the
                // candidate is not a URL at all.
                continue;
            };
            let end = m.start() + trimmed.len();

            if m.start() > last_end {
                spans.push(TextSpan::unprotected(&text[last_end..m.start()]));
            }
            spans.push(TextSpan::protected(trimmed));
            last_end = end;
        }

        if last_end < text.len() {
            spans.push(TextSpan::unprotected(&text[last_end..]));
        }

        spans
    }

    /// Strip trailing excluded punctuation. Returns `None` if the trim eats
    /// the whole body, i.e. the match was scheme + punctuation only.
    fn trim_trailing<'a>(&self, matched: &'a str) -> Option<&'a str> {
        let body_start = matched.find("://").map(|i| i + 3)?;
        let mut end = matched.len();

        while end > body_start {
            let Some(ch) = matched[..end].chars().next_back() else {
                break;
            };
            if TRAILING_EXCLUDED.contains(&ch) {
                end -= ch.len_utf8();
            } else {
                break;
            }
        }

        if end == body_start {
            None
        } else {
            Some(&matched[..end])
        }
    }
}

impl Default for ProtectedSpanExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "protected_test.rs"]
mod tests;
