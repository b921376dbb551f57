// Segment classifier - splits text into alternating Latin/code-like and
// other-script runs so downstream rules can test whole tokens

use super::TextSpan;

/// Splits text into maximal alternating runs of the Latin/code character
/// class vs everything else.
///
/// Downstream rules ask questions like "is this entire token an IPv4
/// literal?", so machine-readable tokens have to be cut away from the
/// surrounding prose before any rule runs. Kanji/kana, Cyrillic, emoji and
/// whitespace all land in the "other" class and pass through untouched.
pub struct SegmentClassifier;

impl SegmentClassifier {
    /// Classify text into an ordered span sequence.
    ///
    /// Empty runs are dropped and concatenating the results reconstructs the
    /// input exactly. All produced spans are unprotected.
    pub fn classify(text: &str) -> Vec<TextSpan> {
        let mut spans = Vec::new();
        let mut current = String::new();
        let mut current_latin: Option<bool> = None;

        for ch in text.chars() {
            let latin = Self::is_latin_class(ch);

            match current_latin {
                Some(prev) if prev == latin => current.push(ch),
                Some(_) => {
                    spans.push(TextSpan::unprotected(std::mem::take(&mut current)));
                    current.push(ch);
                    current_latin = Some(latin);
                }
                None => {
                    current.push(ch);
                    current_latin = Some(latin);
                }
            }
        }

        if !current.is_empty() {
            spans.push(TextSpan::unprotected(current));
        }

        spans
    }

    /// Character class for "Latin/code-like" runs: ASCII alphanumerics plus
    /// the symbols that glue URLs, IPs, domains and numbers together.
    fn is_latin_class(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || matches!(ch, ':' | '/' | '#' | '$' | '%' | '&' | '.' | ',' | '-' | '?' | '_')
    }
}

#[cfg(test)]
#[path = "classifier_test.rs"]
mod tests;
