// Segmentation module - cuts raw message text into spans the replacement
// engine can match as whole tokens

mod classifier;
mod protected;

pub use classifier::SegmentClassifier;
pub use protected::ProtectedSpanExtractor;
pub(crate) use protected::URL_PATTERN;

/// A contiguous substring of the input, tagged with whether it must be
/// treated as a single atomic token by the replacement engine.
///
/// Transient: spans are produced per `apply` call and never persisted.
/// Concatenating the `content` of a span sequence in order reconstructs the
/// original input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    /// The span text
    pub content: String,
    /// True if the span must not be split further (e.g. a URL)
    pub protected: bool,
}

impl TextSpan {
    pub fn protected(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            protected: true,
        }
    }

    pub fn unprotected(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            protected: false,
        }
    }
}
