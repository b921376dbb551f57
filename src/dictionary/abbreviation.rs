// Abbreviation dictionary - built-in replacement of hard-to-pronounce spans
// (URLs, IP literals, domain names, code) with short spoken markers

use regex::Regex;

use crate::replace::{PriorityReplacementEngine, ReplacementRule};

/// Marker read aloud in place of a URL
pub const URL_MARKER: &str = "ユーアルエルショウリャク";
/// Marker read aloud in place of an IPv4 literal
pub const IPV4_MARKER: &str = "アイピーブイフォーショウリャク";
/// Marker read aloud in place of an IPv6 literal
pub const IPV6_MARKER: &str = "アイピーブイロクショウリャク";
/// Marker read aloud in place of a bare domain name
pub const DOMAIN_MARKER: &str = "ドメインショウリャク";
/// Marker read aloud in place of a fenced code block
pub const CODE_BLOCK_MARKER: &str = "コードブロックショウリャク";

/// A piece of the input during code protection. Code segments are opaque to
/// the replacement engine; only prose is normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Prose(String),
    /// Single-backtick inline code, kept verbatim (backticks included)
    InlineCode(String),
    /// A fenced code block, collapsed wholesale to [`CODE_BLOCK_MARKER`]
    FenceMarker,
}

/// Built-in dictionary that shortens machine-readable spans to markers.
///
/// Inline code and fenced code blocks are carried through the pipeline as a
/// tagged segment sequence rather than string-embedded placeholders, so no
/// placeholder token can ever collide with literal input. Four-space-indented
/// Markdown code is not recognized and falls through to ordinary
/// tokenization.
pub struct AbbreviationDictionary {
    inline_code: Regex,
    engine: PriorityReplacementEngine,
}

impl AbbreviationDictionary {
    pub fn new() -> Self {
        let inline_code =
            Regex::new("`[^`\n]+`").expect("inline code pattern is a fixed, valid regex");

        let url = Regex::new(&format!("^{}$", crate::segment::URL_PATTERN))
            .expect("URL token pattern is a fixed, valid regex");
        let ipv6 = Regex::new(
            "^(?:(?:[0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}\
            |(?:[0-9a-fA-F]{1,4}:){1,7}:\
            |(?:[0-9a-fA-F]{1,4}:){1,6}:[0-9a-fA-F]{1,4}\
            |(?:[0-9a-fA-F]{1,4}:){1,5}(?::[0-9a-fA-F]{1,4}){1,2}\
            |(?:[0-9a-fA-F]{1,4}:){1,4}(?::[0-9a-fA-F]{1,4}){1,3}\
            |(?:[0-9a-fA-F]{1,4}:){1,3}(?::[0-9a-fA-F]{1,4}){1,4}\
            |(?:[0-9a-fA-F]{1,4}:){1,2}(?::[0-9a-fA-F]{1,4}){1,5}\
            |[0-9a-fA-F]{1,4}:(?::[0-9a-fA-F]{1,4}){1,6}\
            |:(?:(?::[0-9a-fA-F]{1,4}){1,7}|:)\
            |fe80:(?::[0-9a-fA-F]{0,4}){0,4}%[0-9a-zA-Z]+\
            |::(?:ffff(?::0{1,4})?:)?(?:(?:25[0-5]|(?:2[0-4]|1?[0-9])?[0-9])\\.){3}(?:25[0-5]|(?:2[0-4]|1?[0-9])?[0-9])\
            |(?:[0-9a-fA-F]{1,4}:){1,4}:(?:(?:25[0-5]|(?:2[0-4]|1?[0-9])?[0-9])\\.){3}(?:25[0-5]|(?:2[0-4]|1?[0-9])?[0-9]))$",
        )
        .expect("IPv6 token pattern is a fixed, valid regex");
        let ipv4 = Regex::new(
            r"^(?:(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])$",
        )
        .expect("IPv4 token pattern is a fixed, valid regex");
        let domain = Regex::new(r"^(?:[a-zA-Z0-9][a-zA-Z0-9-]*[a-zA-Z0-9]*\.)+[a-zA-Z]{2,}$")
            .expect("domain token pattern is a fixed, valid regex");

        // IP rules run before the domain rule: a dotted quad would otherwise
        // be accepted as domain labels
        let engine = PriorityReplacementEngine::new(vec![
            ReplacementRule::new(0, URL_MARKER, move |t: &str| url.is_match(t)),
            ReplacementRule::new(1, IPV6_MARKER, move |t: &str| ipv6.is_match(t)),
            ReplacementRule::new(1, IPV4_MARKER, move |t: &str| ipv4.is_match(t)),
            ReplacementRule::new(2, DOMAIN_MARKER, move |t: &str| domain.is_match(t)),
        ]);

        Self {
            inline_code,
            engine,
        }
    }

    /// Normalize one message. Guild context is unused: the rule set is fixed
    /// and identical for every guild.
    pub fn apply(&self, text: &str, _guild_id: u64) -> String {
        let segments = self.collapse_fences(self.protect_inline_code(text));

        let mut out = String::with_capacity(text.len());
        for segment in segments {
            match segment {
                Segment::Prose(prose) => out.push_str(&self.engine.apply(&prose)),
                Segment::InlineCode(code) => out.push_str(&code),
                Segment::FenceMarker => out.push_str(CODE_BLOCK_MARKER),
            }
        }
        out
    }

    /// Pass 1: tag single-backtick inline-code spans (no embedded newline).
    fn protect_inline_code(&self, text: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut last_end = 0;

        for m in self.inline_code.find_iter(text) {
            if m.start() > last_end {
                segments.push(Segment::Prose(text[last_end..m.start()].to_string()));
            }
            segments.push(Segment::InlineCode(m.as_str().to_string()));
            last_end = m.end();
        }
        if last_end < text.len() {
            segments.push(Segment::Prose(text[last_end..].to_string()));
        }

        segments
    }

    /// Pass 2: collapse triple-backtick fences to markers, non-greedily to
    /// the nearest closing fence. A fence may span inline-code segments
    /// tagged in pass 1; those are swallowed with the rest of the block.
    /// An opening fence with no closing fence stays literal prose.
    fn collapse_fences(&self, segments: Vec<Segment>) -> Vec<Segment> {
        let mut out = Vec::new();
        let mut idx = 0;
        let mut offset = 0;

        while idx < segments.len() {
            let Segment::Prose(prose) = &segments[idx] else {
                out.push(segments[idx].clone());
                idx += 1;
                offset = 0;
                continue;
            };

            match prose[offset..].find("```") {
                None => {
                    if offset < prose.len() {
                        out.push(Segment::Prose(prose[offset..].to_string()));
                    }
                    idx += 1;
                    offset = 0;
                }
                Some(rel) => {
                    let open = offset + rel;
                    match Self::find_closing_fence(&segments, idx, open + 3) {
                        Some((close_idx, close_end)) => {
                            if open > offset {
                                out.push(Segment::Prose(prose[offset..open].to_string()));
                            }
                            out.push(Segment::FenceMarker);
                            idx = close_idx;
                            offset = close_end;
                        }
                        None => {
                            // No closing fence anywhere later; the rest of
                            // this prose is literal
                            out.push(Segment::Prose(prose[offset..].to_string()));
                            idx += 1;
                            offset = 0;
                        }
                    }
                }
            }
        }

        out
    }

    /// Nearest `` ``` `` at or after (`start_idx`, `start_offset`), searching
    /// prose segments only. Returns the segment index and the byte offset
    /// just past the closing fence.
    fn find_closing_fence(
        segments: &[Segment],
        start_idx: usize,
        start_offset: usize,
    ) -> Option<(usize, usize)> {
        for (idx, segment) in segments.iter().enumerate().skip(start_idx) {
            let Segment::Prose(prose) = segment else {
                continue;
            };
            let from = if idx == start_idx { start_offset } else { 0 };
            if from > prose.len() {
                continue;
            }
            if let Some(rel) = prose[from..].find("```") {
                return Some((idx, from + rel + 3));
            }
        }
        None
    }

    pub fn id(&self) -> &'static str {
        "abbreviation"
    }

    pub fn display_name(&self) -> &'static str {
        "省略辞書"
    }

    pub fn is_built_in(&self) -> bool {
        true
    }

    pub fn default_priority(&self) -> i32 {
        1
    }

    /// Fixed explanatory listing shown by configuration tooling.
    pub fn show_info(&self, _guild_id: u64) -> Vec<(String, String)> {
        vec![
            ("https://...".to_string(), "URL省略".to_string()),
            ("``` コードブロック ```".to_string(), "コードブロック省略".to_string()),
        ]
    }
}

impl Default for AbbreviationDictionary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "abbreviation_test.rs"]
mod tests;
