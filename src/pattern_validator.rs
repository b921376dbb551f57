// Pattern validator - guards user-supplied regexes against syntax errors and
// known catastrophic-backtracking shapes before they enter a dictionary

use regex::Regex;

/// Result of validating one user-supplied pattern source.
#[derive(Debug)]
pub enum ValidationResult {
    /// Pattern compiled and passed the safety heuristic
    Valid(Regex),
    /// Pattern was rejected; the reason is shown to the user as-is
    Invalid(String),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    pub fn pattern(&self) -> Option<&Regex> {
        match self {
            ValidationResult::Valid(regex) => Some(regex),
            ValidationResult::Invalid(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ValidationResult::Valid(_) => None,
            ValidationResult::Invalid(reason) => Some(reason),
        }
    }
}

/// Validates pattern sources for dictionary targets.
///
/// The ReDoS check is a conservative shape heuristic over the pattern's
/// source text, not its compiled form: it flags a quantified group containing
/// an inner quantifier (`(a+)+`) and a quantified alternation (`(a|b)+`),
/// whether or not the concrete pattern is actually exploitable. Bounded
/// repetitions like `a{1,10}` pass, and some exploitable shapes are not
/// caught; there is no runtime step budget behind this.
pub struct PatternValidator {
    redos_shape: Regex,
}

impl PatternValidator {
    pub fn new() -> Self {
        let redos_shape = Regex::new(r"\([^)]*[+*][^)]*\)[+*]|\([^)]*\|[^)]*\)[+*]")
            .expect("ReDoS shape pattern is a fixed, valid regex");
        Self { redos_shape }
    }

    /// Compile and safety-check one pattern source.
    pub fn validate(&self, source: &str) -> ValidationResult {
        match Regex::new(source) {
            Ok(pattern) => {
                if self.is_potentially_dangerous(source) {
                    ValidationResult::Invalid(
                        "この正規表現はパフォーマンス上の問題を引き起こす可能性があります"
                            .to_string(),
                    )
                } else {
                    ValidationResult::Valid(pattern)
                }
            }
            Err(e) => ValidationResult::Invalid(format!("無効な正規表現です: {e}")),
        }
    }

    /// The shape heuristic on its own, without compiling.
    pub fn is_potentially_dangerous(&self, source: &str) -> bool {
        self.redos_shape.is_match(source)
    }
}

impl Default for PatternValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "pattern_validator_test.rs"]
mod tests;
