//! Pattern values
//!
//! A [`PatternValue`] is either a raw string or another value wrapped one level
//! deeper, mirroring the `Value: { Value: ... }` nesting that configuration files
//! produce. Resolution always unwraps down to the raw string.

use std::fmt;

use crate::wire::RawValue;

/// The value carried by a Literal, Anchor, or CharacterClass pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternValue {
    /// A raw string
    Literal(String),
    /// A value nested inside another value
    Nested(Box<PatternValue>),
}

impl Default for PatternValue {
    fn default() -> Self {
        PatternValue::Literal(String::new())
    }
}

impl PatternValue {
    /// Create a value from raw text, taken verbatim
    pub fn from_literal(text: impl Into<String>) -> Self {
        PatternValue::Literal(text.into())
    }

    /// Wrap another value one level deeper
    pub fn from_nested(inner: PatternValue) -> Self {
        PatternValue::Nested(Box::new(inner))
    }

    /// Create a value from text that may itself be a serialized value
    ///
    /// `{"Value": "abc"}` and `Value: abc` decode to the value they describe;
    /// any other text, including text that fails to decode or holds a
    /// non-text value such as `Value: 1.0`, is a literal.
    ///
    /// # Example
    /// ```
    /// use cfgex_core::PatternValue;
    ///
    /// assert_eq!(PatternValue::parse("Value: abc").resolve(), "abc");
    /// assert_eq!(PatternValue::parse("a{2}").resolve(), "a{2}");
    /// ```
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        let decoded = if trimmed.starts_with('{') && trimmed.ends_with('}') {
            serde_json::from_str::<RawValue>(trimmed).ok()
        } else if trimmed.contains("Value:") {
            serde_yaml::from_str::<RawValue>(trimmed).ok()
        } else {
            None
        };

        decoded
            .filter(|raw| raw.value.is_some())
            .and_then(|raw| PatternValue::try_from(raw).ok())
            .unwrap_or_else(|| PatternValue::from_literal(text))
    }

    /// Unwrap nested values down to the raw string
    pub fn resolve(&self) -> &str {
        match self {
            PatternValue::Literal(text) => text,
            PatternValue::Nested(inner) => inner.resolve(),
        }
    }

    /// The regex token this value contributes
    pub fn to_regex_token(&self) -> &str {
        self.resolve()
    }

    /// Check if the resolved string is empty
    pub fn is_empty(&self) -> bool {
        self.resolve().is_empty()
    }

    /// Number of wrapping levels above the raw string
    pub fn nesting(&self) -> usize {
        match self {
            PatternValue::Literal(_) => 0,
            PatternValue::Nested(inner) => 1 + inner.nesting(),
        }
    }
}

impl fmt::Display for PatternValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resolve())
    }
}
