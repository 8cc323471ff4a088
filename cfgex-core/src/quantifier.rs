//! Repetition specifications and their regex suffixes

use serde::{Deserialize, Serialize};

use crate::error::{PatternErrorKind, Result};

/// How many times a pattern may repeat
///
/// All fields are optional; an empty quantifier produces no suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Quantifier {
    /// The minimum number of repetitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    /// The maximum number of repetitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    /// An exact number of repetitions, overriding `min`/`max` when positive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exactly: Option<u32>,
    /// Match as few repetitions as possible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lazy: Option<bool>,
    /// Repeat without a stated bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greedy: Option<bool>,
}

impl Quantifier {
    /// Exactly `n` times ({n})
    pub fn exactly(n: u32) -> Self {
        Quantifier {
            exactly: Some(n),
            ..Default::default()
        }
    }

    /// At least `min` times
    pub fn at_least(min: u32) -> Self {
        Quantifier {
            min: Some(min),
            ..Default::default()
        }
    }

    /// At most `max` times ({,max})
    pub fn at_most(max: u32) -> Self {
        Quantifier {
            max: Some(max),
            ..Default::default()
        }
    }

    /// Between `min` and `max` times
    pub fn between(min: u32, max: u32) -> Self {
        Quantifier {
            min: Some(min),
            max: Some(max),
            ..Default::default()
        }
    }

    /// Zero or more, with no stated bound
    pub fn greedy() -> Self {
        Quantifier {
            greedy: Some(true),
            ..Default::default()
        }
    }

    /// Make this quantifier lazy
    pub fn lazy(mut self) -> Self {
        self.lazy = Some(true);
        self
    }

    /// Check if any field is set
    pub fn is_empty(&self) -> bool {
        *self == Quantifier::default()
    }

    /// Check if a bare `*` may follow `preceding`
    ///
    /// Only applies when no explicit bound was given, and never directly after
    /// another repetition operator.
    pub fn can_be_greedy(&self, preceding: &str) -> bool {
        self.greedy == Some(true)
            && self.exactly.is_none()
            && self.min.is_none()
            && self.max.is_none()
            && !preceding.ends_with(['*', '+', '?'])
    }

    /// Compile to the regex suffix that follows `preceding`
    ///
    /// The first matching rule wins:
    /// - `exactly > 0` gives `{n}`
    /// - `min = 0` without `max` gives `*`
    /// - `min = 1` without `max` gives `+`
    /// - `min = 0, max = 1` gives `?`
    /// - `max < min` is an error
    /// - any other bound gives `{min,max}` with unset bounds left blank
    ///
    /// A greedy `*` and a lazy `?` are then appended where they apply.
    pub fn to_suffix(&self, preceding: &str) -> Result<String> {
        let mut suffix = match (self.exactly, self.min, self.max) {
            (Some(n), _, _) if n > 0 => format!("{{{}}}", n),
            (_, Some(0), None) => "*".to_string(),
            (_, Some(1), None) => "+".to_string(),
            (_, Some(0), Some(1)) => "?".to_string(),
            (_, Some(min), Some(max)) if max < min => {
                return Err(PatternErrorKind::InvalidQuantifierRange { min, max }.into());
            }
            (_, None, None) => String::new(),
            (_, min, max) => format!(
                "{{{},{}}}",
                min.map(|n| n.to_string()).unwrap_or_default(),
                max.map(|n| n.to_string()).unwrap_or_default()
            ),
        };

        if self.can_be_greedy(preceding) {
            suffix.push('*');
        }

        if self.lazy == Some(true) && !suffix.ends_with('?') {
            suffix.push('?');
        }

        Ok(suffix)
    }
}
