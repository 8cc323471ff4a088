//! Error types for pattern decoding and compilation
//!
//! This module provides error handling using the `thiserror` crate.
//! Every failure carries a [`PatternErrorKind`] describing what went wrong and,
//! when known, the [`Location`] of the node that raised it.

use std::fmt;

use thiserror::Error;

use crate::pattern::PatternType;
use crate::symbols;

/// The specific kind of failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternErrorKind {
    /// Input text is not valid JSON/YAML, or decodes to an incomplete tree
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A `Type` outside the four supported kinds
    #[error("invalid pattern type '{0}'; valid types are: Literal, Anchor, CharacterClass, Group")]
    InvalidPatternType(String),

    /// Neither a known anchor name nor a known anchor literal
    #[error(
        "invalid anchor '{0}'; valid names are: {names}; valid literals are: {tokens}",
        names = symbols::anchor_names(),
        tokens = symbols::anchor_tokens()
    )]
    InvalidAnchor(String),

    /// Neither a known class name, a known class literal, nor a `[...]` expression
    #[error(
        "invalid character class '{0}'; valid names are: {names}; valid literals are: {tokens}",
        names = symbols::character_class_names(),
        tokens = symbols::character_class_tokens()
    )]
    InvalidCharacterClass(String),

    /// `Max` is smaller than `Min`
    #[error("invalid quantifier range: max {max} is less than min {min}")]
    InvalidQuantifierRange {
        /// The lower bound
        min: u32,
        /// The upper bound
        max: u32,
    },

    /// A named capturing group without a name
    #[error("named capturing group requires a non-empty name")]
    MissingGroupName,

    /// A group that wraps nothing
    #[error("group must contain at least one pattern")]
    EmptyGroup,

    /// Nesting deeper than the configured limit
    #[error("pattern nesting exceeds the maximum depth of {limit}")]
    MaxDepthExceeded {
        /// The configured limit
        limit: usize,
    },
}

/// Where in a pattern tree an error was raised
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    /// Child indices from the root down to the failing node
    pub path: Vec<usize>,
    /// The failing node's type, if it got far enough to have one
    pub pattern_type: Option<PatternType>,
    /// The failing node's identifier, if it has one
    pub id: Option<String>,
}

impl Location {
    /// Create a location for the node at `path`
    pub fn new(path: &[usize], pattern_type: Option<PatternType>, id: Option<&str>) -> Self {
        Location {
            path: path.to_vec(),
            pattern_type,
            id: id.map(str::to_string),
        }
    }

    /// Check if this is the root node
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "/")?;
        }
        for index in &self.path {
            write!(f, "/{}", index)?;
        }
        match (&self.pattern_type, &self.id) {
            (Some(ty), Some(id)) => write!(f, " ({}, id '{}')", ty, id),
            (Some(ty), None) => write!(f, " ({})", ty),
            (None, Some(id)) => write!(f, " (id '{}')", id),
            (None, None) => Ok(()),
        }
    }
}

/// The main error type for decoding and compiling patterns
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}{}", at(.location))]
pub struct PatternError {
    /// What went wrong
    pub kind: PatternErrorKind,
    /// The node that raised it
    pub location: Option<Location>,
}

fn at(location: &Option<Location>) -> String {
    match location {
        Some(location) => format!(" at pattern {}", location),
        None => String::new(),
    }
}

impl PatternError {
    /// Create an error with no location attached yet
    pub fn new(kind: PatternErrorKind) -> Self {
        PatternError {
            kind,
            location: None,
        }
    }

    /// Get the kind of this error
    pub fn kind(&self) -> &PatternErrorKind {
        &self.kind
    }

    /// Attach a location unless one is already present
    ///
    /// Errors are located at the innermost node, so an already located error
    /// passes through unchanged as it propagates up the tree.
    pub fn or_at(mut self, location: impl FnOnce() -> Location) -> Self {
        if self.location.is_none() {
            self.location = Some(location());
        }
        self
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        PatternError::new(PatternErrorKind::MalformedInput(message.into()))
    }
}

impl From<PatternErrorKind> for PatternError {
    fn from(kind: PatternErrorKind) -> Self {
        PatternError::new(kind)
    }
}

/// Result type alias for pattern operations
pub type Result<T> = std::result::Result<T, PatternError>;
