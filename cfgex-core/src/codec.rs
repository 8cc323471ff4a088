//! JSON and YAML encodings of pattern trees
//!
//! Both formats share one key layout (`Id`, `Type`, `Value`, `Quantifiers`,
//! `Message`, `Properties`, `Patterns`). The format of an input is sniffed from
//! its shape: a `{...}` object is JSON, anything with a `key:` line is YAML.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{PatternError, Result};
use crate::id::{IdGenerator, UuidIds};
use crate::pattern::Pattern;
use crate::wire::RawPattern;

/// A serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// JSON objects and arrays
    Json,
    /// YAML mappings and sequences
    Yaml,
}

impl Format {
    pub fn name(self) -> &'static str {
        match self {
            Format::Json => "JSON",
            Format::Yaml => "YAML",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Guess the format of a single serialized pattern
///
/// Surrounding whitespace is ignored. Returns `None` for text that is shaped
/// like neither a JSON object nor a YAML mapping.
pub fn detect_format(text: &str) -> Option<Format> {
    let trimmed = text.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        Some(Format::Json)
    } else if looks_like_yaml(trimmed) {
        Some(Format::Yaml)
    } else {
        None
    }
}

/// Guess the format of a serialized pattern list
pub fn detect_list_format(text: &str) -> Option<Format> {
    let trimmed = text.trim();
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        Some(Format::Json)
    } else if looks_like_yaml(trimmed) {
        Some(Format::Yaml)
    } else {
        None
    }
}

/// Some line holds a `key:` entry, optionally as a `- key:` list item
fn looks_like_yaml(text: &str) -> bool {
    text.lines().any(|line| {
        let line = line.trim_start();
        let line = line.strip_prefix("- ").unwrap_or(line);
        let Some((key, rest)) = line.split_once(':') else {
            return false;
        };
        let key = key.trim_end();
        !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == ' ')
            && (rest.is_empty() || rest.starts_with(char::is_whitespace))
    })
}

pub(crate) fn sniff(text: &str) -> Result<Format> {
    detect_format(text).ok_or_else(|| {
        PatternError::malformed("input is neither a JSON object nor a YAML mapping")
    })
}

/// Decode a pattern, sniffing the format and giving missing ids a random UUID
///
/// # Example
/// ```
/// use cfgex_core::codec::decode;
///
/// let pattern = decode("Type: Anchor\nValue:\n  Value: WordBoundary").unwrap();
/// assert_eq!(pattern.to_regex().unwrap(), "\\b");
/// ```
pub fn decode(text: &str) -> Result<Pattern> {
    decode_with(text, &mut UuidIds)
}

/// Decode a pattern, drawing missing ids from `ids`
pub fn decode_with(text: &str, ids: &mut dyn IdGenerator) -> Result<Pattern> {
    let format = sniff(text)?;
    decode_as(text, format, ids)
}

/// Decode a pattern in a known format
pub fn decode_as(text: &str, format: Format, ids: &mut dyn IdGenerator) -> Result<Pattern> {
    debug!(%format, bytes = text.len(), "decoding pattern");
    let raw: RawPattern = parse(text, format)?;
    raw.into_pattern(&mut Vec::new(), ids)
}

/// Decode a list of top-level patterns
pub fn decode_list(text: &str) -> Result<Vec<Pattern>> {
    decode_list_with(text, &mut UuidIds)
}

/// Decode a list of top-level patterns, drawing missing ids from `ids`
pub fn decode_list_with(text: &str, ids: &mut dyn IdGenerator) -> Result<Vec<Pattern>> {
    let format = detect_list_format(text).ok_or_else(|| {
        PatternError::malformed("input is neither a JSON array nor a YAML list")
    })?;
    debug!(%format, bytes = text.len(), "decoding pattern list");

    let raw: Vec<RawPattern> = parse(text, format)?;
    let mut path = Vec::new();
    let mut patterns = Vec::with_capacity(raw.len());
    for (index, item) in raw.into_iter().enumerate() {
        path.push(index);
        let pattern = item.into_pattern(&mut path, ids);
        path.pop();
        patterns.push(pattern?);
    }
    Ok(patterns)
}

/// Encode a pattern compactly
pub fn encode(pattern: &Pattern, format: Format) -> Result<String> {
    write(&RawPattern::from(pattern), format, false)
}

/// Encode a pattern for reading, with indented JSON
pub fn encode_pretty(pattern: &Pattern, format: Format) -> Result<String> {
    write(&RawPattern::from(pattern), format, true)
}

/// Encode a list of top-level patterns
pub fn encode_list(patterns: &[Pattern], format: Format) -> Result<String> {
    let raw: Vec<RawPattern> = patterns.iter().map(RawPattern::from).collect();
    write(&raw, format, false)
}

/// Re-encode a serialized pattern in another format
///
/// Nodes without an id receive a fresh one on the way through.
pub fn convert(text: &str, to: Format) -> Result<String> {
    let pattern = decode(text)?;
    encode_pretty(&pattern, to)
}

fn parse<T: DeserializeOwned>(text: &str, format: Format) -> Result<T> {
    match format {
        Format::Json => serde_json::from_str(text)
            .map_err(|e| PatternError::malformed(format!("invalid JSON: {}", e))),
        Format::Yaml => serde_yaml::from_str(text)
            .map_err(|e| PatternError::malformed(format!("invalid YAML: {}", e))),
    }
}

fn write<T: Serialize>(value: &T, format: Format, pretty: bool) -> Result<String> {
    match format {
        Format::Json if pretty => serde_json::to_string_pretty(value)
            .map_err(|e| PatternError::malformed(format!("cannot encode JSON: {}", e))),
        Format::Json => serde_json::to_string(value)
            .map_err(|e| PatternError::malformed(format!("cannot encode JSON: {}", e))),
        Format::Yaml => serde_yaml::to_string(value)
            .map_err(|e| PatternError::malformed(format!("cannot encode YAML: {}", e))),
    }
}
