//! Serde wire types shared by the JSON and YAML encodings
//!
//! Both encodings use the same PascalCase keys. The raw types accept anything
//! structurally plausible; [`RawPattern::into_pattern`] does the validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Location, PatternError, Result};
use crate::id::IdGenerator;
use crate::pattern::{Pattern, PatternKind, PatternProperties, PatternType};
use crate::quantifier::Quantifier;
use crate::value::PatternValue;

/// Raw pattern node as it appears in JSON/YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct RawPattern {
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub pattern_type: Option<String>,
    #[serde(rename = "Value", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<RawValueContent>,
    #[serde(rename = "Quantifiers", default, skip_serializing_if = "Option::is_none")]
    pub quantifiers: Option<Quantifier>,
    #[serde(rename = "Message", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "Properties", default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<PatternProperties>,
    #[serde(rename = "Patterns", default, skip_serializing_if = "Option::is_none")]
    pub patterns: Option<Vec<RawPattern>>,
}

/// Raw `{ "Value": ... }` object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct RawValue {
    #[serde(rename = "Value", default)]
    pub value: Option<RawValueContent>,
}

/// What a `Value` key may hold
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawValueContent {
    Scalar(RawScalar),
    Nested(Box<RawValue>),
}

/// Any scalar a `Value` key may hold
///
/// Only text is a valid value. Numbers and booleans are still accepted by the
/// deserializer so they can be reported, since YAML reads an unquoted `1.0` or
/// `0x1F` as a number and the original text is lost.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawScalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl RawScalar {
    fn into_text(self) -> Result<String> {
        match self {
            RawScalar::Text(text) => Ok(text),
            RawScalar::Boolean(b) => Err(PatternError::malformed(format!(
                "boolean `Value` {} is not text; quote it to keep it verbatim",
                b
            ))),
            number => Err(PatternError::malformed(format!(
                "numeric `Value` {} is not text; quote it to keep it verbatim",
                number
            ))),
        }
    }
}

impl fmt::Display for RawScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawScalar::Text(text) => f.write_str(text),
            RawScalar::Integer(n) => write!(f, "{}", n),
            RawScalar::Float(x) => write!(f, "{}", x),
            RawScalar::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl TryFrom<RawValue> for PatternValue {
    type Error = PatternError;

    fn try_from(raw: RawValue) -> Result<Self> {
        match raw.value {
            None => Ok(PatternValue::default()),
            Some(RawValueContent::Scalar(scalar)) => {
                scalar.into_text().map(PatternValue::from_literal)
            }
            Some(RawValueContent::Nested(inner)) => {
                PatternValue::try_from(*inner).map(PatternValue::from_nested)
            }
        }
    }
}

impl From<&PatternValue> for RawValue {
    fn from(value: &PatternValue) -> Self {
        let content = match value {
            PatternValue::Literal(text) => RawValueContent::Scalar(RawScalar::Text(text.clone())),
            PatternValue::Nested(inner) => {
                RawValueContent::Nested(Box::new(RawValue::from(inner.as_ref())))
            }
        };
        RawValue {
            value: Some(content),
        }
    }
}

impl RawValueContent {
    /// Interpret the content of a node's `Value` key
    ///
    /// The object form is the value itself; a bare scalar is shorthand for a literal.
    fn into_node_value(self) -> Result<PatternValue> {
        match self {
            RawValueContent::Scalar(scalar) => scalar.into_text().map(PatternValue::from_literal),
            RawValueContent::Nested(raw) => PatternValue::try_from(*raw),
        }
    }

    fn from_node_value(value: &PatternValue) -> Self {
        RawValueContent::Nested(Box::new(RawValue::from(value)))
    }
}

impl RawPattern {
    /// Validate and convert into a typed pattern
    ///
    /// `path` is the index path of this node from the root; nodes without an
    /// `Id` receive one from `ids`.
    pub(crate) fn into_pattern(
        self,
        path: &mut Vec<usize>,
        ids: &mut dyn IdGenerator,
    ) -> Result<Pattern> {
        let RawPattern {
            id,
            pattern_type,
            value,
            quantifiers,
            message,
            properties,
            patterns,
        } = self;

        let Some(type_name) = pattern_type else {
            return Err(PatternError::malformed("missing required field `Type`")
                .or_at(|| Location::new(path.as_slice(), None, id.as_deref())));
        };
        let pattern_type: PatternType = type_name
            .parse()
            .map_err(|e: PatternError| e.or_at(|| Location::new(path.as_slice(), None, id.as_deref())))?;

        let mut pattern = match pattern_type {
            PatternType::Group => {
                let Some(properties) = properties else {
                    return Err(PatternError::malformed("group is missing `Properties`").or_at(
                        || Location::new(path.as_slice(), Some(pattern_type), id.as_deref()),
                    ));
                };
                let mut children = Vec::new();
                for (index, child) in patterns.unwrap_or_default().into_iter().enumerate() {
                    path.push(index);
                    let child = child.into_pattern(path, ids);
                    path.pop();
                    children.push(child?);
                }
                Pattern::group(properties, children)
            }
            leaf => {
                if patterns.as_ref().is_some_and(|p| !p.is_empty()) {
                    tracing::debug!(?path, %leaf, "ignoring `Patterns` on a non-group pattern");
                }
                if properties.is_some() {
                    tracing::debug!(?path, %leaf, "ignoring `Properties` on a non-group pattern");
                }
                let located = |e: PatternError| {
                    e.or_at(|| Location::new(path.as_slice(), Some(leaf), id.as_deref()))
                };
                let value = value
                    .map(RawValueContent::into_node_value)
                    .transpose()
                    .map_err(located)?
                    .unwrap_or_default();
                Pattern::leaf(leaf, value).map_err(located)?
            }
        };

        pattern.set_id(Some(id.unwrap_or_else(|| ids.next_id())));
        pattern.set_message(message);
        pattern.set_quantifiers(quantifiers);
        Ok(pattern)
    }
}

impl From<&Pattern> for RawPattern {
    fn from(pattern: &Pattern) -> Self {
        let (value, properties, patterns) = match pattern.kind() {
            PatternKind::Literal(value)
            | PatternKind::Anchor(value)
            | PatternKind::CharacterClass(value) => {
                (Some(RawValueContent::from_node_value(value)), None, None)
            }
            PatternKind::Group {
                patterns,
                properties,
            } => (
                None,
                Some(properties.clone()),
                Some(patterns.iter().map(RawPattern::from).collect()),
            ),
        };

        RawPattern {
            id: pattern.id().map(str::to_string),
            pattern_type: Some(pattern.pattern_type().name().to_string()),
            value,
            quantifiers: pattern.quantifiers().copied(),
            message: pattern.message().map(str::to_string),
            properties,
            patterns,
        }
    }
}
