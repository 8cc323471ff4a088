//! Pattern tree types
//!
//! A [`Pattern`] is one node of a regex description: a literal, an anchor, a
//! character class, or a group wrapping an ordered list of child patterns.
//! Leaf values are validated on construction so an invalid anchor or class
//! name never makes it into a tree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::compiler::Compiler;
use crate::error::{PatternError, PatternErrorKind, Result};
use crate::id::IdGenerator;
use crate::quantifier::Quantifier;
use crate::symbols;
use crate::value::PatternValue;

/// The four kinds of pattern node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternType {
    /// Raw regex text, emitted verbatim
    Literal,
    /// A zero-width assertion such as `^` or `\b`
    Anchor,
    /// A character class such as `\d` or `[a-z]`
    CharacterClass,
    /// A parenthesized sequence of child patterns
    Group,
}

impl PatternType {
    /// Every pattern type
    pub const ALL: [PatternType; 4] = [
        PatternType::Literal,
        PatternType::Anchor,
        PatternType::CharacterClass,
        PatternType::Group,
    ];

    /// The name used for the `Type` key
    pub fn name(self) -> &'static str {
        match self {
            PatternType::Literal => "Literal",
            PatternType::Anchor => "Anchor",
            PatternType::CharacterClass => "CharacterClass",
            PatternType::Group => "Group",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternType {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        PatternType::ALL
            .into_iter()
            .find(|ty| ty.name() == s)
            .ok_or_else(|| PatternErrorKind::InvalidPatternType(s.to_string()).into())
    }
}

/// How a group captures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupType {
    /// `(?:...)`
    #[default]
    NonCapturing,
    /// `(...)`
    Capturing,
    /// `(?<name>...)` and friends, see [`NamedGroupStyle`]
    NamedCapturing,
}

/// Syntax used to open a named capturing group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedGroupStyle {
    /// `(?'name'...)`
    SingleQuote,
    /// `(?<name>...)`
    #[default]
    AngleBrackets,
    /// `(?P<name>...)`
    PStyle,
}

impl NamedGroupStyle {
    /// The opening text of a group named `name`
    pub fn open(self, name: &str) -> String {
        match self {
            NamedGroupStyle::SingleQuote => format!("(?'{}'", name),
            NamedGroupStyle::AngleBrackets => format!("(?<{}>", name),
            NamedGroupStyle::PStyle => format!("(?P<{}>", name),
        }
    }
}

/// Group configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PatternProperties {
    /// Group name, required for [`GroupType::NamedCapturing`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// How the group captures; non-capturing when absent
    #[serde(default)]
    pub group_type: GroupType,
    /// Syntax used to open a named group
    #[serde(default)]
    pub named_group_style: NamedGroupStyle,
}

impl PatternProperties {
    /// Properties for a `(?:...)` group
    pub fn non_capturing() -> Self {
        PatternProperties::default()
    }

    /// Properties for a `(...)` group
    pub fn capturing() -> Self {
        PatternProperties {
            group_type: GroupType::Capturing,
            ..Default::default()
        }
    }

    /// Properties for a named capturing group
    pub fn named(name: impl Into<String>, style: NamedGroupStyle) -> Self {
        PatternProperties {
            name: Some(name.into()),
            group_type: GroupType::NamedCapturing,
            named_group_style: style,
        }
    }

    /// The group name, if it is present and not blank
    pub fn group_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.trim().is_empty())
    }
}

/// What a pattern node holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternKind {
    /// Text emitted verbatim
    Literal(PatternValue),
    /// A position assertion, by name or token
    Anchor(PatternValue),
    /// A character class, by name, token or bracket expression
    CharacterClass(PatternValue),
    /// Child patterns wrapped in a group
    Group {
        patterns: Vec<Pattern>,
        properties: PatternProperties,
    },
}

/// A node in a pattern tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    id: Option<String>,
    message: Option<String>,
    quantifiers: Option<Quantifier>,
    kind: PatternKind,
}

impl Pattern {
    fn from_kind(kind: PatternKind) -> Self {
        Pattern {
            id: None,
            message: None,
            quantifiers: None,
            kind,
        }
    }

    /// A literal emitted verbatim
    pub fn literal(text: impl Into<String>) -> Self {
        Pattern::from_kind(PatternKind::Literal(PatternValue::from_literal(text)))
    }

    /// An anchor given by name (`WordBoundary`) or token (`\b`)
    pub fn anchor(value: impl Into<String>) -> Result<Self> {
        Pattern::leaf(PatternType::Anchor, PatternValue::from_literal(value))
    }

    /// A character class given by name (`Digit`), token (`\d`), or bracket expression
    pub fn character_class(value: impl Into<String>) -> Result<Self> {
        Pattern::leaf(PatternType::CharacterClass, PatternValue::from_literal(value))
    }

    /// A group around `patterns`
    pub fn group(properties: PatternProperties, patterns: Vec<Pattern>) -> Self {
        Pattern::from_kind(PatternKind::Group {
            patterns,
            properties,
        })
    }

    /// A non-group pattern of the given type
    ///
    /// Anchor and character class values must resolve to a known name or token.
    pub fn leaf(pattern_type: PatternType, value: PatternValue) -> Result<Self> {
        leaf_kind(pattern_type, value).map(Pattern::from_kind)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_quantifiers(mut self, quantifiers: impl Into<Option<Quantifier>>) -> Self {
        self.quantifiers = quantifiers.into();
        self
    }

    /// Replace the value of a leaf pattern, validating it as on construction
    pub fn try_with_value(mut self, value: PatternValue) -> Result<Self> {
        self.kind = leaf_kind(self.pattern_type(), value)?;
        Ok(self)
    }

    pub(crate) fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    pub(crate) fn set_message(&mut self, message: Option<String>) {
        self.message = message;
    }

    pub(crate) fn set_quantifiers(&mut self, quantifiers: Option<Quantifier>) {
        self.quantifiers = quantifiers;
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Free-form annotation; never affects the compiled output
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn quantifiers(&self) -> Option<&Quantifier> {
        self.quantifiers.as_ref()
    }

    pub fn kind(&self) -> &PatternKind {
        &self.kind
    }

    pub fn pattern_type(&self) -> PatternType {
        match self.kind {
            PatternKind::Literal(_) => PatternType::Literal,
            PatternKind::Anchor(_) => PatternType::Anchor,
            PatternKind::CharacterClass(_) => PatternType::CharacterClass,
            PatternKind::Group { .. } => PatternType::Group,
        }
    }

    /// The value of a leaf pattern, or `None` for a group
    pub fn value(&self) -> Option<&PatternValue> {
        match &self.kind {
            PatternKind::Literal(value)
            | PatternKind::Anchor(value)
            | PatternKind::CharacterClass(value) => Some(value),
            PatternKind::Group { .. } => None,
        }
    }

    /// Child patterns, empty for a leaf
    pub fn patterns(&self) -> &[Pattern] {
        match &self.kind {
            PatternKind::Group { patterns, .. } => patterns,
            _ => &[],
        }
    }

    /// Child patterns of a group, for in-place editing
    pub fn patterns_mut(&mut self) -> Option<&mut Vec<Pattern>> {
        match &mut self.kind {
            PatternKind::Group { patterns, .. } => Some(patterns),
            _ => None,
        }
    }

    pub fn properties(&self) -> Option<&PatternProperties> {
        match &self.kind {
            PatternKind::Group { properties, .. } => Some(properties),
            _ => None,
        }
    }

    /// Give every node without an identifier one from `ids`
    ///
    /// Children are visited before their parent.
    pub fn assign_ids(&mut self, ids: &mut dyn IdGenerator) {
        if let Some(children) = self.patterns_mut() {
            for child in children.iter_mut() {
                child.assign_ids(ids);
            }
        }
        if self.id.is_none() {
            self.id = Some(ids.next_id());
        }
    }

    /// Number of nodes in this tree, including the root
    pub fn node_count(&self) -> usize {
        1 + self.patterns().iter().map(Pattern::node_count).sum::<usize>()
    }

    /// Levels of nesting, where a leaf has depth 1
    pub fn depth(&self) -> usize {
        1 + self.patterns().iter().map(Pattern::depth).max().unwrap_or(0)
    }

    /// Compile with default options
    pub fn to_regex(&self) -> Result<String> {
        Compiler::new().compile(self)
    }
}

fn leaf_kind(pattern_type: PatternType, value: PatternValue) -> Result<PatternKind> {
    let token = value.resolve();
    match pattern_type {
        PatternType::Literal => Ok(PatternKind::Literal(value)),
        PatternType::Anchor if symbols::anchor_token(token).is_some() => {
            Ok(PatternKind::Anchor(value))
        }
        PatternType::Anchor => Err(PatternErrorKind::InvalidAnchor(token.to_string()).into()),
        PatternType::CharacterClass if symbols::character_class_token(token).is_some() => {
            Ok(PatternKind::CharacterClass(value))
        }
        PatternType::CharacterClass => {
            Err(PatternErrorKind::InvalidCharacterClass(token.to_string()).into())
        }
        PatternType::Group => Err(PatternError::malformed(
            "a Group holds child patterns, not a value",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIds;

    #[test]
    fn test_pattern_type_from_str() {
        assert_eq!("Literal".parse::<PatternType>().unwrap(), PatternType::Literal);
        assert_eq!("Group".parse::<PatternType>().unwrap(), PatternType::Group);
        let err = "literal".parse::<PatternType>().unwrap_err();
        assert_eq!(
            err.kind(),
            &PatternErrorKind::InvalidPatternType("literal".to_string())
        );
    }

    #[test]
    fn test_literal_keeps_value() {
        let pattern = Pattern::literal("abc").with_id("lit").with_message("note");
        assert_eq!(pattern.pattern_type(), PatternType::Literal);
        assert_eq!(pattern.value().map(PatternValue::resolve), Some("abc"));
        assert_eq!(pattern.id(), Some("lit"));
        assert_eq!(pattern.message(), Some("note"));
        assert!(pattern.patterns().is_empty());
        assert!(pattern.properties().is_none());
    }

    #[test]
    fn test_anchor_accepts_name_and_token() {
        assert!(Pattern::anchor("WordBoundary").is_ok());
        assert!(Pattern::anchor("\\b").is_ok());
    }

    #[test]
    fn test_invalid_anchor_rejected() {
        let err = Pattern::anchor("Nowhere").unwrap_err();
        assert_eq!(err.kind(), &PatternErrorKind::InvalidAnchor("Nowhere".to_string()));
    }

    #[test]
    fn test_character_class_forms() {
        assert!(Pattern::character_class("Digit").is_ok());
        assert!(Pattern::character_class("\\w").is_ok());
        assert!(Pattern::character_class("[a-f0-9]").is_ok());
        let err = Pattern::character_class("Digits").unwrap_err();
        assert_eq!(
            err.kind(),
            &PatternErrorKind::InvalidCharacterClass("Digits".to_string())
        );
    }

    #[test]
    fn test_leaf_rejects_group() {
        let err = Pattern::leaf(PatternType::Group, PatternValue::default()).unwrap_err();
        assert!(matches!(err.kind(), PatternErrorKind::MalformedInput(_)));
    }

    #[test]
    fn test_try_with_value_validates() {
        let anchor = Pattern::anchor("StartOfLine").unwrap();
        let changed = anchor
            .clone()
            .try_with_value(PatternValue::from_literal("EndOfLine"))
            .unwrap();
        assert_eq!(changed.value().map(PatternValue::resolve), Some("EndOfLine"));
        assert!(
            anchor
                .try_with_value(PatternValue::from_literal("Middle"))
                .is_err()
        );

        let group = Pattern::group(PatternProperties::capturing(), vec![]);
        assert!(group.try_with_value(PatternValue::default()).is_err());
    }

    #[test]
    fn test_group_accessors() {
        let mut group = Pattern::group(
            PatternProperties::capturing(),
            vec![Pattern::literal("a")],
        );
        assert_eq!(group.pattern_type(), PatternType::Group);
        assert!(group.value().is_none());
        assert_eq!(group.properties().unwrap().group_type, GroupType::Capturing);

        group.patterns_mut().unwrap().push(Pattern::literal("b"));
        assert_eq!(group.patterns().len(), 2);
        assert!(Pattern::literal("x").patterns_mut().is_none());
    }

    #[test]
    fn test_named_group_style_open() {
        assert_eq!(NamedGroupStyle::AngleBrackets.open("year"), "(?<year>");
        assert_eq!(NamedGroupStyle::SingleQuote.open("year"), "(?'year'");
        assert_eq!(NamedGroupStyle::PStyle.open("year"), "(?P<year>");
    }

    #[test]
    fn test_group_name_ignores_blank() {
        assert_eq!(
            PatternProperties::named("  ", NamedGroupStyle::default()).group_name(),
            None
        );
        assert_eq!(
            PatternProperties::named("n", NamedGroupStyle::default()).group_name(),
            Some("n")
        );
        assert_eq!(PatternProperties::capturing().group_name(), None);
    }

    #[test]
    fn test_property_defaults() {
        let properties = PatternProperties::default();
        assert_eq!(properties.group_type, GroupType::NonCapturing);
        assert_eq!(properties.named_group_style, NamedGroupStyle::AngleBrackets);
    }

    #[test]
    fn test_assign_ids_fills_missing_only() {
        let mut tree = Pattern::group(
            PatternProperties::default(),
            vec![Pattern::literal("a").with_id("keep"), Pattern::literal("b")],
        );
        tree.assign_ids(&mut SequentialIds::new("n"));
        assert_eq!(tree.patterns()[0].id(), Some("keep"));
        assert_eq!(tree.patterns()[1].id(), Some("n-1"));
        assert_eq!(tree.id(), Some("n-2"));
    }

    #[test]
    fn test_node_count_and_depth() {
        let tree = Pattern::group(
            PatternProperties::default(),
            vec![
                Pattern::literal("a"),
                Pattern::group(PatternProperties::capturing(), vec![Pattern::literal("b")]),
            ],
        );
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.depth(), 3);
        assert_eq!(Pattern::literal("x").depth(), 1);
    }
}
