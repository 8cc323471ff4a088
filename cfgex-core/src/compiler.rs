//! Pattern compiler
//!
//! Walks a [`Pattern`] tree depth first and concatenates each node's regex
//! fragment. Leaves resolve their value to a token, groups wrap their children
//! in the syntax their [`PatternProperties`] call for, and any node may carry
//! a quantifier suffix.

use std::fmt;

use crate::codec::{self, Format};
use crate::error::{Location, PatternErrorKind, Result};
use crate::id::UuidIds;
use crate::pattern::{GroupType, Pattern, PatternKind, PatternProperties};
use crate::quantifier::Quantifier;
use crate::symbols;

/// Default limit on how deeply patterns may nest
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Compiler settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Deepest nesting accepted, where a lone root pattern has depth 1
    pub max_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Compiles pattern trees to regex strings
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub fn new() -> Self {
        Compiler::default()
    }

    pub fn with_options(options: CompileOptions) -> Self {
        Compiler { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile a single pattern tree
    ///
    /// # Example
    /// ```
    /// use cfgex_core::{Compiler, Pattern, PatternProperties, Quantifier};
    ///
    /// let tree = Pattern::group(
    ///     PatternProperties::capturing(),
    ///     vec![Pattern::literal("ab").with_quantifiers(Quantifier::at_least(1))],
    /// );
    /// assert_eq!(Compiler::new().compile(&tree).unwrap(), "(ab+)");
    /// ```
    pub fn compile(&self, pattern: &Pattern) -> Result<String> {
        let mut path = Vec::new();
        self.compile_node(pattern, &mut path, 1)
    }

    /// Compile a sequence of top-level patterns and concatenate the results
    pub fn compile_all(&self, patterns: &[Pattern]) -> Result<String> {
        let mut output = String::new();
        let mut path = Vec::new();
        for (index, pattern) in patterns.iter().enumerate() {
            path.push(index);
            let fragment = self.compile_node(pattern, &mut path, 1);
            path.pop();
            output.push_str(&fragment?);
        }
        Ok(output)
    }

    /// `path` locates errors; `depth` counts this node on its root-to-leaf path
    fn compile_node(
        &self,
        pattern: &Pattern,
        path: &mut Vec<usize>,
        depth: usize,
    ) -> Result<String> {
        let fragment = self.reduce(pattern, path, depth).map_err(|e| {
            e.or_at(|| Location::new(path.as_slice(), Some(pattern.pattern_type()), pattern.id()))
        })?;
        tracing::trace!(?path, kind = %pattern.pattern_type(), %fragment, "compiled pattern");
        Ok(fragment)
    }

    fn reduce(&self, pattern: &Pattern, path: &mut Vec<usize>, depth: usize) -> Result<String> {
        if depth > self.options.max_depth {
            return Err(PatternErrorKind::MaxDepthExceeded {
                limit: self.options.max_depth,
            }
            .into());
        }

        let quantifiers = pattern.quantifiers();
        match pattern.kind() {
            PatternKind::Literal(value) => quantify(value.resolve().to_string(), quantifiers),
            PatternKind::Anchor(value) => {
                let raw = value.to_regex_token();
                let token = symbols::anchor_token(raw)
                    .ok_or_else(|| PatternErrorKind::InvalidAnchor(raw.to_string()))?;
                quantify(token.to_string(), quantifiers)
            }
            PatternKind::CharacterClass(value) => {
                let raw = value.to_regex_token();
                let token = symbols::character_class_token(raw)
                    .ok_or_else(|| PatternErrorKind::InvalidCharacterClass(raw.to_string()))?;
                quantify(token.to_string(), quantifiers)
            }
            PatternKind::Group {
                patterns,
                properties,
            } => self.compile_group(patterns, properties, quantifiers, path, depth),
        }
    }

    fn compile_group(
        &self,
        patterns: &[Pattern],
        properties: &PatternProperties,
        quantifiers: Option<&Quantifier>,
        path: &mut Vec<usize>,
        depth: usize,
    ) -> Result<String> {
        if patterns.is_empty() {
            return Err(PatternErrorKind::EmptyGroup.into());
        }

        let mut wrapped = match properties.group_type {
            GroupType::NonCapturing => "(?:".to_string(),
            GroupType::Capturing => "(".to_string(),
            GroupType::NamedCapturing => {
                let name = properties
                    .group_name()
                    .ok_or(PatternErrorKind::MissingGroupName)?;
                properties.named_group_style.open(name)
            }
        };

        for (index, child) in patterns.iter().enumerate() {
            path.push(index);
            let fragment = self.compile_node(child, path, depth + 1);
            path.pop();
            wrapped.push_str(&fragment?);
        }
        wrapped.push(')');

        quantify(wrapped, quantifiers)
    }
}

fn quantify(mut fragment: String, quantifiers: Option<&Quantifier>) -> Result<String> {
    if let Some(quantifiers) = quantifiers {
        let suffix = quantifiers.to_suffix(&fragment)?;
        fragment.push_str(&suffix);
    }
    Ok(fragment)
}

/// Decode `text` and compile it, keeping intermediate results for inspection
pub fn compile_debug(text: &str, options: CompileOptions) -> Result<CompileReport> {
    let format = codec::sniff(text)?;
    let pattern = codec::decode_as(text, format, &mut UuidIds)?;
    let output = Compiler::with_options(options).compile(&pattern)?;

    Ok(CompileReport {
        format,
        node_count: pattern.node_count(),
        depth: pattern.depth(),
        tree: format!("{:?}", pattern),
        output,
    })
}

/// Result of a compilation with debug information
#[derive(Debug, Clone)]
pub struct CompileReport {
    /// The detected input format
    pub format: Format,
    /// Number of pattern nodes decoded
    pub node_count: usize,
    /// Deepest nesting level
    pub depth: usize,
    /// The decoded tree (debug format)
    pub tree: String,
    /// The compiled regex
    pub output: String,
}

impl fmt::Display for CompileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Compilation Report")?;
        writeln!(f, "==================")?;
        writeln!(f, "Format: {}", self.format)?;
        writeln!(f, "Nodes:  {}", self.node_count)?;
        writeln!(f, "Depth:  {}", self.depth)?;
        writeln!(f, "Tree:   {}", self.tree)?;
        write!(f, "Output: {}", self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{NamedGroupStyle, PatternType};
    use crate::value::PatternValue;

    fn compile(pattern: &Pattern) -> String {
        Compiler::new().compile(pattern).unwrap()
    }

    fn literal(text: &str) -> Pattern {
        Pattern::literal(text)
    }

    #[test]
    fn test_compile_literal() {
        assert_eq!(compile(&literal("abc")), "abc");
        assert_eq!(compile(&literal("")), "");
    }

    #[test]
    fn test_literal_is_not_escaped() {
        assert_eq!(compile(&literal("a.b")), "a.b");
    }

    #[test]
    fn test_compile_nested_literal_value() {
        let pattern = Pattern::leaf(
            PatternType::Literal,
            PatternValue::from_nested(PatternValue::from_literal("inner")),
        )
        .unwrap();
        assert_eq!(compile(&pattern), "inner");
    }

    #[test]
    fn test_compile_anchor_by_name_and_token() {
        assert_eq!(compile(&Pattern::anchor("WordBoundary").unwrap()), "\\b");
        assert_eq!(compile(&Pattern::anchor("\\b").unwrap()), "\\b");
        assert_eq!(compile(&Pattern::anchor("StartOfLine").unwrap()), "^");
    }

    #[test]
    fn test_compile_character_class() {
        assert_eq!(compile(&Pattern::character_class("Digit").unwrap()), "\\d");
        assert_eq!(compile(&Pattern::character_class("[a-z]").unwrap()), "[a-z]");
        assert_eq!(
            compile(&Pattern::character_class("HexDigit").unwrap()),
            "[0-9a-fA-F]"
        );
    }

    #[test]
    fn test_compile_quantified_leaves() {
        let digits = Pattern::character_class("Digit")
            .unwrap()
            .with_quantifiers(Quantifier::exactly(3));
        assert_eq!(compile(&digits), "\\d{3}");

        let word = literal("a").with_quantifiers(Quantifier::between(2, 5).lazy());
        assert_eq!(compile(&word), "a{2,5}?");
    }

    #[test]
    fn test_greedy_after_literal_quantifier() {
        let pattern = literal("abc*").with_quantifiers(Quantifier::greedy());
        assert_eq!(compile(&pattern), "abc*");
    }

    #[test]
    fn test_group_types() {
        let children = vec![literal("ab")];
        let non_capturing = Pattern::group(PatternProperties::non_capturing(), children.clone());
        assert_eq!(compile(&non_capturing), "(?:ab)");

        let capturing = Pattern::group(PatternProperties::capturing(), children.clone());
        assert_eq!(compile(&capturing), "(ab)");

        let named = Pattern::group(
            PatternProperties::named("word", NamedGroupStyle::AngleBrackets),
            children.clone(),
        );
        assert_eq!(compile(&named), "(?<word>ab)");

        let quoted = Pattern::group(
            PatternProperties::named("word", NamedGroupStyle::SingleQuote),
            children.clone(),
        );
        assert_eq!(compile(&quoted), "(?'word'ab)");

        let python = Pattern::group(
            PatternProperties::named("word", NamedGroupStyle::PStyle),
            children,
        );
        assert_eq!(compile(&python), "(?P<word>ab)");
    }

    #[test]
    fn test_quantified_group() {
        let group = Pattern::group(PatternProperties::capturing(), vec![literal("ab")])
            .with_quantifiers(Quantifier::at_least(1));
        assert_eq!(compile(&group), "(ab)+");
    }

    #[test]
    fn test_nested_groups() {
        let inner = Pattern::group(
            PatternProperties::named("digits", NamedGroupStyle::default()),
            vec![
                Pattern::character_class("Digit")
                    .unwrap()
                    .with_quantifiers(Quantifier::at_least(1)),
            ],
        );
        let outer = Pattern::group(
            PatternProperties::non_capturing(),
            vec![Pattern::anchor("StartOfLine").unwrap(), inner, literal("-")],
        );
        assert_eq!(compile(&outer), "(?:^(?<digits>\\d+)-)");
    }

    #[test]
    fn test_empty_group() {
        let err = Compiler::new()
            .compile(&Pattern::group(PatternProperties::capturing(), vec![]).with_id("g"))
            .unwrap_err();
        assert_eq!(err.kind(), &PatternErrorKind::EmptyGroup);
        let location = err.location.unwrap();
        assert!(location.is_root());
        assert_eq!(location.id.as_deref(), Some("g"));
    }

    #[test]
    fn test_missing_group_name() {
        let mut properties = PatternProperties::named(" ", NamedGroupStyle::default());
        let err = Compiler::new()
            .compile(&Pattern::group(properties.clone(), vec![literal("a")]))
            .unwrap_err();
        assert_eq!(err.kind(), &PatternErrorKind::MissingGroupName);

        properties.name = None;
        let err = Compiler::new()
            .compile(&Pattern::group(properties, vec![literal("a")]))
            .unwrap_err();
        assert_eq!(err.kind(), &PatternErrorKind::MissingGroupName);
    }

    #[test]
    fn test_group_checks_precede_children() {
        let bad_child = literal("a").with_quantifiers(Quantifier::between(3, 1));
        let tree = Pattern::group(
            PatternProperties::named("", NamedGroupStyle::default()),
            vec![bad_child],
        );
        let err = Compiler::new().compile(&tree).unwrap_err();
        assert_eq!(err.kind(), &PatternErrorKind::MissingGroupName);
    }

    #[test]
    fn test_error_located_at_innermost_node() {
        let bad = literal("a")
            .with_id("bad")
            .with_quantifiers(Quantifier::between(3, 1));
        let tree = Pattern::group(
            PatternProperties::capturing(),
            vec![
                literal("x"),
                Pattern::group(PatternProperties::non_capturing(), vec![bad]),
            ],
        );
        let err = Compiler::new().compile(&tree).unwrap_err();
        assert_eq!(
            err.kind(),
            &PatternErrorKind::InvalidQuantifierRange { min: 3, max: 1 }
        );
        let location = err.location.unwrap();
        assert_eq!(location.path, vec![1, 0]);
        assert_eq!(location.pattern_type, Some(PatternType::Literal));
        assert_eq!(location.id.as_deref(), Some("bad"));
    }

    #[test]
    fn test_max_depth() {
        let mut tree = literal("a");
        for _ in 0..4 {
            tree = Pattern::group(PatternProperties::non_capturing(), vec![tree]);
        }
        assert_eq!(tree.depth(), 5);

        let exact = Compiler::with_options(CompileOptions { max_depth: 5 });
        assert_eq!(exact.compile(&tree).unwrap(), "(?:(?:(?:(?:a))))");

        let shallow = Compiler::with_options(CompileOptions { max_depth: 4 });
        let err = shallow.compile(&tree).unwrap_err();
        assert_eq!(err.kind(), &PatternErrorKind::MaxDepthExceeded { limit: 4 });
    }

    #[test]
    fn test_compile_all_depth_matches_compile() {
        let one = Compiler::with_options(CompileOptions { max_depth: 1 });
        assert_eq!(one.compile(&literal("a")).unwrap(), "a");
        assert_eq!(one.compile_all(&[literal("a"), literal("b")]).unwrap(), "ab");

        let tree = Pattern::group(PatternProperties::capturing(), vec![literal("a")]);
        let two = Compiler::with_options(CompileOptions { max_depth: 2 });
        assert_eq!(two.compile_all(std::slice::from_ref(&tree)).unwrap(), "(a)");

        let err = one.compile_all(&[literal("a"), tree]).unwrap_err();
        assert_eq!(err.kind(), &PatternErrorKind::MaxDepthExceeded { limit: 1 });
        assert_eq!(err.location.unwrap().path, vec![1, 0]);
    }

    #[test]
    fn test_lazy_after_literal_question_mark() {
        let lazy = literal("a?").with_quantifiers(Quantifier::default().lazy());
        assert_eq!(compile(&lazy), "a??");

        let greedy = literal("abc*").with_quantifiers(Quantifier::greedy());
        assert_eq!(compile(&greedy), "abc*");
    }

    #[test]
    fn test_compile_all_concatenates() {
        let patterns = vec![
            Pattern::anchor("StartOfLine").unwrap(),
            literal("abc"),
            Pattern::anchor("EndOfLine").unwrap(),
        ];
        assert_eq!(Compiler::new().compile_all(&patterns).unwrap(), "^abc$");
        assert_eq!(Compiler::new().compile_all(&[]).unwrap(), "");
    }

    #[test]
    fn test_compile_all_error_path() {
        let patterns = vec![
            literal("a"),
            Pattern::group(PatternProperties::capturing(), vec![]),
        ];
        let err = Compiler::new().compile_all(&patterns).unwrap_err();
        assert_eq!(err.location.unwrap().path, vec![1]);
    }

    #[test]
    fn test_compile_is_repeatable() {
        let tree = Pattern::group(
            PatternProperties::capturing(),
            vec![literal("a").with_quantifiers(Quantifier::greedy())],
        );
        assert_eq!(compile(&tree), compile(&tree));
    }

    #[test]
    fn test_compile_debug() {
        let report = compile_debug(
            r#"{"Type":"Group","Properties":{"GroupType":"Capturing"},"Patterns":[{"Type":"Literal","Value":"ab"}]}"#,
            CompileOptions::default(),
        )
        .unwrap();
        assert_eq!(report.format, Format::Json);
        assert_eq!(report.node_count, 2);
        assert_eq!(report.depth, 2);
        assert_eq!(report.output, "(ab)");
        assert!(report.to_string().contains("Output: (ab)"));
    }
}
