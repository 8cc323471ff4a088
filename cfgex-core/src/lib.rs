//! Cfgex Core Library
//!
//! Describe a regular expression as a tree of typed patterns in JSON or YAML
//! and compile it to a regex string.
//!
//! ```
//! let yaml = "
//! Type: Group
//! Properties:
//!   GroupType: NamedCapturing
//!   Name: year
//! Patterns:
//!   - Type: CharacterClass
//!     Value: Digit
//!     Quantifiers:
//!       Exactly: 4
//! ";
//! assert_eq!(cfgex_core::compile_str(yaml).unwrap(), "(?<year>\\d{4})");
//! ```

pub mod codec;
pub mod compiler;
pub mod error;
pub mod id;
pub mod pattern;
pub mod quantifier;
pub mod symbols;
pub mod value;
mod wire;

pub use codec::{Format, convert, decode, decode_list, detect_format, encode};
pub use compiler::{CompileOptions, CompileReport, Compiler, DEFAULT_MAX_DEPTH, compile_debug};
pub use error::{Location, PatternError, PatternErrorKind, Result};
pub use id::{IdGenerator, SequentialIds, UuidIds};
pub use pattern::{
    GroupType, NamedGroupStyle, Pattern, PatternKind, PatternProperties, PatternType,
};
pub use quantifier::Quantifier;
pub use symbols::{Anchor, CharacterClass};
pub use value::PatternValue;

/// Compile a pattern tree with default options
pub fn compile(pattern: &Pattern) -> Result<String> {
    Compiler::new().compile(pattern)
}

/// Decode a JSON or YAML pattern and compile it
pub fn compile_str(text: &str) -> Result<String> {
    let pattern = decode(text)?;
    compile(&pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end() {
        // text -> raw wire tree -> pattern tree -> regex
        let json = r#"{"Type":"Group","Properties":{"GroupType":"Capturing"},"Patterns":[
            {"Type":"Anchor","Value":{"Value":"StartOfLine"}},
            {"Type":"Literal","Value":{"Value":"abc"}}
        ]}"#;
        assert_eq!(compile_str(json).unwrap(), "(^abc)");
    }

    #[test]
    fn test_compile_built_tree() {
        let tree = Pattern::group(
            PatternProperties::named("id", NamedGroupStyle::PStyle),
            vec![Pattern::character_class("Word").unwrap().with_quantifiers(Quantifier::at_least(1))],
        );
        assert_eq!(compile(&tree).unwrap(), "(?P<id>\\w+)");
    }

    #[test]
    fn test_compile_str_error() {
        assert!(compile_str("").is_err());
    }
}
