//! Symbol tables for anchors and character classes
//!
//! Two closed mappings from a symbolic name (as written in a configuration file)
//! to the regex token it stands for, e.g. `WordBoundary` -> `\b` and `Digit` -> `\d`.
//!
//! Values may also be written as the token itself (`\b`), and character classes
//! accept any bracket expression (`[a-z]`) verbatim.

/// A zero-width assertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Start of line (^)
    StartOfLine,
    /// End of line ($)
    EndOfLine,
    /// Word boundary (\b)
    WordBoundary,
    /// Non-word boundary (\B)
    NonWordBoundary,
    /// Start of string (\A)
    StartOfString,
    /// End of string (\z)
    EndOfString,
    /// End of string or before a final newline (\Z)
    EndOfStringOrNewline,
    /// End of the previous match (\G)
    PreviousMatchEnd,
}

impl Anchor {
    /// Every anchor, in table order
    pub const ALL: [Anchor; 8] = [
        Anchor::StartOfLine,
        Anchor::EndOfLine,
        Anchor::WordBoundary,
        Anchor::NonWordBoundary,
        Anchor::StartOfString,
        Anchor::EndOfString,
        Anchor::EndOfStringOrNewline,
        Anchor::PreviousMatchEnd,
    ];

    /// The symbolic name used in configuration files
    pub fn name(self) -> &'static str {
        match self {
            Anchor::StartOfLine => "StartOfLine",
            Anchor::EndOfLine => "EndOfLine",
            Anchor::WordBoundary => "WordBoundary",
            Anchor::NonWordBoundary => "NonWordBoundary",
            Anchor::StartOfString => "StartOfString",
            Anchor::EndOfString => "EndOfString",
            Anchor::EndOfStringOrNewline => "EndOfStringOrNewline",
            Anchor::PreviousMatchEnd => "PreviousMatchEnd",
        }
    }

    /// The regex token
    pub fn token(self) -> &'static str {
        match self {
            Anchor::StartOfLine => "^",
            Anchor::EndOfLine => "$",
            Anchor::WordBoundary => "\\b",
            Anchor::NonWordBoundary => "\\B",
            Anchor::StartOfString => "\\A",
            Anchor::EndOfString => "\\z",
            Anchor::EndOfStringOrNewline => "\\Z",
            Anchor::PreviousMatchEnd => "\\G",
        }
    }

    /// Look up an anchor by its symbolic name
    pub fn from_name(name: &str) -> Option<Self> {
        Anchor::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Look up an anchor by its regex token
    pub fn from_token(token: &str) -> Option<Self> {
        Anchor::ALL.into_iter().find(|a| a.token() == token)
    }
}

/// A predefined character class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    /// Any character except newline (.)
    Any,
    /// Digit (\d)
    Digit,
    /// Non-digit (\D)
    NonDigit,
    /// Word character (\w)
    Word,
    /// Non-word character (\W)
    NonWord,
    /// Whitespace (\s)
    Whitespace,
    /// Non-whitespace (\S)
    NonWhitespace,
    /// Tab (\t)
    Tab,
    /// Line feed (\n)
    Newline,
    /// Carriage return (\r)
    CarriageReturn,
    /// Form feed (\f)
    FormFeed,
    /// Vertical tab (\v)
    VerticalTab,
    /// ASCII letter ([a-zA-Z])
    Letter,
    /// Lowercase ASCII letter ([a-z])
    LowercaseLetter,
    /// Uppercase ASCII letter ([A-Z])
    UppercaseLetter,
    /// ASCII letter or digit ([a-zA-Z0-9])
    LetterOrDigit,
    /// Hexadecimal digit ([0-9a-fA-F])
    HexDigit,
}

impl CharacterClass {
    /// Every predefined class, in table order
    pub const ALL: [CharacterClass; 17] = [
        CharacterClass::Any,
        CharacterClass::Digit,
        CharacterClass::NonDigit,
        CharacterClass::Word,
        CharacterClass::NonWord,
        CharacterClass::Whitespace,
        CharacterClass::NonWhitespace,
        CharacterClass::Tab,
        CharacterClass::Newline,
        CharacterClass::CarriageReturn,
        CharacterClass::FormFeed,
        CharacterClass::VerticalTab,
        CharacterClass::Letter,
        CharacterClass::LowercaseLetter,
        CharacterClass::UppercaseLetter,
        CharacterClass::LetterOrDigit,
        CharacterClass::HexDigit,
    ];

    /// The symbolic name used in configuration files
    pub fn name(self) -> &'static str {
        match self {
            CharacterClass::Any => "Any",
            CharacterClass::Digit => "Digit",
            CharacterClass::NonDigit => "NonDigit",
            CharacterClass::Word => "Word",
            CharacterClass::NonWord => "NonWord",
            CharacterClass::Whitespace => "Whitespace",
            CharacterClass::NonWhitespace => "NonWhitespace",
            CharacterClass::Tab => "Tab",
            CharacterClass::Newline => "Newline",
            CharacterClass::CarriageReturn => "CarriageReturn",
            CharacterClass::FormFeed => "FormFeed",
            CharacterClass::VerticalTab => "VerticalTab",
            CharacterClass::Letter => "Letter",
            CharacterClass::LowercaseLetter => "LowercaseLetter",
            CharacterClass::UppercaseLetter => "UppercaseLetter",
            CharacterClass::LetterOrDigit => "LetterOrDigit",
            CharacterClass::HexDigit => "HexDigit",
        }
    }

    /// The regex token
    pub fn token(self) -> &'static str {
        match self {
            CharacterClass::Any => ".",
            CharacterClass::Digit => "\\d",
            CharacterClass::NonDigit => "\\D",
            CharacterClass::Word => "\\w",
            CharacterClass::NonWord => "\\W",
            CharacterClass::Whitespace => "\\s",
            CharacterClass::NonWhitespace => "\\S",
            CharacterClass::Tab => "\\t",
            CharacterClass::Newline => "\\n",
            CharacterClass::CarriageReturn => "\\r",
            CharacterClass::FormFeed => "\\f",
            CharacterClass::VerticalTab => "\\v",
            CharacterClass::Letter => "[a-zA-Z]",
            CharacterClass::LowercaseLetter => "[a-z]",
            CharacterClass::UppercaseLetter => "[A-Z]",
            CharacterClass::LetterOrDigit => "[a-zA-Z0-9]",
            CharacterClass::HexDigit => "[0-9a-fA-F]",
        }
    }

    /// Look up a class by its symbolic name
    pub fn from_name(name: &str) -> Option<Self> {
        CharacterClass::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Look up a class by its regex token
    pub fn from_token(token: &str) -> Option<Self> {
        CharacterClass::ALL.into_iter().find(|c| c.token() == token)
    }
}

/// Resolve an anchor name to its token
pub fn resolve_anchor(name: &str) -> Option<&'static str> {
    Anchor::from_name(name).map(Anchor::token)
}

/// Resolve a character class name to its token
pub fn resolve_character_class(name: &str) -> Option<&'static str> {
    CharacterClass::from_name(name).map(CharacterClass::token)
}

/// Check if `token` is already a regex anchor token
pub fn is_known_anchor_token(token: &str) -> bool {
    Anchor::from_token(token).is_some()
}

/// Check if `token` is already a predefined character class token
pub fn is_known_character_class_token(token: &str) -> bool {
    CharacterClass::from_token(token).is_some()
}

/// Check if `s` is a bracket expression (`[...]`)
///
/// Only the enclosing brackets are checked; the contents are trusted verbatim.
pub fn is_custom_character_class(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('[') && s.ends_with(']')
}

/// Turn an anchor value (token or name) into the token to emit
pub fn anchor_token(value: &str) -> Option<&str> {
    if is_known_anchor_token(value) {
        Some(value)
    } else {
        resolve_anchor(value)
    }
}

/// Turn a character class value (token, bracket expression, or name) into the token to emit
pub fn character_class_token(value: &str) -> Option<&str> {
    if is_known_character_class_token(value) || is_custom_character_class(value) {
        Some(value)
    } else {
        resolve_character_class(value)
    }
}

/// Comma-separated anchor names, for error messages
pub fn anchor_names() -> String {
    join(Anchor::ALL.map(Anchor::name))
}

/// Comma-separated anchor tokens, for error messages
pub fn anchor_tokens() -> String {
    join(Anchor::ALL.map(Anchor::token))
}

/// Comma-separated character class names, for error messages
pub fn character_class_names() -> String {
    join(CharacterClass::ALL.map(CharacterClass::name))
}

/// Comma-separated character class tokens, for error messages
pub fn character_class_tokens() -> String {
    join(CharacterClass::ALL.map(CharacterClass::token))
}

fn join<const N: usize>(items: [&str; N]) -> String {
    items.join(", ")
}
