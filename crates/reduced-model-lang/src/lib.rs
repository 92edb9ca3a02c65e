#![warn(missing_docs)]
//! `reduced-model-lang` - data-driven language configuration for `reduced-model`.
//!
//! This crate intentionally stays lightweight and has no dependencies. It provides small,
//! immutable structs that a host builds once and hands to the reduced model and the source
//! document at construction time, so that two buffers never share mutable settings.

use std::collections::BTreeSet;

/// Comment tokens/config for a given language.
///
/// The document layer uses this to implement comment/uncomment commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentConfig {
    /// Line comment token (e.g. `//`).
    pub line: String,
    /// Block comment start token (e.g. `/*`).
    pub block_start: String,
    /// Block comment end token (e.g. `*/`).
    pub block_end: String,
}

impl CommentConfig {
    /// C-family comment tokens: `//`, `/*` and `*/`.
    pub fn c_family() -> Self {
        Self {
            line: "//".to_string(),
            block_start: "/*".to_string(),
            block_end: "*/".to_string(),
        }
    }
}

impl Default for CommentConfig {
    fn default() -> Self {
        Self::c_family()
    }
}

/// Indentation policy settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentConfig {
    /// Number of spaces in one indent unit.
    pub indent_width: usize,
    /// Line-final characters after which the next line is *not* a continuation line.
    pub normal_endings: BTreeSet<char>,
}

impl IndentConfig {
    /// Create a config with the given indent width and the default normal endings
    /// (`;`, `{`, `}`, `(`).
    pub fn with_width(indent_width: usize) -> Self {
        Self {
            indent_width,
            normal_endings: [';', '{', '}', '('].into_iter().collect(),
        }
    }

    /// Returns `true` if `ch` ends a line normally.
    pub fn is_normal_ending(&self, ch: char) -> bool {
        self.normal_endings.contains(&ch)
    }
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self::with_width(2)
    }
}

/// Word sets used by keyword highlighting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighlightConfig {
    /// Reserved words, highlighted as keywords.
    pub keywords: BTreeSet<String>,
    /// Well-known type names, highlighted as types.
    pub type_names: BTreeSet<String>,
}

impl HighlightConfig {
    /// Java reserved words (primitive type names included) and the common `java.lang` types.
    pub fn java() -> Self {
        Self {
            keywords: JAVA_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            type_names: JAVA_LANG_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Returns `true` if `word` is a keyword.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    /// Returns `true` if `word` is a configured type name.
    pub fn is_type_name(&self, word: &str) -> bool {
        self.type_names.contains(word)
    }
}

/// Complete language configuration for one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    /// Indentation settings.
    pub indent: IndentConfig,
    /// Highlighting word sets.
    pub highlight: HighlightConfig,
    /// Comment tokens.
    pub comment: CommentConfig,
}

impl LanguageConfig {
    /// The Java configuration: two-space indent, C-family comments, Java keywords.
    pub fn java() -> Self {
        Self {
            indent: IndentConfig::default(),
            highlight: HighlightConfig::java(),
            comment: CommentConfig::c_family(),
        }
    }

    /// Replace the indent width, keeping everything else.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent.indent_width = width;
        self
    }
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self::java()
    }
}

const JAVA_KEYWORDS: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "true",
    "try",
    "void",
    "volatile",
    "while",
];

const JAVA_LANG_TYPES: &[&str] = &[
    "Boolean",
    "Byte",
    "Character",
    "Double",
    "Float",
    "Integer",
    "Long",
    "Object",
    "Short",
    "String",
    "StringBuilder",
    "System",
    "Void",
];
