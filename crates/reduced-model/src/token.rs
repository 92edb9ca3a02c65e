//! Tokens of the reduced model.
//!
//! The model keeps only what structural queries need: plain text collapses into [`TokenKind::Gap`]
//! tokens that remember nothing but their length, while every character that can open or close
//! a comment, a quoted literal or a brace becomes its own fixed-width token.

/// The lexical state in effect at a token's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LexState {
    /// Plain code.
    #[default]
    Free,
    /// Inside a `//` comment.
    InsideLineComment,
    /// Inside a `/* ... */` comment.
    InsideBlockComment,
    /// Inside a `'...'` literal.
    InsideSingleQuote,
    /// Inside a `"..."` literal.
    InsideDoubleQuote,
}

impl LexState {
    /// Returns `true` for both comment states.
    pub fn is_comment(self) -> bool {
        matches!(self, Self::InsideLineComment | Self::InsideBlockComment)
    }

    /// Returns `true` for both quote states.
    pub fn is_quote(self) -> bool {
        matches!(self, Self::InsideSingleQuote | Self::InsideDoubleQuote)
    }
}

/// The family of a brace-like token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BraceType {
    /// No brace.
    #[default]
    None,
    /// `(` / `)`
    Paren,
    /// `{` / `}`
    Brace,
    /// `[` / `]`
    Bracket,
}

/// The character following the backslash of an escape token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Escaped {
    /// `\\`
    Backslash,
    /// `\"`
    DoubleQuote,
    /// `\'`
    SingleQuote,
}

/// What a token stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A run of characters with no lexical role.
    Gap,
    /// `//`
    LineCommentStart,
    /// `/*`
    BlockCommentStart,
    /// `*/`
    BlockCommentEnd,
    /// `'`
    SingleQuote,
    /// `"`
    DoubleQuote,
    /// A backslash together with the one character it escapes.
    Escape(Escaped),
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `\n`
    Newline,
    /// A lone `/` that did not pair with its neighbor.
    Slash,
    /// A lone `*` that did not pair with its neighbor.
    Star,
    /// A lone `\` that did not pair with its neighbor.
    Backslash,
}

impl TokenKind {
    /// Classify a single character. Plain characters return `None`.
    pub fn from_char(ch: char) -> Option<Self> {
        Some(match ch {
            '\'' => Self::SingleQuote,
            '"' => Self::DoubleQuote,
            '(' => Self::OpenParen,
            ')' => Self::CloseParen,
            '{' => Self::OpenBrace,
            '}' => Self::CloseBrace,
            '[' => Self::OpenBracket,
            ']' => Self::CloseBracket,
            '\n' => Self::Newline,
            '/' => Self::Slash,
            '*' => Self::Star,
            '\\' => Self::Backslash,
            _ => return None,
        })
    }

    /// The two-character marker formed by `first` immediately followed by `second` when `first`
    /// is read in `state`, if any.
    ///
    /// Only markers that can act in `state` pair up: comment openers in plain code, the block
    /// comment closer inside a block comment, escapes inside literals. Elsewhere the characters
    /// stay apart, so `*/` in plain code leaves its `/` free to open a comment.
    pub fn pair(state: LexState, first: char, second: char) -> Option<Self> {
        Some(match (first, second) {
            ('/', '/') if state == LexState::Free => Self::LineCommentStart,
            ('/', '*') if state == LexState::Free => Self::BlockCommentStart,
            ('*', '/') if state == LexState::InsideBlockComment => Self::BlockCommentEnd,
            ('\\', '\\') if state.is_quote() => Self::Escape(Escaped::Backslash),
            ('\\', '"') if state.is_quote() => Self::Escape(Escaped::DoubleQuote),
            ('\\', '\'') if state.is_quote() => Self::Escape(Escaped::SingleQuote),
            _ => return None,
        })
    }

    /// Returns `true` if `ch` read in `state` can start a two-character marker.
    pub fn starts_pair(state: LexState, ch: char) -> bool {
        match state {
            LexState::Free => ch == '/',
            LexState::InsideBlockComment => ch == '*',
            LexState::InsideLineComment => false,
            _ => ch == '\\',
        }
    }

    /// The source text of a fixed-width token. Gaps have no fixed text.
    pub fn text(self) -> Option<&'static str> {
        Some(match self {
            Self::Gap => return None,
            Self::LineCommentStart => "//",
            Self::BlockCommentStart => "/*",
            Self::BlockCommentEnd => "*/",
            Self::SingleQuote => "'",
            Self::DoubleQuote => "\"",
            Self::Escape(Escaped::Backslash) => "\\\\",
            Self::Escape(Escaped::DoubleQuote) => "\\\"",
            Self::Escape(Escaped::SingleQuote) => "\\'",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::OpenBrace => "{",
            Self::CloseBrace => "}",
            Self::OpenBracket => "[",
            Self::CloseBracket => "]",
            Self::Newline => "\n",
            Self::Slash => "/",
            Self::Star => "*",
            Self::Backslash => "\\",
        })
    }

    /// Fixed width in characters (`None` for gaps).
    pub fn width(self) -> Option<usize> {
        self.text().map(|text| text.chars().count())
    }

    /// The brace family this token opens, if it is an opener.
    pub fn opens(self) -> Option<BraceType> {
        match self {
            Self::OpenParen => Some(BraceType::Paren),
            Self::OpenBrace => Some(BraceType::Brace),
            Self::OpenBracket => Some(BraceType::Bracket),
            _ => None,
        }
    }

    /// The brace family this token closes, if it is a closer.
    pub fn closes(self) -> Option<BraceType> {
        match self {
            Self::CloseParen => Some(BraceType::Paren),
            Self::CloseBrace => Some(BraceType::Brace),
            Self::CloseBracket => Some(BraceType::Bracket),
            _ => None,
        }
    }

    /// Lone `/`, `*` or `\`.
    pub fn is_partial_marker(self) -> bool {
        matches!(self, Self::Slash | Self::Star | Self::Backslash)
    }
}

/// One token of the reduced model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    /// What the token stands for.
    pub kind: TokenKind,
    /// Number of characters covered.
    pub len: usize,
    /// Lexical state in effect at the token's start, stamped by the lexer.
    pub state: LexState,
}

impl Token {
    pub(crate) fn gap(len: usize) -> Self {
        debug_assert!(len > 0, "gap tokens are never empty");
        Self {
            kind: TokenKind::Gap,
            len,
            state: LexState::Free,
        }
    }

    pub(crate) fn fixed(kind: TokenKind) -> Self {
        debug_assert!(kind != TokenKind::Gap);
        Self {
            kind,
            len: kind.width().unwrap_or(1),
            state: LexState::Free,
        }
    }

    /// Returns `true` for gap tokens.
    pub fn is_gap(&self) -> bool {
        self.kind == TokenKind::Gap
    }

    /// The state in effect right after this token.
    pub fn end_state(&self) -> LexState {
        crate::propagate::transition(self.state, self.kind)
    }

    /// Returns `true` if the token's special meaning is suppressed by the state it sits in.
    ///
    /// A closing marker (the `*/` of a block comment, the quote that ends a literal, the newline
    /// that ends a line comment or an unterminated literal) is not shadowed: it is the token that
    /// returns the model to [`LexState::Free`].
    pub fn shadowed(&self) -> bool {
        match self.state {
            LexState::Free => false,
            _ => self.end_state() != LexState::Free,
        }
    }

    /// Returns `true` if the token is part of a comment, including the marker that opens it.
    pub fn is_commented(&self) -> bool {
        match self.state {
            LexState::InsideLineComment => self.kind != TokenKind::Newline,
            LexState::InsideBlockComment => true,
            LexState::Free => self.end_state().is_comment(),
            _ => false,
        }
    }

    /// Returns `true` if the token is an unshadowed brace, paren or bracket.
    pub fn is_free_brace(&self) -> bool {
        self.state == LexState::Free && (self.kind.opens().is_some() || self.kind.closes().is_some())
    }
}
