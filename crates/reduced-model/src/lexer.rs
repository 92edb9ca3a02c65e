//! Greedy left-to-right tokenizer over *pieces*.
//!
//! The reduced model never stores gap text, so re-tokenizing a neighborhood works on pieces: runs
//! of plain characters known only by their count, and individual special characters. Plain
//! characters never take part in a marker, so a plain piece always ends any pending marker.
//!
//! The lexer tracks the lexical state as it goes. Which characters pair into markers depends on
//! it (see [`TokenKind::pair`]), and every emitted token carries the state it starts in.

use crate::propagate::transition;
use crate::token::{LexState, Token, TokenKind};

/// Input unit of the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Piece {
    /// `n` characters without lexical role.
    Plain(usize),
    /// One character that is (or may become part of) a special token.
    Char(char),
}

/// Append `n` plain characters, extending a trailing plain piece.
pub(crate) fn push_plain(out: &mut Vec<Piece>, n: usize) {
    if n == 0 {
        return;
    }
    if let Some(Piece::Plain(len)) = out.last_mut() {
        *len += n;
    } else {
        out.push(Piece::Plain(n));
    }
}

/// Append the pieces of raw text.
pub(crate) fn push_text(out: &mut Vec<Piece>, text: &str) {
    for ch in text.chars() {
        if TokenKind::from_char(ch).is_some() {
            out.push(Piece::Char(ch));
        } else {
            push_plain(out, 1);
        }
    }
}

/// Append the pieces for the characters of `token` (starting at `token_start`) that fall in
/// `[lo, hi)`.
pub(crate) fn push_token_range(
    out: &mut Vec<Piece>,
    token: &Token,
    token_start: usize,
    lo: usize,
    hi: usize,
) {
    let from = lo.max(token_start);
    let to = hi.min(token_start + token.len);
    if from >= to {
        return;
    }

    match token.kind.text() {
        None => push_plain(out, to - from),
        Some(text) => {
            for (i, ch) in text.chars().enumerate() {
                let pos = token_start + i;
                if pos >= from && pos < to {
                    out.push(Piece::Char(ch));
                }
            }
        }
    }
}

/// Tokenize raw text from the start of a document.
pub(crate) fn lex_text(text: &str) -> Vec<Token> {
    let mut pieces = Vec::new();
    push_text(&mut pieces, text);
    let mut lexer = Lexer::new(LexState::Free);
    for piece in pieces {
        lexer.feed(piece);
    }
    lexer.finish()
}

/// Incremental tokenizer. Pieces are fed one at a time; a marker-starting character is held
/// back until its successor shows whether the two pair up.
#[derive(Debug)]
pub(crate) struct Lexer {
    out: Vec<Token>,
    /// State in effect after the last emitted token.
    state: LexState,
    /// A marker-starting character waiting to see its successor.
    pending: Option<char>,
}

impl Lexer {
    /// Start lexing in `state`.
    pub(crate) fn new(state: LexState) -> Self {
        Self {
            out: Vec::new(),
            state,
            pending: None,
        }
    }

    pub(crate) fn feed(&mut self, piece: Piece) {
        match piece {
            Piece::Plain(n) => {
                self.flush_pending();
                self.push_gap(n);
            }
            Piece::Char(ch) => {
                if let Some(first) = self.pending.take() {
                    if let Some(kind) = TokenKind::pair(self.state, first, ch) {
                        self.emit(Token::fixed(kind));
                        return;
                    }
                    self.push_single(first);
                }

                if TokenKind::starts_pair(self.state, ch) {
                    self.pending = Some(ch);
                } else {
                    self.push_single(ch);
                }
            }
        }
    }

    /// Feed every character of `token`.
    pub(crate) fn feed_token(&mut self, token: &Token) {
        match token.kind.text() {
            None => self.feed(Piece::Plain(token.len)),
            Some(text) => {
                for ch in text.chars() {
                    self.feed(Piece::Char(ch));
                }
            }
        }
    }

    /// Returns `true` if lexing `next` (a token of the previous tokenization) would reproduce it
    /// unchanged: nothing is held back, no gap is waiting to merge with it, and the state carried
    /// into it matches the one it was lexed in.
    pub(crate) fn settled_before(&self, next: &Token) -> bool {
        if self.pending.is_some() || self.state != next.state {
            return false;
        }
        !(next.is_gap() && self.out.last().is_some_and(Token::is_gap))
    }

    pub(crate) fn finish(mut self) -> Vec<Token> {
        self.flush_pending();
        self.out
    }

    fn emit(&mut self, mut token: Token) {
        token.state = self.state;
        self.state = transition(self.state, token.kind);
        self.out.push(token);
    }

    fn push_single(&mut self, ch: char) {
        match TokenKind::from_char(ch) {
            Some(kind) => self.emit(Token::fixed(kind)),
            None => self.push_gap(1),
        }
    }

    fn push_gap(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        match self.out.last_mut() {
            Some(last) if last.is_gap() => last.len += n,
            _ => self.emit(Token::gap(n)),
        }
    }

    fn flush_pending(&mut self) {
        if let Some(ch) = self.pending.take() {
            self.push_single(ch);
        }
    }
}
