//! Forward state propagation.
//!
//! A token's state is a pure function of its predecessor's state and kind, and which characters
//! pair into markers depends on that state. After an edit the re-lexed region therefore keeps
//! absorbing the tokens that follow it, re-splitting and re-combining their markers, until it
//! reaches one whose stored state already matches.

use crate::lexer::Lexer;
use crate::stream::TokenStream;
use crate::token::{LexState, TokenKind};

/// The state in effect after a token of `kind` that starts in `state`.
pub fn transition(state: LexState, kind: TokenKind) -> LexState {
    use LexState::*;
    match (state, kind) {
        (Free, TokenKind::LineCommentStart) => InsideLineComment,
        (Free, TokenKind::BlockCommentStart) => InsideBlockComment,
        (Free, TokenKind::DoubleQuote) => InsideDoubleQuote,
        (Free, TokenKind::SingleQuote) => InsideSingleQuote,
        (InsideLineComment, TokenKind::Newline) => Free,
        (InsideBlockComment, TokenKind::BlockCommentEnd) => Free,
        (InsideDoubleQuote, TokenKind::DoubleQuote | TokenKind::Newline) => Free,
        (InsideSingleQuote, TokenKind::SingleQuote | TokenKind::Newline) => Free,
        (state, _) => state,
    }
}

/// Feed `lexer` the tokens from `index` (which starts at `offset`) onward until it settles
/// before one of them.
///
/// Returns the index and offset of the first token left in place. Every token before it has been
/// fed to `lexer` and must be replaced by its output.
pub(crate) fn propagate(
    stream: &TokenStream,
    lexer: &mut Lexer,
    mut index: usize,
    mut offset: usize,
) -> (usize, usize) {
    while let Some(next) = stream.get(index) {
        if lexer.settled_before(next) {
            break;
        }
        lexer.feed_token(next);
        offset += next.len;
        index += 1;
    }
    (index, offset)
}
