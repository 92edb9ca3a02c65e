//! The reduced model: token stream, private cursor and incremental edits.

use tracing::trace;

use crate::cursor::Cursor;
use crate::lexer::{self, Lexer, Piece};
use crate::propagate::propagate;
use crate::stream::TokenStream;
use crate::token::{LexState, Token};

/// A token together with the offset at which it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    /// Offset of the token's first character.
    pub start: usize,
    /// The token itself.
    pub token: Token,
}

impl TokenSpan {
    /// Offset one past the token's last character.
    pub fn end(&self) -> usize {
        self.start + self.token.len
    }
}

/// Incremental lexical model of one buffer.
///
/// All edits happen at the model's cursor. Offsets count characters (Unicode scalar values), not
/// bytes.
///
/// # Example
///
/// ```rust
/// use reduced_model::{LexState, ReducedModel};
///
/// let mut model = ReducedModel::new();
/// model.insert_text("a /* b");
/// assert_eq!(model.absolute_offset(), 6);
///
/// model.set_absolute(5);
/// assert_eq!(model.current_token_state(), LexState::InsideBlockComment);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReducedModel {
    pub(crate) stream: TokenStream,
    pub(crate) cursor: Cursor,
}

impl ReducedModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model from `text` with one full scan. The cursor is left at offset 0.
    pub fn from_text(text: &str) -> Self {
        let mut stream = TokenStream::new();
        stream.splice(0..0, lexer::lex_text(text));
        Self {
            stream,
            cursor: Cursor::default(),
        }
    }

    /// Document length in characters.
    pub fn len(&self) -> usize {
        self.stream.len()
    }

    /// Returns `true` if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.stream.len() == 0
    }

    /// The cursor's absolute offset.
    pub fn absolute_offset(&self) -> usize {
        self.cursor.offset
    }

    /// Move the cursor by `delta` characters.
    ///
    /// # Panics
    ///
    /// Panics if the target offset falls outside `[0, len]`.
    pub fn move_by(&mut self, delta: isize) {
        self.cursor.move_by(&mut self.stream, delta);
    }

    /// Move the cursor to `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset > len`.
    pub fn set_absolute(&mut self, offset: usize) {
        self.cursor.set_absolute(&mut self.stream, offset);
    }

    /// Insert one character at the cursor; the cursor ends up after it.
    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_text(ch.encode_utf8(&mut buf));
    }

    /// Insert text at the cursor; the cursor ends up after it.
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let mut pieces = Vec::new();
        lexer::push_text(&mut pieces, text);
        let inserted = text.chars().count();
        let at = self.cursor.offset;
        self.edit(at, 0, &pieces, inserted);
    }

    /// Delete `count` characters: rightward of the cursor for a positive count, leftward for a
    /// negative one. The cursor ends up where the deleted text started.
    ///
    /// # Panics
    ///
    /// Panics if the deletion reaches past either end of the document.
    pub fn delete(&mut self, count: isize) {
        let at = self.cursor.offset;
        let len = self.len();
        let start = if count >= 0 {
            let n = count.unsigned_abs();
            assert!(
                n <= len - at,
                "cannot delete {n} characters after offset {at} (length {len})"
            );
            at
        } else {
            let n = count.unsigned_abs();
            assert!(
                n <= at,
                "cannot delete {n} characters before offset {at}"
            );
            at - n
        };
        let deleted = count.unsigned_abs();
        if deleted == 0 {
            return;
        }
        self.edit(start, deleted, &[], 0);
    }

    /// Delete `count` characters after the cursor.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `count` characters follow the cursor.
    pub fn delete_forward(&mut self, count: usize) {
        let Ok(count) = isize::try_from(count) else {
            panic!(
                "cannot delete {count} characters after offset {} (length {})",
                self.cursor.offset,
                self.len()
            );
        };
        self.delete(count);
    }

    /// Delete `count` characters before the cursor.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `count` characters precede the cursor.
    pub fn delete_backward(&mut self, count: usize) {
        let Ok(count) = isize::try_from(count) else {
            panic!(
                "cannot delete {count} characters before offset {}",
                self.cursor.offset
            );
        };
        self.delete(-count);
    }

    /// State of the token holding the character at the cursor. At the end of the document this
    /// is the state in effect after the last token.
    pub fn current_token_state(&self) -> LexState {
        match self.stream.current() {
            Some(token) => token.state,
            None => self.state_after_split(),
        }
    }

    /// All tokens in document order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> + '_ {
        self.stream.iter()
    }

    /// Number of tokens.
    pub fn token_count(&self) -> usize {
        self.stream.token_count()
    }

    /// The token containing `pos`, or `None` at the end of the document.
    ///
    /// Cost is proportional to the distance between `pos` and the cursor.
    pub fn span_at(&self, pos: usize) -> Option<TokenSpan> {
        self.spans_from(pos).next()
    }

    /// Tokens from the one containing `pos` to the end of the document.
    pub fn spans_from(&self, pos: usize) -> impl Iterator<Item = TokenSpan> + '_ {
        let (index, start) = self.locate(pos);
        self.stream
            .iter_from(index, start)
            .map(|(start, token)| TokenSpan {
                start,
                token: *token,
            })
    }

    /// Tokens starting before `pos`, walking backward from the one containing `pos - 1`.
    pub fn spans_before(&self, pos: usize) -> impl Iterator<Item = TokenSpan> + '_ {
        let (index, start) = self.locate(pos);
        // A token straddling `pos` is the first one returned.
        let (index, start) = match self.stream.get(index) {
            Some(token) if start < pos => (index + 1, start + token.len),
            _ => (index, start),
        };
        self.stream
            .iter_back(index, start)
            .map(|(start, token)| TokenSpan {
                start,
                token: *token,
            })
    }

    fn locate(&self, pos: usize) -> (usize, usize) {
        assert!(
            pos <= self.len(),
            "offset {pos} outside the document (length {})",
            self.len()
        );
        self.stream
            .locate(self.stream.split(), self.stream.split_offset(), pos)
    }

    /// State in effect just before the token at the split point.
    pub(crate) fn state_after_split(&self) -> LexState {
        self.stream
            .split()
            .checked_sub(1)
            .and_then(|prev| self.stream.get(prev))
            .map_or(LexState::Free, Token::end_state)
    }

    /// Replace the `deleted` characters at `start` with `inserted`, re-lexing only the affected
    /// neighborhood, and leave the cursor after the inserted text.
    fn edit(
        &mut self,
        start: usize,
        deleted: usize,
        inserted: &[Piece],
        inserted_len: usize,
    ) -> EditStats {
        let end = start + deleted;
        self.set_absolute(start);

        // The token holding the character left of `start` joins the region, so that an inserted
        // character can pair with it and gaps can merge.
        let (region_start, region_offset) = if self.cursor.within > 0 {
            (self.stream.split(), self.stream.split_offset())
        } else {
            match self.stream.split().checked_sub(1) {
                Some(prev) => {
                    let len = self.stream.get(prev).map_or(0, |token| token.len);
                    (prev, self.stream.split_offset() - len)
                }
                None => (0, 0),
            }
        };

        let mut region_end = region_start;
        let mut region_end_offset = region_offset;
        while region_end_offset < end {
            let Some(token) = self.stream.get(region_end) else {
                break;
            };
            region_end_offset += token.len;
            region_end += 1;
        }

        let mut before = Vec::new();
        let mut after = Vec::new();
        for (token_start, token) in self
            .stream
            .iter_from(region_start, region_offset)
            .take(region_end - region_start)
        {
            lexer::push_token_range(&mut before, token, token_start, region_offset, start);
            lexer::push_token_range(&mut after, token, token_start, end, region_end_offset);
        }

        let state = region_start
            .checked_sub(1)
            .and_then(|prev| self.stream.get(prev))
            .map_or(LexState::Free, Token::end_state);
        let mut lexer = Lexer::new(state);
        for piece in before.into_iter().chain(inserted.iter().copied()).chain(after) {
            lexer.feed(piece);
        }

        let edited_end = region_end;
        let (region_end, _) = propagate(&self.stream, &mut lexer, region_end, region_end_offset);
        let tokens = lexer.finish();

        let stats = EditStats {
            replaced: edited_end - region_start,
            absorbed: region_end - edited_end,
            relexed: tokens.len(),
        };
        self.stream.splice(region_start..region_end, tokens);

        self.cursor.place_at_split(&self.stream);
        let target = start + inserted_len;
        self.cursor
            .move_by(&mut self.stream, (target - region_offset) as isize);

        trace!(
            start,
            deleted,
            inserted = inserted_len,
            replaced = stats.replaced,
            absorbed = stats.absorbed,
            relexed = stats.relexed,
            "reduced model edit"
        );
        stats
    }
}

/// Token counts touched by one edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EditStats {
    /// Tokens overlapping the edit (plus the one left of it).
    replaced: usize,
    /// Tokens after those, pulled in until the lexer settled.
    absorbed: usize,
    /// Tokens written in their place.
    relexed: usize,
}
