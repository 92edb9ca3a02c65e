//! The token stream: a zipper over the document's tokens.
//!
//! Tokens left of the split point live in `head` (document order); the token at the split point
//! and everything after it live in `tail`, stored in reverse so that the current token is
//! `tail.last()`. Moving the split by one token is a single pop/push, and inserting or removing
//! tokens at the split never shifts the rest of the document.

use std::ops::Range;

use crate::token::Token;

#[derive(Debug, Clone, Default)]
pub(crate) struct TokenStream {
    head: Vec<Token>,
    tail: Vec<Token>,
    /// Characters covered by `head`.
    head_len: usize,
    /// Characters covered by the whole stream.
    len: usize,
}

impl TokenStream {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Total number of characters.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn token_count(&self) -> usize {
        self.head.len() + self.tail.len()
    }

    /// Index of the token at the split point.
    pub(crate) fn split(&self) -> usize {
        self.head.len()
    }

    /// Character offset at which the token at the split point starts.
    pub(crate) fn split_offset(&self) -> usize {
        self.head_len
    }

    /// The token at the split point (`None` at the end of the stream).
    pub(crate) fn current(&self) -> Option<&Token> {
        self.tail.last()
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Token> {
        if index < self.head.len() {
            return self.head.get(index);
        }
        let k = index - self.head.len();
        if k < self.tail.len() {
            self.tail.get(self.tail.len() - 1 - k)
        } else {
            None
        }
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Token> {
        if index < self.head.len() {
            return self.head.get_mut(index);
        }
        let k = index - self.head.len();
        if k < self.tail.len() {
            let at = self.tail.len() - 1 - k;
            self.tail.get_mut(at)
        } else {
            None
        }
    }

    /// Move the split point one token forward. Returns `false` at the end.
    pub(crate) fn step_forward(&mut self) -> bool {
        match self.tail.pop() {
            Some(token) => {
                self.head_len += token.len;
                self.head.push(token);
                true
            }
            None => false,
        }
    }

    /// Move the split point one token backward. Returns `false` at the start.
    pub(crate) fn step_backward(&mut self) -> bool {
        match self.head.pop() {
            Some(token) => {
                self.head_len -= token.len;
                self.tail.push(token);
                true
            }
            None => false,
        }
    }

    /// Move the split point to `index`, one token at a time.
    pub(crate) fn seek(&mut self, index: usize) {
        assert!(
            index <= self.token_count(),
            "token index {index} out of range (stream has {} tokens)",
            self.token_count()
        );
        while self.split() < index {
            self.step_forward();
        }
        while self.split() > index {
            self.step_backward();
        }
    }

    /// Replace the tokens in `range` with `tokens`. Leaves the split point at `range.start`.
    pub(crate) fn splice(&mut self, range: Range<usize>, tokens: Vec<Token>) {
        self.seek(range.start);
        for _ in range {
            if let Some(removed) = self.tail.pop() {
                self.len -= removed.len;
            }
        }
        for token in tokens.into_iter().rev() {
            self.len += token.len;
            self.tail.push(token);
        }
    }

    /// All tokens in document order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Token> + '_ {
        self.head.iter().chain(self.tail.iter().rev())
    }

    /// Tokens from `index` onward with their start offsets; `start` is the offset of `index`.
    pub(crate) fn iter_from(
        &self,
        index: usize,
        start: usize,
    ) -> impl Iterator<Item = (usize, &Token)> + '_ {
        (index..self.token_count())
            .filter_map(move |i| self.get(i))
            .scan(start, |offset, token| {
                let at = *offset;
                *offset += token.len;
                Some((at, token))
            })
    }

    /// Tokens before `index`, walking backward, with their start offsets; `end` is the offset at
    /// which token `index` starts.
    pub(crate) fn iter_back(
        &self,
        index: usize,
        end: usize,
    ) -> impl Iterator<Item = (usize, &Token)> + '_ {
        (0..index)
            .rev()
            .filter_map(move |i| self.get(i))
            .scan(end, |offset, token| {
                *offset -= token.len;
                Some((*offset, token))
            })
    }

    /// Find the token containing character `pos`, walking from token `index` which starts at
    /// `start`. At the end of the document this is `(token_count, len)`.
    pub(crate) fn locate(&self, index: usize, start: usize, pos: usize) -> (usize, usize) {
        let mut i = index;
        let mut s = start;
        if pos >= s {
            while let Some(token) = self.get(i) {
                if s + token.len > pos {
                    break;
                }
                s += token.len;
                i += 1;
            }
        } else {
            while s > pos && i > 0 {
                i -= 1;
                s -= self.get(i).map_or(0, |token| token.len);
            }
        }
        (i, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex_text;

    fn stream_of(text: &str) -> TokenStream {
        let mut stream = TokenStream::new();
        stream.splice(0..0, lex_text(text));
        stream
    }

    #[test]
    fn splice_tracks_lengths() {
        let mut stream = stream_of("a{b}c");
        assert_eq!(stream.len(), 5);
        assert_eq!(stream.token_count(), 5);

        stream.splice(1..4, lex_text("xyz"));
        assert_eq!(stream.len(), 5);
        assert_eq!(stream.split(), 1);
        assert_eq!(stream.split_offset(), 1);
        assert_eq!(stream.iter().map(|t| t.len).sum::<usize>(), 5);
    }

    #[test]
    fn get_reads_both_sides_of_the_split() {
        let mut stream = stream_of("{(}");
        stream.seek(2);
        let kinds: Vec<_> = (0..3).filter_map(|i| stream.get(i)).map(|t| t.kind).collect();
        let expected: Vec<_> = stream.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, expected);
        assert!(stream.get(3).is_none());
    }

    #[test]
    fn locate_walks_both_ways() {
        let mut stream = stream_of("ab{cd}");
        stream.seek(2);
        // tokens: "ab"(0) "{"(2) "cd"(3) "}"(5)
        assert_eq!(stream.locate(2, 2, 4), (2, 3));
        assert_eq!(stream.locate(2, 2, 1), (0, 0));
        assert_eq!(stream.locate(2, 2, 6), (4, 6));
        assert_eq!(stream.locate(0, 0, 5), (3, 5));
    }

    #[test]
    fn reverse_iteration_reports_starts() {
        let stream = stream_of("ab{cd}");
        let starts: Vec<_> = stream.iter_back(4, 6).map(|(s, _)| s).collect();
        assert_eq!(starts, vec![5, 3, 2, 0]);
    }
}
