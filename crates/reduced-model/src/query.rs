//! Brace and newline queries.
//!
//! Every query walks the token stream from the cursor outward and never moves the cursor. Walks
//! are iterative and keep their own brace stack, so their cost is bounded by the distance scanned.

use crate::model::ReducedModel;
use crate::token::{BraceType, TokenKind};

/// Structural context of the cursor's line, as used by the indent policy.
///
/// Every distance is measured backward from the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndentInfo {
    /// Family of the opener enclosing the start of the cursor's line.
    pub brace_type: BraceType,
    /// Distance to the start of that opener.
    pub distance_to_brace: Option<usize>,
    /// Distance to the start of the opener's line. `None` when the opener is on the first line.
    pub distance_to_newline: Option<usize>,
    /// Distance to the start of the cursor's own line. `None` on the first line.
    pub distance_to_prev_newline: Option<usize>,
}

/// The nearest unmatched opener before the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnclosingBrace {
    /// Family of the opener.
    pub brace_type: BraceType,
    /// Distance from the cursor back to the opener.
    pub distance: usize,
}

/// An opener found by a backward walk.
struct Opener {
    index: usize,
    start: usize,
    brace_type: BraceType,
}

impl ReducedModel {
    /// Structural context of the line the cursor is on.
    ///
    /// The enclosing opener is searched from the start of the cursor's line, so everything the
    /// line itself contains is ignored. Leaves the cursor where it is.
    pub fn indent_information(&self) -> IndentInfo {
        let here = self.cursor.offset;
        let split = self.stream.split();
        let split_offset = self.stream.split_offset();

        let Some((nl_index, nl_start)) = self.previous_newline(split, split_offset) else {
            return IndentInfo::default();
        };
        let mut info = IndentInfo {
            distance_to_prev_newline: Some(here - nl_start - 1),
            ..IndentInfo::default()
        };

        let Some(opener) = self.find_opener(nl_index, nl_start) else {
            return info;
        };
        info.brace_type = opener.brace_type;
        info.distance_to_brace = Some(here - opener.start);
        info.distance_to_newline = self
            .previous_newline(opener.index, opener.start)
            .map(|(_, start)| here - start - 1);
        info
    }

    /// The nearest unmatched, unshadowed opener before the cursor.
    pub fn enclosing_brace(&self) -> Option<EnclosingBrace> {
        let opener = self.find_opener(self.stream.split(), self.stream.split_offset())?;
        Some(EnclosingBrace {
            brace_type: opener.brace_type,
            distance: self.cursor.offset - opener.start,
        })
    }

    /// When the cursor sits directly before an unshadowed opener, the distance to just past its
    /// matching closer. `None` if the closer is missing or of another family.
    pub fn balance_forward(&self) -> Option<usize> {
        if self.cursor.within != 0 {
            return None;
        }
        let first = self.stream.current()?;
        if !first.is_free_brace() || first.kind.opens().is_none() {
            return None;
        }

        let here = self.cursor.offset;
        let mut stack: Vec<BraceType> = Vec::new();
        for (start, token) in self.stream.iter_from(self.stream.split(), here) {
            if !token.is_free_brace() {
                continue;
            }
            if let Some(open) = token.kind.opens() {
                stack.push(open);
            } else if let Some(close) = token.kind.closes() {
                if stack.pop() != Some(close) {
                    return None;
                }
                if stack.is_empty() {
                    return Some(start + token.len - here);
                }
            }
        }
        None
    }

    /// When the cursor sits directly after an unshadowed closer, the distance back to the start
    /// of its matching opener.
    pub fn balance_backward(&self) -> Option<usize> {
        if self.cursor.within != 0 {
            return None;
        }
        let split = self.stream.split();
        let last = self.stream.get(split.checked_sub(1)?)?;
        if !last.is_free_brace() || last.kind.closes().is_none() {
            return None;
        }

        let here = self.cursor.offset;
        let mut stack: Vec<BraceType> = Vec::new();
        for (start, token) in self.stream.iter_back(split, here) {
            if !token.is_free_brace() {
                continue;
            }
            if let Some(close) = token.kind.closes() {
                stack.push(close);
            } else if let Some(open) = token.kind.opens() {
                if stack.pop() != Some(open) {
                    return None;
                }
                if stack.is_empty() {
                    return Some(here - start);
                }
            }
        }
        None
    }

    /// Distance back to the start of the cursor's line, `None` on the first line.
    pub fn distance_to_previous_newline(&self) -> Option<usize> {
        let (_, nl_start) =
            self.previous_newline(self.stream.split(), self.stream.split_offset())?;
        Some(self.cursor.offset - nl_start - 1)
    }

    /// Distance forward to the next newline, `None` on the last line.
    pub fn distance_to_next_newline(&self) -> Option<usize> {
        let here = self.cursor.offset;
        self.stream
            .iter_from(self.stream.split(), self.stream.split_offset())
            .find(|(_, token)| token.kind == TokenKind::Newline)
            .map(|(start, _)| start - here)
    }

    /// The last newline token before token `index` (which starts at `start`).
    fn previous_newline(&self, index: usize, start: usize) -> Option<(usize, usize)> {
        self.stream
            .iter_back(index, start)
            .zip((0..index).rev())
            .find(|((_, token), _)| token.kind == TokenKind::Newline)
            .map(|((start, _), index)| (index, start))
    }

    /// Walk backward from token `index` for the nearest opener left unmatched.
    ///
    /// Closers are stacked; an opener pops its closer. A closer of another family is dropped and
    /// the opener is checked again against what remains.
    fn find_opener(&self, index: usize, start: usize) -> Option<Opener> {
        let mut stack: Vec<BraceType> = Vec::new();
        let walk = self.stream.iter_back(index, start).zip((0..index).rev());
        for ((start, token), index) in walk {
            if !token.is_free_brace() {
                continue;
            }
            if let Some(close) = token.kind.closes() {
                stack.push(close);
                continue;
            }
            let Some(open) = token.kind.opens() else {
                continue;
            };
            if pop_until(&mut stack, open) {
                continue;
            }
            return Some(Opener {
                index,
                start,
                brace_type: open,
            });
        }
        None
    }
}

/// Pop closers until one of family `open` is found. Returns `false` if the stack runs empty.
fn pop_until(stack: &mut Vec<BraceType>, open: BraceType) -> bool {
    while let Some(close) = stack.pop() {
        if close == open {
            return true;
        }
    }
    false
}
