//! Source document: the text buffer that drives a [`ReducedModel`].
//!
//! The document owns the characters (a [`Rope`]) and forwards every edit to the model, so the
//! two stay in lockstep. Everything that needs both structure and characters lives here: the
//! indent policy, keyword highlighting, the comment commands, package-name extraction and
//! delimiter search.

use std::ops::Range;
use std::sync::LazyLock;

use reduced_model_lang::LanguageConfig;
use regex::Regex;
use ropey::Rope;
use tracing::debug;

use crate::error::{DocumentError, DocumentResult};
use crate::highlight::{
    HighlightCategory, HighlightStatus, KeywordClassifier, RunBuilder, category_of, is_word_char,
};
use crate::model::ReducedModel;
use crate::query::IndentInfo;
use crate::token::{BraceType, LexState, TokenKind};

const PACKAGE: &str = "package";

static PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}_$][\w$]*(?:\s*\.\s*[\p{L}_$][\w$]*)*$")
        .expect("package name pattern is valid")
});

/// An editable source buffer with its reduced model.
///
/// Offsets are character offsets; lines are separated by `\n` only.
///
/// # Example
///
/// ```rust
/// use reduced_model::{LanguageConfig, SourceDocument};
///
/// let mut doc = SourceDocument::from_text("class A {\nint x;\n}", LanguageConfig::java());
/// doc.indent_lines(0..3).unwrap();
/// assert_eq!(doc.text(), "class A {\n  int x;\n}");
/// ```
#[derive(Debug, Clone)]
pub struct SourceDocument {
    text: Rope,
    model: ReducedModel,
    config: LanguageConfig,
    classifier: KeywordClassifier,
}

impl SourceDocument {
    /// Create an empty document.
    pub fn new(config: LanguageConfig) -> Self {
        Self::from_text("", config)
    }

    /// Create a document holding `text`.
    pub fn from_text(text: &str, config: LanguageConfig) -> Self {
        let classifier = KeywordClassifier::new(config.highlight.clone());
        Self {
            text: Rope::from_str(text),
            model: ReducedModel::from_text(text),
            config,
            classifier,
        }
    }

    /// The whole text.
    pub fn text(&self) -> String {
        self.text.to_string()
    }

    /// The underlying rope.
    pub fn rope(&self) -> &Rope {
        &self.text
    }

    /// Length in characters.
    pub fn len_chars(&self) -> usize {
        self.text.len_chars()
    }

    /// Number of lines. A trailing newline starts a final empty line.
    pub fn line_count(&self) -> usize {
        self.text.len_lines()
    }

    /// The reduced model.
    pub fn model(&self) -> &ReducedModel {
        &self.model
    }

    /// The language configuration.
    pub fn config(&self) -> &LanguageConfig {
        &self.config
    }

    /// Offset of the first character of `line`.
    pub fn line_start(&self, line: usize) -> DocumentResult<usize> {
        self.check_line(line)?;
        Ok(self.text.line_to_char(line))
    }

    /// Line holding `offset`.
    pub fn line_of(&self, offset: usize) -> DocumentResult<usize> {
        self.check_offset(offset)?;
        Ok(self.text.char_to_line(offset))
    }

    /// Insert `text` at `offset`.
    pub fn insert(&mut self, offset: usize, text: &str) -> DocumentResult<()> {
        self.check_offset(offset)?;
        if text.is_empty() {
            return Ok(());
        }
        self.text.insert(offset, text);
        self.model.set_absolute(offset);
        self.model.insert_text(text);
        Ok(())
    }

    /// Remove the characters in `range`.
    pub fn remove(&mut self, range: Range<usize>) -> DocumentResult<()> {
        self.check_range(range.start, range.end)?;
        if range.is_empty() {
            return Ok(());
        }
        let count = range.len();
        self.text.remove(range.clone());
        self.model.set_absolute(range.start);
        self.model.delete_forward(count);
        Ok(())
    }

    /// Replace the characters in `range` with `text`.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> DocumentResult<()> {
        let start = range.start;
        self.remove(range)?;
        self.insert(start, text)
    }

    /// Lexical state in effect at `offset`.
    pub fn state_at(&mut self, offset: usize) -> DocumentResult<LexState> {
        self.check_offset(offset)?;
        self.model.set_absolute(offset);
        Ok(self.model.current_token_state())
    }

    /// Structural context of the line holding `offset`, measured from `offset`.
    pub fn indent_information_at(&mut self, offset: usize) -> DocumentResult<IndentInfo> {
        self.check_offset(offset)?;
        self.model.set_absolute(offset);
        Ok(self.model.indent_information())
    }

    /// Highlight runs over `[start, end)` with keywords, numbers and type names split out of
    /// plain code.
    ///
    /// Words that straddle either end of the range are classified whole and then clipped.
    pub fn highlight_status(
        &mut self,
        start: usize,
        end: usize,
    ) -> DocumentResult<Vec<HighlightStatus>> {
        self.check_range(start, end)?;
        if start == end {
            return Ok(Vec::new());
        }

        let mut word_start = start;
        while word_start > 0 && is_word_char(char_at(&self.text, word_start - 1)?) {
            word_start -= 1;
        }
        let mut word_end = end;
        while word_end < self.len_chars() && is_word_char(char_at(&self.text, word_end)?) {
            word_end += 1;
        }

        self.model.set_absolute(word_start);
        let runs = self.model.highlight_status(word_start, word_end);
        let chars: Vec<char> = self.text.slice(word_start..word_end).chars().collect();
        let refined = self.classifier.refine(&runs, &chars, word_start);

        let mut builder = RunBuilder::new();
        for run in refined {
            let from = run.location.max(start);
            let to = run.end().min(end);
            if from < to {
                builder.push(from, to - from, run.category);
            }
        }
        Ok(builder.finish())
    }

    /// The indentation `line` should have, in columns.
    pub fn indent_amount(&mut self, line: usize) -> DocumentResult<usize> {
        let line_start = self.line_start(line)?;
        self.indent_amount_at(line_start)
    }

    /// Re-indent `line`: its leading spaces and tabs become the computed number of spaces.
    /// Returns the new indentation.
    pub fn indent_line(&mut self, line: usize) -> DocumentResult<usize> {
        let line_start = self.line_start(line)?;
        let amount = self.indent_amount_at(line_start)?;

        let current = self.leading_whitespace(line_start);
        let already = current == amount
            && self
                .text
                .slice(line_start..line_start + current)
                .chars()
                .all(|ch| ch == ' ');
        if !already {
            self.replace(line_start..line_start + current, &" ".repeat(amount))?;
        }
        debug!(line, amount, changed = !already, "indent line");
        Ok(amount)
    }

    /// Re-indent every line in `lines`, top to bottom.
    pub fn indent_lines(&mut self, lines: Range<usize>) -> DocumentResult<()> {
        self.check_lines(&lines)?;
        for line in lines {
            self.indent_line(line)?;
        }
        Ok(())
    }

    /// Break the line at `offset` and indent the new line. Returns the offset just past the new
    /// line's indentation.
    pub fn insert_newline_indented(&mut self, offset: usize) -> DocumentResult<usize> {
        self.insert(offset, "\n")?;
        let line = self.text.char_to_line(offset + 1);
        let amount = self.indent_line(line)?;
        Ok(self.line_start(line)? + amount)
    }

    /// Prefix every line in `lines` with the line-comment token.
    pub fn comment_lines(&mut self, lines: Range<usize>) -> DocumentResult<()> {
        self.check_lines(&lines)?;
        let token = self.config.comment.line.clone();
        for line in lines.clone() {
            let start = self.line_start(line)?;
            self.insert(start, &token)?;
        }
        debug!(?lines, "comment lines");
        Ok(())
    }

    /// Remove the line-comment marker that opens each line in `lines`, if there is one.
    /// Markers that are themselves inside a comment or literal are left alone. Returns the
    /// number of lines changed.
    pub fn uncomment_lines(&mut self, lines: Range<usize>) -> DocumentResult<usize> {
        self.check_lines(&lines)?;
        let mut changed = 0;
        for line in lines.clone() {
            let start = self.line_start(line)?;
            let first = start + self.leading_whitespace(start);
            if first >= self.len_chars() {
                continue;
            }
            self.model.set_absolute(first);
            let marker = self.model.span_at(first).filter(|span| {
                span.start == first
                    && span.token.kind == TokenKind::LineCommentStart
                    && span.token.state == LexState::Free
            });
            if let Some(span) = marker {
                self.remove(first..span.end())?;
                changed += 1;
            }
        }
        debug!(?lines, changed, "uncomment lines");
        Ok(changed)
    }

    /// The dotted name of the document's `package` statement.
    ///
    /// Comments before and inside the statement are skipped. Returns `Ok(None)` when the first
    /// statement is not a package declaration.
    pub fn package_name(&mut self) -> DocumentResult<Option<String>> {
        let mut code = String::new();
        let mut terminated = false;
        self.model.set_absolute(0);

        'scan: for span in self.model.spans_from(0) {
            if span.token.is_commented() {
                continue;
            }
            for pos in span.start..span.end() {
                let ch = char_at(&self.text, pos)?;
                if ch == ';' {
                    terminated = true;
                    break 'scan;
                }
                code.push(ch);
            }
            if leading_word(&code).is_some_and(|word| word != PACKAGE) {
                return Ok(None);
            }
        }

        let head = code.trim_start();
        let Some(rest) = head.strip_prefix(PACKAGE) else {
            return Ok(None);
        };
        if rest.starts_with(is_word_char) {
            return Ok(None);
        }
        if !terminated {
            debug!("package statement without `;`");
            return Err(DocumentError::InvalidPackage(format!(
                "missing `;` after `{}`",
                head.trim_end()
            )));
        }

        let name = rest.trim();
        if !PACKAGE_NAME.is_match(name) {
            debug!(name, "malformed package name");
            return Err(DocumentError::InvalidPackage(name.to_string()));
        }
        Ok(Some(name.chars().filter(|ch| !ch.is_whitespace()).collect()))
    }

    /// Offset of the nearest delimiter in `delims` before `pos`, skipping comments and literals.
    ///
    /// With `skip_paren_phrases`, balanced `( ... )` and `[ ... ]` phrases are stepped over
    /// whole; a delimiter inside one does not count. An opener only ends a phrase closed by its
    /// own family, so `[a)` still leaves the walk inside the `)` phrase.
    pub fn find_prev_delimiter(
        &mut self,
        pos: usize,
        delims: &[char],
        skip_paren_phrases: bool,
    ) -> DocumentResult<Option<usize>> {
        self.check_offset(pos)?;
        self.model.set_absolute(pos);

        let mut phrases: Vec<char> = Vec::new();
        for span in self.model.spans_before(pos) {
            if category_of(&span.token) != HighlightCategory::Normal {
                continue;
            }
            for at in (span.start..span.end().min(pos)).rev() {
                let ch = char_at(&self.text, at)?;
                if phrases.is_empty() && delims.contains(&ch) {
                    return Ok(Some(at));
                }
                if !skip_paren_phrases {
                    continue;
                }
                match ch {
                    ')' | ']' => phrases.push(ch),
                    '(' => close_phrase(&mut phrases, ')'),
                    '[' => close_phrase(&mut phrases, ']'),
                    _ => {}
                }
            }
        }
        Ok(None)
    }

    fn indent_amount_at(&mut self, line_start: usize) -> DocumentResult<usize> {
        let unit = self.config.indent.indent_width;
        self.model.set_absolute(line_start);
        let info = self.model.indent_information();
        if info.distance_to_prev_newline.is_none() || line_start < 2 {
            return Ok(0);
        }

        let brace_line_start = info.distance_to_newline.map_or(0, |d| line_start - d);
        let base = match (info.brace_type, info.distance_to_brace) {
            (BraceType::Paren | BraceType::Bracket, Some(distance)) => {
                let column = line_start - distance - brace_line_start;
                return Ok(column + 1);
            }
            (BraceType::Brace, Some(_)) => self.leading_whitespace(brace_line_start) + unit,
            _ => 0,
        };

        let mut amount = base;
        if self.first_non_blank(line_start) == Some('}') {
            amount = amount.saturating_sub(unit);
        }
        let ends_normally = match self.last_code_char(line_start - 1)? {
            Some(ch) => self.config.indent.is_normal_ending(ch),
            None => true,
        };
        if !ends_normally {
            amount += unit;
        }
        Ok(amount)
    }

    /// Last non-blank, non-commented character on the line ended by the newline at `newline`.
    fn last_code_char(&mut self, newline: usize) -> DocumentResult<Option<char>> {
        if char_at(&self.text, newline)? != '\n' {
            return Err(DocumentError::InvariantViolation(format!(
                "expected a newline at offset {newline}"
            )));
        }
        self.model.set_absolute(newline);
        for span in self.model.spans_before(newline) {
            if span.token.kind == TokenKind::Newline {
                break;
            }
            if span.token.is_commented() {
                continue;
            }
            for pos in (span.start..span.end()).rev() {
                let ch = char_at(&self.text, pos)?;
                if !ch.is_whitespace() {
                    return Ok(Some(ch));
                }
            }
        }
        Ok(None)
    }

    /// Number of spaces and tabs starting at `offset`.
    fn leading_whitespace(&self, offset: usize) -> usize {
        self.text
            .chars_at(offset)
            .take_while(|ch| *ch == ' ' || *ch == '\t')
            .count()
    }

    fn first_non_blank(&self, line_start: usize) -> Option<char> {
        self.text
            .chars_at(line_start)
            .find(|ch| *ch != ' ' && *ch != '\t')
            .filter(|ch| *ch != '\n')
    }

    fn check_offset(&self, offset: usize) -> DocumentResult<()> {
        let len = self.len_chars();
        if offset > len {
            return Err(DocumentError::InvalidOffset { offset, len });
        }
        Ok(())
    }

    fn check_range(&self, start: usize, end: usize) -> DocumentResult<()> {
        let len = self.len_chars();
        if start > end || end > len {
            return Err(DocumentError::InvalidRange { start, end, len });
        }
        Ok(())
    }

    fn check_line(&self, line: usize) -> DocumentResult<()> {
        let line_count = self.line_count();
        if line >= line_count {
            return Err(DocumentError::InvalidLine { line, line_count });
        }
        Ok(())
    }

    fn check_lines(&self, lines: &Range<usize>) -> DocumentResult<()> {
        let line_count = self.line_count();
        if lines.start > lines.end || lines.end > line_count {
            return Err(DocumentError::InvalidLine {
                line: lines.end,
                line_count,
            });
        }
        Ok(())
    }
}

impl Default for SourceDocument {
    fn default() -> Self {
        Self::new(LanguageConfig::default())
    }
}

/// The character at `pos`; a position the model derived but the text lacks means the two have
/// drifted apart.
fn char_at(text: &Rope, pos: usize) -> DocumentResult<char> {
    text.get_char(pos).ok_or_else(|| {
        DocumentError::InvariantViolation(format!(
            "no character at offset {pos} (text length {})",
            text.len_chars()
        ))
    })
}

/// An opener met walking backward: drop the innermost open phrase of its family along with any
/// mismatched phrases nested inside it. Without one the opener is ignored.
fn close_phrase(phrases: &mut Vec<char>, close: char) {
    if let Some(at) = phrases.iter().rposition(|ch| *ch == close) {
        phrases.truncate(at);
    }
}

/// The first word of `code` once it is followed by a non-word character.
fn leading_word(code: &str) -> Option<&str> {
    let head = code.trim_start();
    let end = head.find(|ch: char| !is_word_char(ch))?;
    Some(&head[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(text: &str) -> SourceDocument {
        SourceDocument::from_text(text, LanguageConfig::java())
    }

    #[test]
    fn edits_keep_model_and_text_in_step() {
        let mut d = doc("int x;");
        d.insert(3, " y,").unwrap();
        d.remove(0..1).unwrap();
        assert_eq!(d.text(), "nt y, x;");
        assert_eq!(d.model().len(), d.len_chars());
    }

    #[test]
    fn out_of_range_arguments_are_errors() {
        let mut d = doc("abc");
        assert_eq!(
            d.insert(4, "x"),
            Err(DocumentError::InvalidOffset { offset: 4, len: 3 })
        );
        assert_eq!(
            d.highlight_status(2, 5),
            Err(DocumentError::InvalidRange {
                start: 2,
                end: 5,
                len: 3
            })
        );
        assert_eq!(
            d.indent_line(1),
            Err(DocumentError::InvalidLine {
                line: 1,
                line_count: 1
            })
        );
    }

    #[test]
    fn leading_word_needs_a_terminator() {
        assert_eq!(leading_word("  package a"), Some("package"));
        assert_eq!(leading_word("  pack"), None);
        assert_eq!(leading_word("@A"), Some(""));
    }

    #[test]
    fn state_at_reports_enclosing_state() {
        let mut d = doc("a // b\nc");
        assert_eq!(d.state_at(5).unwrap(), LexState::InsideLineComment);
        assert_eq!(d.state_at(7).unwrap(), LexState::Free);
    }
}
