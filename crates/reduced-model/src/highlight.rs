//! Highlight runs.
//!
//! The model maps each token's state to a category and coalesces neighbors while building runs.
//! [`KeywordClassifier`] then splits `Normal` runs into words and classifies them against the
//! configured word sets.

use std::sync::LazyLock;

use reduced_model_lang::HighlightConfig;
use regex::Regex;

use crate::model::ReducedModel;
use crate::token::{LexState, Token, TokenKind};

/// Category of a highlight run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightCategory {
    /// Plain code.
    Normal,
    /// Inside a comment, markers included.
    Commented,
    /// Inside a `'...'` literal, quotes included.
    SingleQuoted,
    /// Inside a `"..."` literal, quotes included.
    DoubleQuoted,
    /// A reserved word.
    Keyword,
    /// A numeric literal.
    Number,
    /// A configured type name.
    Type,
}

/// One run of highlighted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightStatus {
    /// Offset of the run's first character.
    pub location: usize,
    /// Number of characters (never zero).
    pub length: usize,
    /// Category of every character in the run.
    pub category: HighlightCategory,
}

impl HighlightStatus {
    /// Create a run.
    pub fn new(location: usize, length: usize, category: HighlightCategory) -> Self {
        Self {
            location,
            length,
            category,
        }
    }

    /// Offset one past the run's last character.
    pub fn end(&self) -> usize {
        self.location + self.length
    }
}

/// Category of a token by the state it sits in. Openers take the category of the region they
/// open; the newline that ends a line comment or a literal is plain code.
pub fn category_of(token: &Token) -> HighlightCategory {
    let state = match token.state {
        LexState::Free => token.end_state(),
        LexState::InsideLineComment | LexState::InsideSingleQuote | LexState::InsideDoubleQuote
            if token.kind == TokenKind::Newline =>
        {
            LexState::Free
        }
        state => state,
    };
    match state {
        LexState::Free => HighlightCategory::Normal,
        LexState::InsideLineComment | LexState::InsideBlockComment => HighlightCategory::Commented,
        LexState::InsideSingleQuote => HighlightCategory::SingleQuoted,
        LexState::InsideDoubleQuote => HighlightCategory::DoubleQuoted,
    }
}

/// Accumulates runs, merging each new run into the previous one when they touch and share a
/// category.
#[derive(Debug, Default)]
pub struct RunBuilder {
    runs: Vec<HighlightStatus>,
}

impl RunBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `length` characters at `location`. Empty runs are ignored.
    pub fn push(&mut self, location: usize, length: usize, category: HighlightCategory) {
        if length == 0 {
            return;
        }
        if let Some(last) = self.runs.last_mut()
            && last.category == category
            && last.end() == location
        {
            last.length += length;
            return;
        }
        self.runs.push(HighlightStatus::new(location, length, category));
    }

    /// The finished runs.
    pub fn finish(self) -> Vec<HighlightStatus> {
        self.runs
    }
}

impl ReducedModel {
    /// Coalesced state runs covering `[start, end)`. Empty when `start == end`.
    ///
    /// Does not move the cursor; cost grows with the distance between the cursor and `start`
    /// plus the number of tokens in the range.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end` is past the end of the document.
    pub fn highlight_status(&self, start: usize, end: usize) -> Vec<HighlightStatus> {
        assert!(
            start <= end && end <= self.len(),
            "highlight range {start}..{end} outside the document (length {})",
            self.len()
        );
        let mut builder = RunBuilder::new();
        if start == end {
            return builder.finish();
        }

        for span in self.spans_from(start) {
            if span.start >= end {
                break;
            }
            let from = span.start.max(start);
            let to = span.end().min(end);
            builder.push(from, to - from, category_of(&span.token));
        }
        builder.finish()
    }
}

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:0[xX][0-9a-fA-F_]+|0[bB][01_]+|[0-9][0-9_]*(?:[eE][0-9]*)?)[lLfFdD]?$")
        .expect("number pattern is valid")
});

/// Returns `true` for characters that can be part of a word.
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// Splits `Normal` runs into words and classifies them.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    config: HighlightConfig,
}

impl KeywordClassifier {
    /// Create a classifier over the given word sets.
    pub fn new(config: HighlightConfig) -> Self {
        Self { config }
    }

    /// The word sets in use.
    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Category of one whole word.
    pub fn classify_word(&self, word: &str) -> HighlightCategory {
        if self.config.is_keyword(word) {
            HighlightCategory::Keyword
        } else if NUMBER.is_match(word) {
            HighlightCategory::Number
        } else if self.config.is_type_name(word) {
            HighlightCategory::Type
        } else {
            HighlightCategory::Normal
        }
    }

    /// Refine `runs` by classifying the words inside their `Normal` runs.
    ///
    /// `text` holds the characters of the document starting at `text_start` and must cover every
    /// run. Words are cut at run boundaries, so callers that want whole words must pass runs
    /// that start and end on word boundaries.
    pub fn refine(
        &self,
        runs: &[HighlightStatus],
        text: &[char],
        text_start: usize,
    ) -> Vec<HighlightStatus> {
        let mut builder = RunBuilder::new();
        let mut word = String::new();
        for run in runs {
            if run.category != HighlightCategory::Normal {
                builder.push(run.location, run.length, run.category);
                continue;
            }

            let chars = &text[run.location - text_start..run.end() - text_start];
            let mut i = 0;
            while i < chars.len() {
                let begin = i;
                if is_word_char(chars[i]) {
                    while i < chars.len() && is_word_char(chars[i]) {
                        i += 1;
                    }
                    word.clear();
                    word.extend(&chars[begin..i]);
                    builder.push(run.location + begin, i - begin, self.classify_word(&word));
                } else {
                    while i < chars.len() && !is_word_char(chars[i]) {
                        i += 1;
                    }
                    builder.push(run.location + begin, i - begin, HighlightCategory::Normal);
                }
            }
        }
        builder.finish()
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(HighlightConfig::java())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use super::HighlightCategory::*;

    fn runs(model: &ReducedModel, start: usize, end: usize) -> Vec<(usize, usize, HighlightCategory)> {
        model
            .highlight_status(start, end)
            .into_iter()
            .map(|r| (r.location, r.length, r.category))
            .collect()
    }

    #[test]
    fn state_runs_cover_the_range() {
        let model = ReducedModel::from_text("a /* b */ \"c\" // d\ne");
        assert_eq!(
            runs(&model, 0, model.len()),
            vec![
                (0, 2, Normal),
                (2, 7, Commented),
                (9, 1, Normal),
                (10, 3, DoubleQuoted),
                (13, 1, Normal),
                (14, 4, Commented),
                (18, 2, Normal),
            ]
        );
    }

    #[test]
    fn runs_are_clipped() {
        let model = ReducedModel::from_text("x /* comment */ y");
        assert_eq!(runs(&model, 5, 8), vec![(5, 3, Commented)]);
        assert_eq!(runs(&model, 1, 3), vec![(1, 1, Normal), (2, 1, Commented)]);
        assert!(model.highlight_status(4, 4).is_empty());
    }

    #[test]
    fn unterminated_literal_stops_at_newline() {
        let model = ReducedModel::from_text("'ab\nc");
        assert_eq!(runs(&model, 0, 5), vec![(0, 3, SingleQuoted), (3, 2, Normal)]);
    }

    #[test]
    fn classifier_splits_words() {
        let classifier = KeywordClassifier::default();
        let text: Vec<char> = "int x = 42; String s".chars().collect();
        let refined = classifier.refine(&[HighlightStatus::new(0, text.len(), Normal)], &text, 0);
        let got: Vec<_> = refined
            .iter()
            .map(|r| (r.location, r.length, r.category))
            .collect();
        assert_eq!(
            got,
            vec![
                (0, 3, Keyword),
                (3, 5, Normal),
                (8, 2, Number),
                (10, 2, Normal),
                (12, 6, Type),
                (18, 2, Normal),
            ]
        );
    }

    #[test]
    fn only_whole_words_are_keywords() {
        let classifier = KeywordClassifier::default();
        assert_eq!(classifier.classify_word("int"), Keyword);
        assert_eq!(classifier.classify_word("in"), Normal);
        assert_eq!(classifier.classify_word("integer"), Normal);
        assert_eq!(classifier.classify_word("0x1F"), Number);
        assert_eq!(classifier.classify_word("10L"), Number);
        assert_eq!(classifier.classify_word("x10"), Normal);
    }

    #[test]
    fn builder_coalesces_touching_runs() {
        let mut builder = RunBuilder::new();
        builder.push(0, 2, Normal);
        builder.push(2, 3, Normal);
        builder.push(5, 0, Keyword);
        builder.push(5, 1, Commented);
        assert_eq!(
            builder.finish(),
            vec![
                HighlightStatus::new(0, 5, Normal),
                HighlightStatus::new(5, 1, Commented)
            ]
        );
    }
}
