use pretty_assertions::assert_eq;
use reduced_model::{
    BraceType,
    HighlightCategory::{self, *},
    LanguageConfig, LexState, ReducedModel, SourceDocument,
};

fn typed(text: &str) -> ReducedModel {
    let mut model = ReducedModel::new();
    for ch in text.chars() {
        model.insert_char(ch);
    }
    model
}

fn state_at(model: &mut ReducedModel, offset: usize) -> LexState {
    model.set_absolute(offset);
    model.current_token_state()
}

fn runs(doc: &mut SourceDocument) -> Vec<(usize, usize, HighlightCategory)> {
    let len = doc.len_chars();
    doc.highlight_status(0, len)
        .unwrap()
        .into_iter()
        .map(|r| (r.location, r.length, r.category))
        .collect()
}

#[test]
fn test_star_before_line_comment_keeps_the_comment() {
    let text = "x = a*//c\ny";
    for mut model in [ReducedModel::from_text(text), typed(text)] {
        assert_eq!(state_at(&mut model, 8), LexState::InsideLineComment);
        assert_eq!(state_at(&mut model, 10), LexState::Free);
    }
}

#[test]
fn test_star_before_block_comment_keeps_the_comment() {
    let text = "y = x*/*int*/2;";
    for mut model in [ReducedModel::from_text(text), typed(text)] {
        assert_eq!(state_at(&mut model, 8), LexState::InsideBlockComment);
        assert_eq!(state_at(&mut model, 13), LexState::Free);
    }
}

#[test]
fn test_slash_inside_block_comment_does_not_hide_the_closer() {
    let text = "/* a /*/ int x;";
    for mut model in [ReducedModel::from_text(text), typed(text)] {
        assert_eq!(state_at(&mut model, 6), LexState::InsideBlockComment);
        assert_eq!(state_at(&mut model, 10), LexState::Free);
    }
}

#[test]
fn test_commented_paren_after_a_star_is_ignored() {
    let text = "f(a*/*)*/b";
    for mut model in [ReducedModel::from_text(text), typed(text)] {
        model.set_absolute(model.len());
        let brace = model.enclosing_brace().unwrap();
        assert_eq!(brace.brace_type, BraceType::Paren);
        assert_eq!(brace.distance, 9);
    }
}

#[test]
fn test_highlighting_after_a_star() {
    let expected = vec![(0, 6, Normal), (6, 7, Commented), (13, 1, Number), (14, 1, Normal)];

    let mut doc = SourceDocument::from_text("y = x*/*int*/2;", LanguageConfig::java());
    assert_eq!(runs(&mut doc), expected);

    let mut doc = SourceDocument::from_text("y = x*int*/2;", LanguageConfig::java());
    doc.insert(6, "/*").unwrap();
    assert_eq!(doc.text(), "y = x*/*int*/2;");
    assert_eq!(runs(&mut doc), expected);
}
