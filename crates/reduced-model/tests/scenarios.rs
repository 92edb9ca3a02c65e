use pretty_assertions::assert_eq;
use reduced_model::{
    BraceType, HighlightCategory, HighlightStatus, LanguageConfig, LexState, ReducedModel,
    SourceDocument, TokenKind,
};

#[test]
fn test_empty_document_indent_information() {
    let model = ReducedModel::new();
    let info = model.indent_information();
    assert_eq!(info.brace_type, BraceType::None);
    assert_eq!(info.distance_to_brace, None);
    assert_eq!(info.distance_to_newline, None);
    assert_eq!(info.distance_to_prev_newline, None);
    assert_eq!(model.absolute_offset(), 0);
}

#[test]
fn test_brace_followed_by_two_newlines() {
    let mut model = ReducedModel::new();
    model.insert_text("{\n\n");
    assert_eq!(model.absolute_offset(), 3);

    let info = model.indent_information();
    assert_eq!(info.brace_type, BraceType::Brace);
    assert_eq!(info.distance_to_brace, Some(3));
    assert_eq!(info.distance_to_newline, None);
    assert_eq!(info.distance_to_prev_newline, Some(0));
}

#[test]
fn test_closing_brace_line_is_dedented() {
    let mut doc = SourceDocument::from_text("{\n  }", LanguageConfig::java());
    assert_eq!(doc.indent_line(1).unwrap(), 0);
    assert_eq!(doc.text(), "{\n}");
}

#[test]
fn test_star_between_slashes_ends_line_comment() {
    let mut model = ReducedModel::from_text("//abc\nx");
    model.set_absolute(3);
    assert_eq!(model.current_token_state(), LexState::InsideLineComment);

    model.set_absolute(1);
    model.insert_char('*');
    let kinds: Vec<TokenKind> = model.tokens().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::BlockCommentStart,
            TokenKind::Slash,
            TokenKind::Gap,
            TokenKind::Newline,
            TokenKind::Gap
        ]
    );
    assert!(
        model
            .tokens()
            .all(|t| t.state != LexState::InsideLineComment)
    );

    // The new `/*` never closes, so the following line is now commented too.
    model.set_absolute(7);
    assert_eq!(model.current_token_state(), LexState::InsideBlockComment);

    let rescan = ReducedModel::from_text("/*/abc\nx");
    assert!(model.tokens().eq(rescan.tokens()));
}

#[test]
fn test_space_between_slashes_frees_the_rest_of_the_line() {
    let mut model = ReducedModel::from_text("// {\n}");
    model.set_absolute(1);
    model.insert_char(' ');

    assert!(model.tokens().all(|t| t.state == LexState::Free));
    model.set_absolute(model.len());
    assert_eq!(model.balance_backward(), Some(3));
}

#[test]
fn test_keyword_highlighting() {
    let mut doc = SourceDocument::from_text("int Y", LanguageConfig::java());
    assert_eq!(
        doc.highlight_status(0, 5).unwrap(),
        vec![
            HighlightStatus::new(0, 3, HighlightCategory::Keyword),
            HighlightStatus::new(3, 2, HighlightCategory::Normal),
        ]
    );
    assert_eq!(
        doc.highlight_status(0, 2).unwrap(),
        vec![HighlightStatus::new(0, 2, HighlightCategory::Keyword)]
    );
    assert!(doc.highlight_status(2, 2).unwrap().is_empty());
}

#[test]
fn test_indent_information_is_idempotent() {
    let mut model = ReducedModel::from_text("class A {\n  void f(int a,\n");
    model.set_absolute(model.len());
    let first = model.indent_information();
    let second = model.indent_information();
    assert_eq!(first, second);
    assert_eq!(model.absolute_offset(), model.len());
    assert_eq!(first.brace_type, BraceType::Paren);
}

#[test]
fn test_move_round_trip() {
    let mut model = ReducedModel::from_text("a /* { */ \"}\" (b)\n[c]");
    model.set_absolute(4);
    for delta in [-4isize, -1, 0, 3, 10, 17] {
        let state = model.current_token_state();
        model.move_by(delta);
        model.move_by(-delta);
        assert_eq!(model.absolute_offset(), 4);
        assert_eq!(model.current_token_state(), state);
    }
}

#[test]
#[should_panic(expected = "leaves the document")]
fn test_moving_past_end_is_a_contract_violation() {
    let mut model = ReducedModel::from_text("abc");
    model.move_by(4);
}

#[test]
#[should_panic(expected = "outside the document")]
fn test_highlight_outside_document_is_a_contract_violation() {
    let model = ReducedModel::from_text("abc");
    model.highlight_status(1, 9);
}
