use reduced_model::{DocumentError, LanguageConfig, LexState, SourceDocument};

fn doc(text: &str) -> SourceDocument {
    SourceDocument::from_text(text, LanguageConfig::java())
}

#[test]
fn test_comment_and_uncomment_round_trip() {
    let mut d = doc("a\n  b\nc");
    d.comment_lines(0..2).unwrap();
    assert_eq!(d.text(), "//a\n//  b\nc");
    assert_eq!(d.state_at(6).unwrap(), LexState::InsideLineComment);
    assert_eq!(d.state_at(10).unwrap(), LexState::Free);

    assert_eq!(d.uncomment_lines(0..2).unwrap(), 2);
    assert_eq!(d.text(), "a\n  b\nc");
    assert_eq!(d.state_at(3).unwrap(), LexState::Free);
}

#[test]
fn test_uncomment_indented_marker() {
    let mut d = doc("{\n  // x;\n}");
    assert_eq!(d.uncomment_lines(1..2).unwrap(), 1);
    assert_eq!(d.text(), "{\n   x;\n}");
}

#[test]
fn test_uncomment_skips_code_lines() {
    let mut d = doc("x; // y\nz");
    assert_eq!(d.uncomment_lines(0..2).unwrap(), 0);
    assert_eq!(d.text(), "x; // y\nz");
}

#[test]
fn test_uncomment_leaves_markers_inside_block_comments() {
    let mut d = doc("/*\n// x\n*/");
    assert_eq!(d.uncomment_lines(1..2).unwrap(), 0);
    assert_eq!(d.text(), "/*\n// x\n*/");
}

#[test]
fn test_commenting_a_line_shadows_its_braces() {
    let mut d = doc("{\n{\n}");
    let info = d.indent_information_at(5).unwrap();
    assert_eq!(info.distance_to_brace, Some(3));

    d.comment_lines(1..2).unwrap();
    assert_eq!(d.text(), "{\n//{\n}");

    // The inner `{` is commented out, so the outer one encloses the last line.
    let info = d.indent_information_at(7).unwrap();
    assert_eq!(info.distance_to_brace, Some(7));
}

#[test]
fn test_comment_lines_rejects_bad_range() {
    let mut d = doc("a");
    assert_eq!(
        d.comment_lines(0..2),
        Err(DocumentError::InvalidLine {
            line: 2,
            line_count: 1
        })
    );
    assert_eq!(d.text(), "a");
}
