use humus_peg::Position;
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn builder_collects_labels_and_notes() {
    let at = Position::new(4, 0, 4);
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("expected expr")
        .with_secondary_label(Position::START, 1, "statement starts here")
        .with_label(at, 2, "found TO")
        .with_note("a statement cannot begin with TO");

    assert!(diag.is_error());
    assert_eq!(diag.labels.len(), 2);
    assert_eq!(diag.primary_label(), Some(&Label::primary(at, 2, "found TO")));
    assert_eq!(diag.notes, vec!["a statement cannot begin with TO".to_string()]);
}

#[test]
fn display_is_the_header_line() {
    let diag = Diagnostic::warning(ErrorCode::E2001).with_message("unused");
    assert_eq!(diag.to_string(), "warning[E2001]: unused");
    assert!(!diag.is_error());
    assert_eq!(diag.primary_label(), None);
}
