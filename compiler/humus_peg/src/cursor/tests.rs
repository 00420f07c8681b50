use super::*;

#[test]
fn newline_starts_a_new_row() {
    let p = Position::START.after('a').after('\n').after('b');
    assert_eq!(p, Position::new(3, 1, 1));
}

#[test]
fn carriage_return_is_an_ordinary_column() {
    let p = Position::START.after('\r');
    assert_eq!(p, Position::new(1, 0, 1));
}

#[test]
fn position_displays_one_based() {
    assert_eq!(Position::new(12, 2, 4).to_string(), "3:5");
}

#[test]
fn span_length_counts_offsets() {
    let span = Span::new(Position::new(2, 0, 2), Position::new(5, 0, 5));
    assert_eq!(span.len(), 3);
    assert!(!span.is_empty());
    assert!(Span::default().is_empty());
}

#[test]
fn end_cursor_has_no_token_and_cannot_advance() {
    let cursor: Cursor<char> = Cursor::end(Position::new(4, 0, 4));
    assert!(cursor.is_end());
    assert!(cursor.token().is_none());
    assert!(cursor.stall().is_none());

    let mut sponsor = EventLoop::new();
    let customer = Actor::from_fn(|_, _: Cursor<char>| {});
    assert!(!cursor.advance(&mut sponsor, customer));
    assert_eq!(sponsor.pending(), 0);
}

#[test]
fn clones_share_the_same_token() {
    let rest: Stream<char> = Actor::from_fn(|_, _| {});
    let cursor = Cursor::new(Position::START, 'x', rest);
    let copy = cursor.clone();
    assert_eq!(copy.token(), Some(&'x'));
    assert_eq!(copy.position(), cursor.position());
}
