use super::*;

#[test]
fn test_span_display_is_start_position() {
    let span = Span::new(3, 7, 3, 12);
    assert_eq!(span.to_string(), "3:7");
    assert_eq!(format!("{span:?}"), "3:7..3:12");
}

#[test]
fn test_span_merge_covers_both() {
    let a = Span::new(1, 5, 1, 8);
    let b = Span::new(2, 1, 2, 4);
    assert_eq!(a.merge(b), Span::new(1, 5, 2, 4));
    assert_eq!(b.merge(a), Span::new(1, 5, 2, 4));
}

#[test]
fn test_span_merge_ignores_dummy() {
    let a = Span::new(4, 2, 4, 9);
    assert_eq!(a.merge(Span::DUMMY), a);
    assert_eq!(Span::DUMMY.merge(a), a);
}

#[test]
fn test_span_point() {
    let span = Span::point(10, 1);
    assert_eq!(span.start(), span.end());
    assert!(!span.is_dummy());
    assert!(Span::default().is_dummy());
}
