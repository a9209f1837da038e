//! Restartable tainted views over caller-owned sources.

use tainted_string::{iterator_of, wrap, TaintVariant, TaintedSequenceView, TaintedString};

#[derive(TaintVariant)]
struct HeaderValue;

#[test]
fn a_view_can_be_traversed_more_than_once() {
    let source = vec!["text/html", "gzip"];
    let view: TaintedSequenceView<'_, _> = TaintedSequenceView::over(&source);

    let first: Vec<TaintedString> = view.iter().collect();
    let second: Vec<TaintedString> = view.iter().collect();
    assert_eq!(first, vec![wrap("text/html"), wrap("gzip")]);
    assert_eq!(first, second);
}

#[test]
fn views_wrap_into_the_requested_variant() {
    let source = vec!["q=cats", "page=2"];
    let view: TaintedSequenceView<'_, _, HeaderValue> = TaintedSequenceView::over(&source);
    let values: Vec<TaintedString<HeaderValue>> = view.iter().collect();
    assert_eq!(values[0], TaintedString::wrap("q=cats"));
    assert_eq!(values.len(), 2);
}

#[test]
fn a_factory_fixes_the_element_variant_once() {
    let factory = iterator_of::<HeaderValue>();
    let lines = vec!["a".to_string(), "b".to_string()];
    let values: Vec<TaintedString<HeaderValue>> = factory.wrap(&lines).iter().collect();
    assert_eq!(
        values,
        vec![TaintedString::wrap("a"), TaintedString::wrap("b")]
    );

    // The same factory works across sources.
    let chars: Vec<TaintedString<HeaderValue>> = factory.wrap("hi").iter().collect();
    assert_eq!(chars.len(), 2);
}

#[test]
fn already_tainted_elements_are_rewrapped() {
    let stored: Vec<TaintedString> = vec![wrap("one"), wrap("two")];
    let view: TaintedSequenceView<'_, _, HeaderValue> = TaintedSequenceView::over(&stored);
    let rewrapped: Vec<TaintedString<HeaderValue>> = view.iter().collect();
    assert_eq!(rewrapped[0], TaintedString::wrap("one"));
    assert_eq!(rewrapped[1], TaintedString::wrap("two"));
}

#[test]
fn a_tainted_string_exposes_its_own_view() {
    let text = wrap("cat");
    let letters: Vec<TaintedString> = text.view().iter().collect();
    assert_eq!(letters, vec![wrap("c"), wrap("a"), wrap("t")]);

    let for_loop: Vec<TaintedString> = (&text).into_iter().collect();
    assert_eq!(for_loop, letters);
}
