//! Lazy re-tainting views over caller-owned iterable sources.
//!
//! A [`TaintedSequenceView`] borrows a source and wraps every element it
//! produces into a target variant before handing it to the caller; it never
//! yields a raw element. The view holds no cursor state, so a traversal can
//! be restarted whenever the underlying source supports being iterated
//! again. Mutating the source concurrently is only as safe as the source's
//! own iteration contract; the view adds no synchronization.

use std::marker::PhantomData;

use crate::string::TaintedString;
use crate::variant::{Base, Variant};

pub(crate) mod sealed {
    use crate::string::TaintedString;
    use crate::variant::Variant;

    /// Crate-private extraction of an element's text. Not exported, so a
    /// tainted element's payload cannot be read through this path from
    /// outside the crate.
    pub trait ElementText {
        fn element_text(&self) -> String;
    }

    impl ElementText for char {
        fn element_text(&self) -> String {
            self.to_string()
        }
    }

    impl ElementText for str {
        fn element_text(&self) -> String {
            self.to_string()
        }
    }

    impl ElementText for String {
        fn element_text(&self) -> String {
            self.clone()
        }
    }

    impl<V: Variant> ElementText for TaintedString<V> {
        fn element_text(&self) -> String {
            self.payload().to_string()
        }
    }

    impl<T: ElementText + ?Sized> ElementText for &T {
        fn element_text(&self) -> String {
            (**self).element_text()
        }
    }
}

/// An element a view knows how to re-taint: a character, trusted text, or
/// an already-tainted value of any variant (which is re-wrapped into the
/// view's target variant). Sealed; values hidden inside arbitrary
/// user-defined containers are out of scope for this engine.
pub trait ElementSource: sealed::ElementText {}

impl ElementSource for char {}
impl ElementSource for str {}
impl ElementSource for String {}
impl<V: Variant> ElementSource for TaintedString<V> {}
impl<T: ElementSource + ?Sized> ElementSource for &T {}

/// An iterable source a view can traverse. Each call to
/// [`IterSource::traverse`] restarts from the source's own iteration
/// contract.
pub trait IterSource<'a> {
    /// Element type produced by one traversal.
    type Element: ElementSource;
    /// The traversal iterator.
    type Iter: Iterator<Item = Self::Element> + 'a;

    /// Starts a fresh traversal.
    fn traverse(&'a self) -> Self::Iter;
}

impl<'a> IterSource<'a> for str {
    type Element = char;
    type Iter = std::str::Chars<'a>;

    fn traverse(&'a self) -> Self::Iter {
        self.chars()
    }
}

impl<'a> IterSource<'a> for String {
    type Element = char;
    type Iter = std::str::Chars<'a>;

    fn traverse(&'a self) -> Self::Iter {
        self.chars()
    }
}

impl<'a, T: ElementSource + 'a> IterSource<'a> for [T] {
    type Element = &'a T;
    type Iter = std::slice::Iter<'a, T>;

    fn traverse(&'a self) -> Self::Iter {
        self.iter()
    }
}

impl<'a, T: ElementSource + 'a> IterSource<'a> for Vec<T> {
    type Element = &'a T;
    type Iter = std::slice::Iter<'a, T>;

    fn traverse(&'a self) -> Self::Iter {
        self.iter()
    }
}

/// A lazy view over a borrowed iterable source; every element produced is
/// wrapped into the target variant `V` before being yielded.
///
/// ```rust
/// use tainted_string::{Base, TaintedSequenceView, TaintedString};
///
/// let header_values = vec!["text/html", "gzip"];
/// let view: TaintedSequenceView<'_, _, Base> = TaintedSequenceView::over(&header_values);
/// for value in &view {
///     let tainted: TaintedString<Base> = value;
///     assert!(!tainted.is_empty());
/// }
/// ```
pub struct TaintedSequenceView<'a, S: ?Sized, V: Variant = Base> {
    source: &'a S,
    element: PhantomData<V>,
}

impl<'a, S: ?Sized, V: Variant> TaintedSequenceView<'a, S, V> {
    /// Creates a view over `source` without copying it.
    pub fn over(source: &'a S) -> Self {
        TaintedSequenceView {
            source,
            element: PhantomData,
        }
    }
}

impl<'a, S, V> TaintedSequenceView<'a, S, V>
where
    S: IterSource<'a> + ?Sized,
    V: Variant,
{
    /// Starts a traversal; finite exactly when the source is.
    pub fn iter(&self) -> Elements<S::Iter, V> {
        Elements {
            inner: self.source.traverse(),
            element: PhantomData,
        }
    }
}

impl<'a, S: ?Sized, V: Variant> Clone for TaintedSequenceView<'a, S, V> {
    fn clone(&self) -> Self {
        TaintedSequenceView {
            source: self.source,
            element: PhantomData,
        }
    }
}

impl<'a, S: ?Sized, V: Variant> Copy for TaintedSequenceView<'a, S, V> {}

impl<'a, 'b, S, V> IntoIterator for &'b TaintedSequenceView<'a, S, V>
where
    S: IterSource<'a> + ?Sized,
    V: Variant,
{
    type Item = TaintedString<V>;
    type IntoIter = Elements<S::Iter, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Traversal iterator of a [`TaintedSequenceView`]; yields tainted values
/// of the view's target variant.
pub struct Elements<I, V: Variant> {
    inner: I,
    element: PhantomData<V>,
}

impl<I, V> Iterator for Elements<I, V>
where
    I: Iterator,
    I::Item: ElementSource,
    V: Variant,
{
    type Item = TaintedString<V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|element| TaintedString::wrap(sealed::ElementText::element_text(&element)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// A reusable factory permanently bound to one target element variant.
///
/// Lets code build views yielding a specific variant without re-spelling
/// the variant at every call site:
///
/// ```rust
/// use tainted_string::{iterator_of, TaintedString, Variant};
///
/// struct QueryParam;
/// impl Variant for QueryParam {
///     const NAME: &'static str = "query param";
/// }
///
/// let params = vec!["q=cats", "page=2"];
/// let factory = iterator_of::<QueryParam>();
/// let tainted: Vec<TaintedString<QueryParam>> = factory.wrap(&params).iter().collect();
/// assert_eq!(tainted.len(), 2);
/// ```
pub struct SequenceViewFactory<V: Variant> {
    element: PhantomData<V>,
}

impl<V: Variant> SequenceViewFactory<V> {
    /// Creates a factory bound to element variant `V`.
    pub fn new() -> Self {
        SequenceViewFactory {
            element: PhantomData,
        }
    }

    /// Builds a view over `source` with this factory's element variant.
    pub fn wrap<'a, S: ?Sized>(&self, source: &'a S) -> TaintedSequenceView<'a, S, V> {
        TaintedSequenceView::over(source)
    }
}

impl<V: Variant> Default for SequenceViewFactory<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Variant> Clone for SequenceViewFactory<V> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<V: Variant> Copy for SequenceViewFactory<V> {}

/// Produces a [`SequenceViewFactory`] bound to the element variant `V`.
pub fn iterator_of<V: Variant>() -> SequenceViewFactory<V> {
    SequenceViewFactory::new()
}
