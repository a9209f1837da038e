//! Variant markers and the text argument trait.
//!
//! A *variant* is a declared refinement of the untrusted classification.
//! Variants are zero-sized marker types carried as a type parameter of
//! [`TaintedString`](crate::TaintedString); propagation and equality key off
//! the parameter, so a value of one variant can never be mistaken for
//! another at compile time.

use crate::string::TaintedString;

/// Marker trait identifying a declared taint variant.
///
/// Application code declares a refinement of the base untrusted variant by
/// implementing this trait on a unit struct, either by hand or with
/// `#[derive(TaintVariant)]` (feature `derive`):
///
/// ```rust
/// use tainted_string::{TaintedString, Variant};
///
/// struct CustomerName;
///
/// impl Variant for CustomerName {
///     const NAME: &'static str = "customer name";
/// }
///
/// let name: TaintedString<CustomerName> = TaintedString::wrap("Sarah");
/// assert_eq!(name.len(), 5);
/// ```
pub trait Variant: 'static {
    /// Diagnostic name of the variant.
    ///
    /// Used in `Debug` output and trust boundary error messages. Identity
    /// is the marker type itself, never this string.
    const NAME: &'static str;
}

/// The base untrusted variant.
///
/// Every [`TaintedString`](crate::TaintedString) without an explicit variant
/// parameter carries this tag.
pub struct Base;

impl Variant for Base {
    const NAME: &'static str = "base";
}

pub(crate) mod sealed {
    use crate::string::TaintedString;
    use crate::variant::Variant;

    /// Crate-private access to the text behind an operation argument.
    ///
    /// The module is not exported, so downstream code can neither call
    /// `text()` on a tainted value nor implement the trait to smuggle a
    /// payload out.
    pub trait TextRef {
        fn text(&self) -> &str;
    }

    impl TextRef for str {
        fn text(&self) -> &str {
            self
        }
    }

    impl TextRef for String {
        fn text(&self) -> &str {
            self
        }
    }

    impl<V: Variant> TextRef for TaintedString<V> {
        fn text(&self) -> &str {
            self.payload()
        }
    }

    impl<T: TextRef + ?Sized> TextRef for &T {
        fn text(&self) -> &str {
            (**self).text()
        }
    }
}

/// A text argument accepted by [`TaintedString`] operations.
///
/// Implemented for trusted text (`&str`, `String`) and for tainted values of
/// *any* variant, so a needle of a different declared variant than the
/// haystack is still accepted; variant identity only matters for equality of
/// produced values. Sealed: the payload of a tainted argument is readable
/// only inside this crate.
pub trait TextArg: sealed::TextRef {}

impl TextArg for str {}
impl TextArg for String {}
impl<V: Variant> TextArg for TaintedString<V> {}
impl<T: TextArg + ?Sized> TextArg for &T {}
