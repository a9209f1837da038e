//! # Tainted String
//! This crate provides a taint-propagating text type. Text coming from the
//! outside world — user input, network data, anything the program does not
//! fully control — is wrapped in a [`TaintedString`] and stays marked as
//! tainted through every operation performed on it. The type mirrors the
//! common textual API (membership, slicing, concatenation, repetition,
//! searching, case operations, template substitution, iteration), so
//! untrusted text flows through ordinary program logic without
//! special-casing, while any attempt to smuggle it into a trusted-only
//! channel fails loudly.
//!
//! The taint is monotonic: it can appear, combine and persist, but never
//! silently disappear. Where Rust can express the prohibition statically it
//! does — a [`TaintedString`] implements neither `Display` nor `Serialize`
//! and offers no `Deref` or `AsRef<str>`, so printing, encoding or
//! implicitly coercing a tainted value is a compile error. The checks that
//! are inherently dynamic (template substitution, trusted joins) fail at
//! run time with a [`TaintError::TrustBoundary`] before producing any
//! output.
//!
//! ## Example usage
//! Untrusted text is wrapped and used like ordinary text:
//! ```rust
//! use tainted_string::{wrap, TemplateArgs};
//!
//! let comment = wrap("  Nice post! <script>alert(1)</script>  ").trim();
//! assert!(comment.contains("<script>"));
//! assert_eq!(comment.slice(0, 10), wrap("Nice post!"));
//!
//! let line = wrap("Comment from {user}")
//!     .format(&TemplateArgs::new().named("user", wrap("mallory")))
//!     .expect("render");
//! assert_eq!(line, wrap("Comment from mallory"));
//! ```
//!
//! The trusted channel refuses tainted input outright:
//! ```rust
//! use tainted_string::{trusted_format, wrap, TaintError, TemplateArgs};
//!
//! let err = trusted_format("Hello {n}", &TemplateArgs::new().named("n", wrap("Sarah")));
//! assert!(matches!(err, Err(TaintError::TrustBoundary { .. })));
//! ```
//!
//! The only way back to trusted text is an explicit sanitizer:
//! ```rust
//! use tainted_string::{wrap, SanitizeWith};
//!
//! let user_input = wrap("<b>hi</b>");
//! let safe: String = user_input
//!     .sanitize_with(|raw| Ok::<_, ()>(raw.replace('<', "&lt;").replace('>', "&gt;")))
//!     .expect("sanitization failed");
//! assert_eq!(safe, "&lt;b&gt;hi&lt;/b&gt;");
//! ```
//!
//! ## Variants
//! Applications can refine the untrusted classification by declaring
//! *variants* — marker types that ride along as a type parameter and are
//! preserved exactly through propagation. When two tainted operands of
//! different variants are combined, the leftmost operand's variant wins:
//! ```rust
//! use tainted_string::{wrap, TaintedString, TaintVariant};
//!
//! #[derive(TaintVariant)]
//! struct CustomerName;
//!
//! let name: TaintedString<CustomerName> = TaintedString::wrap("Sarah");
//! let labelled = name + wrap(" (new)");
//! let also_labelled: TaintedString<CustomerName> = labelled;
//! # let _ = also_labelled;
//! ```
//!
//! ## Features
//! Enabled by default:
//! * `allow_usage_without_sanitization`: enables
//!   [`TaintedString::use_untrusted_value`] to take the raw payload out
//!   without sanitization.
//! * `derive`: enables `#[derive(TaintVariant)]` for declaring variant
//!   marker types.
//!
//! Optional:
//! * `serde`: implements `Deserialize` (only — never `Serialize`) for
//!   [`TaintedString`], since deserialized input is a taint source.
//!
//! ## Limitations
//! The engine tracks taint only through the operations the value type
//! defines. It does not taint values hidden inside opaque containers it
//! does not control, and it cannot decide what "safe" means for your
//! application: sanitizers are yours to write.
#![warn(missing_docs)]

mod error;
mod iter;
mod mapping;
mod sanitize;
mod string;
mod template;
mod variant;

pub use error::TaintError;
pub use iter::{
    iterator_of, ElementSource, Elements, IterSource, SequenceViewFactory, TaintedSequenceView,
};
pub use mapping::{KeyValueSource, TaintedMapping};
pub use sanitize::{SanitizeValue, SanitizeWith};
pub use string::{try_wrap, wrap, TaintedString};
pub use template::{
    trusted_format, trusted_format_map, trusted_join, SubstitutionSource, TemplateArgs, TextValue,
};
pub use variant::{Base, TextArg, Variant};

#[cfg(feature = "derive")]
pub use tainted_string_derive::TaintVariant;
