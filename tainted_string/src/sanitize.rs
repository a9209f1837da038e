//! The sanctioned exit from the taint system.
//!
//! Sanitization is the only legitimate conversion from untrusted to trusted
//! data. The engine defines the contract but no concrete sanitizers; what
//! "safe" means is application knowledge.

use crate::string::TaintedString;
use crate::variant::Variant;

/// Taint can be cleared from a value by passing it through a sanitizer.
///
/// The sanitizer receives the raw payload and decides whether (and in what
/// shape) it may re-enter the trusted world. If sanitization fails, an
/// error must be returned; the engine never falls back to a default value.
pub trait SanitizeWith<Insecure, Trusted> {
    /// Sanitizes the value using the provided sanitizer.
    ///
    /// The sanitizer may transmute the value to a different type.
    fn sanitize_with<Sanitizer, Error>(self, sanitizer: Sanitizer) -> Result<Trusted, Error>
    where
        Sanitizer: FnOnce(Insecure) -> Result<Trusted, Error>;
}

/// The type implementing this trait knows how to sanitize itself.
///
/// Application wrapper types that aggregate tainted fields typically
/// implement this once, sanitizing each field with
/// [`SanitizeWith::sanitize_with`].
pub trait SanitizeValue<Trusted> {
    /// Error reported when the value cannot be sanitized.
    type Error;

    /// Sanitizes the value.
    ///
    /// The returned value is trusted and can be used freely.
    fn sanitize_value(self) -> Result<Trusted, Self::Error>;
}

impl<V: Variant, Trusted> SanitizeWith<String, Trusted> for TaintedString<V> {
    /// Hands the raw payload to the sanitizer. This consumes the tainted
    /// value; there is no path back to the payload on failure.
    fn sanitize_with<Sanitizer, Error>(self, sanitizer: Sanitizer) -> Result<Trusted, Error>
    where
        Sanitizer: FnOnce(String) -> Result<Trusted, Error>,
    {
        sanitizer(self.into_payload())
    }
}
