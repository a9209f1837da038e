//! A key/value wrapper whose lookups always come back tainted.
//!
//! [`TaintedMapping`] borrows an arbitrary host map and re-wraps every value
//! it hands out, whether the stored value was raw trusted text or already
//! tainted under some other variant. It is the safe argument source for
//! `format_map` on a tainted template; supplying it to a *trusted* template
//! fails the whole call (see [`trusted_format_map`](crate::trusted_format_map)).

use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;

use crate::string::TaintedString;
use crate::template::TextValue;
use crate::variant::sealed::TextRef;
use crate::variant::{Base, TextArg, Variant};

/// The host mapping abstraction this engine wraps but does not reimplement.
///
/// Implementations return the stored value as-is; taint handling happens in
/// the wrapper. Implement this for a custom store to make it usable behind
/// a [`TaintedMapping`]. Returning a [`TextValue`] keeps stored tainted
/// payloads unreadable to the implementation's callers.
pub trait KeyValueSource {
    /// Raw lookup of `key`.
    fn get_value(&self, key: &str) -> Option<TextValue>;
}

impl KeyValueSource for HashMap<String, String> {
    fn get_value(&self, key: &str) -> Option<TextValue> {
        self.get(key).map(|value| TextValue::from(value.as_str()))
    }
}

impl KeyValueSource for HashMap<&str, &str> {
    fn get_value(&self, key: &str) -> Option<TextValue> {
        self.get(key).map(|value| TextValue::from(*value))
    }
}

impl KeyValueSource for BTreeMap<String, String> {
    fn get_value(&self, key: &str) -> Option<TextValue> {
        self.get(key).map(|value| TextValue::from(value.as_str()))
    }
}

impl KeyValueSource for BTreeMap<&str, &str> {
    fn get_value(&self, key: &str) -> Option<TextValue> {
        self.get(key).map(|value| TextValue::from(*value))
    }
}

impl KeyValueSource for HashMap<String, TextValue> {
    fn get_value(&self, key: &str) -> Option<TextValue> {
        self.get(key).cloned()
    }
}

impl KeyValueSource for BTreeMap<String, TextValue> {
    fn get_value(&self, key: &str) -> Option<TextValue> {
        self.get(key).cloned()
    }
}

impl<W: Variant> KeyValueSource for HashMap<String, TaintedString<W>> {
    fn get_value(&self, key: &str) -> Option<TextValue> {
        self.get(key).map(TextValue::from)
    }
}

impl<W: Variant> KeyValueSource for BTreeMap<String, TaintedString<W>> {
    fn get_value(&self, key: &str) -> Option<TextValue> {
        self.get(key).map(TextValue::from)
    }
}

/// A borrowed key/value store whose lookups always return values wrapped
/// into the variant `V`, regardless of how the value was stored.
///
/// ```rust
/// use std::collections::HashMap;
/// use tainted_string::{wrap, TaintedMapping};
///
/// let mut raw = HashMap::new();
/// raw.insert("name".to_string(), "Sarah".to_string());
///
/// let mapping = TaintedMapping::new(&raw);
/// assert_eq!(mapping.get("name"), Some(wrap("Sarah")));
/// assert_eq!(mapping.get("uid"), None);
/// ```
pub struct TaintedMapping<'a, S: ?Sized, V: Variant = Base> {
    source: &'a S,
    value_variant: PhantomData<V>,
}

impl<'a, S, V> TaintedMapping<'a, S, V>
where
    S: KeyValueSource + ?Sized,
    V: Variant,
{
    /// Wraps `source` without copying it.
    pub fn new(source: &'a S) -> Self {
        TaintedMapping {
            source,
            value_variant: PhantomData,
        }
    }

    /// Looks up `key`; the key may be trusted or tainted text. A present
    /// value always comes back tainted under `V`.
    pub fn get(&self, key: impl TextArg) -> Option<TaintedString<V>> {
        self.source
            .get_value(key.text())
            .map(|value| TaintedString::wrap(value.into_text()))
    }

    /// Whether the underlying store holds `key`.
    pub fn contains_key(&self, key: impl TextArg) -> bool {
        self.source.get_value(key.text()).is_some()
    }

    pub(crate) fn lookup_tainted(&self, key: &str) -> Option<TextValue> {
        self.source
            .get_value(key)
            .map(|value| TextValue::retaint(value, V::NAME))
    }
}

impl<'a, S: ?Sized, V: Variant> Clone for TaintedMapping<'a, S, V> {
    fn clone(&self) -> Self {
        TaintedMapping {
            source: self.source,
            value_variant: PhantomData,
        }
    }
}

impl<'a, S: ?Sized, V: Variant> Copy for TaintedMapping<'a, S, V> {}
