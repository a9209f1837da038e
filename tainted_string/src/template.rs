//! Template substitution and the trusted channel's refusal rules.
//!
//! The template's own trust level decides the rules. A *tainted* template
//! ([`TaintedString::format`](crate::TaintedString::format)) accepts trusted
//! and tainted arguments interchangeably and produces a value of its own
//! variant. The *trusted* channel ([`trusted_format`], [`trusted_format_map`],
//! [`trusted_join`]) must never assemble tainted fragments into trusted
//! output: any tainted argument, element, or mapping fails the whole call
//! before a single byte of output is produced.
//!
//! Placeholder grammar: `{}` (auto-numbered), `{0}` (positional), `{name}`
//! (named); `{{` and `}}` are literal braces. Conversion and format
//! specifiers are not supported and are reported as malformed.

use std::collections::BTreeMap;
use std::mem;

use tracing::warn;

use crate::error::TaintError;
use crate::mapping::{KeyValueSource, TaintedMapping};
use crate::string::TaintedString;
use crate::variant::Variant;

/// A substitution argument coerced to text, together with its taint.
///
/// Built by `From` conversions: trusted from `&str`, `String`, `char`,
/// `bool` and the numeric primitives; tainted from any
/// [`TaintedString`] variant. A tainted `TextValue` keeps its payload
/// crate-private, so it cannot be laundered into trusted text from
/// outside.
#[derive(Clone)]
pub struct TextValue {
    text: String,
    taint: Option<&'static str>,
}

impl TextValue {
    /// Whether this value is tainted.
    pub fn is_tainted(&self) -> bool {
        self.taint.is_some()
    }

    pub(crate) fn variant_name(&self) -> Option<&'static str> {
        self.taint
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn into_text(self) -> String {
        self.text
    }

    /// Marks a looked-up value as tainted under `variant`, whatever it was
    /// before.
    pub(crate) fn retaint(value: TextValue, variant: &'static str) -> TextValue {
        TextValue {
            text: value.text,
            taint: Some(variant),
        }
    }
}

/// Redacts tainted payloads, like the `Debug` impl of the scalar.
impl std::fmt::Debug for TextValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.taint {
            Some(variant) => write!(f, "TextValue(tainted<{variant}>, redacted)"),
            None => write!(f, "TextValue({:?})", self.text),
        }
    }
}

impl From<&str> for TextValue {
    fn from(value: &str) -> Self {
        TextValue {
            text: value.to_string(),
            taint: None,
        }
    }
}

impl From<String> for TextValue {
    fn from(value: String) -> Self {
        TextValue {
            text: value,
            taint: None,
        }
    }
}

impl From<&String> for TextValue {
    fn from(value: &String) -> Self {
        TextValue {
            text: value.clone(),
            taint: None,
        }
    }
}

macro_rules! trusted_text_value_from {
    ($($scalar:ty),* $(,)?) => {
        $(
            impl From<$scalar> for TextValue {
                fn from(value: $scalar) -> Self {
                    TextValue {
                        text: value.to_string(),
                        taint: None,
                    }
                }
            }
        )*
    };
}

trusted_text_value_from!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

impl<V: Variant> From<TaintedString<V>> for TextValue {
    fn from(value: TaintedString<V>) -> Self {
        TextValue {
            text: value.into_payload(),
            taint: Some(V::NAME),
        }
    }
}

impl<V: Variant> From<&TaintedString<V>> for TextValue {
    fn from(value: &TaintedString<V>) -> Self {
        TextValue {
            text: value.payload().to_string(),
            taint: Some(V::NAME),
        }
    }
}

/// Positional and named substitution arguments.
///
/// ```rust
/// use tainted_string::{wrap, TemplateArgs};
///
/// let args = TemplateArgs::new().arg("Sarah").arg(123).named("site", wrap("example.org"));
/// let line = wrap("Hello {0}, UserID: {1}, from {site}").format(&args).expect("render");
/// assert_eq!(line, wrap("Hello Sarah, UserID: 123, from example.org"));
/// ```
#[derive(Debug, Default)]
pub struct TemplateArgs {
    positional: Vec<TextValue>,
    named: BTreeMap<String, TextValue>,
}

impl TemplateArgs {
    /// An empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl Into<TextValue>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Sets a named argument.
    pub fn named(mut self, key: impl Into<String>, value: impl Into<TextValue>) -> Self {
        self.named.insert(key.into(), value.into());
        self
    }

    fn any_tainted(&self) -> Option<&'static str> {
        self.positional
            .iter()
            .chain(self.named.values())
            .find_map(TextValue::variant_name)
    }
}

/// A mapping-shaped argument source for `format_map`-style substitution.
///
/// Every [`KeyValueSource`] is accepted directly (its values keep whatever
/// taint they were stored with); a [`TaintedMapping`] is itself a tainted
/// source, and every value obtained from it is tainted.
pub trait SubstitutionSource {
    /// Resolves a named placeholder.
    fn lookup_value(&self, key: &str) -> Option<TextValue>;

    /// Whether the source as a whole taints everything it returns.
    fn is_tainted_source(&self) -> bool {
        false
    }
}

impl<S: KeyValueSource> SubstitutionSource for S {
    fn lookup_value(&self, key: &str) -> Option<TextValue> {
        self.get_value(key)
    }
}

impl<'a, S, V> SubstitutionSource for TaintedMapping<'a, S, V>
where
    S: KeyValueSource + ?Sized,
    V: Variant,
{
    fn lookup_value(&self, key: &str) -> Option<TextValue> {
        self.lookup_tainted(key)
    }

    fn is_tainted_source(&self) -> bool {
        true
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Field {
    Auto,
    Index(usize),
    Name(String),
}

#[derive(Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Field),
}

enum Piece {
    Literal(String),
    Value(TextValue),
}

fn malformed(reason: impl Into<String>) -> TaintError {
    TaintError::MalformedTemplate {
        reason: reason.into(),
    }
}

fn parse(template: &str) -> Result<Vec<Segment>, TaintError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    literal.push('{');
                    continue;
                }
                if !literal.is_empty() {
                    segments.push(Segment::Literal(mem::take(&mut literal)));
                }
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(marker @ (':' | '!')) => {
                            return Err(malformed(format!(
                                "conversion and format specifiers are not supported: `{marker}`"
                            )));
                        }
                        Some(inner) => name.push(inner),
                        None => return Err(malformed("unterminated placeholder")),
                    }
                }
                let field = if name.is_empty() {
                    Field::Auto
                } else if let Ok(index) = name.parse::<usize>() {
                    Field::Index(index)
                } else {
                    Field::Name(name)
                };
                segments.push(Segment::Placeholder(field));
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    literal.push('}');
                } else {
                    return Err(malformed("single `}` in template"));
                }
            }
            _ => literal.push(c),
        }
    }
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

/// Where placeholder values come from during one render.
trait FieldSource {
    fn positional(&self, index: usize) -> Option<TextValue>;
    fn named(&self, key: &str) -> Option<TextValue>;
}

impl FieldSource for TemplateArgs {
    fn positional(&self, index: usize) -> Option<TextValue> {
        self.positional.get(index).cloned()
    }

    fn named(&self, key: &str) -> Option<TextValue> {
        self.named.get(key).cloned()
    }
}

struct MapFields<'a, M: ?Sized>(&'a M);

impl<M: SubstitutionSource + ?Sized> FieldSource for MapFields<'_, M> {
    fn positional(&self, _index: usize) -> Option<TextValue> {
        None
    }

    fn named(&self, key: &str) -> Option<TextValue> {
        self.0.lookup_value(key)
    }
}

/// Resolves every placeholder up front so a failing render produces no
/// partial output.
fn resolve(segments: Vec<Segment>, source: &dyn FieldSource) -> Result<Vec<Piece>, TaintError> {
    let mut next_auto = 0usize;
    let mut saw_auto = false;
    let mut saw_manual = false;
    segments
        .into_iter()
        .map(|segment| match segment {
            Segment::Literal(text) => Ok(Piece::Literal(text)),
            Segment::Placeholder(field) => {
                let value = match field {
                    Field::Auto => {
                        if saw_manual {
                            return Err(malformed(
                                "cannot mix automatic and manual field numbering",
                            ));
                        }
                        saw_auto = true;
                        let index = next_auto;
                        next_auto += 1;
                        source.positional(index)
                    }
                    Field::Index(index) => {
                        if saw_auto {
                            return Err(malformed(
                                "cannot mix automatic and manual field numbering",
                            ));
                        }
                        saw_manual = true;
                        source.positional(index)
                    }
                    Field::Name(name) => source.named(&name),
                };
                value.map(Piece::Value).ok_or(TaintError::NoMatch)
            }
        })
        .collect()
}

fn assemble(pieces: Vec<Piece>) -> String {
    let mut out = String::new();
    for piece in pieces {
        match piece {
            Piece::Literal(text) => out.push_str(&text),
            Piece::Value(value) => out.push_str(value.text()),
        }
    }
    out
}

fn first_tainted(pieces: &[Piece]) -> Option<&'static str> {
    pieces.iter().find_map(|piece| match piece {
        Piece::Value(value) => value.variant_name(),
        Piece::Literal(_) => None,
    })
}

pub(crate) fn render_tainted(template: &str, args: &TemplateArgs) -> Result<String, TaintError> {
    let pieces = resolve(parse(template)?, args)?;
    Ok(assemble(pieces))
}

pub(crate) fn render_tainted_map<M>(template: &str, mapping: &M) -> Result<String, TaintError>
where
    M: SubstitutionSource + ?Sized,
{
    let pieces = resolve(parse(template)?, &MapFields(mapping))?;
    Ok(assemble(pieces))
}

/// Substitutes `args` into a *trusted* template, producing trusted text.
///
/// Fails with [`TaintError::TrustBoundary`] if any supplied argument is
/// tainted, before anything is rendered; a trusted channel must never
/// assemble tainted fragments.
///
/// ```rust
/// use tainted_string::{trusted_format, wrap, TaintError, TemplateArgs};
///
/// let ok = trusted_format("Hello {n}", &TemplateArgs::new().named("n", "Sarah"));
/// assert_eq!(ok.as_deref(), Ok("Hello Sarah"));
///
/// let err = trusted_format("Hello {n}", &TemplateArgs::new().named("n", wrap("Sarah")));
/// assert!(matches!(err, Err(TaintError::TrustBoundary { .. })));
/// ```
pub fn trusted_format(template: &str, args: &TemplateArgs) -> Result<String, TaintError> {
    let segments = parse(template)?;
    if let Some(variant) = args.any_tainted() {
        warn!(variant, "rejected tainted argument in trusted template");
        return Err(TaintError::TrustBoundary {
            reason: format!("tainted `{variant}` argument supplied to a trusted template"),
        });
    }
    let pieces = resolve(segments, args)?;
    Ok(assemble(pieces))
}

/// Substitutes mapping values into a *trusted* template.
///
/// A [`TaintedMapping`] source is rejected outright; a plain map is
/// resolved fully first and rejected if any looked-up value is tainted.
/// Either way the failure occurs before any output is produced.
pub fn trusted_format_map<M>(template: &str, mapping: &M) -> Result<String, TaintError>
where
    M: SubstitutionSource + ?Sized,
{
    if mapping.is_tainted_source() {
        warn!("rejected tainted mapping in trusted template");
        return Err(TaintError::TrustBoundary {
            reason: "tainted mapping supplied to a trusted template".to_string(),
        });
    }
    let pieces = resolve(parse(template)?, &MapFields(mapping))?;
    if let Some(variant) = first_tainted(&pieces) {
        warn!(variant, "rejected tainted mapping value in trusted template");
        return Err(TaintError::TrustBoundary {
            reason: format!("tainted `{variant}` value substituted into a trusted template"),
        });
    }
    Ok(assemble(pieces))
}

/// Joins `parts` with a *trusted* separator, producing trusted text.
///
/// Every element is collected and checked first; a single tainted element
/// fails the whole call with [`TaintError::TrustBoundary`] before any
/// output is assembled.
pub fn trusted_join<I>(separator: &str, parts: I) -> Result<String, TaintError>
where
    I: IntoIterator,
    I::Item: Into<TextValue>,
{
    let parts: Vec<TextValue> = parts.into_iter().map(Into::into).collect();
    if let Some(variant) = parts.iter().find_map(TextValue::variant_name) {
        warn!(variant, "rejected tainted element in trusted join");
        return Err(TaintError::TrustBoundary {
            reason: format!("tainted `{variant}` element assembled by a trusted join"),
        });
    }
    let parts: Vec<String> = parts.into_iter().map(TextValue::into_text).collect();
    Ok(parts.join(separator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_literals_and_placeholders() {
        let segments = parse("Hello {name}, UserID: {0}").expect("parse");
        assert_eq!(
            segments,
            vec![
                Segment::Literal("Hello ".to_string()),
                Segment::Placeholder(Field::Name("name".to_string())),
                Segment::Literal(", UserID: ".to_string()),
                Segment::Placeholder(Field::Index(0)),
            ]
        );
    }

    #[test]
    fn escaped_braces_are_literal() {
        let segments = parse("{{literal}} {x}").expect("parse");
        assert_eq!(
            segments,
            vec![
                Segment::Literal("{literal} ".to_string()),
                Segment::Placeholder(Field::Name("x".to_string())),
            ]
        );
    }

    #[test]
    fn rejects_format_specifiers() {
        assert!(matches!(
            parse("{x:>8}"),
            Err(TaintError::MalformedTemplate { .. })
        ));
        assert!(matches!(
            parse("{x!r}"),
            Err(TaintError::MalformedTemplate { .. })
        ));
    }

    #[test]
    fn rejects_unbalanced_braces() {
        assert!(matches!(
            parse("open {"),
            Err(TaintError::MalformedTemplate { .. })
        ));
        assert!(matches!(
            parse("close }"),
            Err(TaintError::MalformedTemplate { .. })
        ));
    }

    #[test]
    fn mixing_auto_and_manual_numbering_fails() {
        let args = TemplateArgs::new().arg("a").arg("b");
        let err = render_tainted("{} {1}", &args).unwrap_err();
        assert!(matches!(err, TaintError::MalformedTemplate { .. }));
        let err = render_tainted("{1} {}", &args).unwrap_err();
        assert!(matches!(err, TaintError::MalformedTemplate { .. }));
    }

    #[test]
    fn auto_numbering_consumes_positionals_in_order() {
        let args = TemplateArgs::new().arg("a").arg("b");
        assert_eq!(render_tainted("{}-{}", &args).expect("render"), "a-b");
    }

    #[test]
    fn missing_field_is_no_match() {
        let args = TemplateArgs::new().arg("a");
        assert_eq!(render_tainted("{3}", &args), Err(TaintError::NoMatch));
        assert_eq!(render_tainted("{nope}", &args), Err(TaintError::NoMatch));
    }
}
