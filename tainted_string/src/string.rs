//! The tainted text scalar and its propagation rules.
//!
//! [`TaintedString`] mirrors the common textual operation surface with the
//! boundary semantics of the host text type it stands in for: indices count
//! characters, negative indices count from the end, slice bounds clamp, and
//! `index`-style lookups fail where `find`-style lookups return `None`.
//!
//! Taint is monotonic. Every operation below that produces text produces
//! *tainted* text; combining a trusted and a tainted operand always yields
//! the tainted side's variant, and when both operands are tainted the
//! leftmost operand's variant wins. The only exits are the sanitize traits
//! and, when enabled, [`TaintedString::use_untrusted_value`].

use std::fmt;
use std::marker::PhantomData;
use std::num::NonZeroIsize;
use std::ops::{Add, Bound, Mul, RangeBounds};

use crate::error::TaintError;
use crate::iter::{Elements, TaintedSequenceView};
use crate::template::{self, SubstitutionSource, TemplateArgs, TextValue};
use crate::variant::sealed::TextRef;
use crate::variant::{Base, TextArg, Variant};

/// Forward slice step used by the plain [`TaintedString::slice`].
const STEP_ONE: NonZeroIsize = match NonZeroIsize::new(1) {
    Some(step) => step,
    None => unreachable!(),
};

/// Represents untrusted text. The data contained inside is called tainted.
///
/// An attacker might be able to control (part of) the payload. The type
/// supports the full common textual API, but every derived value is itself
/// tainted and the payload can only leave through an explicit sanitizer.
///
/// This type deliberately implements neither `Display` nor `Serialize`, and
/// offers no `Deref`/`AsRef<str>`: there is no implicit conversion path
/// from untrusted to trusted text. `Debug` exists but redacts the payload.
///
/// The `V` parameter is the declared [`Variant`] of the value. Two values
/// of different variants are different types; equality across variants does
/// not compile, and binary operations resolve the result variant statically
/// (leftmost tainted operand wins).
pub struct TaintedString<V: Variant = Base> {
    value: String,
    variant: PhantomData<V>,
}

/// Wraps raw text as a base-variant tainted string.
pub fn wrap(text: impl Into<String>) -> TaintedString<Base> {
    TaintedString::wrap(text)
}

/// Wraps optional raw text, failing with [`TaintError::AbsentPayload`] when
/// the payload is absent.
pub fn try_wrap(text: Option<impl Into<String>>) -> Result<TaintedString<Base>, TaintError> {
    TaintedString::try_wrap(text)
}

impl<V: Variant> TaintedString<V> {
    /// Wraps the provided text as tainted.
    pub fn wrap(value: impl Into<String>) -> Self {
        TaintedString {
            value: value.into(),
            variant: PhantomData,
        }
    }

    /// Wraps optional text. A tainted value can never hold an absent
    /// payload, so `None` fails immediately.
    pub fn try_wrap(value: Option<impl Into<String>>) -> Result<Self, TaintError> {
        value.map(Self::wrap).ok_or(TaintError::AbsentPayload)
    }

    /// Be sure that you carefully handle the returned value since it may be
    /// controllable by a malicious actor.
    ///
    /// Does not perform any sanitization on the returned value.
    #[cfg(feature = "allow_usage_without_sanitization")]
    pub fn use_untrusted_value(self) -> String {
        self.value
    }

    pub(crate) fn payload(&self) -> &str {
        &self.value
    }

    pub(crate) fn into_payload(self) -> String {
        self.value
    }

    /// Number of characters in the payload.
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn chars_vec(&self) -> Vec<char> {
        self.value.chars().collect()
    }

    /// A lazy view over the characters of this value; every produced
    /// element is re-wrapped into this value's variant.
    pub fn view(&self) -> TaintedSequenceView<'_, str, V> {
        TaintedSequenceView::over(self.value.as_str())
    }

    /// Iterates the characters as single-character tainted strings.
    pub fn chars(&self) -> Elements<std::str::Chars<'_>, V> {
        self.view().iter()
    }

    /// The character at `index`, as a tainted single-character string.
    ///
    /// Negative indices count from the end. An index outside the valid
    /// range fails with [`TaintError::IndexOutOfRange`].
    pub fn char_at(&self, index: isize) -> Result<Self, TaintError> {
        let len = self.len();
        let resolved = if index < 0 { index + len as isize } else { index };
        if resolved < 0 || resolved as usize >= len {
            return Err(TaintError::IndexOutOfRange { index, len });
        }
        self.value
            .chars()
            .nth(resolved as usize)
            .map(|c| Self::wrap(c.to_string()))
            .ok_or(TaintError::IndexOutOfRange { index, len })
    }

    /// The substring between character positions `start` and `end`.
    ///
    /// Bounds follow host slicing rules: negative values count from the
    /// end, out-of-range bounds clamp, and `None` means "from the start"
    /// or "to the end". Slicing never fails.
    pub fn slice(
        &self,
        start: impl Into<Option<isize>>,
        end: impl Into<Option<isize>>,
    ) -> Self {
        self.slice_step(start, end, STEP_ONE)
    }

    /// Extended slice taking every `step`-th character; a negative step
    /// traverses backwards. A zero step is unrepresentable by construction.
    pub fn slice_step(
        &self,
        start: impl Into<Option<isize>>,
        end: impl Into<Option<isize>>,
        step: NonZeroIsize,
    ) -> Self {
        let chars = self.chars_vec();
        let len = chars.len() as isize;
        let step = step.get();
        let start = start.into();
        let end = end.into();
        let (mut cursor, bound) = if step > 0 {
            (
                adjust_forward(start.unwrap_or(0), len),
                adjust_forward(end.unwrap_or(len), len),
            )
        } else {
            (
                match start {
                    Some(s) => adjust_backward(s, len),
                    None => len - 1,
                },
                match end {
                    Some(e) => adjust_backward(e, len),
                    None => -1,
                },
            )
        };
        let mut out = String::new();
        while (step > 0 && cursor < bound) || (step < 0 && cursor > bound) {
            out.push(chars[cursor as usize]);
            cursor += step;
        }
        Self::wrap(out)
    }

    /// Repeats the payload `n` times. The count is trusted and does not
    /// affect the result variant.
    pub fn repeat(&self, n: usize) -> Self {
        Self::wrap(self.value.repeat(n))
    }

    /// The smallest character, as a tainted single-character string.
    /// `None` when the payload is empty.
    pub fn min_char(&self) -> Option<Self> {
        self.value.chars().min().map(|c| Self::wrap(c.to_string()))
    }

    /// The largest character. `None` when the payload is empty.
    pub fn max_char(&self) -> Option<Self> {
        self.value.chars().max().map(|c| Self::wrap(c.to_string()))
    }

    /// Membership test. The needle may be trusted text or tainted text of
    /// any variant; the result is a plain boolean either way.
    pub fn contains(&self, needle: impl TextArg) -> bool {
        self.value.contains(needle.text())
    }

    /// Character position of the first occurrence of `needle`, or `None`.
    pub fn find(&self, needle: impl TextArg) -> Option<usize> {
        self.find_in(needle, ..)
    }

    /// Like [`TaintedString::find`], restricted to the character window
    /// `range` (negative bounds count from the end, bounds clamp). The
    /// returned position is absolute.
    pub fn find_in(
        &self,
        needle: impl TextArg,
        range: impl RangeBounds<isize>,
    ) -> Option<usize> {
        let hay = self.chars_vec();
        let needle: Vec<char> = needle.text().chars().collect();
        let (start, end) = resolve_range(hay.len(), range);
        find_chars(&hay[start..end], &needle).map(|i| i + start)
    }

    /// Character position of the last occurrence of `needle`, or `None`.
    pub fn rfind(&self, needle: impl TextArg) -> Option<usize> {
        let hay = self.chars_vec();
        let needle: Vec<char> = needle.text().chars().collect();
        rfind_chars(&hay, &needle)
    }

    /// Like [`TaintedString::find`], but failing with
    /// [`TaintError::NoMatch`] when the needle is absent.
    pub fn index(&self, needle: impl TextArg) -> Result<usize, TaintError> {
        self.find(needle).ok_or(TaintError::NoMatch)
    }

    /// Ranged form of [`TaintedString::index`].
    pub fn index_in(
        &self,
        needle: impl TextArg,
        range: impl RangeBounds<isize>,
    ) -> Result<usize, TaintError> {
        self.find_in(needle, range).ok_or(TaintError::NoMatch)
    }

    /// Like [`TaintedString::rfind`], but failing when the needle is absent.
    pub fn rindex(&self, needle: impl TextArg) -> Result<usize, TaintError> {
        self.rfind(needle).ok_or(TaintError::NoMatch)
    }

    /// Number of non-overlapping occurrences of `needle`.
    pub fn count(&self, needle: impl TextArg) -> usize {
        self.count_in(needle, ..)
    }

    /// Ranged form of [`TaintedString::count`].
    pub fn count_in(&self, needle: impl TextArg, range: impl RangeBounds<isize>) -> usize {
        let hay = self.chars_vec();
        let needle: Vec<char> = needle.text().chars().collect();
        let (start, end) = resolve_range(hay.len(), range);
        let window = &hay[start..end];
        if needle.is_empty() {
            return window.len() + 1;
        }
        let mut at = 0;
        let mut found = 0;
        while at + needle.len() <= window.len() {
            if window[at..at + needle.len()] == *needle {
                found += 1;
                at += needle.len();
            } else {
                at += 1;
            }
        }
        found
    }

    /// Whether the payload starts with `prefix`.
    pub fn starts_with(&self, prefix: impl TextArg) -> bool {
        self.value.starts_with(prefix.text())
    }

    /// Whether the character window `range` starts with `prefix`.
    pub fn starts_with_in(&self, prefix: impl TextArg, range: impl RangeBounds<isize>) -> bool {
        let hay = self.chars_vec();
        let prefix: Vec<char> = prefix.text().chars().collect();
        let (start, end) = resolve_range(hay.len(), range);
        let window = &hay[start..end];
        window.len() >= prefix.len() && window[..prefix.len()] == *prefix
    }

    /// Whether the payload ends with `suffix`.
    pub fn ends_with(&self, suffix: impl TextArg) -> bool {
        self.value.ends_with(suffix.text())
    }

    /// Whether the character window `range` ends with `suffix`.
    pub fn ends_with_in(&self, suffix: impl TextArg, range: impl RangeBounds<isize>) -> bool {
        let hay = self.chars_vec();
        let suffix: Vec<char> = suffix.text().chars().collect();
        let (start, end) = resolve_range(hay.len(), range);
        let window = &hay[start..end];
        window.len() >= suffix.len() && window[window.len() - suffix.len()..] == *suffix
    }

    /// First character uppercased, the rest lowercased.
    pub fn capitalize(&self) -> Self {
        let mut chars = self.value.chars();
        match chars.next() {
            None => Self::wrap(String::new()),
            Some(first) => {
                let mut out: String = first.to_uppercase().collect();
                out.extend(chars.flat_map(char::to_lowercase));
                Self::wrap(out)
            }
        }
    }

    /// Lowercased copy.
    pub fn to_lowercase(&self) -> Self {
        Self::wrap(self.value.to_lowercase())
    }

    /// Uppercased copy.
    pub fn to_uppercase(&self) -> Self {
        Self::wrap(self.value.to_uppercase())
    }

    /// Copy with uppercase characters lowercased and vice versa.
    pub fn swapcase(&self) -> Self {
        let mut out = String::new();
        for c in self.value.chars() {
            if c.is_uppercase() {
                out.extend(c.to_lowercase());
            } else if c.is_lowercase() {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
        }
        Self::wrap(out)
    }

    /// Copy with every run of alphabetic characters title-cased.
    pub fn to_titlecase(&self) -> Self {
        let mut out = String::new();
        let mut in_word = false;
        for c in self.value.chars() {
            if c.is_alphabetic() {
                if in_word {
                    out.extend(c.to_lowercase());
                } else {
                    out.extend(c.to_uppercase());
                }
                in_word = true;
            } else {
                out.push(c);
                in_word = false;
            }
        }
        Self::wrap(out)
    }

    fn classify(&self, predicate: impl Fn(char) -> bool) -> bool {
        !self.value.is_empty() && self.value.chars().all(predicate)
    }

    /// True when non-empty and every character is alphanumeric.
    pub fn is_alphanumeric(&self) -> bool {
        self.classify(char::is_alphanumeric)
    }

    /// True when non-empty and every character is alphabetic.
    pub fn is_alphabetic(&self) -> bool {
        self.classify(char::is_alphabetic)
    }

    /// True when non-empty and every character is numeric.
    pub fn is_numeric(&self) -> bool {
        self.classify(char::is_numeric)
    }

    /// True when non-empty and every character is whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.classify(char::is_whitespace)
    }

    /// True when the payload contains at least one cased character and no
    /// uppercase ones.
    pub fn is_lowercase(&self) -> bool {
        let mut has_cased = false;
        for c in self.value.chars() {
            if c.is_uppercase() {
                return false;
            }
            if c.is_lowercase() {
                has_cased = true;
            }
        }
        has_cased
    }

    /// True when the payload contains at least one cased character and no
    /// lowercase ones.
    pub fn is_uppercase(&self) -> bool {
        let mut has_cased = false;
        for c in self.value.chars() {
            if c.is_lowercase() {
                return false;
            }
            if c.is_uppercase() {
                has_cased = true;
            }
        }
        has_cased
    }

    /// True when the payload is entirely ASCII.
    pub fn is_ascii(&self) -> bool {
        self.value.is_ascii()
    }

    /// Copy with leading and trailing whitespace removed.
    pub fn trim(&self) -> Self {
        Self::wrap(self.value.trim())
    }

    /// Copy with leading whitespace removed.
    pub fn trim_start(&self) -> Self {
        Self::wrap(self.value.trim_start())
    }

    /// Copy with trailing whitespace removed.
    pub fn trim_end(&self) -> Self {
        Self::wrap(self.value.trim_end())
    }

    /// Copy with leading and trailing characters removed as long as they
    /// appear in `set`. The argument is a set of characters, not a prefix
    /// or suffix.
    pub fn trim_matches(&self, set: impl TextArg) -> Self {
        let set: Vec<char> = set.text().chars().collect();
        Self::wrap(self.value.trim_matches(|c| set.contains(&c)))
    }

    /// Leading-side form of [`TaintedString::trim_matches`].
    pub fn trim_start_matches(&self, set: impl TextArg) -> Self {
        let set: Vec<char> = set.text().chars().collect();
        Self::wrap(self.value.trim_start_matches(|c| set.contains(&c)))
    }

    /// Trailing-side form of [`TaintedString::trim_matches`].
    pub fn trim_end_matches(&self, set: impl TextArg) -> Self {
        let set: Vec<char> = set.text().chars().collect();
        Self::wrap(self.value.trim_end_matches(|c| set.contains(&c)))
    }

    /// Left-justifies to `width` characters, filling with `fill`.
    pub fn ljust(&self, width: usize, fill: char) -> Self {
        let len = self.len();
        if len >= width {
            return self.clone();
        }
        let mut out = self.value.clone();
        out.extend(std::iter::repeat(fill).take(width - len));
        Self::wrap(out)
    }

    /// Right-justifies to `width` characters, filling with `fill`.
    pub fn rjust(&self, width: usize, fill: char) -> Self {
        let len = self.len();
        if len >= width {
            return self.clone();
        }
        let mut out: String = std::iter::repeat(fill).take(width - len).collect();
        out.push_str(&self.value);
        Self::wrap(out)
    }

    /// Centers within `width` characters, filling with `fill`. The extra
    /// fill character for an odd margin lands on the side the host puts it.
    pub fn center(&self, width: usize, fill: char) -> Self {
        let len = self.len();
        if len >= width {
            return self.clone();
        }
        let margin = width - len;
        let left = margin / 2 + (margin & width & 1);
        let mut out: String = std::iter::repeat(fill).take(left).collect();
        out.push_str(&self.value);
        out.extend(std::iter::repeat(fill).take(margin - left));
        Self::wrap(out)
    }

    /// Pads with leading zeros to `width` characters, keeping a leading
    /// sign in place.
    pub fn zfill(&self, width: usize) -> Self {
        let len = self.len();
        if len >= width {
            return self.clone();
        }
        let zeros = "0".repeat(width - len);
        let mut chars = self.value.chars();
        match chars.next() {
            Some(sign @ ('+' | '-')) => {
                let rest: String = chars.collect();
                Self::wrap(format!("{sign}{zeros}{rest}"))
            }
            _ => Self::wrap(format!("{zeros}{}", self.value)),
        }
    }

    /// Replaces tab characters with spaces up to the next multiple of
    /// `tabsize` columns; the column counter resets on line breaks.
    pub fn expandtabs(&self, tabsize: usize) -> Self {
        let mut out = String::new();
        let mut column = 0;
        for c in self.value.chars() {
            match c {
                '\t' => {
                    if tabsize > 0 {
                        let pad = tabsize - column % tabsize;
                        out.extend(std::iter::repeat(' ').take(pad));
                        column += pad;
                    }
                }
                '\n' | '\r' => {
                    out.push(c);
                    column = 0;
                }
                _ => {
                    out.push(c);
                    column += 1;
                }
            }
        }
        Self::wrap(out)
    }

    /// Splits at the first occurrence of `sep` into (before, separator,
    /// after). When `sep` is absent or empty the whole payload lands in the
    /// first element and the other two are empty.
    pub fn partition(&self, sep: impl TextArg) -> (Self, Self, Self) {
        let sep_text = sep.text();
        if !sep_text.is_empty() {
            if let Some(at) = self.find(sep_text) {
                let at = at as isize;
                let after = at + sep_text.chars().count() as isize;
                return (
                    self.slice(0, at),
                    self.slice(at, after),
                    self.slice(after, None),
                );
            }
        }
        (self.clone(), Self::wrap(""), Self::wrap(""))
    }

    /// Splits at the last occurrence of `sep` into (before, separator,
    /// after). When `sep` is absent or empty the whole payload lands in the
    /// last element.
    pub fn rpartition(&self, sep: impl TextArg) -> (Self, Self, Self) {
        let sep_text = sep.text();
        if !sep_text.is_empty() {
            if let Some(at) = self.rfind(sep_text) {
                let at = at as isize;
                let after = at + sep_text.chars().count() as isize;
                return (
                    self.slice(0, at),
                    self.slice(at, after),
                    self.slice(after, None),
                );
            }
        }
        (Self::wrap(""), Self::wrap(""), self.clone())
    }

    /// Splits on every occurrence of `sep`. Consecutive separators delimit
    /// empty parts. An empty separator yields the whole payload unsplit.
    pub fn split(&self, sep: impl TextArg) -> Vec<Self> {
        let sep = sep.text();
        if sep.is_empty() {
            return vec![self.clone()];
        }
        self.value.split(sep).map(Self::wrap).collect()
    }

    /// Like [`TaintedString::split`], yielding at most `max_parts` parts;
    /// the final part carries the unsplit remainder.
    pub fn splitn(&self, max_parts: usize, sep: impl TextArg) -> Vec<Self> {
        let sep = sep.text();
        if sep.is_empty() {
            return vec![self.clone()];
        }
        self.value.splitn(max_parts, sep).map(Self::wrap).collect()
    }

    /// Splits on runs of whitespace, discarding empty parts.
    pub fn split_whitespace(&self) -> Vec<Self> {
        self.value.split_whitespace().map(Self::wrap).collect()
    }

    /// Splits at line boundaries (the host's full boundary set, including
    /// `\r\n` as a single boundary). Line breaks are kept only when
    /// `keepends` is set; a terminal break produces no extra line.
    pub fn splitlines(&self, keepends: bool) -> Vec<Self> {
        const BOUNDARIES: [char; 10] = [
            '\n', '\r', '\x0b', '\x0c', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}',
            '\u{2029}',
        ];
        let mut lines = Vec::new();
        let mut line = String::new();
        let mut chars = self.value.chars().peekable();
        while let Some(c) = chars.next() {
            if BOUNDARIES.contains(&c) {
                if keepends {
                    line.push(c);
                }
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                    if keepends {
                        line.push('\n');
                    }
                }
                lines.push(Self::wrap(std::mem::take(&mut line)));
            } else {
                line.push(c);
            }
        }
        if !line.is_empty() {
            lines.push(Self::wrap(line));
        }
        lines
    }

    /// Copy with occurrences of `old` replaced by `new`, at most `count`
    /// times when given. An empty `old` inserts `new` between every
    /// character and at both ends.
    pub fn replace(
        &self,
        old: impl TextArg,
        new: impl TextArg,
        count: Option<usize>,
    ) -> Self {
        let old = old.text();
        let new = new.text();
        if old.is_empty() {
            let limit = count.unwrap_or(usize::MAX);
            let mut out = String::new();
            let mut used = 0;
            for c in self.value.chars() {
                if used < limit {
                    out.push_str(new);
                    used += 1;
                }
                out.push(c);
            }
            if used < limit {
                out.push_str(new);
            }
            return Self::wrap(out);
        }
        match count {
            None => Self::wrap(self.value.replace(old, new)),
            Some(n) => Self::wrap(self.value.replacen(old, new, n)),
        }
    }

    /// Copy with the characters in reverse order.
    pub fn reverse(&self) -> Self {
        Self::wrap(self.value.chars().rev().collect::<String>())
    }

    /// Concatenates `parts` with this value as the separator. Elements may
    /// be trusted text or tainted text of any variant; the result always
    /// carries the receiver's variant.
    pub fn join<I>(&self, parts: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TextValue>,
    {
        let parts: Vec<String> = parts
            .into_iter()
            .map(|part| part.into().into_text())
            .collect();
        Self::wrap(parts.join(&self.value))
    }

    /// Substitutes `args` into this value as a template.
    ///
    /// The template is tainted, so trusted and tainted arguments are
    /// accepted interchangeably; the result carries the template's variant.
    /// Placeholders are `{}`, `{0}` or `{name}`; see the crate docs for the
    /// grammar. A missing argument fails with [`TaintError::NoMatch`].
    pub fn format(&self, args: &TemplateArgs) -> Result<Self, TaintError> {
        template::render_tainted(&self.value, args).map(Self::wrap)
    }

    /// Substitutes values looked up in `mapping` into this value as a
    /// template. The mapping may be a plain map or a
    /// [`TaintedMapping`](crate::TaintedMapping).
    pub fn format_map<M>(&self, mapping: &M) -> Result<Self, TaintError>
    where
        M: SubstitutionSource + ?Sized,
    {
        template::render_tainted_map(&self.value, mapping).map(Self::wrap)
    }
}

/// Host-style clamp of a slice bound for a forward traversal.
fn adjust_forward(index: isize, len: isize) -> isize {
    let resolved = if index < 0 { index + len } else { index };
    resolved.clamp(0, len)
}

/// Host-style clamp for a backward traversal; `-1` marks "before the first
/// character".
fn adjust_backward(index: isize, len: isize) -> isize {
    let resolved = if index < 0 { index + len } else { index };
    resolved.clamp(-1, len - 1)
}

/// Resolves caller-facing signed bounds into a clamped character window.
fn resolve_range(len: usize, range: impl RangeBounds<isize>) -> (usize, usize) {
    let len_i = len as isize;
    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s + 1,
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        // An inclusive end of -1 means "through the last character".
        Bound::Included(&e) => {
            if e == -1 {
                len_i
            } else {
                e + 1
            }
        }
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len_i,
    };
    let start = adjust_forward(start, len_i) as usize;
    let end = adjust_forward(end, len_i) as usize;
    (start, end.max(start))
}

fn find_chars(hay: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - needle.len()).find(|&at| hay[at..at + needle.len()] == *needle)
}

fn rfind_chars(hay: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() {
        return Some(hay.len());
    }
    if needle.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - needle.len())
        .rev()
        .find(|&at| hay[at..at + needle.len()] == *needle)
}

/// Concatenation of two tainted operands: the leftmost operand's variant
/// wins, whatever `W` is. No subtype-compatibility check is applied to
/// unrelated variants.
impl<V: Variant, W: Variant> Add<TaintedString<W>> for TaintedString<V> {
    type Output = TaintedString<V>;

    fn add(mut self, rhs: TaintedString<W>) -> TaintedString<V> {
        self.value.push_str(&rhs.value);
        self
    }
}

impl<V: Variant> Add<&str> for TaintedString<V> {
    type Output = TaintedString<V>;

    fn add(mut self, rhs: &str) -> TaintedString<V> {
        self.value.push_str(rhs);
        self
    }
}

impl<V: Variant> Add<String> for TaintedString<V> {
    type Output = TaintedString<V>;

    fn add(mut self, rhs: String) -> TaintedString<V> {
        self.value.push_str(&rhs);
        self
    }
}

/// Trusted text on the left of a tainted operand: the result takes the
/// tainted operand's variant with the trusted payload prepended. The result
/// is never trusted.
impl<V: Variant> Add<TaintedString<V>> for &str {
    type Output = TaintedString<V>;

    fn add(self, rhs: TaintedString<V>) -> TaintedString<V> {
        let mut out = String::with_capacity(self.len() + rhs.value.len());
        out.push_str(self);
        out.push_str(&rhs.value);
        TaintedString::wrap(out)
    }
}

impl<V: Variant> Add<TaintedString<V>> for String {
    type Output = TaintedString<V>;

    fn add(mut self, rhs: TaintedString<V>) -> TaintedString<V> {
        self.push_str(&rhs.value);
        TaintedString::wrap(self)
    }
}

/// Repetition; the scalar count is trusted and does not affect taint.
impl<V: Variant> Mul<usize> for TaintedString<V> {
    type Output = TaintedString<V>;

    fn mul(self, n: usize) -> TaintedString<V> {
        self.repeat(n)
    }
}

impl<V: Variant> Mul<TaintedString<V>> for usize {
    type Output = TaintedString<V>;

    fn mul(self, value: TaintedString<V>) -> TaintedString<V> {
        value.repeat(self)
    }
}

/// Tainted values of the *same* variant compare by payload. Comparing
/// different variants, or a tainted value against trusted text, does not
/// compile.
impl<V: Variant> PartialEq for TaintedString<V> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<V: Variant> Eq for TaintedString<V> {}

/// A tainted value may be cloned; the taint is cloned with it.
impl<V: Variant> Clone for TaintedString<V> {
    fn clone(&self) -> Self {
        Self::wrap(self.value.clone())
    }
}

/// Redacts the payload: only the variant name and character count are
/// shown, so tainted values can appear in assertions and logs without
/// leaking.
impl<V: Variant> fmt::Debug for TaintedString<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TaintedString<{}>(<{} chars redacted>)", V::NAME, self.len())
    }
}

/// Wraps the provided text as tainted.
impl<V: Variant> From<&str> for TaintedString<V> {
    fn from(value: &str) -> Self {
        Self::wrap(value)
    }
}

/// Wraps the provided text as tainted.
impl<V: Variant> From<String> for TaintedString<V> {
    fn from(value: String) -> Self {
        Self::wrap(value)
    }
}

/// Iterating a tainted string yields tainted single-character strings of
/// the same variant.
impl<'a, V: Variant> IntoIterator for &'a TaintedString<V> {
    type Item = TaintedString<V>;
    type IntoIter = Elements<std::str::Chars<'a>, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.chars()
    }
}

/// Deserializing produces a tainted value: anything arriving over a wire is
/// a taint source. The mirror image, `Serialize`, is deliberately never
/// implemented.
#[cfg(feature = "serde")]
impl<'de, V: Variant> serde::Deserialize<'de> for TaintedString<V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::wrap)
    }
}
