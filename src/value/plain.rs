//! Query values
//!
//! [`Value`] is the type every query term carries. It has three shapes:
//! a [`Plain`] wrapped scalar, a [`Range`] and a [`Proximity`] search. All of
//! them render to the exact text Solr expects through `Display`, escaping
//! reserved characters unless the value was marked safe.

use std::fmt;

use super::escape::escape;
use super::{Proximity, Range, Raw};

/// Wildcard matching any term
pub const ANY: &str = "*";

/// A query value ready to be placed after `field:`
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Plain(Plain),
    Range(Range),
    Proximity(Proximity),
}

impl Value {
    /// Wrap a raw value with escaping enabled.
    ///
    /// Timestamps and durations are translated to Solr syntax right away and
    /// the result is marked safe.
    pub fn new(raw: impl Into<Raw>) -> Self {
        Self::with_safety(raw, false)
    }

    /// Wrap a raw value that is emitted verbatim
    pub fn safe(raw: impl Into<Raw>) -> Self {
        Self::with_safety(raw, true)
    }

    pub fn with_safety(raw: impl Into<Raw>, safe: bool) -> Self {
        Value::Plain(Plain::new(raw, safe))
    }

    /// `*`, unescaped
    pub fn any() -> Self {
        Self::safe(ANY)
    }

    /// Keep values as they are, wrap anything else with the given safety.
    pub(crate) fn coerce(raw: impl Into<Raw>, safe: bool) -> Self {
        match raw.into() {
            Raw::Value(value) => *value,
            raw => Self::with_safety(raw, safe),
        }
    }

    pub fn is_safe(&self) -> bool {
        match self {
            Value::Plain(plain) => plain.is_safe(),
            Value::Range(range) => range.is_safe(),
            Value::Proximity(proximity) => proximity.is_safe(),
        }
    }

    /// Only used by [`Range`] while it is being built.
    pub(crate) fn set_safety(&mut self, safe: bool) {
        match self {
            Value::Plain(plain) => plain.set_safety(safe),
            Value::Range(range) => range.set_safety(safe),
            Value::Proximity(proximity) => proximity.set_safety(safe),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Value::Plain(_) => "Value",
            Value::Range(_) => "Range",
            Value::Proximity(_) => "Proximity",
        }
    }

    /// Human readable form, e.g. `<Value: foo\ bar>`
    pub fn repr(&self) -> String {
        format!("<{}: {}>", self.kind(), self)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Plain(plain) => write!(f, "{}", plain),
            Value::Range(range) => write!(f, "{}", range),
            Value::Proximity(proximity) => write!(f, "{}", proximity),
        }
    }
}

impl From<Plain> for Value {
    fn from(plain: Plain) -> Self {
        Value::Plain(plain)
    }
}

impl From<Range> for Value {
    fn from(range: Range) -> Self {
        Value::Range(range)
    }
}

impl From<Proximity> for Value {
    fn from(proximity: Proximity) -> Self {
        Value::Proximity(proximity)
    }
}

/// A single wrapped scalar and its safety flag
#[derive(Debug, Clone, PartialEq)]
pub struct Plain {
    raw: Raw,
    safe: bool,
}

impl Plain {
    pub fn new(raw: impl Into<Raw>, safe: bool) -> Self {
        let raw = raw.into();
        if !safe {
            if let Some(text) = raw.translate() {
                return Self {
                    raw: Raw::Text(text),
                    safe: true,
                };
            }
        }
        Self { raw, safe }
    }

    pub fn raw(&self) -> &Raw {
        &self.raw
    }

    pub fn is_safe(&self) -> bool {
        self.safe
    }

    pub(crate) fn set_safety(&mut self, safe: bool) {
        self.safe = safe;
    }
}

impl fmt::Display for Plain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.raw.to_string();
        if self.safe {
            f.write_str(&text)
        } else {
            f.write_str(&escape(&text))
        }
    }
}
