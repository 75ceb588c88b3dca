//! Range values: `[<from> TO <to>]` with configurable boundaries

use std::fmt;
use std::str::FromStr;

use super::escape::escape;
use super::{Raw, Value};
use crate::error::{Result, SolrqError};

/// Bracket pair surrounding a range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundaries {
    /// `[from TO to]`
    #[default]
    Inclusive,
    /// `{from TO to}`
    Exclusive,
    /// `{from TO to]`
    ExclusiveInclusive,
    /// `[from TO to}`
    InclusiveExclusive,
}

impl Boundaries {
    /// Every token accepted by [`Boundaries::from_str`]
    pub const TOKENS: [&'static str; 10] = [
        "inclusive",
        "exclusive",
        "ii",
        "ee",
        "ei",
        "ie",
        "[]",
        "{}",
        "{]",
        "[}",
    ];

    pub fn brackets(self) -> (char, char) {
        match self {
            Boundaries::Inclusive => ('[', ']'),
            Boundaries::Exclusive => ('{', '}'),
            Boundaries::ExclusiveInclusive => ('{', ']'),
            Boundaries::InclusiveExclusive => ('[', '}'),
        }
    }
}

impl FromStr for Boundaries {
    type Err = SolrqError;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "inclusive" | "ii" | "[]" => Ok(Boundaries::Inclusive),
            "exclusive" | "ee" | "{}" => Ok(Boundaries::Exclusive),
            "ei" | "{]" => Ok(Boundaries::ExclusiveInclusive),
            "ie" | "[}" => Ok(Boundaries::InclusiveExclusive),
            _ => Err(SolrqError::InvalidBoundaries {
                given: token.to_string(),
                allowed: Boundaries::TOKENS.join(", "),
            }),
        }
    }
}

impl fmt::Display for Boundaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = self.brackets();
        write!(f, "{}{}", open, close)
    }
}

/// A range of values between two endpoints.
///
/// Each endpoint keeps its own escaping decision, the assembled range text
/// is not escaped again.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    from: Box<Value>,
    to: Box<Value>,
    boundaries: Boundaries,
    safe: bool,
}

impl Range {
    /// Inclusive range, endpoints escaped unless they already are values
    pub fn new(from: impl Into<Raw>, to: impl Into<Raw>) -> Self {
        Self::with_options(from, to, None, Boundaries::Inclusive)
    }

    /// Build a range with explicit options.
    ///
    /// Endpoints that are not values yet are wrapped with `safe` (or escaping
    /// when `None`). When `safe` is given it is also forced onto both
    /// endpoints, including ones passed in as values.
    pub fn with_options(
        from: impl Into<Raw>,
        to: impl Into<Raw>,
        safe: Option<bool>,
        boundaries: Boundaries,
    ) -> Self {
        let default_safety = safe.unwrap_or(false);
        let mut from = Value::coerce(from, default_safety);
        let mut to = Value::coerce(to, default_safety);

        if let Some(safe) = safe {
            from.set_safety(safe);
            to.set_safety(safe);
        }

        Self {
            from: Box::new(from),
            to: Box::new(to),
            boundaries,
            safe: true,
        }
    }

    /// Same as [`Range::with_options`] with the boundaries given as a token
    pub fn with_boundaries(
        from: impl Into<Raw>,
        to: impl Into<Raw>,
        safe: Option<bool>,
        boundaries: &str,
    ) -> Result<Self> {
        let boundaries = boundaries.parse()?;
        Ok(Self::with_options(from, to, safe, boundaries))
    }

    /// `[* TO *]`: matches every document that has the field set
    pub fn set() -> Self {
        Self::new(Value::any(), Value::any())
    }

    /// Lower endpoint
    pub fn start(&self) -> &Value {
        &self.from
    }

    /// Upper endpoint
    pub fn end(&self) -> &Value {
        &self.to
    }

    pub fn boundaries(&self) -> Boundaries {
        self.boundaries
    }

    pub fn is_safe(&self) -> bool {
        self.safe
    }

    pub(crate) fn set_safety(&mut self, safe: bool) {
        self.safe = safe;
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = self.boundaries.brackets();
        let text = format!("{}{} TO {}{}", open, self.from, self.to, close);
        if self.safe {
            f.write_str(&text)
        } else {
            f.write_str(&escape(&text))
        }
    }
}
