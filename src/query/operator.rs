//! Operators joining compiled query strings

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SolrqError};
use crate::value::raw::format_float;

/// Numeric factor for boost and constant score operators
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Factor {
    Int(i64),
    Float(f64),
}

impl Factor {
    /// Accept a JSON number, reject anything else with a type error
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let invalid = || SolrqError::InvalidFactor {
            got: value.to_string(),
        };
        match value {
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Factor::Int)
                .or_else(|| n.as_f64().map(Factor::Float))
                .ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }
}

impl FromStr for Factor {
    type Err = SolrqError;

    fn from_str(text: &str) -> Result<Self> {
        let text = text.trim();
        if let Ok(n) = text.parse::<i64>() {
            return Ok(Factor::Int(n));
        }
        match text.parse::<f64>() {
            Ok(x) => Ok(Factor::Float(x)),
            Err(_) => Err(SolrqError::InvalidFactor {
                got: format!("{:?}", text),
            }),
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factor::Int(n) => write!(f, "{}", n),
            Factor::Float(x) => f.write_str(&format_float(*x)),
        }
    }
}

macro_rules! impl_factor_from {
    ($variant:ident as $target:ty: $($ty:ty),*) => {
        $(impl From<$ty> for Factor {
            fn from(n: $ty) -> Self {
                Factor::$variant(<$target>::from(n))
            }
        })*
    };
}

impl_factor_from!(Int as i64: i8, i16, i32, i64, u8, u16, u32);
impl_factor_from!(Float as f64: f32, f64);

impl TryFrom<&serde_json::Value> for Factor {
    type Error = SolrqError;

    fn try_from(value: &serde_json::Value) -> Result<Self> {
        Factor::from_json(value)
    }
}

/// Combinator used by an internal query node
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Operator {
    /// `a AND b AND ...`
    #[default]
    And,
    /// `a OR b OR ...`
    Or,
    /// `!a`
    Not,
    /// `a^factor`
    Boost(Factor),
    /// `a^=factor`
    ConstantScore(Factor),
}

impl Operator {
    pub fn name(&self) -> &'static str {
        match self {
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Not => "invert",
            Operator::Boost(_) => "boost",
            Operator::ConstantScore(_) => "constant_score",
        }
    }

    /// Operators that wrap exactly one operand
    pub fn is_unary(&self) -> bool {
        matches!(
            self,
            Operator::Not | Operator::Boost(_) | Operator::ConstantScore(_)
        )
    }

    pub(crate) fn check_arity(&self, operands: usize) -> Result<()> {
        if self.is_unary() && operands != 1 {
            return Err(SolrqError::InvalidArity {
                operator: self.name(),
                got: operands,
            });
        }
        Ok(())
    }

    /// Join already compiled query strings
    pub fn apply<S: AsRef<str>>(&self, parts: &[S]) -> Result<String> {
        self.check_arity(parts.len())?;
        Ok(self.join(parts))
    }

    /// Join without the arity check; callers guarantee unary operators get
    /// exactly one part.
    pub(crate) fn join<S: AsRef<str>>(&self, parts: &[S]) -> String {
        let parts: Vec<&str> = parts.iter().map(AsRef::as_ref).collect();
        match self {
            Operator::And => parts.join(" AND "),
            Operator::Or => parts.join(" OR "),
            Operator::Not => format!("!{}", parts.concat()),
            Operator::Boost(factor) => format!("{}^{}", parts.concat(), factor),
            Operator::ConstantScore(factor) => format!("{}^={}", parts.concat(), factor),
        }
    }
}

/// Operator routines over compiled query strings, one per combinator
pub struct QOperator;

impl QOperator {
    pub fn and_<S: AsRef<str>>(parts: &[S]) -> String {
        Operator::And.join(parts)
    }

    pub fn or_<S: AsRef<str>>(parts: &[S]) -> String {
        Operator::Or.join(parts)
    }

    pub fn not_<S: AsRef<str>>(parts: &[S]) -> Result<String> {
        Operator::Not.apply(parts)
    }

    pub fn boost<S: AsRef<str>>(parts: &[S], factor: impl Into<Factor>) -> Result<String> {
        Operator::Boost(factor.into()).apply(parts)
    }

    pub fn constant_score<S: AsRef<str>>(parts: &[S], factor: impl Into<Factor>) -> Result<String> {
        Operator::ConstantScore(factor.into()).apply(parts)
    }
}
