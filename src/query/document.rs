//! JSON query documents
//!
//! A query tree can be described as JSON and turned into a [`Q`]:
//!
//! ```json
//! {"or": [
//!   {"term": {"field": "title", "value": "foo bar"}},
//!   {"boost": {"query": {"term": {"field": "age", "value": {"range": {"from": 1, "to": 5}}}}, "factor": 2}},
//!   {"not": {"term": {"field": "tag", "value": {"safe": "a*"}}}}
//! ]}
//! ```
//!
//! Plain JSON scalars are escaped. `{"safe": ...}` marks a scalar safe,
//! `{"range": ...}`, `{"proximity": ...}`, `{"timestamp": ...}` and
//! `{"duration": ...}` map to the matching value types.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use super::operator::{Factor, Operator};
use super::q::Q;
use crate::error::{Result, SolrqError};
use crate::value::{Boundaries, Proximity, Range, Raw, Value};

/// Query tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryDoc {
    /// Single `field:value` term
    Term { field: String, value: ValueDoc },
    /// Several terms joined by `op` (`and` unless given), in field name order
    Terms {
        terms: BTreeMap<String, ValueDoc>,
        #[serde(default)]
        op: JoinOp,
    },
    And(Vec<QueryDoc>),
    Or(Vec<QueryDoc>),
    Not(Box<QueryDoc>),
    Boost {
        query: Box<QueryDoc>,
        factor: serde_json::Value,
    },
    ConstantScore {
        query: Box<QueryDoc>,
        factor: serde_json::Value,
    },
}

/// Operator allowed for implicit joins of several terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinOp {
    #[default]
    And,
    Or,
}

impl From<JoinOp> for Operator {
    fn from(op: JoinOp) -> Self {
        match op {
            JoinOp::And => Operator::And,
            JoinOp::Or => Operator::Or,
        }
    }
}

/// Value of a term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueDoc {
    Scalar(Scalar),
    Tagged(TaggedValue),
}

/// Bare JSON scalar, escaped on render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl From<Scalar> for Raw {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Bool(b) => Raw::Bool(b),
            Scalar::Integer(n) => Raw::Integer(n),
            Scalar::Unsigned(n) => Raw::Unsigned(n),
            Scalar::Float(x) => Raw::Float(x),
            Scalar::Text(text) => Raw::Text(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaggedValue {
    /// Scalar emitted without escaping
    Safe(Scalar),
    Range {
        from: Box<ValueDoc>,
        to: Box<ValueDoc>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        boundaries: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        safe: Option<bool>,
    },
    Proximity {
        value: Box<ValueDoc>,
        distance: i64,
        #[serde(default)]
        safe: bool,
    },
    /// RFC 3339 timestamp, or ISO 8601 without offset
    Timestamp(String),
    /// Offset from `NOW`
    Duration {
        #[serde(default)]
        days: i64,
        #[serde(default)]
        seconds: i64,
        #[serde(default)]
        milliseconds: i64,
    },
}

impl QueryDoc {
    pub fn from_json(text: &str) -> Result<Self> {
        tracing::debug!(bytes = text.len(), "parsing query document");
        Ok(serde_json::from_str(text)?)
    }

    pub fn into_query(self) -> Result<Q> {
        match self {
            QueryDoc::Term { field, value } => Ok(Q::term(field, value.into_raw()?)),
            QueryDoc::Terms { terms, op } => {
                let terms = terms
                    .into_iter()
                    .map(|(field, value)| Ok((field, value.into_raw()?)))
                    .collect::<Result<Vec<(String, Raw)>>>()?;
                Q::terms_with_op(terms, op.into())
            }
            QueryDoc::And(children) => Q::with_children(into_queries(children)?, Operator::And),
            QueryDoc::Or(children) => Q::with_children(into_queries(children)?, Operator::Or),
            QueryDoc::Not(child) => Ok(child.into_query()?.invert()),
            QueryDoc::Boost { query, factor } => {
                let factor = Factor::from_json(&factor)?;
                Ok(query.into_query()?.boost(factor))
            }
            QueryDoc::ConstantScore { query, factor } => {
                let factor = Factor::from_json(&factor)?;
                Ok(query.into_query()?.constant_score(factor))
            }
        }
    }
}

fn into_queries(docs: Vec<QueryDoc>) -> Result<Vec<Q>> {
    docs.into_iter().map(QueryDoc::into_query).collect()
}

impl ValueDoc {
    /// Scalars stay raw so that a surrounding range can apply its own
    /// safety to them; everything else becomes a [`Value`].
    pub fn into_raw(self) -> Result<Raw> {
        match self {
            ValueDoc::Scalar(scalar) => Ok(scalar.into()),
            ValueDoc::Tagged(tagged) => Ok(Raw::from(tagged.into_value()?)),
        }
    }
}

impl TaggedValue {
    pub fn into_value(self) -> Result<Value> {
        match self {
            TaggedValue::Safe(scalar) => Ok(Value::safe(scalar)),
            TaggedValue::Range {
                from,
                to,
                boundaries,
                safe,
            } => {
                let boundaries = match boundaries {
                    Some(token) => token.parse()?,
                    None => Boundaries::default(),
                };
                let range = Range::with_options(from.into_raw()?, to.into_raw()?, safe, boundaries);
                Ok(range.into())
            }
            TaggedValue::Proximity {
                value,
                distance,
                safe,
            } => Ok(Proximity::with_safety(value.into_raw()?, distance, safe).into()),
            TaggedValue::Timestamp(text) => Ok(Value::new(parse_timestamp(&text)?)),
            TaggedValue::Duration {
                days,
                seconds,
                milliseconds,
            } => {
                let delta = TimeDelta::try_days(days)
                    .zip(TimeDelta::try_seconds(seconds))
                    .zip(TimeDelta::try_milliseconds(milliseconds))
                    .and_then(|((d, s), ms)| d.checked_add(&s)?.checked_add(&ms))
                    .ok_or(SolrqError::InvalidDuration {
                        days,
                        seconds,
                        milliseconds,
                    })?;
                Ok(Value::new(delta))
            }
        }
    }
}

fn parse_timestamp(text: &str) -> Result<Raw> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(Raw::ZonedTimestamp(dt));
    }
    text.parse::<NaiveDateTime>()
        .map(Raw::Timestamp)
        .map_err(|source| SolrqError::InvalidTimestamp {
            given: text.to_string(),
            source,
        })
}
