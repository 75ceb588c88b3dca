//! # solrq - Solr query builder
//!
//! solrq builds Solr (Lucene standard parser) query strings from typed
//! values and boolean expression trees instead of string concatenation.
//! Reserved characters are escaped, dates and durations are translated to
//! Solr syntax, and parentheses are added exactly where nesting needs them.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`value`] - Value wrappers, escaping, ranges and proximity searches
//! - [`query`] - Query trees, operators and JSON query documents
//! - [`error`] - Error type shared by both
//!
//! ## Quick Start
//!
//! ```
//! use solrq::{Proximity, Q, Range, Value};
//! use chrono::TimeDelta;
//!
//! let query = Q::term("title", Proximity::new("fat cat", 3))
//!     & Q::term("published", Range::new(-TimeDelta::days(7), TimeDelta::zero()))
//!     & !Q::term("tag", Value::safe("draft*"));
//!
//! assert_eq!(
//!     query.to_string(),
//!     "(title:\"fat\\ cat\"~3 AND published:[NOW-7DAYS+0SECONDS+0MILLISECONDS TO NOW]) AND (!tag:draft*)"
//! );
//! ```
//!
//! ## Escaping
//!
//! Values are escaped unless they are marked safe:
//!
//! ```
//! use solrq::Value;
//!
//! assert_eq!(Value::new("foo [] bar").to_string(), "foo\\ \\[\\]\\ bar");
//! assert_eq!(Value::safe("foo [] bar").to_string(), "foo [] bar");
//! ```

pub mod error;
pub mod query;
pub mod value;

pub use error::{Result, SolrqError};
pub use query::{Factor, Operator, QOperator, Q, QueryDoc};
pub use value::{escape, Boundaries, Plain, Proximity, Range, Raw, Value, ANY};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
