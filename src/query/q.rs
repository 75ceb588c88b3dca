//! Query expression trees

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

use super::operator::{Factor, Operator};
use crate::error::{Result, SolrqError};
use crate::value::{Raw, Value};

/// A Solr query expression.
///
/// A node is either a single `field:value` term or a list of child queries
/// joined by an [`Operator`]. Build leaves with [`Q::term`], combine them
/// with `&`, `|`, `!`, `^` (or the named methods) and turn the tree into a
/// query string with [`Q::compile`] or `to_string()`.
///
/// ```
/// use solrq::{Q, Range};
///
/// let query = (Q::term("type", "animal") & Q::term("age", Range::new(1, 5))) ^ 2
///     | !Q::term("name", "fat cat");
/// assert_eq!(
///     query.to_string(),
///     "((type:animal AND age:[1 TO 5])^2) OR (!name:fat\\ cat)"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Q {
    node: Node,
}

#[derive(Debug, Clone, PartialEq, Default)]
enum Node {
    /// Placeholder with nothing to compile
    #[default]
    Empty,
    Leaf {
        field: String,
        value: Value,
    },
    Branch {
        children: Vec<Q>,
        op: Operator,
    },
}

impl Q {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Single `field:value` term. Anything that is not a [`Value`] yet is
    /// wrapped with escaping enabled. Field names are used as given, so
    /// wildcards like `*_t` work.
    pub fn term(field: impl Into<String>, value: impl Into<Raw>) -> Self {
        Self {
            node: Node::Leaf {
                field: field.into(),
                value: Value::coerce(value, false),
            },
        }
    }

    /// Several terms joined with `AND`.
    ///
    /// Children follow the iteration order of `terms`; pass an ordered
    /// collection (or build the children explicitly) when the order matters.
    pub fn terms<I, K, V>(terms: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Raw>,
    {
        Self::from_terms(terms, Operator::And)
    }

    /// Several terms joined with `op`. A single term gives a plain leaf.
    pub fn terms_with_op<I, K, V>(terms: I, op: Operator) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Raw>,
    {
        let query = Self::from_terms(terms, op);
        if let Node::Branch { children, op } = &query.node {
            op.check_arity(children.len())?;
        }
        Ok(query)
    }

    fn from_terms<I, K, V>(terms: I, op: Operator) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Raw>,
    {
        let mut children: Vec<Q> = terms
            .into_iter()
            .map(|(field, value)| Q::term(field, value))
            .collect();

        match children.len() {
            0 => Self::empty(),
            1 => children.pop().unwrap_or_default(),
            _ => Self::branch(children, op),
        }
    }

    /// Internal node over explicit children, validated against `op`'s arity.
    ///
    /// Empty children are placeholders and are dropped before the check.
    pub fn with_children(children: Vec<Q>, op: Operator) -> Result<Self> {
        let children = without_empty(children);
        if children.is_empty() {
            return Ok(Self::empty());
        }
        op.check_arity(children.len())?;
        Ok(Self::branch(children, op))
    }

    /// Build from either children or terms, never both
    pub fn build<K, V>(children: Vec<Q>, terms: Vec<(K, V)>, op: Operator) -> Result<Self>
    where
        K: Into<String>,
        V: Into<Raw>,
    {
        match (children.is_empty(), terms.is_empty()) {
            (false, false) => Err(SolrqError::ConflictingArguments),
            (true, false) => Self::terms_with_op(terms, op),
            _ => Self::with_children(children, op),
        }
    }

    /// Empty children are dropped: nothing left gives the empty query and a
    /// join over a single child is that child.
    fn branch(children: Vec<Q>, op: Operator) -> Self {
        let mut children = without_empty(children);
        match children.len() {
            0 => Self::empty(),
            1 if !op.is_unary() => children.pop().unwrap_or_default(),
            _ => Self {
                node: Node::Branch { children, op },
            },
        }
    }

    pub fn and(self, other: Q) -> Q {
        Self::branch(vec![self, other], Operator::And)
    }

    pub fn or(self, other: Q) -> Q {
        Self::branch(vec![self, other], Operator::Or)
    }

    pub fn invert(self) -> Q {
        Self::branch(vec![self], Operator::Not)
    }

    pub fn boost(self, factor: impl Into<Factor>) -> Q {
        Self::branch(vec![self], Operator::Boost(factor.into()))
    }

    pub fn constant_score(self, factor: impl Into<Factor>) -> Q {
        Self::branch(vec![self], Operator::ConstantScore(factor.into()))
    }

    /// Compile the tree into a query string.
    ///
    /// Every internal node is parenthesized when it is compiled as a child,
    /// so only the root of the tree stays bare unless `extra_parens` is set.
    pub fn compile(&self, extra_parens: bool) -> String {
        match &self.node {
            Node::Empty => String::new(),
            Node::Leaf { field, value } => format!("{}:{}", field, value),
            Node::Branch { children, op } => {
                let parts: Vec<String> = children.iter().map(|child| child.compile(true)).collect();
                let joined = op.join(&parts);
                if extra_parens {
                    format!("({})", joined)
                } else {
                    joined
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.node, Node::Empty)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node, Node::Leaf { .. })
    }

    /// Field name of a leaf
    pub fn field(&self) -> Option<&str> {
        match &self.node {
            Node::Leaf { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Value of a leaf
    pub fn value(&self) -> Option<&Value> {
        match &self.node {
            Node::Leaf { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Children of an internal node, empty for leaves
    pub fn children(&self) -> &[Q] {
        match &self.node {
            Node::Branch { children, .. } => children,
            _ => &[],
        }
    }

    pub fn operator(&self) -> Option<Operator> {
        match &self.node {
            Node::Branch { op, .. } => Some(*op),
            _ => None,
        }
    }

    /// Human readable form, e.g. `<Q: type:animal AND name:cat>`
    pub fn repr(&self) -> String {
        format!("<Q: {}>", self)
    }
}

fn without_empty(children: Vec<Q>) -> Vec<Q> {
    children.into_iter().filter(|child| !child.is_empty()).collect()
}

impl fmt::Display for Q {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query = self.compile(false);
        tracing::trace!(query = %query, "compiled query");
        f.write_str(&query)
    }
}

impl BitAnd for Q {
    type Output = Q;

    fn bitand(self, other: Q) -> Q {
        self.and(other)
    }
}

impl BitOr for Q {
    type Output = Q;

    fn bitor(self, other: Q) -> Q {
        self.or(other)
    }
}

impl Not for Q {
    type Output = Q;

    fn not(self) -> Q {
        self.invert()
    }
}

impl<F: Into<Factor>> BitXor<F> for Q {
    type Output = Q;

    fn bitxor(self, factor: F) -> Q {
        self.boost(factor)
    }
}
