pub mod document;
pub mod operator;
pub mod q;

pub use document::{JoinOp, QueryDoc, Scalar, TaggedValue, ValueDoc};
pub use operator::{Factor, Operator, QOperator};
pub use q::Q;
