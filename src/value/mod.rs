pub mod escape;
pub mod plain;
pub mod proximity;
pub mod range;
pub mod raw;

pub use escape::{escape, is_reserved, RESERVED_CHARS};
pub use plain::{Plain, Value, ANY};
pub use proximity::Proximity;
pub use range::{Boundaries, Range};
pub use raw::Raw;
