//! Proximity search values: `"<words>"~<distance>`

use std::fmt;

use super::{Plain, Raw};

/// Words that must appear within `distance` positions of each other.
///
/// Any raw value is accepted, it is up to the caller to pass something that
/// makes sense as a phrase. The distance is not validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Proximity {
    value: Plain,
    distance: i64,
}

impl Proximity {
    pub fn new(raw: impl Into<Raw>, distance: i64) -> Self {
        Self::with_safety(raw, distance, false)
    }

    pub fn with_safety(raw: impl Into<Raw>, distance: i64, safe: bool) -> Self {
        Self {
            value: Plain::new(raw, safe),
            distance,
        }
    }

    pub fn distance(&self) -> i64 {
        self.distance
    }

    pub fn is_safe(&self) -> bool {
        self.value.is_safe()
    }

    pub(crate) fn set_safety(&mut self, safe: bool) {
        self.value.set_safety(safe);
    }
}

impl fmt::Display for Proximity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"~{}", self.value, self.distance)
    }
}
