//! Raw query values and their Solr translations

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, TimeZone, Timelike};
use std::fmt;

use super::{Plain, Proximity, Range, Value};

const MICROS_PER_SECOND: i128 = 1_000_000;
const MICROS_PER_DAY: i128 = 86_400 * MICROS_PER_SECOND;

/// Scalar (or nested value) accepted wherever a query value is expected
#[derive(Debug, Clone, PartialEq)]
pub enum Raw {
    /// Free text
    Text(String),
    /// Signed integer
    Integer(i64),
    /// Unsigned integer too wide for `Integer`
    Unsigned(u64),
    /// Floating point number
    Float(f64),
    /// Boolean, rendered as `true`/`false`
    Bool(bool),
    /// Timestamp without zone information
    Timestamp(NaiveDateTime),
    /// Timestamp with a fixed UTC offset
    ZonedTimestamp(DateTime<FixedOffset>),
    /// Offset relative to the moment the query is executed
    Duration(TimeDelta),
    /// An already constructed value, rendered first and then treated as text
    Value(Box<Value>),
}

impl Raw {
    /// Solr representation for temporal values, `None` for everything else.
    pub(crate) fn translate(&self) -> Option<String> {
        match self {
            Raw::Timestamp(dt) => Some(format!("\"{}Z\"", iso_naive(dt))),
            // wall clock of the given zone, not converted to UTC
            Raw::ZonedTimestamp(dt) => {
                Some(format!("\"{}Z\"", dt.format("%Y-%m-%dT%H:%M:%S%.6f")))
            }
            Raw::Duration(delta) => Some(date_math(delta)),
            _ => None,
        }
    }
}

impl fmt::Display for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Raw::Text(text) => f.write_str(text),
            Raw::Integer(n) => write!(f, "{}", n),
            Raw::Unsigned(n) => write!(f, "{}", n),
            Raw::Float(x) => f.write_str(&format_float(*x)),
            Raw::Bool(b) => write!(f, "{}", b),
            Raw::Timestamp(dt) => write!(f, "{}", dt),
            Raw::ZonedTimestamp(dt) => write!(f, "{}", dt),
            Raw::Duration(delta) => write!(f, "{}", delta),
            Raw::Value(value) => write!(f, "{}", value),
        }
    }
}

/// Shortest round-trip form of a float.
///
/// Integral values keep a decimal point (`2.0`), exponents below -4 or from
/// 16 up switch to scientific notation with a signed two digit exponent
/// (`1e-05`, `1.5e+20`), and non-finite values are `nan`, `inf`, `-inf`.
pub(crate) fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{:e}", x);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if (-4..16).contains(&exponent) {
        if x.fract() == 0.0 {
            format!("{:.1}", x)
        } else {
            x.to_string()
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

/// ISO 8601 form with microseconds only when they are non-zero
fn iso_naive(dt: &NaiveDateTime) -> String {
    if dt.nanosecond() / 1_000 == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Solr date math relative to `NOW`.
///
/// The delta is split into whole days (floored, may be negative) plus a
/// non-negative remainder of seconds and milliseconds, so a negative delta
/// that is not a whole number of days renders with mixed signs:
/// `-(2 days 2 hours)` is `NOW-3DAYS+79200SECONDS+0MILLISECONDS`.
fn date_math(delta: &TimeDelta) -> String {
    let micros = i128::from(delta.num_seconds()) * MICROS_PER_SECOND
        + i128::from(delta.subsec_nanos() / 1_000);
    if micros == 0 {
        return "NOW".to_string();
    }

    let days = micros.div_euclid(MICROS_PER_DAY);
    let rest = micros.rem_euclid(MICROS_PER_DAY);
    let seconds = rest / MICROS_PER_SECOND;
    let millis = rest % MICROS_PER_SECOND / 1_000;

    format!("NOW{:+}DAYS{:+}SECONDS{:+}MILLISECONDS", days, seconds, millis)
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Raw {
            fn from(n: $ty) -> Self {
                Raw::Integer(i64::from(n))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Raw {
    fn from(n: u64) -> Self {
        Raw::Unsigned(n)
    }
}

impl From<usize> for Raw {
    fn from(n: usize) -> Self {
        Raw::Unsigned(n as u64)
    }
}

impl From<isize> for Raw {
    fn from(n: isize) -> Self {
        Raw::Integer(n as i64)
    }
}

impl From<f64> for Raw {
    fn from(x: f64) -> Self {
        Raw::Float(x)
    }
}

impl From<f32> for Raw {
    fn from(x: f32) -> Self {
        Raw::Float(f64::from(x))
    }
}

impl From<bool> for Raw {
    fn from(b: bool) -> Self {
        Raw::Bool(b)
    }
}

impl From<&str> for Raw {
    fn from(text: &str) -> Self {
        Raw::Text(text.to_string())
    }
}

impl From<String> for Raw {
    fn from(text: String) -> Self {
        Raw::Text(text)
    }
}

impl From<&String> for Raw {
    fn from(text: &String) -> Self {
        Raw::Text(text.clone())
    }
}

impl From<NaiveDateTime> for Raw {
    fn from(dt: NaiveDateTime) -> Self {
        Raw::Timestamp(dt)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Raw {
    fn from(dt: DateTime<Tz>) -> Self {
        Raw::ZonedTimestamp(dt.fixed_offset())
    }
}

impl From<TimeDelta> for Raw {
    fn from(delta: TimeDelta) -> Self {
        Raw::Duration(delta)
    }
}

impl From<Value> for Raw {
    fn from(value: Value) -> Self {
        Raw::Value(Box::new(value))
    }
}

impl From<Plain> for Raw {
    fn from(plain: Plain) -> Self {
        Raw::from(Value::Plain(plain))
    }
}

impl From<Range> for Raw {
    fn from(range: Range) -> Self {
        Raw::from(Value::Range(range))
    }
}

impl From<Proximity> for Raw {
    fn from(proximity: Proximity) -> Self {
        Raw::from(Value::Proximity(proximity))
    }
}
