use std::fmt;
use std::ops::RangeInclusive;

use crate::error::MatchError;

/// A user value proxied by a leaf match node.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Sym(String),
}

impl Value {
    /// Integer reading of the value, if it has one.
    ///
    /// Floats truncate, strings must parse, `Nil` reads as zero.
    pub fn to_int(&self) -> Option<i64> {
        match self {
            Value::Nil => Some(0),
            Value::Int(n) => Some(*n),
            Value::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Value::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Sym(s) => write!(f, ":{s}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

/// Inclusive repetition bounds, `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountRange {
    lo: usize,
    hi: usize,
}

impl CountRange {
    pub fn new(lo: i64, hi: i64) -> Result<Self, MatchError> {
        let shown = format!("{lo}..{hi}");
        let lo = usize::try_from(lo)
            .map_err(|_| MatchError::type_conversion(&shown, "lower bound is negative"))?;
        let hi = usize::try_from(hi)
            .map_err(|_| MatchError::type_conversion(&shown, "upper bound is negative"))?;
        if hi < lo {
            return Err(MatchError::type_conversion(
                &shown,
                "upper bound is below lower bound",
            ));
        }
        Ok(Self { lo, hi })
    }

    pub fn exactly(n: usize) -> Self {
        Self { lo: n, hi: n }
    }

    pub fn start(&self) -> usize {
        self.lo
    }

    pub fn end(&self) -> usize {
        self.hi
    }
}

impl fmt::Display for CountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.lo, self.hi)
    }
}

/// Argument accepted wherever a repetition range is expected.
#[derive(Debug, Clone, PartialEq)]
pub enum CountArg {
    /// A single count; must be positive.
    Count(i64),
    /// Explicit inclusive bounds.
    Range(i64, i64),
    /// Any value with an integer reading, treated as a single count.
    Value(Value),
}

impl CountArg {
    pub fn normalize(self) -> Result<CountRange, MatchError> {
        match self {
            CountArg::Range(lo, hi) => CountRange::new(lo, hi),
            CountArg::Count(n) => single_count(n, &n),
            CountArg::Value(value) => match value.to_int() {
                Some(n) => single_count(n, &value),
                None => Err(MatchError::type_conversion(&value, "not an integer")),
            },
        }
    }
}

fn single_count(n: i64, shown: &dyn fmt::Display) -> Result<CountRange, MatchError> {
    if n <= 0 {
        return Err(MatchError::type_conversion(
            shown,
            "count must be a positive integer",
        ));
    }
    // n > 0 so the cast is lossless
    Ok(CountRange::exactly(n as usize))
}

impl From<i64> for CountArg {
    fn from(n: i64) -> Self {
        CountArg::Count(n)
    }
}

impl From<RangeInclusive<i64>> for CountArg {
    fn from(range: RangeInclusive<i64>) -> Self {
        CountArg::Range(*range.start(), *range.end())
    }
}

impl From<CountRange> for CountArg {
    fn from(range: CountRange) -> Self {
        CountArg::Range(range.lo as i64, range.hi as i64)
    }
}

impl From<Value> for CountArg {
    fn from(value: Value) -> Self {
        CountArg::Value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_count_becomes_degenerate_range() {
        let range = CountArg::from(5_i64).normalize().unwrap();
        assert_eq!((range.start(), range.end()), (5, 5));
    }

    #[test]
    fn zero_count_is_rejected_but_zero_range_is_not() {
        assert!(matches!(
            CountArg::from(0_i64).normalize(),
            Err(MatchError::TypeConversion { .. })
        ));
        let range = CountArg::from(0..=0_i64).normalize().unwrap();
        assert_eq!(range, CountRange::exactly(0));
    }

    #[test]
    fn values_are_read_as_counts() {
        assert_eq!(
            CountArg::from(Value::from("3")).normalize().unwrap(),
            CountRange::exactly(3)
        );
        assert_eq!(
            CountArg::from(Value::Float(2.9)).normalize().unwrap(),
            CountRange::exactly(2)
        );
        assert!(CountArg::from(Value::from("many")).normalize().is_err());
        assert!(CountArg::from(Value::Nil).normalize().is_err());
        assert!(CountArg::from(Value::Bool(true)).normalize().is_err());
    }

    #[test]
    fn error_names_the_offending_value() {
        let err = CountArg::from(Value::from("many")).normalize().unwrap_err();
        assert_eq!(
            err.to_string(),
            "could not convert \"many\" into a repetition range: not an integer"
        );
    }

    #[test]
    fn display() {
        assert_eq!(CountRange::new(2, 8).unwrap().to_string(), "2..8");
        assert_eq!(Value::Sym("a".into()).to_string(), ":a");
        assert_eq!(Value::from("a").to_string(), "\"a\"");
    }

    proptest! {
        #[test]
        fn ordered_bounds_normalize(lo in 0i64..10_000, width in 0i64..10_000) {
            let range = CountArg::from(lo..=lo + width).normalize().unwrap();
            prop_assert_eq!(range.start() as i64, lo);
            prop_assert_eq!(range.end() as i64, lo + width);
        }

        #[test]
        fn inverted_bounds_are_rejected(lo in 0i64..10_000, gap in 1i64..10_000) {
            prop_assert!(CountArg::Range(lo, lo - gap).normalize().is_err());
        }

        #[test]
        fn negative_counts_are_rejected(n in i64::MIN..=0) {
            prop_assert!(CountArg::from(n).normalize().is_err());
        }
    }
}
