use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Range over a whole number of days since an event.
///
/// Format: "N" (exact), "<N", "<=N", ">N", ">=N", "N-M" (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum DayRange {
    LessThan(u64),
    LessEqual(u64),
    GreaterThan(u64),
    GreaterEqual(u64),
    Equal(u64),
    Between(u64, u64), // Inclusive range: N-M
}

impl DayRange {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(val) = s.strip_prefix(">=") {
            Ok(DayRange::GreaterEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix("<=") {
            Ok(DayRange::LessEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix(">") {
            Ok(DayRange::GreaterThan(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix("<") {
            Ok(DayRange::LessThan(val.trim().parse()?))
        } else if s.contains('-') && !s.starts_with('-') {
            let parts: Vec<&str> = s.split('-').collect();
            if parts.len() == 2 {
                let low: u64 = parts[0].trim().parse()?;
                let high: u64 = parts[1].trim().parse()?;
                if low > high {
                    bail!("Range start is after range end: {}", s)
                }
                Ok(DayRange::Between(low, high))
            } else {
                bail!("Invalid range format: {}", s)
            }
        } else {
            Ok(DayRange::Equal(s.parse()?))
        }
    }

    pub fn matches(&self, days: u64) -> bool {
        match self {
            DayRange::LessThan(n) => days < *n,
            DayRange::LessEqual(n) => days <= *n,
            DayRange::GreaterThan(n) => days > *n,
            DayRange::GreaterEqual(n) => days >= *n,
            DayRange::Equal(n) => days == *n,
            DayRange::Between(low, high) => days >= *low && days <= *high,
        }
    }

    /// True when the range has no upper bound.
    pub fn is_open_ended(&self) -> bool {
        matches!(self, DayRange::GreaterThan(_) | DayRange::GreaterEqual(_))
    }
}

impl fmt::Display for DayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayRange::LessThan(n) => write!(f, "<{}", n),
            DayRange::LessEqual(n) => write!(f, "<={}", n),
            DayRange::GreaterThan(n) => write!(f, ">{}", n),
            DayRange::GreaterEqual(n) => write!(f, ">={}", n),
            DayRange::Equal(n) => write!(f, "{}", n),
            DayRange::Between(low, high) => write!(f, "{}-{}", low, high),
        }
    }
}

impl TryFrom<String> for DayRange {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        DayRange::parse(&s).map_err(|e| format!("invalid day range '{}': {}", s, e))
    }
}

impl From<DayRange> for String {
    fn from(range: DayRange) -> Self {
        range.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_less_than() {
        let range = DayRange::parse("<7").unwrap();
        assert!(range.matches(6));
        assert!(!range.matches(7));
    }

    #[test]
    fn test_parse_range_less_equal() {
        let range = DayRange::parse("<=3").unwrap();
        assert!(range.matches(0));
        assert!(range.matches(3));
        assert!(!range.matches(4));
    }

    #[test]
    fn test_parse_range_greater_than() {
        let range = DayRange::parse(">30").unwrap();
        assert!(!range.matches(30));
        assert!(range.matches(31));
        assert!(range.is_open_ended());
    }

    #[test]
    fn test_parse_range_greater_equal() {
        let range = DayRange::parse(">= 31").unwrap();
        assert!(!range.matches(30));
        assert!(range.matches(31));
        assert!(range.is_open_ended());
    }

    #[test]
    fn test_parse_range_equal() {
        let range = DayRange::parse("0").unwrap();
        assert!(range.matches(0));
        assert!(!range.matches(1));
        assert!(!range.is_open_ended());
    }

    #[test]
    fn test_parse_range_between() {
        let range = DayRange::parse("8-14").unwrap();
        assert!(!range.matches(7));
        assert!(range.matches(8));
        assert!(range.matches(14));
        assert!(!range.matches(15));
    }

    #[test]
    fn test_parse_range_rejects_garbage() {
        assert!(DayRange::parse("soon").is_err());
        assert!(DayRange::parse("-3").is_err());
        assert!(DayRange::parse("1-2-3").is_err());
        assert!(DayRange::parse("14-8").is_err());
    }

    #[test]
    fn test_display_matches_parse_input() {
        for s in ["0", "<7", "<=3", ">30", ">=31", "15-30"] {
            assert_eq!(DayRange::parse(s).unwrap().to_string(), s);
        }
    }
}
