use anyhow::{bail, Result};

use crate::draft::RawValue;

/// Round selector for `round_default` rules: "2", "<3", ">=5", "2-4".
#[derive(Debug, Clone, PartialEq)]
pub enum RangeOp {
    LessThan(u32),
    LessEqual(u32),
    GreaterThan(u32),
    GreaterEqual(u32),
    Equal(u32),
    Between(u32, u32), // Inclusive range: N-M
}

impl RangeOp {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(val) = s.strip_prefix(">=") {
            Ok(RangeOp::GreaterEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix("<=") {
            Ok(RangeOp::LessEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('>') {
            Ok(RangeOp::GreaterThan(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('<') {
            Ok(RangeOp::LessThan(val.trim().parse()?))
        } else if s.contains('-') && !s.starts_with('-') {
            let parts: Vec<&str> = s.split('-').collect();
            if parts.len() == 2 {
                let low: u32 = parts[0].trim().parse()?;
                let high: u32 = parts[1].trim().parse()?;
                if low > high {
                    bail!("Empty round range: {}", s)
                }
                Ok(RangeOp::Between(low, high))
            } else {
                bail!("Invalid round range: {}", s)
            }
        } else {
            Ok(RangeOp::Equal(s.parse()?))
        }
    }

    pub fn matches(&self, round: u32) -> bool {
        match self {
            RangeOp::LessThan(n) => round < *n,
            RangeOp::LessEqual(n) => round <= *n,
            RangeOp::GreaterThan(n) => round > *n,
            RangeOp::GreaterEqual(n) => round >= *n,
            RangeOp::Equal(n) => round == *n,
            RangeOp::Between(low, high) => round >= *low && round <= *high,
        }
    }
}

/// Parse a multiplier cell. Accepts plain numbers and effect notation
/// ("x2", "2x"). Anything non-positive is treated as absent.
pub fn parse_multiplier(raw: &RawValue) -> Option<f64> {
    let value = match raw {
        RawValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
        RawValue::Text(s) => {
            let s = s.trim();
            let s = s
                .strip_prefix(['x', 'X'])
                .or_else(|| s.strip_suffix(['x', 'X']))
                .unwrap_or(s);
            RawValue::Text(s.to_string()).as_f64()
        }
    };
    value.filter(|n| *n > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_less_than() {
        let range = RangeOp::parse("<3").unwrap();
        assert!(range.matches(2));
        assert!(!range.matches(3));
    }

    #[test]
    fn test_parse_range_greater_equal() {
        let range = RangeOp::parse(">=5").unwrap();
        assert!(!range.matches(4));
        assert!(range.matches(5));
        assert!(range.matches(9));
    }

    #[test]
    fn test_parse_range_equal() {
        let range = RangeOp::parse(" 1 ").unwrap();
        assert!(range.matches(1));
        assert!(!range.matches(2));
    }

    #[test]
    fn test_parse_range_between() {
        let range = RangeOp::parse("2-4").unwrap();
        assert!(!range.matches(1));
        assert!(range.matches(2));
        assert!(range.matches(4));
        assert!(!range.matches(5));
    }

    #[test]
    fn test_parse_range_rejects_garbage() {
        assert!(RangeOp::parse("first").is_err());
        assert!(RangeOp::parse("4-2").is_err());
        assert!(RangeOp::parse("-1").is_err());
        assert!(RangeOp::parse("1-2-3").is_err());
    }

    #[test]
    fn test_parse_multiplier_plain() {
        assert_eq!(parse_multiplier(&RawValue::Number(2.0)), Some(2.0));
        assert_eq!(parse_multiplier(&RawValue::Text("1.5".to_string())), Some(1.5));
    }

    #[test]
    fn test_parse_multiplier_effect_notation() {
        assert_eq!(parse_multiplier(&RawValue::Text("x3".to_string())), Some(3.0));
        assert_eq!(parse_multiplier(&RawValue::Text("2X".to_string())), Some(2.0));
    }

    #[test]
    fn test_parse_multiplier_malformed() {
        assert_eq!(parse_multiplier(&RawValue::Text("abc".to_string())), None);
        assert_eq!(parse_multiplier(&RawValue::Text("".to_string())), None);
        assert_eq!(parse_multiplier(&RawValue::Number(0.0)), None);
        assert_eq!(parse_multiplier(&RawValue::Number(-2.0)), None);
    }
}
