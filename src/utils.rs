// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use serde::Deserialize;

/// A price as it arrives from listing or booking data: a number or a
/// numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    /// Numeric value, or zero for anything unparseable or non-finite.
    pub fn value(&self) -> f64 {
        let parsed = match self {
            RawAmount::Number(n) => *n,
            RawAmount::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        };
        if parsed.is_finite() { parsed } else { 0.0 }
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        RawAmount::Number(value)
    }
}

impl From<i64> for RawAmount {
    fn from(value: i64) -> Self {
        RawAmount::Number(value as f64)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        RawAmount::Text(value.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(value: String) -> Self {
        RawAmount::Text(value)
    }
}

/// Insert a comma every three digits of an unsigned integer string.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        out.push(ch);
        let remaining = len - i - 1;
        if remaining > 0 && remaining % 3 == 0 {
            out.push(',');
        }
    }
    out
}

/// Format the magnitude of `value` with grouping and at most `max_decimals`
/// fractional digits. Trailing fractional zeros are dropped. Non-finite
/// values render as zero.
pub fn format_grouped(value: f64, max_decimals: u32) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    // Exact decimal expansion, so huge amounts keep their real digits.
    let fixed = format!("{:.*}", max_decimals as usize, value.abs());
    let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut out = group_thousands(int_part);
    let frac = frac.trim_end_matches('0');
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_amount_values() {
        assert_eq!(RawAmount::from(12.5).value(), 12.5);
        assert_eq!(RawAmount::from(" 1500 ").value(), 1500.0);
        assert_eq!(RawAmount::from("abc").value(), 0.0);
        assert_eq!(RawAmount::from("").value(), 0.0);
        assert_eq!(RawAmount::from("NaN").value(), 0.0);
        assert_eq!(RawAmount::from("inf").value(), 0.0);
        assert_eq!(RawAmount::from(-3i64).value(), -3.0);
    }

    #[test]
    fn test_raw_amount_deserializes_numbers_and_strings() {
        let n: RawAmount = serde_json::from_str("150000").unwrap();
        assert_eq!(n.value(), 150000.0);
        let s: RawAmount = serde_json::from_str("\"2500.75\"").unwrap();
        assert_eq!(s.value(), 2500.75);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
        assert_eq!(group_thousands("100000"), "100,000");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(1234.567, 2), "1,234.57");
        assert_eq!(format_grouped(1234.567, 0), "1,235");
        assert_eq!(format_grouped(1000.0, 2), "1,000");
        assert_eq!(format_grouped(12.5, 2), "12.5");
        assert_eq!(format_grouped(0.0, 2), "0");
        assert_eq!(format_grouped(0.005, 2), "0.01");
        assert_eq!(format_grouped(1034.4827586, 2), "1,034.48");
        assert_eq!(format_grouped(999.999, 2), "1,000");
    }

    #[test]
    fn test_format_grouped_beyond_u128() {
        let grouped = format_grouped(1e40, 2);
        assert!(!grouped.contains('.'));
        assert_eq!(grouped.replace(',', ""), format!("{:.0}", 1e40));
        assert!(grouped.starts_with("10,000,000,000,000,000,303"));

        let huge = format_grouped(1e300, 0);
        assert_eq!(huge.replace(',', "").len(), 301);
        assert!(huge.starts_with("1,000,000"));
    }

    #[test]
    fn test_format_grouped_non_finite() {
        assert_eq!(format_grouped(f64::INFINITY, 2), "0");
        assert_eq!(format_grouped(f64::NAN, 0), "0");
    }
}
