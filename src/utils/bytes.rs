//! Byte-count and number formatting

use crate::error::{Error, Result};

const UNITS: &[u8] = b"kMGTPE";

/// Format a size using powers of 1024 in a compact form (e.g. 1048576 → "1M").
///
/// Values below one kibibyte, negative values included, are printed as bytes.
pub fn byte_count(b: i64) -> String {
    const UNIT: i64 = 1024;
    if b < UNIT {
        return format!("{b}B");
    }
    let (div, exp) = scale(b, UNIT);
    format!("{:.0}{}", b as f64 / div as f64, char::from(UNITS[exp]))
}

/// Format a size using powers of 1000 with one decimal (e.g. 1073741823 → "1.1 GB").
///
/// A trailing ".0" is dropped, so 1024 prints as "1 kB".
pub fn byte_count_float(b: i64) -> String {
    const UNIT: i64 = 1000;
    if b < UNIT {
        return format!("{b} bytes");
    }
    let (div, exp) = scale(b, UNIT);
    let value = format!("{:.1}", b as f64 / div as f64);
    let value = value.strip_suffix(".0").unwrap_or(&value);
    format!("{value} {}B", char::from(UNITS[exp]))
}

fn scale(b: i64, unit: i64) -> (i64, usize) {
    let mut div = unit;
    let mut exp = 0;
    let mut n = b / unit;
    while n >= unit && exp + 1 < UNITS.len() {
        div *= unit;
        exp += 1;
        n /= unit;
    }
    (div, exp)
}

/// Number of pages needed to show `sum` items `limit` at a time.
pub fn page_count(sum: i64, limit: i64) -> u64 {
    if sum <= 0 || limit <= 0 {
        return 0;
    }
    sum.div_euclid(limit) as u64 + u64::from(sum % limit != 0)
}

/// Reverse the decimal digits of `i` (e.g. 123456 → 654321).
pub fn reverse_int(i: u64) -> Result<u64> {
    let reversed: String = i.to_string().chars().rev().collect();
    reversed.parse().map_err(|_| Error::InvalidNumber(reversed))
}

/// Format a number with thousands separators (e.g. 1048576 → "1,048,576").
pub fn format_with_commas(n: u64) -> String {
    let s = n.to_string();
    let bytes = s.as_bytes();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, &b) in bytes.iter().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(b as char);
    }
    result
}
