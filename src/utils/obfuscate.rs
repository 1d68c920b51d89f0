//! Reversible obfuscation of numeric record ids
//!
//! Compatible with the ids found in URLs of the legacy site: a two digit hex
//! checksum (digit sum + 154) followed by the hex of
//! `(10^digits + reversed_digits) XOR 461`. Only positive ids whose
//! intermediate value fits a signed 32-bit integer are obfuscated; anything
//! else passes through as its decimal string.

const CHECKSUM_OFFSET: u64 = 154;
const XOR_KEY: u64 = 461;

/// Obfuscate a record id (e.g. 1 → "9b1c6", 13526 → "ab27b2e").
pub fn obfuscate_id(key: i64) -> String {
    if key <= 0 {
        return key.to_string();
    }
    let digits = key.to_string();
    let reversed: String = digits.chars().rev().collect();
    let Ok(reversed) = reversed.parse::<u64>() else {
        return digits;
    };
    let Some(a) = 10u64.checked_pow(digits.len() as u32).and_then(|p| p.checked_add(reversed))
    else {
        return digits;
    };
    if a > i32::MAX as u64 {
        return digits;
    }
    let checksum = digit_sum(&digits) + CHECKSUM_OFFSET;
    format!("{checksum:x}{:x}", a ^ XOR_KEY)
}

/// Obfuscate a decimal string; anything that is not an integer is returned as is.
pub fn obfuscate(s: &str) -> String {
    match s.trim().parse::<i64>() {
        Ok(key) => obfuscate_id(key),
        Err(_) => s.to_string(),
    }
}

/// Reverse [`obfuscate`], returning the input unchanged when it does not
/// decode or fails its checksum.
pub fn deobfuscate(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.parse::<i64>().is_ok() {
        return trimmed.to_string();
    }
    decode(trimmed).unwrap_or_else(|| s.to_string())
}

fn decode(s: &str) -> Option<String> {
    if !s.is_ascii() || s.len() < 3 {
        return None;
    }
    let (checksum, body) = s.split_at(2);
    let checksum = u64::from_str_radix(checksum, 16).ok()?;
    let z = u64::from_str_radix(body, 16).ok()? ^ XOR_KEY;
    let z = z.to_string();
    let key: String = z[1..].chars().rev().collect();
    if key.is_empty() || digit_sum(&key) + CHECKSUM_OFFSET != checksum {
        return None;
    }
    Some(key)
}

/// Reverse [`obfuscate_id`], returning 0 for anything that is not a valid id.
pub fn deobfuscate_id(s: &str) -> i64 {
    deobfuscate(s).parse().unwrap_or(0)
}

/// Record id from the last path segment of a URL such as
/// `https://example.org/f/ab27b2e?x=1`; 0 when it does not decode.
pub fn deobfuscate_url(raw_url: &str) -> i64 {
    let end = raw_url.find(&['?', '#'][..]).unwrap_or(raw_url.len());
    let path = raw_url[..end].trim_end_matches('/');
    let segment = path.rsplit('/').next().unwrap_or_default();
    deobfuscate_id(segment)
}

fn digit_sum(digits: &str) -> u64 {
    digits.chars().filter_map(|c| c.to_digit(10)).map(u64::from).sum()
}
