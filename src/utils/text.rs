//! String casing and clean-up helpers used when listing artifacts

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;
use uuid::Uuid;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static SLUG_DISALLOWED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9_*\-]+").expect("valid regex"));
static DASHES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").expect("valid regex"));

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '…'];

/// Uppercase the first letter of the first word and lowercase the rest of
/// that word; later words are left alone ("HELLO WORLD" → "Hello WORLD").
pub fn capitalize(s: &str) -> String {
    match s.split_once(' ') {
        Some((first, rest)) => format!("{} {rest}", title_word(first)),
        None => title_word(s),
    }
}

/// Title-case every space separated word ("hello world" → "Hello World").
pub fn titleize(s: &str) -> String {
    s.split(' ').map(title_word).collect::<Vec<_>>().join(" ")
}

fn title_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Remove trailing sentence punctuation ("OMG?!?" → "OMG").
///
/// Closing brackets and quotes are kept.
pub fn trim_punct(s: &str) -> String {
    s.trim_end_matches(TRAILING_PUNCTUATION).to_string()
}

/// Drop a trailing parenthesised remark ("Razor 1911 (RZR, Razor)" → "Razor 1911").
pub fn trim_round_bracket(s: &str) -> String {
    match s.find('(') {
        Some(i) => s[..i].trim_end().to_string(),
        None => s.to_string(),
    }
}

/// Normalise a comma separated list: trimmed, capitalized, joined by ", ".
pub fn fmt_slice(s: &str) -> String {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Sorted, de-duplicated copy of `items`.
pub fn delete_dupe<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.as_ref().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Whether `name` is one of `names`.
pub fn finds<S: AsRef<str>>(name: &str, names: &[S]) -> bool {
    names.iter().any(|n| n.as_ref() == name)
}

/// Width in terminal columns of the widest line.
pub fn max_line_length(s: &str) -> usize {
    s.lines().map(UnicodeWidthStr::width).max().unwrap_or(0)
}

/// The last user-perceived character, ignoring trailing whitespace.
pub fn chr_last(s: &str) -> String {
    s.trim_end().graphemes(true).next_back().unwrap_or_default().to_string()
}

/// URL-safe slug for group and release names.
///
/// Hyphens become underscores, commas become `*` and `&` is spelled out so
/// that distinct names keep distinct slugs ("group1 & group2" →
/// "group1-ampersand-group2").
pub fn slug(s: &str) -> String {
    let folded: String = s
        .to_lowercase()
        .chars()
        .map(|c| fold_latin(c).map(str::to_string).unwrap_or_else(|| c.to_string()))
        .collect();

    let replaced = folded
        .replace('-', "_")
        .replace('&', " ampersand ")
        .replace(", ", "*")
        .replace(',', "*");
    let dashed = WHITESPACE_RE.replace_all(replaced.trim(), "-");
    let cleaned = SLUG_DISALLOWED_RE.replace_all(&dashed, "");
    let collapsed = DASHES_RE.replace_all(&cleaned, "-");
    collapsed.replace("-*", "*").replace("*-", "*").trim_matches('-').to_string()
}

/// ASCII spelling of lowercase Latin-1 letters.
fn fold_latin(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'æ' => "ae",
        'ç' => "c",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ð' => "d",
        'ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'ý' | 'ÿ' => "y",
        'þ' => "th",
        'ß' => "ss",
        _ => return None,
    };
    Some(folded)
}

/// Split a search query into comma separated terms.
pub fn search_term(s: &str) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }
    s.split(',').map(|term| term.trim().to_string()).collect()
}

/// Join the words of `s` with single spaces, spelling out abbreviated
/// words such as `Dir` ("HTTP Dir" → "HTTP Directory").
pub fn split_as_spaces(s: &str) -> String {
    s.split_whitespace()
        .map(|word| match word {
            "Dir" => "Directory",
            "Dirs" => "Directories",
            _ => word,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert a 35 character ColdFusion UUID (8-4-4-16) into the standard
/// 8-4-4-4-12 form. Standard UUIDs are validated and returned lowercased.
pub fn cf_uuid(s: &str) -> Result<String> {
    let invalid = || Error::InvalidUuid(s.to_string());
    let candidate = match s.len() {
        36 => s.to_string(),
        35 if s.is_ascii() && [8, 13, 18].iter().all(|&i| s.as_bytes()[i] == b'-') => {
            format!("{}-{}", &s[..23], &s[23..])
        }
        _ => return Err(invalid()),
    };
    let uuid = Uuid::parse_str(&candidate).map_err(|_| invalid())?;
    Ok(uuid.hyphenated().to_string())
}
