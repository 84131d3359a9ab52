//! Address and place-name normalization.
//!
//! User input arrives in many shapes:
//! - Mixed case and punctuation: `"T. Nagar"`, `"t nagar"`
//! - Old or alternate city names: `"Bengaluru"`, `"Bombay"`
//! - Padded form fields: `"  Koramangala ,, Bangalore "`
//! - Placeholders: `"N/A"`, `"-"`
//!
//! [`normalize_name`] produces a comparison key for gazetteer lookups and
//! [`clean_address`] tidies free-form text before it is sent to a provider.

use regex::Regex;
use std::sync::LazyLock;

/// Runs of anything that is not a letter or digit.
static NON_ALNUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("valid regex"));

/// Runs of whitespace.
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Repeated commas, with any whitespace around them.
static COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:,\s*)+").expect("valid regex"));

/// Alternate spellings, keyed by normalized form.
static ALIASES: &[(&str, &str)] = &[
    ("bengaluru", "bangalore"),
    ("bombay", "mumbai"),
    ("madras", "chennai"),
    ("mysuru", "mysore"),
    ("mangaluru", "mangalore"),
    ("vizag", "visakhapatnam"),
    ("gurugram", "gurgaon"),
    ("nct of delhi", "delhi"),
    ("orissa", "odisha"),
    ("hitec city", "hitech city"),
];

/// Values that mean "no address".
static SKIP_PATTERNS: &[&str] = &["", "-", "NA", "N/A", "NONE", "UNKNOWN", "NOT AVAILABLE"];

/// Normalizes a place name into a comparison key.
///
/// Lowercases, turns punctuation and whitespace runs into single spaces,
/// and maps known alternate names to the gazetteer's spelling.
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let key = NON_ALNUM_RE.replace_all(&lower, " ");
    let key = key.trim();

    ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map_or_else(|| key.to_string(), |(_, canonical)| (*canonical).to_string())
}

/// Whether two place names refer to the same place.
#[must_use]
pub fn same_place(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}

/// Cleans a free-form address for geocoding.
///
/// Returns `None` if nothing geocodable is left.
#[must_use]
pub fn clean_address(raw: &str) -> Option<String> {
    let addr = WHITESPACE_RE.replace_all(raw.trim(), " ");
    let addr = COMMA_RE.replace_all(&addr, ", ");
    let addr = addr.trim_matches(|c: char| c == ',' || c.is_whitespace());

    if SKIP_PATTERNS
        .iter()
        .any(|p| addr.eq_ignore_ascii_case(p))
    {
        return None;
    }

    Some(addr.to_string())
}
