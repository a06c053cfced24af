//! Keyword groups and value-shape tests used by the role rules.

use chrono::{NaiveDate, NaiveDateTime};

pub const IDENTIFIER_TOKENS: [&str; 2] = ["id", "identifier"];
pub const NAME_TOKENS: [&str; 1] = ["name"];
pub const ORGANIZATION_TOKENS: [&str; 3] = ["company", "organization", "organisation"];

/// Header tokens that mark a generic key column for the identifier bucket.
pub const IDENTIFIER_BUCKET_TOKENS: [&str; 4] = ["id", "identifier", "key", "number"];

pub const TARGET_KEYWORDS: [&str; 6] = ["status", "outcome", "result", "score", "won", "lost"];

pub const ENGAGEMENT_KEYWORDS: [&str; 14] = [
    "interaction",
    "login",
    "visit",
    "usage",
    "activity",
    "frequency",
    "seen",
    "engagement",
    "active",
    "session",
    "click",
    "view",
    "open",
    "response",
];
pub const ENGAGEMENT_TIME_TOKENS: [&str; 4] = ["date", "time", "timestamp", "datetime"];
pub const ENGAGEMENT_LEADS: [&str; 5] = ["last", "next", "recent", "frequency", "count"];

pub const FIRMOGRAPHIC_KEYWORDS: [&str; 15] = [
    "industry",
    "sector",
    "employee",
    "revenue",
    "company",
    "location",
    "country",
    "region",
    "size",
    "founded",
    "market",
    "segment",
    "annual",
    "headquarters",
    "org",
];
pub const FIRMOGRAPHIC_LEADS: [&str; 3] = ["company", "org", "business"];

pub const FEATURE_KEYWORDS: [&str; 4] = ["total", "amount", "ratio", "percent"];

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d", "%d.%m.%Y"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.fZ"];

/// Hyphenated, single alphanumeric run, or longer than 8 characters.
pub fn is_id_like(value: &str) -> bool {
    value.contains('-')
        || value.chars().all(|ch| ch.is_ascii_alphanumeric())
        || value.chars().count() > 8
}

/// Capitalised word, several words, punctuation typical of company names,
/// or simply longer than 3 characters.
pub fn is_name_like(value: &str) -> bool {
    has_capitalized_word(value)
        || value.contains(' ')
        || value.contains('.')
        || value.contains(',')
        || value.chars().count() > 3
}

/// An uppercase letter directly followed by a lowercase one.
fn has_capitalized_word(value: &str) -> bool {
    let chars: Vec<char> = value.chars().collect();
    chars
        .windows(2)
        .any(|pair| pair[0].is_ascii_uppercase() && pair[1].is_ascii_lowercase())
}

pub fn is_date_like(value: &str) -> bool {
    DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(value, fmt).is_ok())
        || DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
}

/// Digits with thousands separators or decimal points only.
pub fn is_plain_number(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|ch| ch.is_ascii_digit() || ch == ',' || ch == '.')
}
