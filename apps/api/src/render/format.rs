//! Field formatters: dates, hyperlinks, list entries, contact links, truncation.
//!
//! Every formatter takes possibly-absent input and returns a defined fallback,
//! so section generators never branch on malformed fields themselves.

use std::borrow::Cow;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::models::loose::{DateRange, Text, TextList};
use crate::render::blocks::Channel;
use crate::render::escape::escape;

/// Shown in place of an end date for ongoing engagements.
pub const PRESENT: &str = "Present";

/// Suffix appended to truncated descriptions.
const ELLIPSIS: &str = "...";

// ────────────────────────────────────────────────────────────────────────────
// Dates
// ────────────────────────────────────────────────────────────────────────────

/// A parsed date at the precision the input carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DateValue {
    Year(i32),
    Month(NaiveDate),
}

impl DateValue {
    pub fn year(self) -> i32 {
        match self {
            DateValue::Year(y) => y,
            DateValue::Month(d) => d.year(),
        }
    }

    /// Sort key: a bare year sorts as January of that year.
    pub fn sort_key(self) -> NaiveDate {
        match self {
            DateValue::Year(y) => NaiveDate::from_ymd_opt(y, 1, 1).unwrap_or(NaiveDate::MIN),
            DateValue::Month(d) => d,
        }
    }
}

/// Month-precision layouts. `%B` also accepts the abbreviated name.
const MONTH_FORMATS: &[&str] = &[
    "%Y-%m",
    "%Y/%m",
    "%m/%Y",
    "%m-%Y",
    "%B %Y",
    "%B, %Y",
];

/// Full-date layouts, tried after the month layouts.
const DAY_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
];

/// Parses the date shapes LLM extraction tends to emit. `None` for anything else.
///
/// The year must have four digits: chrono's `%Y` takes any digit count, so
/// "Jan 2019" would otherwise also read as day 20 of year 19.
pub fn parse_date(raw: &str) -> Option<DateValue> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let four_digit = |d: &NaiveDate| (1000..=9999).contains(&d.year());

    let timestamp = DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .ok()
        .filter(four_digit);
    // chrono needs a day, so month layouts are matched against "01 <input>".
    let month = || {
        let padded = format!("01 {s}");
        MONTH_FORMATS
            .iter()
            .filter_map(|fmt| NaiveDate::parse_from_str(&padded, &format!("%d {fmt}")).ok())
            .find(four_digit)
    };
    let day = || {
        DAY_FORMATS
            .iter()
            .filter_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .find(four_digit)
    };
    if let Some(d) = timestamp.or_else(month).or_else(day) {
        return Some(DateValue::Month(d));
    }

    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse().ok().filter(|y| *y >= 1000).map(DateValue::Year);
    }
    None
}

/// Formats a date as `Jan 2021` (or `2021` for a bare year); `fallback` when absent or unparsable.
pub fn format_date(value: &Text, fallback: &str) -> String {
    match value.get().and_then(parse_date) {
        Some(DateValue::Month(d)) => d.format("%b %Y").to_string(),
        Some(DateValue::Year(y)) => y.to_string(),
        None => fallback.to_string(),
    }
}

/// `start -- end`, with "Present" for ongoing ranges. `None` when both sides are empty,
/// so callers omit the clause instead of printing a dangling separator.
pub fn date_range(range: &DateRange) -> Option<String> {
    let start = format_date(&range.start, "");
    let end = if range.is_ongoing() {
        PRESENT.to_string()
    } else {
        format_date(&range.end, "")
    };

    match (start.is_empty(), end.is_empty()) {
        (true, true) => None,
        (false, true) => Some(start),
        (true, false) => Some(end),
        (false, false) => Some(format!("{start} -- {end}")),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Links
// ────────────────────────────────────────────────────────────────────────────

/// `\href{url}{text}` when both are present; escaped `text` alone when the URL is
/// missing; `""` when the text is missing.
pub fn link(text: Option<&str>, url: Option<&str>) -> String {
    match (text, url.map(str::trim).filter(|u| !u.is_empty())) {
        (Some(text), Some(url)) => format!("\\href{{{}}}{{{}}}", escape_url(url), escape(text)),
        (Some(text), None) => escape(text),
        (None, _) => String::new(),
    }
}

/// `link` over two `Text` fields.
pub fn link_text(text: &Text, url: &Text) -> String {
    link(text.get(), url.get())
}

/// Prepares a URL for the first argument of `\href`.
///
/// URLs are machine addresses, so most characters pass through. `%` and `#` are
/// prefixed (hyperref expects that inside macro arguments). Characters that would
/// unbalance groups, split a tabular cell or vanish as whitespace are percent-encoded.
pub fn escape_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.trim().chars() {
        match c {
            '%' => out.push_str("\\%"),
            '#' => out.push_str("\\#"),
            '\\' => out.push_str("\\%5C"),
            '{' => out.push_str("\\%7B"),
            '}' => out.push_str("\\%7D"),
            '~' => out.push_str("\\%7E"),
            '&' => out.push_str("\\%26"),
            c if c.is_whitespace() || c.is_control() => out.push_str("\\%20"),
            c => out.push(c),
        }
    }
    out
}

/// Drops a leading `http://` / `https://` and trailing slash for display.
pub fn strip_scheme(url: &str) -> &str {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    rest.strip_suffix('/').unwrap_or(rest)
}

fn has_scheme(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// The URL a contact channel points at.
///
/// Email, phone and location are never linked, even with an explicit `link`.
/// For web profiles an explicit `link` wins; otherwise one is derived from the value.
pub fn contact_url(channel: Channel, value: &str, link: Option<&str>) -> Option<String> {
    if matches!(channel, Channel::Email | Channel::Phone | Channel::Location) {
        return None;
    }
    if let Some(link) = link.map(str::trim).filter(|l| !l.is_empty()) {
        return Some(link.to_string());
    }

    let value = value.trim();
    if has_scheme(value) {
        return Some(value.to_string());
    }

    match channel {
        Channel::Email | Channel::Phone | Channel::Location => None,
        Channel::Linkedin | Channel::Portfolio => Some(format!("https://{value}")),
        Channel::Orcid => Some(format!("https://orcid.org/{value}")),
        Channel::Researchgate => Some(format!("https://researchgate.net/profile/{value}")),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lists
// ────────────────────────────────────────────────────────────────────────────

/// Escapes each present item.
pub fn escaped_items(items: &TextList) -> Vec<String> {
    items.iter().map(escape).collect()
}

/// `\item`-per-line list body; `""` for an empty list.
pub fn list(items: &TextList) -> String {
    list_entries(&escaped_items(items))
}

/// `\item`-per-line list body over already-escaped entries.
pub fn list_entries(entries: &[String]) -> String {
    entries
        .iter()
        .map(|entry| format!("  \\item {entry}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escapes the items of `list` and joins them with `sep`; `None` for an empty list.
pub fn joined(items: &TextList, sep: &str) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        Some(escaped_items(items).join(sep))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Truncation
// ────────────────────────────────────────────────────────────────────────────

/// Cuts `text` to at most `limit` characters (ellipsis included) on a char boundary.
pub fn truncate(text: &str, limit: Option<usize>) -> Cow<'_, str> {
    let Some(limit) = limit else {
        return Cow::Borrowed(text);
    };
    if text.chars().count() <= limit {
        return Cow::Borrowed(text);
    }

    // Too short for an ellipsis to fit alongside any text: hard cut.
    if limit <= ELLIPSIS.len() {
        return Cow::Owned(text.chars().take(limit).collect());
    }

    let cut: String = text.chars().take(limit - ELLIPSIS.len()).collect();
    Cow::Owned(format!("{}{ELLIPSIS}", cut.trim_end()))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
