// src/normalize.rs
// Plain-text rendering of Productive rich-text fields

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

// Static literal patterns; compilation cannot fail.

/// Any markup tag
#[allow(clippy::expect_used)]
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag regex"));

/// Mention reference span with its JSON payload
#[allow(clippy::expect_used)]
static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<span[^>]*data-mention='([^']*)'[^>]*>.*?</span>").expect("mention regex")
});

/// Strip markup tags and decode the handful of entities Productive emits,
/// then trim surrounding whitespace. Plain text passes through unchanged.
pub fn strip_markup(text: &str) -> String {
    let without_tags = TAG_RE.replace_all(text, "");
    without_tags
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

/// Productive's editor embeds mentions as
/// `<span data-mention='{"id": ..., "label": ...}'>...</span>`. Collapse each
/// one to `@label` so downstream keyword matching sees the mention marker.
/// References whose payload does not parse, or has no label, stay verbatim.
/// Text without mention spans comes back unchanged.
pub fn collapse_mentions(text: &str) -> String {
    MENTION_RE
        .replace_all(text, |caps: &regex::Captures| {
            let replaced = serde_json::from_str::<serde_json::Value>(&caps[1])
                .ok()
                .and_then(|payload| {
                    payload
                        .get("label")
                        .and_then(|label| label.as_str())
                        .map(|label| format!("@{}", label))
                });
            replaced.unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Truncate to a display budget, counting characters. A truncated result is
/// exactly `max` characters and ends with `...`; budgets of 3 or less
/// collapse to the ellipsis alone.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Coarse human label for how long ago a timestamp was
pub fn relative_age(timestamp: DateTime<Utc>) -> String {
    relative_age_at(timestamp, Utc::now())
}

/// `relative_age` against an explicit now, split out for tests. Buckets are
/// whole-day differences; anything 60 days or older renders as a calendar
/// date.
pub fn relative_age_at(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - timestamp).num_days();
    match days {
        i64::MIN..=0 => "today".to_string(),
        1 => "1 day ago".to_string(),
        2..=6 => format!("{} days ago", days),
        7..=13 => "1 week ago".to_string(),
        14..=29 => format!("{} weeks ago", days / 7),
        30..=59 => "1 month ago".to_string(),
        _ => timestamp.format("%b %-d, %Y").to_string(),
    }
}
