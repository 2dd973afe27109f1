//! Range expander: turns day and day-range keys into one entry per weekday.

use crate::domain::model::{Day, ExpandedMap, RawRecord};
use once_cell::sync::Lazy;
use regex::Regex;

/// Range endpoints, in walking order. Weekend positions never produce an entry.
pub const RANGE_DAYS: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

/// One or more chained `day-day` segments anchored at the start of the key.
/// Groups 1 and 2 hold the leading segment, which is the only one expanded.
static RANGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let day = "sun|mon|tue|wed|thu|fri|sat";
    let pattern = format!(r"^(?:({day})-({day}))(?:(?:{day})-(?:{day})){{0,6}}");
    Regex::new(&pattern).expect("range pattern is a valid regex")
});

pub fn is_range_key(key: &str) -> bool {
    RANGE_PATTERN.is_match(key)
}

/// Start and end token of the leading range segment, if `key` is a range.
pub fn leading_segment(key: &str) -> Option<(&str, &str)> {
    let caps = RANGE_PATTERN.captures(key)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Weekdays covered by `start..=end` in the seven-day order.
///
/// Ascending only: when `start` comes after `end` (`fri-mon`) nothing is returned.
pub fn expand_range(start: &str, end: &str) -> Vec<Day> {
    let position = |token: &str| RANGE_DAYS.iter().position(|d| *d == token);
    let (Some(start), Some(end)) = (position(start), position(end)) else {
        return Vec::new();
    };

    (start..=end)
        .filter_map(|i| Day::from_token(RANGE_DAYS[i]))
        .collect()
}

/// Builds the weekday → value map. Keys that are neither a weekday nor a range are dropped.
///
/// Keys are applied in record order, so a later key overrides an earlier one for the same day.
pub fn expand(record: RawRecord) -> ExpandedMap {
    let mut expanded = ExpandedMap::new();

    for (key, value) in record {
        if let Some(day) = Day::from_token(&key) {
            expanded.insert(day, value);
            continue;
        }

        match leading_segment(&key) {
            Some((start, end)) => {
                let days = expand_range(start, end);
                if days.is_empty() {
                    tracing::debug!("range '{}' covers no weekdays", key);
                }
                for day in days {
                    expanded.insert(day, value.clone());
                }
            }
            None => tracing::trace!("ignoring column '{}'", key),
        }
    }

    expanded
}
