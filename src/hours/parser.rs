//! Tolerant parser for the business-hours micro-format.

use log::trace;
use serde::{Deserialize, Serialize};

/// A parsed day-range plus minute-range window.
///
/// Days run Sunday = 0 through Saturday = 6 and never wrap the week
/// boundary: `start_day <= end_day` always holds, because reversed ranges
/// are dropped at parse time (they can contain no real weekday). Minutes
/// form a half-open interval `[start_minute, end_minute)`; a window whose
/// end does not exceed its start is malformed and is dropped at parse time.
/// Out-of-range hour or minute digits are kept as parsed — they can never
/// match a real clock value, which is the intended tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// First day of the window, 0–6, Sunday = 0.
    pub start_day: u8,
    /// Last day of the window, inclusive.
    pub end_day: u8,
    /// Minute of day the window opens.
    pub start_minute: u16,
    /// Minute of day the window closes (exclusive).
    pub end_minute: u16,
}

impl TimeWindow {
    /// Whether the given day-of-week and minute-of-day fall inside this
    /// window.
    pub fn contains(&self, day: u8, minute: u16) -> bool {
        day >= self.start_day
            && day <= self.end_day
            && minute >= self.start_minute
            && minute < self.end_minute
    }
}

/// Parse a raw hours string into its windows.
///
/// Pure and deterministic: the same input always yields the same windows,
/// in authoring order. Entries are separated by `;` or whitespace runs; a
/// day-range fragment (`週一-五`) may be separated from its time range by
/// whitespace, and the pair forms one unit — an invalid unit (unknown day
/// character, reversed day range, inverted minute span) is dropped whole,
/// never degraded to its bare time part. Anything that matches neither
/// grammar is skipped.
pub fn parse(raw: &str) -> Vec<TimeWindow> {
    let mut windows = Vec::new();

    for segment in raw.split(';') {
        let frags: Vec<&str> = segment.split_whitespace().collect();
        let mut i = 0;
        while i < frags.len() {
            let frag = frags[i];

            // A dangling day-range claims the following time fragment as
            // one unit, valid or not.
            if frag.starts_with('週') && !frag.contains(':') {
                if i + 1 < frags.len() && parse_time_range(frags[i + 1]).is_some() {
                    let joined = format!("{}{}", frag, frags[i + 1]);
                    match parse_token(&joined) {
                        Some(window) => windows.push(window),
                        None => trace!("skipping unusable hours entry: {:?}", joined),
                    }
                    i += 2;
                    continue;
                }
                trace!("skipping unrecognized hours fragment: {:?}", frag);
                i += 1;
                continue;
            }

            match parse_token(frag) {
                Some(window) => windows.push(window),
                None => trace!("skipping unrecognized hours token: {:?}", frag),
            }
            i += 1;
        }
    }

    windows
}

/// Parse a single token in either grammar. Returns `None` for malformed
/// tokens, including reversed day ranges and windows with a non-positive
/// minute span.
fn parse_token(token: &str) -> Option<TimeWindow> {
    let (start_day, end_day, time_part) = match token.strip_prefix('週') {
        Some(rest) => {
            let mut chars = rest.chars();
            let first = day_number(chars.next()?)?;
            if chars.next()? != '-' {
                return None;
            }
            let second = day_number(chars.next()?)?;
            // The week never wraps: a reversed range (週六-日) contains no
            // day at all and the whole window is dropped.
            if first > second {
                return None;
            }
            (first, second, chars.as_str())
        }
        None => (0, 6, token),
    };

    let (start_minute, end_minute) = parse_time_range(time_part)?;
    if end_minute <= start_minute {
        return None;
    }

    Some(TimeWindow {
        start_day,
        end_day,
        start_minute,
        end_minute,
    })
}

/// `HH:MM-HH:MM` with exactly two digits per field.
fn parse_time_range(s: &str) -> Option<(u16, u16)> {
    let (start, end) = s.split_once('-')?;
    Some((parse_hhmm(start)?, parse_hhmm(end)?))
}

fn parse_hhmm(s: &str) -> Option<u16> {
    let (hour, minute) = s.split_once(':')?;
    if hour.len() != 2 || minute.len() != 2 {
        return None;
    }
    if !hour.bytes().all(|b| b.is_ascii_digit()) || !minute.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour: u16 = hour.parse().ok()?;
    let minute: u16 = minute.parse().ok()?;
    Some(hour * 60 + minute)
}

fn day_number(day: char) -> Option<u8> {
    match day {
        '日' => Some(0),
        '一' => Some(1),
        '二' => Some(2),
        '三' => Some(3),
        '四' => Some(4),
        '五' => Some(5),
        '六' => Some(6),
        _ => None,
    }
}
