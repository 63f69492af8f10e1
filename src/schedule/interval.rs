//! Frequency phrase → dose interval.
//!
//! Free-text frequency phrases overlap ("twice daily" contains "daily"), so
//! parsing walks a fixed sequence of layers and the first match wins:
//!
//! 1. literal compound phrases ("twice daily", "four times a day", ...)
//! 2. "every N hours" / "every N days"
//! 3. "<count> time(s) a day" with a digit or once/twice/thrice count
//! 4. anything else containing "daily" or "every day"
//! 5. fallback: 24 hours, logged as unrecognized
//!
//! Reordering these layers changes the result for phrases that satisfy more
//! than one of them; the tests pin the ordering through the matched rule.

use std::sync::LazyLock;

use chrono::Duration;
use regex::Regex;

/// Which parsing layer produced an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyRule {
    /// Layer 1: literal compound phrase.
    LiteralDaily,
    /// Layer 2: "every N hours" / "every N days".
    EveryInterval,
    /// Layer 3: "<count> time(s) a day".
    TimesPerDay,
    /// Layer 4: generic "daily" / "every day".
    GenericDaily,
    /// Layer 5: nothing matched, 24-hour default.
    Fallback,
}

impl FrequencyRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LiteralDaily => "literal_daily",
            Self::EveryInterval => "every_interval",
            Self::TimesPerDay => "times_per_day",
            Self::GenericDaily => "generic_daily",
            Self::Fallback => "fallback",
        }
    }
}

/// The gap between doses, derived statelessly from a frequency phrase.
/// Never persisted — recomputed from the stored phrase whenever needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyInterval {
    pub every: Duration,
    pub rule: FrequencyRule,
}

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Layer 1 phrases, checked by substring before any general pattern so
/// that e.g. "twice daily" is not parsed as a generic "daily".
const LITERAL_DAILY: &[(&str, i64)] = &[
    ("twice daily", 12),
    ("thrice daily", 8),
    ("once daily", 24),
    ("four times a day", 6),
];

static EVERY_N: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"every\s*(\d+)\s*(hour|day)s?").unwrap());

static TIMES_A_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+|once|twice|thrice)\s*(?:time|times)?\s*a\s*day").unwrap());

/// Parse a frequency phrase into a dose interval. Total: every phrase maps
/// to a usable interval, 24 hours when nothing matches.
pub fn parse_frequency(phrase: &str) -> FrequencyInterval {
    let freq = phrase.trim().to_lowercase();

    for (literal, hours) in LITERAL_DAILY {
        if freq.contains(literal) {
            return FrequencyInterval {
                every: Duration::hours(*hours),
                rule: FrequencyRule::LiteralDaily,
            };
        }
    }

    if let Some(caps) = EVERY_N.captures(&freq) {
        let n: i64 = caps[1].parse().unwrap_or(0);
        // "every 0 hours" is not a schedule; fall through to later layers.
        if n > 0 {
            let every = if &caps[2] == "hour" {
                Duration::hours(n)
            } else {
                Duration::days(n)
            };
            return FrequencyInterval {
                every,
                rule: FrequencyRule::EveryInterval,
            };
        }
    }

    if let Some(caps) = TIMES_A_DAY.captures(&freq) {
        let count: i64 = match &caps[1] {
            "once" => 1,
            "twice" => 2,
            "thrice" => 3,
            digits => digits.parse().unwrap_or(0),
        };
        if count > 0 {
            // Second resolution keeps non-divisor counts exact enough
            // for the persisted timestamp precision.
            return FrequencyInterval {
                every: Duration::seconds(SECONDS_PER_DAY / count),
                rule: FrequencyRule::TimesPerDay,
            };
        }
    }

    if freq.contains("daily") || freq.contains("every day") {
        return FrequencyInterval {
            every: Duration::hours(24),
            rule: FrequencyRule::GenericDaily,
        };
    }

    if !freq.is_empty() {
        tracing::warn!(
            phrase,
            "unrecognized frequency phrase, defaulting to a 24-hour interval"
        );
    }
    FrequencyInterval {
        every: Duration::hours(24),
        rule: FrequencyRule::Fallback,
    }
}

/// Interval for a possibly-absent phrase. An absent or blank phrase takes
/// the 24-hour default without the unrecognized-phrase warning.
pub fn interval_for(phrase: Option<&str>) -> Duration {
    match phrase {
        Some(p) if !p.trim().is_empty() => parse_frequency(p).every,
        _ => Duration::hours(24),
    }
}
