// SPDX-License-Identifier: MIT OR Apache-2.0

//! The severity scale.
//!
//! A [`Level`] is a name paired with an integer rank.  Levels compare, hash and
//! order by rank alone, so a sink threshold check is a single integer comparison.

use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A severity level.
///
/// The fifteen named levels are associated constants.  Additional levels for the
/// generic "custom" entry points can be built with [`Level::custom`].
///
/// ```
/// use tierlog::Level;
///
/// assert!(Level::FINE < Level::TRACE);
/// assert!(Level::NOTICE > Level::INFO);
/// assert_eq!(Level::WARN.rank(), 60_000);
/// assert_eq!(Level::WARN.to_string(), "WARN");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Level {
    rank: u32,
    name: &'static str,
}

impl Level {
    /// Threshold sentinel below every level.  Also the result of an unresolvable level name.
    pub const ALL: Level = Level::custom(0, "ALL");
    pub const FINEST: Level = Level::custom(2_500, "FINEST");
    pub const FINER: Level = Level::custom(5_000, "FINER");
    pub const FINE: Level = Level::custom(7_500, "FINE");
    pub const VERBOSE: Level = Level::custom(10_000, "VERBOSE");
    pub const TRACE: Level = Level::custom(20_000, "TRACE");
    pub const DEBUG: Level = Level::custom(30_000, "DEBUG");
    pub const INFO: Level = Level::custom(40_000, "INFO");
    pub const NOTICE: Level = Level::custom(50_000, "NOTICE");
    pub const WARN: Level = Level::custom(60_000, "WARN");
    pub const ERROR: Level = Level::custom(70_000, "ERROR");
    pub const SEVERE: Level = Level::custom(80_000, "SEVERE");
    pub const CRITICAL: Level = Level::custom(90_000, "CRITICAL");
    pub const ALERT: Level = Level::custom(100_000, "ALERT");
    pub const FATAL: Level = Level::custom(110_000, "FATAL");
    pub const EMERGENCY: Level = Level::custom(120_000, "EMERGENCY");
    /// Threshold sentinel above every level.  Records are never emitted at this level.
    pub const OFF: Level = Level::custom(u32::MAX, "OFF");

    /// The named levels, least severe first.
    pub const STANDARD: [Level; 15] = [
        Level::FINEST,
        Level::FINER,
        Level::FINE,
        Level::VERBOSE,
        Level::TRACE,
        Level::DEBUG,
        Level::INFO,
        Level::NOTICE,
        Level::WARN,
        Level::ERROR,
        Level::SEVERE,
        Level::CRITICAL,
        Level::ALERT,
        Level::FATAL,
        Level::EMERGENCY,
    ];

    /// Creates a level with an arbitrary rank.
    ///
    /// The name is used for display only; two levels with the same rank are equal.
    pub const fn custom(rank: u32, name: &'static str) -> Self {
        Self { rank, name }
    }

    #[inline]
    pub const fn rank(&self) -> u32 {
        self.rank
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether a record at this level passes a sink configured with `threshold`.
    #[inline]
    pub const fn passes(&self, threshold: Level) -> bool {
        self.rank >= threshold.rank && self.rank != Level::OFF.rank
    }
}

impl PartialEq for Level {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank
    }
}

impl Eq for Level {}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

impl Hash for Level {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank.hash(state);
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::INFO
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name)
    }
}

/// Returned by [`Level::from_str`] when the text names no known level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level: {name:?}")]
pub struct ParseLevelError {
    name: String,
}

impl ParseLevelError {
    /// The rejected text, trimmed and lower-cased.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Strict, case-insensitive lookup.  Surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Level::STANDARD
            .iter()
            .chain([Level::ALL, Level::OFF].iter())
            .find(|level| level.name.eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| ParseLevelError {
                name: trimmed.to_ascii_lowercase(),
            })
    }
}

/// Resolves a configured level name, never failing.
///
/// Unknown names resolve to [`Level::ALL`] and leave a note on the diagnostic channel.
///
/// ```
/// use tierlog::{Level, level_from_name};
///
/// assert_eq!(level_from_name("  Warn "), Level::WARN);
/// assert_eq!(level_from_name("bogus"), Level::ALL);
/// ```
pub fn level_from_name(name: impl AsRef<str>) -> Level {
    match name.as_ref().parse::<Level>() {
        Ok(level) => level,
        Err(e) => {
            crate::sys::diagnostic(format_args!("Unknown log level: {}", e.name()));
            Level::ALL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::*;

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn standard_levels_strictly_increase() {
        for pair in Level::STANDARD.windows(2) {
            assert!(pair[0] < pair[1], "{} should be below {}", pair[0], pair[1]);
        }
        assert!(Level::ALL < Level::FINEST);
        assert!(Level::EMERGENCY < Level::OFF);
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn documented_ordering_holds_pairwise() {
        let ordered = [
            Level::FINEST,
            Level::FINER,
            Level::FINE,
            Level::TRACE,
            Level::DEBUG,
            Level::INFO,
            Level::NOTICE,
            Level::WARN,
            Level::ERROR,
            Level::SEVERE,
            Level::CRITICAL,
            Level::ALERT,
            Level::FATAL,
            Level::EMERGENCY,
        ];
        for (i, lower) in ordered.iter().enumerate() {
            for higher in &ordered[i + 1..] {
                assert!(lower < higher);
                assert!(higher > lower);
                assert_ne!(lower, higher);
            }
        }
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn lookup_is_case_insensitive_and_trimmed() {
        assert_eq!(level_from_name("WARN"), Level::WARN);
        assert_eq!(level_from_name("warn"), Level::WARN);
        assert_eq!(level_from_name("  Warn "), Level::WARN);
        assert_eq!(level_from_name("Emergency"), Level::EMERGENCY);
        assert_eq!(level_from_name("finest"), Level::FINEST);
        assert_eq!(level_from_name("off"), Level::OFF);
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn unknown_names_resolve_to_all() {
        assert_eq!(level_from_name("bogus"), Level::ALL);
        assert_eq!(level_from_name(""), Level::ALL);
        assert_eq!(level_from_name("warning"), Level::ALL);
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn strict_parse_reports_the_name() {
        let err = " Bogus ".parse::<Level>().unwrap_err();
        assert_eq!(err.name(), "bogus");
        assert_eq!(err.to_string(), "unknown log level: \"bogus\"");
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn custom_levels_compare_by_rank() {
        let audit = Level::custom(65_000, "AUDIT");
        assert!(audit > Level::WARN && audit < Level::ERROR);
        assert_eq!(Level::custom(60_000, "ALSO_WARN"), Level::WARN);
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn threshold_passing() {
        assert!(Level::ERROR.passes(Level::WARN));
        assert!(Level::WARN.passes(Level::WARN));
        assert!(!Level::INFO.passes(Level::WARN));
        assert!(Level::FINEST.passes(Level::ALL));
        assert!(!Level::EMERGENCY.passes(Level::OFF));
        assert!(!Level::OFF.passes(Level::ALL));
    }
}
