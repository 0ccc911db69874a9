//! Severity levels shared by every topic.
//!
//! Levels form the closed range `0..=MAX_LEVEL`. Thresholds are expressed on
//! the same scale extended by one: a threshold of `t` compiles levels `< t`,
//! so [`COMPILED_OUT_SENTINEL`] is the largest meaningful threshold.

use std::fmt;

use crate::error::{ConfigError, ConfigResult};

/// Lowest level. Its macro carries the topic name without a suffix.
pub const MIN_LEVEL: u8 = 0;

/// Highest level a call site may use.
pub const MAX_LEVEL: u8 = 3;

/// Threshold value forced on every topic outside debug builds.
pub const COMPILED_OUT_SENTINEL: u8 = MAX_LEVEL + 1;

/// A call-site severity within a topic. Higher values are more verbose.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Level(u8);

impl Level {
    /// The default severity, emitted under the bare topic macro name.
    pub const DEFAULT: Self = Self(MIN_LEVEL);

    /// Creates a level, returning `None` above [`MAX_LEVEL`].
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= MAX_LEVEL {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Returns the numeric level.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Iterates every level from [`MIN_LEVEL`] to [`MAX_LEVEL`].
    pub fn ascending() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (MIN_LEVEL..=MAX_LEVEL).map(Self)
    }

    /// Iterates every level from [`MAX_LEVEL`] down to [`MIN_LEVEL`], the
    /// order in which per-level blocks appear in the header.
    pub fn descending() -> impl Iterator<Item = Self> {
        Self::ascending().rev()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Checks that a threshold-scale value lies within `0..=COMPILED_OUT_SENTINEL`.
pub(crate) fn ensure_threshold(setting: &str, value: u8) -> ConfigResult<u8> {
    if value <= COMPILED_OUT_SENTINEL {
        Ok(value)
    } else {
        Err(ConfigError::LevelOutOfRange {
            setting: setting.to_owned(),
            value,
            max: COMPILED_OUT_SENTINEL,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_values_above_max() {
        assert_eq!(Level::new(MAX_LEVEL).map(Level::get), Some(MAX_LEVEL));
        assert!(Level::new(MAX_LEVEL + 1).is_none());
    }

    #[test]
    fn descending_starts_at_max_level() {
        let levels: Vec<u8> = Level::descending().map(Level::get).collect();
        assert_eq!(levels, vec![3, 2, 1, 0]);
    }

    #[test]
    fn sentinel_is_one_past_max_level() {
        assert_eq!(COMPILED_OUT_SENTINEL, 4);
        assert_eq!(Level::ascending().len(), usize::from(COMPILED_OUT_SENTINEL));
    }

    #[test]
    fn ensure_threshold_accepts_sentinel_and_rejects_beyond() {
        assert_eq!(ensure_threshold("x", COMPILED_OUT_SENTINEL).ok(), Some(4));
        let error = ensure_threshold("compile_out_threshold", 5).unwrap_err();
        assert!(matches!(
            error,
            ConfigError::LevelOutOfRange { value: 5, max: 4, .. }
        ));
        assert!(error.to_string().contains("compile_out_threshold"));
    }
}
