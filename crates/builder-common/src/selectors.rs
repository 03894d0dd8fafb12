use std::env;

use crate::constants::variables;

/// The three opaque selectors that pick which sub-actions to probe.
///
/// The values are interpolated as path segments without validation; a
/// selector that names no existing directory simply yields a candidate that
/// is not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    /// Platform selector (`RUNS_ON`).
    pub runs_on: String,

    /// Toolchain selector (`TOOLCHAIN`).
    pub toolchain: String,

    /// Preset selector (`PRESET`).
    pub preset: String,
}

impl Selectors {
    pub fn new(
        runs_on: impl Into<String>,
        toolchain: impl Into<String>,
        preset: impl Into<String>,
    ) -> Self {
        Self {
            runs_on: runs_on.into(),
            toolchain: toolchain.into(),
            preset: preset.into(),
        }
    }

    /// Read the selectors from the process environment.
    ///
    /// An unset variable becomes an empty selector, which can never match an
    /// existing candidate directory. The "nothing found" outcome stays a
    /// clean success either way.
    pub fn from_env() -> Self {
        Self {
            runs_on: env::var(variables::RUNS_ON).unwrap_or_default(),
            toolchain: env::var(variables::TOOLCHAIN).unwrap_or_default(),
            preset: env::var(variables::PRESET).unwrap_or_default(),
        }
    }
}
