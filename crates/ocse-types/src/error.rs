use thiserror::Error;

use crate::scenario::ScenarioMode;

/// Errors the kernel and runner can surface.
///
/// Only [`OcseError::InvariantViolation`] aborts a run; the others are
/// recoverable or expected per the kernel's error-handling design: config
/// problems substitute a sane default, numeric overflow degrades to a
/// clamped display value with a diagnostic flag, and calibration-not-yet-
/// possible is an ordinary early-run state rather than a fault.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OcseError {
    #[error("unknown scenario mode: {0}")]
    UnknownScenarioMode(String),

    #[error("endYear ({end_year}) is before startYear ({start_year})")]
    InvalidYearRange { start_year: i32, end_year: i32 },

    #[error("missing strategy for year {year}; substituting BALANCED/medium")]
    MissingYearPlan { year: i32 },

    #[error("invariant violated at year {year} ({scenario}): {detail}")]
    InvariantViolation {
        year: i32,
        scenario: ScenarioMode,
        detail: String,
    },

    #[error("orbit cost calibration not yet possible at year {year}: compute_exportable is zero")]
    CalibrationNotYetPossible { year: i32 },

    #[error("raw metric exceeded its sanity cap at year {year} ({scenario}): {detail}")]
    NumericOverflow {
        year: i32,
        scenario: ScenarioMode,
        detail: String,
    },
}

impl OcseError {
    /// Whether this error kind is fatal to the run (aborts, leaving the
    /// already-written prefix of the debug store valid) or recoverable.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, OcseError::InvariantViolation { .. })
    }
}
