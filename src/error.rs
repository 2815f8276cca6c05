//! Configuration errors
//!
//! The simulation itself never fails once built. Everything that can go
//! wrong is caught while settings are loaded or validated.

/// Settings could not be loaded or describe an unplayable field
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    /// The gap is at least as tall as the play area
    #[error("gap size {gap} does not fit in play height {height}")]
    GapTooLarge { gap: i32, height: i32 },

    /// Margins leave no room to place the gap
    #[error("no valid gap offset: height {height}, gap {gap}, margin {margin}")]
    EmptyGapRange { height: i32, gap: i32, margin: i32 },

    /// A size, rate or interval that must be positive
    #[error("{field} must be positive")]
    NonPositive { field: &'static str },

    /// A value that may be zero but not below it
    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    /// A tuning value that must be a finite number
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    /// No obstacle kinds to choose from
    #[error("obstacle kind pool is empty")]
    EmptyKindPool,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
