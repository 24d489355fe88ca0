use thiserror::Error;

/// A supplier table that cannot be scored safely.
///
/// Row indices are zero-based positions in the input sequence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("supplier table is empty")]
    EmptyTable,

    #[error("row {row}: supplier name is empty")]
    EmptyName { row: usize },

    #[error("row {row}: duplicate supplier name '{name}'")]
    DuplicateName { row: usize, name: String },

    #[error("row {row} ({name}): cost must be positive, got {value}")]
    NonPositiveCost {
        row: usize,
        name: String,
        value: f64,
    },

    #[error("row {row} ({name}): quality must be within [0, 1], got {value}")]
    QualityOutOfRange {
        row: usize,
        name: String,
        value: f64,
    },

    #[error("row {row} ({name}): delivery must be within [0, 1], got {value}")]
    DeliveryOutOfRange {
        row: usize,
        name: String,
        value: f64,
    },

    #[error("row {row} ({name}): risk must be within (0, 1], got {value}")]
    RiskOutOfRange {
        row: usize,
        name: String,
        value: f64,
    },
}

/// Demand cannot be spread across the scored table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    #[error("cannot allocate demand over an empty table")]
    EmptyTable,

    #[error("cannot allocate: total score across the table is zero")]
    ZeroScoreSum,

    #[error("cannot allocate: demand must be non-negative, got {0}")]
    NegativeDemand(i64),
}
