use thiserror::Error;

/// Failures at the edges of the library: parsing user input and decoding
/// stored logs. The load calculators themselves never fail.
#[derive(Debug, Error)]
pub enum BarlogError {
    #[error("invalid date `{0}` (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("invalid set `{0}` (expected WEIGHTxREPS or WEIGHTxREPS+REPS...)")]
    InvalidSet(String),

    #[error("rep count {0} is outside the rep-max table (1-10)")]
    RepsOutOfRange(u32),

    #[error("invalid weight {0}")]
    InvalidWeight(f64),

    #[error("unknown 1RM formula `{0}`")]
    UnknownFormula(String),
}

pub type Result<T> = std::result::Result<T, BarlogError>;
