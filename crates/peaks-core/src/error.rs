/// Invalid input rejected by [`crate::detect`].
///
/// Every variant is a caller error; the detector never fails because a series
/// happens to contain no extrema.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectError {
    EmptySeries,
    NonFiniteSample { index: usize, value: f64 },
    InvalidThreshold(f64),
}

impl std::fmt::Display for DetectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySeries => write!(f, "invalid_input: series is empty"),
            Self::NonFiniteSample { index, value } => {
                write!(f, "invalid_input: sample {index} is not a finite number ({value})")
            }
            Self::InvalidThreshold(t) => {
                write!(f, "invalid_input: threshold must be a finite value >= 0 (got {t})")
            }
        }
    }
}

impl std::error::Error for DetectError {}
