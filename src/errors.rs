use std::fmt;

#[derive(Debug)]
pub enum ScoreError {
    /// Tile/flower notation could not be parsed.
    Parse { input: String, message: String },
    /// A hand violates the 1-pair + 5-meld structural invariant.
    InvalidHand { message: String },
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::Parse { input, message } => {
                write!(f, "Parse error on '{}': {}", input, message)
            }
            ScoreError::InvalidHand { message } => {
                write!(f, "Invalid hand: {}", message)
            }
        }
    }
}

impl std::error::Error for ScoreError {}

pub type ScoreResult<T> = Result<T, ScoreError>;
