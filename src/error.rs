use thiserror::Error;

/// Everything that can go wrong between a facelet string and a solution.
#[derive(Error, Debug)]
pub enum Error {
    #[error("cube verification failed: {0}")]
    CubeVerificationFailed(#[from] VerifyError),
    #[error("no solution found before the deadline")]
    SolvingTimeout,
    #[error("facelet string must be 54 characters: {0:?}")]
    FaceletInvalidLength(String),
    #[error("invalid facelet character {0:?} at index {1}")]
    FaceletInvalidCharacter(char, usize),
    #[error("table file contains invalid data")]
    TablesLoadInvalidData,
    #[error("failed to read table file")]
    TablesLoadFailed(#[source] std::io::Error),
    #[error("failed to write table file")]
    TablesSaveFailed(#[source] std::io::Error),
}

/// Invariant violations detected by [`CubieCube::verify`](crate::CubieCube::verify).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    #[error("not all edges appear exactly once")]
    NotAllEdgesUnique,
    #[error("not all corners appear exactly once")]
    NotAllCornersUnique,
    #[error("edge orientations do not sum to 0 mod 2")]
    EdgeOrientationInvalid,
    #[error("corner orientations do not sum to 0 mod 3")]
    CornerOrientationInvalid,
    #[error("edge permutation parity differs from corner permutation parity")]
    ParityMismatch,
}
