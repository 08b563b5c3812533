use math::error::ParseFieldElementError;
use thiserror::Error;

/// Result type specialized for recovery operations.
pub type Result<T> = std::result::Result<T, RecoveryError>;

/// Fatal conditions for a single reconstruction request.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecoveryError {
    #[error("Invalid threshold configuration: threshold {threshold} with {shares} shares")]
    InvalidThreshold { threshold: usize, shares: usize },
    #[error("Insufficient shares: need {required}, got {provided}")]
    InsufficientShares { required: usize, provided: usize },
    #[error("Invalid share index: {0}")]
    InvalidShareIndex(u64),
    #[error("Duplicate share index: {0}")]
    DuplicateShareIndex(u64),
    #[error("Degenerate interpolation: share {index} collides with another x-coordinate")]
    DegenerateInterpolation { index: u64 },
    #[error("C(n, k) = {count} combinations exceeds the configured limit of {limit}")]
    CombinationLimitExceeded { count: u128, limit: u64 },
    #[error("No majority: {candidates} candidates tie with {votes} votes each")]
    AmbiguousConsensus { votes: u64, candidates: usize },
}

/// Errors raised while decoding a share set document.
///
/// Individual malformed share entries are not errors; they are reported in
/// [`ShareSet::rejected`](crate::decode::ShareSet::rejected).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed share document")]
    Json(#[from] serde_json::Error),
    #[error("share document must be a JSON object")]
    NotAnObject,
    #[error("share document is missing a valid `keys.k` threshold")]
    MissingThreshold,
    #[error("failed to read share document")]
    Io(#[from] std::io::Error),
}

/// Why a single share entry was excluded during decoding.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("key `{0}` is not a positive integer index")]
    InvalidIndex(String),
    #[error("entry is not an object with `base` and `value`")]
    MalformedEntry,
    #[error("base `{0}` is not an integer")]
    InvalidBase(String),
    #[error("index {0} already present")]
    DuplicateIndex(u64),
    #[error(transparent)]
    Value(#[from] ParseFieldElementError),
}
