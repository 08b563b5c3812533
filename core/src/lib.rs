//! Recovery of threshold-shared secrets from share sets that may contain
//! corrupted or forged shares.
//!
//! Every k-subset of the decoded shares is interpolated at x = 0 over the
//! prime field of the `math` crate, and the value produced by the most
//! subsets is taken as the secret.

pub mod combinations;
pub mod consensus;
pub mod decode;
pub mod error;
pub mod interpolation;
pub mod params;
pub mod share;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use consensus::{
    reconstruct_secret, ConsensusReconstructor, ReconstructionResult, Tally,
};
pub use decode::{RejectedEntry, ShareSet};
pub use error::{DecodeError, RecoveryError, RejectReason, Result};
pub use params::RecoveryParams;
pub use share::ShareRecord;
