//! Majority-vote reconstruction over every k-subset of the available shares.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use math::prelude::*;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::combinations::{binomial, CombinationIndices};
use crate::error::{RecoveryError, Result};
use crate::interpolation::{interpolate_at, interpolate_at_zero};
use crate::params::{validate_threshold_config, RecoveryParams};
use crate::share::ShareRecord;
use crate::traits::PointSource;

/// Votes collected by one candidate secret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub votes: u64,
    /// Lexicographic rank of the first combination that produced this value.
    pub first_seen: u64,
    /// Positions (into the index-sorted share list) of that combination.
    witness: Vec<usize>,
}

/// Per-candidate vote counts for one reconstruction request.
///
/// Tallies built over disjoint rank ranges combine with [`Tally::merge`],
/// which is associative and commutative.
#[derive(Clone, Debug, Default)]
pub struct Tally {
    candidates: HashMap<FieldElement, Candidate>,
    total: u64,
}

impl Tally {
    pub fn record(&mut self, secret: FieldElement, rank: u64, positions: &[usize]) {
        match self.candidates.entry(secret) {
            Entry::Occupied(mut entry) => {
                let candidate = entry.get_mut();
                candidate.votes += 1;
                if rank < candidate.first_seen {
                    candidate.first_seen = rank;
                    candidate.witness = positions.to_vec();
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(Candidate {
                    votes: 1,
                    first_seen: rank,
                    witness: positions.to_vec(),
                });
            }
        }
        self.total += 1;
    }

    #[must_use]
    pub fn merge(mut self, other: Tally) -> Tally {
        // Fold the smaller map into the larger one.
        let (mut into, from) = if self.candidates.len() >= other.candidates.len() {
            (std::mem::take(&mut self), other)
        } else {
            (other, self)
        };

        for (secret, incoming) in from.candidates {
            match into.candidates.entry(secret) {
                Entry::Occupied(mut entry) => {
                    let candidate = entry.get_mut();
                    candidate.votes += incoming.votes;
                    if incoming.first_seen < candidate.first_seen {
                        candidate.first_seen = incoming.first_seen;
                        candidate.witness = incoming.witness;
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(incoming);
                }
            }
        }
        into.total += from.total;
        into
    }

    /// Sum of all votes, i.e. the number of combinations evaluated.
    pub fn total_votes(&self) -> u64 {
        self.total
    }

    pub fn votes_for(&self, secret: &FieldElement) -> u64 {
        self.candidates.get(secret).map_or(0, |c| c.votes)
    }

    pub fn candidate(&self, secret: &FieldElement) -> Option<&Candidate> {
        self.candidates.get(secret)
    }

    /// Number of distinct candidate secrets.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidates ordered by votes (descending), ties by `first_seen`
    /// (ascending). The head of this list is the reconstructed secret.
    pub fn into_ranked(self) -> Vec<(FieldElement, Candidate)> {
        let mut ranked: Vec<_> = self.candidates.into_iter().collect();
        ranked.sort_by(|(_, a), (_, b)| {
            b.votes.cmp(&a.votes).then(a.first_seen.cmp(&b.first_seen))
        });
        ranked
    }
}

/// Final output of one reconstruction request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconstructionResult {
    /// The majority candidate.
    pub secret: FieldElement,
    /// Every other distinct value produced by some combination.
    pub false_secrets: BTreeSet<FieldElement>,
    pub votes: u64,
    /// Votes of the strongest competing candidate, 0 when unanimous.
    pub runner_up_votes: u64,
    pub combinations_evaluated: u64,
    /// Indices of shares that do not lie on the polynomial through the
    /// first combination that produced `secret`.
    pub suspect_indices: Vec<u64>,
}

impl ReconstructionResult {
    /// Every combination agreed.
    pub fn is_unanimous(&self) -> bool {
        self.false_secrets.is_empty()
    }

    /// The winner strictly outvoted every other candidate.
    pub fn is_decisive(&self) -> bool {
        self.votes > self.runner_up_votes
    }
}

/// Recovers a secret from shares some of which may be corrupted, by
/// interpolating every k-subset and taking the most frequent result.
///
/// Shares are enumerated in ascending index order. When several candidates
/// tie for the most votes, the one produced by the lexicographically first
/// combination wins (see [`Tally::into_ranked`]); with
/// [`RecoveryParams::require_decisive_majority`] a tie is an error instead.
///
/// # Soundness
///
/// The vote is only trustworthy while the C(n − c, k) subsets made purely of
/// genuine shares (c = number of corrupted shares) outnumber the votes any
/// single forged value can collect. This is not checked; a corrupted
/// plurality yields a wrong secret. [`ReconstructionResult::is_decisive`] and
/// the suspect list are the available diagnostics.
#[derive(Clone, Debug)]
pub struct ConsensusReconstructor {
    params: RecoveryParams,
}

impl ConsensusReconstructor {
    pub fn new(params: RecoveryParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RecoveryParams {
        &self.params
    }

    /// Reconstruct the secret and collect the competing candidates.
    pub fn reconstruct(
        &self,
        shares: &[ShareRecord],
    ) -> Result<ReconstructionResult> {
        let ordered = self.prepare(shares)?;
        let tally = self.tally_ordered(&ordered)?;
        let combinations_evaluated = tally.total_votes();

        let mut ranked = tally.into_ranked().into_iter();
        let (secret, winner) =
            ranked.next().ok_or(RecoveryError::InsufficientShares {
                required: self.params.threshold,
                provided: ordered.len(),
            })?;
        let rest: Vec<_> = ranked.collect();
        let runner_up_votes = rest.first().map_or(0, |(_, c)| c.votes);

        if runner_up_votes == winner.votes {
            let tied = 1 + rest
                .iter()
                .take_while(|(_, c)| c.votes == winner.votes)
                .count();
            if self.params.require_decisive_majority {
                return Err(RecoveryError::AmbiguousConsensus {
                    votes: winner.votes,
                    candidates: tied,
                });
            }
            warn!(
                votes = winner.votes,
                candidates = tied,
                "no strict majority; taking the first candidate in enumeration order"
            );
        }

        let witness: Vec<&ShareRecord> =
            winner.witness.iter().map(|&i| ordered[i]).collect();
        let suspect_indices = find_suspects(&ordered, &witness)?;

        info!(
            votes = winner.votes,
            combinations = combinations_evaluated,
            false_secrets = rest.len(),
            suspects = suspect_indices.len(),
            "secret reconstructed"
        );

        Ok(ReconstructionResult {
            secret,
            false_secrets: rest.into_iter().map(|(value, _)| value).collect(),
            votes: winner.votes,
            runner_up_votes,
            combinations_evaluated,
            suspect_indices,
        })
    }

    /// Interpolate every k-subset and count the results.
    pub fn tally(&self, shares: &[ShareRecord]) -> Result<Tally> {
        let ordered = self.prepare(shares)?;
        self.tally_ordered(&ordered)
    }

    /// Validate the request and sort the shares by index.
    fn prepare<'a>(
        &self,
        shares: &'a [ShareRecord],
    ) -> Result<Vec<&'a ShareRecord>> {
        let threshold = self.params.threshold;
        if threshold == 0 {
            return Err(RecoveryError::InvalidThreshold {
                threshold,
                shares: shares.len(),
            });
        }
        if !validate_threshold_config(threshold, shares.len()) {
            return Err(RecoveryError::InsufficientShares {
                required: threshold,
                provided: shares.len(),
            });
        }

        let mut ordered: Vec<&ShareRecord> = shares.iter().collect();
        ordered.sort_by_key(|share| share.index());
        if let Some(pair) =
            ordered.windows(2).find(|w| w[0].index() == w[1].index())
        {
            return Err(RecoveryError::DuplicateShareIndex(pair[0].index()));
        }
        Ok(ordered)
    }

    fn tally_ordered(&self, ordered: &[&ShareRecord]) -> Result<Tally> {
        let k = self.params.threshold;
        let limit = self.params.max_combinations;
        let count = match binomial(ordered.len(), k) {
            Some(count) if count <= u128::from(limit) => count as u64,
            other => {
                return Err(RecoveryError::CombinationLimitExceeded {
                    count: other.unwrap_or(u128::MAX),
                    limit,
                })
            }
        };

        debug!(
            shares = ordered.len(),
            threshold = k,
            combinations = count,
            "tallying share combinations"
        );

        if self.params.parallel && count >= self.params.parallel_threshold {
            tally_parallel(ordered, k, count)
        } else {
            tally_range(ordered, k, 0, count)
        }
    }
}

/// Reconstruct with default parameters for the given threshold.
pub fn reconstruct_secret(
    shares: &[ShareRecord],
    threshold: usize,
) -> Result<ReconstructionResult> {
    ConsensusReconstructor::new(RecoveryParams::new(threshold)).reconstruct(shares)
}

/// Tally the `len` combinations starting at lexicographic rank `start`.
fn tally_range(
    shares: &[&ShareRecord],
    k: usize,
    start: u64,
    len: u64,
) -> Result<Tally> {
    let mut cursor =
        CombinationIndices::starting_at(shares.len(), k, u128::from(start));
    let mut tally = Tally::default();
    let mut subset: Vec<&ShareRecord> = Vec::with_capacity(k);

    for rank in start..start + len {
        let Some(positions) = cursor.advance() else {
            break;
        };
        subset.clear();
        subset.extend(positions.iter().map(|&i| shares[i]));
        let secret = interpolate_at_zero(&subset)?;
        tally.record(secret, rank, positions);
    }
    Ok(tally)
}

/// Split the rank space into chunks, tally each on the rayon pool and
/// merge the partial tallies.
fn tally_parallel(shares: &[&ShareRecord], k: usize, count: u64) -> Result<Tally> {
    let workers = rayon::current_num_threads().max(1) as u64;
    let chunk = count.div_ceil(workers * 4).max(1);
    let starts: Vec<u64> = (0..count).step_by(chunk as usize).collect();

    debug!(chunks = starts.len(), chunk, "parallel tally");

    starts
        .into_par_iter()
        .map(|start| tally_range(shares, k, start, chunk.min(count - start)))
        .try_reduce(Tally::default, |a, b| Ok(a.merge(b)))
}

/// Shares whose value disagrees with the polynomial through `witness`.
fn find_suspects(
    shares: &[&ShareRecord],
    witness: &[&ShareRecord],
) -> Result<Vec<u64>> {
    let mut suspects = Vec::new();
    for share in shares {
        let expected = interpolate_at(witness, &share.x())?;
        if &expected != share.value() {
            suspects.push(share.index());
        }
    }
    Ok(suspects)
}
