//! Decoding of JSON share documents into validated [`ShareRecord`]s.
//!
//! A document carries the threshold under `keys` and one entry per share,
//! keyed by the share index:
//!
//! ```json
//! {
//!     "keys": { "n": 4, "k": 3 },
//!     "1": { "base": "10", "value": "10" },
//!     "2": { "base": "2", "value": "11011" }
//! }
//! ```
//!
//! Entries that do not decode are skipped and listed in
//! [`ShareSet::rejected`]; only the document structure itself is fatal.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use math::field_element::FieldElement;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{DecodeError, RejectReason};
use crate::params::RecoveryParams;
use crate::share::ShareRecord;

const KEYS_FIELD: &str = "keys";

#[derive(Debug, Deserialize)]
struct RawShare {
    base: Value,
    value: String,
}

/// A share entry excluded during decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedEntry {
    pub key: String,
    pub reason: RejectReason,
}

/// The decoded contents of one share document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareSet {
    /// `keys.n`, informational only.
    pub declared_total: Option<usize>,
    /// `keys.k`.
    pub threshold: usize,
    /// Valid shares, ascending by index.
    pub shares: Vec<ShareRecord>,
    pub rejected: Vec<RejectedEntry>,
}

impl ShareSet {
    pub fn from_json_str(input: &str) -> Result<Self, DecodeError> {
        Self::from_value(serde_json::from_str(input)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DecodeError> {
        Self::from_value(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DecodeError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_value(document: Value) -> Result<Self, DecodeError> {
        let Value::Object(mut entries) = document else {
            return Err(DecodeError::NotAnObject);
        };

        let keys = entries
            .shift_remove(KEYS_FIELD)
            .ok_or(DecodeError::MissingThreshold)?;
        let (declared_total, threshold) = decode_keys(&keys)?;
        let (shares, rejected) = decode_entries(entries);

        debug!(
            threshold,
            ?declared_total,
            decoded = shares.len(),
            rejected = rejected.len(),
            "decoded share document"
        );

        Ok(Self {
            declared_total,
            threshold,
            shares,
            rejected,
        })
    }

    /// Default reconstruction parameters for this document's threshold.
    pub fn params(&self) -> RecoveryParams {
        RecoveryParams::new(self.threshold)
    }
}

fn decode_keys(keys: &Value) -> Result<(Option<usize>, usize), DecodeError> {
    let threshold = keys
        .get("k")
        .and_then(as_integer)
        .ok_or(DecodeError::MissingThreshold)?;
    let declared_total = keys.get("n").and_then(as_integer);
    Ok((declared_total, threshold))
}

/// Integers may appear as JSON numbers or as decimal strings.
fn as_integer<T: TryFrom<u64>>(value: &Value) -> Option<T> {
    let raw = match value {
        Value::Number(number) => number.as_u64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    T::try_from(raw).ok()
}

fn decode_entries(
    entries: Map<String, Value>,
) -> (Vec<ShareRecord>, Vec<RejectedEntry>) {
    let mut shares = Vec::with_capacity(entries.len());
    let mut rejected = Vec::new();
    let mut seen = HashSet::with_capacity(entries.len());

    for (key, entry) in entries {
        let decoded = decode_entry(&key, entry).and_then(|share| {
            if seen.insert(share.index()) {
                Ok(share)
            } else {
                Err(RejectReason::DuplicateIndex(share.index()))
            }
        });
        match decoded {
            Ok(share) => shares.push(share),
            Err(reason) => {
                debug!(key = %key, %reason, "skipping share entry");
                rejected.push(RejectedEntry { key, reason });
            }
        }
    }

    shares.sort_by_key(ShareRecord::index);
    (shares, rejected)
}

fn decode_entry(key: &str, entry: Value) -> Result<ShareRecord, RejectReason> {
    let index = key
        .parse::<u64>()
        .ok()
        .filter(|&index| index != 0)
        .ok_or_else(|| RejectReason::InvalidIndex(key.to_owned()))?;

    let raw: RawShare =
        serde_json::from_value(entry).map_err(|_| RejectReason::MalformedEntry)?;
    let base: u32 = as_integer(&raw.base)
        .ok_or_else(|| RejectReason::InvalidBase(raw.base.to_string()))?;
    let value = FieldElement::from_str_radix(&raw.value, base)?;

    ShareRecord::new(index, value)
        .map_err(|_| RejectReason::InvalidIndex(key.to_owned()))
}
