use chrono::Utc;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::GENESIS_PREVIOUS_HASH;
use crate::transaction::Transaction;

/// Link from a block to its predecessor.
///
/// The genesis block has no predecessor; on the wire it carries the integer
/// sentinel `1`, which can never collide with a hex digest string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviousHash {
    Genesis,
    Block(String),
}

impl Serialize for PreviousHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PreviousHash::Genesis => serializer.serialize_u64(GENESIS_PREVIOUS_HASH),
            PreviousHash::Block(h) => serializer.serialize_str(h),
        }
    }
}

impl<'de> Deserialize<'de> for PreviousHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Hash(String),
            Sentinel(u64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Hash(h) => Ok(PreviousHash::Block(h)),
            Raw::Sentinel(GENESIS_PREVIOUS_HASH) => Ok(PreviousHash::Genesis),
            Raw::Sentinel(other) => Err(de::Error::custom(format!(
                "unexpected previous_hash sentinel {other}"
            ))),
        }
    }
}

/// A single block in the ledger. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64, // seconds since epoch (UTC)
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: PreviousHash,
}

impl Block {
    /// Build a block stamped with the current wall-clock time.
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: PreviousHash,
    ) -> Self {
        Self {
            index,
            timestamp: now_secs(),
            transactions,
            proof,
            previous_hash,
        }
    }

    /// SHA-256 over the canonical JSON form of the block (object keys sorted
    /// by name at every level), hex encoded.
    pub fn compute_hash(&self) -> String {
        let value = serde_json::to_value(self).expect("serialize block");
        let preimage = serde_json::to_vec(&canonical(value)).expect("serialize block");
        let mut hasher = Sha256::new();
        hasher.update(&preimage);
        hex::encode(hasher.finalize())
    }
}

/// Rebuild every JSON object with its keys in ascending order.
fn canonical(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (k, v) in entries {
                sorted.insert(k, canonical(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonical).collect()),
        other => other,
    }
}

fn now_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
