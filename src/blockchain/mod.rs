pub mod block;
pub mod model;
pub mod pow;

pub use block::{Block, PreviousHash};
pub use model::Ledger;

/// Proof stored in the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// Wire value of the genesis block's `previous_hash`.
pub const GENESIS_PREVIOUS_HASH: u64 = 1;

/// Proof-of-Work difficulty (number of leading hex zeros). Fixed.
pub const DIFFICULTY: usize = 4;

/// Sender used for the mining reward transaction.
pub const REWARD_SENDER: &str = "0";

/// Amount credited to the miner for each block.
pub const MINING_REWARD: i64 = 1;
