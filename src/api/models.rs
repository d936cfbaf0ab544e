use crate::blockchain::{Block, Ledger, pow};
use crate::network::{HttpChainFetcher, PeerRegistry};
use crate::transaction::Transaction;
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;

/// Per-process node context shared by every request handler.
///
/// The ledger lock covers both the chain and the pending pool and is only
/// ever held briefly. The proof search runs under the separate `miner` lock,
/// so one node never mines twice at once and readers never wait on a search.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
    pub miner: Mutex<()>,
    pub peers: Mutex<PeerRegistry>,
    pub fetcher: HttpChainFetcher,
    pub node_id: String,
    /// Raised on shutdown to abort an in-flight proof-of-work search.
    pub shutdown: AtomicBool,
}

impl AppState {
    pub fn new(node_id: String, fetcher: HttpChainFetcher) -> Self {
        Self {
            ledger: Mutex::new(Ledger::new()),
            miner: Mutex::new(()),
            peers: Mutex::new(PeerRegistry::new()),
            fetcher,
            node_id,
            shutdown: AtomicBool::new(false),
        }
    }

    /// Search a proof on top of the current last block and seal it.
    /// Blocking; run it off the async workers. If the chain is replaced
    /// mid-search the search restarts on the new tip. `None` means the search
    /// was cancelled through `shutdown`.
    pub fn mine(&self) -> Option<Block> {
        let _miner = self.miner.lock().expect("mutex poisoned");
        loop {
            let parent = self.ledger.lock().expect("mutex poisoned").last_block().clone();
            let proof = pow::solve_until(parent.proof, &self.shutdown)?;

            let mut ledger = self.ledger.lock().expect("mutex poisoned");
            if let Some(block) = ledger.seal(&parent, proof, &self.node_id) {
                return Some(block);
            }
            debug!("MINER - chain moved during search of block #{}, retrying", parent.index + 1);
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub chain: &'a [Block],
    pub length: usize,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub block: Block,
}

/* ---------- TX API Models ---------- */

/// All fields are optional so a missing one yields our own 400 body.
#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub amount: Option<i64>,
}

impl NewTxRequest {
    pub fn into_transaction(self) -> Option<Transaction> {
        Some(Transaction::new(self.sender?, self.recipient?, self.amount?))
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/* ---------- Node API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct RegisterNodesResponse {
    pub message: &'static str,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse<'a> {
    pub message: &'static str,
    pub chain: &'a [Block],
}
