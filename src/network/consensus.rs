use futures_util::future::join_all;
use log::{debug, info, warn};
use std::sync::Mutex;

use super::ChainFetcher;
use crate::blockchain::{Block, Ledger};

/// Longest-valid-chain rule: adopt the longest peer chain that is longer
/// than ours and passes [`Ledger::validate_chain`].
pub struct ConsensusResolver<'a, F> {
    fetcher: &'a F,
}

impl<'a, F: ChainFetcher> ConsensusResolver<'a, F> {
    pub fn new(fetcher: &'a F) -> Self {
        Self { fetcher }
    }

    /// Query every peer and replace the local chain if a better one exists.
    /// Returns `true` when the chain was replaced.
    ///
    /// Peers are fetched concurrently without holding the ledger lock. Peers
    /// that fail to answer are skipped.
    pub async fn resolve(&self, ledger: &Mutex<Ledger>, peers: &[String]) -> bool {
        let local_len = ledger.lock().expect("mutex poisoned").len();

        let results = join_all(peers.iter().map(|p| self.fetcher.fetch_chain(p))).await;

        let mut max_length = local_len;
        let mut best: Option<Vec<Block>> = None;
        for (peer, result) in peers.iter().zip(results) {
            let candidate = match result {
                Ok(c) => c,
                Err(e) => {
                    warn!("CONSENSUS - skipping peer {peer}: {e}");
                    continue;
                }
            };
            debug!("CONSENSUS - peer {peer} reports length {}", candidate.length);

            if candidate.length > max_length && Ledger::validate_chain(&candidate.chain) {
                max_length = candidate.length;
                best = Some(candidate.chain);
            }
        }

        let Some(chain) = best else {
            return false;
        };

        let mut ledger = ledger.lock().expect("mutex poisoned");
        // Our own chain may have grown while peers were being queried.
        if max_length <= ledger.len() {
            debug!("CONSENSUS - local chain grew to {} meanwhile", ledger.len());
            return false;
        }
        info!(
            "CONSENSUS - replacing chain of length {} with length {}",
            ledger.len(),
            chain.len()
        );
        ledger.replace_chain(chain);
        true
    }
}
