use super::{Block, GENESIS_PROOF, MINING_REWARD, PreviousHash, REWARD_SENDER, pow};
use crate::transaction::{Transaction, TransactionPool};

/// In-memory ledger: the chain plus the pool of pending transactions.
/// This is the only place the chain is mutated.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pool: TransactionPool,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Initialize a new ledger holding only the genesis block.
    pub fn new() -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            pool: TransactionPool::new(),
        };
        ledger.append(GENESIS_PROOF, PreviousHash::Genesis);
        ledger
    }

    /// Seal the pending pool into a new block and push it onto the chain.
    pub fn append(&mut self, proof: u64, previous_hash: PreviousHash) -> Block {
        let index = self.chain.len() as u64 + 1;
        let block = Block::new(index, self.pool.drain(), proof, previous_hash);
        self.chain.push(block.clone());
        block
    }

    /// Queue a transaction; returns the index of the block that will hold it.
    pub fn add_transaction(&mut self, tx: Transaction) -> u64 {
        self.pool.add(tx);
        self.last_block().index + 1
    }

    /// Credit `miner` and append a block sealed with `proof`, provided the
    /// chain still ends with `parent`, the block the proof was searched on.
    /// Returns `None` and changes nothing if the chain has moved on.
    pub fn seal(&mut self, parent: &Block, proof: u64, miner: &str) -> Option<Block> {
        if self.last_block() != parent {
            return None;
        }
        self.add_transaction(Transaction::new(REWARD_SENDER, miner, MINING_REWARD));
        let previous_hash = parent.compute_hash();
        Some(self.append(proof, PreviousHash::Block(previous_hash)))
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("Ledger should always have at least the genesis block")
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        self.pool.pending()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Overwrite the local chain wholesale. Callers validate first.
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        self.chain = chain;
    }

    /// Check proof-of-work continuity between every adjacent pair of blocks.
    ///
    /// `previous_hash` linkage is deliberately not re-derived here; peers
    /// agree on chains using only this check.
    pub fn validate_chain(chain: &[Block]) -> bool {
        if chain.is_empty() {
            return false;
        }
        chain
            .windows(2)
            .all(|pair| pow::valid_proof(pair[0].proof, pair[1].proof))
    }
}

#[cfg(test)]
mod tests {
    use super::Ledger;
    use crate::blockchain::{GENESIS_PROOF, MINING_REWARD, PreviousHash, REWARD_SENDER, pow};
    use crate::transaction::Transaction;

    /// Build a chain with known-good proofs without searching for them.
    fn ledger_with_proofs(proofs: &[u64]) -> Ledger {
        let mut ledger = Ledger::new();
        for &proof in proofs {
            let prev = ledger.last_block().compute_hash();
            ledger.append(proof, PreviousHash::Block(prev));
        }
        ledger
    }

    #[test]
    fn starts_with_genesis() {
        let ledger = Ledger::new();
        assert_eq!(ledger.len(), 1);
        let genesis = ledger.last_block();
        assert_eq!(genesis.index, 1);
        assert_eq!(genesis.proof, GENESIS_PROOF);
        assert_eq!(genesis.previous_hash, PreviousHash::Genesis);
        assert!(genesis.transactions.is_empty());
    }

    #[test]
    fn append_drains_pool() {
        let mut ledger = Ledger::new();
        let txs = vec![
            Transaction::new("alice", "bob", 3),
            Transaction::new("bob", "carol", 1),
        ];
        for tx in &txs {
            assert_eq!(ledger.add_transaction(tx.clone()), 2);
        }

        let block = ledger.append(35293, PreviousHash::Block("x".into()));
        assert_eq!(block.index, 2);
        assert_eq!(block.transactions, txs);
        assert!(ledger.pending().is_empty());
        assert_eq!(ledger.last_block(), &block);
    }

    #[test]
    fn seal_links_and_rewards() {
        let mut ledger = Ledger::new();
        ledger.add_transaction(Transaction::new("alice", "bob", 9));
        let parent = ledger.last_block().clone();
        let proof = pow::solve(parent.proof);

        let block = ledger.seal(&parent, proof, "node-a").unwrap();
        assert_eq!(block.index, 2);
        assert_eq!(block.proof, 35293);
        assert_eq!(block.previous_hash, PreviousHash::Block(parent.compute_hash()));
        assert_eq!(
            block.transactions.last(),
            Some(&Transaction::new(REWARD_SENDER, "node-a", MINING_REWARD))
        );
        assert_eq!(block.transactions.len(), 2);
        assert!(Ledger::validate_chain(ledger.chain()));
    }

    #[test]
    fn seal_on_stale_parent_leaves_ledger_untouched() {
        let mut ledger = Ledger::new();
        let parent = ledger.last_block().clone();
        ledger.replace_chain(ledger_with_proofs(&[35293]).chain().to_vec());
        ledger.add_transaction(Transaction::new("alice", "bob", 9));

        assert!(ledger.seal(&parent, 35293, "node-a").is_none());
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.pending().len(), 1);
    }

    #[test]
    fn validate_accepts_genesis_and_appended_chain() {
        assert!(Ledger::validate_chain(Ledger::new().chain()));
        let ledger = ledger_with_proofs(&[35293, 35089, 119678]);
        assert!(Ledger::validate_chain(ledger.chain()));
    }

    #[test]
    fn validate_rejects_broken_proof() {
        let ledger = ledger_with_proofs(&[35293, 12345, 119678]);
        assert!(!Ledger::validate_chain(ledger.chain()));
        assert!(!Ledger::validate_chain(&[]));
    }

    #[test]
    fn validate_ignores_hash_linkage() {
        let mut chain = ledger_with_proofs(&[35293, 35089]).chain().to_vec();
        chain[2].previous_hash = PreviousHash::Block("forged".into());
        assert!(Ledger::validate_chain(&chain));
    }

    #[test]
    fn replace_chain_overwrites() {
        let mut ledger = Ledger::new();
        let longer = ledger_with_proofs(&[35293, 35089]).chain().to_vec();
        ledger.replace_chain(longer.clone());
        assert_eq!(ledger.chain(), longer.as_slice());
        assert_eq!(ledger.add_transaction(Transaction::new("a", "b", 1)), 4);
    }
}
