pub mod client;
pub mod consensus;
pub mod error;
pub mod peers;

pub use client::{ChainFetcher, HttpChainFetcher, PeerChain};
pub use consensus::ConsensusResolver;
pub use error::{FetchError, PeerError};
pub use peers::PeerRegistry;
