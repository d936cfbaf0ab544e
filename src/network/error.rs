/// Failure to obtain a usable chain from a peer. Never surfaced to clients;
/// the resolver logs it and moves on to the next peer.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("peer answered with status {0}")]
    Status(u16),
    #[error("malformed chain payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PeerError {
    #[error("Invalid node address: {0}")]
    InvalidAddress(String),
}
