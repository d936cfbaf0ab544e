use reqwest::Url;
use std::collections::BTreeSet;

use super::PeerError;

/// Known peer nodes, stored as `host[:port]`.
///
/// Kept sorted so consensus visits peers in a stable order.
#[derive(Debug, Default)]
pub struct PeerRegistry {
    nodes: BTreeSet<String>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `address` and record its network location. Registering the same
    /// peer twice is a no-op. Returns the stored form.
    pub fn register(&mut self, address: &str) -> Result<String, PeerError> {
        let netloc = parse_netloc(address)?;
        self.nodes.insert(netloc.clone());
        Ok(netloc)
    }

    /// Register every address, or none of them if any fails to parse.
    pub fn register_all<S: AsRef<str>>(&mut self, addresses: &[S]) -> Result<(), PeerError> {
        let parsed = addresses
            .iter()
            .map(|a| parse_netloc(a.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        self.nodes.extend(parsed);
        Ok(())
    }

    pub fn nodes(&self) -> Vec<String> {
        self.nodes.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Extract `host[:port]` from a URL such as `http://10.0.0.1:5000/path`.
/// A bare `host:port` is accepted as if it had an `http://` scheme.
///
/// The URL is only parsed to reject malformed input; the stored text is the
/// authority exactly as written, so default ports and host case survive.
pub fn parse_netloc(address: &str) -> Result<String, PeerError> {
    let invalid = || PeerError::InvalidAddress(address.to_string());

    let address = address.trim();
    let full = if address.contains("://") {
        address.to_string()
    } else {
        format!("http://{address}")
    };

    let url = Url::parse(&full).map_err(|_| invalid())?;
    if url.host_str().filter(|h| !h.is_empty()).is_none() {
        return Err(invalid());
    }

    let (_, rest) = full.split_once("://").ok_or_else(invalid)?;
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let netloc = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    if netloc.is_empty() {
        return Err(invalid());
    }
    Ok(netloc.to_string())
}
