use std::env;
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_PEER_TIMEOUT_SECS: u64 = 10;

/// Process settings, read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub peer_timeout: Duration,
    pub node_id: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = get("PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let peer_timeout_secs = get("PEER_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PEER_TIMEOUT_SECS);
        // Globally unique address for this node, used as the mining reward recipient.
        let node_id = get("NODE_ID")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string());

        Self {
            host,
            port,
            peer_timeout: Duration::from_secs(peer_timeout_secs),
            node_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use std::collections::HashMap;
    use std::time::Duration;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config_from(&[]);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.peer_timeout, Duration::from_secs(10));
        assert_eq!(cfg.node_id.len(), 32);
        assert!(!cfg.node_id.contains('-'));
    }

    #[test]
    fn overrides_and_bad_port() {
        let cfg = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "not-a-port"),
            ("PEER_TIMEOUT_SECS", "3"),
            ("NODE_ID", "miner-1"),
        ]);
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.peer_timeout, Duration::from_secs(3));
        assert_eq!(cfg.node_id, "miner-1");
    }
}
