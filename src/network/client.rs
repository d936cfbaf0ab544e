use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

use super::FetchError;
use crate::blockchain::Block;

/// Body of `GET /chain`, as served by every node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerChain {
    pub chain: Vec<Block>,
    pub length: usize,
}

/// Source of candidate chains for consensus.
pub trait ChainFetcher {
    fn fetch_chain(&self, peer: &str) -> impl Future<Output = Result<PeerChain, FetchError>>;
}

/// Fetches `http://{peer}/chain` with a bounded timeout.
#[derive(Clone)]
pub struct HttpChainFetcher {
    client: Client,
}

impl HttpChainFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
        })
    }
}

impl ChainFetcher for HttpChainFetcher {
    async fn fetch_chain(&self, peer: &str) -> Result<PeerChain, FetchError> {
        let resp = self.client.get(format!("http://{peer}/chain")).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{ChainFetcher, HttpChainFetcher};
    use crate::api::{AppState, init_routes};
    use crate::network::FetchError;
    use actix_web::{App, HttpResponse, HttpServer, web};
    use std::time::Duration;

    #[actix_web::test]
    async fn fetches_and_classifies_peer_answers() {
        let fetcher = HttpChainFetcher::new(Duration::from_secs(5)).unwrap();
        let state = web::Data::new(AppState::new("peer".into(), fetcher.clone()));

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .configure(init_routes)
                .route(
                    "/garbage/chain",
                    web::get().to(|| async { HttpResponse::Ok().body("{not json") }),
                )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        let peer = fetcher.fetch_chain(&addr.to_string()).await.unwrap();
        assert_eq!(peer.length, 1);
        assert_eq!(peer.chain.len(), 1);
        assert_eq!(peer.chain[0].proof, 100);

        let garbage = fetcher.fetch_chain(&format!("{addr}/garbage")).await;
        assert!(matches!(garbage, Err(FetchError::Malformed(_))));

        let missing = fetcher.fetch_chain(&format!("{addr}/missing")).await;
        assert!(matches!(missing, Err(FetchError::Status(404))));

        let closed = fetcher.fetch_chain("127.0.0.1:1").await;
        assert!(matches!(closed, Err(FetchError::Http(_))));

        handle.stop(true).await;
    }
}
