use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;
use std::io;
use std::sync::atomic::Ordering;

use lame_chain::api::{self, AppState};
use lame_chain::config::Config;
use lame_chain::network::HttpChainFetcher;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = Config::from_env();
    let fetcher = HttpChainFetcher::new(config.peer_timeout).map_err(io::Error::other)?;

    info!(
        "⛓️ Starting node {} at http://{}:{}",
        config.node_id, config.host, config.port
    );

    let state = web::Data::new(AppState::new(config.node_id.clone(), fetcher));
    let server_state = state.clone();

    let result = HttpServer::new(move || {
        App::new()
            .app_data(server_state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await;

    // Stop any proof-of-work search still running on the blocking pool.
    state.shutdown.store(true, Ordering::Relaxed);
    result
}
