use actix_web::{HttpResponse, Responder, get, web};
use log::{info, warn};
use std::time::Instant;

use super::models::{AppState, ChainResponse, ErrorResponse, MineResponse};

/// Get the full chain.
#[get("/chain")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let resp = ChainResponse {
        chain: ledger.chain(),
        length: ledger.len(),
    };
    HttpResponse::Ok().json(resp)
}

/// Mine a new block from the pending pool:
/// - Search a proof on top of the last block
/// - Credit this node with the mining reward
/// - Link to the hash of the last block and append
///
/// The search runs on the blocking pool; the ledger is locked only to read the
/// tip and to append.
#[get("/mine")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let t0 = Instant::now();
    let worker = state.clone();
    let mined = web::block(move || worker.mine()).await;

    match mined {
        Ok(Some(block)) => {
            info!(
                "MINER - forged block #{} (proof={}, txs={}, {} ms)",
                block.index,
                block.proof,
                block.transactions.len(),
                t0.elapsed().as_millis()
            );
            HttpResponse::Ok().json(MineResponse {
                message: "New Block forged",
                block,
            })
        }
        Ok(None) => {
            warn!("MINER - proof search cancelled");
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new("Mining was cancelled"))
        }
        Err(e) => {
            warn!("MINER - blocking task failed: {e}");
            HttpResponse::InternalServerError().json(ErrorResponse::new("Mining failed"))
        }
    }
}
