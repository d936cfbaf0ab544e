use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{
    AppState, ErrorResponse, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse,
};
use crate::network::ConsensusResolver;

/// Add peers to this node's registry.
#[post("/nodes/register")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> impl Responder {
    let Some(nodes) = body.into_inner().nodes else {
        warn!("POST /nodes/register - rejected: missing node list");
        return HttpResponse::BadRequest().json(ErrorResponse::new("Missing list of nodes"));
    };

    let mut peers = state.peers.lock().expect("mutex poisoned");
    if let Err(e) = peers.register_all(&nodes) {
        warn!("POST /nodes/register - rejected: {e}");
        return HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()));
    }
    info!("PEERS - registered {} address(es), {} known", nodes.len(), peers.len());

    HttpResponse::Created().json(RegisterNodesResponse {
        message: "New nodes have been added",
        total_nodes: peers.nodes(),
    })
}

/// Run consensus against every known peer.
#[get("/nodes/resolve")]
pub async fn resolve_nodes(state: web::Data<AppState>) -> impl Responder {
    let peers = state.peers.lock().expect("mutex poisoned").nodes();

    let replaced = ConsensusResolver::new(&state.fetcher)
        .resolve(&state.ledger, &peers)
        .await;

    let ledger = state.ledger.lock().expect("mutex poisoned");
    let message = if replaced {
        "Our chain was replaced"
    } else {
        "Our chain is authoritative"
    };
    HttpResponse::Ok().json(ResolveResponse {
        message,
        chain: ledger.chain(),
    })
}
