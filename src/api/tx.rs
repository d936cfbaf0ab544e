use actix_web::{HttpResponse, Responder, post, web};
use log::{debug, warn};

use super::models::{AppState, ErrorResponse, MessageResponse, NewTxRequest};

/// Queue a transaction for the next mined block. No signature or balance
/// checks are made; only the presence of every field.
#[post("/transactions/new")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let Some(tx) = body.into_inner().into_transaction() else {
        warn!("POST /transactions/new - rejected: missing values");
        return HttpResponse::BadRequest().json(ErrorResponse::new("Missing values"));
    };

    let index = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        let index = ledger.add_transaction(tx.clone());
        debug!(
            "POST /transactions/new - {} -> {} ({}) queued for block {} (pending: {})",
            tx.sender,
            tx.recipient,
            tx.amount,
            index,
            ledger.pending().len()
        );
        index
    };

    HttpResponse::Created().json(MessageResponse {
        message: format!("Transaction will be added to Block {index}"),
    })
}
