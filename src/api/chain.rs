use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, info};
use serde_json::Value;

use super::models::{AppState, AppendResponse, ChainResponse, ReplaceResponse, ValidateResponse};
use crate::blockchain::{Block, is_valid_block_record};
use crate::error::LedgerError;

/// Get the full blockchain.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let bc = state.chain();
    HttpResponse::Ok().json(ChainResponse {
        length: bc.len(),
        chain: bc.chain(),
    })
}

/// Validate the whole chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let bc = state.chain();
    HttpResponse::Ok().json(ValidateResponse {
        valid: bc.is_valid(),
        length: bc.len(),
    })
}

/// Append a block mined elsewhere on top of the current head.
#[post("/blocks/")]
pub async fn add_block(state: web::Data<AppState>, body: web::Json<Value>) -> impl Responder {
    let block = match decode_record(body.into_inner()) {
        Ok(block) => block,
        Err(msg) => return HttpResponse::BadRequest().body(msg),
    };

    let mut bc = state.chain();
    match bc.add_block_to_chain(block) {
        Ok(chain) => {
            let length = chain.len();
            let head = &chain[length - 1];
            HttpResponse::Ok().json(AppendResponse {
                index: head.index(),
                hash: head.hash().to_string(),
                length,
            })
        }
        Err(e) => HttpResponse::BadRequest().body(e.to_string()),
    }
}

/// Offer a competing chain received from a peer. Fork choice: a valid,
/// strictly longer chain wins.
#[post("/chain/replace/")]
pub async fn replace_chain(
    state: web::Data<AppState>,
    body: web::Json<Vec<Value>>,
) -> impl Responder {
    let records = body.into_inner();
    let mut candidate = Vec::with_capacity(records.len());
    for (position, record) in records.into_iter().enumerate() {
        match decode_record(record) {
            Ok(block) => candidate.push(block),
            Err(msg) => {
                return HttpResponse::BadRequest().body(format!("record {position}: {msg}"));
            }
        }
    }

    let mut bc = state.chain();
    let reason = match bc.try_replace_chain(candidate) {
        Ok(()) => {
            info!("PEER - adopted chain of length {}", bc.len());
            None
        }
        Err(e @ (LedgerError::InvalidChain(_) | LedgerError::NotLonger { .. })) => {
            debug!("PEER - kept local chain: {e}");
            Some(e.to_string())
        }
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };
    HttpResponse::Ok().json(ReplaceResponse {
        replaced: reason.is_none(),
        length: bc.len(),
        reason,
    })
}

/* -------------------- Helpers -------------------- */

/// Shape-check a wire record, then decode it into a block.
fn decode_record(record: Value) -> Result<Block, String> {
    if !is_valid_block_record(&record) {
        return Err("malformed block record".to_string());
    }
    serde_json::from_value(record).map_err(|e| format!("undecodable block record: {e}"))
}
