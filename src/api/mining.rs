use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{AppState, DifficultyResponse, MineRequest, MineResponse, SetDifficultyRequest};
use crate::blockchain::{MAX_DIFFICULTY, mine_block as mine};
use crate::error::LedgerError;

/// Mine a block carrying `data` on top of the current head.
///
/// The proof-of-work search runs on the blocking pool without holding the
/// chain lock; the result is appended afterwards under the lock. If another
/// block landed in the meantime the mined block no longer links and is
/// reported as a conflict.
#[post("/mine/")]
pub async fn mine_block(state: web::Data<AppState>, req: web::Json<MineRequest>) -> impl Responder {
    let MineRequest { data, difficulty } = req.into_inner();
    let difficulty = match difficulty {
        Some(d) if d > MAX_DIFFICULTY => {
            return HttpResponse::BadRequest()
                .body(format!("difficulty too high for dev mode (max {MAX_DIFFICULTY})"));
        }
        Some(d) => d,
        None => state.difficulty(),
    };

    let prev = match state.chain().latest_block() {
        Ok(block) => block.clone(),
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };

    let block = match web::block(move || mine(&data, &prev, difficulty, 0)).await {
        Ok(Ok(block)) => block,
        Ok(Err(e @ LedgerError::InvalidInput(_))) => {
            return HttpResponse::BadRequest().body(e.to_string());
        }
        Ok(Err(e)) => return HttpResponse::InternalServerError().body(e.to_string()),
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };

    let resp = MineResponse {
        mined_index: block.index(),
        hash: block.hash().to_string(),
        nonce: block.nonce(),
        difficulty,
    };
    if let Err(e) = state.chain().add_block_to_chain(block) {
        warn!("stale mined block #{}: {e}", resp.mined_index);
        return HttpResponse::Conflict().body(e.to_string());
    }

    info!(
        "MINER - sealed block #{} (hash={}, nonce={})",
        resp.mined_index, resp.hash, resp.nonce
    );
    HttpResponse::Ok().json(resp)
}

/// Get current PoW difficulty.
#[get("/difficulty/")]
pub async fn get_difficulty(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(DifficultyResponse {
        difficulty: state.difficulty(),
    })
}

/// Update PoW difficulty (affects future blocks only).
#[post("/difficulty/")]
pub async fn set_difficulty(
    state: web::Data<AppState>,
    body: web::Json<SetDifficultyRequest>,
) -> impl Responder {
    if body.difficulty > MAX_DIFFICULTY {
        return HttpResponse::BadRequest()
            .body(format!("difficulty too high for dev mode (max {MAX_DIFFICULTY})"));
    }
    state.set_difficulty(body.difficulty);
    HttpResponse::Ok().json(DifficultyResponse {
        difficulty: state.difficulty(),
    })
}
