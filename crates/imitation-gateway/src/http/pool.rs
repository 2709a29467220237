use axum::extract::State;
use axum::Json;
use imitation_core::types::PoolToken;
use imitation_protocol::http::{
    OkResponse, PoolCountResponse, PoolJoinRequest, PoolJoinResponse, PoolLeaveRequest,
};
use std::sync::Arc;

use crate::app::AppState;

pub async fn pool_count_handler(State(state): State<Arc<AppState>>) -> Json<PoolCountResponse> {
    Json(PoolCountResponse { count: state.pool.count() })
}

pub async fn pool_join_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<PoolJoinRequest>>,
) -> Json<PoolJoinResponse> {
    let token = body.and_then(|Json(b)| b.token).map(PoolToken::from);
    let (token, created) = state.pool.join(token);
    Json(PoolJoinResponse {
        ok: true,
        token: token.as_str().to_string(),
        created,
        count: state.pool.count(),
    })
}

pub async fn pool_leave_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<PoolLeaveRequest>>,
) -> Json<OkResponse> {
    if let Some(Json(b)) = body {
        if let Some(token) = b.token {
            state.pool.leave(&PoolToken::from(token));
        }
    }
    Json(OkResponse { ok: true })
}
