use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use imitation_core::clock::now_ms;
use imitation_core::types::{PoolToken, TicketId};
use imitation_matchmaker::MatchStatus;
use imitation_protocol::http::{
    ErrorBody, ErrorDetail, MatchCancelBody, MatchRequestBody, MatchRequestResponse,
    MatchStatusQuery, MatchStatusResponse, OkResponse,
};
use std::sync::Arc;

use crate::app::AppState;

pub async fn request_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<MatchRequestBody>>,
) -> Json<MatchRequestResponse> {
    let token = body.and_then(|Json(b)| b.token).map(PoolToken::from);
    let ticket = state.matchmaker.request(token);
    let expires_at = now_ms() as f64 / 1000.0 + state.settings.matchmaker.match_window_secs;
    Json(MatchRequestResponse {
        ticket: ticket.as_str().to_string(),
        expires_at,
    })
}

pub async fn status_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MatchStatusQuery>,
) -> Json<MatchStatusResponse> {
    let ticket = TicketId::from(query.ticket.as_str());
    let status = state.matchmaker.status(&ticket);
    Json(match status {
        MatchStatus::Pending { time_left_secs } => MatchStatusResponse::Pending { time_left: time_left_secs },
        MatchStatus::ReadyAi { commit_hash, time_left_secs } => MatchStatusResponse::ReadyAi {
            ws_url: format!("/ws/match?ticket={}", query.ticket),
            commit_hash,
            time_left: time_left_secs,
        },
        MatchStatus::ReadyH2h { pair_id, commit_hash, time_left_secs } => MatchStatusResponse::ReadyH2h {
            ws_url: format!("/ws/pair?pair_id={}&ticket={}", pair_id.as_str(), query.ticket),
            commit_hash,
            time_left: time_left_secs,
        },
        MatchStatus::Canceled => MatchStatusResponse::Canceled,
        MatchStatus::Gone => MatchStatusResponse::Gone,
    })
}

pub async fn cancel_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<MatchCancelBody>, axum::extract::rejection::JsonRejection>,
) -> Result<Json<OkResponse>, (StatusCode, Json<ErrorBody>)> {
    let Json(body) = body.map_err(|_| malformed_body())?;
    let ticket = TicketId::from(body.ticket.as_str());
    state.matchmaker.cancel(&ticket);
    Ok(Json(OkResponse { ok: true }))
}

fn malformed_body() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: ErrorDetail {
                code: "PROTOCOL_ERROR",
                message: "malformed request body".to_string(),
            },
        }),
    )
}
