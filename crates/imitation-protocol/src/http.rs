use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub env: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct PoolCountResponse {
    pub count: usize,
}

#[derive(Debug, Deserialize, Default)]
pub struct PoolJoinRequest {
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PoolJoinResponse {
    pub ok: bool,
    pub token: String,
    pub created: bool,
    pub count: usize,
}

#[derive(Debug, Deserialize, Default)]
pub struct PoolLeaveRequest {
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Deserialize, Default)]
pub struct MatchRequestBody {
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchRequestResponse {
    pub ticket: String,
    pub expires_at: f64,
}

#[derive(Debug, Deserialize)]
pub struct MatchStatusQuery {
    pub ticket: String,
}

#[derive(Debug, Deserialize)]
pub struct MatchCancelBody {
    pub ticket: String,
}

/// `GET /match/status` response — one shape per matchmaker status branch.
/// Untagged because each branch's field set already disambiguates it once
/// `status` is read; keeps the client-visible JSON exactly as specified.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchStatusResponse {
    Pending {
        time_left: f64,
    },
    ReadyAi {
        ws_url: String,
        commit_hash: String,
        time_left: f64,
    },
    ReadyH2h {
        ws_url: String,
        commit_hash: String,
        time_left: f64,
    },
    Canceled,
    Gone,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}
