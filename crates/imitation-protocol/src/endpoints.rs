//! Endpoint name constants — mirrors the wire protocol's closed set of
//! routes so call sites never hand-roll a path string.

pub const HEALTH: &str = "/health";
pub const POOL_COUNT: &str = "/pool/count";
pub const POOL_JOIN: &str = "/pool/join";
pub const POOL_LEAVE: &str = "/pool/leave";
pub const MATCH_REQUEST: &str = "/match/request";
pub const MATCH_STATUS: &str = "/match/status";
pub const MATCH_CANCEL: &str = "/match/cancel";
pub const WS_MATCH: &str = "/ws/match";
pub const WS_PAIR: &str = "/ws/pair";
pub const WS_WAIT: &str = "/ws/wait";
