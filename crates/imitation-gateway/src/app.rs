use axum::extract::ws::WebSocket;
use dashmap::DashMap;
use imitation_core::config::Settings;
use imitation_core::types::{PairId, Side};
use imitation_llm::GenerateReply;
use imitation_matchmaker::Matchmaker;
use imitation_pool::PoolRegistry;
use imitation_session::ConversationLogSink;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

/// One leg of an H2H pair waiting at `/ws/pair` for its peer to attach.
/// The second leg to arrive hands its raw socket over `tx`; the first leg
/// then owns both sockets and drives the session.
pub struct PairWaiter {
    pub side: Side,
    pub tx: oneshot::Sender<WebSocket>,
}

/// Central shared state, handed to every Axum handler as `Arc<AppState>`.
pub struct AppState {
    pub settings: Settings,
    pub pool: PoolRegistry,
    pub matchmaker: Matchmaker,
    pub llm: Option<Arc<dyn GenerateReply>>,
    pub conversation_log: ConversationLogSink,
    pub app_version: String,
    /// Legs of `/ws/pair` connections waiting for their peer to attach.
    pub pair_waiters: DashMap<PairId, PairWaiter>,
    /// Tripped on shutdown signal; session drivers don't observe this
    /// directly (they're single-shot loops with their own deadlines), but
    /// the accept loop and background resolver check it between iterations.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let llm: Option<Arc<dyn GenerateReply>> = settings.llm.base_url.clone().map(|base_url| {
            Arc::new(imitation_llm::HttpReplyProvider::new(
                base_url,
                settings.llm.api_key.clone(),
                Duration::from_secs(settings.llm.timeout_seconds),
            )) as Arc<dyn GenerateReply>
        });
        let conversation_log = ConversationLogSink::new(settings.server.conversation_log_dir.clone());
        Self {
            pool: PoolRegistry::new(),
            matchmaker: Matchmaker::new(settings.matchmaker.clone()),
            llm,
            conversation_log,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            pair_waiters: DashMap::new(),
            settings,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn session_settings(&self) -> imitation_session::SessionRunSettings {
        imitation_session::SessionRunSettings {
            session: self.settings.session.clone(),
            humanize: self.settings.humanize.clone(),
            llm: self.settings.llm.clone(),
            app_version: self.app_version.clone(),
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> axum::Router {
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/health", get(crate::http::health::health_handler))
        .route("/pool/count", get(crate::http::pool::pool_count_handler))
        .route("/pool/join", post(crate::http::pool::pool_join_handler))
        .route("/pool/leave", post(crate::http::pool::pool_leave_handler))
        .route("/match/request", post(crate::http::matchmaking::request_handler))
        .route("/match/status", get(crate::http::matchmaking::status_handler))
        .route("/match/cancel", post(crate::http::matchmaking::cancel_handler))
        .route("/ws/match", get(crate::ws::match_handler))
        .route("/ws/pair", get(crate::ws::pair_handler))
        .route("/ws/wait", get(crate::ws::wait_handler))
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}
