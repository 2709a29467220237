use axum::extract::ws::{WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use imitation_commit::{new_commitment, Commitment};
use imitation_core::types::{OpponentType, PairId, PoolToken, Side, TicketId};
use imitation_persona::generate as generate_persona;
use imitation_session::{run_a_vs_bot, run_h2h, H2hOutcome, SessionRunSettings, Transport};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::app::{AppState, PairWaiter};
use crate::transport::WsTransport;

#[derive(Debug, Deserialize)]
pub struct MatchQuery {
    ticket: String,
}

#[derive(Debug, Deserialize)]
pub struct PairQuery {
    pair_id: String,
    ticket: String,
}

#[derive(Debug, Deserialize)]
pub struct WaitQuery {
    token: String,
}

/// GET /ws/match?ticket=... — binds a resolved AI ticket to a socket.
pub async fn match_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<MatchQuery>,
) -> impl IntoResponse {
    let ticket = TicketId::from(query.ticket.as_str());
    let commitment = state.matchmaker.ticket_commitment(&ticket);
    ws.on_upgrade(move |socket| async move {
        let Some(commitment) = commitment else {
            return;
        };
        run_ai_session(&state, socket, &ticket, commitment).await;
    })
}

/// GET /ws/pair?pair_id=...&ticket=... — binds one side of an H2H pair.
/// The first leg to connect registers and waits; the second leg hands its
/// raw socket to the first over a oneshot, then returns immediately — the
/// underlying connection stays alive because ownership, not the handler
/// task, keeps it open.
pub async fn pair_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<PairQuery>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| async move {
        handle_pair(state, socket, query).await;
    })
}

/// GET /ws/wait?token=... — a standalone holding pattern: the connection
/// parks until its pool token's ticket resolves, or the socket drops. Not
/// wired into the default matchmaking flow; exercised directly by its own
/// clients only.
pub async fn wait_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<WaitQuery>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| async move {
        handle_wait(state, socket, PoolToken::from(query.token)).await;
    })
}

async fn run_ai_session(state: &Arc<AppState>, socket: WebSocket, ticket: &TicketId, commitment: Commitment) {
    let mut transport = WsTransport::new(socket);
    let correlation_id = Uuid::new_v4().to_string();
    let persona = generate_persona(&correlation_id, None);
    let bot = state.llm.as_deref();
    run_a_vs_bot(
        &mut transport,
        commitment,
        persona,
        &state.session_settings(),
        bot,
        &state.conversation_log,
        &correlation_id,
    )
    .await;
    state.matchmaker.cancel(ticket);
}

async fn handle_pair(state: Arc<AppState>, socket: WebSocket, query: PairQuery) {
    let pair_id = PairId::from(query.pair_id.as_str());
    let my_ticket = TicketId::from(query.ticket.as_str());

    let Some((a_ticket, b_ticket)) = state.matchmaker.pair_slot(&pair_id) else {
        return;
    };
    let my_side = if my_ticket == a_ticket {
        Side::A
    } else if my_ticket == b_ticket {
        Side::B
    } else {
        return;
    };
    let peer_ticket = if my_side == Side::A { b_ticket } else { a_ticket };

    let Some(my_commitment) = state.matchmaker.ticket_commitment(&my_ticket) else {
        return;
    };

    // Is a peer already waiting? Pop it if so — we're the second leg.
    let existing = state.pair_waiters.remove(&pair_id).map(|(_, w)| w);
    match existing {
        Some(waiter) if waiter.side != my_side => {
            // Hand our socket to the first leg; it drives the session.
            let _ = waiter.tx.send(socket);
        }
        Some(waiter) => {
            // Same side reconnecting before the first leg noticed; put the
            // original waiter back and drop this duplicate connection.
            state.pair_waiters.insert(pair_id, waiter);
        }
        None => {
            // We're first. Register and wait for the peer, bounded by the
            // pair's bind window.
            let (tx, rx) = oneshot::channel();
            state.pair_waiters.insert(pair_id.clone(), PairWaiter { side: my_side, tx });

            let settings = state.session_settings();
            let bind_window = Duration::from_secs_f64(state.settings.matchmaker.bind_window_secs.max(0.0));
            let peer_socket = tokio::time::timeout(bind_window, rx).await.ok().and_then(|r| r.ok());

            let Some(peer_socket) = peer_socket else {
                state.pair_waiters.remove(&pair_id);
                let mut transport = WsTransport::new(socket);
                degrade_to_ai(&state, &mut transport, &my_ticket, &settings).await;
                state.matchmaker.remove_pair(&pair_id);
                return;
            };

            let Some(peer_commitment) = state.matchmaker.ticket_commitment(&peer_ticket) else {
                state.matchmaker.remove_pair(&pair_id);
                return;
            };

            let correlation_id = pair_id.as_str().to_string();
            let mut my_transport = WsTransport::new(socket);
            let mut peer_transport = WsTransport::new(peer_socket);

            let outcome = if my_side == Side::A {
                run_h2h(
                    &mut my_transport,
                    &mut peer_transport,
                    my_commitment,
                    peer_commitment,
                    &settings,
                    &state.conversation_log,
                    &correlation_id,
                )
                .await
            } else {
                run_h2h(
                    &mut peer_transport,
                    &mut my_transport,
                    peer_commitment,
                    my_commitment,
                    &settings,
                    &state.conversation_log,
                    &correlation_id,
                )
                .await
            };

            if let H2hOutcome::KickoffFailed { survivor } = outcome {
                degrade_survivor(&state, survivor, my_side, &mut my_transport, &mut peer_transport, &my_ticket, &peer_ticket, &settings)
                    .await;
            }

            state.matchmaker.remove_pair(&pair_id);
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn degrade_survivor<TA: Transport, TB: Transport>(
    state: &Arc<AppState>,
    survivor: Option<Side>,
    my_side: Side,
    my_transport: &mut TA,
    peer_transport: &mut TB,
    my_ticket: &TicketId,
    peer_ticket: &TicketId,
    settings: &SessionRunSettings,
) {
    match survivor {
        Some(side) if side == my_side => degrade_to_ai(state, my_transport, my_ticket, settings).await,
        Some(_) => degrade_to_ai(state, peer_transport, peer_ticket, settings).await,
        None => {}
    }
}

async fn degrade_to_ai<T: Transport>(
    state: &Arc<AppState>,
    transport: &mut T,
    ticket: &TicketId,
    settings: &SessionRunSettings,
) {
    let commitment = new_commitment(OpponentType::Ai);
    let correlation_id = Uuid::new_v4().to_string();
    let persona = generate_persona(&correlation_id, None);
    let bot = state.llm.as_deref();
    run_a_vs_bot(
        transport,
        commitment,
        persona,
        settings,
        bot,
        &state.conversation_log,
        &correlation_id,
    )
    .await;
    state.matchmaker.cancel(ticket);
}

async fn handle_wait(state: Arc<AppState>, mut socket: WebSocket, token: PoolToken) {
    use axum::extract::ws::Message;
    use futures_util::StreamExt;

    let ticket = TicketId::from(token.as_str());
    loop {
        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(1)) => {
                if state.matchmaker.ticket_opponent_type(&ticket).is_some() {
                    break;
                }
            }
            msg = socket.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(_)) => break,
                    _ => {}
                }
            }
        }
    }
}
