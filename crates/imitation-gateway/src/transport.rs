use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use imitation_protocol::frames::{InboundFrame, OutboundFrame};
use imitation_session::Transport;

/// Binds the session drivers' transport-agnostic `Transport` trait to a
/// concrete Axum WebSocket. Malformed or unrecognized inbound text is
/// dropped and the read loop continues — a client protocol error never
/// ends a session (see `imitation-core::error::GameError::Protocol`).
pub struct WsTransport {
    tx: SplitSink<WebSocket, Message>,
    rx: SplitStream<WebSocket>,
}

impl WsTransport {
    pub fn new(socket: WebSocket) -> Self {
        let (tx, rx) = socket.split();
        Self { tx, rx }
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn send(&mut self, frame: &OutboundFrame) -> bool {
        self.tx.send(Message::Text(frame.to_json().into())).await.is_ok()
    }

    async fn recv(&mut self) -> Option<InboundFrame> {
        loop {
            match self.rx.next().await {
                None => return None,
                Some(Ok(Message::Close(_))) => return None,
                Some(Ok(Message::Text(text))) => match serde_json::from_str::<InboundFrame>(&text) {
                    Ok(frame) => return Some(frame),
                    Err(e) => {
                        tracing::warn!(error = %e, "malformed inbound frame, dropping");
                        continue;
                    }
                },
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "websocket read error");
                    return None;
                }
            }
        }
    }
}
