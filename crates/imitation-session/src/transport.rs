use async_trait::async_trait;
use imitation_protocol::frames::{InboundFrame, OutboundFrame};

/// Abstracts the duplex connection a session drives. The gateway supplies a
/// concrete WebSocket-backed implementation; the driver code here never
/// touches axum directly, so it can be exercised with an in-memory fake.
#[async_trait]
pub trait Transport: Send {
    /// `false` means the peer is gone; the caller should end the session.
    async fn send(&mut self, frame: &OutboundFrame) -> bool;

    /// `None` means the peer disconnected or the stream ended.
    async fn recv(&mut self) -> Option<InboundFrame>;
}
