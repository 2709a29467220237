use imitation_commit::Commitment;
use imitation_core::clock::Deadline;
use imitation_core::types::{PairId, PoolToken, TicketId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReqStatus {
    Pending,
    ReadyAi,
    ReadyH2h,
    Canceled,
}

/// A single match request, pending resolution to either an AI opponent or a
/// human pair. Lives in `Matchmaker::pending` for its whole lifetime — even
/// once resolved, the ticket row stays around so `Status` keeps answering.
pub struct PendingReq {
    pub ticket: TicketId,
    pub token: Option<PoolToken>,
    pub deadline: Deadline,
    pub status: ReqStatus,
    pub reserved_ai: bool,
    pub pair_id: Option<PairId>,
    pub commitment: Option<Commitment>,
}

impl PendingReq {
    pub fn new(ticket: TicketId, token: Option<PoolToken>, window_secs: f64) -> Self {
        Self {
            ticket,
            token,
            deadline: Deadline::after_secs(window_secs),
            status: ReqStatus::Pending,
            reserved_ai: false,
            pair_id: None,
            commitment: None,
        }
    }
}

/// A reserved H2H pairing. Exists only between the coin flip that created it
/// and the moment both sides attach (or the bind window expires).
pub struct PairSlot {
    pub pair_id: PairId,
    pub a_ticket: TicketId,
    pub b_ticket: TicketId,
    pub bind_deadline: Deadline,
}

/// Result of resolving a ticket's current status.
#[derive(Debug, Clone)]
pub enum MatchStatus {
    Pending { time_left_secs: f64 },
    ReadyAi { commit_hash: String, time_left_secs: f64 },
    ReadyH2h { pair_id: PairId, commit_hash: String, time_left_secs: f64 },
    Canceled,
    Gone,
}
