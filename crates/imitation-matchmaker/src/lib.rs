mod types;

pub use types::{MatchStatus, PairSlot, PendingReq, ReqStatus};

use imitation_commit::new_commitment;
use imitation_core::config::MatchmakerSettings;
use imitation_core::types::{OpponentType, PairId, PoolToken, TicketId};
use rand::Rng;
use std::collections::HashMap;
use std::sync::Mutex;

struct MatchmakerInner {
    pending: HashMap<TicketId, PendingReq>,
    pairs: HashMap<PairId, PairSlot>,
}

/// Process-global matchmaker state: pending requests and reserved H2H pair
/// slots. Both tables live behind a single `Mutex` rather than two
/// independently-locked maps — deciding a pairing is a scan over `pending`
/// followed by a mutation of whatever it picks, and two concurrent
/// `request()` calls racing that decision over per-key locks could both
/// select and claim the same third candidate. One lock spanning the whole
/// scan-then-mutate decision rules that out. Never held across an `.await`
/// — every method here is synchronous.
pub struct Matchmaker {
    inner: Mutex<MatchmakerInner>,
    settings: MatchmakerSettings,
}

impl Matchmaker {
    pub fn new(settings: MatchmakerSettings) -> Self {
        Self {
            inner: Mutex::new(MatchmakerInner {
                pending: HashMap::new(),
                pairs: HashMap::new(),
            }),
            settings,
        }
    }

    /// `Request(token?) -> ticket`.
    pub fn request(&self, token: Option<PoolToken>) -> TicketId {
        let ticket = TicketId::new();
        let req = PendingReq::new(ticket.clone(), token, self.settings.match_window_secs);

        let mut inner = self.inner.lock().expect("matchmaker mutex poisoned");
        inner.pending.insert(ticket.clone(), req);
        self.try_pair(&mut inner, &ticket);
        drop(inner);

        tracing::info!(ticket = %ticket, "match ticket issued");
        ticket
    }

    /// `tryPair(cur)`: find the oldest eligible pending request and resolve
    /// either an H2H pair or an AI reservation via a weighted coin flip.
    /// Runs with the mutex already held by the caller, so the candidate
    /// scan and the mutation it drives are one atomic step.
    fn try_pair(&self, inner: &mut MatchmakerInner, cur: &TicketId) {
        let candidate = inner
            .pending
            .iter()
            .filter(|(ticket, _)| *ticket != cur)
            .filter(|(_, req)| matches!(req.status, ReqStatus::Pending) && !req.reserved_ai && !req.deadline.is_expired())
            // Oldest by created_at == smallest remaining time_left, since every
            // pending request shares the same match window.
            .min_by(|(_, a), (_, b)| a.deadline.time_left_secs().partial_cmp(&b.deadline.time_left_secs()).unwrap())
            .map(|(ticket, _)| ticket.clone());

        let Some(candidate) = candidate else {
            return;
        };

        let heads = rand::thread_rng().gen_bool(self.settings.h2h_prob.clamp(0.0, 1.0));
        if heads {
            self.form_h2h_pair(inner, &candidate, cur);
        } else {
            let chosen = if rand::thread_rng().gen_bool(0.5) { cur } else { &candidate };
            if let Some(req) = inner.pending.get_mut(chosen) {
                req.reserved_ai = true;
            }
        }
    }

    fn form_h2h_pair(&self, inner: &mut MatchmakerInner, a_ticket: &TicketId, b_ticket: &TicketId) {
        let pair_id = PairId::new();

        if let Some(a) = inner.pending.get_mut(a_ticket) {
            a.status = ReqStatus::ReadyH2h;
            a.pair_id = Some(pair_id.clone());
            a.commitment = Some(new_commitment(OpponentType::Human));
        }
        if let Some(b) = inner.pending.get_mut(b_ticket) {
            b.status = ReqStatus::ReadyH2h;
            b.pair_id = Some(pair_id.clone());
            b.commitment = Some(new_commitment(OpponentType::Human));
        }

        inner.pairs.insert(
            pair_id.clone(),
            PairSlot {
                pair_id,
                a_ticket: a_ticket.clone(),
                b_ticket: b_ticket.clone(),
                bind_deadline: imitation_core::clock::Deadline::after_secs(self.settings.bind_window_secs),
            },
        );
        tracing::info!(a = %a_ticket, b = %b_ticket, "h2h pair formed");
    }

    /// `Status(ticket)`. May mutate state on read: a pending ticket past its
    /// deadline resolves to AI right here.
    pub fn status(&self, ticket: &TicketId) -> MatchStatus {
        let mut inner = self.inner.lock().expect("matchmaker mutex poisoned");
        let Some(req) = inner.pending.get_mut(ticket) else {
            return MatchStatus::Gone;
        };

        match req.status {
            ReqStatus::ReadyH2h => {
                let pair_id = req.pair_id.clone().expect("ready_h2h always carries a pair_id");
                let commit_hash = req.commitment.as_ref().expect("ready_h2h always carries a commitment").hash.clone();
                MatchStatus::ReadyH2h {
                    pair_id,
                    commit_hash,
                    time_left_secs: req.deadline.time_left_secs(),
                }
            }
            ReqStatus::ReadyAi => {
                let commit_hash = req.commitment.as_ref().expect("ready_ai always carries a commitment").hash.clone();
                MatchStatus::ReadyAi {
                    commit_hash,
                    time_left_secs: req.deadline.time_left_secs(),
                }
            }
            ReqStatus::Canceled => MatchStatus::Canceled,
            ReqStatus::Pending => {
                let time_left = req.deadline.time_left_secs();
                if time_left > 0.0 {
                    MatchStatus::Pending { time_left_secs: time_left }
                } else {
                    let commitment = new_commitment(OpponentType::Ai);
                    let commit_hash = commitment.hash.clone();
                    req.status = ReqStatus::ReadyAi;
                    req.commitment = Some(commitment);
                    tracing::info!(ticket = %ticket, "ticket expired, resolved to AI");
                    MatchStatus::ReadyAi {
                        commit_hash,
                        time_left_secs: 0.0,
                    }
                }
            }
        }
    }

    /// `Cancel(ticket)`. Idempotent: cancelling an already-canceled or
    /// already-resolved ticket is a no-op.
    pub fn cancel(&self, ticket: &TicketId) {
        let mut inner = self.inner.lock().expect("matchmaker mutex poisoned");
        let Some(req) = inner.pending.get_mut(ticket) else {
            return;
        };

        match req.status {
            ReqStatus::Pending => {
                req.status = ReqStatus::Canceled;
            }
            ReqStatus::ReadyH2h => {
                let pair_id = req.pair_id.take();
                req.status = ReqStatus::Canceled;

                if let Some(pair_id) = pair_id {
                    if let Some(pair) = inner.pairs.remove(&pair_id) {
                        let other_ticket = if pair.a_ticket == *ticket { pair.b_ticket } else { pair.a_ticket };
                        if let Some(other) = inner.pending.get_mut(&other_ticket) {
                            if other.status == ReqStatus::ReadyH2h {
                                let commitment = new_commitment(OpponentType::Ai);
                                other.status = ReqStatus::ReadyAi;
                                other.pair_id = None;
                                other.commitment = Some(commitment);
                                tracing::info!(promoted = %other_ticket, "h2h peer promoted to AI after cancel");
                            }
                        }
                    }
                }
            }
            ReqStatus::ReadyAi | ReqStatus::Canceled => {}
        }
        tracing::info!(ticket = %ticket, "ticket canceled");
    }

    /// Looks up the pair slot for `/ws/pair` binding; does not mutate it.
    pub fn pair_slot(&self, pair_id: &PairId) -> Option<(TicketId, TicketId)> {
        let inner = self.inner.lock().expect("matchmaker mutex poisoned");
        inner.pairs.get(pair_id).map(|p| (p.a_ticket.clone(), p.b_ticket.clone()))
    }

    pub fn remove_pair(&self, pair_id: &PairId) {
        let mut inner = self.inner.lock().expect("matchmaker mutex poisoned");
        inner.pairs.remove(pair_id);
    }

    pub fn ticket_opponent_type(&self, ticket: &TicketId) -> Option<OpponentType> {
        let inner = self.inner.lock().expect("matchmaker mutex poisoned");
        inner.pending.get(ticket).and_then(|r| r.commitment.as_ref().map(|c| c.opponent_type))
    }

    pub fn ticket_commitment(&self, ticket: &TicketId) -> Option<imitation_commit::Commitment> {
        let inner = self.inner.lock().expect("matchmaker mutex poisoned");
        inner.pending.get(ticket).and_then(|r| r.commitment.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mm() -> Matchmaker {
        Matchmaker::new(MatchmakerSettings {
            h2h_prob: 0.5,
            match_window_secs: 10.0,
            bind_window_secs: 20.0,
        })
    }

    #[test]
    fn unpaired_request_stays_pending_with_no_peer() {
        let mm = mm();
        let ticket = mm.request(None);
        match mm.status(&ticket) {
            MatchStatus::Pending { time_left_secs } => assert!(time_left_secs > 0.0),
            other => panic!("expected pending, got {:?}", other),
        }
    }

    #[test]
    fn unknown_ticket_is_gone() {
        let mm = mm();
        assert!(matches!(mm.status(&TicketId::new()), MatchStatus::Gone));
    }

    #[test]
    fn cancel_is_idempotent_on_already_canceled_ticket() {
        let mm = mm();
        let ticket = mm.request(None);
        mm.cancel(&ticket);
        mm.cancel(&ticket);
        assert!(matches!(mm.status(&ticket), MatchStatus::Canceled));
    }

    #[test]
    fn cancel_of_unknown_ticket_does_not_panic() {
        let mm = mm();
        mm.cancel(&TicketId::new());
    }

    #[test]
    fn two_concurrent_requests_eventually_reach_a_terminal_status() {
        let mm = Matchmaker::new(MatchmakerSettings {
            h2h_prob: 1.0,
            match_window_secs: 10.0,
            bind_window_secs: 20.0,
        });
        let a = mm.request(None);
        let b = mm.request(None);
        let status_a = mm.status(&a);
        let status_b = mm.status(&b);
        assert!(matches!(status_a, MatchStatus::ReadyH2h { .. }));
        assert!(matches!(status_b, MatchStatus::ReadyH2h { .. }));
    }

    #[test]
    fn cancel_of_ready_h2h_promotes_peer_to_ai() {
        let mm = Matchmaker::new(MatchmakerSettings {
            h2h_prob: 1.0,
            match_window_secs: 10.0,
            bind_window_secs: 20.0,
        });
        let a = mm.request(None);
        let b = mm.request(None);
        mm.cancel(&a);
        assert!(matches!(mm.status(&a), MatchStatus::Canceled));
        assert!(matches!(mm.status(&b), MatchStatus::ReadyAi { .. }));
    }

    #[test]
    fn concurrent_requests_never_double_claim_the_same_third_ticket() {
        use std::sync::Arc;
        use std::thread;

        let mm = Arc::new(Matchmaker::new(MatchmakerSettings {
            h2h_prob: 1.0,
            match_window_secs: 10.0,
            bind_window_secs: 20.0,
        }));
        let third = mm.request(None);

        let mm_a = mm.clone();
        let mm_b = mm.clone();
        let handle_a = thread::spawn(move || mm_a.request(None));
        let handle_b = thread::spawn(move || mm_b.request(None));
        let ticket_a = handle_a.join().unwrap();
        let ticket_b = handle_b.join().unwrap();

        // The third ticket can end up paired with whichever of a/b won the
        // race, but never claimed as a pair partner by both — that would
        // mean two pair slots sharing one ticket.
        let third_pair_id = match mm.status(&third) {
            MatchStatus::ReadyH2h { pair_id, .. } => Some(pair_id),
            _ => None,
        };
        if let Some(third_pair_id) = third_pair_id {
            let a_shares = matches!(mm.status(&ticket_a), MatchStatus::ReadyH2h { pair_id, .. } if pair_id == third_pair_id);
            let b_shares = matches!(mm.status(&ticket_b), MatchStatus::ReadyH2h { pair_id, .. } if pair_id == third_pair_id);
            assert!(a_shares ^ b_shares, "exactly one of a/b should share the third ticket's pair");
        }
    }
}
