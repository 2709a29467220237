use imitation_core::clock::now_ms;
use imitation_core::types::OpponentType;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// A commitment binds an opponent assignment to a hash at session start;
/// `(opponent_type, nonce, ts_ms)` is disclosed only at session end so a
/// client can recompute `hash` and verify the binding happened before play.
#[derive(Debug, Clone)]
pub struct Commitment {
    pub opponent_type: OpponentType,
    pub nonce: String,
    pub ts_ms: u64,
    pub hash: String,
}

fn commit_string(opponent_type: OpponentType, nonce: &str, ts_ms: u64) -> String {
    format!("{}|{}|{}", opponent_type.as_str(), nonce, ts_ms)
}

fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

fn random_nonce() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Generate a fresh commitment for the given opponent type: a 128-bit random
/// nonce, the current wall-clock millisecond timestamp, and their SHA-256
/// binding.
pub fn new_commitment(opponent_type: OpponentType) -> Commitment {
    let nonce = random_nonce();
    let ts_ms = now_ms();
    let hash = sha256_hex(&commit_string(opponent_type, &nonce, ts_ms));
    Commitment {
        opponent_type,
        nonce,
        ts_ms,
        hash,
    }
}

/// Recompute the hash from a disclosed reveal tuple and compare.
pub fn verify(hash: &str, opponent_type: OpponentType, nonce: &str, ts_ms: u64) -> bool {
    sha256_hex(&commit_string(opponent_type, nonce, ts_ms)) == hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commitment_verifies_against_its_own_reveal() {
        let c = new_commitment(OpponentType::Ai);
        assert!(verify(&c.hash, c.opponent_type, &c.nonce, c.ts_ms));
    }

    #[test]
    fn tampered_opponent_type_fails_verification() {
        let c = new_commitment(OpponentType::Human);
        assert!(!verify(&c.hash, OpponentType::Ai, &c.nonce, c.ts_ms));
    }

    #[test]
    fn nonces_are_not_reused_across_calls() {
        let a = new_commitment(OpponentType::Ai);
        let b = new_commitment(OpponentType::Ai);
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.hash, b.hash);
    }
}
