use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicBool, Ordering};

use super::DIFFICULTY;

/// Check whether `proof` solves the puzzle posed by `previous_proof`:
/// sha256("{previous_proof}{proof}") must start with `DIFFICULTY` hex zeros.
///
/// The two numbers are concatenated without a separator, so e.g. (12, 3)
/// and (1, 23) hash the same guess.
pub fn valid_proof(previous_proof: u64, proof: u64) -> bool {
    let guess = format!("{previous_proof}{proof}");
    let digest = Sha256::digest(guess.as_bytes());
    hex::encode(digest)
        .chars()
        .take(DIFFICULTY)
        .all(|c| c == '0')
}

/// Scan 0, 1, 2, ... and return the first proof accepted by `valid_proof`.
/// Blocks the calling thread until a solution is found.
pub fn solve(previous_proof: u64) -> u64 {
    let mut proof = 0u64;
    while !valid_proof(previous_proof, proof) {
        proof += 1;
    }
    proof
}

/// Same scan as [`solve`], but gives up with `None` once `cancel` is raised.
pub fn solve_until(previous_proof: u64, cancel: &AtomicBool) -> Option<u64> {
    let mut proof = 0u64;
    loop {
        if cancel.load(Ordering::Relaxed) {
            return None;
        }
        if valid_proof(previous_proof, proof) {
            return Some(proof);
        }
        proof += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::{solve, solve_until, valid_proof};
    use std::sync::atomic::AtomicBool;

    #[test]
    fn reference_fixture_is_valid() {
        assert!(valid_proof(100, 35293));
        assert!(valid_proof(35293, 35089));
        assert!(!valid_proof(100, 1));
    }

    #[test]
    fn solve_returns_first_solution() {
        let proof = solve(100);
        assert_eq!(proof, 35293);
        assert!((0..proof).all(|q| !valid_proof(100, q)));
    }

    #[test]
    fn concatenation_is_ambiguous() {
        assert_eq!(valid_proof(12, 3), valid_proof(1, 23));
        assert_eq!(valid_proof(1003, 5293), valid_proof(100, 35293));
    }

    #[test]
    fn solve_until_matches_solve() {
        let cancel = AtomicBool::new(false);
        assert_eq!(solve_until(35293, &cancel), Some(35089));
    }

    #[test]
    fn solve_until_stops_when_cancelled() {
        let cancel = AtomicBool::new(true);
        assert_eq!(solve_until(100, &cancel), None);
    }
}
