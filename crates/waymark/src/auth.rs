//! Shared admin password check.

use sha2::{Digest, Sha256};

/// Admin gate holding only a digest of the configured password
pub struct AdminGate {
    digest: [u8; 32],
}

impl AdminGate {
    pub fn new(password: &str) -> Self {
        Self {
            digest: sha256(password),
        }
    }

    /// Exact comparison. Digests are compared in full so timing does not
    /// depend on where the submitted password first differs.
    pub fn verify(&self, submitted: &str) -> bool {
        let candidate = sha256(submitted);
        self.digest
            .iter()
            .zip(candidate.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

fn sha256(input: &str) -> [u8; 32] {
    Sha256::digest(input.as_bytes()).into()
}
