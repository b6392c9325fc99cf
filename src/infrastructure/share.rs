use rand::Rng;
use sha2::{Digest, Sha256};

/// Share ids are 8 lowercase hex characters.
pub const SHARE_ID_LEN: usize = 8;

/// Generate a short share id for a report: a truncated SHA-256 over the
/// username, year, and a random nonce. Not guessable from the inputs alone;
/// callers re-roll on the (unlikely) collision with a stored id.
pub fn generate_share_id(username: &str, year: i32) -> String {
    let mut nonce = [0u8; 16];
    rand::rng().fill_bytes(&mut nonce);

    let mut hasher = Sha256::new();
    hasher.update(username.as_bytes());
    hasher.update(year.to_le_bytes());
    hasher.update(nonce);
    let digest = hasher.finalize();

    digest
        .iter()
        .take(SHARE_ID_LEN / 2)
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
