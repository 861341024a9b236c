use std::cell::Cell;
use std::fmt::Write;

/// Entropy per token. The server falls back to `token_hex(16)` when a client
/// does not provide a token, so client-minted tokens match that shape.
const TOKEN_BYTES: usize = 16;

thread_local! {
    static FALLBACK_STATE: Cell<u64> = Cell::new(0);
}

/// Mints the delete secret sent along with a create request: 32 lowercase hex
/// characters, URL-safe, unique per call.
///
/// This is a shared secret between this browser and the server, not a
/// cryptographic commitment. Entropy comes from the OS/browser source; if
/// that errors, a deterministic counter-seeded generator keeps tokens unique
/// within the session rather than failing the create.
pub fn generate_owner_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    if getrandom::getrandom(&mut bytes).is_err() {
        tracing::warn!("entropy source unavailable, falling back to deterministic token generation");
        fallback_fill(&mut bytes);
    }
    let mut out = String::with_capacity(TOKEN_BYTES * 2);
    for b in bytes {
        let _ = write!(out, "{:02x}", b);
    }
    out
}

// splitmix64 over a thread-local counter
fn fallback_fill(bytes: &mut [u8]) {
    let mut x = FALLBACK_STATE.with(|s| {
        let n = s.get().wrapping_add(0x9e3779b97f4a7c15);
        s.set(n);
        n
    });
    for chunk in bytes.chunks_mut(8) {
        x = x.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = x;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^= z >> 31;
        chunk.copy_from_slice(&z.to_le_bytes()[..chunk.len()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn token_shape() {
        let token = generate_owner_token();
        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn tokens_do_not_collide() {
        let tokens = (0..1000).map(|_| generate_owner_token()).collect::<HashSet<_>>();
        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn fallback_is_unique_across_calls() {
        let mut a = [0u8; TOKEN_BYTES];
        let mut b = [0u8; TOKEN_BYTES];
        fallback_fill(&mut a);
        fallback_fill(&mut b);
        assert_ne!(a, b);
        assert_ne!(a, [0u8; TOKEN_BYTES]);
    }
}
