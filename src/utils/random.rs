use rand::RngCore;

use crate::config::SESSION_TOKEN_BYTES;

pub fn fill_random_bytes(buffer: &mut [u8]) {
    rand::rng().fill_bytes(buffer);
}

/// Opaque, hex-encoded session token.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    fill_random_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_tokens_are_hex_and_unique() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert_eq!(a.len(), SESSION_TOKEN_BYTES * 2);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
