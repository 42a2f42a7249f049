//! Content fingerprinting for change detection

use sha2::{Digest, Sha256};

/// Computes the SHA-256 digest of a page body, rendered as lowercase hex.
///
/// This is a pure byte-level fingerprint: any single-byte difference in the
/// body (whitespace, attribute order, anything) yields a different digest.
/// It is not a semantic diff.
pub fn content_digest(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::content_digest;

    #[test]
    fn digest_is_deterministic() {
        let left = content_digest(b"Schedule v1");
        let right = content_digest(b"Schedule v1");
        assert_eq!(left, right);
    }

    #[test]
    fn digest_changes_on_any_byte_change() {
        let one = content_digest(b"Schedule v1");
        let two = content_digest(b"Schedule v1 ");
        assert_ne!(one, two);
    }

    #[test]
    fn digest_is_64_hex_chars() {
        let digest = content_digest(b"");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
