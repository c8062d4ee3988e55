use sha2::{Digest, Sha256};

/// Content address of an audio payload: lowercase hex SHA-256 over the raw
/// bytes. The same bytes always map to the same address, which is what makes
/// the inbound upload idempotent and the address usable as the public job id.
pub fn content_address(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_sha256_vectors() {
        assert_eq!(
            content_address(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            content_address(b"hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn deterministic_and_content_sensitive() {
        let payload = b"ID3\x03\x00\x00\x00\x00\x00\x0a";
        assert_eq!(content_address(payload), content_address(payload));
        assert_ne!(content_address(b"abc"), content_address(b"abd"));
    }
}
