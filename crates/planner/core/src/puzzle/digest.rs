use sha2::{Digest, Sha256};

use super::PuzzleError;

/// SHA-256 of `salt` followed by the ASCII digits of `attempt`.
pub fn digest(salt: &[u8], attempt: &[u8]) -> [u8; 32] {
    let digits: Vec<u8> = attempt.iter().map(|digit| b'0' + digit).collect();
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(&digits);
    hasher.finalize().into()
}

/// Lower-case hex form of [`digest`].
pub fn digest_hex(salt: &[u8], attempt: &[u8]) -> String {
    hex::encode(digest(salt, attempt))
}

/// Parses a hex-encoded 32-byte digest.
pub fn parse_digest(text: &str) -> Result<[u8; 32], PuzzleError> {
    let bytes = hex::decode(text.trim()).map_err(|_| PuzzleError::InvalidDigest(text.into()))?;
    bytes
        .try_into()
        .map_err(|_| PuzzleError::InvalidDigest(text.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_of_empty_input_is_the_sha256_constant() {
        assert_eq!(
            digest_hex(b"", &[]),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn salt_changes_the_digest() {
        assert_ne!(digest(b"a", &[3, 5, 7]), digest(b"b", &[3, 5, 7]));
        assert_eq!(digest(b"", &[1, 2, 3]), digest(b"1", &[2, 3]));
    }

    #[test]
    fn parse_round_trips_hex() {
        let hex = digest_hex(b"salt", &[3, 5, 7]);
        assert_eq!(parse_digest(&hex), Ok(digest(b"salt", &[3, 5, 7])));
        assert!(parse_digest("abc").is_err());
        assert!(parse_digest("zz").is_err());
    }
}
