//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character hexadecimal strings representing SHA-1
//! hashes. They uniquely identify all objects in the repository (blobs,
//! trees, commits) and double as the keys of the in-memory object arenas.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use sha1::{Digest, Sha1};

/// Object identifier (SHA-1 hash)
///
/// A 40-character lowercase hexadecimal string that uniquely identifies an
/// object. Two objects with identical content collide to the same id by
/// design; that is the content-addressing property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Compute the SHA-1 digest of a payload as an object id
    pub fn digest(payload: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(payload);
        let hex = hasher
            .finalize()
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect();
        ObjectId(hex)
    }

    /// Parse and validate an object ID from a string
    ///
    /// # Returns
    ///
    /// Validated ObjectId or error if invalid length/characters
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id))
    }

    /// Get abbreviated form of the object ID
    ///
    /// # Returns
    ///
    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn digest_is_forty_lowercase_hex_characters() {
        let oid = ObjectId::digest(b"hello");
        assert_eq!(oid.as_ref().len(), OBJECT_ID_LENGTH);
        assert!(
            oid.as_ref()
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        );
    }

    #[test]
    fn digest_is_deterministic() {
        assert_eq!(ObjectId::digest(b"payload"), ObjectId::digest(b"payload"));
        assert_ne!(ObjectId::digest(b"payload"), ObjectId::digest(b"payloae"));
    }

    #[test]
    fn try_parse_rejects_malformed_ids() {
        assert!(ObjectId::try_parse("abc123".to_string()).is_err());
        assert!(ObjectId::try_parse("z".repeat(OBJECT_ID_LENGTH)).is_err());
        assert!(ObjectId::try_parse("a".repeat(OBJECT_ID_LENGTH)).is_ok());
    }

    #[test]
    fn short_oid_is_a_prefix() {
        let oid = ObjectId::digest(b"hello");
        assert_eq!(oid.to_short_oid().len(), 7);
        assert!(oid.as_ref().starts_with(&oid.to_short_oid()));
    }
}
