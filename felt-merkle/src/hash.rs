//! Digests, hash backends and the leaf/node hashing schemes.

use std::fmt;

use bincode::{Decode, Encode};
use sha2::Digest as _;

use crate::MerkleError;

/// Domain tag prepended to leaf hash inputs under
/// [`HashScheme::DomainSeparated`].
pub(crate) const LEAF_DOMAIN_TAG: u8 = 0x00;
/// Domain tag prepended to node hash inputs under
/// [`HashScheme::DomainSeparated`].
pub(crate) const NODE_DOMAIN_TAG: u8 = 0x01;

/// Lowercase hex encoding of a hash output.
///
/// Node digests are computed over the concatenated hex text of the two
/// children, so the textual form is part of the commitment, not just a
/// presentation detail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Digest(String);

impl Digest {
    /// Hex-encode raw hash output.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Digest(hex::encode(bytes))
    }

    /// Parse a hex digest. Uppercase input is normalised to lowercase.
    pub fn from_hex(text: &str) -> Result<Self, MerkleError> {
        if text.is_empty() {
            return Err(MerkleError::InvalidDigest("empty digest".to_owned()));
        }
        let bytes = hex::decode(text)
            .map_err(|e| MerkleError::InvalidDigest(format!("{}: {}", text, e)))?;
        Ok(Self::from_bytes(&bytes))
    }

    /// The hex text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode back to raw hash output.
    pub fn to_bytes(&self) -> Result<Vec<u8>, MerkleError> {
        hex::decode(&self.0).map_err(|e| MerkleError::InvalidDigest(e.to_string()))
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        !self.0.is_empty()
            && self.0.len() % 2 == 0
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Digest {
    type Error = MerkleError;

    /// Accepts only the canonical lowercase form, as produced by hashing.
    fn try_from(text: String) -> Result<Self, Self::Error> {
        let digest = Digest(text);
        if digest.is_well_formed() {
            Ok(digest)
        } else {
            Err(MerkleError::InvalidDigest(format!(
                "{} is not a lowercase hex digest",
                digest.0
            )))
        }
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Collision-resistant hash producing a [`Digest`].
pub trait MerkleHasher {
    /// Short name of the hash, used in log output.
    const NAME: &'static str;

    /// Hash the concatenation of `parts`.
    fn hash(parts: &[&[u8]]) -> Digest;
}

/// SHA-256. Reproduces the root values of existing commitments.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl MerkleHasher for Sha256Hasher {
    const NAME: &'static str = "sha256";

    fn hash(parts: &[&[u8]]) -> Digest {
        let mut hasher = sha2::Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        Digest::from_bytes(&hasher.finalize())
    }
}

/// Blake3 with 32-byte output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Hasher;

impl MerkleHasher for Blake3Hasher {
    const NAME: &'static str = "blake3";

    fn hash(parts: &[&[u8]]) -> Digest {
        let mut hasher = blake3::Hasher::new();
        for part in parts {
            hasher.update(part);
        }
        Digest::from_bytes(hasher.finalize().as_bytes())
    }
}

/// How leaf and node hash inputs are framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HashScheme {
    /// `H(leaf)` and `H(left || right)` with no framing.
    ///
    /// Matches existing commitments bit for bit. A leaf string that happens
    /// to equal the concatenation of two digests hashes the same as that
    /// internal node.
    #[default]
    Plain,
    /// `H(0x00 || leaf)` and `H(0x01 || left || right)`.
    DomainSeparated,
}

/// Digest of a serialized leaf.
pub fn leaf_digest<H: MerkleHasher>(scheme: HashScheme, leaf: &str) -> Digest {
    match scheme {
        HashScheme::Plain => H::hash(&[leaf.as_bytes()]),
        HashScheme::DomainSeparated => H::hash(&[&[LEAF_DOMAIN_TAG][..], leaf.as_bytes()]),
    }
}

/// Digest of an internal node from its two children.
pub fn node_digest<H: MerkleHasher>(scheme: HashScheme, left: &Digest, right: &Digest) -> Digest {
    let (left, right) = (left.as_str().as_bytes(), right.as_str().as_bytes());
    match scheme {
        HashScheme::Plain => H::hash(&[left, right]),
        HashScheme::DomainSeparated => H::hash(&[&[NODE_DOMAIN_TAG][..], left, right]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_matches_known_vector() {
        assert_eq!(
            Sha256Hasher::hash(&[b"0".as_slice()]).as_str(),
            "5feceb66ffc86f38d952786c6d696c79c2dbc239dd4e91b46729d73a27fb57e9"
        );
    }

    #[test]
    fn test_parts_are_concatenated() {
        assert_eq!(
            Blake3Hasher::hash(&[b"ab".as_slice(), b"c".as_slice()]),
            Blake3Hasher::hash(&[b"abc".as_slice()])
        );
        assert_eq!(
            Blake3Hasher::hash(&[b"abc".as_slice()]),
            Digest::from_bytes(blake3::hash(b"abc").as_bytes())
        );
    }

    #[test]
    fn test_domain_separation_changes_digests() {
        let leaf = leaf_digest::<Sha256Hasher>(HashScheme::Plain, "1");
        let tagged = leaf_digest::<Sha256Hasher>(HashScheme::DomainSeparated, "1");
        assert_ne!(leaf, tagged);

        // Under the plain scheme a leaf whose text is two concatenated digests
        // collides with the node built from them.
        let left = leaf_digest::<Sha256Hasher>(HashScheme::Plain, "1");
        let right = leaf_digest::<Sha256Hasher>(HashScheme::Plain, "2");
        let crafted = format!("{}{}", left, right);
        assert_eq!(
            node_digest::<Sha256Hasher>(HashScheme::Plain, &left, &right),
            leaf_digest::<Sha256Hasher>(HashScheme::Plain, &crafted)
        );
        assert_ne!(
            node_digest::<Sha256Hasher>(HashScheme::DomainSeparated, &left, &right),
            leaf_digest::<Sha256Hasher>(HashScheme::DomainSeparated, &crafted)
        );
    }

    #[test]
    fn test_digest_hex_parsing() {
        let digest = Digest::from_hex("ABCDEF01").expect("valid hex");
        assert_eq!(digest.as_str(), "abcdef01");
        assert_eq!(digest.to_bytes().expect("decode"), vec![0xab, 0xcd, 0xef, 0x01]);
        assert!(digest.is_well_formed());

        assert!(Digest::from_hex("").is_err());
        assert!(Digest::from_hex("abc").is_err());
        assert!(Digest::from_hex("zz").is_err());
        assert!(!Digest("ABCD".to_owned()).is_well_formed());
    }

    #[test]
    fn test_digest_from_string_requires_canonical_form() {
        let digest = Digest::try_from("00ff".to_owned()).expect("lowercase hex");
        assert_eq!(String::from(digest), "00ff");

        assert!(Digest::try_from("00FF".to_owned()).is_err());
        assert!(Digest::try_from("0f0".to_owned()).is_err());
        assert!(Digest::try_from(String::new()).is_err());
    }
}
