use thiserror::Error;

/// Errors from Merkle commitment operations.
///
/// A proof that simply does not match its root is not an error; verification
/// reports that as `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MerkleError {
    /// Construction was given nothing to commit to.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Leaf id outside `[0, leaf_count)`.
    #[error("leaf id {leaf_id} is out of range (leaf count {leaf_count})")]
    OutOfRange {
        /// Requested leaf id.
        leaf_id: usize,
        /// Padded leaf count of the tree.
        leaf_count: usize,
    },
    /// A leaf value could not produce its canonical string.
    #[error("leaf serialization failed: {0}")]
    SerializationFailure(String),
    /// Digest text that is not hex.
    #[error("invalid digest: {0}")]
    InvalidDigest(String),
    /// Encoded proof that is malformed or cannot address a leaf.
    #[error("invalid proof: {0}")]
    InvalidProof(String),
}
