//! Immutable binary Merkle commitments over field-element leaves.
//!
//! Leaves are padded with the leaf type's zero value up to the next power of
//! two and hashed bottom-up. Nodes are numbered breadth-first from 1 (the
//! root), so leaf `i` of a tree with `L` leaves sits at node id `i + L`.
//!
//! With the default [`HashScheme::Plain`] scheme:
//!
//! - leaf digest: `H(canonical_string(leaf))`
//! - node digest: `H(hex(left) || hex(right))`
//!
//! An authentication path lists sibling digests from the root level down to
//! the leaf level, and [`verify_decommitment`] replays it leaf-to-root
//! without needing the tree.

#![warn(missing_docs)]

mod config;
mod error;
mod field;
pub(crate) mod hash;
mod leaf;
pub(crate) mod proof;
pub(crate) mod tree;
mod verify;


pub use config::TreeConfig;
pub use error::MerkleError;
pub use felt_merkle_costs::{CostContext, CostResult, CostsExt, OperationCost};
pub use field::FieldElement;
pub use hash::{
    Blake3Hasher, Digest, HashScheme, MerkleHasher, Sha256Hasher, leaf_digest, node_digest,
};
pub use leaf::CanonicalLeaf;
pub use proof::MerkleProof;
pub use tree::{Fact, MerkleTree};
pub use verify::{verify_decommitment, verify_decommitment_with_scheme};
