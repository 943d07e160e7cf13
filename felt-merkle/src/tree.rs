use std::marker::PhantomData;

use felt_merkle_costs::{CostResult, CostsExt, OperationCost, cost_return_on_error_no_add};
use tracing::{debug, trace};

use crate::{
    CanonicalLeaf, MerkleError, MerkleProof, TreeConfig,
    hash::{Digest, MerkleHasher, Sha256Hasher, leaf_digest, node_digest},
};

/// What a node's digest was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fact<'a> {
    /// A leaf slot: the digest is the hash of this serialized leaf.
    Leaf(&'a str),
    /// An internal node: the digest is the hash of these two child digests.
    Node {
        /// Digest of node `2 * id`.
        left: &'a Digest,
        /// Digest of node `2 * id + 1`.
        right: &'a Digest,
    },
}

/// An immutable binary Merkle tree.
///
/// Nodes are numbered breadth-first from 1 (root). With `L` padded leaves,
/// leaf `i` is node `i + L` and node `id` has children `2 * id` and
/// `2 * id + 1`. Every digest is kept in a flat arena indexed by node id, so
/// the structure is never traversed through digest lookups.
#[derive(Debug, Clone)]
pub struct MerkleTree<T, H = Sha256Hasher> {
    /// Leaves after padding with `T::zero()`.
    leaves: Vec<T>,
    leaf_strings: Vec<String>,
    /// Number of leaves supplied before padding.
    data_len: usize,
    height: u32,
    /// Digest of node `id` at index `id - 1`.
    nodes: Vec<Digest>,
    config: TreeConfig,
    marker: PhantomData<H>,
}

impl<T: CanonicalLeaf, H: MerkleHasher> MerkleTree<T, H> {
    /// Build a tree over `leaves` with the default configuration.
    pub fn new(leaves: Vec<T>) -> Result<Self, MerkleError> {
        Self::new_with_config(leaves, TreeConfig::default()).unwrap()
    }

    /// Build a tree over `leaves`.
    ///
    /// The sequence is padded on the right with `T::zero()` up to the next
    /// power of two `L`. The reported cost is always `L` leaf hashes and
    /// `L - 1` node hashes. Fails with [`MerkleError::InvalidInput`] on an
    /// empty sequence and [`MerkleError::SerializationFailure`] if any leaf,
    /// padding included, has no canonical string; no tree is produced in
    /// either case.
    pub fn new_with_config(
        mut leaves: Vec<T>,
        config: TreeConfig,
    ) -> CostResult<Self, MerkleError> {
        let mut cost = OperationCost::default();

        if leaves.is_empty() {
            return Err(MerkleError::InvalidInput(
                "cannot construct an empty Merkle tree".to_owned(),
            ))
            .wrap_with_cost(cost);
        }

        let data_len = leaves.len();
        let leaf_count = cost_return_on_error_no_add!(
            cost,
            data_len
                .checked_next_power_of_two()
                .filter(|count| count.checked_mul(2).is_some())
                .ok_or_else(|| MerkleError::InvalidInput(format!(
                    "{} leaves cannot be padded to a power of two",
                    data_len
                )))
        );
        leaves.resize_with(leaf_count, T::zero);

        let leaf_strings = cost_return_on_error_no_add!(
            cost,
            leaves
                .iter()
                .map(CanonicalLeaf::canonical_string)
                .collect::<Result<Vec<_>, _>>()
        );

        let nodes = build_nodes::<H>(&leaf_strings, &config);
        cost.hash_leaf_calls += saturating_u32(leaf_count);
        cost.hash_node_calls += saturating_u32(leaf_count - 1);

        let height = leaf_count.trailing_zeros();
        debug!(
            hasher = H::NAME,
            scheme = ?config.scheme,
            leaves = data_len,
            padded = leaf_count,
            height,
            hash_calls = cost.total_hash_calls(),
            "built merkle tree"
        );

        Ok(MerkleTree {
            leaves,
            leaf_strings,
            data_len,
            height,
            nodes,
            config,
            marker: PhantomData,
        })
        .wrap_with_cost(cost)
    }

    /// The root digest, the tree's commitment.
    pub fn root(&self) -> &Digest {
        &self.nodes[0]
    }

    /// `log2` of the padded leaf count. A single-leaf tree has height 0.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of leaves after padding (a power of two).
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Number of leaves supplied before padding.
    pub fn data_len(&self) -> usize {
        self.data_len
    }

    /// The padded leaf sequence.
    pub fn leaves(&self) -> &[T] {
        &self.leaves
    }

    /// Canonical strings of the padded leaf sequence.
    pub fn leaf_strings(&self) -> &[String] {
        &self.leaf_strings
    }

    /// Configuration the tree was built with.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Digest of node `node_id`, or `None` outside `[1, 2L)`.
    pub fn node(&self, node_id: usize) -> Option<&Digest> {
        node_id.checked_sub(1).and_then(|index| self.nodes.get(index))
    }

    /// What node `node_id`'s digest was computed from.
    pub fn fact(&self, node_id: usize) -> Option<Fact<'_>> {
        let leaf_count = self.leaf_count();
        if node_id == 0 || node_id >= 2 * leaf_count {
            None
        } else if node_id >= leaf_count {
            Some(Fact::Leaf(&self.leaf_strings[node_id - leaf_count]))
        } else {
            Some(Fact::Node {
                left: &self.nodes[2 * node_id - 1],
                right: &self.nodes[2 * node_id],
            })
        }
    }

    /// Fact of the first node (breadth-first) whose digest is `digest`.
    ///
    /// Equal leaves share a digest, so this is a search, not an identity.
    pub fn fact_for_digest(&self, digest: &Digest) -> Option<Fact<'_>> {
        let index = self.nodes.iter().position(|node| node == digest)?;
        self.fact(index + 1)
    }

    /// Sibling digests authenticating leaf `leaf_id`, root level first.
    ///
    /// The path is read off the bits of `leaf_id + L` below the leading one,
    /// most significant first: a set bit means the walk goes right and the
    /// left sibling is recorded.
    pub fn authentication_path(&self, leaf_id: usize) -> Result<Vec<Digest>, MerkleError> {
        let leaf_count = self.leaf_count();
        if leaf_id >= leaf_count {
            return Err(MerkleError::OutOfRange {
                leaf_id,
                leaf_count,
            });
        }

        let node_id = leaf_id + leaf_count;
        let mut current = 1usize;
        let mut decommitment = Vec::with_capacity(self.height as usize);
        for level in (0..self.height).rev() {
            let (left, right) = (2 * current, 2 * current + 1);
            if (node_id >> level) & 1 == 1 {
                decommitment.push(self.nodes[left - 1].clone());
                current = right;
            } else {
                decommitment.push(self.nodes[right - 1].clone());
                current = left;
            }
        }
        debug_assert_eq!(current, node_id);

        trace!(leaf_id, node_id, height = self.height, "extracted authentication path");
        Ok(decommitment)
    }

    /// [`authentication_path`](Self::authentication_path) bundled with its
    /// leaf id.
    pub fn prove(&self, leaf_id: usize) -> Result<MerkleProof, MerkleError> {
        let decommitment = self.authentication_path(leaf_id)?;
        Ok(MerkleProof::new(leaf_id as u64, decommitment))
    }
}

/// Hash every level bottom-up and lay the digests out breadth-first.
fn build_nodes<H: MerkleHasher>(leaf_strings: &[String], config: &TreeConfig) -> Vec<Digest> {
    let mut levels = vec![hash_leaves::<H>(leaf_strings, config)];
    while let Some(level) = levels.last().filter(|level| level.len() > 1) {
        let parents = hash_parents::<H>(level, config);
        levels.push(parents);
    }
    levels.into_iter().rev().flatten().collect()
}

fn hash_leaves<H: MerkleHasher>(leaf_strings: &[String], config: &TreeConfig) -> Vec<Digest> {
    let scheme = config.scheme;
    #[cfg(feature = "parallel")]
    if leaf_strings.len() >= config.parallel_threshold {
        use rayon::prelude::*;
        return leaf_strings
            .par_iter()
            .map(|leaf| leaf_digest::<H>(scheme, leaf))
            .collect();
    }
    leaf_strings
        .iter()
        .map(|leaf| leaf_digest::<H>(scheme, leaf))
        .collect()
}

fn hash_parents<H: MerkleHasher>(children: &[Digest], config: &TreeConfig) -> Vec<Digest> {
    let scheme = config.scheme;
    #[cfg(feature = "parallel")]
    if children.len() / 2 >= config.parallel_threshold {
        use rayon::prelude::*;
        return children
            .par_chunks_exact(2)
            .map(|pair| node_digest::<H>(scheme, &pair[0], &pair[1]))
            .collect();
    }
    children
        .chunks_exact(2)
        .map(|pair| node_digest::<H>(scheme, &pair[0], &pair[1]))
        .collect()
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
