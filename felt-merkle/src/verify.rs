//! Standalone verification of an authentication path.
//!
//! Pure function, no tree required: the leaf is hashed and combined with the
//! siblings from the leaf level upward, and the result compared to the root.

use felt_merkle_costs::{CostResult, CostsExt, OperationCost, cost_return_on_error_no_add};
use tracing::trace;

use crate::{
    CanonicalLeaf, MerkleError,
    hash::{Digest, HashScheme, MerkleHasher, leaf_digest, node_digest},
};

/// Check that `leaf_data` sits at `leaf_id` under `root`, using the plain
/// hash scheme.
///
/// `decommitment` is ordered root level first, as produced by
/// [`MerkleTree::authentication_path`](crate::MerkleTree::authentication_path).
/// A mismatch is `Ok(false)`; the only error is a leaf that cannot be
/// serialized.
///
/// A path of length `n` addresses leaves `0..2^n`. A larger `leaf_id` is
/// `Ok(false)` rather than being reduced modulo `2^n`, so leaf `5` with the
/// path of leaf `1` in a four-leaf tree does not verify.
pub fn verify_decommitment<H: MerkleHasher, T: CanonicalLeaf>(
    leaf_id: usize,
    leaf_data: &T,
    decommitment: &[Digest],
    root: &Digest,
) -> Result<bool, MerkleError> {
    verify_decommitment_with_scheme::<H, T>(
        HashScheme::Plain,
        leaf_id,
        leaf_data,
        decommitment,
        root,
    )
    .unwrap()
}

/// [`verify_decommitment`] for an explicit hash scheme, reporting the hash
/// calls made (one leaf hash plus one node hash per sibling).
///
/// The tree is taken to have `2^len(decommitment)` leaves. A `leaf_id`
/// outside that range cannot be authenticated and yields `Ok(false)` without
/// hashing.
pub fn verify_decommitment_with_scheme<H: MerkleHasher, T: CanonicalLeaf>(
    scheme: HashScheme,
    leaf_id: usize,
    leaf_data: &T,
    decommitment: &[Digest],
    root: &Digest,
) -> CostResult<bool, MerkleError> {
    let mut cost = OperationCost::default();
    let leaf = cost_return_on_error_no_add!(cost, leaf_data.canonical_string());

    let height = decommitment.len();
    let leaf_count = u32::try_from(height)
        .ok()
        .and_then(|height| 1usize.checked_shl(height));
    let node_id = match leaf_count {
        Some(leaf_count) if leaf_id < leaf_count => leaf_id + leaf_count,
        _ => {
            trace!(leaf_id, height, "leaf id cannot be addressed by decommitment");
            return Ok(false).wrap_with_cost(cost);
        }
    };

    let mut current = leaf_digest::<H>(scheme, &leaf);
    cost.hash_leaf_calls += 1;

    for (level, sibling) in decommitment.iter().rev().enumerate() {
        current = if (node_id >> level) & 1 == 0 {
            node_digest::<H>(scheme, &current, sibling)
        } else {
            node_digest::<H>(scheme, sibling, &current)
        };
        cost.hash_node_calls += 1;
    }

    let verified = &current == root;
    trace!(leaf_id, height, verified, "verified decommitment");
    Ok(verified).wrap_with_cost(cost)
}
