//! Portable single-leaf inclusion proof.
//!
//! A `MerkleProof` carries a leaf id and its authentication path. The leaf
//! value itself travels separately; the verifier supplies it along with the
//! root it trusts.

use bincode::{
    BorrowDecode, Decode, Encode,
    de::{BorrowDecoder, Decoder},
    error::DecodeError,
};

use crate::{
    CanonicalLeaf, MerkleError,
    hash::{Digest, HashScheme, MerkleHasher},
    verify::verify_decommitment_with_scheme,
};


/// Longest decommitment that can address a leaf with a 64-bit node id.
const MAX_PATH_LENGTH: usize = 63;

/// Upper bound on encoded proof size accepted by
/// [`decode_from_slice`](MerkleProof::decode_from_slice).
const MAX_ENCODED_PROOF_BYTES: usize = 1024 * 1024;

/// An inclusion proof for one leaf.
///
/// bincode's `Decode` and serde's `Deserialize` apply the same checks as
/// [`decode_from_slice`](Self::decode_from_slice). Values built with
/// [`new`](Self::new) are not checked; verifying a malformed one returns
/// `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Encode)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "UncheckedProof")
)]
pub struct MerkleProof {
    /// Position of the leaf in the padded leaf sequence.
    pub leaf_id: u64,
    /// Sibling digests, root level first.
    pub decommitment: Vec<Digest>,
}

impl MerkleProof {
    /// Bundle a leaf id with its authentication path.
    pub fn new(leaf_id: u64, decommitment: Vec<Digest>) -> Self {
        MerkleProof {
            leaf_id,
            decommitment,
        }
    }

    /// Height of the tree this proof was taken from.
    pub fn height(&self) -> usize {
        self.decommitment.len()
    }

    /// Check that `leaf_data` is the proved leaf of the tree committed to by
    /// `root`.
    pub fn verify<H: MerkleHasher, T: CanonicalLeaf>(
        &self,
        scheme: HashScheme,
        leaf_data: &T,
        root: &Digest,
    ) -> Result<bool, MerkleError> {
        let Ok(leaf_id) = usize::try_from(self.leaf_id) else {
            return Ok(false);
        };
        verify_decommitment_with_scheme::<H, T>(
            scheme,
            leaf_id,
            leaf_data,
            &self.decommitment,
            root,
        )
        .unwrap()
    }

    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, MerkleError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| MerkleError::InvalidProof(format!("encode error: {}", e)))
    }

    /// Decode from bytes using bincode.
    ///
    /// Rejects trailing bytes, malformed digests, paths too long to address a
    /// leaf and leaf ids outside the tree the path implies.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self, MerkleError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<MAX_ENCODED_PROOF_BYTES>();
        let ((leaf_id, decommitment), read): ((u64, Vec<Digest>), usize) =
            bincode::decode_from_slice(bytes, config)
                .map_err(|e| MerkleError::InvalidProof(format!("decode error: {}", e)))?;
        if read != bytes.len() {
            return Err(MerkleError::InvalidProof(format!(
                "{} trailing bytes after proof",
                bytes.len() - read
            )));
        }
        Self::checked(leaf_id, decommitment)
    }

    fn checked(leaf_id: u64, decommitment: Vec<Digest>) -> Result<Self, MerkleError> {
        let proof = MerkleProof::new(leaf_id, decommitment);
        proof.validate()?;
        Ok(proof)
    }

    fn validate(&self) -> Result<(), MerkleError> {
        if self.decommitment.len() > MAX_PATH_LENGTH {
            return Err(MerkleError::InvalidProof(format!(
                "path of {} siblings exceeds maximum of {}",
                self.decommitment.len(),
                MAX_PATH_LENGTH
            )));
        }
        let leaf_count = 1u64 << self.decommitment.len();
        if self.leaf_id >= leaf_count {
            return Err(MerkleError::InvalidProof(format!(
                "leaf id {} is outside a tree of {} leaves",
                self.leaf_id, leaf_count
            )));
        }
        if let Some(position) = self
            .decommitment
            .iter()
            .position(|digest| !digest.is_well_formed())
        {
            return Err(MerkleError::InvalidProof(format!(
                "sibling {} is not a lowercase hex digest",
                position
            )));
        }
        Ok(())
    }
}

impl<Context> Decode<Context> for MerkleProof {
    fn decode<D: Decoder<Context = Context>>(decoder: &mut D) -> Result<Self, DecodeError> {
        let leaf_id = u64::decode(decoder)?;
        let decommitment = Vec::<Digest>::decode(decoder)?;
        MerkleProof::checked(leaf_id, decommitment)
            .map_err(|e| DecodeError::OtherString(e.to_string()))
    }
}

impl<'de, Context> BorrowDecode<'de, Context> for MerkleProof {
    fn borrow_decode<D: BorrowDecoder<'de, Context = Context>>(
        decoder: &mut D,
    ) -> Result<Self, DecodeError> {
        let leaf_id = u64::borrow_decode(decoder)?;
        let decommitment = Vec::<Digest>::borrow_decode(decoder)?;
        MerkleProof::checked(leaf_id, decommitment)
            .map_err(|e| DecodeError::OtherString(e.to_string()))
    }
}

/// Wire shape of [`MerkleProof`] before validation.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct UncheckedProof {
    leaf_id: u64,
    decommitment: Vec<Digest>,
}

#[cfg(feature = "serde")]
impl TryFrom<UncheckedProof> for MerkleProof {
    type Error = MerkleError;

    fn try_from(proof: UncheckedProof) -> Result<Self, Self::Error> {
        MerkleProof::checked(proof.leaf_id, proof.decommitment)
    }
}
