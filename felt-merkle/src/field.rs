//! Prime field element used as the default leaf type.
//!
//! Only what a commitment needs lives here: reduction on construction and a
//! canonical string. Field arithmetic belongs to the proof system using the
//! tree.

use std::fmt;

use crate::{CanonicalLeaf, MerkleError};

/// An element of the prime field with modulus `3 * 2^30 + 1`.
///
/// The canonical string is the centered representative, so small negative
/// values print with a minus sign: `FieldElement::new(-1)` serializes as
/// `"-1"` rather than `"3221225472"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldElement(u64);

impl FieldElement {
    /// Field modulus `p = 3 * 2^30 + 1`.
    pub const MODULUS: u64 = 3 * (1 << 30) + 1;

    /// Create an element, reducing `value` modulo [`Self::MODULUS`].
    pub fn new(value: i64) -> Self {
        FieldElement(value.rem_euclid(Self::MODULUS as i64) as u64)
    }

    /// The reduced value in `[0, p)`.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Representative in `[-(p-1)/2, (p-1)/2]`.
    pub fn centered(&self) -> i64 {
        let half = (Self::MODULUS / 2) as i64;
        ((self.0 as i64 + half) % Self::MODULUS as i64) - half
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        FieldElement(value % Self::MODULUS)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.centered())
    }
}

impl CanonicalLeaf for FieldElement {
    fn canonical_string(&self) -> Result<String, MerkleError> {
        if self.0 >= Self::MODULUS {
            // Only reachable through deserialization of an unreduced value.
            return Err(MerkleError::SerializationFailure(format!(
                "field element {} is not reduced modulo {}",
                self.0,
                Self::MODULUS
            )));
        }
        Ok(self.to_string())
    }

    fn zero() -> Self {
        FieldElement(0)
    }
}
