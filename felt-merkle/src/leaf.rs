use crate::MerkleError;

/// A value that can sit at the bottom of a [`MerkleTree`](crate::MerkleTree).
///
/// The canonical string is what gets hashed, so it must be stable across
/// calls and distinct for distinct values. [`zero`](CanonicalLeaf::zero) is
/// the additive identity used to pad the leaf sequence to a power of two.
pub trait CanonicalLeaf: Sized {
    /// Serialize the value to its canonical string.
    ///
    /// Returns [`MerkleError::SerializationFailure`] if the value has no
    /// canonical form.
    fn canonical_string(&self) -> Result<String, MerkleError>;

    /// The padding value.
    fn zero() -> Self;
}

macro_rules! impl_canonical_leaf_for_int {
    ($($int:ty),+ $(,)?) => {
        $(
            impl CanonicalLeaf for $int {
                fn canonical_string(&self) -> Result<String, MerkleError> {
                    Ok(self.to_string())
                }

                fn zero() -> Self {
                    0
                }
            }
        )+
    };
}

impl_canonical_leaf_for_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_serialize_as_decimal() {
        assert_eq!(42u64.canonical_string().expect("u64"), "42");
        assert_eq!((-7i32).canonical_string().expect("i32"), "-7");
        assert_eq!(u8::zero().canonical_string().expect("zero"), "0");
    }
}
