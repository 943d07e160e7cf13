//! Value-plus-cost wrapper.

use crate::OperationCost;

/// Operation result paired with the hashing it took to produce.
#[must_use]
#[derive(Debug, Eq, PartialEq)]
pub struct CostContext<T> {
    /// Wrapped operation's return value.
    pub value: T,
    /// Hash calls spent producing `value`.
    pub cost: OperationCost,
}

impl<T> CostContext<T> {
    /// Take wrapped value out dropping cost data.
    pub fn unwrap(self) -> T {
        self.value
    }
}

/// Type alias for `Result` wrapped into `CostContext`.
pub type CostResult<T, E> = CostContext<Result<T, E>>;

/// Extension trait to add costs context to values.
pub trait CostsExt {
    /// Wraps any value into a `CostContext` object with provided costs.
    fn wrap_with_cost(self, cost: OperationCost) -> CostContext<Self>
    where
        Self: Sized,
    {
        CostContext { value: self, cost }
    }
}

impl<T> CostsExt for T {}
