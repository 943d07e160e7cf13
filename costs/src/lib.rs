#![deny(missing_docs)]
//! Interface crate to unify how the hashing work of tree operations is
//! reported.
//!
//! Every construction or verification call returns its value wrapped into a
//! [`CostContext`] so callers can see exactly how many times the hash
//! primitive was invoked.

pub mod context;

use std::ops::{Add, AddAssign};

pub use context::{CostContext, CostResult, CostsExt};

/// Number of hash primitive invocations performed by an operation.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct OperationCost {
    /// How many times a serialized leaf was hashed.
    pub hash_leaf_calls: u32,
    /// How many times two child digests were hashed into a parent.
    pub hash_node_calls: u32,
}

impl OperationCost {
    /// Helper function to build default `OperationCost` with different
    /// `hash_leaf_calls`.
    pub fn with_hash_leaf_calls(hash_leaf_calls: u32) -> Self {
        OperationCost {
            hash_leaf_calls,
            ..Default::default()
        }
    }

    /// Helper function to build default `OperationCost` with different
    /// `hash_node_calls`.
    pub fn with_hash_node_calls(hash_node_calls: u32) -> Self {
        OperationCost {
            hash_node_calls,
            ..Default::default()
        }
    }

    /// Total number of hash evaluations, leaves and nodes together.
    pub fn total_hash_calls(&self) -> u64 {
        self.hash_leaf_calls as u64 + self.hash_node_calls as u64
    }

    /// Returns `true` if no hashing happened at all.
    pub fn is_nothing(&self) -> bool {
        self == &Self::default()
    }
}

impl Add for OperationCost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        OperationCost {
            hash_leaf_calls: self.hash_leaf_calls + rhs.hash_leaf_calls,
            hash_node_calls: self.hash_node_calls + rhs.hash_node_calls,
        }
    }
}

impl AddAssign for OperationCost {
    fn add_assign(&mut self, rhs: Self) {
        self.hash_leaf_calls += rhs.hash_leaf_calls;
        self.hash_node_calls += rhs.hash_node_calls;
    }
}

/// Macro to achieve a kind of what `?` operator does, but with `CostContext` on
/// top. On `Err` it returns early with the error converted via `Into` and
/// wrapped into the cost accumulated so far, so earlier hashing is not lost.
#[macro_export]
macro_rules! cost_return_on_error_no_add {
    ( $cost:expr, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result = { $($body)+ };
            match result {
                Ok(x) => x,
                Err(e) => return Err(e.into()).wrap_with_cost($cost),
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_cost(calls: u32) -> OperationCost {
        OperationCost::with_hash_leaf_calls(calls)
    }

    #[test]
    fn test_helpers_and_totals() {
        assert!(OperationCost::default().is_nothing());
        assert_eq!(leaf_cost(4).hash_leaf_calls, 4);
        assert_eq!(OperationCost::with_hash_node_calls(3).hash_node_calls, 3);

        let total = leaf_cost(4) + OperationCost::with_hash_node_calls(3);
        assert_eq!(total.total_hash_calls(), 7);
        assert!(!total.is_nothing());

        let mut acc = OperationCost::default();
        acc += total;
        acc += leaf_cost(1);
        assert_eq!(
            acc,
            OperationCost {
                hash_leaf_calls: 5,
                hash_node_calls: 3,
            }
        );
    }

    #[test]
    fn test_wrap_and_unwrap() {
        let wrapped = "root".wrap_with_cost(leaf_cost(2));
        assert_eq!(wrapped.cost, leaf_cost(2));
        assert_eq!(wrapped.unwrap(), "root");
    }

    fn early_return(fail: bool) -> CostResult<u32, String> {
        let mut cost = leaf_cost(1);
        cost += OperationCost::with_hash_node_calls(2);
        let value = cost_return_on_error_no_add!(
            cost,
            if fail {
                Err("boom".to_owned())
            } else {
                Ok(2)
            }
        );
        Ok(value).wrap_with_cost(cost)
    }

    #[test]
    fn test_early_return_keeps_accumulated_cost() {
        let expected = OperationCost {
            hash_leaf_calls: 1,
            hash_node_calls: 2,
        };

        let ok = early_return(false);
        assert_eq!(ok.cost, expected);
        assert_eq!(ok.value, Ok(2));

        let err = early_return(true);
        assert_eq!(err.cost, expected);
        assert_eq!(err.value, Err("boom".to_owned()));
    }
}
