//! Exact rational vector, matrix, and polyhedral-fan primitives.
//!
//! Everything here is computed over [`Rational`] so that root-system
//! arithmetic (integrality tests, orbit traversals, group-element
//! identity) is exact and hashable.

pub use {num_rational, num_traits as num, smallvec};

/// Scalar type used for all exact geometry.
pub type Rational = num_rational::Ratio<i64>;

#[macro_use]
mod vector;

pub mod fan;
pub mod matrix;

/// Structs, traits, and constants.
pub mod prelude {
    pub use crate::fan::*;
    pub use crate::matrix::*;
    pub use crate::vector::*;
    pub use crate::{Rational, qvector};
}
pub use prelude::*;
