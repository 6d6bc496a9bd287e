//! Combinatorics of Weyl groups and root systems used to evaluate
//! nilpotent-cohomology formulas (Kostant, Enright) for unitarizable
//! highest-weight modules.
//!
//! The building blocks, leaf first:
//!
//! - [`cartan`] and [`root_system`]: Cartan types and their ambient root
//!   realizations over exact rationals.
//! - [`group`] and [`element`]: Weyl groups as matrix groups, with length,
//!   reduced words, and Bruhat covers derived from the action on roots.
//! - [`minimal`]: minimal-length coset representatives of parabolic
//!   quotients, via a positive-coefficient orbit walk.
//! - [`bruhat`] and [`poset`]: cover graphs and posets over representative
//!   sets, with weight-labeled variants.
//! - [`facets`]: the ρ-shifted fan of Weyl chambers.
//! - [`enright`]: the reflection subgroup W_λ of a weight, its Coxeter
//!   generators (Dyer's criterion), and its length-graded dominance
//!   classes.

pub mod bruhat;
pub mod cartan;
pub mod element;
pub mod enright;
pub mod error;
pub mod facets;
pub mod group;
pub mod minimal;
pub mod poset;
pub mod root_system;

pub use weylmath;

/// Structs, traits, and constants.
pub mod prelude {
    pub use crate::bruhat::{
        act_on_weight, parabolic_bruhat_graph, parabolic_poset, parabolic_weight_graph,
        parabolic_weight_graph_enum, parabolic_weight_poset,
    };
    pub use crate::cartan::CartanType;
    pub use crate::element::WeylElement;
    pub use crate::enright::{
        GeneratingRoots, ParabolicPair, RootScalarProduct, SubsystemData,
        dyer_coxeter_generators, generate_subgroup,
    };
    pub use crate::error::{WeylError, WeylResult};
    pub use crate::facets::RootSystemFacets;
    pub use crate::group::WeylGroup;
    pub use crate::minimal::{Side, minimal_representatives};
    pub use crate::poset::{CoverGraph, Poset};
    pub use crate::root_system::{Root, RootSystem};
    pub use weylmath::{QMatrix, QVector, Rational, qvector};
}

pub use prelude::*;
