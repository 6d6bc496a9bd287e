//! Simplicial polyhedral fans given by rays and maximal cones.
//!
//! This is the minimal amount of polyhedral geometry needed to expose the
//! facets of a root-system fan: every maximal cone is assumed simplicial
//! (its rays are linearly independent), so the faces of a cone are exactly
//! the subsets of its rays.

use std::collections::BTreeSet;

use itertools::Itertools;

use crate::matrix::rank_of_vectors;
use crate::{QVector, Rational};

/// Polyhedral fan determined by a list of rays and the maximal cones
/// spanned by subsets of them.
#[derive(Debug, Clone)]
pub struct Fan {
    rays: Vec<QVector>,
    max_cones: Vec<Vec<usize>>,
    ambient_dim: u8,
}

impl Fan {
    /// Constructs a fan from rays and maximal cones, each given as a list of
    /// ray indices.
    ///
    /// # Panics
    ///
    /// Panics if a cone references a ray index out of bounds or is not
    /// simplicial.
    pub fn new(rays: Vec<QVector>, max_cones: Vec<Vec<usize>>) -> Self {
        let ambient_dim = rays.iter().map(|r| r.ndim()).max().unwrap_or(0);
        for cone in &max_cones {
            let cone_rays: Vec<QVector> = cone.iter().map(|&i| rays[i].clone()).collect();
            assert_eq!(
                rank_of_vectors(&cone_rays),
                cone.len(),
                "maximal cone rays must be linearly independent",
            );
        }
        Self {
            rays,
            max_cones,
            ambient_dim,
        }
    }

    /// Returns the rays of the fan.
    pub fn rays(&self) -> &[QVector] {
        &self.rays
    }
    /// Returns the dimension of the ambient space.
    pub fn ambient_dim(&self) -> u8 {
        self.ambient_dim
    }
    /// Returns the number of maximal cones.
    pub fn max_cone_count(&self) -> usize {
        self.max_cones.len()
    }

    /// Returns all cones of the fan (faces of the maximal cones,
    /// de-duplicated), optionally filtered by dimension or codimension.
    /// Codimension is relative to the ambient space.
    pub fn cones(&self, dim: Option<usize>, codim: Option<usize>) -> Vec<Cone> {
        let dim = match (dim, codim) {
            (Some(d), _) => Some(d),
            (None, Some(c)) => Some(self.ambient_dim as usize - c),
            (None, None) => None,
        };
        let mut seen = BTreeSet::new();
        let mut ret = vec![];
        for max_cone in &self.max_cones {
            for face in max_cone.iter().copied().powerset() {
                // Faces of a simplicial cone are the subsets of its rays,
                // so the face dimension is the subset size.
                if dim.is_some_and(|d| d != face.len()) {
                    continue;
                }
                let mut key = face.clone();
                key.sort_unstable();
                if seen.insert(key) {
                    ret.push(Cone {
                        rays: face.iter().map(|&i| self.rays[i].clone()).collect(),
                        ray_indices: face,
                    });
                }
            }
        }
        ret
    }
}

/// Cone of a fan, spanned by a subset of its rays.
#[derive(Debug, Clone)]
pub struct Cone {
    ray_indices: Vec<usize>,
    rays: Vec<QVector>,
}

impl Cone {
    /// Returns the indices of the rays spanning the cone.
    pub fn ray_indices(&self) -> &[usize] {
        &self.ray_indices
    }
    /// Returns the rays spanning the cone.
    pub fn rays(&self) -> &[QVector] {
        &self.rays
    }
    /// Returns the dimension of the cone.
    pub fn dim(&self) -> usize {
        self.rays.len()
    }
    /// Returns the cone as a polyhedron with its apex at the origin.
    pub fn polyhedron(&self) -> Polyhedron {
        let ndim = self.rays.iter().map(|r| r.ndim()).max().unwrap_or(0);
        Polyhedron {
            apex: QVector::zero(ndim),
            rays: self.rays.clone(),
        }
    }
}

/// Unbounded polyhedron given as a translated cone: an apex point plus a
/// set of rays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polyhedron {
    apex: QVector,
    rays: Vec<QVector>,
}

impl Polyhedron {
    /// Returns the apex of the polyhedron.
    pub fn apex(&self) -> &QVector {
        &self.apex
    }
    /// Returns the rays of the polyhedron.
    pub fn rays(&self) -> &[QVector] {
        &self.rays
    }
    /// Returns a translated copy of the polyhedron.
    #[must_use]
    pub fn translate(&self, offset: &QVector) -> Polyhedron {
        Polyhedron {
            apex: &self.apex + offset,
            rays: self.rays.clone(),
        }
    }
    /// Reduces the polyhedron to a single defining vector: the apex plus the
    /// sum of the rays, which lies in the relative interior.
    pub fn to_vector(&self) -> QVector {
        self.rays
            .iter()
            .fold(self.apex.clone(), |acc, r| &acc + r)
    }
}

/// Scales `v` so that its entries are coprime integers, preserving
/// direction. Useful for de-duplicating rays.
pub fn primitive_ray(v: &QVector) -> QVector {
    fn gcd(a: i64, b: i64) -> i64 {
        if b == 0 { a.abs() } else { gcd(b, a % b) }
    }
    let lcm = v.iter().map(|x| *x.denom()).fold(1i64, |a, b| a / gcd(a, b) * b);
    let scaled: Vec<i64> = v
        .iter()
        .map(|x| (x * Rational::from(lcm)).to_integer())
        .collect();
    let divisor = scaled.iter().copied().fold(0i64, gcd);
    if divisor == 0 {
        return v.clone();
    }
    scaled.iter().map(|&x| Rational::from(x / divisor)).collect()
}
