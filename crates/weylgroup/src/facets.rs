//! Fan of Weyl chambers and its ρ-shifted facets.
//!
//! Weights of category O fall into equivalence blocks according to which
//! face of the shifted chamber fan they lie on; this module exposes those
//! faces as defining vectors.

use std::collections::HashMap;
use std::sync::OnceLock;

use weylmath::{Fan, QVector, Rational, primitive_ray};

use crate::cartan::CartanType;
use crate::group::WeylGroup;

/// Fan of Weyl chambers of a root system, built lazily and cached for the
/// lifetime of the value.
///
/// The maximal cones are the images of the fundamental-weight cone under
/// the group. When the ambient space is larger than the rank, every cone
/// is lifted by an extra ray along the all-ones vector so that the fan
/// stays simplicial in the full ambient dimension.
#[derive(Debug)]
pub struct RootSystemFacets {
    group: WeylGroup,
    fan: OnceLock<Fan>,
}

impl RootSystemFacets {
    /// Constructs the facet engine for a Cartan type.
    pub fn new(cartan_type: CartanType) -> Self {
        Self::from_group(WeylGroup::new(cartan_type))
    }

    /// Constructs the facet engine over an existing Weyl group.
    pub fn from_group(group: WeylGroup) -> Self {
        RootSystemFacets {
            group,
            fan: OnceLock::new(),
        }
    }

    /// Returns the underlying Weyl group.
    pub fn group(&self) -> &WeylGroup {
        &self.group
    }

    /// Returns the chamber fan, building it on first use.
    pub fn fan(&self) -> &Fan {
        self.fan.get_or_init(|| build_chamber_fan(&self.group))
    }

    /// Yields the defining vector of each cone of the chamber fan shifted
    /// by `−ρ`, optionally filtered by dimension or codimension.
    pub fn facets(
        &self,
        dim: Option<usize>,
        codim: Option<usize>,
    ) -> impl Iterator<Item = QVector> + '_ {
        let neg_rho = -self.group.root_system().rho();
        self.fan()
            .cones(dim, codim)
            .into_iter()
            .map(move |cone| cone.polyhedron().translate(&neg_rho).to_vector())
    }
}

fn build_chamber_fan(group: &WeylGroup) -> Fan {
    let root_system = group.root_system();
    let mut rays: Vec<QVector> = vec![];
    let mut ray_index: HashMap<QVector, usize> = HashMap::new();
    let mut intern = |v: QVector| -> usize {
        *ray_index.entry(v.clone()).or_insert_with(|| {
            rays.push(v);
            rays.len() - 1
        })
    };

    let ambient_dim = root_system.ambient_dim();
    let lifting_ray = (ambient_dim > root_system.rank())
        .then(|| QVector::from_rationals((0..ambient_dim).map(|_| Rational::from(1))));

    let mut max_cones = vec![];
    for g in group.elements() {
        let mut cone: Vec<usize> = root_system
            .fundamental_weights()
            .iter()
            .map(|fw| intern(primitive_ray(&g.action(fw))))
            .collect();
        if let Some(ones) = &lifting_ray {
            cone.push(intern(ones.clone()));
        }
        max_cones.push(cone);
    }

    tracing::debug!(
        cartan_type = %root_system.cartan_type(),
        rays = rays.len(),
        max_cones = max_cones.len(),
        "built chamber fan",
    );
    Fan::new(rays, max_cones)
}

#[cfg(test)]
mod tests {
    use weylmath::qvector;

    use super::*;

    #[test]
    fn test_a2_fan_is_lifted() {
        // A2 lives in a 3-dimensional ambient space, so each of the 6
        // chambers picks up the all-ones ray: 6 orbit rays plus the lift.
        let facets = RootSystemFacets::new("A2".parse().unwrap());
        let fan = facets.fan();
        assert_eq!(fan.rays().len(), 7);
        assert_eq!(fan.max_cone_count(), 6);
        assert_eq!(fan.cones(None, None).len(), 26);
        assert!(fan.rays().contains(&qvector![1, 1, 1]));
    }

    #[test]
    fn test_a2_codim_one_facets() {
        let facets = RootSystemFacets::new("A2".parse().unwrap());
        let vectors: Vec<QVector> = facets.facets(None, Some(1)).collect();
        assert_eq!(vectors.len(), 12);
        // The wall spanned by the primitive fundamental weights (2,-1,-1)
        // and (1,1,-2), shifted by -rho = -(1,0,-1).
        assert!(vectors.contains(&qvector![2, 0, -2]));
    }

    #[test]
    fn test_b2_fan_has_no_lift() {
        let facets = RootSystemFacets::new("B2".parse().unwrap());
        let fan = facets.fan();
        assert_eq!(fan.rays().len(), 8);
        assert_eq!(fan.max_cone_count(), 8);
        // Codimension-1 cones are single rays; rho = (3/2, 1/2).
        let vectors: Vec<QVector> = facets.facets(None, Some(1)).collect();
        assert_eq!(vectors.len(), 8);
        assert!(vectors.contains(&QVector::from_rationals([
            Rational::new(-1, 2),
            Rational::new(1, 2),
        ])));
    }

    #[test]
    fn test_fan_is_cached() {
        let facets = RootSystemFacets::new("A2".parse().unwrap());
        assert!(std::ptr::eq(facets.fan(), facets.fan()));
    }
}
