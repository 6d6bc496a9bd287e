//! Enright-formula engine.
//!
//! Given a parabolic pair and a weight `v`, this derives the reflection
//! subgroup W_λ attached to `v`: filter the positive roots into the
//! generating sets Ψ and Φ, close the Φ-reflections into a subgroup,
//! extract its Coxeter generators by Dyer's criterion, and stratify the
//! subgroup by λ-length into dominance classes. The resulting
//! [`SubsystemData`] is the input to the cohomology assembly, which is not
//! implemented yet.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::OnceLock;

use num_traits::Zero;
use weylmath::{QVector, Rational};

use crate::cartan::CartanType;
use crate::element::WeylElement;
use crate::error::{WeylError, WeylResult};
use crate::facets::RootSystemFacets;
use crate::group::WeylGroup;
use crate::poset::Poset;
use crate::root_system::Root;

/// A Cartan type together with a parabolic index set, the fixed datum of
/// the Enright formula.
#[derive(Debug)]
pub struct ParabolicPair {
    group: WeylGroup,
    index_set: Vec<usize>,
    facets: OnceLock<RootSystemFacets>,
}

/// Generating root sets of the reflection subgroup attached to a weight.
///
/// `psi` collects the positive roots orthogonal to `v+ρ`; `phi` the
/// non-parabolic positive roots orthogonal to all of `psi` whose coroot
/// pairs to a positive integer with `v+ρ`, restricted to short roots when
/// `psi` contains a long root.
#[derive(Debug, Clone)]
pub struct GeneratingRoots {
    /// Positive roots orthogonal to `v+ρ`.
    pub psi: Vec<Root>,
    /// Non-parabolic generating roots of W_λ.
    pub phi: Vec<Root>,
}

/// Full output of the Enright engine for one weight.
#[derive(Debug, Clone)]
pub struct SubsystemData {
    /// The generating sets Ψ and Φ the subgroup was closed from.
    pub generating_roots: GeneratingRoots,
    /// Ambient positive roots whose reflection lies in W_λ.
    pub lambda_positive_roots: Vec<Root>,
    /// Roots of the Coxeter generators of W_λ.
    pub lambda_simple_roots: Vec<Root>,
    /// λ-positive roots supported on the parabolic index set.
    pub lambda_parabolic_roots: Vec<Root>,
    /// λ-positive roots outside the parabolic index set.
    pub lambda_nonparabolic_roots: Vec<Root>,
    /// Elements of W_λ, sorted by ambient length and then reduced word.
    pub subgroup: Vec<WeylElement>,
    /// λ-length ↦ elements of W_λ whose action on ρ is strictly dominant
    /// with respect to the λ-parabolic roots.
    pub dominance_classes: BTreeMap<usize, Vec<WeylElement>>,
}

/// Positive root annotated with its coroot pairing against a shifted
/// weight, used to label root posets in diagrams.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RootScalarProduct {
    /// The annotated root.
    pub root: Root,
    /// Coroot pairing of the root against the shifted weight.
    pub pairing: Rational,
}

impl fmt::Display for RootScalarProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.root, self.pairing)
    }
}

impl ParabolicPair {
    /// Constructs a parabolic pair, validating that `index_set` consists of
    /// Dynkin-diagram nodes of the Cartan type.
    pub fn new(cartan_type: CartanType, index_set: &[usize]) -> WeylResult<Self> {
        let group = WeylGroup::new(cartan_type);
        group.root_system().validate_index_set(index_set)?;
        Ok(ParabolicPair {
            group,
            index_set: index_set.to_vec(),
            facets: OnceLock::new(),
        })
    }

    /// Returns the ambient Weyl group.
    pub fn group(&self) -> &WeylGroup {
        &self.group
    }
    /// Returns the parabolic index set.
    pub fn index_set(&self) -> &[usize] {
        &self.index_set
    }

    /// Returns the facet engine of the ambient root system, built on first
    /// use.
    pub fn root_system_facets(&self) -> &RootSystemFacets {
        self.facets
            .get_or_init(|| RootSystemFacets::new(self.group.cartan_type()))
    }

    /// Returns the poset of non-parabolic positive roots, as an induced
    /// subposet of the full root poset.
    pub fn nonparabolic_root_poset(&self) -> Poset<Root> {
        let root_system = self.group.root_system();
        let nonparabolic: HashSet<Root> = root_system
            .positive_roots_nonparabolic(&self.index_set)
            .into_iter()
            .collect();
        root_system.root_poset().subposet(|r| nonparabolic.contains(r))
    }

    /// Returns the non-parabolic root poset with each root annotated by its
    /// coroot pairing against `v+ρ`. With `only_nonnegative`, roots with a
    /// negative pairing are dropped (covers are recomputed within the rest).
    pub fn scalar_product_poset(
        &self,
        v: &QVector,
        only_nonnegative: bool,
    ) -> Poset<RootScalarProduct> {
        let shifted = v + self.group.root_system().rho();
        let labeled = self.nonparabolic_root_poset().relabel(|root| RootScalarProduct {
            root: root.clone(),
            pairing: root.associated_coroot().dot(&shifted),
        });
        if only_nonnegative {
            labeled.subposet(|r| r.pairing >= Rational::zero())
        } else {
            labeled
        }
    }

    /// Transports a poset of elements of `source` into this pair's group
    /// through an embedding of simple reflections: each element is replaced
    /// by the product of the images of its reduced-word letters.
    ///
    /// The embedding maps 1-based simple-reflection indices of `source` to
    /// reflections of the ambient group; it should respect the braid
    /// relations of `source`, so that the image is independent of the
    /// reduced word chosen. Used to compare Bruhat orders across groups
    /// (relative BGG resolutions, Enright-Shelton equivalence).
    ///
    /// # Panics
    ///
    /// Panics if a reduced-word letter is missing from `embedding`.
    pub fn poset_from_embedding(
        &self,
        source: &WeylGroup,
        poset: &Poset<WeylElement>,
        embedding: &HashMap<usize, WeylElement>,
    ) -> Poset<WeylElement> {
        poset.relabel(|w| {
            source
                .reduced_word(w)
                .iter()
                .fold(self.group.one(), |acc, i| &acc * &embedding[i])
        })
    }

    /// Computes the generating root sets Ψ and Φ for a weight.
    pub fn generating_roots(&self, v: &QVector) -> GeneratingRoots {
        let root_system = self.group.root_system();
        let shifted = v + root_system.rho();

        let psi: Vec<Root> = root_system
            .positive_roots()
            .iter()
            .filter(|r| r.scalar(&shifted).is_zero())
            .cloned()
            .collect();
        // The short-root constraint only exists where two root lengths do.
        let psi_has_long = root_system.cartan_type().has_two_root_lengths()
            && psi.iter().any(|r| !r.is_short_root());

        let phi = root_system
            .positive_roots_nonparabolic(&self.index_set)
            .into_iter()
            .filter(|r| {
                let pairing = r.associated_coroot().dot(&shifted);
                pairing.is_integer()
                    && pairing > Rational::zero()
                    && (!psi_has_long || r.is_short_root())
                    && psi.iter().all(|s| r.scalar(s.to_vector()).is_zero())
            })
            .collect();
        GeneratingRoots { psi, phi }
    }

    /// Runs the full engine for a weight: root filtering, subgroup closure,
    /// Coxeter extraction, and the length-graded dominance decomposition.
    pub fn subsystem_data(&self, v: &QVector) -> SubsystemData {
        let root_system = self.group.root_system();
        let generating_roots = self.generating_roots(v);

        let generators: Vec<WeylElement> = generating_roots
            .phi
            .iter()
            .map(|r| WeylElement::reflection(r.to_vector()))
            .collect();
        let mut subgroup = generate_subgroup(&self.group, &generators);
        let subgroup_set: HashSet<WeylElement> = subgroup.iter().cloned().collect();
        subgroup.sort_by_cached_key(|w| (self.group.length(w), self.group.reduced_word(w)));

        let lambda_positive_roots: Vec<Root> = root_system
            .positive_roots()
            .iter()
            .filter(|r| subgroup_set.contains(&WeylElement::reflection(r.to_vector())))
            .cloned()
            .collect();
        let subgroup_reflections: Vec<WeylElement> = lambda_positive_roots
            .iter()
            .map(|r| WeylElement::reflection(r.to_vector()))
            .collect();
        tracing::debug!(
            subgroup_order = subgroup.len(),
            reflections = subgroup_reflections.len(),
            "closed reflection subgroup",
        );

        let coxeter_generators = dyer_coxeter_generators(&self.group, &subgroup_reflections);
        let lambda_simple_roots = coxeter_generators
            .iter()
            .filter_map(|t| self.group.reflection_root(t))
            .cloned()
            .collect();

        let is_parabolic =
            |r: &Root| r.support().all(|i| self.index_set.contains(&i));
        let lambda_parabolic_roots: Vec<Root> = lambda_positive_roots
            .iter()
            .filter(|&r| is_parabolic(r))
            .cloned()
            .collect();
        let lambda_nonparabolic_roots: Vec<Root> = lambda_positive_roots
            .iter()
            .filter(|&r| !is_parabolic(r))
            .cloned()
            .collect();

        // λ-length: positive λ-roots flipped to negative by the inverse
        // action.
        let lambda_vectors: HashSet<QVector> = lambda_positive_roots
            .iter()
            .map(|r| r.to_vector().clone())
            .collect();
        let lambda_length = |w: &WeylElement| -> usize {
            let w_inv = w.inverse();
            lambda_positive_roots
                .iter()
                .filter(|a| lambda_vectors.contains(&-&w_inv.action(a.to_vector())))
                .count()
        };

        let rho = root_system.rho();
        let mut dominance_classes: BTreeMap<usize, Vec<WeylElement>> = BTreeMap::new();
        for w in &subgroup {
            let w_rho = w.action(rho);
            let dominant = lambda_parabolic_roots
                .iter()
                .all(|r| r.scalar(&w_rho) > Rational::zero());
            if dominant {
                dominance_classes
                    .entry(lambda_length(w))
                    .or_default()
                    .push(w.clone());
            }
        }

        SubsystemData {
            generating_roots,
            lambda_positive_roots,
            lambda_simple_roots,
            lambda_parabolic_roots,
            lambda_nonparabolic_roots,
            subgroup,
            dominance_classes,
        }
    }

    /// Kostant's cohomology formula over the minimal representatives.
    pub fn kostant_cohomology(&self, _v: &QVector) -> WeylResult<BTreeMap<usize, Vec<QVector>>> {
        Err(WeylError::Unimplemented("Kostant cohomology assembly"))
    }
    /// Enright's cohomology formula over the dominance classes.
    pub fn enright_cohomology(&self, _v: &QVector) -> WeylResult<BTreeMap<usize, Vec<QVector>>> {
        Err(WeylError::Unimplemented("Enright cohomology assembly"))
    }
    /// Weight poset with symbolic (indeterminate) coordinates.
    pub fn symbolic_weight_poset(&self) -> WeylResult<Poset<String>> {
        Err(WeylError::Unimplemented("symbolic weight poset"))
    }
    /// Bruhat order of the quotient relative to a larger parabolic.
    pub fn relative_bgg(&self, _relative_index_set: &[usize]) -> WeylResult<Poset<WeylElement>> {
        Err(WeylError::Unimplemented("relative BGG resolution"))
    }
    /// Cones of unitarizable highest weights.
    pub fn uhw_cones(&self) -> WeylResult<Vec<QVector>> {
        Err(WeylError::Unimplemented("unitarizable highest-weight cones"))
    }
}

/// Closes a set of generators into the subgroup they generate, by
/// breadth-first multiplication from the identity.
///
/// Membership is keyed on the matrix of each element, so no product is
/// expanded twice; the closure is linear in the subgroup order times the
/// generator count.
pub fn generate_subgroup(group: &WeylGroup, generators: &[WeylElement]) -> Vec<WeylElement> {
    let mut seen = HashSet::from([group.one()]);
    let mut queue = vec![group.one()];
    let mut elements = vec![group.one()];
    while let Some(w) = queue.pop() {
        for t in generators {
            let next = &w * t;
            if seen.insert(next.clone()) {
                elements.push(next.clone());
                queue.push(next);
            }
        }
    }
    tracing::debug!(
        generators = generators.len(),
        order = elements.len(),
        "generated reflection subgroup",
    );
    elements
}

/// Ambient length function memoized across calls; Dyer's criterion
/// evaluates it on every product of subgroup reflections.
struct LengthFn<'a> {
    group: &'a WeylGroup,
    cache: HashMap<WeylElement, usize>,
}

impl<'a> LengthFn<'a> {
    fn new(group: &'a WeylGroup) -> Self {
        LengthFn {
            group,
            cache: HashMap::new(),
        }
    }
    fn length(&mut self, w: &WeylElement) -> usize {
        match self.cache.get(w) {
            Some(&len) => len,
            None => {
                let len = self.group.length(w);
                self.cache.insert(w.clone(), len);
                len
            }
        }
    }
}

/// Extracts the Coxeter generators of a reflection subgroup from its
/// reflection set, by Dyer's criterion: `t` is simple iff the only
/// subgroup reflection `u` with `len(u·t) < len(t)` is `t` itself.
pub fn dyer_coxeter_generators(
    group: &WeylGroup,
    reflections: &[WeylElement],
) -> Vec<WeylElement> {
    let mut length_fn = LengthFn::new(group);
    let mut dyer_n = |w: &WeylElement| -> Vec<WeylElement> {
        let len = length_fn.length(w);
        reflections
            .iter()
            .filter(|u| length_fn.length(&(*u * w)) < len)
            .cloned()
            .collect()
    };
    reflections
        .iter()
        .filter(|&t| dyer_n(t) == std::slice::from_ref(t))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use weylmath::qvector;

    use super::*;
    use crate::bruhat::parabolic_poset;
    use crate::minimal::Side;

    fn pair(cartan: &str, index_set: &[usize]) -> ParabolicPair {
        ParabolicPair::new(cartan.parse().unwrap(), index_set).unwrap()
    }

    #[test]
    fn test_generating_roots_at_zero_weight() {
        // A3 with Levi {2,3}: rho+v is regular, so psi is empty and phi is
        // the full set of non-parabolic roots (all pairings are integers).
        let p = pair("A3", &[2, 3]);
        let roots = p.generating_roots(&QVector::zero(4));
        assert!(roots.psi.is_empty());
        assert_eq!(roots.phi.len(), 3);
        for r in &roots.phi {
            assert!(r.support().any(|i| i == 1));
        }
    }

    #[test]
    fn test_subsystem_data_for_full_subgroup() {
        // The three phi-reflections of A3/{2,3} at v = 0 generate the whole
        // group, so the dominance classes are singletons in lengths 0..=3.
        let p = pair("A3", &[2, 3]);
        let data = p.subsystem_data(&QVector::zero(4));
        assert_eq!(data.subgroup.len(), 24);
        assert_eq!(data.lambda_positive_roots.len(), 6);
        assert_eq!(data.lambda_simple_roots.len(), 3);
        assert_eq!(data.lambda_parabolic_roots.len(), 3);
        assert_eq!(data.lambda_nonparabolic_roots.len(), 3);

        let sizes: Vec<(usize, usize)> = data
            .dominance_classes
            .iter()
            .map(|(&len, ws)| (len, ws.len()))
            .collect();
        assert_eq!(sizes, vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
        assert_eq!(data.dominance_classes[&0], vec![p.group().one()]);
    }

    #[test]
    fn test_generic_weight_gives_trivial_subgroup() {
        // Irrational-pairing weight: psi and phi are both empty, W_lambda
        // degenerates to the identity with a single length-0 bucket.
        let p = pair("A4", &[1, 2, 3]);
        let v = QVector::from_rationals([
            Rational::new(1, 3),
            Rational::new(1, 5),
            Rational::new(1, 7),
            Rational::new(1, 11),
            Rational::zero(),
        ]);
        let roots = p.generating_roots(&v);
        assert!(roots.psi.is_empty());
        assert!(roots.phi.is_empty());

        let data = p.subsystem_data(&v);
        assert_eq!(data.subgroup, vec![p.group().one()]);
        assert!(data.lambda_positive_roots.is_empty());
        assert_eq!(data.dominance_classes.len(), 1);
        assert_eq!(data.dominance_classes[&0], vec![p.group().one()]);
    }

    #[test]
    fn test_long_root_in_psi_restricts_phi_to_short_roots() {
        // B2, v = (-1/2, 1/2): rho+v = (1, 1) is orthogonal to the long
        // root e1-e2, which disqualifies every long candidate; the short
        // candidates fail orthogonality to psi, so phi is empty.
        let p = pair("B2", &[2]);
        let v = QVector::from_rationals([Rational::new(-1, 2), Rational::new(1, 2)]);
        let roots = p.generating_roots(&v);
        assert_eq!(roots.psi.len(), 1);
        assert!(!roots.psi[0].is_short_root());
        assert_eq!(*roots.psi[0].to_vector(), qvector![1, -1]);
        assert!(roots.phi.is_empty());
    }

    #[test]
    fn test_short_phi_orthogonal_to_psi() {
        // C3, v = (0, 0, -1): psi = {2e3} (long), and the only surviving
        // phi root is the short e1+e2 orthogonal to it, with coroot
        // pairing 5 against rho+v = (3, 2, 0).
        let p = pair("C3", &[1, 2]);
        let v = qvector![0, 0, -1];
        let roots = p.generating_roots(&v);
        assert_eq!(roots.psi.len(), 1);
        assert_eq!(*roots.psi[0].to_vector(), qvector![0, 0, 2]);
        assert_eq!(roots.phi.len(), 1);
        let phi = &roots.phi[0];
        assert_eq!(*phi.to_vector(), qvector![1, 1, 0]);
        assert!(phi.is_short_root());
        for s in &roots.psi {
            assert!(phi.scalar(s.to_vector()).is_zero());
        }

        let data = p.subsystem_data(&v);
        assert_eq!(data.subgroup.len(), 2);
        assert!(data.lambda_parabolic_roots.is_empty());
        assert_eq!(data.dominance_classes.len(), 2);
        assert_eq!(data.dominance_classes[&0].len(), 1);
        assert_eq!(data.dominance_classes[&1].len(), 1);
    }

    #[test]
    fn test_dyer_recovers_simple_generators() {
        let g = WeylGroup::new("A3".parse().unwrap());
        // An already-minimal generating set is returned unchanged.
        let commuting = vec![
            g.simple_reflection(1).clone(),
            g.simple_reflection(3).clone(),
        ];
        assert_eq!(dyer_coxeter_generators(&g, &commuting), commuting);

        // The full reflection set reduces to the simple reflections.
        let all: Vec<WeylElement> = g.reflections().iter().map(|(_, t)| t.clone()).collect();
        let simple = dyer_coxeter_generators(&g, &all);
        assert_eq!(simple.len(), 3);
        for i in 1..=3 {
            assert!(simple.contains(g.simple_reflection(i)));
        }
    }

    #[test]
    fn test_subgroup_closure() {
        let g = WeylGroup::new("A3".parse().unwrap());
        let generators = vec![
            g.simple_reflection(1).clone(),
            g.simple_reflection(3).clone(),
        ];
        let subgroup = generate_subgroup(&g, &generators);
        assert_eq!(subgroup.len(), 4);
        assert!(generate_subgroup(&g, &[]).len() == 1);
    }

    #[test]
    fn test_nonparabolic_root_poset_is_a_chain() {
        let p = pair("A3", &[1, 2]);
        let poset = p.nonparabolic_root_poset();
        assert_eq!(poset.len(), 3);
        assert_eq!(poset.covers().len(), 2);
    }

    #[test]
    fn test_scalar_product_poset_labels() {
        let p = pair("A2", &[1]);
        let poset = p.scalar_product_poset(&QVector::zero(3), false);
        assert_eq!(poset.len(), 2);
        let pairings: Vec<Rational> = poset.elements().map(|r| r.pairing).collect();
        assert!(pairings.contains(&Rational::from(1)));
        assert!(pairings.contains(&Rational::from(2)));

        // A weight pushing alpha_2's pairing negative drops it from the
        // filtered poset.
        let v = qvector![0, -2, 0];
        let filtered = p.scalar_product_poset(&v, true);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_poset_from_embedding() {
        // Transport the full Bruhat poset of A2 into A3 through the
        // transpositions of positions {1,2} and {2,4}; the images generate
        // a symmetric group on three letters and the second one is not a
        // simple reflection.
        let p = pair("A3", &[]);
        let source = WeylGroup::new("A2".parse().unwrap());
        let poset = parabolic_poset(&source, &[], Side::Left, None).unwrap();
        let embedding = HashMap::from([
            (1, WeylElement::reflection(&qvector![1, -1, 0, 0])),
            (2, WeylElement::reflection(&qvector![0, 1, 0, -1])),
        ]);

        let relabeled = p.poset_from_embedding(&source, &poset, &embedding);
        assert_eq!(relabeled.len(), 6);
        assert_eq!(relabeled.covers().len(), 8);

        let image =
            generate_subgroup(p.group(), &[embedding[&1].clone(), embedding[&2].clone()]);
        assert_eq!(image.len(), 6);
        for w in relabeled.elements() {
            assert!(image.contains(w));
            assert!(relabeled.le(&p.group().one(), w));
        }
    }

    #[test]
    fn test_unimplemented_stages() {
        let p = pair("A2", &[1]);
        let v = QVector::zero(3);
        assert!(matches!(
            p.kostant_cohomology(&v),
            Err(WeylError::Unimplemented(_)),
        ));
        assert!(matches!(
            p.enright_cohomology(&v),
            Err(WeylError::Unimplemented(_)),
        ));
        assert!(matches!(p.uhw_cones(), Err(WeylError::Unimplemented(_))));
    }

    #[test]
    fn test_facets_are_cached_per_pair() {
        let p = pair("A2", &[1]);
        assert!(std::ptr::eq(p.root_system_facets(), p.root_system_facets()));
        assert_eq!(p.root_system_facets().fan().max_cone_count(), 6);
    }

    #[test]
    fn test_bad_index_set_is_rejected() {
        let err = ParabolicPair::new("A2".parse().unwrap(), &[3]);
        assert_eq!(
            err.unwrap_err(),
            WeylError::BadIndexSet { index: 3, rank: 2 },
        );
    }
}
