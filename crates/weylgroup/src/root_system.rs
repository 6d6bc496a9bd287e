//! Root systems realized in an exact ambient space.
//!
//! Simple roots use the standard ambient realizations (Bourbaki
//! coordinates); positive roots are generated by reflection closure while
//! tracking each root's coordinates in the simple-root basis, which gives
//! positivity, parabolic support, and short/long classification for free.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use num_traits::Zero;
use weylmath::{QMatrix, QVector, Rational};

use crate::cartan::CartanType;
use crate::error::{WeylError, WeylResult};
use crate::poset::Poset;

/// Positive root of a root system: its ambient vector together with its
/// coordinates in the simple-root basis.
#[derive(Debug, Clone)]
pub struct Root {
    vec: QVector,
    coords: QVector,
    short: bool,
}

impl PartialEq for Root {
    fn eq(&self, other: &Self) -> bool {
        self.vec == other.vec
    }
}
impl Eq for Root {}
impl Hash for Root {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.vec.hash(state);
    }
}
impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.vec, f)
    }
}

impl Root {
    /// Returns the ambient vector of the root.
    pub fn to_vector(&self) -> &QVector {
        &self.vec
    }
    /// Returns the coordinates of the root in the simple-root basis.
    pub fn coords(&self) -> &QVector {
        &self.coords
    }
    /// Returns the scalar product of the root with an ambient weight.
    pub fn scalar(&self, weight: &QVector) -> Rational {
        self.vec.dot(weight)
    }
    /// Returns the coroot `2α/(α,α)` as an ambient vector.
    pub fn associated_coroot(&self) -> QVector {
        self.vec.scale(Rational::from(2) / self.vec.dot(&self.vec))
    }
    /// Returns whether the root is short. In a simply-laced system every
    /// root is short.
    pub fn is_short_root(&self) -> bool {
        self.short
    }
    /// Returns the 1-based indices of the simple roots appearing in this
    /// root's expansion.
    pub fn support(&self) -> impl Iterator<Item = usize> + '_ {
        self.coords
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .map(|(i, _)| i + 1)
    }
    /// Returns the height of the root (sum of simple-root coordinates).
    pub fn height(&self) -> Rational {
        self.coords.iter().sum()
    }
}

/// Root system of a fixed Cartan type, realized in an exact ambient space.
#[derive(Debug, Clone)]
pub struct RootSystem {
    cartan_type: CartanType,
    simple_roots: Vec<Root>,
    positive_roots: Vec<Root>,
    positive_root_vectors: HashSet<QVector>,
    /// `cartan_matrix[i][j]` is the pairing of the `j`-th simple root with
    /// the `i`-th simple coroot (0-based).
    cartan_matrix: Vec<Vec<i64>>,
    fundamental_weights: Vec<QVector>,
    rho: QVector,
}

impl RootSystem {
    /// Constructs the root system of the given Cartan type.
    pub fn new(cartan_type: CartanType) -> Self {
        let rank = cartan_type.rank() as usize;
        let simple_vectors = simple_root_vectors(cartan_type);

        let pairing = |beta: &QVector, i: usize| -> Rational {
            let alpha = &simple_vectors[i];
            Rational::from(2) * beta.dot(alpha) / alpha.dot(alpha)
        };

        let cartan_matrix: Vec<Vec<i64>> = (0..rank)
            .map(|i| {
                (0..rank)
                    .map(|j| pairing(&simple_vectors[j], i).to_integer())
                    .collect()
            })
            .collect();

        // Reflection closure of the simple roots within the positive cone.
        let mut positive: Vec<(QVector, QVector)> = (0..rank)
            .map(|i| (simple_vectors[i].clone(), QVector::unit(rank as u8, i as u8)))
            .collect();
        let mut seen: HashSet<QVector> = positive.iter().map(|(v, _)| v.clone()).collect();
        let mut next_unprocessed = 0;
        while next_unprocessed < positive.len() {
            let (vec, coords) = positive[next_unprocessed].clone();
            for i in 0..rank {
                let c = pairing(&vec, i);
                let new_vec = &vec - &simple_vectors[i].scale(c);
                let new_coords = &coords - &QVector::unit(rank as u8, i as u8).scale(c);
                if new_coords.iter().all(|x| x >= Rational::zero()) && seen.insert(new_vec.clone())
                {
                    positive.push((new_vec, new_coords));
                }
            }
            next_unprocessed += 1;
        }

        let min_norm2 = positive
            .iter()
            .map(|(v, _)| v.dot(v))
            .min()
            .unwrap_or_else(Rational::zero);
        let mut positive_roots: Vec<Root> = positive
            .into_iter()
            .map(|(vec, coords)| Root {
                short: vec.dot(&vec) == min_norm2,
                vec,
                coords,
            })
            .collect();
        positive_roots.sort_by_key(|r| (r.height(), r.coords.clone()));

        // Fundamental weights as in-span duals, via the inverse Cartan
        // matrix. For types whose ambient space is larger than the root
        // span this differs from other realizations only by a W-invariant
        // central shift, which no scalar product with a (co)root can see.
        let cartan_qmatrix = QMatrix::from_fn(rank as u8, |col, row| {
            Rational::from(cartan_matrix[row as usize][col as usize])
        });
        let inverse_cartan = cartan_qmatrix
            .inverse()
            .expect("Cartan matrix of a finite type is invertible");
        let fundamental_weights: Vec<QVector> = (0..rank)
            .map(|j| {
                (0..rank)
                    .map(|k| simple_vectors[k].scale(inverse_cartan.get(j as u8, k as u8)))
                    .sum()
            })
            .collect();
        let rho: QVector = fundamental_weights.iter().cloned().sum();

        let simple_roots = (0..rank)
            .map(|i| {
                let vec = simple_vectors[i].clone();
                Root {
                    short: vec.dot(&vec) == min_norm2,
                    coords: QVector::unit(rank as u8, i as u8),
                    vec,
                }
            })
            .collect();
        let positive_root_vectors = positive_roots.iter().map(|r| r.vec.clone()).collect();

        RootSystem {
            cartan_type,
            simple_roots,
            positive_roots,
            positive_root_vectors,
            cartan_matrix,
            fundamental_weights,
            rho,
        }
    }

    /// Returns the Cartan type.
    pub fn cartan_type(&self) -> CartanType {
        self.cartan_type
    }
    /// Returns the rank.
    pub fn rank(&self) -> u8 {
        self.cartan_type.rank()
    }
    /// Returns the ambient-space dimension.
    pub fn ambient_dim(&self) -> u8 {
        self.cartan_type.ambient_dim()
    }

    /// Returns the simple roots, indexed `1..=rank` externally.
    pub fn simple_roots(&self) -> &[Root] {
        &self.simple_roots
    }
    /// Returns the `i`-th simple root (1-based).
    pub fn simple_root(&self, i: usize) -> &Root {
        &self.simple_roots[i - 1]
    }
    /// Returns the positive roots, sorted by height.
    pub fn positive_roots(&self) -> &[Root] {
        &self.positive_roots
    }
    /// Returns whether `v` is the ambient vector of a positive root.
    pub fn is_positive_root_vector(&self, v: &QVector) -> bool {
        self.positive_root_vectors.contains(v)
    }

    /// Returns the Cartan matrix; entry `[i][j]` is the pairing of the
    /// `j`-th simple root with the `i`-th simple coroot (0-based).
    pub fn cartan_matrix(&self) -> &[Vec<i64>] {
        &self.cartan_matrix
    }
    /// Returns the fundamental weights (in-span duals of the simple
    /// coroots), indexed `1..=rank` externally.
    pub fn fundamental_weights(&self) -> &[QVector] {
        &self.fundamental_weights
    }
    /// Returns the `i`-th fundamental weight (1-based).
    pub fn fundamental_weight(&self, i: usize) -> &QVector {
        &self.fundamental_weights[i - 1]
    }
    /// Returns ρ, the sum of the fundamental weights.
    pub fn rho(&self) -> &QVector {
        &self.rho
    }

    /// Returns the pairing `⟨v, α_i^∨⟩` of an ambient weight with the
    /// `i`-th simple coroot (1-based).
    pub fn coroot_pairing(&self, v: &QVector, i: usize) -> Rational {
        v.dot(&self.simple_root(i).associated_coroot())
    }

    /// Checks that every index is a node of the Dynkin diagram.
    pub fn validate_index_set(&self, index_set: &[usize]) -> WeylResult<()> {
        let rank = self.rank() as usize;
        match index_set.iter().find(|&&i| i < 1 || i > rank) {
            Some(&index) => Err(WeylError::BadIndexSet { index, rank }),
            None => Ok(()),
        }
    }

    /// Returns the positive roots of the Levi part: those supported on
    /// `index_set`.
    pub fn positive_roots_parabolic(&self, index_set: &[usize]) -> Vec<Root> {
        self.positive_roots
            .iter()
            .filter(|r| r.support().all(|i| index_set.contains(&i)))
            .cloned()
            .collect()
    }
    /// Returns the positive roots outside the Levi part determined by
    /// `index_set`.
    pub fn positive_roots_nonparabolic(&self, index_set: &[usize]) -> Vec<Root> {
        self.positive_roots
            .iter()
            .filter(|r| !r.support().all(|i| index_set.contains(&i)))
            .cloned()
            .collect()
    }

    /// Projects `v` to the dominant chamber of the parabolic subgroup
    /// generated by `index_set`, by reflecting along negative pairings
    /// until none remain.
    pub fn to_dominant_chamber(&self, v: &QVector, index_set: &[usize]) -> QVector {
        let mut v = v.clone();
        loop {
            let negative = index_set
                .iter()
                .find(|&&i| self.coroot_pairing(&v, i) < Rational::zero());
            match negative {
                Some(&i) => {
                    let c = self.coroot_pairing(&v, i);
                    v = &v - &self.simple_root(i).to_vector().scale(c);
                }
                None => return v,
            }
        }
    }

    /// Returns the poset of positive roots, ordered by `α ≤ β` iff `β − α`
    /// is a non-negative sum of simple roots.
    pub fn root_poset(&self) -> Poset<Root> {
        let mut cover_pairs = vec![];
        for beta in &self.positive_roots {
            for alpha_i in &self.simple_roots {
                let lower = &beta.vec - &alpha_i.vec;
                if self.positive_root_vectors.contains(&lower) {
                    let lower_root = self
                        .positive_roots
                        .iter()
                        .find(|r| r.vec == lower)
                        .cloned()
                        .expect("positive root vector has a root");
                    cover_pairs.push((lower_root, beta.clone()));
                }
            }
        }
        // Heights strictly increase along covers, so this cannot cycle.
        #[allow(clippy::unwrap_used)]
        let ret = Poset::from_covers(self.positive_roots.clone(), &cover_pairs).unwrap();
        ret
    }
}

/// Simple roots in the standard ambient realization (Bourbaki
/// coordinates).
fn simple_root_vectors(cartan_type: CartanType) -> Vec<QVector> {
    use weylmath::qvector;

    let rank = cartan_type.rank();
    let dim = cartan_type.ambient_dim();
    let diff = |i: u8| -> QVector {
        &QVector::unit(dim, i) - &QVector::unit(dim, i + 1)
    };
    let half = Rational::new(1, 2);

    match cartan_type {
        CartanType::A(n) => (0..n).map(diff).collect(),
        CartanType::B(n) => (0..n - 1)
            .map(diff)
            .chain([QVector::unit(dim, n - 1)])
            .collect(),
        CartanType::C(n) => (0..n - 1)
            .map(diff)
            .chain([QVector::unit(dim, n - 1).scale(Rational::from(2))])
            .collect(),
        CartanType::D(n) => (0..n - 1)
            .map(diff)
            .chain([&QVector::unit(dim, n - 2) + &QVector::unit(dim, n - 1)])
            .collect(),
        CartanType::G2 => vec![qvector![0, 1, -1], qvector![1, -2, 1]],
        CartanType::F4 => vec![
            qvector![0, 1, -1, 0],
            qvector![0, 0, 1, -1],
            qvector![0, 0, 0, 1],
            QVector::from_rationals([half, -half, -half, -half]),
        ],
        CartanType::E6 | CartanType::E7 | CartanType::E8 => {
            let mut roots = vec![
                QVector::from_rationals([
                    half, -half, -half, -half, -half, -half, -half, half,
                ]),
                &QVector::unit(8, 0) + &QVector::unit(8, 1),
            ];
            roots.extend((0..6).map(|i| &QVector::unit(8, i + 2) - &QVector::unit(8, i + 1)));
            roots.truncate(rank as usize);
            roots
        }
    }
}
