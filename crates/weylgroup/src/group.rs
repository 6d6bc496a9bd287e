//! Weyl groups and their word algorithms.
//!
//! All word-level data (length, reduced words, Bruhat covers) is derived
//! from the matrix action on roots, so no element ever stores a word; two
//! elements are equal exactly when their matrices are.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::OnceLock;

use crate::cartan::CartanType;
use crate::element::WeylElement;
use crate::error::WeylResult;
use crate::root_system::{Root, RootSystem};

/// Weyl group of a root system, with its reflections precomputed.
#[derive(Debug, Clone)]
pub struct WeylGroup {
    root_system: RootSystem,
    simple_reflections: Vec<WeylElement>,
    /// One reflection per positive root, in positive-root order.
    reflections: Vec<(Root, WeylElement)>,
    reflection_roots: HashMap<WeylElement, Root>,
    elements: OnceLock<Vec<WeylElement>>,
}

impl WeylGroup {
    /// Constructs the Weyl group of the given Cartan type.
    pub fn new(cartan_type: CartanType) -> Self {
        Self::from_root_system(RootSystem::new(cartan_type))
    }

    /// Constructs the Weyl group of a root system.
    pub fn from_root_system(root_system: RootSystem) -> Self {
        let simple_reflections = root_system
            .simple_roots()
            .iter()
            .map(|r| WeylElement::reflection(r.to_vector()))
            .collect();
        let reflections: Vec<(Root, WeylElement)> = root_system
            .positive_roots()
            .iter()
            .map(|r| (r.clone(), WeylElement::reflection(r.to_vector())))
            .collect();
        let reflection_roots = reflections
            .iter()
            .map(|(root, t)| (t.clone(), root.clone()))
            .collect();
        WeylGroup {
            root_system,
            simple_reflections,
            reflections,
            reflection_roots,
            elements: OnceLock::new(),
        }
    }

    /// Returns the underlying root system.
    pub fn root_system(&self) -> &RootSystem {
        &self.root_system
    }
    /// Returns the Cartan type.
    pub fn cartan_type(&self) -> CartanType {
        self.root_system.cartan_type()
    }
    /// Returns the identity element.
    pub fn one(&self) -> WeylElement {
        WeylElement::one(self.root_system.ambient_dim())
    }
    /// Returns the simple reflection `s_i` (1-based).
    pub fn simple_reflection(&self, i: usize) -> &WeylElement {
        &self.simple_reflections[i - 1]
    }
    /// Returns all reflections, paired with their positive roots.
    pub fn reflections(&self) -> &[(Root, WeylElement)] {
        &self.reflections
    }
    /// Returns the positive root of `t` if `t` is a reflection.
    pub fn reflection_root(&self, t: &WeylElement) -> Option<&Root> {
        self.reflection_roots.get(t)
    }

    /// Multiplies out a word in the simple reflections (1-based indices).
    pub fn from_word(&self, word: &[usize]) -> WeylResult<WeylElement> {
        self.root_system.validate_index_set(word)?;
        Ok(word
            .iter()
            .fold(self.one(), |w, &i| &w * self.simple_reflection(i)))
    }

    /// Returns the Coxeter length of `w`: the number of positive roots it
    /// sends to negative roots.
    pub fn length(&self, w: &WeylElement) -> usize {
        self.root_system
            .positive_roots()
            .iter()
            .filter(|r| !self.root_system.is_positive_root_vector(&w.action(r.to_vector())))
            .count()
    }

    /// Returns a reduced word for `w` (1-based indices), by peeling off a
    /// descent at a time.
    pub fn reduced_word(&self, w: &WeylElement) -> Vec<usize> {
        let rank = self.root_system.rank() as usize;
        let mut w = w.clone();
        let mut word = vec![];
        while !w.is_one() {
            // A descent always exists for w != e.
            for i in 1..=rank {
                let image = w.action(self.root_system.simple_root(i).to_vector());
                if !self.root_system.is_positive_root_vector(&image) {
                    w = &w * self.simple_reflection(i);
                    word.push(i);
                    break;
                }
            }
        }
        word.reverse();
        word
    }

    /// Returns the elements covered by `w` in Bruhat order: all `w·t` with
    /// `t` a reflection and `len(w·t) = len(w) − 1`.
    pub fn bruhat_lower_covers(&self, w: &WeylElement) -> Vec<WeylElement> {
        let len = self.length(w);
        self.reflections
            .iter()
            .map(|(_, t)| w * t)
            .filter(|x| self.length(x) + 1 == len)
            .collect()
    }

    /// Returns all elements of the group, enumerated breadth-first from the
    /// identity. The result is computed once and cached.
    pub fn elements(&self) -> &[WeylElement] {
        self.elements.get_or_init(|| {
            let mut seen = HashSet::from([self.one()]);
            let mut queue = VecDeque::from([self.one()]);
            let mut out = vec![self.one()];
            while let Some(w) = queue.pop_front() {
                for s in &self.simple_reflections {
                    let next = &w * s;
                    if seen.insert(next.clone()) {
                        out.push(next.clone());
                        queue.push_back(next);
                    }
                }
            }
            tracing::debug!(
                cartan_type = %self.cartan_type(),
                order = out.len(),
                "enumerated Weyl group",
            );
            out
        })
    }
}
