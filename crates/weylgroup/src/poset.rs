//! Small directed-graph and poset structures for Bruhat-order output.
//!
//! These hold the cover relations computed by the Bruhat builders; they are
//! deliberately minimal (nodes, labeled edges, reachability) rather than a
//! general graph library.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use crate::error::{WeylError, WeylResult};

/// Directed graph with hashable nodes and labeled edges. Adding an edge
/// inserts its endpoints, and nodes with equal values are merged.
#[derive(Debug, Clone)]
pub struct CoverGraph<N, E> {
    nodes: Vec<N>,
    index: HashMap<N, usize>,
    edges: Vec<(usize, usize, E)>,
}

impl<N: Clone + Eq + Hash, E> Default for CoverGraph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone + Eq + Hash, E> CoverGraph<N, E> {
    /// Constructs an empty graph.
    pub fn new() -> Self {
        CoverGraph {
            nodes: vec![],
            index: HashMap::new(),
            edges: vec![],
        }
    }

    /// Inserts a node if not already present and returns its index.
    pub fn add_node(&mut self, node: N) -> usize {
        match self.index.get(&node) {
            Some(&i) => i,
            None => {
                let i = self.nodes.len();
                self.index.insert(node.clone(), i);
                self.nodes.push(node);
                i
            }
        }
    }
    /// Inserts an edge from `a` to `b`, inserting the endpoints as needed.
    pub fn add_edge(&mut self, a: N, b: N, label: E) {
        let a = self.add_node(a);
        let b = self.add_node(b);
        self.edges.push((a, b, label));
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
    /// Returns whether the graph contains `node`.
    pub fn has_node(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }
    /// Returns an iterator over the nodes.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &N> {
        self.nodes.iter()
    }
    /// Returns an iterator over the edges as `(tail, head, label)`.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = (&N, &N, &E)> {
        self.edges
            .iter()
            .map(|&(a, b, ref label)| (&self.nodes[a], &self.nodes[b], label))
    }
}

/// Finite poset given by its elements and cover relations.
#[derive(Debug, Clone)]
pub struct Poset<T> {
    elements: Vec<T>,
    index: HashMap<T, usize>,
    covers: Vec<(usize, usize)>,
    /// Upward adjacency: `up[i]` lists the indices covering element `i`.
    up: Vec<Vec<usize>>,
}

impl<T: Clone + Eq + Hash> Poset<T> {
    /// Constructs a poset from elements and cover relations `(lower, upper)`.
    ///
    /// Covers whose endpoints are not among `elements` are ignored, matching
    /// the restriction semantics of the Bruhat builders. Fails with
    /// [`WeylError::CyclicCovers`] if the cover relation is not acyclic.
    pub fn from_covers(elements: Vec<T>, cover_pairs: &[(T, T)]) -> WeylResult<Self> {
        let index: HashMap<T, usize> = elements
            .iter()
            .enumerate()
            .map(|(i, x)| (x.clone(), i))
            .collect();
        let mut covers = vec![];
        let mut up = vec![vec![]; elements.len()];
        for (lo, hi) in cover_pairs {
            if let (Some(&lo), Some(&hi)) = (index.get(lo), index.get(hi)) {
                covers.push((lo, hi));
                up[lo].push(hi);
            }
        }
        let ret = Poset {
            elements,
            index,
            covers,
            up,
        };
        if ret.has_cycle() {
            return Err(WeylError::CyclicCovers);
        }
        Ok(ret)
    }

    fn has_cycle(&self) -> bool {
        // Kahn's algorithm; a cycle leaves elements with nonzero in-degree.
        let mut in_degree = vec![0usize; self.elements.len()];
        for &(_, hi) in &self.covers {
            in_degree[hi] += 1;
        }
        let mut queue: VecDeque<usize> = (0..self.elements.len())
            .filter(|&i| in_degree[i] == 0)
            .collect();
        let mut visited = 0;
        while let Some(i) = queue.pop_front() {
            visited += 1;
            for &j in &self.up[i] {
                in_degree[j] -= 1;
                if in_degree[j] == 0 {
                    queue.push_back(j);
                }
            }
        }
        visited != self.elements.len()
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }
    /// Returns whether the poset has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
    /// Returns the elements in insertion order.
    pub fn elements(&self) -> impl ExactSizeIterator<Item = &T> {
        self.elements.iter()
    }
    /// Returns an iterator over the cover relations as `(lower, upper)`.
    pub fn covers(&self) -> impl ExactSizeIterator<Item = (&T, &T)> {
        self.covers
            .iter()
            .map(|&(lo, hi)| (&self.elements[lo], &self.elements[hi]))
    }
    /// Returns whether the poset contains `x`.
    pub fn contains(&self, x: &T) -> bool {
        self.index.contains_key(x)
    }

    /// Returns whether `a <= b` in the partial order generated by the cover
    /// relations. Elements not in the poset compare as incomparable.
    pub fn le(&self, a: &T, b: &T) -> bool {
        let (Some(&a), Some(&b)) = (self.index.get(a), self.index.get(b)) else {
            return false;
        };
        if a == b {
            return true;
        }
        let mut queue = VecDeque::from([a]);
        let mut seen = vec![false; self.elements.len()];
        seen[a] = true;
        while let Some(i) = queue.pop_front() {
            for &j in &self.up[i] {
                if j == b {
                    return true;
                }
                if !seen[j] {
                    seen[j] = true;
                    queue.push_back(j);
                }
            }
        }
        false
    }

    /// Relabels the poset through `f`, which must be injective on the
    /// elements.
    pub fn relabel<U: Clone + Eq + Hash>(&self, f: impl Fn(&T) -> U) -> Poset<U> {
        let elements: Vec<U> = self.elements.iter().map(&f).collect();
        let index = elements
            .iter()
            .enumerate()
            .map(|(i, x)| (x.clone(), i))
            .collect();
        Poset {
            elements,
            index,
            covers: self.covers.clone(),
            up: self.up.clone(),
        }
    }

    /// Returns the induced subposet on the elements satisfying `keep`,
    /// recomputing cover relations within the subset.
    pub fn subposet(&self, keep: impl Fn(&T) -> bool) -> Poset<T> {
        let elements: Vec<T> = self.elements.iter().filter(|x| keep(x)).cloned().collect();
        let mut cover_pairs = vec![];
        for a in &elements {
            for b in &elements {
                if a != b && self.le(a, b) {
                    let strictly_between = elements
                        .iter()
                        .any(|z| z != a && z != b && self.le(a, z) && self.le(z, b));
                    if !strictly_between {
                        cover_pairs.push((a.clone(), b.clone()));
                    }
                }
            }
        }
        // The induced relation inherits acyclicity from the ambient order.
        #[allow(clippy::unwrap_used)]
        let ret = Poset::from_covers(elements, &cover_pairs).unwrap();
        ret
    }
}
