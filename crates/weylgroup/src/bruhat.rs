//! Bruhat cover graphs and posets over minimal coset representatives.
//!
//! Each builder enumerates the representatives of a parabolic quotient and
//! restricts the Bruhat cover relation to that set. The weight-labeled
//! variants relabel nodes by the shifted action on a weight, projected to a
//! dominant chamber, so structurally equal quotients produce equal labels
//! regardless of which representatives were chosen.

use std::collections::{HashMap, HashSet};

use weylmath::QVector;

use crate::element::WeylElement;
use crate::error::WeylResult;
use crate::group::WeylGroup;
use crate::minimal::{Side, minimal_representatives};
use crate::poset::{CoverGraph, Poset};

/// Applies the ρ-shifted action of `x` to a weight: `x(v+ρ) − ρ`.
pub fn act_on_weight(group: &WeylGroup, v: &QVector, x: &WeylElement) -> QVector {
    let rho = group.root_system().rho();
    &x.action(&(v + rho)) - rho
}

/// Canonical node label for a representative: the shifted action on `v`,
/// projected to the dominant chamber of `index_set`.
fn weight_label(group: &WeylGroup, v: &QVector, index_set: &[usize], x: &WeylElement) -> String {
    let shifted = act_on_weight(group, v, x);
    group
        .root_system()
        .to_dominant_chamber(&shifted, index_set)
        .to_string()
}

/// Returns the minimal representatives of the parabolic quotient together
/// with the Bruhat cover pairs `(x, y)` internal to that set.
fn representative_covers(
    group: &WeylGroup,
    index_set: &[usize],
    side: Side,
    relative_index_set: Option<&[usize]>,
) -> WeylResult<(Vec<WeylElement>, Vec<(WeylElement, WeylElement)>)> {
    let reps = minimal_representatives(group, index_set, side, relative_index_set)?;
    let rep_set: HashSet<&WeylElement> = reps.iter().collect();
    let mut cover_pairs = vec![];
    for y in &reps {
        for x in group.bruhat_lower_covers(y) {
            if rep_set.contains(&x) {
                cover_pairs.push((x, y.clone()));
            }
        }
    }
    Ok((reps, cover_pairs))
}

/// Builds the Bruhat cover graph on the minimal representatives of a
/// parabolic quotient. Each edge `x → y` is labeled by `y⁻¹·x`, the
/// reflection defining the cover.
pub fn parabolic_bruhat_graph(
    group: &WeylGroup,
    index_set: &[usize],
    side: Side,
    relative_index_set: Option<&[usize]>,
) -> WeylResult<CoverGraph<WeylElement, WeylElement>> {
    let (reps, cover_pairs) = representative_covers(group, index_set, side, relative_index_set)?;
    let mut graph = CoverGraph::new();
    for w in reps {
        graph.add_node(w);
    }
    for (x, y) in cover_pairs {
        let label = &y.inverse() * &x;
        graph.add_edge(x, y, label);
    }
    Ok(graph)
}

/// Builds the Bruhat order on the minimal representatives of a parabolic
/// quotient, as a poset generated by the internal cover relations.
pub fn parabolic_poset(
    group: &WeylGroup,
    index_set: &[usize],
    side: Side,
    relative_index_set: Option<&[usize]>,
) -> WeylResult<Poset<WeylElement>> {
    let (reps, cover_pairs) = representative_covers(group, index_set, side, relative_index_set)?;
    Poset::from_covers(reps, &cover_pairs)
}

/// Like [`parabolic_bruhat_graph`], but with nodes relabeled by the
/// dominant-chamber form of each representative's shifted action on `v`.
pub fn parabolic_weight_graph(
    group: &WeylGroup,
    v: &QVector,
    index_set: &[usize],
    side: Side,
    relative_index_set: Option<&[usize]>,
) -> WeylResult<CoverGraph<String, ()>> {
    let (reps, cover_pairs) = representative_covers(group, index_set, side, relative_index_set)?;
    let mut graph = CoverGraph::new();
    for w in &reps {
        graph.add_node(weight_label(group, v, index_set, w));
    }
    for (x, y) in cover_pairs {
        graph.add_edge(
            weight_label(group, v, index_set, &x),
            weight_label(group, v, index_set, &y),
            (),
        );
    }
    Ok(graph)
}

/// Like [`parabolic_weight_graph`], but each label is prefixed with the
/// representative's position in the enumeration, which keeps nodes distinct
/// when the dominant projection is not injective.
pub fn parabolic_weight_graph_enum(
    group: &WeylGroup,
    v: &QVector,
    index_set: &[usize],
    side: Side,
    relative_index_set: Option<&[usize]>,
) -> WeylResult<CoverGraph<String, ()>> {
    let (reps, cover_pairs) = representative_covers(group, index_set, side, relative_index_set)?;
    let position: HashMap<&WeylElement, usize> =
        reps.iter().enumerate().map(|(i, w)| (w, i)).collect();
    let label = |w: &WeylElement| format!("{}: {}", position[w], weight_label(group, v, index_set, w));
    let mut graph = CoverGraph::new();
    for w in &reps {
        graph.add_node(label(w));
    }
    for (x, y) in &cover_pairs {
        graph.add_edge(label(x), label(y), ());
    }
    Ok(graph)
}

/// Builds the Bruhat order on the representatives together with their
/// weight labels.
///
/// The poset keeps the group elements as its members; the returned map
/// carries the dominant-chamber label of each one. Keeping the two apart
/// avoids collapsing distinct representatives whose projections coincide.
pub fn parabolic_weight_poset(
    group: &WeylGroup,
    v: &QVector,
    index_set: &[usize],
    side: Side,
    relative_index_set: Option<&[usize]>,
) -> WeylResult<(Poset<WeylElement>, HashMap<WeylElement, String>)> {
    let (reps, cover_pairs) = representative_covers(group, index_set, side, relative_index_set)?;
    let labels = reps
        .iter()
        .map(|w| (w.clone(), weight_label(group, v, index_set, w)))
        .collect();
    let poset = Poset::from_covers(reps, &cover_pairs)?;
    Ok((poset, labels))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weyl_group(s: &str) -> WeylGroup {
        WeylGroup::new(s.parse().unwrap())
    }

    #[test]
    fn test_full_bruhat_graph_of_a2() {
        // Empty Levi part: the quotient is the whole group of order 6, and
        // the Bruhat cover graph of A2 has 8 edges.
        let g = weyl_group("A2");
        let graph = parabolic_bruhat_graph(&g, &[], Side::Left, None).unwrap();
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 8);
        for (x, y, label) in graph.edges() {
            assert_eq!(g.length(x) + 1, g.length(y));
            assert!(g.reflection_root(label).is_some());
            assert_eq!(&(y * label), x);
        }
    }

    #[test]
    fn test_maximal_parabolic_poset_is_a_chain() {
        let g = weyl_group("A3");
        let poset = parabolic_poset(&g, &[1, 2], Side::Left, None).unwrap();
        assert_eq!(poset.len(), 4);
        assert_eq!(poset.covers().len(), 3);
        let top = g.from_word(&[3, 2, 1]).unwrap();
        for w in poset.elements() {
            assert!(poset.le(w, &top));
        }
    }

    #[test]
    fn test_weight_graph_labels() {
        let g = weyl_group("A3");
        let v = QVector::zero(4);
        let graph = parabolic_weight_graph(&g, &v, &[1, 2], Side::Left, None).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        // The identity representative labels itself with v.
        assert!(graph.has_node(&"(0, 0, 0, 0)".to_string()));
    }

    #[test]
    fn test_enumerated_weight_graph_disambiguates() {
        let g = weyl_group("A3");
        let v = QVector::zero(4);
        let graph = parabolic_weight_graph_enum(&g, &v, &[1, 2], Side::Left, None).unwrap();
        assert_eq!(graph.node_count(), 4);
        // The identity has length 0, so it comes first in the enumeration.
        assert!(graph.has_node(&"0: (0, 0, 0, 0)".to_string()));
    }

    #[test]
    fn test_weight_poset_label_map() {
        let g = weyl_group("B2");
        let v = QVector::zero(2);
        let (poset, labels) = parabolic_weight_poset(&g, &v, &[1], Side::Left, None).unwrap();
        assert_eq!(poset.len(), 4);
        assert_eq!(labels.len(), poset.len());
        for w in poset.elements() {
            assert!(labels.contains_key(w));
        }
    }

    #[test]
    fn test_shifted_action() {
        let g = weyl_group("A2");
        let v = QVector::zero(3);
        assert_eq!(act_on_weight(&g, &v, &g.one()), v);
        // s1(rho) - rho = -alpha_1.
        let s1 = g.simple_reflection(1).clone();
        assert_eq!(
            act_on_weight(&g, &v, &s1),
            -g.root_system().simple_root(1).to_vector(),
        );
    }
}
