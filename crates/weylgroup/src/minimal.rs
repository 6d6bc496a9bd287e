//! Minimal-length coset representatives of parabolic quotients.
//!
//! The enumeration never touches Bruhat covers: it walks the Weyl orbit of
//! a characteristic weight in fundamental-weight coordinates, reflecting
//! only along strictly positive coefficients, which reaches every orbit
//! point by a reduced word in a single linear pass.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::element::WeylElement;
use crate::error::{WeylError, WeylResult};
use crate::group::WeylGroup;

/// Which side the parabolic subgroup acts on.
///
/// [`Side::Left`] yields minimal representatives of the cosets `W_I · w`,
/// [`Side::Right`] of the cosets `w · W_I`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    /// Quotient by the left action of the parabolic subgroup.
    Left,
    /// Quotient by the right action of the parabolic subgroup.
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

impl FromStr for Side {
    type Err = WeylError;
    fn from_str(s: &str) -> WeylResult<Self> {
        match s {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            _ => Err(WeylError::BadSide(s.to_string())),
        }
    }
}

/// Computes the set of minimal-length coset representatives of the
/// parabolic quotient determined by `index_set` (1-based Dynkin indices of
/// the Levi part).
///
/// With `relative_index_set = Some(r)`, the quotient is taken inside the
/// parabolic subgroup generated by `r` instead of the whole group;
/// `index_set` must then be a subset of `r`.
///
/// If the Levi part is the whole (relative) group, the representative set
/// is `{e}`. Representatives are returned sorted by length and then
/// lexicographically by reduced word, so the enumeration order is stable.
pub fn minimal_representatives(
    group: &WeylGroup,
    index_set: &[usize],
    side: Side,
    relative_index_set: Option<&[usize]>,
) -> WeylResult<Vec<WeylElement>> {
    let root_system = group.root_system();
    root_system.validate_index_set(index_set)?;
    let relative = match relative_index_set {
        Some(r) => {
            root_system.validate_index_set(r)?;
            if !index_set.iter().all(|i| r.contains(i)) {
                return Err(WeylError::BadRelativeIndexSet);
            }
            r.to_vec()
        }
        None => root_system.cartan_type().index_set(),
    };
    let rank = root_system.rank() as usize;
    let cartan = root_system.cartan_matrix();

    // Characteristic weight: one at each crossed node, in fundamental-weight
    // coordinates.
    let mut rhop = vec![0_i64; rank];
    for &i in &relative {
        if !index_set.contains(&i) {
            rhop[i - 1] = 1;
        }
    }
    if rhop.iter().all(|&c| c == 0) {
        return Ok(vec![group.one()]);
    }

    // Orbit walk. `known` maps each visited weight to the reduced word
    // reaching it from `rhop`, left to right.
    let mut known: HashMap<Vec<i64>, Vec<usize>> = HashMap::from([(rhop.clone(), vec![])]);
    let mut worklist = vec![rhop];
    while let Some(v) = worklist.pop() {
        for &i in &relative {
            if v[i - 1] <= 0 {
                continue;
            }
            // (s_i v)_j = v_j − v_i ⟨α_i, α_j^∨⟩.
            let reflected: Vec<i64> = (0..rank)
                .map(|j| v[j] - v[i - 1] * cartan[j][i - 1])
                .collect();
            if !known.contains_key(&reflected) {
                let word = known[&v].iter().copied().chain([i]).collect_vec();
                known.insert(reflected.clone(), word);
                worklist.push(reflected);
            }
        }
    }

    tracing::debug!(
        cartan_type = %root_system.cartan_type(),
        ?index_set,
        %side,
        count = known.len(),
        "enumerated minimal coset representatives",
    );

    let mut reps: Vec<WeylElement> = known
        .values()
        .map(|word| match side {
            Side::Left => group.from_word(word),
            Side::Right => group.from_word(&word.iter().rev().copied().collect_vec()),
        })
        .collect::<WeylResult<_>>()?;
    // Fixed enumeration order, independent of hash iteration.
    reps.sort_by_cached_key(|w| (group.length(w), group.reduced_word(w)));
    Ok(reps)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn weyl_group(s: &str) -> WeylGroup {
        WeylGroup::new(s.parse().unwrap())
    }

    /// Elements of the Levi subgroup generated by `index_set`.
    fn levi_elements(group: &WeylGroup, index_set: &[usize]) -> Vec<WeylElement> {
        let mut seen = HashSet::from([group.one()]);
        let mut queue = vec![group.one()];
        while let Some(w) = queue.pop() {
            for &i in index_set {
                let next = &w * group.simple_reflection(i);
                if seen.insert(next.clone()) {
                    queue.push(next);
                }
            }
        }
        seen.into_iter().collect()
    }

    /// The unique minimal-length element of the coset `W_I · w` (or
    /// `w · W_I` for [`Side::Right`]).
    fn coset_minimum(
        group: &WeylGroup,
        levi: &[WeylElement],
        w: &WeylElement,
        side: Side,
    ) -> WeylElement {
        levi.iter()
            .map(|u| match side {
                Side::Left => u * w,
                Side::Right => w * u,
            })
            .min_by_key(|x| group.length(x))
            .unwrap()
    }

    #[test]
    fn test_representatives_are_coset_minima() {
        let g = weyl_group("A4");
        let index_set = [1, 3, 4];
        let levi = levi_elements(&g, &index_set);
        assert_eq!(levi.len(), 12);
        for side in [Side::Left, Side::Right] {
            let reps = minimal_representatives(&g, &index_set, side, None).unwrap();
            assert_eq!(reps.len(), 120 / 12);
            assert_eq!(reps.iter().collect::<HashSet<_>>().len(), reps.len());
            for w in &reps {
                assert_eq!(coset_minimum(&g, &levi, w, side), *w);
            }
        }
    }

    #[test]
    fn test_sides_are_related_by_inversion() {
        let g = weyl_group("B3");
        let index_set = [1, 2];
        let left: HashSet<WeylElement> = minimal_representatives(&g, &index_set, Side::Left, None)
            .unwrap()
            .into_iter()
            .map(|w| w.inverse())
            .collect();
        let right: HashSet<WeylElement> =
            minimal_representatives(&g, &index_set, Side::Right, None)
                .unwrap()
                .into_iter()
                .collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_full_levi_is_trivial_quotient() {
        let g = weyl_group("A3");
        let reps = minimal_representatives(&g, &[1, 2, 3], Side::Left, None).unwrap();
        assert_eq!(reps, vec![g.one()]);
    }

    #[test]
    fn test_empty_levi_enumerates_the_group() {
        let g = weyl_group("A2");
        let reps = minimal_representatives(&g, &[], Side::Left, None).unwrap();
        assert_eq!(reps.len(), 6);
    }

    #[test]
    fn test_relative_quotient() {
        // Quotient of W_{1,2} (an A2 inside A3) by W_{1}.
        let g = weyl_group("A3");
        let reps = minimal_representatives(&g, &[1], Side::Left, Some(&[1, 2])).unwrap();
        assert_eq!(reps.len(), 3);
        // Representatives stay inside the relative parabolic subgroup.
        let relative = levi_elements(&g, &[1, 2]);
        assert!(reps.iter().all(|w| relative.contains(w)));

        let err = minimal_representatives(&g, &[3], Side::Left, Some(&[1, 2]));
        assert_eq!(err.unwrap_err(), WeylError::BadRelativeIndexSet);
    }

    #[test]
    fn test_side_parsing() {
        assert_eq!("left".parse::<Side>().unwrap(), Side::Left);
        assert_eq!("right".parse::<Side>().unwrap(), Side::Right);
        assert_eq!(
            "up".parse::<Side>().unwrap_err(),
            WeylError::BadSide("up".to_string()),
        );
    }
}
