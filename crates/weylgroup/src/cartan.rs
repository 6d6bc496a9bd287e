//! Finite crystallographic Cartan types.

use std::fmt;
use std::str::FromStr;

use crate::error::{WeylError, WeylResult};

/// Cartan type of a finite crystallographic root system.
///
/// See also: [Dynkin diagram](https://w.wiki/7PLe)
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CartanType {
    A(u8),
    B(u8),
    C(u8),
    D(u8),
    E6,
    E7,
    E8,
    F4,
    G2,
}

impl CartanType {
    /// Returns the rank (number of simple roots).
    pub fn rank(self) -> u8 {
        match self {
            CartanType::A(n) | CartanType::B(n) | CartanType::C(n) | CartanType::D(n) => n,
            CartanType::E6 => 6,
            CartanType::E7 => 7,
            CartanType::E8 => 8,
            CartanType::F4 => 4,
            CartanType::G2 => 2,
        }
    }

    /// Returns the dimension of the ambient space in which the roots are
    /// realized. This exceeds the rank for types A, E6, E7, and G2.
    pub fn ambient_dim(self) -> u8 {
        match self {
            CartanType::A(n) => n + 1,
            CartanType::B(n) | CartanType::C(n) | CartanType::D(n) => n,
            CartanType::E6 | CartanType::E7 | CartanType::E8 => 8,
            CartanType::F4 => 4,
            CartanType::G2 => 3,
        }
    }

    /// Returns the order of the Weyl group.
    pub fn weyl_order(self) -> u64 {
        fn factorial(n: u8) -> u64 {
            (1..=n as u64).product()
        }
        match self {
            CartanType::A(n) => factorial(n + 1),
            CartanType::B(n) | CartanType::C(n) => (1 << n) * factorial(n),
            CartanType::D(n) => (1 << (n - 1)) * factorial(n),
            CartanType::E6 => 51_840,
            CartanType::E7 => 2_903_040,
            CartanType::E8 => 696_729_600,
            CartanType::F4 => 1_152,
            CartanType::G2 => 12,
        }
    }

    /// Returns whether the root system has roots of two different lengths
    /// relevant to the short-root condition in Enright's formula (types B,
    /// C, and G).
    pub fn has_two_root_lengths(self) -> bool {
        matches!(self, CartanType::B(_) | CartanType::C(_) | CartanType::G2)
    }

    /// Returns the full index set of the Dynkin diagram, `1..=rank`
    /// (Bourbaki numbering).
    pub fn index_set(self) -> Vec<usize> {
        (1..=self.rank() as usize).collect()
    }
}

impl fmt::Display for CartanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            CartanType::A(_) => 'A',
            CartanType::B(_) => 'B',
            CartanType::C(_) => 'C',
            CartanType::D(_) => 'D',
            CartanType::E6 | CartanType::E7 | CartanType::E8 => 'E',
            CartanType::F4 => 'F',
            CartanType::G2 => 'G',
        };
        write!(f, "{letter}{}", self.rank())
    }
}

impl FromStr for CartanType {
    type Err = WeylError;

    fn from_str(s: &str) -> WeylResult<Self> {
        let err = || WeylError::BadCartanType(s.to_string());
        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(err)?;
        let rank: u8 = chars.as_str().parse().map_err(|_| err())?;
        match (letter, rank) {
            ('A', n) if n >= 1 => Ok(CartanType::A(n)),
            ('B', n) if n >= 2 => Ok(CartanType::B(n)),
            ('C', n) if n >= 2 => Ok(CartanType::C(n)),
            ('D', n) if n >= 3 => Ok(CartanType::D(n)),
            ('E', 6) => Ok(CartanType::E6),
            ('E', 7) => Ok(CartanType::E7),
            ('E', 8) => Ok(CartanType::E8),
            ('F', 4) => Ok(CartanType::F4),
            ('G', 2) => Ok(CartanType::G2),
            _ => Err(err()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("A4".parse::<CartanType>().unwrap(), CartanType::A(4));
        assert_eq!("G2".parse::<CartanType>().unwrap(), CartanType::G2);
        assert!("H3".parse::<CartanType>().is_err());
        assert!("E9".parse::<CartanType>().is_err());
        assert!("B1".parse::<CartanType>().is_err());
        assert_eq!(CartanType::B(3).to_string(), "B3");
    }

    #[test]
    fn test_weyl_order() {
        assert_eq!(CartanType::A(4).weyl_order(), 120);
        assert_eq!(CartanType::B(3).weyl_order(), 48);
        assert_eq!(CartanType::D(4).weyl_order(), 192);
        assert_eq!(CartanType::F4.weyl_order(), 1152);
        assert_eq!(CartanType::G2.weyl_order(), 12);
    }
}
