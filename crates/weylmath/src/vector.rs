//! N-dimensional exact vector math.

use std::fmt;
use std::iter::Sum;
use std::ops::*;

use itertools::Itertools;
use num_traits::Zero;
use smallvec::SmallVec;

use crate::Rational;

/// Constructs an N-dimensional rational vector from integer entries. Use
/// [`QVector::from_rationals()`] for non-integer components.
#[macro_export]
macro_rules! qvector {
    [$($x:expr),* $(,)?] => {
        $crate::QVector($crate::smallvec::smallvec![$($crate::Rational::from($x as i64)),*])
    };
}

/// N-dimensional vector over [`Rational`]. Indexing out of bounds via
/// [`QVector::get()`] returns zero.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QVector(pub SmallVec<[Rational; 4]>);

impl QVector {
    /// Constructs a zero vector with `ndim` components.
    pub fn zero(ndim: u8) -> Self {
        QVector(smallvec::smallvec![Rational::zero(); ndim as usize])
    }
    /// Constructs a unit vector along `axis`.
    pub fn unit(ndim: u8, axis: u8) -> Self {
        let mut ret = Self::zero(ndim);
        ret[axis] = Rational::from(1);
        ret
    }
    /// Constructs a vector from rational components.
    pub fn from_rationals(components: impl IntoIterator<Item = Rational>) -> Self {
        components.into_iter().collect()
    }

    /// Returns the number of components.
    pub fn ndim(&self) -> u8 {
        self.0.len() as u8
    }
    /// Returns a component of the vector, or zero if `idx` is out of bounds.
    pub fn get(&self, idx: u8) -> Rational {
        self.0.get(idx as usize).copied().unwrap_or_else(Rational::zero)
    }
    /// Returns an iterator over the components.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Rational> + '_ {
        self.0.iter().copied()
    }

    /// Returns the dot product with another vector.
    pub fn dot(&self, rhs: &QVector) -> Rational {
        std::iter::zip(self.iter(), rhs.iter())
            .map(|(l, r)| l * r)
            .sum()
    }
    /// Returns a scaled copy of the vector.
    #[must_use]
    pub fn scale(&self, scalar: Rational) -> QVector {
        self.iter().map(|x| x * scalar).collect()
    }
    /// Returns whether all components are zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|x| x.is_zero())
    }
}

impl fmt::Display for QVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.iter().join(", "))
    }
}

impl Index<u8> for QVector {
    type Output = Rational;
    fn index(&self, idx: u8) -> &Rational {
        &self.0[idx as usize]
    }
}
impl IndexMut<u8> for QVector {
    fn index_mut(&mut self, idx: u8) -> &mut Rational {
        &mut self.0[idx as usize]
    }
}

impl FromIterator<Rational> for QVector {
    fn from_iter<T: IntoIterator<Item = Rational>>(iter: T) -> Self {
        QVector(iter.into_iter().collect())
    }
}

impl Add<&QVector> for &QVector {
    type Output = QVector;
    fn add(self, rhs: &QVector) -> QVector {
        let ndim = std::cmp::max(self.ndim(), rhs.ndim());
        (0..ndim).map(|i| self.get(i) + rhs.get(i)).collect()
    }
}
impl Sub<&QVector> for &QVector {
    type Output = QVector;
    fn sub(self, rhs: &QVector) -> QVector {
        let ndim = std::cmp::max(self.ndim(), rhs.ndim());
        (0..ndim).map(|i| self.get(i) - rhs.get(i)).collect()
    }
}
impl Neg for &QVector {
    type Output = QVector;
    fn neg(self) -> QVector {
        self.iter().map(|x| -x).collect()
    }
}
impl Mul<Rational> for &QVector {
    type Output = QVector;
    fn mul(self, rhs: Rational) -> QVector {
        self.scale(rhs)
    }
}

macro_rules! impl_forward_owned_binop {
    ($trait:ident, $fn:ident) => {
        impl $trait<QVector> for QVector {
            type Output = QVector;
            fn $fn(self, rhs: QVector) -> QVector {
                (&self).$fn(&rhs)
            }
        }
        impl $trait<&QVector> for QVector {
            type Output = QVector;
            fn $fn(self, rhs: &QVector) -> QVector {
                (&self).$fn(rhs)
            }
        }
        impl $trait<QVector> for &QVector {
            type Output = QVector;
            fn $fn(self, rhs: QVector) -> QVector {
                self.$fn(&rhs)
            }
        }
    };
}
impl_forward_owned_binop!(Add, add);
impl_forward_owned_binop!(Sub, sub);

impl Neg for QVector {
    type Output = QVector;
    fn neg(self) -> QVector {
        -&self
    }
}

impl Sum for QVector {
    fn sum<I: Iterator<Item = QVector>>(iter: I) -> Self {
        iter.fold(QVector::default(), |a, b| &a + &b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_arithmetic() {
        let u = qvector![1, 2, 0];
        let v = qvector![0, -1, 3];
        assert_eq!(&u + &v, qvector![1, 1, 3]);
        assert_eq!(&u - &v, qvector![1, 3, -3]);
        assert_eq!(u.dot(&v), Rational::from(-2));
        assert_eq!(u.get(7), Rational::zero());
    }

    #[test]
    fn test_vector_display() {
        let v = QVector::from_rationals([Rational::new(3, 2), Rational::from(-1)]);
        assert_eq!(v.to_string(), "(3/2, -1)");
    }
}
