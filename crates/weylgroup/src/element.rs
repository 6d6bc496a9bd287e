//! Weyl-group elements.

use std::ops::Mul;

use weylmath::{QMatrix, QVector};

/// Element of a Weyl group, represented by its orthogonal matrix acting on
/// the ambient space.
///
/// Elements are cheap to hash and compare, so coset-representative sets
/// have O(1) membership tests. Operations that need root data (length,
/// reduced words) live on [`WeylGroup`](crate::WeylGroup).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeylElement(QMatrix);

impl WeylElement {
    /// Constructs the identity element acting on `ndim` ambient dimensions.
    pub fn one(ndim: u8) -> Self {
        WeylElement(QMatrix::ident(ndim))
    }
    /// Constructs the reflection through the hyperplane orthogonal to a
    /// root vector.
    pub(crate) fn reflection(root: &QVector) -> Self {
        WeylElement(QMatrix::reflection(root))
    }

    /// Returns the matrix of the element.
    pub fn matrix(&self) -> &QMatrix {
        &self.0
    }
    /// Returns whether this is the identity element.
    pub fn is_one(&self) -> bool {
        self.0 == QMatrix::ident(self.0.ndim())
    }
    /// Returns the inverse of the element.
    ///
    /// Ambient realizations are orthonormal, so inversion is transposition.
    #[must_use]
    pub fn inverse(&self) -> WeylElement {
        WeylElement(self.0.transpose())
    }
    /// Applies the element to an ambient-space weight.
    pub fn action(&self, weight: &QVector) -> QVector {
        self.0.transform(weight)
    }
}

impl Mul<&WeylElement> for &WeylElement {
    type Output = WeylElement;
    fn mul(self, rhs: &WeylElement) -> WeylElement {
        WeylElement(&self.0 * &rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weylmath::qvector;

    #[test]
    fn test_reflection_element() {
        let s = WeylElement::reflection(&qvector![1, -1, 0]);
        assert!(!s.is_one());
        assert!((&s * &s).is_one());
        assert_eq!(s.inverse(), s);
        assert_eq!(s.action(&qvector![2, 5, 7]), qvector![5, 2, 7]);
    }
}
