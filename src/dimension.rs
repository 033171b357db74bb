//! Dimension consistency of vector and matrix operands
//!
//! Every construction combining several vectors or matrices checks its
//! operands here before building anything. The checks only look at the
//! structure (number of coordinates, lines and columns) and never evaluate a
//! scalar.

use crate::error::{Dimension, Error, Result};

/// Anything with a size that must agree with the other operands of a
/// construction
pub trait Dimensioned {
    fn dimension(&self) -> Dimension;
}

/// Check that all operands have the dimension of the first one, and return it.
/// Matrices are compared on their lines and on their columns.
pub fn check_dimensions<'a, D: Dimensioned + 'a>(
    operation: &'static str,
    operands: impl IntoIterator<Item = &'a D>,
) -> Result<Dimension> {
    let mut operands = operands.into_iter();
    let reference = operands
        .next()
        .ok_or(Error::NoOperands(operation))?
        .dimension();
    for (i, op) in operands.enumerate() {
        expect_dimension(operation, reference, i + 1, op)?;
    }
    Ok(reference)
}

/// Check a single operand against an expected dimension. `index` identifies
/// the operand in the error
pub fn expect_dimension(
    operation: &'static str,
    expected: Dimension,
    index: usize,
    operand: &impl Dimensioned,
) -> Result<()> {
    let found = operand.dimension();
    if found == expected {
        Ok(())
    } else {
        Err(Error::DimensionMismatch {
            operation,
            reference: expected,
            index,
            found,
        })
    }
}

/// Angles and rotations only make sense for 2-dimensional vectors
pub(crate) fn ensure_planar(v: &impl Dimensioned) -> Result<()> {
    match v.dimension() {
        Dimension::Vector(2) => Ok(()),
        Dimension::Vector(found) => Err(Error::NotPlanar { found }),
        Dimension::Matrix { lines, cols } => Err(Error::NotPlanar { found: lines * cols }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Operand(Dimension);
    impl Dimensioned for Operand {
        fn dimension(&self) -> Dimension {
            self.0
        }
    }

    fn vector(n: usize) -> Operand {
        Operand(Dimension::Vector(n))
    }

    fn matrix(lines: usize, cols: usize) -> Operand {
        Operand(Dimension::Matrix { lines, cols })
    }

    #[test]
    fn agreeing_operands() {
        let ops = [vector(3), vector(3), vector(3)];
        assert_eq!(check_dimensions("test", &ops), Ok(Dimension::Vector(3)));
        let ops = [matrix(2, 3), matrix(2, 3)];
        assert_eq!(
            check_dimensions("test", &ops),
            Ok(Dimension::Matrix { lines: 2, cols: 3 })
        );
    }

    #[test]
    fn first_disagreeing_operand_is_reported() {
        let ops = [vector(2), vector(2), vector(3), vector(4)];
        assert_eq!(
            check_dimensions("test", &ops),
            Err(Error::DimensionMismatch {
                operation: "test",
                reference: Dimension::Vector(2),
                index: 2,
                found: Dimension::Vector(3),
            })
        );
    }

    #[test]
    fn matrices_compare_lines_and_columns() {
        assert!(check_dimensions("test", &[matrix(2, 3), matrix(3, 3)]).is_err());
        assert!(check_dimensions("test", &[matrix(2, 3), matrix(2, 2)]).is_err());
        // same number of coordinates is not enough
        assert!(check_dimensions("test", &[matrix(2, 3), matrix(3, 2)]).is_err());
    }

    #[test]
    fn no_operand() {
        let ops: [Operand; 0] = [];
        assert_eq!(check_dimensions("test", &ops), Err(Error::NoOperands("test")));
    }

    #[test]
    fn planarity() {
        assert!(ensure_planar(&vector(2)).is_ok());
        assert_eq!(ensure_planar(&vector(3)), Err(Error::NotPlanar { found: 3 }));
        assert_eq!(ensure_planar(&vector(1)), Err(Error::NotPlanar { found: 1 }));
    }
}
