//! Linear maps as arrays of scalar expressions
//!
//! A [`Matrix`] with `target` lines and `source` columns maps vectors of
//! dimension `source` to vectors of dimension `target`. Fixed matrices store
//! their coordinates column by column, so a column is a contiguous slice and a
//! line is gathered with a stride of `lines`.
//!
//! Combined matrices (sums, scalings, transpositions) don't copy any
//! coordinate: each accessor combines the corresponding accessors of the
//! operands.

use crate::{
    ast::Scalar,
    dimension::{check_dimensions, expect_dimension, Dimensioned},
    error::{Dimension, Error, Result},
    field::Field,
    vect::Vect,
};
use num_integer::Integer;
use std::rc::Rc;

/// The nodes a [`Matrix`] can be made of
#[derive(Debug)]
pub enum MatrixNode<T> {
    /// Literal coordinates, column-major
    Fixed {
        lines: usize,
        cols: usize,
        coords: Vec<Scalar<T>>,
    },
    /// Sum of matrices of identical shape. Never empty
    Sum(Vec<Matrix<T>>),
    /// A matrix multiplied by a scalar
    Times(Matrix<T>, Scalar<T>),
    Transpose(Matrix<T>),
    /// A vector seen as a single-line matrix
    Row(Vect<T>),
}

/// A matrix of scalar expressions, representing a linear map.
///
/// Uses [`Rc`] internally, so clones are cheap
#[derive(Debug)]
#[repr(transparent)]
pub struct Matrix<T> {
    rc: Rc<MatrixNode<T>>,
}

impl<T> Clone for Matrix<T> {
    fn clone(&self) -> Self {
        Self {
            rc: Rc::clone(&self.rc),
        }
    }
}

impl<T> Dimensioned for Matrix<T> {
    fn dimension(&self) -> Dimension {
        Dimension::Matrix {
            lines: self.lines(),
            cols: self.cols(),
        }
    }
}

impl<T> Matrix<T> {
    fn new(node: MatrixNode<T>) -> Self {
        Self { rc: Rc::new(node) }
    }

    pub fn node(&self) -> &MatrixNode<T> {
        &self.rc
    }

    /// A `lines`x`cols` matrix, given its coordinates column after column
    pub fn fixed<S: Into<Scalar<T>>>(
        lines: usize,
        cols: usize,
        coords: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let coords: Vec<Scalar<T>> = coords.into_iter().map(Into::into).collect();
        if lines.checked_mul(cols) != Some(coords.len()) {
            return Err(Error::InvalidShape {
                lines,
                cols,
                found: coords.len(),
            });
        }
        Ok(Self::new(MatrixNode::Fixed {
            lines,
            cols,
            coords,
        }))
    }

    /// A matrix whose columns are the given vectors, which must share their
    /// dimension
    pub fn from_columns<'a>(columns: impl IntoIterator<Item = &'a Vect<T>>) -> Result<Self>
    where
        T: 'a,
    {
        let columns: Vec<&Vect<T>> = columns.into_iter().collect();
        let lines = match check_dimensions("Matrix::from_columns", columns.iter().copied())? {
            Dimension::Vector(n) => n,
            Dimension::Matrix { lines, .. } => lines,
        };
        let cols = columns.len();
        Self::fixed(
            lines,
            cols,
            columns.iter().flat_map(|c| c.coords().iter().cloned()),
        )
    }

    /// The `n`x`n` identity
    pub fn identity(n: usize) -> Self {
        let coords = (0..n * n)
            .map(|i| {
                let (col, line) = i.div_rem(&n);
                if col == line {
                    Scalar::one()
                } else {
                    Scalar::zero()
                }
            })
            .collect();
        Self::new(MatrixNode::Fixed {
            lines: n,
            cols: n,
            coords,
        })
    }

    /// The planar rotation `[[cos, −sin], [sin, cos]]`
    pub fn rotation(cos: Scalar<T>, sin: Scalar<T>) -> Self {
        Self::new(MatrixNode::Fixed {
            lines: 2,
            cols: 2,
            coords: vec![cos.clone(), sin.clone(), -sin, cos],
        })
    }

    /// `v` as a `1`x`n` matrix
    pub fn vector(v: Vect<T>) -> Self {
        Self::new(MatrixNode::Row(v))
    }

    /// Sum of matrices which must all have the same lines and columns
    pub fn sum<'a>(operands: impl IntoIterator<Item = &'a Matrix<T>>) -> Result<Self>
    where
        T: 'a,
    {
        let operands: Vec<Matrix<T>> = operands.into_iter().cloned().collect();
        check_dimensions("Matrix::sum", operands.iter())?;
        Ok(Self::new(MatrixNode::Sum(operands)))
    }

    /// Multiply every coordinate by `factor`
    pub fn times(&self, factor: impl Into<Scalar<T>>) -> Self {
        Self::new(MatrixNode::Times(self.clone(), factor.into()))
    }

    pub fn transpose(&self) -> Self {
        Self::new(MatrixNode::Transpose(self.clone()))
    }

    /// Number of lines, ie. dimension of the codomain
    pub fn lines(&self) -> usize {
        match self.node() {
            MatrixNode::Fixed { lines, .. } => *lines,
            MatrixNode::Sum(ms) => ms[0].lines(),
            MatrixNode::Times(m, _) => m.lines(),
            MatrixNode::Transpose(m) => m.cols(),
            MatrixNode::Row(_) => 1,
        }
    }

    /// Number of columns, ie. dimension of the domain
    pub fn cols(&self) -> usize {
        match self.node() {
            MatrixNode::Fixed { cols, .. } => *cols,
            MatrixNode::Sum(ms) => ms[0].cols(),
            MatrixNode::Times(m, _) => m.cols(),
            MatrixNode::Transpose(m) => m.lines(),
            MatrixNode::Row(v) => v.dim(),
        }
    }

    /// Dimension of the codomain. Same as [`Matrix::lines`]
    pub fn target(&self) -> usize {
        self.lines()
    }

    /// Dimension of the domain. Same as [`Matrix::cols`]
    pub fn source(&self) -> usize {
        self.cols()
    }

    /// All coordinates, column after column
    pub fn coords(&self) -> Vec<Scalar<T>> {
        match self.node() {
            MatrixNode::Fixed { coords, .. } => coords.clone(),
            MatrixNode::Sum(ms) => {
                let all: Vec<Vec<Scalar<T>>> = ms.iter().map(Matrix::coords).collect();
                (0..all[0].len())
                    .map(|i| Scalar::sum(all.iter().map(|c| c[i].clone())))
                    .collect()
            }
            MatrixNode::Times(m, s) => m.coords().into_iter().map(|c| c * s.clone()).collect(),
            // The columns of the transpose are the lines of the operand
            MatrixNode::Transpose(m) => (0..m.lines())
                .flat_map(|i| m.unchecked_line(i).coords().to_vec())
                .collect(),
            MatrixNode::Row(v) => v.coords().to_vec(),
        }
    }

    /// Column `index`, of dimension [`Matrix::lines`]
    pub fn column(&self, index: usize) -> Result<Vect<T>> {
        check_index(index, self.cols())?;
        Ok(self.unchecked_column(index))
    }

    /// Line `index`, of dimension [`Matrix::cols`]
    pub fn line(&self, index: usize) -> Result<Vect<T>> {
        check_index(index, self.lines())?;
        Ok(self.unchecked_line(index))
    }

    fn unchecked_column(&self, index: usize) -> Vect<T> {
        match self.node() {
            MatrixNode::Fixed { lines, coords, .. } => {
                Vect::new(coords[index * lines..(index + 1) * lines].iter().cloned())
            }
            MatrixNode::Sum(ms) => sum_of(ms.iter().map(|m| m.unchecked_column(index))),
            MatrixNode::Times(m, s) => m.unchecked_column(index).times(s.clone()),
            MatrixNode::Transpose(m) => m.unchecked_line(index),
            MatrixNode::Row(v) => Vect::new([v.coords()[index].clone()]),
        }
    }

    fn unchecked_line(&self, index: usize) -> Vect<T> {
        match self.node() {
            MatrixNode::Fixed {
                lines,
                cols,
                coords,
            } => Vect::new((0..*cols).map(|k| coords[index + k * lines].clone())),
            MatrixNode::Sum(ms) => sum_of(ms.iter().map(|m| m.unchecked_line(index))),
            MatrixNode::Times(m, s) => m.unchecked_line(index).times(s.clone()),
            MatrixNode::Transpose(m) => m.unchecked_column(index),
            MatrixNode::Row(v) => v.clone(),
        }
    }

    /// Apply the linear map to `v`, which must have dimension
    /// [`Matrix::cols`]. Coordinate `i` of the result is the contraction of `v`
    /// with line `i`
    pub fn apply(&self, v: &Vect<T>) -> Result<Vect<T>> {
        expect_dimension("Matrix::apply", Dimension::Vector(self.cols()), 1, v)?;
        Ok(self.unchecked_apply(v))
    }

    fn unchecked_apply(&self, v: &Vect<T>) -> Vect<T> {
        match self.node() {
            MatrixNode::Sum(ms) => sum_of(ms.iter().map(|m| m.unchecked_apply(v))),
            MatrixNode::Times(m, s) => m.unchecked_apply(v).times(s.clone()),
            MatrixNode::Fixed { .. } | MatrixNode::Transpose(_) | MatrixNode::Row(_) => {
                (0..self.lines())
                    .map(|i| Vect::contract(v, &self.unchecked_line(i)))
                    .collect()
            }
        }
    }

    /// Evaluate every coordinate, column after column
    pub fn actual<F: Field<T> + ?Sized>(&self, field: &F) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.coords().iter().map(|c| field.actual(c)).collect()
    }
}

impl<T: PartialEq> Matrix<T> {
    /// Whether both matrices have the same shape and structurally equal
    /// coordinates
    pub fn same_coords(&self, other: &Self) -> bool {
        self.lines() == other.lines() && self.cols() == other.cols() && self.coords() == other.coords()
    }
}

fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(Error::IndexOutOfBounds { index, len })
    }
}

/// Coordinate-wise sum of vectors already known to share their dimension
fn sum_of<T>(vects: impl Iterator<Item = Vect<T>>) -> Vect<T> {
    let vects: Vec<Vect<T>> = vects.collect();
    let dim = vects.first().map_or(0, Vect::dim);
    (0..dim)
        .map(|i| Scalar::sum(vects.iter().map(|v| v.coords()[i].clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::val, fields::DecimalField, FieldConfig};
    use rstest::*;

    type M = Matrix<f64>;
    type V = Vect<f64>;

    #[fixture]
    fn decimal() -> DecimalField {
        DecimalField::from_config(&FieldConfig::default().with_seed(5)).unwrap()
    }

    /// [[1, 2, 3],
    ///  [4, 5, 6]]
    fn two_by_three() -> M {
        M::fixed(2, 3, [1.0, 4.0, 2.0, 5.0, 3.0, 6.0]).unwrap()
    }

    #[test]
    fn fixed_validates_shape() {
        assert_eq!(
            M::fixed(2, 2, [1.0, 2.0, 3.0]).map(|m| m.lines()),
            Err(Error::InvalidShape {
                lines: 2,
                cols: 2,
                found: 3
            })
        );
    }

    #[test]
    fn oversized_shape_is_refused() {
        let e = M::fixed(usize::MAX, 2, [1.0]).map(|m| m.lines()).unwrap_err();
        assert_eq!(
            e,
            Error::InvalidShape {
                lines: usize::MAX,
                cols: 2,
                found: 1
            }
        );
        assert!(e.to_string().ends_with("cannot hold 1 coordinates"));
    }

    #[rstest]
    fn columns_and_lines(decimal: DecimalField) {
        let m = two_by_three();
        assert_eq!((m.lines(), m.cols()), (2, 3));
        assert_eq!((m.target(), m.source()), (2, 3));
        assert_eq!(m.column(1).unwrap().actual(&decimal).unwrap(), vec![2.0, 5.0]);
        assert_eq!(m.line(1).unwrap().actual(&decimal).unwrap(), vec![4.0, 5.0, 6.0]);
        assert_eq!(m.column(3), Err(Error::IndexOutOfBounds { index: 3, len: 3 }));
        assert_eq!(m.line(2), Err(Error::IndexOutOfBounds { index: 2, len: 2 }));
    }

    #[rstest]
    fn quarter_turn(decimal: DecimalField) {
        // [[0, -1], [1, 0]]
        let m = M::fixed(2, 2, [0.0, 1.0, -1.0, 0.0]).unwrap();
        let r = m.apply(&V::new([1.0, 0.0])).unwrap();
        assert_eq!(r.actual(&decimal).unwrap(), vec![0.0, 1.0]);
    }

    #[rstest]
    fn apply_rectangular(decimal: DecimalField) {
        let r = two_by_three().apply(&V::new([1.0, 1.0, 1.0])).unwrap();
        assert_eq!(r.actual(&decimal).unwrap(), vec![6.0, 15.0]);
        assert_eq!(
            two_by_three().apply(&V::new([1.0, 1.0])),
            Err(Error::DimensionMismatch {
                operation: "Matrix::apply",
                reference: Dimension::Vector(3),
                index: 1,
                found: Dimension::Vector(2),
            })
        );
    }

    #[rstest]
    fn transpose(decimal: DecimalField) {
        let t = two_by_three().transpose();
        assert_eq!((t.lines(), t.cols()), (3, 2));
        assert_eq!(t.actual(&decimal).unwrap(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(t.line(2).unwrap().actual(&decimal).unwrap(), vec![3.0, 6.0]);
        let r = t.apply(&V::new([1.0, -1.0])).unwrap();
        assert_eq!(r.actual(&decimal).unwrap(), vec![-3.0, -3.0, -3.0]);
    }

    #[test]
    fn double_transpose_is_identical() {
        for (lines, cols) in [(1, 1), (1, 4), (3, 2), (2, 5)] {
            let m = M::fixed(lines, cols, (0..lines * cols).map(|i| i as f64)).unwrap();
            let tt = m.transpose().transpose();
            assert!(tt.same_coords(&m));
            for i in 0..lines {
                assert_eq!(tt.line(i).unwrap(), m.line(i).unwrap());
            }
            for j in 0..cols {
                assert_eq!(tt.column(j).unwrap(), m.column(j).unwrap());
            }
        }
    }

    #[rstest]
    fn row_matrix(decimal: DecimalField) {
        let m = M::vector(V::new([1.0, 2.0, 3.0]));
        assert_eq!((m.lines(), m.cols()), (1, 3));
        assert_eq!(m.column(2).unwrap().actual(&decimal).unwrap(), vec![3.0]);
        let r = m.apply(&V::new([1.0, 1.0, 1.0])).unwrap();
        assert_eq!(r.actual(&decimal).unwrap(), vec![6.0]);
    }

    #[rstest]
    fn sum_of_matrices(decimal: DecimalField) {
        let a = two_by_three();
        let b = two_by_three().times(val(10.0));
        let s = M::sum([&a, &b]).unwrap();
        assert_eq!(s.actual(&decimal).unwrap(), vec![11.0, 44.0, 22.0, 55.0, 33.0, 66.0]);
        assert_eq!(s.column(0).unwrap().actual(&decimal).unwrap(), vec![11.0, 44.0]);
        assert_eq!(s.line(0).unwrap().actual(&decimal).unwrap(), vec![11.0, 22.0, 33.0]);
        let r = s.apply(&V::new([1.0, 0.0, 0.0])).unwrap();
        assert_eq!(r.actual(&decimal).unwrap(), vec![11.0, 44.0]);
    }

    #[test]
    fn sum_checks_lines_and_columns() {
        let a = two_by_three();
        let b = a.transpose();
        assert_eq!(
            M::sum([&a, &b]).map(|m| m.lines()),
            Err(Error::DimensionMismatch {
                operation: "Matrix::sum",
                reference: Dimension::Matrix { lines: 2, cols: 3 },
                index: 1,
                found: Dimension::Matrix { lines: 3, cols: 2 },
            })
        );
        assert_eq!(M::sum([]).map(|m| m.lines()), Err(Error::NoOperands("Matrix::sum")));
    }

    #[rstest]
    fn times_scales_everything(decimal: DecimalField) {
        let m = two_by_three().times(val(2.0));
        assert_eq!(m.column(2).unwrap().actual(&decimal).unwrap(), vec![6.0, 12.0]);
        assert_eq!(m.line(0).unwrap().actual(&decimal).unwrap(), vec![2.0, 4.0, 6.0]);
        let r = m.apply(&V::new([0.0, 0.0, 1.0])).unwrap();
        assert_eq!(r.actual(&decimal).unwrap(), vec![6.0, 12.0]);
    }

    #[rstest]
    fn identity_and_columns(decimal: DecimalField) {
        let id = M::identity(3);
        let v = V::new([4.0, 5.0, 6.0]);
        assert_eq!(id.apply(&v).unwrap().actual(&decimal).unwrap(), vec![4.0, 5.0, 6.0]);
        let cols = [V::new([1.0, 4.0]), V::new([2.0, 5.0]), V::new([3.0, 6.0])];
        let m = M::from_columns(&cols).unwrap();
        assert!(m.same_coords(&two_by_three()));
        assert!(M::from_columns([&V::new([1.0]), &V::new([1.0, 2.0])]).is_err());
    }
}
