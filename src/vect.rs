//! Fixed-dimension vectors of scalar expressions
//!
//! A [`Vect`] is just an ordered sequence of [`Scalar`]s. Combining vectors
//! combines their coordinates one by one into new scalar expressions, after
//! checking that the dimensions agree. Nothing is evaluated until the
//! coordinates are given to a [`Field`].

use crate::{
    ast::Scalar,
    dimension::{check_dimensions, ensure_planar, Dimensioned},
    error::{Dimension, Error, Result},
    field::Field,
    metric::Degrees,
};
use std::rc::Rc;

/// A vector of scalar expressions. Its dimension is fixed at construction.
///
/// Uses [`Rc`] internally, so clones are cheap and share their coordinates
#[derive(Debug)]
pub struct Vect<T> {
    coords: Rc<[Scalar<T>]>,
}

impl<T> Clone for Vect<T> {
    fn clone(&self) -> Self {
        Self {
            coords: Rc::clone(&self.coords),
        }
    }
}

impl<T: PartialEq> PartialEq for Vect<T> {
    fn eq(&self, other: &Self) -> bool {
        self.coords == other.coords
    }
}

impl<T> Dimensioned for Vect<T> {
    fn dimension(&self) -> Dimension {
        Dimension::Vector(self.coords.len())
    }
}

impl<T> Vect<T> {
    /// A vector with the given coordinates
    pub fn new<S: Into<Scalar<T>>>(coords: impl IntoIterator<Item = S>) -> Self {
        Self {
            coords: coords.into_iter().map(Into::into).collect(),
        }
    }

    /// The null vector of dimension `dim`
    pub fn zero(dim: usize) -> Self {
        Self::new((0..dim).map(|_| Scalar::zero()))
    }

    /// Return the base vectors of a vector space of dim `D`
    pub fn basis<const D: usize>() -> [Self; D] {
        array_init::array_init(|i| {
            Self::new((0..D).map(|j| if i == j { Scalar::one() } else { Scalar::zero() }))
        })
    }

    /// Number of coordinates
    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    pub fn coords(&self) -> &[Scalar<T>] {
        &self.coords
    }

    pub fn coord(&self, index: usize) -> Result<&Scalar<T>> {
        self.coords.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            len: self.coords.len(),
        })
    }

    /// Coordinate-wise sum of all the operands, which must have the same
    /// dimension
    pub fn sum<'a>(operands: impl IntoIterator<Item = &'a Vect<T>>) -> Result<Self>
    where
        T: 'a,
    {
        let operands: Vec<&Vect<T>> = operands.into_iter().collect();
        check_dimensions("Vect::sum", operands.iter().copied())?;
        let dim = operands[0].dim();
        Ok(Self::new((0..dim).map(|i| {
            Scalar::sum(operands.iter().map(|v| v.coords[i].clone()))
        })))
    }

    /// `first - second`, coordinate-wise
    pub fn minus(first: &Self, second: &Self) -> Result<Self> {
        check_dimensions("Vect::minus", [first, second])?;
        Ok(Self::new(
            first
                .coords
                .iter()
                .zip(second.coords.iter())
                .map(|(a, b)| Scalar::diff(a.clone(), b.clone())),
        ))
    }

    /// Multiply every coordinate by `factor`
    pub fn times(&self, factor: impl Into<Scalar<T>>) -> Self {
        let factor = factor.into();
        Self::new(self.coords.iter().map(|c| c.clone() * factor.clone()))
    }

    /// The vector divided by its norm. Evaluating it needs a
    /// [`MetricSpaceField`][crate::MetricSpaceField], and fails for a null
    /// vector
    pub fn normalized(&self) -> Self {
        self.times(Scalar::norm(self.clone()).inverse())
    }

    /// Rotate a planar vector. Each coordinate of the result is computed by
    /// the inner product of the evaluating field
    pub fn rotate(&self, angle: impl Into<Degrees<T>>) -> Result<Self> {
        ensure_planar(self)?;
        let angle = angle.into();
        Ok(Self::new(
            (0..2).map(|i| Scalar::rotated_coord(self.clone(), angle.clone(), i)),
        ))
    }

    /// `first` rotated by half the angle from `first` to `second`
    pub fn bisector(first: &Self, second: &Self) -> Result<Self> {
        check_dimensions("Vect::bisector", [first, second])?;
        let half = Scalar::angle(first.clone(), second.clone())? / (Scalar::one() + Scalar::one());
        first.rotate(half)
    }

    /// Algebraic contraction `Σ u_i·v_i`, with dimensions checked
    pub fn dot(u: &Self, v: &Self) -> Result<Scalar<T>> {
        check_dimensions("Vect::dot", [u, v])?;
        Ok(Self::contract(u, v))
    }

    /// `Σ u_i·v_i` over the common coordinates. Callers check the dimensions
    pub(crate) fn contract(u: &Self, v: &Self) -> Scalar<T> {
        Scalar::sum(
            u.coords
                .iter()
                .zip(v.coords.iter())
                .map(|(a, b)| a.clone() * b.clone()),
        )
    }

    /// Evaluate every coordinate
    pub fn actual<F: Field<T> + ?Sized>(&self, field: &F) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.coords.iter().map(|c| field.actual(c)).collect()
    }
}

impl<T> FromIterator<Scalar<T>> for Vect<T> {
    fn from_iter<I: IntoIterator<Item = Scalar<T>>>(iter: I) -> Self {
        Self::new(iter)
    }
}
