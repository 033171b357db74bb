//! Describe a field over which expressions may be evaluated
//!
//! A [`Field`] tells how raw values of some type `T` add and multiply, how to
//! draw random ones, and when two of them should be considered equal. An
//! [`OrderedField`] additionally knows how to draw values within bounds, and a
//! [`MetricSpaceField`] exposes an [`InnerProduct`] to measure lengths and
//! angles.
//!
//! Fields never inspect expressions: evaluation is driven by the expression
//! nodes themselves, which query the field for what they need. So new fields
//! can be added without touching the expression code.

use crate::{
    ast::Scalar,
    error::{Capability, Error, Result},
    metric::InnerProduct,
};
use tracing::trace;

// # TYPES & TRAITS //

/// The additive group of a field. `add` must be commutative and associative
pub trait FieldAddition<T> {
    fn add(&self, a: T, b: T) -> T;
    /// Zero
    fn neutral(&self) -> T;
    /// Opposite
    fn inverse(&self, a: T) -> T;
}

/// The multiplicative group of a field (zero excluded). `multiply` must be
/// commutative and associative
pub trait FieldMultiplication<T> {
    fn multiply(&self, a: T, b: T) -> T;
    /// One
    fn neutral(&self) -> T;
    /// Reciprocal. Undefined for zero: callers are expected to check before
    fn inverse(&self, a: T) -> T;
}

/// A field of values of type `T`, able to evaluate any [`Scalar<T>`]
pub trait Field<T: Clone> {
    fn addition(&self) -> &dyn FieldAddition<T>;

    fn multiplication(&self) -> &dyn FieldMultiplication<T>;

    /// A fresh random element
    fn random(&self) -> Scalar<T>;

    /// Whether two raw values are considered equal. May be approximate
    fn values_equal(&self, a: &T, b: &T) -> bool;

    /// Evaluate both expressions and compare them with [`Field::values_equal`]
    fn equals(&self, a: &Scalar<T>, b: &Scalar<T>) -> Result<bool> {
        Ok(self.values_equal(&self.actual(a)?, &self.actual(b)?))
    }

    /// A random element which is not equal to `excluded`.
    ///
    /// Draws until it finds one, so it never returns for a field where every
    /// element is equal to `excluded`
    fn other(&self, excluded: &Scalar<T>) -> Result<Scalar<T>> {
        let excluded = self.actual(excluded)?;
        loop {
            let candidate = self.random();
            if !self.values_equal(&self.actual(&candidate)?, &excluded) {
                return Ok(candidate);
            }
            trace!("random candidate equal to the excluded value, drawing again");
        }
    }

    /// Evaluate an expression to get its actual value
    fn actual(&self, s: &Scalar<T>) -> Result<T> {
        s.eval(self)
    }

    /// `Some` if this field can generate values within bounds
    fn as_ordered(&self) -> Option<&dyn OrderedField<T>> {
        None
    }

    /// `Some` if this field has an inner product
    fn as_metric(&self) -> Option<&dyn MetricSpaceField<T>> {
        None
    }
}

/// Draws raw values within bounds
pub trait OrderedRandom<T> {
    /// A value `x` such that `lower <= x <= upper`. Fails with
    /// [`Error::InvalidRange`] if `lower > upper`
    fn between(&self, lower: &T, upper: &T) -> Result<T>;
    /// A value between `lower` and some configured upper bound
    fn greater(&self, lower: &T) -> Result<T>;
    /// A value between some configured lower bound and `upper`
    fn lower(&self, upper: &T) -> Result<T>;
}

/// A [`Field`] with a total order, which permits constrained random generation
pub trait OrderedField<T: Clone>: Field<T> {
    fn ordered_random(&self) -> &dyn OrderedRandom<T>;

    fn between(&self, lower: &Scalar<T>, upper: &Scalar<T>) -> Result<Scalar<T>> {
        let (lower, upper) = (self.actual(lower)?, self.actual(upper)?);
        Ok(Scalar::value(self.ordered_random().between(&lower, &upper)?))
    }

    fn greater(&self, lower: &Scalar<T>) -> Result<Scalar<T>> {
        let lower = self.actual(lower)?;
        Ok(Scalar::value(self.ordered_random().greater(&lower)?))
    }

    fn lower(&self, upper: &Scalar<T>) -> Result<Scalar<T>> {
        let upper = self.actual(upper)?;
        Ok(Scalar::value(self.ordered_random().lower(&upper)?))
    }
}

/// A [`Field`] with an inner product. Also provides the few real functions
/// that measuring lengths and angles needs
pub trait MetricSpaceField<T: Clone>: Field<T> {
    /// Implementors just return `InnerProduct::new(self)`
    fn product(&self) -> InnerProduct<'_, T>;

    fn sqrt(&self, x: T) -> T;
    /// Arc cosine, in radians
    fn arccos(&self, x: T) -> T;
    fn cos(&self, radians: &T) -> T;
    fn sin(&self, radians: &T) -> T;
    /// Whether `x` is strictly below zero. Used to orient angles
    fn is_negative(&self, x: &T) -> bool;
}

// # CAPABILITY LOOKUP //

pub(crate) fn ordered<T: Clone, F: Field<T> + ?Sized>(field: &F) -> Result<&dyn OrderedField<T>> {
    field
        .as_ordered()
        .ok_or(Error::UnsupportedFieldCapability(Capability::Ordered))
}

pub(crate) fn metric<T: Clone, F: Field<T> + ?Sized>(field: &F) -> Result<&dyn MetricSpaceField<T>> {
    field
        .as_metric()
        .ok_or(Error::UnsupportedFieldCapability(Capability::Metric))
}
