use super::base_types::{ScalarNode as N, *};
use crate::{
    dimension::ensure_planar,
    error::Result,
    metric::Degrees,
    vect::Vect,
};
use std::{cell::OnceCell, rc::Rc};

/// A scalar expression. Nothing is computed when building it: a
/// [`Field`][crate::Field] must be given to [`Scalar::eval`] (or
/// [`Field::actual`][crate::Field::actual]) to obtain an actual value of type
/// `T`.
///
/// Uses [`Rc`] internally, so you can clone it extensively. Clones share their
/// node, which matters for [`Scalar::greater`] and [`Scalar::lower`] whose
/// generated value is cached in the node.
#[derive(Debug)]
#[repr(transparent)]
pub struct Scalar<T> {
    pub(crate) rc: Rc<ScalarNode<T>>,
}

/// Create a scalar expression that just returns some pre-evaluated value
pub fn val<T>(x: T) -> Scalar<T> {
    Scalar::new(N::Value(x))
}

impl<T> Clone for Scalar<T> {
    fn clone(&self) -> Self {
        Self {
            rc: Rc::clone(&self.rc),
        }
    }
}

impl<T> From<T> for Scalar<T> {
    fn from(x: T) -> Self {
        val(x)
    }
}

/// Clones of the same expression are always equal, otherwise the nodes are
/// compared structurally (see [`ScalarNode`])
impl<T: PartialEq> PartialEq for Scalar<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.rc, &other.rc) || self.rc == other.rc
    }
}

impl<T> Scalar<T> {
    pub(crate) fn new(node: ScalarNode<T>) -> Self {
        Self { rc: Rc::new(node) }
    }

    /// Get the node at the top of this expression
    pub fn node(&self) -> &ScalarNode<T> {
        &self.rc
    }

    /// A literal value
    pub fn value(x: T) -> Self {
        val(x)
    }

    /// The additive identity of whichever field evaluates the expression
    pub fn zero() -> Self {
        Self::new(N::AddIdentity)
    }

    /// The multiplicative identity of whichever field evaluates the expression
    pub fn one() -> Self {
        Self::new(N::MultIdentity)
    }

    /// A value drawn again from the field at each evaluation
    pub fn random() -> Self {
        Self::new(N::Random)
    }

    /// A random value greater than `lower_bound`, drawn once. Needs an
    /// [`OrderedField`][crate::OrderedField] on first evaluation
    pub fn greater(lower_bound: impl Into<Self>) -> Self {
        Self::new(N::Greater(lower_bound.into(), OnceCell::new()))
    }

    /// A random value lower than `upper_bound`, drawn once. Needs an
    /// [`OrderedField`][crate::OrderedField] on first evaluation
    pub fn lower(upper_bound: impl Into<Self>) -> Self {
        Self::new(N::Lower(upper_bound.into(), OnceCell::new()))
    }

    /// Sum of all the operands. Operand order is irrelevant
    pub fn sum<S: Into<Self>>(operands: impl IntoIterator<Item = S>) -> Self {
        Self::new(N::Add(operands.into_iter().map(Into::into).collect()))
    }

    /// Product of all the operands. Operand order is irrelevant
    pub fn product<S: Into<Self>>(operands: impl IntoIterator<Item = S>) -> Self {
        Self::new(N::Multiplication(
            operands.into_iter().map(Into::into).collect(),
        ))
    }

    pub fn diff(first: impl Into<Self>, second: impl Into<Self>) -> Self {
        Self::new(N::Diff(first.into(), second.into()))
    }

    /// Fails at evaluation if the divisor evaluates to zero
    pub fn division(dividend: impl Into<Self>, divisor: impl Into<Self>) -> Self {
        Self::new(N::Division(dividend.into(), divisor.into()))
    }

    /// Multiplicative inverse. Fails at evaluation if `self` evaluates to zero
    pub fn inverse(self) -> Self {
        Self::new(N::MultInverse(self))
    }

    /// Evaluates `on_true` or `on_false` depending on `predicate`, never both
    pub fn ternary(predicate: Predicate<T>, on_true: impl Into<Self>, on_false: impl Into<Self>) -> Self {
        Self::new(N::Ternary(predicate, on_true.into(), on_false.into()))
    }

    /// Euclidean norm of `v`. Needs a
    /// [`MetricSpaceField`][crate::MetricSpaceField] at evaluation
    pub fn norm(v: Vect<T>) -> Self {
        Self::new(N::Norm(v))
    }

    /// Signed angle from `u` to `v`, both of which must be planar. Needs a
    /// [`MetricSpaceField`][crate::MetricSpaceField] at evaluation
    pub fn angle(u: Vect<T>, v: Vect<T>) -> Result<Self> {
        ensure_planar(&u)?;
        ensure_planar(&v)?;
        Ok(Self::new(N::Angle(u, v)))
    }

    /// Coordinate `index` of the planar vector `vect` rotated by `angle`
    pub(crate) fn rotated_coord(vect: Vect<T>, angle: Degrees<T>, index: usize) -> Self {
        Self::new(N::RotatedCoord { vect, angle, index })
    }

    /// The value generated by a [`Scalar::greater`] or [`Scalar::lower`] node,
    /// if it has already been evaluated. `None` for every other node
    pub fn memoized(&self) -> Option<&Scalar<T>> {
        match self.node() {
            N::Greater(_, cache) | N::Lower(_, cache) => cache.get(),
            _ => None,
        }
    }

    /// Predicate holding when `self` and `other` are equal according to the
    /// evaluating field
    pub fn equals(&self, other: &Self) -> Predicate<T> {
        Predicate::Equals(self.clone(), other.clone())
    }
}

impl<T> Predicate<T> {
    pub fn and(operands: impl IntoIterator<Item = Predicate<T>>) -> Self {
        Predicate::And(operands.into_iter().collect())
    }

    pub fn or(operands: impl IntoIterator<Item = Predicate<T>>) -> Self {
        Predicate::Or(operands.into_iter().collect())
    }
}

impl<T> std::ops::Not for Predicate<T> {
    type Output = Self;
    fn not(self) -> Self {
        Predicate::Not(Box::new(self))
    }
}

impl<T> std::ops::BitAnd for Predicate<T> {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Predicate::And(vec![self, rhs])
    }
}

impl<T> std::ops::BitOr for Predicate<T> {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Predicate::Or(vec![self, rhs])
    }
}

impl<T, E: Into<Scalar<T>>> std::ops::Add<E> for Scalar<T> {
    type Output = Self;
    fn add(self, rhs: E) -> Self {
        Scalar::sum([self, rhs.into()])
    }
}

impl<T, E: Into<Scalar<T>>> std::ops::Mul<E> for Scalar<T> {
    type Output = Self;
    fn mul(self, rhs: E) -> Self {
        Scalar::product([self, rhs.into()])
    }
}

impl<T, E: Into<Scalar<T>>> std::ops::Sub<E> for Scalar<T> {
    type Output = Self;
    fn sub(self, rhs: E) -> Self {
        Scalar::diff(self, rhs)
    }
}

impl<T, E: Into<Scalar<T>>> std::ops::Div<E> for Scalar<T> {
    type Output = Self;
    fn div(self, rhs: E) -> Self {
        Scalar::division(self, rhs)
    }
}

impl<T> std::ops::Neg for Scalar<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Scalar::diff(Scalar::zero(), self)
    }
}

macro_rules! raw_with_scalar_binary_ops {
    ($($t:ty),*) => {
        $(
        impl std::ops::Add<Scalar<$t>> for $t {
            type Output = Scalar<$t>;
            #[inline]
            fn add(self, rhs: Scalar<$t>) -> Self::Output {
                val(self) + rhs
            }
        }
        impl std::ops::Mul<Scalar<$t>> for $t {
            type Output = Scalar<$t>;
            #[inline]
            fn mul(self, rhs: Scalar<$t>) -> Self::Output {
                val(self) * rhs
            }
        }
        impl std::ops::Sub<Scalar<$t>> for $t {
            type Output = Scalar<$t>;
            #[inline]
            fn sub(self, rhs: Scalar<$t>) -> Self::Output {
                val(self) - rhs
            }
        }
        )*
    };
}
raw_with_scalar_binary_ops!(f32, f64);
