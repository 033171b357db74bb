//! Lengths and angles, given by the inner product of a
//! [`MetricSpaceField`]
//!
//! Dot products and norms work in any dimension. Angles and rotations are
//! only defined for planar (2-dimensional) vectors, and other vectors are
//! rejected with [`Error::NotPlanar`].

use crate::{
    ast::Scalar,
    dimension::ensure_planar,
    error::{Error, Result},
    field::MetricSpaceField,
    matrix::Matrix,
    vect::Vect,
};

/// The inner product of a [`MetricSpaceField`]. Obtained through
/// [`MetricSpaceField::product`]
pub struct InnerProduct<'a, T: Clone> {
    field: &'a dyn MetricSpaceField<T>,
}

impl<'a, T: Clone> InnerProduct<'a, T> {
    pub fn new(field: &'a dyn MetricSpaceField<T>) -> Self {
        Self { field }
    }

    /// The field this inner product evaluates with
    pub fn field(&self) -> &'a dyn MetricSpaceField<T> {
        self.field
    }

    /// `Σ u_i·v_i`, not evaluated
    pub fn product(&self, u: &Vect<T>, v: &Vect<T>) -> Result<Scalar<T>> {
        Vect::dot(u, v)
    }

    /// `sqrt(u·u)`
    pub fn norm(&self, v: &Vect<T>) -> Result<T> {
        let squared = self.field.actual(&Vect::contract(v, v))?;
        Ok(self.field.sqrt(squared))
    }

    /// Signed angle from `u` to `v`, in radians. It is positive when the cross
    /// product `u.x·v.y − v.x·u.y` is. Two null vectors make a zero angle
    pub fn angle(&self, u: &Vect<T>, v: &Vect<T>) -> Result<T> {
        ensure_planar(u)?;
        ensure_planar(v)?;
        let f = self.field;
        let (add, mul) = (f.addition(), f.multiplication());
        let zero = add.neutral();
        let (u_norm, v_norm) = (self.norm(u)?, self.norm(v)?);
        match (f.values_equal(&u_norm, &zero), f.values_equal(&v_norm, &zero)) {
            (true, true) => return Ok(zero),
            (false, false) => {}
            _ => return Err(Error::DivisionByZero),
        }
        let dot = f.actual(&Vect::contract(u, v))?;
        let cosine = mul.multiply(dot, mul.inverse(mul.multiply(u_norm, v_norm)));
        let unsigned = f.arccos(cosine);
        let [ux, uy] = [&u.coords()[0], &u.coords()[1]];
        let [vx, vy] = [&v.coords()[0], &v.coords()[1]];
        let cross = Scalar::diff(ux.clone() * vy.clone(), vx.clone() * uy.clone());
        if f.is_negative(&f.actual(&cross)?) {
            Ok(add.inverse(unsigned))
        } else {
            Ok(unsigned)
        }
    }

    /// Rotate a planar vector by `angle`, through the rotation matrix
    /// `[[cos θ, −sin θ], [sin θ, cos θ]]`
    pub fn rot(&self, v: &Vect<T>, angle: &Degrees<T>) -> Result<Vect<T>> {
        ensure_planar(v)?;
        let theta = angle.resolve(self)?;
        let rotation = Matrix::rotation(
            Scalar::value(self.field.cos(&theta)),
            Scalar::value(self.field.sin(&theta)),
        );
        rotation.apply(v)
    }
}

/// A measure of angle, in radians, resolved only once an [`InnerProduct`] is
/// known
#[derive(Debug)]
pub enum Degrees<T> {
    /// A fixed measure, which doesn't depend on the inner product
    Default(Scalar<T>),
    /// Signed angle from the first planar vector to the second
    Between(Vect<T>, Vect<T>),
    /// Sum of several measures
    Sum(Vec<Degrees<T>>),
}

impl<T> Clone for Degrees<T> {
    fn clone(&self) -> Self {
        match self {
            Degrees::Default(s) => Degrees::Default(s.clone()),
            Degrees::Between(u, v) => Degrees::Between(u.clone(), v.clone()),
            Degrees::Sum(measures) => Degrees::Sum(measures.clone()),
        }
    }
}

impl<T> Degrees<T> {
    /// The angle from `u` to `v`, both of which must be planar
    pub fn between(u: Vect<T>, v: Vect<T>) -> Result<Self> {
        ensure_planar(&u)?;
        ensure_planar(&v)?;
        Ok(Degrees::Between(u, v))
    }

    pub fn sum(measures: impl IntoIterator<Item = Degrees<T>>) -> Self {
        Degrees::Sum(measures.into_iter().collect())
    }
}

impl<T: Clone> Degrees<T> {
    pub fn resolve(&self, product: &InnerProduct<'_, T>) -> Result<T> {
        let field = product.field();
        match self {
            Degrees::Default(s) => field.actual(s),
            Degrees::Between(u, v) => product.angle(u, v),
            Degrees::Sum(measures) => {
                let add = field.addition();
                measures
                    .iter()
                    .try_fold(add.neutral(), |acc, d| Ok(add.add(acc, d.resolve(product)?)))
            }
        }
    }
}

impl<T> From<Scalar<T>> for Degrees<T> {
    fn from(s: Scalar<T>) -> Self {
        Degrees::Default(s)
    }
}

impl<T: PartialEq> PartialEq for Degrees<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Degrees::Default(a), Degrees::Default(b)) => a == b,
            (Degrees::Between(u1, v1), Degrees::Between(u2, v2)) => u1 == u2 && v1 == v2,
            (Degrees::Sum(a), Degrees::Sum(b)) => a == b,
            _ => false,
        }
    }
}
