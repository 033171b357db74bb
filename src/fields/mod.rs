//! Concrete [`Field`][crate::Field] implementations
//!
//! - [`DecimalField`]: floating point values compared with a tolerance. Ordered,
//!   and with the euclidean inner product
//! - [`RationalField`]: exact fractions. Ordered, but with no inner product
//!   since square roots of rationals aren't rational

mod decimal;
mod rational;

pub use decimal::{DecimalAddition, DecimalField, DecimalMultiplication, UniformRandom};
pub use rational::{Fraction, RationalAddition, RationalField, RationalMultiplication, RationalRandom};
