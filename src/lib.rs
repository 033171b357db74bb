/*!
# Field Abstract Syntax Tree

Construct scalar, vector and matrix expressions without choosing yet which
numbers they are made of. The main type to build and combine these
expressions is [`Scalar`], an immutable tree of operations whose leaves are
literal values, identities, or random draws. Vectors ([`Vect`]) and matrices
([`Matrix`]) are built out of scalars.

Expressions are agnostic over which number type is used to compute them. This
is achieved via the [`Field`] trait and its subtraits, which only provide the
primitive operations (add, multiply, inverses, random draws and equality).
Two fields are provided in [`fields`]: floating point numbers compared with
some tolerance, and exact fractions.

Computing an expression is done in 2 phases:

- 1: **AST construction**. Combining vectors and matrices checks that the
  dimensions of the operands agree, and fails right away with a
  [`Error::DimensionMismatch`] otherwise. Nothing is evaluated yet, so this
  phase never draws a random value nor reads any actual number.
- 2: **Evaluation**. Given a field, [`Field::actual`] walks the tree depth
  first and computes the value of each node with the operations of the field.
  Some nodes need more than a plain field: values drawn within bounds need an
  [`OrderedField`], and norms, angles and rotations need a
  [`MetricSpaceField`]. Evaluating them against a field that lacks the
  capability fails with [`Error::UnsupportedFieldCapability`].

The same expression can be evaluated several times, and with different
fields. Random nodes draw a new value each time, except the bounded ones
([`Scalar::greater`] and [`Scalar::lower`]) which keep their first draw.
*/

pub mod ast;
pub mod config;
pub mod dimension;
pub mod error;
mod eval;
pub mod field;
pub mod fields;
pub mod matrix;
pub mod metric;
pub mod vect;

pub use ast::{val, Bag, Predicate, Scalar, ScalarNode};
pub use config::FieldConfig;
pub use dimension::{check_dimensions, Dimensioned};
pub use error::{Capability, Dimension, Error, Result};
pub use field::{
    Field, FieldAddition, FieldMultiplication, MetricSpaceField, OrderedField, OrderedRandom,
};
pub use matrix::{Matrix, MatrixNode};
pub use metric::{Degrees, InnerProduct};
pub use vect::Vect;
