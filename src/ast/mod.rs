mod base_types;
mod scalar;

pub use base_types::{Bag, Predicate, ScalarNode};
pub use scalar::{val, Scalar};
