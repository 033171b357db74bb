//! The errors that can be raised while building or evaluating expressions

use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// The structural size of a vector or matrix operand, as compared by the
/// dimension checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Number of coordinates of a vector
    Vector(usize),
    /// Lines (codomain dim) and columns (domain dim) of a matrix
    Matrix { lines: usize, cols: usize },
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::Vector(n) => write!(f, "vector of dimension {n}"),
            Dimension::Matrix { lines, cols } => write!(f, "{lines}x{cols} matrix"),
        }
    }
}

/// An optional capability a [`Field`][crate::Field] may expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// See [`OrderedField`][crate::OrderedField]
    Ordered,
    /// See [`MetricSpaceField`][crate::MetricSpaceField]
    Metric,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Capability::Ordered => "ordered field",
            Capability::Metric => "inner product space",
        })
    }
}

/// Errors that can occur when building or evaluating expressions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Operands of a multi-operand construction do not have the same size
    #[error("{operation}: operand #{index} is a {found}, but operand #0 is a {reference}")]
    DimensionMismatch {
        /// Name of the construction that was refused
        operation: &'static str,
        /// Dimension of the first operand
        reference: Dimension,
        /// Position of the offending operand
        index: usize,
        /// Dimension of the offending operand
        found: Dimension,
    },

    /// A fixed matrix was given the wrong number of coordinates
    #[error("a {lines}x{cols} matrix cannot hold {found} coordinates")]
    InvalidShape {
        lines: usize,
        cols: usize,
        found: usize,
    },

    /// A multi-operand construction was given no operand at all, so there is
    /// no dimension to build from
    #[error("{0}: at least one operand is needed")]
    NoOperands(&'static str),

    /// A line, column or coordinate index is out of range
    #[error("index {index} out of bounds (length is {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Division by a value equal to the additive identity
    #[error("division by zero")]
    DivisionByZero,

    /// Multiplicative inverse of a value equal to the additive identity
    #[error("the additive identity has no multiplicative inverse")]
    UninvertibleElement,

    /// An operation needs a field capability the given field lacks
    #[error("operation is only supported by an {0}")]
    UnsupportedFieldCapability(Capability),

    /// `between(lower, upper)` called with `lower > upper`
    #[error("invalid range: lower bound {lower} is greater than upper bound {upper}")]
    InvalidRange { lower: String, upper: String },

    /// Angle and rotation are only defined for 2-dimensional vectors
    #[error("angle and rotation are only defined in the plane, got a vector of dimension {found}")]
    NotPlanar { found: usize },

    /// Reserved for geometric constructions built on top of this crate (eg.
    /// the slope of a vertical line)
    #[error("illegal geometric state: {0}")]
    IllegalGeometricState(String),

    /// A [`FieldConfig`][crate::FieldConfig] is not usable
    #[error("invalid field configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn invalid_range(lower: &impl std::fmt::Debug, upper: &impl std::fmt::Debug) -> Self {
        Error::InvalidRange {
            lower: format!("{lower:?}"),
            upper: format!("{upper:?}"),
        }
    }
}
