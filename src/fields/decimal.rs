use crate::{
    ast::Scalar,
    config::FieldConfig,
    error::{Error, Result},
    field::*,
    metric::InnerProduct,
};
use num_traits::Float;
use rand::{distributions::uniform::SampleUniform, rngs::StdRng, Rng, SeedableRng};
use std::{cell::RefCell, fmt::Debug, marker::PhantomData};
use tracing::debug;

/// Floating point addition
#[derive(Debug, Default)]
pub struct DecimalAddition<F>(PhantomData<F>);

impl<F: Float> FieldAddition<F> for DecimalAddition<F> {
    fn add(&self, a: F, b: F) -> F {
        a + b
    }
    fn neutral(&self) -> F {
        F::zero()
    }
    fn inverse(&self, a: F) -> F {
        -a
    }
}

/// Floating point multiplication
#[derive(Debug, Default)]
pub struct DecimalMultiplication<F>(PhantomData<F>);

impl<F: Float> FieldMultiplication<F> for DecimalMultiplication<F> {
    fn multiply(&self, a: F, b: F) -> F {
        a * b
    }
    fn neutral(&self) -> F {
        F::one()
    }
    fn inverse(&self, a: F) -> F {
        a.recip()
    }
}

/// Uniform draws of floating point values, within `[lower, upper]` by default
///
/// Not reentrant: the generator sits in a [`RefCell`]
#[derive(Debug)]
pub struct UniformRandom<F> {
    rng: RefCell<StdRng>,
    lower: F,
    upper: F,
}

impl<F: Float + SampleUniform + Debug> UniformRandom<F> {
    pub fn new(rng: StdRng, lower: F, upper: F) -> Result<Self> {
        check_range(&lower, &upper)?;
        Ok(Self {
            rng: RefCell::new(rng),
            lower,
            upper,
        })
    }

    /// The configured bounds
    pub fn bounds(&self) -> (F, F) {
        (self.lower, self.upper)
    }

    /// A draw within the configured bounds
    fn sample(&self) -> F {
        self.rng.borrow_mut().gen_range(self.lower..=self.upper)
    }
}

fn check_range<F: Float + Debug>(lower: &F, upper: &F) -> Result<()> {
    // Also rejects NaN and infinite bounds, which cannot be sampled from
    if lower.is_finite() && upper.is_finite() && lower <= upper {
        Ok(())
    } else {
        Err(Error::invalid_range(lower, upper))
    }
}

impl<F: Float + SampleUniform + Debug> OrderedRandom<F> for UniformRandom<F> {
    fn between(&self, lower: &F, upper: &F) -> Result<F> {
        check_range(lower, upper)?;
        Ok(self.rng.borrow_mut().gen_range(*lower..=*upper))
    }

    fn greater(&self, lower: &F) -> Result<F> {
        self.between(lower, &self.upper)
    }

    fn lower(&self, upper: &F) -> Result<F> {
        self.between(&self.lower, upper)
    }
}

/// Floating point numbers, where values closer than some tolerance are
/// considered equal. This is an [`OrderedField`] and a [`MetricSpaceField`]
/// with the euclidean inner product.
///
/// Works with any [`Float`], and defaults to [`f64`]
#[derive(Debug)]
pub struct DecimalField<F = f64> {
    addition: DecimalAddition<F>,
    multiplication: DecimalMultiplication<F>,
    random: UniformRandom<F>,
    tolerance: F,
}

impl<F: Float + SampleUniform + Debug> DecimalField<F> {
    pub fn from_config(config: &FieldConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let field = Self {
            addition: DecimalAddition(PhantomData),
            multiplication: DecimalMultiplication(PhantomData),
            random: UniformRandom::new(
                rng,
                cast(config.lower_bound)?,
                cast(config.upper_bound)?,
            )?,
            tolerance: cast(config.tolerance)?,
        };
        debug!(
            tolerance = config.tolerance,
            lower_bound = config.lower_bound,
            upper_bound = config.upper_bound,
            seeded = config.seed.is_some(),
            "decimal field ready"
        );
        Ok(field)
    }

    pub fn tolerance(&self) -> F {
        self.tolerance
    }
}

fn cast<F: Float>(x: f64) -> Result<F> {
    F::from(x).ok_or_else(|| Error::InvalidConfig(format!("{x} cannot be represented")))
}

impl<F: Float + SampleUniform + Debug> Field<F> for DecimalField<F> {
    fn addition(&self) -> &dyn FieldAddition<F> {
        &self.addition
    }

    fn multiplication(&self) -> &dyn FieldMultiplication<F> {
        &self.multiplication
    }

    fn random(&self) -> Scalar<F> {
        Scalar::value(self.random.sample())
    }

    fn values_equal(&self, a: &F, b: &F) -> bool {
        (*a - *b).abs() < self.tolerance
    }

    fn as_ordered(&self) -> Option<&dyn OrderedField<F>> {
        Some(self)
    }

    fn as_metric(&self) -> Option<&dyn MetricSpaceField<F>> {
        Some(self)
    }
}

impl<F: Float + SampleUniform + Debug> OrderedField<F> for DecimalField<F> {
    fn ordered_random(&self) -> &dyn OrderedRandom<F> {
        &self.random
    }
}

impl<F: Float + SampleUniform + Debug> MetricSpaceField<F> for DecimalField<F> {
    fn product(&self) -> InnerProduct<'_, F> {
        InnerProduct::new(self)
    }

    fn sqrt(&self, x: F) -> F {
        x.sqrt()
    }

    /// Clamped to `[-1, 1]` first, as rounding may push a cosine slightly
    /// out of it
    fn arccos(&self, x: F) -> F {
        x.max(-F::one()).min(F::one()).acos()
    }

    fn cos(&self, radians: &F) -> F {
        radians.cos()
    }

    fn sin(&self, radians: &F) -> F {
        radians.sin()
    }

    fn is_negative(&self, x: &F) -> bool {
        *x < F::zero()
    }
}
