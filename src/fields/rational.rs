use crate::{
    ast::Scalar,
    config::FieldConfig,
    error::{Error, Result},
    field::*,
};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::cell::RefCell;
use tracing::debug;

/// An exact, arbitrary-precision fraction
pub type Fraction = BigRational;

#[derive(Debug, Default)]
pub struct RationalAddition;

impl FieldAddition<Fraction> for RationalAddition {
    fn add(&self, a: Fraction, b: Fraction) -> Fraction {
        a + b
    }
    fn neutral(&self) -> Fraction {
        Fraction::zero()
    }
    fn inverse(&self, a: Fraction) -> Fraction {
        -a
    }
}

#[derive(Debug, Default)]
pub struct RationalMultiplication;

impl FieldMultiplication<Fraction> for RationalMultiplication {
    fn multiply(&self, a: Fraction, b: Fraction) -> Fraction {
        a * b
    }
    fn neutral(&self) -> Fraction {
        Fraction::one()
    }
    /// Zero has no inverse, and is returned unchanged
    fn inverse(&self, a: Fraction) -> Fraction {
        if a.is_zero() {
            a
        } else {
            a.recip()
        }
    }
}

/// Draws fractions `lower + (upper - lower)·t/d`, with `d` uniform in
/// `1..=max_denom` and `t` uniform in `0..=d`
#[derive(Debug)]
pub struct RationalRandom {
    rng: RefCell<StdRng>,
    lower: Fraction,
    upper: Fraction,
    max_denom: i64,
}

impl RationalRandom {
    pub const DEFAULT_MAX_DENOM: i64 = 64;

    pub fn new(rng: StdRng, lower: Fraction, upper: Fraction) -> Result<Self> {
        if lower > upper {
            return Err(Error::invalid_range(&lower, &upper));
        }
        Ok(Self {
            rng: RefCell::new(rng),
            lower,
            upper,
            max_denom: Self::DEFAULT_MAX_DENOM,
        })
    }

    pub fn with_max_denom(mut self, max_denom: i64) -> Self {
        self.max_denom = max_denom.max(1);
        self
    }

    fn draw(&self, lower: &Fraction, upper: &Fraction) -> Fraction {
        let mut rng = self.rng.borrow_mut();
        let den = rng.gen_range(1..=self.max_denom);
        let t = rng.gen_range(0..=den);
        let step = Fraction::new(BigInt::from(t), BigInt::from(den));
        lower + (upper - lower) * step
    }
}

impl OrderedRandom<Fraction> for RationalRandom {
    fn between(&self, lower: &Fraction, upper: &Fraction) -> Result<Fraction> {
        if lower > upper {
            return Err(Error::invalid_range(lower, upper));
        }
        Ok(self.draw(lower, upper))
    }

    fn greater(&self, lower: &Fraction) -> Result<Fraction> {
        self.between(lower, &self.upper)
    }

    fn lower(&self, upper: &Fraction) -> Result<Fraction> {
        self.between(&self.lower, upper)
    }
}

/// The rational numbers, with exact equality. Ordered, but has no inner
/// product since square roots of fractions are generally not fractions
#[derive(Debug)]
pub struct RationalField {
    addition: RationalAddition,
    multiplication: RationalMultiplication,
    random: RationalRandom,
}

impl RationalField {
    /// The bounds of the config are widened to the nearest integers. The
    /// tolerance is ignored
    pub fn from_config(config: &FieldConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let lower = exact_bound(config.lower_bound.floor())?;
        let upper = exact_bound(config.upper_bound.ceil())?;
        debug!(%lower, %upper, seeded = config.seed.is_some(), "rational field ready");
        Ok(Self {
            addition: RationalAddition,
            multiplication: RationalMultiplication,
            random: RationalRandom::new(rng, lower, upper)?,
        })
    }

    pub fn with_max_denom(mut self, max_denom: i64) -> Self {
        self.random = self.random.with_max_denom(max_denom);
        self
    }
}

fn exact_bound(x: f64) -> Result<Fraction> {
    Fraction::from_float(x)
        .ok_or_else(|| Error::InvalidConfig(format!("bound {x} has no exact rational value")))
}

impl Field<Fraction> for RationalField {
    fn addition(&self) -> &dyn FieldAddition<Fraction> {
        &self.addition
    }

    fn multiplication(&self) -> &dyn FieldMultiplication<Fraction> {
        &self.multiplication
    }

    fn random(&self) -> Scalar<Fraction> {
        let r = &self.random;
        Scalar::value(r.draw(&r.lower, &r.upper))
    }

    fn values_equal(&self, a: &Fraction, b: &Fraction) -> bool {
        a == b
    }

    fn as_ordered(&self) -> Option<&dyn OrderedField<Fraction>> {
        Some(self)
    }
}

impl OrderedField<Fraction> for RationalField {
    fn ordered_random(&self) -> &dyn OrderedRandom<Fraction> {
        &self.random
    }
}
