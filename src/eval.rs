//! How to evaluate an expression into an actual value
//!
//! Every node owns its evaluation rule, and the field is only asked for the
//! primitive operations (add, multiply, inverses, random draws, equality).
//! Evaluation is depth-first, and either fully succeeds or fails without
//! producing any partial result.

use crate::{
    ast::{Predicate, Scalar, ScalarNode as N},
    error::{Error, Result},
    field::{metric, ordered, Field},
};
use tracing::trace;

impl<T: Clone> Scalar<T> {
    /// Evaluates a [`Scalar`] against some [`Field`]. The nodes that need more
    /// than a plain field (bounded random values, norms, angles, rotations)
    /// fail with [`Error::UnsupportedFieldCapability`] if the field doesn't
    /// provide it
    pub fn eval<F: Field<T> + ?Sized>(&self, field: &F) -> Result<T> {
        match self.node() {
            N::Value(v) => Ok(v.clone()),
            N::AddIdentity => Ok(field.addition().neutral()),
            N::MultIdentity => Ok(field.multiplication().neutral()),
            N::Add(operands) => {
                let add = field.addition();
                operands
                    .iter()
                    .try_fold(add.neutral(), |acc, s| Ok(add.add(acc, s.eval(field)?)))
            }
            N::Multiplication(operands) => {
                let mul = field.multiplication();
                operands
                    .iter()
                    .try_fold(mul.neutral(), |acc, s| Ok(mul.multiply(acc, s.eval(field)?)))
            }
            N::Diff(first, second) => {
                let add = field.addition();
                let first = first.eval(field)?;
                let second = second.eval(field)?;
                Ok(add.add(first, add.inverse(second)))
            }
            N::Division(dividend, divisor) => {
                // Evaluated once: a random divisor is checked and used with
                // the same value
                let divisor = divisor.eval(field)?;
                if is_zero(field, &divisor) {
                    return Err(Error::DivisionByZero);
                }
                let mul = field.multiplication();
                Ok(mul.multiply(dividend.eval(field)?, mul.inverse(divisor)))
            }
            N::MultInverse(operand) => {
                let operand = operand.eval(field)?;
                if is_zero(field, &operand) {
                    return Err(Error::UninvertibleElement);
                }
                Ok(field.multiplication().inverse(operand))
            }
            N::Random => field.random().eval(field),
            N::Greater(bound, cache) => {
                if let Some(generated) = cache.get() {
                    return generated.eval(field);
                }
                let generated = ordered(field)?.greater(bound)?;
                trace!("memoizing value generated above a lower bound");
                cache.get_or_init(|| generated).eval(field)
            }
            N::Lower(bound, cache) => {
                if let Some(generated) = cache.get() {
                    return generated.eval(field);
                }
                let generated = ordered(field)?.lower(bound)?;
                trace!("memoizing value generated below an upper bound");
                cache.get_or_init(|| generated).eval(field)
            }
            N::Ternary(predicate, on_true, on_false) => {
                if predicate.resolve(field)? {
                    on_true.eval(field)
                } else {
                    on_false.eval(field)
                }
            }
            N::Norm(v) => metric(field)?.product().norm(v),
            N::Angle(u, v) => metric(field)?.product().angle(u, v),
            N::RotatedCoord { vect, angle, index } => {
                let rotated = metric(field)?.product().rot(vect, angle)?;
                rotated.coord(*index)?.eval(field)
            }
        }
    }
}

impl<T: Clone> Predicate<T> {
    /// Decide the predicate. `And` and `Or` stop at the first operand that
    /// settles the result, so the remaining ones are never evaluated
    pub fn resolve<F: Field<T> + ?Sized>(&self, field: &F) -> Result<bool> {
        match self {
            Predicate::True => Ok(true),
            Predicate::False => Ok(false),
            Predicate::Equals(a, b) => field.equals(a, b),
            Predicate::And(operands) => {
                for p in operands {
                    if !p.resolve(field)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Predicate::Or(operands) => {
                for p in operands {
                    if p.resolve(field)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Predicate::Not(p) => Ok(!p.resolve(field)?),
        }
    }
}

fn is_zero<T: Clone, F: Field<T> + ?Sized>(field: &F, x: &T) -> bool {
    field.values_equal(x, &field.addition().neutral())
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{val, Predicate, Scalar},
        error::{Capability, Error},
        fields::{DecimalField, Fraction, RationalField},
        Field, FieldConfig,
    };
    use approx::assert_abs_diff_eq;
    use rstest::*;

    type S = Scalar<f64>;

    #[fixture]
    fn decimal() -> DecimalField {
        // Shows the memoization traces with `cargo test -- --nocapture`
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
        DecimalField::from_config(&FieldConfig::default().with_seed(42)).unwrap()
    }

    #[fixture]
    fn rational() -> RationalField {
        RationalField::from_config(&FieldConfig::default().with_seed(42)).unwrap()
    }

    #[rstest]
    fn literals_and_identities(decimal: DecimalField) {
        assert_eq!(decimal.actual(&val(2.5)).unwrap(), 2.5);
        assert_eq!(decimal.actual(&S::zero()).unwrap(), 0.0);
        assert_eq!(decimal.actual(&S::one()).unwrap(), 1.0);
        assert_eq!(decimal.actual(&S::sum(Vec::<S>::new())).unwrap(), 0.0);
        assert_eq!(decimal.actual(&S::product(Vec::<S>::new())).unwrap(), 1.0);
    }

    #[rstest]
    fn add_matches_field_addition(decimal: DecimalField) {
        for _ in 0..20 {
            let a = decimal.random();
            let b = decimal.random();
            let (x, y) = (decimal.actual(&a).unwrap(), decimal.actual(&b).unwrap());
            let expected = decimal.addition().add(x, y);
            assert_eq!(decimal.actual(&(a + b)).unwrap(), expected);
        }
    }

    #[rstest]
    fn add_is_associative(decimal: DecimalField) {
        for _ in 0..20 {
            let (a, b, c) = (decimal.random(), decimal.random(), decimal.random());
            let left = (a.clone() + b.clone()) + c.clone();
            let right = a + (b + c);
            assert!(decimal.equals(&left, &right).unwrap());
        }
    }

    #[rstest]
    fn arithmetic(decimal: DecimalField) {
        let e = (val(6.0) - 2.0) * 3.0 / 4.0;
        assert_abs_diff_eq!(decimal.actual(&e).unwrap(), 3.0);
        assert_abs_diff_eq!(decimal.actual(&-val(2.0)).unwrap(), -2.0);
        assert_abs_diff_eq!(decimal.actual(&val(4.0).inverse()).unwrap(), 0.25);
    }

    #[rstest]
    fn division_by_zero(decimal: DecimalField) {
        let e = S::division(1.0, val(2.0) - 2.0);
        assert_eq!(decimal.actual(&e), Err(Error::DivisionByZero));
        // within the field tolerance, still zero
        let e = S::division(1.0, 1e-4);
        assert_eq!(decimal.actual(&e), Err(Error::DivisionByZero));
        assert_eq!(
            decimal.actual(&S::zero().inverse()),
            Err(Error::UninvertibleElement)
        );
    }

    #[rstest]
    fn division_is_product_with_inverse(decimal: DecimalField) {
        for _ in 0..20 {
            let a = decimal.random();
            let b = decimal.other(&S::zero()).unwrap();
            let quotient = decimal.actual(&S::division(a.clone(), b.clone())).unwrap();
            let product = decimal.actual(&(a * b.inverse())).unwrap();
            assert_abs_diff_eq!(quotient, product, epsilon = 1e-9);
        }
    }

    #[rstest]
    fn random_is_not_memoized(decimal: DecimalField) {
        let r = S::random();
        let values: Vec<f64> = (0..10).map(|_| decimal.actual(&r).unwrap()).collect();
        assert!(values.iter().any(|v| *v != values[0]));
        assert!(values.iter().all(|v| (-10.0..=10.0).contains(v)));
    }

    #[rstest]
    fn greater_and_lower_are_memoized(decimal: DecimalField) {
        let g = S::greater(5.0);
        let first = decimal.actual(&g).unwrap();
        assert!(first >= 5.0);
        assert!(g.memoized().is_some());
        for _ in 0..10 {
            assert_eq!(decimal.actual(&g).unwrap(), first);
        }
        let l = S::lower(-5.0);
        let first = decimal.actual(&l).unwrap();
        assert!(first <= -5.0);
        assert_eq!(decimal.actual(&l.clone()).unwrap(), first);
    }

    #[rstest]
    fn memoized_value_survives_a_field_change(decimal: DecimalField) {
        let g = S::greater(0.0);
        let first = decimal.actual(&g).unwrap();
        let other: DecimalField = DecimalField::from_config(&FieldConfig::default().with_seed(7)).unwrap();
        assert_eq!(other.actual(&g).unwrap(), first);
    }

    #[rstest]
    fn ternary_only_evaluates_selected_branch(decimal: DecimalField) {
        let a = S::greater(0.0);
        let b = S::lower(0.0);
        let t = S::ternary(Predicate::True, a.clone(), b.clone());
        assert!(decimal.actual(&t).unwrap() >= 0.0);
        assert!(a.memoized().is_some());
        assert!(b.memoized().is_none());

        let a = S::greater(0.0);
        let b = S::lower(0.0);
        let t = S::ternary(Predicate::False, a.clone(), b.clone());
        assert!(decimal.actual(&t).unwrap() <= 0.0);
        assert!(a.memoized().is_none());
        assert!(b.memoized().is_some());
    }

    #[rstest]
    fn ternary_does_not_evaluate_failing_branch(decimal: DecimalField) {
        let t = S::ternary(val(1.0).equals(&val(1.0005)), 3.0, S::zero().inverse());
        assert_eq!(decimal.actual(&t).unwrap(), 3.0);
    }

    #[rstest]
    fn predicates_short_circuit(decimal: DecimalField) {
        let untouched = S::greater(0.0);
        let probe = untouched.equals(&val(0.0));
        assert!(!Predicate::and([Predicate::False, probe.clone()]).resolve(&decimal).unwrap());
        assert!(Predicate::or([Predicate::True, probe.clone()]).resolve(&decimal).unwrap());
        assert!(untouched.memoized().is_none());
        assert!((!Predicate::<f64>::False).resolve(&decimal).unwrap());
        assert!(!(Predicate::<f64>::True & Predicate::False).resolve(&decimal).unwrap());
    }

    #[rstest]
    fn rational_field_is_ordered_but_not_metric(rational: RationalField) {
        let one = Fraction::from_integer(1.into());
        let g = Scalar::greater(one.clone());
        assert!(rational.actual(&g).unwrap() >= one);
        assert_eq!(
            rational.actual(&Scalar::norm(crate::Vect::new([one]))),
            Err(Error::UnsupportedFieldCapability(Capability::Metric))
        );
    }

    #[test]
    fn plain_field_cannot_generate_bounded_values() {
        let plain = tests_support::PlainField;
        let g = S::greater(1.0);
        assert_eq!(
            plain.actual(&g),
            Err(Error::UnsupportedFieldCapability(Capability::Ordered))
        );
        assert!(g.memoized().is_none());
        assert_eq!(plain.actual(&(val(1.0) + 2.0)).unwrap(), 3.0);
    }

    #[rstest]
    fn other_differs_from_excluded(decimal: DecimalField) {
        let excluded = val(0.5);
        for _ in 0..20 {
            let o = decimal.other(&excluded).unwrap();
            assert!(!decimal.equals(&o, &excluded).unwrap());
        }
    }

    /// A field with no capability beyond plain arithmetic
    mod tests_support {
        use crate::{ast::val, Field, FieldAddition, FieldMultiplication, Scalar};

        pub struct PlainField;
        struct Plus;
        struct Times;

        impl FieldAddition<f64> for Plus {
            fn add(&self, a: f64, b: f64) -> f64 {
                a + b
            }
            fn neutral(&self) -> f64 {
                0.0
            }
            fn inverse(&self, a: f64) -> f64 {
                -a
            }
        }

        impl FieldMultiplication<f64> for Times {
            fn multiply(&self, a: f64, b: f64) -> f64 {
                a * b
            }
            fn neutral(&self) -> f64 {
                1.0
            }
            fn inverse(&self, a: f64) -> f64 {
                1.0 / a
            }
        }

        impl Field<f64> for PlainField {
            fn addition(&self) -> &dyn FieldAddition<f64> {
                &Plus
            }
            fn multiplication(&self) -> &dyn FieldMultiplication<f64> {
                &Times
            }
            fn random(&self) -> Scalar<f64> {
                val(4.0)
            }
            fn values_equal(&self, a: &f64, b: &f64) -> bool {
                a == b
            }
        }
    }
}
