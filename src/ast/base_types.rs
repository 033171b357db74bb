use super::Scalar;
use crate::{metric::Degrees, vect::Vect};
use std::{cell::OnceCell, fmt::Debug};

/// The nodes of a scalar expression. `T` is the raw type the expression
/// evaluates to once a [`Field`][crate::Field] is given.
///
/// Each variant knows how to evaluate itself (see `Scalar::eval`), so adding a
/// variant here forces the evaluator to handle it.
#[derive(Debug, Clone)]
pub enum ScalarNode<T> {
    /// A literal, already known value
    Value(T),
    /// Sum of any number of operands. The empty sum is the additive identity
    Add(Bag<Scalar<T>>),
    /// Product of any number of operands. The empty product is the
    /// multiplicative identity
    Multiplication(Bag<Scalar<T>>),
    /// `first - second`
    Diff(Scalar<T>, Scalar<T>),
    /// `dividend / divisor`
    Division(Scalar<T>, Scalar<T>),
    /// Multiplicative inverse
    MultInverse(Scalar<T>),
    /// The neutral element of the field addition (zero)
    AddIdentity,
    /// The neutral element of the field multiplication (one)
    MultIdentity,
    /// A fresh random value each time it is evaluated
    Random,
    /// A random value greater than the bound. Generated once, on first
    /// evaluation, then cached in the node
    Greater(Scalar<T>, OnceCell<Scalar<T>>),
    /// A random value lower than the bound. Generated once, on first
    /// evaluation, then cached in the node
    Lower(Scalar<T>, OnceCell<Scalar<T>>),
    /// `if predicate { on_true } else { on_false }`. Only the selected branch
    /// is evaluated
    Ternary(Predicate<T>, Scalar<T>, Scalar<T>),
    /// Euclidean norm of a vector. Needs an inner product space
    Norm(Vect<T>),
    /// Signed angle between two planar vectors. Needs an inner product space
    Angle(Vect<T>, Vect<T>),
    /// One coordinate of a planar vector once rotated. Needs an inner product
    /// space
    RotatedCoord {
        vect: Vect<T>,
        angle: Degrees<T>,
        index: usize,
    },
}

/// Boolean conditions over scalars, used by [`ScalarNode::Ternary`]
#[derive(Debug, Clone)]
pub enum Predicate<T> {
    True,
    False,
    /// Equality as decided by the field (which may be tolerant)
    Equals(Scalar<T>, Scalar<T>),
    /// Short-circuits on the first false operand
    And(Vec<Predicate<T>>),
    /// Short-circuits on the first true operand
    Or(Vec<Predicate<T>>),
    Not(Box<Predicate<T>>),
}

/// An unordered collection of operands, where duplicates count. Two bags are
/// equal if they contain the same elements the same number of times,
/// whatever the order they were given in
#[derive(Debug, Clone)]
pub struct Bag<S>(Vec<S>);

impl<S> Bag<S> {
    /// Number of elements, duplicates included
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.0.iter()
    }
}

impl<S> FromIterator<S> for Bag<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Bag(iter.into_iter().collect())
    }
}

impl<S> From<Vec<S>> for Bag<S> {
    fn from(v: Vec<S>) -> Self {
        Bag(v)
    }
}

impl<'a, S> IntoIterator for &'a Bag<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<S: PartialEq> PartialEq for Bag<S> {
    fn eq(&self, other: &Self) -> bool {
        if self.0.len() != other.0.len() {
            return false;
        }
        // Each element of `other` can be matched at most once
        let mut matched = vec![false; other.0.len()];
        self.0.iter().all(|x| {
            let found = other
                .0
                .iter()
                .enumerate()
                .position(|(i, y)| !matched[i] && x == y);
            match found {
                Some(i) => {
                    matched[i] = true;
                    true
                }
                None => false,
            }
        })
    }
}

/// Structural equality. Nodes producing random values ([`ScalarNode::Random`],
/// [`ScalarNode::Greater`], [`ScalarNode::Lower`]) are never structurally
/// equal to another node: two such scalars are equal only when they are clones
/// of the same expression
impl<T: PartialEq> PartialEq for ScalarNode<T> {
    fn eq(&self, other: &Self) -> bool {
        use ScalarNode as N;
        match (self, other) {
            (N::Value(a), N::Value(b)) => a == b,
            (N::Add(a), N::Add(b)) | (N::Multiplication(a), N::Multiplication(b)) => a == b,
            (N::Diff(a1, a2), N::Diff(b1, b2)) | (N::Division(a1, a2), N::Division(b1, b2)) => {
                a1 == b1 && a2 == b2
            }
            (N::MultInverse(a), N::MultInverse(b)) => a == b,
            (N::Norm(u), N::Norm(v)) => u == v,
            (N::AddIdentity, N::AddIdentity) | (N::MultIdentity, N::MultIdentity) => true,
            (N::Ternary(p, a1, a2), N::Ternary(q, b1, b2)) => p == q && a1 == b1 && a2 == b2,
            (N::Angle(u1, v1), N::Angle(u2, v2)) => u1 == u2 && v1 == v2,
            (
                N::RotatedCoord {
                    vect: v1,
                    angle: a1,
                    index: i1,
                },
                N::RotatedCoord {
                    vect: v2,
                    angle: a2,
                    index: i2,
                },
            ) => i1 == i2 && v1 == v2 && a1 == a2,
            _ => false,
        }
    }
}

impl<T: PartialEq> PartialEq for Predicate<T> {
    fn eq(&self, other: &Self) -> bool {
        use Predicate as P;
        match (self, other) {
            (P::True, P::True) | (P::False, P::False) => true,
            (P::Equals(a1, a2), P::Equals(b1, b2)) => a1 == b1 && a2 == b2,
            (P::And(a), P::And(b)) | (P::Or(a), P::Or(b)) => a == b,
            (P::Not(a), P::Not(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_macros::*;

    simple_eqs! {
        bag_ignores_order: Bag::from(vec![1, 2, 3]) => Bag::from(vec![3, 1, 2]),
        bag_counts_duplicates: Bag::from(vec![1, 1, 2]) == Bag::from(vec![1, 2, 2]) => false,
        bag_length_matters: Bag::from(vec![1, 1]) == Bag::from(vec![1]) => false,
        empty_bags: Bag::<i32>::from(vec![]) => Bag::from(vec![])
    }
}
