use super::ordered_ops;
use itertools::iproduct;
use num_traits::{One, Signed, Zero};
use std::fmt::Write;

pub trait Coefficient:
    core::fmt::Debug
    + PartialEq
    + Clone
    + std::ops::AddAssign
    + std::ops::SubAssign
    + num_traits::Zero
    + num_traits::One
{
}

impl Coefficient for i32 {}
impl Coefficient for i64 {}
impl Coefficient for i128 {}

/// A coefficient attached to a single power of the variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term<C> {
    coefficient: C,
    exponent: u32,
}

impl<C: Coefficient> Term<C> {
    fn new(coefficient: C, exponent: u32) -> Self {
        Term {
            coefficient,
            exponent,
        }
    }

    fn new_constant(value: C) -> Self {
        Term {
            coefficient: value,
            exponent: 0,
        }
    }

    pub fn coefficient(&self) -> &C {
        &self.coefficient
    }

    pub fn exponent(&self) -> u32 {
        self.exponent
    }

    /// Writes the term without its sign: the absolute coefficient, the
    /// variable when the exponent is nonzero, the power when it is not 1.
    /// An absolute coefficient of 1 is omitted before the variable, but a
    /// constant term of 1 is still written out.
    fn fmt_unsigned(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    where
        C: Signed + std::fmt::Display,
    {
        let abs = self.coefficient.abs();
        if self.exponent == 0 {
            return std::fmt::Display::fmt(&abs, f);
        }

        if !abs.is_one() {
            std::fmt::Display::fmt(&abs, f)?;
        }
        f.write_char('x')?;
        if self.exponent != 1 {
            write!(f, "^{}", self.exponent)?;
        }

        Ok(())
    }
}

/// Univariate polynomial with integer coefficients.
///
/// Kept in canonical form at all times: terms are sorted in decreasing
/// order of exponent, exponents are unique, and no term has a zero
/// coefficient (the zero polynomial has no terms at all).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polynomial<C> {
    // Terms are sorted in decreasing order of exponent:
    terms: Vec<Term<C>>,
}

impl<C: Coefficient> Polynomial<C> {
    pub fn new() -> Self {
        Polynomial { terms: Vec::new() }
    }

    /// The polynomial consisting of the bare variable, `x`.
    pub fn variable() -> Self {
        Self::new_monomial_term(C::one(), 1)
    }

    pub fn new_monomial_term(coefficient: C, exponent: u32) -> Self {
        Self {
            terms: if coefficient.is_zero() {
                Vec::new()
            } else {
                vec![Term::new(coefficient, exponent)]
            },
        }
    }

    pub fn new_constant(value: C) -> Self {
        Self {
            terms: if value.is_zero() {
                // No terms means zero implicitly
                Vec::new()
            } else {
                vec![Term::new_constant(value)]
            },
        }
    }

    pub fn terms(&self) -> &[Term<C>] {
        &self.terms[..]
    }

    /// Highest exponent with a nonzero coefficient. `None` for the zero
    /// polynomial, whose degree is undefined.
    pub fn degree(&self) -> Option<u32> {
        self.terms.first().map(|t| t.exponent)
    }

    /// Adds `coefficient` to the term at `exponent`, creating or removing
    /// the term as needed to stay in canonical form.
    ///
    /// A zero coefficient or a negative exponent makes the call a no-op,
    /// by policy rather than an error.
    pub fn insert_term(&mut self, coefficient: C, exponent: i64) {
        if coefficient.is_zero() {
            return;
        }
        let exponent = match u32::try_from(exponent) {
            Ok(e) => e,
            Err(_) => return,
        };

        // Terms are sorted by decreasing exponent, hence the flipped cmp.
        match self
            .terms
            .binary_search_by(|t| exponent.cmp(&t.exponent))
        {
            Ok(idx) => {
                let term = &mut self.terms[idx];
                term.coefficient += coefficient;
                if term.coefficient.is_zero() {
                    self.terms.remove(idx);
                }
            }
            Err(idx) => {
                self.terms.insert(idx, Term::new(coefficient, exponent));
            }
        }
    }

    fn sum_terms(
        a: impl Iterator<Item = Term<C>>,
        b: impl Iterator<Item = Term<C>>,
    ) -> Vec<Term<C>> {
        ordered_ops::sum(
            a,
            b,
            |x, y| y.exponent.cmp(&x.exponent),
            |mut x, y| {
                x.coefficient += y.coefficient;
                if x.coefficient.is_zero() {
                    None
                } else {
                    Some(x)
                }
            },
        )
    }
}

impl<C> Polynomial<C>
where
    C: Coefficient + From<u32>,
{
    /// Symbolic derivative with respect to the variable: each term c·x^e
    /// with e > 0 becomes (c·e)·x^(e-1), constants are dropped.
    pub fn derivative(&self) -> Self {
        let terms = self
            .terms
            .iter()
            .filter(|t| t.exponent > 0)
            .map(|t| Term::new(t.coefficient.clone() * C::from(t.exponent), t.exponent - 1))
            .collect();

        Self { terms }
    }
}

impl<C: Coefficient> num_traits::Zero for Polynomial<C> {
    fn zero() -> Self {
        Polynomial { terms: Vec::new() }
    }

    fn is_zero(&self) -> bool {
        // For safety, test the non-normalized case:
        for e in self.terms.iter() {
            if !e.coefficient.is_zero() {
                return false;
            }
        }

        true
    }
}

impl<C: Coefficient> std::ops::Add for Polynomial<C> {
    type Output = Polynomial<C>;

    fn add(self, rhs: Polynomial<C>) -> Self::Output {
        Self {
            terms: Self::sum_terms(self.terms.into_iter(), rhs.terms.into_iter()),
        }
    }
}

impl<C: Coefficient> std::ops::Add for &Polynomial<C> {
    type Output = Polynomial<C>;

    fn add(self, rhs: &Polynomial<C>) -> Self::Output {
        self.clone() + rhs.clone()
    }
}

impl<C: Coefficient> std::ops::Add<C> for Polynomial<C> {
    type Output = Polynomial<C>;

    fn add(mut self, rhs: C) -> Self::Output {
        match self.terms.last_mut() {
            Some(last) if last.exponent == 0 => {
                last.coefficient += rhs;
                if last.coefficient.is_zero() {
                    self.terms.pop();
                }
            }
            _ => {
                if !rhs.is_zero() {
                    self.terms.push(Term::new_constant(rhs));
                }
            }
        }

        self
    }
}

impl<C: Coefficient> std::ops::Neg for Polynomial<C> {
    type Output = Self;

    fn neg(mut self) -> Self {
        for term in self.terms.iter_mut() {
            let tmp = std::mem::replace(&mut term.coefficient, C::zero());
            term.coefficient -= tmp;
        }
        self
    }
}

impl<C: Coefficient> std::ops::Sub for Polynomial<C> {
    type Output = Polynomial<C>;

    fn sub(self, rhs: Polynomial<C>) -> Self::Output {
        self + (-rhs)
    }
}

impl<C: Coefficient> std::ops::Sub<C> for Polynomial<C> {
    type Output = Polynomial<C>;

    fn sub(self, rhs: C) -> Self::Output {
        let mut neg = C::zero();
        neg -= rhs;
        self + neg
    }
}

impl<C: Coefficient> std::ops::Mul for &Polynomial<C> {
    type Output = Polynomial<C>;

    fn mul(self, rhs: &Polynomial<C>) -> Self::Output {
        let mut new_terms = std::collections::BTreeMap::new();

        // Clone the smaller operand's terms fewer times.
        let (outer, inner) = if self.terms.len() > rhs.terms.len() {
            (&rhs.terms, &self.terms)
        } else {
            (&self.terms, &rhs.terms)
        };

        for (a, b) in iproduct!(outer, inner) {
            let exponent = a.exponent + b.exponent;
            let coefficient = a.coefficient.clone() * b.coefficient.clone();

            let entry = new_terms.entry(exponent);
            match entry {
                std::collections::btree_map::Entry::Vacant(e) => {
                    if !coefficient.is_zero() {
                        e.insert(coefficient);
                    }
                }
                std::collections::btree_map::Entry::Occupied(mut e) => {
                    *e.get_mut() += coefficient;
                    if e.get().is_zero() {
                        e.remove();
                    }
                }
            }
        }

        let terms: Vec<_> = new_terms
            .into_iter()
            .rev()
            .map(|(exponent, coefficient)| Term {
                coefficient,
                exponent,
            })
            .collect();
        Self::Output { terms }
    }
}

impl<C: Coefficient> std::ops::Mul for Polynomial<C> {
    type Output = Polynomial<C>;

    fn mul(self, rhs: Polynomial<C>) -> Self::Output {
        &self * &rhs
    }
}

impl<C: Coefficient> std::ops::Mul<C> for &Polynomial<C> {
    type Output = Polynomial<C>;

    fn mul(self, rhs: C) -> Self::Output {
        self * &Polynomial::new_constant(rhs)
    }
}

impl<C: Coefficient> num_traits::pow::Pow<u32> for Polynomial<C> {
    type Output = Polynomial<C>;

    fn pow(mut self, mut rhs: u32) -> Self {
        let mut ret = Polynomial::new_constant(C::one());

        if rhs != 0 {
            loop {
                if rhs % 2 == 1 {
                    ret = ret * self.clone();
                }
                rhs /= 2;

                if rhs == 0 {
                    break;
                }
                self = self.clone() * self;
            }
        }

        ret
    }
}

impl<C> std::fmt::Display for Polynomial<C>
where
    C: Coefficient + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut iter = self.terms.iter();
        let first = match iter.next() {
            None => {
                return f.write_char('0');
            }
            Some(t) => t,
        };

        // Only the leading term carries its own minus sign; every other
        // term's sign becomes the separator.
        if first.coefficient.is_negative() {
            f.write_char('-')?;
        }
        first.fmt_unsigned(f)?;

        for t in iter {
            f.write_str(if t.coefficient.is_negative() {
                " - "
            } else {
                " + "
            })?;
            t.fmt_unsigned(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use num_traits::{Pow, Zero};

    use super::*;

    pub type IntPoly = Polynomial<i64>;

    fn sample_poly() -> IntPoly {
        // 3x^4 + 2x^2 - x + 5
        let mut p = IntPoly::new();
        p.insert_term(3, 4);
        p.insert_term(2, 2);
        p.insert_term(-1, 1);
        p.insert_term(5, 0);
        p
    }

    fn assert_canonical(p: &IntPoly) {
        for t in p.terms() {
            assert_ne!(*t.coefficient(), 0);
        }
        for w in p.terms().windows(2) {
            assert!(w[0].exponent() > w[1].exponent());
        }
    }

    #[test]
    fn insertion_keeps_canonical_form() {
        let mut p = IntPoly::new();
        p.insert_term(4, 0);
        p.insert_term(-7, 5);
        p.insert_term(1, 3);
        p.insert_term(2, 5);
        p.insert_term(5, 2);
        p.insert_term(-5, 2);

        assert_canonical(&p);
        assert_eq!(
            p.terms()
                .iter()
                .map(|t| t.exponent())
                .collect::<Vec<_>>(),
            [5, 3, 0]
        );
    }

    #[test]
    fn invalid_insertions_are_ignored() {
        let mut p = sample_poly();
        let before = p.clone();

        p.insert_term(8, -1);
        p.insert_term(8, -1000);
        p.insert_term(0, 7);

        assert_eq!(p, before);
    }

    #[test]
    fn insertion_accumulates() {
        let mut a = IntPoly::new();
        a.insert_term(3, 2);
        a.insert_term(4, 2);

        let mut b = IntPoly::new();
        b.insert_term(7, 2);

        assert_eq!(a, b);

        // Accumulating to zero removes the term entirely:
        a.insert_term(-7, 2);
        assert!(a.terms().is_empty());
        assert_eq!(a.to_string(), "0");
    }

    #[test]
    fn display_canonical_rendering() {
        assert_eq!(sample_poly().to_string(), "3x^4 + 2x^2 - x + 5");

        // Unit coefficients are omitted before the variable, but a
        // constant 1 still shows:
        let mut p = IntPoly::new();
        p.insert_term(1, 2);
        p.insert_term(-1, 1);
        p.insert_term(1, 0);
        assert_eq!(p.to_string(), "x^2 - x + 1");

        // Leading negative term:
        let mut p = IntPoly::new();
        p.insert_term(-3, 2);
        p.insert_term(4, 0);
        assert_eq!(p.to_string(), "-3x^2 + 4");

        assert_eq!(IntPoly::new().to_string(), "0");
    }

    #[test]
    fn addition() {
        let p1 = sample_poly();

        let mut p2 = IntPoly::new();
        p2.insert_term(1, 4);
        p2.insert_term(1, 0);

        let sum = &p1 + &p2;
        assert_canonical(&sum);
        assert_eq!(sum.to_string(), "4x^4 + 2x^2 - x + 6");

        // Operands are intact and addition commutes:
        assert_eq!(p1.to_string(), "3x^4 + 2x^2 - x + 5");
        assert_eq!(&p2 + &p1, sum);
    }

    #[test]
    fn additive_identity() {
        let p = sample_poly();
        let zero = IntPoly::new();

        assert_eq!(&p + &zero, p);
        assert_eq!(&zero + &p, p);
    }

    #[test]
    fn addition_cancels_terms() {
        let mut a = IntPoly::new();
        a.insert_term(3, 2);
        a.insert_term(1, 1);

        let mut b = IntPoly::new();
        b.insert_term(-3, 2);

        let sum = &a + &b;
        assert_eq!(sum.to_string(), "x");
        assert_canonical(&sum);
    }

    #[test]
    fn multiplication() {
        let p1 = sample_poly();

        let mut p2 = IntPoly::new();
        p2.insert_term(1, 4);
        p2.insert_term(1, 0);

        let sum = &p1 + &p2;

        let mut p3 = IntPoly::new();
        p3.insert_term(2, 1);

        let prod = &sum * &p3;
        assert_canonical(&prod);
        assert_eq!(prod.to_string(), "8x^5 + 4x^3 - 2x^2 + 12x");

        // Operands are intact:
        assert_eq!(sum.to_string(), "4x^4 + 2x^2 - x + 6");
        assert_eq!(p3.to_string(), "2x");
    }

    #[test]
    fn multiply_by_zero() {
        let p = sample_poly();
        let zero = IntPoly::new();

        let a = &p * &zero;
        let b = &zero * &p;

        assert_eq!(a, b);
        assert_eq!(a, zero);
        assert!(a.is_zero());
        assert_eq!(a.to_string(), "0");
    }

    #[test]
    fn multiplication_cancels_cross_terms() {
        // (x + 1)(x - 1) = x^2 - 1, the cross terms cancel inside the
        // product accumulator:
        let x = IntPoly::variable();
        let a = x.clone() + 1;
        let b = x.clone() - 1;

        let p = a * b;
        assert_canonical(&p);
        assert_eq!(p.to_string(), "x^2 - 1");
    }

    #[test]
    fn derivative() {
        let deriv = sample_poly().derivative();
        assert_canonical(&deriv);
        assert_eq!(deriv.to_string(), "12x^3 + 4x - 1");
    }

    #[test]
    fn derivative_of_constant_is_zero() {
        let p = IntPoly::new_constant(42);
        assert!(p.derivative().is_zero());
        assert_eq!(p.derivative().to_string(), "0");

        assert!(IntPoly::new().derivative().is_zero());
    }

    #[test]
    fn subtraction_inverts_addition() {
        let a = sample_poly();

        let mut b = IntPoly::new();
        b.insert_term(-2, 3);
        b.insert_term(9, 1);
        b.insert_term(-5, 0);

        let c = a.clone() + b.clone();
        let restored = c - b;

        assert_eq!(restored, a);
    }

    #[test]
    fn scalar_operations_keep_invariant() {
        // Adding a constant to the zero polynomial:
        let p = IntPoly::new() + 7;
        assert_eq!(p.to_string(), "7");

        // Cancelling the constant term removes it:
        let p = sample_poly() - 5;
        assert_canonical(&p);
        assert_eq!(p.to_string(), "3x^4 + 2x^2 - x");

        // Adding zero changes nothing:
        let p = sample_poly() + 0;
        assert_eq!(p, sample_poly());

        let p = &sample_poly() * -1;
        assert_eq!(p, -sample_poly());
    }

    #[test]
    fn high_power() {
        let x = IntPoly::variable();

        let p = x.pow(47);
        assert_eq!(p.degree(), Some(47));
        assert_eq!(p.terms().len(), 1);
    }

    #[test]
    fn power_expansion() {
        let x = IntPoly::variable();

        let p = (x + 1).pow(3);
        assert_eq!(p.to_string(), "x^3 + 3x^2 + 3x + 1");

        let q = sample_poly().pow(0);
        assert_eq!(q.to_string(), "1");
    }

    #[test]
    fn degree_of_zero_is_none() {
        assert_eq!(IntPoly::new().degree(), None);
        assert_eq!(sample_poly().degree(), Some(4));
    }
}
