use num_traits::Zero;

use crate::field_element::FieldElement;

/// Univariate polynomial over ℤ_P, coefficients stored constant term first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Polynomial {
    coefficients: Vec<FieldElement>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<FieldElement>) -> Self {
        let mut poly = Self { coefficients };
        poly.normalize();
        poly
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Drop trailing zero coefficients so `degree` is exact.
    fn normalize(&mut self) {
        while self.coefficients.last().is_some_and(Zero::is_zero) {
            self.coefficients.pop();
        }
    }

    pub fn coefficients(&self) -> &[FieldElement] {
        &self.coefficients
    }

    /// Degree of the polynomial, `-1` for the zero polynomial.
    pub fn degree(&self) -> isize {
        self.coefficients.len() as isize - 1
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// f(0).
    pub fn constant_term(&self) -> FieldElement {
        self.coefficients.first().cloned().unwrap_or_default()
    }

    /// Horner evaluation at `x`.
    pub fn evaluate(&self, x: &FieldElement) -> FieldElement {
        self.coefficients
            .iter()
            .rev()
            .fold(FieldElement::zero(), |acc, coeff| &(&acc * x) + coeff)
    }

    /// Sample the polynomial at each of `xs`, returning `(x, f(x))` pairs.
    pub fn sample_points<I>(&self, xs: I) -> Vec<(u64, FieldElement)>
    where
        I: IntoIterator<Item = u64>,
    {
        xs.into_iter()
            .map(|x| (x, self.evaluate(&FieldElement::from(x))))
            .collect()
    }
}

impl From<Vec<FieldElement>> for Polynomial {
    fn from(coefficients: Vec<FieldElement>) -> Self {
        Self::new(coefficients)
    }
}
