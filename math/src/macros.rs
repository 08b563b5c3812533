//! Shared macros for constructing core math primitives.

/// Simplifies constructing [`FieldElement`](crate::field_element::FieldElement)s.
///
/// See [`FieldElement::from`](crate::field_element::FieldElement::from) for
/// supported types. Negative integers wrap around the modulus.
///
/// ```
/// use math::prelude::*;
///
/// let a = fe!(42);
/// let b = fe!(-12);
/// assert_eq!(a + b, fe!(30));
/// ```
#[macro_export]
macro_rules! fe {
    ($value:expr) => {
        $crate::field_element::FieldElement::from($value)
    };
}

/// Create a [`Vec`] of [`FieldElement`](crate::field_element::FieldElement)s.
///
/// ```
/// use math::prelude::*;
///
/// let repeated = fe_vec![7; 3];
/// assert_eq!(repeated, vec![FieldElement::from(7); 3]);
/// let listed = fe_vec![1, 2, 3];
/// assert_eq!(listed, vec![fe!(1), fe!(2), fe!(3)]);
/// ```
#[macro_export]
macro_rules! fe_vec {
    ($b:expr; $n:expr) => {
        vec![$crate::field_element::FieldElement::from($b); $n]
    };
    ($($b:expr),* $(,)?) => {
        vec![$($crate::field_element::FieldElement::from($b)),*]
    };
}

/// Construct a [`Polynomial`](crate::poly::Polynomial) from coefficients,
/// constant term first.
///
/// ```
/// use math::prelude::*;
///
/// let poly = poly![3, 2, 5];
/// assert_eq!(poly.evaluate(&fe!(2)), fe!(27));
/// ```
#[macro_export]
macro_rules! poly {
    () => {
        $crate::poly::Polynomial::zero()
    };
    ($($coeff:expr),+ $(,)?) => {
        $crate::poly::Polynomial::new($crate::fe_vec![$($coeff),+])
    };
}
