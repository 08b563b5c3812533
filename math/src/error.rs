use thiserror::Error;

use crate::field_element::FieldElement;

/// Top-level error type to keep error management simple for users.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum MathError {
    #[error("zero has no multiplicative inverse modulo P")]
    ZeroInverse,
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum ParseFieldElementError {
    #[error("empty digit string")]
    Empty,
    #[error("radix {0} is outside the supported range 2..=36")]
    InvalidRadix(u32),
    #[error("`{digits}` is not a valid base-{radix} integer")]
    InvalidDigits { digits: String, radix: u32 },
    #[error("non-canonical value {0} >= {p} == `FieldElement::P`", p = FieldElement::modulus())]
    NotCanonical(String),
}
