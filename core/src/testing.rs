//! Fixtures shared by the unit tests.

use math::prelude::*;
use num_bigint::BigUint;
use proptest::prelude::*;

use crate::share::ShareRecord;

/// Uniform-ish field elements, including values close to the modulus.
pub(crate) fn field_element() -> impl Strategy<Value = FieldElement> {
    prop::collection::vec(any::<u8>(), 0..=33)
        .prop_map(|bytes| FieldElement::new(BigUint::from_bytes_le(&bytes)))
}

/// Genuine shares of `poly` at each of `xs`.
pub(crate) fn shares_on<I>(poly: &Polynomial, xs: I) -> Vec<ShareRecord>
where
    I: IntoIterator<Item = u64>,
{
    poly.sample_points(xs)
        .into_iter()
        .map(|(x, y)| ShareRecord::new(x, y).unwrap())
        .collect()
}
