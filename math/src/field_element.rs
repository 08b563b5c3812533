use std::fmt;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Mul;
use std::ops::MulAssign;
use std::ops::Neg;
use std::ops::Sub;
use std::ops::SubAssign;
use std::str::FromStr;
use std::sync::LazyLock;

use num_bigint::BigInt;
use num_bigint::BigUint;
use num_bigint::Sign;
use num_traits::Num;
use num_traits::One;
use num_traits::Zero;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use super::{
    error::{MathError, ParseFieldElementError},
    traits::*,
};

/// Little-endian `u32` digits of the field modulus
/// 208351617316091241234326746312124448251235562226470491514186331217050270460481,
/// a 257-bit prime.
const MODULUS_DIGITS: [u32; 9] = [
    0xd7d46a41, 0x4292117d, 0x6da78d23, 0x8a66b162, 0x3c7c654a, 0x73c1fa8e,
    0x8b9093f4, 0xcca2d61c, 0x00000001,
];

static MODULUS: LazyLock<BigUint> =
    LazyLock::new(|| BigUint::from_slice(&MODULUS_DIGITS));

/// P - 2, the Fermat exponent used for inversion.
static INVERSE_EXPONENT: LazyLock<BigUint> =
    LazyLock::new(|| &*MODULUS - BigUint::from(2u32));

/// Element of the prime field ℤ_P.
///
/// The wrapped integer is always the canonical representative in `[0, P)`;
/// every constructor and operator reduces before returning.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct FieldElement(BigUint);

impl Serialize for FieldElement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl FieldElement {
    /// The field modulus P.
    #[inline]
    pub fn modulus() -> &'static BigUint {
        &MODULUS
    }

    /// Reduce an arbitrary non-negative integer into the field.
    #[inline]
    pub fn new(value: BigUint) -> Self {
        if value < *MODULUS {
            Self(value)
        } else {
            Self(value % &*MODULUS)
        }
    }

    /// Construct a new field element iff the given value is
    /// [canonical][Self::is_canonical], an error otherwise.
    pub fn try_new(value: BigUint) -> Result<Self, ParseFieldElementError> {
        if Self::is_canonical(&value) {
            Ok(Self(value))
        } else {
            Err(ParseFieldElementError::NotCanonical(value.to_string()))
        }
    }

    /// Parse a digit string in the given radix and reduce it modulo P.
    ///
    /// Leading and trailing whitespace is not accepted; digits are
    /// case-insensitive for radices above 10.
    pub fn from_str_radix(
        digits: &str,
        radix: u32,
    ) -> Result<Self, ParseFieldElementError> {
        if !(2..=36).contains(&radix) {
            return Err(ParseFieldElementError::InvalidRadix(radix));
        }
        if digits.is_empty() {
            return Err(ParseFieldElementError::Empty);
        }
        // `from_str_radix` tolerates `_` separators and a leading `+`; a share
        // value is a bare digit string.
        if !digits.chars().all(|c| c.is_digit(radix)) {
            return Err(ParseFieldElementError::InvalidDigits {
                digits: digits.to_owned(),
                radix,
            });
        }
        BigUint::from_str_radix(digits, radix)
            .map(Self::new)
            .map_err(|_| ParseFieldElementError::InvalidDigits {
                digits: digits.to_owned(),
                radix,
            })
    }

    /// The canonical representative in `[0, P)`.
    #[inline]
    pub fn value(&self) -> &BigUint {
        &self.0
    }

    #[must_use]
    pub fn mod_pow(&self, exp: &BigUint) -> Self {
        Self(self.0.modpow(exp, &MODULUS))
    }

    #[inline]
    pub fn is_canonical(x: &BigUint) -> bool {
        x < &*MODULUS
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for FieldElement {
    type Err = ParseFieldElementError;

    /// Parse a canonical decimal representative.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseFieldElementError::Empty);
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseFieldElementError::InvalidDigits {
                digits: s.to_owned(),
                radix: 10,
            });
        }
        let parsed = BigUint::from_str_radix(s, 10).map_err(|_| {
            ParseFieldElementError::InvalidDigits {
                digits: s.to_owned(),
                radix: 10,
            }
        })?;
        Self::try_new(parsed)
    }
}

impl From<BigUint> for FieldElement {
    fn from(value: BigUint) -> Self {
        Self::new(value)
    }
}

impl From<&BigInt> for FieldElement {
    fn from(value: &BigInt) -> Self {
        let modulus = BigInt::from_biguint(Sign::Plus, MODULUS.clone());
        let reduced = ((value % &modulus) + &modulus) % &modulus;
        // `reduced` lies in [0, P), so the magnitude is the representative.
        Self(reduced.magnitude().clone())
    }
}

impl From<BigInt> for FieldElement {
    fn from(value: BigInt) -> Self {
        Self::from(&value)
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),+ $(,)?) => {$(
        impl From<$t> for FieldElement {
            fn from(value: $t) -> Self {
                Self::new(BigUint::from(value))
            }
        }
    )+};
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);

macro_rules! impl_from_signed {
    ($($t:ty),+ $(,)?) => {$(
        impl From<$t> for FieldElement {
            fn from(value: $t) -> Self {
                let magnitude = Self::new(BigUint::from(value.unsigned_abs()));
                if value < 0 {
                    -magnitude
                } else {
                    magnitude
                }
            }
        }
    )+};
}

impl_from_signed!(i8, i16, i32, i64, i128, isize);

impl From<FieldElement> for BigUint {
    fn from(elem: FieldElement) -> Self {
        elem.0
    }
}

impl From<&FieldElement> for BigUint {
    fn from(elem: &FieldElement) -> Self {
        elem.0.clone()
    }
}

impl Inverse for FieldElement {
    /// Fermat inversion: a^(P-2) mod P.
    fn try_inverse(&self) -> Result<Self, MathError> {
        if self.is_zero() {
            return Err(MathError::ZeroInverse);
        }
        Ok(self.mod_pow(&INVERSE_EXPONENT))
    }
}

impl FiniteField for FieldElement {}

impl Zero for FieldElement {
    #[inline]
    fn zero() -> Self {
        Self(BigUint::zero())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for FieldElement {
    #[inline]
    fn one() -> Self {
        Self(BigUint::one())
    }

    #[inline]
    fn is_one(&self) -> bool {
        self.0.is_one()
    }
}

impl Add<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    #[inline]
    fn add(self, rhs: &FieldElement) -> FieldElement {
        let sum = &self.0 + &rhs.0;
        if sum >= *MODULUS {
            FieldElement(sum - &*MODULUS)
        } else {
            FieldElement(sum)
        }
    }
}

impl Sub<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    #[inline]
    fn sub(self, rhs: &FieldElement) -> FieldElement {
        if self.0 >= rhs.0 {
            FieldElement(&self.0 - &rhs.0)
        } else {
            FieldElement(&self.0 + &*MODULUS - &rhs.0)
        }
    }
}

impl Mul<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    #[inline]
    fn mul(self, rhs: &FieldElement) -> FieldElement {
        FieldElement((&self.0 * &rhs.0) % &*MODULUS)
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;

    #[inline]
    fn neg(self) -> FieldElement {
        &FieldElement::zero() - self
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;

    #[inline]
    fn neg(self) -> FieldElement {
        -&self
    }
}

/// Forward the owned and mixed operator forms to the `&a op &b` impl.
macro_rules! forward_binop {
    ($imp:ident, $method:ident, $assign_imp:ident, $assign_method:ident) => {
        impl $imp<FieldElement> for FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $method(self, rhs: FieldElement) -> FieldElement {
                (&self).$method(&rhs)
            }
        }

        impl $imp<&FieldElement> for FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $method(self, rhs: &FieldElement) -> FieldElement {
                (&self).$method(rhs)
            }
        }

        impl $imp<FieldElement> for &FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $method(self, rhs: FieldElement) -> FieldElement {
                self.$method(&rhs)
            }
        }

        impl $assign_imp<FieldElement> for FieldElement {
            #[inline]
            fn $assign_method(&mut self, rhs: FieldElement) {
                *self = (&*self).$method(&rhs);
            }
        }

        impl $assign_imp<&FieldElement> for FieldElement {
            #[inline]
            fn $assign_method(&mut self, rhs: &FieldElement) {
                *self = (&*self).$method(rhs);
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign);
forward_binop!(Sub, sub, SubAssign, sub_assign);
forward_binop!(Mul, mul, MulAssign, mul_assign);

#[cfg(test)]
mod field_element_test {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::Hash;
    use std::hash::Hasher;

    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;
    use crate::{fe, fe_vec};

    const MODULUS_DECIMAL: &str = "208351617316091241234326746312124448251235562226470491514186331217050270460481";

    impl proptest::arbitrary::Arbitrary for FieldElement {
        type Parameters = ();

        fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
            prop::collection::vec(any::<u8>(), 0..=33)
                .prop_map(|bytes| {
                    FieldElement::new(BigUint::from_bytes_le(&bytes))
                })
                .boxed()
        }

        type Strategy = BoxedStrategy<Self>;
    }

    fn hash_of(fe: &FieldElement) -> u64 {
        let mut hasher = DefaultHasher::new();
        fe.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn modulus_matches_decimal_literal() {
        let expected = BigUint::from_str_radix(MODULUS_DECIMAL, 10).unwrap();
        assert_eq!(FieldElement::modulus(), &expected);
        assert_eq!(FieldElement::modulus().bits(), 257);
    }

    #[proptest]
    fn serialization_and_deserialization_to_and_from_json_is_identity(
        fe: FieldElement,
    ) {
        let serialized = serde_json::to_string(&fe).unwrap();
        let deserialized: FieldElement =
            serde_json::from_str(&serialized).unwrap();
        prop_assert_eq!(fe, deserialized);
    }

    #[test]
    fn serializes_as_decimal_string() {
        let serialized = serde_json::to_string(&fe!(1234)).unwrap();
        assert_eq!(serialized, "\"1234\"");
    }

    #[test]
    fn parsing_modulus_as_field_element_gives_error() {
        let err = FieldElement::from_str(MODULUS_DECIMAL).unwrap_err();
        assert_eq!(
            err,
            ParseFieldElementError::NotCanonical(MODULUS_DECIMAL.to_owned())
        );
    }

    #[test]
    fn parsing_rejects_signs_and_whitespace() {
        for bad in ["", "-1", "+1", " 1", "1_000", "12a"] {
            assert!(FieldElement::from_str(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[proptest]
    fn parsing_display_output_is_identity(fe: FieldElement) {
        let parsed = FieldElement::from_str(&fe.to_string()).unwrap();
        prop_assert_eq!(parsed, fe);
    }

    #[test]
    fn radix_parsing_matches_known_values() {
        assert_eq!(FieldElement::from_str_radix("111", 2).unwrap(), fe!(7));
        assert_eq!(FieldElement::from_str_radix("aed7015a346d63", 16).unwrap(), fe!(0xaed7015a346d63u64));
        assert_eq!(FieldElement::from_str_radix("AED7015A346D63", 16).unwrap(), fe!(0xaed7015a346d63u64));
        assert_eq!(FieldElement::from_str_radix("213", 4).unwrap(), fe!(39));
        assert_eq!(FieldElement::from_str_radix("zz", 36).unwrap(), fe!(1295));
    }

    #[test]
    fn radix_parsing_reduces_modulo_p() {
        let p_plus_five = (FieldElement::modulus() + 5u32).to_str_radix(7);
        assert_eq!(FieldElement::from_str_radix(&p_plus_five, 7).unwrap(), fe!(5));
    }

    #[test]
    fn radix_parsing_rejects_bad_input() {
        assert_eq!(
            FieldElement::from_str_radix("101", 1),
            Err(ParseFieldElementError::InvalidRadix(1))
        );
        assert_eq!(
            FieldElement::from_str_radix("101", 37),
            Err(ParseFieldElementError::InvalidRadix(37))
        );
        assert_eq!(
            FieldElement::from_str_radix("", 10),
            Err(ParseFieldElementError::Empty)
        );
        assert_eq!(
            FieldElement::from_str_radix("129", 8),
            Err(ParseFieldElementError::InvalidDigits {
                digits: "129".to_owned(),
                radix: 8
            })
        );
        assert!(FieldElement::from_str_radix("bad_value", 16).is_err());
    }

    #[proptest]
    fn zero_is_neutral_element_for_addition(fe: FieldElement) {
        prop_assert_eq!(&fe + &FieldElement::zero(), fe);
    }

    #[proptest]
    fn one_is_neutral_element_for_multiplication(fe: FieldElement) {
        prop_assert_eq!(&fe * &FieldElement::one(), fe);
    }

    #[proptest]
    fn addition_is_commutative(
        element_0: FieldElement,
        element_1: FieldElement,
    ) {
        prop_assert_eq!(&element_0 + &element_1, &element_1 + &element_0);
    }

    #[proptest]
    fn multiplication_is_commutative(
        element_0: FieldElement,
        element_1: FieldElement,
    ) {
        prop_assert_eq!(&element_0 * &element_1, &element_1 * &element_0);
    }

    #[proptest]
    fn multiplication_distributes_over_addition(
        element_0: FieldElement,
        element_1: FieldElement,
        element_2: FieldElement,
    ) {
        prop_assert_eq!(
            &element_0 * &(&element_1 + &element_2),
            &element_0 * &element_1 + &element_0 * &element_2
        );
    }

    #[proptest]
    fn subtraction_undoes_addition(a: FieldElement, b: FieldElement) {
        prop_assert_eq!(&(&a + &b) - &b, a);
    }

    #[proptest]
    fn results_stay_canonical(a: FieldElement, b: FieldElement) {
        for result in [&a + &b, &a - &b, &a * &b, -&a] {
            prop_assert!(FieldElement::is_canonical(result.value()));
        }
    }

    #[proptest]
    fn multiplication_with_inverse_gives_identity(
        #[filter(!#fe.is_zero())] fe: FieldElement,
    ) {
        let inverse = fe.try_inverse().unwrap();
        prop_assert!((&fe * &inverse).is_one());
    }

    #[test]
    fn multiplicative_inverse_of_zero() {
        assert_eq!(FieldElement::zero().try_inverse(), Err(MathError::ZeroInverse));
        let p = FieldElement::new(FieldElement::modulus().clone());
        assert_eq!(p.try_inverse(), Err(MathError::ZeroInverse));
    }

    #[test]
    fn test_fixed_inverse() {
        let expected = FieldElement::from_str(
            "104175808658045620617163373156062224125617781113235245757093165608525135230241",
        )
        .unwrap();
        assert_eq!(fe!(2).try_inverse().unwrap(), expected);
    }

    #[test]
    fn negative_integers_wrap_around() {
        let minus_one = fe!(-1);
        assert_eq!(minus_one.value(), &(FieldElement::modulus() - 1u32));
        assert_eq!(&minus_one + &fe!(1), FieldElement::zero());
        assert_eq!(fe!(0) - fe!(3), fe!(-3));
        assert_eq!(fe!(i64::MIN) + fe!(i64::MAX), fe!(-1));
    }

    #[test]
    fn signed_bigint_conversion_agrees_with_primitive() {
        assert_eq!(FieldElement::from(BigInt::from(-42)), fe!(-42));
        let big_negative = -BigInt::from_biguint(
            Sign::Plus,
            FieldElement::modulus() * 3u32 + 11u32,
        );
        assert_eq!(FieldElement::from(big_negative), fe!(-11));
    }

    #[test]
    fn equality_and_hash_test() {
        let a = fe!(42);
        let b = FieldElement::new(FieldElement::modulus() + 42u32);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(hash_of(&a), hash_of(&fe!(43)));
    }

    #[test]
    fn ordering_follows_canonical_value() {
        assert!(fe!(3) < fe!(4));
        assert!(fe!(-1) > fe!(1_000_000));
    }

    #[test]
    fn assign_operators_match_binary_operators() {
        let mut acc = fe!(10);
        acc += fe!(5);
        acc -= &fe!(20);
        acc *= fe!(3);
        assert_eq!(acc, fe!(-15));
    }

    #[test]
    fn empty_batch_inversion() {
        let inverted = FieldElement::try_batch_inversion(vec![]).unwrap();
        assert!(inverted.is_empty());
    }

    #[proptest]
    fn batch_inversion_matches_single_inversion(
        #[strategy(prop::collection::vec(any::<FieldElement>(), 0..12))]
        #[filter(#fes.iter().all(|fe| !fe.is_zero()))]
        fes: Vec<FieldElement>,
    ) {
        let inverted = FieldElement::try_batch_inversion(fes.clone()).unwrap();
        prop_assert_eq!(inverted.len(), fes.len());
        for (fe, inv) in fes.iter().zip(&inverted) {
            prop_assert_eq!(&fe.try_inverse().unwrap(), inv);
        }
    }

    #[test]
    fn batch_inversion_rejects_zero() {
        assert!(FieldElement::try_batch_inversion(fe_vec![3, 0, 5]).is_none());
    }
}
