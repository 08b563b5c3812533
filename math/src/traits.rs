use std::fmt::Debug;
use std::fmt::Display;
use std::hash::Hash;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Mul;
use std::ops::MulAssign;
use std::ops::Neg;
use std::ops::Sub;
use std::ops::SubAssign;

use num_traits::One;
use num_traits::Zero;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::MathError;

pub trait Inverse
where
    Self: Sized + Zero,
{
    /// Multiplicative inverse, or [`MathError::ZeroInverse`] for zero.
    fn try_inverse(&self) -> Result<Self, MathError>;
}

pub trait AddGroup:
    Clone + Zero + Add<Output = Self> + Sub<Output = Self> + AddAssign + SubAssign
{
}

impl<T> AddGroup for T where
    T: Clone
        + Zero
        + Add<Output = T>
        + Sub<Output = T>
        + AddAssign
        + SubAssign
{
}

pub trait MulGroup: Clone + One + Mul<Output = Self> + MulAssign {}

impl<T> MulGroup for T where T: Clone + One + Mul<Output = T> + MulAssign {}

pub trait FieldCore:
    Debug + Display + Default + Eq + Ord + Serialize + DeserializeOwned + Hash
{
}

impl<T> FieldCore for T where
    T: Debug + Display + Default + Eq + Ord + Serialize + DeserializeOwned + Hash
{
}

pub trait FieldConversions: From<u64> + From<i64> {}

impl<T> FieldConversions for T where T: From<u64> + From<i64> {}

/// Arithmetic over a prime field where every value is kept reduced.
pub trait FiniteField:
    AddGroup
    + MulGroup
    + FieldCore
    + FieldConversions
    + Neg<Output = Self>
    + Inverse
    + Send
    + Sync
{
    /// Attempt to compute the Montgomery batch inversion of the provided elements.
    ///
    /// Returns `None` when any of the inputs is zero. Adapted from
    /// <https://paulmillr.com/posts/noble-secp256k1-fast-ecc/#batch-inversion>.
    fn try_batch_inversion(mut input: Vec<Self>) -> Option<Vec<Self>> {
        if input.is_empty() {
            return Some(Vec::new());
        }

        let mut scratch: Vec<Self> = Vec::with_capacity(input.len());
        let mut acc = Self::one();

        for value in &input {
            if value.is_zero() {
                return None;
            }
            scratch.push(acc.clone());
            acc *= value.clone();
        }

        acc = acc.try_inverse().ok()?;

        for (value, prefix) in
            input.iter_mut().rev().zip(scratch.into_iter().rev())
        {
            let current = std::mem::replace(value, acc.clone() * prefix);
            acc *= current;
        }

        Some(input)
    }
}
