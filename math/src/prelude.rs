pub use crate::{fe, fe_vec, poly};
pub use crate::{
    field_element::FieldElement,
    poly::Polynomial,
    traits::{FiniteField, Inverse},
};
pub use num_traits::{One, Zero};
