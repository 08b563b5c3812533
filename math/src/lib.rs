//! Arithmetic over the fixed prime field used for secret recovery.

pub mod error;
pub mod field_element;
pub mod macros;
pub mod poly;
pub mod prelude;
pub mod traits;

pub use error::{MathError, ParseFieldElementError};
pub use field_element::FieldElement;
