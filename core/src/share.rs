use math::field_element::FieldElement;
use serde::Serialize;

use crate::error::{RecoveryError, Result};
use crate::traits::PointSource;

/// One validated `(index, value)` sample point of the sharing polynomial.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ShareRecord {
    index: u64,
    value: FieldElement,
}

impl ShareRecord {
    /// Index 0 is the secret's own x-coordinate and never a valid share.
    pub fn new(index: u64, value: FieldElement) -> Result<Self> {
        if index == 0 {
            return Err(RecoveryError::InvalidShareIndex(index));
        }

        Ok(ShareRecord { index, value })
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn value(&self) -> &FieldElement {
        &self.value
    }
}

impl PointSource for ShareRecord {
    fn index(&self) -> u64 {
        self.index
    }

    fn y(&self) -> &FieldElement {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use math::prelude::*;

    #[test]
    fn new_rejects_zero_index() {
        assert_eq!(
            ShareRecord::new(0, fe!(5)),
            Err(RecoveryError::InvalidShareIndex(0))
        );
    }

    #[test]
    fn point_source_exposes_coordinates() {
        let share = ShareRecord::new(4, fe!(91)).unwrap();
        assert_eq!(share.x(), fe!(4));
        assert_eq!(share.y(), &fe!(91));
        assert_eq!((&share).index(), 4);
    }

    #[test]
    fn large_indices_map_into_the_field() {
        let share = ShareRecord::new(u64::MAX, fe!(1)).unwrap();
        assert_eq!(share.x(), FieldElement::from(u64::MAX));
    }
}
