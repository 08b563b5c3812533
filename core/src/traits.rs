use math::field_element::FieldElement;

/// Abstract source of an interpolation point `(x, y)`.
pub trait PointSource {
    /// Integer index the x-coordinate was derived from.
    fn index(&self) -> u64;

    /// The y-coordinate of this point.
    fn y(&self) -> &FieldElement;

    /// The x-coordinate corresponding to this point.
    fn x(&self) -> FieldElement {
        FieldElement::from(self.index())
    }
}

impl<T: PointSource + ?Sized> PointSource for &T {
    fn index(&self) -> u64 {
        (**self).index()
    }

    fn y(&self) -> &FieldElement {
        (**self).y()
    }
}
