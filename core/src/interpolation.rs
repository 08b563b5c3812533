//! Lagrange interpolation over ℤ_P.

use math::prelude::*;

use crate::error::{RecoveryError, Result};
use crate::traits::PointSource;

/// Evaluate at x = 0 the unique polynomial of degree `< points.len()`
/// passing through `points`, i.e. recover the shared secret.
pub fn interpolate_at_zero<S: PointSource>(points: &[S]) -> Result<FieldElement> {
    interpolate_at(points, &FieldElement::zero())
}

/// Evaluate the interpolating polynomial through `points` at `x`.
///
/// For each point i the basis value
/// `L_i(x) = Π_{j≠i} (x − x_j) / (x_i − x_j)` is formed with every product
/// reduced as it is built; the denominators are inverted together.
pub fn interpolate_at<S: PointSource>(
    points: &[S],
    x: &FieldElement,
) -> Result<FieldElement> {
    if points.is_empty() {
        return Err(RecoveryError::InvalidThreshold {
            threshold: 0,
            shares: 0,
        });
    }

    let xs: Vec<FieldElement> = points.iter().map(|point| point.x()).collect();
    let mut numerators = Vec::with_capacity(xs.len());
    let mut denominators = Vec::with_capacity(xs.len());

    for (i, xi) in xs.iter().enumerate() {
        let mut numerator = FieldElement::one();
        let mut denominator = FieldElement::one();
        for (j, xj) in xs.iter().enumerate() {
            if i == j {
                continue;
            }
            numerator *= x - xj;
            denominator *= xi - xj;
        }

        if denominator.is_zero() {
            return Err(RecoveryError::DegenerateInterpolation {
                index: points[i].index(),
            });
        }
        numerators.push(numerator);
        denominators.push(denominator);
    }

    // Zero denominators were rejected above.
    let inverses = FieldElement::try_batch_inversion(denominators).ok_or(
        RecoveryError::DegenerateInterpolation {
            index: points[0].index(),
        },
    )?;

    let result = points
        .iter()
        .zip(numerators)
        .zip(inverses)
        .fold(FieldElement::zero(), |acc, ((point, numerator), inverse)| {
            acc + point.y() * &(numerator * inverse)
        });

    Ok(result)
}
