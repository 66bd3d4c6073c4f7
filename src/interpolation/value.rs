use std::ops::{Add, Div, Mul, Sub};

/// A quantity which can be interpolated at a face: concrete numbers (`f64`, `Complex64`), or deferred expressions ([LinearExpr](super::LinearExpr))
///
/// Interpolation only needs sums, differences, and scaling by real geometric weights, so any type with those operations qualifies.
pub trait FaceValue:
    Clone + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self> + Div<f64, Output = Self>
{
}

impl<T> FaceValue for T where
    T: Clone
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<f64, Output = T>
        + Div<f64, Output = T>
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn midpoint<T: FaceValue>(a: T, b: T) -> T {
        a * 0.5 + b * 0.5
    }

    #[test]
    fn numbers_are_face_values() {
        assert_eq!(midpoint(2.0, 4.0), 3.0);
        assert_eq!(
            midpoint(Complex64::new(2.0, -2.0), Complex64::new(4.0, 2.0)),
            Complex64::new(3.0, 0.0)
        );
    }
}
