use crate::domain::axis::AxisError;

use nalgebra::DVector;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// An affine combination of variables: `constant + sum(coefficient_i * x_i)`
///
/// Interpolating `LinearExpr::var(i)` node accessors yields the face quantity as a symbolic expression rather than a number, which can
/// then be embedded in the equations handed to an external solver.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct LinearExpr {
    constant: f64,
    coefficients: BTreeMap<usize, f64>,
}

impl LinearExpr {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn constant(value: f64) -> Self {
        Self {
            constant: value,
            coefficients: BTreeMap::new(),
        }
    }

    /// A single variable with a coefficient of one
    pub fn var(id: usize) -> Self {
        let mut coefficients = BTreeMap::new();
        coefficients.insert(id, 1.0);
        Self {
            constant: 0.0,
            coefficients,
        }
    }

    pub fn constant_term(&self) -> f64 {
        self.constant
    }

    /// Coefficient of a variable (zero if it does not appear)
    pub fn coefficient(&self, id: usize) -> f64 {
        self.coefficients.get(&id).copied().unwrap_or(0.0)
    }

    /// Iterate over the `(variable id, coefficient)` pairs in variable order
    pub fn terms(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.coefficients.iter().map(|(id, c)| (*id, *c))
    }

    pub fn is_constant(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Evaluate with the value of each variable supplied by `values`
    pub fn eval<F: Fn(usize) -> f64>(&self, values: F) -> f64 {
        self.constant + self.terms().map(|(id, c)| c * values(id)).sum::<f64>()
    }

    /// Evaluate with variables interpreted as 1-based node ids into `nodes`
    pub fn eval_nodes(&self, nodes: &DVector<f64>) -> Result<f64, AxisError> {
        if let Some((id, _)) = self.terms().find(|(id, _)| *id < 1 || *id > nodes.len()) {
            return Err(AxisError::NodeOutOfRange(id, nodes.len()));
        }
        Ok(self.eval(|id| nodes[id - 1]))
    }

    fn combine(mut self, other: Self, sign: f64) -> Self {
        self.constant += sign * other.constant;
        for (id, c) in other.coefficients {
            *self.coefficients.entry(id).or_insert(0.0) += sign * c;
        }
        self.coefficients.retain(|_, c| *c != 0.0);
        self
    }

    fn scale(mut self, factor: f64) -> Self {
        self.constant *= factor;
        self.coefficients.values_mut().for_each(|c| *c *= factor);
        self.coefficients.retain(|_, c| *c != 0.0);
        self
    }
}

impl From<f64> for LinearExpr {
    fn from(value: f64) -> Self {
        Self::constant(value)
    }
}

impl Add for LinearExpr {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        self.combine(other, 1.0)
    }
}

impl Sub for LinearExpr {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        self.combine(other, -1.0)
    }
}

impl Mul<f64> for LinearExpr {
    type Output = Self;
    fn mul(self, factor: f64) -> Self {
        self.scale(factor)
    }
}

impl Div<f64> for LinearExpr {
    type Output = Self;
    fn div(self, divisor: f64) -> Self {
        self.scale(1.0 / divisor)
    }
}

impl Neg for LinearExpr {
    type Output = Self;
    fn neg(self) -> Self {
        self.scale(-1.0)
    }
}

impl fmt::Display for LinearExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.5}", self.constant)?;
        for (id, c) in self.terms() {
            if c < 0.0 {
                write!(f, " - {:.5}*x{}", -c, id)?;
            } else {
                write!(f, " + {:.5}*x{}", c, id)?;
            }
        }
        Ok(())
    }
}
