use super::axis::{Axis, AxisError};
use crate::interpolation::{interpolate_2d, Bound, FaceQuantity, FaceValue, InterpError, Scheme};

use std::fmt;
use thiserror::Error;
use tracing::debug;

#[cfg(feature = "json_export")]
use json::{object, JsonValue};

/// Discretized direction of a [Grid]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Through the thickness of a layer
    X,
    /// Along the direction of channel flow
    Z,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Z => write!(f, "z"),
        }
    }
}

/// Two dimensional arrangement of control volumes: the x and z [Axis] (normalized to [0, 1]) and the physical size of the region
///
/// The y direction is not discretized; `length_y` only scales volumes and areas.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    pub x: Axis,
    pub z: Axis,
    /// Physical lengths in the x, y, and z directions
    lengths: [f64; 3],
}

impl Grid {
    pub fn new(x: Axis, z: Axis, [length_x, length_y, length_z]: [f64; 3]) -> Result<Self, GridError> {
        for (name, length) in [("x", length_x), ("y", length_y), ("z", length_z)] {
            if !(length > 0.0) {
                return Err(GridError::NonPositiveLength(name, length));
            }
        }

        debug!(
            nx = x.num_nodes(),
            nz = z.num_nodes(),
            length_x,
            length_y,
            length_z,
            "built grid"
        );

        Ok(Self {
            x,
            z,
            lengths: [length_x, length_y, length_z],
        })
    }

    /// The Axis in a given Direction
    pub fn axis(&self, direction: Direction) -> &Axis {
        match direction {
            Direction::X => &self.x,
            Direction::Z => &self.z,
        }
    }

    pub fn length_x(&self) -> f64 {
        self.lengths[0]
    }

    pub fn length_y(&self) -> f64 {
        self.lengths[1]
    }

    pub fn length_z(&self) -> f64 {
        self.lengths[2]
    }

    /// Normalized width of the control volumes in column `ix`
    pub fn dx(&self, ix: usize) -> Result<f64, AxisError> {
        self.x.width(ix)
    }

    /// Normalized width of the control volumes in row `iz`
    pub fn dz(&self, iz: usize) -> Result<f64, AxisError> {
        self.z.width(iz)
    }

    /// Physical volume of the control volume centered on node `(ix, iz)`
    pub fn node_volume(&self, ix: usize, iz: usize) -> Result<f64, AxisError> {
        let [lx, ly, lz] = self.lengths;
        Ok(lx * ly * lz * self.dx(ix)? * self.dz(iz)?)
    }

    /// Physical area of a z-face (normal to z) in column `ix`
    pub fn zface_area(&self, ix: usize) -> Result<f64, AxisError> {
        Ok(self.length_y() * self.length_x() * self.dx(ix)?)
    }

    /// Physical area of an x-face (normal to x) in row `iz`
    pub fn xface_area(&self, iz: usize) -> Result<f64, AxisError> {
        Ok(self.length_y() * self.length_z() * self.dz(iz)?)
    }

    /// Interpolate a value or slope at a face along one direction of the grid (see [interpolate_2d])
    ///
    /// The returned slope is with respect to the normalized coordinate; divide by the length in that direction for a physical gradient.
    #[allow(clippy::too_many_arguments)]
    pub fn interpolate<T, F>(
        &self,
        direction: Direction,
        face_id: usize,
        phi: F,
        bound_lo: Bound<T>,
        bound_hi: Bound<T>,
        scheme: Scheme,
        quantity: FaceQuantity,
    ) -> Result<T, InterpError>
    where
        T: FaceValue,
        F: Fn(usize) -> T,
    {
        interpolate_2d(self.axis(direction), face_id, phi, bound_lo, bound_hi, scheme, quantity)
    }

    #[cfg(feature = "json_export")]
    pub fn to_json(&self) -> JsonValue {
        object! {
            "x": self.x.to_json(),
            "z": self.z.to_json(),
            "lengths": self.lengths.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("Grid length in {0} must be positive (got {1}); Cannot build Grid!")]
    NonPositiveLength(&'static str, f64),
    #[error(transparent)]
    Axis(#[from] AxisError),
}
