/// Face interpolation along the direction of bulk flow
pub mod advective;
/// Face interpolation of values and slopes for diffusive terms
pub mod diffusive;
/// Affine combinations of node variables
pub mod expr;
/// Reduction of a face to the nodes (and weights) that define it
pub mod stencil;
/// Quantities which can be interpolated
pub mod value;

pub use advective::{channel_profile, channel_stencil, interpolate_channel};
pub use diffusive::{diffusive_profile, diffusive_stencil, interpolate_2d};
pub use expr::LinearExpr;
pub use stencil::{BoundarySide, FaceStencil};
pub use value::FaceValue;

use crate::domain::axis::AxisError;
use std::fmt;
use thiserror::Error;

/// Method used to compute the value at a control-volume face from the neighboring node values
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// First order upwind: the face takes the value of the node upstream of it
    Upwind,
    /// Linear interpolation between the upstream and downstream nodes
    Central,
    /// Quadratic interpolation from two upstream nodes and one downstream node (not implemented)
    QuadraticUpwind,
}

impl Scheme {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Upwind => "upwind",
            Self::Central => "central",
            Self::QuadraticUpwind => "quadratic_upwind",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "upwind" | "uds" => Some(Self::Upwind),
            "central" | "cds" => Some(Self::Central),
            "quadratic_upwind" | "quick" => Some(Self::QuadraticUpwind),
            _ => None,
        }
    }
}

impl Default for Scheme {
    fn default() -> Self {
        Self::Upwind
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Sign of the advective velocity along an Axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowDirection {
    /// Positive velocity; the inlet is the first face
    Forward,
    /// Negative velocity; the inlet is the last face
    Reverse,
}

impl FlowDirection {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Reverse => "reverse",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "forward" | "positive" => Some(Self::Forward),
            "reverse" | "negative" => Some(Self::Reverse),
            _ => None,
        }
    }

    /// The end of the Axis where material enters
    pub const fn inlet_side(&self) -> BoundarySide {
        match self {
            Self::Forward => BoundarySide::Lo,
            Self::Reverse => BoundarySide::Hi,
        }
    }
}

impl Default for FlowDirection {
    fn default() -> Self {
        Self::Forward
    }
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Condition applied at the first or last face of an Axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bound<T> {
    /// The face value (or slope) is known
    Value(T),
    /// The face value is extrapolated from the two nearest interior nodes
    Extrapolate,
}

impl<T> Bound<T> {
    pub fn is_extrapolate(&self) -> bool {
        matches!(self, Self::Extrapolate)
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Extrapolate => None,
        }
    }
}

/// Quantity computed at a face by the diffusive interpolation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceQuantity {
    Value,
    /// Slope of the linear interpolant (the gradient used by diffusive fluxes)
    Derivative,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpError {
    #[error("The {scheme} scheme is not supported for {context}; Cannot interpolate!")]
    UnsupportedScheme {
        scheme: Scheme,
        context: &'static str,
    },
    #[error("Extrapolating to face {face_id} needs at least 2 nodes (Axis has {num_nodes}); Cannot interpolate!")]
    TooFewNodes { face_id: usize, num_nodes: usize },
    #[error("Expected {expected} node values (got {found}); Cannot apply face operator!")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("No value was given for the {0} boundary; Cannot evaluate boundary face!")]
    MissingBoundary(BoundarySide),
    #[error(transparent)]
    Axis(#[from] AxisError),
}
