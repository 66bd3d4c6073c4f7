use super::{FaceValue, InterpError};
use smallvec::{smallvec, SmallVec};
use std::fmt;

/// End of an Axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundarySide {
    /// The first face
    Lo,
    /// The last face
    Hi,
}

impl fmt::Display for BoundarySide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Lo => write!(f, "lower"),
            Self::Hi => write!(f, "upper"),
        }
    }
}

/// Description of how the value at a single face is formed from node values
///
/// Node indices are 1-based, matching [Axis](crate::domain::axis::Axis).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FaceStencil {
    /// The face value is supplied by a boundary condition
    Boundary(BoundarySide),
    /// The face takes the value of a single node
    Upstream(usize),
    /// `weight * phi(upstream) + (1 - weight) * phi(downstream)`
    ///
    /// `weight` lies in [0, 1] between the two nodes, and outside it when extrapolating.
    Linear {
        upstream: usize,
        downstream: usize,
        weight: f64,
    },
    /// `(phi(downstream) - phi(upstream)) / span`
    Slope {
        upstream: usize,
        downstream: usize,
        span: f64,
    },
}

impl FaceStencil {
    /// Linear stencil at `z_face`, weighted by distance to the node at `z_up` and the node at `z_down`
    pub fn linear(upstream: usize, downstream: usize, [z_up, z_down, z_face]: [f64; 3]) -> Self {
        Self::Linear {
            upstream,
            downstream,
            weight: (z_down - z_face) / (z_down - z_up),
        }
    }

    /// Slope stencil between the node at `z_up` and the node at `z_down`
    pub fn slope(upstream: usize, downstream: usize, [z_up, z_down]: [f64; 2]) -> Self {
        Self::Slope {
            upstream,
            downstream,
            span: z_down - z_up,
        }
    }

    /// Evaluate the stencil
    ///
    /// * `phi`: node value accessor (1-based)
    /// * `lo` and `hi`: values for the first and last face. Only the side named by a `Boundary` stencil is used
    ///
    /// Returns an error if the stencil needs a boundary value which was not given
    pub fn apply<T, F>(&self, phi: F, lo: Option<T>, hi: Option<T>) -> Result<T, InterpError>
    where
        T: FaceValue,
        F: Fn(usize) -> T,
    {
        match *self {
            Self::Boundary(side) => {
                let value = match side {
                    BoundarySide::Lo => lo,
                    BoundarySide::Hi => hi,
                };
                value.ok_or(InterpError::MissingBoundary(side))
            }
            Self::Upstream(upstream) => Ok(phi(upstream)),
            Self::Linear {
                upstream,
                downstream,
                weight,
            } => Ok(phi(upstream) * weight + phi(downstream) * (1.0 - weight)),
            Self::Slope {
                upstream,
                downstream,
                span,
            } => Ok((phi(downstream) - phi(upstream)) / span),
        }
    }

    /// The `(node_id, coefficient)` pairs of the stencil; empty for boundary faces
    pub fn node_weights(&self) -> SmallVec<[(usize, f64); 2]> {
        match *self {
            Self::Boundary(_) => SmallVec::new(),
            Self::Upstream(upstream) => smallvec![(upstream, 1.0)],
            Self::Linear {
                upstream,
                downstream,
                weight,
            } => smallvec![(upstream, weight), (downstream, 1.0 - weight)],
            Self::Slope {
                upstream,
                downstream,
                span,
            } => smallvec![(upstream, -1.0 / span), (downstream, 1.0 / span)],
        }
    }

    pub fn boundary_side(&self) -> Option<BoundarySide> {
        match self {
            Self::Boundary(side) => Some(*side),
            _ => None,
        }
    }
}

impl fmt::Display for FaceStencil {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Boundary(side) => write!(f, "{} boundary", side),
            Self::Upstream(u) => write!(f, "node {}", u),
            Self::Linear {
                upstream,
                downstream,
                weight,
            } => write!(
                f,
                "{:.5} * node {} + {:.5} * node {}",
                weight,
                upstream,
                1.0 - weight,
                downstream
            ),
            Self::Slope {
                upstream,
                downstream,
                span,
            } => write!(f, "(node {} - node {}) / {:.5}", downstream, upstream, span),
        }
    }
}
