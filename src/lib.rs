//! Face interpolation for finite volume models discretized on 1D and 2D grids of control volumes.
//!
//! Node values live at the centers of control volumes; the fluxes which enter a balance equation are evaluated at the faces between them.
//! The routines in [interpolation] compute a face value from the neighboring node values:
//!
//! * [interpolate_channel]: advective terms along the direction of bulk flow (upwind or central differencing)
//! * [interpolate_2d]: values and slopes for diffusive terms, with fixed or extrapolated boundary faces
//!
//! Node values are supplied through accessor closures, so the same routines work for plain numbers, complex numbers, or [LinearExpr]s
//! which are later handed to an external solver.
//!
//! ```
//! use fvm_2d::{interpolate_channel, Axis, FlowDirection, Scheme};
//!
//! let axis = Axis::new(vec![0.0, 0.25, 0.5, 0.75, 1.0]).unwrap();
//! let phi = |node_id: usize| [10.0, 20.0, 30.0, 40.0][node_id - 1];
//!
//! let face_value = interpolate_channel(&axis, 3, phi, 5.0, Scheme::Central, FlowDirection::Forward).unwrap();
//! assert!((face_value - 25.0).abs() < 1e-12);
//! ```

/// Loading Axes and interpolation settings from JSON files
pub mod config;
/// Structures to define the geometry of the control volumes and the fields stored on them
pub mod domain;
/// Routines to compute the value (or slope) of a quantity at a control-volume face
pub mod interpolation;
/// Face interpolation expressed as a sparse linear operator
pub mod linalg;

pub use config::{axis_from_file, ConfigError, InterpolationConfig};
pub use domain::{Axis, AxisError, ContourData, Direction, FieldError, Grid, GridError, GridField, NodeField};
pub use interpolation::{
    channel_profile, diffusive_profile, interpolate_2d, interpolate_channel, Bound, BoundarySide, FaceQuantity, FaceStencil,
    FaceValue, FlowDirection, InterpError, LinearExpr, Scheme,
};
pub use linalg::FaceOperator;
