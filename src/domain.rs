/// Ordered control-volume faces and node centers over the unit interval
pub mod axis;
/// Named quantities stored at the nodes of an Axis or Grid
pub mod fields;
/// Two dimensional arrangement of control volumes
pub mod grid;

pub use axis::{Axis, AxisError};
pub use fields::{ContourData, FieldError, GridField, NodeField};
pub use grid::{Direction, Grid, GridError};
