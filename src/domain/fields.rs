use super::{
    axis::{Axis, AxisError},
    grid::{Direction, Grid},
};
use crate::interpolation::{
    channel_profile, diffusive_profile, Bound, FaceQuantity, FlowDirection, InterpError, Scheme,
};

use nalgebra::{DMatrix, DVector};
use thiserror::Error;

#[cfg(feature = "json_export")]
use json::{object, JsonValue};
#[cfg(feature = "json_export")]
use std::{fs::File, io::BufWriter};

/// A named quantity sampled at every node of an [Axis]
///
/// Nodes are addressed with the same 1-based indices as the Axis.
#[derive(Clone, Debug)]
pub struct NodeField<'a> {
    name: String,
    values: Vec<f64>,
    axis: &'a Axis,
}

impl<'a> NodeField<'a> {
    /// Wrap a list of node values
    ///
    /// * `axis`: must outlive this Structure. `values` must have exactly one entry per node
    pub fn new(name: impl AsRef<str>, axis: &'a Axis, values: Vec<f64>) -> Result<Self, FieldError> {
        if values.len() != axis.num_nodes() {
            return Err(FieldError::LengthMismatch {
                name: name.as_ref().to_string(),
                expected: axis.num_nodes(),
                found: values.len(),
            });
        }

        Ok(Self {
            name: name.as_ref().to_string(),
            values,
            axis,
        })
    }

    /// Sample a function of the node coordinate
    pub fn from_fn<F: Fn(f64) -> f64>(name: impl AsRef<str>, axis: &'a Axis, f: F) -> Self {
        Self {
            name: name.as_ref().to_string(),
            values: axis.nodes().iter().map(|z| f(*z)).collect(),
            axis,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn axis(&self) -> &Axis {
        self.axis
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at node `node_id` (1-based)
    pub fn at(&self, node_id: usize) -> Result<f64, AxisError> {
        self.axis.check_node(node_id)?;
        Ok(self.values[node_id - 1])
    }

    /// A node accessor suitable for the interpolation routines
    ///
    /// Panics if it is called with a node id outside of the Axis (the interpolation routines never do so).
    pub fn accessor(&self) -> impl Fn(usize) -> f64 + Sync + '_ {
        move |node_id| self.values[node_id - 1]
    }

    pub fn to_vector(&self) -> DVector<f64> {
        DVector::from_column_slice(&self.values)
    }

    /// Values at every face of a flow channel (see [channel_profile])
    pub fn face_profile(
        &self,
        inlet: f64,
        scheme: Scheme,
        flow: FlowDirection,
    ) -> Result<Vec<f64>, InterpError> {
        channel_profile(self.axis, self.accessor(), inlet, scheme, flow)
    }

    /// Values (or slopes) at every face for a diffusive term (see [diffusive_profile])
    pub fn diffusive_faces(
        &self,
        bound_lo: Bound<f64>,
        bound_hi: Bound<f64>,
        quantity: FaceQuantity,
    ) -> Result<Vec<f64>, InterpError> {
        diffusive_profile(self.axis, self.accessor(), bound_lo, bound_hi, quantity)
    }
}

/// A named quantity sampled at every node of a [Grid]
///
/// Values are stored with `x` varying fastest. Nodes are addressed as 1-based `(ix, iz)` pairs.
#[derive(Clone, Debug)]
pub struct GridField<'g> {
    name: String,
    values: Vec<f64>,
    grid: &'g Grid,
}

/// Tabulated field data for contour plots
///
/// `values` has one row per z node and one column per x node; `x` and `z` hold the matching node coordinates
/// (scaled to physical lengths) in the same layout.
#[derive(Clone, Debug, PartialEq)]
pub struct ContourData {
    pub x: DMatrix<f64>,
    pub z: DMatrix<f64>,
    pub values: DMatrix<f64>,
}

impl<'g> GridField<'g> {
    pub fn new(name: impl AsRef<str>, grid: &'g Grid, values: Vec<f64>) -> Result<Self, FieldError> {
        let expected = grid.x.num_nodes() * grid.z.num_nodes();
        if values.len() != expected {
            return Err(FieldError::LengthMismatch {
                name: name.as_ref().to_string(),
                expected,
                found: values.len(),
            });
        }

        Ok(Self {
            name: name.as_ref().to_string(),
            values,
            grid,
        })
    }

    /// Sample a function of the node indices `(ix, iz)`
    pub fn from_fn<F: Fn(usize, usize) -> f64>(name: impl AsRef<str>, grid: &'g Grid, f: F) -> Self {
        let values = grid
            .z
            .node_ids()
            .flat_map(|iz| grid.x.node_ids().map(move |ix| (ix, iz)))
            .map(|(ix, iz)| f(ix, iz))
            .collect();

        Self {
            name: name.as_ref().to_string(),
            values,
            grid,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grid(&self) -> &Grid {
        self.grid
    }

    fn index(&self, ix: usize, iz: usize) -> Result<usize, AxisError> {
        self.grid.x.check_node(ix)?;
        self.grid.z.check_node(iz)?;
        Ok((iz - 1) * self.grid.x.num_nodes() + (ix - 1))
    }

    pub fn at(&self, ix: usize, iz: usize) -> Result<f64, AxisError> {
        Ok(self.values[self.index(ix, iz)?])
    }

    /// Values along one line of the grid
    ///
    /// * `direction`: the direction the line runs in
    /// * `fixed`: the node index in the other direction
    pub fn line(&self, direction: Direction, fixed: usize) -> Result<Vec<f64>, AxisError> {
        match direction {
            Direction::X => self.grid.x.node_ids().map(|ix| self.at(ix, fixed)).collect(),
            Direction::Z => self.grid.z.node_ids().map(|iz| self.at(fixed, iz)).collect(),
        }
    }

    /// Value (or slope) at a face along one line of the grid (see [Grid::interpolate])
    ///
    /// The face is `face_id` in `direction`; `fixed` selects the line in the other direction.
    #[allow(clippy::too_many_arguments)]
    pub fn face_value(
        &self,
        direction: Direction,
        face_id: usize,
        fixed: usize,
        bound_lo: Bound<f64>,
        bound_hi: Bound<f64>,
        scheme: Scheme,
        quantity: FaceQuantity,
    ) -> Result<f64, InterpError> {
        let line = self.line(direction, fixed)?;
        self.grid.interpolate(
            direction,
            face_id,
            |node_id| line[node_id - 1],
            bound_lo,
            bound_hi,
            scheme,
            quantity,
        )
    }

    pub fn contour_data(&self) -> ContourData {
        let (nx, nz) = (self.grid.x.num_nodes(), self.grid.z.num_nodes());
        let (lx, lz) = (self.grid.length_x(), self.grid.length_z());
        let (x_nodes, z_nodes) = (self.grid.x.nodes(), self.grid.z.nodes());

        ContourData {
            x: DMatrix::from_fn(nz, nx, |_, c| x_nodes[c] * lx),
            z: DMatrix::from_fn(nz, nx, |r, _| z_nodes[r] * lz),
            values: DMatrix::from_row_slice(nz, nx, &self.values),
        }
    }

    /// Print the contour data to a JSON file specified by path.
    #[cfg(feature = "json_export")]
    pub fn export_to_json(&self, path: impl AsRef<str>) -> std::io::Result<()> {
        let f = File::create(path.as_ref())?;
        let mut w = BufWriter::new(&f);

        let contour = self.contour_data();
        let field_object = object! {
            "name": self.name.as_str(),
            "grid": self.grid.to_json(),
            "x": matrix_rows(&contour.x),
            "z": matrix_rows(&contour.z),
            "values": matrix_rows(&contour.values),
        };

        field_object.write_pretty(&mut w, 4)?;

        Ok(())
    }
}

#[cfg(feature = "json_export")]
fn matrix_rows(m: &DMatrix<f64>) -> JsonValue {
    JsonValue::from(
        m.row_iter()
            .map(|row| row.iter().copied().collect::<Vec<f64>>())
            .collect::<Vec<_>>(),
    )
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("Field '{name}' needs {expected} values (got {found}); Cannot build Field!")]
    LengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error(transparent)]
    Axis(#[from] AxisError),
}
