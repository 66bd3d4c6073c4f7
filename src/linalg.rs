/// Sparsely Packed Matrix
pub mod sparse_matrix;

use crate::domain::axis::{Axis, AxisError};
use crate::interpolation::{
    channel_stencil, diffusive_stencil, BoundarySide, FaceQuantity, FaceStencil, FlowDirection, InterpError, Scheme,
};

use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;
use smallvec::SmallVec;
use sparse_matrix::SparseMatrix;
use tracing::debug;

/// The face interpolation over an entire Axis, expressed as a linear map from node values to face values
///
/// `face_values = M * node_values`, except on boundary faces, which take the value supplied for their side of the Axis.
#[derive(Clone, Debug)]
pub struct FaceOperator {
    /// Faces x Nodes interpolation weights (0-based rows and columns)
    pub matrix: SparseMatrix,
    /// Faces which take their value from a boundary condition (1-based face ids)
    boundary_faces: SmallVec<[(usize, BoundarySide); 2]>,
}

impl FaceOperator {
    // stencils arrive in face order (rayon's indexed collect preserves it)
    fn assemble(axis: &Axis, stencils: Vec<(usize, FaceStencil)>) -> Self {
        let mut operator = Self {
            matrix: SparseMatrix::new(axis.num_faces(), axis.num_nodes()),
            boundary_faces: SmallVec::new(),
        };

        for (face_id, stencil) in stencils {
            operator.insert_stencil(face_id, stencil);
        }
        operator
    }

    /// Build the operator for advective interpolation along a flow channel (see [channel_stencil](crate::interpolation::channel_stencil))
    ///
    /// Face stencils are computed in parallel using the Rayon Global ThreadPool
    pub fn channel(axis: &Axis, scheme: Scheme, flow: FlowDirection) -> Result<Self, InterpError> {
        let stencils = axis
            .face_ids()
            .into_par_iter()
            .map(|face_id| channel_stencil(axis, face_id, scheme, flow).map(|stencil| (face_id, stencil)))
            .collect::<Result<Vec<_>, InterpError>>()?;

        let operator = Self::assemble(axis, stencils);

        debug!(
            num_faces = axis.num_faces(),
            num_entries = operator.matrix.num_entries(),
            %scheme,
            %flow,
            "assembled channel face operator"
        );
        Ok(operator)
    }

    /// Build the operator for diffusive interpolation of face values or slopes (see [diffusive_stencil](crate::interpolation::diffusive_stencil))
    ///
    /// * `extrapolate`: whether the first and last faces are extrapolated from the interior or supplied at evaluation time
    pub fn diffusive(axis: &Axis, extrapolate: [bool; 2], quantity: FaceQuantity) -> Result<Self, InterpError> {
        let stencils = axis
            .face_ids()
            .into_par_iter()
            .map(|face_id| {
                diffusive_stencil(axis, face_id, extrapolate, Scheme::Central, quantity)
                    .map(|stencil| (face_id, stencil))
            })
            .collect::<Result<Vec<_>, InterpError>>()?;

        let operator = Self::assemble(axis, stencils);

        debug!(
            num_faces = axis.num_faces(),
            num_entries = operator.matrix.num_entries(),
            ?quantity,
            "assembled diffusive face operator"
        );
        Ok(operator)
    }

    pub fn num_faces(&self) -> usize {
        self.matrix.rows
    }

    pub fn num_nodes(&self) -> usize {
        self.matrix.cols
    }

    /// Weight of a node in the value at a face (1-based ids)
    pub fn weight(&self, face_id: usize, node_id: usize) -> Result<f64, AxisError> {
        if face_id < 1 || face_id > self.num_faces() {
            return Err(AxisError::FaceOutOfRange(face_id, self.num_faces()));
        }
        if node_id < 1 || node_id > self.num_nodes() {
            return Err(AxisError::NodeOutOfRange(node_id, self.num_nodes()));
        }
        Ok(self.matrix.get([face_id - 1, node_id - 1]))
    }

    /// Faces (1-based) whose values are supplied by a boundary condition
    pub fn boundary_faces(&self) -> &[(usize, BoundarySide)] {
        &self.boundary_faces
    }

    /// Compute the value at every face
    ///
    /// * `nodes`: the value at every node
    /// * `lo` and `hi`: values for the boundary faces on the first and last face. Only the sides used by the operator are required
    pub fn apply(&self, nodes: &DVector<f64>, lo: Option<f64>, hi: Option<f64>) -> Result<DVector<f64>, InterpError> {
        if nodes.len() != self.num_nodes() {
            return Err(InterpError::DimensionMismatch {
                expected: self.num_nodes(),
                found: nodes.len(),
            });
        }

        let mut faces = DVector::from_vec(self.matrix.mul_vec(nodes.as_slice()));
        for &(face_id, side) in self.boundary_faces.iter() {
            faces[face_id - 1] = match side {
                BoundarySide::Lo => lo,
                BoundarySide::Hi => hi,
            }
            .ok_or(InterpError::MissingBoundary(side))?;
        }

        Ok(faces)
    }

    /// Dense Faces x Nodes matrix of interpolation weights (boundary face rows are zero)
    pub fn to_dense(&self) -> DMatrix<f64> {
        (&self.matrix).into()
    }

    fn insert_stencil(&mut self, face_id: usize, stencil: FaceStencil) {
        if let Some(side) = stencil.boundary_side() {
            self.boundary_faces.push((face_id, side));
        }

        let entries = stencil
            .node_weights()
            .iter()
            .map(|&(node_id, w)| ([face_id - 1, node_id - 1], w))
            .collect();
        self.matrix.insert_group(entries);
    }
}
