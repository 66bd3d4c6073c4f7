use std::fmt;
use thiserror::Error;
use tracing::debug;

#[cfg(feature = "json_export")]
use json::{object, JsonValue};

/// Minimum distance between two adjacent faces. Axes with thinner cells are rejected.
pub const MIN_CELL_WIDTH: f64 = 1e-12;

/// Ordered set of control-volume faces over the unit interval, along with the node centers between them.
///
/// Faces and nodes are addressed with 1-based indices:
/// * faces: `1..=F`, with `face(1) == 0.0` and `face(F) == 1.0`
/// * nodes: `1..=F-1`, with `node(i)` halfway between `face(i)` and `face(i + 1)`
///
/// ```text
///   face:  1       2       3       4
///          |---*---|---*---|---*---|
///   node:      1       2       3
///          0.0                    1.0
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    faces: Vec<f64>,
    nodes: Vec<f64>,
}

impl Axis {
    /// Construct an Axis from a list of face coordinates
    ///
    /// Returns an error if there are fewer than two faces, if the first and last faces are not `0.0` and `1.0`, or if the coordinates are not strictly increasing
    pub fn new(faces: Vec<f64>) -> Result<Self, AxisError> {
        if faces.len() < 2 {
            return Err(AxisError::TooFewFaces(faces.len()));
        }

        let (first, last) = (faces[0], faces[faces.len() - 1]);
        if first != 0.0 || last != 1.0 {
            return Err(AxisError::BadEndpoints(first, last));
        }

        if let Some(position) = faces
            .windows(2)
            .position(|pair| !(pair[1] - pair[0] >= MIN_CELL_WIDTH))
        {
            return Err(AxisError::NotIncreasing(position + 2));
        }

        let nodes = faces
            .windows(2)
            .map(|pair| (pair[0] + pair[1]) / 2.0)
            .collect::<Vec<_>>();

        debug!(num_faces = faces.len(), num_nodes = nodes.len(), "built axis");

        Ok(Self { faces, nodes })
    }

    /// Construct an Axis with `num_nodes` equally sized control volumes
    pub fn uniform(num_nodes: usize) -> Result<Self, AxisError> {
        if num_nodes == 0 {
            return Err(AxisError::TooFewFaces(1));
        }

        let mut faces: Vec<f64> = (0..=num_nodes)
            .map(|i| i as f64 / num_nodes as f64)
            .collect();
        // avoid round-off on the last face
        faces[num_nodes] = 1.0;

        Self::new(faces)
    }

    /// The same Axis viewed from the opposite end (`z -> 1 - z`)
    ///
    /// Face `i` of the mirrored Axis corresponds to face `F + 1 - i` of this one (and likewise for nodes)
    pub fn mirrored(&self) -> Self {
        let faces = self.faces.iter().rev().map(|z| 1.0 - z).collect();
        let nodes = self.nodes.iter().rev().map(|z| 1.0 - z).collect();
        Self { faces, nodes }
    }

    // ----------------------------------------------------------------------------------------------------
    // Index Queries
    // ----------------------------------------------------------------------------------------------------

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn first_face(&self) -> usize {
        1
    }

    pub fn last_face(&self) -> usize {
        self.faces.len()
    }

    pub fn first_node(&self) -> usize {
        1
    }

    pub fn last_node(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over all face indices
    pub fn face_ids(&self) -> std::ops::RangeInclusive<usize> {
        self.first_face()..=self.last_face()
    }

    /// Iterate over all node indices
    pub fn node_ids(&self) -> std::ops::RangeInclusive<usize> {
        self.first_node()..=self.last_node()
    }

    // ----------------------------------------------------------------------------------------------------
    // Coordinate Retrieval
    // ----------------------------------------------------------------------------------------------------

    /// Coordinate of a face by 1-based index
    pub fn face(&self, face_id: usize) -> Result<f64, AxisError> {
        self.check_face(face_id)?;
        Ok(self.faces[face_id - 1])
    }

    /// Coordinate of a node by 1-based index
    pub fn node(&self, node_id: usize) -> Result<f64, AxisError> {
        self.check_node(node_id)?;
        Ok(self.nodes[node_id - 1])
    }

    /// Width of the control volume centered on a node (distance between its two faces)
    pub fn width(&self, node_id: usize) -> Result<f64, AxisError> {
        self.check_node(node_id)?;
        Ok(self.faces[node_id] - self.faces[node_id - 1])
    }

    /// Widths of every control volume, in node order
    pub fn widths(&self) -> Vec<f64> {
        self.faces.windows(2).map(|pair| pair[1] - pair[0]).collect()
    }

    pub fn faces(&self) -> &[f64] {
        &self.faces
    }

    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    pub fn check_face(&self, face_id: usize) -> Result<(), AxisError> {
        if face_id < 1 || face_id > self.faces.len() {
            Err(AxisError::FaceOutOfRange(face_id, self.faces.len()))
        } else {
            Ok(())
        }
    }

    pub fn check_node(&self, node_id: usize) -> Result<(), AxisError> {
        if node_id < 1 || node_id > self.nodes.len() {
            Err(AxisError::NodeOutOfRange(node_id, self.nodes.len()))
        } else {
            Ok(())
        }
    }

    #[cfg(feature = "json_export")]
    pub fn to_json(&self) -> JsonValue {
        object! {
            "faces": self.faces.clone(),
            "nodes": self.nodes.clone(),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Axis ({} faces): [", self.faces.len())?;
        for (i, z) in self.faces.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.5}", z)?;
        }
        write!(f, "]")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AxisError {
    #[error("Axis needs at least 2 faces (got {0}); Cannot build Axis!")]
    TooFewFaces(usize),
    #[error("Axis must span [0, 1] (got [{0}, {1}]); Cannot build Axis!")]
    BadEndpoints(f64, f64),
    #[error("Face {0} is not strictly greater than the face before it; Cannot build Axis!")]
    NotIncreasing(usize),
    #[error("Face {0} does not exist (Axis has faces 1..={1})")]
    FaceOutOfRange(usize, usize),
    #[error("Node {0} does not exist (Axis has nodes 1..={1})")]
    NodeOutOfRange(usize, usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn quarter_axis_geometry() {
        let axis = Axis::new(vec![0.0, 0.25, 0.5, 0.75, 1.0]).unwrap();

        assert_eq!(axis.num_faces(), 5);
        assert_eq!(axis.num_nodes(), 4);
        assert_eq!(axis.last_face(), 5);
        assert_eq!(axis.last_node(), 4);

        for (node_id, expected) in axis.node_ids().zip([0.125, 0.375, 0.625, 0.875]) {
            assert_relative_eq!(axis.node(node_id).unwrap(), expected);
            assert_relative_eq!(axis.width(node_id).unwrap(), 0.25);
        }
        assert_eq!(axis.face(3).unwrap(), 0.5);
    }

    #[test]
    fn nodes_lie_between_faces() {
        let axis = Axis::new(vec![0.0, 0.05, 0.3, 0.31, 0.9, 1.0]).unwrap();
        for node_id in axis.node_ids() {
            let z = axis.node(node_id).unwrap();
            assert!(z > axis.face(node_id).unwrap());
            assert!(z < axis.face(node_id + 1).unwrap());
        }
        assert_relative_eq!(axis.widths().iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn uniform_axis() {
        let axis = Axis::uniform(8).unwrap();
        assert_eq!(axis.num_nodes(), 8);
        assert_eq!(axis.face(axis.last_face()).unwrap(), 1.0);
        assert_relative_eq!(axis.node(1).unwrap(), 1.0 / 16.0);
        assert!(Axis::uniform(0).is_err());
    }

    #[test]
    fn malformed_axes() {
        assert_eq!(Axis::new(vec![0.0]), Err(AxisError::TooFewFaces(1)));
        assert_eq!(
            Axis::new(vec![0.0, 0.6, 0.4, 1.0]),
            Err(AxisError::NotIncreasing(3))
        );
        assert_eq!(
            Axis::new(vec![0.0, 0.5, 0.5, 1.0]),
            Err(AxisError::NotIncreasing(3))
        );
        assert_eq!(
            Axis::new(vec![0.1, 0.5, 1.0]),
            Err(AxisError::BadEndpoints(0.1, 1.0))
        );
        assert!(Axis::new(vec![0.0, f64::NAN, 1.0]).is_err());
    }

    #[test]
    fn out_of_range_indices() {
        let axis = Axis::uniform(3).unwrap();
        assert_eq!(axis.face(0), Err(AxisError::FaceOutOfRange(0, 4)));
        assert_eq!(axis.face(5), Err(AxisError::FaceOutOfRange(5, 4)));
        assert_eq!(axis.node(4), Err(AxisError::NodeOutOfRange(4, 3)));
        assert!(axis.width(0).is_err());
    }

    #[test]
    fn mirrored_axis() {
        let axis = Axis::new(vec![0.0, 0.1, 0.4, 1.0]).unwrap();
        let mirror = axis.mirrored();

        assert_eq!(mirror.num_faces(), axis.num_faces());
        for face_id in axis.face_ids() {
            let mirrored_id = axis.last_face() + 1 - face_id;
            assert_relative_eq!(
                mirror.face(mirrored_id).unwrap(),
                1.0 - axis.face(face_id).unwrap(),
                epsilon = 1e-12
            );
        }
        assert_relative_eq!(mirror.node(1).unwrap(), 0.3, epsilon = 1e-12);

        let round_trip = mirror.mirrored();
        for (a, b) in round_trip.faces().iter().zip(axis.faces()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }
}
