use super::{Bound, BoundarySide, FaceQuantity, FaceStencil, FaceValue, InterpError, Scheme};
use crate::domain::axis::Axis;

use rayon::prelude::*;
use tracing::trace;

/// Determine how the value (or slope) at face `face_id` is computed for a diffusive term
///
/// Only [Scheme::Central] is supported. Without bulk flow there is no upstream direction, so "upstream" and "downstream" here only
/// name the lower and upper neighbor of the face.
///
/// * `extrapolate`: whether the first and last faces are extrapolated from the interior (`true`) or take a supplied boundary value (`false`)
///
/// Interior faces use nodes `f - 1` and `f`. An extrapolated first face uses nodes 2 and 1; an extrapolated last face uses nodes `F - 1` and `F - 2`.
pub fn diffusive_stencil(
    axis: &Axis,
    face_id: usize,
    extrapolate: [bool; 2],
    scheme: Scheme,
    quantity: FaceQuantity,
) -> Result<FaceStencil, InterpError> {
    if scheme != Scheme::Central {
        return Err(InterpError::UnsupportedScheme {
            scheme,
            context: "diffusive interpolation (no bulk flow)",
        });
    }
    axis.check_face(face_id)?;

    let (upstream, downstream) = if face_id == axis.first_face() {
        if !extrapolate[0] {
            return Ok(FaceStencil::Boundary(BoundarySide::Lo));
        }
        (face_id + 1, face_id)
    } else if face_id == axis.last_face() {
        if !extrapolate[1] {
            return Ok(FaceStencil::Boundary(BoundarySide::Hi));
        }
        (face_id - 1, face_id - 2)
    } else {
        (face_id - 1, face_id)
    };

    if axis.check_node(upstream).is_err() || axis.check_node(downstream).is_err() {
        return Err(InterpError::TooFewNodes {
            face_id,
            num_nodes: axis.num_nodes(),
        });
    }

    let (z_up, z_down) = (axis.node(upstream)?, axis.node(downstream)?);
    let stencil = match quantity {
        FaceQuantity::Value => {
            FaceStencil::linear(upstream, downstream, [z_up, z_down, axis.face(face_id)?])
        }
        FaceQuantity::Derivative => FaceStencil::slope(upstream, downstream, [z_up, z_down]),
    };

    trace!(face_id, ?quantity, %stencil, "diffusive face stencil");
    Ok(stencil)
}

/// Interpolate a value or slope at face `face_id` for a diffusive term (see [diffusive_stencil])
///
/// * `phi`: the quantity at each node (1-based node index)
/// * `bound_lo` and `bound_hi`: conditions at the first and last faces. A [Bound::Value] is returned unchanged at its face in both
/// [FaceQuantity::Value] and [FaceQuantity::Derivative] mode (where it stands for the face slope, e.g. `0.0` for a no-flux wall).
pub fn interpolate_2d<T, F>(
    axis: &Axis,
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
    let extrapolate = [bound_lo.is_extrapolate(), bound_hi.is_extrapolate()];
    let stencil = diffusive_stencil(axis, face_id, extrapolate, scheme, quantity)?;
    stencil.apply(phi, bound_lo.into_value(), bound_hi.into_value())
}

/// Interpolate a value or slope at every face of an Axis (in parallel using the Rayon Global ThreadPool)
pub fn diffusive_profile<T, F>(
    axis: &Axis,
    phi: F,
    bound_lo: Bound<T>,
    bound_hi: Bound<T>,
    quantity: FaceQuantity,
) -> Result<Vec<T>, InterpError>
where
    T: FaceValue + Send + Sync,
    F: Fn(usize) -> T + Sync,
{
    axis.face_ids()
        .into_par_iter()
        .map(|face_id| {
            interpolate_2d(
                axis,
                face_id,
                &phi,
                bound_lo.clone(),
                bound_hi.clone(),
                Scheme::Central,
                quantity,
            )
        })
        .collect()
}
