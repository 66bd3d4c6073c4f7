use super::{FaceStencil, FaceValue, FlowDirection, InterpError, Scheme};
use crate::domain::axis::Axis;

use rayon::prelude::*;
use tracing::trace;

/// Determine how face `face_id` of a flow channel is computed
///
/// Face `f` lies between node `f - 1` and node `f`. Which of the two is upstream depends on `flow`.
///
/// * The inlet face (first face for forward flow, last face for reverse flow) is always a boundary face
/// * [Scheme::Upwind]: the upstream node
/// * [Scheme::Central]: linear interpolation between the upstream and downstream nodes. The outlet face has no downstream node, so the
/// node two positions upstream stands in for it and the value is extrapolated. A single node Axis has nothing to extrapolate from, so
/// its outlet face returns [InterpError::TooFewNodes]
/// * [Scheme::QuadraticUpwind]: not supported; returns an error for every face
pub fn channel_stencil(
    axis: &Axis,
    face_id: usize,
    scheme: Scheme,
    flow: FlowDirection,
) -> Result<FaceStencil, InterpError> {
    if scheme == Scheme::QuadraticUpwind {
        return Err(InterpError::UnsupportedScheme {
            scheme,
            context: "channel interpolation",
        });
    }
    axis.check_face(face_id)?;

    let (inlet, outlet) = match flow {
        FlowDirection::Forward => (axis.first_face(), axis.last_face()),
        FlowDirection::Reverse => (axis.last_face(), axis.first_face()),
    };

    if face_id == inlet {
        return Ok(FaceStencil::Boundary(flow.inlet_side()));
    }

    // face_id is not the inlet, so the upstream node always exists
    let upstream = match flow {
        FlowDirection::Forward => face_id - 1,
        FlowDirection::Reverse => face_id,
    };

    let stencil = if scheme == Scheme::Upwind {
        FaceStencil::Upstream(upstream)
    } else {
        let downstream = if face_id == outlet {
            match flow {
                FlowDirection::Forward => upstream.checked_sub(1).filter(|&d| d >= 1),
                FlowDirection::Reverse => Some(upstream + 1).filter(|&d| d <= axis.last_node()),
            }
        } else {
            match flow {
                FlowDirection::Forward => Some(face_id),
                FlowDirection::Reverse => Some(face_id - 1),
            }
        };

        let downstream = downstream.ok_or(InterpError::TooFewNodes {
            face_id,
            num_nodes: axis.num_nodes(),
        })?;

        FaceStencil::linear(
            upstream,
            downstream,
            [
                axis.node(upstream)?,
                axis.node(downstream)?,
                axis.face(face_id)?,
            ],
        )
    };

    trace!(face_id, %scheme, %flow, %stencil, "channel face stencil");
    Ok(stencil)
}

/// Interpolate a quantity at face `face_id` of a flow channel (see [channel_stencil])
///
/// * `phi`: the quantity at each node (1-based node index)
/// * `phi_inlet`: the quantity at the channel inlet face; returned unchanged at that face
pub fn interpolate_channel<T, F>(
    axis: &Axis,
    face_id: usize,
    phi: F,
    phi_inlet: T,
    scheme: Scheme,
    flow: FlowDirection,
) -> Result<T, InterpError>
where
    T: FaceValue,
    F: Fn(usize) -> T,
{
    let stencil = channel_stencil(axis, face_id, scheme, flow)?;
    match flow {
        FlowDirection::Forward => stencil.apply(phi, Some(phi_inlet), None),
        FlowDirection::Reverse => stencil.apply(phi, None, Some(phi_inlet)),
    }
}

/// Interpolate a quantity at every face of a flow channel (in parallel using the Rayon Global ThreadPool)
///
/// The returned values are in face order
pub fn channel_profile<T, F>(
    axis: &Axis,
    phi: F,
    phi_inlet: T,
    scheme: Scheme,
    flow: FlowDirection,
) -> Result<Vec<T>, InterpError>
where
    T: FaceValue + Send + Sync,
    F: Fn(usize) -> T + Sync,
{
    axis.face_ids()
        .into_par_iter()
        .map(|face_id| interpolate_channel(axis, face_id, &phi, phi_inlet.clone(), scheme, flow))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation::{BoundarySide, LinearExpr};
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    fn quarter_axis() -> Axis {
        Axis::new(vec![0.0, 0.25, 0.5, 0.75, 1.0]).unwrap()
    }

    fn phi(node_id: usize) -> f64 {
        [10.0, 20.0, 30.0, 40.0][node_id - 1]
    }

    #[test]
    fn upwind_inlet_returns_inlet_value() {
        let axis = quarter_axis();
        for scheme in [Scheme::Upwind, Scheme::Central] {
            let value = interpolate_channel(&axis, 1, phi, 5.0, scheme, FlowDirection::Forward).unwrap();
            assert_eq!(value, 5.0);
        }
    }

    #[test]
    fn upwind_takes_upstream_node() {
        let axis = Axis::new(vec![0.0, 0.3, 1.0]).unwrap();
        let phi = |node_id: usize| [1.5, -7.25][node_id - 1];

        assert_eq!(
            interpolate_channel(&axis, 2, phi, 0.0, Scheme::Upwind, FlowDirection::Forward),
            Ok(1.5)
        );
        assert_eq!(
            interpolate_channel(&axis, 3, phi, 0.0, Scheme::Upwind, FlowDirection::Forward),
            Ok(-7.25)
        );
    }

    #[test]
    fn upwind_reverse_flow() {
        let axis = quarter_axis();
        let flow = FlowDirection::Reverse;

        assert_eq!(interpolate_channel(&axis, 5, phi, 5.0, Scheme::Upwind, flow), Ok(5.0));
        assert_eq!(interpolate_channel(&axis, 4, phi, 5.0, Scheme::Upwind, flow), Ok(40.0));
        assert_eq!(interpolate_channel(&axis, 1, phi, 5.0, Scheme::Upwind, flow), Ok(10.0));
    }

    #[test]
    fn central_interior_face() {
        // face 3 sits at 0.5, between nodes 2 (0.375) and 3 (0.625)
        let axis = quarter_axis();
        let value = interpolate_channel(&axis, 3, phi, 5.0, Scheme::Central, FlowDirection::Forward).unwrap();
        assert_relative_eq!(value, 25.0);
    }

    #[test]
    fn central_is_convex_in_the_interior() {
        let axis = Axis::new(vec![0.0, 0.1, 0.15, 0.5, 0.8, 1.0]).unwrap();
        let phi = |node_id: usize| [3.0, -1.0, 8.0, 2.5, 6.0][node_id - 1];

        for flow in [FlowDirection::Forward, FlowDirection::Reverse] {
            for face_id in 2..axis.last_face() {
                match channel_stencil(&axis, face_id, Scheme::Central, flow).unwrap() {
                    FaceStencil::Linear {
                        upstream,
                        downstream,
                        weight,
                    } => {
                        assert!((0.0..=1.0).contains(&weight));
                        let value = interpolate_channel(&axis, face_id, phi, 0.0, Scheme::Central, flow).unwrap();
                        let (lo, hi) = (phi(upstream).min(phi(downstream)), phi(upstream).max(phi(downstream)));
                        assert!(value >= lo - 1e-12 && value <= hi + 1e-12);
                    }
                    other => panic!("interior face {} gave {:?}", face_id, other),
                }
            }
        }
    }

    #[test]
    fn central_outlet_extrapolates_linearly() {
        let axis = quarter_axis();

        // forward: outlet at z = 1.0, from nodes 3 (0.625) and 4 (0.875)
        let forward = interpolate_channel(&axis, 5, phi, 0.0, Scheme::Central, FlowDirection::Forward).unwrap();
        assert_relative_eq!(forward, 45.0, epsilon = 1e-12);

        // reverse: outlet at z = 0.0, from nodes 1 (0.125) and 2 (0.375)
        let reverse = interpolate_channel(&axis, 1, phi, 0.0, Scheme::Central, FlowDirection::Reverse).unwrap();
        assert_relative_eq!(reverse, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn single_node_channel() {
        let axis = Axis::uniform(1).unwrap();
        let phi = |_: usize| 7.0;

        assert_eq!(
            channel_stencil(&axis, 1, Scheme::Central, FlowDirection::Forward),
            Ok(FaceStencil::Boundary(BoundarySide::Lo))
        );
        assert_eq!(
            interpolate_channel(&axis, 2, phi, 1.0, Scheme::Central, FlowDirection::Forward),
            Err(InterpError::TooFewNodes {
                face_id: 2,
                num_nodes: 1
            })
        );
        assert_eq!(
            interpolate_channel(&axis, 1, phi, 1.0, Scheme::Central, FlowDirection::Reverse),
            Err(InterpError::TooFewNodes {
                face_id: 1,
                num_nodes: 1
            })
        );
        // upwind needs only the upstream node
        assert_eq!(
            interpolate_channel(&axis, 2, phi, 1.0, Scheme::Upwind, FlowDirection::Forward),
            Ok(7.0)
        );
    }

    #[test]
    fn quadratic_upwind_is_rejected() {
        let axis = quarter_axis();
        for face_id in axis.face_ids() {
            let err = interpolate_channel(&axis, face_id, phi, 5.0, Scheme::QuadraticUpwind, FlowDirection::Forward)
                .unwrap_err();
            assert_eq!(
                err,
                InterpError::UnsupportedScheme {
                    scheme: Scheme::QuadraticUpwind,
                    context: "channel interpolation",
                }
            );
        }
    }

    #[test]
    fn face_out_of_range() {
        let axis = quarter_axis();
        for face_id in [0, 6] {
            assert!(matches!(
                interpolate_channel(&axis, face_id, phi, 5.0, Scheme::Upwind, FlowDirection::Forward),
                Err(InterpError::Axis(_))
            ));
        }
    }

    #[test]
    fn expression_values() {
        let axis = Axis::new(vec![0.0, 0.2, 0.7, 1.0]).unwrap();
        let values = [2.0, 4.0, -3.0];
        let numeric = |node_id: usize| values[node_id - 1];
        let symbolic = |node_id: usize| LinearExpr::var(node_id);
        let state = nalgebra::DVector::from_column_slice(&values);

        for face_id in axis.face_ids() {
            let expected = interpolate_channel(&axis, face_id, numeric, 1.0, Scheme::Central, FlowDirection::Forward).unwrap();
            let expr = interpolate_channel(
                &axis,
                face_id,
                symbolic,
                LinearExpr::constant(1.0),
                Scheme::Central,
                FlowDirection::Forward,
            )
            .unwrap();
            assert_relative_eq!(expr.eval_nodes(&state).unwrap(), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn complex_values() {
        let axis = quarter_axis();
        let phi = |node_id: usize| Complex64::new(10.0 * node_id as f64, -(node_id as f64));
        let value = interpolate_channel(&axis, 3, phi, Complex64::new(0.0, 0.0), Scheme::Central, FlowDirection::Forward)
            .unwrap();

        assert_relative_eq!(value.re, 25.0);
        assert_relative_eq!(value.im, -2.5);
    }

    #[test]
    fn parallel_profile_matches_serial() {
        let axis = Axis::uniform(40).unwrap();
        let phi = |node_id: usize| (node_id as f64 * 0.3).sin();

        let profile = channel_profile(&axis, phi, 0.25, Scheme::Central, FlowDirection::Reverse).unwrap();
        assert_eq!(profile.len(), axis.num_faces());
        for face_id in axis.face_ids() {
            let serial = interpolate_channel(&axis, face_id, phi, 0.25, Scheme::Central, FlowDirection::Reverse).unwrap();
            assert_eq!(profile[face_id - 1], serial);
        }
        assert_eq!(profile[axis.last_face() - 1], 0.25);
    }
}
