//! Orchestration of collection requests against a session: adding the current sampling position,
//! removing points, and reacting to the sampling frame moving while in automatic mode.
//!
//! Every request either completes or fails before the output is touched, so a failed request
//! never leaves the output partially modified.

use crate::common::dist;
use crate::errors::CollectError;
use crate::gate::admit;
use crate::sampler::compute_coordinates;
use crate::session::{CollectMode, CollectionSession};
use crate::sinks::{OutputNode, PointSink};
use crate::{Point3, Result};
use log::{debug, error, warn};

/// The result of a successful add request.
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// The point was appended at `index`. Points appended to a point set carry their label.
    Added {
        index: usize,
        point: Point3,
        label: Option<String>,
    },

    /// The point was closer than the minimum distance to the last point in the output and was
    /// not recorded.
    Rejected { point: Point3, distance: f64 },
}

/// What an automatic trigger did. Automatic triggers never return errors to the notification
/// source; failures are logged and reported here instead.
#[derive(Debug)]
pub enum AutoCollect {
    /// The session is in manual mode, so the change is ignored.
    Ignored,

    /// The session was missing its output or sampling frame and was switched to manual mode.
    FellBackToManual,

    Collected(AddOutcome),

    Failed(CollectError),
}

fn effective_minimum_distance(session: &CollectionSession) -> f64 {
    match session.collect_mode() {
        CollectMode::Automatic => session.minimum_distance_mm(),
        CollectMode::Manual => 0.0,
    }
}

/// Sample the current position of the session's sampling frame and append it to the output.
///
/// Manual requests are always recorded. In automatic mode the point is only recorded if it is at
/// least the session's minimum distance away from the last point currently in the output; a
/// point that is too close is reported as `AddOutcome::Rejected`, which is not an error. Points
/// appended to a point set are labeled with the label base followed by the label counter, which
/// then advances by one. Points appended to a mesh are not labeled.
///
/// # Arguments
///
/// * `session`: the session to collect for
///
/// returns: Result<AddOutcome, CollectError>
pub fn request_add_point(session: &mut CollectionSession) -> Result<AddOutcome> {
    let output = session.output().cloned().ok_or(CollectError::NoOutput)?;
    let sampling = session
        .sampling_frame()
        .cloned()
        .ok_or(CollectError::NoSamplingFrame)?;
    let anchor = session.anchor_frame().cloned();

    let point = compute_coordinates(Some(sampling.as_ref()), anchor.as_deref())?;
    let minimum = effective_minimum_distance(session);

    let outcome = match &output {
        OutputNode::PointSet(set) => {
            let mut set = set.try_borrow_mut().map_err(|_| CollectError::OutputBusy)?;
            match check_gate(&*set, &point, minimum) {
                Some(rejected) => rejected,
                None => {
                    let label = session.next_label();
                    session.advance_label_counter()?;
                    let index = set.append(point, &label);
                    AddOutcome::Added {
                        index,
                        point,
                        label: Some(label),
                    }
                }
            }
        }
        OutputNode::Mesh(mesh) => {
            let mut mesh = mesh.try_borrow_mut().map_err(|_| CollectError::OutputBusy)?;
            match check_gate(&*mesh, &point, minimum) {
                Some(rejected) => rejected,
                None => {
                    mesh.append(point);
                    AddOutcome::Added {
                        index: mesh.count() - 1,
                        point,
                        label: None,
                    }
                }
            }
        }
        OutputNode::Foreign(kind) => {
            error!("Could not recognize the type of output node ({kind}), no point added");
            return Err(CollectError::UnsupportedOutputKind(kind.clone()));
        }
    };

    match &outcome {
        AddOutcome::Added { index, label, .. } => {
            debug!("Added point {index} {label:?} at {point:?}")
        }
        AddOutcome::Rejected { distance, .. } => {
            debug!("Point {distance} from previous is within {minimum}, not added")
        }
    }

    Ok(outcome)
}

/// Apply the distance gate against the sink's current last point, returning the rejection if the
/// point should not be recorded.
fn check_gate(sink: &dyn PointSink, point: &Point3, minimum: f64) -> Option<AddOutcome> {
    let previous = sink.last_point();
    if admit(point, previous.as_ref(), minimum) {
        None
    } else {
        let distance = previous.map(|p| dist(point, &p)).unwrap_or_default();
        Some(AddOutcome::Rejected {
            point: *point,
            distance,
        })
    }
}

/// Remove the last point from the session's output. The label counter is not changed, so labels
/// are never reused.
pub fn request_remove_last_point(session: &mut CollectionSession) -> Result<()> {
    let output = session.output().ok_or(CollectError::NoOutput)?;
    output.with_sink(|s| s.remove_last())
}

/// Remove all points from the session's output. The label counter is not reset.
pub fn request_remove_all_points(session: &mut CollectionSession) -> Result<()> {
    let output = session.output().ok_or(CollectError::NoOutput)?;
    output.with_sink(|s| s.remove_all())
}

/// React to the session's sampling frame having moved. In manual mode nothing happens. In
/// automatic mode a session without an output or a sampling frame is switched back to manual,
/// otherwise this behaves like `request_add_point`.
pub fn on_sampling_frame_changed(session: &mut CollectionSession) -> AutoCollect {
    if session.collect_mode() != CollectMode::Automatic {
        return AutoCollect::Ignored;
    }

    if session.output().is_none() || session.sampling_frame().is_none() {
        warn!("Collection is not fully set up, setting to manual collection");
        session.set_collect_mode(CollectMode::Manual);
        return AutoCollect::FellBackToManual;
    }

    match request_add_point(session) {
        Ok(outcome) => AutoCollect::Collected(outcome),
        Err(e) => {
            error!("Automatic collection failed: {e}");
            AutoCollect::Failed(e)
        }
    }
}

/// The number of points in the session's output, or zero if there is no output or it can't be
/// read.
pub fn number_of_points_in_output(session: &CollectionSession) -> usize {
    match session.output().map(|o| o.count()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            warn!("{e}, returning 0");
            0
        }
        None => 0,
    }
}
