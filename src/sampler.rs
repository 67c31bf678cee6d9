//! Resolves the coordinates of the point to record from the sampling frame and, optionally, an
//! anchor frame whose coordinate system the point is expressed in.

use crate::common::translation_of;
use crate::errors::CollectError;
use crate::frames::Frame;
use crate::{Point3, Result};

/// Compute the position of the sampling frame's origin. Without an anchor the position is in
/// world coordinates, with an anchor it is expressed in the anchor's coordinate system. This
/// reads the current poses of the frames and has no side effects.
///
/// # Arguments
///
/// * `sampling`: the frame whose position is recorded, required
/// * `anchor`: an optional frame to express the position relative to
///
/// returns: Result<OPoint<f64, Const<3>>, CollectError>
///
/// # Examples
///
/// ```
/// use pointcollect::{Iso3, Point3, TransformFrame};
/// use pointcollect::sampler::compute_coordinates;
///
/// let stylus = TransformFrame::new("stylus", Iso3::translation(3.0, 4.0, 5.0));
/// let anchor = TransformFrame::new("anchor", Iso3::translation(1.0, 1.0, 1.0));
/// let p = compute_coordinates(Some(&stylus), Some(&anchor)).unwrap();
/// assert!((p - Point3::new(2.0, 3.0, 4.0)).norm() < 1e-12);
/// ```
pub fn compute_coordinates(
    sampling: Option<&dyn Frame>,
    anchor: Option<&dyn Frame>,
) -> Result<Point3> {
    let sampling = sampling.ok_or(CollectError::MissingFrame)?;
    let m = match anchor {
        Some(anchor) => sampling.pose_relative_to(anchor),
        None => sampling.pose_to_world(),
    };

    Ok(translation_of(&m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::TransformFrame;
    use crate::{Iso3, Vector3};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn missing_sampling_frame_fails() {
        let anchor = TransformFrame::new("anchor", Iso3::identity());
        let result = compute_coordinates(None, Some(&anchor));
        assert!(matches!(result, Err(CollectError::MissingFrame)));
    }

    #[test]
    fn world_coordinates_without_anchor() {
        let stylus = TransformFrame::new(
            "stylus",
            Iso3::new(Vector3::new(-1.0, 2.5, 7.0), Vector3::x() * PI / 3.0),
        );
        let p = compute_coordinates(Some(&stylus), None).unwrap();
        assert_relative_eq!(p, Point3::new(-1.0, 2.5, 7.0), epsilon = 1e-12);
    }

    #[test]
    fn anchor_rotation_is_applied() {
        let anchor = TransformFrame::new("anchor", Iso3::new(Vector3::zeros(), Vector3::z() * PI));
        let stylus = TransformFrame::new("stylus", Iso3::translation(1.0, 2.0, 3.0));
        let p = compute_coordinates(Some(&stylus), Some(&anchor)).unwrap();
        assert_relative_eq!(p, Point3::new(-1.0, -2.0, 3.0), epsilon = 1e-12);
    }
}
