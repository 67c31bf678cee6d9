//! Minimum distance admission of a candidate point against the last recorded point.

use crate::Point3;
use crate::common::dist;

/// Decide whether `candidate` may be recorded. A minimum distance which is not positive, including
/// NaN, disables the check, as does the absence of a previous point. Otherwise the candidate is admitted when its
/// distance to `previous` is at least `minimum_distance_mm`, so a candidate exactly at the
/// minimum distance is admitted.
///
/// # Arguments
///
/// * `candidate`: the point about to be recorded
/// * `previous`: the last point currently stored in the sink, if the sink is not empty
/// * `minimum_distance_mm`: the minimum spacing between consecutive recorded points
///
/// returns: bool
///
/// # Examples
///
/// ```
/// use pointcollect::Point3;
/// use pointcollect::gate::admit;
/// let last = Point3::new(0.0, 0.0, 0.0);
/// assert!(!admit(&Point3::new(1.0, 0.0, 0.0), Some(&last), 10.0));
/// assert!(admit(&Point3::new(20.0, 0.0, 0.0), Some(&last), 10.0));
/// ```
pub fn admit(candidate: &Point3, previous: Option<&Point3>, minimum_distance_mm: f64) -> bool {
    if minimum_distance_mm.is_nan() || minimum_distance_mm <= 0.0 {
        return true;
    }

    match previous {
        Some(previous) => dist(candidate, previous) >= minimum_distance_mm,
        None => true,
    }
}
