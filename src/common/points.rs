//! Common operations on f64 points and homogeneous transforms in 3D space.

use crate::{Mat4, Point3};

/// Returns the Euclidean distance between two points.
///
/// # Arguments
///
/// * `a`: the first point
/// * `b`: the second point
///
/// returns: f64
///
/// # Examples
///
/// ```
/// use pointcollect::common::points::dist;
/// use pointcollect::Point3;
/// let a = Point3::new(1.0, 2.0, 0.0);
/// let b = Point3::new(3.0, 2.0, 0.0);
/// assert_eq!(dist(&a, &b), 2.0);
/// ```
pub fn dist(a: &Point3, b: &Point3) -> f64 {
    (a - b).norm()
}

/// Returns the translation component of a 4x4 homogeneous transform as a point, which is the
/// position of the transformed frame's origin expressed in the reference coordinate system.
///
/// # Arguments
///
/// * `m`: a homogeneous transform, with the translation in the last column
///
/// returns: OPoint<f64, Const<3>>
///
/// # Examples
///
/// ```
/// use pointcollect::common::points::translation_of;
/// use pointcollect::{Iso3, Point3};
/// let m = Iso3::translation(1.0, 2.0, 3.0).to_homogeneous();
/// assert_eq!(translation_of(&m), Point3::new(1.0, 2.0, 3.0));
/// ```
pub fn translation_of(m: &Mat4) -> Point3 {
    Point3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)])
}
