//! Collection of 3D points sampled from a moving reference frame into a labeled point set or the
//! vertex set of a mesh, with a minimum-distance gate against the previously recorded point.

pub mod common;
pub mod controller;
pub mod errors;
pub mod frames;
pub mod gate;
pub mod sampler;
pub mod session;
pub mod sinks;
pub mod task;

pub use parry3d_f64::na;

pub type Point3 = na::Point3<f64>;
pub type Vector3 = na::Vector3<f64>;
pub type Iso3 = na::Isometry3<f64>;
pub type Mat4 = na::Matrix4<f64>;

pub type Result<T> = std::result::Result<T, CollectError>;

pub use controller::{
    AddOutcome, AutoCollect, number_of_points_in_output, on_sampling_frame_changed,
    request_add_point, request_remove_all_points, request_remove_last_point,
};
pub use errors::CollectError;
pub use frames::{
    ChangeSource, Frame, FrameId, FrameNotifier, SharedFrame, SubscriptionId, TransformFrame,
};
pub use session::{CollectMode, CollectionSession, SessionConfig};
pub use sinks::{
    CellTopology, LabeledPoint, OutputKind, OutputNode, PointMesh, PointSet, PointSink,
};
pub use task::CollectionTask;
