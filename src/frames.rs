//! This module defines the collaborator interfaces the collection engine needs from a host scene:
//! frames which can report their pose, and a source of notifications that a frame has moved. A
//! simple rigid frame and a synchronous notification hub are provided for hosts which do not have
//! their own transform graph.

mod notifier;
mod transform_frame;

use crate::Mat4;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use uuid::Uuid;

pub use notifier::FrameNotifier;
pub use transform_frame::TransformFrame;

/// Stable identity of a frame, used to tell whether two references point at the same frame and
/// to match change notifications to the frame they were raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(Uuid);

impl FrameId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FrameId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for FrameId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A coordinate system with a time-varying pose. Frames are read-only from the point of view of
/// the collection engine and may be queried at any time.
pub trait Frame {
    fn id(&self) -> FrameId;

    /// The 4x4 homogeneous transform taking coordinates in this frame to world coordinates.
    fn pose_to_world(&self) -> Mat4;

    /// The 4x4 homogeneous transform taking coordinates in this frame to coordinates in the
    /// `other` frame, i.e. this frame's pose expressed in `other`'s coordinate system.
    fn pose_relative_to(&self, other: &dyn Frame) -> Mat4;
}

pub type SharedFrame = Rc<dyn Frame>;

/// Handle returned by `ChangeSource::subscribe`, used to cancel the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type FrameCallback = Box<dyn FnMut(FrameId)>;

/// A source of "frame changed" events. Callbacks are invoked synchronously on the thread which
/// modified the frame, with the id of the frame that changed.
pub trait ChangeSource {
    fn subscribe(&self, callback: FrameCallback) -> SubscriptionId;

    /// Remove a subscription, returning false if the id was not subscribed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
