use super::{Frame, FrameId, FrameNotifier};
use crate::{Iso3, Mat4};
use log::warn;
use std::cell::Cell;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// A rigid frame with a pose relative to world. Changing the pose through `set_pose` or
/// `transform_by` publishes a change event to the attached notifier, if any.
pub struct TransformFrame {
    id: FrameId,
    name: String,
    pose: Cell<Iso3>,
    notifier: Option<Rc<FrameNotifier>>,
}

impl TransformFrame {
    /// Create a frame at the given pose which does not publish change events.
    pub fn new(name: &str, pose: Iso3) -> Self {
        Self {
            id: FrameId::new(),
            name: name.to_string(),
            pose: Cell::new(pose),
            notifier: None,
        }
    }

    /// Create a frame at the given pose which publishes its changes to `notifier`.
    ///
    /// # Arguments
    ///
    /// * `name`: a human readable name, used only for display
    /// * `pose`: the initial pose of the frame relative to world
    /// * `notifier`: the hub which will receive a change event every time the pose is set
    ///
    /// returns: TransformFrame
    pub fn with_notifier(name: &str, pose: Iso3, notifier: Rc<FrameNotifier>) -> Self {
        Self {
            notifier: Some(notifier),
            ..Self::new(name, pose)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pose(&self) -> Iso3 {
        self.pose.get()
    }

    pub fn set_pose(&self, pose: Iso3) {
        self.pose.set(pose);
        if let Some(notifier) = &self.notifier {
            notifier.notify(self.id);
        }
    }

    /// Apply `transform` on the world side of the current pose, moving the frame.
    pub fn transform_by(&self, transform: &Iso3) {
        self.set_pose(transform * self.pose.get());
    }
}

impl Frame for TransformFrame {
    fn id(&self) -> FrameId {
        self.id
    }

    fn pose_to_world(&self) -> Mat4 {
        self.pose.get().to_homogeneous()
    }

    fn pose_relative_to(&self, other: &dyn Frame) -> Mat4 {
        let this_to_world = self.pose_to_world();
        match other.pose_to_world().try_inverse() {
            Some(world_to_other) => world_to_other * this_to_world,
            None => {
                warn!(
                    "Pose of frame {} is not invertible, using world coordinates for {}",
                    other.id(),
                    self.name
                );
                this_to_world
            }
        }
    }
}

impl Debug for TransformFrame {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformFrame")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("pose", &self.pose.get())
            .finish()
    }
}
