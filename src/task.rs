//! A collection task ties a session to a source of frame change notifications, so that points
//! are collected automatically whenever the session's sampling frame moves.

use crate::Result;
use crate::controller::{AutoCollect, on_sampling_frame_changed};
use crate::errors::CollectError;
use crate::frames::{ChangeSource, FrameId, SharedFrame, SubscriptionId};
use crate::session::CollectionSession;
use log::warn;
use std::cell::RefCell;
use std::rc::Rc;

/// Owns a shared session and a subscription on a change source. Change events for the frame
/// currently bound as the session's sampling frame are forwarded to `on_sampling_frame_changed`;
/// events for any other frame are ignored. The subscription is cancelled when the task is
/// dropped.
///
/// An event which arrives while the session is borrowed elsewhere is skipped with a warning.
pub struct CollectionTask {
    session: Rc<RefCell<CollectionSession>>,
    source: Rc<dyn ChangeSource>,
    subscription: SubscriptionId,
}

impl CollectionTask {
    /// Start a task for `session`, subscribing to change events from `source`.
    ///
    /// # Arguments
    ///
    /// * `session`: the session to collect for, which becomes shared with the task
    /// * `source`: where change events for the session's frames are published
    ///
    /// returns: CollectionTask
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    /// use pointcollect::*;
    ///
    /// let notifier = Rc::new(FrameNotifier::new());
    /// let stylus = Rc::new(TransformFrame::with_notifier(
    ///     "stylus",
    ///     Iso3::identity(),
    ///     notifier.clone(),
    /// ));
    /// let points = Rc::new(RefCell::new(PointSet::new()));
    ///
    /// let mut session = CollectionSession::new();
    /// session.set_sampling_frame(Some(stylus.clone())).unwrap();
    /// session.set_output(Some(points.clone().into()));
    /// session.set_collect_mode(CollectMode::Automatic);
    ///
    /// let _task = CollectionTask::new(session, notifier.clone());
    /// stylus.set_pose(Iso3::translation(0.0, 0.0, 0.0));
    /// stylus.set_pose(Iso3::translation(5.0, 0.0, 0.0));
    /// stylus.set_pose(Iso3::translation(12.0, 0.0, 0.0));
    ///
    /// assert_eq!(points.borrow().labels(), vec!["P0", "P1"]);
    /// ```
    pub fn new(session: CollectionSession, source: Rc<dyn ChangeSource>) -> Self {
        let session = Rc::new(RefCell::new(session));
        let weak = Rc::downgrade(&session);
        let subscription = source.subscribe(Box::new(move |changed| {
            if let Some(session) = weak.upgrade() {
                handle_change(&session, changed);
            }
        }));

        Self {
            session,
            source,
            subscription,
        }
    }

    pub fn session(&self) -> &Rc<RefCell<CollectionSession>> {
        &self.session
    }

    /// Bind a new sampling frame. Changing the sampling frame counts as a change of the
    /// collection input, so in automatic mode the new frame's position is collected right away
    /// (or the session falls back to manual mode if it is no longer fully set up).
    ///
    /// Returns `None` when the binding did not change.
    pub fn set_sampling_frame(&self, frame: Option<SharedFrame>) -> Result<Option<AutoCollect>> {
        let mut session = self
            .session
            .try_borrow_mut()
            .map_err(|_| CollectError::SessionBusy)?;

        let before = session.sampling_frame().map(|f| f.id());
        session.set_sampling_frame(frame)?;
        if session.sampling_frame().map(|f| f.id()) == before {
            return Ok(None);
        }

        Ok(Some(on_sampling_frame_changed(&mut session)))
    }
}

fn handle_change(session: &RefCell<CollectionSession>, changed: FrameId) -> Option<AutoCollect> {
    let Ok(mut session) = session.try_borrow_mut() else {
        warn!("Session is busy, skipping change notification for frame {changed}");
        return None;
    };

    if session.sampling_frame().map(|f| f.id()) != Some(changed) {
        return None;
    }

    Some(on_sampling_frame_changed(&mut session))
}

impl Drop for CollectionTask {
    fn drop(&mut self) {
        self.source.unsubscribe(self.subscription);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::{Frame, FrameNotifier, TransformFrame};
    use crate::session::CollectMode;
    use crate::sinks::{OutputNode, PointMesh, PointSet, PointSink};
    use crate::{Iso3, Point3};
    use approx::assert_relative_eq;

    struct Scene {
        notifier: Rc<FrameNotifier>,
        stylus: Rc<TransformFrame>,
        reference: Rc<TransformFrame>,
    }

    impl Scene {
        fn new() -> Self {
            let notifier = Rc::new(FrameNotifier::new());
            let stylus = Rc::new(TransformFrame::with_notifier(
                "stylus",
                Iso3::identity(),
                notifier.clone(),
            ));
            let reference = Rc::new(TransformFrame::with_notifier(
                "reference",
                Iso3::identity(),
                notifier.clone(),
            ));
            Self {
                notifier,
                stylus,
                reference,
            }
        }

        fn task(&self, output: Option<OutputNode>, mode: CollectMode) -> CollectionTask {
            let mut session = CollectionSession::new();
            session.set_sampling_frame(Some(self.stylus.clone())).unwrap();
            session.set_output(output);
            session.set_collect_mode(mode);
            CollectionTask::new(session, self.notifier.clone())
        }
    }

    #[test]
    fn automatic_collection_follows_the_stylus() {
        let scene = Scene::new();
        let points = Rc::new(RefCell::new(PointSet::new()));
        let _task = scene.task(Some(points.clone().into()), CollectMode::Automatic);

        for i in 0..50 {
            scene.stylus.set_pose(Iso3::translation(i as f64, 0.0, 0.0));
        }

        // With the default 10 mm spacing, x = 0, 10, 20, 30, 40 are collected
        let points = points.borrow();
        assert_eq!(points.count(), 5);
        assert_eq!(points.labels(), vec!["P0", "P1", "P2", "P3", "P4"]);
        assert_relative_eq!(points.entries()[4].point, Point3::new(40.0, 0.0, 0.0));
    }

    #[test]
    fn other_frames_do_not_trigger() {
        let scene = Scene::new();
        let mesh = Rc::new(RefCell::new(PointMesh::new()));
        let _task = scene.task(Some(mesh.clone().into()), CollectMode::Automatic);

        scene.reference.set_pose(Iso3::translation(50.0, 0.0, 0.0));
        assert_eq!(mesh.borrow().count(), 0);

        scene.stylus.set_pose(Iso3::translation(1.0, 0.0, 0.0));
        assert_eq!(mesh.borrow().count(), 1);
        assert_eq!(mesh.borrow().cell_count(), 1);
    }

    #[test]
    fn manual_mode_ignores_motion() {
        let scene = Scene::new();
        let points = Rc::new(RefCell::new(PointSet::new()));
        let _task = scene.task(Some(points.clone().into()), CollectMode::Manual);

        scene.stylus.set_pose(Iso3::translation(100.0, 0.0, 0.0));
        assert_eq!(points.borrow().count(), 0);
    }

    #[test]
    fn missing_output_reverts_to_manual() {
        let scene = Scene::new();
        let task = scene.task(None, CollectMode::Automatic);

        scene.stylus.set_pose(Iso3::translation(1.0, 0.0, 0.0));

        assert_eq!(task.session().borrow().collect_mode(), CollectMode::Manual);
    }

    #[test]
    fn busy_session_skips_notification() {
        let scene = Scene::new();
        let points = Rc::new(RefCell::new(PointSet::new()));
        let task = scene.task(Some(points.clone().into()), CollectMode::Automatic);

        {
            let _session = task.session().borrow_mut();
            scene.stylus.set_pose(Iso3::translation(1.0, 0.0, 0.0));
        }
        assert_eq!(points.borrow().count(), 0);

        scene.stylus.set_pose(Iso3::translation(2.0, 0.0, 0.0));
        assert_eq!(points.borrow().count(), 1);
    }

    #[test]
    fn rebinding_sampling_frame_collects() {
        let scene = Scene::new();
        let points = Rc::new(RefCell::new(PointSet::new()));
        let task = scene.task(Some(points.clone().into()), CollectMode::Automatic);
        let other = Rc::new(TransformFrame::new("other", Iso3::translation(0.0, 30.0, 0.0)));

        let result = task.set_sampling_frame(Some(other.clone())).unwrap();
        assert!(matches!(result, Some(AutoCollect::Collected(_))));
        assert_eq!(points.borrow().clone_points(), vec![Point3::new(0.0, 30.0, 0.0)]);

        let unchanged = task.set_sampling_frame(Some(other)).unwrap();
        assert!(unchanged.is_none());

        let cleared = task.set_sampling_frame(None).unwrap();
        assert!(matches!(cleared, Some(AutoCollect::FellBackToManual)));
    }

    #[test]
    fn rebinding_to_anchor_is_rejected() {
        let scene = Scene::new();
        let task = scene.task(None, CollectMode::Manual);
        task.session()
            .borrow_mut()
            .set_anchor_frame(Some(scene.reference.clone()))
            .unwrap();

        let result = task.set_sampling_frame(Some(scene.reference.clone()));

        assert!(matches!(result, Err(CollectError::FrameConflict)));
        let session = task.session().borrow();
        assert_eq!(session.sampling_frame().map(|f| f.id()), Some(scene.stylus.id()));
    }

    #[test]
    fn drop_unsubscribes() {
        let scene = Scene::new();
        let task = scene.task(None, CollectMode::Manual);
        assert_eq!(scene.notifier.len(), 1);
        drop(task);
        assert!(scene.notifier.is_empty());
    }
}
