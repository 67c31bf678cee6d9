//! This module contains the two output destinations collected points can be written to: a
//! labeled, ordered point set and the vertex set of a mesh. Both share the `PointSink` removal
//! and query capability, while appending differs because only point sets carry labels.
//!
//! The output bound to a session is an `OutputNode`, a closed sum over the two supported sinks
//! plus a foreign kind standing in for any other host object bound as output, which every sink
//! operation rejects.

mod point_mesh;
mod point_set;
mod topology;

use crate::errors::CollectError;
use crate::{Point3, Result};
use std::cell::RefCell;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

pub use point_mesh::PointMesh;
pub use point_set::{LabeledPoint, PointSet};
pub use topology::CellTopology;

/// Operations shared by every output sink.
pub trait PointSink {
    /// The number of points currently stored.
    fn count(&self) -> usize;

    /// The most recently appended point still stored, if any.
    fn last_point(&self) -> Option<Point3>;

    /// Remove the most recently appended point. Does nothing if the sink is empty.
    fn remove_last(&mut self);

    /// Remove every point.
    fn remove_all(&mut self);

    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    PointSet,
    Mesh,
    Unsupported,
}

impl Display for OutputKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputKind::PointSet => write!(f, "point set"),
            OutputKind::Mesh => write!(f, "mesh"),
            OutputKind::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// The output a session writes into. The sinks are shared with the owner, which may inspect or
/// edit them between collection requests.
#[derive(Debug, Clone)]
pub enum OutputNode {
    PointSet(Rc<RefCell<PointSet>>),
    Mesh(Rc<RefCell<PointMesh>>),

    /// Any other kind of host object, identified by its type name.
    Foreign(String),
}

impl OutputNode {
    pub fn kind(&self) -> OutputKind {
        match self {
            OutputNode::PointSet(_) => OutputKind::PointSet,
            OutputNode::Mesh(_) => OutputKind::Mesh,
            OutputNode::Foreign(_) => OutputKind::Unsupported,
        }
    }

    /// Run `f` against the shared sink capability of whichever sink is bound.
    pub fn with_sink<R>(&self, f: impl FnOnce(&mut dyn PointSink) -> R) -> Result<R> {
        match self {
            OutputNode::PointSet(set) => {
                let mut set = set.try_borrow_mut().map_err(|_| CollectError::OutputBusy)?;
                Ok(f(&mut *set))
            }
            OutputNode::Mesh(mesh) => {
                let mut mesh = mesh.try_borrow_mut().map_err(|_| CollectError::OutputBusy)?;
                Ok(f(&mut *mesh))
            }
            OutputNode::Foreign(name) => Err(CollectError::UnsupportedOutputKind(name.clone())),
        }
    }

    /// The number of points in the bound sink.
    pub fn count(&self) -> Result<usize> {
        match self {
            OutputNode::PointSet(set) => set
                .try_borrow()
                .map(|s| s.count())
                .map_err(|_| CollectError::OutputBusy),
            OutputNode::Mesh(mesh) => mesh
                .try_borrow()
                .map(|m| m.count())
                .map_err(|_| CollectError::OutputBusy),
            OutputNode::Foreign(name) => Err(CollectError::UnsupportedOutputKind(name.clone())),
        }
    }
}

impl From<Rc<RefCell<PointSet>>> for OutputNode {
    fn from(value: Rc<RefCell<PointSet>>) -> Self {
        OutputNode::PointSet(value)
    }
}

impl From<Rc<RefCell<PointMesh>>> for OutputNode {
    fn from(value: Rc<RefCell<PointMesh>>) -> Self {
        OutputNode::Mesh(value)
    }
}
