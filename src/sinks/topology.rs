//! Cell topology of a mesh sink. Collected points are only ever connected by single point
//! (vertex) cells. Lines and triangles may be present in a mesh which was bound with existing
//! content, but they can't be edited consistently as individual points come and go, so every
//! rebuild drops them.

use crate::Result;
use crate::errors::CollectError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// The cells of a mesh, as indices into its points. A topology deserialized on its own is not
/// checked against any point count; `PointMesh` checks its topology when it is deserialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellTopology {
    vertices: Vec<usize>,
    lines: Vec<[usize; 2]>,
    triangles: Vec<[usize; 3]>,
}

impl CellTopology {
    /// Create a topology from existing cells, checking that every index refers to one of the
    /// `point_count` points.
    ///
    /// # Arguments
    ///
    /// * `point_count`: the number of points the cells index into
    /// * `vertices`: single point cells
    /// * `lines`: two point cells
    /// * `triangles`: three point cells
    ///
    /// returns: Result<CellTopology, CollectError>
    pub fn try_new(
        point_count: usize,
        vertices: Vec<usize>,
        lines: Vec<[usize; 2]>,
        triangles: Vec<[usize; 3]>,
    ) -> Result<Self> {
        let topology = Self {
            vertices,
            lines,
            triangles,
        };
        topology.check(point_count)?;
        Ok(topology)
    }

    /// Check that every cell index refers to one of the `point_count` points.
    pub fn check(&self, point_count: usize) -> Result<()> {
        let bad = self
            .vertices
            .iter()
            .chain(self.lines.iter().flatten())
            .chain(self.triangles.iter().flatten())
            .find(|&&i| i >= point_count);

        match bad {
            Some(i) => Err(CollectError::InvalidGeometry(format!(
                "cell index {i} is out of range for {point_count} points"
            ))),
            None => Ok(()),
        }
    }

    /// Regenerate exactly one single point cell per point, in index order, and drop every line
    /// and triangle cell.
    pub fn rebuild(&mut self, point_count: usize) {
        self.vertices = (0..point_count).collect_vec();
        self.lines.clear();
        self.triangles.clear();
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.lines.clear();
        self.triangles.clear();
    }

    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    pub fn lines(&self) -> &[[usize; 2]] {
        &self.lines
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    pub fn cell_count(&self) -> usize {
        self.vertices.len() + self.lines.len() + self.triangles.len()
    }

    /// True if there are no cells with more than one point.
    pub fn is_point_only(&self) -> bool {
        self.lines.is_empty() && self.triangles.is_empty()
    }
}
