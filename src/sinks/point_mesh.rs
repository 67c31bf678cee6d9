use super::PointSink;
use super::topology::CellTopology;
use crate::errors::CollectError;
use crate::{Point3, Result};
use serde::{Deserialize, Serialize};

/// A mesh used as a point sink. Collected points are stored as mesh vertices, and after every
/// mutation the topology is regenerated so that there is one single point cell per vertex and
/// no line or triangle cells.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "MeshData")]
pub struct PointMesh {
    points: Vec<Point3>,
    topology: CellTopology,
}

/// Unchecked deserialized form of a `PointMesh`.
#[derive(Deserialize)]
struct MeshData {
    points: Vec<Point3>,
    topology: CellTopology,
}

impl TryFrom<MeshData> for PointMesh {
    type Error = CollectError;

    fn try_from(value: MeshData) -> Result<Self> {
        value.topology.check(value.points.len())?;
        Ok(Self {
            points: value.points,
            topology: value.topology,
        })
    }
}

impl PointMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with one single point cell for each of the given points.
    pub fn from_points(points: Vec<Point3>) -> Self {
        let mut mesh = Self {
            points,
            topology: CellTopology::default(),
        };
        mesh.rebuild_topology();
        mesh
    }

    /// Create a mesh with existing line and triangle cells, such as a surface model which is
    /// bound as the output of a collection. The cells will be kept until the first time a point
    /// is appended or removed.
    ///
    /// # Arguments
    ///
    /// * `points`: the mesh vertices
    /// * `lines`: two point cells, indexing into `points`
    /// * `triangles`: three point cells, indexing into `points`
    ///
    /// returns: Result<PointMesh, CollectError>
    ///
    /// # Examples
    ///
    /// ```
    /// use pointcollect::{Point3, PointMesh};
    /// let points = vec![
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(0.0, 1.0, 0.0),
    /// ];
    /// let mut mesh = PointMesh::try_new(points, vec![], vec![[0, 1, 2]]).unwrap();
    /// assert_eq!(mesh.topology().triangles().len(), 1);
    ///
    /// mesh.append(Point3::new(1.0, 1.0, 0.0));
    /// assert!(mesh.topology().triangles().is_empty());
    /// assert_eq!(mesh.cell_count(), 4);
    /// ```
    pub fn try_new(
        points: Vec<Point3>,
        lines: Vec<[usize; 2]>,
        triangles: Vec<[usize; 3]>,
    ) -> Result<Self> {
        let topology = CellTopology::try_new(points.len(), Vec::new(), lines, triangles)?;
        Ok(Self { points, topology })
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn topology(&self) -> &CellTopology {
        &self.topology
    }

    pub fn cell_count(&self) -> usize {
        self.topology.cell_count()
    }

    /// Add a point as a new vertex and regenerate the vertex cells.
    pub fn append(&mut self, point: Point3) {
        self.points.push(point);
        self.rebuild_topology();
    }

    fn rebuild_topology(&mut self) {
        self.topology.rebuild(self.points.len());
    }
}

impl PointSink for PointMesh {
    fn count(&self) -> usize {
        self.points.len()
    }

    fn last_point(&self) -> Option<Point3> {
        self.points.last().copied()
    }

    fn remove_last(&mut self) {
        if self.points.is_empty() {
            self.topology.clear();
            return;
        }

        let retained = self.points[..self.points.len() - 1].to_vec();
        self.points = retained;
        self.rebuild_topology();
    }

    fn remove_all(&mut self) {
        *self = Self::new();
    }
}
