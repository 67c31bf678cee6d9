use super::PointSink;
use crate::Point3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledPoint {
    pub label: String,
    pub point: Point3,
}

/// An ordered list of labeled points, kept in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointSet {
    entries: Vec<LabeledPoint>,
}

impl PointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a labeled point to the end of the set, returning its index.
    pub fn append(&mut self, point: Point3, label: &str) -> usize {
        self.entries.push(LabeledPoint {
            label: label.to_string(),
            point,
        });
        self.entries.len() - 1
    }

    pub fn entries(&self) -> &[LabeledPoint] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&LabeledPoint> {
        self.entries.get(index)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    pub fn clone_points(&self) -> Vec<Point3> {
        self.entries.iter().map(|e| e.point).collect()
    }
}

impl PointSink for PointSet {
    fn count(&self) -> usize {
        self.entries.len()
    }

    fn last_point(&self) -> Option<Point3> {
        self.entries.last().map(|e| e.point)
    }

    fn remove_last(&mut self) {
        self.entries.pop();
    }

    fn remove_all(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_keeps_insertion_order() {
        let mut set = PointSet::new();
        assert_eq!(set.append(Point3::new(0.0, 0.0, 0.0), "A"), 0);
        assert_eq!(set.append(Point3::new(1.0, 0.0, 0.0), "B"), 1);

        assert_eq!(set.count(), 2);
        assert_eq!(set.labels(), vec!["A", "B"]);
        assert_eq!(set.last_point(), Some(Point3::new(1.0, 0.0, 0.0)));
        assert_eq!(set.get(0).map(|e| e.label.as_str()), Some("A"));
    }

    #[test]
    fn remove_last_on_empty_is_noop() {
        let mut set = PointSet::new();
        set.remove_last();
        assert!(set.is_empty());
        assert_eq!(set.last_point(), None);
    }

    #[test]
    fn remove_last_and_all() {
        let mut set = PointSet::new();
        set.append(Point3::new(0.0, 0.0, 0.0), "P0");
        set.append(Point3::new(1.0, 0.0, 0.0), "P1");
        set.append(Point3::new(2.0, 0.0, 0.0), "P2");

        set.remove_last();
        assert_eq!(set.labels(), vec!["P0", "P1"]);

        set.remove_all();
        assert_eq!(set.count(), 0);
    }

    #[test]
    fn serializes_labels_and_points() {
        let mut set = PointSet::new();
        set.append(Point3::new(1.0, 2.0, 3.0), "P0");
        let json = serde_json::to_string(&set).unwrap();
        let back: PointSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entries(), set.entries());
    }
}
