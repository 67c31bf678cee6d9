//! The state of one collection task: labeling and gating configuration, the collect mode, and
//! the frames and output the points are taken from and written to.

mod attributes;

use crate::Result;
use crate::errors::CollectError;
use crate::frames::SharedFrame;
use crate::sinks::OutputNode;
use log::error;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;
use std::str::FromStr;

pub use attributes::{
    ATTR_COLLECT_MODE, ATTR_LABEL_BASE, ATTR_LABEL_COUNTER, ATTR_MINIMUM_DISTANCE_MM,
};

/// Whether points are collected only on explicit request or every time the sampling frame moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectMode {
    #[default]
    Manual,
    Automatic,
}

impl CollectMode {
    /// The persisted literal for the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectMode::Manual => "manual",
            CollectMode::Automatic => "automatic",
        }
    }
}

impl FromStr for CollectMode {
    type Err = CollectError;

    /// Parse a persisted literal. Only the exact, lowercase literals are recognized.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "manual" => Ok(CollectMode::Manual),
            "automatic" => Ok(CollectMode::Automatic),
            _ => Err(CollectError::InvalidModeLiteral(s.to_string())),
        }
    }
}

impl Display for CollectMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'de> Deserialize<'de> for CollectMode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let literal = String::deserialize(deserializer)?;
        Ok(attributes::mode_or_manual(&literal))
    }
}

/// The persisted configuration of a collection session. Field names serialize with the same
/// names used for the string attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SessionConfig {
    pub label_base: String,
    pub label_counter: u64,
    pub minimum_distance_mm: f64,
    pub collect_mode: CollectMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            label_base: "P".to_string(),
            label_counter: 0,
            minimum_distance_mm: 10.0,
            collect_mode: CollectMode::Manual,
        }
    }
}

impl SessionConfig {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A collection session. Cloning a session copies its configuration and shares its frame and
/// output references.
#[derive(Clone, Default)]
pub struct CollectionSession {
    config: SessionConfig,
    sampling_frame: Option<SharedFrame>,
    anchor_frame: Option<SharedFrame>,
    output: Option<OutputNode>,
}

impl CollectionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn label_base(&self) -> &str {
        &self.config.label_base
    }

    pub fn set_label_base(&mut self, label_base: &str) {
        self.config.label_base = label_base.to_string();
    }

    pub fn label_counter(&self) -> u64 {
        self.config.label_counter
    }

    pub fn minimum_distance_mm(&self) -> f64 {
        self.config.minimum_distance_mm
    }

    /// Set the minimum distance between consecutive points collected in automatic mode. A value
    /// of zero or less disables the check.
    pub fn set_minimum_distance_mm(&mut self, minimum_distance_mm: f64) {
        self.config.minimum_distance_mm = minimum_distance_mm;
    }

    pub fn collect_mode(&self) -> CollectMode {
        self.config.collect_mode
    }

    pub fn set_collect_mode(&mut self, mode: CollectMode) {
        self.config.collect_mode = mode;
    }

    pub fn sampling_frame(&self) -> Option<&SharedFrame> {
        self.sampling_frame.as_ref()
    }

    pub fn anchor_frame(&self) -> Option<&SharedFrame> {
        self.anchor_frame.as_ref()
    }

    pub fn output(&self) -> Option<&OutputNode> {
        self.output.as_ref()
    }

    pub fn set_output(&mut self, output: Option<OutputNode>) {
        self.output = output;
    }

    /// Bind the frame whose position is recorded. Binding the frame currently used as the
    /// anchor is rejected with `FrameConflict` and leaves the current binding in place.
    pub fn set_sampling_frame(&mut self, frame: Option<SharedFrame>) -> Result<()> {
        if same_frame(frame.as_ref(), self.sampling_frame.as_ref()) {
            return Ok(());
        }
        if same_frame(frame.as_ref(), self.anchor_frame.as_ref()) {
            error!("Anchor and sampling frames cannot be the same");
            return Err(CollectError::FrameConflict);
        }

        self.sampling_frame = frame;
        Ok(())
    }

    /// Bind the frame collected coordinates are expressed in, or `None` for world coordinates.
    /// Binding the frame currently used for sampling is rejected with `FrameConflict` and leaves
    /// the current binding in place.
    pub fn set_anchor_frame(&mut self, frame: Option<SharedFrame>) -> Result<()> {
        if same_frame(frame.as_ref(), self.anchor_frame.as_ref()) {
            return Ok(());
        }
        if same_frame(frame.as_ref(), self.sampling_frame.as_ref()) {
            error!("Anchor and sampling frames cannot be the same");
            return Err(CollectError::FrameConflict);
        }

        self.anchor_frame = frame;
        Ok(())
    }

    /// The label the next point appended to a point set will receive.
    pub fn next_label(&self) -> String {
        format!("{}{}", self.config.label_base, self.config.label_counter)
    }

    pub(crate) fn advance_label_counter(&mut self) -> Result<()> {
        let counter = self.config.label_counter;
        self.config.label_counter = counter.checked_add(1).ok_or_else(|| {
            error!("Label counter {counter} is exhausted, no point added");
            CollectError::LabelCounterExhausted(counter)
        })?;
        Ok(())
    }

    /// The configuration as named string attributes, in a stable order.
    pub fn to_attributes(&self) -> Vec<(&'static str, String)> {
        self.config.to_attributes()
    }

    /// Restore configuration from named string attributes. See `SessionConfig::read_attributes`.
    pub fn read_attributes<'a, I>(&mut self, attributes: I) -> Vec<CollectError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.config.read_attributes(attributes)
    }
}

/// Whether two optional references are both bound to the same frame.
fn same_frame(a: Option<&SharedFrame>, b: Option<&SharedFrame>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Rc::ptr_eq(a, b) || a.id() == b.id(),
        _ => false,
    }
}

impl Display for CollectionSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (name, value) in self.to_attributes() {
            write!(f, " {name}=\"{value}\"")?;
        }
        Ok(())
    }
}

impl Debug for CollectionSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionSession")
            .field("config", &self.config)
            .field("sampling_frame", &self.sampling_frame.as_ref().map(|f| f.id()))
            .field("anchor_frame", &self.anchor_frame.as_ref().map(|f| f.id()))
            .field("output", &self.output.as_ref().map(|o| o.kind()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Iso3;
    use crate::frames::TransformFrame;
    use test_case::test_case;

    fn frame(name: &str) -> SharedFrame {
        Rc::new(TransformFrame::new(name, Iso3::identity()))
    }

    #[test]
    fn defaults() {
        let session = CollectionSession::new();
        assert_eq!(session.label_base(), "P");
        assert_eq!(session.label_counter(), 0);
        assert_eq!(session.minimum_distance_mm(), 10.0);
        assert_eq!(session.collect_mode(), CollectMode::Manual);
        assert!(session.sampling_frame().is_none());
        assert!(session.anchor_frame().is_none());
        assert!(session.output().is_none());
        assert_eq!(session.next_label(), "P0");
    }

    #[test]
    fn anchor_cannot_match_sampling() {
        let f1 = frame("f1");
        let mut session = CollectionSession::new();
        session.set_sampling_frame(Some(f1.clone())).unwrap();

        let result = session.set_anchor_frame(Some(f1.clone()));

        assert!(matches!(result, Err(CollectError::FrameConflict)));
        assert!(session.anchor_frame().is_none());
    }

    #[test]
    fn sampling_cannot_match_anchor() {
        let f1 = frame("f1");
        let f2 = frame("f2");
        let mut session = CollectionSession::new();
        session.set_sampling_frame(Some(f2.clone())).unwrap();
        session.set_anchor_frame(Some(f1.clone())).unwrap();

        let result = session.set_sampling_frame(Some(f1.clone()));

        assert!(matches!(result, Err(CollectError::FrameConflict)));
        assert_eq!(session.sampling_frame().map(|f| f.id()), Some(f2.id()));
    }

    #[test]
    fn rebinding_same_frame_is_noop() {
        let f1 = frame("f1");
        let mut session = CollectionSession::new();
        session.set_sampling_frame(Some(f1.clone())).unwrap();
        session.set_sampling_frame(Some(f1.clone())).unwrap();
        assert_eq!(session.sampling_frame().map(|f| f.id()), Some(f1.id()));
    }

    #[test]
    fn clearing_frames_is_allowed() {
        let f1 = frame("f1");
        let f2 = frame("f2");
        let mut session = CollectionSession::new();
        session.set_sampling_frame(Some(f1.clone())).unwrap();
        session.set_anchor_frame(Some(f2.clone())).unwrap();

        session.set_anchor_frame(None).unwrap();
        session.set_sampling_frame(None).unwrap();

        // With both cleared the previous anchor can become the sampling frame
        session.set_sampling_frame(Some(f2)).unwrap();
        session.set_anchor_frame(Some(f1)).unwrap();
    }

    #[test_case("manual", Some(CollectMode::Manual) ; "manual")]
    #[test_case("automatic", Some(CollectMode::Automatic) ; "automatic")]
    #[test_case("Automatic", None ; "capitalized")]
    #[test_case(" manual", None ; "leading space")]
    #[test_case("", None ; "empty")]
    fn mode_literals_are_exact(literal: &str, expected: Option<CollectMode>) {
        assert_eq!(literal.parse::<CollectMode>().ok(), expected);
    }

    #[test]
    fn display_dumps_attributes() {
        let session = CollectionSession::new();
        assert_eq!(
            session.to_string(),
            " LabelBase=\"P\" LabelCounter=\"0\" MinimumDistanceMm=\"10\" CollectMode=\"manual\""
        );
    }

    #[test]
    fn clone_shares_output() {
        let set = Rc::new(std::cell::RefCell::new(crate::sinks::PointSet::new()));
        let mut session = CollectionSession::new();
        session.set_output(Some(set.clone().into()));
        let copy = session.clone();
        assert_eq!(Rc::strong_count(&set), 3);
        assert!(copy.output().is_some());
    }
}
