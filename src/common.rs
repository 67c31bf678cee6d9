//! Small geometric helpers shared by the sampler, the gate, and the sinks.

pub mod points;

pub use points::{dist, translation_of};
