//! Schematic document representation.
//!
//! A [`CircuitDocument`] is a flat, ordered list of placed components together
//! with the identifier counters used to name them. There is no connectivity
//! model: two components touch only if their coordinates happen to line up.

mod document;

pub use document::CircuitDocument;
