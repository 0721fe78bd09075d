//! Component catalog and placed instances.
//!
//! This module provides:
//! - [`ComponentKind`]: the closed set of drawable kinds, with stable numeric codes
//! - [`registry`]: the per-kind table (shape, family, templates, breakout ports, glyphs)
//! - [`IdentifierAllocator`]: per-family counters for unique anchor names
//! - [`ComponentInstance`]: one placed element with its geometry, label and code template
//!
//! Segment kinds (wires, passives, sources, switch, impedance, arrows) are
//! placed with two endpoints; every other kind is placed at one position.

mod ids;
mod instance;
mod kind;
pub mod registry;

pub use ids::{Family, IdentifierAllocator};
pub use instance::{ComponentInstance, Coord, Geometry, Point};
pub use kind::{ComponentKind, Shape};
pub use registry::{classify, default_label, default_template, identifier_family, KindSpec, Port};
