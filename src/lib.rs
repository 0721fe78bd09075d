//! # Tikzcirc Core
//!
//! Schematic component model for circuitikz diagrams.
//!
//! This library provides:
//! - A closed catalog of component kinds (wires, passives, sources, transistors,
//!   op-amps, transformers, blocks, nodes) driven by one static registry
//! - Per-family identifier allocation so multi-port symbols get unique anchor names
//! - circuitikz code generation, including breakout wiring that snaps symbol
//!   ports to the grid
//! - A line-per-component markup codec for saving and loading schematics
//! - Preview geometry for drawing placed and pending components
//!
//! ## Architecture
//!
//! - [`components`] - Kinds, registry, identifiers and placed instances
//! - [`circuit`] - The ordered schematic document
//! - [`emit`] - circuitikz output
//! - [`markup`] - Save/load codec
//! - [`render`] - Drawing primitives, label boxes, canvas backends
//! - [`session`] - Editing session used by GUI front ends
//! - [`config`] - User preferences
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! tikzcirc amplifier.tikzcirc --european -o amplifier.tex
//! ```
//!
//! ### Library
//!
//! ```
//! use tikzcirc_core::{emit_document, CircuitDocument, ComponentKind, EmitOptions, Point};
//!
//! let mut doc = CircuitDocument::new();
//! doc.place_point(Point::new(2.0, 3.0), ComponentKind::NpnTransistor)?;
//! let latex = emit_document(&doc, EmitOptions::default());
//! assert!(latex.contains("\\draw (Q1.B) to[short] (1,-3);"));
//! # Ok::<(), tikzcirc_core::TikzcircError>(())
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmSchematic } from 'tikzcirc_core';
//!
//! const schematic = new WasmSchematic();
//! schematic.place_point(10, 2, 3);
//! const latex = schematic.export_latex();
//! ```

pub mod circuit;
pub mod components;
pub mod config;
pub mod emit;
pub mod error;
pub mod markup;
pub mod render;
pub mod session;

// Re-export main types for convenience
pub use circuit::CircuitDocument;
pub use components::{ComponentInstance, ComponentKind, IdentifierAllocator, Point};
pub use config::Preferences;
pub use emit::{emit_document, EmitOptions};
pub use error::{Result, TikzcircError};
pub use session::{EditCommand, EditOutcome, Session};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmSchematic;
