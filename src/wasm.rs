//! WASM bindings for Tikzcirc Core.
//!
//! This module provides JavaScript-friendly bindings so a browser front end
//! can edit a schematic and export it without a server round trip.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmSchematic } from 'tikzcirc_core';
//!
//! await init();
//!
//! const schematic = new WasmSchematic();
//! schematic.place_segment(1, 0, 0, 2, 0);   // resistor
//! schematic.place_point(7, 2, 1);           // ground
//!
//! localStorage.setItem('schematic', schematic.save_markup());
//! const latex = schematic.export_latex();
//! const svg = schematic.render_svg(400, 300, -1);
//! ```

use wasm_bindgen::prelude::*;

use crate::components::{ComponentInstance, Point};
use crate::config::Palette;
use crate::emit::EmitOptions;
use crate::error::TikzcircError;
use crate::render::{RenderSettings, SvgCanvas};
use crate::session::Session;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

impl From<TikzcircError> for JsValue {
    fn from(e: TikzcircError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// WASM-compatible schematic editor state.
///
/// Wraps a [`Session`]; kinds are passed as their numeric codes.
#[wasm_bindgen]
pub struct WasmSchematic {
    session: Session,
}

#[wasm_bindgen]
impl WasmSchematic {
    /// Create an empty schematic with default export options.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmSchematic {
        WasmSchematic {
            session: Session::default(),
        }
    }

    /// Set the three export toggles.
    #[wasm_bindgen]
    pub fn set_options(&mut self, wrap_in_figure: bool, american_style: bool, placement_hint: bool) {
        self.session.set_options(EmitOptions {
            wrap_in_figure,
            american_style,
            placement_hint,
        });
    }

    /// Place a segment kind. Returns the new component's index.
    #[wasm_bindgen]
    pub fn place_segment(&mut self, code: u32, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<usize, JsValue> {
        let instance = ComponentInstance::create_segment_from_code(
            Point::new(x1, y1),
            Point::new(x2, y2),
            code,
            self.session.ids_mut(),
        )?;
        Ok(self.session.insert(instance))
    }

    /// Place a point kind. Returns the new component's index.
    #[wasm_bindgen]
    pub fn place_point(&mut self, code: u32, x: f64, y: f64) -> Result<usize, JsValue> {
        let instance =
            ComponentInstance::create_point_from_code(Point::new(x, y), code, self.session.ids_mut())?;
        Ok(self.session.insert(instance))
    }

    /// Remove the component at `index`; out-of-range indices are ignored.
    #[wasm_bindgen]
    pub fn remove(&mut self, index: usize) {
        self.session.select(Some(index));
        self.session.delete_selected();
    }

    #[wasm_bindgen]
    pub fn clear(&mut self) {
        self.session.clear();
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.session.document().len()
    }

    /// One summary line per component, joined with newlines.
    #[wasm_bindgen]
    pub fn summaries(&self) -> String {
        self.session.summaries().join("\n")
    }

    /// Index of the component closest to a grid point, or `undefined`.
    #[wasm_bindgen]
    pub fn closest(&self, x: f64, y: f64) -> Option<usize> {
        self.session.closest(Point::new(x, y))
    }

    #[wasm_bindgen]
    pub fn set_label(&mut self, index: usize, text: &str) {
        if self.session.select(Some(index)) {
            self.session.set_selected_label(text);
        }
    }

    #[wasm_bindgen]
    pub fn set_code_template(&mut self, index: usize, text: &str) {
        if self.session.select(Some(index)) {
            self.session.set_selected_code_template(text);
        }
    }

    #[wasm_bindgen]
    pub fn export_latex(&self) -> String {
        self.session.export_latex()
    }

    #[wasm_bindgen]
    pub fn save_markup(&self) -> String {
        self.session.save_markup()
    }

    /// Replace the schematic with saved text. Returns the component count.
    #[wasm_bindgen]
    pub fn load_markup(&mut self, text: &str) -> usize {
        self.session.load_markup(text)
    }

    /// Render the schematic to SVG, highlighting `selected` (negative for none).
    #[wasm_bindgen]
    pub fn render_svg(&mut self, width: f64, height: f64, selected: i32) -> String {
        let selected = usize::try_from(selected).ok();
        self.session.select(selected);
        let mut canvas = SvgCanvas::new(width, height, Palette::default());
        self.session.render(&mut canvas, &RenderSettings::default());
        canvas.finish()
    }
}

impl Default for WasmSchematic {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
