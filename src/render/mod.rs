//! Preview and on-canvas geometry.
//!
//! Every instance is drawn as an ordered list of [`Primitive`]s in device
//! units (grid coordinates times the grid size). The same generator serves
//! both the live preview of a pending placement and the final rendering of
//! placed instances; selection only changes which [`Paint`] the ink uses.
//!
//! Drawing itself happens behind the [`Canvas`] trait so that any backend
//! (a GUI toolkit, [`SvgCanvas`], or a plain `Vec<Primitive>` in tests) can
//! consume the primitives.

mod svg;
pub mod symbols;

pub use svg::SvgCanvas;

use crate::circuit::CircuitDocument;
use crate::components::registry::{LabelAnchor, SymbolRule};
use crate::components::{ComponentInstance, ComponentKind, Geometry, Point};
use crate::error::{Result, TikzcircError};

/// Default device units per grid unit.
pub const DEFAULT_GRID_SIZE: f64 = 50.0;
/// Default label font size in device units.
pub const DEFAULT_FONT_SIZE: f64 = 10.0;
/// Default space between label text and its box.
pub const DEFAULT_LABEL_PADDING: f64 = 3.0;

/// Palette slot a primitive is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Component,
    Selected,
    Background,
}

/// One drawing operation in device units.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        from: Point,
        to: Point,
        paint: Paint,
    },
    /// Ellipse inscribed in the box at `origin` (top-left corner)
    Oval {
        origin: Point,
        width: f64,
        height: f64,
        paint: Paint,
        filled: bool,
    },
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        paint: Paint,
        filled: bool,
    },
    Polygon {
        points: Vec<Point>,
        paint: Paint,
        filled: bool,
    },
    /// Text with its baseline starting at `origin`
    Text {
        origin: Point,
        text: String,
        font_size: f64,
        paint: Paint,
    },
}

impl Primitive {
    pub fn paint(&self) -> Paint {
        match self {
            Primitive::Line { paint, .. }
            | Primitive::Oval { paint, .. }
            | Primitive::Rect { paint, .. }
            | Primitive::Polygon { paint, .. }
            | Primitive::Text { paint, .. } => *paint,
        }
    }

    /// Copy of this primitive painted with `paint` instead.
    pub fn with_paint(&self, paint: Paint) -> Primitive {
        let mut copy = self.clone();
        match &mut copy {
            Primitive::Line { paint: p, .. }
            | Primitive::Oval { paint: p, .. }
            | Primitive::Rect { paint: p, .. }
            | Primitive::Polygon { paint: p, .. }
            | Primitive::Text { paint: p, .. } => *p = paint,
        }
        copy
    }
}

/// Scale and ink used while generating glyphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub grid: f64,
    pub ink: Paint,
}

impl Pen {
    pub fn new(grid: f64, selected: bool) -> Self {
        let ink = if selected { Paint::Selected } else { Paint::Component };
        Self { grid, ink }
    }

    /// Device point for the grid offset `(dx, dy)` from `origin`.
    pub fn at(&self, origin: Point, dx: f64, dy: f64) -> Point {
        Point::new(self.grid * (origin.x + dx), self.grid * (origin.y + dy))
    }

    /// Grid length to device length.
    pub fn scale(&self, length: f64) -> f64 {
        self.grid * length
    }
}

/// Drawing backend.
pub trait Canvas {
    fn draw(&mut self, primitive: &Primitive);

    /// Rendered width of `text` at `font_size`, in device units.
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        estimate_text_width(text, font_size)
    }
}

/// Collects primitives instead of drawing them.
impl Canvas for Vec<Primitive> {
    fn draw(&mut self, primitive: &Primitive) {
        self.push(primitive.clone());
    }
}

/// Width heuristic for backends without font metrics.
pub fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * 0.6
}

/// View parameters shared by every instance drawn in one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Device units per grid unit
    pub grid_size: f64,
    /// Pan offset in grid units, added to every position
    pub offset: Point,
    pub font_size: f64,
    pub label_padding: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            offset: Point::default(),
            font_size: DEFAULT_FONT_SIZE,
            label_padding: DEFAULT_LABEL_PADDING,
        }
    }
}

fn shifted(geometry: &Geometry, offset: Point) -> Geometry {
    match *geometry {
        Geometry::Segment { start, end } => Geometry::Segment {
            start: start.offset_by(offset),
            end: end.offset_by(offset),
        },
        Geometry::Point { position } => Geometry::Point {
            position: position.offset_by(offset),
        },
    }
}

/// Snap a device position to the nearest half grid unit.
pub fn snap_to_grid(device: Point, grid: f64) -> Point {
    let half = grid / 2.0;
    Point::new(0.5 * (device.x / half).round(), 0.5 * (device.y / half).round())
}

/// Drawing primitives for `kind` placed at `at` (grid units).
///
/// Fails with [`TikzcircError::InvalidKind`] when the geometry's shape does
/// not match the kind.
pub fn geometry(kind: ComponentKind, at: &Geometry, grid: f64, selected: bool) -> Result<Vec<Primitive>> {
    let spec = crate::components::registry::spec(kind);
    if spec.shape != at.shape() {
        return Err(TikzcircError::invalid_kind(spec.name, at.shape().name()));
    }

    let pen = Pen::new(grid, selected);
    let mut out = Vec::new();
    match (spec.symbol, *at) {
        (SymbolRule::Line, Geometry::Segment { start, end }) => out.push(Primitive::Line {
            from: pen.at(start, 0.0, 0.0),
            to: pen.at(end, 0.0, 0.0),
            paint: pen.ink,
        }),
        (SymbolRule::Glyph(glyph), Geometry::Point { position }) => glyph(position, &pen, &mut out),
        // registry pairs lines with segments and glyphs with points
        _ => {}
    }
    Ok(out)
}

/// Device position the label of an instance with this geometry is centered on.
pub fn label_position(anchor: LabelAnchor, at: &Geometry, grid: f64) -> Point {
    let center = at.center();
    let (x, y) = (center.x * grid, center.y * grid);
    match anchor {
        LabelAnchor::Above => Point::new(x, y - 2.0 * grid / 3.0),
        LabelAnchor::Below => Point::new(x, y + 2.0 * grid / 3.0),
        LabelAnchor::Midpoint | LabelAnchor::Center => Point::new(x, y),
    }
}

/// Background box, outline and text for a label centered on `at`.
pub fn label_box(text: &str, at: Point, text_width: f64, font_size: f64, padding: f64) -> [Primitive; 3] {
    let origin = Point::new(
        at.x - text_width / 2.0 - padding,
        at.y + 2.0 - font_size - padding,
    );
    let width = text_width + 2.0 * padding;
    let height = font_size + 2.0 * padding;
    [
        Primitive::Rect {
            origin,
            width,
            height,
            paint: Paint::Background,
            filled: true,
        },
        Primitive::Rect {
            origin,
            width,
            height,
            paint: Paint::Component,
            filled: false,
        },
        Primitive::Text {
            origin: Point::new(at.x - text_width / 2.0, at.y + 2.0),
            text: text.to_string(),
            font_size,
            paint: Paint::Component,
        },
    ]
}

/// Draw one placed instance and its label.
pub fn render_instance<C: Canvas + ?Sized>(
    canvas: &mut C,
    instance: &ComponentInstance,
    settings: &RenderSettings,
    selected: bool,
) {
    let spec = instance.spec();
    let at = shifted(instance.geometry(), settings.offset);

    // instances are shape-checked at construction
    if let Ok(primitives) = geometry(instance.kind(), &at, settings.grid_size, selected) {
        for primitive in &primitives {
            canvas.draw(primitive);
        }
    }

    let anchor = label_position(spec.label_anchor, &at, settings.grid_size);
    let width = canvas.text_width(instance.label(), settings.font_size);
    for primitive in &label_box(
        instance.label(),
        anchor,
        width,
        settings.font_size,
        settings.label_padding,
    ) {
        canvas.draw(primitive);
    }
}

/// Draw every instance in document order, highlighting `selected`.
pub fn render_document<C: Canvas + ?Sized>(
    canvas: &mut C,
    document: &CircuitDocument,
    settings: &RenderSettings,
    selected: Option<usize>,
) {
    for (index, instance) in document.iter().enumerate() {
        render_instance(canvas, instance, settings, selected == Some(index));
    }
}

/// Draw the pending placement of `kind` without a label.
pub fn render_preview<C: Canvas + ?Sized>(
    canvas: &mut C,
    kind: ComponentKind,
    at: &Geometry,
    settings: &RenderSettings,
) -> Result<()> {
    let at = shifted(at, settings.offset);
    for primitive in &geometry(kind, &at, settings.grid_size, false)? {
        canvas.draw(primitive);
    }
    Ok(())
}

/// Smallest and largest grid coordinates touched by any endpoint or
/// position, or `None` for an empty document.
pub fn document_bounds(document: &CircuitDocument) -> Option<(Point, Point)> {
    let mut points = document.iter().flat_map(|instance| match *instance.geometry() {
        Geometry::Segment { start, end } => vec![start, end],
        Geometry::Point { position } => vec![position],
    });
    let first = points.next()?;
    Some(points.fold((first, first), |(min, max), q| {
        (
            Point::new(min.x.min(q.x), min.y.min(q.y)),
            Point::new(max.x.max(q.x), max.y.max(q.y)),
        )
    }))
}
