//! Placed component instances.

use std::fmt;

use log::warn;

use super::ids::IdentifierAllocator;
use super::kind::{ComponentKind, Shape};
use super::registry::{self, KindSpec};
use crate::error::{Result, TikzcircError};

/// A position in grid coordinates (not pixels). y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Translate by `offset`.
    pub fn offset_by(&self, offset: Point) -> Point {
        Point::new(self.x + offset.x, self.y + offset.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", Coord(self.x), Coord(self.y))
    }
}

/// Formats a coordinate in shortest round-trip form, never as `-0`.
#[derive(Debug, Clone, Copy)]
pub struct Coord(pub f64);

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // -0.0 + 0.0 == +0.0
        write!(f, "{}", self.0 + 0.0)
    }
}

/// Placement geometry; which variant is used is fixed by the kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Segment { start: Point, end: Point },
    Point { position: Point },
}

impl Geometry {
    pub fn shape(&self) -> Shape {
        match self {
            Geometry::Segment { .. } => Shape::Segment,
            Geometry::Point { .. } => Shape::Point,
        }
    }

    /// Representative point: segment midpoint or the position.
    pub fn center(&self) -> Point {
        match self {
            Geometry::Segment { start, end } => start.midpoint(*end),
            Geometry::Point { position } => *position,
        }
    }
}

/// One placed element of a schematic.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentInstance {
    kind: ComponentKind,
    geometry: Geometry,
    label: String,
    code_template: String,
    identifier: Option<u32>,
}

impl ComponentInstance {
    /// Create a point-kind instance at `position`.
    ///
    /// Allocates an identifier from `ids` when the kind's family needs one.
    pub fn create_point(
        position: Point,
        kind: ComponentKind,
        ids: &mut IdentifierAllocator,
    ) -> Result<Self> {
        Self::build(kind, Geometry::Point { position }, ids, None)
    }

    /// Create a segment-kind instance from `start` to `end`.
    pub fn create_segment(
        start: Point,
        end: Point,
        kind: ComponentKind,
        ids: &mut IdentifierAllocator,
    ) -> Result<Self> {
        Self::build(kind, Geometry::Segment { start, end }, ids, None)
    }

    /// Create a point instance from a raw kind code, as received from a
    /// collaborator that may also hand over command codes.
    pub fn create_point_from_code(
        position: Point,
        code: u32,
        ids: &mut IdentifierAllocator,
    ) -> Result<Self> {
        let kind = ComponentKind::resolve(code, Shape::Point)?;
        Self::create_point(position, kind, ids)
    }

    /// Create a segment instance from a raw kind code.
    pub fn create_segment_from_code(
        start: Point,
        end: Point,
        code: u32,
        ids: &mut IdentifierAllocator,
    ) -> Result<Self> {
        let kind = ComponentKind::resolve(code, Shape::Segment)?;
        Self::create_segment(start, end, kind, ids)
    }

    /// Construct with an identifier restored from a saved file instead of a
    /// freshly allocated one. `identifier` is ignored for kinds without a
    /// family; one that is 0 or already in use is replaced by a fresh one.
    pub(crate) fn restore(
        kind: ComponentKind,
        geometry: Geometry,
        ids: &mut IdentifierAllocator,
        identifier: Option<u32>,
    ) -> Result<Self> {
        Self::build(kind, geometry, ids, identifier)
    }

    fn build(
        kind: ComponentKind,
        geometry: Geometry,
        ids: &mut IdentifierAllocator,
        restored: Option<u32>,
    ) -> Result<Self> {
        let spec = registry::spec(kind);
        if spec.shape != geometry.shape() {
            return Err(TikzcircError::invalid_kind(
                spec.name,
                geometry.shape().name(),
            ));
        }

        let identifier = spec.family.map(|family| match restored {
            Some(id) if ids.claim(family, id) => id,
            Some(id) => {
                let fresh = ids.next(family);
                warn!(
                    "{}{} is already in use, renumbered to {}{}",
                    family.anchor_prefix(),
                    id,
                    family.anchor_prefix(),
                    fresh
                );
                fresh
            }
            None => ids.next(family),
        });

        Ok(Self {
            kind,
            geometry,
            label: spec.label.to_string(),
            code_template: spec.default_template(identifier),
            identifier,
        })
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Registry entry of this instance's kind.
    pub fn spec(&self) -> &'static KindSpec {
        registry::spec(self.kind)
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Whether this is a segment (two-endpoint) instance.
    pub fn is_path(&self) -> bool {
        matches!(self.geometry, Geometry::Segment { .. })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, text: impl Into<String>) {
        self.label = text.into();
    }

    /// Raw code fragment emitted for this instance.
    pub fn code_template(&self) -> &str {
        &self.code_template
    }

    pub fn set_code_template(&mut self, text: impl Into<String>) {
        self.code_template = text.into();
    }

    /// Allocated family identifier, if the kind has a family.
    pub fn identifier(&self) -> Option<u32> {
        self.identifier
    }

    /// Anchor name used for breakout wiring, e.g. `Q2`.
    pub fn anchor_name(&self) -> Option<String> {
        let family = self.spec().family?;
        let id = self.identifier?;
        Some(format!("{}{}", family.anchor_prefix(), id))
    }

    pub fn start(&self) -> Result<Point> {
        match self.geometry {
            Geometry::Segment { start, .. } => Ok(start),
            Geometry::Point { .. } => Err(TikzcircError::invalid_state("start", "point")),
        }
    }

    pub fn end(&self) -> Result<Point> {
        match self.geometry {
            Geometry::Segment { end, .. } => Ok(end),
            Geometry::Point { .. } => Err(TikzcircError::invalid_state("end", "point")),
        }
    }

    pub fn position(&self) -> Result<Point> {
        match self.geometry {
            Geometry::Point { position } => Ok(position),
            Geometry::Segment { .. } => Err(TikzcircError::invalid_state("position", "segment")),
        }
    }

    /// Label plus coordinates, for listing widgets.
    pub fn summary(&self) -> String {
        match self.geometry {
            Geometry::Segment { start, end } => format!("{} {} to {}", self.label, start, end),
            Geometry::Point { position } => format!("{} {}", self.label, position),
        }
    }
}
