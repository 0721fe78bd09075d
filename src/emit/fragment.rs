//! Per-component circuitikz fragments.

use std::fmt::{self, Write};

use crate::components::{ComponentInstance, Coord, Geometry, Point};

/// Storage coordinates have y pointing down, TikZ has it pointing up.
struct TikzPoint(Point);

impl fmt::Display for TikzPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", Coord(self.0.x), Coord(-self.0.y))
    }
}

/// Write the fragment for one component, without the trailing newline.
///
/// Segments become a single `\draw`; point kinds become a `\draw` of the
/// node followed by one `to[short]` connector per breakout port, each on
/// its own line.
pub fn write_component<W: Write>(out: &mut W, component: &ComponentInstance) -> fmt::Result {
    let spec = component.spec();

    match *component.geometry() {
        Geometry::Segment { start, end } => {
            let draw = if spec.arrowhead { "\\draw [->]" } else { "\\draw" };
            write!(
                out,
                "{} {} {} {};",
                draw,
                TikzPoint(start),
                component.code_template(),
                TikzPoint(end)
            )
        }
        Geometry::Point { position } => {
            let anchor = Point::new(position.x, position.y + spec.anchor_dy);
            write!(out, "\\draw {} {};", TikzPoint(anchor), component.code_template())?;

            if let Some(name) = component.anchor_name() {
                for port in spec.breakout {
                    let target = Point::new(position.x + port.dx, position.y + port.dy);
                    write!(
                        out,
                        "\n\\draw ({}.{}) to[short] {};",
                        name,
                        port.name,
                        TikzPoint(target)
                    )?;
                }
            }
            Ok(())
        }
    }
}
