//! SVG backend for headless previews.

use quick_xml::escape::escape;

use super::{Canvas, Paint, Primitive};
use crate::components::Point;
use crate::config::Palette;

/// Accumulates primitives as SVG elements.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    palette: Palette,
    body: String,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64, palette: Palette) -> Self {
        Self {
            width,
            height,
            palette,
            body: String::new(),
        }
    }

    fn color(&self, paint: Paint) -> &str {
        match paint {
            Paint::Component => &self.palette.component,
            Paint::Selected => &self.palette.selected,
            Paint::Background => &self.palette.background,
        }
    }

    fn style(&self, paint: Paint, filled: bool) -> String {
        let color = self.color(paint);
        if filled {
            format!(r#"fill="{color}" stroke="none""#)
        } else {
            format!(r#"fill="none" stroke="{color}""#)
        }
    }

    /// Close the document and return the SVG text.
    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n  \
             <rect x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" fill=\"{bg}\"/>\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            bg = self.palette.background,
            body = self.body,
        )
    }
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

impl Canvas for SvgCanvas {
    fn draw(&mut self, primitive: &Primitive) {
        let element = match primitive {
            Primitive::Line { from, to, paint } => format!(
                r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}"/>"#,
                from.x,
                from.y,
                to.x,
                to.y,
                self.color(*paint)
            ),
            Primitive::Oval {
                origin,
                width,
                height,
                paint,
                filled,
            } => format!(
                r#"  <ellipse cx="{:.2}" cy="{:.2}" rx="{:.2}" ry="{:.2}" {}/>"#,
                origin.x + width / 2.0,
                origin.y + height / 2.0,
                width / 2.0,
                height / 2.0,
                self.style(*paint, *filled)
            ),
            Primitive::Rect {
                origin,
                width,
                height,
                paint,
                filled,
            } => format!(
                r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" {}/>"#,
                origin.x,
                origin.y,
                width,
                height,
                self.style(*paint, *filled)
            ),
            Primitive::Polygon {
                points,
                paint,
                filled,
            } => format!(
                r#"  <polygon points="{}" {}/>"#,
                points_attr(points),
                self.style(*paint, *filled)
            ),
            Primitive::Text {
                origin,
                text,
                font_size,
                paint,
            } => format!(
                r#"  <text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{}" fill="{}">{}</text>"#,
                origin.x,
                origin.y,
                font_size,
                self.color(*paint),
                escape(text.as_str())
            ),
        };
        self.body.push_str(&element);
        self.body.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::CircuitDocument;
    use crate::components::ComponentKind;
    use crate::render::{render_document, RenderSettings};

    #[test]
    fn test_empty_canvas() {
        let svg = SvgCanvas::new(100.0, 80.0, Palette::default()).finish();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100\" height=\"80\""));
        assert!(svg.contains(&format!("fill=\"{}\"", Palette::default().background)));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_primitives_become_elements() {
        let mut canvas = SvgCanvas::new(200.0, 200.0, Palette::default());
        canvas.draw(&Primitive::Line {
            from: Point::new(0.0, 0.0),
            to: Point::new(10.0, 5.5),
            paint: Paint::Selected,
        });
        canvas.draw(&Primitive::Oval {
            origin: Point::new(10.0, 10.0),
            width: 20.0,
            height: 20.0,
            paint: Paint::Component,
            filled: false,
        });
        let svg = canvas.finish();
        let selected = Palette::default().selected;
        assert!(svg.contains(&format!(
            r#"<line x1="0.00" y1="0.00" x2="10.00" y2="5.50" stroke="{selected}"/>"#
        )));
        assert!(svg.contains(r#"<ellipse cx="20.00" cy="20.00" rx="10.00" ry="10.00" fill="none""#));
    }

    #[test]
    fn test_label_text_is_escaped() {
        let mut doc = CircuitDocument::new();
        let index = doc
            .place_segment(Point::new(0.0, 0.0), Point::new(2.0, 0.0), ComponentKind::Resistor)
            .unwrap();
        doc.get_mut(index).unwrap().set_label("R<1> & R2");

        let mut canvas = SvgCanvas::new(200.0, 100.0, Palette::default());
        render_document(&mut canvas, &doc, &RenderSettings::default(), None);
        let svg = canvas.finish();
        assert!(svg.contains(">R&lt;1&gt; &amp; R2</text>"));
        assert_eq!(svg.matches("<line").count(), 1);
    }
}
