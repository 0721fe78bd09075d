//! Preview glyphs for point kinds.
//!
//! Each glyph is a fixed layout in grid units around the anchor position,
//! scaled to device units by the [`Pen`]. Bodies that must hide whatever is
//! drawn beneath them are emitted as a background fill followed by an
//! outline in the pen's ink.

use super::{Paint, Pen, Primitive};
use crate::components::Point;

/// Appends the primitives for one glyph anchored at `at` (grid units).
pub type GlyphFn = fn(at: Point, pen: &Pen, out: &mut Vec<Primitive>);

fn line(out: &mut Vec<Primitive>, pen: &Pen, at: Point, from: (f64, f64), to: (f64, f64)) {
    out.push(Primitive::Line {
        from: pen.at(at, from.0, from.1),
        to: pen.at(at, to.0, to.1),
        paint: pen.ink,
    });
}

/// Opaque polygon with an ink outline.
fn body(out: &mut Vec<Primitive>, pen: &Pen, at: Point, corners: &[(f64, f64)]) {
    let points: Vec<Point> = corners.iter().map(|&(dx, dy)| pen.at(at, dx, dy)).collect();
    out.push(Primitive::Polygon {
        points: points.clone(),
        paint: Paint::Background,
        filled: true,
    });
    out.push(Primitive::Polygon {
        points,
        paint: pen.ink,
        filled: false,
    });
}

fn oval(out: &mut Vec<Primitive>, pen: &Pen, at: Point, corner: (f64, f64), size: f64, paint: Paint, filled: bool) {
    out.push(Primitive::Oval {
        origin: pen.at(at, corner.0, corner.1),
        width: pen.scale(size),
        height: pen.scale(size),
        paint,
        filled,
    });
}

pub fn ground(at: Point, pen: &Pen, out: &mut Vec<Primitive>) {
    line(out, pen, at, (-1.0 / 4.0, 0.0), (1.0 / 4.0, 0.0));
    line(out, pen, at, (-1.0 / 8.0, 1.0 / 8.0), (1.0 / 8.0, 1.0 / 8.0));
    line(out, pen, at, (-1.0 / 16.0, 2.0 / 8.0), (1.0 / 16.0, 2.0 / 8.0));
}

pub fn vcc(at: Point, pen: &Pen, out: &mut Vec<Primitive>) {
    let tip = (0.0, -1.0 / 3.0);
    let barb = -1.0 / 5.0 + 1.0 / 8.0;
    line(out, pen, at, (0.0, 0.0), tip);
    line(out, pen, at, tip, (-1.0 / 8.0, barb));
    line(out, pen, at, tip, (1.0 / 8.0, barb));
}

pub fn vss(at: Point, pen: &Pen, out: &mut Vec<Primitive>) {
    let tip = (0.0, 1.0 / 3.0);
    let barb = 1.0 / 5.0 - 1.0 / 8.0;
    line(out, pen, at, (0.0, 0.0), tip);
    line(out, pen, at, tip, (-1.0 / 8.0, barb));
    line(out, pen, at, tip, (1.0 / 8.0, barb));
}

/// Three leads meeting in a circle; shared by BJTs, MOSFETs and IGBTs.
pub fn transistor(at: Point, pen: &Pen, out: &mut Vec<Primitive>) {
    line(out, pen, at, (0.0, 0.0), (0.0, -1.0));
    line(out, pen, at, (0.0, 0.0), (0.0, 1.0));
    line(out, pen, at, (0.0, 0.0), (-1.0, 0.0));
    let corner = (-1.0 / 3.0, -1.0 / 3.0);
    oval(out, pen, at, corner, 2.0 / 3.0, Paint::Background, true);
    oval(out, pen, at, corner, 2.0 / 3.0, pen.ink, false);
}

pub fn transformer(at: Point, pen: &Pen, out: &mut Vec<Primitive>) {
    for y in [1.0, -1.0] {
        line(out, pen, at, (-1.0, y), (-0.25, y));
        line(out, pen, at, (1.0, y), (0.25, y));
    }
    line(out, pen, at, (0.25, 1.0), (0.25, -1.0));
    line(out, pen, at, (-0.25, 1.0), (-0.25, -1.0));

    for x in [-0.35, 0.15] {
        out.push(Primitive::Rect {
            origin: pen.at(at, x, -0.5),
            width: pen.scale(0.2),
            height: pen.scale(1.0),
            paint: pen.ink,
            filled: true,
        });
    }
}

const AMP_BODY: [(f64, f64); 3] = [(0.8, 0.0), (-1.0, -1.0), (-1.0, 1.0)];

fn amp_inputs(out: &mut Vec<Primitive>, pen: &Pen, at: Point) {
    line(out, pen, at, (-1.5, -0.5), (-1.0, -0.5));
    line(out, pen, at, (-1.5, 0.5), (-1.0, 0.5));
}

/// Minus at `(x, -0.5)`, plus at `(x, 0.5)` with the given half widths.
fn input_signs(out: &mut Vec<Primitive>, pen: &Pen, at: Point, near: f64, far: f64, stroke: f64) {
    let mid = (near + far) / 2.0;
    line(out, pen, at, (near, -0.5), (far, -0.5));
    line(out, pen, at, (mid, 0.5 + stroke), (mid, 0.5 - stroke));
    line(out, pen, at, (near, 0.5), (far, 0.5));
}

pub fn opamp3(at: Point, pen: &Pen, out: &mut Vec<Primitive>) {
    line(out, pen, at, (0.8, 0.0), (1.2, 0.0));
    body(out, pen, at, &AMP_BODY);
    amp_inputs(out, pen, at);
    input_signs(out, pen, at, -0.4, -0.8, 0.2);
}

/// Same body as the three-terminal op-amp plus dots for the supply pins.
pub fn opamp5(at: Point, pen: &Pen, out: &mut Vec<Primitive>) {
    opamp3(at, pen, out);
    for y in [-1.0, 1.0] {
        oval(out, pen, at, (-1.0 / 8.0, y - 1.0 / 8.0), 1.0 / 4.0, pen.ink, true);
    }
}

pub fn buffer(at: Point, pen: &Pen, out: &mut Vec<Primitive>) {
    line(out, pen, at, (0.4, 0.0), (0.6, 0.0));
    body(out, pen, at, &[(0.3, 0.0), (-0.5, -0.5), (-0.5, 0.5)]);
    line(out, pen, at, (-1.0, 0.0), (-0.5, 0.0));
}

pub fn fd_opamp(at: Point, pen: &Pen, out: &mut Vec<Primitive>) {
    line(out, pen, at, (-0.1, -0.5), (0.75, -0.5));
    line(out, pen, at, (-0.1, 0.5), (0.75, 0.5));
    body(out, pen, at, &AMP_BODY);
    amp_inputs(out, pen, at);
    input_signs(out, pen, at, -0.7, -0.9, 0.1);

    // output polarity: minus below, plus above
    line(out, pen, at, (-0.4, 0.4), (-0.2, 0.4));
    line(out, pen, at, (-0.3, -0.5), (-0.3, -0.3));
    line(out, pen, at, (-0.4, -0.4), (-0.2, -0.4));
}

pub fn gm_amp(at: Point, pen: &Pen, out: &mut Vec<Primitive>) {
    line(out, pen, at, (-0.1, 0.0), (1.25, 0.0));
    body(out, pen, at, &[(0.8, 0.5), (0.8, -0.5), (-1.0, -1.0), (-1.0, 1.0)]);
    amp_inputs(out, pen, at);
    input_signs(out, pen, at, -0.7, -0.9, 0.1);
}

/// Two by one rectangle; shared by all block kinds.
pub fn block(at: Point, pen: &Pen, out: &mut Vec<Primitive>) {
    body(out, pen, at, &[(1.0, 0.5), (1.0, -0.5), (-1.0, -0.5), (-1.0, 0.5)]);
}

pub fn mixer(at: Point, pen: &Pen, out: &mut Vec<Primitive>) {
    oval(out, pen, at, (-0.5, -0.5), 1.0, pen.ink, false);
}

/// Small box hanging below the anchor, where the node text lands.
pub fn node(at: Point, pen: &Pen, out: &mut Vec<Primitive>) {
    body(out, pen, at, &[(0.2, 0.0), (0.2, 0.4), (-0.2, 0.4), (-0.2, 0.0)]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn draw(glyph: GlyphFn, at: Point, selected: bool) -> Vec<Primitive> {
        let mut out = Vec::new();
        glyph(at, &Pen::new(50.0, selected), &mut out);
        out
    }

    #[test]
    fn test_ground_bars_shrink() {
        let prims = draw(ground, Point::new(1.0, 1.0), false);
        assert_eq!(prims.len(), 3);
        let widths: Vec<f64> = prims
            .iter()
            .map(|p| match p {
                Primitive::Line { from, to, .. } => to.x - from.x,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_relative_eq!(widths[0], 25.0);
        assert_relative_eq!(widths[1], 12.5);
        assert_relative_eq!(widths[2], 6.25);
    }

    #[test]
    fn test_vcc_points_up_vss_points_down() {
        let tip_y = |prims: &[Primitive]| match &prims[0] {
            Primitive::Line { to, .. } => to.y,
            other => panic!("unexpected {other:?}"),
        };
        let up = draw(vcc, Point::new(0.0, 3.0), false);
        let down = draw(vss, Point::new(0.0, 3.0), false);
        assert!(tip_y(&up) < 150.0);
        assert!(tip_y(&down) > 150.0);
    }

    #[test]
    fn test_transistor_circle_hides_leads() {
        let prims = draw(transistor, Point::new(2.0, 2.0), false);
        assert_eq!(prims.len(), 5);
        match &prims[3] {
            Primitive::Oval {
                origin,
                width,
                paint,
                filled,
                ..
            } => {
                assert_eq!(*paint, Paint::Background);
                assert!(*filled);
                assert_relative_eq!(origin.x, 100.0 - 50.0 / 3.0);
                assert_relative_eq!(*width, 100.0 / 3.0);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            prims[4],
            Primitive::Oval { paint: Paint::Component, filled: false, .. }
        ));
    }

    #[test]
    fn test_selection_changes_only_ink() {
        let plain = draw(opamp5, Point::new(3.0, 3.0), false);
        let hot = draw(opamp5, Point::new(3.0, 3.0), true);
        assert_eq!(plain.len(), hot.len());
        for (a, b) in plain.iter().zip(&hot) {
            assert_eq!(a.with_paint(Paint::Component), b.with_paint(Paint::Component));
            if a.paint() == Paint::Background {
                assert_eq!(b.paint(), Paint::Background);
            } else {
                assert_eq!(b.paint(), Paint::Selected);
            }
        }
    }

    #[test]
    fn test_opamp5_adds_supply_dots() {
        assert_eq!(draw(opamp5, Point::default(), false).len(), draw(opamp3, Point::default(), false).len() + 2);
    }

    #[test]
    fn test_block_is_two_by_one() {
        let prims = draw(block, Point::new(0.0, 0.0), false);
        match &prims[1] {
            Primitive::Polygon { points, .. } => {
                let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
                let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
                assert_relative_eq!(xs.iter().cloned().fold(f64::MIN, f64::max), 50.0);
                assert_relative_eq!(xs.iter().cloned().fold(f64::MAX, f64::min), -50.0);
                assert_relative_eq!(ys.iter().cloned().fold(f64::MIN, f64::max), 25.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
