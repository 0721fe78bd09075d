//! circuitikz code generation.
//!
//! Renders a [`CircuitDocument`] into a LaTeX fragment. The three
//! [`EmitOptions`] toggles only change the header and footer; every
//! component is emitted the same way regardless of them.
//!
//! # Output layout
//!
//! ```text
//! \begin{figure}[H]                     <- wrap_in_figure (+ placement_hint)
//! \centering
//! \begin{circuitikz}[>=latex'][american]
//! \tikzstyle{block} = [...]
//! \ctikzset{tripoles/mos style/arrows}  <- only if a MOSFET is present
//! \ctikzset{tripoles/pmos style/nocircle}
//! \draw (0,0) to[R,l=$R$] (2,0);        <- one fragment per component
//! \end{circuitikz}
//! \caption{Caption}
//! \end{figure}
//! ```

mod fragment;

pub use fragment::write_component;

use std::fmt;

use log::debug;
use serde::Deserialize;

use crate::circuit::CircuitDocument;

/// Document-level formatting toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    /// Wrap the picture in a `figure` environment with a caption placeholder
    pub wrap_in_figure: bool,
    /// Request American-style symbols
    pub american_style: bool,
    /// Add the `[H]` placement hint
    pub placement_hint: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            wrap_in_figure: true,
            american_style: true,
            placement_hint: true,
        }
    }
}

/// Style directives required once per document when MOSFETs are drawn.
pub const MOS_STYLE_DIRECTIVES: [&str; 2] = [
    "\\ctikzset{tripoles/mos style/arrows}",
    "\\ctikzset{tripoles/pmos style/nocircle}",
];

const BLOCK_STYLE: &str =
    "\\tikzstyle{block} = [draw, rectangle, minimum height=1cm, minimum width=2cm]";

/// Displays a document as circuitikz source.
pub struct LatexEmitter<'a> {
    document: &'a CircuitDocument,
    options: EmitOptions,
}

impl<'a> LatexEmitter<'a> {
    pub fn new(document: &'a CircuitDocument, options: EmitOptions) -> Self {
        Self { document, options }
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let EmitOptions {
            wrap_in_figure,
            american_style,
            placement_hint,
        } = self.options;

        if wrap_in_figure {
            f.write_str("\\begin{figure}")?;
            if placement_hint {
                f.write_str("[H]")?;
            }
            f.write_str("\n\\centering\n\\begin{circuitikz}[>=latex']")?;
            if american_style {
                f.write_str("[american]")?;
            }
            writeln!(f)?;
            writeln!(f, "{BLOCK_STYLE}")
        } else {
            let options = match (placement_hint, american_style) {
                (true, true) => "[H, american]",
                (true, false) => "[H]",
                (false, true) => "[american]",
                (false, false) => "",
            };
            writeln!(f, "\\begin{{circuitikz}}{options}")
        }
    }

    fn write_footer(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\\end{circuitikz}")?;
        if self.options.wrap_in_figure {
            f.write_str("\n\\caption{Caption}\n\\end{figure}")?;
        }
        Ok(())
    }
}

impl fmt::Display for LatexEmitter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;

        if self.document.contains_fet() {
            for directive in MOS_STYLE_DIRECTIVES {
                writeln!(f, "{directive}")?;
            }
        }

        for component in self.document.iter() {
            write_component(f, component)?;
            writeln!(f)?;
        }

        self.write_footer(f)
    }
}

/// Render the whole document as circuitikz source.
pub fn emit_document(document: &CircuitDocument, options: EmitOptions) -> String {
    debug!(
        "emitting {} components (figure={}, american={}, hint={})",
        document.len(),
        options.wrap_in_figure,
        options.american_style,
        options.placement_hint
    );
    LatexEmitter::new(document, options).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ComponentKind, Point};

    fn options(wrap: bool, hint: bool, american: bool) -> EmitOptions {
        EmitOptions {
            wrap_in_figure: wrap,
            american_style: american,
            placement_hint: hint,
        }
    }

    const WRAPPED_TAIL: &str = "\\end{circuitikz}\n\\caption{Caption}\n\\end{figure}";

    #[test]
    fn test_headers_wrapped() {
        let doc = CircuitDocument::new();
        let cases = [
            (true, true, "\\begin{figure}[H]\n\\centering\n\\begin{circuitikz}[>=latex'][american]\n"),
            (true, false, "\\begin{figure}[H]\n\\centering\n\\begin{circuitikz}[>=latex']\n"),
            (false, true, "\\begin{figure}\n\\centering\n\\begin{circuitikz}[>=latex'][american]\n"),
            (false, false, "\\begin{figure}\n\\centering\n\\begin{circuitikz}[>=latex']\n"),
        ];
        for (hint, american, head) in cases {
            let expected = format!("{head}{BLOCK_STYLE}\n{WRAPPED_TAIL}");
            assert_eq!(emit_document(&doc, options(true, hint, american)), expected);
        }
    }

    #[test]
    fn test_headers_bare() {
        let doc = CircuitDocument::new();
        let cases = [
            (true, true, "\\begin{circuitikz}[H, american]\n"),
            (true, false, "\\begin{circuitikz}[H]\n"),
            (false, true, "\\begin{circuitikz}[american]\n"),
            (false, false, "\\begin{circuitikz}\n"),
        ];
        for (hint, american, head) in cases {
            let expected = format!("{head}\\end{{circuitikz}}");
            assert_eq!(emit_document(&doc, options(false, hint, american)), expected);
        }
    }

    #[test]
    fn test_components_in_order() {
        let mut doc = CircuitDocument::new();
        doc.place_segment(Point::new(0.0, 0.0), Point::new(2.0, 0.0), ComponentKind::Resistor)
            .unwrap();
        doc.place_point(Point::new(2.0, 1.0), ComponentKind::Ground).unwrap();
        let out = emit_document(&doc, options(false, false, false));
        assert_eq!(
            out,
            "\\begin{circuitikz}\n\
             \\draw (0,0) to[R,l=$R$] (2,0);\n\
             \\draw (2,-1) node[ground]{};\n\
             \\end{circuitikz}"
        );
    }

    #[test]
    fn test_mos_directives_once_before_components() {
        let mut doc = CircuitDocument::new();
        doc.place_segment(Point::new(0.0, 0.0), Point::new(1.0, 0.0), ComponentKind::Wire)
            .unwrap();
        doc.place_point(Point::new(3.0, 3.0), ComponentKind::Nmos).unwrap();
        let out = emit_document(&doc, EmitOptions::default());

        for directive in MOS_STYLE_DIRECTIVES {
            assert_eq!(out.matches(directive).count(), 1);
            assert!(out.find(directive).unwrap() < out.find("\\draw").unwrap());
        }
    }

    #[test]
    fn test_no_mos_directives_without_fets() {
        let mut doc = CircuitDocument::new();
        doc.place_point(Point::new(0.0, 0.0), ComponentKind::NpnTransistor)
            .unwrap();
        doc.place_point(Point::new(4.0, 0.0), ComponentKind::Pigbt).unwrap();
        let out = emit_document(&doc, EmitOptions::default());
        assert!(!out.contains("ctikzset"));
    }
}
