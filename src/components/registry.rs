//! Static registry of per-kind behavior.
//!
//! Every kind-specific decision (placement shape, identifier family, default
//! label and code template, breakout wiring, preview glyph, label anchor)
//! is read from one table indexed by the kind's code. Nothing else in the
//! crate matches on individual kinds for these properties.

use super::ids::Family;
use super::kind::{ComponentKind, Shape};
use crate::render::symbols::{self, GlyphFn};

/// One named port of a multi-terminal symbol, wired out to a grid point.
///
/// `dx`/`dy` are grid-unit offsets from the instance position in storage
/// coordinates (y grows downwards), applied before the y axis is flipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Port {
    pub name: &'static str,
    pub dx: f64,
    pub dy: f64,
}

const fn port(name: &'static str, dx: f64, dy: f64) -> Port {
    Port { name, dx, dy }
}

/// How the default code template is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateRule {
    /// Literal fragment, no identifier involved
    Fixed(&'static str),
    /// `node[<options>](<anchor>){<anchor>}`, the anchor doubles as the visible text
    LabelledNode(&'static str),
    /// `node[<options>] (<anchor>) {}`
    AnchoredNode(&'static str),
}

impl TemplateRule {
    /// Render the template for an instance with the given anchor name.
    pub fn render(&self, anchor: &str) -> String {
        match self {
            TemplateRule::Fixed(text) => (*text).to_string(),
            TemplateRule::LabelledNode(options) => {
                format!("node[{options}]({anchor}){{{anchor}}}")
            }
            TemplateRule::AnchoredNode(options) => format!("node[{options}] ({anchor}) {{}}"),
        }
    }
}

/// Where the on-canvas label sits relative to the instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAnchor {
    /// Midpoint of a segment
    Midpoint,
    /// Two thirds of a grid unit above the position
    Above,
    /// Two thirds of a grid unit below the position
    Below,
    /// On the position itself
    Center,
}

/// Preview drawing rule.
#[derive(Clone, Copy)]
pub enum SymbolRule {
    /// A straight line between the segment endpoints
    Line,
    /// A fixed glyph drawn around a point position
    Glyph(GlyphFn),
}

impl std::fmt::Debug for SymbolRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolRule::Line => f.write_str("Line"),
            SymbolRule::Glyph(_) => f.write_str("Glyph"),
        }
    }
}

/// Everything the crate knows about one kind.
#[derive(Debug, Clone, Copy)]
pub struct KindSpec {
    pub kind: ComponentKind,
    /// Name shown in component pickers
    pub name: &'static str,
    pub shape: Shape,
    pub family: Option<Family>,
    /// Initial user-visible label
    pub label: &'static str,
    pub template: TemplateRule,
    /// Ports broken out to the grid after the node is drawn
    pub breakout: &'static [Port],
    pub symbol: SymbolRule,
    pub label_anchor: LabelAnchor,
    /// Segment is drawn with an arrowhead
    pub arrowhead: bool,
    /// Vertical grid offset added to the position before emission
    pub anchor_dy: f64,
}

impl KindSpec {
    /// Default code template for an instance carrying `identifier`.
    pub fn default_template(&self, identifier: Option<u32>) -> String {
        let anchor = match (self.family, identifier) {
            (Some(family), Some(id)) => format!("{}{}", family.anchor_prefix(), id),
            (Some(family), None) => family.anchor_prefix().to_string(),
            (None, _) => String::new(),
        };
        self.template.render(&anchor)
    }
}

const BJT_NPN_PORTS: &[Port] = &[port("C", 0.0, -1.0), port("E", 0.0, 1.0), port("B", -1.0, 0.0)];
const BJT_PNP_PORTS: &[Port] = &[port("E", 0.0, -1.0), port("C", 0.0, 1.0), port("B", -1.0, 0.0)];
const N_CHANNEL_PORTS: &[Port] = &[port("D", 0.0, -1.0), port("S", 0.0, 1.0), port("G", -1.0, 0.0)];
const P_CHANNEL_PORTS: &[Port] = &[port("S", 0.0, -1.0), port("D", 0.0, 1.0), port("G", -1.0, 0.0)];
const TRANSFORMER_PORTS: &[Port] = &[
    port("A1", -1.0, -1.0),
    port("A2", -1.0, 1.0),
    port("B1", 1.0, -1.0),
    port("B2", 1.0, 1.0),
];
const AMP_INPUT_PORTS: &[Port] = &[port("-", -1.5, -0.5), port("+", -1.5, 0.5)];
const WIDE_AMP_INPUT_PORTS: &[Port] = &[port("-", -3.0, -1.0), port("+", -3.0, 1.0)];
const BUFFER_PORTS: &[Port] = &[port("in", -1.0, 0.0)];

const fn segment(
    kind: ComponentKind,
    name: &'static str,
    label: &'static str,
    template: &'static str,
) -> KindSpec {
    KindSpec {
        kind,
        name,
        shape: Shape::Segment,
        family: None,
        label,
        template: TemplateRule::Fixed(template),
        breakout: &[],
        symbol: SymbolRule::Line,
        label_anchor: LabelAnchor::Midpoint,
        arrowhead: false,
        anchor_dy: 0.0,
    }
}

const fn arrow(
    kind: ComponentKind,
    name: &'static str,
    label: &'static str,
    template: &'static str,
) -> KindSpec {
    KindSpec {
        arrowhead: true,
        ..segment(kind, name, label, template)
    }
}

const fn supply(
    kind: ComponentKind,
    name: &'static str,
    label: &'static str,
    template: &'static str,
    symbol: GlyphFn,
    label_anchor: LabelAnchor,
) -> KindSpec {
    KindSpec {
        kind,
        name,
        shape: Shape::Point,
        family: None,
        label,
        template: TemplateRule::Fixed(template),
        breakout: &[],
        symbol: SymbolRule::Glyph(symbol),
        label_anchor,
        arrowhead: false,
        anchor_dy: 0.0,
    }
}

const fn device(
    kind: ComponentKind,
    name: &'static str,
    label: &'static str,
    family: Family,
    template: TemplateRule,
    breakout: &'static [Port],
    symbol: GlyphFn,
) -> KindSpec {
    KindSpec {
        kind,
        name,
        shape: Shape::Point,
        family: Some(family),
        label,
        template,
        breakout,
        symbol: SymbolRule::Glyph(symbol),
        label_anchor: LabelAnchor::Center,
        arrowhead: false,
        anchor_dy: 0.0,
    }
}

use ComponentKind as K;
use TemplateRule::{AnchoredNode, LabelledNode};

/// Indexed by [`ComponentKind::code`].
static REGISTRY: [KindSpec; 32] = [
    segment(K::Wire, "Wire", "Wire", "to[short]"),
    segment(K::Resistor, "Resistor", "R", "to[R,l=$R$]"),
    segment(K::Capacitor, "Capacitor", "C", "to[C,l=$C$]"),
    segment(K::Inductor, "Inductor", "L", "to[L,l=$L$]"),
    segment(K::Diode, "Diode", "D", "to[D,l=$D$]"),
    segment(K::VoltageSource, "Voltage Source", "V", "to[V,l=$V$]"),
    segment(K::CurrentSource, "Current Source", "I", "to[isource,l=$I$]"),
    supply(K::Ground, "Ground", "GND", "node[ground]{}", symbols::ground, LabelAnchor::Below),
    supply(K::Vcc, "VCC", "VCC", "node[vcc]{VCC}", symbols::vcc, LabelAnchor::Above),
    supply(K::Vss, "VSS", "VSS", "node[vss]{VSS}", symbols::vss, LabelAnchor::Below),
    device(
        K::NpnTransistor,
        "NPN Transistor",
        "NPN Transistor",
        Family::TransistorLike,
        LabelledNode("npn"),
        BJT_NPN_PORTS,
        symbols::transistor,
    ),
    device(
        K::PnpTransistor,
        "PNP Transistor",
        "PNP Transistor",
        Family::TransistorLike,
        LabelledNode("pnp"),
        BJT_PNP_PORTS,
        symbols::transistor,
    ),
    device(
        K::Nmos,
        "N-MOS",
        "N-MOS",
        Family::TransistorLike,
        LabelledNode("nmos"),
        N_CHANNEL_PORTS,
        symbols::transistor,
    ),
    device(
        K::Pmos,
        "P-MOS",
        "P-MOS",
        Family::TransistorLike,
        LabelledNode("pmos"),
        P_CHANNEL_PORTS,
        symbols::transistor,
    ),
    device(
        K::Nigbt,
        "N-IGBT",
        "N-IGBT",
        Family::TransistorLike,
        LabelledNode("nigbt"),
        N_CHANNEL_PORTS,
        symbols::transistor,
    ),
    device(
        K::Pigbt,
        "P-IGBT",
        "P-IGBT",
        Family::TransistorLike,
        LabelledNode("pigbt"),
        P_CHANNEL_PORTS,
        symbols::transistor,
    ),
    device(
        K::OpAmp3,
        "3-Terminal Op-Amp",
        "3T OpAmp",
        Family::OpAmp,
        AnchoredNode("op amp,scale=1.02"),
        AMP_INPUT_PORTS,
        symbols::opamp3,
    ),
    device(
        K::OpAmp5,
        "5-Terminal Op-Amp",
        "5-Term Opamp",
        Family::OpAmp,
        AnchoredNode("op amp,scale=2.04"),
        WIDE_AMP_INPUT_PORTS,
        symbols::opamp5,
    ),
    device(
        K::Transformer,
        "Transformer",
        "Transformer",
        Family::Transformer,
        AnchoredNode("transformer,scale=.952"),
        TRANSFORMER_PORTS,
        symbols::transformer,
    ),
    device(
        K::TransformerCore,
        "Transformer with Core",
        "Transformer w/ Core",
        Family::Transformer,
        AnchoredNode("transformer core,scale=.952"),
        TRANSFORMER_PORTS,
        symbols::transformer,
    ),
    segment(K::Switch, "Switch", "NOS", "to[nos]"),
    device(
        K::Buffer,
        "Buffer",
        "Buffer",
        Family::Buffer,
        AnchoredNode("buffer, scale=1"),
        BUFFER_PORTS,
        symbols::buffer,
    ),
    device(
        K::FdOpAmp,
        "Fully Differential Op-Amp",
        "FD OpAmp",
        Family::OpAmp,
        AnchoredNode("fd op amp, scale=1.02"),
        AMP_INPUT_PORTS,
        symbols::fd_opamp,
    ),
    device(
        K::GmAmp,
        "Transconductance Amplifier",
        "Gm cell",
        Family::OpAmp,
        AnchoredNode("gm amp, scale=1.02"),
        AMP_INPUT_PORTS,
        symbols::gm_amp,
    ),
    device(
        K::Block,
        "Block",
        "Block",
        Family::Block,
        AnchoredNode("block, scale=1"),
        &[],
        symbols::block,
    ),
    device(
        K::Mixer,
        "Mixer",
        "X",
        Family::Mixer,
        AnchoredNode("mixer, scale=1"),
        &[],
        symbols::mixer,
    ),
    arrow(K::Arrow, "Arrow", "->", "--"),
    arrow(
        K::NegativeArrow,
        "Negative Arrow",
        "-> -",
        "-- node[at end, xshift=0.25cm, yshift=0.25cm] {$-$}",
    ),
    KindSpec {
        anchor_dy: 0.3,
        ..supply(K::Node, "Node", "x", "node[] {$x$}", symbols::node, LabelAnchor::Center)
    },
    segment(K::Impedance, "Impedance", "Z", "to[european resistor,l=$Z$]"),
    device(
        K::BlockAcDc,
        "AC/DC Block",
        "SACDC",
        Family::Block,
        AnchoredNode("sacdc, scale=1"),
        &[],
        symbols::block,
    ),
    device(
        K::BlockDcAc,
        "DC/AC Block",
        "SDCAC",
        Family::Block,
        AnchoredNode("sdcac, scale=1"),
        &[],
        symbols::block,
    ),
];

/// Registry entry for `kind`.
pub fn spec(kind: ComponentKind) -> &'static KindSpec {
    &REGISTRY[kind as usize]
}

/// Whether `kind` is placed with two endpoints.
pub fn classify(kind: ComponentKind) -> Shape {
    spec(kind).shape
}

/// Initial label for `kind`.
pub fn default_label(kind: ComponentKind) -> &'static str {
    spec(kind).label
}

/// Identifier family of `kind`, if instances need unique anchor names.
pub fn identifier_family(kind: ComponentKind) -> Option<Family> {
    spec(kind).family
}

/// Default code template for `kind` with the given identifier.
pub fn default_template(kind: ComponentKind, identifier: Option<u32>) -> String {
    spec(kind).default_template(identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_indexed_by_code() {
        for kind in ComponentKind::ALL {
            assert_eq!(spec(kind).kind, kind);
        }
    }

    #[test]
    fn test_classification() {
        let segments = [
            K::Wire,
            K::Resistor,
            K::Capacitor,
            K::Inductor,
            K::Diode,
            K::VoltageSource,
            K::CurrentSource,
            K::Switch,
            K::Impedance,
            K::Arrow,
            K::NegativeArrow,
        ];
        for kind in ComponentKind::ALL {
            let expected = if segments.contains(&kind) {
                Shape::Segment
            } else {
                Shape::Point
            };
            assert_eq!(classify(kind), expected, "{kind:?}");
        }
    }

    #[test]
    fn test_families_only_on_point_kinds() {
        for kind in ComponentKind::ALL {
            if identifier_family(kind).is_some() {
                assert_eq!(classify(kind), Shape::Point, "{kind:?}");
            }
        }
        assert_eq!(identifier_family(K::BlockAcDc), Some(Family::Block));
        assert_eq!(identifier_family(K::BlockDcAc), Some(Family::Block));
        assert_eq!(identifier_family(K::Node), None);
        assert_eq!(identifier_family(K::Ground), None);
    }

    #[test]
    fn test_default_templates() {
        assert_eq!(default_template(K::Resistor, None), "to[R,l=$R$]");
        assert_eq!(default_template(K::NpnTransistor, Some(3)), "node[npn](Q3){Q3}");
        assert_eq!(
            default_template(K::OpAmp3, Some(1)),
            "node[op amp,scale=1.02] (opamp1) {}"
        );
        assert_eq!(
            default_template(K::TransformerCore, Some(2)),
            "node[transformer core,scale=.952] (T2) {}"
        );
        assert_eq!(default_template(K::Mixer, Some(1)), "node[mixer, scale=1] (mixer1) {}");
        assert_eq!(default_template(K::Node, None), "node[] {$x$}");
    }

    #[test]
    fn test_default_labels() {
        assert_eq!(default_label(K::Resistor), "R");
        assert_eq!(default_label(K::NpnTransistor), "NPN Transistor");
        assert_eq!(default_label(K::GmAmp), "Gm cell");
        assert_eq!(default_label(K::NegativeArrow), "-> -");
    }

    #[test]
    fn test_breakout_coverage() {
        let wired = [
            K::NpnTransistor,
            K::PnpTransistor,
            K::Nmos,
            K::Pmos,
            K::Nigbt,
            K::Pigbt,
            K::OpAmp3,
            K::OpAmp5,
            K::Transformer,
            K::TransformerCore,
            K::Buffer,
            K::FdOpAmp,
            K::GmAmp,
        ];
        for kind in ComponentKind::ALL {
            assert_eq!(!spec(kind).breakout.is_empty(), wired.contains(&kind), "{kind:?}");
        }
    }
}
