//! The closed catalog of component kinds.

use std::fmt;

use crate::error::{Result, TikzcircError};
use crate::session::EditCommand;

/// Whether a kind is placed with two endpoints or a single position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Two-terminal element drawn from a start point to an end point
    Segment,
    /// Element anchored at one position
    Point,
}

impl Shape {
    /// Lowercase name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Segment => "segment",
            Shape::Point => "point",
        }
    }
}

/// Every drawable component kind.
///
/// The discriminant is the numeric code persisted in saved schematics, so
/// existing values must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ComponentKind {
    Wire = 0,
    Resistor = 1,
    Capacitor = 2,
    Inductor = 3,
    Diode = 4,
    VoltageSource = 5,
    CurrentSource = 6,
    Ground = 7,
    Vcc = 8,
    Vss = 9,
    NpnTransistor = 10,
    PnpTransistor = 11,
    Nmos = 12,
    Pmos = 13,
    Nigbt = 14,
    Pigbt = 15,
    OpAmp3 = 16,
    OpAmp5 = 17,
    Transformer = 18,
    TransformerCore = 19,
    Switch = 20,
    Buffer = 21,
    FdOpAmp = 22,
    GmAmp = 23,
    Block = 24,
    Mixer = 25,
    Arrow = 26,
    NegativeArrow = 27,
    Node = 28,
    Impedance = 29,
    BlockAcDc = 30,
    BlockDcAc = 31,
}

impl ComponentKind {
    /// All kinds, in code order.
    pub const ALL: [ComponentKind; 32] = [
        Self::Wire,
        Self::Resistor,
        Self::Capacitor,
        Self::Inductor,
        Self::Diode,
        Self::VoltageSource,
        Self::CurrentSource,
        Self::Ground,
        Self::Vcc,
        Self::Vss,
        Self::NpnTransistor,
        Self::PnpTransistor,
        Self::Nmos,
        Self::Pmos,
        Self::Nigbt,
        Self::Pigbt,
        Self::OpAmp3,
        Self::OpAmp5,
        Self::Transformer,
        Self::TransformerCore,
        Self::Switch,
        Self::Buffer,
        Self::FdOpAmp,
        Self::GmAmp,
        Self::Block,
        Self::Mixer,
        Self::Arrow,
        Self::NegativeArrow,
        Self::Node,
        Self::Impedance,
        Self::BlockAcDc,
        Self::BlockDcAc,
    ];

    /// Numeric code written to the `type` field of a saved record.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Look up a kind by its numeric code.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Resolve a code coming from outside the crate.
    ///
    /// Command codes (delete/cancel) are rejected with `InvalidKind` because
    /// they never describe something that can be drawn.
    pub fn resolve(code: u32, expected: Shape) -> Result<Self> {
        if let Some(command) = EditCommand::from_code(code) {
            return Err(TikzcircError::invalid_kind(
                format!("{} command", command.name()),
                expected.name(),
            ));
        }
        Self::from_code(code).ok_or(TikzcircError::UnknownKindCode { code })
    }

    /// Placement shape of this kind, read from the registry.
    pub fn shape(self) -> Shape {
        super::registry::spec(self).shape
    }

    /// Whether this kind is placed with two endpoints.
    pub fn is_segment(self) -> bool {
        self.shape() == Shape::Segment
    }

    /// Whether this kind is a MOSFET, which needs document-wide style directives.
    pub fn is_fet(self) -> bool {
        matches!(self, Self::Nmos | Self::Pmos)
    }

    /// Name shown in component pickers.
    pub fn display_name(self) -> &'static str {
        super::registry::spec(self).name
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
