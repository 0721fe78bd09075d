//! One component as a flat tagged record.

use std::borrow::Cow;
use std::fmt::Write;

use log::warn;
use quick_xml::escape::{minimal_escape, unescape};

use crate::components::{ComponentInstance, ComponentKind, Coord, Geometry, IdentifierAllocator, Point, Shape};
use crate::error::{Result, TikzcircError};

pub const RECORD_TAG: &str = "component";
pub const PATH_TAG: &str = "pathComponent";
pub const START_X_TAG: &str = "start-x";
pub const START_Y_TAG: &str = "start-y";
pub const END_X_TAG: &str = "end-x";
pub const END_Y_TAG: &str = "end-y";
pub const POSITION_X_TAG: &str = "position-x";
pub const POSITION_Y_TAG: &str = "position-y";
pub const TYPE_TAG: &str = "type";
pub const LABEL_TAG: &str = "label";
pub const TEMPLATE_TAG: &str = "latexParameters";
pub const IDENTIFIER_TAG: &str = "identifier";

/// Escape user text so it cannot close its own tag or split the record line.
///
/// Only `<`, `&` and line breaks are touched, so labels such as `->` are
/// stored as typed.
fn escape_text(text: &str) -> String {
    minimal_escape(text)
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
}

fn unescape_text<'a>(raw: &'a str, tag: &str) -> Cow<'a, str> {
    match unescape(raw) {
        Ok(text) => text,
        Err(e) => {
            warn!("keeping raw <{}> text, cannot decode it: {}", tag, e);
            Cow::Borrowed(raw)
        }
    }
}

/// Raw contents between the first `<tag>` and the following `</tag>`.
pub fn tag_value<'a>(record: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = record.find(&open)? + open.len();
    let len = record[start..].find(&close)?;
    Some(&record[start..start + len])
}

/// Tag contents, or an empty string (with a warning) if the tag is missing.
fn field<'a>(record: &'a str, tag: &str) -> &'a str {
    tag_value(record, tag).unwrap_or_else(|| {
        warn!("tag \"{}\" not found in record", tag);
        ""
    })
}

fn number(record: &str, tag: &str) -> f64 {
    let raw = field(record, tag).trim();
    raw.parse().unwrap_or_else(|_| {
        if !raw.is_empty() {
            warn!("<{}> value '{}' is not a number, using 0", tag, raw);
        }
        0.0
    })
}

fn point(record: &str, x_tag: &str, y_tag: &str) -> Point {
    Point::new(number(record, x_tag), number(record, y_tag))
}

/// Encode one instance as a single-line record.
pub fn serialize(instance: &ComponentInstance) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_record(&mut out, instance);
    out
}

fn write_record(out: &mut String, instance: &ComponentInstance) -> std::fmt::Result {
    write!(out, "<{RECORD_TAG}>")?;
    match *instance.geometry() {
        Geometry::Segment { start, end } => {
            write!(out, "<{PATH_TAG}>true</{PATH_TAG}>")?;
            write!(out, "<{START_X_TAG}>{}</{START_X_TAG}>", Coord(start.x))?;
            write!(out, "<{START_Y_TAG}>{}</{START_Y_TAG}>", Coord(start.y))?;
            write!(out, "<{END_X_TAG}>{}</{END_X_TAG}>", Coord(end.x))?;
            write!(out, "<{END_Y_TAG}>{}</{END_Y_TAG}>", Coord(end.y))?;
        }
        Geometry::Point { position } => {
            write!(out, "<{PATH_TAG}>false</{PATH_TAG}>")?;
            write!(out, "<{POSITION_X_TAG}>{}</{POSITION_X_TAG}>", Coord(position.x))?;
            write!(out, "<{POSITION_Y_TAG}>{}</{POSITION_Y_TAG}>", Coord(position.y))?;
        }
    }
    write!(out, "<{TYPE_TAG}>{}</{TYPE_TAG}>", instance.kind().code())?;
    write!(out, "<{LABEL_TAG}>{}</{LABEL_TAG}>", escape_text(instance.label()))?;
    write!(
        out,
        "<{TEMPLATE_TAG}>{}</{TEMPLATE_TAG}>",
        escape_text(instance.code_template())
    )?;
    if let Some(id) = instance.identifier() {
        write!(out, "<{IDENTIFIER_TAG}>{id}</{IDENTIFIER_TAG}>")?;
    }
    write!(out, "</{RECORD_TAG}>")
}

/// Decode one record, constructing it with `ids`.
///
/// Tag order does not matter. Missing text and coordinate tags degrade to
/// empty strings and zeros; a missing or unusable `type` fails the record.
pub fn deserialize(record: &str, ids: &mut IdentifierAllocator) -> Result<ComponentInstance> {
    deserialize_line(record, 1, ids)
}

pub(crate) fn deserialize_line(
    record: &str,
    line: usize,
    ids: &mut IdentifierAllocator,
) -> Result<ComponentInstance> {
    let code_text = field(record, TYPE_TAG).trim();
    let code: u32 = code_text.parse().map_err(|_| {
        TikzcircError::malformed_record(line, format!("kind code '{code_text}' is not a number"))
    })?;

    let is_path = field(record, PATH_TAG).trim() == "true";
    let (shape, geometry) = if is_path {
        let geometry = Geometry::Segment {
            start: point(record, START_X_TAG, START_Y_TAG),
            end: point(record, END_X_TAG, END_Y_TAG),
        };
        (Shape::Segment, geometry)
    } else {
        let geometry = Geometry::Point {
            position: point(record, POSITION_X_TAG, POSITION_Y_TAG),
        };
        (Shape::Point, geometry)
    };
    let kind = ComponentKind::resolve(code, shape)?;

    let identifier = tag_value(record, IDENTIFIER_TAG).and_then(|raw| {
        let parsed = raw.trim().parse::<u32>().ok();
        if parsed.is_none() {
            warn!("line {}: ignoring identifier '{}'", line, raw);
        }
        parsed
    });

    let mut instance = ComponentInstance::restore(kind, geometry, ids, identifier)?;
    instance.set_label(unescape_text(field(record, LABEL_TAG), LABEL_TAG));

    // a renumbered instance keeps its new anchor unless the template was edited
    let template = unescape_text(field(record, TEMPLATE_TAG), TEMPLATE_TAG);
    let renumbered = identifier.is_some()
        && instance.identifier().is_some()
        && instance.identifier() != identifier;
    if !renumbered || template != instance.spec().default_template(identifier) {
        instance.set_code_template(template);
    }
    Ok(instance)
}
