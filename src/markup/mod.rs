//! Save/load codec.
//!
//! A saved schematic is one `<component>...</component>` record per line,
//! in document order. Text fields are XML-escaped so user edits to labels
//! and code templates survive a round trip verbatim.

mod record;

pub use record::{deserialize, serialize, tag_value};

use std::path::Path;

use log::{debug, warn};

use crate::circuit::CircuitDocument;
use crate::error::{Result, TikzcircError};

/// Encode every component, one newline-terminated record each.
pub fn serialize_document(document: &CircuitDocument) -> String {
    let mut out = String::new();
    for component in document.iter() {
        out.push_str(&serialize(component));
        out.push('\n');
    }
    out
}

/// Replace the contents of `document` with the records in `text`.
///
/// Identifier counters are reset before the first record. Blank lines are
/// ignored; records that cannot become a component are skipped with a
/// warning. Returns the number of components loaded.
pub fn load_into(document: &mut CircuitDocument, text: &str) -> usize {
    document.clear();
    let mut skipped = 0;
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match record::deserialize_line(line, index + 1, document.ids_mut()) {
            Ok(instance) => {
                document.append(instance);
            }
            Err(e) => {
                warn!("skipping record on line {}: {}", index + 1, e);
                skipped += 1;
            }
        }
    }
    debug!("loaded {} components, skipped {}", document.len(), skipped);
    document.len()
}

/// Build a fresh document from saved text.
pub fn load_document(text: &str) -> CircuitDocument {
    let mut document = CircuitDocument::new();
    load_into(&mut document, text);
    document
}

/// Read a saved schematic from disk.
pub fn read_file(path: impl AsRef<Path>) -> Result<CircuitDocument> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| TikzcircError::FileReadError {
        path: path.display().to_string(),
        source,
    })?;
    Ok(load_document(&text))
}

/// Write a schematic to disk.
pub fn write_file(path: impl AsRef<Path>, document: &CircuitDocument) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, serialize_document(document)).map_err(|source| {
        TikzcircError::FileWriteError {
            path: path.display().to_string(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ComponentInstance, ComponentKind, Family, IdentifierAllocator, Point};
    use crate::emit::{emit_document, EmitOptions};

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn sample() -> CircuitDocument {
        let mut doc = CircuitDocument::new();
        doc.place_segment(p(0.0, 0.0), p(0.0, 2.0), ComponentKind::VoltageSource)
            .unwrap();
        doc.place_point(p(2.0, 1.0), ComponentKind::NpnTransistor).unwrap();
        doc.place_point(p(5.0, 1.0), ComponentKind::OpAmp3).unwrap();
        doc.place_point(p(2.0, 3.0), ComponentKind::Ground).unwrap();
        doc.place_point(p(7.0, 1.0), ComponentKind::Pmos).unwrap();
        doc
    }

    #[test]
    fn test_round_trip_preserves_everything() {
        let mut doc = sample();
        doc.get_mut(0).unwrap().set_label("V_{in}");
        doc.get_mut(1).unwrap().set_code_template("node[npn, mirror](Q1){$Q_1$}");

        let text = serialize_document(&doc);
        assert_eq!(text.lines().count(), 5);
        assert!(text.ends_with("</component>\n"));

        let loaded = load_document(&text);
        assert_eq!(loaded.components(), doc.components());
        assert_eq!(
            emit_document(&loaded, EmitOptions::default()),
            emit_document(&doc, EmitOptions::default())
        );
    }

    #[test]
    fn test_every_kind_round_trips() {
        let mut ids = IdentifierAllocator::new();
        for (i, kind) in ComponentKind::ALL.into_iter().enumerate() {
            let x = i as f64;
            let mut instance = if kind.is_segment() {
                ComponentInstance::create_segment(p(x, 1.0), p(x + 2.0, 1.5), kind, &mut ids)
            } else {
                ComponentInstance::create_point(p(x, -1.0), kind, &mut ids)
            }
            .unwrap();
            let reloaded = deserialize(&serialize(&instance), &mut IdentifierAllocator::new()).unwrap();
            assert_eq!(reloaded, instance, "{kind:?}");

            instance.set_label(format!("{} & <{}>", kind.display_name(), i));
            let edited = deserialize(&serialize(&instance), &mut IdentifierAllocator::new()).unwrap();
            assert_eq!(edited, instance, "{kind:?}");
        }
    }

    #[test]
    fn test_huge_identifier_does_not_break_placement() {
        let text = "<component><pathComponent>false</pathComponent>\
                    <position-x>0</position-x><position-y>0</position-y><type>12</type>\
                    <label>N-MOS</label><latexParameters>node[nmos](Q4294967295){Q4294967295}</latexParameters>\
                    <identifier>4294967295</identifier></component>\n";
        let mut doc = load_document(text);
        assert_eq!(doc.get(0).unwrap().identifier(), Some(u32::MAX));

        let a = doc.place_point(p(3.0, 0.0), ComponentKind::Nmos).unwrap();
        let b = doc.place_point(p(6.0, 0.0), ComponentKind::Nmos).unwrap();
        assert_eq!(doc.get(a).unwrap().identifier(), Some(1));
        assert_eq!(doc.get(b).unwrap().identifier(), Some(2));
    }

    #[test]
    fn test_concatenated_files_keep_anchors_unique() {
        let mut doc = CircuitDocument::new();
        doc.place_point(p(2.0, 1.0), ComponentKind::NpnTransistor).unwrap();
        let saved = serialize_document(&doc);

        let merged = load_document(&format!("{saved}{saved}"));
        let ids: Vec<_> = merged.iter().map(|c| c.identifier()).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);

        let latex = emit_document(&merged, EmitOptions::default());
        assert!(latex.contains("node[npn](Q1){Q1}"));
        assert!(latex.contains("node[npn](Q2){Q2}"));
        assert!(latex.contains("(Q2.B)"));
    }

    #[test]
    fn test_identifiers_survive_delete_and_reload() {
        let mut doc = CircuitDocument::new();
        for x in 0..3 {
            doc.place_point(p(x as f64 * 3.0, 0.0), ComponentKind::NpnTransistor)
                .unwrap();
        }
        doc.remove_at(0);
        let before = emit_document(&doc, EmitOptions::default());

        let mut reloaded = load_document(&serialize_document(&doc));
        assert_eq!(emit_document(&reloaded, EmitOptions::default()), before);
        assert!(before.contains("(Q2.C)"));
        assert!(before.contains("(Q3.C)"));

        // new placements keep counting past the restored ones
        let index = reloaded
            .place_point(p(9.0, 0.0), ComponentKind::Nigbt)
            .unwrap();
        assert_eq!(reloaded.get(index).unwrap().identifier(), Some(4));
    }

    #[test]
    fn test_load_resets_counters() {
        let mut doc = sample();
        doc.place_point(p(0.0, 0.0), ComponentKind::Buffer).unwrap();
        assert_eq!(doc.ids().peek(Family::Buffer), 2);

        load_into(&mut doc, "");
        assert!(doc.is_empty());
        assert_eq!(doc.ids().peek(Family::Buffer), 1);
        assert_eq!(doc.ids().peek(Family::TransistorLike), 1);
    }

    #[test]
    fn test_blank_and_bad_lines_are_skipped() {
        let doc = sample();
        let good = serialize_document(&doc);
        let mut lines: Vec<&str> = good.lines().collect();
        lines.insert(1, "");
        lines.insert(3, "   ");
        lines.insert(4, "<component><pathComponent>false</pathComponent><type>1001</type></component>");
        lines.insert(5, "<component><pathComponent>true</pathComponent><type>42</type></component>");
        let text = lines.join("\n");

        let mut loaded = CircuitDocument::new();
        assert_eq!(load_into(&mut loaded, &text), 5);
        assert_eq!(loaded.summaries(), doc.summaries());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("tikzcirc-markup-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sample.tikzcirc");

        let doc = sample();
        write_file(&path, &doc).unwrap();
        let loaded = read_file(&path).unwrap();
        assert_eq!(loaded.components(), doc.components());

        std::fs::remove_dir_all(&dir).unwrap();
        assert!(matches!(read_file(&path), Err(TikzcircError::FileReadError { .. })));
    }
}
