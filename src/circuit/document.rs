//! Ordered collection of placed components.

use log::debug;

use crate::components::{ComponentInstance, ComponentKind, IdentifierAllocator, Point};
use crate::error::Result;

/// A schematic: components in insertion order plus the identifier counters
/// that named them.
///
/// Insertion order is both the drawing order and the index space used for
/// selection. Duplicates, overlaps and unconnected geometry are all allowed.
#[derive(Debug, Clone, Default)]
pub struct CircuitDocument {
    components: Vec<ComponentInstance>,
    ids: IdentifierAllocator,
}

impl CircuitDocument {
    /// Create an empty document with fresh counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instance, returning its index.
    pub fn append(&mut self, instance: ComponentInstance) -> usize {
        self.components.push(instance);
        self.components.len() - 1
    }

    /// Construct a point instance with this document's counters and append it.
    pub fn place_point(&mut self, position: Point, kind: ComponentKind) -> Result<usize> {
        let instance = ComponentInstance::create_point(position, kind, &mut self.ids)?;
        Ok(self.append(instance))
    }

    /// Construct a segment instance with this document's counters and append it.
    pub fn place_segment(&mut self, start: Point, end: Point, kind: ComponentKind) -> Result<usize> {
        let instance = ComponentInstance::create_segment(start, end, kind, &mut self.ids)?;
        Ok(self.append(instance))
    }

    /// Remove the instance at `index`.
    ///
    /// Out-of-range indices are ignored: the caller's selection may be stale.
    /// Identifiers are never returned to the allocator.
    pub fn remove_at(&mut self, index: usize) -> Option<ComponentInstance> {
        if index < self.components.len() {
            Some(self.components.remove(index))
        } else {
            debug!("remove_at({}) ignored, document has {} components", index, self.len());
            None
        }
    }

    /// Replace the instance at `index`, returning `false` if out of range.
    pub fn replace(&mut self, index: usize, instance: ComponentInstance) -> bool {
        match self.components.get_mut(index) {
            Some(slot) => {
                *slot = instance;
                true
            }
            None => false,
        }
    }

    /// Drop every component and restart all identifier families at 1.
    pub fn clear(&mut self) {
        debug!("clearing document ({} components)", self.len());
        self.components.clear();
        self.ids.reset_all();
    }

    /// One human-readable line per component, in document order.
    pub fn summaries(&self) -> Vec<String> {
        self.components.iter().map(ComponentInstance::summary).collect()
    }

    /// Index of the component nearest to `point`.
    ///
    /// Segments are measured from their midpoint, point kinds from their
    /// position. Ties go to the earliest component.
    pub fn closest_to(&self, point: Point) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, component) in self.components.iter().enumerate() {
            let distance = component.geometry().center().distance(point);
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Whether any component needs the document-wide MOSFET styling.
    pub fn contains_fet(&self) -> bool {
        self.components.iter().any(|c| c.kind().is_fet())
    }

    pub fn get(&self, index: usize) -> Option<&ComponentInstance> {
        self.components.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ComponentInstance> {
        self.components.get_mut(index)
    }

    pub fn components(&self) -> &[ComponentInstance] {
        &self.components
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentInstance> {
        self.components.iter()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Counters used for instances constructed for this document.
    pub fn ids(&self) -> &IdentifierAllocator {
        &self.ids
    }

    pub fn ids_mut(&mut self) -> &mut IdentifierAllocator {
        &mut self.ids
    }
}
