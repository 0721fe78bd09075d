//! Editing session facing the GUI layer.
//!
//! A [`Session`] bundles the document with the state an editor keeps around
//! it: the active placement tool, the selected component and the export
//! toggles. Component edit dialogs report back through [`EditOutcome`].

use log::debug;

use crate::circuit::CircuitDocument;
use crate::components::{ComponentInstance, ComponentKind, Geometry, IdentifierAllocator, Point};
use crate::emit::{emit_document, EmitOptions};
use crate::error::Result;
use crate::markup;
use crate::render::{render_document, render_preview, Canvas, RenderSettings};

/// Control signals an edit dialog can return instead of a component.
///
/// Saved files and older collaborators carry these as the numeric codes
/// 1000 and 1001, outside the range of drawable kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    Delete,
    Cancel,
}

impl EditCommand {
    pub fn code(self) -> u32 {
        match self {
            EditCommand::Delete => 1000,
            EditCommand::Cancel => 1001,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1000 => Some(EditCommand::Delete),
            1001 => Some(EditCommand::Cancel),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EditCommand::Delete => "delete",
            EditCommand::Cancel => "cancel",
        }
    }
}

/// Result of editing one component.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// Replace the component with this instance
    Placed(ComponentInstance),
    Deleted,
    Cancelled,
}

impl From<EditCommand> for EditOutcome {
    fn from(command: EditCommand) -> Self {
        match command {
            EditCommand::Delete => EditOutcome::Deleted,
            EditCommand::Cancel => EditOutcome::Cancelled,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    document: CircuitDocument,
    tool: ComponentKind,
    selected: Option<usize>,
    options: EmitOptions,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EmitOptions::default())
    }
}

impl Session {
    /// Empty session with the wire tool active.
    pub fn new(options: EmitOptions) -> Self {
        Self {
            document: CircuitDocument::new(),
            tool: ComponentKind::Wire,
            selected: None,
            options,
        }
    }

    pub fn document(&self) -> &CircuitDocument {
        &self.document
    }

    pub fn tool(&self) -> ComponentKind {
        self.tool
    }

    pub fn set_tool(&mut self, kind: ComponentKind) {
        self.tool = kind;
    }

    pub fn options(&self) -> EmitOptions {
        self.options
    }

    pub fn set_options(&mut self, options: EmitOptions) {
        self.options = options;
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select `index`, or clear the selection when it is out of range.
    pub fn select(&mut self, index: Option<usize>) -> bool {
        self.selected = index.filter(|&i| i < self.document.len());
        self.selected.is_some()
    }

    /// Place the active tool for a press at `start` and release at `end`.
    ///
    /// Segment kinds span the gesture; point kinds land on the release
    /// position. The new component becomes the selection.
    pub fn place(&mut self, start: Point, end: Point) -> Result<usize> {
        let index = if self.tool.is_segment() {
            self.document.place_segment(start, end, self.tool)?
        } else {
            self.document.place_point(end, self.tool)?
        };
        self.selected = Some(index);
        Ok(index)
    }

    /// Counters for building instances outside of [`Session::place`].
    pub fn ids_mut(&mut self) -> &mut IdentifierAllocator {
        self.document.ids_mut()
    }

    /// Append an instance built elsewhere and select it.
    pub fn insert(&mut self, instance: ComponentInstance) -> usize {
        let index = self.document.append(instance);
        self.selected = Some(index);
        index
    }

    fn selected_instance(&self) -> Option<&ComponentInstance> {
        self.selected.and_then(|i| self.document.get(i))
    }

    fn selected_instance_mut(&mut self) -> Option<&mut ComponentInstance> {
        let index = self.selected?;
        self.document.get_mut(index)
    }

    /// Label of the selection, empty when nothing is selected.
    pub fn selected_label(&self) -> &str {
        self.selected_instance().map_or("", ComponentInstance::label)
    }

    pub fn set_selected_label(&mut self, text: &str) {
        if let Some(instance) = self.selected_instance_mut() {
            instance.set_label(text);
        }
    }

    /// Code template of the selection, empty when nothing is selected.
    pub fn selected_code_template(&self) -> &str {
        self.selected_instance().map_or("", ComponentInstance::code_template)
    }

    pub fn set_selected_code_template(&mut self, text: &str) {
        if let Some(instance) = self.selected_instance_mut() {
            instance.set_code_template(text);
        }
    }

    fn after_remove(&mut self, removed: usize) {
        self.selected = match self.selected {
            Some(s) if s > removed => Some(s - 1),
            Some(s) if s == removed => {
                let next = s.saturating_sub(1);
                (next < self.document.len()).then_some(next)
            }
            other => other,
        };
    }

    /// Remove the selection; the previous component becomes selected.
    pub fn delete_selected(&mut self) -> Option<ComponentInstance> {
        let index = self.selected?;
        let removed = self.document.remove_at(index)?;
        self.after_remove(index);
        Some(removed)
    }

    /// Apply what an edit dialog returned for the component at `index`.
    ///
    /// Returns `false` if `index` no longer names a component.
    pub fn apply_edit(&mut self, index: usize, outcome: EditOutcome) -> bool {
        match outcome {
            EditOutcome::Placed(instance) => self.document.replace(index, instance),
            EditOutcome::Deleted => {
                let removed = self.document.remove_at(index).is_some();
                if removed {
                    self.after_remove(index);
                }
                removed
            }
            EditOutcome::Cancelled => index < self.document.len(),
        }
    }

    /// Index of the component nearest to `point` (grid units).
    pub fn closest(&self, point: Point) -> Option<usize> {
        self.document.closest_to(point)
    }

    pub fn summaries(&self) -> Vec<String> {
        self.document.summaries()
    }

    /// Typeset program for the whole document with the session's toggles.
    pub fn export_latex(&self) -> String {
        emit_document(&self.document, self.options)
    }

    pub fn save_markup(&self) -> String {
        markup::serialize_document(&self.document)
    }

    /// Replace the document with saved text; the selection is cleared.
    pub fn load_markup(&mut self, text: &str) -> usize {
        self.selected = None;
        markup::load_into(&mut self.document, text)
    }

    pub fn clear(&mut self) {
        debug!("clearing session");
        self.selected = None;
        self.document.clear();
    }

    /// Draw the document, highlighting the selection.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C, settings: &RenderSettings) {
        render_document(canvas, &self.document, settings, self.selected);
    }

    /// Draw the active tool for an in-progress gesture from `start` to `end`.
    pub fn preview<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        start: Point,
        end: Point,
        settings: &RenderSettings,
    ) -> Result<()> {
        let at = if self.tool.is_segment() {
            Geometry::Segment { start, end }
        } else {
            Geometry::Point { position: end }
        };
        render_preview(canvas, self.tool, &at, settings)
    }
}
