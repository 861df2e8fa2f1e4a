//! Ordered element store with selection and tombstoning.

use crate::element::{Element, ElementId};
use serde::{Deserialize, Serialize};

/// The ordered collection of elements plus the current selection.
///
/// Insertion order is paint order: later elements draw on top and are
/// preferred by hit-testing. Deletion tombstones elements in place instead
/// of removing them, so history snapshots stay consistent. All operations
/// apply immediately; a read after a write always observes the write.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    elements: Vec<Element>,
    selected_ids: Vec<ElementId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element at the top of the z-order.
    pub fn add_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Apply `f` to the element matching `id`. Returns false (and does
    /// nothing) if no element matches.
    pub fn update_element(&mut self, id: ElementId, f: impl FnOnce(&mut Element)) -> bool {
        match self.elements.iter_mut().find(|e| e.id == id) {
            Some(element) => {
                f(element);
                true
            }
            None => false,
        }
    }

    /// Tombstone the element matching `id`. Ordering and every other
    /// element are untouched.
    pub fn delete_element(&mut self, id: ElementId) -> bool {
        self.update_element(id, |e| e.is_deleted = true)
    }

    /// Remove every element and clear the selection.
    ///
    /// Unlike deletion this leaves no tombstones behind; it backs "clear
    /// canvas" only.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.selected_ids.clear();
    }

    /// Replace the whole element list, keeping the selection as-is.
    /// Used by import and by history restoration.
    pub fn set_elements(&mut self, elements: Vec<Element>) {
        self.elements = elements;
    }

    /// Replace the selection, dropping duplicate ids.
    pub fn set_selection(&mut self, ids: Vec<ElementId>) {
        self.selected_ids.clear();
        for id in ids {
            if !self.selected_ids.contains(&id) {
                self.selected_ids.push(id);
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_ids.clear();
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected_ids.contains(&id)
    }

    /// All elements in z-order, tombstones included.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The selected ids in selection order.
    pub fn selected_ids(&self) -> &[ElementId] {
        &self.selected_ids
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Elements that are not tombstoned, in z-order.
    pub fn live_elements(&self) -> impl Iterator<Item = &Element> + '_ {
        self.elements.iter().filter(|e| !e.is_deleted)
    }

    /// Selected elements in selection order. Ids that no longer resolve
    /// are skipped.
    pub fn selected_elements(&self) -> impl Iterator<Item = &Element> + '_ {
        self.selected_ids.iter().filter_map(|id| self.element(*id))
    }

    /// Ids of every live element, in z-order.
    pub fn live_ids(&self) -> Vec<ElementId> {
        self.live_elements().map(|e| e.id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }
}
