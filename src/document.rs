use egui::{Pos2, Rect, Vec2};
use log::{debug, info};

use crate::element::{DesignElement, Element, ElementId};
use crate::error::ElementError;
use crate::geometry::hit_testing;

/// The element store: every placed element in draw order, plus the selection.
///
/// Invariants: ids are unique, and `selected` always names an element that
/// is still in the store.
#[derive(Debug, Default, Clone)]
pub struct Document {
    elements: Vec<DesignElement>,
    selected: Option<ElementId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element and select it
    pub fn add_element(&mut self, element: DesignElement) -> Result<ElementId, ElementError> {
        let id = element.id();
        if self.contains(id) {
            return Err(ElementError::DuplicateId(id));
        }

        info!("Adding {} element {}", element.element_type(), id);
        self.elements.push(element);
        self.selected = Some(id);
        Ok(id)
    }

    /// Remove an element; clears the selection if it pointed at it
    pub fn remove_element(&mut self, id: ElementId) -> Option<DesignElement> {
        let index = self.elements.iter().position(|e| e.id() == id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        let removed = self.elements.remove(index);
        info!("Removed {} element {}", removed.element_type(), id);
        Some(removed)
    }

    /// Remove the selected element, if any
    pub fn delete_selected(&mut self) -> Option<DesignElement> {
        let id = self.selected?;
        self.remove_element(id)
    }

    pub fn elements(&self) -> &[DesignElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.iter().any(|e| e.id() == id)
    }

    pub fn find_element(&self, id: ElementId) -> Option<&DesignElement> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn find_element_mut(&mut self, id: ElementId) -> Option<&mut DesignElement> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// The first element in store order under `pos`
    pub fn element_at(&self, pos: Pos2) -> Option<&DesignElement> {
        hit_testing::element_at(&self.elements, pos)
    }

    /// Select an existing element. Unknown ids leave the selection unchanged.
    pub fn select(&mut self, id: ElementId) -> bool {
        if self.contains(id) {
            if self.selected != Some(id) {
                debug!("Selected element {}", id);
            }
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        if let Some(id) = self.selected.take() {
            debug!("Cleared selection of element {}", id);
        }
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn selected_element(&self) -> Option<&DesignElement> {
        self.selected.and_then(|id| self.find_element(id))
    }

    pub fn selected_element_mut(&mut self) -> Option<&mut DesignElement> {
        let id = self.selected?;
        self.find_element_mut(id)
    }

    pub fn translate_element(&mut self, id: ElementId, delta: Vec2) -> Result<(), ElementError> {
        let element = self.find_element_mut(id).ok_or(ElementError::NotFound(id))?;
        element.translate(delta);
        Ok(())
    }

    pub fn resize_element(&mut self, id: ElementId, new_rect: Rect) -> Result<(), ElementError> {
        let element = self.find_element_mut(id).ok_or(ElementError::NotFound(id))?;
        element.resize(new_rect)
    }

    /// Whether any element still draws from this image source
    pub fn references_image(&self, source_key: &str) -> bool {
        self.elements.iter().any(|e| e.image_source() == Some(source_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ShapeKind, factory};
    use crate::id_generator::generate_id;
    use egui::{Color32, pos2, vec2};

    fn square(position: Pos2) -> DesignElement {
        factory::create_shape(generate_id(), ShapeKind::Rectangle, Color32::RED, position, vec2(50.0, 50.0))
    }

    #[test]
    fn add_selects_new_element() {
        let mut doc = Document::new();
        let id = doc.add_element(square(pos2(0.0, 0.0))).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.selected_id(), Some(id));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut doc = Document::new();
        let element = square(pos2(0.0, 0.0));
        let id = doc.add_element(element.clone()).unwrap();
        assert_eq!(doc.add_element(element), Err(ElementError::DuplicateId(id)));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn removing_unselected_element_keeps_selection() {
        let mut doc = Document::new();
        let first = doc.add_element(square(pos2(0.0, 0.0))).unwrap();
        let second = doc.add_element(square(pos2(100.0, 0.0))).unwrap();
        assert!(doc.remove_element(first).is_some());
        assert_eq!(doc.selected_id(), Some(second));
    }

    #[test]
    fn select_unknown_id_is_ignored() {
        let mut doc = Document::new();
        let id = doc.add_element(square(pos2(0.0, 0.0))).unwrap();
        assert!(!doc.select(ElementId::new(usize::MAX)));
        assert_eq!(doc.selected_id(), Some(id));
    }

    #[test]
    fn element_at_returns_first_in_order() {
        let mut doc = Document::new();
        let first = doc.add_element(square(pos2(0.0, 0.0))).unwrap();
        doc.add_element(square(pos2(25.0, 25.0))).unwrap();
        assert_eq!(doc.element_at(pos2(30.0, 30.0)).map(|e| e.id()), Some(first));
        assert!(doc.element_at(pos2(500.0, 500.0)).is_none());
    }
}
