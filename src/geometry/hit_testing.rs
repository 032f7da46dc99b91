use egui::{Pos2, Rect, Vec2};

use crate::element::{Element, MIN_ELEMENT_SIZE};
use crate::widgets::Handle;

/// Default radius around a handle centre that counts as grabbing it
pub const RESIZE_HANDLE_RADIUS: f32 = 8.0;

/// The first element, in store order, whose hit region contains `pos`
pub fn element_at<E: Element>(elements: &[E], pos: Pos2) -> Option<&E> {
    elements.iter().find(|element| element.hit_test(pos))
}

/// The handle of `element` whose hit region contains `pos`.
///
/// Handles are checked in their declared order, so overlapping regions on
/// tiny elements resolve deterministically.
pub fn handle_at<E: Element + ?Sized>(element: &E, pos: Pos2, radius: f32) -> Option<Handle> {
    let rect = element.rect();
    element
        .handles()
        .iter()
        .copied()
        .find(|handle| handle.position_on(rect).distance(pos) <= radius)
}

/// New bounds for a corner drag: the opposite corner of `original` stays
/// fixed and the dragged corner follows `target`, clamped so neither side
/// shrinks below the minimum size or flips over the anchor.
pub fn resize_from_corner(original: Rect, handle: Handle, target: Pos2) -> Rect {
    let Some(anchor) = handle.opposite_corner(original) else {
        return original;
    };

    let x = match handle {
        Handle::TopLeft | Handle::BottomLeft => target.x.min(anchor.x - MIN_ELEMENT_SIZE),
        _ => target.x.max(anchor.x + MIN_ELEMENT_SIZE),
    };
    let y = match handle {
        Handle::TopLeft | Handle::TopRight => target.y.min(anchor.y - MIN_ELEMENT_SIZE),
        _ => target.y.max(anchor.y + MIN_ELEMENT_SIZE),
    };

    Rect::from_two_pos(anchor, Pos2::new(x, y))
}

/// New bounds for a circle drag from a cardinal handle: the centre stays
/// fixed and the radius follows the pointer along the handle's axis.
pub fn resize_circle(original: Rect, handle: Handle, target: Pos2) -> Rect {
    let center = original.center();
    let radius = match handle {
        Handle::East | Handle::West => (target.x - center.x).abs(),
        Handle::North | Handle::South => (target.y - center.y).abs(),
        _ => original.width().min(original.height()) / 2.0,
    };
    let diameter = (radius * 2.0).max(MIN_ELEMENT_SIZE);
    Rect::from_center_size(center, Vec2::splat(diameter))
}

/// Bounds after dragging `handle` from `start` to `current`.
///
/// The handle keeps its grab offset: the dragged point moves by exactly the
/// pointer delta rather than snapping to the pointer.
pub fn resized_rect(original: Rect, handle: Handle, start: Pos2, current: Pos2) -> Rect {
    let target = handle.position_on(original) + (current - start);
    if handle.is_corner() {
        resize_from_corner(original, handle, target)
    } else {
        resize_circle(original, handle, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn rect() -> Rect {
        Rect::from_min_size(pos2(100.0, 100.0), vec2(80.0, 40.0))
    }

    #[test]
    fn bottom_right_keeps_top_left() {
        let r = resized_rect(rect(), Handle::BottomRight, pos2(180.0, 140.0), pos2(200.0, 170.0));
        assert_eq!(r.min, pos2(100.0, 100.0));
        assert_eq!(r.max, pos2(200.0, 170.0));
    }

    #[test]
    fn top_left_keeps_bottom_right() {
        let r = resized_rect(rect(), Handle::TopLeft, pos2(100.0, 100.0), pos2(90.0, 120.0));
        assert_eq!(r.max, pos2(180.0, 140.0));
        assert_eq!(r.min, pos2(90.0, 120.0));
    }

    #[test]
    fn corner_drag_clamps_at_minimum() {
        // Drag the top-right corner far past the bottom-left anchor
        let r = resized_rect(rect(), Handle::TopRight, pos2(180.0, 100.0), pos2(0.0, 400.0));
        assert_eq!(r.left_bottom(), pos2(100.0, 140.0));
        assert_eq!(r.width(), MIN_ELEMENT_SIZE);
        assert_eq!(r.height(), MIN_ELEMENT_SIZE);
    }

    #[test]
    fn grab_offset_is_preserved() {
        // Grabbed 3px inside the corner; the corner moves by the pointer delta
        let r = resized_rect(rect(), Handle::BottomRight, pos2(177.0, 137.0), pos2(187.0, 147.0));
        assert_eq!(r.max, pos2(190.0, 150.0));
    }

    #[test]
    fn circle_keeps_center_and_stays_square() {
        let circle = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        let r = resized_rect(circle, Handle::East, pos2(100.0, 50.0), pos2(120.0, 70.0));
        assert_eq!(r.center(), pos2(50.0, 50.0));
        assert_eq!(r.width(), 140.0);
        assert_eq!(r.width(), r.height());

        let r = resized_rect(circle, Handle::North, pos2(50.0, 0.0), pos2(50.0, 49.0));
        assert_eq!(r.center(), pos2(50.0, 50.0));
        assert_eq!(r.width(), MIN_ELEMENT_SIZE);
    }
}
