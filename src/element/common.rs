use egui::{Pos2, Rect};

use crate::error::ElementError;

// Common constants for all element types
pub const MIN_ELEMENT_SIZE: f32 = 10.0;

// Rects clamped to the minimum are built as `anchor ± MIN_ELEMENT_SIZE`, which
// can measure a few ulps short in f32
const SIZE_TOLERANCE: f32 = 1e-3;

/// Validates that a rectangle has minimum dimensions
pub(crate) fn validate_rect(rect: &Rect) -> Result<(), ElementError> {
    let min = MIN_ELEMENT_SIZE - SIZE_TOLERANCE;
    if !rect.is_finite() || rect.width() < min || rect.height() < min {
        Err(ElementError::TooSmall {
            width: rect.width(),
            height: rect.height(),
            min: MIN_ELEMENT_SIZE,
        })
    } else {
        Ok(())
    }
}

/// Largest square that fits in `rect`, sharing its centre
pub(crate) fn inscribed_square(rect: Rect) -> Rect {
    let side = rect.width().min(rect.height());
    Rect::from_center_size(rect.center(), egui::Vec2::splat(side))
}

/// True when `pos` lies inside the circle inscribed in `rect`
pub(crate) fn circle_contains(rect: Rect, pos: Pos2) -> bool {
    let radius = rect.width().min(rect.height()) / 2.0;
    rect.center().distance(pos) <= radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn rejects_rects_below_minimum() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(MIN_ELEMENT_SIZE - 1.0, 40.0));
        assert!(matches!(validate_rect(&rect), Err(ElementError::TooSmall { .. })));

        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(MIN_ELEMENT_SIZE, MIN_ELEMENT_SIZE));
        assert!(validate_rect(&rect).is_ok());
    }

    #[test]
    fn accepts_minimum_built_from_fractional_anchor() {
        for i in 0..500 {
            let x = i as f32 * 0.37;
            let rect = Rect::from_two_pos(pos2(x, x), pos2(x + MIN_ELEMENT_SIZE, x + MIN_ELEMENT_SIZE));
            assert!(validate_rect(&rect).is_ok(), "rejected minimum rect at {x}");
        }
    }

    #[test]
    fn circle_contains_uses_radius_not_box() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        assert!(circle_contains(rect, pos2(50.0, 50.0)));
        assert!(circle_contains(rect, pos2(99.0, 50.0)));
        // Inside the bounding box but outside the circle
        assert!(!circle_contains(rect, pos2(5.0, 5.0)));
    }
}
