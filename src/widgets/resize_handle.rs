use egui::{Color32, CursorIcon, Painter, Pos2, Rect, Stroke, Vec2};

/// A draggable control point on a selected element's bounding region.
///
/// Rectangles and images use the four corners; circles use the four
/// cardinal points so the centre can stay fixed while resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    North,
    East,
    South,
    West,
}

impl Handle {
    pub const CORNERS: [Handle; 4] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
    ];

    pub const CARDINALS: [Handle; 4] = [Handle::North, Handle::East, Handle::South, Handle::West];

    pub fn as_str(&self) -> &'static str {
        match self {
            Handle::TopLeft => "top_left",
            Handle::TopRight => "top_right",
            Handle::BottomLeft => "bottom_left",
            Handle::BottomRight => "bottom_right",
            Handle::North => "north",
            Handle::East => "east",
            Handle::South => "south",
            Handle::West => "west",
        }
    }

    pub fn is_corner(&self) -> bool {
        matches!(
            self,
            Handle::TopLeft | Handle::TopRight | Handle::BottomLeft | Handle::BottomRight
        )
    }

    /// Where this handle sits on `rect`
    pub fn position_on(&self, rect: Rect) -> Pos2 {
        match self {
            Handle::TopLeft => rect.left_top(),
            Handle::TopRight => rect.right_top(),
            Handle::BottomLeft => rect.left_bottom(),
            Handle::BottomRight => rect.right_bottom(),
            Handle::North => rect.center_top(),
            Handle::East => rect.right_center(),
            Handle::South => rect.center_bottom(),
            Handle::West => rect.left_center(),
        }
    }

    /// The corner that stays fixed while this corner handle is dragged
    pub fn opposite_corner(&self, rect: Rect) -> Option<Pos2> {
        match self {
            Handle::TopLeft => Some(rect.right_bottom()),
            Handle::TopRight => Some(rect.left_bottom()),
            Handle::BottomLeft => Some(rect.right_top()),
            Handle::BottomRight => Some(rect.left_top()),
            _ => None,
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            Handle::TopLeft | Handle::BottomRight => CursorIcon::ResizeNwSe,
            Handle::TopRight | Handle::BottomLeft => CursorIcon::ResizeNeSw,
            Handle::North | Handle::South => CursorIcon::ResizeVertical,
            Handle::East | Handle::West => CursorIcon::ResizeHorizontal,
        }
    }
}

/// Visual for one resize handle
pub struct ResizeHandle {
    handle: Handle,
    position: Pos2,
    size: f32,
}

impl ResizeHandle {
    pub fn new(handle: Handle, position: Pos2, size: f32) -> Self {
        Self {
            handle,
            position,
            size,
        }
    }

    /// Paint the handle: rounded squares on corners, dots on cardinals
    pub fn paint(&self, painter: &Painter) {
        let fill = Color32::from_rgb(30, 120, 255);
        let border = Stroke::new(1.0, Color32::WHITE);

        if self.handle.is_corner() {
            let rect = Rect::from_center_size(self.position, Vec2::splat(self.size));
            painter.rect_filled(rect, 2.0, fill);
            painter.rect_stroke(rect, 2.0, border);
        } else {
            painter.circle_filled(self.position, self.size / 2.0, fill);
            painter.circle_stroke(self.position, self.size / 2.0, border);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn opposite_corners() {
        let rect = Rect::from_min_size(pos2(10.0, 20.0), vec2(100.0, 50.0));
        assert_eq!(Handle::TopLeft.opposite_corner(rect), Some(pos2(110.0, 70.0)));
        assert_eq!(Handle::BottomRight.opposite_corner(rect), Some(pos2(10.0, 20.0)));
        assert_eq!(Handle::East.opposite_corner(rect), None);
    }

    #[test]
    fn cardinal_positions() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(40.0, 40.0));
        assert_eq!(Handle::North.position_on(rect), pos2(20.0, 0.0));
        assert_eq!(Handle::East.position_on(rect), pos2(40.0, 20.0));
        assert_eq!(Handle::South.position_on(rect), pos2(20.0, 40.0));
        assert_eq!(Handle::West.position_on(rect), pos2(0.0, 20.0));
    }
}
