//! The static T-shirt silhouette drawn under the design.
//!
//! Points are authored in a unit square and scaled to the canvas. The fill is
//! split into convex pieces because egui only fills convex polygons.

use egui::{Pos2, Rect, pos2};

// Clockwise from the left side of the neckline
const OUTLINE: [(f32, f32); 15] = [
    (0.38, 0.08),
    (0.42, 0.13),
    (0.50, 0.15),
    (0.58, 0.13),
    (0.62, 0.08),
    (0.78, 0.12),
    (0.95, 0.32),
    (0.85, 0.40),
    (0.76, 0.32),
    (0.76, 0.95),
    (0.24, 0.95),
    (0.24, 0.32),
    (0.15, 0.40),
    (0.05, 0.32),
    (0.22, 0.12),
];

const SHOULDERS: [(f32, f32); 4] = [(0.22, 0.12), (0.38, 0.08), (0.62, 0.08), (0.78, 0.12)];
const BODY: [(f32, f32); 4] = [(0.22, 0.12), (0.78, 0.12), (0.76, 0.95), (0.24, 0.95)];
const RIGHT_SLEEVE: [(f32, f32); 4] = [(0.78, 0.12), (0.95, 0.32), (0.85, 0.40), (0.76, 0.32)];
const LEFT_SLEEVE: [(f32, f32); 4] = [(0.22, 0.12), (0.24, 0.32), (0.15, 0.40), (0.05, 0.32)];
const NECK: [(f32, f32); 5] = [(0.38, 0.08), (0.62, 0.08), (0.58, 0.13), (0.50, 0.15), (0.42, 0.13)];

/// Silhouette of the shirt scaled into a canvas rectangle
#[derive(Debug, Clone)]
pub struct GarmentOutline {
    /// Closed outline, for stroking
    pub outline: Vec<Pos2>,
    /// Convex pieces that together cover the shirt, for filling
    pub fill_parts: Vec<Vec<Pos2>>,
    /// Convex neck opening, painted over the fill with the background
    pub neck: Vec<Pos2>,
}

impl GarmentOutline {
    pub fn new(canvas: Rect) -> Self {
        let scale = |points: &[(f32, f32)]| -> Vec<Pos2> {
            points
                .iter()
                .map(|&(x, y)| pos2(canvas.min.x + x * canvas.width(), canvas.min.y + y * canvas.height()))
                .collect()
        };

        Self {
            outline: scale(&OUTLINE),
            fill_parts: vec![
                scale(&SHOULDERS),
                scale(&BODY),
                scale(&RIGHT_SLEEVE),
                scale(&LEFT_SLEEVE),
            ],
            neck: scale(&NECK),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    #[test]
    fn outline_stays_inside_canvas() {
        let canvas = Rect::from_min_size(pos2(40.0, 60.0), vec2(500.0, 600.0));
        let garment = GarmentOutline::new(canvas);
        assert!(garment.outline.iter().all(|p| canvas.contains(*p)));
        assert!(garment.fill_parts.iter().flatten().all(|p| canvas.contains(*p)));
    }

    #[test]
    fn outline_is_mirror_symmetric() {
        let canvas = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        let garment = GarmentOutline::new(canvas);
        for p in &garment.outline {
            let mirrored = pos2(100.0 - p.x, p.y);
            assert!(
                garment.outline.iter().any(|q| q.distance(mirrored) < 1e-3),
                "no mirror for {p:?}"
            );
        }
    }
}
