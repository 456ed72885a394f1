use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::camera::Camera;

pub(super) const CANVAS_FILL: Color32 = Color32::from_rgb(244, 245, 247);
pub(super) const CARD_FILL: Color32 = Color32::WHITE;
pub(super) const CARD_BORDER: Color32 = Color32::from_rgb(68, 68, 68);
pub(super) const EDGE_COLOR: Color32 = Color32::from_rgb(136, 136, 136);
pub(super) const EDGE_FOCUS_COLOR: Color32 = Color32::from_rgb(68, 68, 68);

/// Opacity applied to notes and edges outside the current highlight set.
pub(super) const UNFOCUSED_OPACITY: f32 = 0.15;

pub(super) fn fade(color: Color32, opacity: f32) -> Color32 {
    let opacity = opacity.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (color.a() as f32 * opacity) as u8,
    )
}

/// Screen position of a world point, measured from the canvas origin.
pub(super) fn world_to_screen(rect: Rect, camera: &Camera, world: Vec2) -> Pos2 {
    rect.left_top() + camera.to_screen(world)
}

/// Faint square grid that pans and zooms with the scene.
pub(super) fn draw_background(painter: &Painter, rect: Rect, camera: &Camera) {
    painter.rect_filled(rect, 0.0, CANVAS_FILL);

    let step = (120.0 / camera.zoom).clamp(24.0, 320.0);
    let origin = world_to_screen(rect, camera, Vec2::ZERO);
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 26));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

pub(super) fn card_visible(rect: Rect, card: Rect) -> bool {
    rect.intersects(card)
}

/// Conservative bounding-box test; good enough for straight segments.
pub(super) fn edge_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let bounds = Rect::from_two_pos(start, end).expand(padding);
    rect.intersects(bounds)
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    #[test]
    fn world_to_screen_is_anchored_at_the_canvas_origin() {
        let rect = Rect::from_min_size(pos2(10.0, 20.0), vec2(800.0, 600.0));
        let camera = Camera {
            offset: Vec2::ZERO,
            zoom: 2.0,
        };
        assert_eq!(
            world_to_screen(rect, &camera, vec2(200.0, 100.0)),
            pos2(110.0, 70.0)
        );
    }

    #[test]
    fn offscreen_cards_are_culled() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        let inside = Rect::from_min_size(pos2(40.0, 40.0), vec2(20.0, 20.0));
        let outside = Rect::from_min_size(pos2(300.0, 300.0), vec2(20.0, 20.0));
        assert!(card_visible(rect, inside));
        assert!(!card_visible(rect, outside));
    }

    #[test]
    fn crossing_edges_are_kept() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        assert!(edge_visible(rect, pos2(-50.0, 50.0), pos2(150.0, 50.0), 2.0));
        assert!(!edge_visible(rect, pos2(200.0, 0.0), pos2(300.0, 100.0), 2.0));
    }
}
