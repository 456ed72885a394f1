use eframe::egui::Vec2;

pub const MIN_ZOOM: f32 = 0.2;
pub const MAX_ZOOM: f32 = 10.0;
pub const ZOOM_STEP: f32 = 0.2;

/// Pan offset plus zoom factor defining the current view transform.
/// Zoom grows away from the scene: larger values show more of it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub offset: Vec2,
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.offset) / self.zoom
    }

    /// Full pan offset for a drag from `start` to `current`, scaled by the
    /// current zoom. Recomputed from the drag origin on every pointer move,
    /// so missed or reordered events cannot accumulate error.
    pub fn drag_offset(&self, start: Vec2, current: Vec2) -> Vec2 {
        self.zoom * (current - start)
    }

    /// The camera as seen mid-drag, before the offset is committed.
    pub fn with_drag(&self, drag_offset: Vec2) -> Self {
        Self {
            offset: self.offset - drag_offset,
            zoom: self.zoom,
        }
    }

    /// Fold a finished drag into the committed offset. The caller resets its
    /// drag state afterwards.
    pub fn commit_drag(&mut self, drag_offset: Vec2) {
        self.offset -= drag_offset;
    }

    /// One wheel notch. Positive `direction` zooms out, negative zooms in;
    /// the result silently clamps to `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn zoom_step(&mut self, direction: i8) {
        self.zoom = (self.zoom + direction.signum() as f32 * ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn to_screen_divides_by_zoom() {
        let camera = Camera {
            offset: Vec2::ZERO,
            zoom: 2.0,
        };
        assert_eq!(camera.to_screen(vec2(200.0, 100.0)), vec2(100.0, 50.0));
    }

    #[test]
    fn to_screen_subtracts_offset_first() {
        let camera = Camera {
            offset: vec2(40.0, -10.0),
            zoom: 0.5,
        };
        assert_eq!(camera.to_screen(vec2(50.0, 0.0)), vec2(20.0, 20.0));
    }

    #[test]
    fn zoom_step_clamps_at_both_ends() {
        let mut camera = Camera::default();
        for _ in 0..100 {
            camera.zoom_step(1);
        }
        assert_eq!(camera.zoom, MAX_ZOOM);

        for _ in 0..100 {
            camera.zoom_step(-1);
        }
        assert_eq!(camera.zoom, MIN_ZOOM);
    }

    #[test]
    fn zoom_step_leaves_offset_untouched() {
        let mut camera = Camera {
            offset: vec2(3.0, 7.0),
            zoom: 1.0,
        };
        camera.zoom_step(1);
        assert_eq!(camera.offset, vec2(3.0, 7.0));
        assert!((camera.zoom - 1.2).abs() < 1e-6);
    }

    #[test]
    fn drag_offset_scales_with_zoom() {
        let camera = Camera {
            offset: Vec2::ZERO,
            zoom: 3.0,
        };
        let offset = camera.drag_offset(vec2(10.0, 10.0), vec2(14.0, 8.0));
        assert_eq!(offset, vec2(12.0, -6.0));
    }

    #[test]
    fn commit_drag_matches_live_view() {
        let mut camera = Camera {
            offset: vec2(5.0, 5.0),
            zoom: 2.0,
        };
        let drag = camera.drag_offset(vec2(0.0, 0.0), vec2(30.0, -20.0));
        let live = camera.with_drag(drag);
        camera.commit_drag(drag);
        assert_eq!(camera, live);
    }

    proptest! {
        #[test]
        fn to_screen_inverts_translate_then_scale(
            wx in -1e5f32..1e5,
            wy in -1e5f32..1e5,
            ox in -1e5f32..1e5,
            oy in -1e5f32..1e5,
            zoom in 0.05f32..64.0,
        ) {
            let camera = Camera { offset: vec2(ox, oy), zoom };
            let screen = camera.to_screen(vec2(wx, wy));
            let world = screen * camera.zoom + camera.offset;
            prop_assert!((world.x - wx).abs() <= wx.abs().max(1.0) * 1e-4);
            prop_assert!((world.y - wy).abs() <= wy.abs().max(1.0) * 1e-4);
        }

        #[test]
        fn zoom_sequences_stay_in_range(steps in proptest::collection::vec(any::<i8>(), 0..256)) {
            let mut camera = Camera::default();
            for step in steps {
                camera.zoom_step(step);
                prop_assert!(camera.zoom >= MIN_ZOOM);
                prop_assert!(camera.zoom <= MAX_ZOOM);
            }
        }
    }
}
