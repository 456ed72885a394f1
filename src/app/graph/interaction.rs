use eframe::egui::{self, Pos2, Rect, Ui, Vec2};

use crate::camera::Camera;

use super::super::{DragState, ViewModel};

impl ViewModel {
    pub(in crate::app) fn handle_zoom(&mut self, ui: &Ui, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        // Zoom acts as a divisor, so wheel-up (positive scroll) steps it down
        // to magnify the scene.
        let direction = if scroll > 0.0 { -1 } else { 1 };
        self.camera.zoom_step(direction);
    }

    pub(in crate::app) fn handle_pan(&mut self, response: &egui::Response) {
        if response.drag_started_by(egui::PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            self.drag = Some(DragState {
                start: pointer.to_vec2(),
                offset: Vec2::ZERO,
            });
        }

        if response.dragged_by(egui::PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
            && let Some(drag) = self.drag.as_mut()
        {
            drag.offset = self.camera.drag_offset(drag.start, pointer.to_vec2());
        }

        if response.drag_stopped_by(egui::PointerButton::Primary)
            && let Some(drag) = self.drag.take()
        {
            self.camera.commit_drag(drag.offset);
        }
    }

    /// The committed camera plus any in-flight drag offset.
    pub(in crate::app) fn effective_camera(&self) -> Camera {
        match &self.drag {
            Some(drag) => self.camera.with_drag(drag.offset),
            None => self.camera,
        }
    }

    /// Topmost card under the pointer; later cards draw on top.
    pub(in crate::app) fn hovered_card(
        pointer: Option<Pos2>,
        card_rects: &[Rect],
    ) -> Option<usize> {
        let pointer = pointer?;
        card_rects.iter().rposition(|card| card.contains(pointer))
    }
}
