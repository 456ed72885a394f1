use eframe::egui::{self, Align2, FontId, Rect, Sense, Stroke, StrokeKind, Ui, vec2};

use crate::highlight::{edge_highlighted, node_highlighted};
use crate::util::preview;

use super::super::render_utils::{
    CARD_BORDER, CARD_FILL, EDGE_COLOR, EDGE_FOCUS_COLOR, UNFOCUSED_OPACITY, card_visible,
    draw_background, edge_visible, fade, world_to_screen,
};
use super::super::ViewModel;

/// Side of a note card in world pixels.
pub(in crate::app) const NOTE_DIAMETER: f32 = 100.0;

const CARD_LABEL_CHARS: usize = 26;

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        self.handle_zoom(ui, &response);
        self.handle_pan(&response);

        if self.layout_dirty || self.layout_cache.is_none() {
            self.rebuild_layout(rect.size());
        }

        let camera = self.effective_camera();
        draw_background(&painter, rect, &camera);

        // Taken out of self so focus and search can be touched while drawing.
        let Some(mut layout) = self.layout_cache.take() else {
            return;
        };

        layout.screen_positions.clear();
        for node in &layout.nodes {
            layout
                .screen_positions
                .push(world_to_screen(rect, &camera, node.world_pos));
        }

        let card_side = NOTE_DIAMETER / camera.zoom;
        let card_rects = layout
            .screen_positions
            .iter()
            .map(|position| Rect::from_min_size(*position, vec2(card_side, card_side)))
            .collect::<Vec<_>>();

        let dragging = self.drag.is_some();
        let pointer = ui.input(|input| input.pointer.hover_pos());
        let hovered = if dragging {
            None
        } else {
            Self::hovered_card(pointer, &card_rects)
        };
        let hovered_id = hovered.map(|index| layout.nodes[index].id);

        if self.focus.opened_id().is_none() {
            match hovered_id {
                Some(id) => self.focus.pointer_enter(id),
                None => self.focus.pointer_leave(),
            }
        }

        if response.clicked() {
            match hovered_id {
                Some(id) => self.focus.click(id),
                None => self.focus.backdrop_click(),
            }
        }

        ui.output_mut(|output| {
            output.cursor_icon = if hovered_id.is_some() {
                egui::CursorIcon::PointingHand
            } else if dragging {
                egui::CursorIcon::Grabbing
            } else {
                egui::CursorIcon::Grab
            };
        });
        if dragging {
            ui.ctx().request_repaint();
        }

        let query = self.search.trim().to_owned();
        let card_center = vec2(card_side, card_side) * 0.5;
        let edge_width = (2.0 / camera.zoom).clamp(0.75, 4.0);

        let mut visible_edges = 0usize;
        for edge in &layout.edges {
            let Some(&to_index) = layout.index_by_id.get(&edge.to) else {
                continue;
            };

            // Derived length doubles as a cheap cull for sub-pixel edges.
            if edge.length / camera.zoom < 2.0 {
                continue;
            }

            let start = world_to_screen(rect, &camera, edge.anchor) + card_center;
            let end = layout.screen_positions[to_index] + card_center;
            if !edge_visible(rect, start, end, 2.0) {
                continue;
            }

            let lit = edge_highlighted(edge.from, &query, self.focus, &layout.adjacency);
            let from_focused = self.focus.focused_id() == Some(edge.from);
            let base = if from_focused {
                EDGE_FOCUS_COLOR
            } else {
                EDGE_COLOR
            };
            let color = if lit { base } else { fade(base, UNFOCUSED_OPACITY) };

            painter.line_segment([start, end], Stroke::new(edge_width, color));

            if from_focused && lit {
                // Direction tick at 60% of the span, oriented by the derived angle.
                let angle = edge.angle_degrees.to_radians();
                let along = vec2(angle.cos(), angle.sin()) * (edge.length / camera.zoom * 0.6);
                painter.circle_filled(start + along, (edge_width * 1.6).max(2.0), color);
            }

            visible_edges += 1;
        }
        self.visible_edge_count = visible_edges;

        let corner = (12.0 / camera.zoom).clamp(2.0, 16.0);
        let font = FontId::proportional((13.0 / camera.zoom).clamp(8.0, 26.0));

        let mut visible_notes = 0usize;
        for (index, node) in layout.nodes.iter().enumerate() {
            let card = card_rects[index];
            if !card_visible(rect, card) {
                continue;
            }

            let content = self.notes.content_of(node.id).unwrap_or("");
            // The hovered note always lights up, even mid-search.
            let lit = self.focus.focused_id() == Some(node.id)
                || node_highlighted(node.id, content, &query, self.focus, &layout.adjacency);
            let opacity = if lit { 1.0 } else { UNFOCUSED_OPACITY };

            painter.rect_filled(card, corner, fade(CARD_FILL, opacity));
            painter.rect_stroke(
                card,
                corner,
                Stroke::new(1.0, fade(CARD_BORDER, opacity)),
                StrokeKind::Outside,
            );
            painter.with_clip_rect(card.shrink(4.0)).text(
                card.center(),
                Align2::CENTER_CENTER,
                preview(content, CARD_LABEL_CHARS),
                font.clone(),
                fade(CARD_BORDER, opacity),
            );

            visible_notes += 1;
        }
        self.visible_note_count = visible_notes;

        if self.notes.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No notes yet. Open the composer to add one.",
                FontId::proportional(15.0),
                CARD_BORDER,
            );
        }

        self.layout_cache = Some(layout);
    }
}
