use eframe::egui::{self, Align2, Color32, Context, CornerRadius, Sense, Stroke, Vec2};

use crate::util::preview;

use super::super::render_utils::{CARD_BORDER, CARD_FILL};
use super::super::ViewModel;

const LINKED_PREVIEW_CHARS: usize = 56;

impl ViewModel {
    /// Centered detail card for the opened note, over a dimmed backdrop.
    /// Clicking the card again closes it; clicks that land on the canvas
    /// behind it are handled there as backdrop clicks.
    pub(in crate::app) fn draw_overlay(&mut self, ctx: &Context, open_id: u64) {
        let screen = ctx.screen_rect();
        ctx.layer_painter(egui::LayerId::new(
            egui::Order::Middle,
            egui::Id::new("note_backdrop"),
        ))
        .rect_filled(screen, 0.0, Color32::from_rgba_unmultiplied(128, 128, 128, 102));

        let Some(content) = self.notes.content_of(open_id).map(str::to_owned) else {
            self.focus.backdrop_click();
            return;
        };

        let linked = self
            .layout_cache
            .as_ref()
            .and_then(|layout| layout.adjacency.get(&open_id))
            .map(|ids| self.notes.contents_for(ids))
            .unwrap_or_default()
            .into_iter()
            .map(|linked_content| preview(linked_content, LINKED_PREVIEW_CHARS))
            .collect::<Vec<_>>();

        let response = egui::Area::new(egui::Id::new("note_overlay"))
            .order(egui::Order::Foreground)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(CARD_FILL)
                    .stroke(Stroke::new(1.0, CARD_BORDER))
                    .corner_radius(CornerRadius::same(12))
                    .inner_margin(24.0)
                    .show(ui, |ui| {
                        ui.set_min_width((screen.width() * 0.3).clamp(280.0, 560.0));
                        ui.set_max_width((screen.width() * 0.4).clamp(280.0, 640.0));
                        ui.set_max_height(screen.height() * 0.5);

                        egui::ScrollArea::vertical().show(ui, |ui| {
                            ui.label(content.as_str());

                            if !linked.is_empty() {
                                ui.add_space(8.0);
                                ui.separator();
                                ui.small("Linked notes");
                                for row in &linked {
                                    ui.label(format!("\u{2022} {row}"));
                                }
                            }
                        });
                    });
            })
            .response;

        if response.interact(Sense::click()).clicked() {
            self.focus.click(open_id);
        }
    }
}
