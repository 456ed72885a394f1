use eframe::egui::{self, Align, Context, Key, Layout, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use tracing::info;

use crate::util::preview;

use super::super::ViewModel;

const RESULT_ROWS: usize = 8;
const RESULT_PREVIEW_CHARS: usize = 64;
const STATUS_SECS: f64 = 3.0;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

impl ViewModel {
    pub(in crate::app) fn draw_hotbar(&mut self, ctx: &Context, is_reloading: bool) {
        egui::TopBottomPanel::top("hotbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("notegraph");
                ui.separator();

                let composer_label = if self.composer_open {
                    "Close composer"
                } else {
                    "New note"
                };
                if ui.button(composer_label).clicked() {
                    self.composer_open = !self.composer_open;
                }
                ui.separator();

                ui.add(
                    egui::TextEdit::singleline(&mut self.search)
                        .hint_text("Search")
                        .desired_width(320.0),
                );
                if is_reloading {
                    ui.spinner();
                }

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(format!(
                        "notes: {}  edges: {}",
                        self.visible_note_count, self.visible_edge_count
                    ));
                    if let Some(status) = &self.status {
                        let age = ui.input(|input| input.time) - status.shown_at;
                        if age < STATUS_SECS {
                            ui.label(status.text.as_str());
                            ui.ctx().request_repaint();
                        } else {
                            self.status = None;
                        }
                    }
                });
            });

            if self.composer_open {
                self.draw_composer(ui, ctx);
            }

            if !self.search.trim().is_empty() {
                self.draw_search_results(ui);
            }

            ui.add_space(2.0);
        });
    }

    fn draw_composer(&mut self, ui: &mut Ui, ctx: &Context) {
        ui.add_space(4.0);
        let editor = ui.add(
            egui::TextEdit::multiline(&mut self.composer_text)
                .hint_text("Write a note; Ctrl+Enter to add")
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );

        let hotkey = editor.has_focus()
            && ui.input(|input| input.key_pressed(Key::Enter) && input.modifiers.command);
        let clicked = ui.button("Add note").clicked();

        if (hotkey || clicked) && !self.composer_text.trim().is_empty() {
            self.submit_note(ctx);
        }
    }

    fn submit_note(&mut self, ctx: &Context) {
        let content = self.composer_text.trim().to_owned();
        match self.store.add_note(&content) {
            Ok(id) => {
                info!(id, "note added from the composer");
                self.composer_text.clear();
                self.composer_open = false;
                self.refresh_requested = true;
                self.set_status(ctx, "Note added".to_owned());
            }
            Err(error) => {
                self.set_status(ctx, format!("Failed to add note: {error:#}"));
            }
        }
    }

    fn draw_search_results(&mut self, ui: &mut Ui) {
        let query = self.search.trim();
        let matcher = SkimMatcherV2::default();

        let mut ranked = self
            .notes
            .iter()
            .filter_map(|note| {
                fuzzy_match_score(&matcher, &note.content, query)
                    .map(|score| (score, note.id, preview(&note.content, RESULT_PREVIEW_CHARS)))
            })
            .collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        ranked.truncate(RESULT_ROWS);

        ui.add_space(4.0);
        if ranked.is_empty() {
            ui.small("No matching notes.");
            return;
        }

        for (_score, id, row) in ranked {
            if ui.link(row).clicked() {
                self.focus.click(id);
            }
        }
    }
}
