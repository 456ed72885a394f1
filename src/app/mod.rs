use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};
use tracing::{info, warn};

use crate::camera::Camera;
use crate::highlight::Focus;
use crate::layout::EdgeRecord;
use crate::notes::{FileNoteStore, NoteSet};

mod graph;
mod render_utils;
mod ui;

/// Settings carried from the command line into the view model.
#[derive(Clone, Debug)]
pub struct GraphConfig {
    pub notes_file: PathBuf,
    pub edge_probability: f64,
    pub cell_size: f32,
    pub seed: u64,
}

pub struct NoteGraphApp {
    config: GraphConfig,
    state: AppState,
    reload_rx: Option<Receiver<Result<NoteSet, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<NoteSet, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    notes: NoteSet,
    store: FileNoteStore,
    edge_probability: f64,
    cell_size: f32,
    seed: u64,
    camera: Camera,
    drag: Option<DragState>,
    search: String,
    focus: Focus,
    layout_dirty: bool,
    layout_cache: Option<NoteLayout>,
    composer_open: bool,
    composer_text: String,
    status: Option<StatusLine>,
    refresh_requested: bool,
    visible_note_count: usize,
    visible_edge_count: usize,
}

/// An active pan gesture. The full offset is recomputed from `start` on
/// every pointer move and only folded into the camera on release.
struct DragState {
    start: Vec2,
    offset: Vec2,
}

/// Everything derived from the note set for drawing: world positions (stored
/// ones honored, the rest scattered on the occupancy grid), the generated
/// edge set, and the adjacency mapping the highlight rules consume.
struct NoteLayout {
    nodes: Vec<LayoutNode>,
    edges: Vec<EdgeRecord>,
    adjacency: HashMap<u64, Vec<u64>>,
    index_by_id: HashMap<u64, usize>,
    screen_positions: Vec<egui::Pos2>,
}

struct LayoutNode {
    id: u64,
    world_pos: Vec2,
}

struct StatusLine {
    text: String,
    shown_at: f64,
}

impl NoteGraphApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: GraphConfig) -> Self {
        let state = Self::start_load(config.notes_file.clone());
        Self {
            config,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(notes_file: PathBuf) -> Receiver<Result<NoteSet, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = FileNoteStore::new(notes_file)
                .load()
                .map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(notes_file: PathBuf) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(notes_file),
        }
    }
}

impl eframe::App for NoteGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(notes) => AppState::Ready(Box::new(ViewModel::new(notes, &self.config))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading notes...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                let notes_file = self.config.notes_file.clone();
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load notes");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(notes_file));
                    }
                });
            }
            AppState::Ready(model) => {
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, is_reloading);

                if model.refresh_requested && self.reload_rx.is_none() {
                    info!("refreshing notes");
                    self.reload_rx = Some(Self::spawn_load(self.config.notes_file.clone()));
                }
                model.refresh_requested = false;

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(Ok(notes)) => model.replace_notes(notes),
                        Ok(Err(error)) => {
                            warn!(error = %error, "refresh failed; keeping the current note set");
                            model.set_status(ctx, format!("Refresh failed: {error}"));
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            warn!("refresh worker disconnected");
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}

impl ViewModel {
    fn new(notes: NoteSet, config: &GraphConfig) -> Self {
        Self {
            notes,
            store: FileNoteStore::new(config.notes_file.clone()),
            edge_probability: config.edge_probability,
            cell_size: config.cell_size,
            seed: config.seed,
            camera: Camera::default(),
            drag: None,
            search: String::new(),
            focus: Focus::Unfocused,
            layout_dirty: true,
            layout_cache: None,
            composer_open: false,
            composer_text: String::new(),
            status: None,
            refresh_requested: false,
            visible_note_count: 0,
            visible_edge_count: 0,
        }
    }

    /// The refresh contract: collaborators hand over a whole new note set and
    /// the layout is regenerated. Camera, search, and overlay state survive
    /// unless the opened note vanished.
    fn replace_notes(&mut self, notes: NoteSet) {
        if let Some(open) = self.focus.opened_id()
            && notes.get(open).is_none()
        {
            self.focus = Focus::Unfocused;
        }
        self.notes = notes;
        self.layout_dirty = true;
    }

    fn show(&mut self, ctx: &Context, is_reloading: bool) {
        self.draw_hotbar(ctx, is_reloading);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.draw_graph(ui);
            });

        if let Some(open_id) = self.focus.opened_id() {
            self.draw_overlay(ctx, open_id);
        }
    }

    fn set_status(&mut self, ctx: &Context, text: String) {
        self.status = Some(StatusLine {
            text,
            shown_at: ctx.input(|input| input.time),
        });
    }
}
