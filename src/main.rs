mod app;
mod camera;
mod highlight;
mod layout;
mod notes;
mod util;

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Notes file in the `{"nodes": [...]}` payload shape.
    #[arg(long, default_value = "notes.json")]
    notes_file: PathBuf,

    /// Chance of generating an edge between any ordered pair of notes.
    #[arg(long, default_value_t = 0.02)]
    edge_probability: f64,

    /// Occupancy grid cell size in pixels for scattered notes.
    #[arg(long, default_value_t = 120.0)]
    cell_size: f32,

    /// Seed for note scatter and edge generation.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = app::GraphConfig {
        notes_file: args.notes_file,
        edge_probability: args.edge_probability,
        cell_size: args.cell_size,
        seed: args.seed,
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "notegraph",
        options,
        Box::new(move |cc| Ok(Box::new(app::NoteGraphApp::new(cc, config)))),
    )
}
