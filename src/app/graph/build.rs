use std::collections::HashMap;

use eframe::egui::{Vec2, vec2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::layout::{OccupancyGrid, generate_edges, scatter};

use super::super::{LayoutNode, NoteLayout, ViewModel};

impl ViewModel {
    /// Regenerates the layout from the current note set. Notes with a stored
    /// position land exactly there (position is percent-of-viewport) and
    /// reserve their grid cell; the rest are scattered onto the free cells.
    /// The fixed seed keeps scattered notes in place across refreshes.
    pub(in crate::app) fn rebuild_layout(&mut self, canvas_size: Vec2) {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut grid = OccupancyGrid::new(canvas_size, self.cell_size);

        let mut nodes = Vec::with_capacity(self.notes.len());
        let mut unpositioned = Vec::new();
        for note in self.notes.iter() {
            match note.position {
                Some([px, py]) => {
                    let world = vec2(
                        px / 100.0 * canvas_size.x,
                        py / 100.0 * canvas_size.y,
                    );
                    grid.mark(world);
                    nodes.push(LayoutNode {
                        id: note.id,
                        world_pos: world,
                    });
                }
                None => unpositioned.push(note.id),
            }
        }

        let scattered = scatter(&mut grid, unpositioned.len(), &mut rng);
        for (id, world_pos) in unpositioned.into_iter().zip(scattered) {
            nodes.push(LayoutNode { id, world_pos });
        }

        let endpoints = nodes
            .iter()
            .map(|node| (node.id, node.world_pos))
            .collect::<Vec<_>>();
        let (edges, adjacency) = generate_edges(&endpoints, self.edge_probability, &mut rng);

        let mut index_by_id = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            index_by_id.insert(node.id, index);
        }

        debug!(
            notes = nodes.len(),
            edges = edges.len(),
            grid_cells = grid.cell_count(),
            free_cells = grid.free_cell_count(),
            "rebuilt note layout"
        );

        self.layout_cache = Some(NoteLayout {
            nodes,
            edges,
            adjacency,
            index_by_id,
            screen_positions: Vec::new(),
        });
        self.layout_dirty = false;
    }
}
