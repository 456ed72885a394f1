use std::collections::HashMap;

use eframe::egui::{Vec2, vec2};
use rand::Rng;

/// Random draws attempted per note before falling back to a deterministic
/// scan of the remaining free cells. Keeps placement bounded even when the
/// grid is nearly (or entirely) full.
const MAX_RANDOM_DRAWS: usize = 24;

/// Coarse spatial index used only while scattering notes, so no two of them
/// land in the same cell. Rebuilt from scratch for every regeneration pass.
pub struct OccupancyGrid {
    extent: Vec2,
    cell_size: f32,
    cols: usize,
    rows: usize,
    occupied: Vec<bool>,
}

impl OccupancyGrid {
    pub fn new(extent: Vec2, cell_size: f32) -> Self {
        let cell_size = cell_size.max(1.0);
        let extent = vec2(extent.x.max(cell_size), extent.y.max(cell_size));
        let cols = (extent.x / cell_size).ceil() as usize;
        let rows = (extent.y / cell_size).ceil() as usize;

        Self {
            extent,
            cell_size,
            cols,
            rows,
            occupied: vec![false; cols * rows],
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    pub fn free_cell_count(&self) -> usize {
        self.occupied.iter().filter(|cell| !**cell).count()
    }

    fn cell_index(&self, position: Vec2) -> usize {
        let col = ((position.x / self.cell_size) as usize).min(self.cols - 1);
        let row = ((position.y / self.cell_size) as usize).min(self.rows - 1);
        row * self.cols + col
    }

    pub fn is_free(&self, position: Vec2) -> bool {
        !self.occupied[self.cell_index(position)]
    }

    /// Marks the cell containing `position` occupied. Used both by the
    /// scatter pass and to seed the grid with notes that already carry a
    /// stored position.
    pub fn mark(&mut self, position: Vec2) {
        let index = self.cell_index(position);
        self.occupied[index] = true;
    }

    fn first_free_cell(&self) -> Option<(usize, usize)> {
        self.occupied
            .iter()
            .position(|cell| !*cell)
            .map(|index| (index % self.cols, index / self.cols))
    }

    fn jittered_position_in_cell(&self, col: usize, row: usize, rng: &mut impl Rng) -> Vec2 {
        let min_x = col as f32 * self.cell_size;
        let min_y = row as f32 * self.cell_size;
        let max_x = (min_x + self.cell_size).min(self.extent.x);
        let max_y = (min_y + self.cell_size).min(self.extent.y);
        vec2(rng.gen_range(min_x..max_x), rng.gen_range(min_y..max_y))
    }
}

/// Draws a random in-extent position for each of `count` notes, rejecting
/// draws whose grid cell is taken. After `MAX_RANDOM_DRAWS` misses the note
/// is placed deterministically in the first free cell; once the grid is full
/// the remaining notes are placed unconstrained rather than spinning forever.
pub fn scatter(grid: &mut OccupancyGrid, count: usize, rng: &mut impl Rng) -> Vec<Vec2> {
    let mut positions = Vec::with_capacity(count);

    'notes: for _ in 0..count {
        for _ in 0..MAX_RANDOM_DRAWS {
            let candidate = vec2(
                rng.gen_range(0.0..grid.extent.x),
                rng.gen_range(0.0..grid.extent.y),
            );
            if grid.is_free(candidate) {
                grid.mark(candidate);
                positions.push(candidate);
                continue 'notes;
            }
        }

        if let Some((col, row)) = grid.first_free_cell() {
            let position = grid.jittered_position_in_cell(col, row, rng);
            grid.mark(position);
            positions.push(position);
        } else {
            positions.push(vec2(
                rng.gen_range(0.0..grid.extent.x),
                rng.gen_range(0.0..grid.extent.y),
            ));
        }
    }

    positions
}

/// An edge derived entirely from its two endpoint positions. Length and
/// angle are kept alongside the endpoints for rendering a rotated segment
/// anchored at the source note.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeRecord {
    pub from: u64,
    pub to: u64,
    pub length: f32,
    pub angle_degrees: f32,
    pub anchor: Vec2,
}

/// For every ordered pair of distinct notes, includes an edge with the given
/// probability. Returns the edge list plus the adjacency mapping from each
/// note id to its out-neighbors.
pub fn generate_edges(
    nodes: &[(u64, Vec2)],
    probability: f64,
    rng: &mut impl Rng,
) -> (Vec<EdgeRecord>, HashMap<u64, Vec<u64>>) {
    let probability = probability.clamp(0.0, 1.0);
    let mut edges = Vec::new();
    let mut adjacency: HashMap<u64, Vec<u64>> = HashMap::with_capacity(nodes.len());

    for &(from, anchor) in nodes {
        adjacency.entry(from).or_default();
        for &(to, target) in nodes {
            if from == to {
                continue;
            }
            if !rng.gen_bool(probability) {
                continue;
            }

            let delta = target - anchor;
            edges.push(EdgeRecord {
                from,
                to,
                length: delta.length(),
                angle_degrees: delta.y.atan2(delta.x).to_degrees(),
                anchor,
            });
            adjacency.entry(from).or_default().push(to);
        }
    }

    (edges, adjacency)
}
