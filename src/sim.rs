//! Small random-walk world used to drive the renderer
//!
//! Critters are rigid anatomies that wander one cell at a time. Food drifts in
//! at random. Every cell that changes is reported with `add_to_render`, which
//! is all the renderer needs to keep the surface current.

use crate::util::Rng;
use cellgrid::{Cell, CellState, GridPos, Organism, Renderer, Surface};

/// Anatomy-relative cell
#[derive(Debug, Clone, Copy)]
pub struct Part {
    dx: i32,
    dy: i32,
    state: CellState,
}

impl Part {
    const fn new(dx: i32, dy: i32, state: CellState) -> Self {
        Self { dx, dy, state }
    }
}

const ANATOMY: [Part; 5] = [
    Part::new(0, 0, CellState::Mouth),
    Part::new(1, 0, CellState::Producer),
    Part::new(-1, 0, CellState::Mover),
    Part::new(0, 1, CellState::Eye),
    Part::new(0, -1, CellState::Armor),
];

const FOOD_CHANCE: f32 = 0.3;

pub struct Critter {
    anatomy: Vec<Part>,
    x: i32,
    y: i32,
    cols: u32,
    rows: u32,
}

impl Organism for Critter {
    type Part = Part;
    type Cell = Cell;

    fn anatomy(&self) -> &[Part] {
        &self.anatomy
    }

    fn real_cell(&self, part: &Part) -> Option<Cell> {
        let x = u32::try_from(self.x + part.dx).ok()?;
        let y = u32::try_from(self.y + part.dy).ok()?;
        (x < self.cols && y < self.rows).then_some(Cell::new(x, y, part.state))
    }
}

pub struct World {
    cols: u32,
    rows: u32,
    /// Column-major: grid[x][y]
    grid: Vec<Vec<Cell>>,
    critters: Vec<Critter>,
    rng: Rng,
}

impl World {
    pub fn new(cols: u32, rows: u32, critters: usize, seed: u64) -> Self {
        let grid = (0..cols)
            .map(|x| (0..rows).map(|y| Cell::new(x, y, CellState::Empty)).collect())
            .collect();
        let mut world = Self {
            cols,
            rows,
            grid,
            critters: Vec::with_capacity(critters),
            rng: Rng::new(seed),
        };

        // Walls around the border
        for x in 0..cols {
            world.set(GridPos::new(x, 0), CellState::Wall);
            world.set(GridPos::new(x, rows.saturating_sub(1)), CellState::Wall);
        }
        for y in 0..rows {
            world.set(GridPos::new(0, y), CellState::Wall);
            world.set(GridPos::new(cols.saturating_sub(1), y), CellState::Wall);
        }

        if cols >= 5 && rows >= 5 {
            for _ in 0..critters {
                let x = world.rng.range_i32(2, cols as i32 - 3);
                let y = world.rng.range_i32(2, rows as i32 - 3);
                let critter = Critter {
                    anatomy: ANATOMY.to_vec(),
                    x,
                    y,
                    cols,
                    rows,
                };
                for cell in critter.real_cells() {
                    world.set(cell.pos, cell.state);
                }
                world.critters.push(critter);
            }
        }
        world
    }

    pub fn grid(&self) -> &[Vec<Cell>] {
        &self.grid
    }

    pub fn critters(&self) -> &[Critter] {
        &self.critters
    }

    pub fn cell(&self, pos: GridPos) -> Option<&Cell> {
        self.grid.get(pos.x as usize)?.get(pos.y as usize)
    }

    fn set(&mut self, pos: GridPos, state: CellState) -> Option<Cell> {
        let cell = self.grid.get_mut(pos.x as usize)?.get_mut(pos.y as usize)?;
        cell.state = state;
        Some(*cell)
    }

    /// Update a cell and report it to the renderer
    fn change<S: Surface>(&mut self, renderer: &mut Renderer<S>, pos: GridPos, state: CellState) {
        if let Some(cell) = self.set(pos, state) {
            renderer.add_to_render(cell);
        }
    }

    /// Advance one tick, reporting every changed cell
    pub fn step<S: Surface>(&mut self, renderer: &mut Renderer<S>) {
        for i in 0..self.critters.len() {
            let dx = self.rng.range_i32(-1, 1);
            let dy = self.rng.range_i32(-1, 1);
            if dx == 0 && dy == 0 {
                continue;
            }

            let old = self.critters[i].real_cells();
            let (nx, ny) = (self.critters[i].x + dx, self.critters[i].y + dy);
            let blocked = self.critters[i].anatomy.iter().any(|p| {
                let (x, y) = (nx + p.dx, ny + p.dy);
                x <= 0 || y <= 0 || x >= self.cols as i32 - 1 || y >= self.rows as i32 - 1
            });
            if blocked {
                continue;
            }

            for cell in &old {
                self.change(renderer, cell.pos, CellState::Empty);
            }
            self.critters[i].x = nx;
            self.critters[i].y = ny;
            for cell in self.critters[i].real_cells() {
                self.change(renderer, cell.pos, cell.state);
            }
        }

        if self.cols > 2 && self.rows > 2 && self.rng.next_f32() < FOOD_CHANCE {
            let pos = GridPos::new(
                1 + self.rng.index(self.cols as usize - 2) as u32,
                1 + self.rng.index(self.rows as usize - 2) as u32,
            );
            if self.cell(pos).map(|c| c.state) == Some(CellState::Empty) {
                self.change(renderer, pos, CellState::Food);
            }
        }
    }
}
