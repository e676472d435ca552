//! Cell and organism contracts consumed from the simulation
//!
//! The renderer never borrows simulation cells. It copies a [`CellSnapshot`]
//! (position + state) at request time, so a queued entry can never keep a
//! simulation cell alive.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grid coordinate; also the identity of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub x: u32,
    pub y: u32,
}

impl GridPos {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Discrete cell state tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    Empty,
    Food,
    Wall,
    Mouth,
    Producer,
    Mover,
    Killer,
    Armor,
    Eye,
}

impl CellState {
    pub const ALL: [CellState; 9] = [
        CellState::Empty,
        CellState::Food,
        CellState::Wall,
        CellState::Mouth,
        CellState::Producer,
        CellState::Mover,
        CellState::Killer,
        CellState::Armor,
        CellState::Eye,
    ];

    /// Number of states, for tables indexed by [`CellState::index`]
    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            CellState::Empty => "empty",
            CellState::Food => "food",
            CellState::Wall => "wall",
            CellState::Mouth => "mouth",
            CellState::Producer => "producer",
            CellState::Mover => "mover",
            CellState::Killer => "killer",
            CellState::Armor => "armor",
            CellState::Eye => "eye",
        }
    }

    /// Parse a state name. Returns None for names the renderer does not know.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.name() == name)
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything the renderer can draw: a position and a state
pub trait Drawable {
    fn pos(&self) -> GridPos;
    fn state(&self) -> CellState;

    fn snapshot(&self) -> CellSnapshot {
        CellSnapshot {
            pos: self.pos(),
            state: self.state(),
        }
    }
}

/// Plain value cell for drivers without a cell type of their own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub pos: GridPos,
    pub state: CellState,
}

impl Cell {
    pub const fn new(x: u32, y: u32, state: CellState) -> Self {
        Self {
            pos: GridPos::new(x, y),
            state,
        }
    }
}

impl Drawable for Cell {
    fn pos(&self) -> GridPos {
        self.pos
    }

    fn state(&self) -> CellState {
        self.state
    }
}

/// Copy of a cell's position and state taken when it was queued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellSnapshot {
    pub pos: GridPos,
    pub state: CellState,
}

impl Drawable for CellSnapshot {
    fn pos(&self) -> GridPos {
        self.pos
    }

    fn state(&self) -> CellState {
        self.state
    }

    fn snapshot(&self) -> CellSnapshot {
        *self
    }
}

impl<T: Drawable + ?Sized> Drawable for &T {
    fn pos(&self) -> GridPos {
        (**self).pos()
    }

    fn state(&self) -> CellState {
        (**self).state()
    }
}

/// A named collection of cells laid out by its anatomy
pub trait Organism {
    /// Anatomy-relative cell reference
    type Part;
    /// World cell produced by [`Organism::real_cell`]
    type Cell: Drawable;

    fn anatomy(&self) -> &[Self::Part];

    /// Resolve an anatomy part to the world cell it occupies, or None when the
    /// part lies outside the world.
    fn real_cell(&self, part: &Self::Part) -> Option<Self::Cell>;

    fn real_cells(&self) -> Vec<Self::Cell> {
        self.anatomy()
            .iter()
            .filter_map(|part| self.real_cell(part))
            .collect()
    }
}
