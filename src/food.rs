use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Draws from the source before falling back to a deterministic scan.
pub const MAX_SAMPLE_ATTEMPTS: usize = 64;

/// Produces candidate food coordinates.
///
/// Implementations only propose positions; [`spawn_position`] decides
/// whether a candidate is usable.
pub trait CoordinateSource: Send {
    /// Returns the next candidate position for a board of size `grid`.
    fn next_position(&mut self, grid: GridSize) -> Position;
}

/// Uniform coordinates drawn from a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Reproducible source for replays and tests.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng + Send> CoordinateSource for RngSource<R> {
    fn next_position(&mut self, grid: GridSize) -> Position {
        Position {
            x: self.rng.gen_range(0..i32::from(grid.width)),
            y: self.rng.gen_range(0..i32::from(grid.height)),
        }
    }
}

/// Replays a fixed list of positions, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    positions: Vec<Position>,
    cursor: usize,
}

impl ScriptedSource {
    /// # Panics
    ///
    /// Panics when `positions` is empty.
    #[must_use]
    pub fn new(positions: Vec<Position>) -> Self {
        assert!(!positions.is_empty(), "scripted source needs positions");
        Self {
            positions,
            cursor: 0,
        }
    }
}

impl CoordinateSource for ScriptedSource {
    fn next_position(&mut self, _grid: GridSize) -> Position {
        let position = self.positions[self.cursor];
        self.cursor = (self.cursor + 1) % self.positions.len();
        position
    }
}

/// The single food item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Spawns food in an unoccupied cell, or `None` when the board is full.
    #[must_use]
    pub fn spawn<S: CoordinateSource + ?Sized>(
        source: &mut S,
        bounds: GridSize,
        snake: &Snake,
    ) -> Option<Self> {
        spawn_position(source, bounds, snake).map(Self::new)
    }
}

/// Picks a free position that is not currently occupied by the snake.
///
/// Candidates come from `source` (rejection sampling). When every attempt
/// lands on the snake or off the board, the first free cell in row-major
/// order after the last candidate is used instead.
#[must_use]
pub fn spawn_position<S: CoordinateSource + ?Sized>(
    source: &mut S,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    let total_cells = bounds.total_cells();
    if total_cells == 0 || snake.len() >= total_cells {
        return None;
    }

    let mut last = Position::new(0, 0);
    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let candidate = source.next_position(bounds);
        if candidate.is_within_bounds(bounds) && !snake.occupies(candidate) {
            return Some(candidate);
        }
        last = candidate;
    }

    log::debug!("food sampling fell back to scan after {MAX_SAMPLE_ATTEMPTS} rejected draws");
    scan_free_cell(bounds, snake, last)
}

fn scan_free_cell(bounds: GridSize, snake: &Snake, from: Position) -> Option<Position> {
    let width = usize::from(bounds.width);
    let total = bounds.total_cells();
    let start = match (usize::try_from(from.x), usize::try_from(from.y)) {
        (Ok(x), Ok(y)) if from.is_within_bounds(bounds) => y * width + x + 1,
        _ => 0,
    };

    (0..total)
        .map(|offset| (start + offset) % total)
        .map(|index| cell_at(index, width))
        .find(|position| !snake.occupies(*position))
}

// Row-major index to cell; both coordinates stay below `u16::MAX`.
fn cell_at(index: usize, width: usize) -> Position {
    Position::new((index % width) as i32, (index / width) as i32)
}
