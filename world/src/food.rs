use rand::Rng;
use retro_snake_core::{contains, Cell, Grid};

/// Single food cell that the snake tries to reach.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Food {
    position: Cell,
}

impl Food {
    /// Places food on a random cell outside `occupied`.
    pub(crate) fn spawn<'a, R, I>(grid: Grid, occupied: I, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = &'a Cell> + Clone,
    {
        Self {
            position: random_free_cell(grid, occupied, rng),
        }
    }

    /// Places food on a caller-chosen cell.
    pub(crate) const fn at(position: Cell) -> Self {
        Self { position }
    }

    pub(crate) const fn position(&self) -> Cell {
        self.position
    }

    /// Moves the food to a random cell outside `occupied`.
    pub(crate) fn relocate<'a, R, I>(&mut self, grid: Grid, occupied: I, rng: &mut R) -> Cell
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = &'a Cell> + Clone,
    {
        self.position = random_free_cell(grid, occupied, rng);
        self.position
    }
}

/// Rejection-samples uniformly random board cells until one is free.
///
/// Does not terminate if `occupied` covers the whole board.
fn random_free_cell<'a, R, I>(grid: Grid, occupied: I, rng: &mut R) -> Cell
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = &'a Cell> + Clone,
{
    let bound = i32::try_from(grid.cell_count()).unwrap_or(i32::MAX).max(1);
    loop {
        let candidate = Cell::new(rng.gen_range(0..bound), rng.gen_range(0..bound));
        if !contains(candidate, occupied.clone()) {
            return candidate;
        }
    }
}
