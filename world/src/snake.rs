use std::collections::VecDeque;

use retro_snake_core::{Cell, Direction};

/// Ordered body of cells with the head at the front.
#[derive(Clone, Debug)]
pub(crate) struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    heading: Direction,
    pending_growth: bool,
    initial_body: Vec<Cell>,
    initial_direction: Direction,
}

impl Snake {
    /// Creates a snake that resets back to `body` travelling in `direction`.
    ///
    /// `body` must be non-empty; the world validates layouts before calling.
    pub(crate) fn new(body: Vec<Cell>, direction: Direction) -> Self {
        Self {
            body: body.iter().copied().collect(),
            direction,
            heading: direction,
            pending_growth: false,
            initial_body: body,
            initial_direction: direction,
        }
    }

    /// Moves the live snake to `body` without changing what `reset` restores.
    pub(crate) fn place(&mut self, body: &[Cell], direction: Direction) {
        self.body = body.iter().copied().collect();
        self.direction = direction;
        self.heading = direction;
        self.pending_growth = false;
    }

    pub(crate) fn head(&self) -> Cell {
        self.body.front().copied().unwrap_or_else(|| {
            debug_assert!(false, "snake body is never empty");
            Cell::new(0, 0)
        })
    }

    pub(crate) fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    /// Body without the head.
    pub(crate) fn tail(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter().skip(1)
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction used by the most recent `advance`, or the initial direction.
    pub(crate) fn heading(&self) -> Direction {
        self.heading
    }

    /// Moves one cell forward. Returns whether the body grew.
    ///
    /// No bounds checking happens here.
    pub(crate) fn advance(&mut self) -> bool {
        let new_head = self.head().step(self.direction);
        self.body.push_front(new_head);
        self.heading = self.direction;

        if self.pending_growth {
            self.pending_growth = false;
            true
        } else {
            let _ = self.body.pop_back();
            false
        }
    }

    /// Queues one cell of growth for the next `advance`.
    pub(crate) fn grow(&mut self) {
        self.pending_growth = true;
    }

    pub(crate) fn reset(&mut self) {
        self.body = self.initial_body.iter().copied().collect();
        self.direction = self.initial_direction;
        self.heading = self.initial_direction;
        self.pending_growth = false;
    }

    /// Overwrites the travel direction. Reversal checks belong to the caller.
    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }
}
