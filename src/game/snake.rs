use super::direction::Direction;
use crate::consts;
use ratatui::layout::{Position, Size};
use std::collections::VecDeque;

/// How a run ends.  An expected terminal game event, not an error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    /// The head left the playfield
    Wall,
    /// The head ran into the snake's own body
    Body,
}

/// Snake state.
///
/// All positions are relative to the top-left corner of the playfield.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The positions of every cell of the snake, head first.  Never empty.
    pub(super) body: VecDeque<Position>,

    /// The direction in which the snake is currently facing
    pub(super) facing: Direction,

    /// Set when food was eaten; the tail is kept on the next advance
    pub(super) pending_growth: bool,
}

impl Snake {
    /// Create a one-cell snake with its head at `head`, facing east
    pub(super) fn new(head: Position) -> Snake {
        Snake {
            body: VecDeque::from([head]),
            facing: Direction::East,
            pending_growth: false,
        }
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body should never be empty")
    }

    /// Return the glyph to use for drawing the snake's head
    pub(super) fn head_symbol(&self) -> char {
        match self.facing {
            Direction::North => consts::SNAKE_HEAD_NORTH_SYMBOL,
            Direction::South => consts::SNAKE_HEAD_SOUTH_SYMBOL,
            Direction::East => consts::SNAKE_HEAD_EAST_SYMBOL,
            Direction::West => consts::SNAKE_HEAD_WEST_SYMBOL,
        }
    }

    /// Return the positions of all of the snake's cells, head first
    pub(super) fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    /// Change the snake's direction to `direction`.  Reversing straight into
    /// the neck is ignored rather than letting the player kill the snake with
    /// a single keypress.
    pub(super) fn turn(&mut self, direction: Direction) {
        if direction != self.facing.reverse() {
            self.facing = direction;
        }
    }

    /// Extend the snake by one cell on its next advance.  Idempotent.
    pub(super) fn grow(&mut self) {
        self.pending_growth = true;
    }

    /// Move the snake forwards one cell in the current direction within
    /// `bounds`.
    ///
    /// The self-collision check runs against the full pre-move body, tail
    /// included: steering into the cell the tail is about to vacate still
    /// kills the snake.  Deliberate; do not relax the check to exclude the
    /// tail.
    pub(super) fn advance(&mut self, bounds: Size) -> Result<(), Collision> {
        let Some(next) = self.facing.advance(self.head(), bounds) else {
            return Err(Collision::Wall);
        };
        if self.body.contains(&next) {
            return Err(Collision::Body);
        }
        self.body.push_front(next);
        if self.pending_growth {
            self.pending_growth = false;
        } else {
            let _ = self.body.pop_back();
        }
        Ok(())
    }
}
