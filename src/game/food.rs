use rand::Rng;
use ratatui::layout::{Position, Size};
use std::collections::VecDeque;

/// Pick a cell for a new piece of food: uniformly random draws over the whole
/// playfield until one lands outside `occupied`.
///
/// Known limitation: when `occupied` covers every cell this never returns.
/// The playfield has 720 cells, so a run would have to fill the whole board
/// to get there.
pub(super) fn spawn<R: Rng>(rng: &mut R, bounds: Size, occupied: &VecDeque<Position>) -> Position {
    loop {
        let pos = Position::new(
            rng.random_range(0..bounds.width),
            rng.random_range(0..bounds.height),
        );
        if !occupied.contains(&pos) {
            return pos;
        }
    }
}
