//! Per-cell evaluation as a resumable computation.
//!
//! A [`CellEvaluator`] never sees the grid. It asks for cell states one at a
//! time by yielding [`Yield::Read`], gets each answer through the next call to
//! [`CellEvaluator::resume`], and finally yields a [`CellTransition`]. Whoever
//! drives it decides which grid the answers come from, which is how the driver
//! keeps every read on the previous generation.

use crate::Cell;

/// Cell coordinates. Any values are allowed, the grid wraps them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: isize,
    pub col: isize,
}

impl Coord {
    pub fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }

    pub fn offset(self, NeighborOffset(dr, dc): NeighborOffset) -> Self {
        Self::new(self.row + dr, self.col + dc)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeighborOffset(pub isize, pub isize);

/// Row-major, which fixes the order of the read requests.
pub const NEIGHBOR_OFFSETS: [NeighborOffset; 8] = [
    NeighborOffset(-1, -1),
    NeighborOffset(-1, 0),
    NeighborOffset(-1, 1),
    NeighborOffset(0, -1),
    NeighborOffset(0, 1),
    NeighborOffset(1, -1),
    NeighborOffset(1, 0),
    NeighborOffset(1, 1),
];

/// Verdict for one cell: its state in the next generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellTransition {
    pub row: isize,
    pub col: isize,
    pub next_state: Cell,
}

/// B3/S23.
pub fn life_rule(state: Cell, alive_neighbors: usize) -> Cell {
    match (state, alive_neighbors) {
        (Cell::Alive, 2 | 3) | (Cell::Dead, 3) => Cell::Alive,
        _ => Cell::Dead,
    }
}

/// Yielded by [`NeighborCounter::resume`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountStep {
    Read(Coord),
    Done(usize),
}

/// Asks for the 8 neighbors of a cell in [`NEIGHBOR_OFFSETS`] order and counts the alive ones.
#[derive(Clone, Debug)]
pub struct NeighborCounter {
    center: Coord,
    next: usize,
    alive: usize,
}

impl NeighborCounter {
    pub fn new(center: Coord) -> Self {
        Self {
            center,
            next: 0,
            alive: 0,
        }
    }

    /// The first call takes `None`; every later one takes the state of the
    /// neighbor requested by the previous call.
    pub fn resume(&mut self, reply: Option<Cell>) -> CountStep {
        match reply {
            Some(state) => {
                assert!(self.next > 0, "no neighbor was requested yet");
                self.alive += state.is_alive() as usize;
            }
            None => assert_eq!(self.next, 0, "neighbor state expected"),
        }
        match NEIGHBOR_OFFSETS.get(self.next) {
            Some(&offset) => {
                self.next += 1;
                CountStep::Read(self.center.offset(offset))
            }
            None => CountStep::Done(self.alive),
        }
    }
}

/// Yielded by [`CellEvaluator::resume`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Yield {
    Read(Coord),
    Transition(CellTransition),
}

#[derive(Clone, Debug)]
enum Stage {
    Start,
    Center,
    Neighbors { state: Cell, counter: NeighborCounter },
    Finished,
}

/// Evaluates one cell: 1 read of the cell itself, 8 neighbor reads, then one transition.
#[derive(Clone, Debug)]
pub struct CellEvaluator {
    coord: Coord,
    stage: Stage,
}

impl CellEvaluator {
    pub fn new(coord: Coord) -> Self {
        Self {
            coord,
            stage: Stage::Start,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.stage, Stage::Finished)
    }

    /// Advances to the next suspension point.
    ///
    /// The first call takes `None`. After a [`Yield::Read`] the next call must
    /// carry the requested state. Returns `None` once the transition was yielded.
    pub fn resume(&mut self, reply: Option<Cell>) -> Option<Yield> {
        match std::mem::replace(&mut self.stage, Stage::Finished) {
            Stage::Start => {
                assert!(reply.is_none(), "evaluator has not requested anything yet");
                self.stage = Stage::Center;
                Some(Yield::Read(self.coord))
            }
            Stage::Center => {
                let state = reply.expect("state of the evaluated cell expected");
                let mut counter = NeighborCounter::new(self.coord);
                match counter.resume(None) {
                    CountStep::Read(coord) => {
                        self.stage = Stage::Neighbors { state, counter };
                        Some(Yield::Read(coord))
                    }
                    CountStep::Done(alive) => Some(self.finish(state, alive)),
                }
            }
            Stage::Neighbors { state, mut counter } => {
                let neighbor = reply.expect("neighbor state expected");
                match counter.resume(Some(neighbor)) {
                    CountStep::Read(coord) => {
                        self.stage = Stage::Neighbors { state, counter };
                        Some(Yield::Read(coord))
                    }
                    CountStep::Done(alive) => Some(self.finish(state, alive)),
                }
            }
            Stage::Finished => None,
        }
    }

    fn finish(&mut self, state: Cell, alive_neighbors: usize) -> Yield {
        self.stage = Stage::Finished;
        Yield::Transition(CellTransition {
            row: self.coord.row,
            col: self.coord.col,
            next_state: life_rule(state, alive_neighbors),
        })
    }
}

/// Reads issued by one evaluator, in order, together with its verdict.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub reads: Vec<Coord>,
    pub transition: CellTransition,
}

/// Runs a [`CellEvaluator`] to completion, answering reads with `read`.
pub fn evaluate_cell(coord: Coord, mut read: impl FnMut(Coord) -> Cell) -> Evaluation {
    let mut evaluator = CellEvaluator::new(coord);
    let mut reads = Vec::with_capacity(1 + NEIGHBOR_OFFSETS.len());
    let mut reply = None;
    loop {
        match evaluator.resume(reply.take()) {
            Some(Yield::Read(c)) => {
                reads.push(c);
                reply = Some(read(c));
            }
            Some(Yield::Transition(transition)) => return Evaluation { reads, transition },
            None => unreachable!("evaluator finished without a transition"),
        }
    }
}
