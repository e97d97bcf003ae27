use crate::{
    Cell, CellEvaluator, CellTransition, Coord, Grid, LifeError, NiceInt, Result, StepPacer,
    Yield,
};
use std::io;
use tracing::debug;

/// What the evaluation sequence asks of its driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The state of this cell in the current generation is needed.
    Read(Coord),
    /// Next state of one cell; goes into the next generation only.
    Transition(CellTransition),
    /// All cells of a pass are done. Carries the number of the generation just computed.
    StepBoundary(usize),
}

/// Endless sequence of passes over a `width x height` field.
///
/// Each pass runs one [`CellEvaluator`] per coordinate in row-major order and
/// ends with [`Event::StepBoundary`].
#[derive(Clone, Debug)]
pub struct EventLoop {
    width: usize,
    height: usize,
    cursor: usize,
    evaluator: Option<CellEvaluator>,
    generation: usize,
}

impl EventLoop {
    pub fn new(width: usize, height: usize, generation: usize) -> Self {
        assert!(width >= 1 && height >= 1);
        let mut result = Self {
            width,
            height,
            cursor: 0,
            evaluator: None,
            generation,
        };
        result.evaluator = Some(result.evaluator_at(0));
        result
    }

    fn evaluator_at(&self, cursor: usize) -> CellEvaluator {
        let (row, col) = (cursor / self.width, cursor % self.width);
        CellEvaluator::new(Coord::new(row as isize, col as isize))
    }

    /// `reply` must carry the requested state after [`Event::Read`] and be `None` otherwise.
    pub fn resume(&mut self, reply: Option<Cell>) -> Event {
        let Some(evaluator) = self.evaluator.as_mut() else {
            self.generation += 1;
            self.cursor = 0;
            self.evaluator = Some(self.evaluator_at(0));
            return Event::StepBoundary(self.generation);
        };
        match evaluator.resume(reply) {
            Some(Yield::Read(coord)) => Event::Read(coord),
            Some(Yield::Transition(t)) => {
                self.cursor += 1;
                self.evaluator = if self.cursor < self.width * self.height {
                    Some(self.evaluator_at(self.cursor))
                } else {
                    None
                };
                Event::Transition(t)
            }
            None => unreachable!("finished evaluators are dropped"),
        }
    }
}

/// A generation about to be shown.
pub struct Frame<'a> {
    /// 0 for the initial state.
    pub generation: usize,
    /// Number of generations the run will compute.
    pub steps: usize,
    pub grid: &'a Grid,
}

/// Receives every frame of [`GenerationDriver::run`].
pub trait RenderSink {
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()>;
}

/// Owns both generations and advances them with an [`EventLoop`].
///
/// Reads are always answered from `current` and transitions always land in
/// `next`, so the order cells are visited in cannot change the result.
pub struct GenerationDriver {
    current: Grid,
    next: Grid,
    events: EventLoop,
    generation: usize,
}

impl GenerationDriver {
    pub fn new(grid: Grid) -> Self {
        let (width, height) = (grid.width(), grid.height());
        let mut next = grid.clone();
        next.clear();
        Self {
            current: grid,
            next,
            events: EventLoop::new(width, height, 0),
            generation: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.current
    }

    pub fn into_grid(self) -> Grid {
        self.current
    }

    /// Number of generations computed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Computes one generation and returns its number.
    pub fn advance(&mut self) -> usize {
        let mut event = self.events.resume(None);
        loop {
            event = match event {
                Event::Read(coord) => {
                    let state = self.current.get(coord.row, coord.col);
                    self.events.resume(Some(state))
                }
                Event::Transition(t) => {
                    self.next.set(t.row, t.col, t.next_state);
                    self.events.resume(None)
                }
                Event::StepBoundary(generation) => {
                    self.commit(generation);
                    return generation;
                }
            }
        }
    }

    /// Computes `n` generations.
    pub fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn commit(&mut self, generation: usize) {
        std::mem::swap(&mut self.current, &mut self.next);
        self.next.clear();
        self.generation = generation;
        debug!(generation, population = self.current.population(), "generation committed");
    }

    /// Shows the current grid, then computes and shows generations until
    /// [`Self::generation`] reaches `steps`, pausing with `pacer` after each frame.
    pub fn run(
        &mut self,
        steps: usize,
        pacer: &mut StepPacer,
        sink: &mut impl RenderSink,
    ) -> Result<()> {
        self.show(steps, sink)?;
        pacer.pause();
        while self.generation < steps {
            self.advance();
            self.show(steps, sink)?;
            pacer.pause();
        }
        debug!(
            generations = %NiceInt::from(self.generation),
            delay = ?pacer.delay(),
            steps_per_sec = pacer.steps_per_sec(),
            "run finished"
        );
        Ok(())
    }

    fn show(&self, steps: usize, sink: &mut impl RenderSink) -> Result<()> {
        let frame = Frame {
            generation: self.generation,
            steps,
            grid: &self.current,
        };
        sink.render(&frame).map_err(LifeError::Render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_counts() {
        let (w, h) = (3, 2);
        let mut events = EventLoop::new(w, h, 0);
        for pass in 1..=2 {
            let (mut reads, mut transitions) = (0, 0);
            let mut event = events.resume(None);
            loop {
                event = match event {
                    Event::Read(_) => {
                        reads += 1;
                        events.resume(Some(Cell::Dead))
                    }
                    Event::Transition(_) => {
                        transitions += 1;
                        events.resume(None)
                    }
                    Event::StepBoundary(generation) => {
                        assert_eq!(generation, pass);
                        break;
                    }
                }
            }
            assert_eq!(reads, w * h * 9);
            assert_eq!(transitions, w * h);
        }
    }

    #[test]
    fn test_row_major_order() {
        let mut events = EventLoop::new(2, 2, 0);
        let mut order = vec![];
        let mut event = events.resume(None);
        while !matches!(event, Event::StepBoundary(_)) {
            event = match event {
                Event::Read(_) => events.resume(Some(Cell::Dead)),
                Event::Transition(t) => {
                    order.push((t.row, t.col));
                    events.resume(None)
                }
                Event::StepBoundary(_) => unreachable!(),
            }
        }
        assert_eq!(order, [(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    /// Keeps `(generation, steps, population)` of every frame, fails at `fail_at`.
    #[derive(Default)]
    struct Recorder {
        frames: Vec<(usize, usize, usize)>,
        fail_at: Option<usize>,
    }

    impl RenderSink for Recorder {
        fn render(&mut self, frame: &Frame<'_>) -> io::Result<()> {
            if self.fail_at == Some(frame.generation) {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.frames
                .push((frame.generation, frame.steps, frame.grid.population()));
            Ok(())
        }
    }

    #[test]
    fn test_run_renders_every_generation() {
        let grid = Grid::from_pattern([".....", "..#..", "..#..", "..#..", "....."]).unwrap();
        let mut driver = GenerationDriver::new(grid);
        let mut sink = Recorder::default();
        driver.run(3, &mut StepPacer::default(), &mut sink).unwrap();
        assert_eq!(sink.frames, [(0, 3, 3), (1, 3, 3), (2, 3, 3), (3, 3, 3)]);
        assert_eq!(driver.generation(), 3);
    }

    #[test]
    fn test_zero_steps_renders_initial_only() {
        let grid = Grid::from_pattern(["#."]).unwrap();
        let mut driver = GenerationDriver::new(grid.clone());
        let mut sink = Recorder::default();
        driver.run(0, &mut StepPacer::default(), &mut sink).unwrap();
        assert_eq!(sink.frames, [(0, 0, 1)]);
        assert_eq!(driver.grid(), &grid);
    }

    #[test]
    fn test_sink_error_stops_run() {
        let grid = Grid::blank(3, 3).unwrap();
        let mut driver = GenerationDriver::new(grid);
        let mut sink = Recorder {
            fail_at: Some(2),
            ..Default::default()
        };
        let err = driver
            .run(10, &mut StepPacer::default(), &mut sink)
            .unwrap_err();
        assert!(matches!(err, LifeError::Render(_)));
        assert_eq!(driver.generation(), 2);
        assert_eq!(sink.frames.len(), 2);
    }
}
