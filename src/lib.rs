#![warn(clippy::all)]

mod config;
mod driver;
mod error;
mod evaluator;
mod grid;
mod utils;

pub use config::{Config, SimulationConfig};
pub use driver::{Event, EventLoop, Frame, GenerationDriver, RenderSink};
pub use error::{FormatError, LifeError, Result};
pub use evaluator::{
    evaluate_cell, life_rule, CellEvaluator, CellTransition, Coord, CountStep, Evaluation,
    NeighborCounter, NeighborOffset, Yield, NEIGHBOR_OFFSETS,
};
pub use grid::{Cell, Grid};
pub use utils::{parse_pattern, parse_rows, NiceInt, StepPacer};
