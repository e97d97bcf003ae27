#![warn(clippy::all)]

use anyhow::{Context, Result};
use clap::Parser;
use std::{
    io::{self, Write},
    path::PathBuf,
};
use torus_life::{
    Config, Frame, GenerationDriver, NiceInt, RenderSink, SimulationConfig, StepPacer,
};
use tracing_subscriber::EnvFilter;

/// Conway's Game of Life on a torus, printed to the terminal.
#[derive(Parser)]
#[command(name = "torus_life", version)]
struct Args {
    /// Grid width, ignored with --init.
    #[arg(long, default_value_t = Config::DEFAULT_WIDTH)]
    width: usize,

    /// Grid height, ignored with --init.
    #[arg(long, default_value_t = Config::DEFAULT_HEIGHT)]
    height: usize,

    /// Number of randomly placed alive cells, ignored with --init.
    #[arg(long, default_value_t = Config::DEFAULT_ALIVE)]
    alives: usize,

    /// Seconds to wait between generations.
    #[arg(long)]
    delay: Option<f64>,

    /// Number of generations to simulate.
    #[arg(long, default_value_t = Config::DEFAULT_STEPS)]
    steps: usize,

    /// Pattern file: equal-length rows of '#' (alive) and '.' (dead).
    #[arg(long)]
    init: Option<PathBuf>,

    /// Seed for random placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Print frames one after another instead of clearing the screen.
    #[arg(long)]
    no_clear: bool,
}

impl From<&Args> for SimulationConfig {
    fn from(args: &Args) -> Self {
        Self {
            width: args.width,
            height: args.height,
            alive: args.alives,
            delay: args.delay,
            steps: args.steps,
            init: args.init.clone(),
            seed: args.seed,
        }
    }
}

struct TerminalSink<W> {
    out: W,
    clear: bool,
}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        if frame.generation == 0 {
            writeln!(self.out, "Initial: ")?;
        } else {
            if self.clear {
                // erase screen, cursor home
                write!(self.out, "\x1B[2J\x1B[H")?;
            }
            writeln!(self.out, "Step: {}/{}", frame.generation, frame.steps)?;
        }
        writeln!(self.out, "{}", frame.grid)?;
        writeln!(
            self.out,
            "Population: {}",
            NiceInt::from(frame.grid.population())
        )?;
        self.out.flush()
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = SimulationConfig::from(&args);
    let context = match &config.init {
        Some(path) => format!("cannot load initial pattern from {}", path.display()),
        None => "cannot seed initial grid".to_owned(),
    };
    let grid = config.build_grid().context(context)?;

    let mut driver = GenerationDriver::new(grid);
    let mut pacer = StepPacer::new(config.delay()?);
    let mut sink = TerminalSink {
        out: io::stdout().lock(),
        clear: !args.no_clear,
    };
    driver.run(config.steps, &mut pacer, &mut sink)?;
    Ok(())
}
