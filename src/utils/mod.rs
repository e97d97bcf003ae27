mod format_int;
mod pacer;
mod parse_pattern;

pub use format_int::NiceInt;
pub use pacer::StepPacer;
pub use parse_pattern::{parse_pattern, parse_rows};
