use std::{
    thread::sleep,
    time::{Duration, Instant},
};

/// Keeps at least `delay` between consecutive frames.
///
/// Time spent computing a generation counts towards the delay, so a slow
/// step is not followed by a full pause.
pub struct StepPacer {
    delay: Option<Duration>,
    frame_timer: Instant,
    frametime_smoothed: f64,
}

impl Default for StepPacer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl StepPacer {
    /// `None` disables pausing entirely.
    pub fn new(delay: Option<Duration>) -> Self {
        Self {
            delay,
            frame_timer: Instant::now(),
            frametime_smoothed: 0.,
        }
    }

    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }

    /// Generations per second, smoothed over recent frames.
    pub fn steps_per_sec(&self) -> f64 {
        1. / self.frametime_smoothed
    }

    pub fn pause(&mut self) {
        let before_wait = self.frame_timer.elapsed();

        if let Some(target) = self.delay {
            if target > before_wait {
                sleep(target - before_wait);
            }
        }

        let after_wait = self.frame_timer.elapsed();
        let frametime = after_wait.as_secs_f64();
        self.frametime_smoothed += (frametime - self.frametime_smoothed) * 0.1;

        self.frame_timer = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_waits_for_delay() {
        let delay = Duration::from_millis(20);
        let mut pacer = StepPacer::new(Some(delay));
        let start = Instant::now();
        pacer.pause();
        pacer.pause();
        assert!(start.elapsed() >= 2 * delay);
        assert!(pacer.steps_per_sec() > 0.);
    }

    #[test]
    fn test_no_delay() {
        let mut pacer = StepPacer::default();
        assert_eq!(pacer.delay(), None);
        let start = Instant::now();
        for _ in 0..10 {
            pacer.pause();
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
