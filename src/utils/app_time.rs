// src/utils/app_time.rs

use std::cell::Cell;
use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
pub type AppInstant = std::time::Instant;

#[cfg(target_arch = "wasm32")]
pub type AppInstant = web_time::Instant;

#[cfg(not(target_arch = "wasm32"))]
pub fn now() -> AppInstant {
    std::time::Instant::now()
}

#[cfg(target_arch = "wasm32")]
pub fn now() -> AppInstant {
    web_time::Instant::now()
}

/// Source of "now" for the refresh loops.
/// The app reads the wall clock; tests drive a `ManualClock`.
pub trait Clock {
    fn now(&self) -> AppInstant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> AppInstant {
        now()
    }
}

/// Virtual clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    current: Cell<AppInstant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            current: Cell::new(now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.current.set(self.current.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> AppInstant {
        self.current.get()
    }
}

#[cfg(test)]
impl Clock for std::rc::Rc<ManualClock> {
    fn now(&self) -> AppInstant {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_only_moves_when_advanced() {
        let clock = ManualClock::new();
        let start = clock.now();
        assert_eq!(clock.now(), start);

        clock.advance(Duration::from_secs(20));
        assert_eq!(clock.now().duration_since(start), Duration::from_secs(20));
    }
}
