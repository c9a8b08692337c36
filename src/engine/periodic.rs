use std::time::Duration;

use crate::utils::app_time::AppInstant;

/// Cancellable fixed-cadence timer driven by caller-supplied instants.
///
/// The task never reads the clock itself: every method takes `now`, so a test
/// can step virtual time and the app can pass the frame time.
#[derive(Debug, Clone)]
pub struct PeriodicTask {
    interval: Duration,
    next_due: Option<AppInstant>,
}

impl PeriodicTask {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Arms the timer with the first tick due immediately.
    pub fn start(&mut self, now: AppInstant) {
        self.next_due = Some(now);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Pushes the next tick a full interval past `now`. No-op when stopped.
    pub fn reset(&mut self, now: AppInstant) {
        if self.is_running() {
            self.next_due = Some(now + self.interval);
        }
    }

    /// Returns true when a tick is due and schedules the next one.
    /// Missed ticks collapse into one.
    pub fn poll(&mut self, now: AppInstant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick, or None when stopped.
    pub fn until_due(&self, now: AppInstant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::app_time::now;

    const SECS_20: Duration = Duration::from_secs(20);

    #[test]
    fn first_tick_is_immediate_then_every_interval() {
        let t0 = now();
        let mut task = PeriodicTask::new(SECS_20);
        assert!(!task.poll(t0));

        task.start(t0);
        assert!(task.poll(t0));
        assert!(!task.poll(t0 + Duration::from_secs(19)));
        assert!(task.poll(t0 + SECS_20));
        assert!(!task.poll(t0 + Duration::from_secs(39)));
        assert!(task.poll(t0 + Duration::from_secs(40)));
    }

    #[test]
    fn stop_cancels_pending_ticks() {
        let t0 = now();
        let mut task = PeriodicTask::new(SECS_20);
        task.start(t0);
        task.stop();
        assert!(!task.is_running());
        assert!(!task.poll(t0 + Duration::from_secs(600)));
        assert_eq!(task.until_due(t0), None);
    }

    #[test]
    fn reset_restarts_the_interval() {
        let t0 = now();
        let mut task = PeriodicTask::new(SECS_20);
        task.start(t0);
        assert!(task.poll(t0));

        task.reset(t0 + Duration::from_secs(15));
        assert!(!task.poll(t0 + SECS_20));
        assert!(task.poll(t0 + Duration::from_secs(35)));
    }

    #[test]
    fn missed_ticks_collapse() {
        let t0 = now();
        let mut task = PeriodicTask::new(SECS_20);
        task.start(t0);
        assert!(task.poll(t0));

        let late = t0 + Duration::from_secs(95);
        assert!(task.poll(late));
        assert!(!task.poll(late));
        assert_eq!(task.until_due(late), Some(SECS_20));
    }
}
