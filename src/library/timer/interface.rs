use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

pub type TimerTask = Box<dyn FnMut() + Send>;

/// Repeating timer. Each run of a task completes before the next one for the
/// same id starts, so runs never overlap.
pub trait Timer: Send + Sync {
    fn every(&self, interval: Duration, task: TimerTask) -> TimerId;

    fn cancel(&self, id: TimerId);
}
