use crate::library::timer::interface::{Timer, TimerId, TimerTask};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[allow(dead_code)]
struct Scheduled {
    id: TimerId,
    interval: Duration,
    next_due: Duration,
    // None while the task is running
    task: Option<TimerTask>,
}

#[allow(dead_code)]
pub struct TimerFake {
    now: Mutex<Duration>,
    next_id: AtomicU64,
    scheduled: Mutex<Vec<Scheduled>>,
}

#[allow(dead_code)]
impl TimerFake {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Duration::ZERO),
            next_id: AtomicU64::new(0),
            scheduled: Mutex::new(Vec::new()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let target = *self.now.lock().unwrap() + by;

        loop {
            let next = {
                let mut scheduled = self.scheduled.lock().unwrap();
                scheduled
                    .iter_mut()
                    .filter(|entry| entry.task.is_some() && entry.next_due <= target)
                    .min_by_key(|entry| entry.next_due)
                    .and_then(|entry| {
                        entry
                            .task
                            .take()
                            .map(|task| (entry.id, entry.next_due, task))
                    })
            };

            let Some((id, due, mut task)) = next else {
                break;
            };

            *self.now.lock().unwrap() = due;
            task();

            let mut scheduled = self.scheduled.lock().unwrap();
            if let Some(entry) = scheduled.iter_mut().find(|entry| entry.id == id) {
                entry.next_due += entry.interval;
                entry.task = Some(task);
            }
        }

        *self.now.lock().unwrap() = target;
    }

    pub fn pending(&self) -> usize {
        self.scheduled.lock().unwrap().len()
    }
}

impl Timer for TimerFake {
    fn every(&self, interval: Duration, task: TimerTask) -> TimerId {
        let id = TimerId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let now = *self.now.lock().unwrap();
        self.scheduled.lock().unwrap().push(Scheduled {
            id,
            interval,
            next_due: now + interval,
            task: Some(task),
        });
        id
    }

    fn cancel(&self, id: TimerId) {
        self.scheduled.lock().unwrap().retain(|entry| entry.id != id);
    }
}
