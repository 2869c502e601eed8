use crate::library::logger::interface::Logger;
use crate::library::timer::interface::{Timer, TimerId, TimerTask};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub struct TimerThread {
    logger: Arc<dyn Logger + Send + Sync>,
    next_id: AtomicU64,
    running: Mutex<HashMap<TimerId, Arc<AtomicBool>>>,
}

impl TimerThread {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("timer"),
            next_id: AtomicU64::new(0),
            running: Mutex::new(HashMap::new()),
        }
    }
}

impl Timer for TimerThread {
    fn every(&self, interval: Duration, mut task: TimerTask) -> TimerId {
        let id = TimerId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let active = Arc::new(AtomicBool::new(true));

        self.running
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(id, active.clone());

        let _ = self
            .logger
            .info(&format!("Scheduling {:?} every {:?}", id, interval));

        std::thread::spawn(move || loop {
            std::thread::sleep(interval);
            if !active.load(Ordering::SeqCst) {
                break;
            }
            task();
        });

        id
    }

    fn cancel(&self, id: TimerId) {
        let removed = self
            .running
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&id);

        if let Some(active) = removed {
            active.store(false, Ordering::SeqCst);
            let _ = self.logger.info(&format!("Cancelled {:?}", id));
        }
    }
}
