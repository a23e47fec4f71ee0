//! Deferred render scheduling.

#[cfg(test)]
use std::cell::RefCell;
use std::time::Duration;

/// Queues work to run after the current event handler returns.
pub trait Scheduler {
    fn schedule(&self, task: Box<dyn FnOnce()>);
}

/// Runs tasks from a zero-delay Slint timer on the UI thread.
pub struct SlintScheduler;

impl Scheduler for SlintScheduler {
    fn schedule(&self, task: Box<dyn FnOnce()>) {
        slint::Timer::single_shot(Duration::ZERO, task);
    }
}

/// Holds tasks until `run_pending` is called.
#[cfg(test)]
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<Vec<Box<dyn FnOnce()>>>,
}

#[cfg(test)]
impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Runs queued tasks, including any they schedule. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            let tasks = std::mem::take(&mut *self.queue.borrow_mut());
            if tasks.is_empty() {
                return ran;
            }
            for task in tasks {
                task();
                ran += 1;
            }
        }
    }
}

#[cfg(test)]
impl Scheduler for ManualScheduler {
    fn schedule(&self, task: Box<dyn FnOnce()>) {
        self.queue.borrow_mut().push(task);
    }
}
