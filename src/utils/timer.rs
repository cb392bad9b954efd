//! Browser timers and the local task spawner.

use gloo_timers::callback::Interval;

use crate::core::poll::{LocalTask, Scheduler};

/// `setInterval` timers plus `spawn_local`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Task = Interval;

    fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Interval {
        Interval::new(period_ms, tick)
    }

    fn cancel(&self, task: Interval) {
        let _ = task.cancel();
    }

    fn spawn(&self, task: LocalTask) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
