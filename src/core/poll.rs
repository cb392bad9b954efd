//! Fixed-interval polling of a JSON endpoint.
//!
//! A poll fires immediately and then once per period, whether or not the
//! previous request has finished. Stopping cancels the timer and marks the
//! handle cancelled; responses that land after that are dropped.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use serde_json::Value;

use crate::core::cookie::CookieSource;
use crate::core::http::{ApiClient, Transport};

/// A unit of work for the single-threaded executor.
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Repeating timer plus a local task spawner.
pub trait Scheduler {
    /// Handle of a repeating timer. The timer runs while the handle lives.
    type Task;

    /// Run `tick` every `period_ms` milliseconds until cancelled.
    fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Self::Task;

    /// Stop a repeating timer.
    fn cancel(&self, task: Self::Task);

    /// Drive a future to completion on the current thread.
    fn spawn(&self, task: LocalTask);
}

/// Opaque handle returned by [`Poller::start`].
pub struct PollHandle<T> {
    task: T,
    cancelled: Rc<Cell<bool>>,
}

impl<T> PollHandle<T> {
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Polls endpoints through an [`ApiClient`] on a [`Scheduler`].
pub struct Poller<T, C, S> {
    client: Rc<ApiClient<T, C>>,
    scheduler: Rc<S>,
}

impl<T, C, S> Clone for Poller<T, C, S> {
    fn clone(&self) -> Self {
        Self {
            client: Rc::clone(&self.client),
            scheduler: Rc::clone(&self.scheduler),
        }
    }
}

impl<T, C, S> Poller<T, C, S>
where
    T: Transport + 'static,
    C: CookieSource + 'static,
    S: Scheduler + 'static,
{
    pub fn new(client: ApiClient<T, C>, scheduler: S) -> Self {
        Self {
            client: Rc::new(client),
            scheduler: Rc::new(scheduler),
        }
    }

    pub fn client(&self) -> &ApiClient<T, C> {
        &self.client
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// GET `url` now and every `interval_ms`, passing each parsed body to
    /// `callback`. Failures are logged and never reach the callback.
    pub fn start<F>(&self, url: &str, interval_ms: u32, callback: F) -> PollHandle<S::Task>
    where
        F: FnMut(Value) + 'static,
    {
        let cancelled = Rc::new(Cell::new(false));
        let callback: Rc<RefCell<dyn FnMut(Value)>> = Rc::new(RefCell::new(callback));

        let poll = {
            let client = Rc::clone(&self.client);
            let scheduler = Rc::clone(&self.scheduler);
            let cancelled = Rc::clone(&cancelled);
            let url = url.to_string();

            move || {
                let client = Rc::clone(&client);
                let callback = Rc::clone(&callback);
                let cancelled = Rc::clone(&cancelled);
                let url = url.clone();

                scheduler.spawn(Box::pin(async move {
                    match client.get::<Value>(&url).await {
                        Ok(_) if cancelled.get() => {
                            tracing::debug!(url = %url, "dropping poll result after stop");
                        }
                        Ok(data) => (&mut *callback.borrow_mut())(data),
                        Err(err) => tracing::error!(url = %url, "Polling error: {err}"),
                    }
                }));
            }
        };

        tracing::debug!(url, interval_ms, "polling started");
        poll();
        let task = self.scheduler.every(interval_ms, Box::new(poll));

        PollHandle { task, cancelled }
    }

    /// Cancel future polls and suppress delivery of in-flight ones.
    pub fn stop(&self, handle: PollHandle<S::Task>) {
        handle.cancelled.set(true);
        self.scheduler.cancel(handle.task);
        tracing::debug!("polling stopped");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::core::error::FetchError;
    use crate::core::http::{HttpRequest, HttpResponse};

    /// Answers every request with a counter so deliveries can be told apart.
    #[derive(Default)]
    struct Counter {
        hits: Cell<u32>,
    }

    impl Transport for Counter {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, FetchError> {
            let n = self.hits.get() + 1;
            self.hits.set(n);
            if n == 2 {
                return Err(FetchError::Network("flaky".into()));
            }
            Ok(HttpResponse {
                status: 200,
                body: format!(r#"{{"tick":{n}}}"#),
            })
        }
    }

    /// Virtual clock: ticks fire when time is advanced, spawned tasks queue
    /// until drained.
    #[derive(Default)]
    struct ManualClock {
        now: Cell<u32>,
        timers: RefCell<Vec<(usize, u32, u32, Box<dyn FnMut()>)>>,
        spawned: RefCell<VecDeque<LocalTask>>,
        next_id: Cell<usize>,
    }

    impl ManualClock {
        fn advance(&self, ms: u32) {
            let target = self.now.get() + ms;
            loop {
                let due = self
                    .timers
                    .borrow()
                    .iter()
                    .enumerate()
                    .filter(|(_, (_, _, next, _))| *next <= target)
                    .min_by_key(|(_, (_, _, next, _))| *next)
                    .map(|(i, _)| i);
                let Some(i) = due else { break };

                let mut timers = self.timers.borrow_mut();
                let (_, period, next, tick) = &mut timers[i];
                self.now.set(*next);
                *next += *period;
                tick();
            }
            self.now.set(target);
        }

        async fn drain(&self) {
            loop {
                let task = self.spawned.borrow_mut().pop_front();
                match task {
                    Some(task) => task.await,
                    None => break,
                }
            }
        }
    }

    impl Scheduler for ManualClock {
        type Task = usize;

        fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> usize {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            let first = self.now.get() + period_ms;
            self.timers.borrow_mut().push((id, period_ms, first, tick));
            id
        }

        fn cancel(&self, task: usize) {
            self.timers.borrow_mut().retain(|(id, ..)| *id != task);
        }

        fn spawn(&self, task: LocalTask) {
            self.spawned.borrow_mut().push_back(task);
        }
    }

    fn poller() -> Poller<Counter, &'static str, ManualClock> {
        Poller::new(
            ApiClient::new(Counter::default(), "sessionid=s"),
            ManualClock::default(),
        )
    }

    fn recorder() -> (Rc<RefCell<Vec<Value>>>, impl FnMut(Value) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |v| sink.borrow_mut().push(v))
    }

    #[tokio::test]
    async fn test_stop_right_after_start_keeps_only_first_call() {
        let poller = poller();
        let (seen, callback) = recorder();

        let handle = poller.start("/api/alerts/live/", 1000, callback);
        poller.stop(handle);
        poller.scheduler().advance(2500);
        poller.scheduler().drain().await;

        assert_eq!(poller.client().transport().hits.get(), 1);
        assert!(seen.borrow().is_empty(), "late result must be dropped after stop");
    }

    #[tokio::test]
    async fn test_polls_on_interval_and_skips_errors() {
        let poller = poller();
        let (seen, callback) = recorder();

        let handle = poller.start("/api/alerts/live/", 1000, callback);
        poller.scheduler().drain().await;
        poller.scheduler().advance(2000);
        poller.scheduler().drain().await;

        assert_eq!(poller.client().transport().hits.get(), 3);
        let ticks: Vec<_> = seen.borrow().iter().map(|v| v["tick"].clone()).collect();
        assert_eq!(ticks, vec![Value::from(1), Value::from(3)]);
        assert!(!handle.is_cancelled());

        poller.stop(handle);
        poller.scheduler().advance(5000);
        poller.scheduler().drain().await;
        assert_eq!(poller.client().transport().hits.get(), 3);
    }

    #[tokio::test]
    async fn test_in_flight_request_completes_but_is_not_delivered() {
        let poller = poller();
        let (seen, callback) = recorder();

        let handle = poller.start("/api/feed/", 500, callback);
        poller.scheduler().drain().await;
        poller.scheduler().advance(500);
        poller.scheduler().advance(500);
        // two requests spawned, neither has run yet
        poller.stop(handle);
        poller.scheduler().drain().await;

        assert_eq!(poller.client().transport().hits.get(), 3);
        assert_eq!(seen.borrow().len(), 1);
    }
}
