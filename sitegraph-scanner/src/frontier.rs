use crate::resource::Resource;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, Notify};
use tokio::time::Instant;

/// FIFO queue of resources waiting to be crawled.
///
/// Besides the queue itself the frontier counts outstanding work: every
/// resource pushed stays outstanding until the [`Lease`] handed out by
/// [`Frontier::pop_timeout`] is dropped. A frontier with nothing queued and
/// nothing leased is drained, which is what workers use to decide the crawl
/// is over.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: Mutex<VecDeque<Resource>>,
    outstanding: AtomicUsize,
    available: Notify,
}

/// A resource taken off the frontier. Dropping it marks the work finished.
#[derive(Debug)]
pub struct Lease<'a> {
    resource: Resource,
    frontier: &'a Frontier,
}

impl Lease<'_> {
    pub fn resource(&self) -> &Resource {
        &self.resource
    }
}

impl Drop for Lease<'_> {
    fn drop(&mut self) {
        self.frontier.finish();
    }
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push(&self, resource: Resource) {
        {
            let mut queue = self.queue.lock().await;
            self.outstanding.fetch_add(1, Ordering::SeqCst);
            queue.push_back(resource);
        }
        self.available.notify_one();
    }

    /// Push `resource` unless an equal one is already queued.
    /// The check and the push happen under the same lock.
    pub async fn push_if_absent(&self, resource: Resource) -> bool {
        {
            let mut queue = self.queue.lock().await;
            if queue.contains(&resource) {
                return false;
            }
            self.outstanding.fetch_add(1, Ordering::SeqCst);
            queue.push_back(resource);
        }
        self.available.notify_one();
        true
    }

    /// Take the next resource, waiting up to `timeout` for one to show up.
    ///
    /// Returns `None` when the timeout elapses, or earlier if the frontier
    /// becomes drained while waiting.
    pub async fn pop_timeout(&self, timeout: Duration) -> Option<Lease<'_>> {
        let deadline = Instant::now() + timeout;

        loop {
            // Registered before checking so a drain signal can't slip between
            // the check and the wait.
            let notified = self.available.notified();

            if let Some(resource) = self.queue.lock().await.pop_front() {
                return Some(Lease {
                    resource,
                    frontier: self,
                });
            }

            if self.is_drained() {
                return None;
            }

            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                return None;
            }
        }
    }

    pub async fn contains(&self, resource: &Resource) -> bool {
        self.queue.lock().await.contains(resource)
    }

    pub async fn len(&self) -> usize {
        self.queue.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.queue.lock().await.is_empty()
    }

    /// Resources queued or leased and not yet finished.
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    pub fn is_drained(&self) -> bool {
        self.outstanding() == 0
    }

    fn finish(&self) {
        let remaining = self.outstanding.fetch_sub(1, Ordering::SeqCst);
        if remaining == 1 {
            // Last piece of work: wake every idle worker so they can exit.
            self.available.notify_waiters();
        }
    }
}
