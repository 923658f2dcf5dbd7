//! Settings-changed notifications so every view redraws from live state.
//!
//! The bus is owned by the event-loop thread. Handles are cheap clones of one
//! shared subscriber list; `publish` runs every callback synchronously, in
//! subscription order, before returning.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use anyhow::Result;

use crate::log_debug;

type Callback = Rc<RefCell<Box<dyn FnMut() -> Result<()>>>>;

/// Handle returned by [`ChangeBus::subscribe`]; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Outcome of one fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub delivered: usize,
    pub failed: usize,
    pub skipped: usize,
}

struct Subscriber {
    id: SubscriptionId,
    callback: Callback,
}

#[derive(Default)]
struct BusInner {
    next_id: Cell<u64>,
    published: Cell<u64>,
    subscribers: RefCell<Vec<Subscriber>>,
}

#[derive(Clone, Default)]
pub struct ChangeBus {
    inner: Rc<BusInner>,
}

impl fmt::Debug for ChangeBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeBus")
            .field("subscribers", &self.subscriber_count())
            .field("published", &self.publish_count())
            .finish()
    }
}

impl ChangeBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: FnMut() -> Result<()> + 'static,
    {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner.subscribers.borrow_mut().push(Subscriber {
            id,
            callback: Rc::new(RefCell::new(Box::new(callback))),
        });
        id
    }

    /// Remove a subscriber. Returns `false` when the handle is unknown or already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.inner.subscribers.borrow_mut();
        match subscribers.iter().position(|sub| sub.id == id) {
            Some(idx) => {
                subscribers.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Notify every current subscriber that settings changed.
    ///
    /// The subscriber list is snapshotted first, so callbacks may subscribe,
    /// unsubscribe, or publish again without invalidating this fan-out. A
    /// failing callback is logged and does not stop the ones after it.
    pub fn publish(&self) -> PublishReport {
        self.inner.published.set(self.inner.published.get() + 1);
        let snapshot: Vec<(SubscriptionId, Callback)> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|sub| (sub.id, Rc::clone(&sub.callback)))
            .collect();

        let mut report = PublishReport::default();
        for (id, callback) in snapshot {
            let Ok(mut guard) = callback.try_borrow_mut() else {
                log_debug(&format!(
                    "settings-changed: subscriber {} re-entered; skipped",
                    id.0
                ));
                report.skipped += 1;
                continue;
            };
            let run: &mut dyn FnMut() -> Result<()> = &mut **guard;
            match run() {
                Ok(()) => report.delivered += 1,
                Err(err) => {
                    log_debug(&format!(
                        "settings-changed: subscriber {} failed: {err:#}",
                        id.0
                    ));
                    tracing::warn!(
                        subscriber = id.0,
                        error = %err,
                        "settings-changed subscriber failed"
                    );
                    report.failed += 1;
                }
            }
        }
        report
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    /// Number of `publish` calls since the bus was created.
    #[must_use]
    pub fn publish_count(&self) -> u64 {
        self.inner.published.get()
    }

    /// Drop every subscriber; used at process shutdown.
    pub fn shutdown(&self) {
        let cleared = std::mem::take(&mut *self.inner.subscribers.borrow_mut());
        if !cleared.is_empty() {
            log_debug(&format!(
                "change bus shutdown: dropped {} subscribers",
                cleared.len()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn recorder(
        log: &Rc<RefCell<Vec<&'static str>>>,
        name: &'static str,
    ) -> impl FnMut() -> Result<()> {
        let log = Rc::clone(log);
        move || {
            log.borrow_mut().push(name);
            Ok(())
        }
    }

    #[test]
    fn publish_runs_subscribers_in_subscription_order() {
        let bus = ChangeBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        bus.subscribe(recorder(&log, "first"));
        bus.subscribe(recorder(&log, "second"));
        bus.subscribe(recorder(&log, "third"));

        let report = bus.publish();

        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
        assert_eq!(report.delivered, 3);
        assert_eq!(bus.publish_count(), 1);
    }

    #[test]
    fn failing_subscriber_does_not_stop_fan_out() {
        let bus = ChangeBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        bus.subscribe(recorder(&log, "before"));
        bus.subscribe(|| Err(anyhow!("redraw exploded")));
        bus.subscribe(recorder(&log, "after"));

        let report = bus.publish();

        assert_eq!(*log.borrow(), vec!["before", "after"]);
        assert_eq!(report.failed, 1);
        assert_eq!(report.delivered, 2);
    }

    #[test]
    fn unsubscribe_is_structural_and_idempotent() {
        let bus = ChangeBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let id = bus.subscribe(recorder(&log, "gone"));
        bus.subscribe(recorder(&log, "kept"));

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish();

        assert_eq!(*log.borrow(), vec!["kept"]);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn reentrant_publish_skips_the_running_subscriber() {
        let bus = ChangeBus::new();
        let hits = Rc::new(Cell::new(0));
        let inner_bus = bus.clone();
        let inner_hits = Rc::clone(&hits);
        bus.subscribe(move || {
            inner_hits.set(inner_hits.get() + 1);
            if inner_hits.get() == 1 {
                let nested = inner_bus.publish();
                assert_eq!(nested.skipped, 1);
            }
            Ok(())
        });

        let report = bus.publish();

        assert_eq!(report.delivered, 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(bus.publish_count(), 2);
    }

    #[test]
    fn subscriber_added_during_publish_runs_next_time() {
        let bus = ChangeBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let inner_bus = bus.clone();
        let inner_log = Rc::clone(&log);
        let mut added = false;
        bus.subscribe(move || {
            if !added {
                added = true;
                inner_bus.subscribe(recorder(&inner_log, "late"));
            }
            Ok(())
        });

        bus.publish();
        assert!(log.borrow().is_empty());
        bus.publish();
        assert_eq!(*log.borrow(), vec!["late"]);
    }

    #[test]
    fn shutdown_clears_all_subscribers() {
        let bus = ChangeBus::new();
        bus.subscribe(|| Ok(()));
        bus.subscribe(|| Ok(()));
        bus.shutdown();
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.publish().delivered, 0);
    }
}
