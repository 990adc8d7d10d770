//! Cached, subscription-fed views of store resources.
//!
//! A [`LiveView`] keeps the last good snapshot of one resource. Reading it
//! folds in whatever the subscription has pushed since the last read. A
//! pushed error is logged and the cached snapshot stays as it was.

use swarmboard_core::store::Subscription;
use tokio::sync::Mutex;
use tracing::{debug, warn};

struct ViewState<T> {
    rx: Option<Subscription<T>>,
    cache: T,
}

impl<T: Clone> ViewState<T> {
    fn refresh(&mut self, resource: &str) {
        let Some(rx) = self.rx.as_mut() else {
            return;
        };
        // A closed channel still holds the publisher's final value.
        if matches!(rx.has_changed(), Ok(false)) {
            return;
        }
        match &*rx.borrow_and_update() {
            Ok(value) => {
                debug!(resource, "View refreshed from subscription");
                self.cache = value.clone();
            }
            Err(e) => warn!(resource, error = %e, "Subscription error, keeping cached state"),
        }
    }
}

pub struct LiveView<T> {
    resource: &'static str,
    state: Mutex<ViewState<T>>,
}

impl<T: Clone + Default + Send> LiveView<T> {
    /// Attach to a subscription, seeding the cache with its current value.
    pub fn new(resource: &'static str, mut rx: Subscription<T>) -> Self {
        let cache = match &*rx.borrow_and_update() {
            Ok(value) => value.clone(),
            Err(e) => {
                warn!(resource, error = %e, "Subscription started in error state");
                T::default()
            }
        };
        Self {
            resource,
            state: Mutex::new(ViewState {
                rx: Some(rx),
                cache,
            }),
        }
    }

    /// A view with no subscription behind it. It keeps `value` forever.
    pub fn detached(resource: &'static str, value: T) -> Self {
        Self {
            resource,
            state: Mutex::new(ViewState { rx: None, cache: value }),
        }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    /// The latest snapshot.
    pub async fn current(&self) -> T {
        let mut state = self.state.lock().await;
        state.refresh(self.resource);
        state.cache.clone()
    }

    /// Wait until the subscription pushes something new.
    ///
    /// Returns `false` for a detached view or once the publisher is gone.
    pub async fn changed(&self) -> bool {
        let rx = self.state.lock().await.rx.clone();
        match rx {
            Some(mut rx) => rx.changed().await.is_ok(),
            None => false,
        }
    }
}
