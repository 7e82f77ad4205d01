//! Client-side state stores
//!
//! Each store wraps an explicit state object. Reads go through `read`,
//! mutations through `update`; every mutation publishes `<name>-changed`
//! with a snapshot of the new state. Nothing here is persisted except the
//! theme, which `actions` writes to the local database.

mod drag;
mod element;
mod user;
mod window;

pub use drag::{DragPayload, DragState};
pub use element::{Element, ElementKind, ElementState};
pub use user::{Theme, UserState};
pub use window::{create_window_key, NewWindow, Window, WindowState, WindowType};

use crate::events::SharedSink;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub struct Store<S> {
    name: &'static str,
    state: Arc<Mutex<S>>,
    events: SharedSink,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Store {
            name: self.name,
            state: self.state.clone(),
            events: self.events.clone(),
        }
    }
}

impl<S: Serialize> Store<S> {
    pub fn new(name: &'static str, initial: S, events: SharedSink) -> Self {
        Store {
            name,
            state: Arc::new(Mutex::new(initial)),
            events,
        }
    }

    fn lock(&self) -> MutexGuard<'_, S> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.lock())
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let (result, snapshot) = {
            let mut state = self.lock();
            let result = f(&mut state);
            (result, serde_json::to_value(&*state))
        };

        match snapshot {
            Ok(value) => self
                .events
                .emit_value(&format!("{}-changed", self.name), value),
            Err(e) => log::warn!("Failed to serialize {} store: {}", self.name, e),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ChannelSink;

    #[test]
    fn update_publishes_snapshot_under_store_name() {
        let (sink, mut rx) = ChannelSink::new(4);
        let store = Store::new("user", UserState::default(), Arc::new(sink));

        store.update(|s| s.logged_in = true);
        assert!(store.read(|s| s.logged_in));

        let event = rx.try_recv().unwrap();
        assert_eq!(event.name, "user-changed");
        assert_eq!(event.payload["loggedIn"], true);
    }

    #[test]
    fn clones_share_state() {
        let (sink, _rx) = ChannelSink::new(4);
        let store = Store::new("user", UserState::default(), Arc::new(sink));
        let other = store.clone();
        other.update(|s| s.theme = Theme::Dark);
        assert_eq!(store.read(|s| s.theme), Theme::Dark);
    }
}
