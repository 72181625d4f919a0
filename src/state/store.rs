// The state store.
// Owns the current tree, applies reducers in dispatch order, and notifies
// subscribers with each produced tree.

use std::sync::{Arc, Mutex, RwLock};

use crate::cache::KeyValue;
use crate::persist::load_favorites;

use super::actions::Action;
use super::reducer::reduce;
use super::tree::{AppState, StopsState};

type Listener = Box<dyn Fn(&AppState) + Send + Sync>;

/// Single dispatch path around the immutable state tree.
///
/// All mutation goes through `dispatch`/`dispatch_if`; everything else sees
/// cheap `Arc` snapshots. Dispatches are serialized, and listeners observe
/// every tree in dispatch order.
pub struct Store {
    /// Serializes reduce + notify so listeners see trees in dispatch order.
    dispatch_lock: Mutex<()>,
    state: RwLock<Arc<AppState>>,
    listeners: RwLock<Vec<Listener>>,
}

impl Store {
    /// Create a store over the given initial tree.
    pub fn new(initial: AppState) -> Self {
        Self {
            dispatch_lock: Mutex::new(()),
            state: RwLock::new(Arc::new(initial)),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Create a store with the favorites set restored from the cache store.
    pub fn with_cache(cache: &dyn KeyValue) -> Self {
        Self::new(AppState {
            error: None,
            stops: StopsState {
                favorites: load_favorites(cache),
                ..StopsState::default()
            },
        })
    }

    /// Snapshot of the current tree.
    pub fn state(&self) -> Arc<AppState> {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Apply an action and notify subscribers with the produced tree.
    pub fn dispatch(&self, action: Action) {
        let _serial = self.dispatch_lock.lock().unwrap_or_else(|e| e.into_inner());
        let next = self.swap(&action);
        self.notify(&next);
    }

    /// Apply an action only when `guard` approves the current tree.
    ///
    /// Guard evaluation and the state swap happen while dispatches are held
    /// off, so two tasks racing through the same guard cannot both pass.
    /// Returns whether the action was applied.
    pub fn dispatch_if<F>(&self, guard: F, action: Action) -> bool
    where
        F: FnOnce(&AppState) -> bool,
    {
        let _serial = self.dispatch_lock.lock().unwrap_or_else(|e| e.into_inner());
        if !guard(self.state().as_ref()) {
            return false;
        }
        let next = self.swap(&action);
        self.notify(&next);
        true
    }

    /// Register a listener invoked with every tree produced by a dispatch.
    ///
    /// Listeners run on the dispatching task and must not dispatch
    /// themselves.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&AppState) + Send + Sync + 'static,
    {
        self.listeners
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(Box::new(listener));
    }

    /// Reduce and swap in the new tree. Callers hold the dispatch lock.
    fn swap(&self, action: &Action) -> Arc<AppState> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        let next = Arc::new(reduce(state.as_ref(), action));
        *state = next.clone();
        next
    }

    fn notify(&self, state: &AppState) {
        let listeners = self.listeners.read().unwrap_or_else(|e| e.into_inner());
        for listener in listeners.iter() {
            listener(state);
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}
