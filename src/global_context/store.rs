use std::sync::Arc;

use super::action::Action;
use super::reducer::reduce;
use super::state::State;
use crate::error::Error;

pub type Listener = Box<dyn Fn(&Arc<State>)>;

/// Holds the current state tree and applies actions to it, one at a time.
///
/// Snapshots handed out by `state` are never modified; a dispatch that
/// changes something swaps in a new tree.
pub struct Store {
    state: Arc<State>,
    listeners: Vec<Listener>,
}

impl Store {
    pub fn new(initial: State) -> Self {
        Self {
            state: Arc::new(initial),
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> Arc<State> {
        Arc::clone(&self.state)
    }

    pub fn select<T>(&self, selector: impl FnOnce(&State) -> T) -> T {
        selector(&self.state)
    }

    /// Apply `action`. Returns whether the state changed; listeners only
    /// run when it did.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let next = reduce(&self.state, &action);
        if Arc::ptr_eq(&next, &self.state) {
            return false;
        }
        self.state = next;
        for listener in &self.listeners {
            listener(&self.state);
        }
        true
    }

    /// Apply an action given as its JSON object form.
    pub fn dispatch_json(&mut self, json: &str) -> Result<bool, Error> {
        let action = Action::from_json(json)?;
        Ok(self.dispatch(action))
    }

    pub fn subscribe(&mut self, listener: impl Fn(&Arc<State>) + 'static) {
        self.listeners.push(Box::new(listener));
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(State::default())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
