//! Single-owner state container driven by a reducer

use crate::action::{Action, ActionSummary};
use std::marker::PhantomData;

/// A reducer applies one action to the state in place.
///
/// Returns `true` when the state changed and the UI must re-render.
pub type Reducer<S, A> = fn(&mut S, A) -> bool;

/// Owns application state and funnels every mutation through a reducer.
///
/// ```ignore
/// let mut store = Store::new(AppState::default(), reducer);
/// if store.dispatch(Action::RecordAddRequested) {
///     terminal.draw(|f| render(f, store.state()))?;
/// }
/// ```
pub struct Store<S, A: Action> {
    state: S,
    reducer: Reducer<S, A>,
    _marker: PhantomData<A>,
}

impl<S, A: Action> Store<S, A> {
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self {
            state,
            reducer,
            _marker: PhantomData,
        }
    }

    /// Run the reducer; `true` means a re-render is needed
    pub fn dispatch(&mut self, action: A) -> bool {
        (self.reducer)(&mut self.state, action)
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Direct access for startup wiring (terminal size, config).
    /// Runtime changes should go through [`Store::dispatch`].
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }
}

/// Hooks run around every dispatch
pub trait Middleware<A: Action> {
    fn before(&mut self, action: &A);

    fn after(&mut self, action: &A, state_changed: bool);
}

/// [`Store`] wrapped with a [`Middleware`]
pub struct StoreWithMiddleware<S, A: Action, M: Middleware<A>> {
    store: Store<S, A>,
    middleware: M,
}

impl<S, A: Action, M: Middleware<A>> StoreWithMiddleware<S, A, M> {
    pub fn new(state: S, reducer: Reducer<S, A>, middleware: M) -> Self {
        Self {
            store: Store::new(state, reducer),
            middleware,
        }
    }

    pub fn dispatch(&mut self, action: A) -> bool {
        self.middleware.before(&action);
        let changed = self.store.dispatch(action.clone());
        self.middleware.after(&action, changed);
        changed
    }

    pub fn state(&self) -> &S {
        self.store.state()
    }

    pub fn state_mut(&mut self) -> &mut S {
        self.store.state_mut()
    }

    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}

/// Emits a `tracing` event for every dispatched action
#[derive(Debug, Clone, Default)]
pub struct TracingMiddleware {
    dispatched: u64,
}

impl TracingMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of actions seen so far
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }
}

impl<A: ActionSummary> Middleware<A> for TracingMiddleware {
    fn before(&mut self, action: &A) {
        self.dispatched += 1;
        tracing::trace!(action = %action.summary(), "dispatching");
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        tracing::debug!(
            action = %action.name(),
            state_changed,
            seq = self.dispatched,
            "action processed"
        );
    }
}
