//! One-shot startup hooks.
//!
//! Hooks run in registration order exactly once, at engine start, each
//! receiving the dispatcher so it can install input adapters or inject
//! bootstrap dispatches (e.g. loading a saved board). The engine does not
//! await or sequence anything a hook spawns.

use crate::pipeline::bridge::Dispatcher;

/// A setup callback handed the dispatch surface at start.
pub type InitHook = Box<dyn FnOnce(&Dispatcher) + Send>;

/// An ordered, run-once collection of [`InitHook`]s.
#[derive(Default)]
pub struct InitHooks {
    hooks: Vec<InitHook>,
    ran: bool,
}

impl InitHooks {
    pub fn push(&mut self, hook: InitHook) {
        self.hooks.push(hook);
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run all hooks in order. Subsequent calls are no-ops.
    pub fn run(&mut self, dispatcher: &Dispatcher) {
        if self.ran {
            tracing::warn!("init hooks already ran; ignoring repeat start");
            return;
        }
        self.ran = true;
        for hook in self.hooks.drain(..) {
            hook(dispatcher);
        }
    }
}
