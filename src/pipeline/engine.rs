//! Pipeline engine — the dispatch cycle orchestrator.
//!
//! The engine owns the current state and runs every transition through
//! the same fixed sequence:
//! 1. Apply the dispatched action (or nothing, if its guard is false).
//! 2. Run each calculation stage in declared order, chaining state
//!    through the stages; every member sees the cycle-start state as
//!    `previous`.
//! 3. Commit the result as the current state.
//! 4. Run the side effects whose gates pass, handing them the
//!    dispatcher; anything they enqueue runs after this cycle.
//!
//! Dispatch takes `&mut self`, so a cycle can never re-enter another:
//! follow-ups travel through the channel and drain in issuance order.

use crate::pipeline::bridge::{ActionCall, Dispatcher};
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::hooks::{InitHook, InitHooks};
use crate::pipeline::stage::{Action, Calculation, SideEffect};
use crate::state::Value;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How long the blocking run loop waits on the channel before rechecking
/// the running flag.
const RECV_TIMEOUT: Duration = Duration::from_millis(50);

/// The staged state-pipeline engine.
pub struct Engine {
    state: Value,
    actions: HashMap<String, Action>,
    stages: Vec<Vec<Calculation>>,
    side_effects: Vec<SideEffect>,
    hooks: InitHooks,
    /// Calls waiting to run, in issuance order.
    pending: VecDeque<ActionCall>,
    tx: Sender<ActionCall>,
    rx: Receiver<ActionCall>,
    running: Arc<AtomicBool>,
    cycles: u64,
}

impl Engine {
    pub fn builder(initial_state: Value) -> EngineBuilder {
        EngineBuilder::new(initial_state)
    }

    /// The current committed state.
    pub fn state(&self) -> &Value {
        &self.state
    }

    /// Number of cycles that have committed.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// A cloneable dispatch handle for input adapters and side effects.
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.tx.clone())
    }

    /// Shared flag controlling [`Engine::run`]; clear it to stop the loop.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }

    /// Run the init hooks (once) and process anything they dispatched.
    pub fn start(&mut self) -> PipelineResult<()> {
        tracing::info!("engine starting");
        let dispatcher = self.dispatcher();
        self.hooks.run(&dispatcher);
        self.drain()
    }

    /// Synchronously run one full pipeline pass for `action(args)`,
    /// then any calls it caused, before returning.
    pub fn dispatch(&mut self, action: &str, args: Vec<Value>) -> PipelineResult<()> {
        self.pending.push_back(ActionCall::new(action, args));
        self.drain()
    }

    /// Blocking run loop: dispatch channel calls until the running flag
    /// clears or every dispatcher is dropped. Cycle failures are logged,
    /// not fatal — the committed state is still consistent.
    pub fn run(&mut self) {
        if let Err(e) = self.start() {
            tracing::error!("startup dispatch failed: {}", e);
        }
        tracing::info!("engine loop started");

        while self.running.load(Ordering::Relaxed) {
            match self.rx.recv_timeout(RECV_TIMEOUT) {
                Ok(call) => {
                    self.pending.push_back(call);
                    if let Err(e) = self.drain() {
                        tracing::error!("dispatch failed: {}", e);
                    }
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        tracing::info!("engine loop exiting after {} cycles", self.cycles);
    }

    /// Run queued calls to exhaustion, absorbing channel arrivals between
    /// cycles so follow-ups keep their issuance order.
    fn drain(&mut self) -> PipelineResult<()> {
        loop {
            self.absorb_channel();
            let Some(call) = self.pending.pop_front() else {
                return Ok(());
            };
            self.run_cycle(call)?;
        }
    }

    fn absorb_channel(&mut self) {
        while let Ok(call) = self.rx.try_recv() {
            self.pending.push_back(call);
        }
    }

    fn run_cycle(&mut self, call: ActionCall) -> PipelineResult<()> {
        let action = self
            .actions
            .get(&call.name)
            .ok_or_else(|| PipelineError::UnknownAction(call.name.clone()))?;

        let previous = self.state.clone();

        // 1. Action
        if let Some(when) = &action.when {
            if !when(&previous, &call.args) {
                tracing::trace!(action = %call.name, "guard rejected dispatch");
                return Ok(());
            }
        }
        let mut next = (action.then)(&call.args, &previous).map_err(|source| {
            PipelineError::Action {
                name: call.name.clone(),
                source,
            }
        })?;

        // 2. Calculation stages, in declared order. Every member compares
        // against the cycle-start state, never an intermediate one.
        for stage in &self.stages {
            for calc in stage {
                if (calc.when)(&next, &previous) {
                    next = (calc.then)(&next, &previous).map_err(|source| {
                        PipelineError::Calculation {
                            name: calc.name.clone(),
                            source,
                        }
                    })?;
                }
            }
        }

        // 3. Single commit point, before side effects observe the state.
        let changed = !next.same(&previous);
        self.state = next.clone();
        self.cycles += 1;
        tracing::debug!(action = %call.name, cycle = self.cycles, changed, "cycle committed");

        // 4. Side effects
        let dispatcher = self.dispatcher();
        for effect in &self.side_effects {
            if (effect.when)(&next, &previous) {
                (effect.then)(&next, &previous, &dispatcher).map_err(|source| {
                    PipelineError::SideEffect {
                        name: effect.name.clone(),
                        source,
                    }
                })?;
            }
        }

        Ok(())
    }
}

/// Builder assembling an [`Engine`] from its registered parts.
pub struct EngineBuilder {
    initial_state: Value,
    actions: HashMap<String, Action>,
    stages: Vec<Vec<Calculation>>,
    side_effects: Vec<SideEffect>,
    hooks: InitHooks,
}

impl EngineBuilder {
    pub fn new(initial_state: Value) -> Self {
        Self {
            initial_state,
            actions: HashMap::new(),
            stages: Vec::new(),
            side_effects: Vec::new(),
            hooks: InitHooks::default(),
        }
    }

    /// Register an action under its name. Re-registering a name replaces
    /// the earlier action.
    pub fn action(mut self, action: Action) -> Self {
        if self.actions.insert(action.name().to_string(), action).is_some() {
            tracing::warn!("action registered twice; keeping the later one");
        }
        self
    }

    /// Append a calculation stage. Stages run in the order added.
    pub fn stage(mut self, calculations: Vec<Calculation>) -> Self {
        self.stages.push(calculations);
        self
    }

    pub fn side_effect(mut self, effect: SideEffect) -> Self {
        self.side_effects.push(effect);
        self
    }

    pub fn init(mut self, hook: impl FnOnce(&Dispatcher) + Send + 'static) -> Self {
        self.hooks.push(Box::new(hook) as InitHook);
        self
    }

    pub fn build(self) -> Engine {
        let (tx, rx) = crossbeam_channel::unbounded();
        Engine {
            state: self.initial_state,
            actions: self.actions,
            stages: self.stages,
            side_effects: self.side_effects,
            hooks: self.hooks,
            pending: VecDeque::new(),
            tx,
            rx,
            running: Arc::new(AtomicBool::new(true)),
            cycles: 0,
        }
    }
}
