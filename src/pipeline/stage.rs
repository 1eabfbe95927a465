//! Registered stage members: actions, calculations and side effects.
//!
//! All three share the guard-and-body shape. An action's body receives
//! the dispatch arguments; a calculation's body derives new state from
//! the (current, previous) pair; a side effect's body observes the pair
//! and may enqueue follow-up dispatches through the [`Dispatcher`].
//! Bodies are fallible; guards are not.

use crate::error::Result;
use crate::pipeline::bridge::Dispatcher;
use crate::pipeline::gate::{ArgGate, Gate};
use crate::state::Value;

type ActionBody = Box<dyn Fn(&[Value], &Value) -> Result<Value> + Send>;
type CalculationBody = Box<dyn Fn(&Value, &Value) -> Result<Value> + Send>;
type SideEffectBody = Box<dyn Fn(&Value, &Value, &Dispatcher) -> Result<()> + Send>;

/// A named state transition, dispatched by external input.
pub struct Action {
    pub(crate) name: String,
    pub(crate) when: Option<ArgGate>,
    pub(crate) then: ActionBody,
}

impl Action {
    /// An action that always applies.
    pub fn new(
        name: impl Into<String>,
        then: impl Fn(&[Value], &Value) -> Result<Value> + Send + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            when: None,
            then: Box::new(then),
        }
    }

    /// An action that applies only while `when` holds; otherwise the
    /// dispatch is a complete no-op.
    pub fn guarded(
        name: impl Into<String>,
        when: impl Fn(&Value, &[Value]) -> bool + Send + 'static,
        then: impl Fn(&[Value], &Value) -> Result<Value> + Send + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            when: Some(Box::new(when)),
            then: Box::new(then),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A gated derivation of one state region from others.
pub struct Calculation {
    pub(crate) name: String,
    pub(crate) when: Gate,
    pub(crate) then: CalculationBody,
}

impl Calculation {
    pub fn new(
        name: impl Into<String>,
        when: Gate,
        then: impl Fn(&Value, &Value) -> Result<Value> + Send + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            when,
            then: Box::new(then),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A gated external-effect trigger. Never produces state.
pub struct SideEffect {
    pub(crate) name: String,
    pub(crate) when: Gate,
    pub(crate) then: SideEffectBody,
}

impl SideEffect {
    pub fn new(
        name: impl Into<String>,
        when: Gate,
        then: impl Fn(&Value, &Value, &Dispatcher) -> Result<()> + Send + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            when,
            then: Box::new(then),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
