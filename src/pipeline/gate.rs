//! Predicate gates deciding whether a stage member runs.
//!
//! A [`Gate`] compares the current state against the cycle-start state;
//! an [`ArgGate`] compares the current state against dispatch arguments.
//! Gates must be pure: the engine may evaluate them more than once, and a
//! false gate must leave no trace.

use crate::state::{get, Path, Value};

/// Predicate over (current, previous) state for calculations and side
/// effects.
pub type Gate = Box<dyn Fn(&Value, &Value) -> bool + Send>;

/// Predicate over (current state, dispatch args) for guarded actions.
pub type ArgGate = Box<dyn Fn(&Value, &[Value]) -> bool + Send>;

/// True iff the two states differ (by [`Value::same`]) at `path`.
///
/// A node present on one side only counts as changed; absent on both
/// sides does not.
pub fn changed(path: impl Into<Path>) -> Gate {
    let path = path.into();
    Box::new(move |state, previous| {
        match (get(state, &path), get(previous, &path)) {
            (Some(a), Some(b)) => !a.same(b),
            (None, None) => false,
            _ => true,
        }
    })
}

/// Logical OR; stops at the first true gate.
pub fn any_of(gates: Vec<Gate>) -> Gate {
    Box::new(move |state, previous| gates.iter().any(|gate| gate(state, previous)))
}

/// Logical AND; stops at the first false gate.
pub fn all_of(gates: Vec<Gate>) -> Gate {
    Box::new(move |state, previous| gates.iter().all(|gate| gate(state, previous)))
}

/// Logical negation.
pub fn not(gate: Gate) -> Gate {
    Box::new(move |state, previous| !gate(state, previous))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::update;

    fn state() -> Value {
        Value::map([
            ("model", Value::map([("n", 1i64.into())])),
            ("trans", Value::map([("n", 1i64.into())])),
        ])
    }

    fn lit(b: bool) -> Gate {
        Box::new(move |_, _| b)
    }

    /// A gate that panics when evaluated, to prove short-circuiting.
    fn must_not_run() -> Gate {
        Box::new(|_, _| panic!("gate evaluated past a short-circuit"))
    }

    #[test]
    fn test_changed_detects_region_replacement() {
        let prev = state();
        let next = update("model.n", 2i64.into())(&prev).unwrap();
        assert!(changed("model")(&next, &prev));
        assert!(!changed("trans")(&next, &prev));
    }

    #[test]
    fn test_changed_on_noop_update() {
        let prev = state();
        let next = update("model.n", 1i64.into())(&prev).unwrap();
        assert!(!changed("model")(&next, &prev));
    }

    #[test]
    fn test_changed_with_missing_branch() {
        let prev = state();
        let next = update("trans.edit", Value::from("x"))(&prev).unwrap();
        assert!(changed("trans.edit")(&next, &prev));
        assert!(!changed("trans.nothing")(&next, &prev));
    }

    #[test]
    fn test_any_of_short_circuits() {
        let s = state();
        assert!(any_of(vec![lit(true), must_not_run()])(&s, &s));
        assert!(!any_of(vec![lit(false), lit(false)])(&s, &s));
    }

    #[test]
    fn test_all_of_short_circuits() {
        let s = state();
        assert!(!all_of(vec![lit(false), must_not_run()])(&s, &s));
        assert!(all_of(vec![lit(true), lit(true)])(&s, &s));
    }

    #[test]
    fn test_not() {
        let s = state();
        assert!(not(lit(false))(&s, &s));
        assert!(!not(lit(true))(&s, &s));
    }
}
