//! Structural-sharing container transforms.
//!
//! `map`, `map_if` and `map_from` apply a per-element function across a
//! sequence or mapping and build the result lazily: nothing is copied
//! until the first transformed element differs (by [`Value::same`]) from
//! the element already in the target. If no element differs, the target
//! container itself is returned — the same `Arc`, not an equal copy.
//!
//! That referential stability is what lets downstream gates answer "did
//! this region change?" with one pointer comparison, and it is the
//! load-bearing contract of this module.
//!
//! All three return a function with the `update_with` node-function
//! shape, so they compose directly:
//!
//! ```ignore
//! update_with("model.boxes", map(each(update_with("items", ...))))
//! ```

use crate::error::{BoardFlowError, Result};
use crate::state::accessor::{get, Updater};
use crate::state::path::{Path, Segment};
use crate::state::value::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Where `map_from` finds the container to iterate.
pub enum SourceSpec {
    /// A path resolved against the state the transform runs on.
    Path(Path),
    /// A supplier called with the state.
    Supplier(Box<dyn Fn(&Value) -> Option<Value>>),
}

impl SourceSpec {
    /// A supplier-backed source.
    pub fn with(f: impl Fn(&Value) -> Option<Value> + 'static) -> Self {
        SourceSpec::Supplier(Box::new(f))
    }
}

impl From<&str> for SourceSpec {
    fn from(s: &str) -> Self {
        SourceSpec::Path(Path::parse(s))
    }
}

impl From<Path> for SourceSpec {
    fn from(p: Path) -> Self {
        SourceSpec::Path(p)
    }
}

/// Apply `iteratee` to every element of the target container.
pub fn map<F>(iteratee: F) -> impl Fn(Option<&Value>, &Value) -> Result<Value>
where
    F: Fn(&Value, &Value, &Segment) -> Result<Value> + 'static,
{
    move |target, state| do_map(target, state, None, None, &iteratee)
}

/// As `map`, but elements failing `predicate` pass through untouched.
pub fn map_if<P, F>(predicate: P, iteratee: F) -> impl Fn(Option<&Value>, &Value) -> Result<Value>
where
    P: Fn(&Value, &Value, &Segment) -> bool + 'static,
    F: Fn(&Value, &Value, &Segment) -> Result<Value> + 'static,
{
    move |target, state| do_map(target, state, None, Some(&predicate), &iteratee)
}

/// As `map`, but iterate the container found at `source` in the state
/// while replacing the target container. A missing source leaves the
/// target unchanged; a `Null` target counts as empty.
pub fn map_from<F>(
    source: impl Into<SourceSpec>,
    iteratee: F,
) -> impl Fn(Option<&Value>, &Value) -> Result<Value>
where
    F: Fn(&Value, &Value, &Segment) -> Result<Value> + 'static,
{
    let source = source.into();
    move |target, state| do_map(target, state, Some(&source), None, &iteratee)
}

/// Adapt an [`Updater`] into an iteratee, so path updates nest as the
/// per-element function of a transform.
pub fn each(updater: Updater) -> impl Fn(&Value, &Value, &Segment) -> Result<Value> + 'static {
    move |element, _state, _segment| updater(element)
}

fn do_map(
    target: Option<&Value>,
    state: &Value,
    source: Option<&SourceSpec>,
    predicate: Option<&dyn Fn(&Value, &Value, &Segment) -> bool>,
    iteratee: &dyn Fn(&Value, &Value, &Segment) -> Result<Value>,
) -> Result<Value> {
    let null = Value::Null;
    let target = target.unwrap_or(&null);

    // Resolve the container to iterate. Without an explicit source it
    // is the target itself.
    let resolved;
    let container = match source {
        None => target,
        Some(SourceSpec::Path(path)) => match get(state, path) {
            Some(v) => v,
            None => return Ok(target.clone()),
        },
        Some(SourceSpec::Supplier(f)) => match f(state) {
            Some(v) => {
                resolved = v;
                &resolved
            }
            None => return Ok(target.clone()),
        },
    };

    match container {
        Value::Seq(source_seq) => {
            let target_elems: &[Value] = match target {
                Value::Seq(s) => s.as_slice(),
                _ => &[],
            };
            let mut result: Option<Vec<Value>> = None;
            for (index, element) in source_seq.iter().enumerate() {
                let segment = Segment::Index(index);
                let new = match predicate {
                    Some(pred) if !pred(element, state, &segment) => element.clone(),
                    _ => iteratee(element, state, &segment)?,
                };
                let diverged = !target_elems.get(index).is_some_and(|orig| orig.same(&new));
                if result.is_none() && diverged {
                    // First divergence: reuse the target's prefix as-is.
                    result = Some(target_elems[..index].to_vec());
                }
                if let Some(out) = result.as_mut() {
                    out.push(new);
                }
            }
            // A shorter source than target is a change even when every
            // scanned element matched.
            if result.is_none() && target_elems.len() != source_seq.len() {
                result = Some(target_elems[..source_seq.len()].to_vec());
            }
            Ok(match result {
                Some(out) => Value::Seq(Arc::new(out)),
                None => target.clone(),
            })
        }
        Value::Map(source_map) => {
            let target_map = match target {
                Value::Map(m) => Some(m),
                _ => None,
            };
            let mut result: Option<BTreeMap<String, Value>> = None;
            for (key, element) in source_map.iter() {
                let segment = Segment::Key(key.clone());
                let new = match predicate {
                    Some(pred) if !pred(element, state, &segment) => element.clone(),
                    _ => iteratee(element, state, &segment)?,
                };
                let diverged = !target_map
                    .and_then(|m| m.get(key))
                    .is_some_and(|orig| orig.same(&new));
                if result.is_none() && diverged {
                    // First divergence: shallow-copy the source mapping.
                    result = Some((**source_map).clone());
                }
                if let Some(out) = result.as_mut() {
                    out.insert(key.clone(), new);
                }
            }
            Ok(match result {
                Some(out) => Value::Map(Arc::new(out)),
                None => target.clone(),
            })
        }
        other => Err(BoardFlowError::NotAContainer {
            path: match source {
                Some(SourceSpec::Path(p)) => p.to_string(),
                _ => "<map target>".to_string(),
            },
            kind: other.kind(),
        }),
    }
}
