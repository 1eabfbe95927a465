//! Path-addressed reads and structural-sharing updates.
//!
//! `update` rebuilds every container on the ancestor chain of the target
//! node and nothing else: sibling subtrees in the result are the same
//! `Arc`s as in the input. If the produced node is [`Value::same`] as the
//! node already there, the whole update returns the original root
//! unchanged — downstream gates depend on that no-op contract to detect
//! "nothing happened" with a single reference comparison.
//!
//! Reads are tolerant: `get` returns `None` for missing branches (no edit
//! in progress, no drag payload). Updates are strict about missing
//! *intermediate* containers but allow inserting a new leaf key into a
//! mapping, which is how new boxes enter `model.boxes`.

use crate::error::{BoardFlowError, Result};
use crate::state::path::{Path, Segment};
use crate::state::value::Value;

/// A reusable state transition: applied to a root, yields the next root.
pub type Updater = Box<dyn Fn(&Value) -> Result<Value>>;

/// Resolve `path` against `root`. Missing branches yield `None`.
///
/// An `Index` segment addresses a mapping by its decimal-string key and a
/// digit `Key` addresses a sequence, so both path spellings reach the
/// same node.
pub fn get<'a>(root: &'a Value, path: &Path) -> Option<&'a Value> {
    let mut node = root;
    for seg in path.segments() {
        node = match (node, seg) {
            (Value::Map(m), Segment::Key(k)) => m.get(k)?,
            (Value::Map(m), Segment::Index(i)) => m.get(&i.to_string())?,
            (Value::Seq(s), Segment::Index(i)) => s.get(*i)?,
            (Value::Seq(s), Segment::Key(k)) => s.get(k.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(node)
}

/// Replace the node at `path` with `value`.
pub fn update(path: impl Into<Path>, value: Value) -> Updater {
    update_with(path, move |_current, _scope| Ok(value.clone()))
}

/// Replace the node at `path` with `f(current, scope)`, where `scope` is
/// the value this updater was applied to. `current` is `None` when the
/// update inserts a new leaf key.
pub fn update_with<F>(path: impl Into<Path>, f: F) -> Updater
where
    F: Fn(Option<&Value>, &Value) -> Result<Value> + 'static,
{
    let path = path.into();
    Box::new(move |root: &Value| {
        let replaced = apply(root, path.segments(), &f, root, &path)?;
        Ok(replaced.unwrap_or_else(|| root.clone()))
    })
}

/// Apply updaters left to right, threading each result into the next.
pub fn chain(updaters: impl IntoIterator<Item = Updater>) -> Updater {
    let updaters: Vec<Updater> = updaters.into_iter().collect();
    Box::new(move |root: &Value| {
        let mut state = root.clone();
        for updater in &updaters {
            state = updater(&state)?;
        }
        Ok(state)
    })
}

/// Recursive worker. Returns `None` when nothing changed, so every level
/// of the ancestor chain can propagate the no-op without rebuilding.
fn apply<F>(
    node: &Value,
    segments: &[Segment],
    f: &F,
    scope: &Value,
    full_path: &Path,
) -> Result<Option<Value>>
where
    F: Fn(Option<&Value>, &Value) -> Result<Value>,
{
    let Some((segment, rest)) = segments.split_first() else {
        let new = f(Some(node), scope)?;
        return Ok(if new.same(node) { None } else { Some(new) });
    };

    match node {
        Value::Map(map) => {
            let key = match segment {
                Segment::Key(k) => k.clone(),
                Segment::Index(i) => i.to_string(),
            };
            if rest.is_empty() {
                let current = map.get(&key);
                let new = f(current, scope)?;
                if current.is_some_and(|c| c.same(&new)) {
                    return Ok(None);
                }
                let mut rebuilt = (**map).clone();
                rebuilt.insert(key, new);
                Ok(Some(Value::Map(std::sync::Arc::new(rebuilt))))
            } else {
                let child = map
                    .get(&key)
                    .ok_or_else(|| BoardFlowError::PathNotFound(full_path.to_string()))?;
                match apply(child, rest, f, scope, full_path)? {
                    None => Ok(None),
                    Some(new_child) => {
                        let mut rebuilt = (**map).clone();
                        rebuilt.insert(key, new_child);
                        Ok(Some(Value::Map(std::sync::Arc::new(rebuilt))))
                    }
                }
            }
        }
        Value::Seq(seq) => {
            let index = match segment {
                Segment::Index(i) => *i,
                Segment::Key(k) => k
                    .parse::<usize>()
                    .map_err(|_| BoardFlowError::PathNotFound(full_path.to_string()))?,
            };
            let current = seq
                .get(index)
                .ok_or_else(|| BoardFlowError::PathNotFound(full_path.to_string()))?;
            if rest.is_empty() {
                let new = f(Some(current), scope)?;
                if current.same(&new) {
                    return Ok(None);
                }
                let mut rebuilt = (**seq).clone();
                rebuilt[index] = new;
                Ok(Some(Value::Seq(std::sync::Arc::new(rebuilt))))
            } else {
                match apply(current, rest, f, scope, full_path)? {
                    None => Ok(None),
                    Some(new_child) => {
                        let mut rebuilt = (**seq).clone();
                        rebuilt[index] = new_child;
                        Ok(Some(Value::Seq(std::sync::Arc::new(rebuilt))))
                    }
                }
            }
        }
        other => Err(BoardFlowError::NotAContainer {
            path: full_path.to_string(),
            kind: other.kind(),
        }),
    }
}
