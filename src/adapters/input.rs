//! Terminal input adapter.
//!
//! Translates line commands into [`ActionCall`]s — pure translation, no
//! dispatching. The binary's stdin loop feeds lines in and dispatches
//! whatever comes out.
//!
//! Commands:
//!
//! ```text
//! add [lane]         create a box (id minted here) in a lane
//! edit <path>        start editing the value at a state path
//! type <text...>     replace the pending edit value
//! save | cancel      finish or abandon the edit
//! drag <path>        pick up the value at a path
//! target <lane>      highlight a drop lane
//! drop <lane>        drop the dragged box into a lane
//! expand <id> | collapse <id>
//! quit
//! ```

use crate::adapters::ids::IdSource;
use crate::pipeline::ActionCall;
use crate::state::Value;

/// Outcome of translating one input line.
pub enum Translated {
    /// Dispatch this call.
    Call(ActionCall),
    /// Line was empty or malformed; nothing to dispatch.
    Nothing(Option<String>),
    /// User asked to leave.
    Quit,
}

/// Stateless command-line translator; box ids come from the id source.
pub struct LineInput<'a> {
    ids: &'a dyn IdSource,
}

impl<'a> LineInput<'a> {
    pub fn new(ids: &'a dyn IdSource) -> Self {
        Self { ids }
    }

    pub fn translate(&self, line: &str) -> Translated {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Translated::Nothing(None);
        };
        let rest: Vec<&str> = words.collect();

        match command {
            "add" => {
                let lane = rest.first().and_then(|w| w.parse::<i64>().ok()).unwrap_or(0);
                Translated::Call(ActionCall::new(
                    "add_box",
                    vec![Value::from(self.ids.next_id()), Value::from(lane)],
                ))
            }
            "edit" => match rest.first() {
                Some(path) => {
                    Translated::Call(ActionCall::new("start_edit", vec![Value::from(*path)]))
                }
                None => Translated::Nothing(Some("edit needs a path".to_string())),
            },
            "type" => Translated::Call(ActionCall::new(
                "update_edit",
                vec![Value::from(rest.join(" "))],
            )),
            "save" => Translated::Call(ActionCall::new("save_edit", vec![])),
            "cancel" => Translated::Call(ActionCall::new("cancel_edit", vec![])),
            "drag" => match rest.first() {
                Some(path) => {
                    Translated::Call(ActionCall::new("drag_start", vec![Value::from(*path)]))
                }
                None => Translated::Nothing(Some("drag needs a path".to_string())),
            },
            "target" => match rest.first().and_then(|w| w.parse::<i64>().ok()) {
                Some(lane) => {
                    Translated::Call(ActionCall::new("target_lane", vec![Value::from(lane)]))
                }
                None => Translated::Nothing(Some("target needs a lane index".to_string())),
            },
            "drop" => match rest.first().and_then(|w| w.parse::<i64>().ok()) {
                Some(lane) => {
                    Translated::Call(ActionCall::new("drop_on_lane", vec![Value::from(lane)]))
                }
                None => Translated::Nothing(Some("drop needs a lane index".to_string())),
            },
            "expand" | "collapse" => match rest.first() {
                Some(id) => Translated::Call(ActionCall::new(command, vec![Value::from(*id)])),
                None => Translated::Nothing(Some(format!("{} needs a box id", command))),
            },
            "quit" | "exit" => Translated::Quit,
            other => Translated::Nothing(Some(format!("unknown command '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ids::SequentialIds;

    fn translate(line: &str) -> Translated {
        let ids = SequentialIds::new("box");
        LineInput::new(&ids).translate(line)
    }

    #[test]
    fn test_add_mints_an_id() {
        match translate("add 2") {
            Translated::Call(call) => {
                assert_eq!(call.name, "add_box");
                assert_eq!(call.args[0].as_str(), Some("box-1"));
                assert_eq!(call.args[1].as_int(), Some(2));
            }
            _ => panic!("expected a call"),
        }
    }

    #[test]
    fn test_type_joins_words() {
        match translate("type buy more tea") {
            Translated::Call(call) => {
                assert_eq!(call.name, "update_edit");
                assert_eq!(call.args[0].as_str(), Some("buy more tea"));
            }
            _ => panic!("expected a call"),
        }
    }

    #[test]
    fn test_blank_and_unknown_lines() {
        assert!(matches!(translate("   "), Translated::Nothing(None)));
        assert!(matches!(translate("frobnicate"), Translated::Nothing(Some(_))));
        assert!(matches!(translate("quit"), Translated::Quit));
    }
}
