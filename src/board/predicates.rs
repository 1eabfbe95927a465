//! Region-change predicates for calculation and side-effect gates.
//!
//! All are single reference comparisons via [`crate::pipeline::changed`];
//! none of them ever inspects content.

use crate::pipeline::{changed, Gate};

pub fn model_changed() -> Gate {
    changed("model")
}

pub fn boxes_changed() -> Gate {
    changed("model.boxes")
}

pub fn trans_changed() -> Gate {
    changed("trans")
}

pub fn view_changed() -> Gate {
    changed("view.board")
}
