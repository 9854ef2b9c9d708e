//! Drag state machine and reorder algorithm behind the gpui drag-and-drop list.
//!
//! Both halves are plain functions over values the caller owns. The state machine never
//! sees the list and the reorder algorithm only reads the dragged id it is handed.

mod reorder;
mod state;

pub use crate::reorder::*;
pub use crate::state::*;
