mod config;
mod list;

pub use config::DndListConfig;
pub use gpui_dnd_core::{DragEvent, DragMsg, DragState, Reorder};
pub use list::{DndList, DndListIgnoreDrag, DndListRowState, DndListState, dnd_list};
