use serde::{Deserialize, Serialize};

/// Drag state of a single list instance.
///
/// A list owns exactly one of these. Sharing it between two rendered lists makes
/// `dragging_id` ambiguous.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragState<Id> {
    dragging_id: Option<Id>,
    mouse_over_ignored: bool,
}

impl<Id> Default for DragState<Id> {
    fn default() -> Self {
        Self {
            dragging_id: None,
            mouse_over_ignored: false,
        }
    }
}

/// The rest state: nothing dragging, pointer not over an ignored region.
pub fn initial_state<Id>() -> DragState<Id> {
    DragState::default()
}

impl<Id> DragState<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dragging_id(&self) -> Option<&Id> {
        self.dragging_id.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging_id.is_some()
    }

    pub fn mouse_over_ignored(&self) -> bool {
        self.mouse_over_ignored
    }

    pub fn is_dragging_item(&self, id: &Id) -> bool
    where
        Id: PartialEq,
    {
        self.dragging_id.as_ref().is_some_and(|dragging| dragging == id)
    }

    /// Method form of [`update`].
    pub fn update(self, msg: DragMsg<Id>) -> (Self, Option<DragEvent<Id>>)
    where
        Id: Clone + std::fmt::Debug,
    {
        update(msg, self)
    }
}

/// Input messages for the drag state machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragMsg<Id> {
    /// The pointer entered (`true`) or left (`false`) a region that must not start drags.
    MouseOverIgnored(bool),
    StartDragging(Id),
    StopDragging,
}

/// Lifecycle notification emitted alongside a transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragEvent<Id> {
    DragStarted(Id),
    DragEnded,
}

/// Apply one message to `state`.
///
/// Total over every `(msg, state)` pair. `StartDragging` reports [`DragEvent::DragStarted`]
/// even when the pointer is over an ignored region and the state stays idle, so a host can
/// observe attempted drags.
pub fn update<Id>(
    msg: DragMsg<Id>,
    state: DragState<Id>,
) -> (DragState<Id>, Option<DragEvent<Id>>)
where
    Id: Clone + std::fmt::Debug,
{
    match msg {
        DragMsg::MouseOverIgnored(mouse_over_ignored) => {
            tracing::trace!(mouse_over_ignored, "drag state: ignored region hover changed");
            (
                DragState {
                    mouse_over_ignored,
                    ..state
                },
                None,
            )
        }
        DragMsg::StartDragging(id) => {
            let dragging_id = if state.mouse_over_ignored {
                tracing::trace!(?id, "drag state: start suppressed over ignored region");
                None
            } else {
                tracing::trace!(?id, "drag state: start dragging");
                Some(id.clone())
            };
            (
                DragState {
                    dragging_id,
                    ..state
                },
                Some(DragEvent::DragStarted(id)),
            )
        }
        DragMsg::StopDragging => {
            tracing::trace!(dragging_id = ?state.dragging_id, "drag state: stop dragging");
            (
                DragState {
                    dragging_id: None,
                    ..state
                },
                Some(DragEvent::DragEnded),
            )
        }
    }
}
