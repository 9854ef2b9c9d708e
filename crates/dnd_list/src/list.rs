use std::{ops::Range, rc::Rc};

use gpui::{
    App, AppContext as _, Context, CursorStyle, DragMoveEvent, ElementId, Entity, EntityId,
    EventEmitter, FocusHandle, InteractiveElement as _, IntoElement, ListSizingBehavior,
    ParentElement as _, Pixels, Point, Render, RenderOnce, SharedString, StatefulInteractiveElement,
    StyleRefinement, Styled, UniformListScrollHandle, Window, div, prelude::FluentBuilder as _,
    px, uniform_list,
};
use gpui_component::scroll::{Scrollbar, ScrollbarState};
use gpui_component::{ActiveTheme as _, StyledExt as _};
use gpui_dnd_core::{DragEvent, DragMsg, DragState, plan_reorder};

use crate::DndListConfig;

const CONTEXT: &str = "DndList";

/// Create a [`DndList`] rendering `items`, the host's current list.
pub fn dnd_list<T, M>(
    state: &Entity<DndListState<T, M>>,
    items: impl Into<Vec<T>>,
) -> DndList<T, M>
where
    T: Clone + 'static,
    M: 'static,
{
    DndList::new(state, items)
}

#[derive(Clone)]
struct DndListDrag {
    list_id: EntityId,
    item_id: SharedString,
}

struct DragGhost {
    label: SharedString,
}

impl DragGhost {
    fn new(label: SharedString) -> Self {
        Self { label }
    }
}

impl Render for DragGhost {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        div()
            .px(px(10.))
            .py(px(6.))
            .rounded(px(8.))
            .bg(theme.popover)
            .border_1()
            .border_color(theme.border)
            .shadow_md()
            .text_color(theme.popover_foreground)
            .text_sm()
            .child(self.label.clone())
    }
}

/// Marks nested elements of a row as regions that must not start a drag.
///
/// Every row receives one through [`DndListRowState::ignore_drag`].
#[derive(Clone)]
pub struct DndListIgnoreDrag {
    set_mouse_over_ignored: Rc<dyn Fn(bool, &mut App)>,
}

impl DndListIgnoreDrag {
    /// Suppress drag initiation while the pointer hovers `element`.
    ///
    /// The flag clears when gpui reports the hover ending. If the element unmounts under the
    /// pointer, the list clears it the next time the host hands in a different row sequence;
    /// hosts that remove regions without changing rows should send
    /// `DragMsg::MouseOverIgnored(false)` through [`DndListState::send`] themselves.
    pub fn region<E: StatefulInteractiveElement>(&self, element: E) -> E {
        let set_mouse_over_ignored = Rc::clone(&self.set_mouse_over_ignored);
        element.on_hover(move |hovered, _window, cx| set_mouse_over_ignored(*hovered, cx))
    }
}

#[derive(Clone)]
pub struct DndListRowState {
    /// This row's item is the one being dragged; it renders as a placeholder.
    pub dragging: bool,
    /// Some item of this list is being dragged.
    pub drag_active: bool,
    pub mouse_over_ignored: bool,
    pub ignore_drag: DndListIgnoreDrag,
}

/// State for a draggable, reorderable list.
///
/// Owns the drag state of exactly one list. The item list itself belongs to the host: it is
/// handed in on every render through [`dnd_list`], and reorders go back out as `M` built by
/// the config's `on_list_changed`.
pub struct DndListState<T, M> {
    focus_handle: FocusHandle,
    items: Vec<T>,
    scrollbar_state: ScrollbarState,
    scroll_handle: UniformListScrollHandle,
    drag: DragState<SharedString>,
    gesture: DragGesture,
    config: DndListConfig<T, M>,
}

/// Pointer-path bookkeeping for one gpui drag started from a list.
#[derive(Debug, Default, PartialEq)]
struct DragGesture {
    active: bool,
    entered_id: Option<SharedString>,
}

impl DragGesture {
    fn start(&mut self, item_id: SharedString) {
        self.active = true;
        self.entered_id = Some(item_id);
    }

    /// `true` when the pointer moves onto a row other than the one it was last over.
    fn enter(&mut self, target_id: &SharedString) -> bool {
        if !self.active || self.entered_id.as_ref() == Some(target_id) {
            return false;
        }
        self.entered_id = Some(target_id.clone());
        true
    }

    /// `true` exactly once per started gesture, however many drop paths report the end.
    fn finish(&mut self) -> bool {
        let was_active = self.active;
        *self = Self::default();
        was_active
    }
}

impl<T: Clone + 'static, M: 'static> EventEmitter<M> for DndListState<T, M> {}

impl<T: Clone + 'static, M: 'static> DndListState<T, M> {
    pub fn new(config: DndListConfig<T, M>, cx: &mut App) -> Self {
        Self {
            focus_handle: cx.focus_handle(),
            items: Vec::new(),
            scrollbar_state: ScrollbarState::default(),
            scroll_handle: UniformListScrollHandle::default(),
            drag: DragState::new(),
            gesture: DragGesture::default(),
            config,
        }
    }

    pub fn drag_state(&self) -> &DragState<SharedString> {
        &self.drag
    }

    pub fn config(&self) -> &DndListConfig<T, M> {
        &self.config
    }

    pub fn set_config(&mut self, config: DndListConfig<T, M>, cx: &mut Context<Self>) {
        self.config = config;
        cx.notify();
    }

    /// Feed one message through the drag state machine and notify the host.
    pub fn send(&mut self, msg: DragMsg<SharedString>, cx: &mut Context<Self>) {
        let (drag, event, outbox) = step(&self.config, std::mem::take(&mut self.drag), msg);
        self.drag = drag;
        if event == Some(DragEvent::DragEnded) {
            self.gesture = DragGesture::default();
        }

        for msg in outbox {
            cx.emit(msg);
        }
        cx.notify();
    }

    fn set_items(&mut self, items: Vec<T>, cx: &mut Context<Self>) {
        let stale_ignore = self.drag.mouse_over_ignored()
            && row_ids_changed(&self.items, &items, &*self.config.identify);
        self.items = items;
        if stale_ignore {
            tracing::trace!("dnd list: rows changed under an ignored region");
            self.send(DragMsg::MouseOverIgnored(false), cx);
        }
    }

    fn set_mouse_over_ignored(&mut self, hovered: bool, cx: &mut Context<Self>) {
        self.send(DragMsg::MouseOverIgnored(hovered), cx);
    }

    fn on_drag_start(&mut self, drag: &DndListDrag, cx: &mut Context<Self>) {
        if drag.list_id != cx.entity_id() {
            return;
        }
        tracing::trace!(item_id = %drag.item_id, "dnd list: drag start");
        self.gesture.start(drag.item_id.clone());
        self.send(DragMsg::StartDragging(drag.item_id.clone()), cx);
    }

    fn on_row_drag_move(
        &mut self,
        target_id: &SharedString,
        event: &DragMoveEvent<DndListDrag>,
        cx: &mut Context<Self>,
    ) {
        if !cx.has_active_drag() {
            return;
        }

        if !event.bounds.contains(&event.event.position) {
            return;
        }

        let list_id = event.drag(cx).list_id;
        if list_id != cx.entity_id() {
            return;
        }

        if !self.gesture.enter(target_id) {
            return;
        }
        self.on_drag_enter(target_id, cx);
    }

    fn on_drag_enter(&mut self, target_id: &SharedString, cx: &mut Context<Self>) {
        if !self.drag.is_dragging() {
            return;
        }

        let identify = &*self.config.identify;
        let Some(items) = reordered_on_enter(&self.items, identify, &self.drag, target_id) else {
            return;
        };
        tracing::trace!(
            dragged = ?self.drag.dragging_id(),
            target = %target_id,
            "dnd list: reorder on enter"
        );

        self.items = items.clone();
        cx.emit((self.config.on_list_changed)(items));
        cx.notify();
    }

    fn on_drop(&mut self, drag: &DndListDrag, _window: &mut Window, cx: &mut Context<Self>) {
        if drag.list_id != cx.entity_id() {
            return;
        }
        self.finish_drag(cx);
    }

    fn finish_drag(&mut self, cx: &mut Context<Self>) {
        if !self.gesture.finish() {
            return;
        }
        tracing::trace!("dnd list: drag finished");
        self.send(DragMsg::StopDragging, cx);
    }
}

/// Run `msg` through the state machine and collect the host messages it produces, in
/// emission order: the dispatched message first, then the lifecycle event.
fn step<T, M>(
    config: &DndListConfig<T, M>,
    drag: DragState<SharedString>,
    msg: DragMsg<SharedString>,
) -> (DragState<SharedString>, Option<DragEvent<SharedString>>, Vec<M>) {
    let mut outbox = Vec::new();
    if let Some(dispatch) = config.dispatch.as_ref() {
        outbox.push(dispatch(msg.clone()));
    }

    let (drag, event) = gpui_dnd_core::update(msg, drag);
    if let (Some(on_event), Some(event)) = (config.on_event.as_ref(), event.as_ref()) {
        outbox.push(on_event(event.clone()));
    }
    (drag, event, outbox)
}

fn row_ids_changed<T>(old: &[T], new: &[T], identify: &dyn Fn(&T) -> SharedString) -> bool {
    old.len() != new.len() || old.iter().zip(new).any(|(a, b)| identify(a) != identify(b))
}

/// The list after the dragged item enters `target_id`, or `None` when nothing moves.
fn reordered_on_enter<T: Clone>(
    items: &[T],
    identify: &dyn Fn(&T) -> SharedString,
    drag: &DragState<SharedString>,
    target_id: &SharedString,
) -> Option<Vec<T>> {
    let plan = plan_reorder(items, identify, drag.dragging_id(), target_id)?;
    let mut items = items.to_vec();
    plan.apply(&mut items);
    Some(items)
}

impl<T: Clone + 'static, M: 'static> Render for DndListState<T, M> {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        // gpui ends drags that land outside any drop target without telling us.
        if self.gesture.active && !cx.has_active_drag() {
            cx.defer_in(window, |this, _window, cx| this.finish_drag(cx));
        }

        let state_entity = cx.entity();
        let list_id = cx.entity_id();
        let weak_state = state_entity.downgrade();
        let ignore_drag = DndListIgnoreDrag {
            set_mouse_over_ignored: Rc::new(move |hovered: bool, cx: &mut App| {
                let _ = weak_state.update(cx, |state, cx| {
                    state.set_mouse_over_ignored(hovered, cx);
                });
            }),
        };

        div()
            .id("dnd-list-state")
            .size_full()
            .relative()
            .child(
                uniform_list("items", self.items.len(), {
                    cx.processor(move |state, visible_range: Range<usize>, window, cx| {
                        let drop_target_bg = cx.theme().drop_target;
                        let config = state.config.clone();
                        let drag_active = state.drag.is_dragging() && cx.has_active_drag();
                        let mouse_over_ignored = state.drag.mouse_over_ignored();
                        // Rows stay drag sources over ignored regions; the state machine
                        // suppresses those starts and still reports them to the host.
                        let can_drag = config.draggable;

                        let mut rows = Vec::with_capacity(visible_range.len());
                        for ix in visible_range {
                            let item = &state.items[ix];
                            let item_id = (config.identify)(item);
                            let dragging = drag_active && state.drag.is_dragging_item(&item_id);

                            let row_state = DndListRowState {
                                dragging,
                                drag_active,
                                mouse_over_ignored,
                                ignore_drag: ignore_drag.clone(),
                            };

                            let (list_item, row_style) = if dragging {
                                (
                                    (config.render_placeholder)(ix, item, row_state, window, cx),
                                    &config.placeholder_style,
                                )
                            } else {
                                (
                                    (config.render_item)(ix, item, row_state, window, cx),
                                    &config.item_style,
                                )
                            };

                            let drag_value = DndListDrag {
                                list_id,
                                item_id: item_id.clone(),
                            };
                            let enter_id = item_id.clone();

                            let row = div()
                                .id(ix)
                                .relative()
                                .refine_style(row_style)
                                .child(list_item)
                                .drag_over::<DndListDrag>(move |style, drag, _window, _cx| {
                                    if drag.list_id != list_id {
                                        return style;
                                    }
                                    style.bg(drop_target_bg.alpha(drop_target_bg.a.max(0.2)))
                                })
                                .on_drag_move::<DndListDrag>(cx.listener(
                                    move |this, event: &DragMoveEvent<DndListDrag>, _window, cx| {
                                        this.on_row_drag_move(&enter_id, event, cx);
                                    },
                                ))
                                .on_drop::<DndListDrag>(cx.listener(Self::on_drop))
                                .when(can_drag, |this| {
                                    let state_entity = state_entity.clone();
                                    let start_drag =
                                        move |drag: &DndListDrag,
                                              _offset: Point<Pixels>,
                                              _window: &mut Window,
                                              cx: &mut App| {
                                            state_entity.update(cx, |state, cx| {
                                                state.on_drag_start(drag, cx);
                                            });
                                            let label = drag.item_id.clone();
                                            cx.new(|_| DragGhost::new(label))
                                        };
                                    match config.drag_handle_width {
                                        Some(handle_width) => this.child(
                                            div()
                                                .id(("dnd-list-handle", ix))
                                                .absolute()
                                                .top_0()
                                                .left_0()
                                                .bottom_0()
                                                .w(handle_width)
                                                .cursor(CursorStyle::OpenHand)
                                                .on_drag(drag_value, start_drag),
                                        ),
                                        None => this.on_drag(drag_value, start_drag),
                                    }
                                });

                            rows.push(row);
                        }
                        rows
                    })
                })
                .on_drop::<DndListDrag>(cx.listener(Self::on_drop))
                .flex_grow()
                .size_full()
                .track_scroll(self.scroll_handle.clone())
                .with_sizing_behavior(ListSizingBehavior::Auto)
                .into_any_element(),
            )
            .child(
                div()
                    .absolute()
                    .top_0()
                    .right_0()
                    .bottom_0()
                    .w(px(12.))
                    .child(Scrollbar::uniform_scroll(
                        &self.scrollbar_state,
                        &self.scroll_handle,
                    )),
            )
    }
}

/// A draggable list element that supports drag-and-drop reordering.
#[derive(IntoElement)]
pub struct DndList<T: Clone + 'static, M: 'static> {
    id: ElementId,
    state: Entity<DndListState<T, M>>,
    items: Vec<T>,
    style: StyleRefinement,
}

impl<T: Clone + 'static, M: 'static> DndList<T, M> {
    pub fn new(state: &Entity<DndListState<T, M>>, items: impl Into<Vec<T>>) -> Self {
        Self {
            id: ElementId::Name(format!("dnd-list-{}", state.entity_id()).into()),
            state: state.clone(),
            items: items.into(),
            style: StyleRefinement::default(),
        }
    }
}

impl<T: Clone + 'static, M: 'static> Styled for DndList<T, M> {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl<T: Clone + 'static, M: 'static> RenderOnce for DndList<T, M> {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let state = self.state.read(cx);
        let focus_handle = state.focus_handle.clone();
        let list_style = state.config.list_style.clone();
        self.state.update(cx, |state, cx| state.set_items(self.items, cx));

        div()
            .id(self.id)
            .key_context(CONTEXT)
            .track_focus(&focus_handle)
            .size_full()
            .refine_style(&list_style)
            .child(self.state)
            .refine_style(&self.style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(ids: &[&'static str]) -> Vec<SharedString> {
        ids.iter().map(|id| SharedString::from(*id)).collect()
    }

    fn dragging(id: &'static str) -> DragState<SharedString> {
        let (state, _) = gpui_dnd_core::update(DragMsg::StartDragging(id.into()), DragState::new());
        state
    }

    fn identify(item: &SharedString) -> SharedString {
        item.clone()
    }

    #[test]
    fn enter_moves_dragged_item_before_target() {
        let items = list(&["a", "b", "c", "d"]);
        let out = reordered_on_enter(&items, &identify, &dragging("a"), &"d".into());
        assert_eq!(out, Some(list(&["b", "c", "a", "d"])));

        let out = reordered_on_enter(&items, &identify, &dragging("d"), &"a".into());
        assert_eq!(out, Some(list(&["d", "a", "b", "c"])));
    }

    #[test]
    fn enter_without_drag_leaves_list_alone() {
        let items = list(&["a", "b", "c"]);
        let out = reordered_on_enter(&items, &identify, &DragState::new(), &"a".into());
        assert_eq!(out, None);
    }

    #[test]
    fn enter_own_slot_or_unknown_target_leaves_list_alone() {
        let items = list(&["a", "b", "c"]);
        assert_eq!(
            reordered_on_enter(&items, &identify, &dragging("b"), &"b".into()),
            None
        );
        assert_eq!(
            reordered_on_enter(&items, &identify, &dragging("b"), &"zzz".into()),
            None
        );
        assert_eq!(
            reordered_on_enter(&items, &identify, &dragging("gone"), &"a".into()),
            None
        );
    }

    #[derive(Debug, PartialEq)]
    enum HostMsg {
        Drag(DragMsg<SharedString>),
        Event(DragEvent<SharedString>),
        Changed(Vec<SharedString>),
    }

    fn host_config() -> DndListConfig<SharedString, HostMsg> {
        DndListConfig::simple(HostMsg::Changed)
            .dispatch(HostMsg::Drag)
            .on_event(HostMsg::Event)
    }

    #[test]
    fn step_emits_dispatched_message_before_lifecycle_event() {
        let (drag, event, outbox) =
            step(&host_config(), DragState::new(), DragMsg::StartDragging("a".into()));

        assert_eq!(drag, dragging("a"));
        assert_eq!(event, Some(DragEvent::DragStarted("a".into())));
        assert_eq!(
            outbox,
            vec![
                HostMsg::Drag(DragMsg::StartDragging("a".into())),
                HostMsg::Event(DragEvent::DragStarted("a".into())),
            ]
        );

        let (drag, _, outbox) = step(&host_config(), drag, DragMsg::StopDragging);
        assert!(!drag.is_dragging());
        assert_eq!(
            outbox,
            vec![
                HostMsg::Drag(DragMsg::StopDragging),
                HostMsg::Event(DragEvent::DragEnded),
            ]
        );
    }

    #[test]
    fn start_over_ignored_region_reaches_host_without_dragging() {
        let (drag, _, outbox) =
            step(&host_config(), DragState::new(), DragMsg::MouseOverIgnored(true));
        assert_eq!(outbox, vec![HostMsg::Drag(DragMsg::MouseOverIgnored(true))]);

        let (drag, _, outbox) = step(&host_config(), drag, DragMsg::StartDragging("x".into()));
        assert_eq!(drag.dragging_id(), None);
        assert_eq!(
            outbox.last(),
            Some(&HostMsg::Event(DragEvent::DragStarted("x".into())))
        );

        let items = list(&["x", "y", "z"]);
        assert_eq!(reordered_on_enter(&items, &identify, &drag, &"z".into()), None);
    }

    #[test]
    fn step_without_host_callbacks_emits_nothing() {
        let config = DndListConfig::simple(HostMsg::Changed);
        let (drag, event, outbox) =
            step(&config, DragState::new(), DragMsg::StartDragging("a".into()));

        assert!(drag.is_dragging());
        assert_eq!(event, Some(DragEvent::DragStarted("a".into())));
        assert!(outbox.is_empty());
    }

    #[test]
    fn gesture_enters_each_row_once_per_visit() {
        let mut gesture = DragGesture::default();
        assert!(!gesture.enter(&"b".into()));

        gesture.start("a".into());
        assert!(!gesture.enter(&"a".into()));
        assert!(gesture.enter(&"b".into()));
        assert!(!gesture.enter(&"b".into()));
        assert!(gesture.enter(&"a".into()));
        assert!(gesture.enter(&"b".into()));
    }

    #[test]
    fn gesture_finishes_once_across_drop_paths() {
        let mut gesture = DragGesture::default();
        assert!(!gesture.finish());

        gesture.start("a".into());
        assert!(gesture.finish());
        assert!(!gesture.finish());
        assert!(!gesture.finish());
        assert_eq!(gesture, DragGesture::default());
        assert!(!gesture.enter(&"b".into()));
    }

    #[test]
    fn row_ids_changed_detects_order_and_membership() {
        let rows = list(&["a", "b", "c"]);
        assert!(!row_ids_changed(&rows, &list(&["a", "b", "c"]), &identify));
        assert!(row_ids_changed(&rows, &list(&["a", "c", "b"]), &identify));
        assert!(row_ids_changed(&rows, &list(&["a", "b"]), &identify));
        assert!(row_ids_changed(&[], &rows, &identify));
    }

    #[test]
    fn suppressed_start_never_reorders() {
        let (state, _) = gpui_dnd_core::update(DragMsg::MouseOverIgnored(true), DragState::new());
        let (state, event) = gpui_dnd_core::update(DragMsg::StartDragging("a".into()), state);
        assert_eq!(event, Some(DragEvent::DragStarted("a".into())));

        let items = list(&["a", "b", "c"]);
        assert_eq!(reordered_on_enter(&items, &identify, &state, &"c".into()), None);
    }
}
