use std::rc::Rc;

use gpui::{App, ParentElement as _, Pixels, SharedString, StyleRefinement, Styled, Window};
use gpui_component::list::ListItem;
use gpui_dnd_core::{DragEvent, DragMsg};

use crate::list::DndListRowState;

pub(crate) type RenderRow<T> =
    Rc<dyn Fn(usize, &T, DndListRowState, &mut Window, &mut App) -> ListItem>;

/// Host-supplied configuration for a [`DndListState`](crate::DndListState).
///
/// `M` is the host's own message type. Every notification the list produces is mapped into
/// `M` through one of the callbacks here and emitted from the list entity, so a host
/// subscribes once and handles drag traffic alongside its other messages.
///
/// `identify` must be injective over the current list. Two items with the same id make
/// drag targets ambiguous.
pub struct DndListConfig<T, M> {
    pub(crate) identify: Rc<dyn Fn(&T) -> SharedString>,
    pub(crate) dispatch: Option<Rc<dyn Fn(DragMsg<SharedString>) -> M>>,
    pub(crate) on_event: Option<Rc<dyn Fn(DragEvent<SharedString>) -> M>>,
    pub(crate) on_list_changed: Rc<dyn Fn(Vec<T>) -> M>,
    pub(crate) render_item: RenderRow<T>,
    pub(crate) render_placeholder: RenderRow<T>,
    pub(crate) list_style: StyleRefinement,
    pub(crate) item_style: StyleRefinement,
    pub(crate) placeholder_style: StyleRefinement,
    pub(crate) draggable: bool,
    pub(crate) drag_handle_width: Option<Pixels>,
}

impl<T, M> Clone for DndListConfig<T, M> {
    fn clone(&self) -> Self {
        Self {
            identify: Rc::clone(&self.identify),
            dispatch: self.dispatch.clone(),
            on_event: self.on_event.clone(),
            on_list_changed: Rc::clone(&self.on_list_changed),
            render_item: Rc::clone(&self.render_item),
            render_placeholder: Rc::clone(&self.render_placeholder),
            list_style: self.list_style.clone(),
            item_style: self.item_style.clone(),
            placeholder_style: self.placeholder_style.clone(),
            draggable: self.draggable,
            drag_handle_width: self.drag_handle_width,
        }
    }
}

impl<M: 'static> DndListConfig<SharedString, M> {
    /// Plain string items identified by their own value, rendered as labels.
    pub fn simple(on_list_changed: impl Fn(Vec<SharedString>) -> M + 'static) -> Self {
        Self::new(|item: &SharedString| item.clone(), on_list_changed)
    }
}

impl<T: 'static, M: 'static> DndListConfig<T, M> {
    /// Fully customizable configuration. Rows render their id as a label until
    /// [`render_item`](Self::render_item) and [`render_placeholder`](Self::render_placeholder)
    /// are supplied.
    pub fn new(
        identify: impl Fn(&T) -> SharedString + 'static,
        on_list_changed: impl Fn(Vec<T>) -> M + 'static,
    ) -> Self {
        let identify: Rc<dyn Fn(&T) -> SharedString> = Rc::new(identify);

        let label = Rc::clone(&identify);
        let render_item: RenderRow<T> = Rc::new(
            move |ix: usize, item: &T, _: DndListRowState, _: &mut Window, _: &mut App| {
                ListItem::new(ix).child(label(item))
            },
        );

        let label = Rc::clone(&identify);
        let render_placeholder: RenderRow<T> = Rc::new(
            move |ix: usize, item: &T, _: DndListRowState, _: &mut Window, _: &mut App| {
                ListItem::new(ix).opacity(0.4).child(label(item))
            },
        );

        Self {
            identify,
            dispatch: None,
            on_event: None,
            on_list_changed: Rc::new(on_list_changed),
            render_item,
            render_placeholder,
            list_style: StyleRefinement::default(),
            item_style: StyleRefinement::default(),
            placeholder_style: StyleRefinement::default(),
            draggable: true,
            drag_handle_width: None,
        }
    }

    /// Forward every drag message to the host as well.
    pub fn dispatch(mut self, dispatch: impl Fn(DragMsg<SharedString>) -> M + 'static) -> Self {
        self.dispatch = Some(Rc::new(dispatch));
        self
    }

    /// Report drag start/end to the host.
    pub fn on_event(
        mut self,
        on_event: impl Fn(DragEvent<SharedString>) -> M + 'static,
    ) -> Self {
        self.on_event = Some(Rc::new(on_event));
        self
    }

    pub fn render_item(
        mut self,
        render_item: impl Fn(usize, &T, DndListRowState, &mut Window, &mut App) -> ListItem
        + 'static,
    ) -> Self {
        self.render_item = Rc::new(render_item);
        self
    }

    /// Rendering for the row whose item is currently dragged away.
    pub fn render_placeholder(
        mut self,
        render_placeholder: impl Fn(usize, &T, DndListRowState, &mut Window, &mut App) -> ListItem
        + 'static,
    ) -> Self {
        self.render_placeholder = Rc::new(render_placeholder);
        self
    }

    /// Style hooks. The drag logic never reads them; each is refined onto the list, a regular
    /// row or the placeholder row at render time.
    pub fn list_style(mut self, f: impl FnOnce(StyleRefinement) -> StyleRefinement) -> Self {
        self.list_style = f(std::mem::take(&mut self.list_style));
        self
    }

    pub fn item_style(mut self, f: impl FnOnce(StyleRefinement) -> StyleRefinement) -> Self {
        self.item_style = f(std::mem::take(&mut self.item_style));
        self
    }

    pub fn placeholder_style(mut self, f: impl FnOnce(StyleRefinement) -> StyleRefinement) -> Self {
        self.placeholder_style = f(std::mem::take(&mut self.placeholder_style));
        self
    }

    /// Enable or disable drag initiation for every row.
    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Restrict drag start to a left-side handle area with the given width.
    ///
    /// This generally results in a better drag ghost alignment than whole-row dragging.
    pub fn drag_handle_width(mut self, width: Pixels) -> Self {
        self.drag_handle_width = Some(width);
        self
    }

    /// Allow dragging from anywhere on the row.
    pub fn drag_on_row(mut self) -> Self {
        self.drag_handle_width = None;
        self
    }

    pub fn identify(&self, item: &T) -> SharedString {
        (self.identify)(item)
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }
}
