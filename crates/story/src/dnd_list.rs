use gpui::*;
use gpui_component::ActiveTheme as _;
use gpui_component::list::ListItem;
use gpui_component::{Icon, IconName, Sizable as _, h_flex, v_flex};
use gpui_dnd_list::{DndListConfig, DndListRowState, DndListState, DragEvent, DragMsg, dnd_list};

const MAX_LOG_LINES: usize = 12;

#[derive(Clone, Debug)]
pub struct Task {
    key: SharedString,
    title: SharedString,
    note: SharedString,
}

impl Task {
    fn new(
        key: impl Into<SharedString>,
        title: impl Into<SharedString>,
        note: impl Into<SharedString>,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            note: note.into(),
        }
    }
}

/// Messages the two demo lists report back to the story.
#[derive(Clone, Debug)]
pub enum StoryMsg {
    FruitsChanged(Vec<SharedString>),
    TasksChanged(Vec<Task>),
    TaskDrag(DragMsg<SharedString>),
    TaskLifecycle(DragEvent<SharedString>),
}

pub struct DndListExample {
    fruits: Vec<SharedString>,
    tasks: Vec<Task>,
    fruit_list: Entity<DndListState<SharedString, StoryMsg>>,
    task_list: Entity<DndListState<Task, StoryMsg>>,
    log: Vec<String>,
}

impl DndListExample {
    pub fn view(_window: &mut Window, cx: &mut App) -> Entity<Self> {
        cx.new(|cx| {
            let fruit_list = cx.new(|cx| {
                DndListState::new(DndListConfig::simple(StoryMsg::FruitsChanged), cx)
            });
            let task_list = cx.new(|cx| DndListState::new(task_config(), cx));

            cx.subscribe(&fruit_list, |this: &mut Self, _, msg: &StoryMsg, cx| {
                this.apply(msg.clone(), cx);
            })
            .detach();
            cx.subscribe(&task_list, |this: &mut Self, _, msg: &StoryMsg, cx| {
                this.apply(msg.clone(), cx);
            })
            .detach();

            Self {
                fruits: demo_fruits(),
                tasks: demo_tasks(),
                fruit_list,
                task_list,
                log: Vec::new(),
            }
        })
    }

    fn apply(&mut self, msg: StoryMsg, cx: &mut Context<Self>) {
        match msg {
            StoryMsg::FruitsChanged(fruits) => {
                tracing::debug!(len = fruits.len(), "fruits reordered");
                self.fruits = fruits;
            }
            StoryMsg::TasksChanged(tasks) => {
                tracing::debug!(len = tasks.len(), "tasks reordered");
                self.tasks = tasks;
            }
            StoryMsg::TaskDrag(DragMsg::MouseOverIgnored(_)) => {}
            StoryMsg::TaskDrag(msg) => self.push_log(format!("msg   {msg:?}")),
            StoryMsg::TaskLifecycle(event) => {
                tracing::info!(?event, "task drag lifecycle");
                self.push_log(format!("event {event:?}"));
            }
        }
        cx.notify();
    }

    fn push_log(&mut self, line: String) {
        self.log.push(line);
        if self.log.len() > MAX_LOG_LINES {
            let overflow = self.log.len() - MAX_LOG_LINES;
            self.log.drain(..overflow);
        }
    }
}

fn task_config() -> DndListConfig<Task, StoryMsg> {
    DndListConfig::new(|task: &Task| task.key.clone(), StoryMsg::TasksChanged)
        .dispatch(StoryMsg::TaskDrag)
        .on_event(StoryMsg::TaskLifecycle)
        .render_item(|ix, task, row_state, _window, cx| render_task_row(ix, task, row_state, cx))
        .render_placeholder(|ix, task, _row_state, _window, cx| {
            render_task_placeholder(ix, task, cx)
        })
        .item_style(|style| style.border_b_1())
        .placeholder_style(|style| style.opacity(0.6))
}

impl Render for DndListExample {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let order = self
            .tasks
            .iter()
            .map(|task| task.key.to_string())
            .collect::<Vec<_>>()
            .join(" · ");
        let dragging = self
            .task_list
            .read(cx)
            .drag_state()
            .dragging_id()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "<none>".to_string());

        v_flex()
            .size_full()
            .p(px(16.))
            .gap_y_3()
            .child(
                v_flex()
                    .gap_y_1()
                    .child(
                        div()
                            .text_xl()
                            .font_weight(FontWeight::BOLD)
                            .child("DnD List"),
                    )
                    .child(div().text_sm().text_color(theme.muted_foreground).child(
                        "Drag a row over another row to move it just before that row. The note chip on each task does not start drags.",
                    ))
                    .child(
                        div()
                            .text_sm()
                            .text_color(theme.muted_foreground)
                            .child(format!("Dragging: {dragging}")),
                    ),
            )
            .child(
                h_flex()
                    .flex_1()
                    .min_h(px(0.))
                    .gap_x_3()
                    .child(panel(
                        "Fruits (simple)",
                        dnd_list(&self.fruit_list, self.fruits.clone()),
                        cx,
                    ))
                    .child(panel(
                        "Tasks (custom)",
                        dnd_list(&self.task_list, self.tasks.clone()),
                        cx,
                    ))
                    .child(
                        v_flex()
                            .flex_1()
                            .min_w(px(0.))
                            .h_full()
                            .gap_y_2()
                            .child(
                                div()
                                    .text_sm()
                                    .font_weight(FontWeight::MEDIUM)
                                    .child("Debug"),
                            )
                            .child(div().text_sm().child(order))
                            .child(
                                div()
                                    .flex_1()
                                    .min_h(px(0.))
                                    .rounded(px(12.))
                                    .border_1()
                                    .border_color(theme.border)
                                    .bg(theme.background)
                                    .p(px(12.))
                                    .child(render_log(&self.log)),
                            ),
                    ),
            )
    }
}

fn panel(title: &'static str, list: impl IntoElement, cx: &App) -> impl IntoElement {
    let theme = cx.theme();
    v_flex()
        .w(px(280.))
        .min_w(px(0.))
        .h_full()
        .gap_y_2()
        .child(
            div()
                .text_sm()
                .font_weight(FontWeight::MEDIUM)
                .child(title),
        )
        .child(
            div()
                .flex_1()
                .min_h(px(0.))
                .rounded(px(12.))
                .border_1()
                .border_color(theme.border)
                .bg(theme.background)
                .child(list),
        )
}

fn render_task_row(ix: usize, task: &Task, row_state: DndListRowState, cx: &mut App) -> ListItem {
    let theme = cx.theme();
    let note = row_state.ignore_drag.region(
        div()
            .id(("task-note", ix))
            .px(px(6.))
            .rounded(px(4.))
            .border_1()
            .border_color(theme.border)
            .text_xs()
            .text_color(theme.muted_foreground)
            .cursor(CursorStyle::Arrow)
            .child(task.note.clone()),
    );

    ListItem::new(ix).child(
        h_flex()
            .gap_x_2()
            .items_center()
            .child(
                Icon::from(IconName::Menu)
                    .small()
                    .text_color(theme.muted_foreground),
            )
            .child(div().flex_1().child(task.title.clone()))
            .child(note),
    )
}

fn render_task_placeholder(ix: usize, task: &Task, cx: &mut App) -> ListItem {
    let theme = cx.theme();
    ListItem::new(ix).child(
        div()
            .w_full()
            .rounded(px(4.))
            .border_1()
            .border_color(theme.border)
            .text_color(theme.muted_foreground)
            .child(task.title.clone()),
    )
}

fn render_log(log: &[String]) -> impl IntoElement {
    let lines = log.iter().map(|line| div().text_sm().child(line.clone()));
    v_flex().gap_y_0p5().children(lines)
}

fn demo_fruits() -> Vec<SharedString> {
    ["apple", "banana", "cherry", "durian", "elderberry", "fig"]
        .into_iter()
        .map(SharedString::from)
        .collect()
}

fn demo_tasks() -> Vec<Task> {
    vec![
        Task::new("t1", "Write changelog", "docs"),
        Task::new("t2", "Bump gpui", "deps"),
        Task::new("t3", "Fix scrollbar flicker", "bug"),
        Task::new("t4", "Review drag ghost", "ui"),
        Task::new("t5", "Cut release", "ops"),
    ]
}
