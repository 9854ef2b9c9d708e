use gpui::*;
use gpui_component::Root;
use tracing_subscriber::EnvFilter;

use gpui_dnd_list_story::dnd_list::DndListExample;

const WINDOW_TITLE: &str = "Drag-and-drop list reordering";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    Application::new().run(|cx: &mut App| {
        gpui_component::init(cx);
        cx.activate(true);

        // Three columns: both lists and the debug log.
        let window_bounds = Bounds::centered(None, size(px(960.), px(640.)), cx);
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(window_bounds)),
            is_resizable: true,
            titlebar: Some(TitlebarOptions {
                title: Some(WINDOW_TITLE.into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        tracing::info!(title = WINDOW_TITLE, "opening reorder demo");

        cx.spawn(async move |cx| {
            cx.open_window(options, |window, cx| {
                let view = DndListExample::view(window, cx);
                cx.new(|cx| Root::new(view, window, cx))
            })?;

            Ok::<_, anyhow::Error>(())
        })
        .detach();
    });
}
