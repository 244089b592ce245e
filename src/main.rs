use std::sync::Arc;
use std::time::Duration;

use report_actions_list::config;
use report_actions_list::data::mock::{
    fake_personal_details, fake_report, mocked_sorted_report_actions, MockHistory, CURRENT_USER,
};
use report_actions_list::list::item::CHAT_MESSAGE_HINT;
use report_actions_list::message::{ContentOffset, Dimensions, LayoutEvent, ScrollEvent};
use report_actions_list::report::Direction;
use report_actions_list::{ListProps, ListRuntime, Message};

const HISTORY_LEN: usize = 500;

fn scroll_to(y: f64, height: f64) -> Message {
    Message::Scrolled(ScrollEvent {
        content_offset: ContentOffset { y },
        content_size: Dimensions::default(),
        layout_measurement: Dimensions {
            height,
            width: 375.0,
        },
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("report_actions_list=info".parse()?),
        )
        .init();

    let mut settings = config::load_settings();
    settings.dev = settings.dev.with_env_override();
    let order = settings.list.order;

    let history = MockHistory::new(mocked_sorted_report_actions(HISTORY_LEN, order), order)
        .with_page_size(settings.list.page_size)
        .with_latency(Duration::from_millis(20));
    let stats = history.stats();

    let details = fake_personal_details();
    let current_user = details.get(&CURRENT_USER).cloned().unwrap_or_default();
    let initial = history.newest(settings.list.page_size);
    let viewport_height = settings.list.initial_viewport_height;
    let row_height = settings.list.row_height();

    let mut runtime = ListRuntime::new(ListProps {
        personal_details: details,
        current_user,
        has_more_older: initial.len() < history.len(),
        settings: settings.list,
        dev: settings.dev,
        ..ListProps::new(fake_report(), initial, Arc::new(history))
    });

    runtime.dispatch(Message::Layout(LayoutEvent {
        height: viewport_height,
        width: 375.0,
    }));
    let view = runtime.list().view();
    let label = view
        .items
        .first()
        .map(|i| i.accessibility_label.clone())
        .unwrap_or_else(|| CHAT_MESSAGE_HINT.to_string());
    tracing::info!(
        "Mounted {} rows labelled {label:?}",
        view.find_all_by_label(&label).len()
    );

    // Scroll a few rows away from the start and long press what is on screen.
    runtime.dispatch(scroll_to(row_height * 5.0, viewport_height));
    runtime.settle().await;
    match runtime.list().view().first_visible().map(|i| i.id) {
        Some(id) => {
            runtime.dispatch(Message::LongPress(id));
            tracing::info!("Long pressed action {id}");
        }
        None => tracing::warn!("Nothing visible to long press"),
    }
    runtime.dispatch(Message::DismissContextMenu);

    // Walk to the far end of history one page at a time.
    let older_at_start = order.is_leading(Direction::Older);
    let mut rounds = 0;
    while !runtime.list().pagination().is_exhausted(Direction::Older) && rounds < 100 {
        let y = if older_at_start {
            0.0
        } else {
            runtime.list().virtualizer().max_offset(viewport_height)
        };
        runtime.dispatch(scroll_to(y, viewport_height));
        runtime.settle().await;
        rounds += 1;
    }

    let snapshot = runtime.list().snapshot();
    let render_stats = runtime.list().render_stats();
    runtime.teardown();

    println!("actions loaded:      {}/{HISTORY_LEN}", snapshot.len());
    println!("older requests:      {}", stats.older_calls());
    println!("newer requests:      {}", stats.newer_calls());
    println!("max older in flight: {}", stats.max_older_in_flight());
    println!("rows rendered:       {}", render_stats.renders);
    println!("avoidable renders:   {}", render_stats.avoidable);
    Ok(())
}
