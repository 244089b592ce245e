//! The report action list component.
//!
//! Owns the ordered sequence of a report's actions, mounts only the rows near
//! the viewport, requests older and newer pages from an [`ActionLoader`] as
//! the viewport approaches either loaded boundary, and keeps the reader's
//! place whenever content moves underneath them.

pub mod anchor;
pub mod footer;
pub mod heights;
pub mod item;
pub mod virtualizer;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::{DevSettings, ListSettings};
use crate::data::source::{ActionLoader, LoadResult};
use crate::data::timeline::{self, is_strictly_sorted, TimelineSnapshot};
use crate::dev::{fingerprint, RenderStats, RenderTracker};
use crate::message::{LayoutEvent, Message, ScrollEvent};
use crate::report::{AccountId, ActionId, Direction, PersonalDetails, Report, ReportAction, SortOrder};
use crate::state::pagination::{PaginationController, Resolution};
use crate::state::timeline::TimelineState;
use crate::state::window::LoadWindow;
use crate::task::Task;

use footer::Footer;
use item::{author_name, default_translate, time_label, RenderedItem, RowProps, Translate, CHAT_MESSAGE_HINT};
use virtualizer::{MountedItem, Viewport, Virtualizer};

pub const TEST_ID: &str = "report-actions-list";

/// Tolerance when deciding whether the viewport sits on an edge.
const EDGE_EPSILON: f64 = 1.0;

pub type ScrollCallback = Box<dyn FnMut(&ScrollEvent) + Send>;
pub type LayoutCallback = Box<dyn FnMut(&LayoutEvent) + Send>;

/// Everything the list is configured with.
pub struct ListProps {
    pub report: Report,
    pub sorted_actions: Vec<ReportAction>,
    pub personal_details: HashMap<AccountId, PersonalDetails>,
    pub current_user: PersonalDetails,
    pub loader: Arc<dyn ActionLoader>,
    pub has_more_older: bool,
    pub has_more_newer: bool,
    pub on_scroll: Option<ScrollCallback>,
    pub on_layout: Option<LayoutCallback>,
    pub settings: ListSettings,
    pub dev: DevSettings,
    pub translate: Option<Translate>,
}

impl ListProps {
    /// Defaults for a report opened at its newest action.
    pub fn new(report: Report, sorted_actions: Vec<ReportAction>, loader: Arc<dyn ActionLoader>) -> Self {
        Self {
            report,
            sorted_actions,
            personal_details: HashMap::new(),
            current_user: PersonalDetails::default(),
            loader,
            has_more_older: true,
            has_more_newer: false,
            on_scroll: None,
            on_layout: None,
            settings: ListSettings::default(),
            dev: DevSettings::default(),
            translate: None,
        }
    }
}

/// A mounted row plus what it was last drawn from.
#[derive(Clone, Copy, Debug)]
struct Row {
    item: MountedItem,
    needs_render: bool,
}

/// Output of [`ReportActionsList::view`].
#[derive(Clone, Debug)]
pub struct RenderedList {
    pub test_id: &'static str,
    pub items: Vec<RenderedItem>,
    pub content_height: f64,
    pub scroll_offset: f64,
    pub viewport_height: f64,
    /// Placeholder rows at the older edge while a page is loading.
    pub older_placeholder: bool,
    pub newer_placeholder: bool,
    pub show_new_messages: bool,
    pub footer: Footer,
    pub context_menu: Option<ActionId>,
}

impl RenderedList {
    pub fn find_all_by_label(&self, label: &str) -> Vec<&RenderedItem> {
        self.items
            .iter()
            .filter(|i| i.accessibility_label == label)
            .collect()
    }

    /// First row that intersects the viewport.
    pub fn first_visible(&self) -> Option<&RenderedItem> {
        let bottom = self.scroll_offset + self.viewport_height;
        self.items
            .iter()
            .find(|i| i.top + i.height > self.scroll_offset && i.top < bottom)
    }
}

pub struct ReportActionsList {
    report: Report,
    personal_details: HashMap<AccountId, PersonalDetails>,
    current_user: PersonalDetails,
    loader: Arc<dyn ActionLoader>,
    on_scroll: Option<ScrollCallback>,
    on_layout: Option<LayoutCallback>,
    settings: ListSettings,
    translate: Translate,
    timeline: TimelineState,
    virtualizer: Virtualizer,
    pagination: PaginationController,
    viewport: Viewport,
    rows: Vec<Row>,
    drawn: HashMap<ActionId, u64>,
    tracker: RenderTracker,
}

impl ReportActionsList {
    pub fn new(props: ListProps) -> Self {
        let settings = props.settings;
        let order = settings.order;

        let actions = if is_strictly_sorted(&props.sorted_actions, order) {
            props.sorted_actions
        } else {
            tracing::warn!("Initial actions are not sorted, sorting them");
            timeline::upsert(&[], &props.sorted_actions, order).actions
        };

        let timeline = TimelineState::new(actions, order, settings.grouping_window());
        let mut virtualizer = Virtualizer::new(settings.estimates.clone(), settings.overscan_px);
        virtualizer.relayout(&timeline.snapshot);

        let pagination = PaginationController::new(
            Duration::from_millis(settings.cooldown_ms),
            props.has_more_older,
            props.has_more_newer,
        );

        let mut list = Self {
            report: props.report,
            personal_details: props.personal_details,
            current_user: props.current_user,
            loader: props.loader,
            on_scroll: props.on_scroll,
            on_layout: props.on_layout,
            translate: props.translate.unwrap_or_else(default_translate),
            tracker: RenderTracker::new(&props.dev),
            viewport: Viewport {
                offset: 0.0,
                height: settings.initial_viewport_height.max(0.0),
                width: 0.0,
            },
            settings,
            timeline,
            virtualizer,
            pagination,
            rows: Vec::new(),
            drawn: HashMap::new(),
        };
        list.viewport.offset = list.newest_edge_offset();
        list.refresh_window();

        tracing::info!(
            "Mounted report {} with {} actions",
            list.report.id,
            list.timeline.snapshot.len()
        );
        list
    }

    pub fn update(&mut self, message: Message) -> Task {
        if !self.pagination.is_alive() {
            tracing::trace!("Ignoring {message:?} after teardown");
            return Task::none();
        }

        match message {
            Message::Layout(event) => self.handle_layout(event),
            Message::Scrolled(event) => self.handle_scroll(event),
            Message::ItemMeasured { id, height } => self.on_measured(id, height),
            Message::LongPress(id) => {
                if self.rows.iter().any(|r| r.item.id == id) {
                    tracing::debug!("Opening context menu for action {id}");
                    self.timeline.context_menu = Some(id);
                } else {
                    tracing::warn!("Long press on unmounted action {id}");
                }
                Task::none()
            }
            Message::DismissContextMenu => {
                self.timeline.context_menu = None;
                Task::none()
            }
            Message::ScrollToNewest => {
                self.viewport.offset = self.newest_edge_offset();
                self.timeline.has_unseen = false;
                self.refresh_window();
                self.paginate()
            }
            Message::LoadFinished {
                direction,
                generation,
                result,
            } => self.on_load_finished(direction, generation, result),
            Message::ActionsReceived(actions) => self.on_actions_received(actions),
            Message::Teardown => {
                self.pagination.teardown();
                self.rows.clear();
                self.virtualizer.release_all();
                tracing::info!("Report {} list torn down", self.report.id);
                Task::none()
            }
        }
    }

    pub fn view(&self) -> RenderedList {
        let snapshot = &self.timeline.snapshot;
        let label = (self.translate)(CHAT_MESSAGE_HINT);
        let items = self
            .rows
            .iter()
            .filter_map(|row| {
                let action = snapshot.get(row.item.index)?;
                Some(RenderedItem {
                    id: action.id,
                    index: row.item.index,
                    slot: row.item.slot,
                    top: row.item.top,
                    height: row.item.height,
                    measured: row.item.measured,
                    accessibility_label: label.clone(),
                    author: author_name(&self.personal_details, action.actor),
                    time_label: time_label(action.created),
                    payload: action.payload.clone(),
                    status: action.status.clone(),
                    is_own: action.actor == self.current_user.account_id,
                    is_grouped: snapshot.is_grouped(row.item.index),
                    needs_render: row.needs_render,
                })
            })
            .collect();

        let window = self.load_window();
        RenderedList {
            test_id: TEST_ID,
            items,
            content_height: self.virtualizer.content_height(),
            scroll_offset: self.viewport.offset,
            viewport_height: self.viewport.height,
            older_placeholder: window.is_loading_older,
            newer_placeholder: window.is_loading_newer,
            show_new_messages: self.timeline.has_unseen,
            footer: Footer::for_report(&self.report, self.settings.animate_skeleton),
            context_menu: self.timeline.context_menu,
        }
    }

    /// Show another report in the same list. Requests still in flight for
    /// the previous report are discarded when they resolve.
    pub fn open_report(
        &mut self,
        report: Report,
        actions: Vec<ReportAction>,
        has_more_older: bool,
        has_more_newer: bool,
    ) {
        let order = self.timeline.order();
        let actions = if is_strictly_sorted(&actions, order) {
            actions
        } else {
            timeline::upsert(&[], &actions, order).actions
        };
        tracing::info!("Switching from report {} to {}", self.report.id, report.id);
        self.report = report;
        self.timeline.clear();
        self.timeline.replace(actions);
        self.pagination.reset(has_more_older, has_more_newer);
        self.virtualizer.release_all();
        self.virtualizer.relayout(&self.timeline.snapshot);
        self.drawn.clear();
        self.viewport.offset = self.newest_edge_offset();
        self.refresh_window();
    }

    pub fn snapshot(&self) -> Arc<TimelineSnapshot> {
        Arc::clone(&self.timeline.snapshot)
    }

    pub fn load_window(&self) -> LoadWindow {
        LoadWindow::of(&self.timeline.snapshot, &self.pagination)
    }

    pub fn pagination(&self) -> &PaginationController {
        &self.pagination
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn virtualizer(&self) -> &Virtualizer {
        &self.virtualizer
    }

    pub fn render_stats(&self) -> RenderStats {
        self.tracker.stats()
    }

    pub fn is_alive(&self) -> bool {
        self.pagination.is_alive()
    }

    /// Pixel distance between the top of the viewport and the top of `id`.
    pub fn offset_in_viewport(&self, id: ActionId) -> Option<f64> {
        let idx = self.timeline.snapshot.position(id)?;
        Some(self.virtualizer.top_of(idx) - self.viewport.offset)
    }

    // -- Host events --

    fn handle_layout(&mut self, event: LayoutEvent) -> Task {
        let pinned = self.at_newest_edge();
        self.viewport.height = event.height.max(0.0);
        self.viewport.width = event.width.max(0.0);
        if let Some(cb) = self.on_layout.as_mut() {
            cb(&event);
        }
        self.viewport.offset = if pinned {
            self.newest_edge_offset()
        } else {
            self.virtualizer
                .clamp_offset(self.viewport.offset, self.viewport.height)
        };
        self.refresh_window();
        self.paginate()
    }

    fn handle_scroll(&mut self, event: ScrollEvent) -> Task {
        if event.layout_measurement.height > 0.0 {
            self.viewport.height = event.layout_measurement.height;
            self.viewport.width = event.layout_measurement.width;
        }
        self.viewport.offset = self
            .virtualizer
            .clamp_offset(event.content_offset.y, self.viewport.height);
        if let Some(cb) = self.on_scroll.as_mut() {
            cb(&event);
        }
        if self.at_newest_edge() {
            self.timeline.has_unseen = false;
        }
        self.refresh_window();
        self.paginate()
    }

    fn on_measured(&mut self, id: ActionId, height: f64) -> Task {
        let Some(idx) = self.timeline.snapshot.position(id) else {
            tracing::debug!("Measurement for unknown action {id}");
            return Task::none();
        };
        if self.virtualizer.is_measured(idx) && (self.virtualizer.height_of(idx) - height).abs() < 0.5 {
            return Task::none();
        }

        let pinned = self.at_newest_edge();
        let capture = anchor::capture(&self.virtualizer, &self.timeline.snapshot, self.viewport);
        self.virtualizer.measure(&self.timeline.snapshot, idx, height);
        self.viewport.offset = if pinned {
            self.newest_edge_offset()
        } else {
            anchor::restore(
                &capture,
                &self.virtualizer,
                &self.timeline.snapshot,
                self.viewport.height,
            )
        };
        self.refresh_window();
        self.paginate()
    }

    // -- Data --

    fn on_load_finished(&mut self, direction: Direction, generation: u64, result: LoadResult) -> Task {
        if let Err(e) = self.pagination.accept(direction, generation) {
            tracing::debug!("Discarding {} page: {e}", direction.label());
            return Task::none();
        }
        let now = Instant::now();

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Failed to load {} actions: {e}", direction.label());
                self.pagination.finish(direction, Resolution::Failed, now);
                return Task::none();
            }
        };

        let outcome = match timeline::merge_page(
            self.timeline.snapshot.actions(),
            &page.actions,
            direction,
            self.timeline.order(),
        ) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Dropping {} page: {e}", direction.label());
                self.pagination.finish(direction, Resolution::Failed, now);
                return Task::none();
            }
        };

        let has_more = page.has_more;
        if outcome.is_unchanged() {
            tracing::debug!("{} page brought nothing new", direction.label());
            self.pagination
                .finish(direction, Resolution::Empty { has_more }, now);
            return Task::none();
        }

        tracing::debug!(
            "Merged {} page: {} new, {} updated",
            direction.label(),
            outcome.inserted,
            outcome.updated
        );
        let inserted = outcome.inserted;
        self.replace_actions(outcome.actions, false);
        let resolution = if inserted == 0 {
            Resolution::Empty { has_more }
        } else {
            Resolution::Merged { has_more }
        };
        self.pagination.finish(direction, resolution, now);
        self.paginate()
    }

    fn on_actions_received(&mut self, actions: Vec<ReportAction>) -> Task {
        if actions.is_empty() {
            return Task::none();
        }
        let older_open = !self.pagination.is_exhausted(Direction::Older);
        let newer_open = !self.pagination.is_exhausted(Direction::Newer);
        let (admitted, held): (Vec<_>, Vec<_>) = actions
            .into_iter()
            .partition(|a| self.timeline.snapshot.admits(a, older_open, newer_open));
        if !held.is_empty() {
            // Pages on the open side deliver these once the gap is loaded.
            tracing::debug!("Leaving {} actions beyond the loaded range to pagination", held.len());
            self.timeline.has_unseen = true;
        }

        let pinned = self.at_newest_edge();
        let outcome = timeline::upsert(self.timeline.snapshot.actions(), &admitted, self.timeline.order());
        if outcome.is_unchanged() {
            return Task::none();
        }
        let inserted = outcome.inserted;
        self.replace_actions(outcome.actions, pinned);
        if inserted > 0 && !pinned {
            self.timeline.has_unseen = true;
        }
        Task::none()
    }

    /// Swap in a new sequence in one step and keep the reader's place.
    fn replace_actions(&mut self, actions: Vec<ReportAction>, follow_newest: bool) {
        let capture = anchor::capture(&self.virtualizer, &self.timeline.snapshot, self.viewport);
        self.timeline.replace(actions);
        self.virtualizer.relayout(&self.timeline.snapshot);
        self.viewport.offset = if follow_newest {
            self.newest_edge_offset()
        } else {
            anchor::restore(
                &capture,
                &self.virtualizer,
                &self.timeline.snapshot,
                self.viewport.height,
            )
        };
        self.refresh_window();
    }

    // -- Pagination --

    fn paginate(&mut self) -> Task {
        let now = Instant::now();
        let mut tasks = Vec::new();
        for direction in [Direction::Older, Direction::Newer] {
            if !self.near_edge(direction) {
                continue;
            }
            if let Some(generation) = self.pagination.try_begin(direction, now) {
                tasks.push(self.request(direction, generation));
            }
        }
        Task::batch(tasks)
    }

    fn request(&self, direction: Direction, generation: u64) -> Task {
        let cursor = self.timeline.snapshot.boundary(direction);
        tracing::debug!(
            "Requesting {} actions from {:?}",
            direction.label(),
            cursor.map(|c| c.id)
        );
        let load = match direction {
            Direction::Older => self.loader.load_older(cursor),
            Direction::Newer => self.loader.load_newer(cursor),
        };
        Task::future(async move {
            Message::LoadFinished {
                direction,
                generation,
                result: load.await,
            }
        })
    }

    /// The render window reaches the loaded boundary on the `direction` side.
    fn near_edge(&self, direction: Direction) -> bool {
        if self.viewport.height <= 0.0 {
            return false;
        }
        let margin = self.virtualizer.overscan();
        if self.timeline.order().is_leading(direction) {
            self.viewport.offset <= margin
        } else {
            self.virtualizer.content_height() - self.viewport.bottom() <= margin
        }
    }

    fn newest_edge_offset(&self) -> f64 {
        match self.timeline.order() {
            SortOrder::NewestFirst => 0.0,
            SortOrder::OldestFirst => self.virtualizer.max_offset(self.viewport.height),
        }
    }

    fn at_newest_edge(&self) -> bool {
        (self.viewport.offset - self.newest_edge_offset()).abs() <= EDGE_EPSILON
    }

    // -- Rendering --

    fn refresh_window(&mut self) {
        let mounted = self.virtualizer.mount(&self.timeline.snapshot, self.viewport);
        let snapshot = &self.timeline.snapshot;
        let mut rows = Vec::with_capacity(mounted.len());
        for item in mounted {
            let Some(action) = snapshot.get(item.index) else {
                continue;
            };
            let author = author_name(&self.personal_details, action.actor);
            let props = RowProps {
                action,
                author: &author,
                is_grouped: snapshot.is_grouped(item.index),
                is_own: action.actor == self.current_user.account_id,
            };
            let fp = fingerprint(&props);
            let needs_render = item.entered || self.drawn.get(&item.id) != Some(&fp);
            if needs_render {
                self.tracker.record(item.id, fp);
                self.drawn.insert(item.id, fp);
            }
            rows.push(Row { item, needs_render });
        }
        let mounted_ids: HashSet<ActionId> = rows.iter().map(|r| r.item.id).collect();
        self.drawn.retain(|id, _| mounted_ids.contains(id));
        self.rows = rows;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use crate::data::mock::{fake_personal_details, fake_report, mocked_sorted_report_actions, CURRENT_USER};
    use crate::data::source::NoMoreData;
    use crate::message::{ContentOffset, Dimensions};
    use crate::report::{ActionPayload, DeliveryStatus, Page};

    fn props(actions: Vec<ReportAction>, settings: ListSettings) -> ListProps {
        let details = fake_personal_details();
        ListProps {
            current_user: details[&CURRENT_USER].clone(),
            personal_details: details,
            settings,
            ..ListProps::new(fake_report(), actions, Arc::new(NoMoreData))
        }
    }

    fn scroll(y: f64, height: f64) -> Message {
        Message::Scrolled(ScrollEvent {
            content_offset: ContentOffset { y },
            content_size: Dimensions::default(),
            layout_measurement: Dimensions { height, width: 100.0 },
        })
    }

    #[test]
    fn opens_at_newest_edge() {
        let settings = ListSettings::default();
        let list = ReportActionsList::new(props(
            mocked_sorted_report_actions(200, SortOrder::OldestFirst),
            settings.clone(),
        ));
        let view = list.view();
        assert_eq!(view.test_id, TEST_ID);
        assert!((view.scroll_offset - (view.content_height - view.viewport_height)).abs() < 1e-6);
        assert_eq!(view.items.last().unwrap().id, ActionId(200));

        let mut settings = settings;
        settings.order = SortOrder::NewestFirst;
        let list = ReportActionsList::new(props(
            mocked_sorted_report_actions(200, SortOrder::NewestFirst),
            settings,
        ));
        let view = list.view();
        assert_eq!(view.scroll_offset, 0.0);
        assert_eq!(view.items.first().unwrap().id, ActionId(200));
    }

    #[test]
    fn unsorted_initial_actions_are_sorted() {
        let mut actions = mocked_sorted_report_actions(20, SortOrder::OldestFirst);
        actions.swap(3, 7);
        actions.push(actions[0].clone());
        let list = ReportActionsList::new(props(actions, ListSettings::default()));
        let snapshot = list.snapshot();
        assert_eq!(snapshot.len(), 20);
        assert!(is_strictly_sorted(snapshot.actions(), SortOrder::OldestFirst));
    }

    #[test]
    fn items_carry_label_author_and_ownership() {
        let list = ReportActionsList::new(props(
            mocked_sorted_report_actions(14, SortOrder::OldestFirst),
            ListSettings::default(),
        ));
        let view = list.view();
        assert_eq!(view.items.len(), 14);
        assert!(!view.find_all_by_label("Chat message").is_empty());
        let own = view.items.iter().find(|i| i.is_own).unwrap();
        assert_eq!(own.author, "Email Five");
        assert!(view.items.iter().all(|i| i.needs_render));
    }

    #[test]
    fn scroll_notifies_host() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut p = props(
            mocked_sorted_report_actions(100, SortOrder::OldestFirst),
            ListSettings::default(),
        );
        p.on_scroll = Some(Box::new(move |e: &ScrollEvent| {
            sink.lock().unwrap().push(e.content_offset.y);
        }));
        let mut list = ReportActionsList::new(p);
        list.update(scroll(640.0, 320.0));
        assert_eq!(*seen.lock().unwrap(), vec![640.0]);
        assert_eq!(list.viewport().offset, 640.0);
        assert_eq!(list.viewport().height, 320.0);
    }

    #[test]
    fn layout_notifies_host_and_keeps_newest_pinned() {
        let seen = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&seen);
        let mut p = props(
            mocked_sorted_report_actions(100, SortOrder::OldestFirst),
            ListSettings::default(),
        );
        p.on_layout = Some(Box::new(move |_: &LayoutEvent| {
            *sink.lock().unwrap() += 1;
        }));
        let mut list = ReportActionsList::new(p);
        list.update(Message::Layout(LayoutEvent {
            height: 300.0,
            width: 375.0,
        }));
        assert_eq!(*seen.lock().unwrap(), 1);
        let v = list.viewport();
        assert!((v.offset - list.virtualizer().max_offset(300.0)).abs() < 1e-6);
    }

    #[test]
    fn rapid_scrolls_issue_one_request_per_direction() {
        let mut settings = ListSettings::default();
        settings.order = SortOrder::OldestFirst;
        let mut list = ReportActionsList::new(ListProps {
            has_more_newer: true,
            ..props(mocked_sorted_report_actions(100, SortOrder::OldestFirst), settings)
        });

        // Sitting at the newest edge asks for newer actions.
        let mut requests = list.update(scroll(list.viewport().offset, 640.0)).len();
        for i in 0..20 {
            requests += list.update(scroll(f64::from(i), 640.0)).len();
        }
        assert_eq!(requests, 2);
        assert!(list.load_window().is_loading_older);
        assert!(list.load_window().is_loading_newer);
        assert!(list.view().older_placeholder);
    }

    #[test]
    fn stale_generation_is_discarded() {
        let mut list = ReportActionsList::new(props(
            mocked_sorted_report_actions(100, SortOrder::OldestFirst),
            ListSettings::default(),
        ));
        let before = list.snapshot();
        let task = list.update(Message::LoadFinished {
            direction: Direction::Older,
            generation: 42,
            result: Ok(Page {
                actions: Vec::new(),
                has_more: true,
            }),
        });
        assert!(task.is_empty());
        assert!(Arc::ptr_eq(&before, &list.snapshot()));
    }

    #[test]
    fn measurement_above_viewport_does_not_move_content() {
        let mut list = ReportActionsList::new(props(
            mocked_sorted_report_actions(200, SortOrder::OldestFirst),
            ListSettings::default(),
        ));
        list.update(scroll(3_000.0, 640.0));
        let anchor = list.view().items.iter().find(|i| i.top >= 3_000.0).unwrap().id;
        let before = list.offset_in_viewport(anchor).unwrap();

        // Grow a row far above the viewport.
        let above = list.snapshot().get(5).unwrap().id;
        list.update(Message::ItemMeasured {
            id: above,
            height: 500.0,
        });

        let after = list.offset_in_viewport(anchor).unwrap();
        assert!((before - after).abs() < 0.5);
        assert!(list.virtualizer().is_measured(5));
    }

    #[test]
    fn rendered_rows_report_whether_they_were_measured() {
        let mut list = ReportActionsList::new(props(
            mocked_sorted_report_actions(14, SortOrder::OldestFirst),
            ListSettings::default(),
        ));
        let view = list.view();
        assert!(view.items.iter().all(|i| !i.measured));

        let id = view.items[2].id;
        list.update(Message::ItemMeasured { id, height: 90.0 });
        let view = list.view();
        let row = view.items.iter().find(|i| i.id == id).unwrap();
        assert!(row.measured);
        assert_eq!(row.height, 90.0);
        assert_eq!(view.items.iter().filter(|i| i.measured).count(), 1);
    }

    #[test]
    fn received_actions_follow_when_pinned() {
        let mut list = ReportActionsList::new(props(
            mocked_sorted_report_actions(50, SortOrder::OldestFirst),
            ListSettings::default(),
        ));
        let mut fresh = mocked_sorted_report_actions(51, SortOrder::OldestFirst)
            .pop()
            .unwrap();
        fresh.payload = ActionPayload::Text {
            body: "hello".into(),
        };
        list.update(Message::ActionsReceived(vec![fresh]));
        let view = list.view();
        assert_eq!(view.items.last().unwrap().id, ActionId(51));
        assert!(!view.show_new_messages);
    }

    #[test]
    fn received_actions_raise_indicator_when_reading_history() {
        let mut list = ReportActionsList::new(props(
            mocked_sorted_report_actions(200, SortOrder::OldestFirst),
            ListSettings::default(),
        ));
        list.update(scroll(2_000.0, 640.0));
        let fresh = mocked_sorted_report_actions(201, SortOrder::OldestFirst)
            .pop()
            .unwrap();
        list.update(Message::ActionsReceived(vec![fresh]));
        assert_eq!(list.viewport().offset, 2_000.0);
        assert!(list.view().show_new_messages);

        list.update(Message::ScrollToNewest);
        assert!(!list.view().show_new_messages);
    }

    #[test]
    fn received_actions_past_open_newer_side_are_left_to_pagination() {
        let all = mocked_sorted_report_actions(60, SortOrder::OldestFirst);
        let mut list = ReportActionsList::new(ListProps {
            has_more_newer: true,
            ..props(all[..50].to_vec(), ListSettings::default())
        });
        let before = list.snapshot();

        list.update(Message::ActionsReceived(vec![all[59].clone()]));
        assert!(Arc::ptr_eq(&before, &list.snapshot()));
        assert!(list.view().show_new_messages);

        let mut edited = all[10].clone();
        edited.status = DeliveryStatus::Pending;
        list.update(Message::ActionsReceived(vec![edited.clone(), all[55].clone()]));
        let snapshot = list.snapshot();
        assert_eq!(snapshot.len(), 50);
        assert_eq!(snapshot.get(10), Some(&edited));
    }

    #[test]
    fn long_press_opens_context_menu_for_mounted_rows_only() {
        let mut list = ReportActionsList::new(props(
            mocked_sorted_report_actions(200, SortOrder::OldestFirst),
            ListSettings::default(),
        ));
        let mounted = list.view().items[0].id;
        list.update(Message::LongPress(ActionId(1)));
        assert_eq!(list.view().context_menu, None);

        list.update(Message::LongPress(mounted));
        assert_eq!(list.view().context_menu, Some(mounted));

        list.update(Message::DismissContextMenu);
        assert_eq!(list.view().context_menu, None);
    }

    #[test]
    fn archived_report_shows_skeleton_footer() {
        let mut p = props(Vec::new(), ListSettings::default());
        p.report.is_archived = true;
        let list = ReportActionsList::new(p);
        assert!(matches!(list.view().footer, Footer::ArchivedSkeleton(bar) if bar.animate));
    }

    #[test]
    fn opening_another_report_discards_pending_pages() {
        let mut list = ReportActionsList::new(props(
            mocked_sorted_report_actions(50, SortOrder::OldestFirst),
            ListSettings::default(),
        ));
        assert_eq!(list.update(scroll(0.0, 640.0)).len(), 1);
        let stale = list.pagination().generation();
        let first = list.view().items[0].id;
        list.update(Message::LongPress(first));

        let mut other = fake_report();
        other.id = 99;
        list.open_report(other, mocked_sorted_report_actions(10, SortOrder::OldestFirst), false, false);
        assert_eq!(list.view().context_menu, None);
        assert_eq!(list.snapshot().len(), 10);

        let task = list.update(Message::LoadFinished {
            direction: Direction::Older,
            generation: stale,
            result: Ok(Page {
                actions: Vec::new(),
                has_more: false,
            }),
        });
        assert!(task.is_empty());
        assert_eq!(list.snapshot().len(), 10);
        assert!(!list.pagination().is_requesting(Direction::Older));
    }

    #[test]
    fn teardown_ignores_everything_after() {
        let mut list = ReportActionsList::new(props(
            mocked_sorted_report_actions(50, SortOrder::OldestFirst),
            ListSettings::default(),
        ));
        list.update(Message::Teardown);
        assert!(!list.is_alive());
        assert!(list.view().items.is_empty());
        let before = list.snapshot();
        assert!(list.update(scroll(0.0, 640.0)).is_empty());
        list.update(Message::ActionsReceived(mocked_sorted_report_actions(60, SortOrder::OldestFirst)));
        assert!(Arc::ptr_eq(&before, &list.snapshot()));
    }

    #[test]
    fn render_tracking_flags_unchanged_rerenders() {
        let mut list = ReportActionsList::new(ListProps {
            dev: DevSettings {
                track_renders: true,
            },
            ..props(
                mocked_sorted_report_actions(300, SortOrder::OldestFirst),
                ListSettings::default(),
            )
        });
        let top = list.viewport().offset;
        list.update(scroll(0.0, 640.0));
        list.update(scroll(top, 640.0));
        let stats = list.render_stats();
        assert!(stats.renders > 0);
        assert!(stats.avoidable > 0);
    }
}
