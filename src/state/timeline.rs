use std::sync::Arc;

use crate::data::timeline::TimelineSnapshot;
use crate::report::{ActionId, ReportAction, SortOrder};

/// Mutable state around the ordered sequence. The sequence itself is only
/// ever swapped for a new snapshot, never edited in place.
pub struct TimelineState {
    pub snapshot: Arc<TimelineSnapshot>,
    /// Newer actions arrived while the user was reading elsewhere.
    pub has_unseen: bool,
    /// Action whose context menu is open after a long press.
    pub context_menu: Option<ActionId>,
    grouping_window: chrono::Duration,
}

impl TimelineState {
    pub fn new(actions: Vec<ReportAction>, order: SortOrder, grouping_window: chrono::Duration) -> Self {
        Self {
            snapshot: Arc::new(TimelineSnapshot::new(actions, order, grouping_window)),
            has_unseen: false,
            context_menu: None,
            grouping_window,
        }
    }

    pub fn order(&self) -> SortOrder {
        self.snapshot.order()
    }

    pub fn replace(&mut self, actions: Vec<ReportAction>) {
        let order = self.order();
        self.snapshot = Arc::new(TimelineSnapshot::new(actions, order, self.grouping_window));
        if let Some(id) = self.context_menu {
            if self.snapshot.position(id).is_none() {
                self.context_menu = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
        self.has_unseen = false;
        self.context_menu = None;
    }
}
