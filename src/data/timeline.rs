use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::LoadError;
use crate::report::{ActionId, Cursor, Direction, ReportAction, SortOrder};

/// Oldest to newest by creation time, ties broken by id.
pub fn chronological(a: &ReportAction, b: &ReportAction) -> Ordering {
    a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id))
}

/// Display order of two actions under `order`.
pub fn compare(a: &ReportAction, b: &ReportAction, order: SortOrder) -> Ordering {
    match order {
        SortOrder::OldestFirst => chronological(a, b),
        SortOrder::NewestFirst => chronological(a, b).reverse(),
    }
}

/// True when every adjacent pair is strictly ordered. Duplicate ids fail this.
pub fn is_strictly_sorted(actions: &[ReportAction], order: SortOrder) -> bool {
    actions
        .windows(2)
        .all(|w| compare(&w[0], &w[1], order) == Ordering::Less)
}

/// Result of folding a batch of actions into a sequence.
#[derive(Clone, Debug)]
pub struct MergeOutcome {
    pub actions: Vec<ReportAction>,
    pub inserted: usize,
    pub updated: usize,
}

impl MergeOutcome {
    pub fn is_unchanged(&self) -> bool {
        self.inserted == 0 && self.updated == 0
    }
}

/// Merge a page fetched in `direction` into `existing`.
///
/// Actions already present are replaced only when their content differs.
/// Actions not yet present must lie strictly beyond the loaded boundary on the
/// requested side, and the page itself must be strictly sorted.
pub fn merge_page(
    existing: &[ReportAction],
    page: &[ReportAction],
    direction: Direction,
    order: SortOrder,
) -> Result<MergeOutcome, LoadError> {
    if !is_strictly_sorted(page, order) {
        return Err(LoadError::MalformedPage(format!(
            "{} page is not strictly sorted",
            direction.label()
        )));
    }

    let known = index_by_id(existing);
    let boundary = match direction {
        Direction::Older => existing.iter().min_by(|a, b| chronological(a, b)),
        Direction::Newer => existing.iter().max_by(|a, b| chronological(a, b)),
    };

    if let Some(boundary) = boundary {
        let expected = match direction {
            Direction::Older => Ordering::Less,
            Direction::Newer => Ordering::Greater,
        };
        if let Some(overlap) = page
            .iter()
            .filter(|a| !known.contains_key(&a.id))
            .find(|a| chronological(a, boundary) != expected)
        {
            return Err(LoadError::MalformedPage(format!(
                "action {} overlaps the loaded window on the {} side",
                overlap.id,
                direction.label()
            )));
        }
    }

    Ok(apply(existing, page, known, order))
}

/// Fold newly sent or received actions into `existing`. The source is trusted,
/// so no boundary validation happens; duplicates collapse and the latest wins.
pub fn upsert(existing: &[ReportAction], incoming: &[ReportAction], order: SortOrder) -> MergeOutcome {
    apply(existing, incoming, index_by_id(existing), order)
}

fn index_by_id(actions: &[ReportAction]) -> HashMap<ActionId, usize> {
    actions.iter().enumerate().map(|(i, a)| (a.id, i)).collect()
}

fn apply(
    existing: &[ReportAction],
    incoming: &[ReportAction],
    mut known: HashMap<ActionId, usize>,
    order: SortOrder,
) -> MergeOutcome {
    let mut actions = existing.to_vec();
    let mut inserted = 0;
    let mut updated = 0;
    let mut resort = false;

    for action in incoming {
        match known.get(&action.id) {
            Some(&i) => {
                if actions[i] != *action {
                    resort |= actions[i].created != action.created;
                    actions[i] = action.clone();
                    updated += 1;
                }
            }
            None => {
                known.insert(action.id, actions.len());
                actions.push(action.clone());
                inserted += 1;
            }
        }
    }

    if inserted > 0 || resort {
        actions.sort_by(|a, b| compare(a, b, order));
    }

    MergeOutcome {
        actions,
        inserted,
        updated,
    }
}

/// Immutable view of the ordered sequence. Replaced wholesale on every write.
#[derive(Clone, Debug, Default)]
pub struct TimelineSnapshot {
    actions: Vec<ReportAction>,
    grouped: Vec<bool>,
    index: HashMap<ActionId, usize>,
    order: SortOrder,
}

impl TimelineSnapshot {
    pub fn new(actions: Vec<ReportAction>, order: SortOrder, grouping_window: chrono::Duration) -> Self {
        let grouped = group_flags(&actions, order, grouping_window);
        let index = index_by_id(&actions);
        Self {
            actions,
            grouped,
            index,
            order,
        }
    }

    pub fn actions(&self) -> &[ReportAction] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn get(&self, idx: usize) -> Option<&ReportAction> {
        self.actions.get(idx)
    }

    pub fn position(&self, id: ActionId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Whether the action at `idx` folds under its predecessor's header.
    pub fn is_grouped(&self, idx: usize) -> bool {
        self.grouped.get(idx).copied().unwrap_or(false)
    }

    /// The loaded boundary on the `direction` side.
    pub fn boundary(&self, direction: Direction) -> Option<Cursor> {
        self.edge(direction).map(ReportAction::cursor)
    }

    fn edge(&self, direction: Direction) -> Option<&ReportAction> {
        if self.order.is_leading(direction) {
            self.actions.first()
        } else {
            self.actions.last()
        }
    }

    /// Whether `action` can join the sequence without leaving a hole in the
    /// loaded range. Past a side that still has unloaded history, actions
    /// must arrive through that side's pages.
    pub fn admits(&self, action: &ReportAction, older_open: bool, newer_open: bool) -> bool {
        if self.index.contains_key(&action.id) {
            return true;
        }
        let (Some(oldest), Some(newest)) = (self.edge(Direction::Older), self.edge(Direction::Newer)) else {
            return true;
        };
        let before = older_open && chronological(action, oldest) == Ordering::Less;
        let after = newer_open && chronological(action, newest) == Ordering::Greater;
        !before && !after
    }
}

/// Mark actions that continue their chronological predecessor: same actor,
/// neither is a system event, and created within `window`.
fn group_flags(actions: &[ReportAction], order: SortOrder, window: chrono::Duration) -> Vec<bool> {
    let n = actions.len();
    (0..n)
        .map(|i| {
            let prev = match order {
                SortOrder::OldestFirst => i.checked_sub(1),
                SortOrder::NewestFirst => (i + 1 < n).then_some(i + 1),
            };
            prev.is_some_and(|p| {
                let (prev, cur) = (&actions[p], &actions[i]);
                !prev.is_system()
                    && !cur.is_system()
                    && prev.actor == cur.actor
                    && cur.created - prev.created <= window
            })
        })
        .collect()
}
